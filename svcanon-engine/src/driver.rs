//! The record-by-record pipeline.
//!
//! [StreamDriver::run] pulls records from a reader and pushes each through
//! classify, normalize and partition before emitting it to a [RecordSink]. Rejected
//! records are emitted too, on the rejection channel.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use fxhash::FxHashMap as HashMap;
use log::{debug, info, warn};
use thiserror::Error;

use svcanon_core::errors::RejectReason;
use svcanon_core::models::{CanonicalRecord, RawRecord};
use svcanon_io::bed::{BedRecordWriter, OutputFile, RejectionLog};
use svcanon_io::error::VcfError;

use crate::classify::{Classification, classify};
use crate::config::RunConfig;
use crate::identity::IdentityRegistry;
use crate::normalize::{Coordinates, normalize};
use crate::partition::{Disposition, partition};

const FIRST_SAMPLE_COLUMN: usize = 9;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("Failed to read input: {0}")]
    Input(#[source] VcfError),
}

/// Destination of the two output channels.
pub trait RecordSink {
    fn accept(&mut self, record: &CanonicalRecord) -> io::Result<()>;

    fn reject(&mut self, id: &str, reason: &RejectReason) -> io::Result<()>;
}

/// The canonical BED stream plus the rejection log.
pub struct OutputChannels<A: Write, B: Write> {
    pub canonical: BedRecordWriter<A>,
    pub rejections: RejectionLog<B>,
}

impl<A: Write, B: Write> OutputChannels<A, B> {
    pub fn new(canonical: BedRecordWriter<A>, rejections: RejectionLog<B>) -> Self {
        OutputChannels {
            canonical,
            rejections,
        }
    }

    /// Flush both channels.
    pub fn finish(self) -> io::Result<(A, B)> {
        Ok((self.canonical.finish()?, self.rejections.finish()?))
    }
}

impl OutputChannels<OutputFile, OutputFile> {
    /// Flush both files to disk, surfacing errors from the gzip trailer.
    pub fn close(self) -> io::Result<()> {
        let (canonical, rejections) = self.finish()?;
        canonical.close()?;
        rejections.close()
    }
}

impl<A: Write, B: Write> RecordSink for OutputChannels<A, B> {
    fn accept(&mut self, record: &CanonicalRecord) -> io::Result<()> {
        self.canonical.write_record(record)
    }

    fn reject(&mut self, id: &str, reason: &RejectReason) -> io::Result<()> {
        self.rejections.write_rejection(id, reason)
    }
}

/// Collects dispositions in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub accepted: Vec<CanonicalRecord>,
    pub rejected: Vec<(String, RejectReason)>,
}

impl RecordSink for MemorySink {
    fn accept(&mut self, record: &CanonicalRecord) -> io::Result<()> {
        self.accepted.push(record.clone());
        Ok(())
    }

    fn reject(&mut self, id: &str, reason: &RejectReason) -> io::Result<()> {
        self.rejected.push((id.to_string(), reason.clone()));
        Ok(())
    }
}

/// Counters of one run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub records_read: usize,
    pub accepted: usize,
    /// Rejections per [RejectReason::label].
    pub rejected: BTreeMap<&'static str, usize>,
    /// Lines skipped because they could not be parsed.
    pub malformed: usize,
    /// Records carrying sample columns.
    pub records_with_samples: usize,
    /// Records whose FORMAT declares GT.
    pub records_with_gt: usize,
    /// Length of every accepted event whose length is known.
    pub sv_lengths: HashMap<String, i64>,
    pub stopped_early: bool,
}

impl RunSummary {
    /// No canonical record was produced.
    pub fn is_empty(&self) -> bool {
        self.accepted == 0
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    /// The input has samples but not a single record declares GT, so every sample was
    /// reported as a carrier.
    pub fn gt_missing(&self) -> bool {
        self.records_with_samples > 0 && self.records_with_gt == 0
    }
}

/// Pipeline stages. Each carries what the next one needs.
#[derive(Debug)]
pub enum DriverState {
    AwaitRecord,
    Parse(Result<RawRecord, VcfError>),
    Classify(RawRecord),
    Normalize(RawRecord, Classification),
    Partition(RawRecord, Classification, Option<Coordinates>),
    Emit(Disposition),
    Done,
}

pub struct StreamDriver {
    config: RunConfig,
    registry: IdentityRegistry,
    stop: Option<Arc<AtomicBool>>,
}

impl StreamDriver {
    pub fn new(config: RunConfig) -> Self {
        StreamDriver {
            config,
            registry: IdentityRegistry::new(),
            stop: None,
        }
    }

    /// Stop before the next record once `flag` is set.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Run the stages that need no I/O.
    fn advance(&mut self, state: DriverState) -> DriverState {
        match state {
            DriverState::Classify(record) => {
                let classification = classify(&record, self.config.sv_min_size);
                DriverState::Normalize(record, classification)
            }
            DriverState::Normalize(record, classification) => {
                let coordinates = classification.end.map(|end| {
                    normalize(
                        record.pos,
                        end,
                        classification.derived_length,
                        &record.info,
                        self.config.include_ci,
                    )
                });
                DriverState::Partition(record, classification, coordinates)
            }
            DriverState::Partition(record, classification, coordinates) => {
                let mut disposition = partition(
                    &record,
                    &classification,
                    coordinates,
                    &mut self.registry,
                    self.config.sv_min_size,
                );
                if let Disposition::Accept(canonical) = &mut disposition {
                    canonical.extra = extra_fields(&record, self.config.sv_input_info);
                }
                DriverState::Emit(disposition)
            }
            other => other,
        }
    }

    /// Push one record through classify, normalize and partition.
    pub fn process(&mut self, record: RawRecord) -> Disposition {
        let mut state = DriverState::Classify(record);
        loop {
            state = match state {
                DriverState::Emit(disposition) => return disposition,
                other => self.advance(other),
            };
        }
    }

    ///
    /// Drive every record of `records` to `sink`.
    ///
    /// Malformed lines are skipped with a warning. An empty canonical stream is reported
    /// through [RunSummary::is_empty], not as an error.
    ///
    pub fn run<I, S>(&mut self, records: I, sink: &mut S) -> Result<RunSummary, DriverError>
    where
        I: IntoIterator<Item = Result<RawRecord, VcfError>>,
        S: RecordSink + ?Sized,
    {
        let mut records = records.into_iter();
        let mut summary = RunSummary::default();
        let mut state = DriverState::AwaitRecord;

        loop {
            state = match state {
                DriverState::AwaitRecord => {
                    if self.stop_requested() {
                        summary.stopped_early = true;
                        DriverState::Done
                    } else {
                        match records.next() {
                            Some(item) => DriverState::Parse(item),
                            None => DriverState::Done,
                        }
                    }
                }
                DriverState::Parse(Ok(record)) => {
                    summary.records_read += 1;
                    if record.fields.len() > FIRST_SAMPLE_COLUMN {
                        summary.records_with_samples += 1;
                    }
                    if record.has_genotypes {
                        summary.records_with_gt += 1;
                    }
                    DriverState::Classify(record)
                }
                DriverState::Parse(Err(e)) if e.is_recoverable() => {
                    warn!("Skipping line: {}", e);
                    summary.malformed += 1;
                    DriverState::AwaitRecord
                }
                DriverState::Parse(Err(e)) => return Err(DriverError::Input(e)),
                DriverState::Emit(disposition) => {
                    match &disposition {
                        Disposition::Accept(record) => {
                            sink.accept(record)?;
                            summary.accepted += 1;
                            if let Some(length) = record.length {
                                summary.sv_lengths.insert(record.id.clone(), length);
                            }
                        }
                        Disposition::Reject { id, reason } => {
                            debug!("{} rejected: {}", id, reason);
                            sink.reject(id, reason)?;
                            *summary.rejected.entry(reason.label()).or_insert(0) += 1;
                        }
                    }
                    DriverState::AwaitRecord
                }
                DriverState::Done => break,
                other => self.advance(other),
            };
        }

        if summary.gt_missing() {
            warn!("No record has GT in FORMAT, every sample is reported as a carrier");
        }
        info!(
            "{} records read, {} accepted, {} rejected, {} malformed",
            summary.records_read,
            summary.accepted,
            summary.rejected_total(),
            summary.malformed
        );

        Ok(summary)
    }
}

/// Input columns carried after the canonical ones.
fn extra_fields(record: &RawRecord, full_info: bool) -> Vec<String> {
    if full_info {
        return record.fields.get(2..).map(<[String]>::to_vec).unwrap_or_default();
    }

    [3, 4]
        .iter()
        .filter_map(|&i| record.fields.get(i))
        .chain(record.fields.iter().skip(8))
        .cloned()
        .collect()
}
