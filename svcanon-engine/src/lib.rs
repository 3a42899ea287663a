//! Normalization and identity assignment for structural-variant records.
//!
//! Input VCFs describe the same kind of event in several notations (symbolic alleles,
//! breakends, full sequences). This crate reduces each record to a canonical
//! `(chrom, start, end, type, length, id)` or rejects it with a reason.
//!
//! ## Pipeline
//!
//! - [classify](classify::classify): which notation applies, and the END/type it implies
//! - [normalize](normalize::normalize): ordering, zero-width and confidence-interval fixes
//! - [partition](partition::partition): accept or reject, after issuing an identifier
//! - [IdentityRegistry]: one identifier per distinct `(event key, ref, alt)`
//! - [StreamDriver]: runs the above one record at a time into a [RecordSink]
//!
//! ## Quick Start
//!
//! ```rust
//! use svcanon_engine::{MemorySink, RunConfig, StreamDriver};
//! use svcanon_io::vcf::VcfReader;
//!
//! let vcf = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
//! 1\t100\t.\tG\t<DEL>\t.\tPASS\tEND=200\n";
//! let reader = VcfReader::new(vcf.as_bytes()).unwrap();
//!
//! let mut sink = MemorySink::default();
//! let summary = StreamDriver::new(RunConfig::default())
//!     .run(reader, &mut sink)
//!     .unwrap();
//!
//! assert_eq!(summary.accepted, 1);
//! assert_eq!(sink.accepted[0].id, "1_100_200_DEL_1");
//! ```
pub mod annotation;
pub mod classify;
pub mod config;
pub mod driver;
pub mod identity;
pub mod normalize;
pub mod partition;

pub use annotation::{AnnotationSource, AnnotationStatus, survey_sources};
pub use config::{AnnotationTrack, ConfigError, RunConfig};
pub use driver::{DriverError, MemorySink, OutputChannels, RecordSink, RunSummary, StreamDriver};
pub use identity::IdentityRegistry;
pub use partition::Disposition;
