use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use svcanon_core::consts::{SAMPLES_ID_COLUMN, SV_TYPE_COLUMN, VCF_COLUMNS};
use svcanon_core::errors::RejectReason;
use svcanon_core::models::CanonicalRecord;
use svcanon_core::utils::get_dynamic_reader;

fn create_with_parents(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    File::create(path)
}

///
/// An output file on disk, plain or gzip-compressed.
///
/// [OutputFile::close] must be called to write the gzip trailer and see its errors.
///
pub enum OutputFile {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputFile {
    /// Create `path` (and its parent directories), truncating any previous content.
    /// A `.gz` extension selects gzip compression.
    pub fn create<T: AsRef<Path>>(path: T) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = BufWriter::new(create_with_parents(path)?);

        if path.extension().is_some_and(|ext| ext == "gz") {
            Ok(OutputFile::Gzip(GzEncoder::new(file, Compression::best())))
        } else {
            Ok(OutputFile::Plain(file))
        }
    }

    /// Flush everything, including the gzip trailer.
    pub fn close(self) -> std::io::Result<()> {
        match self {
            OutputFile::Plain(mut writer) => writer.flush(),
            OutputFile::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputFile::Plain(writer) => writer.write(buf),
            OutputFile::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputFile::Plain(writer) => writer.flush(),
            OutputFile::Gzip(encoder) => encoder.flush(),
        }
    }
}

///
/// Streaming writer for the canonical BED-like output.
///
pub struct BedRecordWriter<W: Write> {
    writer: W,
    with_samples: bool,
    written: usize,
}

impl BedRecordWriter<OutputFile> {
    ///
    /// Create a writer on disk, gzip-compressed when the path ends in `.gz`
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - with_samples: emit the sample list column
    pub fn to_path<T: AsRef<Path>>(path: T, with_samples: bool) -> std::io::Result<Self> {
        Ok(BedRecordWriter::new(OutputFile::create(path)?, with_samples))
    }
}

impl<W: Write> BedRecordWriter<W> {
    pub fn new(writer: W, with_samples: bool) -> Self {
        BedRecordWriter {
            writer,
            with_samples,
            written: 0,
        }
    }

    pub fn write_record(&mut self, record: &CanonicalRecord) -> std::io::Result<()> {
        writeln!(self.writer, "{}", record.as_string(self.with_samples))?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the inner writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

///
/// Writer for the rejection log: one `"{identifier}: {reason}"` line per record.
///
pub struct RejectionLog<W: Write> {
    writer: W,
    written: usize,
}

impl RejectionLog<OutputFile> {
    ///
    /// Start a fresh log for this run, replacing any earlier one
    ///
    /// # Arguments
    /// - path: the path to the log file
    pub fn to_path<T: AsRef<Path>>(path: T) -> std::io::Result<Self> {
        Ok(RejectionLog::new(OutputFile::create(path)?))
    }
}

impl<W: Write> RejectionLog<W> {
    pub fn new(writer: W) -> Self {
        RejectionLog { writer, written: 0 }
    }

    pub fn write_rejection(&mut self, id: &str, reason: &RejectReason) -> std::io::Result<()> {
        writeln!(self.writer, "{}: {}", id, reason)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

///
/// Column names describing the fields after `chrom, start, end` in the canonical output
///
/// # Arguments
/// - samples: sample names of the input VCF
/// - with_samples: the sample list column is emitted
/// - full_info: all input columns from ID onward are carried through, otherwise only REF,
///   ALT and FORMAT
pub fn output_header_columns(samples: &[String], with_samples: bool, full_info: bool) -> Vec<String> {
    let mut columns = vec![SV_TYPE_COLUMN.to_string()];
    if with_samples {
        columns.push(SAMPLES_ID_COLUMN.to_string());
    }

    if full_info {
        columns.extend(VCF_COLUMNS[2..].iter().map(|c| c.to_string()));
    } else {
        columns.extend([VCF_COLUMNS[3], VCF_COLUMNS[4], VCF_COLUMNS[8]].map(String::from));
    }
    columns.extend(samples.iter().cloned());

    columns
}

/// Write a single tab-joined header line to `path`.
pub fn write_header_file<T: AsRef<Path>>(path: T, columns: &[String]) -> std::io::Result<()> {
    let mut file = create_with_parents(path.as_ref())?;
    writeln!(file, "{}", columns.join("\t"))?;
    Ok(())
}

///
/// Copy the leading `#` header lines of a BED input into `header_path`
///
/// Blank lines before the first data line are skipped. Returns the number of header lines.
///
/// # Arguments
/// - bed_path: the BED input, optionally gzipped
/// - header_path: where to write the header lines
pub fn extract_bed_header(bed_path: &Path, header_path: &Path) -> anyhow::Result<usize> {
    let reader = get_dynamic_reader(bed_path)?;
    let mut header = create_with_parents(header_path)?;

    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if !line.starts_with('#') {
            break;
        }
        writeln!(header, "{}", line)?;
        count += 1;
    }

    Ok(count)
}
