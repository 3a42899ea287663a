//! VCF parsing into [RawRecord]s.
//!
//! Reads a VCF file (plain text or gzipped/bgzf) one data line at a time. Header lines are
//! consumed up front so the sample names are known before the first record is returned.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use svcanon_core::errors::RecordParseError;
use svcanon_core::models::{InfoFields, RawRecord};
use svcanon_core::utils::{get_dynamic_reader, strip_chr};

use crate::error::{Result, VcfError};

const INFO_COLUMN: usize = 7;
const FORMAT_COLUMN: usize = 8;
const FIRST_SAMPLE_COLUMN: usize = 9;

/// Streaming reader over the data lines of a VCF.
pub struct VcfReader<R: BufRead> {
    reader: R,
    samples: Vec<String>,
    meta_lines: Vec<String>,
    // first data line, when the file has no #CHROM line
    pending: Option<std::result::Result<String, RecordParseError>>,
    line_buf: Vec<u8>,
    line_number: usize,
}

impl VcfReader<BufReader<Box<dyn Read>>> {
    /// Open a VCF file, auto-detecting gzip/bgzf compression.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let reader = get_dynamic_reader(path)?;
        Ok(VcfReader::new(reader)?)
    }
}

impl<R: BufRead> VcfReader<R> {
    /// Consume the header of `reader` and position it on the first data line.
    pub fn new(reader: R) -> Result<Self> {
        let mut vcf = VcfReader {
            reader,
            samples: Vec::new(),
            meta_lines: Vec::new(),
            pending: None,
            line_buf: Vec::new(),
            line_number: 0,
        };

        while vcf.next_line()? {
            if vcf.line_buf.starts_with(b"##") {
                let line = vcf.header_line();
                vcf.meta_lines.push(line);
            } else if vcf.line_buf.starts_with(b"#") {
                vcf.samples = vcf
                    .header_line()
                    .split('\t')
                    .skip(FIRST_SAMPLE_COLUMN)
                    .map(|s| s.to_string())
                    .collect();
                break;
            } else if !vcf.line_buf.trim_ascii().is_empty() {
                vcf.pending = Some(vcf.data_line());
                break;
            }
        }

        debug!(
            "VCF header: {} meta lines, {} samples",
            vcf.meta_lines.len(),
            vcf.samples.len()
        );
        Ok(vcf)
    }

    /// Sample names from the `#CHROM` header line.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// The `##` meta-information lines.
    pub fn meta_lines(&self) -> &[String] {
        &self.meta_lines
    }

    /// Read the next raw line into `line_buf`, without its line terminator.
    fn next_line(&mut self) -> Result<bool> {
        self.line_buf.clear();
        if self.reader.read_until(b'\n', &mut self.line_buf)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        while matches!(self.line_buf.last(), Some(b'\n') | Some(b'\r')) {
            self.line_buf.pop();
        }
        Ok(true)
    }

    // header text is informational only, stray bytes are replaced
    fn header_line(&self) -> String {
        String::from_utf8_lossy(&self.line_buf).into_owned()
    }

    fn data_line(&self) -> std::result::Result<String, RecordParseError> {
        String::from_utf8(self.line_buf.clone()).map_err(|_| RecordParseError::InvalidUtf8)
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let decoded = match self.pending.take() {
                Some(decoded) => decoded,
                None => match self.next_line() {
                    Ok(true) if self.line_buf.starts_with(b"#") => continue,
                    Ok(true) => self.data_line(),
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                },
            };

            let result = decoded.and_then(|line| {
                if line.trim().is_empty() {
                    Ok(None)
                } else {
                    parse_record(&line, &self.samples).map(Some)
                }
            });

            match result {
                Ok(None) => continue,
                Ok(Some(record)) => return Some(Ok(record)),
                Err(source) => {
                    return Some(Err(VcfError::Record {
                        line: self.line_number,
                        source,
                    }));
                }
            }
        }
    }
}

///
/// Parse one VCF data line.
///
/// # Arguments
/// - line: the tab-separated data line
/// - samples: sample names from the header, in column order
pub fn parse_record(line: &str, samples: &[String]) -> std::result::Result<RawRecord, RecordParseError> {
    let fields: Vec<String> = line.split('\t').map(|s| s.to_string()).collect();
    if fields.len() < 5 {
        return Err(RecordParseError::TooFewFields(fields.len()));
    }

    let pos = fields[1]
        .parse::<i64>()
        .map_err(|_| RecordParseError::InvalidPosition(fields[1].clone()))?;

    let info = match fields.get(INFO_COLUMN) {
        Some(text) => text.parse::<InfoFields>()?,
        None => InfoFields::default(),
    };

    // an empty ALT column (".") is kept as the empty allele
    let alt = if fields[4] == "." { "" } else { fields[4].as_str() };

    let gt_index = fields
        .get(FORMAT_COLUMN)
        .and_then(|format| format.split(':').position(|key| key == "GT"));

    let carriers = match gt_index {
        Some(idx) => samples
            .iter()
            .zip(fields.iter().skip(FIRST_SAMPLE_COLUMN))
            .filter(|(_, value)| {
                value
                    .split(':')
                    .nth(idx)
                    .map(genotype_has_alt)
                    .unwrap_or(false)
            })
            .map(|(name, _)| name.clone())
            .collect(),
        None => samples.to_vec(),
    };

    Ok(RawRecord {
        chrom: strip_chr(&fields[0]),
        pos,
        ref_allele: strip_chr(&fields[3]),
        alt: strip_chr(alt),
        info,
        carriers,
        has_genotypes: gt_index.is_some(),
        fields,
    })
}

/// Whether a GT value such as `0/1`, `1|0` or `./2` calls any non-reference allele.
pub fn genotype_has_alt(gt: &str) -> bool {
    gt.split(['/', '|'])
        .filter_map(|allele| allele.parse::<u32>().ok())
        .any(|allele| allele > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    const VCF: &str = "##fileformat=VCFv4.2\n\
##INFO=<ID=END,Number=1,Type=Integer,Description=\"End\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\tS3\n\
chr1\t100\tsv1\tG\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=200\tGT:DP\t0/1:10\t0/0:12\t./.:0\n\
chr2\t500\tsv2\tN\tN]chr17:1584563]\t.\tPASS\t.\tGT\t1|1\t0|0\t0|2\n";

    fn samples() -> Vec<String> {
        vec!["S1".to_string(), "S2".to_string()]
    }

    #[rstest]
    fn test_read_header_and_records() {
        let mut reader = VcfReader::new(Cursor::new(VCF)).unwrap();
        assert_eq!(reader.samples(), &["S1", "S2", "S3"]);
        assert_eq!(reader.meta_lines().len(), 2);

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.chrom, "1");
        assert_eq!(first.pos, 100);
        assert_eq!(first.info.end, Some(200));
        assert_eq!(first.carriers, vec!["S1"]);
        assert!(first.has_genotypes);
        assert_eq!(first.fields[0], "chr1");

        let second = reader.next().unwrap().unwrap();
        assert_eq!(second.alt, "N]17:1584563]");
        assert_eq!(second.carriers, vec!["S1", "S3"]);

        assert!(reader.next().is_none());
    }

    #[rstest]
    fn test_no_gt_means_all_samples_carry() {
        let line = "1\t100\t.\tG\t<DUP>\t.\tPASS\tEND=300\tDP\t10\t12";
        let record = parse_record(line, &samples()).unwrap();
        assert!(!record.has_genotypes);
        assert_eq!(record.carriers, samples());
    }

    #[rstest]
    fn test_sites_only_line() {
        let record = parse_record("X\t10\t.\tA\tAT", &[]).unwrap();
        assert_eq!(record.info, InfoFields::default());
        assert!(record.carriers.is_empty());
    }

    #[rstest]
    fn test_malformed_line_is_recoverable() {
        let text = "#CHROM\tPOS\tID\tREF\tALT\n1\tabc\t.\tA\tT\n1\t10\t.\tA\tT\n";
        let mut reader = VcfReader::new(Cursor::new(text)).unwrap();

        let err = reader.next().unwrap().unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(err, VcfError::Record { line: 2, .. }));

        let ok = reader.next().unwrap().unwrap();
        assert_eq!(ok.pos, 10);
    }

    #[rstest]
    fn test_invalid_utf8_line_is_recoverable() {
        let mut bytes = b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n".to_vec();
        bytes.extend_from_slice(b"1\t100\t.\tN\t<DEL>\t.\tPASS\tEND=200;NOTE=caf\xE9\n");
        bytes.extend_from_slice(b"1\t500\t.\tN\t<DUP>\t.\tPASS\tEND=900\n");
        let mut reader = VcfReader::new(Cursor::new(bytes)).unwrap();

        let err = reader.next().unwrap().unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            VcfError::Record { line: 2, source: RecordParseError::InvalidUtf8 }
        ));

        let ok = reader.next().unwrap().unwrap();
        assert_eq!(ok.pos, 500);
        assert!(reader.next().is_none());
    }

    #[rstest]
    fn test_latin1_in_header_is_tolerated() {
        let mut bytes = b"##source=caf\xE9\n".to_vec();
        bytes.extend_from_slice(b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n");
        bytes.extend_from_slice(b"1\t100\t.\tN\t<DEL>\t.\tPASS\tEND=200\tGT\t0/1\n");
        let mut reader = VcfReader::new(Cursor::new(bytes)).unwrap();

        assert_eq!(reader.samples(), &["S1"]);
        assert_eq!(reader.next().unwrap().unwrap().pos, 100);
    }

    #[rstest]
    fn test_headerless_input_with_bad_first_line() {
        let mut bytes = b"1\t10\t.\tA\tT\t.\t.\tX=\xFF\n".to_vec();
        bytes.extend_from_slice(b"1\t20\t.\tA\tT\n");
        let mut reader = VcfReader::new(Cursor::new(bytes)).unwrap();

        assert!(matches!(
            reader.next().unwrap(),
            Err(VcfError::Record { line: 1, source: RecordParseError::InvalidUtf8 })
        ));
        assert_eq!(reader.next().unwrap().unwrap().pos, 20);
    }

    #[rstest]
    fn test_headerless_input_keeps_first_line() {
        let mut reader = VcfReader::new(Cursor::new("1\t10\t.\tA\tT\n")).unwrap();
        assert!(reader.samples().is_empty());
        assert_eq!(reader.next().unwrap().unwrap().pos, 10);
    }

    #[rstest]
    #[case("0/1", true)]
    #[case("1|0", true)]
    #[case("0/0", false)]
    #[case("./.", false)]
    #[case("./2", true)]
    #[case("1", true)]
    fn test_genotype_has_alt(#[case] gt: &str, #[case] expected: bool) {
        assert_eq!(genotype_has_alt(gt), expected);
    }

    #[rstest]
    fn test_too_few_fields() {
        assert_eq!(
            parse_record("1\t10\t.", &[]).unwrap_err(),
            RecordParseError::TooFewFields(3)
        );
    }
}
