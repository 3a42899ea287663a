use std::str::FromStr;

use crate::errors::RecordParseError;
use crate::utils::strip_chr;

///
/// The recognised keys of a VCF INFO column.
///
/// Unknown keys and flags are ignored; `.` values count as absent.
///
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct InfoFields {
    pub end: Option<i64>,
    pub sv_type: Option<String>,
    pub sv_len: Option<i64>,
    pub cipos: Option<(i64, i64)>,
    pub ciend: Option<(i64, i64)>,
}

fn parse_integer(key: &str, value: &str) -> Result<Option<i64>, RecordParseError> {
    // multi-valued SVLEN: keep the first allele's value
    let first = value.split(',').next().unwrap_or(value);
    if first == "." || first.is_empty() {
        return Ok(None);
    }
    first
        .parse::<i64>()
        .map(Some)
        .map_err(|_| RecordParseError::InvalidInfoInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_pair(key: &str, value: &str) -> Result<Option<(i64, i64)>, RecordParseError> {
    if value == "." {
        return Ok(None);
    }
    let invalid = || RecordParseError::InvalidInfoPair {
        key: key.to_string(),
        value: value.to_string(),
    };
    let (low, high) = value.split_once(',').ok_or_else(invalid)?;
    let low = low.parse::<i64>().map_err(|_| invalid())?;
    let high = high.parse::<i64>().map_err(|_| invalid())?;
    Ok(Some((low, high)))
}

impl FromStr for InfoFields {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut info = InfoFields::default();
        if s == "." || s.is_empty() {
            return Ok(info);
        }

        for entry in s.split(';') {
            let Some((key, value)) = entry.split_once('=') else {
                continue;
            };
            match key {
                "END" => info.end = parse_integer(key, value)?,
                "SVLEN" => info.sv_len = parse_integer(key, value)?,
                "SVTYPE" => {
                    info.sv_type = Some(value.to_string()).filter(|v| !v.is_empty() && v != ".")
                }
                "CIPOS" => info.cipos = parse_pair(key, value)?,
                "CIEND" => info.ciend = parse_pair(key, value)?,
                _ => {}
            }
        }

        Ok(info)
    }
}

///
/// RawRecord struct, one variant line as read from the input.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawRecord {
    /// Chromosome with every "chr" removed.
    pub chrom: String,
    /// 1-based position.
    pub pos: i64,
    pub ref_allele: String,
    /// Comma-joined alternate alleles.
    pub alt: String,
    pub info: InfoFields,

    /// Samples carrying the event, as decided from the genotypes.
    pub carriers: Vec<String>,
    /// Whether the FORMAT column declared a GT field.
    pub has_genotypes: bool,
    /// The unmodified tab-separated columns of the input line.
    pub fields: Vec<String>,
}

impl RawRecord {
    pub fn new(chrom: &str, pos: i64, ref_allele: &str, alt: &str, info: InfoFields) -> Self {
        RawRecord {
            chrom: strip_chr(chrom),
            pos,
            ref_allele: strip_chr(ref_allele),
            alt: strip_chr(alt),
            info,
            carriers: Vec::new(),
            has_genotypes: false,
            fields: Vec::new(),
        }
    }
}
