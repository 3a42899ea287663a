//! SV notation classification.
//!
//! A VCF line can describe a structural variant in three ways:
//!
//! - a symbolic allele, `alt="<DEL>"`, `"<INS>"`, ...
//! - a breakend, `alt="G]17:1584563]"` or `"[chr2:321682[T"`
//! - the full sequence, `ref="G"` with a 55 bp `alt`
//!
//! [classify] decides which one applies and resolves the END coordinate and the type text
//! that each notation implies. It never fails: anything else is [Notation::Unrecognized].

use std::sync::LazyLock;

use regex::Regex;

use svcanon_core::models::{RawRecord, SvType};

static BREAKEND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\]\[][^:]+:\d+").expect("valid breakend pattern"));

static DEL_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)del|loss|<CN[01]>").expect("valid DEL pattern"));
static DUP_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)dup|gain|MCNV|^<CN[2-9]").expect("valid DUP pattern"));
static INV_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)inv").expect("valid INV pattern"));
static INS_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ins|MEI|alu|line|sva").expect("valid INS pattern"));

///
/// Infer a confident SV type from free text (an SVTYPE value or an allele).
///
/// `None` means "no confident type", which is not a parse failure.
///
pub fn infer_sv_type(text: &str) -> Option<SvType> {
    if DEL_TYPE.is_match(text) {
        Some(SvType::Del)
    } else if DUP_TYPE.is_match(text) {
        Some(SvType::Dup)
    } else if INV_TYPE.is_match(text) {
        Some(SvType::Inv)
    } else if INS_TYPE.is_match(text) {
        Some(SvType::Ins)
    } else {
        None
    }
}

/// The input notation of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notation {
    /// `alt` is a bracketed symbol such as `<DEL>`.
    Symbolic,
    /// `alt` carries a `]contig:pos]`-style mate position.
    Breakend,
    /// Literal sequences. `delta` is `len(alt) - len(ref)` after removing `.`/`*`.
    Sequence { delta: i64 },
    Unrecognized,
}

/// Outcome of [classify]: the notation plus what it implies for END, type and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub notation: Notation,
    pub end: Option<i64>,
    pub sv_type: Option<String>,
    /// Signed length derived from the alleles, when it is determinable.
    pub derived_length: Option<i64>,
}

impl Classification {
    fn unchanged(notation: Notation, record: &RawRecord) -> Self {
        Classification {
            notation,
            end: record.info.end,
            sv_type: record.info.sv_type.clone(),
            derived_length: None,
        }
    }

    /// Whether this is a sequence-notation indel below `min_size`.
    pub fn is_small_indel(&self, min_size: u64) -> bool {
        matches!(self.notation, Notation::Sequence { delta } if delta.unsigned_abs() < min_size)
    }
}

fn is_symbolic(alt: &str) -> bool {
    alt.len() >= 2 && alt.starts_with('<') && alt.ends_with('>')
}

fn is_sequence(ref_allele: &str, alt: &str) -> bool {
    let mut bases = ref_allele.bytes().chain(alt.bytes()).peekable();
    bases.peek().is_some()
        && bases.all(|b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'N' | b'.' | b'*'))
}

fn strip_placeholders(allele: &str) -> String {
    allele.chars().filter(|c| *c != '.' && *c != '*').collect()
}

///
/// Classify a record and resolve the END and type text its notation implies.
///
/// # Arguments
/// - record: the parsed input line
/// - min_size: sequence-notation events with `|delta| < min_size` are indels; for those
///   END and type are left as given in the INFO column
pub fn classify(record: &RawRecord, min_size: u64) -> Classification {
    let alt = record.alt.as_str();
    let explicit_type = record.info.sv_type.as_deref();

    if is_symbolic(alt) {
        // <TRA> has no END on the same chromosome, annotate the first breakpoint only
        let end = match record.info.end {
            Some(end) if alt != "<TRA>" => end,
            _ => record.pos.saturating_add(1),
        };
        let sv_type = explicit_type.unwrap_or(&alt[1..alt.len() - 1]).to_string();

        return Classification {
            notation: Notation::Symbolic,
            end: Some(end),
            sv_type: Some(sv_type),
            derived_length: None,
        };
    }

    if BREAKEND.is_match(alt) {
        // END is only trusted for a confidently typed event, e.g. END=46677091;SVTYPE=DUP
        let end = match (explicit_type.and_then(infer_sv_type), record.info.end) {
            (Some(_), Some(end)) => end,
            _ => record.pos.saturating_add(1),
        };

        return Classification {
            notation: Notation::Breakend,
            end: Some(end),
            sv_type: explicit_type.map(str::to_string),
            derived_length: None,
        };
    }

    if is_sequence(&record.ref_allele, alt) {
        let ref_bases = strip_placeholders(&record.ref_allele);
        let alt_bases = strip_placeholders(alt);
        let delta = alt_bases.len() as i64 - ref_bases.len() as i64;
        let notation = Notation::Sequence { delta };

        if delta.unsigned_abs() < min_size {
            return Classification::unchanged(notation, record);
        }

        let (default_end, default_type) = if delta > 0 {
            (record.pos.saturating_add(1), "INS")
        } else {
            (record.pos.saturating_sub(delta), "DEL")
        };

        Classification {
            notation,
            end: Some(record.info.end.unwrap_or(default_end)),
            sv_type: Some(explicit_type.unwrap_or(default_type).to_string()),
            derived_length: sequence_length(&record.ref_allele, alt, &ref_bases, &alt_bases, delta),
        }
    } else {
        Classification::unchanged(Notation::Unrecognized, record)
    }
}

/// The length is only trusted when one allele contains the other. A `.` marks a single
/// breakend whose reads could not be mapped back, and complex substitutions such as
/// `AGT>ATTGCATGG...` have no determinable length.
fn sequence_length(
    raw_ref: &str,
    raw_alt: &str,
    ref_bases: &str,
    alt_bases: &str,
    delta: i64,
) -> Option<i64> {
    if raw_ref.contains('.') || raw_alt.contains('.') {
        return None;
    }

    let ref_lower = ref_bases.to_ascii_lowercase();
    let alt_lower = alt_bases.to_ascii_lowercase();
    if alt_lower.contains(&ref_lower) || ref_lower.contains(&alt_lower) {
        Some(delta)
    } else {
        None
    }
}
