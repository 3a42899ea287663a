//! Coordinate normalization of classified records.

use svcanon_core::models::InfoFields;

/// Final coordinates and length of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    pub start: i64,
    pub end: i64,
    pub length: Option<i64>,
}

///
/// Normalize the interval of an event.
///
/// Rules, in order:
/// 1. reversed coordinates (`end < start`) are swapped
/// 2. a zero-width interval is widened by one base
/// 3. with `include_ci`, CIPOS only ever moves start left and CIEND only ever moves end right
/// 4. SVLEN takes precedence over the allele-derived length
///
/// # Arguments
/// - start: 1-based position of the record
/// - end: end resolved by the classifier
/// - derived_length: length derived from the alleles, if determinable
/// - info: INFO fields of the record
/// - include_ci: expand the interval with CIPOS/CIEND
pub fn normalize(
    start: i64,
    end: i64,
    derived_length: Option<i64>,
    info: &InfoFields,
    include_ci: bool,
) -> Coordinates {
    let (mut start, mut end) = if end < start { (end, start) } else { (start, end) };
    if start == end {
        match end.checked_add(1) {
            Some(widened) => end = widened,
            None => start -= 1,
        }
    }

    if include_ci {
        if let Some((low, _)) = info.cipos {
            if low < 0 {
                start = start.saturating_add(low);
            }
        }
        if let Some((_, high)) = info.ciend {
            if high > 0 {
                end = end.saturating_add(high);
            }
        }
    }

    Coordinates {
        start,
        end,
        length: info.sv_len.or(derived_length),
    }
}
