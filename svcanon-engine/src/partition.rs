//! Routing of classified records to the canonical stream or the rejection log.

use svcanon_core::consts::is_valid_chrom;
use svcanon_core::errors::RejectReason;
use svcanon_core::models::{CanonicalRecord, RawRecord, SvType};

use crate::classify::{Classification, Notation, infer_sv_type};
use crate::identity::{IdentityRegistry, event_key};
use crate::normalize::Coordinates;

/// Where one record goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Accept(CanonicalRecord),
    Reject { id: String, reason: RejectReason },
}

impl Disposition {
    pub fn id(&self) -> &str {
        match self {
            Disposition::Accept(record) => &record.id,
            Disposition::Reject { id, .. } => id,
        }
    }
}

///
/// Resolve the output type of an accepted record.
///
/// Type text with no confident type, and the literal `CNV`, are replaced by the allele text.
///
pub fn resolve_sv_type(sv_type: Option<&str>, alt: &str) -> SvType {
    let Some(text) = sv_type else {
        return SvType::Unresolved;
    };

    if text == "CNV" {
        return SvType::Literal(alt.to_string());
    }
    if text.eq_ignore_ascii_case("BND") || text.eq_ignore_ascii_case("TRA") {
        return SvType::Bnd;
    }

    infer_sv_type(text)
        .or_else(|| infer_sv_type(alt))
        .unwrap_or_else(|| SvType::Literal(alt.to_string()))
}

///
/// Decide the disposition of one record.
///
/// The identifier is always assigned first, from the event key of the classified but not
/// yet normalized coordinates, so rejected records are logged under a stable identifier.
///
/// # Arguments
/// - record: the parsed input line
/// - classification: output of [crate::classify::classify]
/// - coordinates: normalized interval, `None` when the END could not be resolved
/// - registry: identifiers issued so far in this run
/// - min_size: SV minimum size
pub fn partition(
    record: &RawRecord,
    classification: &Classification,
    coordinates: Option<Coordinates>,
    registry: &mut IdentityRegistry,
    min_size: u64,
) -> Disposition {
    let key = event_key(
        &record.chrom,
        record.pos,
        classification.end,
        classification.sv_type.as_deref(),
    );
    let id = registry.get_id(&key, &record.ref_allele, &record.alt);

    let reason = match &classification.notation {
        Notation::Unrecognized => Some(RejectReason::UnknownFormat),
        Notation::Sequence { delta } if delta.unsigned_abs() < min_size => {
            Some(RejectReason::BelowMinSize {
                length: delta.unsigned_abs(),
                min_size,
            })
        }
        _ if !is_valid_chrom(&record.chrom) => {
            Some(RejectReason::UnknownChromosome(record.chrom.clone()))
        }
        _ => None,
    };
    if let Some(reason) = reason {
        return Disposition::Reject { id, reason };
    }

    let Some(coordinates) = coordinates else {
        return Disposition::Reject {
            id,
            reason: RejectReason::EndUndefined,
        };
    };

    Disposition::Accept(CanonicalRecord {
        chrom: record.chrom.clone(),
        start: coordinates.start,
        end: coordinates.end,
        sv_type: resolve_sv_type(classification.sv_type.as_deref(), &record.alt),
        length: coordinates.length,
        id,
        samples: record.carriers.clone(),
        extra: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use svcanon_core::models::InfoFields;

    use crate::classify::classify;
    use crate::normalize::normalize;

    fn run(registry: &mut IdentityRegistry, record: &RawRecord) -> Disposition {
        let classification = classify(record, 50);
        let coordinates = classification.end.map(|end| {
            normalize(record.pos, end, classification.derived_length, &record.info, true)
        });
        partition(record, &classification, coordinates, registry, 50)
    }

    fn record(chrom: &str, pos: i64, ref_allele: &str, alt: &str, info: &str) -> RawRecord {
        RawRecord::new(chrom, pos, ref_allele, alt, info.parse().unwrap())
    }

    #[rstest]
    #[case(None, "]17:5]", SvType::Unresolved)]
    #[case(Some("DEL"), "<DEL>", SvType::Del)]
    #[case(Some("DUP:TANDEM"), "<DUP:TANDEM>", SvType::Dup)]
    #[case(Some("CNV"), "<CN0>", SvType::Literal("<CN0>".to_string()))]
    #[case(Some("CN0"), "<CN0>", SvType::Del)]
    #[case(Some("BND"), "N]17:5]", SvType::Bnd)]
    #[case(Some("TRA"), "<TRA>", SvType::Bnd)]
    #[case(Some("CPX"), "<CPX>", SvType::Literal("<CPX>".to_string()))]
    fn test_resolve_sv_type(
        #[case] sv_type: Option<&str>,
        #[case] alt: &str,
        #[case] expected: SvType,
    ) {
        assert_eq!(resolve_sv_type(sv_type, alt), expected);
    }

    #[rstest]
    fn test_accept_symbolic_deletion() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(&mut registry, &record("1", 100, "G", "<DEL>", "END=200"));

        let Disposition::Accept(canonical) = disposition else {
            panic!("expected an accepted record");
        };
        assert_eq!(canonical.chrom, "1");
        assert_eq!((canonical.start, canonical.end), (100, 200));
        assert_eq!(canonical.sv_type, SvType::Del);
        assert_eq!(canonical.id, "1_100_200_DEL_1");
    }

    #[rstest]
    fn test_accept_symbolic_multi_allelic() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(&mut registry, &record("1", 100, "N", "<DEL>,<DUP>", "END=900"));

        let Disposition::Accept(canonical) = disposition else {
            panic!("expected an accepted record");
        };
        assert_eq!(canonical.sv_type, SvType::Del);
        assert_eq!(canonical.id, "1_100_900_DEL>,<DUP_1");
    }

    #[rstest]
    fn test_reject_sequence_multi_allelic() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(&mut registry, &record("1", 100, "A", "A,C", ""));
        assert_eq!(
            disposition,
            Disposition::Reject {
                id: "1_100___1".to_string(),
                reason: RejectReason::UnknownFormat,
            }
        );
    }

    #[rstest]
    fn test_reject_unknown_chromosome() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(&mut registry, &record("chrUn_random", 100, "G", "<DEL>", "END=200"));
        assert_eq!(
            disposition,
            Disposition::Reject {
                id: "Un_random_100_200_DEL_1".to_string(),
                reason: RejectReason::UnknownChromosome("Un_random".to_string()),
            }
        );
    }

    #[rstest]
    fn test_size_rejection_comes_before_chromosome_check() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(&mut registry, &record("GL000192.1", 10, "A", "AA", ""));
        assert_eq!(
            disposition,
            Disposition::Reject {
                id: "GL000192.1_10___1".to_string(),
                reason: RejectReason::BelowMinSize { length: 1, min_size: 50 },
            }
        );
    }

    #[rstest]
    fn test_reject_unknown_format_uses_raw_key() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(&mut registry, &record("1", 10, "A", "A,C", "END=20;SVTYPE=DEL"));
        assert_eq!(disposition.id(), "1_10_20_DEL_1");
        assert!(matches!(
            disposition,
            Disposition::Reject { reason: RejectReason::UnknownFormat, .. }
        ));
    }

    #[rstest]
    fn test_reject_end_undefined() {
        let mut registry = IdentityRegistry::new();
        let raw = RawRecord::new("2", 500, "N", "<INV>", InfoFields::default());
        let classification = Classification {
            notation: Notation::Symbolic,
            end: None,
            sv_type: Some("INV".to_string()),
            derived_length: None,
        };

        let disposition = partition(&raw, &classification, None, &mut registry, 50);
        assert_eq!(
            disposition,
            Disposition::Reject {
                id: "2_500__INV_1".to_string(),
                reason: RejectReason::EndUndefined,
            }
        );
    }

    #[rstest]
    fn test_key_is_taken_before_ci_expansion() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(
            &mut registry,
            &record("3", 1000, "N", "<DUP>", "END=5000;CIPOS=-30,30;CIEND=-40,40"),
        );
        let Disposition::Accept(canonical) = disposition else {
            panic!("expected an accepted record");
        };
        assert_eq!(canonical.id, "3_1000_5000_DUP_1");
        assert_eq!((canonical.start, canonical.end), (970, 5040));
    }

    #[rstest]
    fn test_key_is_taken_before_swap() {
        let mut registry = IdentityRegistry::new();
        let disposition = run(&mut registry, &record("3", 5000, "N", "<INV>", "END=1000"));
        let Disposition::Accept(canonical) = disposition else {
            panic!("expected an accepted record");
        };
        assert_eq!(canonical.id, "3_5000_1000_INV_1");
        assert_eq!((canonical.start, canonical.end), (1000, 5000));
    }
}
