//! Stable identifiers for SV events.

use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

///
/// Build the event key `{chrom}_{start}_{end}_{type}` of a record.
///
/// Absent END or type leave their slot empty, e.g. `1_10__`.
///
pub fn event_key(chrom: &str, start: i64, end: Option<i64>, sv_type: Option<&str>) -> String {
    format!(
        "{}_{}_{}_{}",
        chrom,
        start,
        end.map(|e| e.to_string()).unwrap_or_default(),
        sv_type.unwrap_or("")
    )
}

///
/// Registry of every identifier issued during one run.
///
/// The same `(event_key, ref, alt)` always gets the same identifier; different triples
/// sharing an event key get increasing `_n` suffixes.
///
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    issued: HashSet<String>,
    by_triple: HashMap<(String, String, String), String>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id(&mut self, event_key: &str, ref_allele: &str, alt: &str) -> String {
        let triple = (event_key.to_string(), ref_allele.to_string(), alt.to_string());
        if let Some(id) = self.by_triple.get(&triple) {
            return id.clone();
        }

        let id = self.generate(event_key);
        self.by_triple.insert(triple, id.clone());
        id
    }

    fn generate(&mut self, event_key: &str) -> String {
        let mut n = 1;
        loop {
            let candidate = format!("{}_{}", event_key, n);
            if !self.issued.contains(&candidate) {
                self.issued.insert(candidate.clone());
                return candidate;
            }
            n += 1;
        }
    }

    /// Number of identifiers issued so far.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.issued.contains(id)
    }
}
