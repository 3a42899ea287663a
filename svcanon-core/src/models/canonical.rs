use std::fmt::{self, Display};

use crate::models::SvType;

///
/// CanonicalRecord struct, one normalized SV ready to be written as a BED line.
///
/// `end > start` holds for every record produced by the engine.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct CanonicalRecord {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub sv_type: SvType,
    pub length: Option<i64>,
    pub id: String,

    /// Samples carrying the event.
    pub samples: Vec<String>,
    /// Columns of the original input line carried through to the output.
    pub extra: Vec<String>,
}

impl CanonicalRecord {
    ///
    /// Get width of the interval
    ///
    pub fn width(&self) -> i64 {
        self.end - self.start
    }

    ///
    /// Get the tab-delimited output line (without trailing newline)
    ///
    /// # Arguments
    /// - with_samples: insert the comma-joined carrier list after the type column
    pub fn as_string(&self, with_samples: bool) -> String {
        let mut line = format!(
            "{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.sv_type
        );
        if with_samples {
            line.push('\t');
            line.push_str(&self.samples.join(","));
        }
        for field in &self.extra {
            line.push('\t');
            line.push_str(field);
        }
        line
    }
}

impl Display for CanonicalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string(true))
    }
}
