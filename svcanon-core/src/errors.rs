use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RecordParseError {
    #[error("Line has {0} tab-separated fields, at least 5 are required")]
    TooFewFields(usize),

    #[error("Invalid POS field: {0}")]
    InvalidPosition(String),

    #[error("Invalid integer in INFO field {key}: {value}")]
    InvalidInfoInteger { key: String, value: String },

    #[error("Invalid integer pair in INFO field {key}: {value}")]
    InvalidInfoPair { key: String, value: String },

    #[error("Line is not valid UTF-8")]
    InvalidUtf8,
}

/// Why a record was routed to the rejection log.
///
/// The `Display` text of each variant is the exact reason written after the identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RejectReason {
    #[error("variantLength ({length}) < SVminSize ({min_size})")]
    BelowMinSize { length: u64, min_size: u64 },

    #[error("chromosome \"{0}\" unknown")]
    UnknownChromosome(String),

    #[error("END of the SV not defined")]
    EndUndefined,

    #[error("not a known SV format")]
    UnknownFormat,
}

impl RejectReason {
    /// Short label used for run summaries.
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::BelowMinSize { .. } => "below_min_size",
            RejectReason::UnknownChromosome(_) => "unknown_chromosome",
            RejectReason::EndUndefined => "end_undefined",
            RejectReason::UnknownFormat => "unknown_format",
        }
    }
}
