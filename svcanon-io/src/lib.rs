//! # Input/Output for structural-variant records.
//!
//! Reading VCF data lines into [svcanon_core::models::RawRecord]s, and writing the two
//! output channels of a run: the canonical BED-like stream with its companion header file,
//! and the rejection log.
//!
pub mod bed;
pub mod error;
pub mod vcf;

// re-expose core functions
pub use bed::*;
pub use error::*;
pub use vcf::*;
