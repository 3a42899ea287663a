//! # Core models for structural-variant normalization
//!
//! Shared data types used across the svcanon crates: the raw input record with its INFO
//! fields, the canonical output record and its SV type, the rejection reasons, and a few
//! reader utilities.

pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;
