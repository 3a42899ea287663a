//! Availability of auxiliary annotation tracks.
//!
//! Downloading and re-formatting tracks happens elsewhere; a run only asks each
//! [AnnotationSource] whether its data can be used.

use std::fmt::{self, Display};

use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationStatus {
    /// Formatted and up to date.
    Available,
    /// Present but needs to be re-formatted before use.
    Stale,
    Missing,
}

impl Display for AnnotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnnotationStatus::Available => "available",
            AnnotationStatus::Stale => "stale",
            AnnotationStatus::Missing => "missing",
        };
        write!(f, "{}", s)
    }
}

pub trait AnnotationSource {
    fn label(&self) -> &str;

    fn check(&self) -> AnnotationStatus;
}

/// Query every source once and log the ones that cannot be used as-is.
pub fn survey_sources(sources: &[Box<dyn AnnotationSource>]) -> Vec<(String, AnnotationStatus)> {
    sources
        .iter()
        .map(|source| {
            let status = source.check();
            match status {
                AnnotationStatus::Available => debug!("{} annotation available", source.label()),
                AnnotationStatus::Stale => warn!("{} annotation needs refreshing", source.label()),
                AnnotationStatus::Missing => debug!("No {} annotation", source.label()),
            }
            (source.label().to_string(), status)
        })
        .collect()
}
