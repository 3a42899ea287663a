use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use svcanon_engine::{AnnotationSource, AnnotationStatus, AnnotationTrack};

/// An annotation track backed by a downloaded file and its formatted counterpart.
pub struct TrackFiles {
    label: String,
    downloaded: PathBuf,
    formatted: PathBuf,
}

impl From<&AnnotationTrack> for TrackFiles {
    fn from(track: &AnnotationTrack) -> Self {
        TrackFiles {
            label: track.label.clone(),
            downloaded: track.downloaded.clone(),
            formatted: track.formatted.clone(),
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl AnnotationSource for TrackFiles {
    fn label(&self) -> &str {
        &self.label
    }

    fn check(&self) -> AnnotationStatus {
        match (modified(&self.downloaded), modified(&self.formatted)) {
            (Some(downloaded), Some(formatted)) if downloaded > formatted => {
                AnnotationStatus::Stale
            }
            (_, Some(_)) => AnnotationStatus::Available,
            (Some(_), None) => AnnotationStatus::Stale,
            (None, None) => AnnotationStatus::Missing,
        }
    }
}

pub fn track_sources(tracks: &[AnnotationTrack]) -> Vec<Box<dyn AnnotationSource>> {
    tracks
        .iter()
        .map(|track| Box::new(TrackFiles::from(track)) as Box<dyn AnnotationSource>)
        .collect()
}
