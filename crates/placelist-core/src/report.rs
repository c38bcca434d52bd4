//! Collection output: the aggregate report shape and JSON persistence.
//!
//! The region sweep writes a full [`CollectionReport`] after every completed
//! region and again on every exit path, so a crash mid-run loses at most the
//! region in flight. The single-scope search writes a flat listing array once
//! at the end via [`save_listings`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::Listing;

/// The aggregate output of a collection run.
///
/// `listings` is append-only in discovery order across pages and regions.
/// `api_usage` maps each access key to the number of requests charged against
/// it; `stats_by_region` maps each completed region to its listing count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionReport {
    pub keyword: String,
    pub total_count: usize,
    pub collected_at: DateTime<Utc>,
    pub api_usage: BTreeMap<String, u32>,
    pub stats_by_region: BTreeMap<String, usize>,
    pub listings: Vec<Listing>,
}

impl CollectionReport {
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        CollectionReport {
            keyword: keyword.to_owned(),
            total_count: 0,
            collected_at: Utc::now(),
            api_usage: BTreeMap::new(),
            stats_by_region: BTreeMap::new(),
            listings: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize collection output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for periodic report writes during a multi-region run.
///
/// The collector persists through this seam so tests can point it at a
/// temp file (or a recording fake) instead of the production output path.
pub trait ReportSink {
    /// Persists the full report, replacing any previous write.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if serialization or the write fails.
    fn persist(&self, report: &CollectionReport) -> Result<(), PersistError>;
}

/// [`ReportSink`] that writes the report as pretty-printed JSON to one file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSink { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonFileSink {
    fn persist(&self, report: &CollectionReport) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, json).map_err(|e| PersistError::Io {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

/// Writes listings as a flat pretty-printed JSON array (single-scope output).
///
/// # Errors
///
/// Returns [`PersistError`] if serialization or the write fails.
pub fn save_listings(path: &Path, listings: &[Listing]) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(listings)?;
    fs::write(path, json).map_err(|e| PersistError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
