//! Tree scanner
//!
//! Folds the four document operations over one granted tree to produce the
//! track records a host library view is built from. The scanner itself never
//! fails: a handle that stops resolving mid-scan is counted, logged and
//! skipped.

use crate::access::DocumentAccess;
use octave_core::{AudioTags, DocumentUri};
use serde::Serialize;

/// One audio file found under a granted tree
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    /// Handle addressing the file
    pub uri: DocumentUri,

    /// Display name reported by the provider
    pub name: String,

    /// Indexed tags; empty strings where absent
    #[serde(flatten)]
    pub tags: AudioTags,
}

/// Statistics from scanning one tree
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    /// Audio files the enumeration returned
    pub listed: usize,

    /// Records produced
    pub scanned: usize,

    /// Handles that failed to resolve into a record
    pub errors: usize,
}

/// Scanner producing track records from granted trees
pub struct TreeScanner {
    access: DocumentAccess,
}

impl TreeScanner {
    /// Create a scanner over an access layer
    pub fn new(access: DocumentAccess) -> Self {
        Self { access }
    }

    /// The access layer the scanner drives
    pub fn access(&self) -> &DocumentAccess {
        &self.access
    }

    /// Scan one granted tree into track records.
    ///
    /// Files whose index entry has no title fall back to the file stem, so a
    /// record always carries something displayable.
    pub fn scan_tree(&self, tree: &DocumentUri) -> (Vec<TrackRecord>, ScanStats) {
        let files = self.access.list_audio_files(tree);
        let mut stats = ScanStats {
            listed: files.len(),
            ..ScanStats::default()
        };
        let mut records = Vec::with_capacity(files.len());

        for uri in files {
            let Some(name) = self.display_name(&uri) else {
                tracing::warn!("skipping {}: no longer resolvable", uri);
                stats.errors += 1;
                continue;
            };
            let mut tags = self.access.audio_metadata(&uri);
            if tags.title.is_empty() {
                tags.title = file_stem(&name).to_string();
            }
            records.push(TrackRecord { uri, name, tags });
            stats.scanned += 1;
        }

        tracing::info!(
            "scanned {}: {} of {} files, {} errors",
            tree,
            stats.scanned,
            stats.listed,
            stats.errors
        );
        (records, stats)
    }

    fn display_name(&self, uri: &DocumentUri) -> Option<String> {
        self.access
            .provider()
            .resolve(uri)
            .ok()
            .and_then(|entry| entry.name)
    }
}

/// File name without its final extension
fn file_stem(name: &str) -> &str {
    name.rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name)
}
