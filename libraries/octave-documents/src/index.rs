//! Metadata indexes
//!
//! [`TagIndex`] answers tag queries by reading the document's own tags
//! through a provider, standing in for the platform content index.
//! [`StaticIndex`] serves a fixed catalog, for hosts that already hold one
//! and for tests.

use lofty::{Accessor, Probe, TaggedFileExt};
use octave_core::{DocumentProvider, DocumentUri, MetadataIndex, Result, TrackTags};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;

/// Index that reads tags straight from the document bytes.
///
/// A document whose format or tags cannot be parsed is reported as not
/// indexed, the same answer the platform index gives for a file it has not
/// picked up.
pub struct TagIndex {
    provider: Arc<dyn DocumentProvider>,
}

impl TagIndex {
    /// Create a tag index resolving documents through `provider`
    pub fn new(provider: Arc<dyn DocumentProvider>) -> Self {
        Self { provider }
    }
}

impl MetadataIndex for TagIndex {
    fn query(&self, uri: &DocumentUri) -> Result<Option<TrackTags>> {
        let mut stream = self.provider.open_read(uri)?;
        // lofty probing needs Seek, so buffer the document first
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;
        drop(stream);

        let probe = match Probe::new(Cursor::new(bytes)).guess_file_type() {
            Ok(probe) => probe,
            Err(e) => {
                tracing::debug!("could not probe {}: {}", uri, e);
                return Ok(None);
            }
        };
        let tagged = match probe.read() {
            Ok(tagged) => tagged,
            Err(e) => {
                tracing::debug!("no readable tags in {}: {}", uri, e);
                return Ok(None);
            }
        };

        let Some(tag) = tagged.primary_tag().or(tagged.first_tag()) else {
            return Ok(None);
        };
        Ok(Some(TrackTags {
            title: tag.title().map(|s| s.to_string()),
            artist: tag.artist().map(|s| s.to_string()),
            album: tag.album().map(|s| s.to_string()),
        }))
    }
}

/// Fixed uri → tags catalog
#[derive(Debug, Default)]
pub struct StaticIndex {
    entries: HashMap<DocumentUri, TrackTags>,
}

impl StaticIndex {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the tags served for a handle
    pub fn insert(&mut self, uri: impl Into<DocumentUri>, tags: TrackTags) {
        self.entries.insert(uri.into(), tags);
    }
}

impl MetadataIndex for StaticIndex {
    fn query(&self, uri: &DocumentUri) -> Result<Option<TrackTags>> {
        Ok(self.entries.get(uri).cloned())
    }
}
