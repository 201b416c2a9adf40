//! Tag records produced by the metadata index

use serde::{Deserialize, Serialize};

/// Tags held by a metadata index entry.
///
/// Each field is independently present or absent. This is the internal form;
/// [`AudioTags`] is what crosses the host boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackTags {
    /// Track title
    pub title: Option<String>,

    /// Artist name
    pub artist: Option<String>,

    /// Album title
    pub album: Option<String>,
}

/// Tags in the form handed to the host.
///
/// An empty string stands for an absent field. The host-side contract cannot
/// tell a genuinely empty tag from a missing one, and that ambiguity is kept
/// on purpose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTags {
    /// Track title, or empty
    pub title: String,

    /// Artist name, or empty
    pub artist: String,

    /// Album title, or empty
    pub album: String,
}

impl AudioTags {
    /// Whether no field carries a value
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty() && self.album.is_empty()
    }
}

impl From<TrackTags> for AudioTags {
    fn from(tags: TrackTags) -> Self {
        Self {
            title: tags.title.unwrap_or_default(),
            artist: tags.artist.unwrap_or_default(),
            album: tags.album.unwrap_or_default(),
        }
    }
}
