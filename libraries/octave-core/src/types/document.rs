//! Opaque document handles and resolved entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a document (file or directory) reachable through an
/// access grant.
///
/// The access layer never parses or constructs the inner string; only the
/// provider that minted a handle knows its structure. Whether a handle
/// addresses a file or a directory is decided by the provider at resolution
/// time, not by the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentUri(String);

impl DocumentUri {
    /// Wrap a raw handle string
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The raw handle string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentUri {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

impl From<&str> for DocumentUri {
    fn from(uri: &str) -> Self {
        Self(uri.to_string())
    }
}

/// Runtime classification of a resolved document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A regular file
    File,
    /// A directory
    Directory,
}

/// One document as reported by a provider
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    /// Handle addressing this document
    pub uri: DocumentUri,

    /// Display name; providers may be unable to supply one
    pub name: Option<String>,

    /// File or directory
    pub kind: DocumentKind,
}

impl DocumentEntry {
    /// Whether this entry is a regular file
    pub fn is_file(&self) -> bool {
        self.kind == DocumentKind::File
    }

    /// Whether this entry is a directory
    pub fn is_directory(&self) -> bool {
        self.kind == DocumentKind::Directory
    }
}
