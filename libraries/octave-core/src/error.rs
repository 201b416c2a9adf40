/// Core error types for document resolution and access
use thiserror::Error;

/// Result type alias using `AccessError`
pub type Result<T> = std::result::Result<T, AccessError>;

/// Unified error type for everything that can go wrong while resolving or
/// reading a document.
///
/// None of these ever reach the host boundary: the access layer collapses
/// them into per-operation defaults and logs them locally.
#[derive(Error, Debug)]
pub enum AccessError {
    /// Handle string the provider cannot make sense of
    #[error("Invalid document uri: {0}")]
    InvalidUri(String),

    /// Document no longer exists behind the handle
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Directory expected, something else resolved
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// File expected, something else resolved
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// Grant missing, expired or revoked
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Metadata query errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AccessError {
    /// Create an invalid uri error
    pub fn invalid_uri(msg: impl Into<String>) -> Self {
        Self::InvalidUri(msg.into())
    }

    /// Create a not found error
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}
