/// Core traits for the document access layer
use crate::error::Result;
use crate::types::{DocumentEntry, DocumentUri, TrackTags};
use std::io::Read;

/// Document provider trait
///
/// Implementers resolve opaque handles against the access grants currently
/// held and expose the documents behind them. The platform document tree is
/// the canonical implementation; tests inject an in-memory fake.
///
/// All methods take `&self` and resolve their handle fresh on every call, so
/// implementations must be safe to share across threads. There is no caching
/// at this seam.
pub trait DocumentProvider: Send + Sync {
    /// Resolve a handle to a live entry, validating the grant and existence.
    ///
    /// # Errors
    /// Returns an error if the handle is malformed, no grant covers it, or
    /// the document no longer exists.
    fn resolve(&self, uri: &DocumentUri) -> Result<DocumentEntry>;

    /// List the immediate children of a directory document.
    ///
    /// One level only, never recursive. Order is whatever the underlying
    /// storage yields; no sorting is applied and the order is not guaranteed
    /// stable across calls.
    ///
    /// # Errors
    /// Returns an error if resolution fails or the handle does not address a
    /// directory.
    fn list_children(&self, uri: &DocumentUri) -> Result<Vec<DocumentEntry>>;

    /// Open a byte stream over a file document.
    ///
    /// # Errors
    /// Returns an error if resolution fails or the handle does not address a
    /// file.
    fn open_read(&self, uri: &DocumentUri) -> Result<Box<dyn Read + Send>>;

    /// Make the grant covering this handle survive restarts, for both read
    /// and write access.
    ///
    /// Persisting an already persisted grant is a no-op success.
    ///
    /// # Errors
    /// Returns an error if no live grant covers the handle or the grant
    /// cannot be made durable.
    fn persist_grant(&self, uri: &DocumentUri) -> Result<()>;
}

/// Content index query trait
///
/// Implementers answer structured tag queries for a single document without
/// handing out its bytes, the way a platform content index does.
pub trait MetadataIndex: Send + Sync {
    /// Look up the tags indexed for a document.
    ///
    /// Returns `Ok(None)` when the index has no entry for the handle; that
    /// is an expected outcome, not an error.
    ///
    /// # Errors
    /// Returns an error if the query itself cannot be executed.
    fn query(&self, uri: &DocumentUri) -> Result<Option<TrackTags>>;
}
