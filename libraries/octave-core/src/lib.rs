//! Octave Core
//!
//! Platform-agnostic types, traits, and error handling for Octave's scoped
//! document access layer.
//!
//! On the platforms Octave targets, user storage is never reached through raw
//! paths: the host grants access to a directory and everything under it is
//! addressed by opaque handles that must be resolved on every call. This
//! crate defines that contract:
//!
//! - **Domain Types**: [`DocumentUri`], [`DocumentEntry`], [`TrackTags`],
//!   [`AudioTags`]
//! - **Core Traits**: [`DocumentProvider`], [`MetadataIndex`]
//! - **Error Handling**: unified [`AccessError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use octave_core::types::{AudioTags, DocumentUri, TrackTags};
//!
//! // Handles are opaque strings; only the provider that minted one
//! // understands its structure.
//! let uri = DocumentUri::new("doc://9f2c1d8e-0000-0000-0000-000000000000/music");
//!
//! // At the host boundary an empty string stands for an absent tag field.
//! let tags = AudioTags::from(TrackTags {
//!     title: Some("Holocene".to_string()),
//!     artist: None,
//!     album: None,
//! });
//! assert_eq!(tags.title, "Holocene");
//! assert_eq!(tags.artist, "");
//! # let _ = uri;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AccessError, Result};
pub use traits::{DocumentProvider, MetadataIndex};
pub use types::{AudioTags, DocumentEntry, DocumentKind, DocumentUri, TrackTags};
