//! Domain types shared across the document access layer

mod document;
mod tags;

pub use document::{DocumentEntry, DocumentKind, DocumentUri};
pub use tags::{AudioTags, TrackTags};
