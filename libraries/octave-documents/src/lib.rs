//! Octave Scoped Documents
//!
//! Permission-scoped access to the audio files living under directories the
//! user has granted to Octave.
//!
//! The host platform forbids raw path access to user storage: a directory is
//! granted through a picker, everything under it is addressed by opaque
//! handles, and every access resolves its handle fresh against the grant.
//! This crate packages that indirection behind four small operations —
//! enumerate, persist the grant, query tags, read bytes — all sharing one
//! failure policy: any bad handle degrades to the operation's empty default
//! so a library scan can always continue past it.
//!
//! # Architecture
//!
//! - `access`: the four host-facing operations behind one failure policy
//! - `formats`: the recognized audio file extensions
//! - `fs`: filesystem-backed provider with a persistent grant registry
//! - `index`: tag-reading and static metadata indexes
//! - `memory`: in-memory provider for tests and embedded catalogs
//! - `scanner`: folds a granted tree into track records

mod formats;

pub mod access;
pub mod fs;
pub mod index;
pub mod memory;
pub mod scanner;

pub use access::DocumentAccess;
pub use formats::{is_audio_file_name, AUDIO_EXTENSIONS};
pub use fs::FsDocumentProvider;
pub use index::{StaticIndex, TagIndex};
pub use memory::MemoryProvider;
pub use scanner::{ScanStats, TrackRecord, TreeScanner};

/// Re-export commonly used core types
pub use octave_core::{
    AccessError, AudioTags, DocumentEntry, DocumentKind, DocumentProvider, DocumentUri,
    MetadataIndex, Result, TrackTags,
};
