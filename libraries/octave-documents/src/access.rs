//! Host-facing document operations
//!
//! Four structurally different operations share one resolution primitive and
//! one failure policy: every resolution or I/O failure is absorbed at the
//! point of origin and surfaces as the operation's empty default, never as an
//! error. The host only ever observes "no data"; the reason is logged here.

use crate::formats::is_audio_file_name;
use octave_core::{
    AccessError, AudioTags, DocumentKind, DocumentProvider, DocumentUri, MetadataIndex, Result,
};
use std::io::Read;
use std::sync::Arc;

/// Bytes pulled from a document stream per read call
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Scoped access to audio documents behind opaque handles.
///
/// All operations are synchronous, take `&self`, resolve their handle fresh
/// per call and share no mutable state, so one instance can serve any number
/// of threads. The provider and index are injected so hosts and tests choose
/// the storage service themselves.
pub struct DocumentAccess {
    provider: Arc<dyn DocumentProvider>,
    index: Arc<dyn MetadataIndex>,
}

impl DocumentAccess {
    /// Create an access layer over a provider and a metadata index
    pub fn new(provider: Arc<dyn DocumentProvider>, index: Arc<dyn MetadataIndex>) -> Self {
        Self { provider, index }
    }

    /// The provider this access layer resolves handles through
    pub fn provider(&self) -> &Arc<dyn DocumentProvider> {
        &self.provider
    }

    /// List the audio files directly under a granted directory.
    ///
    /// One level only, in provider order. Children that are not regular
    /// files, have no available name, or fail the extension test are
    /// skipped. Any resolution failure yields an empty list, as does a
    /// directory with no matching children.
    pub fn list_audio_files(&self, tree: &DocumentUri) -> Vec<DocumentUri> {
        self.run_or_default("list_audio_files", tree, || {
            let children = self.provider.list_children(tree)?;
            Ok(children
                .into_iter()
                .filter(|child| child.kind == DocumentKind::File)
                .filter(|child| {
                    child
                        .name
                        .as_deref()
                        .map(is_audio_file_name)
                        .unwrap_or(false)
                })
                .map(|child| child.uri)
                .collect())
        })
    }

    /// Make the access grant covering a handle survive restarts, for both
    /// read and write.
    ///
    /// Idempotent: re-persisting a persisted grant succeeds. Returns `false`
    /// when the grant is missing, expired, or the provider refuses to make
    /// it durable.
    pub fn persist_permissions(&self, uri: &DocumentUri) -> bool {
        self.run_or_default("persist_permissions", uri, || {
            self.provider.persist_grant(uri)?;
            Ok(true)
        })
    }

    /// Query the content index for a file's title, artist and album.
    ///
    /// Always returns exactly three field slots. An empty string stands for
    /// an absent value, whether the index had no entry for the handle or the
    /// query failed outright.
    pub fn audio_metadata(&self, uri: &DocumentUri) -> AudioTags {
        self.run_or_default("audio_metadata", uri, || {
            let entry = self.provider.resolve(uri)?;
            if entry.kind != DocumentKind::File {
                return Err(AccessError::NotAFile(uri.to_string()));
            }
            Ok(self
                .index
                .query(uri)?
                .map(AudioTags::from)
                .unwrap_or_default())
        })
    }

    /// Read the complete content addressed by a file handle.
    ///
    /// The stream is consumed in bounded chunks into one growable buffer; no
    /// maximum size is enforced at this layer. A failure mid-read discards
    /// the partial data and returns an empty buffer, so the host never
    /// mistakes a truncated file for a complete one. The stream is dropped
    /// on every exit path.
    pub fn read_content(&self, uri: &DocumentUri) -> Vec<u8> {
        self.run_or_default("read_content", uri, || {
            let mut stream = self.provider.open_read(uri)?;
            let mut content = Vec::new();
            let mut chunk = [0u8; READ_CHUNK_SIZE];
            loop {
                let read = stream.read(&mut chunk)?;
                if read == 0 {
                    break;
                }
                content.extend_from_slice(&chunk[..read]);
            }
            Ok(content)
        })
    }

    /// Run an operation body, absorbing any failure into the default value.
    ///
    /// The single point where the error taxonomy is collapsed.
    fn run_or_default<T: Default>(
        &self,
        operation: &str,
        uri: &DocumentUri,
        body: impl FnOnce() -> Result<T>,
    ) -> T {
        match body() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{} failed for {}: {}", operation, uri, e);
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::StaticIndex;
    use crate::memory::MemoryProvider;

    fn access_over(provider: MemoryProvider) -> DocumentAccess {
        DocumentAccess::new(Arc::new(provider), Arc::new(StaticIndex::new()))
    }

    #[test]
    fn test_unknown_handle_defaults() {
        let access = access_over(MemoryProvider::new());
        let uri = DocumentUri::new("doc://nowhere/track.mp3");

        assert!(access.list_audio_files(&uri).is_empty());
        assert!(!access.persist_permissions(&uri));
        assert!(access.audio_metadata(&uri).is_empty());
        assert!(access.read_content(&uri).is_empty());
    }

    #[test]
    fn test_metadata_on_directory_is_empty() {
        let provider = MemoryProvider::new();
        provider.add_directory("mem://root", "Music");
        let access = access_over(provider);

        let tags = access.audio_metadata(&DocumentUri::new("mem://root"));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_list_skips_unnamed_children() {
        let provider = MemoryProvider::new();
        provider.add_directory("mem://root", "Music");
        provider.add_file("mem://root", "mem://root/1", Some("one.mp3"), b"a");
        provider.add_file("mem://root", "mem://root/2", None, b"b");
        let access = access_over(provider);

        let files = access.list_audio_files(&DocumentUri::new("mem://root"));
        assert_eq!(files, vec![DocumentUri::new("mem://root/1")]);
    }

    #[test]
    fn test_read_discards_partial_data_on_failure() {
        let provider = MemoryProvider::new();
        provider.add_directory("mem://root", "Music");
        provider.add_file("mem://root", "mem://root/big", Some("big.wav"), &[7u8; 4096]);
        provider.fail_reads_after("mem://root/big", 1024);
        let access = access_over(provider);

        assert!(access
            .read_content(&DocumentUri::new("mem://root/big"))
            .is_empty());
    }
}
