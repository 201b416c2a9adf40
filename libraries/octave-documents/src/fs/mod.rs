//! Filesystem-backed document provider
//!
//! Stands in for the platform document tree: directories the host grants are
//! registered in a [`GrantStore`] and every handle minted under a grant is an
//! opaque `doc://<grant-id>/<path>` uri. Resolution re-checks the grant table
//! on each call, so revoking a grant immediately invalidates every handle
//! under it.

pub mod grants;

pub use grants::{Grant, GrantStore};

use octave_core::{
    AccessError, DocumentEntry, DocumentKind, DocumentProvider, DocumentUri, Result,
};
use percent_encoding::percent_decode_str;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use url::Url;
use uuid::Uuid;

/// Uri scheme of handles minted by this provider
const DOC_SCHEME: &str = "doc";

/// Document provider rooted in granted directories of the local filesystem
pub struct FsDocumentProvider {
    grants: RwLock<GrantStore>,
}

impl Default for FsDocumentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FsDocumentProvider {
    /// Create a provider with no grant persistence; grants die with the
    /// process.
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(GrantStore::new()),
        }
    }

    /// Create a provider whose persisted grants are stored as JSON at `path`
    /// and restored from it on construction.
    pub fn with_store_path(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            grants: RwLock::new(GrantStore::with_store_path(path)?),
        })
    }

    /// Grant access to a directory, returning the tree handle for it.
    ///
    /// This is the picker boundary: the host decides which directory, the
    /// provider mints the handle. The grant is transient until
    /// [`DocumentProvider::persist_grant`] is called on a handle under it.
    pub fn grant_tree(&self, root: impl AsRef<Path>) -> Result<DocumentUri> {
        let root = root.as_ref();
        let meta = fs::metadata(root)?;
        if !meta.is_dir() {
            return Err(AccessError::NotADirectory(root.display().to_string()));
        }
        let root = root.canonicalize()?;

        let mut grants = self.grants.write().expect("grant table lock poisoned");
        let grant = grants.insert(root);
        tracing::debug!("granted tree access under {}", grant.id);
        Ok(DocumentUri::new(format!("{}://{}/", DOC_SCHEME, grant.id)))
    }

    /// Revoke the grant covering a handle.
    ///
    /// Every handle minted under the grant stops resolving immediately.
    pub fn revoke(&self, uri: &DocumentUri) -> Result<()> {
        let grant_id = grant_id_of(uri)?;
        let mut grants = self.grants.write().expect("grant table lock poisoned");
        grants.revoke(&grant_id)
    }

    /// Resolve a handle to the absolute path it addresses, without touching
    /// the filesystem. Returns the parsed url alongside for minting child
    /// handles.
    fn resolve_path(&self, uri: &DocumentUri) -> Result<(Url, PathBuf)> {
        let url = parse_handle(uri)?;
        let grant_id = host_grant_id(&url, uri)?;

        let root = {
            let grants = self.grants.read().expect("grant table lock poisoned");
            let grant = grants.get(&grant_id).ok_or_else(|| {
                AccessError::permission_denied(format!("no grant covers {}", uri))
            })?;
            if !grant.read {
                return Err(AccessError::permission_denied(format!(
                    "grant {} is not readable",
                    grant_id
                )));
            }
            grant.root.clone()
        };

        let mut path = root;
        if let Some(segments) = url.path_segments() {
            for segment in segments.filter(|s| !s.is_empty()) {
                let decoded = percent_decode_str(segment).decode_utf8().map_err(|_| {
                    AccessError::invalid_uri(format!("undecodable segment in {}", uri))
                })?;
                // Reject traversal and separator smuggling
                if decoded == "." || decoded == ".." || decoded.contains('/') || decoded.contains('\\')
                {
                    return Err(AccessError::invalid_uri(format!(
                        "illegal segment in {}",
                        uri
                    )));
                }
                path.push(decoded.as_ref());
            }
        }
        Ok((url, path))
    }
}

impl DocumentProvider for FsDocumentProvider {
    fn resolve(&self, uri: &DocumentUri) -> Result<DocumentEntry> {
        let (_, path) = self.resolve_path(uri)?;
        let meta = fs::metadata(&path).map_err(|_| AccessError::not_found(uri.to_string()))?;
        let kind = if meta.is_dir() {
            DocumentKind::Directory
        } else {
            DocumentKind::File
        };
        Ok(DocumentEntry {
            uri: uri.clone(),
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.to_string()),
            kind,
        })
    }

    fn list_children(&self, uri: &DocumentUri) -> Result<Vec<DocumentEntry>> {
        let (url, path) = self.resolve_path(uri)?;
        let meta = fs::metadata(&path).map_err(|_| AccessError::not_found(uri.to_string()))?;
        if !meta.is_dir() {
            return Err(AccessError::NotADirectory(uri.to_string()));
        }

        let mut children = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_dir() {
                DocumentKind::Directory
            } else if file_type.is_file() {
                DocumentKind::File
            } else {
                // Symlinks and special files are not documents
                continue;
            };
            // A name we cannot represent cannot be minted into a handle
            let Some(name) = entry.file_name().to_str().map(|n| n.to_string()) else {
                continue;
            };
            children.push(DocumentEntry {
                uri: child_handle(&url, &name)?,
                name: Some(name),
                kind,
            });
        }
        Ok(children)
    }

    fn open_read(&self, uri: &DocumentUri) -> Result<Box<dyn Read + Send>> {
        let (_, path) = self.resolve_path(uri)?;
        let meta = fs::metadata(&path).map_err(|_| AccessError::not_found(uri.to_string()))?;
        if meta.is_dir() {
            return Err(AccessError::NotAFile(uri.to_string()));
        }
        let file = fs::File::open(&path)?;
        Ok(Box::new(file))
    }

    fn persist_grant(&self, uri: &DocumentUri) -> Result<()> {
        let grant_id = grant_id_of(uri)?;
        let mut grants = self.grants.write().expect("grant table lock poisoned");
        grants.persist(&grant_id)
    }
}

/// Parse a handle string and check its scheme
fn parse_handle(uri: &DocumentUri) -> Result<Url> {
    let url = Url::parse(uri.as_str())
        .map_err(|e| AccessError::invalid_uri(format!("{}: {}", uri, e)))?;
    if url.scheme() != DOC_SCHEME {
        return Err(AccessError::invalid_uri(format!(
            "unsupported scheme in {}",
            uri
        )));
    }
    Ok(url)
}

/// The grant id carried in a handle's authority component
fn host_grant_id(url: &Url, uri: &DocumentUri) -> Result<Uuid> {
    url.host_str()
        .and_then(|host| Uuid::parse_str(host).ok())
        .ok_or_else(|| AccessError::invalid_uri(format!("missing grant id in {}", uri)))
}

fn grant_id_of(uri: &DocumentUri) -> Result<Uuid> {
    let url = parse_handle(uri)?;
    host_grant_id(&url, uri)
}

/// Mint the handle of a named child under a directory handle
fn child_handle(parent: &Url, name: &str) -> Result<DocumentUri> {
    let mut url = parent.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| AccessError::invalid_uri(parent.as_str().to_string()))?;
        segments.pop_if_empty();
        segments.push(name);
    }
    Ok(DocumentUri::new(String::from(url)))
}
