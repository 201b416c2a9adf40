//! In-memory document provider
//!
//! A fake storage service: documents are registered under arbitrary opaque
//! uris with explicit parent/child edges, so tests can exercise nameless
//! children, revoked handles and failing streams without touching a real
//! filesystem. Also usable by hosts that ship a fixed, embedded catalog.

use octave_core::{
    AccessError, DocumentEntry, DocumentKind, DocumentProvider, DocumentUri, Result,
};
use std::collections::{HashMap, HashSet};
use std::io::{self, Cursor, Read};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct Node {
    name: Option<String>,
    kind: DocumentKind,
    children: Vec<DocumentUri>,
    content: Vec<u8>,
    fail_read_after: Option<usize>,
}

impl Node {
    fn directory(name: Option<String>) -> Self {
        Self {
            name,
            kind: DocumentKind::Directory,
            children: Vec::new(),
            content: Vec::new(),
            fail_read_after: None,
        }
    }

    fn file(name: Option<String>, content: Vec<u8>) -> Self {
        Self {
            name,
            kind: DocumentKind::File,
            children: Vec::new(),
            content,
            fail_read_after: None,
        }
    }
}

/// In-memory document provider
#[derive(Debug, Default)]
pub struct MemoryProvider {
    nodes: RwLock<HashMap<DocumentUri, Node>>,
    persisted: RwLock<HashSet<DocumentUri>>,
    revoked: RwLock<HashSet<DocumentUri>>,
}

impl MemoryProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory document
    pub fn add_directory(&self, uri: impl Into<DocumentUri>, name: impl Into<String>) {
        let mut nodes = self.nodes.write().expect("node table lock poisoned");
        nodes.insert(uri.into(), Node::directory(Some(name.into())));
    }

    /// Register a file document under a parent directory.
    ///
    /// `name` may be `None` to model children whose display name is
    /// unavailable. A missing parent is created as an unnamed directory.
    pub fn add_file(
        &self,
        parent: impl Into<DocumentUri>,
        uri: impl Into<DocumentUri>,
        name: Option<&str>,
        content: &[u8],
    ) {
        let uri = uri.into();
        let mut nodes = self.nodes.write().expect("node table lock poisoned");
        nodes.insert(
            uri.clone(),
            Node::file(name.map(|n| n.to_string()), content.to_vec()),
        );
        nodes
            .entry(parent.into())
            .or_insert_with(|| Node::directory(None))
            .children
            .push(uri);
    }

    /// Register a subdirectory under a parent directory
    pub fn add_child_directory(
        &self,
        parent: impl Into<DocumentUri>,
        uri: impl Into<DocumentUri>,
        name: impl Into<String>,
    ) {
        let uri = uri.into();
        let mut nodes = self.nodes.write().expect("node table lock poisoned");
        nodes.insert(uri.clone(), Node::directory(Some(name.into())));
        nodes
            .entry(parent.into())
            .or_insert_with(|| Node::directory(None))
            .children
            .push(uri);
    }

    /// Make reads of a file fail after `bytes` bytes have been served
    pub fn fail_reads_after(&self, uri: impl Into<DocumentUri>, bytes: usize) {
        let mut nodes = self.nodes.write().expect("node table lock poisoned");
        if let Some(node) = nodes.get_mut(&uri.into()) {
            node.fail_read_after = Some(bytes);
        }
    }

    /// Revoke access to a handle; it stops resolving until re-registered
    pub fn revoke(&self, uri: impl Into<DocumentUri>) {
        let mut revoked = self.revoked.write().expect("revoked set lock poisoned");
        revoked.insert(uri.into());
    }

    /// Whether a handle's grant has been persisted
    pub fn is_persisted(&self, uri: &DocumentUri) -> bool {
        let persisted = self.persisted.read().expect("persisted set lock poisoned");
        persisted.contains(uri)
    }

    fn node(&self, uri: &DocumentUri) -> Result<Node> {
        let revoked = self.revoked.read().expect("revoked set lock poisoned");
        if revoked.contains(uri) {
            return Err(AccessError::permission_denied(format!(
                "access revoked for {}",
                uri
            )));
        }
        drop(revoked);

        let nodes = self.nodes.read().expect("node table lock poisoned");
        nodes
            .get(uri)
            .cloned()
            .ok_or_else(|| AccessError::not_found(uri.to_string()))
    }
}

impl DocumentProvider for MemoryProvider {
    fn resolve(&self, uri: &DocumentUri) -> Result<DocumentEntry> {
        let node = self.node(uri)?;
        Ok(DocumentEntry {
            uri: uri.clone(),
            name: node.name,
            kind: node.kind,
        })
    }

    fn list_children(&self, uri: &DocumentUri) -> Result<Vec<DocumentEntry>> {
        let node = self.node(uri)?;
        if node.kind != DocumentKind::Directory {
            return Err(AccessError::NotADirectory(uri.to_string()));
        }
        // Insertion order is the provider order
        let mut children = Vec::new();
        for child in &node.children {
            if let Ok(entry) = self.resolve(child) {
                children.push(entry);
            }
        }
        Ok(children)
    }

    fn open_read(&self, uri: &DocumentUri) -> Result<Box<dyn Read + Send>> {
        let node = self.node(uri)?;
        if node.kind != DocumentKind::File {
            return Err(AccessError::NotAFile(uri.to_string()));
        }
        Ok(Box::new(MemoryReader {
            data: Cursor::new(node.content),
            fail_after: node.fail_read_after,
            served: 0,
        }))
    }

    fn persist_grant(&self, uri: &DocumentUri) -> Result<()> {
        // Resolvability stands in for "a grant covers this handle"
        self.node(uri)?;
        let mut persisted = self.persisted.write().expect("persisted set lock poisoned");
        persisted.insert(uri.clone());
        Ok(())
    }
}

/// Reader over a file node's bytes with an optional injected failure point
struct MemoryReader {
    data: Cursor<Vec<u8>>,
    fail_after: Option<usize>,
    served: usize,
}

impl Read for MemoryReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(limit) = self.fail_after else {
            return self.data.read(buf);
        };
        if self.served >= limit {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "simulated stream failure",
            ));
        }
        let cap = buf.len().min(limit - self.served);
        let read = self.data.read(&mut buf[..cap])?;
        self.served += read;
        Ok(read)
    }
}
