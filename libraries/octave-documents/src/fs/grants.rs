//! Grant registry for the filesystem provider
//!
//! A grant is minted when the host points Octave at a directory and dies with
//! the process unless persisted. Persisted grants are written as JSON at a
//! configured store path and reloaded when the provider is constructed, so
//! they survive restarts while transient ones do not.

use octave_core::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// One granted directory scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    /// Opaque id handles under this grant are minted with
    pub id: Uuid,

    /// Root directory the grant covers
    pub root: PathBuf,

    /// Read access
    pub read: bool,

    /// Write access
    pub write: bool,

    /// Whether the grant survives restarts
    pub persisted: bool,

    /// Unix timestamp of when the grant was taken
    pub granted_at: i64,
}

/// In-process grant table with optional JSON persistence
#[derive(Debug, Default)]
pub struct GrantStore {
    grants: HashMap<Uuid, Grant>,
    store_path: Option<PathBuf>,
}

impl GrantStore {
    /// Create an empty store that never persists anything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store backed by a JSON file at `path`, restoring any grants
    /// persisted by a previous run.
    pub fn with_store_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut grants = HashMap::new();
        if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let restored: Vec<Grant> = serde_json::from_str(&raw)?;
            for grant in restored {
                grants.insert(grant.id, grant);
            }
        }
        Ok(Self {
            grants,
            store_path: Some(path),
        })
    }

    /// Register a transient read/write grant for a directory root
    pub fn insert(&mut self, root: PathBuf) -> Grant {
        let grant = Grant {
            id: Uuid::new_v4(),
            root,
            read: true,
            write: true,
            persisted: false,
            granted_at: chrono::Utc::now().timestamp(),
        };
        self.grants.insert(grant.id, grant.clone());
        grant
    }

    /// Look up a grant by id
    pub fn get(&self, id: &Uuid) -> Option<&Grant> {
        self.grants.get(id)
    }

    /// Mark a grant persisted and write the store file.
    ///
    /// Re-persisting an already persisted grant rewrites the same state and
    /// succeeds.
    pub fn persist(&mut self, id: &Uuid) -> Result<()> {
        let grant = self
            .grants
            .get_mut(id)
            .ok_or_else(|| AccessError::permission_denied(format!("no grant {}", id)))?;
        grant.persisted = true;
        self.save()
    }

    /// Drop a grant; handles minted under it stop resolving
    pub fn revoke(&mut self, id: &Uuid) -> Result<()> {
        self.grants
            .remove(id)
            .ok_or_else(|| AccessError::permission_denied(format!("no grant {}", id)))?;
        self.save()
    }

    /// Number of live grants
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Whether the table holds no grants
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };
        let persisted: Vec<&Grant> = self.grants.values().filter(|g| g.persisted).collect();
        let raw = serde_json::to_string_pretty(&persisted)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
