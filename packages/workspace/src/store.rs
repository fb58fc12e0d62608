//! # Persistence Gateway
//!
//! The only external boundary of the editing core: `save` a whole document,
//! `load` one by site id. No wire format is mandated by the contract; the
//! bundled implementations serialize JSON, one in memory and one as a file
//! per site.
//!
//! `save` must be idempotent-safe: the session may flush a document that has
//! not changed since the last successful save.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use sitebloc_editor::{site_seed, SiteDocument};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("site not found: {0}")]
    SiteNotFound(String),

    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Envelope around a persisted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSite {
    pub document: SiteDocument,
    pub saved_at: DateTime<Utc>,
}

/// Network/storage boundary for site documents
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Persist the whole document; safe to call repeatedly with the same
    /// content
    async fn save(&self, document: &SiteDocument) -> Result<(), StoreError>;

    /// Load the document persisted for a site
    async fn load(&self, site_id: &str) -> Result<SiteDocument, StoreError>;
}

/// In-memory store, used by tests and offline/demo sessions
#[derive(Default)]
pub struct MemoryStore {
    sites: RwLock<HashMap<String, StoredSite>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the last save for a site, if any
    pub async fn saved_at(&self, site_id: &str) -> Option<DateTime<Utc>> {
        self.sites.read().await.get(site_id).map(|s| s.saved_at)
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn save(&self, document: &SiteDocument) -> Result<(), StoreError> {
        let mut sites = self.sites.write().await;
        sites.insert(
            document.site_id.clone(),
            StoredSite {
                document: document.clone(),
                saved_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn load(&self, site_id: &str) -> Result<SiteDocument, StoreError> {
        let sites = self.sites.read().await;
        sites
            .get(site_id)
            .map(|s| s.document.clone())
            .ok_or_else(|| StoreError::SiteNotFound(site_id.to_string()))
    }
}

/// One JSON file per site under a root directory
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // File name derives from the hashed site id, so arbitrary ids cannot
    // escape the root directory.
    fn site_path(&self, site_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", site_seed(site_id)))
    }
}

#[async_trait]
impl SiteStore for FileStore {
    async fn save(&self, document: &SiteDocument) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let stored = StoredSite {
            document: document.clone(),
            saved_at: Utc::now(),
        };
        let bytes = serde_json::to_vec_pretty(&stored)?;

        let path = self.site_path(&document.site_id);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(site_id = %document.site_id, path = %path.display(), "site saved");
        Ok(())
    }

    async fn load(&self, site_id: &str) -> Result<SiteDocument, StoreError> {
        let path = self.site_path(site_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::SiteNotFound(site_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSite = serde_json::from_slice(&bytes)?;
        Ok(stored.document)
    }
}
