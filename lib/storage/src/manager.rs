use crate::loader::load_products;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use vendorq_core::{Catalog, Error, Result};

/// Holds the current catalog snapshot.
///
/// Readers clone the `Arc` and keep using it for the whole request; a reload
/// builds the new catalog outside the lock and swaps it in with one write.
pub struct CatalogStore {
    path: Option<PathBuf>,
    current: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogStore {
    /// A store with nothing loaded
    pub fn empty() -> Self {
        Self {
            path: None,
            current: RwLock::new(None),
        }
    }

    /// A store without backing file, serving `catalog`
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            path: None,
            current: RwLock::new(Some(Arc::new(catalog))),
        }
    }

    /// A store bound to `path` that has not loaded yet
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            current: RwLock::new(None),
        }
    }

    /// Bind to `path` and load it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::with_path(path);
        store.reload()?;
        Ok(store)
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Current snapshot, or `CatalogUnavailable` if none has loaded
    pub fn snapshot(&self) -> Result<Arc<Catalog>> {
        self.current
            .read()
            .clone()
            .ok_or_else(|| Error::CatalogUnavailable("catalog not loaded".to_string()))
    }

    /// Re-read the backing file and publish it as the new snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<Catalog>> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| Error::CatalogUnavailable("no catalog path configured".to_string()))?;

        let catalog = Arc::new(Catalog::new(load_products(path)?));
        info!(
            "Loaded catalog from {}: {} products, {} feature rows",
            path.display(),
            catalog.product_count(),
            catalog.feature_count()
        );

        *self.current.write() = Some(catalog.clone());
        Ok(catalog)
    }

    /// Publish `catalog` directly
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        *self.current.write() = Some(catalog.clone());
        catalog
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::empty()
    }
}
