//! The published catalog and the query interface over it.
//!
//! [`CatalogStore`] holds at most one immutable [`Catalog`] snapshot behind an
//! [`ArcSwapOption`]. Any number of readers can query concurrently; each
//! query pins the snapshot that was current when it started. Publishing a
//! freshly built catalog is a single atomic swap: new readers see the new
//! snapshot, in-flight readers finish on the old one.
//!
//! # Query Interface
//!
//! - [`CatalogStore::search`] ranks the whole catalog against a query and
//!   returns one window of the ranked list plus the match count
//! - [`CatalogStore::list`] returns one window of catalog (identifier) order
//! - [`CatalogStore::find`] looks an identifier up case-insensitively
//! - [`CatalogStore::status`] reports readiness, size and build time
//!
//! Every query on an empty store fails with [`CatalogError::NoCatalogLoaded`],
//! which callers must keep distinct from an empty result.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wincat::catalog::CatalogStore;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let store = CatalogStore::new();
//! store.load(Path::new("data/index.json"))?;
//!
//! let page = store.search("firefox", 10, 0)?;
//! println!("{} matches", page.total);
//! # Ok(())
//! # }
//! ```

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::{Catalog, CatalogEntry, load_catalog};
use crate::constants::{DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT};
use crate::core::CatalogError;
use crate::search::rank;

/// One window of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Size of the full result set the window was cut from.
    pub total: usize,
    pub items: Vec<CatalogEntry>,
}

/// Readiness report for the published snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub ready: bool,
    pub total: usize,
    pub generated_at: Option<DateTime<Utc>>,
}

/// Holder of the published catalog snapshot.
#[derive(Debug)]
pub struct CatalogStore {
    current: ArcSwapOption<Catalog>,
    max_limit: usize,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// An empty store: every query fails with `NoCatalogLoaded` until something is published.
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
            max_limit: MAX_QUERY_LIMIT,
        }
    }

    /// Overrides the page size cap applied by [`search`](Self::search) and [`list`](Self::list).
    #[must_use]
    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit.max(1);
        self
    }

    /// A store already holding `catalog`.
    pub fn with_catalog(catalog: Catalog) -> Self {
        let store = Self::new();
        store.publish(catalog);
        store
    }

    /// Atomically replaces the published snapshot.
    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        info!(total = catalog.total, "Publishing catalog generated at {}", catalog.generated_at);
        self.current.store(Some(Arc::clone(&catalog)));
        catalog
    }

    /// Loads the artifact at `path` and publishes it.
    ///
    /// On failure the previously published snapshot, if any, stays in place.
    pub fn load(&self, path: &Path) -> Result<Arc<Catalog>, CatalogError> {
        match load_catalog(path) {
            Ok(catalog) => Ok(self.publish(catalog)),
            Err(e) => {
                warn!("No usable catalog at {}: {e}", path.display());
                Err(e)
            }
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Result<Arc<Catalog>, CatalogError> {
        self.current.load_full().ok_or(CatalogError::NoCatalogLoaded)
    }

    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    pub fn status(&self) -> StoreStatus {
        match self.current.load_full() {
            Some(catalog) => StoreStatus {
                ready: true,
                total: catalog.total,
                generated_at: Some(catalog.generated_at),
            },
            None => StoreStatus {
                ready: false,
                total: 0,
                generated_at: None,
            },
        }
    }

    /// Ranked search. An empty or whitespace-only query lists catalog order instead.
    ///
    /// `total` is the number of matching entries; `items` is the
    /// `offset..offset + limit` window of the ranked list.
    pub fn search(&self, query: &str, limit: usize, offset: usize) -> Result<Page, CatalogError> {
        if query.trim().is_empty() {
            return self.list(limit, offset);
        }
        let catalog = self.snapshot()?;
        let limit = self.clamp_limit(limit);

        let ranked = rank(&catalog.items, query, catalog.items.len());
        let items = ranked.iter().skip(offset).take(limit).map(|&e| e.clone()).collect();

        Ok(Page {
            total: ranked.len(),
            items,
        })
    }

    /// Catalog order starting at `offset`.
    pub fn list(&self, limit: usize, offset: usize) -> Result<Page, CatalogError> {
        let catalog = self.snapshot()?;
        let limit = self.clamp_limit(limit);

        Ok(Page {
            total: catalog.total,
            items: catalog.window(offset, limit).to_vec(),
        })
    }

    /// Case-insensitive identifier lookup.
    pub fn find(&self, identifier: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        Ok(self.snapshot()?.find(identifier).cloned())
    }

    /// `0` means "use the default".
    fn clamp_limit(&self, limit: usize) -> usize {
        let limit = if limit == 0 { DEFAULT_QUERY_LIMIT } else { limit };
        limit.min(self.max_limit)
    }
}
