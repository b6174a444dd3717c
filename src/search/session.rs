//! Incremental result disclosure.
//!
//! A [`Session`] is the explicit state of one user's view over a catalog
//! snapshot. It is a plain value: every operation consumes the session and
//! returns the next one, so there is no shared or ambient state to keep in
//! sync.
//!
//! Two mutually exclusive modes:
//!
//! - **Browse** (empty query): catalog order. Each [`Session::show_more`]
//!   appends the next page from the current offset, so pages never overlap.
//! - **Search** (non-empty query): the whole catalog is ranked once when the
//!   query is set. [`Session::show_more`] only widens the visible prefix of
//!   that ranked list; it never re-ranks, so already visible results keep
//!   their relative order.
//!
//! Changing the query (including clearing it) resets the cursor of the mode
//! being entered to its first page.
//!
//! The session pins the [`Catalog`] it was created with. Publishing a new
//! catalog in a [`CatalogStore`](crate::catalog::CatalogStore) does not affect
//! existing sessions; start a new one to pick it up.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wincat::catalog::Catalog;
//! use wincat::search::Session;
//!
//! # fn example(catalog: Arc<Catalog>) {
//! let session = Session::new(catalog, 5).with_query("steam");
//! let first_page: Vec<_> = session.visible().iter().map(|e| e.identifier.clone()).collect();
//!
//! let session = session.show_more();
//! assert!(session.visible().len() >= first_page.len());
//! # }
//! ```

use std::sync::Arc;

use super::rank::rank_annotated;
use crate::catalog::{Catalog, CatalogEntry};

/// Which view a session is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Catalog order; `offset` entries have been revealed.
    Browse { offset: usize },
    /// Ranked results for `query`; the first `visible` are shown.
    Search {
        query: String,
        /// Catalog indices in ranked order.
        ranked: Vec<usize>,
        visible: usize,
    },
}

/// One user's disclosure state over a pinned catalog snapshot.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    page_size: usize,
    mode: Mode,
}

impl Session {
    /// Starts in browse mode with the first page revealed.
    pub fn new(catalog: Arc<Catalog>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let offset = page_size.min(catalog.len());
        Self {
            catalog,
            page_size,
            mode: Mode::Browse {
                offset,
            },
        }
    }

    /// Sets the query. Empty or whitespace-only switches to browse mode.
    #[must_use]
    pub fn with_query(self, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            let offset = self.page_size.min(self.catalog.len());
            return Self {
                mode: Mode::Browse {
                    offset,
                },
                ..self
            };
        }

        let ranked = rank_annotated(&self.catalog.items, query)
            .into_iter()
            .map(|r| r.index)
            .collect();

        Self {
            mode: Mode::Search {
                query: query.to_string(),
                ranked,
                visible: self.page_size,
            },
            ..self
        }
    }

    /// Reveals one more page.
    #[must_use]
    pub fn show_more(self) -> Self {
        let mode = match self.mode {
            Mode::Browse {
                offset,
            } => Mode::Browse {
                offset: offset.saturating_add(self.page_size).min(self.catalog.len()),
            },
            Mode::Search {
                query,
                ranked,
                visible,
            } => Mode::Search {
                query,
                ranked,
                visible: visible.saturating_add(self.page_size),
            },
        };
        Self {
            mode,
            ..self
        }
    }

    /// Entries currently revealed, in display order.
    pub fn visible(&self) -> Vec<&CatalogEntry> {
        match &self.mode {
            Mode::Browse {
                offset,
            } => self.catalog.items[..*offset].iter().collect(),
            Mode::Search {
                ranked,
                visible,
                ..
            } => ranked.iter().take(*visible).map(|&i| &self.catalog.items[i]).collect(),
        }
    }

    /// Whether [`show_more`](Self::show_more) would reveal anything.
    pub fn has_more(&self) -> bool {
        match &self.mode {
            Mode::Browse {
                offset,
            } => *offset < self.catalog.len(),
            Mode::Search {
                ranked,
                visible,
                ..
            } => ranked.len() > *visible,
        }
    }

    /// Size of the list being disclosed: the catalog in browse mode, the matches in search mode.
    pub fn total(&self) -> usize {
        match &self.mode {
            Mode::Browse {
                ..
            } => self.catalog.len(),
            Mode::Search {
                ranked,
                ..
            } => ranked.len(),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The active query, if in search mode.
    pub fn query(&self) -> Option<&str> {
        match &self.mode {
            Mode::Search {
                query,
                ..
            } => Some(query),
            Mode::Browse {
                ..
            } => None,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}
