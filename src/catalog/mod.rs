//! The package catalog: one entry per package identifier.
//!
//! This module owns the persisted data model and everything that produces or
//! publishes it:
//!
//! - [`builder`] walks a manifest tree and folds records into a [`Catalog`]
//! - [`io`] saves and loads the JSON artifact
//! - [`store`] holds the published snapshot and answers `search`/`list`
//!
//! # Artifact Format
//!
//! ```json
//! {
//!   "generatedAt": "2026-10-14T08:00:00Z",
//!   "total": 1,
//!   "items": [
//!     {
//!       "PackageIdentifier": "Mozilla.Firefox",
//!       "Name": "Mozilla Firefox",
//!       "Publisher": "Mozilla",
//!       "Moniker": "firefox",
//!       "Version": "131.0.2",
//!       "Description": "Fast, private browsing",
//!       "Tags": ["browser"]
//!     }
//!   ]
//! }
//! ```
//!
//! # Invariants
//!
//! - exactly one entry per distinct identifier (case-sensitive)
//! - `items` sorted ascending by identifier using ordinal byte comparison
//! - `total == items.len()`
//! - a built catalog is never mutated; a rebuild produces a new snapshot

pub mod builder;
pub mod io;
pub mod store;

pub use builder::{BuildOptions, BuildOutput, BuildReport, CatalogBuilder};
pub use io::{load_catalog, save_catalog};
pub use store::{CatalogStore, Page, StoreStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::manifest::ManifestRecord;

/// One package in the catalog.
///
/// Deserialization is the single normalization boundary for item shapes: it
/// goes through [`RawCatalogEntry`], so every field spelling other producers
/// of this artifact use is accepted and `null` or missing fields become empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCatalogEntry")]
pub struct CatalogEntry {
    #[serde(rename = "PackageIdentifier")]
    pub identifier: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Publisher")]
    pub publisher: String,

    #[serde(rename = "Moniker")]
    pub moniker: String,

    #[serde(rename = "Version")]
    pub version: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Tags")]
    pub tags: Vec<String>,
}

/// An artifact item as written, before normalization.
///
/// Each spelling is its own field so an item carrying several of them is not
/// a duplicate-field error.
#[derive(Debug, Deserialize)]
struct RawCatalogEntry {
    #[serde(rename = "PackageIdentifier")]
    package_identifier: Option<String>,
    #[serde(rename = "Id")]
    id_pascal: Option<String>,
    id: Option<String>,

    #[serde(rename = "Name")]
    name_pascal: Option<String>,
    name: Option<String>,
    #[serde(rename = "PackageName")]
    package_name: Option<String>,

    #[serde(rename = "Publisher")]
    publisher_pascal: Option<String>,
    publisher: Option<String>,

    #[serde(rename = "Moniker")]
    moniker_pascal: Option<String>,
    moniker: Option<String>,

    #[serde(rename = "Version")]
    version_pascal: Option<String>,
    version: Option<String>,
    #[serde(rename = "PackageVersion")]
    package_version: Option<String>,

    #[serde(rename = "Description")]
    description_pascal: Option<String>,
    description: Option<String>,
    #[serde(rename = "ShortDescription")]
    short_description: Option<String>,

    #[serde(rename = "Tags")]
    tags_pascal: Option<Vec<String>>,
    tags: Option<Vec<String>>,
}

/// First non-empty spelling, in precedence order.
fn first_present(candidates: impl IntoIterator<Item = Option<String>>) -> String {
    candidates.into_iter().flatten().find(|v| !v.is_empty()).unwrap_or_default()
}

impl From<RawCatalogEntry> for CatalogEntry {
    fn from(raw: RawCatalogEntry) -> Self {
        let tags = [raw.tags_pascal, raw.tags].into_iter().flatten().find(|t| !t.is_empty());

        Self {
            identifier: first_present([raw.package_identifier, raw.id_pascal, raw.id]),
            name: first_present([raw.name_pascal, raw.name, raw.package_name]),
            publisher: first_present([raw.publisher_pascal, raw.publisher]),
            moniker: first_present([raw.moniker_pascal, raw.moniker]),
            version: first_present([raw.version_pascal, raw.version, raw.package_version]),
            description: first_present([
                raw.description_pascal,
                raw.description,
                raw.short_description,
            ]),
            tags: tags.unwrap_or_default(),
        }
    }
}

impl CatalogEntry {
    /// Creates an entry with just an identifier and display name.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name for display, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.identifier
        } else {
            &self.name
        }
    }
}

impl From<ManifestRecord> for CatalogEntry {
    fn from(record: ManifestRecord) -> Self {
        let description = if record.short_description.is_empty() {
            record.description
        } else {
            record.short_description
        };

        Self {
            identifier: record.identifier,
            name: record.name,
            publisher: record.publisher,
            moniker: record.moniker,
            version: record.version,
            description,
            tags: record.tags,
        }
    }
}

/// Immutable, sorted snapshot of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub items: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wraps entries into a catalog, sorting them by identifier and setting `total`.
    pub fn new(mut items: Vec<CatalogEntry>, generated_at: DateTime<Utc>) -> Self {
        items.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Self {
            generated_at,
            total: items.len(),
            items,
        }
    }

    /// An empty catalog stamped with the current time.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Utc::now())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive identifier lookup.
    ///
    /// The builder keys entries case-sensitively, so several entries can match;
    /// the exact-case match wins, otherwise the first in catalog order.
    pub fn find(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.items
            .binary_search_by(|e| e.identifier.as_str().cmp(identifier))
            .ok()
            .map(|i| &self.items[i])
            .or_else(|| self.items.iter().find(|e| e.identifier.eq_ignore_ascii_case(identifier)))
    }

    /// Browse-order window starting at `offset`.
    pub fn window(&self, offset: usize, limit: usize) -> &[CatalogEntry] {
        let start = offset.min(self.items.len());
        let end = start.saturating_add(limit).min(self.items.len());
        &self.items[start..end]
    }
}
