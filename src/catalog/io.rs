//! Saving and loading the catalog artifact.
//!
//! The artifact is a single JSON document (`{ generatedAt, total, items }`).
//! Loading is tolerant in shape but strict in outcome:
//!
//! - a bare JSON array of items is accepted; its timestamp is the file's
//!   modification time
//! - items go through [`CatalogEntry`]'s normalizing deserialization, so
//!   alternate spellings and `null` fields never reject the artifact
//! - the result is re-sorted and `total` recomputed, so a hand-edited
//!   artifact cannot break the catalog invariants
//! - a missing or unreadable file is [`CatalogError::SourceUnavailable`]
//! - unparsable content is [`CatalogError::MalformedCatalog`]
//!
//! Callers that serve queries treat either error as "no catalog available"
//! (see [`CatalogStore`](super::CatalogStore)).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::{Catalog, CatalogEntry};
use crate::core::CatalogError;
use crate::utils::fs::atomic_write;

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(rename = "generatedAt", default)]
    generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    items: Option<Vec<CatalogEntry>>,
}

/// Writes `catalog` to `path` atomically.
///
/// `pretty` selects indented output; the default artifact is compact.
pub fn save_catalog(catalog: &Catalog, path: &Path, pretty: bool) -> anyhow::Result<()> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(catalog)?
    } else {
        serde_json::to_vec(catalog)?
    };
    atomic_write(path, &bytes)?;
    debug!("Wrote {} entries to {}", catalog.total, path.display());
    Ok(())
}

/// Reads the artifact at `path`.
///
/// # Errors
///
/// [`CatalogError::SourceUnavailable`] when the file cannot be read and
/// [`CatalogError::MalformedCatalog`] when it is not a catalog document.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::source_unavailable(path, e))?;
    let malformed = |e: serde_json::Error| CatalogError::MalformedCatalog {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let (generated_at, items) = if raw.trim_start().starts_with('[') {
        let items: Vec<CatalogEntry> = serde_json::from_str(&raw).map_err(malformed)?;
        (None, items)
    } else {
        let document: CatalogDocument = serde_json::from_str(&raw).map_err(malformed)?;
        (document.generated_at, document.items.unwrap_or_default())
    };
    let generated_at = generated_at.or_else(|| modified_time(path)).unwrap_or_else(Utc::now);

    Ok(Catalog::new(items, generated_at))
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified))
}
