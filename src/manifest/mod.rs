//! Package manifest records.
//!
//! A [`ManifestRecord`] is the ephemeral result of reading one manifest file:
//! the fixed field set from [`extractor`] plus the [`ManifestRole`] from
//! [`role`]. Records live only for the duration of a catalog build; the
//! builder folds them into one [`CatalogEntry`](crate::catalog::CatalogEntry)
//! per package identifier.
//!
//! Absent fields are empty strings (or an empty tag list), never errors.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wincat::manifest::{ManifestRecord, ManifestRole};
//!
//! let text = "PackageIdentifier: Valve.Steam\nPackageVersion: 2.10.91.91\nManifestType: version\n";
//! let record = ManifestRecord::parse("Valve.Steam.yaml", text);
//!
//! assert_eq!(record.identifier, "Valve.Steam");
//! assert_eq!(record.role, ManifestRole::Version);
//! ```

pub mod extractor;
pub mod role;

pub use extractor::{ExtractedFields, extract_fields};
pub use role::{ManifestRole, is_candidate_file};

/// One manifest file's extracted fields and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub role: ManifestRole,
    pub identifier: String,
    pub version: String,
    pub name: String,
    pub publisher: String,
    pub moniker: String,
    pub short_description: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl ManifestRecord {
    /// Extracts fields from `text` and classifies the record using `file_name`.
    pub fn parse(file_name: &str, text: &str) -> Self {
        let fields = extract_fields(text);
        let role = ManifestRole::classify(file_name, &fields.manifest_type, &fields.locale);
        fields.into_record(role)
    }

    /// Short description, falling back to the long one.
    pub fn summary(&self) -> &str {
        if self.short_description.is_empty() {
            &self.description
        } else {
            &self.short_description
        }
    }

    /// Whether any descriptive field (name, publisher, description) is present.
    pub fn has_descriptive_fields(&self) -> bool {
        !self.name.is_empty() || !self.publisher.is_empty() || !self.summary().is_empty()
    }
}
