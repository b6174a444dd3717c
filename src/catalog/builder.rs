//! Catalog builder: manifest tree in, sorted catalog out.
//!
//! # Algorithm
//!
//! 1. Walk the manifest root recursively, visiting every regular file.
//! 2. Skip, without reading, any file whose name cannot denote a catalogued
//!    role (installer manifests, other locales, non-YAML files).
//! 3. Extract fields, classify the role, and turn the record into a
//!    candidate entry.
//! 4. Fold candidates per identifier with [`DuplicateResolver`]: the highest
//!    version wins; at equal versions the record with the better locale rank
//!    wins; remaining ties go to the lexicographically smaller manifest path
//!    so the result does not depend on traversal order.
//! 5. Sort by identifier and stamp the snapshot.
//!
//! Per-file problems (unreadable entries, non-UTF-8 text, missing
//! identifiers) are counted in the [`BuildReport`] and never abort the build.
//! Only an unusable root fails with [`CatalogError::SourceUnavailable`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wincat::catalog::{BuildOptions, CatalogBuilder};
//!
//! # fn example() -> Result<(), wincat::core::CatalogError> {
//! let output = CatalogBuilder::new(BuildOptions::default())
//!     .build(Path::new("data/winget-pkgs/manifests"))?;
//! println!("{} packages", output.catalog.total);
//! # Ok(())
//! # }
//! ```

use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::{Catalog, CatalogEntry};
use crate::constants::{DEFAULT_PREFERRED_LOCALE, PROGRESS_UPDATE_INTERVAL};
use crate::core::CatalogError;
use crate::manifest::{ManifestRecord, ManifestRole, is_candidate_file};
use crate::utils::progress::ProgressBar;
use crate::version::compare_versions;

/// Knobs for a catalog build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Stop once this many distinct packages have been catalogued.
    pub limit: Option<usize>,
    /// Locale code (lower-case) accepted besides default-locale records.
    pub preferred_locale: String,
    /// Show a spinner while walking the tree.
    pub show_progress: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            limit: None,
            preferred_locale: DEFAULT_PREFERRED_LOCALE.to_string(),
            show_progress: false,
        }
    }
}

/// Counters collected while building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Regular files seen during traversal.
    pub files_visited: usize,
    /// Files whose name rules them out, plus records whose role is not catalogued.
    pub files_ignored: usize,
    /// Records offered to duplicate resolution.
    pub manifests_accepted: usize,
    /// Files that could not be read as text.
    pub malformed: usize,
    /// Records without a `PackageIdentifier`.
    pub missing_identifier: usize,
    /// Directory entries the walker could not read.
    pub unreadable_entries: usize,
    /// Distinct packages in the final catalog.
    pub packages: usize,
    /// `true` when traversal stopped early because of [`BuildOptions::limit`].
    pub truncated: bool,
    pub elapsed: Duration,
}

/// A finished build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub catalog: Catalog,
    pub report: BuildReport,
}

/// Builds catalogs from manifest trees.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    options: BuildOptions,
}

impl CatalogBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
        }
    }

    /// Walks `root` and produces a catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SourceUnavailable`] if `root` does not exist, is
    /// not a directory, or cannot be read at all. Nothing below the root can
    /// fail the build.
    pub fn build(&self, root: &Path) -> Result<BuildOutput, CatalogError> {
        let started = Instant::now();
        check_root(root)?;

        let progress = if self.options.show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        progress.set_message("Scanning manifests");

        let mut report = BuildReport::default();
        let mut resolver = DuplicateResolver::new();
        let preferred = self.options.preferred_locale.to_ascii_lowercase();

        for entry in WalkDir::new(root).follow_links(false) {
            if let Some(limit) = self.options.limit
                && resolver.len() >= limit
            {
                report.truncated = true;
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable root surfaces here as the very first item
                    if e.depth() == 0 {
                        return Err(CatalogError::source_unavailable(root, e));
                    }
                    debug!("Skipping unreadable entry: {e}");
                    report.unreadable_entries += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            report.files_visited += 1;
            if report.files_visited % PROGRESS_UPDATE_INTERVAL == 0 {
                progress.set_message(format!(
                    "Processed {} files, {} packages",
                    report.files_visited,
                    resolver.len()
                ));
            }

            let Some(file_name) = entry.file_name().to_str() else {
                report.files_ignored += 1;
                continue;
            };
            if !is_candidate_file(file_name, &preferred) {
                report.files_ignored += 1;
                continue;
            }

            let record = match read_record(entry.path(), file_name) {
                Ok(record) => record,
                Err(e) => {
                    debug!("{e}");
                    report.malformed += 1;
                    continue;
                }
            };

            if !is_catalogued_role(&record.role, &preferred) {
                report.files_ignored += 1;
                continue;
            }
            if record.identifier.is_empty() {
                debug!("Skipping {}: no PackageIdentifier", entry.path().display());
                report.missing_identifier += 1;
                continue;
            }

            let source = entry.path().strip_prefix(root).unwrap_or(entry.path()).to_path_buf();
            resolver.offer(Candidate::new(record, source));
            report.manifests_accepted += 1;
        }

        let catalog = resolver.into_catalog();
        report.packages = catalog.total;
        report.elapsed = started.elapsed();
        progress.finish_and_clear();

        info!(
            packages = report.packages,
            files = report.files_visited,
            accepted = report.manifests_accepted,
            malformed = report.malformed,
            elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            "Catalog built from {}",
            root.display()
        );

        Ok(BuildOutput {
            catalog,
            report,
        })
    }
}

fn check_root(root: &Path) -> Result<(), CatalogError> {
    let metadata = std::fs::metadata(root).map_err(|e| CatalogError::source_unavailable(root, e))?;
    if !metadata.is_dir() {
        return Err(CatalogError::source_unavailable(root, "not a directory"));
    }
    Ok(())
}

fn read_record(path: &Path, file_name: &str) -> Result<ManifestRecord, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::malformed_record(path, e))?;
    Ok(ManifestRecord::parse(file_name, &text))
}

/// Installer/unknown manifests and locales other than the preferred one are not catalogued.
fn is_catalogued_role(role: &ManifestRole, preferred_locale: &str) -> bool {
    match role {
        ManifestRole::Unknown => false,
        ManifestRole::Locale {
            default: false,
            code: Some(code),
        } => code == preferred_locale,
        _ => true,
    }
}

/// A record competing to be its package's catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub entry: CatalogEntry,
    pub locale_rank: u8,
    /// Manifest path relative to the build root, the final tie-break.
    pub source: PathBuf,
}

impl Candidate {
    pub fn new(record: ManifestRecord, source: PathBuf) -> Self {
        let locale_rank = record.role.locale_rank();
        Self {
            entry: CatalogEntry::from(record),
            locale_rank,
            source,
        }
    }

    /// Whether this candidate comes from a default-locale or primary record.
    pub const fn is_preferred_locale(&self) -> bool {
        self.locale_rank == 2
    }

    /// Total precedence order: version, then locale rank, then smaller path.
    pub fn precedence(&self, other: &Self) -> Ordering {
        compare_versions(effective_version(&self.entry.version), effective_version(&other.entry.version))
            .then(self.locale_rank.cmp(&other.locale_rank))
            .then_with(|| other.source.cmp(&self.source))
    }
}

/// Missing versions compete as `"0"`.
fn effective_version(version: &str) -> &str {
    if version.is_empty() { "0" } else { version }
}

/// Identifier → best candidate so far.
///
/// Entries are replaced wholesale when a candidate with higher precedence
/// arrives; fields are never merged across records.
#[derive(Debug, Default)]
pub struct DuplicateResolver {
    best: HashMap<String, Candidate>,
}

impl DuplicateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one candidate in. Returns `true` if it became the package's entry.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        match self.best.get_mut(&candidate.entry.identifier) {
            Some(current) => {
                if candidate.precedence(current) == Ordering::Greater {
                    *current = candidate;
                    true
                } else {
                    false
                }
            }
            None => {
                self.best.insert(candidate.entry.identifier.clone(), candidate);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&Candidate> {
        self.best.get(identifier)
    }

    /// Drops the bookkeeping and produces the sorted snapshot.
    pub fn into_catalog(self) -> Catalog {
        let items = self.best.into_values().map(|c| c.entry).collect();
        Catalog::new(items, Utc::now())
    }
}
