//! Manifest role classification.
//!
//! A package version in the manifest tree is described by several files:
//!
//! ```text
//! manifests/m/Mozilla/Firefox/131.0.2/
//! ├── Mozilla.Firefox.yaml                    # version (or singleton)
//! ├── Mozilla.Firefox.installer.yaml          # installer, never catalogued
//! ├── Mozilla.Firefox.locale.en-US.yaml       # default locale
//! └── Mozilla.Firefox.locale.de-DE.yaml       # other locale
//! ```
//!
//! The `ManifestType` field inside the file is authoritative. When a file
//! lacks it, the file name decides.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static LOCALE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.locale\.([a-z0-9-]+)\.yaml$").expect("valid locale file regex")
});

/// Token marking a package's default-locale file.
const DEFAULT_LOCALE_TOKEN: &str = "defaultlocale";

/// The role a manifest file plays for its package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ManifestRole {
    /// Self-contained record carrying identity, version and descriptive fields.
    Primary,
    /// Localized descriptive metadata.
    Locale {
        /// `true` for the package's default-locale record.
        default: bool,
        /// Lower-cased locale code (`en-us`) when known.
        code: Option<String>,
    },
    /// Bare version stub: identifier and version, no descriptive fields.
    Version,
    /// Installer manifests, merged manifests and anything unrecognised.
    Unknown,
}

impl ManifestRole {
    /// Classifies a manifest from its explicit type marker, falling back to its file name.
    ///
    /// `manifest_type` is the raw `ManifestType` value (possibly empty) and
    /// `locale` the raw `PackageLocale` value (possibly empty).
    pub fn classify(file_name: &str, manifest_type: &str, locale: &str) -> Self {
        let code = normalize_locale(locale).or_else(|| locale_from_file_name(file_name));

        if !manifest_type.is_empty() {
            return match manifest_type.to_ascii_lowercase().as_str() {
                "singleton" => Self::Primary,
                "defaultlocale" => Self::Locale {
                    default: true,
                    code,
                },
                "locale" => Self::Locale {
                    default: false,
                    code,
                },
                "version" => Self::Version,
                _ => Self::Unknown,
            };
        }

        Self::from_file_name(file_name, code)
    }

    fn from_file_name(file_name: &str, code: Option<String>) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.contains(DEFAULT_LOCALE_TOKEN) {
            Self::Locale {
                default: true,
                code,
            }
        } else if LOCALE_FILE.is_match(&lower) {
            Self::Locale {
                default: false,
                code,
            }
        } else if !lower.contains(".locale.") && !lower.contains(".installer.") {
            Self::Primary
        } else {
            Self::Unknown
        }
    }

    /// Precedence among records of equal version: higher wins.
    ///
    /// Default-locale and primary records rank above other locales, which rank
    /// above bare version stubs.
    pub const fn locale_rank(&self) -> u8 {
        match self {
            Self::Primary | Self::Locale { default: true, .. } => 2,
            Self::Locale { default: false, .. } => 1,
            Self::Version | Self::Unknown => 0,
        }
    }

    /// `true` for records that carry the package's preferred descriptive fields.
    pub const fn is_preferred_locale(&self) -> bool {
        self.locale_rank() == 2
    }
}

impl fmt::Display for ManifestRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Locale { default: true, .. } => write!(f, "defaultLocale"),
            Self::Locale { code: Some(code), .. } => write!(f, "locale({code})"),
            Self::Locale { .. } => write!(f, "locale"),
            Self::Version => write!(f, "version"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Whether a file name can denote a catalogued role at all.
///
/// Used to skip files before reading them: non-YAML files, installer
/// manifests, and locales other than `preferred_locale` are never opened.
pub fn is_candidate_file(file_name: &str, preferred_locale: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    if !lower.ends_with(".yaml") {
        return false;
    }
    if lower.contains(DEFAULT_LOCALE_TOKEN) {
        return true;
    }
    if let Some(code) = locale_from_file_name(&lower) {
        return code.eq_ignore_ascii_case(preferred_locale);
    }
    !lower.contains(".locale.") && !lower.contains(".installer.")
}

fn locale_from_file_name(file_name: &str) -> Option<String> {
    let lower = file_name.to_ascii_lowercase();
    LOCALE_FILE
        .captures(&lower)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn normalize_locale(locale: &str) -> Option<String> {
    let trimmed = locale.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_ascii_lowercase())
}
