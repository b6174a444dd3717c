//! Line-oriented field extraction from manifest text.
//!
//! Manifests are YAML documents, but only a fixed set of top-level scalar
//! fields and one list (`Tags`) is ever needed, so extraction works line by
//! line instead of parsing YAML:
//!
//! - a scalar is the first line matching `^<Field>\s*:\s*(.*)$` with a
//!   case-insensitive key; the value is trimmed and one surrounding pair of
//!   matching quotes is removed;
//! - `Tags` is either an inline `[a, b]` list on the key line or a block of
//!   `- item` lines below it. Blank lines inside the block are skipped and any
//!   other line ends it.
//!
//! Extraction never fails. Missing fields come back empty and nested mappings
//! are simply not looked at.

use regex::Regex;
use std::sync::LazyLock;

use super::{ManifestRecord, ManifestRole};

static TAGS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*Tags\s*:(.*)$").expect("valid tags regex"));

/// Scalar field names read from a manifest.
pub mod fields {
    /// Unique package key, e.g. `Mozilla.Firefox`.
    pub const PACKAGE_IDENTIFIER: &str = "PackageIdentifier";
    /// Version of the package described by this manifest.
    pub const PACKAGE_VERSION: &str = "PackageVersion";
    /// Display name.
    pub const PACKAGE_NAME: &str = "PackageName";
    /// Older manifests use `Name` instead of `PackageName`.
    pub const NAME: &str = "Name";
    pub const PUBLISHER: &str = "Publisher";
    pub const MONIKER: &str = "Moniker";
    pub const SHORT_DESCRIPTION: &str = "ShortDescription";
    pub const DESCRIPTION: &str = "Description";
    /// Explicit role marker (`singleton`, `version`, `defaultLocale`, ...).
    pub const MANIFEST_TYPE: &str = "ManifestType";
    pub const PACKAGE_LOCALE: &str = "PackageLocale";
}

/// Raw text fields pulled out of one manifest, before role classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub identifier: String,
    pub version: String,
    pub name: String,
    pub publisher: String,
    pub moniker: String,
    pub short_description: String,
    pub description: String,
    pub manifest_type: String,
    pub locale: String,
    pub tags: Vec<String>,
}

impl ExtractedFields {
    /// Attaches a role, producing the record the catalog builder folds.
    pub fn into_record(self, role: ManifestRole) -> ManifestRecord {
        ManifestRecord {
            role,
            identifier: self.identifier,
            version: self.version,
            name: self.name,
            publisher: self.publisher,
            moniker: self.moniker,
            short_description: self.short_description,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Extracts the known field set from manifest text.
///
/// `name` falls back from `PackageName` to `Name`.
pub fn extract_fields(text: &str) -> ExtractedFields {
    let lines: Vec<&str> = text.lines().collect();
    let scalar = |key: &str| scalar_field(&lines, key);

    let mut name = scalar(fields::PACKAGE_NAME);
    if name.is_empty() {
        name = scalar(fields::NAME);
    }

    ExtractedFields {
        identifier: scalar(fields::PACKAGE_IDENTIFIER),
        version: scalar(fields::PACKAGE_VERSION),
        name,
        publisher: scalar(fields::PUBLISHER),
        moniker: scalar(fields::MONIKER),
        short_description: scalar(fields::SHORT_DESCRIPTION),
        description: scalar(fields::DESCRIPTION),
        manifest_type: scalar(fields::MANIFEST_TYPE),
        locale: scalar(fields::PACKAGE_LOCALE),
        tags: tags_field(&lines),
    }
}

/// Value of the first line whose key matches `key` case-insensitively, or `""`.
pub fn scalar_field(lines: &[&str], key: &str) -> String {
    lines
        .iter()
        .find_map(|line| match_scalar(line, key))
        .map(|value| unquote(value).to_string())
        .unwrap_or_default()
}

/// Matches `^<key>\s*:\s*(.*)$` without compiling a regex per key.
fn match_scalar<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let head = line.get(..key.len())?;
    if !head.eq_ignore_ascii_case(key) {
        return None;
    }
    let rest = line[key.len()..].trim_start();
    rest.strip_prefix(':')
}

/// Reads the `Tags` list in either inline or block form.
pub fn tags_field(lines: &[&str]) -> Vec<String> {
    let Some((start, after_colon)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| TAGS_LINE.captures(line).map(|c| (i, c.get(1).map_or("", |m| m.as_str()))))
    else {
        return Vec::new();
    };

    if let Some(open) = after_colon.find('[') {
        let inside = &after_colon[open + 1..];
        let inside = inside.find(']').map_or(inside, |close| &inside[..close]);
        return inside
            .split(',')
            .map(unquote)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
    }

    let mut tags = Vec::new();
    for line in &lines[start + 1..] {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        match block_item(trimmed) {
            Some(item) => {
                let tag = unquote(item);
                if !tag.is_empty() {
                    tags.push(tag.to_string());
                }
            }
            None => break,
        }
    }
    tags
}

/// `- item` (or a bare `-`) yields the item text.
fn block_item(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix('-')?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Trims and strips one surrounding pair of matching `"` or `'`.
pub fn unquote(value: &str) -> &str {
    let s = value.trim();
    let stripped = ['"', '\''].iter().find_map(|&q| {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            Some(&s[1..s.len() - 1])
        } else {
            None
        }
    });
    stripped.map_or(s, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_LOCALE: &str = "\
# yaml-language-server: $schema=https://aka.ms/winget-manifest.defaultLocale.1.6.0.schema.json
PackageIdentifier: Mozilla.Firefox
PackageVersion: 131.0.2
PackageLocale: en-US
Publisher: Mozilla
PackageName: \"Mozilla Firefox\"
Moniker: firefox
ShortDescription: 'Fast, private browsing'
Description: Mozilla Firefox is free and open source software.
Tags:
- browser

- gecko
-   \"web\"
ReleaseNotesUrl: https://www.mozilla.org/firefox/notes/
ManifestType: defaultLocale
ManifestVersion: 1.6.0
";

    #[test]
    fn test_extracts_scalars() {
        let f = extract_fields(DEFAULT_LOCALE);
        assert_eq!(f.identifier, "Mozilla.Firefox");
        assert_eq!(f.version, "131.0.2");
        assert_eq!(f.name, "Mozilla Firefox");
        assert_eq!(f.publisher, "Mozilla");
        assert_eq!(f.moniker, "firefox");
        assert_eq!(f.short_description, "Fast, private browsing");
        assert_eq!(f.description, "Mozilla Firefox is free and open source software.");
        assert_eq!(f.manifest_type, "defaultLocale");
        assert_eq!(f.locale, "en-US");
    }

    #[test]
    fn test_block_tags_skip_blank_lines_and_stop_at_next_key() {
        let f = extract_fields(DEFAULT_LOCALE);
        assert_eq!(f.tags, vec!["browser", "gecko", "web"]);
    }

    #[test]
    fn test_inline_tags() {
        let f = extract_fields("PackageIdentifier: A.B\nTags: [cli, \"dev tools\", 'git', , ]\n");
        assert_eq!(f.tags, vec!["cli", "dev tools", "git"]);
    }

    #[test]
    fn test_inline_tags_without_closing_bracket() {
        let f = extract_fields("Tags: [one, two\n");
        assert_eq!(f.tags, vec!["one", "two"]);
    }

    #[test]
    fn test_indented_tags_key() {
        let f = extract_fields("  tags:\n    - Indented\n    - Keys\nother: x\n");
        assert_eq!(f.tags, vec!["Indented", "Keys"]);
    }

    #[test]
    fn test_dash_without_space_ends_block() {
        let f = extract_fields("Tags:\n- one\n-two\n- three\n");
        assert_eq!(f.tags, vec!["one"]);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let f = extract_fields("ManifestVersion: 1.6.0\n");
        assert_eq!(f, ExtractedFields::default());
    }

    #[test]
    fn test_keys_are_case_insensitive_and_first_match_wins() {
        let f = extract_fields("packageidentifier: First.One\nPackageIdentifier: Second.One\n");
        assert_eq!(f.identifier, "First.One");
    }

    #[test]
    fn test_key_must_start_the_line() {
        // Nested keys are not top-level fields
        let f = extract_fields("Agreements:\n  Publisher: Nested\nPublisher: Top\n");
        assert_eq!(f.publisher, "Top");
    }

    #[test]
    fn test_description_does_not_match_short_description() {
        let f = extract_fields("ShortDescription: short\n");
        assert_eq!(f.short_description, "short");
        assert_eq!(f.description, "");
    }

    #[test]
    fn test_name_falls_back_to_legacy_key() {
        let f = extract_fields("Name: Legacy Name\n");
        assert_eq!(f.name, "Legacy Name");
    }

    #[test]
    fn test_whitespace_before_colon() {
        let f = extract_fields("PackageIdentifier   :   Spaced.Out  \n");
        assert_eq!(f.identifier, "Spaced.Out");
    }

    #[test]
    fn test_crlf_line_endings() {
        let f = extract_fields("PackageIdentifier: Crlf.App\r\nTags:\r\n- one\r\n- two\r\nPublisher: X\r\n");
        assert_eq!(f.identifier, "Crlf.App");
        assert_eq!(f.tags, vec!["one", "two"]);
        assert_eq!(f.publisher, "X");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("  \"quoted\"  "), "quoted");
        assert_eq!(unquote("'single'"), "single");
        assert_eq!(unquote("\"mismatched'"), "\"mismatched'");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\" padded \""), "padded");
    }
}
