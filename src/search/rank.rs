//! Tiered relevance ranking.
//!
//! Every entry gets a discrete [`MatchTier`] against the query (lower is
//! better) or is excluded. Ties are broken by [`id_priority`], which favours
//! canonical `Publisher.Product` identifiers over sub-packages, and finally by
//! the lower-cased identifier. The result is a total, deterministic order that
//! does not depend on field lengths.
//!
//! # Tiers
//!
//! | Tier | Single-word query                     | Multi-word query           |
//! |------|---------------------------------------|----------------------------|
//! | 1    | name equals query                     | same                       |
//! | 2    | moniker equals query                  | same                       |
//! | 3    | some tag equals query                 | every word in name         |
//! | 4    | name starts with query                | same                       |
//! | 5    | a name word equals/starts with query  | same                       |
//! | 6    | identifier equals query               | same                       |
//! | 7    | identifier starts with query          | same                       |
//! | 8    | name contains query                   | same                       |
//! | 9    | identifier contains query             | every word in identifier   |
//! | 10   | some tag contains query               | same                       |
//! | 11   | moniker contains query                | every word in moniker      |
//!
//! Comparisons are case-insensitive. "Same" rows compare against the whole
//! trimmed query string.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wincat::catalog::CatalogEntry;
//! use wincat::search::rank;
//!
//! let items = vec![
//!     CatalogEntry::new("Valve.SteamLink", "Steam Link"),
//!     CatalogEntry::new("Valve.Steam", "Steam"),
//! ];
//! let ranked = rank(&items, "steam", 10);
//! assert_eq!(ranked[0].identifier, "Valve.Steam");
//! ```

use crate::catalog::CatalogEntry;

/// Discrete relevance of one entry; declaration order is rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    NameExact = 1,
    MonikerExact = 2,
    /// Tag equals the query, or every word of a multi-word query is in the name.
    TagExactOrNameAllWords = 3,
    NamePrefix = 4,
    NameWordPrefix = 5,
    IdExact = 6,
    IdPrefix = 7,
    NameContains = 8,
    /// Identifier contains the query, or every word of a multi-word query.
    IdContains = 9,
    TagContains = 10,
    /// Moniker contains the query, or every word of a multi-word query.
    MonikerContains = 11,
}

impl MatchTier {
    /// Numeric tier, `1` best.
    pub const fn level(self) -> u8 {
        self as u8
    }
}

/// A normalized query: lower-cased, trimmed, and split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    words: Vec<String>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let words = text.split_whitespace().map(str::to_string).collect();
        Self {
            text,
            words,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_multi_word(&self) -> bool {
        self.words.len() > 1
    }

    fn all_words_in(&self, haystack: &str) -> bool {
        !haystack.is_empty() && self.words.iter().all(|w| haystack.contains(w.as_str()))
    }

    /// The tier `entry` reaches, or `None` if it does not match.
    pub fn match_tier(&self, entry: &CatalogEntry) -> Option<MatchTier> {
        if self.is_empty() {
            return None;
        }

        let q = self.text.as_str();
        let multi = self.is_multi_word();
        let name = entry.name.to_lowercase();
        let id = entry.identifier.to_lowercase();
        let moniker = entry.moniker.to_lowercase();
        let tags: Vec<String> = entry.tags.iter().map(|t| t.to_lowercase()).collect();

        let tier = if name == q {
            MatchTier::NameExact
        } else if moniker == q {
            MatchTier::MonikerExact
        } else if (!multi && tags.iter().any(|t| t == q)) || (multi && self.all_words_in(&name)) {
            MatchTier::TagExactOrNameAllWords
        } else if name.starts_with(q) {
            MatchTier::NamePrefix
        } else if name.split_whitespace().any(|word| word.starts_with(q)) {
            MatchTier::NameWordPrefix
        } else if id == q {
            MatchTier::IdExact
        } else if id.starts_with(q) {
            MatchTier::IdPrefix
        } else if name.contains(q) {
            MatchTier::NameContains
        } else if (!multi && id.contains(q)) || (multi && self.all_words_in(&id)) {
            MatchTier::IdContains
        } else if tags.iter().any(|t| t.contains(q)) {
            MatchTier::TagContains
        } else if (!multi && moniker.contains(q)) || (multi && self.all_words_in(&moniker)) {
            MatchTier::MonikerContains
        } else {
            return None;
        };

        Some(tier)
    }
}

/// `0` for `Publisher.Product` identifiers, `1` for any other segment count.
pub fn id_priority(identifier: &str) -> u8 {
    if identifier.split('.').count() == 2 { 0 } else { 1 }
}

/// An entry annotated for sorting.
#[derive(Debug, Clone)]
pub struct RankedResult<'a> {
    pub tier: MatchTier,
    pub id_priority: u8,
    sort_id: String,
    /// Position of `entry` in the ranked slice.
    pub index: usize,
    pub entry: &'a CatalogEntry,
}

impl RankedResult<'_> {
    fn key(&self) -> (MatchTier, u8, &str) {
        (self.tier, self.id_priority, self.sort_id.as_str())
    }
}

/// All matches for `query`, annotated and sorted best first.
pub fn rank_annotated<'a>(items: &'a [CatalogEntry], query: &str) -> Vec<RankedResult<'a>> {
    let query = Query::new(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedResult<'a>> = items
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            query.match_tier(entry).map(|tier| RankedResult {
                tier,
                id_priority: id_priority(&entry.identifier),
                sort_id: entry.identifier.to_lowercase(),
                index,
                entry,
            })
        })
        .collect();

    // Stable: case-only identifier duplicates keep catalog order
    ranked.sort_by(|a, b| a.key().cmp(&b.key()));
    ranked
}

/// Ranks `items` against `query` and keeps the best `limit`.
///
/// Returns an empty list for an empty query; browse callers should use
/// catalog order instead.
pub fn rank<'a>(items: &'a [CatalogEntry], query: &str, limit: usize) -> Vec<&'a CatalogEntry> {
    rank_annotated(items, query).into_iter().take(limit).map(|r| r.entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, moniker: &str, tags: &[&str]) -> CatalogEntry {
        CatalogEntry {
            identifier: id.to_string(),
            name: name.to_string(),
            moniker: moniker.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..CatalogEntry::default()
        }
    }

    fn tier(q: &str, e: &CatalogEntry) -> Option<u8> {
        Query::new(q).match_tier(e).map(MatchTier::level)
    }

    fn ids<'a>(ranked: &[&'a CatalogEntry]) -> Vec<&'a str> {
        ranked.iter().map(|e| e.identifier.as_str()).collect()
    }

    #[test]
    fn test_each_single_word_tier() {
        assert_eq!(tier("steam", &entry("X.Y", "Steam", "", &[])), Some(1));
        assert_eq!(tier("vsc", &entry("X.Y", "Code", "vsc", &[])), Some(2));
        assert_eq!(tier("editor", &entry("X.Y", "Code", "", &["Editor"])), Some(3));
        assert_eq!(tier("fire", &entry("X.Y", "Firefox", "", &[])), Some(4));
        assert_eq!(tier("fox", &entry("X.Y", "Mozilla Foxy", "", &[])), Some(5));
        assert_eq!(tier("x.y", &entry("X.Y", "Zed", "", &[])), Some(6));
        assert_eq!(tier("mozilla", &entry("Mozilla.Firefox", "Browser", "", &[])), Some(7));
        assert_eq!(tier("ref", &entry("A.B", "Firefox", "", &[])), Some(8));
        assert_eq!(tier("fire", &entry("Mozilla.Firefox", "Browser", "", &[])), Some(9));
        assert_eq!(tier("owse", &entry("A.B", "Zed", "", &["browser"])), Some(10));
        assert_eq!(tier("ff", &entry("A.B", "Zed", "myffx", &[])), Some(11));
        assert_eq!(tier("nothing", &entry("A.B", "Zed", "z", &["tag"])), None);
    }

    #[test]
    fn test_best_tier_wins() {
        // Name equality beats everything else that also matches
        assert_eq!(tier("git", &entry("Git.Git", "Git", "git", &["git"])), Some(1));
        // Tag equality beats a name prefix
        assert_eq!(tier("node", &entry("OpenJS.NodeJS", "Node.js", "", &["node"])), Some(3));
    }

    #[test]
    fn test_comparisons_ignore_case_and_surrounding_space() {
        assert_eq!(tier("  STEAM ", &entry("Valve.Steam", "Steam", "", &[])), Some(1));
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let items = vec![entry("A.B", "A", "", &[])];
        assert!(rank(&items, "   ", 10).is_empty());
    }

    #[test]
    fn test_steam_before_steam_link() {
        let items = vec![
            entry("Valve.SteamLink", "Steam Link", "", &[]),
            entry("Valve.Steam", "Steam", "", &[]),
        ];
        assert_eq!(ids(&rank(&items, "steam", 10)), vec!["Valve.Steam", "Valve.SteamLink"]);
    }

    #[test]
    fn test_multi_word_every_word_present() {
        let items = vec![
            entry("Microsoft.VisualStudioCode", "Visual Studio Code", "", &[]),
            entry("Microsoft.VisualStudioCode.Insiders", "", "", &[]),
            entry("Other.Visual", "Visual Basic", "", &[]),
        ];

        assert_eq!(tier("visual code", &items[0]), Some(3));
        assert_eq!(tier("visual code", &items[1]), Some(9));
        assert_eq!(tier("visual code", &items[2]), None);
        assert_eq!(
            ids(&rank(&items, "visual code", 10)),
            vec!["Microsoft.VisualStudioCode", "Microsoft.VisualStudioCode.Insiders"]
        );
    }

    #[test]
    fn test_multi_word_uses_whole_query_for_other_tiers() {
        assert_eq!(tier("steam link", &entry("Valve.SteamLink", "Steam Link", "", &[])), Some(1));
        assert_eq!(tier("steam link", &entry("X.Y", "Steam Link Beta", "", &[])), Some(3));
        // Tag equality is not checked for multi-word queries
        assert_eq!(tier("dev tools", &entry("X.Y", "Zed", "", &["dev tools"])), Some(10));
        assert_eq!(tier("my tool", &entry("X.Y", "Zed", "toolmy", &[])), Some(11));
    }

    #[test]
    fn test_id_priority() {
        assert_eq!(id_priority("Valve.Steam"), 0);
        assert_eq!(id_priority("Microsoft.VisualStudio.2022.Community"), 1);
        assert_eq!(id_priority("NoDots"), 1);
    }

    #[test]
    fn test_tie_break_by_priority_then_identifier() {
        let items = vec![
            entry("Zed.Tool", "Tool", "", &[]),
            entry("Acme.Tool.Extra", "Tool", "", &[]),
            entry("acme.Tool", "Tool", "", &[]),
            entry("Beta.Tool", "Tool", "", &[]),
        ];
        assert_eq!(
            ids(&rank(&items, "tool", 10)),
            vec!["acme.Tool", "Beta.Tool", "Zed.Tool", "Acme.Tool.Extra"]
        );
    }

    #[test]
    fn test_limit_truncates() {
        let items: Vec<_> = (0..20).map(|i| entry(&format!("Pkg.N{i:02}"), "", "", &[])).collect();
        let ranked = rank(&items, "pkg", 5);
        assert_eq!(ids(&ranked), vec!["Pkg.N00", "Pkg.N01", "Pkg.N02", "Pkg.N03", "Pkg.N04"]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let items = vec![
            entry("B.Editor", "Editor B", "", &["edit"]),
            entry("A.Editor", "Editor A", "ed", &[]),
            entry("C.Edit.Tool", "Tool", "", &["editor"]),
        ];
        let first = rank(&items, "edit", 10);
        let second = rank(&items, "edit", 10);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_annotations() {
        let items = vec![entry("Valve.Steam", "Steam", "", &[])];
        let ranked = rank_annotated(&items, "steam");
        assert_eq!(ranked[0].tier, MatchTier::NameExact);
        assert_eq!(ranked[0].id_priority, 0);
    }
}
