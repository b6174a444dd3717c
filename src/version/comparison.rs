//! Version comparison for package manifest versions.
//!
//! Manifest versions are free-form strings (`1.2.0`, `2024.10.1+build3`,
//! `0.9-rc1`, `latest`), so this is deliberately *not* semver. Versions are
//! split into components on `.`, `+` and `-` and compared position by
//! position:
//!
//! - a missing trailing component counts as `"0"`, so `1.2` equals `1.2.0`;
//! - two components that both parse as base-10 integers compare numerically;
//! - anything else compares as an ordinal, case-sensitive string, including a
//!   numeric component against a non-numeric one.
//!
//! The first differing position decides.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::cmp::Ordering;
//! use wincat::version::comparison::compare_versions;
//!
//! assert_eq!(compare_versions("1.2.0", "1.2"), Ordering::Equal);
//! assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
//! assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// Characters that separate version components.
const SEPARATORS: [char; 3] = ['.', '+', '-'];

/// Compares two manifest version strings.
///
/// See the [module documentation](self) for the rules. The comparison is
/// total for well-behaved inputs but is not guaranteed transitive when
/// numeric and non-numeric components mix at the same position.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.split(SEPARATORS).collect();
    let right: Vec<&str> = b.split(SEPARATORS).collect();
    let len = left.len().max(right.len());

    for i in 0..len {
        let x = left.get(i).copied().unwrap_or("0");
        let y = right.get(i).copied().unwrap_or("0");

        let ordering = compare_component(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Returns `true` when `candidate` is strictly newer than `current`.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    compare_versions(candidate, current) == Ordering::Greater
}

fn compare_component(x: &str, y: &str) -> Ordering {
    match (parse_numeric(x), parse_numeric(y)) {
        (Some(nx), Some(ny)) => nx.cmp(&ny),
        _ => x.cmp(y),
    }
}

/// Base-10 digits only; signs, whitespace and overflow fall back to string comparison.
fn parse_numeric(component: &str) -> Option<u64> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}
