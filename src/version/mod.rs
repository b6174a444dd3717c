//! Version handling for package manifests.
//!
//! Manifest versions are compared with a component-wise rule rather than
//! semver; see [`comparison`].

pub mod comparison;

pub use comparison::{compare_versions, is_newer};
