//! Manifest text and manifest tree fixtures.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Canned manifest documents in the multi-file and singleton layouts.
pub struct ManifestFixture;

impl ManifestFixture {
    pub fn version(id: &str, version: &str) -> String {
        format!(
            "# Created with a test fixture\n\
             PackageIdentifier: {id}\n\
             PackageVersion: {version}\n\
             DefaultLocale: en-US\n\
             ManifestType: version\n\
             ManifestVersion: 1.6.0\n"
        )
    }

    pub fn default_locale(id: &str, version: &str, name: &str, publisher: &str, tags: &[&str]) -> String {
        let mut text = format!(
            "PackageIdentifier: {id}\n\
             PackageVersion: {version}\n\
             PackageLocale: en-US\n\
             Publisher: {publisher}\n\
             PackageName: {name}\n\
             ShortDescription: {name} for tests\n"
        );
        if !tags.is_empty() {
            text.push_str("Tags:\n");
            for tag in tags {
                text.push_str(&format!("- {tag}\n"));
            }
        }
        text.push_str("ManifestType: defaultLocale\nManifestVersion: 1.6.0\n");
        text
    }

    pub fn locale(id: &str, version: &str, code: &str, name: &str) -> String {
        format!(
            "PackageIdentifier: {id}\n\
             PackageVersion: {version}\n\
             PackageLocale: {code}\n\
             PackageName: {name}\n\
             ManifestType: locale\n\
             ManifestVersion: 1.6.0\n"
        )
    }

    pub fn installer(id: &str, version: &str) -> String {
        format!(
            "PackageIdentifier: {id}\n\
             PackageVersion: {version}\n\
             Installers:\n\
             - Architecture: x64\n\
             \x20 InstallerUrl: https://example.invalid/setup.exe\n\
             ManifestType: installer\n\
             ManifestVersion: 1.6.0\n"
        )
    }

    pub fn singleton(id: &str, version: &str, name: &str, moniker: &str) -> String {
        format!(
            "PackageIdentifier: {id}\n\
             PackageVersion: {version}\n\
             PackageName: {name}\n\
             Moniker: {moniker}\n\
             ShortDescription: \"{name}, singleton\"\n\
             ManifestType: singleton\n\
             ManifestVersion: 1.0.0\n"
        )
    }
}

/// A manifest tree in a temporary directory.
///
/// Versions land at `<first letter>/<Publisher>/<Rest...>/<version>/`, as in
/// the public manifest repository. The directory is removed on drop.
pub struct ManifestTree {
    temp: TempDir,
    root: PathBuf,
}

impl ManifestTree {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        let root = temp.path().join("manifests");
        fs::create_dir_all(&root)?;
        Ok(Self {
            temp,
            root,
        })
    }

    /// The manifest root to build from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The temporary directory holding the tree; handy for index and config files.
    pub fn dir(&self) -> &Path {
        self.temp.path()
    }

    /// Directory for one version of `id`.
    pub fn version_dir(&self, id: &str, version: &str) -> PathBuf {
        let mut dir = self.root.clone();
        let first = id.chars().next().map(|c| c.to_ascii_lowercase().to_string()).unwrap_or_default();
        dir.push(first);
        for segment in id.split('.') {
            dir.push(segment);
        }
        dir.push(version);
        dir
    }

    /// Writes `content` at `relative` below the root.
    pub fn add_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Writes a version manifest for `id` into its version directory.
    pub fn add_to_version(&self, id: &str, version: &str, file_name: &str, content: &str) -> Result<PathBuf> {
        let relative = self.version_dir(id, version).strip_prefix(&self.root)?.join(file_name);
        self.add_file(relative, content)
    }

    /// A multi-file version: version, default locale, and installer manifests.
    pub fn add_package(&self, id: &str, version: &str, name: &str) -> Result<()> {
        self.add_package_with_tags(id, version, name, &[])
    }

    pub fn add_package_with_tags(&self, id: &str, version: &str, name: &str, tags: &[&str]) -> Result<()> {
        let publisher = id.split('.').next().unwrap_or(id);
        self.add_to_version(id, version, &format!("{id}.yaml"), &ManifestFixture::version(id, version))?;
        self.add_to_version(
            id,
            version,
            &format!("{id}.locale.en-US.yaml"),
            &ManifestFixture::default_locale(id, version, name, publisher, tags),
        )?;
        self.add_to_version(
            id,
            version,
            &format!("{id}.installer.yaml"),
            &ManifestFixture::installer(id, version),
        )?;
        Ok(())
    }

    /// A single-file version.
    pub fn add_singleton(&self, id: &str, version: &str, name: &str, moniker: &str) -> Result<()> {
        self.add_to_version(
            id,
            version,
            &format!("{id}.yaml"),
            &ManifestFixture::singleton(id, version, name, moniker),
        )?;
        Ok(())
    }
}
