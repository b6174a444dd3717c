//! Shared helpers for the integration suite.

use anyhow::Result;
use assert_cmd::Command;
use std::path::PathBuf;

pub use wincat::test_utils::{ManifestFixture, ManifestTree};

/// A manifest tree plus an isolated config and index location.
pub struct TestProject {
    pub tree: ManifestTree,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        wincat::test_utils::init_test_logging(None);
        Ok(Self {
            tree: ManifestTree::new()?,
        })
    }

    /// Where commands write and read the index by default.
    pub fn index_path(&self) -> PathBuf {
        self.tree.dir().join("index.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.tree.dir().join("config.toml")
    }

    /// Writes a config file that points at this project's tree and index.
    pub fn write_config(&self, extra: &str) -> Result<()> {
        let content = format!(
            "manifests_dir = {:?}\nindex_path = {:?}\n{extra}",
            self.tree.root().display().to_string(),
            self.index_path().display().to_string()
        );
        std::fs::write(self.config_path(), content)?;
        Ok(())
    }

    /// `wincat` with this project's config, no progress, and no colour.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("wincat").expect("wincat binary is built");
        cmd.current_dir(self.tree.dir())
            .env("WINCAT_CONFIG", self.config_path())
            .env("WINCAT_NO_PROGRESS", "1")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Runs `wincat build` and fails the test if it does not succeed.
    pub fn build(&self) {
        self.command().arg("build").assert().success();
    }

    /// The small catalog most tests share.
    pub fn with_sample_packages() -> Result<Self> {
        let project = Self::new()?;
        project.write_config("")?;

        let tree = &project.tree;
        tree.add_package_with_tags("Valve.Steam", "2.10.91.91", "Steam", &["games", "launcher"])?;
        tree.add_package("Valve.Steam", "2.9.0", "Steam (old)")?;
        tree.add_package("Valve.SteamLink", "1.3.9", "Steam Link")?;
        tree.add_package_with_tags(
            "Microsoft.VisualStudioCode",
            "1.90.0",
            "Microsoft Visual Studio Code",
            &["editor", "developer-tools"],
        )?;
        tree.add_package("Microsoft.VisualStudioCode.Insiders", "1.91.0", "Visual Studio Code - Insiders")?;
        tree.add_singleton("Mozilla.Firefox", "128.0", "Mozilla Firefox", "firefox")?;
        Ok(project)
    }
}
