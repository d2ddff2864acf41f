//! Shared test utilities for the E2E tests.
//!
//! This module provides common fixtures, helper functions, and config
//! snippets to reduce duplication across test files. The origin-repo
//! helper builds a local Git repository with the system git binary, so
//! the tests never touch the network.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_menu("- [Home](/)\n");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::init_origin_repo;
    #[allow(unused_imports)]
    pub use super::png_bytes;
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Minimal valid configuration without origins.
    pub const MINIMAL: &str = r#"
baseURL: https://example.com/docs/
title: Test Docs
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "origins: [unclosed";

    /// A simple one-line menu.
    pub const MENU: &str = "- [Home](/)\n";
}

/// Create a local origin repository at `dir` with one commit.
///
/// The repository contains Markdown and Asciidoc files with relative
/// links and front matter, a binary file, and a draft file for
/// blacklist testing. The commit is made on a branch named `master`
/// with a fixed author so provenance assertions are deterministic.
#[allow(dead_code)]
pub fn init_origin_repo(dir: &Path) {
    let run = |args: &[&str]| {
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    };

    std::fs::create_dir_all(dir.join("subfolder")).expect("failed to create subfolder");
    std::fs::write(
        dir.join("README.md"),
        "# Origin Readme\n\n[Link](subfolder/test.md)\n",
    )
    .expect("failed to write README.md");
    std::fs::write(
        dir.join("subfolder/test.md"),
        "---\nsimple: content\n---\n\n# Sub page\n",
    )
    .expect("failed to write subfolder/test.md");
    std::fs::write(
        dir.join("guide.adoc"),
        "= Guide\n\nimage::./profile.png[Profile]\n",
    )
    .expect("failed to write guide.adoc");
    std::fs::write(dir.join("profile.png"), png_bytes()).expect("failed to write profile.png");
    std::fs::write(dir.join("notes_draft.md"), "draft, never composed\n")
        .expect("failed to write notes_draft.md");
    std::fs::write(dir.join("build.log"), "not whitelisted\n").expect("failed to write build.log");

    run(&["init"]);
    run(&["add", "-A"]);
    run(&[
        "-c",
        "user.name=Fixture Author",
        "-c",
        "user.email=fixture@example.com",
        "commit",
        "-m",
        "initial docs",
    ]);
    run(&["branch", "-M", "master"]);
}

/// A short PNG header, enough to verify byte-identical binary copies.
#[allow(dead_code)]
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52,
    ]
}

/// A test fixture that provides a temporary working directory with
/// optional composition config and menu files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_config(configs::MINIMAL)
///     .with_menu(configs::MENU);
///
/// let mut cmd = fixture.command();
/// cmd.arg("--only-compose").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `config.monako.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config.monako.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a `config.menu.md` with the given content.
    pub fn with_menu(self, content: &str) -> Self {
        self.temp_dir
            .child("config.menu.md")
            .write_str(content)
            .expect("Failed to write menu file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config.monako.yaml")
    }

    /// Path of a file below the composed content root.
    #[allow(dead_code)]
    pub fn composed(&self, relative: &str) -> std::path::PathBuf {
        self.temp_dir.path().join("compose/content").join(relative)
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("monako");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config(configs::MINIMAL);
        assert!(fixture.config_path().exists());
    }

    #[test]
    fn test_fixture_with_menu() {
        let fixture = TestFixture::new().with_menu(configs::MENU);
        assert!(fixture.path().join("config.menu.md").exists());
    }

    #[test]
    fn test_configs_are_valid_yaml() {
        serde_yaml::from_str::<serde_yaml::Value>(configs::MINIMAL)
            .expect("Config should be valid YAML");
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
