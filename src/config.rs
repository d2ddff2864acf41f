//! Composition configuration
//!
//! The configuration file is a YAML document listing the origin
//! repositories to compose plus site-wide settings. Key names follow the
//! established file format (`baseURL`, `disableCommitInfo`), so serde
//! renames are used where Rust naming differs.
//!
//! ```yaml
//! baseURL: https://example.com/docs/
//! title: Example Docs
//! whitelist:
//!   - .md
//! origins:
//!   - src: https://github.com/example/docs.git
//!     branch: main
//!     docdir: docs
//!     targetdir: example
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::compose::origin::Origin;
use crate::error::{Error, Result};

/// Top-level composition configuration.
///
/// `whitelist` and `blacklist` are the defaults for origins that do not
/// declare their own. The derived directories are not part of the file;
/// they are filled in from the working directory when the configuration is
/// loaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Base URL of the generated site
    #[serde(rename = "baseURL", default)]
    pub base_url: String,

    /// Site title
    #[serde(default)]
    pub title: String,

    /// Origin repositories to compose
    #[serde(default)]
    pub origins: Vec<Origin>,

    /// Logo path for the book theme, relative to the static dir
    #[serde(default)]
    pub logo: String,

    /// Default file name suffix whitelist for all origins
    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Default file name suffix blacklist for all origins
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Skip commit resolution and clone shallowly
    #[serde(rename = "disableCommitInfo", default)]
    pub disable_commit_info: bool,

    /// Directory the site is generated in, `<working dir>/compose`
    #[serde(skip)]
    pub site_dir: PathBuf,

    /// Content root inside the site directory
    #[serde(skip)]
    pub content_dir: PathBuf,
}

impl Config {
    /// Derive the site and content directories from the working directory.
    pub fn init_dirs(&mut self, working_dir: &Path) {
        self.site_dir = working_dir.join("compose");
        self.content_dir = self.site_dir.join("content");
    }
}

/// Load a composition configuration and derive its working directories.
pub fn load_config(path: &Path, working_dir: &Path) -> Result<Config> {
    debug!("Loading configuration from '{}'", path.display());

    let source = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("can't read '{}': {}", path.display(), e),
        hint: Some("Pass the configuration file with --config".to_string()),
    })?;

    let mut config: Config = serde_yaml::from_str(&source).map_err(|e| Error::ConfigParse {
        message: format!("'{}': {}", path.display(), e),
        hint: None,
    })?;

    config.init_dirs(working_dir);
    debug!(
        "Loaded {} origins, composing into '{}'",
        config.origins.len(),
        config.site_dir.display()
    );
    Ok(config)
}
