//! Origin repositories and file selection
//!
//! An [`Origin`] describes one repository to compose: where to clone it
//! from, which subdirectory to take files from, and where they land in the
//! content tree. File selection is suffix-based: a file is composed when
//! its name matches the whitelist and does not match the blacklist.

use log::{info, warn};
use serde::Deserialize;

use crate::compose::file::{is_markup_file, local_file_path, OriginFile};
use crate::config::Config;
use crate::error::Result;
use crate::git::CloneHandle;

/// One origin repository in the composition configuration.
///
/// `whitelist` and `blacklist` stay `None` when the configuration file
/// does not set them, in which case the config-wide defaults apply. An
/// explicitly empty list is kept as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Origin {
    /// Clone URL of the repository
    #[serde(rename = "src")]
    pub url: String,

    /// Branch to check out
    #[serde(default)]
    pub branch: String,

    /// Environment variable holding the basic-auth username
    #[serde(rename = "envusername", default)]
    pub env_username: String,

    /// Environment variable holding the basic-auth password
    #[serde(rename = "envpassword", default)]
    pub env_password: String,

    /// Directory inside the repository to compose from
    #[serde(rename = "docdir", default)]
    pub source_dir: String,

    /// Directory below the content root to compose into
    #[serde(rename = "targetdir", default)]
    pub target_dir: String,

    /// File name suffix whitelist for this origin
    #[serde(default)]
    pub whitelist: Option<Vec<String>>,

    /// File name suffix blacklist for this origin
    #[serde(default)]
    pub blacklist: Option<Vec<String>>,
}

impl Origin {
    /// Create an origin without credentials or per-origin lists.
    pub fn new(url: &str, branch: &str, source_dir: &str, target_dir: &str) -> Self {
        Self {
            url: url.to_string(),
            branch: branch.to_string(),
            env_username: String::new(),
            env_password: String::new(),
            source_dir: source_dir.to_string(),
            target_dir: target_dir.to_string(),
            whitelist: None,
            blacklist: None,
        }
    }

    /// This origin's whitelist, falling back to the config default.
    pub fn effective_whitelist<'a>(&'a self, config: &'a Config) -> &'a [String] {
        self.whitelist.as_deref().unwrap_or(&config.whitelist)
    }

    /// This origin's blacklist, falling back to the config default.
    pub fn effective_blacklist<'a>(&'a self, config: &'a Config) -> &'a [String] {
        self.blacklist.as_deref().unwrap_or(&config.blacklist)
    }

    /// Collect the files of this origin that are selected for composition.
    ///
    /// Walks the cloned working tree below the source directory and keeps
    /// the files whose names pass the suffix lists. Markup files get their
    /// most recent commit resolved unless that is disabled; a failed
    /// resolution is logged and the file is composed without provenance.
    pub fn matching_files(&self, clone: &CloneHandle, config: &Config) -> Vec<OriginFile> {
        let whitelist = self.effective_whitelist(config);
        let blacklist = self.effective_blacklist(config);

        let mut files = Vec::new();
        for (path, _) in clone.worktree().files() {
            let remote_path = path.to_string_lossy();
            if !in_source_dir(&remote_path, &self.source_dir) {
                continue;
            }
            if !is_selected(file_name(&remote_path), whitelist, blacklist) {
                continue;
            }
            files.push(self.new_file(remote_path.into_owned(), clone, config));
        }
        files
    }

    fn new_file(&self, remote_path: String, clone: &CloneHandle, config: &Config) -> OriginFile {
        let local_path = local_file_path(
            &config.content_dir,
            &self.source_dir,
            &self.target_dir,
            &remote_path,
        );

        let commit = if config.disable_commit_info || !is_markup_file(&remote_path) {
            None
        } else {
            match clone.head_commit_for_path(&remote_path) {
                Ok(commit) => Some(commit),
                Err(e) => {
                    warn!("Can't resolve commit info for '{}': {}", remote_path, e);
                    None
                }
            }
        };

        OriginFile {
            remote_path,
            local_path,
            commit,
        }
    }

    /// Compose all selected files of this origin into the content tree.
    pub fn compose(&self, clone: &CloneHandle, config: &Config) -> Result<Vec<OriginFile>> {
        let files = self.matching_files(clone, config);
        if files.is_empty() {
            info!(
                "Found no matching files in '{}' branch '{}' dir '{}'",
                self.url, self.branch, self.source_dir
            );
            return Ok(files);
        }

        for file in &files {
            file.compose(self, clone.worktree())?;
        }
        info!("Composed {} files from '{}'", files.len(), self.url);
        Ok(files)
    }
}

/// Suffix match of a file name against a list, case-insensitively.
pub fn matches_suffix(filename: &str, suffixes: &[String]) -> bool {
    let lower = filename.to_ascii_lowercase();
    suffixes
        .iter()
        .any(|suffix| lower.ends_with(&suffix.to_ascii_lowercase()))
}

/// Whether a file name passes the whitelist without hitting the blacklist.
///
/// An empty whitelist selects nothing, an empty blacklist blocks nothing.
pub fn is_selected(filename: &str, whitelist: &[String], blacklist: &[String]) -> bool {
    matches_suffix(filename, whitelist) && !matches_suffix(filename, blacklist)
}

/// Whether a repository path lies below the configured source directory.
///
/// `.` and the empty string mean the repository root and match everything.
fn in_source_dir(remote_path: &str, source_dir: &str) -> bool {
    let dir = source_dir.trim_end_matches('/');
    dir.is_empty() || dir == "." || remote_path.starts_with(&format!("{}/", dir))
}

/// Final component of a repository path.
fn file_name(remote_path: &str) -> &str {
    match remote_path.rsplit_once('/') {
        Some((_, name)) => name,
        None => remote_path,
    }
}
