//! Single-file composition
//!
//! An [`OriginFile`] pairs a path in the cloned repository with the local
//! path it is composed to, plus the commit metadata resolved for it.
//! Markup files are rewritten and get provenance front matter; everything
//! else is copied byte for byte.

use std::path::{Path, PathBuf};

use log::debug;

use crate::compose::frontmatter::expand_front_matter;
use crate::compose::links::{rewrite_asciidoc, rewrite_markdown};
use crate::compose::origin::Origin;
use crate::error::{Error, Result};
use crate::filesystem::{File, MemoryFS};
use crate::git::CommitInfo;

/// Markup flavor of a composed file, decided by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Asciidoc,
    /// Copied verbatim, no rewriting
    Other,
}

/// Detect the markup format from a file path, case-insensitively.
pub fn detect_format(path: &str) -> Format {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".md") || lower.ends_with(".markdown") {
        Format::Markdown
    } else if lower.ends_with(".adoc") || lower.ends_with(".asciidoc") || lower.ends_with(".asc") {
        Format::Asciidoc
    } else {
        Format::Other
    }
}

/// Whether commit provenance is resolved for this path.
pub fn is_markup_file(path: &str) -> bool {
    detect_format(path) != Format::Other
}

/// Map a path in the origin repository to its composed location.
///
/// The source directory prefix is stripped from the remote path and the
/// remainder is placed below the target directory inside the content
/// root. `.` and empty segments collapse, so a `.` source or target
/// directory adds no level.
pub fn local_file_path(
    content_dir: &Path,
    source_dir: &str,
    target_dir: &str,
    remote_path: &str,
) -> PathBuf {
    let relative = remote_path.strip_prefix(source_dir).unwrap_or(remote_path);
    let relative = relative.trim_start_matches('/');

    let mut path = content_dir.to_path_buf();
    for segment in target_dir.split('/').chain(relative.split('/')) {
        if segment.is_empty() || segment == "." {
            continue;
        }
        path.push(segment);
    }
    path
}

/// One file of an origin, ready to be composed.
#[derive(Debug, Clone)]
pub struct OriginFile {
    /// Path inside the origin repository
    pub remote_path: String,
    /// Path the file is composed to
    pub local_path: PathBuf,
    /// Most recent commit touching the file, when resolved
    pub commit: Option<CommitInfo>,
}

impl OriginFile {
    /// Compose this file into the content tree.
    ///
    /// Markup files are link-rewritten and front-matter-expanded, other
    /// files are copied unchanged. Source permissions are preserved.
    pub fn compose(&self, origin: &Origin, worktree: &MemoryFS) -> Result<()> {
        debug!("{} -> {}", self.remote_path, self.local_path.display());

        let source = worktree.get_file(&self.remote_path).ok_or_else(|| Error::Filesystem {
            message: format!("'{}' is missing from the cloned working tree", self.remote_path),
        })?;
        self.create_parent_dir()?;

        match detect_format(&self.remote_path) {
            Format::Other => self.write_output(&source.content, source.permissions),
            format => self.compose_markup(format, origin, source),
        }
    }

    fn compose_markup(&self, format: Format, origin: &Origin, source: &File) -> Result<()> {
        let content =
            String::from_utf8(source.content.clone()).map_err(|_| Error::Compose {
                path: self.remote_path.clone(),
                message: "markup file is not valid UTF-8".to_string(),
            })?;

        let rewritten = match format {
            Format::Markdown => rewrite_markdown(&content),
            Format::Asciidoc => rewrite_asciidoc(&content),
            Format::Other => content,
        };
        let expanded = expand_front_matter(
            &rewritten,
            self.commit.as_ref(),
            &origin.url,
            &origin.branch,
            &self.remote_path,
        )
        .map_err(|e| Error::Compose {
            path: self.remote_path.clone(),
            message: e.to_string(),
        })?;

        self.write_output(expanded.as_bytes(), source.permissions)
    }

    fn create_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.local_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Write {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn write_output(&self, content: &[u8], permissions: u32) -> Result<()> {
        std::fs::write(&self.local_path, content).map_err(|e| Error::Write {
            path: self.local_path.display().to_string(),
            message: e.to_string(),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(
                &self.local_path,
                std::fs::Permissions::from_mode(permissions),
            )
            .map_err(|e| Error::Write {
                path: self.local_path.display().to_string(),
                message: format!("can't set permissions: {}", e),
            })?;
        }
        #[cfg(not(unix))]
        let _ = permissions;

        Ok(())
    }
}
