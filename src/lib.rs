//! # Monako Library
//!
//! This library composes documentation from multiple Git repositories into
//! a single, consistent content tree that a static site generator turns
//! into one browsable site. It is designed to be used by the `monako`
//! command-line tool but can also be embedded into other applications that
//! aggregate documentation.
//!
//! ## Quick Example
//!
//! ```
//! use monako::compose::origin::is_selected;
//! use monako::compose::file::local_file_path;
//! use std::path::Path;
//!
//! // Select files by name suffix: whitelist in, blacklist out
//! let whitelist = vec![".md".to_string(), ".png".to_string()];
//! let blacklist = vec!["_draft.md".to_string()];
//! assert!(is_selected("README.md", &whitelist, &blacklist));
//! assert!(!is_selected("notes_draft.md", &whitelist, &blacklist));
//! assert!(!is_selected("main.rs", &whitelist, &blacklist));
//!
//! // Map a repository path into the composed content tree
//! let local = local_file_path(Path::new("/tmp/compose"), "docs", "handbook", "docs/guide.md");
//! assert_eq!(local, Path::new("/tmp/compose/handbook/guide.md"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The YAML composition configuration,
//!   listing origin repositories and site-wide defaults.
//! - **Origins (`compose::origin`)**: One Git repository to pull
//!   documentation from, with suffix-based file selection.
//! - **Git Access (`git`)**: Cloning via the system git binary and
//!   per-file commit resolution; a clone is a scoped handle that owns its
//!   checkout and an in-memory snapshot (`filesystem`).
//! - **File Composition (`compose::file`)**: Rewriting relative links one
//!   level deeper (`compose::links`) and merging Git provenance into the
//!   front matter (`compose::frontmatter`).
//! - **Site Scaffolding (`hugo`)**: The generated site configuration, the
//!   menu bundle, and rendering behind the `SiteGenerator` trait.
//!
//! ## Execution Flow
//!
//! One composition run executes these steps:
//!
//! 1.  **Load**: Read the composition configuration and derive the site
//!     and content directories from the working directory.
//! 2.  **Prepare**: Remove the previous site directory, recreate it with
//!     the content root, the generated Hugo configuration and the menu
//!     bundle.
//! 3.  **Compose**: For each origin in order: clone, select files, resolve
//!     commit metadata, rewrite links, expand front matter, write. The
//!     clone is released before the next origin starts.
//! 4.  **Render**: Run the site generator over the composed tree.

pub mod compose;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod hugo;

#[cfg(test)]
mod matcher_proptest;
