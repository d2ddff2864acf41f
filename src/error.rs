//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `monako` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures and ensure
//!   type safety.
//!
//! The `Error` enum covers the failure scenarios of the composition
//! pipeline:
//!
//! - Configuration parsing errors.
//! - Git repository cloning issues.
//! - Git command execution failures.
//! - Commit resolution failures (recoverable: the affected file is composed
//!   without provenance).
//! - Front matter parsing errors.
//! - Per-file composition errors, carrying the failing remote path.
//! - Output write errors, carrying the failing local path.
//! - Filesystem operations.
//! - Site rendering errors.
//!
//! Each error variant includes a `message` field and potentially other
//! contextual information (e.g., `url`, `branch`, `command`, `stderr`,
//! `path`). Underlying I/O, YAML, and URL failures are always wrapped
//! into one of these variants at the call site rather than passed
//! through raw. Credential values never appear in any variant; clone
//! errors carry the original, credential-free URL.

use thiserror::Error;

/// Main error type for monako operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the composition configuration file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes the repository URL, branch, error message, and an optional
    /// hint for resolution. The URL is always the one from the
    /// configuration, never the credential-bearing variant.
    #[error("Git clone error for {url}@{branch}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        branch: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A Git subprocess exited unsuccessfully or could not be spawned.
    ///
    /// Carries the command that ran, the directory it ran in, and what the
    /// command printed on stderr.
    #[error("Git command failed in '{context}': git {command}: {stderr}")]
    GitCommand {
        command: String,
        context: String,
        stderr: String,
    },

    /// The most recent commit for a path could not be resolved.
    ///
    /// Recoverable: callers log this and compose the file without
    /// provenance fields.
    #[error("Commit resolution error for '{path}': {message}")]
    CommitResolve { path: String, message: String },

    /// A front matter block could not be parsed.
    #[error("Front matter error: {message}")]
    Frontmatter { message: String },

    /// Composition of a single file failed; aborts the origin.
    #[error("Composition error for '{path}': {message}")]
    Compose { path: String, message: String },

    /// Writing an output file failed.
    #[error("Write error for '{path}': {message}")]
    Write { path: String, message: String },

    /// An error occurred with an in-memory filesystem operation.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The downstream site generator failed.
    #[error("Site rendering error: {message}")]
    Render { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
