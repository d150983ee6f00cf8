//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `dist-tools` application. It uses the `thiserror` library to create a
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
//!   throughout the application to simplify function signatures.
//!
//! The taxonomy is small and deliberate:
//!
//! - Configuration errors (malformed plan arguments) fail immediately with
//!   no partial work.
//! - Patch-directory errors (missing/unreadable) are configuration errors
//!   too, never soft skips.
//! - Patch-application failures carry enough context (directory, repository,
//!   failing patch) for an operator to resume manually with
//!   `git am --abort` / `git am --continue`.
//! - External-process errors surface the spawned tool's captured output
//!   verbatim; nothing is swallowed and nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for dist-tools operations
#[derive(Error, Debug)]
pub enum Error {
    /// A plan argument or other piece of static configuration is malformed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A patch directory is missing or unreadable.
    ///
    /// This is a fatal configuration error, not a soft skip: a plan entry
    /// pointing at a nonexistent directory means the plan itself is wrong.
    #[error("Patch directory error for {}: {message}", dir.display())]
    PatchDir { dir: PathBuf, message: String },

    /// A patch in a series failed to apply to its target repository.
    ///
    /// The repository is left in the partially-applied state git produced;
    /// recovery (`git am --abort` or manual fixup plus `git am --continue`)
    /// is the operator's responsibility.
    #[error("Failed to apply patches to {}{}: {message}{}", repo.display(), dir.as_ref().map(|d| format!(" (series {})", d.display())).unwrap_or_default(), failed_patch.as_ref().map(|p| format!("\n  failed at: {}", p)).unwrap_or_default())]
    PatchApply {
        repo: PathBuf,
        /// The patch directory whose series was being applied. The apply
        /// primitive only sees the payload; the plan executor attaches the
        /// directory so the operator knows which plan entry failed even
        /// when several entries target one repository.
        dir: Option<PathBuf>,
        message: String,
        /// The patch git reported as failing, when it could be identified.
        failed_patch: Option<String>,
    },

    /// An external process could not be spawned or exited non-zero.
    #[error("Command failed: {command} - {output}")]
    ExternalProcess { command: String, output: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
