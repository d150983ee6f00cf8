//! # dist-tools Library
//!
//! Core functionality for the `dist-tools` build-support utility. It is
//! designed to be used by the `dist-tools` command-line tool but can also be
//! driven directly by higher-level release scripts.
//!
//! ## Core Concepts
//!
//! - **Patch Source (`patches`)**: reads an ordered directory of `.patch`
//!   files and concatenates them into one mailbox series payload.
//! - **Patch-Apply Primitive (`git`)**: replays a series onto a repository
//!   with system `git am`, overriding committer identity while preserving
//!   each patch's embedded authorship.
//! - **Patch Plan (`plan`)**: maps patch directories onto target
//!   repositories and executes every pair sequentially, failing fast on the
//!   first series that does not apply.
//! - **Archive Assembly (`archive`)**: filters a build-output manifest
//!   through an ordered exclusion rule list and compresses the survivors
//!   into a distribution archive.
//!
//! ## Quick Example
//!
//! ```no_run
//! use dist_tools::git::GitAm;
//! use dist_tools::plan::{CommitterIdentity, PatchPlan};
//!
//! let plan = PatchPlan::new()
//!     .add_entry("patches/upstream", "src")
//!     .add_entry("patches/v8", "src/v8")
//!     .with_committer(CommitterIdentity::new("Build Scripts", "scripts@example.com"));
//!
//! plan.execute(&GitAm)?;
//! # Ok::<(), dist_tools::error::Error>(())
//! ```

pub mod archive;
pub mod error;
pub mod git;
pub mod patches;
pub mod plan;
