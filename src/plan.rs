//! # Patch Plan Execution
//!
//! A patch plan maps patch directories onto target repository working
//! copies. Executing the plan materializes each directory's changeset and
//! replays it onto the matching repository as a series of commits.
//!
//! ## Failure policy
//!
//! Fail-fast per pair, independent across pairs: the first pair whose
//! patches do not apply aborts the run immediately. Pairs processed before
//! it keep all of their commits, the failing pair is left partially applied
//! for manual recovery, and pairs after it are never touched. There is no
//! cross-pair retry or compensation.
//!
//! Pairs are processed sequentially on the calling thread. The targets are
//! assumed disjoint (each pair mutates its own working copy), so iteration
//! order cannot affect per-pair correctness; the mapping is still kept in a
//! `BTreeMap` so the order is stable across runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::patches::PatchDirectory;

/// How strictly patches must match their expected base when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
    /// Fail on any hunk that does not apply cleanly against the exact base.
    #[default]
    Strict,
    /// Fall back to a three-way merge using common-ancestor context.
    ThreeWay,
}

/// Committer identity recorded on every replayed commit.
///
/// Authorship embedded in each patch is preserved as author; this identity
/// only overrides the committer field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitterIdentity {
    pub name: String,
    pub email: String,
}

impl CommitterIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// The narrow seam to the underlying patch-apply mechanism.
///
/// The production implementation shells out to `git am`; tests substitute a
/// fake to exercise plan semantics without spawning processes.
pub trait PatchApplier {
    /// Apply a mailbox-format patch series to a repository as commits.
    ///
    /// The whole series is applied in one invocation so the underlying
    /// tool's own resumable state tracks partial progress within it.
    fn apply_series(
        &self,
        repo: &Path,
        series: &[u8],
        mode: ApplyMode,
        committer: Option<&CommitterIdentity>,
    ) -> Result<()>;
}

/// A full run's configuration: the directory→repository mapping plus the
/// apply mode and committer identity shared by every entry.
///
/// Constructed explicitly at program start and passed by parameter; there is
/// no ambient process-wide plan state.
#[derive(Debug, Clone, Default)]
pub struct PatchPlan {
    entries: BTreeMap<PathBuf, PathBuf>,
    mode: ApplyMode,
    committer: Option<CommitterIdentity>,
}

impl PatchPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `directory:repository` pair arguments into a plan.
    ///
    /// Anything that is not exactly one colon-separated pair is a
    /// configuration error.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut plan = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let parts: Vec<&str> = pair.split(':').collect();
            match parts.as_slice() {
                [dir, repo] if !dir.is_empty() && !repo.is_empty() => {
                    plan.entries.insert(PathBuf::from(dir), PathBuf::from(repo));
                }
                _ => {
                    return Err(Error::Config {
                        message: format!("expected patch_dir:repo, got '{}'", pair),
                    });
                }
            }
        }
        Ok(plan)
    }

    pub fn add_entry(mut self, patch_dir: impl Into<PathBuf>, repo: impl Into<PathBuf>) -> Self {
        self.entries.insert(patch_dir.into(), repo.into());
        self
    }

    pub fn with_mode(mut self, mode: ApplyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_committer(mut self, committer: CommitterIdentity) -> Self {
        self.committer = Some(committer);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries
            .iter()
            .map(|(dir, repo)| (dir.as_path(), repo.as_path()))
    }

    /// Execute the plan: for each pair, read the directory's changeset and
    /// apply it to the target repository.
    ///
    /// The first failure is returned immediately; repositories belonging to
    /// later pairs are never touched.
    pub fn execute(&self, applier: &dyn PatchApplier) -> Result<()> {
        for (patch_dir, repo) in self.entries() {
            let series = PatchDirectory::new(patch_dir).changeset()?;
            info!(
                "applying {} ({} bytes) onto {}",
                patch_dir.display(),
                series.len(),
                repo.display()
            );
            applier
                .apply_series(repo, &series, self.mode, self.committer.as_ref())
                .map_err(|e| match e {
                    // The applier only sees the payload; attach the plan
                    // entry's patch directory for operator context.
                    Error::PatchApply {
                        repo,
                        message,
                        failed_patch,
                        ..
                    } => Error::PatchApply {
                        repo,
                        dir: Some(patch_dir.to_path_buf()),
                        message,
                        failed_patch,
                    },
                    other => other,
                })?;
        }
        Ok(())
    }
}
