//! # Git Patch-Apply Primitive
//!
//! Shells out to the system `git` command to replay a mailbox-format patch
//! series as commits (`git am`). Using system git means the usual recovery
//! paths (`git am --abort`, `git am --continue`) and the user's normal git
//! configuration are available when a series fails partway through.
//!
//! Committer identity is overridden per invocation with `-c user.name=` /
//! `-c user.email=` so the patches' embedded authorship survives as the
//! author field while every replayed commit records the supplied committer.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};
use crate::plan::{ApplyMode, CommitterIdentity, PatchApplier};

/// Options for a single `git am` invocation.
#[derive(Debug, Default)]
pub struct AmOptions<'a> {
    /// Attempt a three-way merge when a hunk does not apply cleanly.
    pub threeway: bool,
    /// Apply the series inside this subtree of the repository
    /// (`git am --directory`).
    pub directory: Option<&'a str>,
    /// Path globs to skip while applying (`git am --exclude`, repeatable).
    pub exclude: &'a [String],
    /// Committer identity recorded on the replayed commits.
    pub committer: Option<&'a CommitterIdentity>,
}

/// Apply a mailbox patch series to `repo` as a sequence of commits.
///
/// The whole series goes through one `git am` invocation; partial progress
/// within it is tracked by git's own resumable `.git/rebase-apply` state,
/// not by this function. An empty series is a no-op success and git is not
/// spawned at all.
///
/// On failure the captured git output is printed verbatim and the returned
/// error names the patch git reported as failing. The repository is left as
/// git left it, for manual recovery.
pub fn am(repo: &Path, patch_data: &[u8], options: &AmOptions) -> Result<()> {
    if patch_data.is_empty() {
        debug!("empty patch series for {}, nothing to do", repo.display());
        return Ok(());
    }

    let mut command = Command::new("git");
    command.arg("-C").arg(repo);
    if let Some(committer) = options.committer {
        command.arg("-c").arg(format!("user.name={}", committer.name));
        command.arg("-c").arg(format!("user.email={}", committer.email));
    }
    // Replayed commits must never block on a signing prompt.
    command.arg("-c").arg("commit.gpgsign=false");
    command.arg("am");
    if options.threeway {
        command.arg("--3way");
    }
    if let Some(directory) = options.directory {
        command.arg("--directory").arg(directory);
    }
    for glob in options.exclude {
        command.arg("--exclude").arg(glob);
    }

    debug!("running {:?}", command);
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::ExternalProcess {
            command: "git am".to_string(),
            output: e.to_string(),
        })?;

    // A broken pipe means git exited before draining the series; fall
    // through so its captured diagnostics are still collected and reported.
    if let Err(e) = child
        .stdin
        .take()
        .expect("stdin was piped")
        .write_all(patch_data)
    {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Surface git's diagnostics verbatim before propagating the error.
        print!("{}", stdout);
        eprint!("{}", stderr);
        return Err(Error::PatchApply {
            repo: repo.to_path_buf(),
            dir: None,
            message: format!("git am exited with {}", output.status),
            failed_patch: parse_failed_patch(&stdout).or_else(|| parse_failed_patch(&stderr)),
        });
    }

    Ok(())
}

/// Pull the failing patch out of `git am` output.
///
/// git reports `Patch failed at NNNN <subject>` when a hunk mismatches.
fn parse_failed_patch(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("Patch failed at "))
        .map(|rest| rest.trim().to_string())
}

/// Production [`PatchApplier`] backed by system `git am`.
pub struct GitAm;

impl PatchApplier for GitAm {
    fn apply_series(
        &self,
        repo: &Path,
        series: &[u8],
        mode: ApplyMode,
        committer: Option<&CommitterIdentity>,
    ) -> Result<()> {
        am(
            repo,
            series,
            &AmOptions {
                threeway: mode == ApplyMode::ThreeWay,
                committer,
                ..Default::default()
            },
        )
    }
}
