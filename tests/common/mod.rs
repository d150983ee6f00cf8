//! Shared test utilities for integration and E2E tests.
//!
//! These helpers build real git repositories and patch directories on disk,
//! so every test exercising them needs the system `git` binary and runs
//! under the `integration-tests` feature gate.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Base content of `file.txt` in every fixture repository. Long enough that
/// a patch to line2 and an unrelated edit to line8 land in separate hunks.
pub const BASE_FILE: &str = "line1\nline2\nline3\nline4\nline5\nline6\nline7\nline8\nline9\n";

/// Run a git command in `repo`, panicking on failure with full output.
pub fn git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed:\n{}{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialize a repository with a deterministic identity and one base
/// commit containing `file.txt`.
pub fn init_repo(repo: &Path) {
    std::fs::create_dir_all(repo).unwrap();
    git(repo, &["init", "-q", "-b", "main"]);
    git(repo, &["config", "user.name", "Repo Owner"]);
    git(repo, &["config", "user.email", "owner@example.com"]);
    git(repo, &["config", "commit.gpgsign", "false"]);
    std::fs::write(repo.join("file.txt"), BASE_FILE).unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-q", "-m", "base"]);
}

/// Create one commit authored by "Patch Author" from the files written by
/// `write`, with the given subject.
pub fn commit_as_patch_author(repo: &Path, subject: &str, write: impl FnOnce(&Path)) {
    write(repo);
    git(repo, &["add", "."]);
    git(
        repo,
        &[
            "commit",
            "-q",
            "--author",
            "Patch Author <patch@example.com>",
            "-m",
            subject,
        ],
    );
}

/// Create `count` commits (commit i adds `patch-i.txt`), export them with
/// `git format-patch` into `patch_dir`, then reset the repository back to
/// the base commit so the patches are pending again.
pub fn export_patches(repo: &Path, patch_dir: &Path, count: usize) {
    let base = git(repo, &["rev-parse", "HEAD"]).trim().to_string();
    for i in 1..=count {
        commit_as_patch_author(repo, &format!("Change number {}", i), |r| {
            std::fs::write(r.join(format!("patch-{}.txt", i)), format!("patch {}\n", i)).unwrap();
        });
    }
    std::fs::create_dir_all(patch_dir).unwrap();
    if count > 0 {
        git(
            repo,
            &[
                "format-patch",
                "-q",
                "-o",
                patch_dir.to_str().unwrap(),
                &format!("-{}", count),
                "HEAD",
            ],
        );
        git(repo, &["reset", "-q", "--hard", &base]);
    }
}

/// Number of commits reachable from HEAD.
pub fn commit_count(repo: &Path) -> usize {
    git(repo, &["rev-list", "--count", "HEAD"])
        .trim()
        .parse()
        .unwrap()
}

/// Commit subjects, newest first.
pub fn subjects(repo: &Path) -> Vec<String> {
    git(repo, &["log", "--format=%s"])
        .lines()
        .map(str::to_string)
        .collect()
}

/// `(committer name, committer email, author name, author email)` for the
/// newest `n` commits, newest first.
pub fn identities(repo: &Path, n: usize) -> Vec<(String, String, String, String)> {
    git(repo, &["log", "--format=%cn|%ce|%an|%ae", "-n", &n.to_string()])
        .lines()
        .map(|line| {
            let mut parts = line.split('|').map(str::to_string);
            (
                parts.next().unwrap(),
                parts.next().unwrap(),
                parts.next().unwrap(),
                parts.next().unwrap(),
            )
        })
        .collect()
}

/// A scratch directory holding patch directories and target repositories.
pub struct Fixture {
    pub temp: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp: tempfile::TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    /// A fresh repository whose first `patch_count` changes have been
    /// exported to a patch directory and rolled back, ready to re-apply.
    pub fn repo_with_pending_patches(&self, name: &str, patch_count: usize) -> (PathBuf, PathBuf) {
        let repo = self.path(name);
        let patch_dir = self.path(&format!("{}-patches", name));
        init_repo(&repo);
        export_patches(&repo, &patch_dir, patch_count);
        (patch_dir, repo)
    }
}
