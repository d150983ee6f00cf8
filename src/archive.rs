//! # Distribution Archive Assembly
//!
//! Builds a compressed distribution archive from a manifest of build
//! outputs, dropping the entries we never ship.
//!
//! Exclusion is an ordered list of predicate rules evaluated short-circuit,
//! so individual rules can be tested (and extended) independently: a
//! path-prefix list, an extension list, and one special case for ARM
//! snapshot blobs. Every skipped path is printed.
//!
//! Compression shells out to the system `zip` tool with an explicit,
//! sorted file list, so the archive contents are deterministic for a given
//! manifest and working tree.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Build outputs we never ship, matched by path prefix.
const SKIP_PREFIXES: &[&str] = &[
    // Output of //ui/gl that we don't need.
    "angledata",
    // Vulkan layer outputs that we don't need.
    "./libVkLayer_",
    "./VkLayerLayer_",
    // Pulled in via //chrome/browser/resources/ssl/ssl_error_assistant,
    // but not shipped.
    "pyproto",
];

/// Build outputs we never ship, matched by file extension.
const SKIP_EXTENSIONS: &[&str] = &[".pdb"];

/// One exclusion predicate. Rules are evaluated in order, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    /// Exclude entries starting with this prefix.
    Prefix(&'static str),
    /// Exclude entries ending with this extension.
    Extension(&'static str),
    /// Exclude `snapshot_blob.bin` from `mksnapshot.zip` on ARM targets:
    /// the mksnapshot bundle for ARM is a cross-build and the host-arch
    /// snapshot blob must not ride along.
    ArmSnapshotBlob,
}

impl SkipRule {
    fn matches(&self, dep: &str, archive_name: &str, target_cpu: &str) -> bool {
        match self {
            SkipRule::Prefix(prefix) => dep.starts_with(prefix),
            SkipRule::Extension(ext) => dep.ends_with(ext),
            SkipRule::ArmSnapshotBlob => {
                target_cpu.contains("arm")
                    && archive_name == "mksnapshot.zip"
                    && dep == "snapshot_blob.bin"
            }
        }
    }
}

/// The full ordered rule set.
pub fn skip_rules() -> Vec<SkipRule> {
    SKIP_PREFIXES
        .iter()
        .copied()
        .map(SkipRule::Prefix)
        .chain(SKIP_EXTENSIONS.iter().copied().map(SkipRule::Extension))
        .chain([SkipRule::ArmSnapshotBlob])
        .collect()
}

/// Whether a manifest entry is excluded from the given archive.
pub fn should_skip(dep: &str, archive: &Path, target_cpu: &str) -> bool {
    let archive_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    skip_rules()
        .iter()
        .any(|rule| rule.matches(dep, &archive_name, target_cpu))
}

/// Read a manifest file: one path per line, blank lines ignored, entries
/// deduplicated and sorted so the archive layout is reproducible.
pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let entries: BTreeSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    Ok(entries.into_iter().collect())
}

/// Resolve manifest entries to the concrete file list to archive.
///
/// Exclusion rules apply to the manifest entries themselves; a directory
/// entry that survives them contributes every file underneath it, in
/// sorted order. Skipped entries are printed as they are dropped.
pub fn build_file_list(
    entries: &[String],
    archive: &Path,
    target_cpu: &str,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dep in entries {
        if should_skip(dep, archive, target_cpu) {
            println!("Skipping {}", dep);
            continue;
        }
        let path = Path::new(dep);
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| Error::Config {
                    message: format!("cannot walk manifest entry {}: {}", dep, e),
                })?;
                if entry.file_type().is_file() {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Compress `files` into `archive` with the system `zip` tool.
///
/// Output is captured; on a non-zero exit it is printed verbatim before the
/// error propagates, so the underlying diagnostic is never lost.
pub fn write_archive(archive: &Path, files: &[PathBuf]) -> Result<()> {
    let mut command = Command::new("zip");
    command.arg("-y").arg(archive).args(files);

    debug!("running {:?}", command);
    let output = command.output().map_err(|e| Error::ExternalProcess {
        command: "zip".to_string(),
        output: e.to_string(),
    })?;

    if !output.status.success() {
        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        print!("{}", combined);
        return Err(Error::ExternalProcess {
            command: format!("zip -y {}", archive.display()),
            output: combined,
        });
    }

    Ok(())
}

/// Assemble a distribution archive from a manifest of build output paths.
///
/// `target_os` is part of the interface for callers that key archives by
/// platform; rule evaluation only depends on `target_cpu`.
pub fn assemble(archive: &Path, manifest: &Path, target_cpu: &str, _target_os: &str) -> Result<()> {
    let entries = read_manifest(manifest)?;
    let files = build_file_list(&entries, archive, target_cpu)?;
    write_archive(archive, &files)
}
