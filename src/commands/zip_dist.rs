//! Zip-dist command implementation
//!
//! Thin wrapper over `archive::assemble`: four positional arguments
//! matching the build system's action signature, so the command can be
//! invoked directly from a build rule.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use dist_tools::archive;

/// Arguments for the zip-dist command
#[derive(Args, Debug)]
pub struct ZipDistArgs {
    /// Path of the archive to write
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Manifest file listing build output paths, one per line
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Target CPU the outputs were built for (e.g. x64, arm, arm64)
    #[arg(value_name = "TARGET_CPU")]
    pub target_cpu: String,

    /// Target OS the outputs were built for
    #[arg(value_name = "TARGET_OS")]
    pub target_os: String,
}

/// Execute the zip-dist command
pub fn execute(args: ZipDistArgs) -> Result<()> {
    archive::assemble(
        &args.archive,
        &args.manifest,
        &args.target_cpu,
        &args.target_os,
    )?;
    Ok(())
}
