//! Apply-patches command implementation
//!
//! Parses `patch_dir:repo` pairs into a patch plan and executes it with the
//! system-git applier. Identity overrides are not exposed here: the direct
//! CLI path applies patches with whatever git identity the environment
//! provides, and release scripts that need a fixed committer drive the
//! library API instead.

use anyhow::Result;
use clap::Args;

use dist_tools::git::GitAm;
use dist_tools::plan::PatchPlan;

/// Arguments for the apply-patches command
#[derive(Args, Debug)]
pub struct ApplyPatchesArgs {
    /// Patch directory and target repository pairs, patch_dir:repo format
    #[arg(value_name = "PATCH_DIR:REPO", required = true)]
    pub patch_dirs: Vec<String>,
}

/// Execute the apply-patches command
pub fn execute(args: ApplyPatchesArgs) -> Result<()> {
    let plan = PatchPlan::from_pairs(&args.patch_dirs)?;
    plan.execute(&GitAm)?;
    Ok(())
}
