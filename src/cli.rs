//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// dist-tools - Apply patch series and assemble distribution archives
#[derive(Parser, Debug)]
#[command(name = "dist-tools")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply patch directories onto their target repositories
    ApplyPatches(commands::apply_patches::ApplyPatchesArgs),

    /// Assemble a filtered distribution zip from a build-output manifest
    ZipDist(commands::zip_dist::ZipDistArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::ApplyPatches(args) => commands::apply_patches::execute(args),
            Commands::ZipDist(args) => commands::zip_dist::execute(args),
        }
    }
}
