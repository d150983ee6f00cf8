//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `dist-tools` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, builds the
//!   necessary configuration values, and calls into the `dist_tools`
//!   library to perform the core logic.

pub mod apply_patches;
pub mod zip_dist;
