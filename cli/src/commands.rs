// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! The strict schema for user input, and the single source of truth for the
//! application's command-line interface. The *execution* logic for each
//! command lives in its own submodule; the *definition* of arguments, flags
//! and help text is centralized here.
//!
//! The `From<&CommandLine> for Config` implementation decouples the external
//! interface (CLI flags) from the internal application state, so the engine
//! crates stay agnostic of the user interface layer.

pub mod audit;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use setka_common::config::Config;

#[derive(Parser)]
#[command(name = "setka")]
#[command(about = "Cross-segment communication matrix for segmentation audits.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the startup banner
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: reduce styling, -qq: raw edges)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Flag ANY cross-class reachability as a concern, regardless of direction
    #[arg(long = "strict", global = true)]
    pub strict: bool,

    /// Increase logging detail (-v: debug logs)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the segmentation matrix from a directory of .gnmap files
    #[command(alias = "a")]
    Audit {
        /// Directory holding one scan file per segment
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Also write an HTML report to this path
        #[arg(long = "html", value_name = "FILE")]
        html: Option<PathBuf>,

        /// TOML file mapping filename prefixes to classifications
        #[arg(long = "policy", value_name = "FILE")]
        policy: Option<PathBuf>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            strict: cmd.strict,
        }
    }
}
