// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Setka CLI Entry Point
//!
//! The binary entry point for Setka.
//!
//! This module is responsible for bootstrapping the application and managing
//! the global lifecycle of the process. It isolates the command-line
//! interface layer from the analysis engine.
//!
//! ## Responsibilities
//!
//! 1.  **Global State Setup**: Initializes the `tracing` subscriber for logging and
//!     configures terminal output modes (verbosity, quiet mode, banners).
//! 2.  **Configuration Mapping**: Converts raw command-line arguments (parsed via `clap`)
//!     into the internal `Config` struct used by the engine.
//! 3.  **Command Dispatch**: Routes execution to the appropriate module in `commands/`.
//! 4.  **Error Boundary**: Acts as the top-level error handler. Any errors propagated up
//!     from subcommands are caught here, logged to the error stream, and converted into
//!     a non-zero `ExitCode`.

mod commands;
mod html;
mod terminal;

use std::process::ExitCode;

use setka_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, audit},
    terminal::{logging, print::Print},
};

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbosity);

    let cfg = Config::from(&commands);

    let _ = Print::init(&cfg);
    Print::banner();

    let result = match &commands.command {
        Commands::Audit { dir, html, policy } => {
            audit::audit(dir, html.as_deref(), policy.as_deref(), &cfg)
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e}");
            ExitCode::FAILURE
        }
    }
}
