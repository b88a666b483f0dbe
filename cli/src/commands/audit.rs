// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The `audit` subcommand: discover scan files, run the engine, render.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};

use setka_common::config::Config;
use setka_common::success;
use setka_core::classify::Policy;
use setka_core::pipeline;
use setka_core::registry::NamingConvention;

use crate::html;
use crate::terminal::print::Print;

pub fn audit(
    dir: &Path,
    html_out: Option<&Path>,
    policy_file: Option<&Path>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let convention = match policy_file {
        Some(path) => NamingConvention::load(path)?,
        None => NamingConvention::default(),
    };

    let policy = if cfg.strict {
        Policy::strict()
    } else {
        Policy::default()
    };

    let paths = discover_scan_files(dir)?;
    ensure!(
        !paths.is_empty(),
        "no .gnmap files found in {}",
        dir.display()
    );

    let report = pipeline::run(&paths, &convention, &policy)?;

    Print::report(&report)?;

    if let Some(path) = html_out {
        fs::write(path, html::render(&report))
            .with_context(|| format!("writing HTML report to {}", path.display()))?;
        success!("HTML report written: {}", path.display());
    }

    Ok(())
}

/// Collects every `.gnmap` file directly inside `dir`, sorted by name.
/// Subdirectories are not descended into; one directory is one run.
fn discover_scan_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("reading directory {}", dir.display()))?
            .path();
        let is_gnmap = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gnmap"));
        if path.is_file() && is_gnmap {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}
