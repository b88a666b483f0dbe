// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Audit Pipeline
//!
//! Orchestrates one run: read and parse every input file, merge the
//! survivors into a [`SegmentRegistry`], build and classify the matrix,
//! and freeze everything into a [`ReportModel`].
//!
//! Per-file failures (unreadable, unclassifiable, structurally empty) are
//! collected into the run summary and the run continues; a duplicate
//! segment name or a run with zero surviving segments aborts with no
//! report, since a partial matrix would be misleading rather than helpful.
//!
//! Parsing is independent per file and runs on the rayon pool. The results
//! are merged in file-name order, never completion order, so a run is
//! deterministic regardless of scheduling.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use setka_common::errors::AuditError;
use setka_common::models::host::HostRecord;
use setka_common::models::report::{ReportModel, RunSummary, SkippedFile};
use setka_common::models::segment::SegmentClass;
use setka_common::{debug, info, success, warn};

use crate::classify::Policy;
use crate::matrix;
use crate::parser;
use crate::registry::{NamingConvention, SegmentRegistry};

/// One file's parse outcome before the registry merge.
struct ParsedFile {
    file: String,
    name: String,
    class: SegmentClass,
    hosts: Vec<HostRecord>,
}

/// Runs the full pipeline over a set of scan files.
///
/// `paths` may come in any order; they are sorted by file name before
/// anything else so the derived registry, matrix and evidence listings are
/// identical across runs and across parallel schedules.
pub fn run(
    paths: &[PathBuf],
    convention: &NamingConvention,
    policy: &Policy,
) -> Result<ReportModel, AuditError> {
    let mut paths: Vec<&PathBuf> = paths.iter().collect();
    paths.sort_by_key(|p| file_name(p.as_path()));

    info!("Analyzing {} scan file(s)", paths.len());

    let outcomes: Vec<Result<ParsedFile, AuditError>> = paths
        .par_iter()
        .map(|path| parse_one(path.as_path(), convention))
        .collect();

    let mut registry = SegmentRegistry::new();
    let mut summary = RunSummary::default();

    for outcome in outcomes {
        match outcome {
            Ok(parsed) => {
                debug!(
                    "{}: segment '{}' ({}) with {} host(s)",
                    parsed.file,
                    parsed.name,
                    parsed.class,
                    parsed.hosts.len()
                );
                registry.register(&parsed.file, parsed.name, parsed.class, parsed.hosts)?;
                summary.parsed.push(parsed.file);
            }
            Err(err) if err.is_per_file() => {
                warn!("Skipping input: {err}");
                summary.skipped.push(SkippedFile {
                    file: skipped_file_name(&err),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    if registry.is_empty() {
        return Err(AuditError::NoSegments);
    }

    let segments = registry.into_segments();
    let edges = matrix::build(&segments, policy);
    let report = ReportModel::new(segments, edges, summary);

    success!(
        "Matrix built: {} segment(s), {} edge(s), {} concern(s)",
        report.segments().len(),
        report.edges().len(),
        report.concern_count()
    );

    Ok(report)
}

fn parse_one(path: &Path, convention: &NamingConvention) -> Result<ParsedFile, AuditError> {
    let file = file_name(path);

    let (name, class) = convention.resolve(&file)?;

    let contents = fs::read_to_string(path).map_err(|e| AuditError::Parse {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    let hosts = parser::parse(&contents).map_err(|e| AuditError::Parse {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    Ok(ParsedFile {
        file,
        name,
        class,
        hosts,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn skipped_file_name(err: &AuditError) -> String {
    match err {
        AuditError::Parse { file, .. } | AuditError::UnclassifiedSegment { file } => file.clone(),
        _ => String::new(),
    }
}
