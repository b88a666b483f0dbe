// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Terminal Report Renderer
//!
//! Walks a finished [`ReportModel`] and draws the segment classification
//! list, the communication matrix, the areas of concern and the run summary.
//! Strictly read-only over the report; every styling decision lives here so
//! the engine never needs to know what a terminal is.

use std::{fmt::Write as _, sync::OnceLock};

use anyhow::bail;
use colored::*;

use setka_common::config::Config;
use setka_common::models::matrix::{Exposure, MatrixEdge};
use setka_common::models::report::ReportModel;
use setka_common::models::segment::{Segment, SegmentClass};

use crate::terminal::{colors, format};

pub const TOTAL_WIDTH: usize = 64;

/// How many evidence services a concern prints before eliding the rest.
const EVIDENCE_LIMIT: usize = 6;

static PRINT: OnceLock<Print> = OnceLock::new();

/// Emits one raw line of report output through the tracing pipeline.
#[macro_export]
macro_rules! sprint {
    () => {
        $crate::sprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "setka::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

pub struct Print {
    no_banner: bool,
    q_level: u8,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        let term = Self::new(cfg);
        if PRINT.set(term).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get().expect("terminal has not been initialized")
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ SETKA v{} ⟧", env!("CARGO_PKG_VERSION"));
        let text_width: usize = text_content.chars().count();
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();

        sprint!("{}{}{}", sep, text, sep);
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 1 {
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        sprint!("{}", line);
    }

    /// Renders the whole report at the configured quiet level.
    pub fn report(report: &ReportModel) -> anyhow::Result<()> {
        let p = Self::get();

        if p.q_level >= 2 {
            Self::raw_edges(report);
            return Ok(());
        }

        Self::classification(report);
        if p.q_level == 0 {
            Self::legend();
        }
        Self::matrix(report);
        Self::concerns(report);
        Self::skipped(report);
        if p.q_level == 0 {
            Self::breakdown(report);
        }

        Ok(())
    }

    /// `-qq`: one tab-separated line per edge, nothing else. Made for pipes.
    fn raw_edges(report: &ReportModel) {
        for edge in report.edges() {
            sprint!(
                "{}\t{}\t{}\t{}",
                edge.source,
                edge.target,
                edge.weight,
                edge.exposure
            );
        }
    }

    fn classification(report: &ReportModel) {
        Self::header("segment classification");
        Self::class_line("Regulated", SegmentClass::Regulated, report);
        Self::class_line("Unregulated", SegmentClass::Unregulated, report);
    }

    fn class_line(label: &str, class: SegmentClass, report: &ReportModel) {
        let names: Vec<&str> = report
            .segments()
            .iter()
            .filter(|s| s.class == class)
            .map(|s| s.name.as_str())
            .collect();
        let listing = if names.is_empty() {
            "None".to_string()
        } else {
            names.join(", ")
        };
        sprint!(
            "{} {}",
            format!("{label}:").color(format::class_color(class)).bold(),
            listing.color(colors::TEXT_DEFAULT)
        );
    }

    fn legend() {
        Self::header("key");
        for exposure in [
            Exposure::Isolated,
            Exposure::Expected,
            Exposure::Internal,
            Exposure::Concern,
        ] {
            sprint!(
                "{} {}",
                "■".color(format::exposure_color(exposure)),
                exposure.label().color(colors::TEXT_DEFAULT)
            );
        }
        sprint!(
            "{}",
            "Cell value: open services in the column segment's scan whose host\n\
             also answered in the row segment's scan (colocation, not a route)."
                .color(colors::SEPARATOR)
        );
    }

    /// The matrix table. Rows are source segments, columns are targets,
    /// cells are edge weights colored by exposure.
    fn matrix(report: &ReportModel) {
        Self::header("communication matrix");

        let segments = report.segments();
        let col_w = format::column_width(segments.iter().map(|s| s.name.chars().count()));

        let mut head = format::pad_plain("from \\ to", col_w)
            .color(colors::SEPARATOR)
            .to_string();
        for target in segments {
            let _ = write!(
                head,
                "{}",
                format::pad_plain(&target.name, col_w)
                    .color(format::class_color(target.class))
            );
        }
        sprint!("{}", head);
        sprint!("{}", "─".repeat(col_w * (segments.len() + 1)).color(colors::SEPARATOR));

        for source in segments {
            sprint!("{}", Self::matrix_row(report, source, segments, col_w));
        }
    }

    fn matrix_row(
        report: &ReportModel,
        source: &Segment,
        segments: &[Segment],
        col_w: usize,
    ) -> String {
        let mut row = format::pad_plain(&source.name, col_w)
            .color(format::class_color(source.class))
            .to_string();

        for target in segments {
            let (plain, cell): (String, ColoredString) = if source.name == target.name {
                ("·".to_string(), "·".color(colors::SEPARATOR))
            } else {
                match report.edge(&source.name, &target.name) {
                    Some(edge) => (format::edge_cell_text(edge), format::edge_cell(edge)),
                    None => ("?".to_string(), "?".color(colors::SEPARATOR)),
                }
            };
            // Pad on the plain text, then splice the colored cell in.
            let fill = col_w.saturating_sub(plain.chars().count());
            let _ = write!(row, "{}{}", cell, " ".repeat(fill));
        }

        row
    }

    fn concerns(report: &ReportModel) {
        Self::header("areas of concern");

        if report.concern_count() == 0 {
            sprint!(
                "{}",
                "No areas of concern detected based on current matrix."
                    .color(colors::TEXT_DEFAULT)
            );
            return;
        }

        for edge in report.concerns() {
            sprint!(
                "{} {}",
                "[!]".color(colors::CONCERN).bold(),
                format!(
                    "'{}' shares hosts exposing {} open service(s) in segment '{}'",
                    edge.source, edge.weight, edge.target
                )
                .color(colors::TEXT_DEFAULT)
            );
            Self::evidence(edge);
        }
    }

    fn evidence(edge: &MatrixEdge) {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }

        for svc in edge.evidence.iter().take(EVIDENCE_LIMIT) {
            sprint!("    {} {}", "└".color(colors::SEPARATOR), svc.to_string().color(colors::PRIMARY));
        }
        let hidden = edge.evidence.len().saturating_sub(EVIDENCE_LIMIT);
        if hidden > 0 {
            sprint!("    {}", format!("… and {hidden} more").color(colors::SEPARATOR));
        }
    }

    fn skipped(report: &ReportModel) {
        let summary = report.summary();
        if summary.is_clean() {
            return;
        }

        Self::header("skipped inputs");
        for skip in &summary.skipped {
            sprint!(
                "{} {}",
                "[*]".color(colors::INTERNAL).bold(),
                skip.reason.color(colors::TEXT_DEFAULT)
            );
        }
        sprint!(
            "{}",
            format!(
                "{} of {} file(s) made it into this report.",
                summary.parsed.len(),
                summary.parsed.len() + summary.skipped.len()
            )
            .color(colors::SEPARATOR)
        );
    }

    fn breakdown(report: &ReportModel) {
        Self::header("client breakdown");
        sprint!(
            "{}",
            "This matrix shows which network segments share reachable hosts. A\n\
             nonzero cell means hosts answering in the column segment's scan\n\
             also answered in the row segment's scan, exposing that many open\n\
             services across the boundary."
                .color(colors::TEXT_DEFAULT)
        );
        if report.concern_count() > 0 {
            sprint!(
                "{}",
                "Review every red entry: a regulated segment reachable from an\n\
                 unregulated one is a compliance finding until proven otherwise."
                    .color(colors::CONCERN)
            );
        }
    }
}
