// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # HTML Report Renderer
//!
//! Renders a [`ReportModel`] into one self-contained HTML document: the
//! segment classification, the matrix table (one row and column per
//! segment, one cell per edge), the areas of concern, and the run summary.
//! Plain string building on purpose; a report this size does not need a
//! templating engine.

use std::fmt::Write as _;

use setka_common::models::matrix::{Exposure, MatrixEdge};
use setka_common::models::report::ReportModel;
use setka_common::models::segment::SegmentClass;

const CELL_ISOLATED: &str = "#f2f2f2";
const CELL_EXPECTED: &str = "#ccffcc";
const CELL_INTERNAL: &str = "#fff2cc";
const CELL_CONCERN: &str = "#ffcccc";

const HEAD_REGULATED: &str = "background:#b3d1ff;color:#003366;";
const HEAD_UNREGULATED: &str = "background:#fff2cc;color:#7f6000;";

pub fn render(report: &ReportModel) -> String {
    let mut out = String::new();

    out.push_str("<html><body>\n");
    classification(&mut out, report);
    matrix(&mut out, report);
    key(&mut out);
    concerns(&mut out, report);
    summary(&mut out, report);
    out.push_str("</body></html>\n");

    out
}

fn classification(out: &mut String, report: &ReportModel) {
    out.push_str("<h2>Segment Classification</h2>\n<ul>");
    for (label, class, color) in [
        ("Regulated", SegmentClass::Regulated, "#003366"),
        ("Unregulated", SegmentClass::Unregulated, "#7f6000"),
    ] {
        let names: Vec<String> = report
            .segments()
            .iter()
            .filter(|s| s.class == class)
            .map(|s| escape(&s.name))
            .collect();
        let listing = if names.is_empty() {
            "None".to_string()
        } else {
            names.join(", ")
        };
        let _ = write!(
            out,
            "<li><b style='color:{color};'>{label} Segments:</b> {listing}</li>"
        );
    }
    out.push_str("</ul>\n");
}

fn matrix(out: &mut String, report: &ReportModel) {
    out.push_str("<h2>Communication Matrix</h2>\n");
    out.push_str("<table border='1' cellpadding='5' style='border-collapse:collapse;'>\n");

    out.push_str("<tr><th>from \\ to</th>");
    for segment in report.segments() {
        let style = match segment.class {
            SegmentClass::Regulated => HEAD_REGULATED,
            SegmentClass::Unregulated => HEAD_UNREGULATED,
        };
        let _ = write!(out, "<th style='{style}'>{}</th>", escape(&segment.name));
    }
    out.push_str("</tr>\n");

    for source in report.segments() {
        let _ = write!(out, "<tr><td><b>{}</b></td>", escape(&source.name));
        for target in report.segments() {
            if source.name == target.name {
                out.push_str("<td style='text-align:center;'>&middot;</td>");
                continue;
            }
            match report.edge(&source.name, &target.name) {
                Some(edge) => cell(out, edge),
                None => out.push_str("<td style='text-align:center;'>?</td>"),
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
}

fn cell(out: &mut String, edge: &MatrixEdge) {
    let colour = match edge.exposure {
        Exposure::Isolated => CELL_ISOLATED,
        Exposure::Expected => CELL_EXPECTED,
        Exposure::Internal => CELL_INTERNAL,
        Exposure::Concern => CELL_CONCERN,
    };
    let text = if edge.weight == 0 {
        "-".to_string()
    } else {
        edge.weight.to_string()
    };
    let evidence: Vec<String> = edge.evidence.iter().map(|s| escape(&s.to_string())).collect();
    let _ = write!(
        out,
        "<td style='background:{colour};text-align:center;' title='{}'>{text}</td>",
        evidence.join(", ")
    );
}

fn key(out: &mut String) {
    out.push_str("<p><b>Key:</b><br>");
    let _ = write!(
        out,
        "<span style='background:{CELL_EXPECTED};'>Green</span>: reachability towards an unregulated segment.<br>"
    );
    let _ = write!(
        out,
        "<span style='background:{CELL_INTERNAL};'>Yellow</span>: regulated-to-regulated reachability, review.<br>"
    );
    let _ = write!(
        out,
        "<span style='background:{CELL_CONCERN};'>Red</span>: a regulated segment reachable from an unregulated one.<br>"
    );
    out.push_str("Cell value: open services in the column segment's scan whose host also answered in the row segment's scan (colocation, not a proven route).</p>\n");
}

fn concerns(out: &mut String, report: &ReportModel) {
    out.push_str("<h2>Areas of Concern</h2>\n");

    if report.concern_count() == 0 {
        out.push_str("<div>No areas of concern detected based on current matrix.</div>\n");
        return;
    }

    for edge in report.concerns() {
        let _ = write!(
            out,
            "<div style='color:#b20000;font-weight:bold;'>[!] '{}' shares hosts exposing {} open service(s) in segment '{}'</div>\n",
            escape(&edge.source),
            edge.weight,
            escape(&edge.target)
        );
        out.push_str("<ul>");
        for svc in &edge.evidence {
            let _ = write!(out, "<li>{}</li>", escape(&svc.to_string()));
        }
        out.push_str("</ul>\n");
    }
}

fn summary(out: &mut String, report: &ReportModel) {
    let summary = report.summary();
    if summary.is_clean() {
        return;
    }

    out.push_str("<h2>Skipped Inputs</h2>\n<ul>");
    for skip in &summary.skipped {
        let _ = write!(out, "<li>{}</li>", escape(&skip.reason));
    }
    out.push_str("</ul>\n");
}

/// Minimal HTML escaping for text and attribute positions.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
