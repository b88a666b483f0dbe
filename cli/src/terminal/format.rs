// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use unicode_width::UnicodeWidthStr;

use setka_common::models::matrix::{Exposure, MatrixEdge};
use setka_common::models::segment::SegmentClass;

use crate::terminal::colors;

pub fn class_color(class: SegmentClass) -> Color {
    match class {
        SegmentClass::Regulated => colors::REGULATED,
        SegmentClass::Unregulated => colors::UNREGULATED,
    }
}

pub fn exposure_color(exposure: Exposure) -> Color {
    match exposure {
        Exposure::Isolated => colors::ISOLATED,
        Exposure::Expected => colors::EXPECTED,
        Exposure::Internal => colors::INTERNAL,
        Exposure::Concern => colors::CONCERN,
    }
}

/// Plain cell text for one edge: the weight, or a dash for isolated pairs
/// so nonzero cells stand out.
pub fn edge_cell_text(edge: &MatrixEdge) -> String {
    match edge.exposure {
        Exposure::Isolated => "-".to_string(),
        _ => edge.weight.to_string(),
    }
}

/// The matrix cell for one edge, colored by exposure level.
pub fn edge_cell(edge: &MatrixEdge) -> ColoredString {
    let text = edge_cell_text(edge);
    match edge.exposure {
        Exposure::Isolated => text.color(colors::ISOLATED),
        exposure => text.color(exposure_color(exposure)).bold(),
    }
}

/// Pads plain cell content to `width` terminal columns BEFORE coloring.
/// Color escapes have zero display width but nonzero length, so padding a
/// colored string with `format!("{:width$}")` misaligns every column.
pub fn pad_plain(content: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(content);
    let mut out = String::with_capacity(content.len() + width.saturating_sub(used));
    out.push_str(content);
    for _ in used..width {
        out.push(' ');
    }
    out
}

/// Column width that fits every segment name plus breathing room.
pub fn column_width(names: impl Iterator<Item = usize>) -> usize {
    names.max().unwrap_or(0).max(10) + 2
}
