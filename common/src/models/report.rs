// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Report Model
//!
//! The single output artifact of the analysis engine and the hand-off
//! contract to every renderer. Constructed once at the end of the pipeline
//! and read-only afterwards; renderers walk it, they never change it.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::matrix::MatrixEdge;
use crate::models::segment::Segment;

/// One input file that did not make it into the report, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// What happened to the inputs of a run. Accompanies every produced report
/// so a partial result is never mistaken for a complete one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Files that produced a segment.
    pub parsed: Vec<String>,
    /// Files skipped with a per-file error, in discovery order.
    pub skipped: Vec<SkippedFile>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Immutable aggregate owning the segments, the full edge matrix and the
/// derived concern list.
///
/// Invariants, guaranteed at construction:
/// * segments are sorted by name;
/// * the matrix holds exactly one edge per ordered pair of distinct
///   segments, addressable in O(1);
/// * concerns reference concern-classified edges only, sorted by weight
///   descending (ties broken by source then target name).
#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    segments: Vec<Segment>,
    edges: Vec<MatrixEdge>,
    #[serde(skip)]
    index: HashMap<(String, String), usize>,
    concerns: Vec<usize>,
    summary: RunSummary,
}

impl ReportModel {
    /// Assembles the final report. Takes ownership of everything the
    /// pipeline produced and freezes it behind read accessors.
    pub fn new(mut segments: Vec<Segment>, mut edges: Vec<MatrixEdge>, summary: RunSummary) -> Self {
        segments.sort_by(|a, b| a.name.cmp(&b.name));
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        let index = edges
            .iter()
            .enumerate()
            .map(|(i, e)| ((e.source.clone(), e.target.clone()), i))
            .collect();

        let mut concerns: Vec<usize> = edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.exposure.is_concern())
            .map(|(i, _)| i)
            .collect();
        concerns.sort_by(|&a, &b| {
            let (ea, eb) = (&edges[a], &edges[b]);
            eb.weight
                .cmp(&ea.weight)
                .then_with(|| ea.key().cmp(&eb.key()))
        });

        Self {
            segments,
            edges,
            index,
            concerns,
            summary,
        }
    }

    /// Segments in stable name order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments
            .binary_search_by(|s| s.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.segments[i])
    }

    /// O(1) lookup of a directed edge. `None` only for self-pairs or
    /// unknown segment names.
    pub fn edge(&self, source: &str, target: &str) -> Option<&MatrixEdge> {
        self.index
            .get(&(source.to_string(), target.to_string()))
            .map(|&i| &self.edges[i])
    }

    /// All edges, row-major by (source, target) name order.
    pub fn edges(&self) -> &[MatrixEdge] {
        &self.edges
    }

    /// Concern edges, heaviest first, for prioritized review.
    pub fn concerns(&self) -> impl Iterator<Item = &MatrixEdge> {
        self.concerns.iter().map(|&i| &self.edges[i])
    }

    pub fn concern_count(&self) -> usize {
        self.concerns.len()
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportModel, RunSummary};
    use crate::models::matrix::{Exposure, MatrixEdge};
    use crate::models::segment::{Segment, SegmentClass};

    fn edge(source: &str, target: &str, weight: usize, exposure: Exposure) -> MatrixEdge {
        MatrixEdge {
            source: source.into(),
            target: target.into(),
            weight,
            evidence: Vec::new(),
            exposure,
        }
    }

    fn two_segment_report() -> ReportModel {
        let segments = vec![
            Segment::new("office", SegmentClass::Unregulated),
            Segment::new("cardholder", SegmentClass::Regulated),
        ];
        let edges = vec![
            edge("office", "cardholder", 3, Exposure::Concern),
            edge("cardholder", "office", 1, Exposure::Expected),
        ];
        ReportModel::new(segments, edges, RunSummary::default())
    }

    #[test]
    fn segments_are_sorted_by_name() {
        let report = two_segment_report();
        let names: Vec<&str> = report.segments().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["cardholder", "office"]);
    }

    #[test]
    fn edge_lookup_is_directional() {
        let report = two_segment_report();
        assert_eq!(report.edge("office", "cardholder").unwrap().weight, 3);
        assert_eq!(report.edge("cardholder", "office").unwrap().weight, 1);
        assert!(report.edge("office", "office").is_none());
    }

    #[test]
    fn concerns_are_a_view_over_concern_edges() {
        let report = two_segment_report();
        let concerns: Vec<_> = report.concerns().collect();
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].key(), ("office", "cardholder"));
    }

    #[test]
    fn concerns_sort_heaviest_first() {
        let segments = vec![
            Segment::new("a", SegmentClass::Regulated),
            Segment::new("b", SegmentClass::Unregulated),
            Segment::new("c", SegmentClass::Unregulated),
        ];
        let edges = vec![
            edge("b", "a", 2, Exposure::Concern),
            edge("c", "a", 7, Exposure::Concern),
            edge("a", "b", 0, Exposure::Isolated),
            edge("a", "c", 0, Exposure::Isolated),
            edge("b", "c", 0, Exposure::Isolated),
            edge("c", "b", 0, Exposure::Isolated),
        ];
        let report = ReportModel::new(segments, edges, RunSummary::default());
        let weights: Vec<usize> = report.concerns().map(|e| e.weight).collect();
        assert_eq!(weights, [7, 2]);
    }
}
