// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Segment Pair Classifier
//!
//! Maps an edge's weight plus the two endpoint classifications onto an
//! [`Exposure`] level. Deliberately a pure function on a value type: two
//! edges with identical inputs always classify identically, which is what
//! makes the concern list a trustworthy filtered view over the matrix.

use setka_common::models::matrix::Exposure;
use setka_common::models::segment::SegmentClass;

/// The exposure policy for a run.
///
/// The default rules:
/// * weight 0 → [`Exposure::Isolated`]
/// * weight > 0, target unregulated → [`Exposure::Expected`]
/// * weight > 0, target regulated, source unregulated → [`Exposure::Concern`]
/// * weight > 0, both regulated → [`Exposure::Internal`]
///
/// `strict` widens the concern rule to ANY nonzero reachability between
/// segments of different classes, regardless of direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    pub strict: bool,
}

impl Policy {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn classify(
        &self,
        weight: usize,
        source: SegmentClass,
        target: SegmentClass,
    ) -> Exposure {
        if weight == 0 {
            return Exposure::Isolated;
        }
        if self.strict && source != target {
            return Exposure::Concern;
        }
        match (source, target) {
            (_, SegmentClass::Unregulated) => Exposure::Expected,
            (SegmentClass::Unregulated, SegmentClass::Regulated) => Exposure::Concern,
            (SegmentClass::Regulated, SegmentClass::Regulated) => Exposure::Internal,
        }
    }
}
