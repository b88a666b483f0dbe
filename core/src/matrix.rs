// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Communication Matrix Builder
//!
//! For every ordered pair of distinct segments, exactly one directed
//! [`MatrixEdge`]. The weight of `source → target` counts the distinct open
//! services (address, port, protocol) in the TARGET's listing whose address
//! also answered in the SOURCE's scan. Scan files prove colocation, not a
//! routed path; the weight reads as "how many of the target's exposed
//! services a host matching the source population could plausibly reach".
//!
//! Determinism: the caller hands segments name-sorted, the builder walks
//! pairs row-major and collects evidence in (address, port) order, so
//! identical input always produces a byte-identical matrix.

use setka_common::models::matrix::{MatrixEdge, ServiceRef};
use setka_common::models::segment::Segment;

use crate::classify::Policy;

/// Builds the complete directed matrix over a name-sorted segment slice.
///
/// Segments with zero hosts still get weight-0 edges in both directions;
/// completeness (|S|·(|S|−1) edges) is an invariant the renderers rely on.
pub fn build(segments: &[Segment], policy: &Policy) -> Vec<MatrixEdge> {
    debug_assert!(segments.is_sorted_by(|a, b| a.name <= b.name));

    let mut edges = Vec::with_capacity(segments.len().saturating_sub(1) * segments.len());

    for source in segments {
        for target in segments {
            if source.name == target.name {
                continue;
            }
            edges.push(build_edge(source, target, policy));
        }
    }

    edges
}

fn build_edge(source: &Segment, target: &Segment, policy: &Policy) -> MatrixEdge {
    let mut evidence = Vec::new();
    for (address, host) in &target.hosts {
        if !source.contains(address) {
            continue;
        }
        for port in &host.ports {
            evidence.push(ServiceRef {
                address: address.clone(),
                port: port.number,
                protocol: port.protocol,
            });
        }
    }
    evidence.sort_by(|a, b| {
        (&a.address, a.port, a.protocol).cmp(&(&b.address, b.port, b.protocol))
    });

    let weight = evidence.len();
    let exposure = policy.classify(weight, source.class, target.class);

    MatrixEdge {
        source: source.name.clone(),
        target: target.name.clone(),
        weight,
        evidence,
        exposure,
    }
}
