// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Communication Matrix Model
//!
//! A [`MatrixEdge`] is the directed relationship from one segment towards
//! another. The underlying scan files only prove *colocation* (the same
//! address answering in both segments' scans), never an actual routed path,
//! so the weight is a colocation-based exposure estimate and is documented
//! as such everywhere it surfaces.

use serde::Serialize;
use std::fmt;

use crate::models::host::Protocol;

/// Exposure level of a directed segment pair. Closed set; derived purely
/// from the edge weight and the two endpoint classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Exposure {
    /// No shared service surface at all.
    Isolated,
    /// Reachability towards an unregulated target. Expected in most
    /// topologies and not a finding on its own.
    Expected,
    /// Regulated-to-regulated reachability. Legitimate, but worth review.
    Internal,
    /// A regulated segment is reachable from an unregulated one. This is
    /// the finding the whole tool exists to surface.
    Concern,
}

impl Exposure {
    pub fn is_concern(&self) -> bool {
        matches!(self, Exposure::Concern)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Exposure::Isolated => "isolated",
            Exposure::Expected => "expected exposure",
            Exposure::Internal => "internal exposure (review)",
            Exposure::Concern => "concern: regulated segment reachable from unregulated segment",
        }
    }
}

impl fmt::Display for Exposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One piece of evidence behind an edge weight: a specific open service in
/// the target segment's listing whose address also answered in the source
/// segment's scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRef {
    pub address: String,
    pub port: u16,
    pub protocol: Protocol,
}

impl fmt::Display for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.address, self.port, self.protocol)
    }
}

/// Directed matrix entry from `source` towards `target`.
///
/// Weight semantics, used consistently across the codebase: the number of
/// distinct open services (address, port, protocol) in the TARGET segment's
/// listing whose address also appears in the SOURCE segment's scan. In other
/// words: how many of the target's exposed services a host matching the
/// source population could plausibly reach. Every ordered segment pair has
/// exactly one edge, including weight-0 ones.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixEdge {
    pub source: String,
    pub target: String,
    pub weight: usize,
    /// The services behind the weight, in (address, port) order.
    /// `weight == evidence.len()` by construction.
    pub evidence: Vec<ServiceRef>,
    pub exposure: Exposure,
}

impl MatrixEdge {
    pub fn key(&self) -> (&str, &str) {
        (&self.source, &self.target)
    }
}
