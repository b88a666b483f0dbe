// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Segment Model
//!
//! A segment is one logical network zone, corresponding to exactly one input
//! scan file. Its name and classification are derived from the filename by
//! the naming convention; its host population comes from the parsed records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::host::HostRecord;

/// Compliance classification of a segment.
///
/// In a PCI engagement "regulated" is the cardholder-data environment and
/// "unregulated" is everything else, but the names are deliberately generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentClass {
    Regulated,
    Unregulated,
}

impl fmt::Display for SegmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentClass::Regulated => write!(f, "regulated"),
            SegmentClass::Unregulated => write!(f, "unregulated"),
        }
    }
}

/// One network segment with its scanned host population.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    /// Display name, derived from the filename. Unique within a run.
    pub name: String,

    /// Regulated vs unregulated designation from the naming convention.
    pub class: SegmentClass,

    /// Hosts keyed by address. A BTreeMap keeps iteration order stable so
    /// repeated runs over identical input render identically.
    pub hosts: BTreeMap<String, HostRecord>,
}

impl Segment {
    pub fn new(name: impl Into<String>, class: SegmentClass) -> Self {
        Self {
            name: name.into(),
            class,
            hosts: BTreeMap::new(),
        }
    }

    /// Inserts a host record, merging ports if the address was already seen.
    /// Address uniqueness within a segment is an invariant, so a repeated
    /// address is a merge, never a replacement.
    pub fn add_host(&mut self, host: HostRecord) {
        match self.hosts.get_mut(&host.address) {
            Some(existing) => existing.absorb(host),
            None => {
                self.hosts.insert(host.address.clone(), host);
            }
        }
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Total open services listed for this segment, across all hosts.
    pub fn service_count(&self) -> usize {
        self.hosts.values().map(HostRecord::open_port_count).sum()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.hosts.contains_key(address)
    }
}
