// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Host Record Model
//!
//! This module defines the [`HostRecord`] entity, one host as reported by a
//! single segment's scan file, together with its open ports.
//!
//! ## Key Concepts
//! * **Identity**: A host is identified by its address string for the
//!   duration of a run. The same address appearing in several segment files
//!   is legitimate (multi-homed host) and is exactly the signal the matrix
//!   correlates, so records are never deduplicated across segments.
//! * **Immutability**: Records are assembled by the parser and never change
//!   afterwards. Only open ports are retained; closed and filtered entries
//!   are dropped at parse time.

use serde::Serialize;
use std::fmt;

/// Transport protocol of a scanned port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

impl Protocol {
    /// Parses the protocol field of a scan entry. Anything other than the
    /// two known transports is treated as malformed.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tcp" => Some(Protocol::Tcp),
            "udp" => Some(Protocol::Udp),
            _ => None,
        }
    }
}

/// One open port on a host.
///
/// The scan format can carry several service guesses for a single port
/// (pipe-separated). All candidates are preserved in listing order; picking
/// a winner is a rendering decision, not a parsing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortRecord {
    pub number: u16,
    pub protocol: Protocol,
    pub services: Vec<String>,
}

impl PortRecord {
    /// Creates a validated port record. Port 0 is not a scannable port and
    /// is rejected.
    pub fn new(number: u16, protocol: Protocol, services: Vec<String>) -> Option<Self> {
        if number == 0 {
            return None;
        }
        Some(Self {
            number,
            protocol,
            services,
        })
    }

    /// The best-effort display name: the first candidate, if any.
    pub fn service(&self) -> Option<&str> {
        self.services.first().map(String::as_str)
    }
}

/// One host as listed in a single segment's scan file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    /// The address string exactly as the scanner printed it. Unique within
    /// a segment; the parser merges repeated lines for the same address.
    pub address: String,

    /// Open ports in listing order, deduplicated on (number, protocol).
    pub ports: Vec<PortRecord>,
}

impl HostRecord {
    /// Creates a new record with no ports yet. A host with zero open ports
    /// is a valid, meaningful record (it was seen but exposes nothing).
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ports: Vec::new(),
        }
    }

    /// Appends a port unless an entry for the same (number, protocol) pair
    /// is already present.
    pub fn add_port(&mut self, port: PortRecord) {
        let exists = self
            .ports
            .iter()
            .any(|p| p.number == port.number && p.protocol == port.protocol);
        if !exists {
            self.ports.push(port);
        }
    }

    /// Merges another record for the same address into this one.
    pub fn absorb(&mut self, other: HostRecord) {
        debug_assert_eq!(self.address, other.address);
        for port in other.ports {
            self.add_port(port);
        }
    }

    pub fn open_port_count(&self) -> usize {
        self.ports.len()
    }
}
