// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Segment Registry
//!
//! Turns filenames into named, classified segments and holds the full
//! segment set of a run.
//!
//! The filename scheme is `<PREFIX> - <NAME>.<ext>` and the prefix table is
//! configuration, not code: the built-in default maps `PCI` to regulated and
//! `NON PCI` to unregulated, and an operator can replace the table with a
//! TOML policy file. An unrecognized prefix is a hard per-file error; we
//! never silently default a segment's classification, because a wrongly
//! bucketed segment corrupts every edge it touches.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use setka_common::errors::AuditError;
use setka_common::models::host::HostRecord;
use setka_common::models::segment::{Segment, SegmentClass};

/// The filename prefix → classification table.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    /// Kept sorted longest-prefix-first so the most specific prefix wins.
    prefixes: Vec<(String, SegmentClass)>,
}

/// On-disk shape of a policy file:
///
/// ```toml
/// [prefixes]
/// "PCI" = "regulated"
/// "NON PCI" = "unregulated"
/// "CDE" = "regulated"
/// ```
#[derive(Debug, Deserialize)]
struct ConventionFile {
    prefixes: BTreeMap<String, SegmentClass>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new(vec![
            ("PCI".to_string(), SegmentClass::Regulated),
            ("NON PCI".to_string(), SegmentClass::Unregulated),
        ])
    }
}

impl NamingConvention {
    pub fn new(prefixes: Vec<(String, SegmentClass)>) -> Self {
        let mut prefixes = prefixes;
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { prefixes }
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let file: ConventionFile = toml::from_str(raw).context("invalid policy file")?;
        anyhow::ensure!(
            !file.prefixes.is_empty(),
            "policy file declares no prefixes"
        );
        Ok(Self::new(file.prefixes.into_iter().collect()))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading policy file {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Derives (display name, classification) from a filename.
    ///
    /// The extension is stripped, the prefix is matched case-insensitively,
    /// and the name is whatever follows the ` - ` delimiter, trimmed. A
    /// missing delimiter, an unknown prefix or an empty remainder all fail
    /// with [`AuditError::UnclassifiedSegment`].
    pub fn resolve(&self, file_name: &str) -> Result<(String, SegmentClass), AuditError> {
        let base = match file_name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => file_name,
        };

        for (prefix, class) in &self.prefixes {
            let Some(head) = base.get(..prefix.len()) else {
                continue;
            };
            if !head.eq_ignore_ascii_case(prefix) {
                continue;
            }
            let Some(rest) = base[prefix.len()..].strip_prefix(" - ") else {
                continue;
            };
            let name = rest.trim();
            if name.is_empty() {
                continue;
            }
            return Ok((name.to_string(), *class));
        }

        Err(AuditError::UnclassifiedSegment {
            file: file_name.to_string(),
        })
    }
}

/// The full set of segments for one run, keyed by derived name.
///
/// An explicit value passed through the pipeline rather than ambient state,
/// so parallel parsing stays deterministic and tests stay hermetic.
#[derive(Debug, Default)]
pub struct SegmentRegistry {
    segments: BTreeMap<String, Segment>,
}

impl SegmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one parsed file as a segment. Fails the run on a name
    /// collision, since the matrix is indexed by segment name.
    pub fn register(
        &mut self,
        file: &str,
        name: String,
        class: SegmentClass,
        hosts: Vec<HostRecord>,
    ) -> Result<(), AuditError> {
        if self.segments.contains_key(&name) {
            return Err(AuditError::DuplicateSegment {
                name,
                file: file.to_string(),
            });
        }

        let mut segment = Segment::new(name.clone(), class);
        for host in hosts {
            segment.add_host(host);
        }
        self.segments.insert(name, segment);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Consumes the registry into a name-sorted segment list, the shape the
    /// matrix builder wants.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments.into_values().collect()
    }
}
