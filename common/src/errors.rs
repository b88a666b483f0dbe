// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Audit Error Kinds
//!
//! The named failure modes of a run. Malformed individual host or port
//! lines inside an otherwise valid scan file are NOT errors; the parser
//! skips those locally and never escalates them. Everything here carries
//! enough context (file name, segment name) for the operator to act on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The file is unreadable or contains nothing resembling scan output.
    /// Fatal for that file only; the run continues with the remaining files.
    #[error("{file}: {reason}")]
    Parse { file: String, reason: String },

    /// The filename matched no prefix in the naming convention table.
    /// Fatal for that file only. We refuse to guess a classification.
    #[error("{file}: filename does not match any recognized segment prefix")]
    UnclassifiedSegment { file: String },

    /// Two files resolved to the same segment name. Fatal for the whole run,
    /// since matrix indexing requires unique names.
    #[error("{file}: segment '{name}' was already registered by another file")]
    DuplicateSegment { name: String, file: String },

    /// No file in the run produced a usable segment, so there is no report
    /// to build.
    #[error("no segments could be classified, refusing to produce an empty report")]
    NoSegments,

    /// Filesystem trouble outside of any single scan file (directory walk,
    /// report output).
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AuditError {
    /// True when the failure condemns only one input file and the run may
    /// carry on without it.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            AuditError::Parse { .. } | AuditError::UnclassifiedSegment { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AuditError;

    #[test]
    fn per_file_errors_are_recoverable() {
        let parse = AuditError::Parse {
            file: "a.gnmap".into(),
            reason: "empty input".into(),
        };
        let unclassified = AuditError::UnclassifiedSegment {
            file: "b.gnmap".into(),
        };
        assert!(parse.is_per_file());
        assert!(unclassified.is_per_file());
    }

    #[test]
    fn run_level_errors_are_not_recoverable() {
        let dup = AuditError::DuplicateSegment {
            name: "cardholder".into(),
            file: "PCI - cardholder.gnmap".into(),
        };
        assert!(!dup.is_per_file());
        assert!(!AuditError::NoSegments.is_per_file());
    }

    #[test]
    fn duplicate_segment_names_file_and_segment() {
        let dup = AuditError::DuplicateSegment {
            name: "corp".into(),
            file: "NON PCI - corp.gnmap".into(),
        };
        let msg = dup.to_string();
        assert!(msg.contains("corp"));
        assert!(msg.contains("NON PCI - corp.gnmap"));
    }
}
