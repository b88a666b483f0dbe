// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]

use setka_common::errors::AuditError;
use setka_common::models::matrix::Exposure;
use setka_core::classify::Policy;
use setka_core::pipeline;
use setka_core::registry::NamingConvention;

use crate::utils::{AuditDir, host_line};

fn run_default(dir: &AuditDir) -> Result<setka_common::models::report::ReportModel, AuditError> {
    pipeline::run(&dir.paths(), &NamingConvention::default(), &Policy::default())
}

#[test]
fn shared_address_across_classes_raises_a_concern() {
    let mut dir = AuditDir::new("concern");
    dir.write("PCI - a.gnmap", &host_line("10.0.0.1", &[22]));
    dir.write("NON PCI - b.gnmap", &host_line("10.0.0.1", &[80]));

    let report = run_default(&dir).unwrap();

    // b (unregulated) towards a (regulated): port 22 in a's listing.
    let edge = report.edge("b", "a").unwrap();
    assert_eq!(edge.weight, 1);
    assert_eq!(edge.exposure, Exposure::Concern);
    assert_eq!(edge.evidence[0].to_string(), "10.0.0.1:22/tcp");

    // The reverse direction carries a's view of b's listing.
    let reverse = report.edge("a", "b").unwrap();
    assert_eq!(reverse.weight, 1);
    assert_eq!(reverse.exposure, Exposure::Expected);

    assert_eq!(report.concern_count(), 1);
}

#[test]
fn matrix_is_complete_over_all_ordered_pairs() {
    let mut dir = AuditDir::new("complete");
    dir.write("PCI - cde.gnmap", &host_line("10.1.0.1", &[443]));
    dir.write("NON PCI - corp.gnmap", &host_line("10.2.0.1", &[445]));
    dir.write("NON PCI - guest.gnmap", &host_line("10.3.0.1", &[]));

    let report = run_default(&dir).unwrap();

    assert_eq!(report.segments().len(), 3);
    assert_eq!(report.edges().len(), 6);
    assert!(report.edges().iter().all(|e| e.source != e.target));
}

#[test]
fn disjoint_segments_are_isolated_everywhere() {
    let mut dir = AuditDir::new("isolated");
    dir.write("PCI - cde.gnmap", &host_line("10.1.0.1", &[443]));
    dir.write("NON PCI - corp.gnmap", &host_line("10.2.0.1", &[445]));

    let report = run_default(&dir).unwrap();

    assert!(report.edges().iter().all(|e| e.weight == 0));
    assert!(
        report
            .edges()
            .iter()
            .all(|e| e.exposure == Exposure::Isolated)
    );
    assert_eq!(report.concern_count(), 0);
}

#[test]
fn zero_port_segment_contributes_no_concerns() {
    let mut dir = AuditDir::new("portless");
    dir.write("PCI - cde.gnmap", &host_line("10.0.0.1", &[]));
    dir.write("NON PCI - corp.gnmap", &host_line("10.0.0.1", &[80]));

    let report = run_default(&dir).unwrap();

    // corp → cde: the shared host exposes nothing in cde's listing.
    assert_eq!(report.edge("corp", "cde").unwrap().weight, 0);
    assert_eq!(report.concern_count(), 0);

    // cde → corp: port 80 in corp's listing, towards an unregulated target.
    let edge = report.edge("cde", "corp").unwrap();
    assert_eq!(edge.weight, 1);
    assert_eq!(edge.exposure, Exposure::Expected);
}

#[test]
fn duplicate_segment_name_fails_the_whole_run() {
    let mut dir = AuditDir::new("duplicate");
    dir.write("PCI - shared.gnmap", &host_line("10.0.0.1", &[22]));
    dir.write("pci - shared.gnmap", &host_line("10.0.0.2", &[80]));

    let err = run_default(&dir).unwrap_err();
    assert!(matches!(err, AuditError::DuplicateSegment { name, .. } if name == "shared"));
}

#[test]
fn unparseable_file_is_skipped_and_reported() {
    let mut dir = AuditDir::new("skip");
    dir.write("PCI - cde.gnmap", &host_line("10.0.0.1", &[443]));
    dir.write("NON PCI - corp.gnmap", &host_line("10.0.0.1", &[80]));
    dir.write("NON PCI - broken.gnmap", "# comments only, no hosts\n");

    let report = run_default(&dir).unwrap();

    assert_eq!(report.segments().len(), 2);
    assert_eq!(report.edges().len(), 2);

    let summary = report.summary();
    assert_eq!(summary.parsed.len(), 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].file, "NON PCI - broken.gnmap");
}

#[test]
fn unclassified_filename_is_skipped_not_defaulted() {
    let mut dir = AuditDir::new("unclassified");
    dir.write("PCI - cde.gnmap", &host_line("10.0.0.1", &[443]));
    dir.write("NON PCI - corp.gnmap", &host_line("10.0.0.2", &[80]));
    dir.write("mystery.gnmap", &host_line("10.0.0.3", &[21]));

    let report = run_default(&dir).unwrap();

    assert_eq!(report.segments().len(), 2);
    assert!(report.segment("mystery").is_none());
    assert_eq!(report.summary().skipped.len(), 1);
}

#[test]
fn run_with_no_usable_files_fails() {
    let mut dir = AuditDir::new("nothing");
    dir.write("PCI - empty.gnmap", "\n\n");
    dir.write("unknown.gnmap", &host_line("10.0.0.1", &[80]));

    let err = run_default(&dir).unwrap_err();
    assert!(matches!(err, AuditError::NoSegments));
}

#[test]
fn identical_input_yields_identical_reports() {
    let mut dir = AuditDir::new("determinism");
    dir.write("PCI - cde.gnmap", &host_line("10.0.0.1", &[22, 443]));
    dir.write(
        "NON PCI - corp.gnmap",
        &format!(
            "{}{}",
            host_line("10.0.0.1", &[80]),
            host_line("10.0.0.9", &[8080])
        ),
    );
    dir.write("NON PCI - guest.gnmap", &host_line("10.0.0.9", &[]));

    let first = run_default(&dir).unwrap();
    let second = run_default(&dir).unwrap();

    let fingerprint = |r: &setka_common::models::report::ReportModel| {
        format!(
            "{:?}|{:?}|{:?}",
            r.segments(),
            r.edges(),
            r.concerns().map(|e| e.key()).collect::<Vec<_>>()
        )
    };
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn strict_policy_flags_both_directions() {
    let mut dir = AuditDir::new("strict");
    dir.write("PCI - cde.gnmap", &host_line("10.0.0.1", &[22]));
    dir.write("NON PCI - corp.gnmap", &host_line("10.0.0.1", &[80]));

    let report = pipeline::run(
        &dir.paths(),
        &NamingConvention::default(),
        &Policy::strict(),
    )
    .unwrap();

    assert_eq!(report.concern_count(), 2);
    assert!(
        report
            .concerns()
            .all(|e| e.exposure == Exposure::Concern && e.weight > 0)
    );
}
