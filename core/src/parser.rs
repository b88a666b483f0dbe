// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Scan Record Parser
//!
//! Pure transform from the raw text of one grepable scan file into a
//! sequence of [`HostRecord`]s. The grammar is an external contract set by
//! the scanning tool and is matched as documented, not re-derived:
//!
//! ```text
//! # Nmap 7.95 scan initiated ...                           <- comment
//! Host: 10.0.0.1 (gw.local)  Status: Up                    <- host, no ports
//! Host: 10.0.0.1 (gw.local)  Ports: 22/open/tcp//ssh///, 80/closed/tcp//http///  Ignored State: ...
//! ```
//!
//! Fields on a `Host:` line are tab-separated. A port entry is
//! slash-separated: `port/state/proto/owner/service/rpc/version/`, entries
//! joined by `, `. The service field may hold several pipe-separated
//! guesses; all of them are kept.
//!
//! ## Recovery rules
//! * Blank lines, comments and unknown line kinds are skipped.
//! * A malformed port entry skips that entry, never the host.
//! * A `Host:` line without an address skips that line, never the file.
//! * Only closed/filtered-free records survive: non-open entries are
//!   dropped here so later stages only ever see exposed services.
//! * [`ParseError`] fires only when the file as a whole is unrecognizable:
//!   empty input, or not a single `Host:` line.

use thiserror::Error;

use setka_common::debug;
use setka_common::models::host::{HostRecord, PortRecord, Protocol};

/// The file-level failure modes. Everything smaller is skip-and-continue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("no host lines found")]
    NoHostLines,
}

/// Outcome of one port entry. Distinguishing `Ignored` from `Malformed`
/// keeps the skip diagnostics honest: a closed port is expected data, a
/// garbled entry is not.
#[derive(Debug, PartialEq, Eq)]
enum EntryOutcome {
    Open(PortRecord),
    Ignored,
    Malformed,
}

/// Parses the full content of one scan file.
///
/// Repeated `Host:` lines for one address (a `Status:` line followed by a
/// `Ports:` line is the common shape) merge into a single record. Records
/// come back in first-seen order; hosts with zero open ports are kept as
/// empty records.
pub fn parse(input: &str) -> Result<Vec<HostRecord>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut records: Vec<HostRecord> = Vec::new();
    let mut seen_host_line = false;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_end();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(rest) = line.strip_prefix("Host:") else {
            debug!("line {line_no}: not a host line, skipping");
            continue;
        };
        seen_host_line = true;

        let Some(record) = parse_host_line(rest, line_no) else {
            continue;
        };

        match records.iter_mut().find(|r| r.address == record.address) {
            Some(existing) => existing.absorb(record),
            None => records.push(record),
        }
    }

    if !seen_host_line {
        return Err(ParseError::NoHostLines);
    }

    Ok(records)
}

/// Parses everything after the `Host:` prefix of one line. `None` means
/// the line carried no usable address and was skipped.
fn parse_host_line(rest: &str, line_no: usize) -> Option<HostRecord> {
    let mut fields = rest.split('\t');

    let head = fields.next().unwrap_or_default();
    let Some(address) = head.split_whitespace().next() else {
        debug!("line {line_no}: host line without an address, skipping");
        return None;
    };

    let mut record = HostRecord::new(address);

    for field in fields {
        let Some(ports) = field.trim().strip_prefix("Ports:") else {
            continue;
        };
        for entry in ports.split(',') {
            match parse_port_entry(entry.trim()) {
                EntryOutcome::Open(port) => record.add_port(port),
                EntryOutcome::Ignored => {}
                EntryOutcome::Malformed => {
                    debug!("line {line_no}: malformed port entry '{}', skipping", entry.trim());
                }
            }
        }
    }

    Some(record)
}

/// Parses a single `port/state/proto/owner/service/rpc/version/` entry.
fn parse_port_entry(entry: &str) -> EntryOutcome {
    let fields: Vec<&str> = entry.split('/').collect();
    if fields.len() < 5 {
        return EntryOutcome::Malformed;
    }

    let Ok(number) = fields[0].trim().parse::<u16>() else {
        return EntryOutcome::Malformed;
    };
    let Some(protocol) = Protocol::parse(fields[2].trim()) else {
        return EntryOutcome::Malformed;
    };

    if fields[1].trim() != "open" {
        return EntryOutcome::Ignored;
    }

    let services: Vec<String> = fields[4]
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    match PortRecord::new(number, protocol, services) {
        Some(port) => EntryOutcome::Open(port),
        None => EntryOutcome::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryOutcome, ParseError, parse, parse_port_entry};
    use setka_common::models::host::Protocol;

    const SAMPLE: &str = "\
# Nmap 7.95 scan initiated Tue Jul  1 12:00:00 2025 as: nmap -oG scan.gnmap 10.0.0.0/28
Host: 10.0.0.1 (gw.local)\tStatus: Up
Host: 10.0.0.1 (gw.local)\tPorts: 22/open/tcp//ssh///, 80/closed/tcp//http///\tIgnored State: closed (997)
Host: 10.0.0.7 ()\tStatus: Up
# Nmap done at Tue Jul  1 12:00:41 2025 -- 16 IP addresses (2 hosts up) scanned";

    #[test]
    fn sample_file_yields_merged_records() {
        let records = parse(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);

        let gw = &records[0];
        assert_eq!(gw.address, "10.0.0.1");
        assert_eq!(gw.open_port_count(), 1);
        assert_eq!(gw.ports[0].number, 22);
        assert_eq!(gw.ports[0].service(), Some("ssh"));
    }

    #[test]
    fn host_without_ports_becomes_empty_record() {
        let records = parse(SAMPLE).unwrap();
        assert_eq!(records[1].address, "10.0.0.7");
        assert!(records[1].ports.is_empty());
    }

    #[test]
    fn closed_and_filtered_entries_are_dropped() {
        let input = "Host: 10.0.0.2 ()\tPorts: 25/filtered/tcp//smtp///, 443/open/tcp//https///";
        let records = parse(input).unwrap();
        assert_eq!(records[0].open_port_count(), 1);
        assert_eq!(records[0].ports[0].number, 443);
    }

    #[test]
    fn malformed_entry_skips_entry_not_host() {
        let input = "Host: 10.0.0.3 ()\tPorts: garbage, 22/open/tcp//ssh///, 99999/open/tcp//x///";
        let records = parse(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].open_port_count(), 1);
        assert_eq!(records[0].ports[0].number, 22);
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert_eq!(parse("   \n  \n").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn comment_only_input_has_no_host_lines() {
        let input = "# Nmap 7.95 scan initiated\n# Nmap done\n";
        assert_eq!(parse(input).unwrap_err(), ParseError::NoHostLines);
    }

    #[test]
    fn pipe_separated_service_guesses_are_all_kept() {
        let input = "Host: 10.0.0.4 ()\tPorts: 8080/open/tcp//http-proxy|http-alt///";
        let records = parse(input).unwrap();
        let services = &records[0].ports[0].services;
        assert_eq!(services, &["http-proxy", "http-alt"]);
    }

    #[test]
    fn udp_entries_parse_with_their_protocol() {
        let input = "Host: 10.0.0.5 ()\tPorts: 161/open/udp//snmp///";
        let records = parse(input).unwrap();
        assert_eq!(records[0].ports[0].protocol, Protocol::Udp);
    }

    #[test]
    fn port_zero_is_malformed() {
        assert_eq!(
            parse_port_entry("0/open/tcp//x///"),
            EntryOutcome::Malformed
        );
    }

    #[test]
    fn unknown_protocol_is_malformed() {
        assert_eq!(
            parse_port_entry("22/open/sctp//ssh///"),
            EntryOutcome::Malformed
        );
    }

    mod properties {
        use super::super::{EntryOutcome, parse, parse_port_entry};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn port_entry_never_panics(entry in ".{0,80}") {
                let _ = parse_port_entry(&entry);
            }

            #[test]
            fn whole_file_never_panics(input in any::<String>()) {
                let _ = parse(&input);
            }

            #[test]
            fn accepted_ports_are_in_range(number in 1u32..=70_000) {
                let entry = format!("{number}/open/tcp//svc///");
                match parse_port_entry(&entry) {
                    EntryOutcome::Open(port) => {
                        prop_assert!(number <= u16::MAX as u32);
                        prop_assert_eq!(port.number as u32, number);
                    }
                    EntryOutcome::Malformed => prop_assert!(number > u16::MAX as u32),
                    EntryOutcome::Ignored => prop_assert!(false, "open entry ignored"),
                }
            }
        }
    }
}
