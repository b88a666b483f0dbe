// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Setka Analysis Engine
//!
//! The synchronous pipeline that turns a directory of per-segment scan
//! files into an immutable [`setka_common::models::report::ReportModel`]:
//!
//! 1. [`parser`] turns one scan file into structured host/port records.
//! 2. [`registry`] turns filenames into named, classified segments.
//! 3. [`matrix`] builds a weighted edge for every ordered segment pair.
//! 4. [`classify`] maps edge weights to exposure levels and concerns.
//! 5. [`pipeline`] handles orchestration, per-file error recovery and the
//!    final report assembly.
//!
//! Rendering lives elsewhere; nothing in this crate writes to a terminal
//! or an output file.

pub mod classify;
pub mod matrix;
pub mod parser;
pub mod pipeline;
pub mod registry;
