// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

/// Global configuration options for an audit run.
///
/// This struct controls the runtime behavior of the application, including
/// UI verbosity and the strictness of the exposure policy. It is typically
/// constructed from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Toggles the display of the startup ASCII banner.
    ///
    /// If `true`, the application starts immediately with the report output
    /// without printing the stylized branding. Useful for clean logs or
    /// frequent executions.
    pub no_banner: bool,

    /// Controls the visual density and formatting of the terminal output.
    ///
    /// This value is typically mapped from the `-q` or `--quiet` CLI flags.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, including colors, the matrix table and legend.
    /// * **1**: Reduced styling. No banner, no legend, simplified tables.
    /// * **2**: Raw mode. One plain line per matrix edge, suitable for piping
    ///   into other tools.
    pub quiet: u8,

    /// Treats ANY nonzero reachability between segments of different
    /// classifications as a concern, regardless of direction.
    ///
    /// By default only regulated segments reachable from unregulated ones
    /// are flagged. Some audits want the reverse direction surfaced too.
    pub strict: bool,
}
