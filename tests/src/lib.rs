// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod pipeline;

pub mod utils {
    use std::fs;
    use std::path::PathBuf;

    /// RAII wrapper for a temporary directory of scan fixtures.
    pub struct AuditDir {
        pub root: PathBuf,
        files: Vec<PathBuf>,
    }

    impl AuditDir {
        pub fn new(suffix: &str) -> Self {
            let root = std::env::temp_dir().join(format!(
                "setka-test-{}-{}",
                suffix,
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&root);
            fs::create_dir_all(&root).expect("failed to create fixture directory");
            Self {
                root,
                files: Vec::new(),
            }
        }

        /// Writes one scan file into the fixture directory and records its
        /// path for the pipeline call.
        pub fn write(&mut self, name: &str, contents: &str) -> PathBuf {
            let path = self.root.join(name);
            fs::write(&path, contents).expect("failed to write fixture file");
            self.files.push(path.clone());
            path
        }

        pub fn paths(&self) -> Vec<PathBuf> {
            self.files.clone()
        }
    }

    impl Drop for AuditDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    /// One host line with the given open TCP ports, in the scanner's
    /// grepable syntax.
    pub fn host_line(address: &str, open_ports: &[u16]) -> String {
        if open_ports.is_empty() {
            return format!("Host: {address} ()\tStatus: Up\n");
        }
        let entries: Vec<String> = open_ports
            .iter()
            .map(|p| format!("{p}/open/tcp//svc///"))
            .collect();
        format!(
            "Host: {address} ()\tPorts: {}\tIgnored State: closed (42)\n",
            entries.join(", ")
        )
    }
}
