// MINUET: Offline Analysis of Vehicular Clustering and Relay-Election Simulation Logs
// Copyright (C) 2024-2025 The MINUET authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! End-to-end tests running the file-level analyses on logs in a scratch directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::{MethodArgs, TargetArgs};

mod delivery_pipeline;

/// Directory below the system temp dir that is removed again when dropped.
pub struct ScratchDir(PathBuf);

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("minuet_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Write `content` to `file` (relative to the scratch dir), creating parent directories.
    pub fn write(&self, file: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.0.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn method_args(&self, methods: &[&str]) -> MethodArgs {
        MethodArgs {
            base_path: self.0.clone(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            output_path: self.0.join("out"),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

pub const TARGET: TargetArgs = TargetArgs {
    bs_id: 300,
    event_id: 0,
};
