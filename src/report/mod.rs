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
//! Rendering of analysis results as HTML charts, LaTeX tables and JSON.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

pub mod latex;
pub mod plot;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot serialize the results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed color of a decision method, gray for unknown methods.
pub fn method_color(method: &str) -> &'static str {
    match method.to_uppercase().as_str() {
        "AHP" => "#1f77b4",
        "PROMETHEE" => "#ff7f0e",
        "TOPSIS" => "#2ca02c",
        "BORDA" => "#d62728",
        _ => "#808080",
    }
}

/// Write `value` as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), ReportError> {
    let path = path.as_ref();
    log::debug!("Writing {}", path.to_string_lossy());
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn colors() {
        assert_eq!(method_color("TOPSIS"), "#2ca02c");
        assert_eq!(method_color("borda"), "#d62728");
        assert_eq!(method_color("VIKOR"), "#808080");
    }
}
