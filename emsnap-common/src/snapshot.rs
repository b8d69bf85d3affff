//! JSON snapshot assembly and atomic file replacement.
//!
//! Snapshots are flat JSON objects written for other processes to consume.
//! Readers must only ever observe a complete document, so the public file
//! is replaced via a temp-file-then-rename sequence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// An ordered collection of snapshot members, rendered as one JSON object.
///
/// Member names and text values come from fixed compile-time sets and are
/// emitted without escaping.
#[derive(Debug, Default)]
pub struct Snapshot {
    members: Vec<String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a float member, rendered with exactly three decimal digits.
    pub fn push_float(&mut self, name: &str, value: f64) {
        self.members.push(format!("\"{}\":{:.3}", name, value));
    }

    /// Append a bare integer member.
    pub fn push_int(&mut self, name: &str, value: i64) {
        self.members.push(format!("\"{}\":{}", name, value));
    }

    /// Append a quoted string member.
    pub fn push_text(&mut self, name: &str, value: &str) {
        self.members.push(format!("\"{}\":\"{}\"", name, value));
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Render the document: members joined with commas, wrapped in braces,
    /// terminated by a newline.
    pub fn render(&self) -> String {
        format!("{{{}}}\n", self.members.join(","))
    }
}

/// Current local time at second resolution, `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Sibling temp path used during atomic replacement.
///
/// `/tmp/em_data.json` becomes `/tmp/em_data_last.json`.
pub fn temp_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("snapshot");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("json");
    path.with_file_name(format!("{}_last.{}", stem, ext))
}

/// Atomically replace the snapshot at `path` with `contents`.
///
/// The document is first written to the sibling temp path, then renamed
/// over the public path. If the process dies in between, the public path
/// keeps its previous complete document.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
