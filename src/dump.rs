//! Dump reader - lazy line access to dump files
//!
//! A dump line looks like:
//!
//! ```text
//! /type/author\t/authors/OL1A\t1\t2008-04-01T03:28:50.625462\t{"key": "/authors/OL1A", ...}
//! ```
//!
//! Everything before the first `{` is discarded.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use crate::{Error, Result};

/// An open dump file.
///
/// Owns the file handle; dropping the reader releases it.
pub struct DumpReader {
    path: PathBuf,
    reader: BufReader<File>,
}

impl DumpReader {
    /// Open a dump file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the reader, yielding `(line_number, line)` pairs.
    ///
    /// Line numbers are 1-indexed. An `Err` item means the file could not be
    /// read further (including invalid UTF-8).
    pub fn lines(self) -> impl Iterator<Item = (usize, std::io::Result<String>)> {
        self.reader
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
    }
}

/// The JSON payload of a dump line: everything from the first `{` on.
pub fn extract_json(line: &str) -> Result<&str> {
    line.find('{')
        .map(|start| &line[start..])
        .ok_or(Error::MissingJson)
}

/// Parse the JSON payload of a dump line into an object.
pub fn parse_payload(line: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
    let json = extract_json(line)?;
    match serde_json::from_str::<serde_json::Value>(json)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject),
    }
}
