mod bam;
mod sam;

pub use bam::BamReader;
pub use sam::{parse_sam_line, SamReader};

use crate::error::{JunctionError, Result};
use crate::types::AlignmentRecord;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const COMPRESSED_SUFFIXES: [&str; 4] = [".gz", ".bz2", ".xz", ".zst"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Sam,
    Bam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Alignment(AlignmentFormat),
    GeneTable,
}

impl InputKind {
    /// Classify an input by file name. Compressed text is recognised by its inner extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".bam") {
            return Some(InputKind::Alignment(AlignmentFormat::Bam));
        }

        let inner = COMPRESSED_SUFFIXES
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix))
            .unwrap_or(name);
        if inner.ends_with(".sam") {
            Some(InputKind::Alignment(AlignmentFormat::Sam))
        } else if inner.ends_with(".txt") {
            Some(InputKind::GeneTable)
        } else {
            None
        }
    }
}

fn is_compressed(path: &Path) -> bool {
    path.to_str()
        .map_or(false, |p| COMPRESSED_SUFFIXES.iter().any(|s| p.ends_with(s)))
}

/// Open a text input, decompressing through niffler when the name says so.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| JunctionError::file_access(path, e))?;
    if !is_compressed(path) {
        return Ok(Box::new(BufReader::new(file)));
    }

    let (inner_reader, _compression) = niffler::get_reader(Box::new(file)).map_err(|e| {
        JunctionError::file_access(path, io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    })?;
    Ok(Box::new(BufReader::with_capacity(1024 * 1024, inner_reader)))
}

/// Streams alignment records from either supported format.
pub enum AlignmentReader {
    Sam(SamReader),
    Bam(BamReader),
}

impl AlignmentReader {
    pub fn open(path: &Path, format: AlignmentFormat, unique_tag: &str) -> Result<Self> {
        Ok(match format {
            AlignmentFormat::Sam => AlignmentReader::Sam(SamReader::new(path, unique_tag)?),
            AlignmentFormat::Bam => AlignmentReader::Bam(BamReader::new(path)?),
        })
    }
}

impl Iterator for AlignmentReader {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            AlignmentReader::Sam(reader) => reader.next(),
            AlignmentReader::Bam(reader) => reader.next(),
        }
    }
}
