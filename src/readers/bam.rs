use crate::cigar::CigarOp;
use crate::error::{JunctionError, Result};
use crate::types::AlignmentRecord;
use rust_htslib::bam::record::{Aux, Cigar};
use rust_htslib::bam::{self, Read};
use std::io;
use std::path::Path;

/// Streams BAM records as [`AlignmentRecord`]s.
///
/// A read is unique when its integer `NH` tag equals 1. Positions are shifted
/// to 1-based so introns line up with those decoded from SAM text.
pub struct BamReader {
    reader: bam::Reader,
    record: bam::Record,
    targets: Vec<String>,
}

impl BamReader {
    pub fn new(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(JunctionError::file_access(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            ));
        }
        let reader = bam::Reader::from_path(path).map_err(|e| {
            JunctionError::file_access(path, io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
        })?;
        let targets = reader
            .header()
            .target_names()
            .iter()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();

        Ok(Self {
            reader,
            record: bam::Record::new(),
            targets,
        })
    }

    fn create_alignment_record(&self) -> AlignmentRecord {
        let record = &self.record;
        let chromosome = usize::try_from(record.tid())
            .ok()
            .and_then(|tid| self.targets.get(tid))
            .cloned()
            .unwrap_or_else(|| "*".to_string());

        let cigar = record
            .cigar()
            .iter()
            .map(|op| match *op {
                Cigar::Match(len) => CigarOp::Match(len),
                Cigar::Del(len) => CigarOp::Deletion(len),
                Cigar::RefSkip(len) => CigarOp::RefSkip(len),
                other => CigarOp::Other(other.len(), other.char()),
            })
            .collect();

        AlignmentRecord {
            chromosome,
            start: (record.pos() + 1).max(0) as u64,
            unique: hit_count(record) == Some(1),
            cigar,
        }
    }
}

fn hit_count(record: &bam::Record) -> Option<i64> {
    match record.aux(b"NH").ok()? {
        Aux::I8(v) => Some(i64::from(v)),
        Aux::U8(v) => Some(i64::from(v)),
        Aux::I16(v) => Some(i64::from(v)),
        Aux::U16(v) => Some(i64::from(v)),
        Aux::I32(v) => Some(i64::from(v)),
        Aux::U32(v) => Some(i64::from(v)),
        _ => None,
    }
}

impl Iterator for BamReader {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read(&mut self.record)? {
            Ok(()) => Some(Ok(self.create_alignment_record())),
            Err(e) => Some(Err(JunctionError::Bam(e))),
        }
    }
}
