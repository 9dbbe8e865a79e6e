use crate::cigar::CigarOp;
use serde::Serialize;
use std::fmt;

/// A genomic region skipped by a spliced alignment.
///
/// Coordinates follow the alignment's 1-based start: `start` is the first
/// skipped base and `end` is `start` plus the skip length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Intron {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
}

impl Intron {
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }
}

impl fmt::Display for Intron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

/// One aligned read, reduced to what junction extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub chromosome: String,
    pub start: u64,
    pub unique: bool,
    pub cigar: Vec<CigarOp>,
}

impl AlignmentRecord {
    pub fn is_spliced(&self) -> bool {
        self.cigar.iter().any(|op| matches!(op, CigarOp::RefSkip(_)))
    }
}
