use crate::cigar::decode_introns;
use crate::types::{AlignmentRecord, Intron};
use indexmap::IndexMap;
use serde::Serialize;

/// Junction occurrence counts, iterated in order of first occurrence.
pub type JunctionCounts = IndexMap<Intron, u32>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub records: u64,
    pub multi_mapped: u64,
    pub unspliced: u64,
    pub spliced_unique: u64,
    pub occurrences: u64,
    pub below_min_length: u64,
}

/// Accumulates junction occurrences from a stream of alignment records.
#[derive(Debug, Default)]
pub struct JunctionExtractor {
    min_intron_length: u64,
    occurrences: Vec<Intron>,
    stats: ExtractionStats,
}

impl JunctionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop introns shorter than `len` bases. Zero keeps everything.
    pub fn with_min_intron_length(mut self, len: u64) -> Self {
        self.min_intron_length = len;
        self
    }

    pub fn push(&mut self, record: &AlignmentRecord) {
        self.stats.records += 1;

        if !record.unique {
            self.stats.multi_mapped += 1;
            return;
        }
        if !record.is_spliced() {
            self.stats.unspliced += 1;
            return;
        }
        self.stats.spliced_unique += 1;

        for intron in decode_introns(&record.chromosome, &record.cigar, record.start) {
            if intron.len() < self.min_intron_length {
                self.stats.below_min_length += 1;
                continue;
            }
            self.stats.occurrences += 1;
            self.occurrences.push(intron);
        }
    }

    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    pub fn finish(self) -> (Vec<Intron>, ExtractionStats) {
        (self.occurrences, self.stats)
    }
}

/// Junction occurrences from every uniquely aligned, spliced record, in input order.
pub fn extract_junctions<'a, I>(records: I) -> Vec<Intron>
where
    I: IntoIterator<Item = &'a AlignmentRecord>,
{
    let mut extractor = JunctionExtractor::new();
    for record in records {
        extractor.push(record);
    }
    extractor.finish().0
}

/// Like [`extract_junctions`] over a fallible record stream; the first error aborts.
pub fn try_extract_junctions<I, E>(
    records: I,
    mut extractor: JunctionExtractor,
) -> Result<(Vec<Intron>, ExtractionStats), E>
where
    I: IntoIterator<Item = Result<AlignmentRecord, E>>,
{
    for record in records {
        extractor.push(&record?);
    }
    Ok(extractor.finish())
}

/// Count identical junctions.
pub fn aggregate<I>(occurrences: I) -> JunctionCounts
where
    I: IntoIterator<Item = Intron>,
{
    occurrences
        .into_iter()
        .fold(JunctionCounts::new(), |mut counts, intron| {
            *counts.entry(intron).or_insert(0) += 1;
            counts
        })
}
