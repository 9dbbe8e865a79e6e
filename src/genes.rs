use crate::error::{JunctionError, Result};
use crate::readers::open_text;
use crate::types::Intron;
use indexmap::IndexMap;
use log::{debug, warn};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneInterval {
    pub gene_id: String,
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
}

impl GeneInterval {
    /// Inclusive on both ends; the junction has to sit entirely inside the gene.
    pub fn contains(&self, junction: &Intron) -> bool {
        junction.chromosome == self.chromosome
            && junction.start >= self.start
            && junction.end <= self.end
    }
}

/// Genes keyed by id, iterated in file order.
///
/// A repeated id replaces the earlier interval but keeps its slot.
pub type GeneTable = IndexMap<String, GeneInterval>;

/// Parse `TGME49_chrVIII:6,631,349..6,636,865(+)` into chromosome, start and end.
///
/// Returns `Ok(None)` when the text holds no location at all.
pub fn parse_location(text: &str) -> std::result::Result<Option<(String, u64, u64)>, String> {
    let Some((head, tail)) = text.split_once("..") else {
        return Ok(None);
    };
    let Some((chrom_part, start_part)) = head.rsplit_once(':') else {
        return Ok(None);
    };

    let chromosome: String = {
        let word_start = chrom_part
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
            .last()
            .map(|(i, _)| i);
        match word_start {
            Some(i) => chrom_part[i..].to_string(),
            None => return Ok(None),
        }
    };

    if start_part.is_empty() || !start_part.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return Ok(None);
    }
    let end_part: String = tail
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    if end_part.is_empty() {
        return Ok(None);
    }

    let start = parse_grouped(start_part)?;
    let end = parse_grouped(&end_part)?;
    Ok(Some((chromosome, start, end)))
}

fn parse_grouped(digits: &str) -> std::result::Result<u64, String> {
    let stripped = digits.replace(',', "");
    stripped
        .parse()
        .map_err(|_| format!("invalid coordinate '{}'", digits))
}

/// Decode one gene-table line. `Ok(None)` means the line carries no gene location.
pub fn parse_gene_line(line: &str) -> std::result::Result<Option<GeneInterval>, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(format!("expected at least 3 columns, found {}", fields.len()));
    }

    let Some((chromosome, start, end)) = parse_location(fields[2])? else {
        return Ok(None);
    };
    Ok(Some(GeneInterval {
        gene_id: fields[0].to_string(),
        chromosome,
        start,
        end,
    }))
}

pub fn read_gene_table<R: BufRead>(reader: R, path: &Path) -> Result<GeneTable> {
    let mut genes = GeneTable::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| JunctionError::file_access(path, e))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        match parse_gene_line(line).map_err(|reason| JunctionError::malformed(path, line_no, reason))? {
            Some(gene) => {
                if let Some(previous) = genes.insert(gene.gene_id.clone(), gene) {
                    warn!(
                        "Gene {} listed more than once ({}:{}); keeping the later location",
                        previous.gene_id, path.display(), line_no
                    );
                }
            }
            None => debug!("{}:{}: no gene location, skipping", path.display(), line_no),
        }
    }

    Ok(genes)
}

pub fn load_gene_table(path: &Path) -> Result<GeneTable> {
    let reader = open_text(path)?;
    read_gene_table(reader, path)
}
