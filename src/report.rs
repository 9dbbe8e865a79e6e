use crate::genes::GeneTable;
use crate::junctions::JunctionCounts;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionRow {
    pub gene_id: String,
    pub start: u64,
    pub end: u64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Blank,
    Row(JunctionRow),
}

/// One row per (junction, gene) pair where the gene contains the junction.
///
/// Junctions are visited in count order and, for each, genes in table order,
/// so a junction nested in several genes yields several rows.
pub fn match_junctions(counts: &JunctionCounts, genes: &GeneTable) -> Vec<JunctionRow> {
    let mut rows = Vec::new();
    for (junction, &count) in counts {
        for gene in genes.values().filter(|gene| gene.contains(junction)) {
            rows.push(JunctionRow {
                gene_id: gene.gene_id.clone(),
                start: junction.start,
                end: junction.end,
                count,
            });
        }
    }
    rows
}

/// Insert a blank line wherever the gene changes between consecutive rows.
///
/// Only adjacency matters: rows for one gene that are not contiguous get a
/// separator each time the gene comes back.
pub fn layout_report(rows: Vec<JunctionRow>) -> Vec<ReportLine> {
    let mut lines = Vec::with_capacity(rows.len());
    let mut current_gene: Option<String> = None;

    for row in rows {
        if current_gene.as_deref().map_or(false, |gene| gene != row.gene_id) {
            lines.push(ReportLine::Blank);
        }
        current_gene = Some(row.gene_id.clone());
        lines.push(ReportLine::Row(row));
    }
    lines
}

pub fn write_report<W: Write>(writer: &mut W, lines: &[ReportLine]) -> io::Result<()> {
    for line in lines {
        match line {
            ReportLine::Blank => writeln!(writer)?,
            ReportLine::Row(row) => writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                row.gene_id, row.start, row.end, row.count
            )?,
        }
    }
    writer.flush()
}
