use crate::cli::RunOptions;
use crate::error::JunctionError;
use crate::genes::load_gene_table;
use crate::junctions::{aggregate, try_extract_junctions, ExtractionStats, JunctionExtractor};
use crate::readers::AlignmentReader;
use crate::report::{layout_report, match_junctions, write_report};
use crate::summary::RunSummary;
use crate::types::Intron;
use crate::utils::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufWriter;

const PROGRESS_INTERVAL: u64 = 100_000;

/// Read both inputs, count junctions per gene and write the report.
///
/// The report is only written once both inputs were read without error.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let mut summary = RunSummary::new(
        &options.alignment_file,
        &options.gene_file,
        &options.output_file,
    );

    info!("Reading alignments from {}", options.alignment_file.display());
    let (occurrences, stats) = read_junctions(options)?;
    let counts = aggregate(occurrences);
    summary.extraction = stats;
    summary.unique_junctions = counts.len();

    info!("Loading gene locations from {}", options.gene_file.display());
    let genes = load_gene_table(&options.gene_file)?;
    summary.genes = genes.len();

    let rows = match_junctions(&counts, &genes);
    summary.rows_written = rows.len();
    summary.unassigned_junctions = counts
        .keys()
        .filter(|junction| !genes.values().any(|gene| gene.contains(junction)))
        .count();

    let file = File::create(&options.output_file)
        .map_err(|e| JunctionError::file_access(&options.output_file, e))?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, &layout_report(rows))
        .with_context(|| format!("Failed to write {}", options.output_file.display()))?;

    summary.log();
    if let Some(path) = &options.summary_file {
        summary
            .write_json(path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        info!("Run summary written to {}", path.display());
    }

    Ok(summary)
}

fn read_junctions(options: &RunOptions) -> Result<(Vec<Intron>, ExtractionStats)> {
    let reader = AlignmentReader::open(&options.alignment_file, options.format, &options.unique_tag)?;
    let progress = ProgressBarBuilder::new(format!(
        "Reading {}",
        options.alignment_file.display()
    ))
    .hidden(!options.show_progress)
    .with_tick()
    .build()?;

    let mut seen = 0u64;
    let records = reader.inspect(|_| {
        seen += 1;
        if seen % PROGRESS_INTERVAL == 0 {
            progress.set_message(format!("Read {} alignments", seen));
        }
    });
    let extractor = JunctionExtractor::new().with_min_intron_length(options.min_intron_length);
    let result = try_extract_junctions(records, extractor);
    progress.finish_and_clear();

    Ok(result?)
}
