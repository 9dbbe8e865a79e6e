use crate::junctions::ExtractionStats;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Counters describing one run, exported with `--summary`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub tool_version: String,
    #[serde(serialize_with = "serialize_datetime")]
    pub created_at: DateTime<Utc>,
    pub alignment_file: PathBuf,
    pub gene_file: PathBuf,
    pub output_file: PathBuf,
    pub extraction: ExtractionStats,
    pub unique_junctions: usize,
    pub genes: usize,
    pub rows_written: usize,
    pub unassigned_junctions: usize,
}

fn serialize_datetime<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339())
}

impl RunSummary {
    pub fn new(alignment_file: &Path, gene_file: &Path, output_file: &Path) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
            alignment_file: alignment_file.to_path_buf(),
            gene_file: gene_file.to_path_buf(),
            output_file: output_file.to_path_buf(),
            extraction: ExtractionStats::default(),
            unique_junctions: 0,
            genes: 0,
            rows_written: 0,
            unassigned_junctions: 0,
        }
    }

    pub fn log(&self) {
        let stats = &self.extraction;
        info!(
            "Alignments: {} read, {} multi-mapped, {} unspliced, {} spliced and unique",
            stats.records, stats.multi_mapped, stats.unspliced, stats.spliced_unique
        );
        if stats.below_min_length > 0 {
            info!("Introns below minimum length: {}", stats.below_min_length);
        }
        info!(
            "Junctions: {} occurrences, {} distinct, {} outside every gene",
            stats.occurrences, self.unique_junctions, self.unassigned_junctions
        );
        info!(
            "Wrote {} rows for {} genes to {}",
            self.rows_written,
            self.genes,
            self.output_file.display()
        );
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
