use crate::config::Config;
use crate::error::{JunctionError, Result};
use crate::readers::{AlignmentFormat, InputKind};
use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "splice-junctions <reads.sam> <GeneLocation_Summary.txt>";

#[derive(Parser, Debug)]
#[command(author, version, about = "Count reads supporting each splice junction, per gene", long_about = None)]
pub struct Args {
    /// Alignment file (.sam, .sam.gz, .bam) and gene location table (.txt), in either order
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output file for the junction table [default: output.txt]
    #[arg(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,

    /// Last-column tag marking a uniquely aligned read [default: NH:i:1]
    #[arg(long, value_name = "TAG")]
    pub unique_tag: Option<String>,

    /// Drop junctions shorter than this many bases [default: 0]
    #[arg(long, value_name = "BASES")]
    pub min_intron_length: Option<u64>,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Config file to use instead of the per-user one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors; no progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

/// The two positional inputs, sorted by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub alignment_file: PathBuf,
    pub format: AlignmentFormat,
    pub gene_file: PathBuf,
}

/// Everything a run needs, after merging CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub alignment_file: PathBuf,
    pub format: AlignmentFormat,
    pub gene_file: PathBuf,
    pub output_file: PathBuf,
    pub unique_tag: String,
    pub min_intron_length: u64,
    pub summary_file: Option<PathBuf>,
    pub show_progress: bool,
}

impl RunOptions {
    pub fn new(inputs: InputFiles, config: Config) -> Self {
        Self {
            alignment_file: inputs.alignment_file,
            format: inputs.format,
            gene_file: inputs.gene_file,
            output_file: config.output_file,
            unique_tag: config.unique_tag,
            min_intron_length: config.min_intron_length,
            summary_file: None,
            show_progress: false,
        }
    }
}

fn usage(message: impl std::fmt::Display) -> JunctionError {
    JunctionError::Usage(format!("{}\nUsage: {}", message, USAGE))
}

/// Sort the positional arguments into one alignment file and one gene table.
pub fn classify_inputs(inputs: &[PathBuf]) -> Result<InputFiles> {
    if inputs.len() != 2 {
        return Err(usage(format!("expected 2 input files, got {}", inputs.len())));
    }

    let mut alignment = None;
    let mut genes = None;
    for path in inputs {
        match InputKind::from_path(path) {
            Some(InputKind::Alignment(format)) if alignment.is_none() => {
                alignment = Some((path.clone(), format))
            }
            Some(InputKind::GeneTable) if genes.is_none() => genes = Some(path.clone()),
            Some(_) => {
                return Err(usage(format!(
                    "'{}' is the second file of the same type",
                    path.display()
                )))
            }
            None => {
                return Err(usage(format!(
                    "Unknown file type '{}'. Expected a .sam/.bam or .txt file.",
                    path.display()
                )))
            }
        }
    }

    match (alignment, genes) {
        (Some((alignment_file, format)), Some(gene_file)) => Ok(InputFiles {
            alignment_file,
            format,
            gene_file,
        }),
        _ => Err(usage("expected one alignment file and one gene location file")),
    }
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Classify inputs and merge flags over the config file (flag > config > default).
    pub fn run_options(&self) -> Result<RunOptions> {
        let inputs = classify_inputs(&self.inputs)?;
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };

        let mut options = RunOptions::new(inputs, config);
        if let Some(output) = &self.output_file {
            options.output_file = output.clone();
        }
        if let Some(tag) = &self.unique_tag {
            options.unique_tag = tag.clone();
        }
        if let Some(len) = self.min_intron_length {
            options.min_intron_length = len;
        }
        options.summary_file = self.summary.clone();
        options.show_progress = !self.quiet;
        Ok(options)
    }
}
