use splice_junctions::cli::{InputFiles, RunOptions};
use splice_junctions::config::Config;
use splice_junctions::readers::AlignmentFormat;
use splice_junctions::{pipeline, JunctionError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// Small SAM/gene-table fixtures written into a temp dir, run through the
// whole pipeline, and compared against the exact report text.

const HEADER: &str = "@HD\tVN:1.6\tSO:coordinate\n";

fn sam_line(name: &str, chrom: &str, pos: u64, cigar: &str, nh: &str) -> String {
    format!("{name}\t0\t{chrom}\t{pos}\t255\t{cigar}\t*\t0\t0\tACGTACGT\tIIIIIIII\t{nh}\n")
}

fn options(dir: &Path, alignment: &str, genes: &str, format: AlignmentFormat) -> RunOptions {
    let config = Config {
        output_file: dir.join("output.txt"),
        ..Config::default()
    };
    RunOptions::new(
        InputFiles {
            alignment_file: dir.join(alignment),
            format,
            gene_file: dir.join(genes),
        },
        config,
    )
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn two_reads_on_one_junction() {
    let dir = tempfile::tempdir().unwrap();
    let sam = format!(
        "{HEADER}{}{}",
        sam_line("r1", "chrA", 100, "10M5N20M", "NH:i:1"),
        sam_line("r2", "chrA", 100, "10M5N20M", "NH:i:1"),
    );
    write(dir.path(), "reads.sam", &sam);
    write(dir.path(), "genes.txt", "geneX\tgene X\tchrA:100..200(+)\n");

    let opts = options(dir.path(), "reads.sam", "genes.txt", AlignmentFormat::Sam);
    let summary = pipeline::run(&opts).unwrap();

    let output = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(output, "geneX\t110\t115\t2\n");
    assert_eq!(summary.extraction.records, 2);
    assert_eq!(summary.unique_junctions, 1);
    assert_eq!(summary.rows_written, 1);
}

#[test]
fn filters_and_groups_by_gene() {
    let dir = tempfile::tempdir().unwrap();
    let sam = [
        HEADER.to_string(),
        sam_line("multi", "chrA", 100, "10M5N20M", "NH:i:2"),
        sam_line("plain", "chrA", 100, "30M", "NH:i:1"),
        sam_line("deletion", "chrA", 100, "10M5D20M", "NH:i:1"),
        sam_line("g1a", "TGME49_chrVIII", 6_631_400, "10M100N20M", "NH:i:1"),
        sam_line("g1b", "TGME49_chrVIII", 6_631_500, "5M2I5M50N3M7N9M", "NH:i:1"),
        sam_line("g2", "TGME49_chrVIII", 6_916_900, "20M300N20M", "NH:i:1"),
        sam_line("orphan", "chrZ", 10, "10M10N10M", "NH:i:1"),
    ]
    .concat();
    write(dir.path(), "reads.sam", &sam);
    write(
        dir.path(),
        "genes.txt",
        "Gene ID\tProduct Description\tGenomic Location (Gene)\n\
         TGME49_1\thypothetical protein\tTGME49_chrVIII:6,631,349..6,636,865(+)\n\
         TGME49_2\thypothetical protein\tTGME49_chrVIII:6,916,849..6,917,687(-)\n",
    );

    let opts = options(dir.path(), "reads.sam", "genes.txt", AlignmentFormat::Sam);
    let summary = pipeline::run(&opts).unwrap();

    let output = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(
        output,
        "TGME49_1\t6631410\t6631510\t1\n\
         TGME49_1\t6631510\t6631560\t1\n\
         TGME49_1\t6631563\t6631570\t1\n\
         \n\
         TGME49_2\t6916920\t6917220\t1\n"
    );
    assert_eq!(summary.extraction.multi_mapped, 1);
    assert_eq!(summary.extraction.unspliced, 2);
    assert_eq!(summary.unassigned_junctions, 1);
    assert_eq!(summary.genes, 2);
}

#[test]
fn missing_alignment_file_is_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "genes.txt", "geneX\t-\tchrA:100..200\n");

    let opts = options(dir.path(), "absent.sam", "genes.txt", AlignmentFormat::Sam);
    let err = pipeline::run(&opts).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<JunctionError>(),
        Some(JunctionError::FileAccess { .. })
    ));
    assert!(err.to_string().contains("absent.sam"));
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn missing_gene_file_is_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "reads.sam", &sam_line("r1", "chrA", 100, "10M5N20M", "NH:i:1"));

    let opts = options(dir.path(), "reads.sam", "absent.txt", AlignmentFormat::Sam);
    let err = pipeline::run(&opts).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn malformed_record_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let sam = format!(
        "{HEADER}{}r2\t0\tchrA\n",
        sam_line("r1", "chrA", 100, "10M5N20M", "NH:i:1")
    );
    write(dir.path(), "reads.sam", &sam);
    write(dir.path(), "genes.txt", "geneX\t-\tchrA:100..200\n");

    let opts = options(dir.path(), "reads.sam", "genes.txt", AlignmentFormat::Sam);
    let err = pipeline::run(&opts).unwrap_err();
    match err.downcast_ref::<JunctionError>() {
        Some(JunctionError::MalformedRecord { line, .. }) => assert_eq!(*line, 3),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn no_matches_still_writes_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "reads.sam", &sam_line("r1", "chrB", 100, "10M5N20M", "NH:i:1"));
    write(dir.path(), "genes.txt", "geneX\t-\tchrA:100..200\n");

    let opts = options(dir.path(), "reads.sam", "genes.txt", AlignmentFormat::Sam);
    pipeline::run(&opts).unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("output.txt")).unwrap(), "");
}

#[test]
fn custom_tag_and_min_intron_length() {
    let dir = tempfile::tempdir().unwrap();
    let sam = [
        sam_line("short", "chrA", 100, "10M5N20M", "XS:A:+"),
        sam_line("untagged", "chrA", 100, "10M50N20M", "NH:i:1"),
        sam_line("kept", "chrA", 100, "10M50N20M", "XS:A:+"),
    ]
    .concat();
    write(dir.path(), "reads.sam", &sam);
    write(dir.path(), "genes.txt", "geneX\t-\tchrA:1..1000\n");

    let mut opts = options(dir.path(), "reads.sam", "genes.txt", AlignmentFormat::Sam);
    opts.unique_tag = "XS:A:+".to_string();
    opts.min_intron_length = 10;
    pipeline::run(&opts).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "geneX\t110\t160\t1\n"
    );
}

#[test]
fn gzipped_inputs_are_decompressed() {
    let dir = tempfile::tempdir().unwrap();
    let sam = format!("{HEADER}{}", sam_line("r1", "chrA", 100, "10M5N20M", "NH:i:1"));
    {
        let mut writer = niffler::to_path(
            dir.path().join("reads.sam.gz"),
            niffler::compression::Format::Gzip,
            niffler::Level::One,
        )
        .unwrap();
        writer.write_all(sam.as_bytes()).unwrap();
    }
    write(dir.path(), "genes.txt", "geneX\t-\tchrA:100..200\n");

    let opts = options(dir.path(), "reads.sam.gz", "genes.txt", AlignmentFormat::Sam);
    pipeline::run(&opts).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "geneX\t110\t115\t1\n"
    );
}

#[test]
fn summary_is_exported_as_json() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "reads.sam", &sam_line("r1", "chrA", 100, "10M5N20M", "NH:i:1"));
    write(dir.path(), "genes.txt", "geneX\t-\tchrA:100..200\n");

    let mut opts = options(dir.path(), "reads.sam", "genes.txt", AlignmentFormat::Sam);
    opts.summary_file = Some(dir.path().join("summary.json"));
    pipeline::run(&opts).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["rows_written"], 1);
    assert_eq!(json["extraction"]["occurrences"], 1);
    assert!(json["created_at"].as_str().is_some());
}

#[test]
fn bam_input_matches_sam_input() {
    use rust_htslib::bam;

    let dir = tempfile::tempdir().unwrap();
    let bam_path = dir.path().join("reads.bam");

    let mut header = bam::Header::new();
    let mut sq = bam::header::HeaderRecord::new(b"SQ");
    sq.push_tag(b"SN", "chrA");
    sq.push_tag(b"LN", 1000);
    header.push_record(&sq);
    {
        let mut view = bam::HeaderView::from_header(&header);
        let mut writer = bam::Writer::from_path(&bam_path, &header, bam::Format::Bam).unwrap();
        for (name, nh) in [("r1", "NH:i:1"), ("r2", "NH:i:1"), ("r3", "NH:i:3")] {
            let line = sam_line(name, "chrA", 100, "10M5N20M", nh);
            let record = bam::Record::from_sam(&mut view, line.trim_end().as_bytes()).unwrap();
            writer.write(&record).unwrap();
        }
    }
    write(dir.path(), "genes.txt", "geneX\t-\tchrA:100..200\n");

    let opts = options(dir.path(), "reads.bam", "genes.txt", AlignmentFormat::Bam);
    let summary = pipeline::run(&opts).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("output.txt")).unwrap(),
        "geneX\t110\t115\t2\n"
    );
    assert_eq!(summary.extraction.multi_mapped, 1);
}
