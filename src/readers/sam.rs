use super::open_text;
use crate::cigar::parse_cigar;
use crate::error::{JunctionError, Result};
use crate::types::AlignmentRecord;
use std::io::{BufRead, Lines};
use std::path::{Path, PathBuf};

const RNAME: usize = 2;
const POS: usize = 3;
const CIGAR: usize = 5;

/// Line-oriented SAM reader. Header lines (`@`) and blank lines are skipped.
pub struct SamReader {
    lines: Lines<Box<dyn BufRead>>,
    path: PathBuf,
    line_no: usize,
    unique_tag: String,
}

impl SamReader {
    pub fn new(path: &Path, unique_tag: &str) -> Result<Self> {
        Ok(Self::from_reader(open_text(path)?, path, unique_tag))
    }

    pub fn from_reader(reader: Box<dyn BufRead>, path: &Path, unique_tag: &str) -> Self {
        Self {
            lines: reader.lines(),
            path: path.to_path_buf(),
            line_no: 0,
            unique_tag: unique_tag.to_string(),
        }
    }
}

impl Iterator for SamReader {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(JunctionError::file_access(&self.path, e))),
            };
            self.line_no += 1;

            if line.starts_with('@') {
                continue;
            }
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            return Some(
                parse_sam_line(line, &self.unique_tag)
                    .map_err(|reason| JunctionError::malformed(&self.path, self.line_no, reason)),
            );
        }
    }
}

/// Decode one SAM data line. The read counts as unique when its last column equals `unique_tag`.
pub fn parse_sam_line(line: &str, unique_tag: &str) -> std::result::Result<AlignmentRecord, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() <= CIGAR {
        return Err(format!(
            "expected at least {} tab-separated columns, found {}",
            CIGAR + 1,
            fields.len()
        ));
    }

    let start = fields[POS]
        .parse::<u64>()
        .map_err(|_| format!("invalid alignment position '{}'", fields[POS]))?;
    let cigar = parse_cigar(fields[CIGAR])?;
    let unique = fields.last().map_or(false, |tag| *tag == unique_tag);

    Ok(AlignmentRecord {
        chromosome: fields[RNAME].to_string(),
        start,
        unique,
        cigar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cigar::CigarOp;
    use std::io::Cursor;

    const UNIQUE: &str = "NH:i:1";

    fn reader(text: &'static str) -> SamReader {
        SamReader::from_reader(Box::new(Cursor::new(text)), Path::new("reads.sam"), UNIQUE)
    }

    #[test]
    fn test_parse_sam_line() {
        let line = "r1\t0\tchrA\t100\t255\t10M5N10M\t*\t0\t0\tACGT\tIIII\tNH:i:1";
        let record = parse_sam_line(line, UNIQUE).unwrap();
        assert_eq!(record.chromosome, "chrA");
        assert_eq!(record.start, 100);
        assert!(record.unique);
        assert_eq!(
            record.cigar,
            vec![CigarOp::Match(10), CigarOp::RefSkip(5), CigarOp::Match(10)]
        );
    }

    #[test]
    fn test_uniqueness_is_exact_last_column() {
        let multi = "r1\t0\tchrA\t100\t255\t10M5N10M\t*\t0\t0\tACGT\tIIII\tNH:i:2";
        assert!(!parse_sam_line(multi, UNIQUE).unwrap().unique);
        let not_last = "r1\t0\tchrA\t100\t255\t10M5N10M\t*\t0\t0\tACGT\tIIII\tNH:i:1\tHI:i:1";
        assert!(!parse_sam_line(not_last, UNIQUE).unwrap().unique);
        let prefixed = "r1\t0\tchrA\t100\t255\t10M5N10M\t*\t0\t0\tACGT\tIIII\tNH:i:11";
        assert!(!parse_sam_line(prefixed, UNIQUE).unwrap().unique);
    }

    #[test]
    fn test_parse_sam_line_errors() {
        assert!(parse_sam_line("r1\t0\tchrA\t100", UNIQUE).is_err());
        assert!(parse_sam_line("r1\t0\tchrA\tabc\t255\t10M\tNH:i:1", UNIQUE).is_err());
        assert!(parse_sam_line("r1\t0\tchrA\t100\t255\t10Q\tNH:i:1", UNIQUE).is_err());
    }

    #[test]
    fn test_reader_skips_headers_and_blank_lines() {
        let records: Vec<_> = reader(
            "@HD\tVN:1.6\n@SQ\tSN:chrA\tLN:1000\n\nr1\t0\tchrA\t100\t255\t10M\t*\t0\t0\tA\tI\tNH:i:1\n",
        )
        .collect::<Result<_>>()
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start, 100);
    }

    #[test]
    fn test_reader_reports_line_numbers() {
        let mut it = reader("@HD\tVN:1.6\nr1\t0\tchrA\n");
        match it.next() {
            Some(Err(JunctionError::MalformedRecord { line, .. })) => assert_eq!(line, 2),
            other => panic!("unexpected: {:?}", other.map(|r| r.is_ok())),
        }
    }

    #[test]
    fn test_trailing_whitespace_is_stripped() {
        let records: Vec<_> = reader("r1\t0\tchrA\t100\t255\t10M5N10M\t*\t0\t0\tA\tI\tNH:i:1  \r\n")
            .collect::<Result<_>>()
            .unwrap();
        assert!(records[0].unique);
    }
}
