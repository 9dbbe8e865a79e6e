//! CIGAR decoding.
//!
//! Only three operations move the reference cursor here: `M`, `D` and `N`.
//! Everything else is kept as [`CigarOp::Other`] and leaves the cursor alone.

use crate::types::Intron;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CigarOp {
    Match(u32),
    Deletion(u32),
    RefSkip(u32),
    Other(u32, char),
}

impl CigarOp {
    pub fn len(&self) -> u32 {
        match *self {
            CigarOp::Match(l) | CigarOp::Deletion(l) | CigarOp::RefSkip(l) => l,
            CigarOp::Other(l, _) => l,
        }
    }

    pub fn char(&self) -> char {
        match *self {
            CigarOp::Match(_) => 'M',
            CigarOp::Deletion(_) => 'D',
            CigarOp::RefSkip(_) => 'N',
            CigarOp::Other(_, c) => c,
        }
    }

    fn from_parts(len: u32, op: char) -> Option<Self> {
        match op {
            'M' => Some(CigarOp::Match(len)),
            'D' => Some(CigarOp::Deletion(len)),
            'N' => Some(CigarOp::RefSkip(len)),
            'I' | 'S' | 'H' | 'P' | '=' | 'X' => Some(CigarOp::Other(len, op)),
            _ => None,
        }
    }
}

/// Parse a textual CIGAR such as `10M5N20M`.
///
/// `*` and the empty string mean "no alignment" and decode to no operations.
pub fn parse_cigar(text: &str) -> Result<Vec<CigarOp>, String> {
    if text.is_empty() || text == "*" {
        return Ok(Vec::new());
    }

    let mut ops = Vec::new();
    let mut digits_start = 0;
    for (i, c) in text.char_indices() {
        if c.is_ascii_digit() {
            continue;
        }
        let digits = &text[digits_start..i];
        if digits.is_empty() {
            return Err(format!("CIGAR '{}' has operation '{}' without a length", text, c));
        }
        let len: u32 = digits
            .parse()
            .map_err(|_| format!("CIGAR '{}' has an invalid length '{}'", text, digits))?;
        let op = CigarOp::from_parts(len, c)
            .ok_or_else(|| format!("CIGAR '{}' has unknown operation '{}'", text, c))?;
        ops.push(op);
        digits_start = i + c.len_utf8();
    }

    if digits_start != text.len() {
        return Err(format!("CIGAR '{}' ends with a dangling length", text));
    }
    Ok(ops)
}

/// Walk `ops` from `start` and return one intron per `N` operation.
///
/// Introns come back in reference order. Adjacent `N` operations give
/// back-to-back introns; they are never merged.
pub fn decode_introns(chromosome: &str, ops: &[CigarOp], start: u64) -> Vec<Intron> {
    let mut cursor = start;
    let mut introns = Vec::new();

    for op in ops {
        match *op {
            CigarOp::Match(len) | CigarOp::Deletion(len) => cursor += u64::from(len),
            CigarOp::RefSkip(len) => {
                let end = cursor + u64::from(len);
                if end > cursor {
                    introns.push(Intron::new(chromosome, cursor, end));
                }
                cursor = end;
            }
            CigarOp::Other(..) => {}
        }
    }

    introns
}
