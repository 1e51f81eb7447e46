//! Branch trace reader.
//!
//! One conditional branch per line: the branch address in hex (with or without
//! a `0x` prefix) and its outcome as `0` or `1`, separated by whitespace.
//! Blank lines are skipped and any further fields are ignored.

use crate::bp::Outcome;
use crate::error::TraceError;
use std::fmt;
use std::io::{BufRead, Split};

/// A resolved conditional branch from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    pub pc: u32,
    pub outcome: Outcome,
}

impl BranchRecord {
    pub fn new(pc: u32, outcome: Outcome) -> Self {
        Self { pc, outcome }
    }
}

impl fmt::Display for BranchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x} {}", self.pc, self.outcome as u8)
    }
}

/// Iterator over the records of a text trace.
///
/// Lines are split on raw bytes so that a line which is not UTF-8 is reported
/// as a parse error at its own line number.
pub struct TraceReader<R> {
    lines: Split<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bytes = match self.lines.next()? {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(TraceError::Io(e))),
            };
            self.line_no += 1;
            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(TraceError::Parse {
                        line: self.line_no,
                        reason: format!("not valid UTF-8: {e}"),
                    }));
                }
            };
            match parse_line(line, self.line_no) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parses a single trace line; `Ok(None)` for blank lines.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<BranchRecord>, TraceError> {
    let mut fields = line.split_whitespace();
    let Some(pc_field) = fields.next() else {
        return Ok(None);
    };
    let err = |reason: String| TraceError::Parse {
        line: line_no,
        reason,
    };

    let digits = pc_field
        .strip_prefix("0x")
        .or_else(|| pc_field.strip_prefix("0X"))
        .unwrap_or(pc_field);
    let pc = u32::from_str_radix(digits, 16)
        .map_err(|e| err(format!("bad branch address '{pc_field}': {e}")))?;

    let outcome = match fields.next() {
        Some("0") => Outcome::NotTaken,
        Some("1") => Outcome::Taken,
        Some(other) => return Err(err(format!("bad outcome '{other}', expected 0 or 1"))),
        None => return Err(err("missing outcome".to_string())),
    };

    Ok(Some(BranchRecord { pc, outcome }))
}
