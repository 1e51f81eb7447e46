//! # Trace Reader Tests

use bpsim::trace::{TraceReader, parse_line};
use bpsim::{BranchRecord, Outcome, TraceError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Cursor;

#[rstest]
#[case("0x40a2c4 1", 0x40a2c4, Outcome::Taken)]
#[case("40a2c4 0", 0x40a2c4, Outcome::NotTaken)]
#[case("  0XFFFFFFFF\t1  ", 0xffff_ffff, Outcome::Taken)]
#[case("0x10 0 extra fields", 0x10, Outcome::NotTaken)]
fn test_parse_line(#[case] line: &str, #[case] pc: u32, #[case] outcome: Outcome) {
    assert_eq!(
        parse_line(line, 1).unwrap(),
        Some(BranchRecord::new(pc, outcome))
    );
}

#[test]
fn test_blank_line_skipped() {
    assert_eq!(parse_line("   ", 3).unwrap(), None);
}

#[rstest]
#[case("0x10 2")]
#[case("0x10")]
#[case("zz 1")]
#[case("0x1ffffffff 1")]
fn test_malformed_line(#[case] line: &str) {
    let err = parse_line(line, 7).unwrap_err();
    assert!(matches!(err, TraceError::Parse { line: 7, .. }), "{err}");
}

#[test]
fn test_reader_yields_records_in_order() {
    let input = "0x4 1\n\n0x8 0\n0xc 1\n";
    let records: Vec<_> = TraceReader::new(Cursor::new(input))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        records,
        vec![
            BranchRecord::new(0x4, Outcome::Taken),
            BranchRecord::new(0x8, Outcome::NotTaken),
            BranchRecord::new(0xc, Outcome::Taken),
        ]
    );
}

#[test]
fn test_reader_reports_line_number() {
    let input = "0x4 1\n\n0x8 x\n";
    let mut reader = TraceReader::new(Cursor::new(input));
    assert!(reader.next().unwrap().is_ok());
    let err = reader.next().unwrap().unwrap_err();
    assert_eq!(err.to_string(), "trace line 3: bad outcome 'x', expected 0 or 1");
}

#[test]
fn test_record_display() {
    assert_eq!(BranchRecord::new(0x40, Outcome::Taken).to_string(), "0x40 1");
}

#[test]
fn test_reader_non_utf8_line_is_parse_error() {
    let input: &[u8] = b"0x4 1\n0x8 \xff\n0xc 2\n0x10 0\n";
    let mut reader = TraceReader::new(Cursor::new(input));

    assert_eq!(
        reader.next().unwrap().unwrap(),
        BranchRecord::new(0x4, Outcome::Taken)
    );
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, TraceError::Parse { line: 2, .. }), "{err}");
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, TraceError::Parse { line: 3, .. }), "{err}");
    assert_eq!(
        reader.next().unwrap().unwrap(),
        BranchRecord::new(0x10, Outcome::NotTaken)
    );
    assert!(reader.next().is_none());
}

#[test]
fn test_reader_accepts_crlf() {
    let records: Vec<_> = TraceReader::new(Cursor::new("0x4 1\r\n0x8 0\r\n"))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        records,
        vec![
            BranchRecord::new(0x4, Outcome::Taken),
            BranchRecord::new(0x8, Outcome::NotTaken),
        ]
    );
}
