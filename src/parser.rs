//! Parser for `~` delimited read log lines.

use std::io::{self, BufRead};

use crate::analyzers::types::{Read, Sample};
use crate::config::LineLayout;

/// Parses one raw line into a [`Read`].
///
/// Returns `None` for any line that is too short or whose signal strength or
/// secondary metric does not parse. Fields are split strictly by position.
/// Surrounding whitespace is trimmed, except a whitespace delimiter itself.
pub fn parse_line(line: &str, layout: &LineLayout) -> Option<Read> {
    let delimiter = layout.delimiter;
    let parts: Vec<&str> = line
        .trim_matches(|c: char| c.is_whitespace() && c != delimiter)
        .split(delimiter)
        .collect();
    if parts.len() < layout.min_fields {
        return None;
    }

    let rssi = parts.get(layout.rssi)?.trim().parse::<i64>().ok()?;
    let stat = parts.get(layout.stat)?.trim().parse::<f64>().ok()?;

    Some(Read {
        device: parts.get(layout.device)?.to_string(),
        port: parts.get(layout.port)?.to_string(),
        sample: Sample { rssi, stat },
    })
}

/// Lazily parses every line of `reader`.
///
/// Yields `Ok(None)` for discarded lines. A line that is not valid UTF-8
/// surfaces as an I/O error.
pub fn reads<'a, R: BufRead + 'a>(
    reader: R,
    layout: &'a LineLayout,
) -> impl Iterator<Item = io::Result<Option<Read>>> + 'a {
    reader
        .lines()
        .map(move |line| line.map(|l| parse_line(&l, layout)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(line: &str) -> Option<Read> {
        parse_line(line, &LineLayout::default())
    }

    #[test]
    fn test_parse_valid_line() {
        let read = parse("a~a~a~a~a~a~DEV1~1~-40~a~a~5.0").unwrap();
        assert_eq!(read.device, "DEV1");
        assert_eq!(read.port, "1");
        assert_eq!(read.sample.rssi, -40);
        assert_eq!(read.sample.stat, 5.0);
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert!(parse("a~b~c~d~e").is_none());
        assert!(parse("a~a~a~a~a~a~DEV1~1~-40~a~a").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_parse_non_numeric_signal() {
        assert!(parse("a~a~a~a~a~a~DEV1~1~N/A~a~a~5.0").is_none());
        assert!(parse("a~a~a~a~a~a~DEV1~1~-40.5~a~a~5.0").is_none());
    }

    #[test]
    fn test_parse_non_numeric_stat() {
        assert!(parse("a~a~a~a~a~a~DEV1~1~-40~a~a~x").is_none());
        assert!(parse("a~a~a~a~a~a~DEV1~1~-40~a~a~").is_none());
    }

    #[test]
    fn test_parse_trims_line_and_numbers() {
        let read = parse("  a~a~a~a~a~a~DEV1~2~ -61 ~a~a~ 7 \r\n").unwrap();
        assert_eq!(read.port, "2");
        assert_eq!(read.sample.rssi, -61);
        assert_eq!(read.sample.stat, 7.0);
    }

    #[test]
    fn test_parse_keeps_extra_fields_and_ids_verbatim() {
        let read = parse("a~a~a~a~a~a~ dev ~01~-40~a~a~5.0~extra~more").unwrap();
        assert_eq!(read.device, " dev ");
        assert_eq!(read.port, "01");
    }

    #[test]
    fn test_parse_custom_layout() {
        let layout = LineLayout {
            delimiter: ',',
            device: 0,
            port: 1,
            rssi: 2,
            stat: 3,
            min_fields: 4,
        };
        let read = parse_line("R1,3,-55,1.5", &layout).unwrap();
        assert_eq!(read.device, "R1");
        assert_eq!(read.port, "3");
        assert_eq!(read.sample.rssi, -55);
    }

    #[test]
    fn test_parse_tab_layout_keeps_empty_edge_fields() {
        let layout = LineLayout {
            delimiter: '\t',
            device: 1,
            port: 2,
            rssi: 3,
            stat: 4,
            min_fields: 5,
        };
        let read = parse_line("\tDEV1\t1\t-40\t5.0", &layout).unwrap();
        assert_eq!(read.device, "DEV1");
        assert_eq!(read.port, "1");
        assert_eq!(read.sample.rssi, -40);

        let trailing = LineLayout {
            min_fields: 7,
            ..layout
        };
        let read = parse_line("x\tDEV1\t1\t-40\t5.0\t\t\r\n", &trailing).unwrap();
        assert_eq!(read.device, "DEV1");
        assert_eq!(read.sample.stat, 5.0);
    }

    #[test]
    fn test_reads_yields_one_item_per_line() {
        let input = "a~a~a~a~a~a~D~1~-40~a~a~5.0\nshort\na~a~a~a~a~a~D~1~-70~a~a~3.0\n";
        let layout = LineLayout::default();
        let items: Vec<_> = reads(Cursor::new(input), &layout)
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(items.len(), 3);
        assert!(items[0].is_some());
        assert!(items[1].is_none());
        assert!(items[2].is_some());
    }

    #[test]
    fn test_reads_invalid_utf8_is_error() {
        let bytes: &[u8] = &[0xFF, 0xFE, b'\n'];
        let layout = LineLayout::default();
        let first = reads(Cursor::new(bytes), &layout).next().unwrap();
        assert!(first.is_err());
    }
}
