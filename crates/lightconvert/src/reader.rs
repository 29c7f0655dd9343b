//! Raw file readers
//!
//! - delimited text with any separator, including multi-byte ones such as `::`
//! - quoted CSV with a header row (metadata side tables, MovieLens 20M/32M)
//! - JSON-lines, plain or gzip-compressed, one object per line
//!
//! JSON-lines readers never fail on a bad record: the line is logged and
//! skipped, and the skip count is returned next to the parsed records.

use flate2::read::MultiGzDecoder;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::table::Table;

/// Character encoding of a delimited text file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1, one byte per character (older MovieLens item files)
    Latin1,
}

impl TextEncoding {
    fn decode(self, bytes: Vec<u8>, path: &Path) -> Result<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| {
                ConvertError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} is not valid UTF-8: {}", path.display(), e),
                ))
            }),
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConvertError::FileNotFound(path.to_path_buf()),
        _ => ConvertError::Io(e),
    })
}

/// Read a header-less delimited file split on `separator`
///
/// Blank lines are dropped and a trailing `\r` is removed from every line.
/// No quoting is recognised: MovieLens `.dat`, `u.data` and `u.item` files
/// never quote.
pub fn read_delimited(path: &Path, separator: &str, encoding: TextEncoding) -> Result<Table> {
    let mut bytes = Vec::new();
    open(path)?.read_to_end(&mut bytes)?;
    let content = encoding.decode(bytes, path)?;

    let mut table = Table::new();
    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        table.push_row(line.split(separator).map(str::to_string).collect());
    }

    debug!(
        path = %path.display(),
        rows = table.num_rows(),
        separator = %separator.escape_debug(),
        "Read delimited file"
    );
    Ok(table)
}

/// A CSV file split into its header row and data rows
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub table: Table,
}

/// Read a comma-separated UTF-8 file whose first line is a header
pub fn read_csv_with_header(path: &Path) -> Result<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(open(path)?));

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut table = Table::new();
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect());
    }

    debug!(path = %path.display(), rows = table.num_rows(), "Read CSV file");
    Ok(CsvTable { headers, table })
}

/// Parsed JSON-lines records plus how many lines were rejected
#[derive(Debug, Default)]
pub struct JsonLines {
    pub records: Vec<Map<String, Value>>,
    pub skipped: usize,
}

/// Read a plain JSON-lines file
pub fn read_json_lines(path: &Path) -> Result<JsonLines> {
    parse_json_lines(BufReader::new(open(path)?), path)
}

/// Read a gzip-compressed JSON-lines file
pub fn read_gz_json_lines(path: &Path) -> Result<JsonLines> {
    let decoder = MultiGzDecoder::new(BufReader::new(open(path)?));
    parse_json_lines(BufReader::new(decoder), path)
}

/// Parse one JSON object per line from `reader`
///
/// Blank lines are ignored. Lines that are not valid UTF-8, not valid JSON,
/// or valid JSON but not an object are logged and skipped. I/O failures of
/// the underlying reader (including gzip corruption) are returned.
pub fn parse_json_lines<R: BufRead>(mut reader: R, source: &Path) -> Result<JsonLines> {
    let mut out = JsonLines::default();
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(path = %source.display(), line = line_number, "Skipping line with invalid UTF-8");
            out.skipped += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Map<String, Value>>(line) {
            Ok(record) => out.records.push(record),
            Err(e) => {
                warn!(path = %source.display(), line = line_number, error = %e, "Skipping malformed JSON line");
                out.skipped += 1;
            },
        }
    }

    debug!(
        path = %source.display(),
        records = out.records.len(),
        skipped = out.skipped,
        "Read JSON-lines file"
    );
    Ok(out)
}

/// Render a JSON value as an output cell
///
/// Missing and `null` become `""`, strings are written without quotes,
/// numbers and booleans use their JSON spelling, arrays and objects are
/// written as compact JSON.
pub fn json_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
