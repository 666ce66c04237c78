//! Loading of **sequencing_summary** tables (plain text or `.gz`).
//!
//! ### Format
//! - First non-blank line is the header; columns are split on any whitespace.
//! - Only `sequence_length_template` and `mean_qscore_template` are kept; all
//!   other columns are ignored.
//! - Compression is chosen from the path: a `.gz` suffix selects a
//!   multi-member gzip decoder (`flate2`), anything else is read as text.
//!
//! ### Errors
//! Opening, reading and decompressing failures become
//! [`SummaryError::InputRead`]; malformed rows become [`SummaryError::Parse`].
//! The file handle lives only inside [`load_table`] and is closed on every
//! return path.
//!
//! ### Example
//! ```no_run
//! let table = seqyield::seqio::load_table("sequencing_summary.txt.gz").unwrap();
//! println!("{} reads", table.len());
//! ```
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::error::{Result, SummaryError};
use crate::summary::ReadTable;
use crate::{LENGTH_COLUMN, QSCORE_COLUMN};

/// Input compression detected from path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression { Plain, Gzip }

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gzip,
            _ => Compression::Plain,
        }
    }
}

/// Open `path` as a buffered line reader, decompressing if needed.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| SummaryError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match Compression::from_path(path) {
        Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        Compression::Plain => Box::new(BufReader::new(file)),
    })
}

/// Read and parse one summary file into a [`ReadTable`].
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<ReadTable> {
    let path = path.as_ref();
    let reader = open_input(path)?;
    let table = read_table(reader, path)?;
    debug!(
        "loaded {} reads from {} ({:?})",
        table.len(),
        path.display(),
        Compression::from_path(path)
    );
    Ok(table)
}

/// Parse a whitespace-delimited table from any reader.
///
/// `path` is only used to label errors.
pub fn read_table<R: BufRead>(reader: R, path: &Path) -> Result<ReadTable> {
    let mut columns: Option<(usize, usize)> = None;
    let mut lengths = Vec::new();
    let mut qscores = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| SummaryError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let lineno = i + 1;

        let Some((len_idx, q_idx)) = columns else {
            columns = Some((
                column_index(&fields, LENGTH_COLUMN)?,
                column_index(&fields, QSCORE_COLUMN)?,
            ));
            continue;
        };

        let needed = len_idx.max(q_idx) + 1;
        if fields.len() < needed {
            return Err(parse_error(
                path,
                lineno,
                format!("expected at least {needed} fields, found {}", fields.len()),
            ));
        }
        let length = parse_length(fields[len_idx])
            .ok_or_else(|| parse_error(path, lineno, format!("invalid {LENGTH_COLUMN} `{}`", fields[len_idx])))?;
        let qscore = fields[q_idx]
            .parse::<f64>()
            .map_err(|_| parse_error(path, lineno, format!("invalid {QSCORE_COLUMN} `{}`", fields[q_idx])))?;
        lengths.push(length);
        qscores.push(qscore);
    }

    if columns.is_none() {
        // no header at all: nothing to find the columns in
        return Err(SummaryError::MissingColumn { column: LENGTH_COLUMN });
    }
    ReadTable::new(lengths, qscores)
}

fn column_index(header: &[&str], column: &'static str) -> Result<usize> {
    header
        .iter()
        .position(|h| *h == column)
        .ok_or(SummaryError::MissingColumn { column })
}

/// Accept `1500` as well as integral floats such as `1500.0`.
fn parse_length(s: &str) -> Option<u64> {
    if let Ok(v) = s.parse::<u64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    // `u64::MAX as f64` is 2^64 itself, so the bound is exclusive
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then_some(f as u64)
}

fn parse_error(path: &Path, line: usize, message: String) -> SummaryError {
    SummaryError::Parse { path: path.to_path_buf(), line, message }
}
