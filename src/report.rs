//! Turning one or more summary files into report rows, and writing them.
//!
//! [`ReportOpts`] carries everything a run needs; [`run_report`] loads the
//! inputs, computes a [`SummaryRow`] per [`ReportMode`] and writes the
//! tab-separated report.
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::seqio;
use crate::summary::{self, N50Mode, ReadTable, SummaryRow};
use crate::LONG_READ_THRESHOLDS;

/// Base report columns.
pub const HEADER: [&str; 10] = [
    "Sample", "read_N50", "Gb", "coverage", "100kb+", "q10", "q20", "q30", "q40", "q50",
];

/// Columns appended with `--extended`.
pub const EXTENDED_HEADER: [&str; 6] = ["200kb+", "300kb+", "400kb+", "500kb+", "1Mb+", "1Mb_reads"];

/// How several input files map onto report rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportMode {
    /// Stack every file into one table; one row.
    #[default]
    #[value(alias = "all")]
    Aggregate,
    /// One row per input file.
    #[value(alias = "each")]
    PerFile,
    /// Every file is loaded, only the last one is reported.
    #[value(name = "last", alias = "last-file-wins")]
    LastFileWins,
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Aggregate => "aggregate",
            Self::PerFile => "per-file",
            Self::LastFileWins => "last",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportOpts {
    pub files: Vec<PathBuf>,
    /// Explicit sample name; derived from the file names when absent.
    pub name: Option<String>,
    pub mode: ReportMode,
    pub n50_mode: N50Mode,
    /// Append the [`EXTENDED_HEADER`] columns.
    pub extended: bool,
}

/// Sample label derived from a file name: `run1.txt.gz` -> `run1`.
pub fn sample_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = strip_suffix_ignore_case(&name, ".gz");
    let name = strip_suffix_ignore_case(name, ".txt");
    strip_suffix_ignore_case(name, ".tsv").to_string()
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> &'a str {
    if s.len() > suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    {
        &s[..s.len() - suffix.len()]
    } else {
        s
    }
}

fn joined_stems(files: &[PathBuf]) -> String {
    files.iter().map(|p| sample_stem(p)).collect::<Vec<_>>().join(",")
}

/// Load inputs and compute the rows for `opts.mode`.
pub fn build_rows(opts: &ReportOpts) -> Result<Vec<SummaryRow>> {
    match opts.mode {
        ReportMode::Aggregate => {
            let mut table = ReadTable::empty()?;
            for file in &opts.files {
                table = table.stack(&seqio::load_table(file)?)?;
            }
            let name = opts.name.clone().unwrap_or_else(|| joined_stems(&opts.files));
            Ok(vec![summary::summarize(&table, &name, opts.n50_mode)?])
        }
        ReportMode::PerFile => opts
            .files
            .iter()
            .map(|file| {
                let table = seqio::load_table(file)?;
                let stem = sample_stem(file);
                let name = match &opts.name {
                    Some(n) => format!("{n}:{stem}"),
                    None => stem,
                };
                summary::summarize(&table, &name, opts.n50_mode)
            })
            .collect(),
        ReportMode::LastFileWins => {
            let mut last = ReadTable::empty()?;
            for file in &opts.files {
                last = seqio::load_table(file)?;
            }
            let name = opts.name.clone().unwrap_or_else(|| joined_stems(&opts.files));
            Ok(vec![summary::summarize(&last, &name, opts.n50_mode)?])
        }
    }
}

/// Format a row as report fields, in [`HEADER`] (+ [`EXTENDED_HEADER`]) order.
pub fn row_fields(row: &SummaryRow, extended: bool) -> Vec<String> {
    let mut fields = vec![
        row.sample_name.clone(),
        row.read_n50.to_string(),
        format!("{:.2}", row.gigabases),
        format!("{:.2}", row.coverage),
        format!("{:.2}", row.reads_over_100kb_coverage),
        format!("{:.2}", row.q10_coverage),
        format!("{:.2}", row.q20_coverage),
        format!("{:.2}", row.q30_coverage),
        format!("{:.2}", row.q40_coverage),
        format!("{:.2}", row.q50_coverage),
    ];
    if extended {
        for t in &LONG_READ_THRESHOLDS[1..] {
            let c = row.long_read_coverage.get(t).copied().unwrap_or(0.0);
            fields.push(format!("{c:.2}"));
        }
        fields.push(row.reads_over_1mb.to_string());
    }
    fields
}

/// Write the header and `rows` as tab-separated text.
pub fn write_report<W: Write>(rows: &[SummaryRow], extended: bool, out: W) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .flexible(false)
        .from_writer(out);

    let mut header: Vec<&str> = HEADER.to_vec();
    if extended {
        header.extend_from_slice(&EXTENDED_HEADER);
    }
    w.write_record(&header)?;
    for row in rows {
        w.write_record(row_fields(row, extended))?;
    }
    w.flush()?;
    Ok(())
}

/// Build the rows for `opts` and write them to `out`.
pub fn run_report<W: Write>(opts: &ReportOpts, out: W) -> Result<Vec<SummaryRow>> {
    let rows = build_rows(opts)?;
    for row in &rows {
        info!(
            "{}: {} reads, {} bases, N50 {}",
            row.sample_name, row.read_count, row.total_bases, row.read_n50
        );
    }
    write_report(&rows, opts.extended, out)?;
    Ok(rows)
}
