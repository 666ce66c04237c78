#![forbid(unsafe_code)]
//! # seqyield
//!
//! Yield summary for nanopore **sequencing_summary** files: read N50, total
//! gigabases, genome coverage, long-read coverage and coverage per quality bin,
//! reported as one tab-separated row.
//!
//! ## Highlights
//! - 📄 Plain text or `.gz` input, whitespace-delimited, header on the first line.
//! - 🧮 Reads are held in a polars `DataFrame`; quality bins are mask filters.
//! - 🧬 Coverage is always measured against [`GENOME_SIZE`] (3.3 Gb, human).
//! - 📚 Several files can be aggregated, reported one row each, or reported the
//!   old way (last file only), see [`report::ReportMode`].
//!
//! ## Examples
//! ```rust
//! let table = seqyield::ReadTable::new(
//!     vec![100, 200, 300, 400],
//!     vec![12.0, 15.0, 22.0, 31.0],
//! )?;
//! let row = seqyield::summarize(&table, "demo", seqyield::N50Mode::Standard)?;
//! assert_eq!(row.read_n50, 300);
//! assert_eq!(row.total_bases, 1000);
//! # Ok::<(), seqyield::SummaryError>(())
//! ```

pub mod error;
pub mod report;
pub mod seqio;
pub mod summary;

pub use error::SummaryError;
pub use report::{run_report, ReportMode, ReportOpts};
pub use summary::{compute_n50, summarize, N50Mode, ReadTable, SummaryRow, N50};

/// Read length column of a sequencing summary.
pub const LENGTH_COLUMN: &str = "sequence_length_template";

/// Mean read quality column of a sequencing summary.
pub const QSCORE_COLUMN: &str = "mean_qscore_template";

/// Reference genome size (bases) used for every coverage value.
pub const GENOME_SIZE: f64 = 3.3e9;

/// Mean-qscore thresholds reported as `q10` .. `q50`.
pub const QUALITY_BINS: [u32; 5] = [10, 20, 30, 40, 50];

/// Read-length thresholds for long-read coverage; the first one is the `100kb+` column.
pub const LONG_READ_THRESHOLDS: [u64; 6] = [100_000, 200_000, 300_000, 400_000, 500_000, 1_000_000];

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load one summary file and compute its row.
///
/// # Examples
/// ```no_run
/// let row = seqyield::summarize_file("sequencing_summary.txt.gz", "PAG12345").unwrap();
/// println!("{} N50={} cov={:.2}", row.sample_name, row.read_n50, row.coverage);
/// ```
pub fn summarize_file<P: AsRef<std::path::Path>>(path: P, sample_name: &str) -> error::Result<SummaryRow> {
    let table = seqio::load_table(path)?;
    summarize(&table, sample_name, N50Mode::Standard)
}
