//! Yield statistics over a table of reads.
//!
//! A [`ReadTable`] is a two-column polars `DataFrame`
//! (`sequence_length_template: u64`, `mean_qscore_template: f64`). Everything
//! else in this module is a pure function of that table: quality-bin filtering,
//! base totals, N50 and coverage against [`GENOME_SIZE`](crate::GENOME_SIZE).
//!
//! # Examples
//! ```
//! use seqyield::summary::{compute_n50, coverage, N50Mode};
//! let n50 = compute_n50(&[100, 200, 300, 400], N50Mode::Standard);
//! assert_eq!((n50.length, n50.index), (300, 1));
//! assert_eq!(coverage(3_300_000_000), 1.0);
//! ```
use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::Result;
use crate::{GENOME_SIZE, LENGTH_COLUMN, LONG_READ_THRESHOLDS, QSCORE_COLUMN, QUALITY_BINS};

/// Reads loaded from one (or several stacked) sequencing summaries.
#[derive(Clone, Debug)]
pub struct ReadTable {
    df: DataFrame,
}

impl ReadTable {
    /// Build a table from parallel length / qscore vectors.
    pub fn new(lengths: Vec<u64>, qscores: Vec<f64>) -> Result<Self> {
        let df = df!(
            LENGTH_COLUMN => lengths,
            QSCORE_COLUMN => qscores,
        )?;
        Ok(Self { df })
    }

    /// Table with no reads.
    pub fn empty() -> Result<Self> {
        Self::new(Vec::new(), Vec::new())
    }

    /// Number of reads.
    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Read lengths in table order.
    pub fn lengths(&self) -> Result<Vec<u64>> {
        let ca = self.df.column(LENGTH_COLUMN)?.u64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    /// Mean qscores in table order.
    pub fn qscores(&self) -> Result<Vec<f64>> {
        let ca = self.df.column(QSCORE_COLUMN)?.f64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    /// Rows whose `mean_qscore_template >= threshold`. NaN scores never pass.
    pub fn filter_by_quality(&self, threshold: f64) -> Result<ReadTable> {
        // IEEE comparison; polars' own kernels order NaN above every value
        let mask: BooleanChunked = self.df.column(QSCORE_COLUMN)?.f64()?
            .into_iter()
            .map(|q| matches!(q, Some(q) if q >= threshold))
            .collect();
        Ok(ReadTable { df: self.df.filter(&mask)? })
    }

    /// Sum of `sequence_length_template` over every row.
    pub fn total_bases(&self) -> Result<u64> {
        Ok(self.df.column(LENGTH_COLUMN)?.u64()?.sum().unwrap_or(0))
    }

    /// Append the rows of `other` below the rows of `self`.
    pub fn stack(&self, other: &ReadTable) -> Result<ReadTable> {
        Ok(ReadTable { df: self.df.vstack(&other.df)? })
    }
}

/// Round to two decimals like Python's `round(x, 2)`: the exact binary value
/// of `x` is rounded, ties to even, as `{:.2}` formatting does.
pub fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}

/// Genome-equivalents of `bases` against [`GENOME_SIZE`](crate::GENOME_SIZE), two decimals.
pub fn coverage(bases: u64) -> f64 {
    round2(bases as f64 / GENOME_SIZE)
}

/// Total in gigabases, two decimals.
pub fn gigabases(total: u64) -> f64 {
    round2(total as f64 / 1e9)
}

/// How the N50 read is picked once the running sum crosses half the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum N50Mode {
    /// Length of the read at which the running sum first reaches half the total.
    #[default]
    Standard,
    /// Length of the read *after* that one, as older reports printed it.
    /// Falls back to the qualifying read when it is the last one.
    Legacy,
}

/// N50 length and its 0-based position in the descending-sorted lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct N50 {
    pub length: u64,
    pub index: usize,
}

/// Compute the read-length N50.
///
/// Lengths are sorted descending and summed until the running total reaches
/// `total / 2`. An empty slice yields `N50 { length: 0, index: 0 }`.
pub fn compute_n50(lengths: &[u64], mode: N50Mode) -> N50 {
    let mut sorted = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let total: u64 = sorted.iter().sum();
    let target = total as f64 / 2.0;
    let mut acc = 0u64;
    let Some(qualifying) = sorted.iter().position(|&len| {
        acc += len;
        acc as f64 >= target
    }) else {
        return N50::default();
    };

    let index = match mode {
        N50Mode::Standard => qualifying,
        N50Mode::Legacy if qualifying + 1 < sorted.len() => qualifying + 1,
        N50Mode::Legacy => qualifying,
    };
    N50 { length: sorted[index], index }
}

/// Coverage contributed by reads of at least each threshold length.
pub fn long_read_coverage(lengths: &[u64], thresholds: &[u64]) -> BTreeMap<u64, f64> {
    thresholds
        .iter()
        .map(|&t| {
            let bases: u64 = lengths.iter().filter(|&&len| len >= t).sum();
            (t, coverage(bases))
        })
        .collect()
}

pub fn count_reads_at_least(lengths: &[u64], threshold: u64) -> usize {
    lengths.iter().filter(|&&len| len >= threshold).count()
}

/// One report line.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub sample_name: String,
    pub read_n50: u64,
    pub read_count: usize,
    pub total_bases: u64,
    pub gigabases: f64,
    pub coverage: f64,
    pub reads_over_100kb_coverage: f64,
    pub q10_coverage: f64,
    pub q20_coverage: f64,
    pub q30_coverage: f64,
    pub q40_coverage: f64,
    pub q50_coverage: f64,
    /// Coverage for every entry of [`LONG_READ_THRESHOLDS`](crate::LONG_READ_THRESHOLDS).
    pub long_read_coverage: BTreeMap<u64, f64>,
    /// Reads of 1 Mb or longer.
    pub reads_over_1mb: usize,
}

/// Compute every statistic of a [`SummaryRow`] for `table`.
pub fn summarize(table: &ReadTable, sample_name: &str, n50_mode: N50Mode) -> Result<SummaryRow> {
    let lengths = table.lengths()?;
    let total_bases = table.total_bases()?;

    let mut q_coverage = [0.0f64; QUALITY_BINS.len()];
    for (slot, bin) in q_coverage.iter_mut().zip(QUALITY_BINS) {
        *slot = coverage(table.filter_by_quality(f64::from(bin))?.total_bases()?);
    }
    let [q10_coverage, q20_coverage, q30_coverage, q40_coverage, q50_coverage] = q_coverage;

    let long_read_coverage = long_read_coverage(&lengths, &LONG_READ_THRESHOLDS);
    let reads_over_100kb_coverage = long_read_coverage.get(&100_000).copied().unwrap_or(0.0);

    Ok(SummaryRow {
        sample_name: sample_name.to_string(),
        read_n50: compute_n50(&lengths, n50_mode).length,
        read_count: table.len(),
        total_bases,
        gigabases: gigabases(total_bases),
        coverage: coverage(total_bases),
        reads_over_100kb_coverage,
        q10_coverage,
        q20_coverage,
        q30_coverage,
        q40_coverage,
        q50_coverage,
        long_read_coverage,
        reads_over_1mb: count_reads_at_least(&lengths, 1_000_000),
    })
}
