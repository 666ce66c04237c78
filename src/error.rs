//! Error type shared by the loader, the computation and the report writer.
//!
//! Every failure is fatal for the run; the binary wraps these in `anyhow` and
//! exits non-zero.
use std::io;
use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading a sequencing summary or computing its report.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A required column is absent from the header (or there is no header at all).
    #[error("missing required column `{column}`")]
    MissingColumn { column: &'static str },

    /// The file could not be opened, read, or decompressed.
    #[error("failed to read {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data row could not be interpreted.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Table(#[from] PolarsError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = SummaryError> = std::result::Result<T, E>;
