//! Directory construction errors.

/// Errors that can occur while building a station directory.
///
/// Any of these abort the run: without a directory no journey can be
/// resolved.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The dataset isn't readable as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No usable rows were found
    #[error("station dataset contained no usable rows")]
    Empty,
}
