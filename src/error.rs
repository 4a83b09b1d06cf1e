use polars::prelude::PolarsError;
use std::path::PathBuf;

/// Failure to bring one of the input relations into memory. Any of these
/// aborts the run: no query can proceed without its inputs.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("table `{table}` not found at {}", path.display())]
    Missing { table: String, path: PathBuf },

    #[error("failed to read table `{table}` from {}: {source}", path.display())]
    Unreadable {
        table: String,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("table `{table}` at {} has no rows", path.display())]
    Empty { table: String, path: PathBuf },
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// A query that reports a single "top" value found nothing to rank.
    #[error("query `{query}` produced no rows")]
    EmptyResult { query: &'static str },
}
