use clap::Parser;
use std::env;
use std::path::PathBuf;

use crate::report::QueryId;

/// Names of the six input relations, in load order.
pub const TABLES: [&str; 6] = [
    "Charges",
    "Damages",
    "Endorse",
    "Primary_Person",
    "Units",
    "Restrict",
];

#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Traffic crash analysis over the Charges/Damages/Endorse/Primary_Person/Units/Restrict tables"
)]
pub struct Config {
    /// Directory holding the input CSV files
    #[arg(long, env = "CRASH_INPUT_DIR", default_value = "./data")]
    pub input: PathBuf,

    /// File name suffix between the table name and `.csv`
    #[arg(long, default_value = "_use")]
    pub suffix: String,

    /// Size of the polars thread pool (defaults to all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Run only the given query (1-8); may be repeated
    #[arg(long = "query", value_parser = clap::value_parser!(u8).range(1..=8))]
    pub queries: Vec<u8>,
}

impl Config {
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.input.join(format!("{table}{}.csv", self.suffix))
    }

    /// Selected queries in run order; all eight when none were requested.
    pub fn selected(&self) -> Vec<QueryId> {
        let mut ids: Vec<QueryId> = if self.queries.is_empty() {
            QueryId::ALL.to_vec()
        } else {
            self.queries.iter().filter_map(|n| QueryId::from_number(*n)).collect()
        };
        ids.sort();
        ids.dedup();
        ids
    }

    /// Size the polars pool. Must run before the first polars operation,
    /// the pool is built lazily on first use and is process-wide.
    pub fn apply_threads(&self) {
        if let Some(threads) = self.threads {
            unsafe {
                env::set_var("POLARS_MAX_THREADS", threads.to_string());
            }
        }
    }
}
