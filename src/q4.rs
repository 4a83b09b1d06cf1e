use crate::data::CrashTables;
use ahash::HashSet;
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Vehicle makes ranked 6th to 15th by injuries plus deaths.
///
/// The top 15 minus the top 5 as sets, in descending casualty order. A make
/// with no recorded casualty counts has no total and ranks after every make
/// that has one.
pub fn top_vehicle_contributing_to_injuries(db: &CrashTables) -> Result<Vec<String>, PolarsError> {
    let start = Instant::now();

    let ranked = db
        .units
        .clone()
        .lazy()
        .filter(col("VEH_MAKE_ID").cast(DataType::String).neq(lit("NA")))
        .with_column(
            (col("TOT_INJRY_CNT").cast(DataType::Int64) + col("DEATH_CNT").cast(DataType::Int64))
                .alias("TOT_CASUALTIES_CNT"),
        )
        .group_by([col("VEH_MAKE_ID").cast(DataType::String)])
        .agg([
            col("TOT_CASUALTIES_CNT").sum().alias("TOT_CASUALTIES_CNT_SUM"),
            col("TOT_CASUALTIES_CNT").count().alias("TOT_CASUALTIES_CNT_ROWS"),
        ])
        // polars sums an all-null group to 0; keep it null instead
        .with_column(
            when(col("TOT_CASUALTIES_CNT_ROWS").gt(lit(0)))
                .then(col("TOT_CASUALTIES_CNT_SUM"))
                .otherwise(lit(NULL))
                .alias("TOT_CASUALTIES_CNT_AGG"),
        )
        .sort(
            ["TOT_CASUALTIES_CNT_AGG", "VEH_MAKE_ID"],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_nulls_last(true),
        )
        .limit(15)
        .collect()?;

    let makes = ranked.column("VEH_MAKE_ID")?.str()?;
    let top_5: HashSet<&str> = makes.into_iter().take(5).flatten().collect();
    debug!(query = "q4", ranked = ranked.height(), "ranked makes");

    let res: Vec<String> = makes
        .into_iter()
        .flatten()
        .filter(|make| !top_5.contains(make))
        .map(|make| make.to_string())
        .collect();

    info!(query = "q4", elapsed = ?start.elapsed(), "top vehicles contributing to injuries");
    Ok(res)
}
