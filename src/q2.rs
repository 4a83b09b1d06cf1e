use crate::data::CrashTables;
use polars::prelude::*;
use std::time::Instant;
use tracing::info;

/// Number of units whose body style mentions MOTORCYCLE (case-sensitive).
pub fn two_wheeler_accidents(db: &CrashTables) -> Result<usize, PolarsError> {
    let start = Instant::now();

    let res = db
        .units
        .clone()
        .lazy()
        .filter(
            col("VEH_BODY_STYL_ID")
                .cast(DataType::String)
                .str()
                .contains_literal(lit("MOTORCYCLE")),
        )
        .select([col("VEH_BODY_STYL_ID")])
        .collect()?
        .height();

    info!(query = "q2", elapsed = ?start.elapsed(), "two wheeler accidents");
    Ok(res)
}
