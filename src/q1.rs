use crate::data::CrashTables;
use polars::prelude::*;
use std::time::Instant;
use tracing::info;

/// Number of person records whose gender is MALE.
pub fn male_accidents(db: &CrashTables) -> Result<usize, PolarsError> {
    let start = Instant::now();

    let res = db
        .primary_person
        .clone()
        .lazy()
        .filter(col("PRSN_GNDR_ID").eq(lit("MALE")))
        .select([col("PRSN_GNDR_ID")])
        .collect()?
        .height();

    info!(query = "q1", elapsed = ?start.elapsed(), "male accidents");
    Ok(res)
}
