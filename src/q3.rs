use crate::data::CrashTables;
use crate::error::QueryError;
use polars::prelude::*;
use std::time::Instant;
use tracing::{info, warn};

/// License state with the most FEMALE person records.
///
/// `Err(EmptyResult)` when there are no female records at all; `Ok(None)` when
/// the winning group is the one without a recorded state.
pub fn highest_female_accident_state(db: &CrashTables) -> Result<Option<String>, QueryError> {
    let start = Instant::now();

    let top = db
        .primary_person
        .clone()
        .lazy()
        .filter(col("PRSN_GNDR_ID").eq(lit("FEMALE")))
        .group_by([col("DRVR_LIC_STATE_ID").cast(DataType::String)])
        .agg([len().alias("count")])
        .sort(
            ["count", "DRVR_LIC_STATE_ID"],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(1)
        .collect()?;

    info!(query = "q3", elapsed = ?start.elapsed(), "highest female accident state");

    if top.height() == 0 {
        warn!(query = "q3", "no female records");
        return Err(QueryError::EmptyResult { query: "q3" });
    }
    Ok(top
        .column("DRVR_LIC_STATE_ID")?
        .str()?
        .get(0)
        .map(|s| s.to_string()))
}

#[cfg(test)]
mod test_q3 {
    use super::*;
    use crate::test_util::tables;

    #[test]
    fn test_q3() -> Result<(), QueryError> {
        let db = tables()
            .primary_person(df!(
                "PRSN_GNDR_ID" => ["FEMALE", "FEMALE", "MALE", "MALE", "FEMALE"],
                "DRVR_LIC_STATE_ID" => ["Texas", "Oklahoma", "Oklahoma", "Oklahoma", "Texas"],
            )?)
            .build();
        assert_eq!(highest_female_accident_state(&db)?, Some("Texas".to_string()));
        Ok(())
    }

    #[test]
    fn tie_goes_to_first_state_alphabetically() -> Result<(), QueryError> {
        let db = tables()
            .primary_person(df!(
                "PRSN_GNDR_ID" => ["FEMALE", "FEMALE"],
                "DRVR_LIC_STATE_ID" => ["Texas", "Arizona"],
            )?)
            .build();
        assert_eq!(highest_female_accident_state(&db)?, Some("Arizona".to_string()));
        Ok(())
    }

    #[test]
    fn missing_state_wins() -> Result<(), QueryError> {
        let db = tables()
            .primary_person(df!(
                "PRSN_GNDR_ID" => ["FEMALE", "FEMALE", "FEMALE"],
                "DRVR_LIC_STATE_ID" => [None, None, Some("Texas")],
            )?)
            .build();
        assert_eq!(highest_female_accident_state(&db)?, None);
        Ok(())
    }

    #[test]
    fn no_female_records() -> Result<(), PolarsError> {
        let db = tables()
            .primary_person(df!(
                "PRSN_GNDR_ID" => ["MALE"],
                "DRVR_LIC_STATE_ID" => ["Texas"],
            )?)
            .build();
        assert!(matches!(
            highest_female_accident_state(&db),
            Err(QueryError::EmptyResult { query: "q3" })
        ));
        Ok(())
    }
}
