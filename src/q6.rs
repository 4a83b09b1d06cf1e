use crate::data::Data;
use crate::rank::top_by_count;
use ahash::HashMap;
use memchr::memmem::Finder;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::info;

/// Top 5 driver zip codes over unit/person rows (joined on CRASH_ID) where
/// either contributing factor mentions ALCOHOL. Rows without a zip are dropped.
pub fn top_5_zip_codes_with_alcohols_as_factor(db: &Data) -> Vec<String> {
    let units = &db.units;
    let pp = &db.primary_person;
    let alcohol = Finder::new("ALCOHOL");

    let start = Instant::now();

    let mentions = |factor: &Option<String>| {
        factor
            .as_ref()
            .is_some_and(|factor| alcohol.find(factor.as_bytes()).is_some())
    };

    // crash -> alcohol-related units
    let mut u_m: FxHashMap<i64, usize> = FxHashMap::default();
    for ((crash_id, factor_1), factor_2) in units
        .crash_id
        .iter()
        .zip(units.contrib_factor_1.iter())
        .zip(units.contrib_factor_2.iter())
    {
        if let Some(crash_id) = crash_id
            && (mentions(factor_1) || mentions(factor_2))
        {
            *u_m.entry(*crash_id).or_default() += 1;
        }
    }

    let mut counts: HashMap<&str, usize> = HashMap::default();
    for (crash_id, zip) in pp.crash_id.iter().zip(pp.zip.iter()) {
        if let (Some(crash_id), Some(zip)) = (crash_id, zip)
            && let Some(n) = u_m.get(crash_id)
        {
            *counts.entry(zip.as_str()).or_default() += n;
        }
    }

    let res = top_by_count(counts, 5)
        .into_iter()
        .map(|(zip, _)| zip.to_string())
        .collect();

    info!(query = "q6", elapsed = ?start.elapsed(), "top zip codes with alcohol as factor");
    res
}

#[cfg(test)]
mod test_q6 {
    use super::*;
    use crate::data::{PrimaryPerson, Units};

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_q6() {
        let db = Data {
            units: Units {
                crash_id: vec![Some(1), Some(2), Some(3), Some(4), Some(5)],
                contrib_factor_1: vec![
                    s("UNDER INFLUENCE - ALCOHOL"),
                    None,
                    s("SPEEDING"),
                    s("HAD BEEN DRINKING ALCOHOL"),
                    s("UNDER INFLUENCE - ALCOHOL"),
                ],
                contrib_factor_2: vec![None, s("UNDER INFLUENCE - ALCOHOL"), None, None, None],
                ..Default::default()
            },
            primary_person: PrimaryPerson {
                crash_id: vec![Some(1), Some(1), Some(2), Some(3), Some(4), Some(5)],
                zip: vec![s("76010"), s("75001"), s("76010"), s("79901"), None, s("75001")],
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(
            top_5_zip_codes_with_alcohols_as_factor(&db),
            vec!["75001".to_string(), "76010".to_string()]
        );
    }

    #[test]
    fn at_most_five() {
        let n = 8;
        let db = Data {
            units: Units {
                crash_id: (0..n).map(Some).collect(),
                contrib_factor_1: vec![s("ALCOHOL"); n as usize],
                contrib_factor_2: vec![None; n as usize],
                ..Default::default()
            },
            primary_person: PrimaryPerson {
                crash_id: (0..n).map(Some).collect(),
                zip: (0..n).map(|i| Some(format!("7{i:04}"))).collect(),
                ..Default::default()
            },
            ..Default::default()
        };

        let res = top_5_zip_codes_with_alcohols_as_factor(&db);
        assert_eq!(res, vec!["70000", "70001", "70002", "70003", "70004"]);
    }

    #[test]
    fn no_alcohol_rows() {
        let db = Data {
            units: Units {
                crash_id: vec![Some(1)],
                contrib_factor_1: vec![s("FAILED TO YIELD")],
                contrib_factor_2: vec![None],
                ..Default::default()
            },
            primary_person: PrimaryPerson {
                crash_id: vec![Some(1)],
                zip: vec![s("76010")],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(top_5_zip_codes_with_alcohols_as_factor(&db).is_empty());
    }
}
