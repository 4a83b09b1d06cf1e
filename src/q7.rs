use crate::data::{Data, Units};
use ahash::HashSet;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, info};

const NOT_A_DAMAGE_LEVEL: [&str; 3] = ["NA", "NO DAMAGE", "INVALID VALUE"];

// Damage scale codes compare as plain strings, as recorded.
fn above_damaged_4(scale: &Option<String>) -> bool {
    scale.as_deref().is_some_and(|scale| {
        scale > "DAMAGED 4" && !NOT_A_DAMAGE_LEVEL.contains(&scale)
    })
}

/// crash -> units with a damage level above 4 on either scale that carry
/// proof of liability insurance.
fn insured_heavy_damage(units: &Units) -> FxHashMap<i64, usize> {
    let mut u_m: FxHashMap<i64, usize> = FxHashMap::default();
    for (((crash_id, scale_1), scale_2), fin_resp) in units
        .crash_id
        .iter()
        .zip(units.damage_scale_1.iter())
        .zip(units.damage_scale_2.iter())
        .zip(units.fin_resp_type.iter())
    {
        if let (Some(crash_id), Some(fin_resp)) = (crash_id, fin_resp)
            && fin_resp == "PROOF OF LIABILITY INSURANCE"
            && (above_damaged_4(scale_1) || above_damaged_4(scale_2))
        {
            *u_m.entry(*crash_id).or_default() += 1;
        }
    }
    u_m
}

/// Crash ids of damage/unit rows (joined on CRASH_ID) with no damaged
/// property, a damage level above 4 and liability insurance. One id per
/// joined row, so a crash repeats once for every qualifying pair.
pub fn crash_ids_with_no_damage(db: &Data) -> Vec<i64> {
    let damages = &db.damages;

    let start = Instant::now();

    let u_m = insured_heavy_damage(&db.units);
    debug!(query = "q7", crashes = u_m.len(), "insured heavy damage crashes");

    let mut res = Vec::new();
    for (crash_id, property) in damages.crash_id.iter().zip(damages.damaged_property.iter()) {
        if let (Some(crash_id), Some(property)) = (crash_id, property)
            && property == "NONE"
            && let Some(n) = u_m.get(crash_id)
        {
            res.extend(std::iter::repeat_n(*crash_id, *n));
        }
    }

    info!(query = "q7", elapsed = ?start.elapsed(), rows = res.len(), "crash ids with no damage");
    res
}

/// `crash_ids_with_no_damage` with repeats removed, in first-seen order.
pub fn distinct_crash_ids_with_no_damage(db: &Data) -> Vec<i64> {
    first_seen(&crash_ids_with_no_damage(db))
}

pub fn first_seen(crash_ids: &[i64]) -> Vec<i64> {
    let mut seen: HashSet<i64> = HashSet::default();
    crash_ids
        .iter()
        .copied()
        .filter(|crash_id| seen.insert(*crash_id))
        .collect()
}

#[cfg(test)]
mod test_q7 {
    use super::*;
    use crate::data::Damages;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn db() -> Data {
        Data {
            damages: Damages {
                crash_id: vec![Some(1), Some(1), Some(2), Some(3), Some(4), Some(5)],
                damaged_property: vec![
                    s("NONE"),
                    s("NONE"),
                    s("FENCE"),
                    s("NONE"),
                    s("NONE"),
                    s("NONE"),
                ],
            },
            units: Units {
                crash_id: vec![Some(1), Some(2), Some(3), Some(4), Some(5)],
                damage_scale_1: vec![
                    s("DAMAGED 5"),
                    s("DAMAGED 7 HIGHEST"),
                    s("DAMAGED 4"),
                    s("NO DAMAGE"),
                    s("DAMAGED 2"),
                ],
                damage_scale_2: vec![
                    None,
                    None,
                    s("DAMAGED 6"),
                    s("NA"),
                    s("DAMAGED 6"),
                ],
                fin_resp_type: vec![
                    s("PROOF OF LIABILITY INSURANCE"),
                    s("PROOF OF LIABILITY INSURANCE"),
                    s("PROOF OF LIABILITY INSURANCE"),
                    s("PROOF OF LIABILITY INSURANCE"),
                    s("NA"),
                ],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_q7() {
        assert_eq!(crash_ids_with_no_damage(&db()), vec![1, 1, 3]);
    }

    #[test]
    fn test_q7_distinct() {
        assert_eq!(distinct_crash_ids_with_no_damage(&db()), vec![1, 3]);
    }

    #[test]
    fn no_qualifying_rows_is_empty() {
        let mut db = db();
        db.units.fin_resp_type = vec![s("NA"); 5];
        assert!(crash_ids_with_no_damage(&db).is_empty());
        assert!(distinct_crash_ids_with_no_damage(&db).is_empty());
    }

    #[test]
    fn damage_scale_compares_as_string() {
        assert!(above_damaged_4(&s("DAMAGED 5")));
        assert!(above_damaged_4(&s("DAMAGED 7 HIGHEST")));
        assert!(!above_damaged_4(&s("DAMAGED 4")));
        assert!(!above_damaged_4(&s("DAMAGED 1 MINIMUM")));
        assert!(!above_damaged_4(&s("NO DAMAGE")));
        assert!(!above_damaged_4(&s("INVALID VALUE")));
        assert!(!above_damaged_4(&s("NA")));
        assert!(!above_damaged_4(&None));
    }
}
