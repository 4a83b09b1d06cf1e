use crate::data::Data;
use ahash::HashMap;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, info};

const EXCLUDED_BODY_STYLES: [&str; 4] = [
    "NA",
    "UNKNOWN",
    "NOT REPORTED",
    "OTHER  (EXPLAIN IN NARRATIVE)",
];
const EXCLUDED_ETHNICITIES: [&str; 2] = ["NA", "UNKNOWN"];

/// Most frequent ethnicity for each body style, over units joined with
/// persons on CRASH_ID. One `(body style, ethnicity)` pair per body style,
/// sorted by body style. Ties go to the alphabetically first ethnicity.
pub fn top_ethnic_group_per_body_style(db: &Data) -> Vec<(String, String)> {
    let units = &db.units;
    let pp = &db.primary_person;

    let start = Instant::now();

    // crash -> body style -> units
    let mut u_m: FxHashMap<i64, HashMap<&str, usize>> = FxHashMap::default();
    for (crash_id, style) in units.crash_id.iter().zip(units.body_style.iter()) {
        if let (Some(crash_id), Some(style)) = (crash_id, style)
            && !EXCLUDED_BODY_STYLES.contains(&style.as_str())
        {
            *u_m.entry(*crash_id)
                .or_default()
                .entry(style.as_str())
                .or_default() += 1;
        }
    }

    let mut counts: HashMap<(&str, &str), usize> = HashMap::default();
    for (crash_id, ethnicity) in pp.crash_id.iter().zip(pp.ethnicity.iter()) {
        if let (Some(crash_id), Some(ethnicity)) = (crash_id, ethnicity)
            && !EXCLUDED_ETHNICITIES.contains(&ethnicity.as_str())
            && let Some(styles) = u_m.get(crash_id)
        {
            for (style, n) in styles {
                *counts.entry((*style, ethnicity.as_str())).or_default() += n;
            }
        }
    }
    debug!(query = "q5", groups = counts.len(), "body style/ethnicity groups");

    let mut best: HashMap<&str, (&str, usize)> = HashMap::default();
    for ((style, ethnicity), n) in counts {
        best.entry(style)
            .and_modify(|top| {
                if n > top.1 || (n == top.1 && ethnicity < top.0) {
                    *top = (ethnicity, n);
                }
            })
            .or_insert((ethnicity, n));
    }

    let mut res: Vec<(String, String)> = best
        .into_iter()
        .map(|(style, (ethnicity, _))| (style.to_string(), ethnicity.to_string()))
        .collect();
    res.sort_unstable();

    info!(query = "q5", elapsed = ?start.elapsed(), "top ethnic group per body style");
    res
}
