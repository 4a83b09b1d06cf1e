use crate::data::{Data, Units};
use crate::rank::top_by_count;
use ahash::{HashMap, HashSet};
use memchr::memmem::Finder;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, info};

const LICENSED: [&str; 2] = ["DRIVER LICENSE", "COMMERCIAL DRIVER LIC."];

/// The 25 most frequent unit license states.
///
/// Only values that do not parse as an integer are ranked, missing values
/// included. That keeps state codes and drops numeric placeholders; a missing
/// state can take a slot but never matches a unit later.
fn top_25_states(units: &Units) -> HashSet<&str> {
    let mut counts: HashMap<Option<&str>, usize> = HashMap::default();
    for state in units.lic_state.iter() {
        let state = state.as_deref();
        if state.is_none_or(|state| state.trim().parse::<i32>().is_err()) {
            *counts.entry(state).or_default() += 1;
        }
    }
    top_by_count(counts, 25)
        .into_iter()
        .filter_map(|(state, _)| state)
        .collect()
}

/// The 10 most frequent vehicle colors other than NA.
fn top_10_colors(units: &Units) -> HashSet<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::default();
    for color in units.color.iter().flatten() {
        if color != "NA" {
            *counts.entry(color.as_str()).or_default() += 1;
        }
    }
    top_by_count(counts, 10)
        .into_iter()
        .map(|(color, _)| color)
        .collect()
}

/// Top 5 vehicle makes over charge/person/unit rows (joined on CRASH_ID)
/// where the charge mentions SPEED, the driver holds a regular or commercial
/// license, and the unit has a top-10 color and a top-25 license state.
///
/// Units without a recorded make are ranked as one group, shown as `None`.
pub fn top_5_vehicle_brand(db: &Data) -> Vec<Option<String>> {
    let charges = &db.charges;
    let pp = &db.primary_person;
    let units = &db.units;
    let speed = Finder::new("SPEED");

    let start = Instant::now();

    let states = top_25_states(units);
    let colors = top_10_colors(units);
    debug!(query = "q8", states = states.len(), colors = colors.len(), "eligibility sets");

    // crash -> speeding charges
    let mut c_m: FxHashMap<i64, usize> = FxHashMap::default();
    for (crash_id, charge) in charges.crash_id.iter().zip(charges.charge.iter()) {
        if let (Some(crash_id), Some(charge)) = (crash_id, charge)
            && speed.find(charge.as_bytes()).is_some()
        {
            *c_m.entry(*crash_id).or_default() += 1;
        }
    }

    // crash -> licensed drivers
    let mut pp_m: FxHashMap<i64, usize> = FxHashMap::default();
    for (crash_id, lic_type) in pp.crash_id.iter().zip(pp.lic_type.iter()) {
        if let (Some(crash_id), Some(lic_type)) = (crash_id, lic_type)
            && LICENSED.contains(&lic_type.as_str())
        {
            *pp_m.entry(*crash_id).or_default() += 1;
        }
    }

    let mut counts: HashMap<Option<&str>, usize> = HashMap::default();
    for (((crash_id, make), color), state) in units
        .crash_id
        .iter()
        .zip(units.make.iter())
        .zip(units.color.iter())
        .zip(units.lic_state.iter())
    {
        if let (Some(crash_id), Some(color), Some(state)) = (crash_id, color, state)
            && colors.contains(color.as_str())
            && states.contains(state.as_str())
            && let (Some(n_charges), Some(n_drivers)) = (c_m.get(crash_id), pp_m.get(crash_id))
        {
            *counts.entry(make.as_deref()).or_default() += n_charges * n_drivers;
        }
    }

    let res = top_by_count(counts, 5)
        .into_iter()
        .map(|(make, _)| make.map(|make| make.to_string()))
        .collect();

    info!(query = "q8", elapsed = ?start.elapsed(), "top vehicle brands");
    res
}
