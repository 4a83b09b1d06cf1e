use polars::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{Config, TABLES};
use crate::error::LoadError;

/// The six crash relations as loaded from disk. Read-only after `load`.
pub struct CrashTables {
    pub charges: DataFrame,
    pub damages: DataFrame,
    pub endorse: DataFrame,
    pub primary_person: DataFrame,
    pub units: DataFrame,
    pub restrict: DataFrame,
}

/// Read `<dir>/<name><suffix>.csv`, header row and types inferred over the
/// whole file.
pub fn load_table(dir: &Path, name: &str, suffix: &str) -> Result<DataFrame, LoadError> {
    let path = dir.join(format!("{name}{suffix}.csv"));
    if !path.is_file() {
        return Err(LoadError::Missing {
            table: name.to_string(),
            path,
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.clone()))
        .and_then(|reader| reader.finish())
        .map_err(|source| LoadError::Unreadable {
            table: name.to_string(),
            path: path.clone(),
            source,
        })?;

    if df.height() == 0 {
        return Err(LoadError::Empty {
            table: name.to_string(),
            path,
        });
    }
    Ok(df)
}

impl CrashTables {
    pub fn load(config: &Config) -> Result<Self, LoadError> {
        let start = Instant::now();
        let [charges, damages, endorse, primary_person, units, restrict] = TABLES;

        let load = |name: &str| -> Result<DataFrame, LoadError> {
            let df = load_table(&config.input, name, &config.suffix)?;
            info!(table = name, rows = df.height(), columns = df.width(), "loaded");
            Ok(df)
        };

        let tables = CrashTables {
            charges: load(charges)?,
            damages: load(damages)?,
            endorse: load(endorse)?,
            primary_person: load(primary_person)?,
            units: load(units)?,
            restrict: load(restrict)?,
        };
        info!(elapsed = ?start.elapsed(), "all tables loaded");
        Ok(tables)
    }
}

// Charges(CRASH_ID, UNIT_NBR, PRSN_NBR, CHARGE, CITATION_NBR)

#[derive(Default)]
pub struct Charges {
    pub crash_id: Vec<Option<i64>>,
    pub charge: Vec<Option<String>>,
}

// Damages(CRASH_ID, DAMAGED_PROPERTY)

#[derive(Default)]
pub struct Damages {
    pub crash_id: Vec<Option<i64>>,
    pub damaged_property: Vec<Option<String>>,
}

// Primary_Person(CRASH_ID, UNIT_NBR, PRSN_NBR, PRSN_TYPE_ID, ..., PRSN_GNDR_ID,
//                PRSN_ETHNICITY_ID, DRVR_LIC_STATE_ID, DRVR_LIC_TYPE_ID, DRVR_ZIP, ...)

#[derive(Default)]
pub struct PrimaryPerson {
    pub crash_id: Vec<Option<i64>>,
    pub ethnicity: Vec<Option<String>>,
    pub lic_type: Vec<Option<String>>,
    pub zip: Vec<Option<String>>,
}

// Units(CRASH_ID, UNIT_NBR, ..., VEH_LIC_STATE_ID, VEH_COLOR_ID, VEH_MAKE_ID,
//       VEH_BODY_STYL_ID, FIN_RESP_TYPE_ID, VEH_DMAG_SCL_1_ID, VEH_DMAG_SCL_2_ID,
//       CONTRIB_FACTR_1_ID, CONTRIB_FACTR_2_ID, ..., TOT_INJRY_CNT, DEATH_CNT)

#[derive(Default)]
pub struct Units {
    pub crash_id: Vec<Option<i64>>,
    pub body_style: Vec<Option<String>>,
    pub make: Vec<Option<String>>,
    pub lic_state: Vec<Option<String>>,
    pub color: Vec<Option<String>>,
    pub fin_resp_type: Vec<Option<String>>,
    pub damage_scale_1: Vec<Option<String>>,
    pub damage_scale_2: Vec<Option<String>>,
    pub contrib_factor_1: Vec<Option<String>>,
    pub contrib_factor_2: Vec<Option<String>>,
}

/// Column vectors for the queries that join on CRASH_ID by hand.
#[derive(Default)]
pub struct Data {
    pub charges: Charges,
    pub damages: Damages,
    pub primary_person: PrimaryPerson,
    pub units: Units,
}

fn ints(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    Ok(df
        .column(name)?
        .cast(&DataType::Int64)?
        .i64()?
        .into_iter()
        .collect())
}

fn strings(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    Ok(df
        .column(name)?
        .cast(&DataType::String)?
        .str()?
        .into_iter()
        .map(|opt| opt.map(|s| s.to_string()))
        .collect())
}

impl Charges {
    pub fn new(df: &DataFrame) -> PolarsResult<Self> {
        Ok(Charges {
            crash_id: ints(df, "CRASH_ID")?,
            charge: strings(df, "CHARGE")?,
        })
    }
}

impl Damages {
    pub fn new(df: &DataFrame) -> PolarsResult<Self> {
        Ok(Damages {
            crash_id: ints(df, "CRASH_ID")?,
            damaged_property: strings(df, "DAMAGED_PROPERTY")?,
        })
    }
}

impl PrimaryPerson {
    pub fn new(df: &DataFrame) -> PolarsResult<Self> {
        Ok(PrimaryPerson {
            crash_id: ints(df, "CRASH_ID")?,
            ethnicity: strings(df, "PRSN_ETHNICITY_ID")?,
            lic_type: strings(df, "DRVR_LIC_TYPE_ID")?,
            zip: strings(df, "DRVR_ZIP")?,
        })
    }
}

impl Units {
    pub fn new(df: &DataFrame) -> PolarsResult<Self> {
        Ok(Units {
            crash_id: ints(df, "CRASH_ID")?,
            body_style: strings(df, "VEH_BODY_STYL_ID")?,
            make: strings(df, "VEH_MAKE_ID")?,
            lic_state: strings(df, "VEH_LIC_STATE_ID")?,
            color: strings(df, "VEH_COLOR_ID")?,
            fin_resp_type: strings(df, "FIN_RESP_TYPE_ID")?,
            damage_scale_1: strings(df, "VEH_DMAG_SCL_1_ID")?,
            damage_scale_2: strings(df, "VEH_DMAG_SCL_2_ID")?,
            contrib_factor_1: strings(df, "CONTRIB_FACTR_1_ID")?,
            contrib_factor_2: strings(df, "CONTRIB_FACTR_2_ID")?,
        })
    }
}

impl Data {
    pub fn new(tables: &CrashTables) -> PolarsResult<Self> {
        let start = Instant::now();
        let data = Data {
            charges: Charges::new(&tables.charges)?,
            damages: Damages::new(&tables.damages)?,
            primary_person: PrimaryPerson::new(&tables.primary_person)?,
            units: Units::new(&tables.units)?,
        };
        debug!(elapsed = ?start.elapsed(), "extracted join columns");
        Ok(data)
    }
}
