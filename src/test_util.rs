use crate::data::CrashTables;
use polars::prelude::DataFrame;

/// Builds a `CrashTables` where every relation a test does not set is empty.
#[derive(Default)]
pub struct TablesBuilder {
    charges: Option<DataFrame>,
    damages: Option<DataFrame>,
    primary_person: Option<DataFrame>,
    units: Option<DataFrame>,
}

pub fn tables() -> TablesBuilder {
    TablesBuilder::default()
}

impl TablesBuilder {
    pub fn charges(mut self, df: DataFrame) -> Self {
        self.charges = Some(df);
        self
    }

    pub fn damages(mut self, df: DataFrame) -> Self {
        self.damages = Some(df);
        self
    }

    pub fn primary_person(mut self, df: DataFrame) -> Self {
        self.primary_person = Some(df);
        self
    }

    pub fn units(mut self, df: DataFrame) -> Self {
        self.units = Some(df);
        self
    }

    pub fn build(self) -> CrashTables {
        CrashTables {
            charges: self.charges.unwrap_or_else(DataFrame::empty),
            damages: self.damages.unwrap_or_else(DataFrame::empty),
            endorse: DataFrame::empty(),
            primary_person: self.primary_person.unwrap_or_else(DataFrame::empty),
            units: self.units.unwrap_or_else(DataFrame::empty),
            restrict: DataFrame::empty(),
        }
    }
}
