use crate::data::{CrashTables, Data};
use crate::error::QueryError;
use crate::{q1, q2, q3, q4, q5, q6, q7, q8};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QueryId {
    MaleAccidents = 1,
    TwoWheelers,
    FemaleAccidentState,
    InjuryMakes,
    EthnicityPerBodyStyle,
    AlcoholZipCodes,
    NoDamageCrashIds,
    SpeedingMakes,
}

impl QueryId {
    pub const ALL: [QueryId; 8] = [
        QueryId::MaleAccidents,
        QueryId::TwoWheelers,
        QueryId::FemaleAccidentState,
        QueryId::InjuryMakes,
        QueryId::EthnicityPerBodyStyle,
        QueryId::AlcoholZipCodes,
        QueryId::NoDamageCrashIds,
        QueryId::SpeedingMakes,
    ];

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            QueryId::MaleAccidents => {
                "Number of crashes (accidents) in which number of persons killed are male"
            }
            QueryId::TwoWheelers => "No. of two wheelers booked for crashes",
            QueryId::FemaleAccidentState => "State with highest female accidents",
            QueryId::InjuryMakes => {
                "Top 5th to 15th VEH_MAKE_IDs that contribute to a largest number of injuries including death"
            }
            QueryId::EthnicityPerBodyStyle => {
                "Top ethnic user group of each unique body style that was involved in crashes"
            }
            QueryId::AlcoholZipCodes => {
                "Top 5 Zip Codes with the highest number crashes with alcohols as the contributing factor to a crash"
            }
            QueryId::NoDamageCrashIds => {
                "Distinct Crash IDs where No Damaged Property was observed and Damage Level (VEH_DMAG_SCL~) is above 4 and car avails Insurance"
            }
            QueryId::SpeedingMakes => {
                "Top 5 Vehicle Makes/Brands where drivers are charged with speeding related offences, has licensed Drivers, uses top 10 used vehicle colours and has car licensed with the Top 25 states with highest number of offences"
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Answer {
    Count(usize),
    /// `None` when no rows qualified; `Some(None)` when the top group has no value.
    Top(Option<Option<String>>),
    List(Vec<String>),
    Pairs(Vec<(String, String)>),
    /// Ranked values where `None` is the group with no recorded value.
    Ranked(Vec<Option<String>>),
    CrashIds { distinct: Vec<i64>, rows: usize },
}

pub struct Report {
    pub answers: Vec<(QueryId, Answer)>,
}

impl Report {
    /// Run the selected queries in order. An empty top-value result is
    /// reported as absent, any other failure stops the run.
    pub fn run(tables: &CrashTables, data: &Data, ids: &[QueryId]) -> Result<Self, QueryError> {
        let mut answers = Vec::with_capacity(ids.len());
        for &id in ids {
            let answer = match id {
                QueryId::MaleAccidents => Answer::Count(q1::male_accidents(tables)?),
                QueryId::TwoWheelers => Answer::Count(q2::two_wheeler_accidents(tables)?),
                QueryId::FemaleAccidentState => {
                    match q3::highest_female_accident_state(tables) {
                        Ok(state) => Answer::Top(Some(state)),
                        Err(QueryError::EmptyResult { .. }) => Answer::Top(None),
                        Err(err) => return Err(err),
                    }
                }
                QueryId::InjuryMakes => {
                    Answer::List(q4::top_vehicle_contributing_to_injuries(tables)?)
                }
                QueryId::EthnicityPerBodyStyle => {
                    Answer::Pairs(q5::top_ethnic_group_per_body_style(data))
                }
                QueryId::AlcoholZipCodes => {
                    Answer::List(q6::top_5_zip_codes_with_alcohols_as_factor(data))
                }
                QueryId::NoDamageCrashIds => {
                    let rows = q7::crash_ids_with_no_damage(data);
                    Answer::CrashIds {
                        distinct: q7::first_seen(&rows),
                        rows: rows.len(),
                    }
                }
                QueryId::SpeedingMakes => Answer::Ranked(q8::top_5_vehicle_brand(data)),
            };
            info!(query = id.number(), "done");
            answers.push((id, answer));
        }
        Ok(Report { answers })
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Count(n) => write!(f, "{n}"),
            Answer::Top(Some(Some(value))) => write!(f, "{value}"),
            Answer::Top(Some(None)) => write!(f, "(not recorded)"),
            Answer::Top(None) => write!(f, "(no result)"),
            Answer::List(values) => write!(f, "{}", values.join(",")),
            Answer::Ranked(values) => {
                let values: Vec<&str> = values
                    .iter()
                    .map(|value| value.as_deref().unwrap_or("(not recorded)"))
                    .collect();
                write!(f, "{}", values.join(","))
            }
            Answer::Pairs(pairs) => {
                writeln!(f, "VEH_BODY_STYL_ID | PRSN_ETHNICITY_ID")?;
                for (i, (style, ethnicity)) in pairs.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{style} | {ethnicity}")?;
                }
                Ok(())
            }
            Answer::CrashIds { distinct, rows } => {
                let ids: Vec<String> = distinct.iter().map(|id| id.to_string()).collect();
                write!(f, "{}\n({} distinct, {} matching rows)", ids.join(","), distinct.len(), rows)
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, answer)) in self.answers.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            writeln!(f, "{}. {}:", id.number(), id.title())?;
            write!(f, "{answer}")?;
        }
        Ok(())
    }
}
