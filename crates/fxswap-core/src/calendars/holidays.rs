//! Holiday sets keyed by jurisdiction code.
//!
//! Holiday data arrives from outside the engine as a mapping from
//! jurisdiction code to a list of `{date, name, type}` records. Only the date
//! is used. Sets are immutable once loaded: load once, read many.
//!
//! # Example
//!
//! ```
//! use fxswap_core::calendars::{Calendar, HolidayCalendars};
//! use fxswap_core::types::Date;
//!
//! let json = r#"{
//!     "US": [{"date": "2025-07-04", "name": "Independence Day", "type": "public"}],
//!     "TH": [{"date": "2025-07-10", "name": "Asarnha Bucha", "type": "bank"}]
//! }"#;
//! let calendars = HolidayCalendars::from_json(json).unwrap();
//!
//! let joint = calendars.select(&["US", "TH"]);
//! assert!(!joint.is_business_day(Date::from_ymd(2025, 7, 4).unwrap()));
//! assert!(!joint.is_business_day(Date::from_ymd(2025, 7, 10).unwrap()));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// One holiday record as supplied by the calendar source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Holiday date in `YYYY-MM-DD` form.
    pub date: String,
    /// Display name, unused by the engine.
    #[serde(default)]
    pub name: Option<String>,
    /// Holiday category, unused by the engine.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// The non-business days of a single jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    code: String,
    dates: BTreeSet<Date>,
}

impl HolidaySet {
    /// Creates a holiday set for a jurisdiction code.
    pub fn new(code: impl Into<String>, dates: impl IntoIterator<Item = Date>) -> Self {
        Self {
            code: code.into(),
            dates: dates.into_iter().collect(),
        }
    }

    /// Builds a set from raw holiday records.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` for the first record whose date does
    /// not parse.
    pub fn from_records<'a>(
        code: impl Into<String>,
        records: impl IntoIterator<Item = &'a HolidayRecord>,
    ) -> CoreResult<Self> {
        let dates = records
            .into_iter()
            .map(|record| Date::parse(&record.date))
            .collect::<CoreResult<BTreeSet<_>>>()?;
        Ok(Self {
            code: code.into(),
            dates,
        })
    }

    /// Returns the jurisdiction code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the holiday dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied()
    }

    /// Returns the number of holidays in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the set holds no holidays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl Calendar for HolidaySet {
    fn name(&self) -> &str {
        &self.code
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }
}

/// Several jurisdictions observed together.
///
/// A date is a holiday if it is a holiday in ANY member set.
#[derive(Debug, Clone)]
pub struct JointCalendar<'a> {
    sets: Vec<&'a HolidaySet>,
    name: String,
}

impl<'a> JointCalendar<'a> {
    /// Creates a joint calendar from borrowed holiday sets.
    pub fn new(sets: Vec<&'a HolidaySet>) -> Self {
        let name = sets
            .iter()
            .map(|set| set.code())
            .collect::<Vec<_>>()
            .join("+");
        Self { sets, name }
    }

    /// Returns the jurisdiction codes in this calendar.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.iter().map(|set| set.code())
    }
}

impl Calendar for JointCalendar<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.sets.iter().any(|set| set.is_holiday(date))
    }
}

/// Registry of loaded holiday sets, keyed by jurisdiction code.
///
/// Used directly as a [`Calendar`], it observes every loaded jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendars {
    sets: BTreeMap<String, HolidaySet>,
}

impl HolidayCalendars {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a holiday set.
    #[must_use]
    pub fn with_set(mut self, set: HolidaySet) -> Self {
        self.sets.insert(set.code().to_string(), set);
        self
    }

    /// Loads holiday sets from the `{code: [{date, name, type}]}` JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CalendarError` if the JSON is malformed, or
    /// `CoreError::InvalidDate` if any holiday date does not parse.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: HashMap<String, Vec<HolidayRecord>> = serde_json::from_str(json)
            .map_err(|e| CoreError::calendar(format!("Failed to parse JSON: {e}")))?;
        Self::from_records(&raw)
    }

    /// Builds the registry from already-deserialized records.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if any holiday date does not parse.
    pub fn from_records(raw: &HashMap<String, Vec<HolidayRecord>>) -> CoreResult<Self> {
        let sets = raw
            .iter()
            .map(|(code, records)| {
                HolidaySet::from_records(code.clone(), records).map(|set| (code.clone(), set))
            })
            .collect::<CoreResult<BTreeMap<_, _>>>()?;
        Ok(Self { sets })
    }

    /// Returns the holiday set for a jurisdiction code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&HolidaySet> {
        self.sets.get(code)
    }

    /// Returns the loaded jurisdiction codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.keys().map(String::as_str)
    }

    /// Joins the named jurisdictions into one calendar.
    ///
    /// An empty selection means every loaded calendar. Codes that are not
    /// loaded are skipped: absent holiday data is treated as no holidays.
    pub fn select<S: AsRef<str>>(&self, codes: &[S]) -> JointCalendar<'_> {
        if codes.is_empty() {
            return self.all();
        }

        let sets = codes
            .iter()
            .filter_map(|code| {
                let code = code.as_ref();
                let set = self.sets.get(code);
                if set.is_none() {
                    warn!(code, "holiday calendar not loaded, treating as weekends only");
                }
                set
            })
            .collect();
        JointCalendar::new(sets)
    }

    /// Joins every loaded calendar.
    #[must_use]
    pub fn all(&self) -> JointCalendar<'_> {
        JointCalendar::new(self.sets.values().collect())
    }
}

impl Calendar for HolidayCalendars {
    fn name(&self) -> &str {
        "All Calendars"
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.sets.values().any(|set| set.is_holiday(date))
    }
}
