use crate::error::{FinanceError, Result};
use chrono::{Datelike, NaiveDate};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month key, rendered as `YYYY-MM`.
///
/// Ordering is chronological, so a sorted `Vec<YearMonth>` is a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::InvalidMonth(format!(
                "month {} out of range for year {}",
                month, year
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of year, 1 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based month of year, usable as an index into a 12-slot table.
    pub fn month0(&self) -> usize {
        (self.month - 1) as usize
    }

    /// Shifts by `months`, which may be negative. Years saturate at the
    /// bounds of `i32`.
    pub fn add_months(&self, months: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = total
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Self {
            year: year as i32,
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FinanceError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let start_str = format!("{}-01", s.trim());
        let date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
            FinanceError::InvalidMonth(format!("'{}'. Expected YYYY-MM", s))
        })?;
        Ok(Self::from_date(date))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for YearMonth {
    fn schema_name() -> String {
        "YearMonth".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            ..Default::default()
        };
        schema.string().pattern = Some(r"^\d{4}-\d{2}$".to_string());
        schema.into()
    }
}

/// First month included in a trailing window of `lookback_months` ending at `today`.
///
/// A lookback of 12 evaluated in 2024-06 starts at 2023-06, so the window
/// holds the current partial month plus the twelve before it.
pub fn lookback_start(today: NaiveDate, lookback_months: u32) -> YearMonth {
    let months = i32::try_from(lookback_months).unwrap_or(i32::MAX);
    YearMonth::from_date(today).add_months(-months)
}

pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
