use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, Result};

const ENGLISH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SPANISH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Calendar month of an observation.
///
/// Observations are keyed by calendar month only: a `2019-01` reading and a
/// `2021-01` reading both fall under January, so per-month queries aggregate
/// across every year in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const FEBRUARY: Month = Month(2);
    pub const MARCH: Month = Month(3);
    pub const APRIL: Month = Month(4);
    pub const MAY: Month = Month(5);
    pub const JUNE: Month = Month(6);
    pub const JULY: Month = Month(7);
    pub const AUGUST: Month = Month(8);
    pub const SEPTEMBER: Month = Month(9);
    pub const OCTOBER: Month = Month(10);
    pub const NOVEMBER: Month = Month(11);
    pub const DECEMBER: Month = Month(12);

    pub fn from_number(number: u32) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(Month(number as u8))
        } else {
            None
        }
    }

    /// Month number, 1 = January
    pub fn number(&self) -> u32 {
        self.0 as u32
    }

    pub fn name(&self) -> &'static str {
        ENGLISH_NAMES[self.index()]
    }

    pub fn spanish_name(&self) -> &'static str {
        SPANISH_NAMES[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }

    /// Normalize a dataset or user label into a calendar month.
    ///
    /// Accepts Spanish and English names (full or abbreviated), month numbers
    /// and year-month keys such as `2020-01` or `2020/01`.
    pub fn parse_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        Self::from_spanish(trimmed)
            .or_else(|| trimmed.parse::<chrono::Month>().ok().map(Self::from_chrono))
            .or_else(|| Self::from_numeric(trimmed))
            .or_else(|| Self::from_year_month(trimmed))
            .ok_or_else(|| DashboardError::UnknownMonth(label.to_string()))
    }

    fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    fn from_chrono(month: chrono::Month) -> Self {
        Month(month.number_from_month() as u8)
    }

    fn from_spanish(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        if let Some(pos) = SPANISH_NAMES.iter().position(|name| *name == lower) {
            return Some(Month(pos as u8 + 1));
        }

        let number = match lower.trim_end_matches('.') {
            "ene" => 1,
            "abr" => 4,
            "ago" => 8,
            "sept" | "set" | "setiembre" => 9,
            "dic" => 12,
            _ => return None,
        };
        Some(Month(number))
    }

    fn from_numeric(label: &str) -> Option<Self> {
        label.parse::<u32>().ok().and_then(Self::from_number)
    }

    fn from_year_month(label: &str) -> Option<Self> {
        let mut parts = label.split(['-', '/']);
        let year = parts.next()?;
        let month = parts.next()?;

        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        Self::from_numeric(month)
    }
}

impl FromStr for Month {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Month::parse_label(s)
    }
}

impl TryFrom<u32> for Month {
    type Error = DashboardError;

    fn try_from(number: u32) -> Result<Self> {
        Month::from_number(number).ok_or_else(|| DashboardError::UnknownMonth(number.to_string()))
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> u32 {
        month.number()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
