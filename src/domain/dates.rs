//! Free-form life dates

use chrono::{Datelike, NaiveDate};

use crate::domain::person::Person;

/// Shown when the birth date is unknown.
pub const UNKNOWN_BIRTH: &str = "??/??/????";
/// Shown when the death date is unknown.
pub const UNKNOWN_DEATH: &str = "----";

const DATE_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%Y-%m-%d", "%d/%m/%Y"];

/// A date string as authored, with whatever could be parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifeDate {
    Exact(NaiveDate),
    Year(i32),
    Raw(String),
}

impl LifeDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return LifeDate::Exact(date);
            }
        }
        if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(year) = raw.parse::<i32>() {
                return LifeDate::Year(year);
            }
        }
        LifeDate::Raw(raw.to_string())
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            LifeDate::Exact(date) => Some(date.year()),
            LifeDate::Year(year) => Some(*year),
            LifeDate::Raw(_) => None,
        }
    }
}

pub fn birth_label(raw: Option<&str>) -> &str {
    raw.filter(|s| !s.trim().is_empty()).unwrap_or(UNKNOWN_BIRTH)
}

pub fn death_label(raw: Option<&str>) -> &str {
    raw.filter(|s| !s.trim().is_empty()).unwrap_or(UNKNOWN_DEATH)
}

/// `"1845 - 1910"`, or `"1845 - "` while the death year is unknown.
pub fn lifespan(person: &Person) -> Option<String> {
    let born = person.birth_date.as_deref().map(LifeDate::parse)?.year()?;
    let died = person
        .death_date
        .as_deref()
        .map(LifeDate::parse)
        .and_then(|d| d.year());
    Some(match died {
        Some(died) => format!("{born} - {died}"),
        None => format!("{born} - "),
    })
}
