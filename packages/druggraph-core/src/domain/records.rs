//! Builder input records
//!
//! Already-parsed source rows as handed over by ingestion. Field presence is
//! checked by serde; content cleaning is the ingestion layer's job.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the drug table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atccode: Option<String>,
}

impl DrugRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            atccode: None,
        }
    }
}

/// A publication or clinical trial row, with the journal it appeared in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub base_id: String,
    pub title: String,
    #[serde(deserialize_with = "record_date")]
    pub date: NaiveDate,
    pub journal: String,
}

impl DocumentRecord {
    pub fn new(
        base_id: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        journal: impl Into<String>,
    ) -> Self {
        Self {
            base_id: base_id.into(),
            title: title.into(),
            date,
            journal: journal.into(),
        }
    }
}

pub type PublicationRecord = DocumentRecord;
pub type ClinicalTrialRecord = DocumentRecord;

/// Slash dates are read month first; day first only when the month would be > 12
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%Y/%m/%d",
];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse the date spellings found in source files into a calendar date
///
/// Accepts `2020-01-01`, `02/01/2019` (month first, falling back to day
/// first for `25/05/2020`), `1 January 2020`,
/// `January 1, 2020`, `2020/01/01`, RFC 3339 timestamps and naive
/// timestamps. The time component is dropped.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn record_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_record_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {:?}", raw)))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
