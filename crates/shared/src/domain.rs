use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Metadata for one PDF file known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub name: String,
    #[serde(rename = "createdOn", deserialize_with = "deserialize_created_on")]
    pub created_on: DateTime<Utc>,
    pub size: u64,
}

impl DocumentRecord {
    pub fn new(name: impl Into<String>, created_on: DateTime<Utc>, size: u64) -> Self {
        Self {
            name: name.into(),
            created_on,
            size,
        }
    }

    /// Stable identity used when rendering lists of records.
    pub fn render_key(&self) -> &str {
        &self.name
    }
}

/// Offset-less timestamps are taken as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO-8601 timestamp with or without a UTC offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_created_on<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid createdOn timestamp '{raw}'")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Date,
    Size,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Date, SortKey::Size];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Size => "size",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "date" | "created" | "created_on" => Ok(SortKey::Date),
            "size" => Ok(SortKey::Size),
            other => Err(ValidationError::UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn deserializes_backend_record_with_camel_case_timestamp() {
        let raw = r#"{"name":"scan-01.pdf","createdOn":"2021-03-03T16:05:06Z","size":2048}"#;
        let record: DocumentRecord = serde_json::from_str(raw).expect("record");
        assert_eq!(record.name, "scan-01.pdf");
        assert_eq!(
            record.created_on,
            Utc.with_ymd_and_hms(2021, 3, 3, 16, 5, 6).unwrap()
        );
        assert_eq!(record.size, 2048);
        assert_eq!(record.render_key(), "scan-01.pdf");
    }

    #[test]
    fn accepts_timestamps_without_offset_as_utc() {
        let raw = r#"[
            {"name":"a.pdf","createdOn":"2021-03-03T16:05:06+02:00","size":1},
            {"name":"b.pdf","createdOn":"2021-03-04T10:00:00","size":2},
            {"name":"c.pdf","createdOn":"2021-03-05T10:00:00.1234567","size":3}
        ]"#;
        let records: Vec<DocumentRecord> = serde_json::from_str(raw).expect("records");
        assert_eq!(
            records[0].created_on,
            Utc.with_ymd_and_hms(2021, 3, 3, 14, 5, 6).unwrap()
        );
        assert_eq!(
            records[1].created_on,
            Utc.with_ymd_and_hms(2021, 3, 4, 10, 0, 0).unwrap()
        );
        assert_eq!(
            records[2].created_on,
            Utc.with_ymd_and_hms(2021, 3, 5, 10, 0, 0).unwrap()
                + chrono::Duration::nanoseconds(123_456_700)
        );
        assert_eq!(
            parse_timestamp("2021-03-04 10:00:00"),
            Some(Utc.with_ymd_and_hms(2021, 3, 4, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        let raw = r#"{"name":"a.pdf","createdOn":"last tuesday","size":1}"#;
        let err = serde_json::from_str::<DocumentRecord>(raw).expect_err("bad timestamp");
        assert!(err.to_string().contains("invalid createdOn timestamp"), "{err}");
        assert_eq!(parse_timestamp("2021-03-04"), None);
    }

    #[test]
    fn parses_sort_keys_case_insensitively() {
        assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!(" date ".parse::<SortKey>().unwrap(), SortKey::Date);
        assert_eq!("size".parse::<SortKey>().unwrap(), SortKey::Size);
        assert!(matches!(
            "color".parse::<SortKey>(),
            Err(ValidationError::UnknownSortKey(key)) if key == "color"
        ));
    }
}
