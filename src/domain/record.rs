use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::Identifier;

/// A single item in a group: an identifier, a numeric code and a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: Identifier,
    code: u64,
    date: NaiveDate,
}

impl Record {
    /// Creates a record from pre-validated parts.
    #[must_use]
    pub const fn new(id: Identifier, code: u64, date: NaiveDate) -> Self {
        Self { id, code, date }
    }

    /// The record's identifier.
    #[must_use]
    pub const fn id(&self) -> &Identifier {
        &self.id
    }

    /// The record's numeric code.
    #[must_use]
    pub const fn code(&self) -> u64 {
        self.code
    }

    /// The record's date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// A flat, serializable view of the record.
    #[must_use]
    pub fn summary(&self) -> RecordSummary<'_> {
        RecordSummary {
            id: self.id.as_str(),
            code: self.code,
            day: self.date.day(),
            month: self.date.month(),
            year: self.date.year(),
        }
    }
}

/// Formats as `<identifier> <code> <day> <month> <year>`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id,
            self.code,
            self.date.day(),
            self.date.month(),
            self.date.year()
        )
    }
}

/// Borrowed, serializable projection of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordSummary<'a> {
    /// Identifier text.
    pub id: &'a str,
    /// Numeric code.
    pub code: u64,
    /// Day of month (1-31).
    pub day: u32,
    /// Month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record::new(
            Identifier::try_from("Coral Denim").unwrap(),
            4_031_977,
            NaiveDate::from_ymd_opt(2014, 3, 7).unwrap(),
        )
    }

    #[test]
    fn display_is_unpadded_day_month_year() {
        assert_eq!(record().to_string(), "Coral Denim 4031977 7 3 2014");
    }

    #[test]
    fn summary_serializes_flat() {
        let json = serde_json::to_value(record().summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "Coral Denim",
                "code": 4_031_977,
                "day": 7,
                "month": 3,
                "year": 2014,
            })
        );
    }
}
