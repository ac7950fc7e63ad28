//! Event assignment types
//!
//! Rows of the monthly event partitions, the month key that names a
//! partition, and the composite id that addresses one event in a month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Amount, DomainError, Employee, EmployeeId};

/// Date format used in event rows and composite ids
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// File extension of partition files
pub const PARTITION_EXTENSION: &str = "csv";

/// Column headers of a partition file, in order
pub const EVENT_COLUMNS: [&str; 7] = [
    "Event Name",
    "Date",
    "Amount Payable",
    "Employee ID",
    "Name",
    "Surname",
    "Contact",
];

/// Parse an event date (`YYYY-MM-DD`)
pub fn parse_event_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), EVENT_DATE_FORMAT).map_err(|_| {
        DomainError::malformed(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            value.trim()
        ))
    })
}

// =========================================================================
// MonthKey
// =========================================================================

/// Identifier of a month partition (`YYYYMM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        let invalid = || DomainError::validation(format!("'{}' is not a YYYYMM month", value));

        if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = value[..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[4..].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    /// Parse a partition file name such as `202401.csv`
    pub fn from_file_name(file_name: &str) -> Result<Self, DomainError> {
        let stem = file_name
            .strip_suffix(&format!(".{}", PARTITION_EXTENSION))
            .ok_or_else(|| {
                DomainError::validation(format!("'{}' is not a partition file", file_name))
            })?;
        Self::parse(stem)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// File name of the partition, e.g. `202401.csv`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self, PARTITION_EXTENSION)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =========================================================================
// EventId
// =========================================================================

/// Composite id of an event within a month: `{date}_{name}` with the
/// spaces of the name replaced by underscores.
///
/// Decoding splits on the first underscore and turns every remaining
/// underscore back into a space, so names that contained underscores come
/// back with spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId {
    pub date: NaiveDate,
    pub name: String,
}

impl EventId {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }

    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.date.format(EVENT_DATE_FORMAT),
            self.name.replace(' ', "_")
        )
    }

    pub fn decode(encoded: &str) -> Result<Self, DomainError> {
        let (date, name) = encoded
            .split_once('_')
            .ok_or_else(|| DomainError::malformed(format!("invalid event id '{}'", encoded)))?;

        Ok(Self {
            date: parse_event_date(date)?,
            name: name.replace('_', " ").trim().to_string(),
        })
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

// =========================================================================
// EventRow
// =========================================================================

/// One assignment of one employee to one event.
///
/// The employee fields are a snapshot taken when the row was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    #[serde(rename = "Event Name")]
    pub event_name: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Amount Payable")]
    pub amount_payable: Amount,
    #[serde(rename = "Employee ID")]
    pub employee_id: EmployeeId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

impl EventRow {
    /// Snapshot an employee into a new assignment row
    pub fn assign(event_name: &str, date: NaiveDate, amount_payable: Amount, employee: &Employee) -> Self {
        Self {
            event_name: event_name.to_string(),
            date,
            amount_payable,
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            surname: employee.surname.clone(),
            contact: employee.contact.to_string(),
        }
    }

    /// Whether this row belongs to the addressed event
    pub fn matches(&self, event: &EventId) -> bool {
        self.date == event.date && self.event_name.trim() == event.name
    }
}

/// One event of a month listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub name: String,
    pub date: NaiveDate,
    pub id: String,
    pub assignees: usize,
}

/// Identity fields of an assigned employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignee {
    pub id: EmployeeId,
    pub name: String,
    pub surname: String,
}

impl From<&EventRow> for Assignee {
    fn from(row: &EventRow) -> Self {
        Self {
            id: row.employee_id.clone(),
            name: row.name.clone(),
            surname: row.surname.clone(),
        }
    }
}
