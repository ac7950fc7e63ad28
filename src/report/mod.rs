//! Report Aggregator
//!
//! Read model over a month partition: rows sorted by a requested
//! dimension plus the total amount payable.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::{parse_event_date, Amount, DomainError, MonthKey};
use crate::storage::{EventLedger, StorageError};

/// Sort dimension of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportDimension {
    #[default]
    ByDate,
    ByEmployee,
    ByEvent,
}

impl ReportDimension {
    pub const ALL: [ReportDimension; 3] = [Self::ByDate, Self::ByEmployee, Self::ByEvent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByDate => "by-date",
            Self::ByEmployee => "by-employee",
            Self::ByEvent => "by-event",
        }
    }

    /// Suffix used in exported file names (`_by_date`)
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::ByDate => "_by_date",
            Self::ByEmployee => "_by_employee",
            Self::ByEvent => "_by_event",
        }
    }

    fn compare(&self, a: &ReportRow, b: &ReportRow) -> Ordering {
        match self {
            Self::ByDate => cmp_date(a.date, b.date),
            Self::ByEmployee => a
                .surname
                .cmp(&b.surname)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| cmp_date(a.date, b.date)),
            Self::ByEvent => a
                .event_name
                .cmp(&b.event_name)
                .then_with(|| cmp_date(a.date, b.date)),
        }
    }
}

impl fmt::Display for ReportDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportDimension {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown report dimension '{}'", s)))
    }
}

/// Undated rows sort after dated ones
fn cmp_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(parse_event_date(&raw).ok())
}

/// One row of a report; dates that do not parse are kept as `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename(deserialize = "Event Name"))]
    pub event_name: String,
    #[serde(rename(deserialize = "Date"), deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename(deserialize = "Amount Payable"))]
    pub amount_payable: Amount,
    #[serde(rename(deserialize = "Employee ID"))]
    pub employee_id: String,
    #[serde(rename(deserialize = "Name"))]
    pub name: String,
    #[serde(rename(deserialize = "Surname"))]
    pub surname: String,
    #[serde(rename(deserialize = "Contact"))]
    pub contact: String,
}

/// Sorted rows of one partition and their total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub month: MonthKey,
    pub dimension: ReportDimension,
    pub rows: Vec<ReportRow>,
    pub total: Amount,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds reports from the event ledger's partitions
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    ledger: EventLedger,
}

impl ReportAggregator {
    pub fn new(ledger: EventLedger) -> Self {
        Self { ledger }
    }

    /// Load, sort and total a partition; a missing partition yields an
    /// empty report
    pub async fn render_report(
        &self,
        month: &MonthKey,
        dimension: ReportDimension,
    ) -> Result<Report, StorageError> {
        let rows = self.ledger.read_rows(month).await.map_err(|e| match e {
            // A report is only as good as its amounts
            StorageError::Corrupt { path, message } => StorageError::Domain(
                DomainError::malformed(format!("{}: {}", path.display(), message)),
            ),
            other => other,
        })?;
        let mut rows: Vec<ReportRow> = match rows {
            Some(rows) => rows,
            None => {
                tracing::debug!(partition = %month, "No partition to report on");
                Vec::new()
            }
        };

        rows.sort_by(|a, b| dimension.compare(a, b));
        let total = Amount::total(rows.iter().map(|row| &row.amount_payable))
            .map_err(DomainError::from)?;

        Ok(Report {
            month: *month,
            dimension,
            rows,
            total,
        })
    }
}
