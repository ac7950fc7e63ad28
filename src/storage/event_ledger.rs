//! Event Ledger
//!
//! Monthly partitions of event assignment rows, one CSV file per `YYYYMM`.
//! Appending keeps the existing bytes as they are, adds the new records and
//! rewrites the file under the partition's writer lock. Queries skip rows
//! they cannot read.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::event::EVENT_COLUMNS;
use crate::domain::{
    parse_event_date, Amount, Assignee, DomainError, Employee, EmployeeId, EventId, EventRow,
    EventSummary, MonthKey,
};

use super::codec::{decode_rows, decode_rows_lenient, encode_records, encode_rows};
use super::lock::{read_file, write_atomic};
use super::{FileLocks, StorageError};

// =========================================================================
// NewEvent
// =========================================================================

/// Validated input of an event creation
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub event_name: String,
    pub date: NaiveDate,
    pub amount: Amount,
    /// Trimmed, de-duplicated, in request order
    pub employee_ids: Vec<String>,
}

impl NewEvent {
    /// Validate raw input; nothing is written when this fails
    pub fn parse(
        event_name: &str,
        date: &str,
        amount: &str,
        employee_ids: &[String],
    ) -> Result<Self, DomainError> {
        let amount: Amount = amount.parse()?;

        let mut seen = HashSet::new();
        let employee_ids: Vec<String> = employee_ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect();

        let event_name = event_name.trim();
        if event_name.is_empty() || date.trim().is_empty() || employee_ids.is_empty() {
            return Err(DomainError::validation(
                "Complete all fields and assign at least one employee.",
            ));
        }

        Ok(Self {
            event_name: event_name.to_string(),
            date: parse_event_date(date)?,
            amount,
            employee_ids,
        })
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Outcome of an event creation
#[derive(Debug, Clone, PartialEq)]
pub struct AppendedEvent {
    pub partition: MonthKey,
    pub event_id: EventId,
    pub rows_saved: usize,
    /// Requested ids that matched no employee
    pub skipped_ids: Vec<String>,
    /// Whether this append created the partition file
    pub created_partition: bool,
}

// =========================================================================
// EventLedger
// =========================================================================

/// Month-partitioned event storage
#[derive(Debug, Clone)]
pub struct EventLedger {
    dir: PathBuf,
    locks: FileLocks,
}

impl EventLedger {
    /// Create a ledger whose partitions live in `dir`
    pub fn new(dir: impl Into<PathBuf>, locks: FileLocks) -> Self {
        Self {
            dir: dir.into(),
            locks,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn partition_path(&self, month: &MonthKey) -> PathBuf {
        self.dir.join(month.file_name())
    }

    pub async fn partition_exists(&self, month: &MonthKey) -> Result<bool, StorageError> {
        let path = self.partition_path(month);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }

    /// Decode a partition into any row type; `None` if it does not exist
    pub async fn read_rows<T: DeserializeOwned>(
        &self,
        month: &MonthKey,
    ) -> Result<Option<Vec<T>>, StorageError> {
        let path = self.partition_path(month);
        match read_file(&path).await? {
            Some(bytes) => decode_rows(&path, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Readable rows of a partition in file order; a missing partition has none
    pub async fn read_partition(&self, month: &MonthKey) -> Result<Vec<EventRow>, StorageError> {
        let path = self.partition_path(month);
        let Some(bytes) = read_file(&path).await? else {
            return Ok(Vec::new());
        };

        let (rows, skipped) = decode_rows_lenient(&path, &bytes)?;
        if skipped > 0 {
            tracing::warn!(partition = %month, skipped, "Partition has unreadable rows");
        }
        Ok(rows)
    }

    // =========================================================================
    // append_event
    // =========================================================================

    /// Assign every resolvable employee of `event` and append the rows to
    /// the event's month partition.
    ///
    /// `roster` is the current employee snapshot. Ids it does not contain
    /// are returned in `skipped_ids`; if none resolve, nothing is written.
    pub async fn append_event(
        &self,
        event: &NewEvent,
        roster: &[Employee],
    ) -> Result<AppendedEvent, StorageError> {
        let mut rows = Vec::with_capacity(event.employee_ids.len());
        let mut skipped_ids = Vec::new();

        for id in &event.employee_ids {
            match roster.iter().find(|employee| employee.id.as_str() == id) {
                Some(employee) => rows.push(EventRow::assign(
                    &event.event_name,
                    event.date,
                    event.amount,
                    employee,
                )),
                None => skipped_ids.push(id.clone()),
            }
        }

        if rows.is_empty() {
            return Err(DomainError::validation("None of the assigned employees exist.").into());
        }

        let partition = event.month();
        let rows_saved = rows.len();
        let created_partition = self.append_rows(&partition, rows).await?;

        Ok(AppendedEvent {
            partition,
            event_id: EventId::new(event.date, event.event_name.clone()),
            rows_saved,
            skipped_ids,
            created_partition,
        })
    }

    /// Append rows to a partition; returns true if the file was created
    pub async fn append_rows(
        &self,
        month: &MonthKey,
        rows: Vec<EventRow>,
    ) -> Result<bool, StorageError> {
        let path = self.partition_path(month);
        let _guard = self.locks.lock(&path).await;

        let existing = read_file(&path).await?.unwrap_or_default();
        let created = existing.is_empty();

        let bytes = if created {
            encode_rows(&path, &EVENT_COLUMNS, &rows)?
        } else {
            let mut bytes = existing;
            if bytes.last() != Some(&b'\n') {
                bytes.push(b'\n');
            }
            bytes.extend(encode_records(&path, &rows)?);
            bytes
        };
        write_atomic(&path, &bytes).await?;

        tracing::info!(partition = %month, appended = rows.len(), created, "Event rows saved");
        Ok(created)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Partition ids, newest first
    pub async fn list_months(&self) -> Result<Vec<MonthKey>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.dir, e)),
        };

        let mut months = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&self.dir, e))?
        {
            if let Some(month) = entry
                .file_name()
                .to_str()
                .and_then(|name| MonthKey::from_file_name(name).ok())
            {
                months.push(month);
            }
        }

        months.sort_by(|a, b| b.cmp(a));
        Ok(months)
    }

    /// Partition file names (`202401.csv`), newest first
    pub async fn list_partition_files(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .list_months()
            .await?
            .iter()
            .map(MonthKey::file_name)
            .collect())
    }

    /// Distinct (event name, date) pairs of a month, newest date first
    pub async fn list_events(&self, month: &MonthKey) -> Result<Vec<EventSummary>, StorageError> {
        let rows = self.read_partition(month).await?;

        let mut grouped: BTreeMap<(NaiveDate, String), usize> = BTreeMap::new();
        for row in &rows {
            *grouped.entry((row.date, row.event_name.clone())).or_default() += 1;
        }

        let mut events: Vec<EventSummary> = grouped
            .into_iter()
            .map(|((date, name), assignees)| EventSummary {
                id: EventId::new(date, name.clone()).encode(),
                name,
                date,
                assignees,
            })
            .collect();
        events.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.name.cmp(&b.name)));

        Ok(events)
    }

    /// Employees assigned to the event addressed by a composite id
    pub async fn list_assignees(
        &self,
        month: &MonthKey,
        event_id: &str,
    ) -> Result<Vec<Assignee>, StorageError> {
        let event = EventId::decode(event_id)?;
        let rows = self.read_partition(month).await?;

        Ok(rows
            .iter()
            .filter(|row| row.matches(&event))
            .map(Assignee::from)
            .collect())
    }

    /// First row assigning `employee_id` on `date`
    pub async fn find_assignment(
        &self,
        employee_id: &EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<EventRow>, StorageError> {
        let rows = self.read_partition(&MonthKey::from_date(date)).await?;
        Ok(rows
            .into_iter()
            .find(|row| &row.employee_id == employee_id && row.date == date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Contact;
    use tempfile::TempDir;

    fn ledger(dir: &TempDir) -> EventLedger {
        EventLedger::new(dir.path().join("events"), FileLocks::new())
    }

    fn employee(id: &str, surname: &str, name: &str) -> Employee {
        Employee::new(
            EmployeeId::parse(id).unwrap(),
            surname,
            name,
            Contact::parse("0821234567").unwrap(),
        )
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("1234567890123", "Doe", "Jane"),
            employee("9876543210987", "Adams", "Sam"),
        ]
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn new_event(name: &str, date: &str, amount: &str, employee_ids: &[&str]) -> NewEvent {
        NewEvent::parse(name, date, amount, &ids(employee_ids)).unwrap()
    }

    #[test]
    fn test_new_event_validation() {
        let missing_name = NewEvent::parse(" ", "2024-01-05", "10", &ids(&["1234567890123"]));
        assert!(matches!(missing_name, Err(DomainError::Validation(_))));

        let no_employees = NewEvent::parse("Fair", "2024-01-05", "10", &ids(&[" "]));
        assert!(matches!(no_employees, Err(DomainError::Validation(_))));

        let bad_amount = NewEvent::parse("Fair", "2024-01-05", "ten", &ids(&["1234567890123"]));
        assert!(matches!(bad_amount, Err(DomainError::MalformedData(_))));

        let bad_date = NewEvent::parse("Fair", "13-2024-01", "10", &ids(&["1234567890123"]));
        assert!(matches!(bad_date, Err(DomainError::MalformedData(_))));

        let huge = NewEvent::parse("Fair", "2024-01-05", "1000000000000.01", &ids(&["1234567890123"]));
        assert!(matches!(huge, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_new_event_dedupes_ids() {
        let event = new_event("Fair", "2024-01-05", "10", &["1234567890123", " 1234567890123 "]);
        assert_eq!(event.employee_ids, ids(&["1234567890123"]));
    }

    #[tokio::test]
    async fn test_amount_stored_with_two_decimals() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let event = new_event("Fair", "2024-01-05", "100", &["1234567890123"]);
        let outcome = ledger.append_event(&event, &roster()).await.unwrap();

        assert!(outcome.created_partition);
        let text = std::fs::read_to_string(ledger.partition_path(&outcome.partition)).unwrap();
        assert_eq!(
            text,
            "Event Name,Date,Amount Payable,Employee ID,Name,Surname,Contact\n\
             Fair,2024-01-05,100.00,1234567890123,Jane,Doe,0821234567\n"
        );
    }

    #[tokio::test]
    async fn test_same_month_appends_to_one_partition() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let first = new_event("Fair", "2024-01-05", "100", &["1234567890123"]);
        let second = new_event("Gala", "2024-01-20", "80.5", &["1234567890123", "9876543210987"]);
        ledger.append_event(&first, &roster()).await.unwrap();
        let outcome = ledger.append_event(&second, &roster()).await.unwrap();

        assert!(!outcome.created_partition);
        assert_eq!(ledger.list_months().await.unwrap(), vec![MonthKey::parse("202401").unwrap()]);
        assert_eq!(ledger.read_partition(&outcome.partition).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_reported() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let event = new_event("Fair", "2024-01-05", "10", &["1234567890123", "5555555555555"]);
        let outcome = ledger.append_event(&event, &roster()).await.unwrap();

        assert_eq!(outcome.rows_saved, 1);
        assert_eq!(outcome.skipped_ids, ids(&["5555555555555"]));
    }

    #[tokio::test]
    async fn test_no_resolved_ids_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let event = new_event("Fair", "2024-01-05", "10", &["5555555555555"]);
        let err = ledger.append_event(&event, &roster()).await.unwrap_err();

        assert!(matches!(err, StorageError::Domain(DomainError::Validation(_))));
        assert!(!ledger.partition_exists(&event.month()).await.unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_is_independent_of_later_edits() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let event = new_event("Fair", "2024-01-05", "10", &["1234567890123"]);
        ledger.append_event(&event, &roster()).await.unwrap();

        // Employee renamed afterwards; the stored row keeps the old name
        let renamed = vec![employee("1234567890123", "Smith", "Janet")];
        let later = new_event("Gala", "2024-01-06", "10", &["1234567890123"]);
        ledger.append_event(&later, &renamed).await.unwrap();

        let rows = ledger.read_partition(&event.month()).await.unwrap();
        assert_eq!(rows[0].surname, "Doe");
        assert_eq!(rows[1].surname, "Smith");
    }

    #[tokio::test]
    async fn test_list_months_sorted_descending() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        for date in ["2023-12-24", "2024-02-01", "2024-01-05"] {
            let event = new_event("Shift", date, "10", &["1234567890123"]);
            ledger.append_event(&event, &roster()).await.unwrap();
        }
        std::fs::write(ledger.dir().join("notes.txt"), "ignore me").unwrap();
        std::fs::write(ledger.dir().join("backup.csv"), "ignore me").unwrap();

        let months: Vec<String> = ledger
            .list_months()
            .await
            .unwrap()
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["202402", "202401", "202312"]);
        assert_eq!(
            ledger.list_partition_files().await.unwrap(),
            vec!["202402.csv", "202401.csv", "202312.csv"]
        );
    }

    #[tokio::test]
    async fn test_list_months_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(ledger(&dir).list_months().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_events_newest_first() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        for (name, date) in [("Fair", "2024-01-05"), ("Gala Night", "2024-01-20"), ("Market", "2024-01-12")] {
            let event = new_event(name, date, "10", &["1234567890123", "9876543210987"]);
            ledger.append_event(&event, &roster()).await.unwrap();
        }

        let events = ledger.list_events(&MonthKey::parse("202401").unwrap()).await.unwrap();
        let listed: Vec<(&str, usize)> = events.iter().map(|e| (e.id.as_str(), e.assignees)).collect();
        assert_eq!(
            listed,
            vec![
                ("2024-01-20_Gala_Night", 2),
                ("2024-01-12_Market", 2),
                ("2024-01-05_Fair", 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_assignees_round_trips_event_id() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let gala = new_event("Gala Night", "2024-01-20", "10", &["1234567890123", "9876543210987"]);
        let fair = new_event("Fair", "2024-01-20", "10", &["1234567890123"]);
        ledger.append_event(&gala, &roster()).await.unwrap();
        ledger.append_event(&fair, &roster()).await.unwrap();

        let month = MonthKey::parse("202401").unwrap();
        let events = ledger.list_events(&month).await.unwrap();
        let gala_id = &events.iter().find(|e| e.name == "Gala Night").unwrap().id;

        let decoded = EventId::decode(gala_id).unwrap();
        assert_eq!(decoded.name, "Gala Night");
        assert_eq!(decoded.date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());

        let assignees = ledger.list_assignees(&month, gala_id).await.unwrap();
        let surnames: Vec<&str> = assignees.iter().map(|a| a.surname.as_str()).collect();
        assert_eq!(surnames, vec!["Doe", "Adams"]);
    }

    #[tokio::test]
    async fn test_list_assignees_trims_stored_whitespace() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        std::fs::create_dir_all(ledger.dir()).unwrap();
        std::fs::write(
            ledger.dir().join("202401.csv"),
            "Event Name,Date,Amount Payable,Employee ID,Name,Surname,Contact\n\
             Gala Night , 2024-01-20 ,10.00, 1234567890123 ,Jane,Doe,0821234567\n",
        )
        .unwrap();

        let month = MonthKey::parse("202401").unwrap();
        let assignees = ledger.list_assignees(&month, "2024-01-20_Gala_Night").await.unwrap();
        assert_eq!(assignees.len(), 1);
        assert_eq!(assignees[0].id.as_str(), "1234567890123");
    }

    const BAD_DATE_ROW: &str = "Fair,2024/01/03,5,1234567890123,Jane,Doe,0821234567\n";

    fn write_partition_with_bad_row(ledger: &EventLedger) -> String {
        let text = format!(
            "Event Name,Date,Amount Payable,Employee ID,Name,Surname,Contact\n\
             {}Gala Night,2024-01-20,10.00,1234567890123,Jane,Doe,0821234567",
            BAD_DATE_ROW
        );
        std::fs::create_dir_all(ledger.dir()).unwrap();
        std::fs::write(ledger.dir().join("202401.csv"), &text).unwrap();
        text
    }

    #[tokio::test]
    async fn test_queries_skip_unreadable_rows() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        write_partition_with_bad_row(&ledger);
        let month = MonthKey::parse("202401").unwrap();

        let events = ledger.list_events(&month).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "2024-01-20_Gala_Night");

        let assignees = ledger.list_assignees(&month, "2024-01-20_Gala_Night").await.unwrap();
        assert_eq!(assignees.len(), 1);

        let id = EmployeeId::parse("1234567890123").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert!(ledger.find_assignment(&id, date).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_append_keeps_unreadable_rows_verbatim() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        let before = write_partition_with_bad_row(&ledger);

        let event = new_event("Market", "2024-01-12", "7", &["9876543210987"]);
        let outcome = ledger.append_event(&event, &roster()).await.unwrap();
        assert!(!outcome.created_partition);

        let after = std::fs::read_to_string(ledger.partition_path(&outcome.partition)).unwrap();
        assert_eq!(
            after,
            format!("{}\nMarket,2024-01-12,7.00,9876543210987,Sam,Adams,0821234567\n", before)
        );
        assert!(after.contains(BAD_DATE_ROW));
        assert_eq!(ledger.read_partition(&outcome.partition).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_assignment() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        let event = new_event("Fair", "2024-01-05", "42", &["1234567890123"]);
        ledger.append_event(&event, &roster()).await.unwrap();

        let id = EmployeeId::parse("1234567890123").unwrap();
        let found = ledger.find_assignment(&id, event.date).await.unwrap().unwrap();
        assert_eq!(found.event_name, "Fair");
        assert_eq!(found.amount_payable.to_string(), "42.00");

        let other_day = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert!(ledger.find_assignment(&id, other_day).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_lose_no_rows() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        let roster = roster();

        let tasks: Vec<_> = (1..=16)
            .map(|day| {
                let ledger = ledger.clone();
                let roster = roster.clone();
                tokio::spawn(async move {
                    let date = format!("2024-03-{:02}", day);
                    let event = NewEvent::parse(
                        "Shift",
                        &date,
                        "10",
                        &["1234567890123".to_string(), "9876543210987".to_string()],
                    )
                    .unwrap();
                    ledger.append_event(&event, &roster).await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let rows = ledger.read_partition(&MonthKey::parse("202403").unwrap()).await.unwrap();
        assert_eq!(rows.len(), 32);
    }
}
