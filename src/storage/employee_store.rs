//! Employee Record Store
//!
//! Flat-file employee table keyed by ID number. Every mutation rewrites
//! the whole file under the file's writer lock.

use std::path::{Path, PathBuf};

use crate::domain::employee::EMPLOYEE_COLUMNS;
use crate::domain::{Contact, DomainError, Employee, EmployeeId};

use super::codec::{decode_rows, encode_rows};
use super::lock::{read_file, write_atomic};
use super::{FileLocks, StorageError};

/// Record store for employees
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    path: PathBuf,
    locks: FileLocks,
}

impl EmployeeStore {
    /// Create a store backed by the CSV file at `path`
    pub fn new(path: impl Into<PathBuf>, locks: FileLocks) -> Self {
        Self {
            path: path.into(),
            locks,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All employees in file order; a missing file is an empty store
    pub async fn snapshot(&self) -> Result<Vec<Employee>, StorageError> {
        match read_file(&self.path).await? {
            Some(bytes) => decode_rows(&self.path, &bytes),
            None => Ok(Vec::new()),
        }
    }

    /// All employees ordered by surname
    pub async fn list(&self) -> Result<Vec<Employee>, StorageError> {
        let mut employees = self.snapshot().await?;
        employees.sort_by(|a, b| a.surname.cmp(&b.surname));
        Ok(employees)
    }

    /// Look up an employee by ID number
    pub async fn find(&self, id: &str) -> Result<Option<Employee>, StorageError> {
        let id = id.trim();
        Ok(self
            .snapshot()
            .await?
            .into_iter()
            .find(|employee| employee.id.as_str() == id))
    }

    // =========================================================================
    // add
    // =========================================================================

    /// Add a new employee.
    ///
    /// Rejected when the ID already exists, is not 13 digits, or the
    /// contact is not at least 10 digits; checked in that order.
    pub async fn add(
        &self,
        id: &str,
        surname: &str,
        name: &str,
        contact: &str,
    ) -> Result<Employee, StorageError> {
        let _guard = self.locks.lock(&self.path).await;
        let mut employees = self.snapshot().await?;

        let id = id.trim();
        if employees.iter().any(|employee| employee.id.as_str() == id) {
            return Err(DomainError::validation("An employee with this ID number already exists.").into());
        }
        let employee = Employee::new(EmployeeId::parse(id)?, surname, name, Contact::parse(contact)?);

        employees.push(employee.clone());
        self.persist(&employees).await?;

        tracing::info!(employee_id = %employee.id, "Employee added");
        Ok(employee)
    }

    // =========================================================================
    // update
    // =========================================================================

    /// Overwrite surname, name and contact of an existing employee in place
    pub async fn update(
        &self,
        id: &str,
        surname: &str,
        name: &str,
        contact: &str,
    ) -> Result<Employee, StorageError> {
        let _guard = self.locks.lock(&self.path).await;
        let mut employees = self.snapshot().await?;

        let id = id.trim();
        let employee = employees
            .iter_mut()
            .find(|employee| employee.id.as_str() == id)
            .ok_or_else(|| DomainError::EmployeeNotFound(id.to_string()))?;

        let contact = Contact::parse(contact)?;
        *employee = Employee::new(employee.id.clone(), surname, name, contact);
        let updated = employee.clone();

        self.persist(&employees).await?;

        tracing::info!(employee_id = %updated.id, "Employee updated");
        Ok(updated)
    }

    // =========================================================================
    // remove
    // =========================================================================

    /// Delete an employee; returns the removed record
    pub async fn remove(&self, id: &str) -> Result<Employee, StorageError> {
        let _guard = self.locks.lock(&self.path).await;
        let mut employees = self.snapshot().await?;

        let id = id.trim();
        let index = employees
            .iter()
            .position(|employee| employee.id.as_str() == id)
            .ok_or_else(|| DomainError::EmployeeNotFound(id.to_string()))?;
        let removed = employees.remove(index);

        self.persist(&employees).await?;

        tracing::info!(employee_id = %removed.id, "Employee removed");
        Ok(removed)
    }

    async fn persist(&self, employees: &[Employee]) -> Result<(), StorageError> {
        let bytes = encode_rows(&self.path, &EMPLOYEE_COLUMNS, employees)?;
        write_atomic(&self.path, &bytes).await?;
        tracing::debug!(path = %self.path.display(), rows = employees.len(), "Employee file written");
        Ok(())
    }
}
