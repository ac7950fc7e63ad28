//! Employee record
//!
//! Typed employee row with its validated identifier and contact number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Exact number of digits in an employee identifier
pub const EMPLOYEE_ID_LEN: usize = 13;

/// Minimum number of digits in a contact number
pub const CONTACT_MIN_LEN: usize = 10;

/// Column headers of the employee file, in order
pub const EMPLOYEE_COLUMNS: [&str; 4] = ["ID Number", "Surname", "Name", "Contact"];

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Employee identifier: exactly 13 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        if !all_digits(value) || value.len() != EMPLOYEE_ID_LEN {
            return Err(DomainError::validation(format!(
                "ID number must be a {}-digit number.",
                EMPLOYEE_ID_LEN
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

/// Contact number: ASCII digits, at least 10 of them.
///
/// Kept as text so leading zeros survive the round trip through the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Contact(String);

impl Contact {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        if !all_digits(value) || value.len() < CONTACT_MIN_LEN {
            return Err(DomainError::validation(format!(
                "Contact must be at least {} digits.",
                CONTACT_MIN_LEN
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Contact {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Contact> for String {
    fn from(contact: Contact) -> Self {
        contact.0
    }
}

/// One row of the employee file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "ID Number")]
    pub id: EmployeeId,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Contact")]
    pub contact: Contact,
}

impl Employee {
    pub fn new(id: EmployeeId, surname: impl Into<String>, name: impl Into<String>, contact: Contact) -> Self {
        Self {
            id,
            surname: surname.into().trim().to_string(),
            name: name.into().trim().to_string(),
            contact,
        }
    }
}
