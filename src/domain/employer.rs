//! Employer information
//!
//! Static, read-only record injected into every generated form.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerInfo {
    pub name: String,
    pub address: String,
    pub contact: String,
}

impl Default for EmployerInfo {
    fn default() -> Self {
        Self {
            name: "Form-Easy company".to_string(),
            address: "123 Rural Road, Newcastle".to_string(),
            contact: "012 345 6789".to_string(),
        }
    }
}
