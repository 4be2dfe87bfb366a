//! Platform module names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// One of the platform's top-level business domains, selected at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Hostel,
    Education,
    Accounts,
    Library,
    Boarding,
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Hostel,
        Module::Education,
        Module::Accounts,
        Module::Library,
        Module::Boarding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Hostel => "hostel",
            Module::Education => "education",
            Module::Accounts => "accounts",
            Module::Library => "library",
            Module::Boarding => "boarding",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                InvalidInputError::Module {
                    value: s.to_string(),
                }
                .into()
            })
    }
}
