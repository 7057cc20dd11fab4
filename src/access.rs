//! Read-only capabilities the reports are given.
//!
//! The walkers never reach for a global database. They receive a
//! [`DataAccessor`] that resolves handles and a [`DisplayAccessor`] that
//! turns a person into the text fields printed on each line.

use std::fmt::Write;
use std::sync::Arc;

use chrono::NaiveDate;

use serde::{Deserialize, Serialize};

use crate::construct::{Family, Handle, Person};
use crate::error::Result;

/// Resolves handles into records. An unresolved handle is a
/// [`LineageError::DataIntegrity`](crate::error::LineageError::DataIntegrity).
pub trait DataAccessor {
    fn get_person(&self, handle: &Handle) -> Result<Arc<Person>>;
    fn get_family(&self, handle: &Handle) -> Result<Arc<Family>>;
}

/// Extracts the display fields of a person.
pub trait DisplayAccessor {
    fn display_name(&self, person: &Person) -> String;
    fn display_birth(&self, person: &Person) -> String;
    fn display_death(&self, person: &Person) -> String;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameFormat {
    /// "Surname, Given"
    #[default]
    SurnameFirst,
    /// "Given Surname"
    GivenFirst,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub name_format: NameFormat,
    /// chrono format string used for birth and death dates
    pub date_format: String,
}
impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            name_format: NameFormat::SurnameFirst,
            date_format: String::from("%Y-%m-%d"),
        }
    }
}

/// The default [`DisplayAccessor`].
#[derive(Clone, Debug, Default)]
pub struct SimpleAccess {
    settings: DisplaySettings,
}

impl SimpleAccess {
    pub fn new(settings: DisplaySettings) -> Self {
        Self { settings }
    }
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }
}

impl DisplayAccessor for SimpleAccess {
    fn display_name(&self, person: &Person) -> String {
        let given = person.given_name().trim();
        let surname = person.surname().trim();
        match (given.is_empty(), surname.is_empty()) {
            (true, true) => String::new(),
            (false, true) => given.to_owned(),
            (true, false) => surname.to_owned(),
            (false, false) => match self.settings.name_format {
                NameFormat::SurnameFirst => format!("{}, {}", surname, given),
                NameFormat::GivenFirst => format!("{} {}", given, surname),
            },
        }
    }
    fn display_birth(&self, person: &Person) -> String {
        person.birth().map(|d| self.display_date(d)).unwrap_or_default()
    }
    fn display_death(&self, person: &Person) -> String {
        person.death().map(|d| self.display_date(d)).unwrap_or_default()
    }
}

impl SimpleAccess {
    // Falls back to the ISO form when the format needs fields a date lacks.
    fn display_date(&self, date: NaiveDate) -> String {
        format_date(date, &self.settings.date_format).unwrap_or_else(|| date.to_string())
    }
}

/// Formats `date` with a chrono format string. `None` when the format asks
/// for something a plain date cannot supply, such as hours or a time zone.
pub fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}
