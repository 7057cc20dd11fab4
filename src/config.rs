//! Settings for the lineage binary.
//!
//! Values are layered: built-in defaults, then an optional settings file
//! (`lineage.toml`, `lineage.json`, ... or an explicit path), then
//! `LINEAGE_*` environment variables such as `LINEAGE_DATE_FORMAT`.

use std::path::Path;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::access::{DisplaySettings, NameFormat, format_date};
use crate::error::{LineageError, Result};
use crate::lineage::DEFAULT_INDENT;

pub const DEFAULT_SETTINGS_FILE: &str = "lineage";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub name_format: NameFormat,
    pub date_format: String,
    pub indent_marker: String,
    pub output: OutputFormat,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let display = DisplaySettings::default();
        Self {
            name_format: display.name_format,
            date_format: display.date_format,
            indent_marker: String::from(DEFAULT_INDENT),
            output: OutputFormat::Text,
            log_filter: String::from("warn"),
        }
    }
}

impl Settings {
    /// Loads the settings. An explicit `path` must exist, the default
    /// settings file may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };
        let settings: Settings = Config::builder()
            .set_default("name_format", "surname_first")?
            .set_default("date_format", defaults.date_format)?
            .set_default("indent_marker", defaults.indent_marker)?
            .set_default("output", "text")?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(file)
            .add_source(Environment::with_prefix("LINEAGE"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
            || format_date(NaiveDate::MIN, &self.date_format).is_none()
        {
            return Err(LineageError::Config(format!(
                "date_format {:?} is not a valid date format",
                self.date_format
            )));
        }
        if self.indent_marker.is_empty() {
            return Err(LineageError::Config(String::from("indent_marker may not be empty")));
        }
        Ok(())
    }

    pub fn display(&self) -> DisplaySettings {
        DisplaySettings {
            name_format: self.name_format,
            date_format: self.date_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.indent_marker, "  |");
        assert_eq!(settings.display(), DisplaySettings::default());
    }

    #[test]
    fn broken_date_format_is_rejected() {
        let settings = Settings {
            date_format: String::from("%Y-%Q"),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(LineageError::Config(_))));
    }

    #[test]
    fn time_only_date_format_is_rejected() {
        for date_format in ["%H:%M", "%Y %z"] {
            let settings = Settings {
                date_format: String::from(date_format),
                ..Settings::default()
            };
            assert!(matches!(settings.validate(), Err(LineageError::Config(_))), "{date_format}");
        }
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/lineage.toml"))).unwrap_err();
        assert!(matches!(err, LineageError::Config(_)));
    }
}
