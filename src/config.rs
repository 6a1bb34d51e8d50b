use std::collections::HashMap;
use std::env;

use error::ConfigError;
use timeline::OvernightPolicy;

pub const DEFAULT_REPORT_FILENAME: &'static str = "timeline.pdf";

const DATE_KEY: &'static str = "timeblocks.date";
const REPORT_FILENAME_KEY: &'static str = "timeblocks.report.filename";
const OVERNIGHT_KEY: &'static str = "timeblocks.overnight";

const DATE_ENV: &'static str = "TIMEBLOCKS_DATE";
const REPORT_FILENAME_ENV: &'static str = "TIMEBLOCKS_REPORT";
const OVERNIGHT_ENV: &'static str = "TIMEBLOCKS_OVERNIGHT";

/// Settings for a timeline run. Environment variables win over the input
/// header.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Day to show; today when unset.
    pub date: Option<String>,
    pub report_filename: String,
    pub overnight: OvernightPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            date: None,
            report_filename: String::from(DEFAULT_REPORT_FILENAME),
            overnight: OvernightPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_header(header: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::resolve(header, |key| env::var(key).ok())
    }

    /// Builds the config from `header`, asking `lookup` for environment
    /// overrides.
    pub fn resolve<F>(header: &HashMap<String, String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |env_key: &str, header_key: &str| -> Option<String> {
            lookup(env_key)
                .or_else(|| header.get(header_key).cloned())
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Config::default();

        config.date = get(DATE_ENV, DATE_KEY);

        match get(REPORT_FILENAME_ENV, REPORT_FILENAME_KEY) {
            Some(name) => config.report_filename = name,
            None => info!(
                "No report filename defined, falling back to {}",
                DEFAULT_REPORT_FILENAME
            ),
        }

        if let Some(value) = get(OVERNIGHT_ENV, OVERNIGHT_KEY) {
            config.overnight = value.parse().map_err(|_| ConfigError {
                key: String::from(OVERNIGHT_KEY),
                value: value.clone(),
            })?;
        }

        trace!("Resolved config: {:?}", config);
        Ok(config)
    }
}
