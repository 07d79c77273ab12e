//! Action inputs.
//!
//! The Actions runner hands inputs to the step as `INPUT_<NAME>` env vars
//! (name upper-cased, spaces replaced). CLI flags override the env for
//! local runs. Blank values are treated as absent: the runner passes empty
//! strings for inputs the workflow leaves unset.

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::select::utc_date;

const INPUT_TOKEN: &str = "INPUT_GITHUBAPITOKEN";
const INPUT_REPO: &str = "INPUT_REPO";
const INPUT_OWNER: &str = "INPUT_REPOOWNER";
const INPUT_DUE_ON: &str = "INPUT_DUEONDATE";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required input `{name}` is missing or blank")]
    MissingInput { name: &'static str },

    #[error("input dueOnDate `{raw}` is not a calendar date: {reason}")]
    InvalidDueOnDate { raw: String, reason: String },
}

/// Validated inputs for one invocation.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    pub token: String,
    pub owner: String,
    pub repo: String,
    /// Present switches selection to exact-day matching.
    pub due_on: Option<Date>,
}

/// CLI-provided overrides for the env-based inputs.
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    pub token: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub due_on: Option<String>,
}

impl ActionInputs {
    pub fn load(overrides: &InputOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |name| std::env::var(name).ok())
    }

    fn from_lookup(
        overrides: &InputOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = required("githubApiToken", overrides.token.clone(), lookup(INPUT_TOKEN))?;
        let owner = required("repoOwner", overrides.owner.clone(), lookup(INPUT_OWNER))?;
        let repo = required("repo", overrides.repo.clone(), lookup(INPUT_REPO))?;
        let due_on = non_blank(overrides.due_on.clone())
            .or_else(|| non_blank(lookup(INPUT_DUE_ON)))
            .map(|raw| parse_due_date(&raw))
            .transpose()?;

        Ok(Self {
            token,
            owner,
            repo,
            due_on,
        })
    }
}

fn required(
    name: &'static str,
    override_value: Option<String>,
    env_value: Option<String>,
) -> Result<String, ConfigError> {
    non_blank(override_value)
        .or_else(|| non_blank(env_value))
        .ok_or(ConfigError::MissingInput { name })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `dueOnDate`: plain `YYYY-MM-DD`, or a full RFC 3339 timestamp
/// truncated to its UTC day.
fn parse_due_date(raw: &str) -> Result<Date, ConfigError> {
    let format = format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(raw, format) {
        return Ok(date);
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .map(utc_date)
        .map_err(|e| ConfigError::InvalidDueOnDate {
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}
