use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, Result};

pub const DEFAULT_STYLE: &str = "general";
pub const DEFAULT_BUDGET: &str = "moderate";

/// Traveller preferences used to flavour the generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Travel style such as "adventure", "relaxation" or "culture"
    #[serde(default = "default_style")]
    pub style: String,
    /// Budget category such as "low", "moderate" or "high"
    #[serde(default = "default_budget")]
    pub budget: String,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

fn default_budget() -> String {
    DEFAULT_BUDGET.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            style: default_style(),
            budget: default_budget(),
        }
    }
}

impl Preferences {
    /// Build preferences, falling back to the defaults for blank values.
    pub fn new(style: Option<&str>, budget: Option<&str>) -> Self {
        let pick = |value: Option<&str>, fallback: &str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            style: pick(style, DEFAULT_STYLE),
            budget: pick(budget, DEFAULT_BUDGET),
        }
    }
}

/// Validated trip parameters for a single generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRequest {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    preferences: Preferences,
}

/// Wire shape accepted from callers before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TripRequestPayload {
    destination: String,
    start_date: String,
    end_date: String,
    #[serde(default)]
    preferences: Option<PreferencesPayload>,
}

#[derive(Debug, Deserialize)]
struct PreferencesPayload {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    budget: Option<String>,
}

impl TripRequest {
    /// Validate and build a trip request.
    ///
    /// Dates are ISO calendar dates (`YYYY-MM-DD`) and the start may not be
    /// after the end.
    pub fn new(
        destination: &str,
        start_date: &str,
        end_date: &str,
        preferences: Preferences,
    ) -> Result<Self> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(PlannerError::Validation(
                "`destination` must not be empty".to_string(),
            ));
        }

        let start = parse_date("startDate", start_date)?;
        let end = parse_date("endDate", end_date)?;

        if start > end {
            return Err(PlannerError::Validation(format!(
                "`startDate` {} is after `endDate` {}",
                start, end
            )));
        }

        Ok(Self {
            destination: destination.to_string(),
            start_date: start,
            end_date: end,
            preferences,
        })
    }

    /// Validate a caller-supplied JSON payload
    /// (`{destination, startDate, endDate, preferences?}`).
    pub fn from_json(payload: &Value) -> Result<Self> {
        let raw: TripRequestPayload =
            serde_path_to_error::deserialize(payload).map_err(|err| {
                let path = err.path().to_string();
                let location = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                PlannerError::Validation(format!(
                    "invalid trip request at {}: {}",
                    location,
                    err.inner()
                ))
            })?;

        let preferences = raw
            .preferences
            .map(|p| Preferences::new(p.style.as_deref(), p.budget.as_deref()))
            .unwrap_or_default();

        Self::new(&raw.destination, &raw.start_date, &raw.end_date, preferences)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Inclusive number of calendar days covered by the trip.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PlannerError::Validation(format!(
            "`{}` must not be empty",
            field
        )));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| {
        PlannerError::Validation(format!(
            "`{}` must be an ISO date (YYYY-MM-DD), got `{}`: {}",
            field, value, err
        ))
    })
}
