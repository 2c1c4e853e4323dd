use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One planned activity within a generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// 1-based day counter within the itinerary
    pub day: u32,
    /// What the traveller does (e.g., "Visit the Eiffel Tower")
    pub activity: String,
    /// Where it happens (e.g., "Paris")
    pub location: String,
    /// Free-form price label supplied by the model (e.g., "$30")
    pub cost: String,
}

impl ActivityEntry {
    pub fn new(
        day: u32,
        activity: impl Into<String>,
        location: impl Into<String>,
        cost: impl Into<String>,
    ) -> Self {
        Self {
            day,
            activity: activity.into(),
            location: location.into(),
            cost: cost.into(),
        }
    }

    /// Normalize one raw entry from the model's `activities` array.
    ///
    /// `position` is the 0-based index of the entry in its array. Missing or
    /// malformed fields fall back to placeholders so every entry is fully
    /// populated.
    pub fn from_raw(position: usize, raw: &Value) -> Self {
        let empty = Map::new();
        let fields = raw.as_object().unwrap_or(&empty);

        let day = fields
            .get("day")
            .and_then(Value::as_u64)
            .filter(|day| *day > 0)
            .and_then(|day| u32::try_from(day).ok())
            .unwrap_or_else(|| fallback_day(position));

        Self {
            day,
            activity: text_field(fields, "activity"),
            location: text_field(fields, "location"),
            cost: text_field(fields, "cost"),
        }
    }
}

fn fallback_day(position: usize) -> u32 {
    u32::try_from(position + 1).unwrap_or(u32::MAX)
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}
