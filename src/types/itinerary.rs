use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{activity::ActivityEntry, trip::Preferences, trip::TripRequest};

/// Stored itinerary document, in the shape the document store keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDocument {
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub preferences: Preferences,
    /// User-provided or generated activities
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
}

impl ItineraryDocument {
    pub fn from_trip(
        user_id: impl Into<String>,
        trip: &TripRequest,
        activities: Vec<ActivityEntry>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            destination: trip.destination().to_string(),
            start_date: trip.start_date(),
            end_date: trip.end_date(),
            preferences: trip.preferences().clone(),
            activities,
        }
    }

    /// Apply a partial update; fields left `None` are untouched.
    pub fn apply(&mut self, update: ItineraryUpdate) {
        let ItineraryUpdate {
            destination,
            start_date,
            end_date,
            preferences,
            activities,
        } = update;

        if let Some(destination) = destination {
            self.destination = destination;
        }
        if let Some(start_date) = start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            self.end_date = end_date;
        }
        if let Some(preferences) = preferences {
            self.preferences = preferences;
        }
        if let Some(activities) = activities {
            self.activities = activities;
        }
    }
}

/// Patch for an existing itinerary. Ownership (`userId`) cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItineraryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<ActivityEntry>>,
}

/// A document together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredItinerary {
    pub id: String,
    #[serde(flatten)]
    pub document: ItineraryDocument,
}
