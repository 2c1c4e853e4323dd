use std::fmt;

use serde::{Deserialize, Serialize};

use super::activity::ActivityEntry;

/// Why reconciliation produced no activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// The text was JSON but carried no usable `itinerary.activities` list.
    ParseFailed,
    /// The text was not JSON and the one-shot repair did not fix it.
    RepairFailed,
    /// The completion endpoint returned no content.
    EmptyResponse,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::ParseFailed => "parse-failed",
            FailureReason::RepairFailed => "repair-failed",
            FailureReason::EmptyResponse => "empty-response",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a reconciliation pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ReconciliationStatus {
    /// The raw text parsed as-is.
    Parsed,
    /// The raw text needed the truncation repair.
    Repaired,
    /// No activities were produced.
    Failed(FailureReason),
}

/// Outcome of turning raw completion text into activities.
///
/// A successful result always holds at least one activity; a failed result
/// holds none and names the reason. Activities keep the order in which the
/// model emitted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    activities: Vec<ActivityEntry>,
    #[serde(flatten)]
    status: ReconciliationStatus,
    #[serde(skip)]
    raw_text: Option<String>,
    #[serde(skip)]
    repaired_text: Option<String>,
}

impl ReconciliationResult {
    pub(crate) fn parsed(activities: Vec<ActivityEntry>, raw_text: String) -> Self {
        debug_assert!(!activities.is_empty());
        Self {
            activities,
            status: ReconciliationStatus::Parsed,
            raw_text: Some(raw_text),
            repaired_text: None,
        }
    }

    pub(crate) fn repaired(
        activities: Vec<ActivityEntry>,
        raw_text: String,
        repaired_text: String,
    ) -> Self {
        debug_assert!(!activities.is_empty());
        Self {
            activities,
            status: ReconciliationStatus::Repaired,
            raw_text: Some(raw_text),
            repaired_text: Some(repaired_text),
        }
    }

    pub(crate) fn failed(
        reason: FailureReason,
        raw_text: Option<String>,
        repaired_text: Option<String>,
    ) -> Self {
        Self {
            activities: Vec::new(),
            status: ReconciliationStatus::Failed(reason),
            raw_text,
            repaired_text,
        }
    }

    /// Failed result for a completion that produced no text at all.
    pub fn empty_response() -> Self {
        Self::failed(FailureReason::EmptyResponse, None, None)
    }

    pub fn activities(&self) -> &[ActivityEntry] {
        &self.activities
    }

    pub fn into_activities(self) -> Vec<ActivityEntry> {
        self.activities
    }

    pub fn status(&self) -> ReconciliationStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        !matches!(self.status, ReconciliationStatus::Failed(_))
    }

    pub fn was_repaired(&self) -> bool {
        matches!(self.status, ReconciliationStatus::Repaired)
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self.status {
            ReconciliationStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// The untrusted text the reconciler was given, when there was any.
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    /// The text produced by the repair pass, when one was attempted.
    pub fn repaired_text(&self) -> Option<&str> {
        self.repaired_text.as_deref()
    }

    /// Whether day numbers never decrease in arrival order.
    pub fn is_day_ordered(&self) -> bool {
        self.activities
            .windows(2)
            .all(|pair| pair[0].day <= pair[1].day)
    }

    /// Number of distinct days covered by the activities.
    pub fn day_count(&self) -> usize {
        let mut days: Vec<u32> = self.activities.iter().map(|entry| entry.day).collect();
        days.sort_unstable();
        days.dedup();
        days.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_reason_labels() {
        assert_eq!(FailureReason::RepairFailed.to_string(), "repair-failed");
        assert_eq!(
            serde_json::to_value(FailureReason::EmptyResponse).unwrap(),
            json!("empty-response")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let result = ReconciliationResult::failed(FailureReason::ParseFailed, None, None);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["reason"], "parse-failed");
        assert_eq!(value["activities"], json!([]));

        let result = ReconciliationResult::parsed(
            vec![ActivityEntry::new(1, "Walk", "Lisbon", "$0")],
            "{}".to_string(),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "parsed");
        assert!(value.get("reason").is_none());
    }

    #[test]
    fn test_day_ordering_helpers() {
        let result = ReconciliationResult::parsed(
            vec![
                ActivityEntry::new(1, "a", "", ""),
                ActivityEntry::new(1, "b", "", ""),
                ActivityEntry::new(3, "c", "", ""),
            ],
            String::new(),
        );
        assert!(result.is_day_ordered());
        assert_eq!(result.day_count(), 2);

        let result = ReconciliationResult::parsed(
            vec![
                ActivityEntry::new(2, "a", "", ""),
                ActivityEntry::new(1, "b", "", ""),
            ],
            String::new(),
        );
        assert!(!result.is_day_ordered());
    }

    #[test]
    fn test_empty_response_has_no_diagnostics() {
        let result = ReconciliationResult::empty_response();
        assert!(!result.is_success());
        assert_eq!(result.failure_reason(), Some(FailureReason::EmptyResponse));
        assert!(result.raw_text().is_none());
        assert!(result.repaired_text().is_none());
    }
}
