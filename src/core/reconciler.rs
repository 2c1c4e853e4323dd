//! Recovery of itinerary JSON from bounded model output.
//!
//! The model answers under a hard token ceiling and can be cut off in the
//! middle of an activity object. When the raw text does not parse, a single
//! repair is attempted: cut at the last comma and close the three structures
//! the prompted shape has open at that point (`activities`, `itinerary`, the
//! root object). The cut lands on the last comma that directly follows a
//! closed `}` (an activity boundary); text without one is cut at its last
//! comma of any kind.
//!
//! The repair assumes that exact nesting. Output with any other shape is
//! mis-repaired and ends up as `repair-failed` or `parse-failed`. It is not a
//! general JSON repair and must not grow into one.

use serde_json::Value;

use crate::types::{ActivityEntry, FailureReason, ReconciliationResult};

/// Closes `activities`, `itinerary` and the root object, in that order.
pub const REPAIR_SUFFIX: &str = "]}}";

/// Converts raw completion text into a [`ReconciliationResult`].
///
/// Never fails and has no side effects. Diagnostics (raw and repaired text)
/// travel on the result for the caller to log.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    pub fn reconcile(&self, raw: Option<&str>) -> ReconciliationResult {
        let raw = match raw {
            Some(text) if !text.trim().is_empty() => text,
            _ => return ReconciliationResult::empty_response(),
        };

        if let Some(activities) = parse_activities(raw) {
            return ReconciliationResult::parsed(activities, raw.to_string());
        }

        let Some(repaired) = repair_truncated(raw) else {
            return ReconciliationResult::failed(
                FailureReason::RepairFailed,
                Some(raw.to_string()),
                None,
            );
        };

        match serde_json::from_str::<Value>(&repaired) {
            Err(_) => ReconciliationResult::failed(
                FailureReason::RepairFailed,
                Some(raw.to_string()),
                Some(repaired),
            ),
            Ok(document) => match extract_activities(&document) {
                Some(activities) => {
                    ReconciliationResult::repaired(activities, raw.to_string(), repaired)
                }
                None => ReconciliationResult::failed(
                    FailureReason::ParseFailed,
                    Some(raw.to_string()),
                    Some(repaired),
                ),
            },
        }
    }
}

/// Cut `raw` at its last comma and append [`REPAIR_SUFFIX`].
///
/// Returns `None` when there is no comma to cut at.
pub fn repair_truncated(raw: &str) -> Option<String> {
    let cut = cut_point(raw)?;
    let mut repaired = String::with_capacity(cut + REPAIR_SUFFIX.len());
    repaired.push_str(&raw[..cut]);
    repaired.push_str(REPAIR_SUFFIX);
    Some(repaired)
}

/// Last comma following a closed object, else the last comma.
fn cut_point(raw: &str) -> Option<usize> {
    raw.rmatch_indices(',')
        .map(|(index, _)| index)
        .find(|&index| raw[..index].trim_end().ends_with('}'))
        .or_else(|| raw.rfind(','))
}

fn parse_activities(text: &str) -> Option<Vec<ActivityEntry>> {
    let document: Value = serde_json::from_str(text).ok()?;
    extract_activities(&document)
}

fn extract_activities(document: &Value) -> Option<Vec<ActivityEntry>> {
    let entries = document
        .get("itinerary")?
        .get("activities")?
        .as_array()
        .filter(|entries| !entries.is_empty())?;

    Some(
        entries
            .iter()
            .enumerate()
            .map(|(position, raw)| ActivityEntry::from_raw(position, raw))
            .collect(),
    )
}
