use serde_json::json;
use trip_itinerary_rs::{
    core::repair_truncated, ActivityEntry, FailureReason, Reconciler, ReconciliationStatus,
};

const SCENARIO_A: &str = r#"{"itinerary":{"activities":[{"day":1,"activity":"Visit the Eiffel Tower","location":"Paris","cost":"$30"},{"day":2,"activity":"Explore the Louvre Museum","location":"Paris","cost":"$20"}]}}"#;

const SCENARIO_B: &str = r#"{"itinerary":{"activities":[{"day":1,"activity":"Visit the Eiffel Tower","location":"Paris","cost":"$30"},{"day":2,"activity":"Explore the Louvre Mus"#;

fn entry(day: u32) -> serde_json::Value {
    json!({
        "day": day,
        "activity": format!("Activity {}", day),
        "location": "Kyoto",
        "cost": format!("${}", day * 10)
    })
}

/// Serialize `count` complete activities and leave the array open, as a
/// model cut off right after its last complete object would.
fn open_document(count: u32) -> String {
    let body = (1..=count)
        .map(|day| entry(day).to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"itinerary":{{"dates":{{"start":"2025-04-01","end":"2025-04-10"}},"activities":[{}"#,
        body
    )
}

#[test]
fn scenario_a_valid_document_is_returned_unchanged() {
    let result = Reconciler::new().reconcile(Some(SCENARIO_A));

    assert_eq!(result.status(), ReconciliationStatus::Parsed);
    assert_eq!(
        result.activities(),
        &[
            ActivityEntry::new(1, "Visit the Eiffel Tower", "Paris", "$30"),
            ActivityEntry::new(2, "Explore the Louvre Museum", "Paris", "$20"),
        ]
    );
}

#[test]
fn scenario_b_truncated_day_is_dropped() {
    let result = Reconciler::new().reconcile(Some(SCENARIO_B));

    assert_eq!(result.status(), ReconciliationStatus::Repaired);
    assert_eq!(
        result.activities(),
        &[ActivityEntry::new(1, "Visit the Eiffel Tower", "Paris", "$30")]
    );
    assert!(result.repaired_text().unwrap().ends_with("\"$30\"}]}}"));
}

#[test]
fn scenario_c_empty_string_is_empty_response() {
    let result = Reconciler::new().reconcile(Some(""));
    assert!(result.activities().is_empty());
    assert_eq!(result.failure_reason(), Some(FailureReason::EmptyResponse));
}

#[test]
fn scenario_d_prose_fails_repair() {
    let result = Reconciler::new().reconcile(Some("not json at all, no structure"));
    assert!(result.activities().is_empty());
    assert_eq!(result.failure_reason(), Some(FailureReason::RepairFailed));
    assert!(result.repaired_text().is_some());
}

#[test]
fn absent_text_is_empty_response_never_repair_failed() {
    let result = Reconciler::new().reconcile(None);
    assert_eq!(result.failure_reason(), Some(FailureReason::EmptyResponse));
    assert!(result.raw_text().is_none());
}

#[test]
fn valid_documents_keep_length_and_order() {
    for count in 1..=6 {
        let document = json!({
            "itinerary": {
                "dates": { "start": "2025-04-01", "end": "2025-04-10" },
                "activities": (1..=count).map(entry).collect::<Vec<_>>()
            }
        })
        .to_string();

        let result = Reconciler::new().reconcile(Some(&document));
        assert_eq!(result.status(), ReconciliationStatus::Parsed);
        assert_eq!(result.activities().len(), count as usize);
        assert!(result.is_day_ordered());
        assert_eq!(result.activities()[0].activity, "Activity 1");
    }
}

#[test]
fn texts_without_commas_fail_repair() {
    for raw in [
        "{",
        "plain prose",
        r#"{"itinerary":{"activities":["#,
        r#"{"itinerary":{"activities":[]}}"#,
        "{}",
        "[]",
    ] {
        let result = Reconciler::new().reconcile(Some(raw));
        assert_eq!(
            result.failure_reason(),
            Some(FailureReason::RepairFailed),
            "input: {}",
            raw
        );
        assert!(result.activities().is_empty());
    }
}

#[test]
fn dangling_partial_object_yields_complete_prefix() {
    let partials = [
        r#",{"day":"#,
        r#",{"day":9,"activity":"Tea ceremony","loc"#,
        r#",{"day":9,"activity":"Tea, then a walk"#,
        r#",{"#,
        ",",
    ];

    for count in 1..=5u32 {
        for partial in partials {
            let raw = format!("{}{}", open_document(count), partial);
            let result = Reconciler::new().reconcile(Some(&raw));
            assert_eq!(
                result.activities().len(),
                count as usize,
                "input: {}",
                raw
            );
            assert!(result.was_repaired());
            assert_eq!(result.activities().last().unwrap().day, count);
        }
    }
}

#[test]
fn repair_is_never_attempted_on_valid_input() {
    let result = Reconciler::new().reconcile(Some(SCENARIO_A));
    assert!(!result.was_repaired());
    assert!(result.repaired_text().is_none());
}

#[test]
fn reconciling_a_successful_result_again_is_a_no_op() {
    let first = Reconciler::new().reconcile(Some(SCENARIO_B));
    let reserialized = json!({ "itinerary": { "activities": first.activities() } }).to_string();

    let second = Reconciler::new().reconcile(Some(&reserialized));
    assert_eq!(second.status(), ReconciliationStatus::Parsed);
    assert_eq!(second.activities(), first.activities());
}

#[test]
fn fields_are_defaulted_never_absent() {
    let raw = r#"{"itinerary":{"activities":[{"activity":"Sunrise hike"},{"day":0,"location":"Hakone","cost":null},{"day":5}]}}"#;
    let result = Reconciler::new().reconcile(Some(raw));

    assert_eq!(
        result.activities(),
        &[
            ActivityEntry::new(1, "Sunrise hike", "", ""),
            ActivityEntry::new(2, "", "Hakone", ""),
            ActivityEntry::new(5, "", "", ""),
        ]
    );

    let value = serde_json::to_value(result.activities()).unwrap();
    for item in value.as_array().unwrap() {
        for key in ["day", "activity", "location", "cost"] {
            assert!(!item[key].is_null(), "{} missing in {}", key, item);
        }
    }
}

#[test]
fn arrival_order_is_kept_even_when_days_go_backwards() {
    let raw = r#"{"itinerary":{"activities":[{"day":2,"activity":"b"},{"day":1,"activity":"a"}]}}"#;
    let result = Reconciler::new().reconcile(Some(raw));
    assert_eq!(result.activities()[0].activity, "b");
    assert!(!result.is_day_ordered());
}

// The repair hard-codes the nesting of the prompted shape. These pin the
// behaviour for other shapes so nobody mistakes it for a general repair.

#[test]
fn top_level_activities_are_not_recognised() {
    let raw = r#"{"activities":[{"day":1,"activity":"Visit the Eiffel Tower","location":"Paris","cost":"$30"}]}"#;
    let result = Reconciler::new().reconcile(Some(raw));
    assert!(!result.is_success());
    assert_eq!(result.failure_reason(), Some(FailureReason::RepairFailed));
}

#[test]
fn truncation_at_a_different_depth_is_mis_repaired() {
    // Cut inside a nested `tags` array: the fixed suffix closes the wrong
    // structures and the text still does not parse.
    let raw = r#"{"itinerary":{"activities":[{"day":1,"activity":"Walk","tags":["a","b"#;
    let result = Reconciler::new().reconcile(Some(raw));
    assert_eq!(result.failure_reason(), Some(FailureReason::RepairFailed));
    assert_eq!(
        result.repaired_text(),
        Some(r#"{"itinerary":{"activities":[{"day":1,"activity":"Walk","tags":["a"]}}"#)
    );
}

#[test]
fn repair_helper_appends_fixed_suffix_once() {
    let repaired = repair_truncated(SCENARIO_B).unwrap();
    assert!(repaired.ends_with("]}}"));
    assert!(!repaired.ends_with("]}}]}}"));
    assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
}
