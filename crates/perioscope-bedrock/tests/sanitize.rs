use perioscope_bedrock::sanitize::sanitize;
use serde_json::{Value, json};

fn parse(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

#[test]
fn fenced_response_with_trailing_comma_becomes_parseable() {
    let raw = "Here is the assessment you asked for:\n\
               ```json\n\
               {\"status\": \"Fair\", \"riskFactors\": [\"smoking\",],}\n\
               ```\n\
               Let me know if you need anything else.";

    let cleaned = sanitize(raw);
    assert_eq!(
        parse(&cleaned),
        Some(json!({"status": "Fair", "riskFactors": ["smoking"]}))
    );
}

#[test]
fn response_without_braces_stays_unparseable() {
    let cleaned = sanitize("I'm sorry, I cannot provide a diagnosis for this case.");
    assert!(!cleaned.contains('{'));
    assert!(parse(&cleaned).is_none());
}

#[test]
fn surrounding_prose_is_dropped() {
    let cleaned = sanitize("Sure! {\"a\": 1} Hope this helps.");
    assert_eq!(cleaned, "{\"a\": 1}");
}

#[test]
fn outermost_object_keeps_nested_braces() {
    let cleaned = sanitize("result: {\"a\": {\"b\": [1, 2]}, \"c\": {}} done");
    assert_eq!(parse(&cleaned), Some(json!({"a": {"b": [1, 2]}, "c": {}})));
}

#[test]
fn unquoted_keys_are_quoted() {
    let cleaned = sanitize("{status: \"Good\", longTermOutlook: \"Stable\"}");
    assert_eq!(
        parse(&cleaned),
        Some(json!({"status": "Good", "longTermOutlook": "Stable"}))
    );
}

#[test]
fn single_quoted_strings_are_converted() {
    let cleaned = sanitize("{'severity': 'mild', 'implications': ['bleeding on \"probing\"']}");
    assert_eq!(
        parse(&cleaned),
        Some(json!({"severity": "mild", "implications": ["bleeding on \"probing\""]}))
    );
}

#[test]
fn combined_malformations_are_repaired() {
    let raw = "```\n{current: 'moderate', mitigationStrategies: ['scaling', 'recall',],}\n```";
    assert_eq!(
        parse(&sanitize(raw)),
        Some(json!({"current": "moderate", "mitigationStrategies": ["scaling", "recall"]}))
    );
}

#[test]
fn valid_json_is_left_untouched() {
    let raw = r#"{"explanation": "Patient's bone loss, mild: stable", "list": ["a, b"]}"#;
    assert_eq!(sanitize(raw), raw);
}

#[test]
fn unclosed_object_is_not_completed() {
    let cleaned = sanitize("{\"status\": \"Good\", \"explanation\": ");
    assert!(parse(&cleaned).is_none());
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(sanitize("   \n"), "");
}

#[test]
fn repair_leaves_colons_inside_strings_alone() {
    let raw = "```json\n{\"explanation\": \"Bone loss noted, summary: moderate\", \"riskFactors\": [\"smoking\",],}\n```";
    assert_eq!(
        parse(&sanitize(raw)),
        Some(json!({
            "explanation": "Bone loss noted, summary: moderate",
            "riskFactors": ["smoking"]
        }))
    );
}

#[test]
fn repair_leaves_apostrophes_inside_strings_alone() {
    let raw = "{\"explanation\": \"Findings: 'moderate' horizontal loss\", \"list\": [\"a\",],}";
    assert_eq!(
        parse(&sanitize(raw)),
        Some(json!({
            "explanation": "Findings: 'moderate' horizontal loss",
            "list": ["a"]
        }))
    );
}

#[test]
fn repair_honours_escaped_quotes() {
    let raw = r#"{"explanation": "the \"worst, site: 36\" was probed", next: 'a',}"#;
    assert_eq!(
        parse(&sanitize(raw)),
        Some(json!({"explanation": "the \"worst, site: 36\" was probed", "next": "a"}))
    );
}
