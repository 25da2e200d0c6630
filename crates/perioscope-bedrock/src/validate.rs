//! Structural contract for `EnhancedAnalysis` responses.
//!
//! The validator is the only authority on whether model output is usable.
//! A single violation rejects the whole object.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use perioscope_core::models::analysis::EnhancedAnalysis;
use perioscope_core::models::findings::Severity;
use perioscope_core::models::stage::Prognosis;

use crate::sanitize::sanitize;

/// The first contract violation found, with the dotted path to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct SchemaViolation {
    pub path: String,
    pub reason: String,
}

impl SchemaViolation {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Why a model response was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseRejection {
    #[error("response is not parseable JSON: {0}")]
    Unparseable(String),

    #[error("response violates the analysis schema at {0}")]
    Schema(#[from] SchemaViolation),
}

/// Sanitise, parse and validate raw model output.
pub fn parse_analysis(raw: &str) -> Result<EnhancedAnalysis, ResponseRejection> {
    let candidate = sanitize(raw);
    let value: Value = serde_json::from_str(&candidate)
        .map_err(|e| ResponseRejection::Unparseable(e.to_string()))?;

    validate(&value)?;

    let analysis: EnhancedAnalysis = serde_json::from_value(value)
        .map_err(|e| SchemaViolation::new("$", e.to_string()))?;

    debug!(
        secondary_findings = analysis.detailed_findings.secondary_findings.len(),
        "model response accepted"
    );
    Ok(analysis)
}

/// Check a parsed response against the `EnhancedAnalysis` contract.
pub fn validate(value: &Value) -> Result<(), SchemaViolation> {
    let root = as_object(value, "$")?;

    let prognosis = object_field(root, "", "refinedPrognosis")?;
    validate_prognosis(prognosis)?;

    let findings = object_field(root, "", "detailedFindings")?;
    validate_findings(findings)?;

    let plan = object_field(root, "", "detailedTreatmentPlan")?;
    for key in [
        "immediate",
        "shortTerm",
        "longTerm",
        "preventiveMeasures",
        "lifestyle",
    ] {
        non_empty_list(plan, "detailedTreatmentPlan", key)?;
    }

    Ok(())
}

fn validate_prognosis(obj: &Map<String, Value>) -> Result<(), SchemaViolation> {
    const PARENT: &str = "refinedPrognosis";

    let status = string_field(obj, PARENT, "status")?;
    if Prognosis::parse(status).is_none() {
        return Err(SchemaViolation::new(
            join(PARENT, "status"),
            format!("'{status}' is not one of Good, Fair, Poor, Questionable"),
        ));
    }
    non_empty_string(obj, PARENT, "explanation")?;
    non_empty_string(obj, PARENT, "longTermOutlook")?;
    non_empty_list(obj, PARENT, "riskFactors")?;
    Ok(())
}

fn validate_findings(obj: &Map<String, Value>) -> Result<(), SchemaViolation> {
    const PARENT: &str = "detailedFindings";

    let primary = object_field(obj, PARENT, "primaryCondition")?;
    let primary_path = join(PARENT, "primaryCondition");
    non_empty_string(primary, &primary_path, "description")?;
    severity_field(primary, &primary_path, "severity")?;
    non_empty_list(primary, &primary_path, "implications")?;

    if let Some(secondary) = obj.get("secondaryFindings") {
        let secondary_path = join(PARENT, "secondaryFindings");
        let items = secondary
            .as_array()
            .ok_or_else(|| SchemaViolation::new(&secondary_path, "expected an array"))?;
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{secondary_path}[{i}]");
            let finding = as_object(item, &item_path)?;
            non_empty_string(finding, &item_path, "condition")?;
            non_empty_string(finding, &item_path, "description")?;
            severity_field(finding, &item_path, "severity")?;
            non_empty_list(finding, &item_path, "implications")?;
        }
    }

    let risk = object_field(obj, PARENT, "riskAssessment")?;
    let risk_path = join(PARENT, "riskAssessment");
    non_empty_string(risk, &risk_path, "current")?;
    non_empty_string(risk, &risk_path, "future")?;
    non_empty_list(risk, &risk_path, "mitigationStrategies")?;

    Ok(())
}

// ── Field helpers ────────────────────────────────────────────────────────────

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaViolation> {
    value
        .as_object()
        .ok_or_else(|| SchemaViolation::new(path, "expected an object"))
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<&'a Value, SchemaViolation> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(SchemaViolation::new(join(parent, key), "missing")),
        Some(value) => Ok(value),
    }
}

fn object_field<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<&'a Map<String, Value>, SchemaViolation> {
    as_object(required(obj, parent, key)?, &join(parent, key))
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<&'a str, SchemaViolation> {
    required(obj, parent, key)?
        .as_str()
        .ok_or_else(|| SchemaViolation::new(join(parent, key), "expected a string"))
}

fn non_empty_string(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<(), SchemaViolation> {
    if string_field(obj, parent, key)?.trim().is_empty() {
        return Err(SchemaViolation::new(join(parent, key), "must not be empty"));
    }
    Ok(())
}

fn severity_field(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<(), SchemaViolation> {
    let severity = string_field(obj, parent, key)?;
    if Severity::parse(severity).is_none() {
        return Err(SchemaViolation::new(
            join(parent, key),
            format!("'{severity}' is not one of mild, moderate, severe"),
        ));
    }
    Ok(())
}

/// A non-empty array of non-blank strings.
fn non_empty_list(
    obj: &Map<String, Value>,
    parent: &str,
    key: &str,
) -> Result<(), SchemaViolation> {
    let path = join(parent, key);
    let items = required(obj, parent, key)?
        .as_array()
        .ok_or_else(|| SchemaViolation::new(&path, "expected an array"))?;

    if items.is_empty() {
        return Err(SchemaViolation::new(&path, "must not be empty"));
    }
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) if !s.trim().is_empty() => {}
            Some(_) => {
                return Err(SchemaViolation::new(format!("{path}[{i}]"), "must not be blank"));
            }
            None => {
                return Err(SchemaViolation::new(format!("{path}[{i}]"), "expected a string"));
            }
        }
    }
    Ok(())
}
