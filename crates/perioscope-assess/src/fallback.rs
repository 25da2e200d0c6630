//! Deterministic analysis built from structured findings alone.
//!
//! Used when the model is not consulted or its answer was rejected. Every
//! list is filled from the rules table, so the result satisfies the
//! response schema by construction. Identical input yields identical
//! output.

use perioscope_core::models::analysis::{
    DetailedFindings, EnhancedAnalysis, PrimaryCondition, RefinedPrognosis, RiskAssessment,
    SecondaryFinding, TreatmentPlan,
};
use perioscope_core::models::findings::{BoneLossFinding, PathologyFinding, Severity};
use perioscope_core::models::input::{DiagnosticInput, RiskFactors};
use perioscope_core::rules;
use perioscope_staging::classify_by_percentage;

/// Generate a schema-conformant analysis for `input`.
///
/// `score` is the confidence score that led here and `validation_notes`
/// are appended to the prognosis explanation.
pub fn generate(input: &DiagnosticInput, score: f64, validation_notes: &[String]) -> EnhancedAnalysis {
    let findings = &input.findings;
    let bone_loss = findings.bone_loss.as_ref();
    let bone_loss_severity = bone_loss.map(|b| b.severity);
    let primary_severity = bone_loss_severity
        .or_else(|| findings.worst_pathology_severity())
        .unwrap_or(Severity::Mild);

    let status = rules::prognosis_for_severity(bone_loss_severity);
    let risk = &input.patient_context.risk_factors;

    EnhancedAnalysis {
        refined_prognosis: RefinedPrognosis {
            status,
            explanation: explanation(input, score, validation_notes),
            risk_factors: rules::risk_factor_sentences(risk),
            long_term_outlook: rules::long_term_outlook(status).to_string(),
        },
        detailed_findings: DetailedFindings {
            primary_condition: PrimaryCondition {
                description: primary_description(&input.diagnosis, bone_loss),
                severity: primary_severity,
                implications: owned(rules::condition_implications(primary_severity)),
            },
            secondary_findings: findings.pathologies.iter().map(secondary_finding).collect(),
            risk_assessment: RiskAssessment {
                current: format!("{} periodontal risk based on current findings", capitalize(primary_severity.as_str())),
                future: rules::future_risk(primary_severity).to_string(),
                mitigation_strategies: owned(rules::mitigation_strategies(primary_severity)),
            },
        },
        detailed_treatment_plan: TreatmentPlan {
            immediate: owned(rules::immediate_actions(primary_severity)),
            short_term: owned(rules::short_term_actions(primary_severity)),
            long_term: owned(rules::long_term_actions(primary_severity)),
            preventive_measures: owned(rules::PREVENTIVE_MEASURES),
            lifestyle: lifestyle(risk),
        },
    }
}

fn explanation(input: &DiagnosticInput, score: f64, notes: &[String]) -> String {
    let diagnosis = input.diagnosis.trim();
    let mut text = match &input.findings.bone_loss {
        Some(bone_loss) => format!(
            "{diagnosis}: {:.1}% radiographic bone loss ({}), consistent with {} by bone-loss percentage.",
            bone_loss.percentage,
            bone_loss.severity,
            classify_by_percentage(bone_loss.percentage)
        ),
        None => format!(
            "{diagnosis}: no radiographic bone-loss measurement; prognosis is based on reported pathologies."
        ),
    };

    text.push_str(&format!(
        " Generated from structured findings with confidence {score:.2}."
    ));
    if !notes.is_empty() {
        text.push_str(&format!(" Notes: {}.", notes.join("; ")));
    }
    text
}

fn primary_description(diagnosis: &str, bone_loss: Option<&BoneLossFinding>) -> String {
    let diagnosis = diagnosis.trim();
    let Some(bone_loss) = bone_loss else {
        return diagnosis.to_string();
    };

    let mut description = format!(
        "{diagnosis} with {} bone loss ({:.1}%)",
        bone_loss.severity, bone_loss.percentage
    );
    let regions: Vec<&str> = bone_loss
        .regions
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect();
    if !regions.is_empty() {
        description.push_str(&format!(" affecting {}", regions.join(", ")));
    }
    description
}

fn secondary_finding(pathology: &PathologyFinding) -> SecondaryFinding {
    let severity = pathology.severity.unwrap_or(Severity::Mild);
    let condition = match pathology.kind.trim() {
        "" => "Unspecified pathology".to_string(),
        kind => kind.to_string(),
    };

    let mut description = format!("{condition} detected");
    if let Some(location) = pathology.location.as_deref().map(str::trim)
        && !location.is_empty()
    {
        description.push_str(&format!(" at {location}"));
    }
    description.push_str(&format!(
        " (detection confidence {:.0}%)",
        pathology.confidence * 100.0
    ));

    SecondaryFinding {
        condition,
        description,
        severity,
        implications: owned(rules::pathology_implications(severity)),
    }
}

fn lifestyle(risk: &RiskFactors) -> Vec<String> {
    let mut advice = Vec::new();
    if risk.smoking {
        advice.push(rules::SMOKING_LIFESTYLE.to_string());
    }
    if risk.diabetes {
        advice.push(rules::DIABETES_LIFESTYLE.to_string());
    }
    if risk.hypertension {
        advice.push(rules::HYPERTENSION_LIFESTYLE.to_string());
    }
    advice.extend(owned(rules::LIFESTYLE_ADVICE));
    advice
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
