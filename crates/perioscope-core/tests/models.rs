use perioscope_core::error::CoreError;
use perioscope_core::models::analysis::{
    DetailedFindings, EnhancedAnalysis, PrimaryCondition, RefinedPrognosis, RiskAssessment,
    TreatmentPlan,
};
use perioscope_core::models::confidence::{AssessmentOutcome, ConfidenceAssessment};
use perioscope_core::models::findings::Severity;
use perioscope_core::models::input::DiagnosticInput;
use perioscope_core::models::stage::Prognosis;
use perioscope_core::rules;

fn sample_analysis() -> EnhancedAnalysis {
    let one = |s: &str| vec![s.to_string()];
    EnhancedAnalysis {
        refined_prognosis: RefinedPrognosis {
            status: Prognosis::Fair,
            explanation: "Moderate horizontal bone loss".to_string(),
            risk_factors: one("Smoking"),
            long_term_outlook: "Stable with maintenance".to_string(),
        },
        detailed_findings: DetailedFindings {
            primary_condition: PrimaryCondition {
                description: "Chronic periodontitis".to_string(),
                severity: Severity::Moderate,
                implications: one("Attachment loss"),
            },
            secondary_findings: Vec::new(),
            risk_assessment: RiskAssessment {
                current: "Moderate".to_string(),
                future: "Progressive without therapy".to_string(),
                mitigation_strategies: one("Root planing"),
            },
        },
        detailed_treatment_plan: TreatmentPlan {
            immediate: one("Charting"),
            short_term: one("Re-evaluation"),
            long_term: one("Maintenance"),
            preventive_measures: one("Interdental cleaning"),
            lifestyle: one("Smoking cessation"),
        },
    }
}

#[test]
fn from_json_reports_missing_diagnosis() {
    let err = DiagnosticInput::from_json(r#"{"findings": {"pathologies": []}}"#).unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "diagnosis"));
}

#[test]
fn from_json_reports_missing_findings() {
    let err = DiagnosticInput::from_json(r#"{"diagnosis": "Periodontitis"}"#).unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "findings"));
}

#[test]
fn from_json_rejects_findings_without_content() {
    let err = DiagnosticInput::from_json(r#"{"diagnosis": "Periodontitis", "findings": {}}"#)
        .unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "findings"));
}

#[test]
fn from_json_accepts_camel_case_payload() {
    let input = DiagnosticInput::from_json(
        r#"{
            "diagnosis": "Generalised periodontitis",
            "findings": {
                "boneLoss": {"percentage": 42.0, "severity": "moderate", "regions": ["lower molars"]},
                "pathologies": [{"type": "caries", "confidence": 0.9}]
            },
            "patientContext": {"age": 54, "gender": "female", "riskFactors": {"smoking": true}}
        }"#,
    )
    .expect("valid input");

    let bone_loss = input.findings.bone_loss.as_ref().expect("bone loss");
    assert_eq!(bone_loss.severity, Severity::Moderate);
    assert_eq!(input.findings.pathologies[0].kind, "caries");
    assert!(input.patient_context.risk_factors.smoking);
    assert!(!input.patient_context.risk_factors.diabetes);
}

#[test]
fn check_rejects_out_of_range_percentage() {
    let err = DiagnosticInput::from_json(
        r#"{"diagnosis": "x", "findings": {"boneLoss": {"percentage": 140, "severity": "severe"}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidField { .. }));
}

#[test]
fn validated_outcome_has_no_confidence_envelope() {
    let outcome = AssessmentOutcome::Validated(sample_analysis());
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json.get("refinedPrognosis").is_some());
    assert!(json.get("diagnosticConfidence").is_none());
}

#[test]
fn fallback_outcome_carries_confidence_envelope() {
    let outcome = AssessmentOutcome::Fallback {
        analysis: sample_analysis(),
        confidence: ConfidenceAssessment {
            confidence_score: 0.45,
            validations: vec!["no corroborating findings".to_string()],
        },
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["refinedPrognosis"]["status"], "Fair");
    assert_eq!(json["diagnosticConfidence"]["confidenceScore"], 0.45);
}

#[test]
fn severity_bands_share_boundaries() {
    assert_eq!(rules::severity_for_percentage(0.0), Severity::Mild);
    assert_eq!(rules::severity_for_percentage(30.0), Severity::Mild);
    assert_eq!(rules::severity_for_percentage(30.5), Severity::Moderate);
    assert_eq!(rules::severity_for_percentage(50.0), Severity::Moderate);
    assert_eq!(rules::severity_for_percentage(50.1), Severity::Severe);
    assert_eq!(rules::severity_for_percentage(100.0), Severity::Severe);
}

#[test]
fn risk_factor_sentences_never_empty() {
    let none = rules::risk_factor_sentences(&Default::default());
    assert_eq!(none, vec![rules::NO_SYSTEMIC_RISK.to_string()]);
}
