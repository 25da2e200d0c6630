use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::findings::Severity;
use super::stage::Prognosis;

/// The strict output schema shared by the model-derived path and the
/// fallback generator. Every list except `secondaryFindings` is non-empty
/// once it has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EnhancedAnalysis {
    pub refined_prognosis: RefinedPrognosis,
    pub detailed_findings: DetailedFindings,
    pub detailed_treatment_plan: TreatmentPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RefinedPrognosis {
    pub status: Prognosis,
    pub explanation: String,
    pub risk_factors: Vec<String>,
    pub long_term_outlook: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DetailedFindings {
    pub primary_condition: PrimaryCondition,
    #[serde(default)]
    pub secondary_findings: Vec<SecondaryFinding>,
    pub risk_assessment: RiskAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PrimaryCondition {
    pub description: String,
    pub severity: Severity,
    pub implications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SecondaryFinding {
    pub condition: String,
    pub description: String,
    pub severity: Severity,
    pub implications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RiskAssessment {
    pub current: String,
    pub future: String,
    pub mitigation_strategies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TreatmentPlan {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub preventive_measures: Vec<String>,
    pub lifestyle: Vec<String>,
}
