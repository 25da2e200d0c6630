use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::analysis::EnhancedAnalysis;

/// Trustworthiness estimate for a case's structured findings. Used only to
/// choose between the model path and the fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConfidenceAssessment {
    /// In [0, 1].
    pub confidence_score: f64,
    pub validations: Vec<String>,
}

/// Result of one pipeline run.
///
/// Both variants carry the same [`EnhancedAnalysis`] shape; only the
/// fallback path attaches the confidence assessment that caused it.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentOutcome {
    /// The model response passed sanitisation and schema validation.
    Validated(EnhancedAnalysis),
    /// Deterministically generated from the structured findings.
    Fallback {
        analysis: EnhancedAnalysis,
        confidence: ConfidenceAssessment,
    },
}

impl AssessmentOutcome {
    pub fn analysis(&self) -> &EnhancedAnalysis {
        match self {
            AssessmentOutcome::Validated(analysis) => analysis,
            AssessmentOutcome::Fallback { analysis, .. } => analysis,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AssessmentOutcome::Fallback { .. })
    }

    /// Wire form sent to the dashboard.
    pub fn envelope(&self) -> AnalysisEnvelope<'_> {
        match self {
            AssessmentOutcome::Validated(analysis) => AnalysisEnvelope {
                analysis,
                diagnostic_confidence: None,
            },
            AssessmentOutcome::Fallback {
                analysis,
                confidence,
            } => AnalysisEnvelope {
                analysis,
                diagnostic_confidence: Some(confidence),
            },
        }
    }
}

impl Serialize for AssessmentOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.envelope().serialize(serializer)
    }
}

/// The analysis object, with `diagnosticConfidence` present only on the
/// fallback path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEnvelope<'a> {
    #[serde(flatten)]
    pub analysis: &'a EnhancedAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_confidence: Option<&'a ConfidenceAssessment>,
}
