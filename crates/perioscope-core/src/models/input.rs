use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::findings::CaseFindings;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskFactors {
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub diabetes: bool,
    #[serde(default)]
    pub hypertension: bool,
}

impl RiskFactors {
    pub fn any(&self) -> bool {
        self.smoking || self.diabetes || self.hypertension
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PatientContext {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub risk_factors: RiskFactors,
}

/// Request payload for the assessment pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiagnosticInput {
    pub diagnosis: String,
    pub findings: CaseFindings,
    #[serde(default)]
    pub patient_context: PatientContext,
}

impl DiagnosticInput {
    /// Parse a request body, reporting a missing `diagnosis` or `findings`
    /// key as [`CoreError::MissingField`] rather than a generic decode error.
    pub fn from_json(body: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        for field in ["diagnosis", "findings"] {
            if value.get(field).is_none_or(|v| v.is_null()) {
                return Err(CoreError::MissingField(field.to_string()));
            }
        }
        let input: DiagnosticInput = serde_json::from_value(value)?;
        input.check()?;
        Ok(input)
    }

    /// Enforce the input contract before any external call is attempted.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.diagnosis.trim().is_empty() {
            return Err(CoreError::MissingField("diagnosis".to_string()));
        }
        if self.findings.is_empty() {
            return Err(CoreError::MissingField("findings".to_string()));
        }
        if let Some(bone_loss) = &self.findings.bone_loss
            && !(0.0..=100.0).contains(&bone_loss.percentage)
        {
            return Err(CoreError::InvalidField {
                field: "findings.boneLoss.percentage".to_string(),
                reason: format!("{} is outside [0, 100]", bone_loss.percentage),
            });
        }
        for (i, pathology) in self.findings.pathologies.iter().enumerate() {
            if !(0.0..=1.0).contains(&pathology.confidence) {
                return Err(CoreError::InvalidField {
                    field: format!("findings.pathologies[{i}].confidence"),
                    reason: format!("{} is outside [0, 1]", pathology.confidence),
                });
            }
        }
        Ok(())
    }
}
