use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Clinical severity. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    /// Parse the wire form. Case-sensitive, matching the response schema.
    pub fn parse(s: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|sev| sev.as_str() == s)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single derived numeric result in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Measurement {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    /// In [0, 1].
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BoneLossFinding {
    /// In [0, 100].
    pub percentage: f64,
    pub severity: Severity,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

/// A pathology reported by the image-analysis collaborator or the clinician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PathologyFinding {
    #[serde(rename = "type")]
    pub kind: String,
    /// Detector confidence in [0, 1].
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// Structured findings for one case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CaseFindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bone_loss: Option<BoneLossFinding>,
    #[serde(default)]
    pub pathologies: Vec<PathologyFinding>,
}

impl CaseFindings {
    pub fn is_empty(&self) -> bool {
        self.bone_loss.is_none() && self.pathologies.is_empty()
    }

    /// The most severe pathology severity, ignoring pathologies without one.
    pub fn worst_pathology_severity(&self) -> Option<Severity> {
        self.pathologies.iter().filter_map(|p| p.severity).max()
    }
}
