//! Static clinical rules: confidence contributions, severity bands, staging
//! thresholds and the narrative templates used by the fallback generator.
//!
//! Everything here is read-only and shared across concurrent assessments.

use crate::models::findings::Severity;
use crate::models::input::RiskFactors;
use crate::models::stage::Prognosis;

// ── Confidence ───────────────────────────────────────────────────────────────

/// Applied to every case unconditionally.
pub const BASE_CONFIDENCE: f64 = 0.45;

/// Added when the bone-loss percentage lies inside its severity's band.
pub const BONE_LOSS_CONSISTENCY_BONUS: f64 = 0.35;

/// Scaled by the fraction of pathologies above
/// [`PATHOLOGY_CONFIDENCE_THRESHOLD`].
pub const PATHOLOGY_CONFIDENCE_BONUS: f64 = 0.35;

/// A pathology counts as corroborated when its confidence is strictly above this.
pub const PATHOLOGY_CONFIDENCE_THRESHOLD: f64 = 0.75;

/// Below this score the model path is not attempted.
pub const MINIMUM_ACCEPTABLE_CONFIDENCE: f64 = 0.65;

pub const MAX_CONFIDENCE: f64 = 1.0;

// ── Severity bands ───────────────────────────────────────────────────────────

/// Expected bone-loss percentage range for a stated severity.
///
/// The lower bound is exclusive except for the first band, which starts at 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBand {
    pub severity: Severity,
    pub above: Option<f64>,
    pub up_to: f64,
}

impl SeverityBand {
    pub fn contains(&self, percentage: f64) -> bool {
        let lower_ok = match self.above {
            Some(lo) => percentage > lo,
            None => percentage >= 0.0,
        };
        lower_ok && percentage <= self.up_to
    }
}

pub const SEVERITY_BANDS: [SeverityBand; 3] = [
    SeverityBand {
        severity: Severity::Mild,
        above: None,
        up_to: 30.0,
    },
    SeverityBand {
        severity: Severity::Moderate,
        above: Some(30.0),
        up_to: 50.0,
    },
    SeverityBand {
        severity: Severity::Severe,
        above: Some(50.0),
        up_to: 100.0,
    },
];

pub fn band_for(severity: Severity) -> SeverityBand {
    match severity {
        Severity::Mild => SEVERITY_BANDS[0],
        Severity::Moderate => SEVERITY_BANDS[1],
        Severity::Severe => SEVERITY_BANDS[2],
    }
}

/// Severity implied by a bone-loss percentage. Values above 100 are severe.
pub fn severity_for_percentage(percentage: f64) -> Severity {
    SEVERITY_BANDS
        .iter()
        .find(|band| band.contains(percentage))
        .map(|band| band.severity)
        .unwrap_or(if percentage > 0.0 {
            Severity::Severe
        } else {
            Severity::Mild
        })
}

/// Prognosis used by the fallback narrative. Depends on severity only.
pub fn prognosis_for_severity(severity: Option<Severity>) -> Prognosis {
    match severity {
        Some(Severity::Severe) => Prognosis::Poor,
        Some(Severity::Moderate) => Prognosis::Fair,
        _ => Prognosis::Good,
    }
}

// ── Staging thresholds ───────────────────────────────────────────────────────
//
// Shared by the joint percentage/depth ladder and the percentage-only
// classifier. All upper bounds are inclusive; the healthy band below
// Stage I is exclusive on both axes.

pub const STAGE_I_MAX_PERCENT: f64 = 15.0;
pub const STAGE_II_MAX_PERCENT: f64 = 33.0;
pub const STAGE_III_MAX_PERCENT: f64 = 50.0;

pub const STAGE_I_MAX_DEPTH_MM: f64 = 2.0;
pub const STAGE_II_MAX_DEPTH_MM: f64 = 3.0;
pub const STAGE_III_MAX_DEPTH_MM: f64 = 5.0;

// ── Narrative templates ──────────────────────────────────────────────────────

pub fn condition_implications(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Mild => &[
            "Early attachment loss that is reversible with consistent plaque control",
            "Low short-term risk to tooth stability",
        ],
        Severity::Moderate => &[
            "Progressive attachment loss likely without periodontal therapy",
            "Increased risk of furcation involvement and tooth mobility",
        ],
        Severity::Severe => &[
            "Substantial loss of supporting bone compromising tooth stability",
            "High risk of tooth loss without surgical or regenerative intervention",
            "Potential systemic inflammatory burden",
        ],
    }
}

pub fn mitigation_strategies(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Mild => &[
            "Reinforce oral hygiene instruction at every visit",
            "Professional prophylaxis every six months",
        ],
        Severity::Moderate => &[
            "Scaling and root planing of affected sites",
            "Periodontal maintenance every three to four months",
        ],
        Severity::Severe => &[
            "Referral to a periodontist for surgical evaluation",
            "Periodontal maintenance every three months",
            "Monitor mobility and occlusal trauma",
        ],
    }
}

pub fn immediate_actions(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Mild => &["Full-mouth periodontal charting", "Supragingival debridement"],
        Severity::Moderate => &[
            "Full-mouth periodontal charting",
            "Scaling and root planing of sites with bone loss",
        ],
        Severity::Severe => &[
            "Full-mouth periodontal charting and mobility assessment",
            "Scaling and root planing under local anaesthesia",
            "Periodontal specialist referral",
        ],
    }
}

pub fn short_term_actions(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Mild => &["Re-evaluate gingival inflammation in 4 to 6 weeks"],
        Severity::Moderate => &[
            "Re-evaluate pocket depths 6 to 8 weeks after root planing",
            "Consider adjunctive local antimicrobial therapy for residual pockets",
        ],
        Severity::Severe => &[
            "Re-evaluate 6 to 8 weeks after initial therapy",
            "Plan surgical or regenerative therapy for non-responding sites",
        ],
    }
}

pub fn long_term_actions(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Mild => &["Routine recall with annual radiographic review"],
        Severity::Moderate => &[
            "Supportive periodontal therapy every 3 to 4 months",
            "Radiographic bone-level monitoring every 12 to 18 months",
        ],
        Severity::Severe => &[
            "Supportive periodontal therapy every 3 months",
            "Prosthetic planning for teeth with hopeless prognosis",
            "Radiographic bone-level monitoring every 12 months",
        ],
    }
}

pub fn future_risk(severity: Severity) -> &'static str {
    match severity {
        Severity::Mild => "Low risk of progression with consistent home care and routine recall",
        Severity::Moderate => "Moderate risk of further attachment loss without active therapy",
        Severity::Severe => "High risk of tooth loss without prompt specialist intervention",
    }
}

pub fn pathology_implications(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Mild => &["Monitor at the next recall visit", "Confirm clinically before treatment"],
        Severity::Moderate => &[
            "Include in the current treatment plan",
            "Confirm clinically before treatment",
        ],
        Severity::Severe => &[
            "Prompt treatment required to prevent progression",
            "Confirm clinically before treatment",
        ],
    }
}

pub const PREVENTIVE_MEASURES: &[&str] = &[
    "Twice-daily brushing with fluoride toothpaste",
    "Daily interdental cleaning",
    "Regular professional periodontal assessment",
];

pub const LIFESTYLE_ADVICE: &[&str] = &[
    "Balanced diet low in refined sugars",
    "Limit alcohol intake",
];

pub const SMOKING_RISK: &str =
    "Smoking impairs periodontal healing and accelerates attachment loss";
pub const DIABETES_RISK: &str =
    "Diabetes increases susceptibility to periodontal breakdown and slows healing";
pub const HYPERTENSION_RISK: &str =
    "Hypertension and its medications may affect gingival tissues and surgical planning";
pub const NO_SYSTEMIC_RISK: &str =
    "No systemic risk factors reported; local plaque control remains the primary risk driver";

pub const SMOKING_LIFESTYLE: &str = "Smoking cessation support";
pub const DIABETES_LIFESTYLE: &str = "Maintain glycaemic control in coordination with the physician";
pub const HYPERTENSION_LIFESTYLE: &str = "Continue blood pressure management and medication review";

/// One templated sentence per reported risk factor, or a single default
/// sentence when none are present. Never empty.
pub fn risk_factor_sentences(risk: &RiskFactors) -> Vec<String> {
    let mut sentences = Vec::new();
    if risk.smoking {
        sentences.push(SMOKING_RISK.to_string());
    }
    if risk.diabetes {
        sentences.push(DIABETES_RISK.to_string());
    }
    if risk.hypertension {
        sentences.push(HYPERTENSION_RISK.to_string());
    }
    if sentences.is_empty() {
        sentences.push(NO_SYSTEMIC_RISK.to_string());
    }
    sentences
}

pub fn long_term_outlook(prognosis: Prognosis) -> &'static str {
    match prognosis {
        Prognosis::Good => {
            "Periodontal support is expected to remain stable with routine maintenance"
        }
        Prognosis::Fair => {
            "Stability is achievable with active therapy and strict supportive care"
        }
        Prognosis::Poor => {
            "Further attachment loss is likely; some teeth may not be retainable long term"
        }
        Prognosis::Questionable => {
            "Long-term retention is uncertain and depends on response to advanced therapy"
        }
    }
}
