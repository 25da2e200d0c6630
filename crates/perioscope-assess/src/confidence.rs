use perioscope_core::models::confidence::ConfidenceAssessment;
use perioscope_core::models::findings::CaseFindings;
use perioscope_core::rules::{
    BASE_CONFIDENCE, BONE_LOSS_CONSISTENCY_BONUS, MAX_CONFIDENCE, PATHOLOGY_CONFIDENCE_BONUS,
    PATHOLOGY_CONFIDENCE_THRESHOLD, band_for,
};

/// Score how far the structured findings corroborate themselves.
///
/// Starts at [`BASE_CONFIDENCE`], adds [`BONE_LOSS_CONSISTENCY_BONUS`] when
/// the bone-loss percentage lies in its stated severity's band, and adds
/// [`PATHOLOGY_CONFIDENCE_BONUS`] scaled by the share of pathologies
/// detected with confidence above [`PATHOLOGY_CONFIDENCE_THRESHOLD`].
/// Capped at 1.0.
pub fn score(findings: &CaseFindings) -> ConfidenceAssessment {
    let mut score = BASE_CONFIDENCE;
    let mut validations = Vec::new();

    match &findings.bone_loss {
        Some(bone_loss) => {
            let band = band_for(bone_loss.severity);
            if band.contains(bone_loss.percentage) {
                score += BONE_LOSS_CONSISTENCY_BONUS;
                validations.push(format!(
                    "Bone loss of {:.1}% is consistent with {} severity",
                    bone_loss.percentage, bone_loss.severity
                ));
            } else {
                validations.push(format!(
                    "Bone loss of {:.1}% is outside the expected range for {} severity ({}-{}%)",
                    bone_loss.percentage,
                    bone_loss.severity,
                    band.above.unwrap_or(0.0),
                    band.up_to
                ));
            }
        }
        None => validations.push("No bone-loss measurement available".to_string()),
    }

    let total = findings.pathologies.len();
    if total > 0 {
        let confident = findings
            .pathologies
            .iter()
            .filter(|p| p.confidence > PATHOLOGY_CONFIDENCE_THRESHOLD)
            .count();
        score += PATHOLOGY_CONFIDENCE_BONUS * (confident as f64 / total as f64);
        validations.push(format!(
            "{confident} of {total} pathologies detected with confidence above {:.0}%",
            PATHOLOGY_CONFIDENCE_THRESHOLD * 100.0
        ));
    } else {
        validations.push("No pathologies reported".to_string());
    }

    ConfidenceAssessment {
        confidence_score: score.min(MAX_CONFIDENCE),
        validations,
    }
}
