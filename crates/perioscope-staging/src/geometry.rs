use serde::{Deserialize, Serialize};
use ts_rs::TS;

use perioscope_core::models::findings::{BoneLossFinding, Measurement};
use perioscope_core::models::landmark::{LandmarkPoint, LandmarkSet};
use perioscope_core::models::stage::PeriodontalStageResult;
use perioscope_core::rules;

use crate::error::StagingError;
use crate::ladder;

/// Distances and stage derived from one landmark triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StagingReport {
    /// `100 × cejToBone / rootLength`, clamped to [0, 100].
    pub bone_loss_percentage: f64,
    /// CEJ-to-apex distance in mm.
    pub root_length: f64,
    /// CEJ-to-bone distance in mm.
    pub cej_to_bone: f64,
    pub stage_result: PeriodontalStageResult,
}

/// Stage a tooth from its CEJ, crestal bone and apex landmarks.
///
/// `pixels_per_mm` converts pixel distances to millimetres. A zero-length
/// root, a non-positive scale or non-finite coordinates yield
/// [`StagingError::Indeterminate`].
pub fn stage(
    cej: LandmarkPoint,
    bone: LandmarkPoint,
    apex: LandmarkPoint,
    pixels_per_mm: f64,
) -> Result<StagingReport, StagingError> {
    if !pixels_per_mm.is_finite() || pixels_per_mm <= 0.0 {
        return Err(StagingError::Indeterminate(format!(
            "pixels per mm must be positive, got {pixels_per_mm}"
        )));
    }
    if ![cej, bone, apex].iter().all(LandmarkPoint::is_finite) {
        return Err(StagingError::Indeterminate(
            "landmark coordinates must be finite".to_string(),
        ));
    }

    let cej_to_bone = cej.distance_to(&bone) / pixels_per_mm;
    let root_length = cej.distance_to(&apex) / pixels_per_mm;

    if root_length == 0.0 {
        return Err(StagingError::Indeterminate(
            "CEJ and apex coincide; root length is zero".to_string(),
        ));
    }
    if !root_length.is_finite() || !cej_to_bone.is_finite() {
        return Err(StagingError::Indeterminate(
            "landmark distances overflow".to_string(),
        ));
    }

    let bone_loss_percentage = 100.0 * cej_to_bone / root_length;
    if bone_loss_percentage.is_nan() {
        return Err(StagingError::Indeterminate(
            "bone-loss percentage is undefined".to_string(),
        ));
    }
    let bone_loss_percentage = bone_loss_percentage.clamp(0.0, 100.0);
    let stage = ladder::classify(bone_loss_percentage, cej_to_bone);

    Ok(StagingReport {
        bone_loss_percentage,
        root_length,
        cej_to_bone,
        stage_result: stage.result(),
    })
}

pub fn stage_landmarks(
    landmarks: &LandmarkSet,
    pixels_per_mm: f64,
) -> Result<StagingReport, StagingError> {
    stage(landmarks.cej, landmarks.bone, landmarks.apex, pixels_per_mm)
}

impl StagingReport {
    /// Derive the bone-loss finding that feeds back into the case findings.
    ///
    /// `confidence` is the landmark confidence: 1.0 for clinician-placed
    /// points, the detector score for auto-detected ones.
    pub fn to_finding(
        &self,
        landmarks: &LandmarkSet,
        pixels_per_mm: f64,
        regions: Vec<String>,
        confidence: f64,
    ) -> BoneLossFinding {
        let confidence = confidence.clamp(0.0, 1.0);
        let mm = |kind: &str, value: f64| Measurement {
            kind: kind.to_string(),
            value,
            confidence,
        };

        BoneLossFinding {
            percentage: self.bone_loss_percentage,
            severity: rules::severity_for_percentage(self.bone_loss_percentage),
            regions,
            measurements: vec![
                mm("CEJ Y", landmarks.cej.y / pixels_per_mm),
                mm("Bone Y", landmarks.bone.y / pixels_per_mm),
                mm("Apex Y", landmarks.apex.y / pixels_per_mm),
                mm("CEJ to Bone", self.cej_to_bone),
                mm("Root Length", self.root_length),
            ],
        }
    }
}
