//! Stage classification.
//!
//! Two classifiers share the thresholds in [`perioscope_core::rules`]:
//!
//! - [`classify`] walks a joint percentage/depth ladder from least to most
//!   severe. The first satisfied rung wins, so either axis alone can
//!   escalate the stage.
//! - [`classify_by_percentage`] uses the percentage only. It never returns
//!   "No Periodontitis" and is used where no depth measurement exists.
//!
//! Both treat every upper bound as inclusive (`≤`).

use perioscope_core::models::stage::PeriodontalStage;
use perioscope_core::rules::{
    STAGE_I_MAX_DEPTH_MM, STAGE_I_MAX_PERCENT, STAGE_II_MAX_DEPTH_MM, STAGE_II_MAX_PERCENT,
    STAGE_III_MAX_DEPTH_MM, STAGE_III_MAX_PERCENT,
};

/// Classify from bone-loss percentage and CEJ-to-bone distance (mm).
pub fn classify(percentage: f64, cej_to_bone_mm: f64) -> PeriodontalStage {
    if percentage < STAGE_I_MAX_PERCENT && cej_to_bone_mm < STAGE_I_MAX_DEPTH_MM {
        PeriodontalStage::NoPeriodontitis
    } else if percentage <= STAGE_I_MAX_PERCENT && cej_to_bone_mm <= STAGE_I_MAX_DEPTH_MM {
        PeriodontalStage::StageI
    } else if percentage <= STAGE_II_MAX_PERCENT && cej_to_bone_mm <= STAGE_II_MAX_DEPTH_MM {
        PeriodontalStage::StageII
    } else if percentage <= STAGE_III_MAX_PERCENT && cej_to_bone_mm <= STAGE_III_MAX_DEPTH_MM {
        PeriodontalStage::StageIII
    } else {
        PeriodontalStage::StageIV
    }
}

/// Classify from bone-loss percentage alone.
pub fn classify_by_percentage(percentage: f64) -> PeriodontalStage {
    if percentage <= STAGE_I_MAX_PERCENT {
        PeriodontalStage::StageI
    } else if percentage <= STAGE_II_MAX_PERCENT {
        PeriodontalStage::StageII
    } else if percentage <= STAGE_III_MAX_PERCENT {
        PeriodontalStage::StageIII
    } else {
        PeriodontalStage::StageIV
    }
}
