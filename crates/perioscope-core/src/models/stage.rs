use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Periodontal disease stage, ordered from healthy to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PeriodontalStage {
    #[serde(rename = "No Periodontitis")]
    NoPeriodontitis,
    #[serde(rename = "Stage I")]
    StageI,
    #[serde(rename = "Stage II")]
    StageII,
    #[serde(rename = "Stage III")]
    StageIII,
    #[serde(rename = "Stage IV")]
    StageIV,
}

impl PeriodontalStage {
    pub fn label(&self) -> &'static str {
        match self {
            PeriodontalStage::NoPeriodontitis => "No Periodontitis",
            PeriodontalStage::StageI => "Stage I",
            PeriodontalStage::StageII => "Stage II",
            PeriodontalStage::StageIII => "Stage III",
            PeriodontalStage::StageIV => "Stage IV",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PeriodontalStage::NoPeriodontitis => {
                "No radiographic evidence of periodontitis"
            }
            PeriodontalStage::StageI => "Initial periodontitis with minimal bone loss",
            PeriodontalStage::StageII => "Moderate periodontitis with bone loss up to a third of the root",
            PeriodontalStage::StageIII => {
                "Severe periodontitis with potential for additional tooth loss"
            }
            PeriodontalStage::StageIV => {
                "Advanced periodontitis with potential for loss of dentition"
            }
        }
    }

    pub fn prognosis(&self) -> Prognosis {
        match self {
            PeriodontalStage::NoPeriodontitis | PeriodontalStage::StageI => Prognosis::Good,
            PeriodontalStage::StageII => Prognosis::Fair,
            PeriodontalStage::StageIII => Prognosis::Poor,
            PeriodontalStage::StageIV => Prognosis::Questionable,
        }
    }

    pub fn result(&self) -> PeriodontalStageResult {
        PeriodontalStageResult {
            stage: *self,
            description: self.description().to_string(),
            prognosis: self.prognosis(),
        }
    }
}

impl fmt::Display for PeriodontalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Prognosis {
    Good,
    Fair,
    Poor,
    Questionable,
}

impl Prognosis {
    pub const ALL: [Prognosis; 4] = [
        Prognosis::Good,
        Prognosis::Fair,
        Prognosis::Poor,
        Prognosis::Questionable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Prognosis::Good => "Good",
            Prognosis::Fair => "Fair",
            Prognosis::Poor => "Poor",
            Prognosis::Questionable => "Questionable",
        }
    }

    pub fn parse(s: &str) -> Option<Prognosis> {
        Prognosis::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for Prognosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived staging verdict. Never edited directly; recomputed whenever the
/// bone-loss percentage changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeriodontalStageResult {
    pub stage: PeriodontalStage,
    pub description: String,
    pub prognosis: Prognosis,
}
