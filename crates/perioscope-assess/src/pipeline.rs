//! The assessment pipeline.
//!
//! For each case:
//!
//! 1. Reject inputs without a diagnosis or findings.
//! 2. Score the findings. In offline mode, or below the minimum score, go
//!    straight to the fallback generator without calling the model.
//! 3. Otherwise call the model through the shared rate limiter.
//! 4. Sanitise and validate the response. A rejected response falls back;
//!    it is never surfaced as an error.
//!
//! Quota exhaustion and service failures are returned to the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use perioscope_bedrock::client::GenerativeModel;
use perioscope_bedrock::limiter::RateLimiter;
use perioscope_bedrock::prompt::{SYSTEM_PROMPT, build_prompt};
use perioscope_bedrock::validate::parse_analysis;
use perioscope_core::models::confidence::{AssessmentOutcome, ConfidenceAssessment};
use perioscope_core::models::input::DiagnosticInput;
use perioscope_core::rules::MINIMUM_ACCEPTABLE_CONFIDENCE;

use crate::confidence;
use crate::error::PipelineError;
use crate::fallback;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Cases scoring below this never reach the model.
    pub minimum_confidence: f64,
    /// Skip the model entirely.
    pub offline: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            minimum_confidence: MINIMUM_ACCEPTABLE_CONFIDENCE,
            offline: false,
        }
    }
}

pub struct AssessmentPipeline<M> {
    model: M,
    limiter: Arc<RateLimiter>,
    config: PipelineConfig,
}

impl<M: GenerativeModel> AssessmentPipeline<M> {
    /// `limiter` should be the process-wide instance so that every
    /// pipeline shares one quota.
    pub fn new(model: M, limiter: Arc<RateLimiter>, config: PipelineConfig) -> Self {
        Self {
            model,
            limiter,
            config,
        }
    }

    pub async fn assess(&self, input: &DiagnosticInput) -> Result<AssessmentOutcome, PipelineError> {
        input.check()?;

        let assessment_id = Uuid::new_v4();
        let confidence = confidence::score(&input.findings);
        info!(
            assessment_id = %assessment_id,
            confidence = confidence.confidence_score,
            "scored case findings"
        );

        if self.config.offline {
            info!(assessment_id = %assessment_id, "offline mode, using fallback analysis");
            return Ok(fallback_outcome(
                input,
                confidence,
                Some("Model not consulted (offline mode)".to_string()),
            ));
        }

        if confidence.confidence_score < self.config.minimum_confidence {
            info!(
                assessment_id = %assessment_id,
                minimum = self.config.minimum_confidence,
                "confidence below minimum, skipping model call"
            );
            let note = format!(
                "Confidence {:.2} is below the minimum of {:.2}; model not consulted",
                confidence.confidence_score, self.config.minimum_confidence
            );
            return Ok(fallback_outcome(input, confidence, Some(note)));
        }

        let prompt = build_prompt(input)?;
        info!(
            assessment_id = %assessment_id,
            model_id = self.model.model_id(),
            "requesting model analysis"
        );
        let raw = self
            .limiter
            .invoke(|| self.model.generate(SYSTEM_PROMPT, &prompt))
            .await?;

        match parse_analysis(&raw) {
            Ok(analysis) => {
                info!(assessment_id = %assessment_id, "model analysis validated");
                Ok(AssessmentOutcome::Validated(analysis))
            }
            Err(rejection) => {
                warn!(
                    assessment_id = %assessment_id,
                    %rejection,
                    "model response rejected, using fallback analysis"
                );
                let note = format!("Model response rejected: {rejection}");
                Ok(fallback_outcome(input, confidence, Some(note)))
            }
        }
    }
}

fn fallback_outcome(
    input: &DiagnosticInput,
    mut confidence: ConfidenceAssessment,
    note: Option<String>,
) -> AssessmentOutcome {
    if let Some(note) = note {
        confidence.validations.push(note);
    }
    let analysis = fallback::generate(input, confidence.confidence_score, &confidence.validations);
    AssessmentOutcome::Fallback {
        analysis,
        confidence,
    }
}
