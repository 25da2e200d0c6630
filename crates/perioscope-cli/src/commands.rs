use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use perioscope_assess::pipeline::AssessmentPipeline;
use perioscope_bedrock::client::{BedrockModel, GenerativeModel};
use perioscope_bedrock::error::CallError;
use perioscope_bedrock::limiter::RateLimiter;
use perioscope_core::models::confidence::AssessmentOutcome;
use perioscope_core::models::findings::BoneLossFinding;
use perioscope_core::models::input::DiagnosticInput;
use perioscope_core::models::landmark::LandmarkSet;
use perioscope_staging::{StagingReport, stage_landmarks};

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::config::{self, PerioscopeConfig};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOutput {
    pub report: StagingReport,
    pub finding: BoneLossFinding,
}

pub async fn run(cli: Cli) -> eyre::Result<()> {
    let config_path = config::resolve_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Stage {
            cej,
            bone,
            apex,
            pixels_per_mm,
            sites,
            landmark_confidence,
        } => {
            let landmarks = LandmarkSet { cej, bone, apex };
            let output = stage_output(&landmarks, pixels_per_mm, sites, landmark_confidence)?;
            print_json(&output)
        }
        Commands::Assess {
            input,
            offline,
            region,
            model_id,
        } => {
            let mut config = config::load_or_default(&config_path)?;
            if let Some(region) = region {
                config.region = region;
            }
            if let Some(model_id) = model_id {
                config.model_id = model_id;
            }
            if offline {
                config.pipeline.offline = true;
            }
            assess(&input, &config).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                if !config_path.exists() {
                    return Err(eyre::eyre!(
                        "no config at {}; run `perioscope config init`",
                        config_path.display()
                    ));
                }
                let config = config::load_config(&config_path)?;
                print_json(&config)
            }
            ConfigCommands::Init {
                region,
                model_id,
                force,
            } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                let config = PerioscopeConfig::new(
                    region.unwrap_or_else(|| config::DEFAULT_REGION.to_string()),
                    model_id.unwrap_or_else(|| config::DEFAULT_MODEL_ID.to_string()),
                );
                config::save_config(&config_path, &config)?;
                print_json(&config)
            }
        },
    }
}

pub fn stage_output(
    landmarks: &LandmarkSet,
    pixels_per_mm: f64,
    sites: Vec<String>,
    landmark_confidence: f64,
) -> eyre::Result<StageOutput> {
    let report = stage_landmarks(landmarks, pixels_per_mm)?;
    info!(
        stage = %report.stage_result.stage,
        bone_loss_percentage = report.bone_loss_percentage,
        "staged landmarks"
    );
    let finding = report.to_finding(landmarks, pixels_per_mm, sites, landmark_confidence);
    Ok(StageOutput { report, finding })
}

async fn assess(input_path: &Path, config: &PerioscopeConfig) -> eyre::Result<()> {
    let body = std::fs::read_to_string(input_path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", input_path.display()))?;
    let input = DiagnosticInput::from_json(&body)?;

    let outcome = assess_case(&input, config).await?;
    info!(
        fallback = outcome.is_fallback(),
        prognosis = %outcome.analysis().refined_prognosis.status,
        "assessment complete"
    );
    print_json(&outcome)
}

/// Run one case. Offline runs never resolve the AWS environment.
pub async fn assess_case(
    input: &DiagnosticInput,
    config: &PerioscopeConfig,
) -> eyre::Result<AssessmentOutcome> {
    let limiter = Arc::new(RateLimiter::new(config.limiter));

    if config.pipeline.offline {
        let pipeline = AssessmentPipeline::new(OfflineModel, limiter, config.pipeline);
        return Ok(pipeline.assess(input).await?);
    }

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    let model = BedrockModel::new(&sdk_config, config.model_id.clone());
    let pipeline = AssessmentPipeline::new(model, limiter, config.pipeline);
    Ok(pipeline.assess(input).await?)
}

/// Stands in for the model when offline; the pipeline never calls it.
struct OfflineModel;

impl GenerativeModel for OfflineModel {
    fn model_id(&self) -> &str {
        "offline"
    }

    async fn generate(&self, _system_prompt: &str, _prompt: &str) -> Result<String, CallError> {
        Err(CallError::Service("model unavailable in offline mode".to_string()))
    }
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
