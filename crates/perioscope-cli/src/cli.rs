use std::path::PathBuf;

use clap::{Parser, Subcommand};

use perioscope_core::models::landmark::LandmarkPoint;

#[derive(Parser, Debug)]
#[command(name = "perioscope", version, about = "Periodontal decision-support pipeline")]
pub struct Cli {
    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Config file (defaults to the platform config directory)")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stage a tooth from three radiographic landmarks given in pixels.
    Stage {
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true, help = "Cemento-enamel junction as X,Y")]
        cej: LandmarkPoint,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true, help = "Alveolar bone crest as X,Y")]
        bone: LandmarkPoint,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true, help = "Root apex as X,Y")]
        apex: LandmarkPoint,
        #[arg(long)]
        pixels_per_mm: f64,
        #[arg(long = "site", help = "Anatomical site of the measurement; repeatable")]
        sites: Vec<String>,
        #[arg(long, default_value_t = 1.0)]
        landmark_confidence: f64,
    },
    /// Run the assessment pipeline on a JSON case file.
    Assess {
        input: PathBuf,
        #[arg(long, default_value_t = false, help = "Never call the model")]
        offline: bool,
        #[arg(long, help = "AWS region, overriding the config file")]
        region: Option<String>,
        #[arg(long, help = "Bedrock model or inference profile id")]
        model_id: Option<String>,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Write a fresh configuration file.
    Init {
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        model_id: Option<String>,
        #[arg(long, default_value_t = false, help = "Overwrite an existing file")]
        force: bool,
    },
}

/// Parse `X,Y` pixel coordinates.
pub fn parse_point(s: &str) -> Result<LandmarkPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{}': {e}", v.trim()))
    };
    Ok(LandmarkPoint::new(coord(x)?, coord(y)?))
}
