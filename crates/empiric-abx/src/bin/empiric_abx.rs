//! Empiric ABX CLI Tool
//!
//! Run the recommendation engine over a patient intake record in JSON.
//!
//! Usage:
//!   empiric-abx recommend <patient.json|-> [--policy <file>] [--format json|compact|text] [--unchecked]
//!   empiric-abx score <patient.json|-> [--policy <file>]
//!   empiric-abx template
//!   empiric-abx policy [--policy <file>]

use clap::{Parser, Subcommand, ValueEnum};
use empiric_abx::*;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "empiric-abx")]
#[command(version = "0.1.0")]
#[command(about = "Empiric antibiotic decision support for sepsis with pneumonia", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Policy JSON overriding the standard thresholds and weights
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    Compact,
    /// Plain-text report
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a therapy recommendation
    Recommend {
        /// Patient record JSON file, or '-' for stdin
        patient: String,

        /// Skip intake validation (allergy verification, finite values)
        #[arg(long)]
        unchecked: bool,
    },

    /// Print the MDRO risk score and tier only
    Score {
        /// Patient record JSON file, or '-' for stdin
        patient: String,
    },

    /// Print an intake record pre-filled with form defaults
    Template,

    /// Print the effective engine policy (standard unless --policy is given)
    Policy,
}

#[derive(serde::Serialize)]
struct ScoreResult {
    points: u32,
    tier: MdroRiskTier,
    moderate_at: u32,
    high_at: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let policy = match &cli.policy {
        Some(path) => EnginePolicy::from_json_file(path)?,
        None => EnginePolicy::STANDARD,
    };

    let output_str = match cli.command {
        Commands::Recommend { patient, unchecked } => {
            let record = read_record(&patient)?;
            let engine = RecommendationEngine::new(policy);
            let recommendation = if unchecked {
                engine.recommend(&record)
            } else {
                engine.recommend_verified(&record)?
            };
            match cli.format {
                OutputFormat::Text => render_text(&recommendation),
                OutputFormat::Compact => serde_json::to_string(&recommendation)?,
                OutputFormat::Json => serde_json::to_string_pretty(&recommendation)?,
            }
        }
        Commands::Score { patient } => {
            let record = read_record(&patient)?;
            let result = ScoreResult {
                points: mdro_risk_points(&record, &policy.risk_weights),
                tier: score_mdro_risk_with(&record, &policy),
                moderate_at: policy.risk_thresholds.moderate_at,
                high_at: policy.risk_thresholds.high_at,
            };
            serde_json::to_string_pretty(&result)?
        }
        Commands::Template => serde_json::to_string_pretty(&PatientRecord::intake_defaults())?,
        Commands::Policy => serde_json::to_string_pretty(&policy)?,
    };

    if let Some(output_path) = cli.output {
        fs::write(&output_path, &output_str)?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn read_record(source: &str) -> Result<PatientRecord, Box<dyn std::error::Error>> {
    let json = if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults_to_json() {
        let cli = Cli::try_parse_from(["empiric-abx", "template"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_known_formats_parse() {
        let cli = Cli::try_parse_from(["empiric-abx", "--format", "text", "recommend", "-"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        let cli = Cli::try_parse_from(["empiric-abx", "-f", "compact", "score", "-"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Compact);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["empiric-abx", "--format", "yaml", "template"]).is_err());
        assert!(Cli::try_parse_from(["empiric-abx", "--format", "txt", "recommend", "-"]).is_err());
    }
}
