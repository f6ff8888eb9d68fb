//! Scam Sentry CLI
//!
//! Scores a suspicious message and prints the risk report.
//!
//! Usage:
//!   scam_sentry [--json] <text...>      score the given text
//!   echo "..." | scam_sentry [--json]   score stdin
//!   scam_sentry --samples [--json]      score the built-in sample messages
//!
//! Environment:
//!   RUST_LOG - Log level (default: warn, logs go to stderr)

use scam_sentry::{score, AppError, AppResult, RiskAssessment, SAMPLE_MESSAGES};

use clap::Parser;
use eyre::Result;
use std::io::Read;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "scam_sentry")]
#[command(version, about = "Score suspicious messages for fraud risk", long_about = None)]
struct Cli {
    /// Print the assessment as JSON
    #[arg(long)]
    json: bool,

    /// Score the built-in sample scam messages
    #[arg(long)]
    samples: bool,

    /// Message to score (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    text: Vec<String>,
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if cli.samples {
        for sample in SAMPLE_MESSAGES.iter() {
            let assessment = score(sample.text);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("[{}] {}", sample.channel.as_str(), sample.title);
                println!("   \"{}\"", sample.text);
                print!("{}", assessment.summary());
                println!();
            }
        }
        return Ok(());
    }

    let text = match read_input(&cli) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("Run with --help for usage");
            std::process::exit(e.code.exit_code());
        }
    };

    debug!(text_len = text.len(), "Scoring input");
    let assessment = score(&text);
    print_assessment(&assessment, cli.json)?;

    Ok(())
}

/// Text from arguments, or stdin when none were given. Blank input is an error.
fn read_input(cli: &Cli) -> AppResult<String> {
    let text = if cli.text.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        cli.text.join(" ")
    };

    if text.trim().is_empty() {
        return Err(AppError::empty_text());
    }

    Ok(text)
}

fn print_assessment(assessment: &RiskAssessment, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(assessment)?);
    } else {
        print!("{}", assessment.summary());
    }
    Ok(())
}
