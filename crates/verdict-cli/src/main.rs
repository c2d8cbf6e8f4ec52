//! verdict-cli: score instruments from pre-fetched bars and financial statements.
//!
//! Reads one analysis request (or a JSON array of them) and prints the
//! technical and financial verdicts as JSON on stdout. Logs go to stderr.
//!
//! Usage:
//!   cargo run -p verdict-cli -- --input request.json
//!   cargo run -p verdict-cli -- --input batch.json --pretty
//!   cat request.json | cargo run -p verdict-cli

use analysis_core::EngineConfig;
use analysis_orchestrator::{AnalysisOrchestrator, AnalysisReport, AnalysisRequest};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A request file holds either one instrument or a batch
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestInput {
    Batch(Vec<AnalysisRequest>),
    Single(AnalysisRequest),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ReportOutput {
    Batch(Vec<AnalysisReport>),
    Single(AnalysisReport),
}

fn run(orchestrator: &AnalysisOrchestrator, input: RequestInput) -> ReportOutput {
    match input {
        RequestInput::Batch(requests) => ReportOutput::Batch(orchestrator.analyze_many(&requests)),
        RequestInput::Single(request) => ReportOutput::Single(orchestrator.analyze(&request)),
    }
}

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    let pretty = args.iter().any(|a| a == "--pretty");
    let input_path = args
        .iter()
        .position(|a| a == "--input")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str());

    let config = EngineConfig::from_env().context("Invalid engine configuration")?;
    tracing::info!(
        "Engine config: MA {}/{}, RSI {}, MACD {}/{}/{}, Bollinger {}x{}, current ratio profile {:?}",
        config.indicators.ma_short_window,
        config.indicators.ma_long_window,
        config.indicators.rsi_period,
        config.indicators.macd_fast,
        config.indicators.macd_slow,
        config.indicators.macd_signal,
        config.indicators.bollinger_window,
        config.indicators.bollinger_k,
        config.current_ratio_profile
    );
    let orchestrator = AnalysisOrchestrator::from_config(&config)?;

    let raw = read_input(input_path)?;
    let input: RequestInput = serde_json::from_str(&raw).context("Failed to parse analysis request")?;
    let output = run(&orchestrator, input);

    let rendered = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request() {
        let input: RequestInput = serde_json::from_str(
            r#"{"symbol": "AAPL", "statements": [{"fiscal_year": 2024, "operating_income": "120", "revenue": "1,000"}]}"#,
        )
        .unwrap();
        assert!(matches!(input, RequestInput::Single(_)));

        let output = run(&AnalysisOrchestrator::new(), input);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["financial"]["latest"]["categories"]["operating_margin"], "GOOD");
    }

    #[test]
    fn test_batch_request() {
        let input: RequestInput = serde_json::from_str(
            r#"[{"symbol": "AAPL"}, {"symbol": "MSFT", "bars": [{"date": "2024-01-02", "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 10.0}]}]"#,
        )
        .unwrap();

        let output = run(&AnalysisOrchestrator::new(), input);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[1]["symbol"], "MSFT");
        assert!(json[1]["technical_error"]
            .as_str()
            .unwrap()
            .starts_with("Insufficient data"));
    }

    #[test]
    fn test_malformed_request() {
        assert!(serde_json::from_str::<RequestInput>(r#"{"bars": []}"#).is_err());
    }
}
