use analysis_core::{AnalysisError, Bar, EngineConfig, FinancialStatement, PriceSeries};
use fundamental_analysis::{FinancialReport, FundamentalAnalysisEngine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use technical_analysis::{TechnicalAnalysisEngine, TechnicalVerdict};

/// Inputs for one instrument, already fetched by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    /// Daily bars; ordered by date before analysis
    #[serde(default)]
    pub bars: Vec<Bar>,
    /// One entry per reporting period
    #[serde(default)]
    pub statements: Vec<FinancialStatement>,
}

/// Both verdicts for one instrument, reported side by side.
///
/// Each half fails independently: a short price history leaves
/// `technical` empty and fills `technical_error`, without touching the
/// financial half (and vice versa).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub technical: Option<TechnicalVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_error: Option<String>,
    pub financial: Option<FinancialReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOrchestrator {
    technical_analyzer: TechnicalAnalysisEngine,
    fundamental_analyzer: FundamentalAnalysisEngine,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            technical_analyzer: TechnicalAnalysisEngine::with_config(config.indicators)?,
            fundamental_analyzer: FundamentalAnalysisEngine::with_profile(config.current_ratio_profile),
        })
    }

    pub fn technical_engine(&self) -> &TechnicalAnalysisEngine {
        &self.technical_analyzer
    }

    pub fn fundamental_engine(&self) -> &FundamentalAnalysisEngine {
        &self.fundamental_analyzer
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        tracing::info!(
            "Analyzing {} ({} bars, {} statements)",
            request.symbol,
            request.bars.len(),
            request.statements.len()
        );

        let technical = PriceSeries::from_unordered(request.bars.clone())
            .and_then(|series| self.technical_analyzer.analyze(&series));
        let financial = self.fundamental_analyzer.analyze_history(&request.statements);

        let (technical, technical_error) = split(technical);
        let (financial, financial_error) = split(financial);

        match (&technical, &financial) {
            (Some(t), Some(f)) => tracing::info!(
                "{}: technical {} / financial {}",
                request.symbol,
                t.recommendation.to_label(),
                f.latest.overall.to_label()
            ),
            (Some(t), None) => tracing::info!("{}: technical {}", request.symbol, t.recommendation.to_label()),
            (None, Some(f)) => tracing::info!("{}: financial {}", request.symbol, f.latest.overall.to_label()),
            (None, None) => tracing::warn!("{}: no verdict available", request.symbol),
        }

        AnalysisReport {
            symbol: request.symbol.clone(),
            technical,
            technical_error,
            financial,
            financial_error,
        }
    }

    /// Analyze independent instruments in parallel.
    ///
    /// Reports come back in request order.
    pub fn analyze_many(&self, requests: &[AnalysisRequest]) -> Vec<AnalysisReport> {
        tracing::info!("Analyzing {} instruments", requests.len());
        requests.par_iter().map(|request| self.analyze(request)).collect()
    }
}

fn split<T>(result: Result<T, AnalysisError>) -> (Option<T>, Option<String>) {
    match result {
        Ok(value) => (Some(value), None),
        Err(e) => (None, Some(e.to_string())),
    }
}
