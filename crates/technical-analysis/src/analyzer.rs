use analysis_core::{AnalysisError, IndicatorConfig, PriceSeries};
use serde::{Deserialize, Serialize};

use crate::indicators::{IndicatorSeries, IndicatorSnapshot};
use crate::recommendation::{Recommendation, VoteTally};
use crate::signals::{cast_votes, classify, IndicatorStates, IndicatorVote};

/// Result of analyzing one closed price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalVerdict {
    pub indicators: IndicatorSnapshot,
    pub states: IndicatorStates,
    pub votes: Vec<IndicatorVote>,
    pub tally: VoteTally,
    pub recommendation: Recommendation,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
}

/// Stateless technical engine; the indicator windows are fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct TechnicalAnalysisEngine {
    config: IndicatorConfig,
}

impl TechnicalAnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndicatorConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn analyze(&self, series: &PriceSeries) -> Result<TechnicalVerdict, AnalysisError> {
        let indicators = match IndicatorSeries::compute(series, &self.config) {
            Ok(indicators) => indicators,
            Err(e) => {
                tracing::warn!("Technical analysis unavailable: {}", e);
                return Err(e);
            }
        };

        let (current, previous) = match (indicators.latest(), indicators.previous()) {
            (Some(current), Some(previous)) => (current, previous),
            _ => {
                return Err(AnalysisError::InsufficientData(
                    "Need at least two bars for crossover detection".to_string(),
                ))
            }
        };

        let states = classify(&current);
        let votes = cast_votes(&current, &previous);
        let tally = VoteTally::from_votes(&votes);
        let recommendation = Recommendation::from_tally(tally);

        let price_change = current.close - previous.close;
        // closes are validated positive by PriceSeries
        let price_change_percent = price_change / previous.close * 100.0;

        for v in &votes {
            tracing::debug!("{} vote: {:?}", v.indicator.as_str(), v.vote);
        }

        tracing::debug!(
            "Technical verdict over {} bars: {} buy / {} sell -> {}",
            series.len(),
            tally.buy_count,
            tally.sell_count,
            recommendation.to_label()
        );

        Ok(TechnicalVerdict {
            indicators: current,
            states,
            votes,
            tally,
            recommendation,
            current_price: current.close,
            price_change,
            price_change_percent,
        })
    }
}

/// Analyze a series with the default indicator windows (MA 5/20, RSI 14,
/// MACD 12/26/9, Bollinger 20 x 2).
pub fn compute_technical_verdict(series: &PriceSeries) -> Result<TechnicalVerdict, AnalysisError> {
    TechnicalAnalysisEngine::new().analyze(series)
}
