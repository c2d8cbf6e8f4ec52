use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::AnalysisError;

/// Indicator windows, fixed when an engine is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub ma_short_window: usize,   // 5
    pub ma_long_window: usize,    // 20
    pub rsi_period: usize,        // 14
    pub macd_fast: usize,         // 12
    pub macd_slow: usize,         // 26
    pub macd_signal: usize,       // 9
    pub bollinger_window: usize,  // 20
    pub bollinger_k: f64,         // 2.0
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_short_window: 5,
            ma_long_window: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_window: 20,
            bollinger_k: 2.0,
        }
    }
}

impl IndicatorConfig {
    /// Shortest series every windowed indicator can be evaluated on.
    /// RSI needs one extra bar because it works on bar-to-bar deltas.
    pub fn min_bars(&self) -> usize {
        self.ma_long_window
            .max(self.bollinger_window)
            .max(self.rsi_period + 1)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let windows = [
            ("ma_short_window", self.ma_short_window),
            ("ma_long_window", self.ma_long_window),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(AnalysisError::InvalidConfig(format!("{} must be greater than 0", name)));
        }
        if self.ma_short_window >= self.ma_long_window {
            return Err(AnalysisError::InvalidConfig(format!(
                "ma_short_window ({}) must be less than ma_long_window ({})",
                self.ma_short_window, self.ma_long_window
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(AnalysisError::InvalidConfig(format!(
                "macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.bollinger_window < 2 {
            return Err(AnalysisError::InvalidConfig(
                "bollinger_window must be at least 2".to_string(),
            ));
        }
        if !self.bollinger_k.is_finite() || self.bollinger_k <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "bollinger_k must be a positive number, got {}",
                self.bollinger_k
            )));
        }
        Ok(())
    }
}

/// Which current-ratio thresholds grade liquidity.
///
/// `Standard` (GOOD > 150%, CAUTION > 100%) is canonical. `Conservative`
/// (GOOD > 200%, CAUTION > 150%) must be selected explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentRatioProfile {
    #[default]
    Standard,
    Conservative,
}

impl CurrentRatioProfile {
    /// `(good_above, caution_above)` in percent
    pub fn thresholds(&self) -> (f64, f64) {
        match self {
            CurrentRatioProfile::Standard => (150.0, 100.0),
            CurrentRatioProfile::Conservative => (200.0, 150.0),
        }
    }
}

impl FromStr for CurrentRatioProfile {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(CurrentRatioProfile::Standard),
            "conservative" => Ok(CurrentRatioProfile::Conservative),
            other => Err(AnalysisError::InvalidConfig(format!(
                "unknown current ratio profile {:?} (expected standard or conservative)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub indicators: IndicatorConfig,
    pub current_ratio_profile: CurrentRatioProfile,
}

fn env_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{} is not a valid value", key))
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            indicators: IndicatorConfig {
                ma_short_window: env_or("MA_SHORT_WINDOW", "5")?,
                ma_long_window: env_or("MA_LONG_WINDOW", "20")?,
                rsi_period: env_or("RSI_PERIOD", "14")?,
                macd_fast: env_or("MACD_FAST", "12")?,
                macd_slow: env_or("MACD_SLOW", "26")?,
                macd_signal: env_or("MACD_SIGNAL", "9")?,
                bollinger_window: env_or("BOLLINGER_WINDOW", "20")?,
                bollinger_k: env_or("BOLLINGER_K", "2.0")?,
            },
            current_ratio_profile: env_or("CURRENT_RATIO_PROFILE", "standard")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.indicators.validate()
    }
}
