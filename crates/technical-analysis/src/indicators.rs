use analysis_core::series::{ewma, rolling_mean, rolling_std};
use analysis_core::{AnalysisError, IndicatorConfig, PriceSeries};
use serde::{Deserialize, Serialize};

/// Simple Moving Average, `None` during warm-up
pub fn sma(data: &[f64], period: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    rolling_mean(data, period)
}

/// RSI value from average gain and average loss.
///
/// No losses with some gains is maximal strength (100). A window with neither
/// gains nor losses has no momentum at all and sits at the midpoint (50).
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 50.0 };
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// Relative Strength Index using simple rolling means of gains and losses.
///
/// Index 0 has no delta, so the first defined value is at index `period`.
pub fn rsi(data: &[f64], period: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    if period == 0 || data.len() < period + 1 {
        return Err(AnalysisError::InsufficientData(format!(
            "RSI({}) needs {} closes, have {}",
            period,
            period + 1,
            data.len()
        )));
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);
    for w in data.windows(2) {
        let change = w[1] - w[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gain = rolling_mean(&gains, period)?;
    let avg_loss = rolling_mean(&losses, period)?;

    let mut rsi_values = Vec::with_capacity(data.len());
    rsi_values.push(None);
    rsi_values.extend(avg_gain.iter().zip(&avg_loss).map(|pair| match pair {
        (Some(gain), Some(loss)) => Some(rsi_from_averages(*gain, *loss)),
        _ => None,
    }));
    Ok(rsi_values)
}

/// MACD (Moving Average Convergence Divergence), aligned with the input
pub struct MacdResult {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(data: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> Result<MacdResult, AnalysisError> {
    if fast_period >= slow_period {
        return Err(AnalysisError::InvalidConfig(format!(
            "MACD fast period {} must be shorter than slow period {}",
            fast_period, slow_period
        )));
    }

    let ema_fast = ewma(data, fast_period)?;
    let ema_slow = ewma(data, slow_period)?;
    let macd_line: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let signal_line = ewma(&macd_line, signal_period)?;
    let histogram = macd_line.iter().zip(&signal_line).map(|(m, s)| m - s).collect();

    Ok(MacdResult {
        macd_line,
        signal_line,
        histogram,
    })
}

/// Bollinger Bands around a rolling mean, using the sample standard deviation
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn bollinger_bands(data: &[f64], period: usize, std_dev: f64) -> Result<BollingerBands, AnalysisError> {
    let middle = rolling_mean(data, period)?;
    let deviation = rolling_std(data, period)?;

    let (upper, lower): (Vec<_>, Vec<_>) = middle
        .iter()
        .zip(&deviation)
        .map(|pair| match pair {
            (Some(mean), Some(sd)) => (Some(mean + std_dev * sd), Some(mean - std_dev * sd)),
            _ => (None, None),
        })
        .unzip();

    Ok(BollingerBands {
        upper,
        middle,
        lower,
    })
}

/// Indicator values at a single bar.
///
/// Windowed fields are `None` while their window is still warming up; such
/// values must never be compared numerically. MACD is defined from the first
/// bar onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

/// Every indicator over a whole price series, index-aligned with its bars.
pub struct IndicatorSeries {
    closes: Vec<f64>,
    ma_short: Vec<Option<f64>>,
    ma_long: Vec<Option<f64>>,
    rsi: Vec<Option<f64>>,
    macd: MacdResult,
    bollinger: BollingerBands,
}

impl IndicatorSeries {
    /// Compute all indicators. A series shorter than `config.min_bars()` is
    /// rejected up front instead of producing partially defined output.
    pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let required = config.min_bars();
        if series.len() < required {
            return Err(AnalysisError::InsufficientData(format!(
                "Need at least {} bars for technical analysis, have {}",
                required,
                series.len()
            )));
        }

        let closes = series.closes();
        Ok(Self {
            ma_short: sma(&closes, config.ma_short_window)?,
            ma_long: sma(&closes, config.ma_long_window)?,
            rsi: rsi(&closes, config.rsi_period)?,
            macd: macd(&closes, config.macd_fast, config.macd_slow, config.macd_signal)?,
            bollinger: bollinger_bands(&closes, config.bollinger_window, config.bollinger_k)?,
            closes,
        })
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn snapshot_at(&self, index: usize) -> Option<IndicatorSnapshot> {
        let close = *self.closes.get(index)?;
        Some(IndicatorSnapshot {
            close,
            ma_short: self.ma_short[index],
            ma_long: self.ma_long[index],
            rsi: self.rsi[index],
            macd: self.macd.macd_line[index],
            macd_signal: self.macd.signal_line[index],
            macd_hist: self.macd.histogram[index],
            bollinger_upper: self.bollinger.upper[index],
            bollinger_middle: self.bollinger.middle[index],
            bollinger_lower: self.bollinger.lower[index],
        })
    }

    pub fn latest(&self) -> Option<IndicatorSnapshot> {
        self.snapshot_at(self.len().checked_sub(1)?)
    }

    /// Snapshot one bar before the latest, used for crossover detection
    pub fn previous(&self) -> Option<IndicatorSnapshot> {
        self.snapshot_at(self.len().checked_sub(2)?)
    }
}
