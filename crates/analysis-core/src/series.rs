//! Rolling-window statistics over an ordered numeric series.
//!
//! Every function returns a vector aligned index-for-index with its input.
//! Windowed functions leave the first `window - 1` entries as `None`. EWMA is
//! defined from the first observation onwards, so its span may exceed the
//! series length.

use crate::AnalysisError;

fn check_window(len: usize, window: usize, min_window: usize, name: &str) -> Result<(), AnalysisError> {
    if window < min_window {
        return Err(AnalysisError::InsufficientData(format!(
            "{} window must be at least {}, got {}",
            name, min_window, window
        )));
    }
    if window > len {
        return Err(AnalysisError::InsufficientData(format!(
            "{} window {} exceeds series length {}",
            name, window, len
        )));
    }
    Ok(())
}

/// Simple rolling mean
pub fn rolling_mean(data: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_window(data.len(), window, 1, "rolling_mean")?;

    let mut result = vec![None; window - 1];
    result.extend(
        data.windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
    );
    Ok(result)
}

/// Rolling sample standard deviation (divides by `window - 1`).
///
/// Bollinger bands use this estimator too, so both band edges and the mean
/// share one definition.
pub fn rolling_std(data: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_window(data.len(), window, 2, "rolling_std")?;

    let mut result = vec![None; window - 1];
    result.extend(data.windows(window).map(|w| {
        let mean = w.iter().sum::<f64>() / window as f64;
        let variance = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
        Some(variance.sqrt())
    }));
    Ok(result)
}

/// Exponentially weighted moving average with `alpha = 2 / (span + 1)`,
/// seeded by the first observation.
pub fn ewma(data: &[f64], span: usize) -> Result<Vec<f64>, AnalysisError> {
    if span == 0 {
        return Err(AnalysisError::InsufficientData("ewma span must be at least 1".to_string()));
    }
    if data.is_empty() {
        return Err(AnalysisError::InsufficientData("ewma of an empty series".to_string()));
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(data.len());
    let mut prev = data[0];
    result.push(prev);
    for &value in &data[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        result.push(prev);
    }
    Ok(result)
}
