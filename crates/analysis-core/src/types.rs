use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// OHLCV bar data for one trading period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Date-ascending sequence of bars with no duplicate dates.
///
/// Every rolling-window computation in the engine is order dependent, so the
/// only way to obtain a `PriceSeries` is through a constructor that checks the
/// ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from bars that are already in ascending date order.
    pub fn new(bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(AnalysisError::InvalidData(format!(
                    "close on {} must be a positive finite number, got {}",
                    bar.date, bar.close
                )));
            }
            if i > 0 && bars[i - 1].date >= bar.date {
                let kind = if bars[i - 1].date == bar.date { "duplicate" } else { "out-of-order" };
                return Err(AnalysisError::InvalidData(format!(
                    "{} date {} at index {}",
                    kind, bar.date, i
                )));
            }
        }
        Ok(Self { bars })
    }

    /// Sort bars by date, then validate as in [`PriceSeries::new`].
    pub fn from_unordered(mut bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        bars.sort_by_key(|b| b.date);
        Self::new(bars)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<Bar>::deserialize(deserializer)?;
        PriceSeries::new(bars).map_err(serde::de::Error::custom)
    }
}

/// A raw statement figure as delivered by a financial-data provider.
///
/// Providers send either JSON numbers or locale-formatted strings such as
/// `"1,234,567"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Number(f64),
    Text(String),
}

impl From<f64> for Figure {
    fn from(value: f64) -> Self {
        Figure::Number(value)
    }
}

impl From<&str> for Figure {
    fn from(value: &str) -> Self {
        Figure::Text(value.to_string())
    }
}

/// Balance-sheet and income-statement line items for one reporting period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
    #[serde(default)]
    pub fiscal_year: Option<i32>,
    // Balance sheet
    #[serde(default)]
    pub total_liabilities: Option<Figure>,
    #[serde(default)]
    pub total_equity: Option<Figure>,
    #[serde(default)]
    pub current_assets: Option<Figure>,
    #[serde(default)]
    pub current_liabilities: Option<Figure>,
    // Income statement
    #[serde(default)]
    pub operating_income: Option<Figure>,
    #[serde(default)]
    pub revenue: Option<Figure>,
    #[serde(default)]
    pub net_income: Option<Figure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn accepts_ascending_dates() {
        let series = PriceSeries::new(vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn rejects_out_of_order_and_duplicate_dates() {
        let err = PriceSeries::new(vec![bar(2, 10.0), bar(1, 11.0)]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidData(ref m) if m.contains("out-of-order")));

        let err = PriceSeries::new(vec![bar(1, 10.0), bar(1, 11.0)]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidData(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn rejects_non_finite_close() {
        assert!(PriceSeries::new(vec![bar(1, f64::NAN)]).is_err());
        assert!(PriceSeries::new(vec![bar(1, 0.0)]).is_err());
    }

    #[test]
    fn from_unordered_sorts_first() {
        let series = PriceSeries::from_unordered(vec![bar(3, 12.0), bar(1, 10.0), bar(2, 11.0)]).unwrap();
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert!(PriceSeries::from_unordered(vec![bar(2, 1.0), bar(2, 2.0)]).is_err());
    }

    #[test]
    fn deserialize_validates_order() {
        let json = r#"[
            {"date":"2024-01-02","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1.0},
            {"date":"2024-01-01","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1.0}
        ]"#;
        assert!(serde_json::from_str::<PriceSeries>(json).is_err());
    }

    #[test]
    fn figure_accepts_numbers_and_strings() {
        let statement: FinancialStatement = serde_json::from_str(
            r#"{"fiscal_year":2023,"revenue":"1,000","operating_income":120.5}"#,
        )
        .unwrap();
        assert_eq!(statement.revenue, Some(Figure::Text("1,000".to_string())));
        assert_eq!(statement.operating_income, Some(Figure::Number(120.5)));
        assert_eq!(statement.total_equity, None);
    }
}
