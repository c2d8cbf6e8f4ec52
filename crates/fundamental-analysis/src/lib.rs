pub mod figures;
pub mod growth;
pub mod health;
pub mod ratios;


pub use figures::*;
pub use growth::*;
pub use health::*;
pub use ratios::*;

use analysis_core::{AnalysisError, CurrentRatioProfile, FieldError, FinancialStatement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health verdict for one reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialVerdict {
    pub fiscal_year: Option<i32>,
    pub ratios: FinancialRatios,
    pub categories: BTreeMap<RatioKind, RatioCategory>,
    pub overall: RatioCategory,
    pub mean_weight: Option<f64>,
    /// Invalid input fields; each one made exactly one ratio `N/A`
    pub field_errors: Vec<FieldError>,
}

/// Latest-period verdict plus year-over-year growth across all periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub latest: FinancialVerdict,
    pub growth: Vec<GrowthRates>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FundamentalAnalysisEngine {
    current_ratio_profile: CurrentRatioProfile,
}

impl FundamentalAnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(current_ratio_profile: CurrentRatioProfile) -> Self {
        Self { current_ratio_profile }
    }

    pub fn analyze(&self, statement: &FinancialStatement) -> FinancialVerdict {
        let (ratios, field_errors) = compute_ratios(statement);
        for e in &field_errors {
            tracing::warn!("Financial ratio unavailable: {}", e);
        }

        let categories: BTreeMap<RatioKind, RatioCategory> = RatioKind::ALL
            .iter()
            .map(|&kind| {
                let category = ratios
                    .get(kind)
                    .map(|value| categorize(kind, value, self.current_ratio_profile))
                    .unwrap_or(RatioCategory::NotAvailable);
                (kind, category)
            })
            .collect();

        let graded: Vec<RatioCategory> = categories.values().copied().collect();
        let score = aggregate_health(&graded);

        tracing::debug!(
            "Financial verdict ({} of 3 ratios rated): {}",
            score.rated_count,
            score.overall.to_label()
        );

        FinancialVerdict {
            fiscal_year: statement.fiscal_year,
            ratios,
            categories,
            overall: score.overall,
            mean_weight: score.mean_weight,
            field_errors,
        }
    }

    /// Grade the most recent period and compute growth over all of them.
    ///
    /// The most recent period is the one with the highest fiscal year; when no
    /// period carries a fiscal year, the last one supplied is used.
    pub fn analyze_history(&self, statements: &[FinancialStatement]) -> Result<FinancialReport, AnalysisError> {
        let latest = statements
            .iter()
            .enumerate()
            .max_by_key(|(i, s)| (s.fiscal_year, *i))
            .map(|(_, s)| s)
            .ok_or_else(|| AnalysisError::InsufficientData("No financial statements supplied".to_string()))?;

        Ok(FinancialReport {
            latest: self.analyze(latest),
            growth: compute_growth(statements),
        })
    }
}

/// Grade one period with the standard current-ratio thresholds (150% / 100%).
pub fn compute_financial_verdict(statement: &FinancialStatement) -> FinancialVerdict {
    FundamentalAnalysisEngine::new().analyze(statement)
}
