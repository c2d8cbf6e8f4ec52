use analysis_core::{CurrentRatioProfile, FieldError, Figure, FinancialStatement};
use serde::{Deserialize, Serialize};

use crate::figures::parse_figure;

/// Debt ratio grading: GOOD below 200%, CAUTION below 400%
pub const DEBT_RATIO_GOOD_BELOW: f64 = 200.0;
pub const DEBT_RATIO_CAUTION_BELOW: f64 = 400.0;
/// Operating margin grading: GOOD above 10%, CAUTION above 5%
pub const OPERATING_MARGIN_GOOD_ABOVE: f64 = 10.0;
pub const OPERATING_MARGIN_CAUTION_ABOVE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    DebtRatio,
    CurrentRatio,
    OperatingMargin,
}

impl RatioKind {
    pub const ALL: [RatioKind; 3] = [RatioKind::DebtRatio, RatioKind::CurrentRatio, RatioKind::OperatingMargin];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatioKind::DebtRatio => "debt_ratio",
            RatioKind::CurrentRatio => "current_ratio",
            RatioKind::OperatingMargin => "operating_margin",
        }
    }
}

/// Three-level health grade, plus `NotAvailable` for ratios (or verdicts)
/// that could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatioCategory {
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "CAUTION")]
    Caution,
    #[serde(rename = "RISK")]
    Risk,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl RatioCategory {
    /// Aggregation weight; `None` for `NotAvailable`
    pub fn weight(&self) -> Option<u8> {
        match self {
            RatioCategory::Good => Some(3),
            RatioCategory::Caution => Some(2),
            RatioCategory::Risk => Some(1),
            RatioCategory::NotAvailable => None,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            RatioCategory::Good => "Good",
            RatioCategory::Caution => "Caution",
            RatioCategory::Risk => "Risk",
            RatioCategory::NotAvailable => "N/A",
        }
    }
}

/// Ratios in percent; `None` when the ratio could not be computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub debt_ratio: Option<f64>,
    pub current_ratio: Option<f64>,
    pub operating_margin: Option<f64>,
}

impl FinancialRatios {
    pub fn get(&self, kind: RatioKind) -> Option<f64> {
        match kind {
            RatioKind::DebtRatio => self.debt_ratio,
            RatioKind::CurrentRatio => self.current_ratio,
            RatioKind::OperatingMargin => self.operating_margin,
        }
    }
}

/// `numerator / denominator * 100`, collecting every bad input field
fn percentage(
    numerator: (&str, Option<&Figure>),
    denominator: (&str, Option<&Figure>),
) -> Result<f64, Vec<FieldError>> {
    let num = parse_figure(numerator.0, numerator.1);
    let den = parse_figure(denominator.0, denominator.1);

    match (num, den) {
        (Ok(_), Ok(d)) if d == 0.0 => Err(vec![FieldError::DivisionByZero {
            field: denominator.0.to_string(),
        }]),
        (Ok(n), Ok(d)) => Ok(n / d * 100.0),
        (num, den) => Err([num.err(), den.err()].into_iter().flatten().collect()),
    }
}

/// Compute all three ratios from one reporting period.
///
/// A ratio with a missing, non-numeric or zero-denominator input is left as
/// `None` and its field errors are returned alongside; the other ratios are
/// unaffected.
pub fn compute_ratios(statement: &FinancialStatement) -> (FinancialRatios, Vec<FieldError>) {
    let mut errors = Vec::new();
    let mut keep = |result: Result<f64, Vec<FieldError>>| match result {
        Ok(value) => Some(value),
        Err(mut e) => {
            errors.append(&mut e);
            None
        }
    };

    let ratios = FinancialRatios {
        debt_ratio: keep(percentage(
            ("total_liabilities", statement.total_liabilities.as_ref()),
            ("total_equity", statement.total_equity.as_ref()),
        )),
        current_ratio: keep(percentage(
            ("current_assets", statement.current_assets.as_ref()),
            ("current_liabilities", statement.current_liabilities.as_ref()),
        )),
        operating_margin: keep(percentage(
            ("operating_income", statement.operating_income.as_ref()),
            ("revenue", statement.revenue.as_ref()),
        )),
    };

    (ratios, errors)
}

/// Grade a single ratio value against the fixed thresholds.
pub fn categorize(kind: RatioKind, value: f64, profile: CurrentRatioProfile) -> RatioCategory {
    match kind {
        RatioKind::DebtRatio => {
            if value < DEBT_RATIO_GOOD_BELOW {
                RatioCategory::Good
            } else if value < DEBT_RATIO_CAUTION_BELOW {
                RatioCategory::Caution
            } else {
                RatioCategory::Risk
            }
        }
        RatioKind::CurrentRatio => {
            let (good_above, caution_above) = profile.thresholds();
            if value > good_above {
                RatioCategory::Good
            } else if value > caution_above {
                RatioCategory::Caution
            } else {
                RatioCategory::Risk
            }
        }
        RatioKind::OperatingMargin => {
            if value > OPERATING_MARGIN_GOOD_ABOVE {
                RatioCategory::Good
            } else if value > OPERATING_MARGIN_CAUTION_ABOVE {
                RatioCategory::Caution
            } else {
                RatioCategory::Risk
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement() -> FinancialStatement {
        FinancialStatement {
            fiscal_year: Some(2023),
            total_liabilities: Some(Figure::from("1,500")),
            total_equity: Some(Figure::from("1,000")),
            current_assets: Some(Figure::from(1800.0)),
            current_liabilities: Some(Figure::from(1000.0)),
            operating_income: Some(Figure::from("120")),
            revenue: Some(Figure::from("1,000")),
            net_income: None,
        }
    }

    #[test]
    fn computes_percentages() {
        let (ratios, errors) = compute_ratios(&statement());
        assert!(errors.is_empty());
        assert!((ratios.debt_ratio.unwrap() - 150.0).abs() < 1e-9);
        assert!((ratios.current_ratio.unwrap() - 180.0).abs() < 1e-9);
        assert!((ratios.operating_margin.unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn zero_denominator_only_affects_its_ratio() {
        let input = FinancialStatement { total_equity: Some(Figure::from("0")), ..statement() };
        let (ratios, errors) = compute_ratios(&input);

        assert_eq!(ratios.debt_ratio, None);
        assert!(ratios.current_ratio.is_some());
        assert!(ratios.operating_margin.is_some());
        assert_eq!(errors, vec![FieldError::DivisionByZero { field: "total_equity".to_string() }]);
    }

    #[test]
    fn reports_every_bad_field() {
        let input = FinancialStatement {
            operating_income: None,
            revenue: Some(Figure::from("abc")),
            ..statement()
        };
        let (ratios, errors) = compute_ratios(&input);

        assert_eq!(ratios.operating_margin, None);
        let fields: Vec<&str> = errors.iter().map(FieldError::field).collect();
        assert_eq!(fields, vec!["operating_income", "revenue"]);
    }

    #[test]
    fn debt_ratio_thresholds() {
        let p = CurrentRatioProfile::Standard;
        assert_eq!(categorize(RatioKind::DebtRatio, 199.9, p), RatioCategory::Good);
        assert_eq!(categorize(RatioKind::DebtRatio, 200.0, p), RatioCategory::Caution);
        assert_eq!(categorize(RatioKind::DebtRatio, 399.9, p), RatioCategory::Caution);
        assert_eq!(categorize(RatioKind::DebtRatio, 400.0, p), RatioCategory::Risk);
        // negative equity is graded on the plain threshold
        assert_eq!(categorize(RatioKind::DebtRatio, -150.0, p), RatioCategory::Good);
    }

    #[test]
    fn current_ratio_profiles() {
        let standard = CurrentRatioProfile::Standard;
        assert_eq!(categorize(RatioKind::CurrentRatio, 180.0, standard), RatioCategory::Good);
        assert_eq!(categorize(RatioKind::CurrentRatio, 150.0, standard), RatioCategory::Caution);
        assert_eq!(categorize(RatioKind::CurrentRatio, 100.0, standard), RatioCategory::Risk);

        let conservative = CurrentRatioProfile::Conservative;
        assert_eq!(categorize(RatioKind::CurrentRatio, 180.0, conservative), RatioCategory::Caution);
        assert_eq!(categorize(RatioKind::CurrentRatio, 200.1, conservative), RatioCategory::Good);
        assert_eq!(categorize(RatioKind::CurrentRatio, 150.0, conservative), RatioCategory::Risk);
    }

    #[test]
    fn operating_margin_thresholds() {
        let p = CurrentRatioProfile::Standard;
        assert_eq!(categorize(RatioKind::OperatingMargin, 12.0, p), RatioCategory::Good);
        assert_eq!(categorize(RatioKind::OperatingMargin, 10.0, p), RatioCategory::Caution);
        assert_eq!(categorize(RatioKind::OperatingMargin, 5.0, p), RatioCategory::Risk);
        assert_eq!(categorize(RatioKind::OperatingMargin, -3.0, p), RatioCategory::Risk);
    }

    #[test]
    fn category_weights() {
        assert_eq!(RatioCategory::Good.weight(), Some(3));
        assert_eq!(RatioCategory::Caution.weight(), Some(2));
        assert_eq!(RatioCategory::Risk.weight(), Some(1));
        assert_eq!(RatioCategory::NotAvailable.weight(), None);
        assert_eq!(serde_json::to_value(RatioCategory::NotAvailable).unwrap(), "N/A");
    }
}
