use serde::{Deserialize, Serialize};

use crate::ratios::RatioCategory;

pub const OVERALL_GOOD_ABOVE: f64 = 2.5;
pub const OVERALL_CAUTION_ABOVE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub overall: RatioCategory,
    /// Mean weight over the rated ratios, `None` when nothing was rated
    pub mean_weight: Option<f64>,
    pub rated_count: usize,
}

/// Combine per-ratio grades into one verdict.
///
/// `NotAvailable` grades are skipped and the mean is taken over the grades
/// that remain. With no grade left the verdict is `NotAvailable`, never a
/// default risk level.
pub fn aggregate_health(categories: &[RatioCategory]) -> HealthScore {
    let weights: Vec<f64> = categories
        .iter()
        .filter_map(|c| c.weight())
        .map(f64::from)
        .collect();

    if weights.is_empty() {
        return HealthScore {
            overall: RatioCategory::NotAvailable,
            mean_weight: None,
            rated_count: 0,
        };
    }

    let mean = weights.iter().sum::<f64>() / weights.len() as f64;
    let overall = if mean > OVERALL_GOOD_ABOVE {
        RatioCategory::Good
    } else if mean > OVERALL_CAUTION_ABOVE {
        RatioCategory::Caution
    } else {
        RatioCategory::Risk
    };

    HealthScore {
        overall,
        mean_weight: Some(mean),
        rated_count: weights.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RatioCategory::*;

    #[test]
    fn all_good_is_good() {
        let score = aggregate_health(&[Good, Good, Good]);
        assert_eq!(score.overall, Good);
        assert_eq!(score.mean_weight, Some(3.0));
    }

    #[test]
    fn all_risk_is_risk() {
        let score = aggregate_health(&[Risk, Risk, Risk]);
        assert_eq!(score.overall, Risk);
        assert_eq!(score.mean_weight, Some(1.0));
    }

    #[test]
    fn boundaries_are_exclusive() {
        // (3 + 2) / 2 = 2.5 is not above 2.5
        assert_eq!(aggregate_health(&[Good, Caution]).overall, Caution);
        // (2 + 1) / 2 = 1.5 is not above 1.5
        assert_eq!(aggregate_health(&[Caution, Risk]).overall, Risk);
        // (3 + 3 + 2) / 3 = 2.67
        assert_eq!(aggregate_health(&[Good, Good, Caution]).overall, Good);
    }

    #[test]
    fn not_available_is_excluded_from_mean() {
        let score = aggregate_health(&[NotAvailable, Good, Good]);
        assert_eq!(score.overall, Good);
        assert_eq!(score.rated_count, 2);
        assert_eq!(score.mean_weight, Some(3.0));
    }

    #[test]
    fn nothing_rated_is_not_available() {
        let score = aggregate_health(&[NotAvailable, NotAvailable]);
        assert_eq!(score.overall, NotAvailable);
        assert_eq!(score.mean_weight, None);
        assert_eq!(aggregate_health(&[]).overall, NotAvailable);
    }
}
