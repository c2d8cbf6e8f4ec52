use analysis_core::{Figure, FinancialStatement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::figures::parse_figure;

/// Year-over-year growth in percent, from `fiscal_year - 1` to `fiscal_year`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRates {
    pub fiscal_year: i32,
    pub revenue_growth: Option<f64>,
    pub operating_income_growth: Option<f64>,
    pub net_income_growth: Option<f64>,
}

fn growth(prev: Option<&Figure>, curr: Option<&Figure>) -> Option<f64> {
    let prev = parse_figure("prev", prev).ok()?;
    let curr = parse_figure("curr", curr).ok()?;
    if prev == 0.0 {
        return None;
    }
    Some((curr / prev - 1.0) * 100.0)
}

/// Growth for every pair of consecutive fiscal years.
///
/// Periods without a fiscal year are ignored; when a year appears twice the
/// last period supplied wins. Gaps between years produce no entry.
pub fn compute_growth(statements: &[FinancialStatement]) -> Vec<GrowthRates> {
    let by_year: BTreeMap<i32, &FinancialStatement> = statements
        .iter()
        .filter_map(|s| s.fiscal_year.map(|year| (year, s)))
        .collect();

    by_year
        .iter()
        .filter_map(|(&year, curr)| {
            let prev = by_year.get(&year.checked_sub(1)?)?;
            Some(GrowthRates {
                fiscal_year: year,
                revenue_growth: growth(prev.revenue.as_ref(), curr.revenue.as_ref()),
                operating_income_growth: growth(prev.operating_income.as_ref(), curr.operating_income.as_ref()),
                net_income_growth: growth(prev.net_income.as_ref(), curr.net_income.as_ref()),
            })
        })
        .collect()
}
