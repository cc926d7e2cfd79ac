//! Output time series for a projection run

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::accounts::AccountType;

/// A single (month, value) sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month: u32,
    pub value: f64,
}

/// Monthly cash flow decomposition.
///
/// `expenses` includes income tax, so `net == income - expenses` holds for
/// every point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Outstanding debt for one month, total and per account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffPoint {
    pub month: u32,
    pub total_debt: f64,
    pub debts: HashMap<String, f64>,
}

/// Asset balances for one month, keyed by account type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBreakdownPoint {
    pub month: u32,
    pub balances: HashMap<AccountType, f64>,
}

/// Complete projection output: six aligned series, one entry per month.
///
/// Month 0 is the initial snapshot before any growth or cash flow is
/// applied, so each series has `horizon_months + 1` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub net_worth: Vec<SeriesPoint>,
    pub assets: Vec<SeriesPoint>,
    pub liabilities: Vec<SeriesPoint>,
    pub cash_flow: Vec<CashFlowPoint>,
    pub debt_payoff: Vec<DebtPayoffPoint>,
    pub asset_breakdown: Vec<AssetBreakdownPoint>,
}

impl ProjectionResult {
    pub fn with_capacity(months: usize) -> Self {
        Self {
            net_worth: Vec::with_capacity(months),
            assets: Vec::with_capacity(months),
            liabilities: Vec::with_capacity(months),
            cash_flow: Vec::with_capacity(months),
            debt_payoff: Vec::with_capacity(months),
            asset_breakdown: Vec::with_capacity(months),
        }
    }

    /// Number of recorded months (including month 0)
    pub fn months(&self) -> usize {
        self.net_worth.len()
    }

    /// Append one month across all six series
    pub(crate) fn push_month(
        &mut self,
        month: u32,
        total_assets: f64,
        income: f64,
        expenses: f64,
        debts: HashMap<String, f64>,
        balances: HashMap<AccountType, f64>,
    ) {
        let total_debt: f64 = debts.values().sum();

        self.net_worth.push(SeriesPoint {
            month,
            value: total_assets - total_debt,
        });
        self.assets.push(SeriesPoint {
            month,
            value: total_assets,
        });
        self.liabilities.push(SeriesPoint {
            month,
            value: total_debt,
        });
        self.cash_flow.push(CashFlowPoint {
            month,
            income,
            expenses,
            net: income - expenses,
        });
        self.debt_payoff.push(DebtPayoffPoint {
            month,
            total_debt,
            debts,
        });
        self.asset_breakdown.push(AssetBreakdownPoint { month, balances });
    }

    /// Get summary statistics over the full run
    pub fn summary(&self) -> ProjectionSummary {
        let initial_net_worth = self.net_worth.first().map(|p| p.value).unwrap_or(0.0);
        let final_net_worth = self.net_worth.last().map(|p| p.value).unwrap_or(0.0);

        let total_income: f64 = self.cash_flow.iter().map(|p| p.income).sum();
        let total_expenses: f64 = self.cash_flow.iter().map(|p| p.expenses).sum();

        ProjectionSummary {
            total_months: self.months() as u32,
            initial_net_worth,
            final_net_worth,
            net_worth_change: final_net_worth - initial_net_worth,
            total_income,
            total_expenses,
            total_net_cash_flow: total_income - total_expenses,
            final_total_debt: self.debt_payoff.last().map(|p| p.total_debt).unwrap_or(0.0),
            debt_free_month: self
                .debt_payoff
                .iter()
                .find(|p| p.total_debt <= 0.005)
                .map(|p| p.month),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub initial_net_worth: f64,
    pub final_net_worth: f64,
    pub net_worth_change: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_net_cash_flow: f64,
    pub final_total_debt: f64,
    /// First recorded month with no outstanding debt, if reached
    pub debt_free_month: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_push_month_keeps_series_aligned_and_consistent() {
        let mut result = ProjectionResult::with_capacity(2);
        let debts = HashMap::from([("m-1".to_string(), 300_000.0), ("l-1".to_string(), 5_000.0)]);
        let balances = HashMap::from([(AccountType::Tfsa, 25_000.0)]);

        result.push_month(0, 500_000.0, 0.0, 0.0, debts, balances);

        assert_eq!(result.months(), 1);
        assert_relative_eq!(result.liabilities[0].value, 305_000.0);
        assert_relative_eq!(result.net_worth[0].value, 195_000.0);
        assert_relative_eq!(
            result.net_worth[0].value,
            result.assets[0].value - result.liabilities[0].value
        );
        assert_relative_eq!(
            result.debt_payoff[0].debts.values().sum::<f64>(),
            result.debt_payoff[0].total_debt
        );
    }

    #[test]
    fn test_summary_totals_and_debt_free_month() {
        let mut result = ProjectionResult::with_capacity(3);
        result.push_month(
            0,
            1_000.0,
            0.0,
            0.0,
            HashMap::from([("l".to_string(), 100.0)]),
            HashMap::new(),
        );
        result.push_month(
            1,
            1_100.0,
            500.0,
            300.0,
            HashMap::from([("l".to_string(), 50.0)]),
            HashMap::new(),
        );
        result.push_month(
            2,
            1_300.0,
            500.0,
            300.0,
            HashMap::from([("l".to_string(), 0.0)]),
            HashMap::new(),
        );

        let summary = result.summary();
        assert_eq!(summary.total_months, 3);
        assert_relative_eq!(summary.total_income, 1_000.0);
        assert_relative_eq!(summary.total_expenses, 600.0);
        assert_relative_eq!(summary.net_worth_change, 400.0);
        assert_eq!(summary.debt_free_month, Some(2));
    }
}
