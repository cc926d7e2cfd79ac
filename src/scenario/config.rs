//! Scenario configuration for a projection run

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountType;

use super::events::Event;
use super::tax::{default_federal_brackets, default_regional_brackets, TaxBracket};

/// Hard ceiling on the projection horizon
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Scenario parameters, immutable for the duration of one run.
///
/// All fields fall back to the demo defaults when absent from a JSON
/// request, so a bare `{}` body is a valid scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Calendar date of the initial snapshot (month 0)
    pub start_date: NaiveDate,

    /// Projection horizon in years
    pub horizon_years: u32,

    /// Annual inflation applied to provider-sourced recurring expenses
    pub inflation_rate: f64,

    /// Current gross annual salary
    pub annual_salary: f64,

    /// Annual salary growth, compounded smoothly across the year
    pub annual_salary_growth: f64,

    /// Current monthly base expenses
    pub monthly_expenses: f64,

    /// Annual growth of the base expense level
    pub annual_expense_growth: f64,

    /// Fraction of positive net cash flow routed to investments
    pub monthly_savings_rate: f64,

    /// Federal tax brackets, ascending
    pub federal_brackets: Vec<TaxBracket>,

    /// Regional/provincial tax brackets, ascending
    pub regional_brackets: Vec<TaxBracket>,

    /// Annual return rate per investment account type
    pub investment_returns: HashMap<AccountType, f64>,

    /// Annual appreciation rate per non-financial asset type
    pub asset_appreciation: HashMap<AccountType, f64>,

    /// Relative weights splitting invested cash across account types
    pub savings_allocation: HashMap<AccountType, f64>,

    /// Fixed extra monthly principal payments keyed by debt account id
    pub extra_debt_payments: HashMap<String, f64>,

    /// Discrete and recurring scenario events
    pub events: Vec<Event>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            horizon_years: 10,
            inflation_rate: 0.02,
            annual_salary: 75_000.0,
            annual_salary_growth: 0.03,
            monthly_expenses: 2_500.0,
            annual_expense_growth: 0.02,
            monthly_savings_rate: 0.20,
            federal_brackets: default_federal_brackets(),
            regional_brackets: default_regional_brackets(),
            investment_returns: HashMap::from([
                (AccountType::Savings, 0.015),
                (AccountType::Tfsa, 0.07),
                (AccountType::Rrsp, 0.07),
                (AccountType::NonRegistered, 0.05),
            ]),
            asset_appreciation: HashMap::from([
                (AccountType::RealEstate, 0.03),
                (AccountType::Vehicle, -0.15),
            ]),
            savings_allocation: HashMap::from([
                (AccountType::Tfsa, 0.6),
                (AccountType::Rrsp, 0.4),
            ]),
            extra_debt_payments: HashMap::new(),
            events: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    /// Projection length in months, with the horizon clamped to
    /// [`MAX_HORIZON_YEARS`] so the loop is explicitly bounded
    pub fn horizon_months(&self) -> u32 {
        let years = self.horizon_years.min(MAX_HORIZON_YEARS);
        if years < self.horizon_years {
            log::warn!(
                "projection horizon of {} years clamped to {}",
                self.horizon_years,
                MAX_HORIZON_YEARS
            );
        }
        years * 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: ScenarioConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.horizon_years, 10);
        assert_eq!(config.annual_salary, 75_000.0);
        assert!(!config.federal_brackets.is_empty());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: ScenarioConfig =
            serde_json::from_str(r#"{"horizon_years": 3, "annual_salary": 90000.0}"#).unwrap();
        assert_eq!(config.horizon_years, 3);
        assert_eq!(config.annual_salary, 90_000.0);
        assert_eq!(config.monthly_expenses, 2_500.0);
    }

    #[test]
    fn test_horizon_clamped() {
        let config = ScenarioConfig {
            horizon_years: 500,
            ..Default::default()
        };
        assert_eq!(config.horizon_months(), MAX_HORIZON_YEARS * 12);
    }

    #[test]
    fn test_account_type_keyed_maps_round_trip() {
        let config = ScenarioConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScenarioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.savings_allocation, config.savings_allocation);
        assert_eq!(back.investment_returns, config.investment_returns);
    }
}
