//! Loop-carried scenario state for a projection run

use crate::scenario::ScenarioConfig;

/// Convert an annual rate to its monthly compounding factor
pub(crate) fn monthly_factor(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0)
}

/// Mutable scenario levels threaded through the monthly loop.
///
/// Event application consumes a state and returns a new one; the engine
/// carries the current value from month to month. Nothing here aliases the
/// engine's balance maps.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Current gross annual salary
    pub annual_salary: f64,

    /// Annual salary growth rate
    pub annual_salary_growth: f64,

    /// Current monthly base expense level
    pub monthly_expenses: f64,

    /// Annual growth of the base expense level
    pub annual_expense_growth: f64,

    /// Fraction of positive net cash flow routed to investments
    pub monthly_savings_rate: f64,
}

impl ProjectionState {
    /// Seed the state from the scenario config at projection start
    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self {
            annual_salary: config.annual_salary,
            annual_salary_growth: config.annual_salary_growth,
            monthly_expenses: config.monthly_expenses,
            annual_expense_growth: config.annual_expense_growth,
            monthly_savings_rate: config.monthly_savings_rate,
        }
    }

    /// Monthly gross income at the current salary level
    pub fn monthly_gross_income(&self) -> f64 {
        self.annual_salary / 12.0
    }

    /// Advance salary and base expenses by one month of smooth annual growth
    pub fn grow_one_month(self) -> Self {
        Self {
            annual_salary: self.annual_salary * monthly_factor(self.annual_salary_growth),
            monthly_expenses: self.monthly_expenses * monthly_factor(self.annual_expense_growth),
            ..self
        }
    }
}
