//! Core projection engine for monthly net-worth simulation

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use log::warn;

use crate::accounts::{AccountSnapshot, AccountType, RecurringExpense};
use crate::scenario::{
    add_months, calculate_tax, expand_events, monthly_amount, Occurrence, ScenarioConfig,
};

use super::amortize::{advance_debt_month, scheduled_monthly_payment};
use super::apply::apply_event;
use super::series::ProjectionResult;
use super::state::{monthly_factor, ProjectionState};

/// Account type receiving uninvested cash and absorbing shortfalls
const CASH_BUCKET: AccountType = AccountType::Chequing;

/// Read-only snapshot of the user's finances at projection start
#[derive(Debug, Clone, Default)]
pub struct ProjectionInput {
    pub accounts: Vec<AccountSnapshot>,
    pub recurring_expenses: Vec<RecurringExpense>,
}

/// One debt account prepared for the monthly roll-forward
#[derive(Debug, Clone)]
struct DebtAccount {
    id: String,
    annual_rate: f64,
    monthly_payment: f64,
}

/// Main projection engine.
///
/// A pure, single-threaded computation: the engine owns its balance maps
/// exclusively for the duration of one run and performs no I/O.
pub struct ProjectionEngine {
    config: ScenarioConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine for the given scenario
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Run the month-by-month simulation over the given snapshot
    pub fn project(&self, input: &ProjectionInput) -> ProjectionResult {
        let months = self.config.horizon_months();
        let horizon_end = add_months(self.config.start_date, months);

        // Recurring events expand once, up front
        let due_by_month = group_by_month(expand_events(&self.config.events, horizon_end));

        let mut asset_balances = initial_asset_balances(&input.accounts);
        let (debts, mut debt_balances) = prepare_debts(&input.accounts);

        let allocation = self.renormalized_allocation();
        let recurring_base: f64 = input
            .recurring_expenses
            .iter()
            .map(|expense| monthly_amount(expense.amount, expense.frequency))
            .sum();

        let mut result = ProjectionResult::with_capacity(months as usize + 1);

        // Month 0: the initial snapshot, before any growth or cash flow
        result.push_month(
            0,
            asset_balances.values().sum(),
            0.0,
            0.0,
            debt_balances.clone(),
            asset_balances.clone(),
        );

        let mut state = ProjectionState::from_config(&self.config);
        let mut recurring_multiplier = 1.0;
        let inflation_factor = monthly_factor(self.config.inflation_rate);

        for month in 1..=months {
            let month_date = add_months(self.config.start_date, month);

            // 1. Apply events due this calendar month
            let mut one_time_income = 0.0;
            let mut one_time_expense = 0.0;
            let mut event_debt_paid = 0.0;
            if let Some(due) = due_by_month.get(&month_key(month_date)) {
                for occurrence in due {
                    let outcome = apply_event(occurrence, state);
                    state = outcome.state;
                    one_time_income += outcome.one_time_income;
                    one_time_expense += outcome.one_time_expense;
                    if let Some(request) = outcome.debt_payment {
                        event_debt_paid += pay_down_debt(
                            &mut debt_balances,
                            &request.account_id,
                            request.amount,
                            &occurrence.id,
                        );
                    }
                }
            }

            // 2-3. Income, and tax on the annualized gross
            let gross_income = state.monthly_gross_income() + one_time_income;
            let annualized = gross_income * 12.0;
            let tax = (calculate_tax(annualized, &self.config.federal_brackets)
                + calculate_tax(annualized, &self.config.regional_brackets))
                / 12.0;

            // 7. Advance every debt account one period; the cash paid is
            // part of this month's expenses (counted once, here)
            let mut debt_service = 0.0;
            for debt in &debts {
                let balance = debt_balances.get(&debt.id).copied().unwrap_or(0.0);
                let extra = self
                    .config
                    .extra_debt_payments
                    .get(&debt.id)
                    .copied()
                    .unwrap_or(0.0);
                let period =
                    advance_debt_month(balance, debt.annual_rate, debt.monthly_payment, extra);
                debt_balances.insert(debt.id.clone(), period.closing_balance);
                debt_service += period.cash_paid;
            }

            // 4-5. Expenses and net cash flow
            let recurring = recurring_base * recurring_multiplier;
            let expenses = state.monthly_expenses
                + recurring
                + one_time_expense
                + event_debt_paid
                + debt_service;
            let net = gross_income - tax - expenses;

            // 6. Allocate the surplus, or withdraw the shortfall
            if net >= 0.0 {
                let invested = net * state.monthly_savings_rate;
                *asset_balances.entry(CASH_BUCKET).or_insert(0.0) += net - invested;
                if allocation.is_empty() {
                    *asset_balances.entry(CASH_BUCKET).or_insert(0.0) += invested;
                } else {
                    for (account_type, weight) in &allocation {
                        *asset_balances.entry(*account_type).or_insert(0.0) += invested * weight;
                    }
                }
            } else {
                withdraw_shortfall(&mut asset_balances, &allocation, -net);
            }

            // 8. Grow balances: investment returns for financial accounts,
            // appreciation for everything else
            for (account_type, balance) in asset_balances.iter_mut() {
                if let Some(rate) = self.config.investment_returns.get(account_type) {
                    *balance *= monthly_factor(*rate);
                } else if let Some(rate) = self.config.asset_appreciation.get(account_type) {
                    *balance *= monthly_factor(*rate);
                }
            }

            // 9. Record this month across all six series; the recorded
            // expense figure includes tax so income - expenses = net
            result.push_month(
                month,
                asset_balances.values().sum(),
                gross_income,
                tax + expenses,
                debt_balances.clone(),
                asset_balances.clone(),
            );

            // Smooth annual growth carried into the next month
            state = state.grow_one_month();
            recurring_multiplier *= inflation_factor;
        }

        result
    }

    /// Allocation weights scaled to sum to 1.
    ///
    /// Configured weights are treated as relative shares; a sum away from
    /// 1 is tolerated but logged. An empty or non-positive set routes all
    /// invested cash to the cash bucket. Sorted for deterministic
    /// application order.
    fn renormalized_allocation(&self) -> Vec<(AccountType, f64)> {
        let sum: f64 = self.config.savings_allocation.values().sum();
        if sum <= 0.0 {
            if !self.config.savings_allocation.is_empty() {
                warn!("savings allocation weights sum to {:.4}; routing savings to cash", sum);
            }
            return Vec::new();
        }
        if (sum - 1.0).abs() > 1e-6 {
            warn!("savings allocation weights sum to {:.4}; renormalizing", sum);
        }

        let mut weights: Vec<(AccountType, f64)> = self
            .config
            .savings_allocation
            .iter()
            .map(|(account_type, weight)| (*account_type, weight / sum))
            .collect();
        weights.sort_by_key(|(account_type, _)| account_type.as_str());
        weights
    }
}

/// Pay down a debt balance, capped at what remains.
///
/// An unknown account id is skipped without aborting the run. Returns the
/// amount actually paid.
fn pay_down_debt(
    balances: &mut HashMap<String, f64>,
    account_id: &str,
    amount: f64,
    occurrence_id: &str,
) -> f64 {
    match balances.get_mut(account_id) {
        Some(balance) => {
            let paid = amount.min(*balance).max(0.0);
            *balance -= paid;
            paid
        }
        None => {
            warn!(
                "event {}: extra debt payment targets unknown account {}, skipping",
                occurrence_id, account_id
            );
            0.0
        }
    }
}

/// Withdraw a shortfall from allocation accounts proportionally, floored
/// at zero per account; any remainder comes out of the cash bucket, which
/// may go negative.
fn withdraw_shortfall(
    balances: &mut HashMap<AccountType, f64>,
    allocation: &[(AccountType, f64)],
    shortfall: f64,
) {
    let mut drawn = 0.0;
    for (account_type, weight) in allocation {
        let balance = balances.entry(*account_type).or_insert(0.0);
        let draw = (shortfall * weight).min(*balance).max(0.0);
        *balance -= draw;
        drawn += draw;
    }

    let remainder = shortfall - drawn;
    if remainder > 0.0 {
        *balances.entry(CASH_BUCKET).or_insert(0.0) -= remainder;
    }
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Group pre-expanded occurrences by calendar month, preserving date order
fn group_by_month(occurrences: Vec<Occurrence>) -> HashMap<(i32, u32), Vec<Occurrence>> {
    let mut grouped: HashMap<(i32, u32), Vec<Occurrence>> = HashMap::new();
    for occurrence in occurrences {
        grouped
            .entry(month_key(occurrence.date))
            .or_default()
            .push(occurrence);
    }
    grouped
}

/// Sum asset account balances by type
fn initial_asset_balances(accounts: &[AccountSnapshot]) -> HashMap<AccountType, f64> {
    let mut balances: HashMap<AccountType, f64> = HashMap::new();
    for account in accounts.iter().filter(|account| account.is_asset) {
        *balances.entry(account.account_type).or_insert(0.0) += account.balance;
    }
    balances
}

/// Prepare debt accounts and their balance map.
///
/// The scheduled payment is normalized to monthly; when a snapshot carries
/// none it is derived from the amortization terms. Liabilities without
/// terms roll forward unchanged.
fn prepare_debts(accounts: &[AccountSnapshot]) -> (Vec<DebtAccount>, HashMap<String, f64>) {
    let mut debts = Vec::new();
    let mut balances = HashMap::new();

    for account in accounts.iter().filter(|account| !account.is_asset) {
        let (annual_rate, monthly_payment) = match &account.debt {
            Some(terms) => {
                let payment = if terms.scheduled_payment > 0.0 {
                    monthly_amount(terms.scheduled_payment, terms.payment_frequency)
                } else {
                    scheduled_monthly_payment(
                        terms.principal,
                        terms.annual_rate,
                        terms.amortization_months,
                    )
                };
                (terms.annual_rate, payment)
            }
            None => (0.0, 0.0),
        };

        debts.push(DebtAccount {
            id: account.id.clone(),
            annual_rate,
            monthly_payment,
        });
        balances.insert(account.id.clone(), account.balance);
    }

    (debts, balances)
}
