//! Applies a single event occurrence to the projection state

use crate::scenario::{EventKind, ExpenseChangeMode, Occurrence};

use super::state::ProjectionState;

/// A principal payment the engine should apply to a debt balance.
///
/// The engine owns the balance map and enforces the remaining-balance cap
/// (and the unknown-account skip) there.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtPaymentRequest {
    pub account_id: String,
    pub amount: f64,
}

/// Result of applying one occurrence: the next state plus cash deltas
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub state: ProjectionState,
    pub one_time_income: f64,
    pub one_time_expense: f64,
    pub debt_payment: Option<DebtPaymentRequest>,
}

impl EventOutcome {
    fn unchanged(state: ProjectionState) -> Self {
        Self {
            state,
            one_time_income: 0.0,
            one_time_expense: 0.0,
            debt_payment: None,
        }
    }
}

/// Apply one due occurrence, returning the next state and cash deltas.
///
/// State transitions are pure: the caller threads the returned state into
/// the next application.
pub fn apply_event(occurrence: &Occurrence, state: ProjectionState) -> EventOutcome {
    match &occurrence.kind {
        EventKind::OneTimeIncome { amount } => EventOutcome {
            one_time_income: *amount,
            ..EventOutcome::unchanged(state)
        },
        EventKind::OneTimeExpense { amount } => EventOutcome {
            one_time_expense: *amount,
            ..EventOutcome::unchanged(state)
        },
        EventKind::ExtraDebtPayment { account_id, amount } => EventOutcome {
            debt_payment: Some(DebtPaymentRequest {
                account_id: account_id.clone(),
                amount: *amount,
            }),
            ..EventOutcome::unchanged(state)
        },
        EventKind::SalaryChange {
            annual_salary,
            annual_growth,
        } => EventOutcome::unchanged(ProjectionState {
            annual_salary: *annual_salary,
            annual_salary_growth: annual_growth.unwrap_or(state.annual_salary_growth),
            ..state
        }),
        EventKind::ExpenseChange {
            mode,
            amount,
            annual_growth,
        } => {
            let monthly_expenses = match mode {
                ExpenseChangeMode::Absolute => *amount,
                ExpenseChangeMode::RelativeAmount => state.monthly_expenses + *amount,
                ExpenseChangeMode::RelativePercent => state.monthly_expenses * (1.0 + *amount),
            };
            EventOutcome::unchanged(ProjectionState {
                monthly_expenses: monthly_expenses.max(0.0),
                annual_expense_growth: annual_growth.unwrap_or(state.annual_expense_growth),
                ..state
            })
        }
        EventKind::SavingsRateChange { rate } => EventOutcome::unchanged(ProjectionState {
            monthly_savings_rate: rate.clamp(0.0, 1.0),
            ..state
        }),
    }
}
