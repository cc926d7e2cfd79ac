//! External collaborators supplying the initial snapshot
//!
//! The engine itself never performs I/O; these providers are consulted once
//! per request, before the simulation loop starts.

use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::scenario::PaymentFrequency;

use super::data::{AccountSnapshot, AccountType, DebtTerms, RecurringExpense};
use super::loader;

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Supplies the user's active accounts with current balances and debt terms
pub trait AccountProvider: Send + Sync {
    fn active_accounts(&self, user_id: &str) -> ProviderResult<Vec<AccountSnapshot>>;
}

/// Supplies the user's active recurring expenses
pub trait RecurringExpenseProvider: Send + Sync {
    fn active_expenses(&self, user_id: &str) -> ProviderResult<Vec<RecurringExpense>>;
}

/// In-memory store for demos and tests
#[derive(Debug, Clone, Default)]
pub struct StaticAccountStore {
    pub accounts: Vec<AccountSnapshot>,
    pub recurring_expenses: Vec<RecurringExpense>,
}

impl StaticAccountStore {
    pub fn new(accounts: Vec<AccountSnapshot>, recurring_expenses: Vec<RecurringExpense>) -> Self {
        Self {
            accounts,
            recurring_expenses,
        }
    }

    /// A representative household: cash, registered investments, a house
    /// and car, one mortgage, one car loan, and a few recurring bills
    pub fn demo() -> Self {
        let mortgage_terms = DebtTerms {
            principal: 400_000.0,
            annual_rate: 0.03,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            term_months: 60,
            amortization_months: 300,
            scheduled_payment: 1_896.0,
            payment_frequency: PaymentFrequency::Monthly,
        };
        let loan_terms = DebtTerms {
            principal: 15_000.0,
            annual_rate: 0.065,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 15).expect("valid date"),
            term_months: 60,
            amortization_months: 60,
            scheduled_payment: 295.0,
            payment_frequency: PaymentFrequency::Monthly,
        };

        Self {
            accounts: vec![
                AccountSnapshot::asset("chq-001", AccountType::Chequing, 4_500.0),
                AccountSnapshot::asset("sav-001", AccountType::Savings, 12_000.0),
                AccountSnapshot::asset("tfsa-001", AccountType::Tfsa, 25_000.0),
                AccountSnapshot::asset("rrsp-001", AccountType::Rrsp, 40_000.0),
                AccountSnapshot::asset("house-001", AccountType::RealEstate, 650_000.0),
                AccountSnapshot::asset("car-001", AccountType::Vehicle, 22_000.0),
                AccountSnapshot::debt("mort-001", AccountType::Mortgage, 398_000.0, mortgage_terms),
                AccountSnapshot::debt("loan-001", AccountType::Loan, 10_000.0, loan_terms),
            ],
            recurring_expenses: vec![
                RecurringExpense {
                    id: "rec-001".to_string(),
                    description: "Property tax".to_string(),
                    amount: 3_600.0,
                    currency: "CAD".to_string(),
                    frequency: PaymentFrequency::Annually,
                },
                RecurringExpense {
                    id: "rec-002".to_string(),
                    description: "Car insurance".to_string(),
                    amount: 180.0,
                    currency: "CAD".to_string(),
                    frequency: PaymentFrequency::Monthly,
                },
            ],
        }
    }
}

impl AccountProvider for StaticAccountStore {
    fn active_accounts(&self, _user_id: &str) -> ProviderResult<Vec<AccountSnapshot>> {
        Ok(self.accounts.clone())
    }
}

impl RecurringExpenseProvider for StaticAccountStore {
    fn active_expenses(&self, _user_id: &str) -> ProviderResult<Vec<RecurringExpense>> {
        Ok(self.recurring_expenses.clone())
    }
}

/// CSV-backed store reading `accounts.csv` and `recurring_expenses.csv`
/// from a data directory
#[derive(Debug, Clone)]
pub struct CsvAccountStore {
    dir: PathBuf,
}

impl CsvAccountStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl AccountProvider for CsvAccountStore {
    fn active_accounts(&self, _user_id: &str) -> ProviderResult<Vec<AccountSnapshot>> {
        loader::load_accounts(self.dir.join("accounts.csv"))
    }
}

impl RecurringExpenseProvider for CsvAccountStore {
    fn active_expenses(&self, _user_id: &str) -> ProviderResult<Vec<RecurringExpense>> {
        loader::load_recurring_expenses(self.dir.join("recurring_expenses.csv"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_store_shape() {
        let store = StaticAccountStore::demo();
        let accounts = store.active_accounts("user-1").unwrap();

        assert_eq!(accounts.iter().filter(|a| a.is_asset).count(), 6);
        assert_eq!(accounts.iter().filter(|a| !a.is_asset).count(), 2);
        assert!(accounts
            .iter()
            .filter(|a| !a.is_asset)
            .all(|a| a.debt.is_some()));
    }

    #[test]
    fn test_missing_csv_directory_is_an_error() {
        let store = CsvAccountStore::new("/nonexistent/path");
        assert!(store.active_accounts("user-1").is_err());
    }
}
