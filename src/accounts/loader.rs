//! CSV loaders for account snapshots and recurring expenses
//!
//! Reads the export format produced by the account service:
//! `accounts.csv` and `recurring_expenses.csv` in a data directory.

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use crate::scenario::PaymentFrequency;

use super::data::{AccountSnapshot, AccountType, DebtTerms, RecurringExpense};

type BoxedError = Box<dyn Error + Send + Sync>;

/// Raw CSV row matching accounts.csv columns
#[derive(Debug, serde::Deserialize)]
struct AccountRow {
    #[serde(rename = "AccountID")]
    id: String,
    #[serde(rename = "Type")]
    account_type: String,
    #[serde(rename = "IsAsset")]
    is_asset: bool,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "Principal")]
    principal: Option<f64>,
    #[serde(rename = "AnnualRate")]
    annual_rate: Option<f64>,
    #[serde(rename = "StartDate")]
    start_date: Option<String>,
    #[serde(rename = "TermMonths")]
    term_months: Option<u32>,
    #[serde(rename = "AmortizationMonths")]
    amortization_months: Option<u32>,
    #[serde(rename = "ScheduledPayment")]
    scheduled_payment: Option<f64>,
    #[serde(rename = "PaymentFrequency")]
    payment_frequency: Option<String>,
}

impl AccountRow {
    fn to_snapshot(self) -> Result<AccountSnapshot, BoxedError> {
        let account_type = match self.account_type.as_str() {
            "chequing" => AccountType::Chequing,
            "savings" => AccountType::Savings,
            "tfsa" => AccountType::Tfsa,
            "rrsp" => AccountType::Rrsp,
            "non_registered" => AccountType::NonRegistered,
            "real_estate" => AccountType::RealEstate,
            "vehicle" => AccountType::Vehicle,
            "mortgage" => AccountType::Mortgage,
            "loan" => AccountType::Loan,
            "credit_line" => AccountType::CreditLine,
            other => return Err(format!("Unknown account Type: {}", other).into()),
        };

        // Debt terms are present when the row carries the loan columns
        let debt = match (self.principal, self.annual_rate, &self.start_date) {
            (Some(principal), Some(annual_rate), Some(start_date)) => {
                let start_date = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")?;
                let term_months = self.term_months.unwrap_or(0);
                Some(DebtTerms {
                    principal,
                    annual_rate,
                    start_date,
                    term_months,
                    amortization_months: self.amortization_months.unwrap_or(term_months),
                    scheduled_payment: self.scheduled_payment.unwrap_or(0.0),
                    payment_frequency: self
                        .payment_frequency
                        .as_deref()
                        .map(PaymentFrequency::parse)
                        .unwrap_or_default(),
                })
            }
            _ => None,
        };

        Ok(AccountSnapshot {
            id: self.id,
            account_type,
            is_asset: self.is_asset,
            balance: self.balance,
            debt,
        })
    }
}

/// Raw CSV row matching recurring_expenses.csv columns
#[derive(Debug, serde::Deserialize)]
struct ExpenseRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Currency")]
    currency: Option<String>,
    #[serde(rename = "Frequency")]
    frequency: Option<String>,
}

impl ExpenseRow {
    fn to_expense(self) -> RecurringExpense {
        RecurringExpense {
            id: self.id,
            description: self.description.unwrap_or_default(),
            amount: self.amount,
            currency: self.currency.unwrap_or_else(|| "CAD".to_string()),
            frequency: self
                .frequency
                .as_deref()
                .map(PaymentFrequency::parse)
                .unwrap_or_default(),
        }
    }
}

/// Load all account snapshots from a CSV file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<AccountSnapshot>, BoxedError> {
    let mut reader = Reader::from_path(path)?;
    let mut accounts = Vec::new();

    for result in reader.deserialize() {
        let row: AccountRow = result?;
        accounts.push(row.to_snapshot()?);
    }

    Ok(accounts)
}

/// Load account snapshots from any reader (e.g., string buffer, network stream)
pub fn load_accounts_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<AccountSnapshot>, BoxedError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut accounts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: AccountRow = result?;
        accounts.push(row.to_snapshot()?);
    }

    Ok(accounts)
}

/// Load all recurring expenses from a CSV file
pub fn load_recurring_expenses<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<RecurringExpense>, BoxedError> {
    let mut reader = Reader::from_path(path)?;
    let mut expenses = Vec::new();

    for result in reader.deserialize() {
        let row: ExpenseRow = result?;
        expenses.push(row.to_expense());
    }

    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNTS_CSV: &str = "\
AccountID,Type,IsAsset,Balance,Principal,AnnualRate,StartDate,TermMonths,AmortizationMonths,ScheduledPayment,PaymentFrequency
sav-1,savings,true,12000.0,,,,,,,
mort-1,mortgage,false,398000.0,400000.0,0.03,2024-06-01,60,300,1896.0,monthly
";

    #[test]
    fn test_load_accounts_from_reader() {
        let accounts = load_accounts_from_reader(ACCOUNTS_CSV.as_bytes()).unwrap();
        assert_eq!(accounts.len(), 2);

        assert_eq!(accounts[0].account_type, AccountType::Savings);
        assert!(accounts[0].is_asset);
        assert!(accounts[0].debt.is_none());

        let mortgage = accounts[1].debt.as_ref().unwrap();
        assert_eq!(mortgage.amortization_months, 300);
        assert_eq!(mortgage.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(
            mortgage.start_date,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_unknown_account_type_is_an_error() {
        let csv = "\
AccountID,Type,IsAsset,Balance,Principal,AnnualRate,StartDate,TermMonths,AmortizationMonths,ScheduledPayment,PaymentFrequency
x-1,margin,true,100.0,,,,,,,
";
        assert!(load_accounts_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_amortization_defaults_to_term() {
        let csv = "\
AccountID,Type,IsAsset,Balance,Principal,AnnualRate,StartDate,TermMonths,AmortizationMonths,ScheduledPayment,PaymentFrequency
loan-1,loan,false,9000.0,15000.0,0.065,2023-01-15,60,,295.0,monthly
";
        let accounts = load_accounts_from_reader(csv.as_bytes()).unwrap();
        let terms = accounts[0].debt.as_ref().unwrap();
        assert_eq!(terms.amortization_months, 60);
    }
}
