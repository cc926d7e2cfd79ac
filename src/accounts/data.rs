//! Account snapshot data structures matching the account service format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scenario::PaymentFrequency;

/// Classification of an account in the user's snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Chequing,
    Savings,
    Tfsa,
    Rrsp,
    NonRegistered,
    RealEstate,
    Vehicle,
    Mortgage,
    Loan,
    CreditLine,
}

impl AccountType {
    /// Whether balances of this type are liabilities
    pub fn is_debt(self) -> bool {
        matches!(
            self,
            AccountType::Mortgage | AccountType::Loan | AccountType::CreditLine
        )
    }

    /// Get the string representation matching the wire format
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Chequing => "chequing",
            AccountType::Savings => "savings",
            AccountType::Tfsa => "tfsa",
            AccountType::Rrsp => "rrsp",
            AccountType::NonRegistered => "non_registered",
            AccountType::RealEstate => "real_estate",
            AccountType::Vehicle => "vehicle",
            AccountType::Mortgage => "mortgage",
            AccountType::Loan => "loan",
            AccountType::CreditLine => "credit_line",
        }
    }
}

/// Loan/mortgage terms carried by debt accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtTerms {
    /// Original principal at origination
    pub principal: f64,

    /// Annual interest rate
    pub annual_rate: f64,

    /// Origination date
    pub start_date: NaiveDate,

    /// Term length in months
    pub term_months: u32,

    /// Amortization length in months; equals the term for plain loans
    pub amortization_months: u32,

    /// Scheduled payment per `payment_frequency` period; derived from the
    /// amortization terms when zero
    #[serde(default)]
    pub scheduled_payment: f64,

    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
}

/// One account in the user's current snapshot (read-only engine input)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: String,
    pub account_type: AccountType,
    pub is_asset: bool,
    pub balance: f64,

    /// Present only on mortgage/loan accounts
    #[serde(default)]
    pub debt: Option<DebtTerms>,
}

impl AccountSnapshot {
    /// Create an asset account
    pub fn asset(id: impl Into<String>, account_type: AccountType, balance: f64) -> Self {
        Self {
            id: id.into(),
            account_type,
            is_asset: true,
            balance,
            debt: None,
        }
    }

    /// Create a debt account with its loan terms
    pub fn debt(
        id: impl Into<String>,
        account_type: AccountType,
        balance: f64,
        terms: DebtTerms,
    ) -> Self {
        Self {
            id: id.into(),
            account_type,
            is_asset: false,
            balance,
            debt: Some(terms),
        }
    }
}

fn default_currency() -> String {
    "CAD".to_string()
}

/// A recurring expense from the recurring-expense provider.
///
/// The currency is carried for reporting only; amounts are never converted
/// between currencies inside a projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub frequency: PaymentFrequency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_classification() {
        assert!(AccountType::Mortgage.is_debt());
        assert!(AccountType::Loan.is_debt());
        assert!(AccountType::CreditLine.is_debt());
        assert!(!AccountType::Tfsa.is_debt());
        assert!(!AccountType::RealEstate.is_debt());
    }

    #[test]
    fn test_account_type_serializes_as_snake_case() {
        let json = serde_json::to_string(&AccountType::RealEstate).unwrap();
        assert_eq!(json, "\"real_estate\"");
        let back: AccountType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AccountType::RealEstate);
    }

    #[test]
    fn test_snapshot_without_debt_terms() {
        let json = r#"{
            "id": "sav-1",
            "account_type": "savings",
            "is_asset": true,
            "balance": 1000.0
        }"#;
        let snapshot: AccountSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.debt.is_none());
        assert_eq!(snapshot.account_type, AccountType::Savings);
    }
}
