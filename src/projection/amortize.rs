//! Monthly roll-forward of loan and mortgage balances

/// Decomposition of one month of debt service for a single account
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DebtPeriod {
    /// Interest accrued on the opening balance
    pub interest: f64,

    /// Principal applied from the scheduled payment (negative when the
    /// payment does not cover interest)
    pub scheduled_principal: f64,

    /// Extra principal actually applied this period
    pub extra_principal: f64,

    /// Cash actually leaving the household this month
    pub cash_paid: f64,

    /// Balance after this period, never below zero
    pub closing_balance: f64,
}

/// Scheduled monthly payment for a standard amortizing loan
pub fn scheduled_monthly_payment(principal: f64, annual_rate: f64, amortization_months: u32) -> f64 {
    if principal <= 0.0 || amortization_months == 0 {
        return 0.0;
    }
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return principal / amortization_months as f64;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(amortization_months as i32)))
}

/// Advance one debt balance by one monthly period.
///
/// Interest accrues on the opening balance; the scheduled principal is the
/// monthly payment net of interest; extra principal is applied on top.
/// Principal application is capped so the closing balance never goes below
/// zero, and `cash_paid` reflects only what was actually applied.
pub fn advance_debt_month(
    balance: f64,
    annual_rate: f64,
    monthly_payment: f64,
    extra_principal: f64,
) -> DebtPeriod {
    if balance <= 0.0 {
        return DebtPeriod::default();
    }

    let interest = balance * annual_rate / 12.0;

    // Final-period cap; a payment below interest leaves a growing balance
    let applied_scheduled = (monthly_payment - interest).min(balance);
    let after_scheduled = balance - applied_scheduled;

    let applied_extra = extra_principal.clamp(0.0, after_scheduled);
    let closing_balance = (after_scheduled - applied_extra).max(0.0);

    DebtPeriod {
        interest,
        scheduled_principal: applied_scheduled,
        extra_principal: applied_extra,
        cash_paid: interest + applied_scheduled + applied_extra,
        closing_balance,
    }
}
