//! Month-by-month net worth projection

pub mod amortize;
mod apply;
mod engine;
mod series;
mod state;

pub use amortize::{advance_debt_month, scheduled_monthly_payment, DebtPeriod};
pub use apply::{apply_event, DebtPaymentRequest, EventOutcome};
pub use engine::{ProjectionEngine, ProjectionInput};
pub use series::{
    AssetBreakdownPoint, CashFlowPoint, DebtPayoffPoint, ProjectionResult, ProjectionSummary,
    SeriesPoint,
};
pub use state::ProjectionState;
