//! Net Worth Engine - financial projection simulation for personal-finance scenarios
//!
//! This library provides:
//! - Progressive tax calculation over ordered bracket lists
//! - Payment-cadence normalization and recurring-event expansion
//! - Loan/mortgage amortization roll-forward
//! - A month-by-month net worth simulator producing six aligned time series
//! - A batch scenario runner for parallel what-if analysis

pub mod accounts;
pub mod projection;
pub mod runner;
pub mod scenario;
pub mod service;

// Re-export commonly used types
pub use accounts::{AccountSnapshot, AccountType, StaticAccountStore};
pub use projection::{ProjectionEngine, ProjectionInput, ProjectionResult};
pub use runner::ScenarioRunner;
pub use scenario::ScenarioConfig;
pub use service::{AuthContext, ProjectionError, ProjectionRequest, ProjectionService};
