//! Service layer: authentication, snapshot loading, projection orchestration
//!
//! Only two failures surface to callers: a missing user id and a failed
//! snapshot load, both of which occur before any computation begins.
//! Every other anomaly degrades gracefully inside the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accounts::{AccountProvider, RecurringExpenseProvider};
use crate::projection::{ProjectionEngine, ProjectionInput, ProjectionResult};
use crate::scenario::ScenarioConfig;

/// Caller identity resolved by the surrounding API layer
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub user_id: Option<String>,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Resolve to a non-empty user id, or fail before any computation
    pub fn require_user_id(&self) -> Result<&str, ProjectionError> {
        match self.user_id.as_deref() {
            Some(user_id) if !user_id.is_empty() => Ok(user_id),
            _ => Err(ProjectionError::Unauthenticated),
        }
    }
}

/// Hard failures surfaced to the caller
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("authentication required: missing or empty user id")]
    Unauthenticated,

    #[error("failed to load account snapshot: {0}")]
    DataLoad(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Request envelope for one projection run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionRequest {
    #[serde(default)]
    pub config: ScenarioConfig,
}

/// Runs projections against snapshot providers for authenticated users
pub struct ProjectionService {
    accounts: Box<dyn AccountProvider>,
    expenses: Box<dyn RecurringExpenseProvider>,
}

impl ProjectionService {
    pub fn new(
        accounts: Box<dyn AccountProvider>,
        expenses: Box<dyn RecurringExpenseProvider>,
    ) -> Self {
        Self { accounts, expenses }
    }

    /// Authenticate, fetch the initial snapshot once, then run the pure engine
    pub fn project(
        &self,
        auth: &AuthContext,
        request: &ProjectionRequest,
    ) -> Result<ProjectionResult, ProjectionError> {
        let user_id = auth.require_user_id()?;

        let accounts = self
            .accounts
            .active_accounts(user_id)
            .map_err(ProjectionError::DataLoad)?;
        let recurring_expenses = self
            .expenses
            .active_expenses(user_id)
            .map_err(ProjectionError::DataLoad)?;

        let input = ProjectionInput {
            accounts,
            recurring_expenses,
        };
        let engine = ProjectionEngine::new(request.config.clone());
        Ok(engine.project(&input))
    }
}
