//! Scenario parameters: config, tax brackets, payment cadences, and events

mod config;
mod events;
mod frequency;
mod tax;

pub use config::{ScenarioConfig, MAX_HORIZON_YEARS};
pub use events::{
    add_months, expand_events, Event, EventKind, ExpenseChangeMode, Occurrence, Recurrence,
    RecurrenceFrequency, UnsupportedRecurrence,
};
pub use frequency::{monthly_amount, PaymentFrequency};
pub use tax::{calculate_tax, default_federal_brackets, default_regional_brackets, TaxBracket};
