//! Financial events: one-time and recurring scenario mutations

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an expense-level change is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseChangeMode {
    /// Set the monthly expense level directly
    Absolute,
    /// Add a signed dollar delta
    RelativeAmount,
    /// Multiply by (1 + delta)
    RelativePercent,
}

/// What an event does when it falls due.
///
/// A closed union: adding a kind forces every match site to handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    OneTimeIncome {
        amount: f64,
    },
    OneTimeExpense {
        amount: f64,
    },
    /// Extra principal against a specific debt account, capped at its balance
    ExtraDebtPayment {
        account_id: String,
        amount: f64,
    },
    /// Overwrite the salary level, and optionally its growth rate
    SalaryChange {
        annual_salary: f64,
        #[serde(default)]
        annual_growth: Option<f64>,
    },
    ExpenseChange {
        mode: ExpenseChangeMode,
        amount: f64,
        #[serde(default)]
        annual_growth: Option<f64>,
    },
    /// New savings rate, clamped to [0, 1] at application time
    SavingsRateChange {
        rate: f64,
    },
}

/// Recurrence cadence for repeating events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceFrequency {
    Monthly,
    Quarterly,
    Annually,
    /// Catch-all for cadence strings this engine does not recognize
    #[serde(other)]
    Unknown,
}

/// A recurrence cadence with no defined month step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported recurrence frequency")]
pub struct UnsupportedRecurrence;

impl RecurrenceFrequency {
    /// Months between consecutive occurrences
    pub fn step_months(self) -> Result<u32, UnsupportedRecurrence> {
        match self {
            RecurrenceFrequency::Monthly => Ok(1),
            RecurrenceFrequency::Quarterly => Ok(3),
            RecurrenceFrequency::Annually => Ok(12),
            RecurrenceFrequency::Unknown => Err(UnsupportedRecurrence),
        }
    }
}

/// Recurrence attached to an event template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: RecurrenceFrequency,

    /// Last date on which an occurrence may fall; the projection horizon
    /// bounds the expansion when absent
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A scenario event as configured by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: EventKind,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

impl Event {
    /// Create a one-time event
    pub fn once(id: impl Into<String>, date: NaiveDate, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            date,
            kind,
            recurrence: None,
        }
    }

    /// Create a recurring event bounded by an optional end date
    pub fn recurring(
        id: impl Into<String>,
        date: NaiveDate,
        kind: EventKind,
        frequency: RecurrenceFrequency,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            kind,
            recurrence: Some(Recurrence {
                frequency,
                end_date,
            }),
        }
    }
}

/// A concrete, dated, non-recurring event instance.
///
/// Occurrences are what the simulation loop consumes; they are never
/// re-expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub id: String,
    pub date: NaiveDate,
    pub kind: EventKind,
}

/// Add calendar months, clamping the day to the target month's length
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, date.day())
        .unwrap_or_else(|| last_day_of_month(year, month))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .expect("valid calendar month")
}

/// Expand event templates into a date-sorted occurrence list.
///
/// Non-recurring events pass through unchanged; recurring events emit one
/// occurrence per step, bounded by the earlier of the recurrence end date
/// and the projection horizon. A cadence without a defined step expands to
/// exactly one occurrence (documented fallback, surfaced as a warning).
pub fn expand_events(events: &[Event], horizon_end: NaiveDate) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();

    for event in events {
        match &event.recurrence {
            None => occurrences.push(Occurrence {
                id: event.id.clone(),
                date: event.date,
                kind: event.kind.clone(),
            }),
            Some(recurrence) => {
                let bound = match recurrence.end_date {
                    Some(end_date) => end_date.min(horizon_end),
                    None => horizon_end,
                };

                match recurrence.frequency.step_months() {
                    Ok(step) => {
                        let mut date = event.date;
                        let mut index = 0u32;
                        while date <= bound {
                            occurrences.push(Occurrence {
                                id: format!("{}-{}", event.id, index),
                                date,
                                kind: event.kind.clone(),
                            });
                            date = add_months(date, step);
                            index += 1;
                        }
                    }
                    Err(UnsupportedRecurrence) => {
                        log::warn!(
                            "event {}: unsupported recurrence frequency, expanding as one-time",
                            event.id
                        );
                        if event.date <= bound {
                            occurrences.push(Occurrence {
                                id: format!("{}-0", event.id),
                                date: event.date,
                                kind: event.kind.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    occurrences.sort_by_key(|occurrence| occurrence.date);
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn income_event(amount: f64) -> EventKind {
        EventKind::OneTimeIncome { amount }
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 11, 15), 2), date(2026, 1, 15));
    }

    #[test]
    fn test_non_recurring_passes_through_unchanged() {
        let events = vec![Event::once("bonus", date(2025, 6, 15), income_event(5_000.0))];
        let occurrences = expand_events(&events, date(2030, 1, 1));

        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].id, "bonus");
        assert_eq!(occurrences[0].date, date(2025, 6, 15));
    }

    #[test]
    fn test_monthly_expansion_count_to_horizon() {
        // Jan 15 through Dec 15 inclusive: 12 occurrences before the
        // horizon end of Jan 1 the following year
        let events = vec![Event::recurring(
            "rent",
            date(2025, 1, 15),
            income_event(100.0),
            RecurrenceFrequency::Monthly,
            None,
        )];
        let occurrences = expand_events(&events, date(2026, 1, 1));

        assert_eq!(occurrences.len(), 12);
        assert_eq!(occurrences[0].id, "rent-0");
        assert_eq!(occurrences[11].id, "rent-11");
        assert_eq!(occurrences[11].date, date(2025, 12, 15));
    }

    #[test]
    fn test_recurrence_end_date_bounds_before_horizon() {
        let events = vec![Event::recurring(
            "sub",
            date(2025, 1, 1),
            income_event(10.0),
            RecurrenceFrequency::Monthly,
            Some(date(2025, 3, 31)),
        )];
        let occurrences = expand_events(&events, date(2030, 1, 1));

        // Jan, Feb, Mar
        assert_eq!(occurrences.len(), 3);
    }

    #[test]
    fn test_quarterly_and_annual_steps() {
        let quarterly = vec![Event::recurring(
            "q",
            date(2025, 1, 1),
            income_event(1.0),
            RecurrenceFrequency::Quarterly,
            None,
        )];
        assert_eq!(expand_events(&quarterly, date(2026, 1, 1)).len(), 5);

        let annual = vec![Event::recurring(
            "a",
            date(2025, 1, 1),
            income_event(1.0),
            RecurrenceFrequency::Annually,
            None,
        )];
        assert_eq!(expand_events(&annual, date(2028, 1, 1)).len(), 4);
    }

    #[test]
    fn test_unknown_frequency_falls_back_to_single_occurrence() {
        let events = vec![Event::recurring(
            "odd",
            date(2025, 4, 1),
            income_event(1.0),
            RecurrenceFrequency::Unknown,
            None,
        )];
        let occurrences = expand_events(&events, date(2030, 1, 1));

        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].id, "odd-0");
    }

    #[test]
    fn test_recurring_start_past_horizon_yields_nothing() {
        let events = vec![Event::recurring(
            "late",
            date(2031, 1, 1),
            income_event(1.0),
            RecurrenceFrequency::Monthly,
            None,
        )];
        assert!(expand_events(&events, date(2030, 1, 1)).is_empty());
    }

    #[test]
    fn test_merged_output_is_date_sorted() {
        let events = vec![
            Event::once("later", date(2025, 9, 1), income_event(1.0)),
            Event::recurring(
                "early",
                date(2025, 2, 1),
                income_event(1.0),
                RecurrenceFrequency::Quarterly,
                None,
            ),
        ];
        let occurrences = expand_events(&events, date(2025, 12, 31));

        let dates: Vec<_> = occurrences.iter().map(|o| o.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_event_json_round_trip() {
        let event = Event::recurring(
            "raise",
            date(2026, 1, 1),
            EventKind::SalaryChange {
                annual_salary: 90_000.0,
                annual_growth: Some(0.04),
            },
            RecurrenceFrequency::Annually,
            Some(date(2029, 1, 1)),
        );

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_event_json_wire_format() {
        let json = r#"{
            "id": "bonus",
            "date": "2026-06-15",
            "type": "one_time_income",
            "amount": 5000.0
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::OneTimeIncome { amount: 5_000.0 });
        assert!(event.recurrence.is_none());
    }
}
