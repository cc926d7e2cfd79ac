//! Payment cadence normalization to monthly-equivalent amounts

use serde::{Deserialize, Serialize};

/// How often a payment or expense recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
    Quarterly,
    Annually,
    /// Catch-all for cadence strings this engine does not recognize
    #[serde(other)]
    Unknown,
}

impl Default for PaymentFrequency {
    fn default() -> Self {
        PaymentFrequency::Monthly
    }
}

impl PaymentFrequency {
    /// Parse the wire form used by providers; unrecognized strings map to `Unknown`
    pub fn parse(value: &str) -> Self {
        match value {
            "weekly" => PaymentFrequency::Weekly,
            "bi-weekly" => PaymentFrequency::BiWeekly,
            "semi-monthly" => PaymentFrequency::SemiMonthly,
            "monthly" => PaymentFrequency::Monthly,
            "quarterly" => PaymentFrequency::Quarterly,
            "annually" => PaymentFrequency::Annually,
            _ => PaymentFrequency::Unknown,
        }
    }

    /// Get the string representation matching the wire format
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::BiWeekly => "bi-weekly",
            PaymentFrequency::SemiMonthly => "semi-monthly",
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Annually => "annually",
            PaymentFrequency::Unknown => "unknown",
        }
    }

    /// Multiplier converting one payment at this cadence to a monthly figure
    pub fn monthly_multiplier(self) -> f64 {
        match self {
            PaymentFrequency::Weekly => 52.0 / 12.0,
            PaymentFrequency::BiWeekly => 26.0 / 12.0,
            PaymentFrequency::SemiMonthly => 2.0,
            PaymentFrequency::Monthly => 1.0,
            PaymentFrequency::Quarterly => 1.0 / 3.0,
            PaymentFrequency::Annually => 1.0 / 12.0,
            // Documented fallback: unrecognized cadences pass through unchanged
            PaymentFrequency::Unknown => 1.0,
        }
    }
}

/// Convert a payment at the given cadence to its monthly-equivalent amount
pub fn monthly_amount(amount: f64, frequency: PaymentFrequency) -> f64 {
    if frequency == PaymentFrequency::Unknown {
        log::warn!(
            "unrecognized payment frequency, treating {:.2} as a monthly amount",
            amount
        );
    }
    amount * frequency.monthly_multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quarterly_and_annual_division() {
        assert_relative_eq!(monthly_amount(1_200.0, PaymentFrequency::Quarterly), 400.0);
        assert_relative_eq!(monthly_amount(12_000.0, PaymentFrequency::Annually), 1_000.0);
    }

    #[test]
    fn test_sub_monthly_multipliers() {
        assert_relative_eq!(monthly_amount(100.0, PaymentFrequency::SemiMonthly), 200.0);
        assert_relative_eq!(
            monthly_amount(100.0, PaymentFrequency::Weekly),
            100.0 * 52.0 / 12.0
        );
        assert_relative_eq!(
            monthly_amount(100.0, PaymentFrequency::BiWeekly),
            100.0 * 26.0 / 12.0
        );
    }

    #[test]
    fn test_monthly_is_identity() {
        assert_relative_eq!(monthly_amount(123.45, PaymentFrequency::Monthly), 123.45);
    }

    #[test]
    fn test_unknown_passes_through_as_monthly() {
        assert_relative_eq!(monthly_amount(750.0, PaymentFrequency::Unknown), 750.0);
    }

    #[test]
    fn test_parse_round_trip() {
        for frequency in [
            PaymentFrequency::Weekly,
            PaymentFrequency::BiWeekly,
            PaymentFrequency::SemiMonthly,
            PaymentFrequency::Monthly,
            PaymentFrequency::Quarterly,
            PaymentFrequency::Annually,
        ] {
            assert_eq!(PaymentFrequency::parse(frequency.as_str()), frequency);
        }
        assert_eq!(
            PaymentFrequency::parse("fortnightly-ish"),
            PaymentFrequency::Unknown
        );
    }

    #[test]
    fn test_unknown_deserializes_without_error() {
        let parsed: PaymentFrequency = serde_json::from_str("\"every-blue-moon\"").unwrap();
        assert_eq!(parsed, PaymentFrequency::Unknown);
    }
}
