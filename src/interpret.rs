//! Threshold rules that turn rows into qualitative judgments
//!
//! Every interpreter is silent inside its neutral band and never fails on a
//! missing field.

use crate::dataset::{EventRow, IncomeRow};
use crate::event::EventType;

/// Coefficient magnitude beyond which the event sensitivity is called out
pub const COEFFICIENT_THRESHOLD: f64 = 1.0;
pub const HIGH_OPERATING_MARGIN: f64 = 0.2;
pub const LOW_OPERATING_MARGIN: f64 = 0.1;

pub const INCOME_INTERPRETATION_HEADING: &str = "Interpretation of Income Statement Data";

/// Judgments on the event coefficient, worded for the event type
pub fn interpret_event(event_type: EventType, row: &EventRow) -> Vec<String> {
    let coefficient = row.event_coefficient;
    let label = event_type.label();

    if coefficient < -COEFFICIENT_THRESHOLD {
        vec![format!(
            "1% Increase in {}: Stock price decreases significantly. Increase portfolio risk.",
            label
        )]
    } else if coefficient > COEFFICIENT_THRESHOLD {
        let benefit = match event_type {
            EventType::Inflation => "inflation",
            EventType::InterestRate => "interest hikes",
        };
        vec![format!(
            "1% Increase in {}: Stock price increases, benefiting from {}.",
            label, benefit
        )]
    } else {
        Vec::new()
    }
}

/// Judgments on the average operating margin, if the row carries one
pub fn interpret_income(row: &IncomeRow) -> Vec<String> {
    match row.average_operating_margin() {
        Some(margin) if margin > HIGH_OPERATING_MARGIN => {
            vec!["High Operating Margin: Indicates strong management effectiveness.".to_string()]
        }
        Some(margin) if margin < LOW_OPERATING_MARGIN => {
            vec!["Low Operating Margin: Reflects risk in profitability.".to_string()]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CellValue, AVERAGE_OPERATING_MARGIN};

    fn event(coefficient: f64) -> EventRow {
        EventRow::new("ABC", coefficient)
    }

    #[test]
    fn test_event_boundaries_are_strict() {
        for event_type in EventType::ALL {
            assert!(interpret_event(event_type, &event(-1.0)).is_empty());
            assert!(interpret_event(event_type, &event(1.0)).is_empty());
            assert!(interpret_event(event_type, &event(0.0)).is_empty());
        }
    }

    #[test]
    fn test_negative_sensitivity() {
        let judgments = interpret_event(EventType::Inflation, &event(-1.01));
        assert_eq!(
            judgments,
            vec!["1% Increase in Inflation: Stock price decreases significantly. Increase portfolio risk."]
        );

        let rates = interpret_event(EventType::InterestRate, &event(-1.01));
        assert_eq!(
            rates,
            vec!["1% Increase in Interest Rate: Stock price decreases significantly. Increase portfolio risk."]
        );
    }

    #[test]
    fn test_positive_sensitivity() {
        let inflation = interpret_event(EventType::Inflation, &event(1.01));
        assert_eq!(
            inflation,
            vec!["1% Increase in Inflation: Stock price increases, benefiting from inflation."]
        );

        let rates = interpret_event(EventType::InterestRate, &event(1.01));
        assert_eq!(
            rates,
            vec!["1% Increase in Interest Rate: Stock price increases, benefiting from interest hikes."]
        );
    }

    #[test]
    fn test_operating_margin_bands() {
        let row = |margin: f64| IncomeRow::new("ABC").with_number(AVERAGE_OPERATING_MARGIN, margin);

        assert_eq!(interpret_income(&row(0.25)).len(), 1);
        assert!(interpret_income(&row(0.25))[0].starts_with("High Operating Margin"));
        assert!(interpret_income(&row(0.05))[0].starts_with("Low Operating Margin"));
        assert!(interpret_income(&row(0.1)).is_empty());
        assert!(interpret_income(&row(0.2)).is_empty());
        assert!(interpret_income(&row(0.15)).is_empty());
    }

    #[test]
    fn test_missing_margin_is_silent() {
        assert!(interpret_income(&IncomeRow::new("ABC")).is_empty());

        let text = IncomeRow::new("ABC")
            .with_field(AVERAGE_OPERATING_MARGIN, CellValue::Text("n/a".to_string()));
        assert!(interpret_income(&text).is_empty());
    }
}
