//! Event types and calculation modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macroeconomic driver being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Inflation,
    InterestRate,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::Inflation, EventType::InterestRate];

    /// Human-readable label, as used in headings and judgments
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Inflation => "Inflation",
            EventType::InterestRate => "Interest Rate",
        }
    }

    /// Heading printed above the event interpretation
    pub fn interpretation_heading(&self) -> &'static str {
        match self {
            EventType::Inflation => "Interpretation of Inflation Event Data",
            EventType::InterestRate => "Interpretation of Interest Rate Event Data",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inflation" => Ok(EventType::Inflation),
            "interest rate" | "interest-rate" | "interest_rate" | "interestrate" => {
                Ok(EventType::InterestRate)
            }
            other => Err(format!("Unknown event type: {}", other)),
        }
    }
}

/// How the target rate is turned into projected values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationMode {
    /// Uniform percentage shift by the target rate
    Simple,
    /// Driven by the event coefficient and per-field correlation factors
    Dynamic,
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMode::Simple => f.write_str("Simple"),
            CalculationMode::Dynamic => f.write_str("Dynamic"),
        }
    }
}

impl FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(CalculationMode::Simple),
            "dynamic" => Ok(CalculationMode::Dynamic),
            other => Err(format!("Unknown calculation mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_parsing() {
        assert_eq!("Inflation".parse::<EventType>(), Ok(EventType::Inflation));
        assert_eq!("Interest Rate".parse::<EventType>(), Ok(EventType::InterestRate));
        assert_eq!("interest-rate".parse::<EventType>(), Ok(EventType::InterestRate));
        assert!("gdp".parse::<EventType>().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("dynamic".parse::<CalculationMode>(), Ok(CalculationMode::Dynamic));
        assert_eq!("Simple".parse::<CalculationMode>(), Ok(CalculationMode::Simple));
        assert!("compound".parse::<CalculationMode>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(EventType::InterestRate.to_string(), "Interest Rate");
        assert_eq!(
            EventType::Inflation.interpretation_heading(),
            "Interpretation of Inflation Event Data"
        );
    }
}
