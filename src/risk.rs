use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Confidence at or above which a prediction is low risk.
    pub const LOW_THRESHOLD: f64 = 85.0;
    /// Confidence at or above which a prediction is medium risk.
    pub const MEDIUM_THRESHOLD: f64 = 70.0;

    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::LOW_THRESHOLD {
            RiskLevel::Low
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(RiskLevel::from_confidence(100.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(85.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_confidence(84.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_confidence(70.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_confidence(69.9), RiskLevel::High);
        assert_eq!(RiskLevel::from_confidence(0.0), RiskLevel::High);
    }

    #[test]
    fn test_display() {
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High\"");
    }
}
