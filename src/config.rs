use crate::error::{FinanceError, Result};
use crate::schema::{ForecastHorizon, ForecastMethod};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_currency_symbol() -> String {
    "KES".to_string()
}

fn default_lookback_months() -> u32 {
    24
}

/// Longest accepted lookback window, in months.
pub const MAX_LOOKBACK_MONTHS: u32 = 1200;

fn default_horizon() -> u32 {
    12
}

/// Display and forecasting settings, resolved once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinanceSettings {
    #[serde(default = "default_currency_symbol")]
    #[schemars(description = "Currency label shown in front of amounts, e.g. 'KES' or '$'")]
    pub currency_symbol: String,

    #[serde(default = "default_lookback_months")]
    #[schemars(
        description = "Whole months to look back before the current month (1 to 1200). The current partial month is always included, so up to lookback_months + 1 monthly totals reach the forecast."
    )]
    pub lookback_months: u32,

    #[serde(default = "default_horizon")]
    #[schemars(description = "Horizon used when the form does not choose one (6, 12, 18 or 24)")]
    pub default_horizon: u32,

    #[serde(default)]
    pub default_method: ForecastMethod,
}

impl Default for FinanceSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            lookback_months: default_lookback_months(),
            default_horizon: default_horizon(),
            default_method: ForecastMethod::default(),
        }
    }
}

impl FinanceSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookback_months == 0 {
            return Err(FinanceError::InvalidSettings(
                "lookback_months must be at least 1".to_string(),
            ));
        }
        if self.lookback_months > MAX_LOOKBACK_MONTHS {
            return Err(FinanceError::InvalidSettings(format!(
                "lookback_months must be at most {}, got {}",
                MAX_LOOKBACK_MONTHS, self.lookback_months
            )));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(FinanceError::InvalidSettings(
                "currency_symbol must not be blank".to_string(),
            ));
        }
        ForecastHorizon::from_choice(self.default_horizon)
            .map_err(|e| FinanceError::InvalidSettings(format!("default_horizon: {}", e)))?;
        Ok(())
    }

    /// Formats an amount as `"<symbol> 1,234.50"`.
    pub fn format_amount(&self, amount: f64) -> String {
        let negative = amount < 0.0;
        let fixed = format!("{:.2}", amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!(
            "{}{} {}.{}",
            if negative { "-" } else { "" },
            self.currency_symbol,
            grouped,
            fraction
        )
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FinanceSettings)
    }
}

/// Per-request state handed explicitly to every operation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub settings: FinanceSettings,
    pub today: NaiveDate,
}

impl RequestContext {
    pub fn new(settings: FinanceSettings, today: NaiveDate) -> Self {
        Self { settings, today }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings = FinanceSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, FinanceSettings::default());
        assert_eq!(settings.currency_symbol, "KES");
        assert_eq!(settings.lookback_months, 24);
        assert_eq!(settings.default_method, ForecastMethod::Linear);
    }

    #[test]
    fn test_partial_override() {
        let settings =
            FinanceSettings::from_json_str(r#"{"currency_symbol": "$", "default_method": "seasonal"}"#)
                .unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_method, ForecastMethod::Seasonal);
        assert_eq!(settings.default_horizon, 12);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(matches!(
            FinanceSettings::from_json_str(r#"{"lookback_months": 0}"#),
            Err(FinanceError::InvalidSettings(_))
        ));
        assert!(matches!(
            FinanceSettings::from_json_str(r#"{"lookback_months": 1201}"#),
            Err(FinanceError::InvalidSettings(_))
        ));
        assert!(matches!(
            FinanceSettings::from_json_str(r#"{"lookback_months": 2147483649}"#),
            Err(FinanceError::InvalidSettings(_))
        ));
        assert!(FinanceSettings::from_json_str(r#"{"lookback_months": 1200}"#).is_ok());
        assert!(matches!(
            FinanceSettings::from_json_str(r#"{"default_horizon": 9}"#),
            Err(FinanceError::InvalidSettings(_))
        ));
        assert!(matches!(
            FinanceSettings::from_json_str(r#"{"default_method": "arima"}"#),
            Err(FinanceError::SerializationError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = FinanceSettings::from_json_file("/nonexistent/finance-settings.json");
        assert!(matches!(result, Err(FinanceError::IoError(_))));
    }

    #[test]
    fn test_format_amount() {
        let settings = FinanceSettings::default();
        assert_eq!(settings.format_amount(1234567.891), "KES 1,234,567.89");
        assert_eq!(settings.format_amount(12.5), "KES 12.50");
        assert_eq!(settings.format_amount(-999.0), "-KES 999.00");
        assert_eq!(settings.format_amount(0.0), "KES 0.00");
    }

    #[test]
    fn test_schema_generation() {
        let schema = serde_json::to_string(&FinanceSettings::generate_json_schema()).unwrap();
        assert!(schema.contains("currency_symbol"));
        assert!(schema.contains("lookback_months"));
    }
}
