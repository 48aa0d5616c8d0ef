use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::FetchError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of quotations, one value per currency pair column.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub values: Vec<RateValue>,
}

/// A single quotation as the endpoint sent it. Strings stay strings, so
/// `"7.10"` is kept verbatim; only JSON numbers become `Number`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RateValue {
    Blank,
    Text(String),
    Number(Decimal),
    // Out of `Decimal` range, booleans, nested values.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl QueryWindow {
    /// Window of `days` calendar days back from `end_date`, both ends inclusive.
    pub fn ending_on(end_date: NaiveDate, days: u64) -> Result<Self, FetchError> {
        let start_date = end_date
            .checked_sub_days(Days::new(days))
            .ok_or(FetchError::DateOutOfRange(end_date))?;

        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start(&self) -> String {
        self.start_date.format(DATE_FORMAT).to_string()
    }

    pub fn end(&self) -> String {
        self.end_date.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn window_spans_sixty_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let window = QueryWindow::ending_on(today, 60).unwrap();

        assert_eq!(window.start(), "2024-01-01");
        assert_eq!(window.end(), "2024-03-01");
    }

    #[test]
    fn window_before_calendar_start_is_rejected() {
        let result = QueryWindow::ending_on(NaiveDate::MIN, 1);
        assert!(matches!(result, Err(FetchError::DateOutOfRange(_))));
    }

    #[test]
    fn record_values_keep_their_kind() {
        let record: RateRecord =
            serde_json::from_str(r#"{"date":"2024-01-02","values":["7.10","---",null,42]}"#)
                .unwrap();

        assert_eq!(record.date.as_deref(), Some("2024-01-02"));
        assert_eq!(
            record.values,
            vec![
                RateValue::Text("7.10".to_string()),
                RateValue::Text("---".to_string()),
                RateValue::Blank,
                RateValue::Number(Decimal::from_str("42").unwrap()),
            ]
        );
    }

    #[test]
    fn unusual_values_do_not_fail_the_record() {
        let record: RateRecord =
            serde_json::from_str(r#"{"date":"2024-01-02","values":[1e30,true,{"bid":7.1}]}"#)
                .unwrap();

        assert_eq!(record.values.len(), 3);
        assert_eq!(record.values[0], RateValue::Other(serde_json::json!(1e30)));
        assert_eq!(record.values[1], RateValue::Other(serde_json::Value::Bool(true)));
        assert!(matches!(record.values[2], RateValue::Other(serde_json::Value::Object(_))));
    }

    #[test]
    fn record_without_fields_defaults_to_empty() {
        let record: RateRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.date, None);
        assert!(record.values.is_empty());
    }
}
