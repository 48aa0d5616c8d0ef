use serde::Deserialize;
use serde::Serialize;

use crate::exchange_rate::{QueryWindow, RateRecord};

/// Body of the history request. The endpoint wants every field as a string.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatesQuery {
    pub start_date: String,
    pub end_date: String,
    pub currency: String,
    pub page_num: String,
    pub page_size: String,
}

impl RatesQuery {
    pub fn new(window: &QueryWindow, currency: &str, page_num: u32, page_size: u32) -> Self {
        Self {
            start_date: window.start(),
            end_date: window.end(),
            currency: currency.to_string(),
            page_num: page_num.to_string(),
            page_size: page_size.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RatesResponse {
    #[serde(default)]
    pub records: Vec<RateRecord>,
}
