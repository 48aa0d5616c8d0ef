use chrono::Local;
use log::{debug, info};
use reqwest::Client;

use crate::config::Config;
use crate::error::FetchError;
use crate::exchange_rate::{QueryWindow, RateRecord};
use crate::rates_query::{RatesQuery, RatesResponse};

pub fn build_client(config: &Config) -> Result<Client, FetchError> {
    Ok(Client::builder().user_agent(&config.user_agent).build()?)
}

/// Fetch the records of the configured window ending today.
pub async fn fetch_recent_rates(
    client: &Client,
    config: &Config,
) -> Result<Vec<RateRecord>, FetchError> {
    let today = Local::now().date_naive();
    let window = QueryWindow::ending_on(today, config.window_days)?;

    fetch_rates(client, config, &window).await
}

/// One request, one page. Anything past `page_size` records is not retrieved.
pub async fn fetch_rates(
    client: &Client,
    config: &Config,
    window: &QueryWindow,
) -> Result<Vec<RateRecord>, FetchError> {
    let query = RatesQuery::new(
        window,
        &config.currency,
        config.page_num,
        config.page_size,
    );
    info!(
        "Requesting {} rates from {} to {}",
        query.currency, query.start_date, query.end_date
    );

    let text = load_json(client, &config.url, &query).await?;
    let response: RatesResponse = serde_json::from_str(&text)?;
    debug!("Endpoint returned {} records", response.records.len());

    Ok(response.records)
}

async fn load_json(client: &Client, url: &str, query: &RatesQuery) -> Result<String, FetchError> {
    let resp = client.post(url).json(query).send().await?;
    if !resp.status().is_success() {
        return Err(FetchError::Status(resp.status()));
    }

    let text = resp.text().await?;

    Ok(text)
}
