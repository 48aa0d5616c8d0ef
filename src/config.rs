use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::mailer::Recipients;

pub const DEFAULT_URL: &str = "http://www.chinamoney.com.cn/ags/ms/cm-u-bk-ccpr/CcprHisNew";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_FILENAME: &str = "exchange_rates.xlsx";

/// Everything a run needs. Defaults reproduce the daily USD/CNY snapshot.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub user_agent: String,
    pub currency: String,
    /// Calendar days covered by the query window.
    pub window_days: u64,
    pub page_num: u32,
    /// The endpoint returns at most this many records per call.
    pub page_size: u32,
    /// `None` means the directory of the running executable.
    pub output_dir: Option<PathBuf>,
    pub filename: String,
    pub subject: String,
    pub body: String,
    pub sender: String,
    pub recipients: Recipients,
    /// Log fetch failures and carry on as if no records came back.
    pub degrade_on_fetch_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            currency: "USD/CNY".to_string(),
            window_days: 60,
            page_num: 1,
            page_size: 15,
            output_dir: None,
            filename: DEFAULT_FILENAME.to_string(),
            subject: "Exchange Rate Records 中国人民银行中间价汇率".to_string(),
            body: "附件为近15天的各币种汇率数据".to_string(),
            sender: "exchange-rates@localhost".to_string(),
            recipients: Recipients::Many(vec![
                "recipent1@email.com".to_string(),
                "receipent2@email.com".to_string(),
            ]),
            degrade_on_fetch_error: true,
        }
    }
}

impl Config {
    /// Defaults overridden by `RATES_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("RATES_URL") {
            config.url = url;
        }
        if let Some(currency) = lookup("RATES_CURRENCY") {
            config.currency = currency;
        }
        if let Some(days) = lookup("RATES_WINDOW_DAYS") {
            config.window_days = parse("RATES_WINDOW_DAYS", days)?;
        }
        if let Some(size) = lookup("RATES_PAGE_SIZE") {
            config.page_size = parse("RATES_PAGE_SIZE", size)?;
        }
        if let Some(dir) = lookup("RATES_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(filename) = lookup("RATES_FILENAME") {
            config.filename = filename;
        }
        if let Some(sender) = lookup("RATES_SENDER") {
            config.sender = sender;
        }
        if let Some(list) = lookup("RATES_RECIPIENTS") {
            let mut addresses: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|address| !address.is_empty())
                .map(str::to_string)
                .collect();
            config.recipients = match addresses.len() {
                0 => {
                    return Err(ConfigError::Invalid {
                        key: "RATES_RECIPIENTS",
                        value: list,
                    });
                }
                1 => Recipients::Single(addresses.remove(0)),
                _ => Recipients::Many(addresses),
            };
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
