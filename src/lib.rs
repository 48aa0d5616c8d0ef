pub mod config;
pub mod error;
pub mod exchange_rate;
pub mod fetcher;
pub mod mailer;
pub mod pipeline;
pub mod rates_query;
pub mod spreadsheet;

pub use config::Config;
pub use error::{ConfigError, FetchError, MailError, PipelineError, SpreadsheetError};
pub use exchange_rate::{QueryWindow, RateRecord, RateValue};
pub use mailer::{MailClient, OutgoingMail, Recipients, SendmailClient};
pub use pipeline::{RunOutcome, run};
