use std::path::PathBuf;

use log::{error, info};
use reqwest::Client;

use crate::config::Config;
use crate::error::{MailError, PipelineError};
use crate::fetcher::fetch_recent_rates;
use crate::mailer::{MailClient, OutgoingMail, send_email};
use crate::spreadsheet::{program_directory, write_records};

#[derive(Debug)]
pub enum RunOutcome {
    NoRecords,
    Sent {
        path: PathBuf,
        records: usize,
    },
    /// The spreadsheet stays on disk even though it was not mailed.
    SendFailed {
        path: PathBuf,
        records: usize,
        error: MailError,
    },
}

/// Fetch, write, mail. Stops quietly when there is nothing to send.
pub async fn run<C>(
    config: &Config,
    http: &Client,
    mail_client: &C,
) -> Result<RunOutcome, PipelineError>
where
    C: MailClient + ?Sized,
{
    let records = match fetch_recent_rates(http, config).await {
        Ok(records) => records,
        Err(e) if config.degrade_on_fetch_error => {
            error!("{}", e);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    if records.is_empty() {
        info!("No records retrieved.");
        return Ok(RunOutcome::NoRecords);
    }

    info!("Retrieved {} records: {:?}", records.len(), records);

    let dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => program_directory()?,
    };
    let path = write_records(&records, &dir, &config.filename)?;
    info!("Data has been saved to {}", path.display());

    let mail = OutgoingMail::compose(config, &path);
    let outcome = match send_email(mail_client, &mail).await {
        Ok(()) => RunOutcome::Sent {
            path,
            records: records.len(),
        },
        Err(error) => RunOutcome::SendFailed {
            path,
            records: records.len(),
            error,
        },
    };

    Ok(outcome)
}
