use anyhow::Result;
use log::{info, warn};
use rates_mailer::fetcher::build_client;
use rates_mailer::{Config, RunOutcome, SendmailClient, run};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let http = build_client(&config)?;
    let mailer = SendmailClient::new(&config.sender)?;

    match run(&config, &http, &mailer).await? {
        RunOutcome::NoRecords => {}
        RunOutcome::Sent { path, records } => {
            info!("Mailed {} records from {}", records, path.display());
        }
        RunOutcome::SendFailed { path, .. } => {
            warn!("Spreadsheet kept at {} but not mailed", path.display());
        }
    }

    Ok(())
}
