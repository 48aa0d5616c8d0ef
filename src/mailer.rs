use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{AsyncSendmailTransport, AsyncTransport, Message, Tokio1Executor};
use log::{error, info};

use crate::config::Config;
use crate::error::MailError;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    Single(String),
    Many(Vec<String>),
}

impl Recipients {
    /// The `To` line as a mail client shows it: `"a@x; b@y"`.
    pub fn to_field(&self) -> String {
        match self {
            Recipients::Single(address) => address.clone(),
            Recipients::Many(addresses) => addresses.join("; "),
        }
    }

    pub fn addresses(&self) -> Vec<&str> {
        match self {
            Recipients::Single(address) => vec![address.as_str()],
            Recipients::Many(addresses) => addresses.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Recipients::Single(address.to_string())
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addresses: Vec<String>) -> Self {
        Recipients::Many(addresses)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
    pub recipients: Recipients,
}

impl OutgoingMail {
    pub fn compose(config: &Config, attachment: &Path) -> Self {
        Self {
            subject: config.subject.clone(),
            body: config.body.clone(),
            attachment: attachment.to_path_buf(),
            recipients: config.recipients.clone(),
        }
    }
}

/// Something that can hand a finished message to a mail system.
#[async_trait]
pub trait MailClient: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Delivers through the locally installed `sendmail` program, which owns
/// relaying and credentials.
pub struct SendmailClient {
    from: Mailbox,
    transport: AsyncSendmailTransport<Tokio1Executor>,
}

impl SendmailClient {
    pub fn new(sender: &str) -> Result<Self, MailError> {
        Ok(Self {
            from: parse_mailbox(sender)?,
            transport: AsyncSendmailTransport::<Tokio1Executor>::new(),
        })
    }
}

#[async_trait]
impl MailClient for SendmailClient {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(&self.from, mail).await?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|e| MailError::Address(address.to_string(), e))
}

pub async fn build_message(from: &Mailbox, mail: &OutgoingMail) -> Result<Message, MailError> {
    let addresses = mail.recipients.addresses();
    if addresses.is_empty() {
        return Err(MailError::NoRecipients);
    }

    let mut builder = Message::builder().from(from.clone()).subject(&mail.subject);
    for address in addresses {
        builder = builder.to(parse_mailbox(address)?);
    }

    let content = tokio::fs::read(&mail.attachment)
        .await
        .map_err(|e| MailError::Attachment(mail.attachment.clone(), e))?;
    let filename = mail
        .attachment
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    let attachment = Attachment::new(filename).body(content, ContentType::parse(XLSX_CONTENT_TYPE)?);

    let message = builder.multipart(
        MultiPart::mixed()
            .singlepart(SinglePart::plain(mail.body.clone()))
            .singlepart(attachment),
    )?;

    Ok(message)
}

/// Send `mail` and log the outcome. The result is returned for reporting only.
pub async fn send_email<C>(client: &C, mail: &OutgoingMail) -> Result<(), MailError>
where
    C: MailClient + ?Sized,
{
    match client.send(mail).await {
        Ok(()) => {
            info!("Email sent successfully to {}", mail.recipients.to_field());
            Ok(())
        }
        Err(e) => {
            error!("Failed to send email: {}", e);
            Err(e)
        }
    }
}
