//! Mail delivery through an HTTP JSON mail API with bearer authentication.
//!
//! One POST per submission, no retries. The photo is attached as base64 when
//! it still exists on disk at call time.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::MailConfig;
use crate::notify::{format_message, Notifier, NotifyOutcome, SUBJECT};
use crate::submission::models::{Submission, TempPhoto};

#[derive(Debug, Error)]
enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not read attachment: {0}")]
    Attachment(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<MailAttachment>,
}

#[derive(Debug, Serialize)]
struct MailAttachment {
    filename: String,
    content_type: &'static str,
    /// Base64, standard alphabet.
    content: String,
}

#[derive(Clone)]
pub struct MailApiNotifier {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
    recipient: String,
}

impl MailApiNotifier {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build mail HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
            recipient: config.recipient.clone(),
        })
    }

    async fn send(
        &self,
        submission: &Submission,
        photo: Option<&TempPhoto>,
    ) -> Result<(), MailError> {
        let text = format_message(submission);
        let attachments = load_attachment(photo).await?.into_iter().collect();

        let request = MailRequest {
            from: &self.from,
            to: [&self.recipient],
            subject: SUBJECT,
            text: &text,
            attachments,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for MailApiNotifier {
    async fn notify(&self, submission: &Submission, photo: Option<&TempPhoto>) -> NotifyOutcome {
        match self.send(submission, photo).await {
            Ok(()) => {
                info!(recipient = %self.recipient, "Submission mailed");
                NotifyOutcome::Sent
            }
            Err(e) => {
                warn!("Failed to mail submission: {e}");
                NotifyOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

async fn load_attachment(photo: Option<&TempPhoto>) -> Result<Option<MailAttachment>, MailError> {
    let Some(photo) = photo else {
        return Ok(None);
    };

    let bytes = match tokio::fs::read(&photo.path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %photo.path.display(), "Photo gone, mailing without attachment");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Some(MailAttachment {
        filename: photo.original_name.clone(),
        content_type: photo.content_type,
        content: base64::engine::general_purpose::STANDARD.encode(bytes),
    }))
}
