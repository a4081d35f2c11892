//! Optional outbound webhook notifier. Requires the `webhook` feature flag and
//! the `WEBHOOK_URL` environment variable.
//!
//! Payloads use the Discord webhook body shape, so the URL can point straight
//! at a channel webhook.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::utils::chunker::{DISCORD_MESSAGE_LIMIT, chunk_message};

const WEBHOOK_USERNAME: &str = "askbot";

/// Errors that can occur while posting to the webhook.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Webhook communication failure: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Webhook responded with status {0}")]
    Status(u16),
}

/// Something worth telling the webhook about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The bot finished connecting to the gateway.
    Online { bot_name: String },
    /// A question was answered in `chunks` messages.
    Answered {
        user: String,
        question: String,
        chunks: usize,
    },
    /// A question could not be answered.
    Failed {
        user: String,
        question: String,
        error: String,
    },
}

impl Notification {
    /// Renders the notification as message text, cut to a single Discord message.
    pub fn render(&self) -> String {
        let text = match self {
            Notification::Online { bot_name } => format!("**{bot_name}** is online."),
            Notification::Answered {
                user,
                question,
                chunks,
            } => format!(
                "**{user}** asked: {question}\nAnswered in {chunks} message{}.",
                if *chunks == 1 { "" } else { "s" }
            ),
            Notification::Failed {
                user,
                question,
                error,
            } => format!("**{user}** asked: {question}\nFailed: {error}"),
        };

        // Only the first chunk is posted.
        chunk_message(&text, DISCORD_MESSAGE_LIMIT)
            .ok()
            .and_then(|chunks| chunks.into_iter().next())
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    username: &'a str,
    content: String,
}

pub struct WebhookNotifier {
    http: Client,
    url: Url,
}

impl WebhookNotifier {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, WebhookError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    pub async fn notify(&self, notification: &Notification) -> Result<(), WebhookError> {
        let payload = WebhookPayload {
            username: WEBHOOK_USERNAME,
            content: notification.render(),
        };

        debug!("Posting webhook notification: {:?}", notification);
        let response = self
            .http
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status.as_u16()));
        }

        info!("Webhook notification delivered");
        Ok(())
    }
}
