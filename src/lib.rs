//! askbot: a Discord bot that relays slash-command questions to Google Gemini
//! and posts the answer back in message-sized chunks.

pub mod commands;
pub mod config;
pub mod events;
pub mod utils;

use utils::gemini_client::GeminiClient;
#[cfg(feature = "webhook")]
use utils::webhook::WebhookNotifier;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data shared by every command invocation.
pub struct Data {
    /// Client for the generative-language API.
    pub gemini: GeminiClient,
    /// Outbound notifier, present only when `WEBHOOK_URL` is configured.
    #[cfg(feature = "webhook")]
    pub webhook: Option<WebhookNotifier>,
    /// Character ceiling for a single outgoing message.
    pub max_message_length: usize,
}
