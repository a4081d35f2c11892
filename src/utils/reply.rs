//! Delivery of a chunked answer to Discord.
//!
//! The first chunk replaces the deferred interaction response; every later
//! chunk is a follow-up message. Calls are awaited one at a time so Discord
//! shows the chunks in order.

use async_trait::async_trait;
use poise::CreateReply;
use serenity::all::{CreateAttachment, EditInteractionResponse};
use tracing::{debug, error};

use crate::{Context, Error};

/// Sent instead of an empty answer, since Discord rejects empty messages.
pub const EMPTY_ANSWER_PLACEHOLDER: &str = "(the model returned an empty answer)";

/// Where replies to one command invocation go.
#[async_trait]
pub trait ReplySink {
    /// Replaces the primary (deferred) reply.
    async fn edit_primary(&self, content: &str) -> Result<(), Error>;
    /// Sends an additional message after the primary reply.
    async fn append(&self, content: &str) -> Result<(), Error>;
    /// Sends a message with a file attached.
    async fn send_file(&self, content: &str, file_name: &str, data: Vec<u8>) -> Result<(), Error>;
}

/// Sends `chunks` in order, stopping at the first failure.
pub async fn deliver<S>(sink: &S, chunks: &[String]) -> Result<(), Error>
where
    S: ReplySink + Sync + ?Sized,
{
    let Some((first, rest)) = chunks.split_first() else {
        debug!("No chunks to deliver, sending placeholder");
        return sink.edit_primary(EMPTY_ANSWER_PLACEHOLDER).await;
    };

    sink.edit_primary(first).await?;
    for (idx, chunk) in rest.iter().enumerate() {
        debug!("Sending follow-up {}/{}", idx + 1, rest.len());
        sink.append(chunk).await?;
    }

    Ok(())
}

/// [`ReplySink`] backed by a poise command context.
pub struct CommandSink<'a> {
    ctx: Context<'a>,
}

impl<'a> CommandSink<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ReplySink for CommandSink<'_> {
    async fn edit_primary(&self, content: &str) -> Result<(), Error> {
        match self.ctx {
            poise::Context::Application(app) => {
                app.interaction
                    .edit_response(
                        self.ctx.http(),
                        EditInteractionResponse::new().content(content),
                    )
                    .await
                    .map_err(|e| {
                        error!("Failed to edit primary reply: {}", e);
                        e
                    })?;
            }
            _ => {
                self.ctx.say(content).await?;
            }
        }
        Ok(())
    }

    async fn append(&self, content: &str) -> Result<(), Error> {
        self.ctx.say(content).await?;
        Ok(())
    }

    async fn send_file(&self, content: &str, file_name: &str, data: Vec<u8>) -> Result<(), Error> {
        let reply = CreateReply::default()
            .content(content)
            .attachment(CreateAttachment::bytes(data, file_name));

        self.ctx.send(reply).await?;
        Ok(())
    }
}
