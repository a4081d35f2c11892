//! Gateway event handling outside of commands.

use poise::serenity_prelude as serenity;
use tracing::{debug, info};

#[cfg(feature = "webhook")]
use crate::utils::webhook::Notification;
use crate::{Data, Error};

pub async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(
                "{} is connected to {} guild(s)",
                data_about_bot.user.name,
                data_about_bot.guilds.len()
            );
            #[cfg(feature = "webhook")]
            if let Some(notifier) = data.webhook.as_ref() {
                let notification = Notification::Online {
                    bot_name: data_about_bot.user.name.clone(),
                };
                if let Err(e) = notifier.notify(&notification).await {
                    tracing::error!("Webhook notification failed: {}", e);
                }
            }
        }
        serenity::FullEvent::Resume { .. } => {
            debug!("Gateway session resumed");
        }
        _ => {}
    }

    #[cfg(not(feature = "webhook"))]
    let _ = data;

    Ok(())
}
