use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use askbot::commands::general::{ask::*, help::*};
use askbot::config::BotConfig;
use askbot::events::event_handler;
use askbot::utils::gemini_client::GeminiClient;
#[cfg(feature = "webhook")]
use askbot::utils::webhook::WebhookNotifier;
use askbot::{Data, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("askbot=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = BotConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let data = build_data(&config)?;

    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![register(), help(), ask()],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands", framework.options().commands.len());
                Ok(data)
            })
        });

    let mut client = ClientBuilder::new(&config.discord_token, intents)
        .framework(framework.build())
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested, closing gateway connections");
                shard_manager.shutdown_all().await;
            }
            Err(e) => warn!("Unable to listen for shutdown signal: {}", e),
        }
    });

    client.start().await.map_err(Into::into)
}

fn build_data(config: &BotConfig) -> Result<Data, Error> {
    let gemini = GeminiClient::new(&config.gemini)?;
    info!("Using Gemini model '{}'", config.gemini.model);

    #[cfg(feature = "webhook")]
    let webhook = match config.webhook_url.clone() {
        Some(url) => {
            info!("Webhook notifications enabled");
            Some(WebhookNotifier::new(url, config.gemini.timeout)?)
        }
        None => None,
    };

    Ok(Data {
        gemini,
        #[cfg(feature = "webhook")]
        webhook,
        max_message_length: config.max_message_length,
    })
}
