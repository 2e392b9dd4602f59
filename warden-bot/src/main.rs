mod events;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use warden_commands::SerenityPlatform;
use warden_core::{Data, Error};
use warden_moderation::settings::{
    DEFAULT_SPAM_THRESHOLD, DEFAULT_SPAM_TIMEOUT, DEFAULT_SPAM_WINDOW,
};
use warden_moderation::{Dispatcher, EventQueue, ModerationSettings, ModerationState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let guild_id = env::var("DISCORD_GUILD_ID")
        .ok()
        .map(|raw| raw.trim().parse::<u64>())
        .transpose()?;

    let settings = moderation_settings_from_env();
    info!(
        spam_threshold = settings.spam_threshold,
        spam_window_seconds = settings.spam_window.as_secs(),
        spam_timeout_seconds = settings.spam_timeout.as_secs(),
        "Moderation settings loaded."
    );

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: warden_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, "Warden is online.");

                let moderation = ModerationState::new(settings);
                let platform = Arc::new(SerenityPlatform::new(ctx.http.clone()));
                let (events, _consumer) =
                    EventQueue::spawn(Dispatcher::new(moderation.clone()), platform);

                let commands = &framework.options().commands;
                let registered = match guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await
                    }
                    None => poise::builtins::register_globally(ctx, commands).await,
                };

                match registered {
                    Ok(()) => info!(count = commands.len(), ?guild_id, "Synced slash commands."),
                    Err(source) => error!(?source, "failed to sync slash commands"),
                }

                Ok(Data { moderation, events })
            })
        })
        .build();

    info!("Warden is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn moderation_settings_from_env() -> ModerationSettings {
    let spam_threshold = env_u64("SPAM_THRESHOLD", DEFAULT_SPAM_THRESHOLD as u64);

    ModerationSettings {
        spam_threshold: usize::try_from(spam_threshold).unwrap_or(DEFAULT_SPAM_THRESHOLD),
        spam_window: Duration::from_secs(env_u64(
            "SPAM_WINDOW_SECONDS",
            DEFAULT_SPAM_WINDOW.as_secs(),
        )),
        spam_timeout: Duration::from_secs(env_u64(
            "SPAM_TIMEOUT_SECONDS",
            DEFAULT_SPAM_TIMEOUT.as_secs(),
        )),
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

async fn handle_event(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    events::forward_event(data, event);
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .ephemeral(true)
                        .content("Something went wrong while running this command."),
                )
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!("Usage: `/{}`", ctx.command().name);
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx
                .send(
                    poise::CreateReply::default()
                        .ephemeral(true)
                        .content(description),
                )
                .await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}
