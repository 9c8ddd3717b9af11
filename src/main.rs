use std::sync::Arc;

use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use treescord::{commands, config, db, events, playlist, toke, Data};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    let media = match db::media::MediaDb::new(&config.media_db_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!("media library open failed ({}): {e}", config.media_db_path);
            return;
        }
    };
    tracing::info!("media library ready: {} ({} entries)", config.media_db_path, media.len());

    let stats = match db::stats::StatsDb::new(&config.stats_db_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!("stats db open failed ({}): {e}", config.stats_db_path);
            return;
        }
    };
    tracing::info!("stats db ready: {}", config.stats_db_path);

    let achievements = match db::achievements::AchievementsDb::new(&config.achievements_db_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(
                "achievements db open failed ({}): {e}",
                config.achievements_db_path
            );
            return;
        }
    };
    tracing::info!("achievements db ready: {}", config.achievements_db_path);

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let toke_config = config.toke;
    let playlist_wrap = config.playlist_wrap;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("treescord is ready!");
                Ok(Data {
                    sessions: toke::new_session_manager(),
                    playlists: playlist::new_playlist_manager(),
                    media,
                    stats,
                    achievements,
                    http_client: reqwest::Client::new(),
                    toke_config,
                    playlist_wrap,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .register_songbird()
        .await
        .expect("client build failed");

    if let Err(e) = client.start().await {
        tracing::error!("client error: {e}");
    }
}
