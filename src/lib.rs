pub mod achievements;
pub mod commands;
pub mod config;
pub mod db;
pub mod events;
pub mod player;
pub mod playlist;
pub mod toke;
pub mod utils;

use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub sessions: toke::SessionManager,
    pub playlists: playlist::PlaylistManager,
    pub media: Arc<db::media::MediaDb>,
    pub stats: Arc<db::stats::StatsDb>,
    pub achievements: Arc<db::achievements::AchievementsDb>,
    pub http_client: reqwest::Client,
    pub toke_config: config::TokeConfig,
    pub playlist_wrap: bool,
}
