/// Toke mechanic tunables. The early-toke odds are a game-design parameter:
/// a fixed 1-in-`earlytoke_odds` chance per attempt, not adaptive.
#[derive(Clone, Copy, Debug)]
pub struct TokeConfig {
    pub countdown_secs: u32,
    pub cooldown_secs: u64,
    pub save_threshold_secs: u32,
    pub save_bonus_secs: u32,
    pub earlytoke_odds: u32,
}

impl Default for TokeConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 60,
            cooldown_secs: 240,
            save_threshold_secs: 10,
            save_bonus_secs: 30,
            earlytoke_odds: 10,
        }
    }
}

pub struct Config {
    pub discord_token: String,
    pub media_db_path: String,
    pub stats_db_path: String,
    pub achievements_db_path: String,
    pub toke: TokeConfig,
    pub playlist_wrap: bool,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let toke_defaults = TokeConfig::default();
        Self {
            discord_token: std::env::var("DISCORD_TOKEN")
                .expect("DISCORD_TOKEN environment variable is required"),
            media_db_path: std::env::var("TREESCORD_MEDIA_DB")
                .unwrap_or_else(|_| "media_library.db".to_string()),
            stats_db_path: std::env::var("TREESCORD_STATS_DB")
                .unwrap_or_else(|_| "tokers.db".to_string()),
            achievements_db_path: std::env::var("TREESCORD_ACHIEVEMENTS_DB")
                .unwrap_or_else(|_| "achievements.db".to_string()),
            toke: TokeConfig {
                countdown_secs: env_parse("TOKE_COUNTDOWN_SECS", toke_defaults.countdown_secs),
                cooldown_secs: env_parse("TOKE_COOLDOWN_SECS", toke_defaults.cooldown_secs),
                save_threshold_secs: env_parse(
                    "TOKE_SAVE_THRESHOLD_SECS",
                    toke_defaults.save_threshold_secs,
                ),
                save_bonus_secs: env_parse("TOKE_SAVE_BONUS_SECS", toke_defaults.save_bonus_secs),
                earlytoke_odds: env_parse("EARLYTOKE_ODDS", toke_defaults.earlytoke_odds),
            },
            playlist_wrap: env_parse("TREESCORD_PLAYLIST_WRAP", true),
        }
    }
}
