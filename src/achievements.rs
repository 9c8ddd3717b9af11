use serenity::model::id::UserId;

use crate::db::achievements::AchievementsDb;
use crate::db::stats::{StatKey, StatRow};

pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    /// Stat threshold for stat-driven badges; `None` for event-driven ones.
    pub criteria: Option<(StatKey, u64)>,
    pub hidden: bool,
}

/// Hidden badges awarded by session events rather than counters.
pub const EARLY_RISER: &str = "early_riser";
pub const TOO_SLOW_421: &str = "too_slow_421";
pub const SECRET_SOCIETY: &str = "secret_society";

macro_rules! badge {
    ($id:literal, $name:literal, $desc:literal, $emoji:literal, $key:expr, $threshold:literal) => {
        Achievement {
            id: $id,
            name: $name,
            description: $desc,
            emoji: $emoji,
            criteria: Some(($key, $threshold)),
            hidden: false,
        }
    };
}

pub const CATALOG: &[Achievement] = &[
    // CS:GO rank ladder for group tokes.
    badge!("cs_group_silver_smoker", "Silver Smoker", "Smoked your way to Silver by joining 1 group toke!", "🎉", StatKey::GroupTokes, 1),
    badge!("cs_group_silver_elite_toker", "Silver Elite Toker", "Reached Silver Elite Toker status with 5 group tokes!", "🥈", StatKey::GroupTokes, 5),
    badge!("cs_group_silver_master_blazer", "Silver Master Blazer", "Blazed to Silver Master after 10 group tokes!", "🔥", StatKey::GroupTokes, 10),
    badge!("cs_group_gold_nova_ganjalord", "Gold Nova Ganjalord", "Crowned Gold Nova Ganjalord for 25 group tokes!", "🏆", StatKey::GroupTokes, 25),
    badge!("cs_group_gold_master_chief", "Gold Master Chief", "Became a Gold Master Chief with 50 group tokes!", "🍁", StatKey::GroupTokes, 50),
    badge!("cs_group_distinguished_ganja_guardian", "Distinguished Ganja Guardian", "Guarding the ganja as Distinguished Master, 100 group tokes strong!", "🛡️", StatKey::GroupTokes, 100),
    badge!("cs_group_legendary_eagle_herbmaster", "Legendary Eagle Herbmaster", "Soared to Legendary Eagle Herbmaster with 200 group tokes!", "🦅", StatKey::GroupTokes, 200),
    badge!("cs_group_supreme_master_chronicler", "Supreme Master Chronicler", "Chronicling 500 supreme group tokes!", "📜", StatKey::GroupTokes, 500),
    badge!("cs_group_global_elite_kushlord", "Global Elite Kushlord", "Ascended to Global Elite Kushlord, a legend of 1000 group tokes!", "💚", StatKey::GroupTokes, 1000),
    // Concentrate ladder for solo tokes.
    badge!("solo_first_dab", "First Dab", "Completed your first solo toke!", "🍯", StatKey::SoloTokes, 1),
    badge!("solo_extractor", "Extractor", "Reached 5 solo tokes!", "⚗️", StatKey::SoloTokes, 5),
    badge!("solo_shatter_slinger", "Shatter Slinger", "Completed 10 solo tokes!", "💥", StatKey::SoloTokes, 10),
    badge!("solo_globetrotter", "Globtrotter", "Completed 25 solo tokes!", "🌟", StatKey::SoloTokes, 25),
    badge!("solo_terp_technician", "Terp Technician", "Became a Terp Technician after 50 solo tokes!", "🌿", StatKey::SoloTokes, 50),
    badge!("solo_diamond_dabber", "Diamond Dabber", "Became a Diamond Dabber after 100 solo tokes!", "💍", StatKey::SoloTokes, 100),
    badge!("solo_live_resin_lord", "Live Resin Lord", "Became a Live Resin Lord after 200 solo tokes!", "✨", StatKey::SoloTokes, 200),
    badge!("solo_rosin_runner", "Rosin Runner", "Became a Rosin Runner after 500 solo tokes!", "💎", StatKey::SoloTokes, 500),
    badge!("solo_concentrate_connoisseur", "Concentrate Connoisseur", "Ascended to Concentrate Connoisseur, a legend of 1000 solo tokes!", "🌌", StatKey::SoloTokes, 1000),
    // General badges.
    badge!("session_saver", "Session Saver", "Saved a toke by joining late!", "🦸", StatKey::TokesSaved, 1),
    badge!("four_twenty_enthusiast", "Do you have the time?", "Joined a toke at 4:20!", "🍁", StatKey::FourTwentyTokes, 1),
    badge!("wake_and_bake", "Wake and Bake", "Joined a toke between 5 AM and 9 AM!", "☀️", StatKey::WakeAndBakeTokes, 1),
    // Hidden badges.
    Achievement {
        id: EARLY_RISER,
        name: "I'm a Joker!",
        description: "Successfully started a toke during cooldown!",
        emoji: "🌅",
        criteria: None,
        hidden: true,
    },
    Achievement {
        id: TOO_SLOW_421,
        name: "You're Too Slow!",
        description: "Joined a toke that started at 4:21!",
        emoji: "💨",
        criteria: None,
        hidden: true,
    },
    Achievement {
        id: SECRET_SOCIETY,
        name: "His Name was Robert Paulson",
        description: "Joined Toke Club! Regain your humanity after the dehumanization caused by the consumerist society.",
        emoji: "🏢",
        criteria: Some((StatKey::TokeClubSessions, 1)),
        hidden: true,
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.id == id)
}

/// Awards every stat-driven badge whose threshold the row now meets and
/// returns only the newly earned ones, in catalog order.
pub fn newly_earned(
    db: &AchievementsDb,
    user_id: UserId,
    row: &StatRow,
) -> Vec<&'static Achievement> {
    let mut earned = Vec::new();
    for ach in CATALOG {
        let Some((key, threshold)) = ach.criteria else {
            continue;
        };
        if row.get(key) >= threshold {
            match db.award(user_id, ach.id) {
                Ok(true) => earned.push(ach),
                Ok(false) => {}
                Err(e) => tracing::error!("failed to award {}: {e}", ach.id),
            }
        }
    }
    earned
}

/// Awards a single event-driven badge, returning it when newly earned.
pub fn award_event_badge(
    db: &AchievementsDb,
    user_id: UserId,
    id: &str,
) -> Option<&'static Achievement> {
    let ach = find(id)?;
    match db.award(user_id, ach.id) {
        Ok(true) => Some(ach),
        Ok(false) => None,
        Err(e) => {
            tracing::error!("failed to award {}: {e}", ach.id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::stats::StatsDb;
    use crate::toke::StatEvent;

    fn uid(n: u64) -> UserId {
        UserId::new(n)
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for ach in CATALOG {
            assert!(seen.insert(ach.id), "duplicate achievement id {}", ach.id);
        }
    }

    #[test]
    fn test_thresholds_cross_in_catalog_order_per_stat() {
        for key in [StatKey::GroupTokes, StatKey::SoloTokes] {
            let thresholds: Vec<u64> = CATALOG
                .iter()
                .filter_map(|a| a.criteria.filter(|(k, _)| *k == key).map(|(_, t)| t))
                .collect();
            assert!(thresholds.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_first_group_toke_earns_silver_smoker_once() {
        let stats = StatsDb::open_in_memory();
        let badges = AchievementsDb::open_in_memory();
        stats.record(uid(1), "alice", &StatEvent::Joined).unwrap();

        let row = stats.user_stats(uid(1)).unwrap();
        let earned = newly_earned(&badges, uid(1), &row);
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].id, "cs_group_silver_smoker");

        // Checking again awards nothing new.
        assert!(newly_earned(&badges, uid(1), &row).is_empty());
    }

    #[test]
    fn test_event_badge_awarded_once() {
        let badges = AchievementsDb::open_in_memory();
        let first = award_event_badge(&badges, uid(1), EARLY_RISER);
        assert_eq!(first.unwrap().id, EARLY_RISER);
        assert!(award_event_badge(&badges, uid(1), EARLY_RISER).is_none());
    }

    #[test]
    fn test_hidden_badges_have_no_stat_criteria_except_toke_club() {
        assert!(find(EARLY_RISER).unwrap().hidden);
        assert!(find(TOO_SLOW_421).unwrap().criteria.is_none());
        assert_eq!(
            find(SECRET_SOCIETY).unwrap().criteria,
            Some((StatKey::TokeClubSessions, 1))
        );
    }
}
