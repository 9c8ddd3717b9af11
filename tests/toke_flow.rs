use std::time::{Duration, Instant};

use chrono::NaiveTime;
use serenity::model::id::{GuildId, UserId};
use treescord::config::TokeConfig;
use treescord::toke::{
    self, EarlyStartOutcome, JoinOutcome, Participant, Phase, StatEvent, TickOutcome,
};

fn user(n: u64) -> Participant {
    Participant {
        id: UserId::new(n),
        name: format!("user{n}"),
    }
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

#[tokio::test]
async fn test_group_session_flow() {
    // Simulates: /toke from three users, the countdown running out, and the
    // cooldown blocking a fourth user afterwards.
    let sessions = toke::new_session_manager();
    let gid = GuildId::new(1);
    let cfg = TokeConfig::default();
    let now = Instant::now();

    {
        let mut guard = sessions.write().await;
        let session = guard.entry(gid).or_default();

        match session.join(user(1), now, noon(), &cfg) {
            JoinOutcome::Started { countdown_secs, .. } => {
                assert_eq!(countdown_secs, cfg.countdown_secs)
            }
            _ => panic!("first join should start the countdown"),
        }
        assert!(matches!(
            session.join(user(2), now, noon(), &cfg),
            JoinOutcome::Joined { .. }
        ));
        assert!(matches!(
            session.join(user(3), now, noon(), &cfg),
            JoinOutcome::Joined { .. }
        ));
    }

    // The tick task drains the clock.
    let resolution = {
        let mut guard = sessions.write().await;
        let session = guard.get_mut(&gid).unwrap();
        loop {
            match session.tick(now, &cfg) {
                TickOutcome::Resolved(res) => break res,
                TickOutcome::NotCounting => panic!("countdown stopped without resolving"),
                _ => {}
            }
        }
    };

    assert_eq!(resolution.participants.len(), 3);
    assert!(!resolution.is_solo());
    for (_, event) in &resolution.events {
        assert_eq!(*event, StatEvent::GroupCompleted { group_size: 3 });
    }

    // A join right after resolution lands in the cooldown.
    let mut guard = sessions.write().await;
    let session = guard.get_mut(&gid).unwrap();
    assert_eq!(session.phase(), Phase::Cooldown);
    assert!(matches!(
        session.join(user(4), now + Duration::from_secs(1), noon(), &cfg),
        JoinOutcome::CoolingDown { .. }
    ));
}

#[tokio::test]
async fn test_earlytoke_win_restarts_the_session() {
    // Simulates: a resolved session, then /earlytoke with a winning roll,
    // then the winner's automatic join.
    let sessions = toke::new_session_manager();
    let gid = GuildId::new(2);
    let cfg = TokeConfig::default();
    let now = Instant::now();

    let mut guard = sessions.write().await;
    let session = guard.entry(gid).or_default();
    session.join(user(1), now, noon(), &cfg);
    loop {
        if let TickOutcome::Resolved(_) = session.tick(now, &cfg) {
            break;
        }
    }
    assert_eq!(session.phase(), Phase::Cooldown);

    let during = now + Duration::from_secs(30);
    assert!(matches!(
        session.attempt_early_start(during, true),
        EarlyStartOutcome::Won
    ));
    match session.join(user(2), during, noon(), &cfg) {
        JoinOutcome::Started { .. } => {}
        _ => panic!("winner should start a fresh countdown"),
    }
    assert_eq!(session.participants(), &[user(2)]);

    // The original cooldown's expiry task firing later is a no-op.
    session.finish_cooldown(now + Duration::from_secs(cfg.cooldown_secs));
    assert_eq!(session.phase(), Phase::Countdown);
}

#[tokio::test]
async fn test_sessions_are_isolated_per_guild() {
    let sessions = toke::new_session_manager();
    let cfg = TokeConfig::default();
    let now = Instant::now();

    let mut guard = sessions.write().await;
    guard
        .entry(GuildId::new(1))
        .or_default()
        .join(user(1), now, noon(), &cfg);

    let other = guard.entry(GuildId::new(2)).or_default();
    assert_eq!(other.phase(), Phase::Idle);
    assert!(matches!(
        other.join(user(1), now, noon(), &cfg),
        JoinOutcome::Started { .. }
    ));
}
