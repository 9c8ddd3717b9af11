use std::time::{Duration, Instant};

use chrono::NaiveTime;

use super::{is_four_twenty_one, time_window_events, Participant, Phase, StatEvent};
use crate::config::TokeConfig;

/// One per-guild countdown session. All methods are synchronous and take the
/// clock as arguments; the async shell in `runner` owns timers and messaging.
pub struct Session {
    phase: Phase,
    participants: Vec<Participant>,
    remaining_secs: u32,
    cooldown_until: Option<Instant>,
}

pub enum JoinOutcome {
    /// Idle -> Countdown. The caller announces the session and spawns the tick task.
    Started {
        countdown_secs: u32,
        events: Vec<(Participant, StatEvent)>,
    },
    /// Joined a running countdown.
    Joined {
        events: Vec<(Participant, StatEvent)>,
    },
    /// Joined inside the save window; the clock got a bonus.
    Saved {
        remaining_secs: u32,
        events: Vec<(Participant, StatEvent)>,
    },
    /// Not an error: the user is already in and nothing changed.
    AlreadyJoined,
    CoolingDown {
        remaining_secs: u64,
    },
}

pub struct Resolution {
    pub participants: Vec<Participant>,
    pub events: Vec<(Participant, StatEvent)>,
}

impl Resolution {
    pub fn is_solo(&self) -> bool {
        self.participants.len() == 1
    }
}

pub enum TickOutcome {
    Counting { remaining_secs: u32 },
    GetReady { remaining_secs: u32 },
    Resolved(Resolution),
    /// The session left Countdown between ticks; the tick task should stop.
    NotCounting,
}

pub enum EarlyStartOutcome {
    NotCoolingDown,
    Lost { remaining_secs: u64 },
    Won,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            participants: Vec::new(),
            remaining_secs: 0,
            cooldown_until: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whole seconds of cooldown left, `None` outside Cooldown or once the
    /// deadline has passed.
    pub fn cooldown_remaining(&self, now: Instant) -> Option<u64> {
        match (self.phase, self.cooldown_until) {
            (Phase::Cooldown, Some(until)) if now < until => {
                Some((until - now).as_secs().max(1))
            }
            _ => None,
        }
    }

    pub fn join(
        &mut self,
        user: Participant,
        now: Instant,
        local: NaiveTime,
        cfg: &TokeConfig,
    ) -> JoinOutcome {
        // A cooldown whose deadline passed but whose expiry task has not
        // fired yet behaves as Idle.
        if self.phase == Phase::Cooldown {
            match self.cooldown_remaining(now) {
                Some(remaining_secs) => return JoinOutcome::CoolingDown { remaining_secs },
                None => self.finish_cooldown(now),
            }
        }

        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Countdown;
                self.remaining_secs = cfg.countdown_secs;
                self.participants.push(user.clone());

                let mut events = vec![(user.clone(), StatEvent::Joined)];
                for ev in time_window_events(local) {
                    events.push((user.clone(), ev));
                }
                JoinOutcome::Started {
                    countdown_secs: cfg.countdown_secs,
                    events,
                }
            }
            Phase::Countdown => {
                if self.participants.iter().any(|p| p.id == user.id) {
                    return JoinOutcome::AlreadyJoined;
                }
                self.participants.push(user.clone());

                let mut events = vec![(user.clone(), StatEvent::Joined)];
                for ev in time_window_events(local) {
                    events.push((user.clone(), ev));
                }
                if is_four_twenty_one(local) {
                    events.push((user.clone(), StatEvent::JoinedAt421));
                }

                if self.remaining_secs <= cfg.save_threshold_secs {
                    self.remaining_secs += cfg.save_bonus_secs;
                    events.push((user, StatEvent::SavedToke));
                    JoinOutcome::Saved {
                        remaining_secs: self.remaining_secs,
                        events,
                    }
                } else {
                    JoinOutcome::Joined { events }
                }
            }
            Phase::Cooldown => unreachable!("cooldown handled above"),
        }
    }

    /// One-second tick while counting down. Resolution clears the join set
    /// and opens the cooldown window in the same mutation, so a join
    /// serialized after the zero tick always sees Cooldown.
    pub fn tick(&mut self, now: Instant, cfg: &TokeConfig) -> TickOutcome {
        if self.phase != Phase::Countdown {
            return TickOutcome::NotCounting;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            if self.remaining_secs <= 3 {
                return TickOutcome::GetReady {
                    remaining_secs: self.remaining_secs,
                };
            }
            return TickOutcome::Counting {
                remaining_secs: self.remaining_secs,
            };
        }

        let participants: Vec<Participant> = std::mem::take(&mut self.participants);
        let events = if participants.len() == 1 {
            vec![(participants[0].clone(), StatEvent::SoloCompleted)]
        } else {
            let group_size = participants.len();
            participants
                .iter()
                .cloned()
                .map(|p| (p, StatEvent::GroupCompleted { group_size }))
                .collect()
        };

        self.phase = Phase::Cooldown;
        self.cooldown_until = Some(now + Duration::from_secs(cfg.cooldown_secs));

        TickOutcome::Resolved(Resolution {
            participants,
            events,
        })
    }

    /// Deferred cooldown reset. A no-op unless the deadline has actually
    /// passed, so a bypass that already restarted the machine (or a newer
    /// cooldown) is never clobbered.
    pub fn finish_cooldown(&mut self, now: Instant) {
        if self.phase == Phase::Cooldown && self.cooldown_remaining(now).is_none() {
            self.phase = Phase::Idle;
            self.cooldown_until = None;
        }
    }

    /// The randomized cooldown bypass. The caller rolls the dice (and keeps
    /// the attempt counters); a won roll cancels the cooldown so a normal
    /// Idle -> Countdown join can follow.
    pub fn attempt_early_start(&mut self, now: Instant, roll_won: bool) -> EarlyStartOutcome {
        match self.cooldown_remaining(now) {
            Some(remaining_secs) => {
                if roll_won {
                    self.phase = Phase::Idle;
                    self.cooldown_until = None;
                    EarlyStartOutcome::Won
                } else {
                    EarlyStartOutcome::Lost { remaining_secs }
                }
            }
            None => {
                self.finish_cooldown(now);
                EarlyStartOutcome::NotCoolingDown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::model::id::UserId;

    fn cfg() -> TokeConfig {
        TokeConfig::default()
    }

    fn user(n: u64) -> Participant {
        Participant {
            id: UserId::new(n),
            name: format!("user{n}"),
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn run_to_zero(s: &mut Session, now: Instant, cfg: &TokeConfig) -> Resolution {
        loop {
            match s.tick(now, cfg) {
                TickOutcome::Resolved(res) => return res,
                TickOutcome::NotCounting => panic!("countdown stopped without resolving"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_first_join_starts_countdown() {
        let mut s = Session::new();
        let now = Instant::now();
        match s.join(user(1), now, noon(), &cfg()) {
            JoinOutcome::Started {
                countdown_secs,
                events,
            } => {
                assert_eq!(countdown_secs, 60);
                assert_eq!(events, vec![(user(1), StatEvent::Joined)]);
            }
            _ => panic!("expected Started"),
        }
        assert_eq!(s.phase(), Phase::Countdown);
        assert_eq!(s.participants().len(), 1);
    }

    #[test]
    fn test_duplicate_join_is_reported_not_recorded() {
        let mut s = Session::new();
        let now = Instant::now();
        s.join(user(1), now, noon(), &cfg());
        assert!(matches!(
            s.join(user(1), now, noon(), &cfg()),
            JoinOutcome::AlreadyJoined
        ));
        assert_eq!(s.participants().len(), 1);
    }

    #[test]
    fn test_participants_never_empty_while_counting() {
        let mut s = Session::new();
        let now = Instant::now();
        s.join(user(1), now, noon(), &cfg());
        s.join(user(2), now, noon(), &cfg());
        for _ in 0..30 {
            match s.tick(now, &cfg()) {
                TickOutcome::Resolved(_) | TickOutcome::NotCounting => break,
                _ => assert!(!s.participants().is_empty()),
            }
        }
    }

    #[test]
    fn test_solo_resolution_emits_exactly_one_solo_event() {
        let mut s = Session::new();
        let now = Instant::now();
        s.join(user(1), now, noon(), &cfg());
        let res = run_to_zero(&mut s, now, &cfg());
        assert!(res.is_solo());
        assert_eq!(res.events, vec![(user(1), StatEvent::SoloCompleted)]);
        assert_eq!(s.phase(), Phase::Cooldown);
        assert!(s.participants().is_empty());
    }

    #[test]
    fn test_group_resolution_emits_group_event_per_participant() {
        let mut s = Session::new();
        let now = Instant::now();
        for n in 1..=3 {
            s.join(user(n), now, noon(), &cfg());
        }
        let res = run_to_zero(&mut s, now, &cfg());
        assert!(!res.is_solo());
        assert_eq!(res.events.len(), 3);
        for (_, ev) in &res.events {
            assert_eq!(*ev, StatEvent::GroupCompleted { group_size: 3 });
        }
    }

    #[test]
    fn test_late_join_saves_the_toke() {
        let mut s = Session::new();
        let now = Instant::now();
        let cfg = cfg();
        s.join(user(1), now, noon(), &cfg);
        // Burn the clock down into the save window.
        while s.remaining_secs() > cfg.save_threshold_secs {
            s.tick(now, &cfg);
        }
        let before = s.remaining_secs();
        match s.join(user(2), now, noon(), &cfg) {
            JoinOutcome::Saved {
                remaining_secs,
                events,
            } => {
                assert_eq!(remaining_secs, before + cfg.save_bonus_secs);
                assert!(events.contains(&(user(2), StatEvent::SavedToke)));
                assert!(events.contains(&(user(2), StatEvent::Joined)));
            }
            _ => panic!("expected Saved"),
        }
    }

    #[test]
    fn test_join_above_save_threshold_gets_no_bonus() {
        let mut s = Session::new();
        let now = Instant::now();
        s.join(user(1), now, noon(), &cfg());
        match s.join(user(2), now, noon(), &cfg()) {
            JoinOutcome::Joined { events } => {
                assert!(!events.iter().any(|(_, e)| *e == StatEvent::SavedToke));
            }
            _ => panic!("expected Joined"),
        }
    }

    #[test]
    fn test_cooldown_blocks_until_deadline() {
        let mut s = Session::new();
        let now = Instant::now();
        let cfg = cfg();
        s.join(user(1), now, noon(), &cfg);
        run_to_zero(&mut s, now, &cfg);

        // One tick before expiry: rejected.
        let late = now + Duration::from_secs(cfg.cooldown_secs - 1);
        assert!(matches!(
            s.join(user(2), late, noon(), &cfg),
            JoinOutcome::CoolingDown { .. }
        ));

        // At expiry: accepted, even if the deferred reset has not fired.
        let expired = now + Duration::from_secs(cfg.cooldown_secs);
        assert!(matches!(
            s.join(user(2), expired, noon(), &cfg),
            JoinOutcome::Started { .. }
        ));
        assert_eq!(s.phase(), Phase::Countdown);
    }

    #[test]
    fn test_finish_cooldown_is_guarded_by_deadline() {
        let mut s = Session::new();
        let now = Instant::now();
        let cfg = cfg();
        s.join(user(1), now, noon(), &cfg);
        run_to_zero(&mut s, now, &cfg);

        s.finish_cooldown(now + Duration::from_secs(1));
        assert_eq!(s.phase(), Phase::Cooldown);

        s.finish_cooldown(now + Duration::from_secs(cfg.cooldown_secs));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_early_start_won_cancels_cooldown() {
        let mut s = Session::new();
        let now = Instant::now();
        let cfg = cfg();
        s.join(user(1), now, noon(), &cfg);
        run_to_zero(&mut s, now, &cfg);

        let during = now + Duration::from_secs(10);
        assert!(matches!(
            s.attempt_early_start(during, true),
            EarlyStartOutcome::Won
        ));
        assert_eq!(s.phase(), Phase::Idle);

        // The bypassing user starts a fresh countdown as sole participant.
        match s.join(user(2), during, noon(), &cfg) {
            JoinOutcome::Started { .. } => {}
            _ => panic!("expected Started"),
        }
        assert_eq!(s.participants(), &[user(2)]);

        // The stale expiry task firing later must not reset the new machine.
        s.finish_cooldown(now + Duration::from_secs(cfg.cooldown_secs));
        assert_eq!(s.phase(), Phase::Countdown);
    }

    #[test]
    fn test_early_start_lost_keeps_cooldown() {
        let mut s = Session::new();
        let now = Instant::now();
        let cfg = cfg();
        s.join(user(1), now, noon(), &cfg);
        run_to_zero(&mut s, now, &cfg);

        let during = now + Duration::from_secs(10);
        match s.attempt_early_start(during, false) {
            EarlyStartOutcome::Lost { remaining_secs } => {
                assert!(remaining_secs <= cfg.cooldown_secs - 10);
                assert!(remaining_secs > 0);
            }
            _ => panic!("expected Lost"),
        }
        assert_eq!(s.phase(), Phase::Cooldown);
    }

    #[test]
    fn test_early_start_outside_cooldown_is_rejected() {
        let mut s = Session::new();
        assert!(matches!(
            s.attempt_early_start(Instant::now(), true),
            EarlyStartOutcome::NotCoolingDown
        ));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_get_ready_in_final_three_seconds() {
        let mut s = Session::new();
        let now = Instant::now();
        let cfg = cfg();
        s.join(user(1), now, noon(), &cfg);
        let mut get_ready = 0;
        loop {
            match s.tick(now, &cfg) {
                TickOutcome::GetReady { remaining_secs } => {
                    assert!(remaining_secs <= 3);
                    get_ready += 1;
                }
                TickOutcome::Resolved(_) => break,
                TickOutcome::Counting { .. } => {}
                TickOutcome::NotCounting => panic!("stopped early"),
            }
        }
        assert_eq!(get_ready, 3);
    }

    #[test]
    fn test_four_twenty_join_carries_window_event() {
        let mut s = Session::new();
        let at_420 = NaiveTime::from_hms_opt(16, 20, 0).unwrap();
        match s.join(user(1), Instant::now(), at_420, &cfg()) {
            JoinOutcome::Started { events, .. } => {
                assert!(events.contains(&(user(1), StatEvent::FourTwenty)));
            }
            _ => panic!("expected Started"),
        }
    }
}
