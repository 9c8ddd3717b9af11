use serenity::model::id::GuildId;
use treescord::playlist::{self, ops, Advance, JumpOutcome, UnshuffleOutcome};

async fn seed(pm: &playlist::PlaylistManager, gid: GuildId, n: usize) {
    for i in 1..=n {
        ops::add(pm, gid, &format!("clip {i}"), &format!("/media/clip{i}.mp4")).await;
    }
}

#[tokio::test]
async fn test_add_view_next_flow() {
    // Simulates: /add x3, /view, /next until the end under no-wrap.
    let pm = playlist::new_playlist_manager();
    let gid = GuildId::new(1);
    seed(&pm, gid, 3).await;

    let (entries, current) = ops::snapshot(&pm, gid).await;
    assert_eq!(entries.len(), 3);
    assert_eq!(current, None);

    for expected in ["clip 1", "clip 2", "clip 3"] {
        match ops::advance(&pm, gid, false).await {
            Advance::Play(entry) => assert_eq!(entry.title, expected),
            _ => panic!("expected Play"),
        }
    }
    assert!(matches!(ops::advance(&pm, gid, false).await, Advance::End));

    // The cursor stays on the last entry after hitting the end.
    let (_, current) = ops::snapshot(&pm, gid).await;
    assert_eq!(current, Some(2));
}

#[tokio::test]
async fn test_wrap_policy_loops_the_playlist() {
    let pm = playlist::new_playlist_manager();
    let gid = GuildId::new(2);
    seed(&pm, gid, 2).await;

    ops::advance(&pm, gid, true).await;
    ops::advance(&pm, gid, true).await;
    match ops::advance(&pm, gid, true).await {
        Advance::Play(entry) => assert_eq!(entry.title, "clip 1"),
        _ => panic!("wrap should land back on the first entry"),
    }
}

#[tokio::test]
async fn test_jump_restart_previous_flow() {
    let pm = playlist::new_playlist_manager();
    let gid = GuildId::new(3);
    seed(&pm, gid, 5).await;

    match ops::jump(&pm, gid, 4).await {
        JumpOutcome::Play(entry) => assert_eq!(entry.title, "clip 4"),
        _ => panic!("expected Play"),
    }
    match ops::retreat(&pm, gid, false).await {
        Advance::Play(entry) => assert_eq!(entry.title, "clip 3"),
        _ => panic!("expected Play"),
    }
    match ops::jump(&pm, gid, 9).await {
        JumpOutcome::OutOfRange { len } => assert_eq!(len, 5),
        _ => panic!("expected OutOfRange"),
    }
    match ops::restart(&pm, gid).await {
        Some(entry) => assert_eq!(entry.title, "clip 1"),
        None => panic!("expected the first entry"),
    }
}

#[tokio::test]
async fn test_shuffle_unshuffle_keeps_additions() {
    // Simulates: /shuffle, /add while shuffled, /unshuffle. The restored
    // order is the original order with the new entry at the tail.
    let pm = playlist::new_playlist_manager();
    let gid = GuildId::new(4);
    seed(&pm, gid, 4).await;

    assert!(ops::shuffle(&pm, gid).await.is_some());
    let (shuffled, current) = ops::snapshot(&pm, gid).await;
    assert_eq!(shuffled.len(), 4);
    assert_eq!(current, Some(0));

    ops::add(&pm, gid, "late arrival", "/media/late.mp4").await;

    assert!(matches!(
        ops::unshuffle(&pm, gid).await,
        UnshuffleOutcome::Restored
    ));
    let (restored, _) = ops::snapshot(&pm, gid).await;
    let titles: Vec<&str> = restored.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["clip 1", "clip 2", "clip 3", "clip 4", "late arrival"]
    );

    // Nothing left to restore.
    assert!(matches!(
        ops::unshuffle(&pm, gid).await,
        UnshuffleOutcome::NothingToRestore
    ));
}

#[tokio::test]
async fn test_remove_and_clear_flow() {
    let pm = playlist::new_playlist_manager();
    let gid = GuildId::new(5);
    seed(&pm, gid, 3).await;

    ops::advance(&pm, gid, false).await;
    assert!(ops::remove(&pm, gid, "clip 2").await.is_some());
    assert!(ops::remove(&pm, gid, "clip 2").await.is_none());

    let (entries, _) = ops::snapshot(&pm, gid).await;
    assert_eq!(entries.len(), 2);

    ops::clear(&pm, gid).await;
    let (entries, current) = ops::snapshot(&pm, gid).await;
    assert!(entries.is_empty());
    assert_eq!(current, None);
    assert!(matches!(ops::advance(&pm, gid, true).await, Advance::Empty));
}

#[tokio::test]
async fn test_playlists_are_isolated_per_guild() {
    let pm = playlist::new_playlist_manager();
    seed(&pm, GuildId::new(6), 2).await;

    let (entries, _) = ops::snapshot(&pm, GuildId::new(7)).await;
    assert!(entries.is_empty());
}
