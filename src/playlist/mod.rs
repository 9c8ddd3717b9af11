pub mod ops;

use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serenity::model::id::GuildId;
use songbird::tracks::TrackHandle;
use tokio::sync::RwLock;

/// Titles are stored normalized so lookups behave the same regardless of how
/// the user typed them.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub title: String,
    /// Opaque source locator: a local file path or a streaming URL. Resolved
    /// by the player, never interpreted here.
    pub source: String,
}

/// The ordered queue and its cursor. Pure state, no player calls; every
/// mutation keeps the cursor in bounds by construction.
#[derive(Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
    /// Snapshot taken at the first shuffle. Additions afterwards are appended
    /// here too, so unshuffle never drops tracks added mid-shuffle.
    original_order: Vec<PlaylistEntry>,
    current: Option<usize>,
    shuffled: bool,
}

pub enum Advance {
    Play(PlaylistEntry),
    Empty,
    /// Only reported under the no-wrap policy.
    End,
}

pub enum JumpOutcome {
    Play(PlaylistEntry),
    OutOfRange { len: usize },
    Empty,
}

pub enum UnshuffleOutcome {
    Restored,
    NothingToRestore,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn add(&mut self, title: &str, source: &str) -> PlaylistEntry {
        let entry = PlaylistEntry {
            title: normalize_title(title),
            source: source.to_string(),
        };
        self.entries.push(entry.clone());
        if !self.original_order.is_empty() || self.shuffled {
            self.original_order.push(entry.clone());
        }
        entry
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.original_order.clear();
        self.current = None;
        self.shuffled = false;
    }

    /// Removes the first entry matching the normalized title. The cursor is
    /// pulled back when the removal sits at or before it so it keeps pointing
    /// at the same logical remainder.
    pub fn remove(&mut self, title: &str) -> Option<PlaylistEntry> {
        let wanted = normalize_title(title);
        let pos = self.entries.iter().position(|e| e.title == wanted)?;
        let removed = self.entries.remove(pos);
        self.current = match self.current {
            Some(cur) if pos <= cur => {
                if cur == 0 {
                    None
                } else {
                    Some(cur - 1)
                }
            }
            other => other,
        };
        if self.entries.is_empty() {
            self.current = None;
        }
        Some(removed)
    }

    pub fn next(&mut self, wrap: bool) -> Advance {
        if self.entries.is_empty() {
            return Advance::Empty;
        }
        let next = match self.current {
            None => 0,
            Some(i) if i + 1 < self.entries.len() => i + 1,
            Some(_) if wrap => 0,
            Some(_) => return Advance::End,
        };
        self.current = Some(next);
        Advance::Play(self.entries[next].clone())
    }

    pub fn previous(&mut self, wrap: bool) -> Advance {
        if self.entries.is_empty() {
            return Advance::Empty;
        }
        let prev = match self.current {
            None => 0,
            Some(0) if wrap => self.entries.len() - 1,
            Some(0) => return Advance::End,
            Some(i) => i - 1,
        };
        self.current = Some(prev);
        Advance::Play(self.entries[prev].clone())
    }

    pub fn jump(&mut self, one_based: usize) -> JumpOutcome {
        if self.entries.is_empty() {
            return JumpOutcome::Empty;
        }
        if one_based < 1 || one_based > self.entries.len() {
            return JumpOutcome::OutOfRange {
                len: self.entries.len(),
            };
        }
        self.current = Some(one_based - 1);
        JumpOutcome::Play(self.entries[one_based - 1].clone())
    }

    pub fn restart(&mut self) -> Option<PlaylistEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.current = Some(0);
        Some(self.entries[0].clone())
    }

    /// Uniform in-place shuffle. The original order is snapshotted on the
    /// first shuffle only; later shuffles permute without re-snapshotting.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) -> Option<PlaylistEntry> {
        if self.entries.is_empty() {
            return None;
        }
        if self.original_order.is_empty() {
            self.original_order = self.entries.clone();
        }
        self.entries.shuffle(rng);
        self.current = Some(0);
        self.shuffled = true;
        Some(self.entries[0].clone())
    }

    /// Restores the pre-shuffle order and relocates the cursor's entry by
    /// value. An entry removed since shuffling leaves the cursor unset.
    pub fn unshuffle(&mut self) -> UnshuffleOutcome {
        if self.original_order.is_empty() {
            return UnshuffleOutcome::NothingToRestore;
        }
        let playing = self.current_entry().cloned();
        self.entries = std::mem::take(&mut self.original_order);
        self.current =
            playing.and_then(|entry| self.entries.iter().position(|e| *e == entry));
        self.shuffled = false;
        UnshuffleOutcome::Restored
    }
}

/// Per-guild playlist plus the playback-side state that travels with it,
/// mirroring how the player keeps one track handle per guild.
pub struct GuildPlaylist {
    pub list: Playlist,
    pub volume: f32,
    pub muted_from: Option<f32>,
    pub track_handle: Option<TrackHandle>,
}

impl Default for GuildPlaylist {
    fn default() -> Self {
        Self::new()
    }
}

impl GuildPlaylist {
    pub fn new() -> Self {
        Self {
            list: Playlist::default(),
            volume: 0.5,
            muted_from: None,
            track_handle: None,
        }
    }
}

pub type PlaylistManager = Arc<RwLock<HashMap<GuildId, GuildPlaylist>>>;

pub fn new_playlist_manager() -> PlaylistManager {
    Arc::new(RwLock::new(HashMap::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn filled(n: usize) -> Playlist {
        let mut p = Playlist::default();
        for i in 1..=n {
            p.add(&format!("track {i}"), &format!("/media/track{i}.mp4"));
        }
        p
    }

    #[test]
    fn test_add_normalizes_titles() {
        let mut p = Playlist::default();
        let entry = p.add("  Some MOVIE  ", "/media/movie.mp4");
        assert_eq!(entry.title, "some movie");
    }

    #[test]
    fn test_next_on_empty_makes_no_play() {
        let mut p = Playlist::default();
        assert!(matches!(p.next(true), Advance::Empty));
        assert_eq!(p.current_index(), None);
    }

    #[test]
    fn test_next_walks_cursor_from_unset() {
        let mut p = filled(3);
        for expected in 0..3 {
            match p.next(true) {
                Advance::Play(entry) => {
                    assert_eq!(p.current_index(), Some(expected));
                    assert_eq!(entry.title, format!("track {}", expected + 1));
                }
                _ => panic!("expected Play"),
            }
        }
    }

    #[test]
    fn test_next_wraps_to_start() {
        let mut p = filled(2);
        p.next(true);
        p.next(true);
        match p.next(true) {
            Advance::Play(entry) => assert_eq!(entry.title, "track 1"),
            _ => panic!("expected wrap to start"),
        }
        assert_eq!(p.current_index(), Some(0));
    }

    #[test]
    fn test_next_without_wrap_reports_end() {
        let mut p = filled(2);
        p.next(false);
        p.next(false);
        assert!(matches!(p.next(false), Advance::End));
        assert_eq!(p.current_index(), Some(1));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut p = filled(3);
        p.next(true);
        match p.previous(true) {
            Advance::Play(entry) => assert_eq!(entry.title, "track 3"),
            _ => panic!("expected wrap to last"),
        }
    }

    #[test]
    fn test_jump_bounds_never_move_cursor() {
        let mut p = filled(3);
        p.next(true);
        assert!(matches!(p.jump(0), JumpOutcome::OutOfRange { len: 3 }));
        assert!(matches!(p.jump(4), JumpOutcome::OutOfRange { len: 3 }));
        assert_eq!(p.current_index(), Some(0));
        assert!(matches!(p.jump(3), JumpOutcome::Play(_)));
        assert_eq!(p.current_index(), Some(2));
    }

    #[test]
    fn test_remove_missing_title_changes_nothing() {
        let mut p = filled(2);
        p.next(true);
        assert!(p.remove("nope").is_none());
        assert_eq!(p.len(), 2);
        assert_eq!(p.current_index(), Some(0));
    }

    #[test]
    fn test_remove_before_cursor_pulls_it_back() {
        let mut p = filled(3);
        p.jump(3);
        assert!(p.remove("track 1").is_some());
        assert_eq!(p.current_index(), Some(1));
        assert_eq!(p.current_entry().unwrap().title, "track 3");
    }

    #[test]
    fn test_remove_after_cursor_leaves_it() {
        let mut p = filled(3);
        p.next(true);
        assert!(p.remove("track 3").is_some());
        assert_eq!(p.current_index(), Some(0));
    }

    #[test]
    fn test_remove_current_at_zero_unsets_cursor() {
        let mut p = filled(2);
        p.next(true);
        assert!(p.remove("track 1").is_some());
        assert_eq!(p.current_index(), None);
    }

    #[test]
    fn test_shuffle_then_unshuffle_restores_order() {
        let mut p = filled(8);
        let before: Vec<_> = p.entries().to_vec();
        let mut rng = StdRng::seed_from_u64(7);
        p.shuffle(&mut rng);
        assert!(p.is_shuffled());
        assert_eq!(p.current_index(), Some(0));
        assert!(matches!(p.unshuffle(), UnshuffleOutcome::Restored));
        assert_eq!(p.entries(), &before[..]);
        assert!(!p.is_shuffled());
    }

    #[test]
    fn test_unshuffle_relocates_playing_entry() {
        let mut p = filled(8);
        let mut rng = StdRng::seed_from_u64(7);
        p.shuffle(&mut rng);
        p.jump(3);
        let playing = p.current_entry().unwrap().clone();
        p.unshuffle();
        assert_eq!(p.current_entry(), Some(&playing));
    }

    #[test]
    fn test_unshuffle_with_removed_current_unsets_cursor() {
        let mut p = filled(4);
        let mut rng = StdRng::seed_from_u64(3);
        p.shuffle(&mut rng);
        let playing = p.current_entry().unwrap().title.clone();
        p.remove(&playing);
        p.unshuffle();
        // The removed entry returns with the snapshot but the cursor does
        // not chase it.
        assert_eq!(p.current_index(), None);
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn test_add_while_shuffled_survives_unshuffle() {
        let mut p = filled(3);
        let mut rng = StdRng::seed_from_u64(1);
        p.shuffle(&mut rng);
        p.add("track 4", "/media/track4.mp4");
        p.unshuffle();
        assert_eq!(p.len(), 4);
        assert!(p.entries().iter().any(|e| e.title == "track 4"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut p = filled(3);
        let mut rng = StdRng::seed_from_u64(1);
        p.shuffle(&mut rng);
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.current_index(), None);
        assert!(!p.is_shuffled());
        assert!(matches!(p.unshuffle(), UnshuffleOutcome::NothingToRestore));
    }

    #[test]
    fn test_guild_playlist_defaults() {
        let g = GuildPlaylist::new();
        assert!(g.list.is_empty());
        assert!((g.volume - 0.5).abs() < f32::EPSILON);
        assert!(g.muted_from.is_none());
        assert!(g.track_handle.is_none());
    }
}
