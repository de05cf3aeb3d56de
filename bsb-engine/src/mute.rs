//! Forced-mute state management
//!
//! Tracks whether playback audio is currently force-muted by the tracker and
//! how to restore the user's own mute/volume afterwards. At most one
//! snapshot is outstanding per attached player; entering while already
//! entered must not overwrite the original snapshot, otherwise two
//! consecutive mute segments would lose the user's true pre-existing state.

use crate::player::PlayerControls;

/// Snapshot of the player state taken when forced mute was applied
#[derive(Debug, Clone, Copy, PartialEq)]
struct MuteSnapshot {
    saved_muted: bool,
    saved_volume: f64,
}

/// Per-player forced-mute tracker
#[derive(Debug, Default)]
pub struct MuteStateManager {
    /// Some while forced mute is in effect
    snapshot: Option<MuteSnapshot>,
}

impl MuteStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether forced mute is currently in effect
    pub fn is_forced_muted(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Apply forced mute, snapshotting the player's current state
    ///
    /// No-op if forced mute is already in effect.
    pub fn enter<P: PlayerControls>(&mut self, player: &mut P) {
        if self.snapshot.is_some() {
            return;
        }

        self.snapshot = Some(MuteSnapshot {
            saved_muted: player.muted(),
            saved_volume: player.volume(),
        });
        player.set_muted(true);
        tracing::debug!("forced mute applied");
    }

    /// Restore the snapshotted mute/volume and clear forced mute
    ///
    /// No-op if forced mute is not in effect.
    pub fn exit<P: PlayerControls>(&mut self, player: &mut P) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };

        player.set_muted(snapshot.saved_muted);
        player.set_volume(snapshot.saved_volume);
        tracing::debug!(
            muted = snapshot.saved_muted,
            volume = snapshot.saved_volume,
            "forced mute restored"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimPlayer;

    #[test]
    fn test_enter_snapshots_and_mutes() {
        let mut player = SimPlayer::new(100.0);
        player.set_volume(0.6);
        let mut mute = MuteStateManager::new();

        mute.enter(&mut player);
        assert!(mute.is_forced_muted());
        assert!(player.muted());

        mute.exit(&mut player);
        assert!(!mute.is_forced_muted());
        assert!(!player.muted());
        assert_eq!(player.volume(), 0.6);
    }

    #[test]
    fn test_restore_preserves_preexisting_mute() {
        let mut player = SimPlayer::new(100.0);
        player.set_muted(true);
        player.set_volume(0.3);
        let mut mute = MuteStateManager::new();

        mute.enter(&mut player);
        mute.exit(&mut player);

        // User had muted themselves; restore must keep that
        assert!(player.muted());
        assert_eq!(player.volume(), 0.3);
    }

    #[test]
    fn test_double_enter_keeps_original_snapshot() {
        let mut player = SimPlayer::new(100.0);
        player.set_volume(0.8);
        let mut mute = MuteStateManager::new();

        mute.enter(&mut player);
        // Second enter while forced-muted: must not snapshot muted=true
        mute.enter(&mut player);
        mute.exit(&mut player);

        assert!(!player.muted());
        assert_eq!(player.volume(), 0.8);
    }

    #[test]
    fn test_exit_without_enter_is_noop() {
        let mut player = SimPlayer::new(100.0);
        player.set_volume(0.5);
        let mut mute = MuteStateManager::new();

        mute.exit(&mut player);
        assert!(!player.muted());
        assert_eq!(player.volume(), 0.5);
    }
}
