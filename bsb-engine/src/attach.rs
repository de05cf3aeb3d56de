//! Attach/detach lifecycle for one playing video
//!
//! A [`VideoAttachment`] binds one segment-list snapshot, one player, and one
//! presentation for the lifetime of a single video identity. The host holds
//! an [`AttachmentHandle`] and forwards the player's time-update signal to
//! [`AttachmentHandle::on_time_update`]; a new video requires a fresh
//! attachment, never a mutation of the old one.
//!
//! Re-entrancy: a side effect (typically the skip seek) may synchronously
//! fire another time-update before the current sample finishes processing.
//! The inner state lives in a `RefCell`, so the nested sample fails
//! `try_borrow_mut` and is dropped, bounding work per tick and preventing
//! recursive side effects.

use crate::player::PlayerControls;
use crate::presentation::Presentation;
use crate::tracker::SegmentTracker;
use std::cell::RefCell;
use std::rc::Rc;

/// One attached player: tracker plus the collaborators it drives
pub struct VideoAttachment<P: PlayerControls, U: Presentation> {
    player: P,
    presentation: U,
    tracker: SegmentTracker,
    detached: bool,
}

impl<P: PlayerControls, U: Presentation> VideoAttachment<P, U> {
    /// Bind a tracker to a player and presentation, returning the handle the
    /// host uses to deliver samples and eventually detach
    pub fn attach(player: P, presentation: U, tracker: SegmentTracker) -> AttachmentHandle<P, U> {
        tracing::debug!(
            segments = tracker.segments().len(),
            "attaching segment tracker"
        );
        AttachmentHandle {
            inner: Rc::new(RefCell::new(Self {
                player,
                presentation,
                tracker,
                detached: false,
            })),
        }
    }

    /// Process one sample at the player's current position
    fn tick(&mut self) {
        let t = self.player.position();
        self.tracker
            .process_sample(t, &mut self.player, &mut self.presentation);
    }

    /// Restore all modified player/view state and mark the attachment dead
    fn force_teardown(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.tracker
            .teardown(&mut self.player, &mut self.presentation);
        tracing::debug!("segment tracker detached");
    }
}

impl<P: PlayerControls, U: Presentation> Drop for VideoAttachment<P, U> {
    fn drop(&mut self) {
        // A host that forgets detach() must still never leave the player
        // force-muted
        self.force_teardown();
    }
}

/// Cheap, cloneable handle to an attachment
///
/// The host's signal wiring holds clones of this; all samples after
/// [`AttachmentHandle::detach`] are no-ops.
pub struct AttachmentHandle<P: PlayerControls, U: Presentation> {
    inner: Rc<RefCell<VideoAttachment<P, U>>>,
}

impl<P: PlayerControls, U: Presentation> Clone for AttachmentHandle<P, U> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: PlayerControls, U: Presentation> AttachmentHandle<P, U> {
    /// Deliver one time-update sample
    ///
    /// A sample arriving while a previous one is still being processed is
    /// dropped, not queued.
    pub fn on_time_update(&self) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            tracing::trace!("re-entrant time-update sample dropped");
            return;
        };
        if inner.detached {
            return;
        }
        inner.tick();
    }

    /// Synchronously unregister and restore player state
    ///
    /// Idempotent; samples delivered afterwards are ignored.
    pub fn detach(&self) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            tracing::warn!("detach requested while a sample is being processed; ignored");
            return;
        };
        inner.force_teardown();
    }

    /// Whether the attachment has been torn down
    pub fn is_detached(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|inner| inner.detached)
            .unwrap_or(false)
    }

    /// Inspect the attachment (player, presentation, tracker) read-only
    ///
    /// Intended for tests and diagnostics; returns None during sample
    /// processing.
    pub fn inspect<R>(&self, f: impl FnOnce(&VideoAttachment<P, U>) -> R) -> Option<R> {
        self.inner.try_borrow().ok().map(|inner| f(&inner))
    }
}

impl<P: PlayerControls, U: Presentation> VideoAttachment<P, U> {
    /// The attached player
    pub fn player(&self) -> &P {
        &self.player
    }

    /// The attached presentation
    pub fn presentation(&self) -> &U {
        &self.presentation
    }

    /// The tracker driving this attachment
    pub fn tracker(&self) -> &SegmentTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Action, ActionPolicy};
    use crate::sim::{RecordingPresentation, SimPlayer};
    use bsb_common::config::TrackerOptions;
    use bsb_common::{Category, Segment};
    use std::collections::HashMap;

    fn mute_tracker(segments: Vec<Segment>) -> SegmentTracker {
        let actions: HashMap<Category, Action> =
            Category::ALL.iter().map(|c| (*c, Action::Mute)).collect();
        SegmentTracker::new(segments, ActionPolicy::new(actions), TrackerOptions::default())
    }

    #[test]
    fn test_detach_restores_player_state() {
        let mut player = SimPlayer::new(100.0);
        player.set_volume(0.5);
        player.set_position(12.0);
        let tracker = mute_tracker(vec![Segment::new("a", Category::Intro, 10.0, 20.0)]);

        let handle = VideoAttachment::attach(player, RecordingPresentation::new(), tracker);
        handle.on_time_update();
        assert!(handle.inspect(|a| a.player().muted()).unwrap());

        handle.detach();
        assert!(handle.is_detached());
        assert!(!handle.inspect(|a| a.player().muted()).unwrap());
        assert_eq!(handle.inspect(|a| a.player().volume()).unwrap(), 0.5);

        // Detach is idempotent and later samples are no-ops
        handle.detach();
        handle.on_time_update();
    }

    #[test]
    fn test_drop_without_detach_restores() {
        let mut player = SimPlayer::new(100.0);
        player.set_position(12.0);
        let shared = player.shared_state();
        let tracker = mute_tracker(vec![Segment::new("a", Category::Intro, 10.0, 20.0)]);

        let handle = VideoAttachment::attach(player, RecordingPresentation::new(), tracker);
        handle.on_time_update();
        assert!(shared.borrow().muted);

        drop(handle);
        assert!(!shared.borrow().muted);
    }

    #[test]
    fn test_clone_shares_state() {
        let mut player = SimPlayer::new(100.0);
        player.set_position(12.0);
        let tracker = mute_tracker(vec![Segment::new("a", Category::Intro, 10.0, 20.0)]);

        let handle = VideoAttachment::attach(player, RecordingPresentation::new(), tracker);
        let second = handle.clone();
        second.on_time_update();

        assert!(handle.inspect(|a| a.player().muted()).unwrap());
        handle.detach();
        assert!(second.is_detached());
    }
}
