//! Segment tracking state machine
//!
//! Consumes playback-time samples against one immutable segment-list
//! snapshot. States are `Idle` (no active segment) and in-segment; the
//! transition rule runs once per sample:
//!
//! 1. If the active segment no longer contains `t` (forward progression past
//!    the end or a backward seek before the start), exit it: restore
//!    mute/volume, remove any manual button, go idle.
//! 2. Scan the list in list order for the first segment containing `t`. A
//!    match with a different id than the active segment performs the entry
//!    action; the same id is idempotent and does nothing.
//!
//! Overlapping ranges are resolved by first-match-in-list-order; no priority
//! scheme is applied. Zero-length segments never match because containment
//! is half-open.

use crate::mute::MuteStateManager;
use crate::player::PlayerControls;
use crate::policy::{Action, ActionPolicy};
use crate::presentation::{
    mute_notice, overlay_notice, skip_notice, ButtonHandle, Presentation, SKIP_BUTTON_LABEL,
};
use bsb_common::config::TrackerOptions;
use bsb_common::events::{EventBus, TrackerEvent};
use bsb_common::{Segment, SegmentId};

/// The segment currently entered, plus any outstanding manual button
#[derive(Debug)]
struct ActiveSegment {
    segment: Segment,
    button: Option<ButtonHandle>,
}

/// Per-attachment segment tracker
///
/// Owns the segment-list snapshot, the action policy, and the forced-mute
/// state for one attached player. Created at attach time and torn down when
/// the video identity changes.
pub struct SegmentTracker {
    segments: Vec<Segment>,
    policy: ActionPolicy,
    options: TrackerOptions,
    active: Option<ActiveSegment>,
    mute: MuteStateManager,
    events: Option<EventBus>,
}

impl SegmentTracker {
    /// Create a tracker over one segment-list snapshot
    pub fn new(segments: Vec<Segment>, policy: ActionPolicy, options: TrackerOptions) -> Self {
        Self {
            segments,
            policy,
            options,
            active: None,
            mute: MuteStateManager::new(),
            events: None,
        }
    }

    /// Attach an event bus for observational events
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Id of the currently active segment, if any
    pub fn active_segment_id(&self) -> Option<&SegmentId> {
        self.active.as_ref().map(|a| &a.segment.id)
    }

    /// The segment-list snapshot bound at creation
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Process one time-update sample
    ///
    /// `t` is the current playback position in seconds. Re-entrancy
    /// protection is the caller's concern (see [`crate::attach`]); this
    /// method assumes it is never invoked while a previous call is still on
    /// the stack.
    pub fn process_sample<P, U>(&mut self, t: f64, player: &mut P, ui: &mut U)
    where
        P: PlayerControls,
        U: Presentation,
    {
        self.poll_manual_skip(player, ui);

        // Rule 1: exit when the active segment no longer contains t,
        // covering both forward progression and backward seeks
        let left_active = self
            .active
            .as_ref()
            .is_some_and(|a| !a.segment.range.contains(t));
        if left_active {
            self.exit_active(t, player, ui);
        }

        // Rule 2: first match in list order wins; same id means no re-entry
        let found = self
            .segments
            .iter()
            .find(|s| s.range.contains(t))
            .cloned();

        if let Some(segment) = found {
            let already_active = self
                .active
                .as_ref()
                .is_some_and(|a| a.segment.id == segment.id);
            if !already_active {
                // Direct switch between overlapping segments: the previous
                // button is stale (it would seek to the old end), but forced
                // mute is deliberately NOT restored so the original
                // pre-segment snapshot survives back-to-back mute segments
                if let Some(prev) = self.active.take() {
                    if let Some(button) = prev.button {
                        ui.remove_button(button);
                    }
                    self.emit(TrackerEvent::SegmentExited {
                        segment_id: prev.segment.id.clone(),
                        category: prev.segment.category,
                        position_secs: t,
                        timestamp: chrono::Utc::now(),
                    });
                }
                self.enter(segment, t, player, ui);
            }
        }
    }

    /// Tear down tracker state, unconditionally restoring the player
    ///
    /// Called on detach and on drop of the attachment. Restoration runs
    /// regardless of prior error history so the player is never left
    /// force-muted.
    pub fn teardown<P, U>(&mut self, player: &mut P, ui: &mut U)
    where
        P: PlayerControls,
        U: Presentation,
    {
        if let Some(active) = self.active.take() {
            if let Some(button) = active.button {
                ui.remove_button(button);
            }
            self.emit(TrackerEvent::SegmentExited {
                segment_id: active.segment.id.clone(),
                category: active.segment.category,
                position_secs: player.position(),
                timestamp: chrono::Utc::now(),
            });
        }
        self.mute.exit(player);
    }

    /// Handle activation of an outstanding manual skip control
    fn poll_manual_skip<P, U>(&mut self, player: &mut P, ui: &mut U)
    where
        P: PlayerControls,
        U: Presentation,
    {
        let Some((segment_id, category, end, button)) = self.active.as_ref().and_then(|a| {
            a.button
                .map(|b| (a.segment.id.clone(), a.segment.category, a.segment.range.end, b))
        }) else {
            return;
        };

        if !ui.manual_skip_requested() {
            return;
        }

        match player.seek(end) {
            Ok(()) => {
                ui.remove_button(button);
                if let Some(active) = &mut self.active {
                    active.button = None;
                }
                tracing::debug!(segment = %segment_id, "manual skip performed");
                self.emit(TrackerEvent::SegmentSkipped {
                    segment_id,
                    category,
                    seek_to_secs: end,
                    timestamp: chrono::Utc::now(),
                });
            }
            Err(e) => {
                // Keep the button so the user can try again once seekable
                tracing::warn!(segment = %segment_id, error = %e, "manual skip seek failed");
            }
        }
    }

    /// Perform the entry action for a newly matched segment
    fn enter<P, U>(&mut self, segment: Segment, t: f64, player: &mut P, ui: &mut U)
    where
        P: PlayerControls,
        U: Presentation,
    {
        let action = self.policy.resolve(segment.category);
        tracing::debug!(
            segment = %segment.id,
            category = segment.category.wire_name(),
            ?action,
            position = t,
            "entering segment"
        );
        self.emit(TrackerEvent::SegmentEntered {
            segment_id: segment.id.clone(),
            category: segment.category,
            position_secs: t,
            timestamp: chrono::Utc::now(),
        });

        let mut button = None;
        match action {
            Action::Skip => {
                let within_entry_window =
                    t < segment.range.start + self.options.skip_entry_window_secs;
                if within_entry_window || !self.options.late_entry_button {
                    match player.seek(segment.range.end) {
                        Ok(()) => {
                            ui.notify(&skip_notice(&segment));
                            self.emit(TrackerEvent::SegmentSkipped {
                                segment_id: segment.id.clone(),
                                category: segment.category,
                                seek_to_secs: segment.range.end,
                                timestamp: chrono::Utc::now(),
                            });
                        }
                        Err(e) => {
                            tracing::warn!(segment = %segment.id, error = %e, "skip seek failed");
                        }
                    }
                } else {
                    // Entered mid-segment (e.g. after a user seek): an
                    // unexpected jump would be jarring, offer a button instead
                    button = Some(ui.offer_manual_skip(SKIP_BUTTON_LABEL));
                }
            }
            Action::Mute => {
                self.mute.enter(player);
                ui.notify(&mute_notice(&segment));
                self.emit(TrackerEvent::SegmentMuted {
                    segment_id: segment.id.clone(),
                    category: segment.category,
                    timestamp: chrono::Utc::now(),
                });
            }
            Action::ManualButton => {
                button = Some(ui.offer_manual_skip(SKIP_BUTTON_LABEL));
            }
            Action::Overlay => {
                ui.notify(&overlay_notice(&segment));
            }
            Action::Disabled => {}
        }

        self.active = Some(ActiveSegment { segment, button });
    }

    /// Exit the active segment, restoring player and view state
    fn exit_active<P, U>(&mut self, t: f64, player: &mut P, ui: &mut U)
    where
        P: PlayerControls,
        U: Presentation,
    {
        let Some(active) = self.active.take() else {
            return;
        };

        self.mute.exit(player);
        if let Some(button) = active.button {
            ui.remove_button(button);
        }
        tracing::debug!(segment = %active.segment.id, position = t, "exited segment");
        self.emit(TrackerEvent::SegmentExited {
            segment_id: active.segment.id.clone(),
            category: active.segment.category,
            position_secs: t,
            timestamp: chrono::Utc::now(),
        });
    }

    fn emit(&self, event: TrackerEvent) {
        if let Some(events) = &self.events {
            events.broadcast(event);
        }
    }
}
