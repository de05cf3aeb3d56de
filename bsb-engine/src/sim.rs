//! Simulated player and presentation implementations
//!
//! Used by the CLI simulator and by tests. `SimPlayer` is a scripted
//! playback clock with the full control surface; `RecordingPresentation`
//! records everything the tracker asks for; `ConsolePresentation` logs it.

use crate::player::PlayerControls;
use crate::presentation::{ButtonHandle, Presentation};
use bsb_common::{Error, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of a [`SimPlayer`]
#[derive(Debug)]
pub struct SimPlayerState {
    pub position: f64,
    pub duration: f64,
    pub muted: bool,
    pub volume: f64,
    pub seekable: bool,
    pub seeks: Vec<f64>,
}

/// Scripted player clock
///
/// Clones share state, so a test can keep a view onto a player that was
/// moved into an attachment.
#[derive(Debug, Clone)]
pub struct SimPlayer {
    state: Rc<RefCell<SimPlayerState>>,
}

impl SimPlayer {
    pub fn new(duration: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimPlayerState {
                position: 0.0,
                duration,
                muted: false,
                volume: 1.0,
                seekable: true,
                seeks: Vec::new(),
            })),
        }
    }

    /// Shared view onto the player state
    pub fn shared_state(&self) -> Rc<RefCell<SimPlayerState>> {
        Rc::clone(&self.state)
    }

    /// Jump the clock to an absolute position (models a user seek)
    pub fn set_position(&mut self, t: f64) {
        self.state.borrow_mut().position = t;
    }

    /// Advance the clock by `dt` seconds, clamped to the duration
    pub fn advance(&mut self, dt: f64) {
        let mut state = self.state.borrow_mut();
        state.position = (state.position + dt).min(state.duration);
    }

    /// Make subsequent seek requests fail (models unseekable media)
    pub fn set_seekable(&mut self, seekable: bool) {
        self.state.borrow_mut().seekable = seekable;
    }

    /// All seek targets requested so far
    pub fn seeks(&self) -> Vec<f64> {
        self.state.borrow().seeks.clone()
    }
}

impl PlayerControls for SimPlayer {
    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn muted(&self) -> bool {
        self.state.borrow().muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.borrow_mut().volume = volume.clamp(0.0, 1.0);
    }

    fn seek(&mut self, to: f64) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.seekable {
            return Err(Error::PlayerControl("media is not seekable".to_string()));
        }
        state.seeks.push(to);
        state.position = to.clamp(0.0, state.duration);
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        Some(self.state.borrow().duration)
    }
}

/// Presentation that records every request for later assertions
///
/// The notice history is kept in full; a live view would supersede, but
/// tests want to see every message.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub notices: Vec<String>,
    pub removed: Vec<ButtonHandle>,
    outstanding: Option<ButtonHandle>,
    next_button_id: u64,
    press_pending: bool,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The button currently offered, if any
    pub fn outstanding_button(&self) -> Option<ButtonHandle> {
        self.outstanding
    }

    /// Simulate the user activating the outstanding button
    pub fn press_button(&mut self) {
        self.press_pending = true;
    }
}

impl Presentation for RecordingPresentation {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn offer_manual_skip(&mut self, _label: &str) -> ButtonHandle {
        // A new offer replaces any still-visible control
        if let Some(previous) = self.outstanding.take() {
            self.removed.push(previous);
        }
        self.next_button_id += 1;
        let handle = ButtonHandle::new(self.next_button_id);
        self.outstanding = Some(handle);
        handle
    }

    fn remove_button(&mut self, handle: ButtonHandle) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
        self.removed.push(handle);
    }

    fn manual_skip_requested(&mut self) -> bool {
        std::mem::take(&mut self.press_pending)
    }
}

/// Presentation that logs notices and button activity
#[derive(Debug, Default)]
pub struct ConsolePresentation {
    next_button_id: u64,
}

impl ConsolePresentation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presentation for ConsolePresentation {
    fn notify(&mut self, message: &str) {
        tracing::info!(notice = %message);
    }

    fn offer_manual_skip(&mut self, label: &str) -> ButtonHandle {
        self.next_button_id += 1;
        tracing::info!(label = %label, id = self.next_button_id, "manual skip button offered");
        ButtonHandle::new(self.next_button_id)
    }

    fn remove_button(&mut self, handle: ButtonHandle) {
        tracing::info!(id = handle.id(), "manual skip button removed");
    }

    fn manual_skip_requested(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_player_clock() {
        let mut player = SimPlayer::new(10.0);
        player.advance(4.0);
        assert_eq!(player.position(), 4.0);
        player.advance(100.0);
        assert_eq!(player.position(), 10.0); // Clamped to duration
    }

    #[test]
    fn test_sim_player_unseekable() {
        let mut player = SimPlayer::new(10.0);
        player.set_seekable(false);
        assert!(player.seek(5.0).is_err());
        assert!(player.seeks().is_empty());
    }

    #[test]
    fn test_recording_presentation_button_replacement() {
        let mut ui = RecordingPresentation::new();
        let first = ui.offer_manual_skip("跳过");
        let second = ui.offer_manual_skip("跳过");

        assert_ne!(first, second);
        assert_eq!(ui.outstanding_button(), Some(second));
        assert_eq!(ui.removed, vec![first]);
    }

    #[test]
    fn test_press_is_consumed_on_read() {
        let mut ui = RecordingPresentation::new();
        ui.press_button();
        assert!(ui.manual_skip_requested());
        assert!(!ui.manual_skip_requested());
    }
}
