//! Player control surface consumed by the tracker
//!
//! The engine never touches a real player directly; everything goes through
//! this trait. The host wires it to whatever player it embeds.

use bsb_common::Result;

/// Playback controls the tracker consumes
///
/// Implementations are driven from a single thread; no method is expected to
/// block. `seek` is the only fallible control because media may not be
/// seekable yet; such failures are logged by the tracker and not retried.
pub trait PlayerControls {
    /// Current playback position in seconds on the video timeline
    fn position(&self) -> f64;

    /// Current muted flag
    fn muted(&self) -> bool;

    /// Set the muted flag
    fn set_muted(&mut self, muted: bool);

    /// Current volume (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Set the volume (0.0 to 1.0)
    fn set_volume(&mut self, volume: f64);

    /// Request a seek to an absolute time in seconds
    fn seek(&mut self, to: f64) -> Result<()>;

    /// Total video duration in seconds, or None until metadata is known
    fn duration(&self) -> Option<f64>;
}
