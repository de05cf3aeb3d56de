//! Presentation seam and notice text construction
//!
//! The tracker never builds UI; it hands strings and button requests to an
//! implementation of [`Presentation`] supplied by the host. At most one
//! notice is visible at a time (a new call supersedes any pending one) and
//! at most one manual skip button is outstanding.

use bsb_common::time::format_range;
use bsb_common::Segment;

/// Label shown on the manual skip control
pub const SKIP_BUTTON_LABEL: &str = "跳过";

/// Opaque handle to an offered manual-skip control
///
/// Returned by [`Presentation::offer_manual_skip`] so the tracker can request
/// removal when a segment is exited early (e.g. a backward seek).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonHandle(u64);

impl ButtonHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// View layer consumed by the tracker
///
/// Implementations are fire-and-forget: the tracker never observes a return
/// value beyond the button handle. Button activation is reported through
/// [`Presentation::manual_skip_requested`], polled once per time-update
/// sample before the transition rule runs.
pub trait Presentation {
    /// Show a transient notice, superseding any pending one
    fn notify(&mut self, message: &str);

    /// Present a one-shot manual skip control
    ///
    /// A new offer replaces any still-visible control.
    fn offer_manual_skip(&mut self, label: &str) -> ButtonHandle;

    /// Remove a previously offered control
    fn remove_button(&mut self, handle: ButtonHandle);

    /// Whether the outstanding control was activated since the last poll
    ///
    /// Must reset on read so one activation produces one skip.
    fn manual_skip_requested(&mut self) -> bool;
}

/// Notice for an automatically skipped segment
pub fn skip_notice(segment: &Segment) -> String {
    format!(
        "已跳过 {} ({})",
        segment.category.display_name(),
        format_range(segment.range.start, segment.range.end)
    )
}

/// Notice for a force-muted segment
pub fn mute_notice(segment: &Segment) -> String {
    format!(
        "已静音 {} ({})",
        segment.category.display_name(),
        format_range(segment.range.start, segment.range.end)
    )
}

/// Informational overlay notice
pub fn overlay_notice(segment: &Segment) -> String {
    format!(
        "{} ({})",
        segment.category.display_name(),
        format_range(segment.range.start, segment.range.end)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsb_common::Category;

    #[test]
    fn test_notice_texts() {
        let segment = Segment::new("a", Category::Sponsor, 0.0, 5.0);

        assert_eq!(skip_notice(&segment), "已跳过 广告 (0:00-0:05)");
        assert_eq!(mute_notice(&segment), "已静音 广告 (0:00-0:05)");
        assert_eq!(overlay_notice(&segment), "广告 (0:00-0:05)");
    }
}
