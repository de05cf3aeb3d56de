//! Preview-bar geometry
//!
//! Converts a segment list into proportional marks for the progress-bar
//! overlay. Pure data: the excluded Presentation layer decides how (or
//! whether) to render it.

use bsb_common::time::format_range;
use bsb_common::{Category, Segment};

/// One colored mark on the progress bar
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewMark {
    /// Left edge as a fraction of the full bar (0.0 to 1.0)
    pub left_frac: f64,
    /// Width as a fraction of the full bar (0.0 to 1.0)
    pub width_frac: f64,
    /// Category the mark represents
    pub category: Category,
    /// Category color (hex)
    pub color: &'static str,
    /// Hover tooltip, e.g. `广告 (0:10-0:25)`
    pub tooltip: String,
}

/// Compute preview marks for a segment list
///
/// Returns an empty list when the duration is unknown or zero. Fractions
/// are clamped so segments that overrun the reported duration still produce
/// a mark that fits the bar.
pub fn preview_marks(segments: &[Segment], duration: Option<f64>) -> Vec<PreviewMark> {
    let Some(duration) = duration.filter(|d| *d > 0.0) else {
        return Vec::new();
    };

    segments
        .iter()
        .filter(|s| !s.range.is_empty())
        .map(|s| {
            let left_frac = (s.range.start / duration).clamp(0.0, 1.0);
            let width_frac = (s.range.duration() / duration).clamp(0.0, 1.0 - left_frac);
            PreviewMark {
                left_frac,
                width_frac,
                category: s.category,
                color: s.category.color(),
                tooltip: format!(
                    "{} ({})",
                    s.category.display_name(),
                    format_range(s.range.start, s.range.end)
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_proportions() {
        let segments = vec![
            Segment::new("a", Category::Sponsor, 10.0, 30.0),
            Segment::new("b", Category::Intro, 50.0, 75.0),
        ];

        let marks = preview_marks(&segments, Some(100.0));
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].left_frac, 0.1);
        assert_eq!(marks[0].width_frac, 0.2);
        assert_eq!(marks[0].color, "#00d400");
        assert_eq!(marks[0].tooltip, "广告 (0:10-0:30)");
        assert_eq!(marks[1].left_frac, 0.5);
        assert_eq!(marks[1].width_frac, 0.25);
    }

    #[test]
    fn test_unknown_or_zero_duration_yields_nothing() {
        let segments = vec![Segment::new("a", Category::Sponsor, 10.0, 30.0)];
        assert!(preview_marks(&segments, None).is_empty());
        assert!(preview_marks(&segments, Some(0.0)).is_empty());
    }

    #[test]
    fn test_overrunning_segment_is_clamped() {
        let segments = vec![Segment::new("a", Category::Sponsor, 90.0, 150.0)];
        let marks = preview_marks(&segments, Some(100.0));
        assert_eq!(marks[0].left_frac, 0.9);
        assert!((marks[0].width_frac - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_segment_produces_no_mark() {
        let segments = vec![Segment::new("z", Category::Sponsor, 15.0, 15.0)];
        assert!(preview_marks(&segments, Some(100.0)).is_empty());
    }
}
