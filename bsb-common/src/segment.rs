//! Segment data model
//!
//! Crowd-sourced segments as returned by the metadata service: a time range
//! on the video's own timeline tagged with a content category. Ranges are
//! half-open `[start, end)`, so a zero-length segment contains no point and
//! can never become active.

use serde::{Deserialize, Serialize};

/// Opaque server-assigned segment identifier
///
/// The metadata service calls this field "UUID" but the values are not
/// RFC 4122 UUIDs; they are treated as opaque strings and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub String);

impl SegmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Half-open time range `[start, end)` in seconds on the video timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether `t` falls within the range
    ///
    /// Half-open containment: `start <= t < end`. A zero-length range
    /// (`start == end`) contains no point.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// Range duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the range is empty (zero-length)
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Content category of a crowd-sourced segment
///
/// Serialized with the wire names used by the metadata service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Paid promotion of a product or service
    #[serde(rename = "sponsor")]
    Sponsor,
    /// Unpaid or self promotion
    #[serde(rename = "selfpromo")]
    SelfPromo,
    /// Brand collaboration / exclusive access content
    #[serde(rename = "exclusive_access")]
    ExclusiveAccess,
    /// Like/subscribe interaction reminders
    #[serde(rename = "interaction")]
    Interaction,
    /// Opening animation or intro sequence
    #[serde(rename = "intro")]
    Intro,
    /// Credits or end-card outro
    #[serde(rename = "outro")]
    Outro,
    /// Recap or preview of upcoming content
    #[serde(rename = "preview")]
    Preview,
    /// Off-topic filler or tangents
    #[serde(rename = "filler")]
    Filler,
    /// Non-music section of a music video
    #[serde(rename = "music_offtopic")]
    MusicOfftopic,
    /// Point-of-interest highlight
    #[serde(rename = "poi_highlight")]
    PoiHighlight,
}

impl Category {
    /// All known categories, in configuration display order
    pub const ALL: [Category; 10] = [
        Category::Sponsor,
        Category::SelfPromo,
        Category::ExclusiveAccess,
        Category::Interaction,
        Category::Intro,
        Category::Outro,
        Category::Preview,
        Category::Filler,
        Category::MusicOfftopic,
        Category::PoiHighlight,
    ];

    /// Wire name as used by the metadata service
    pub fn wire_name(&self) -> &'static str {
        match self {
            Category::Sponsor => "sponsor",
            Category::SelfPromo => "selfpromo",
            Category::ExclusiveAccess => "exclusive_access",
            Category::Interaction => "interaction",
            Category::Intro => "intro",
            Category::Outro => "outro",
            Category::Preview => "preview",
            Category::Filler => "filler",
            Category::MusicOfftopic => "music_offtopic",
            Category::PoiHighlight => "poi_highlight",
        }
    }

    /// Display name shown in notices and tooltips
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Sponsor => "广告",
            Category::SelfPromo => "无偿/自我推广",
            Category::ExclusiveAccess => "柔性推广/品牌合作",
            Category::Interaction => "三连/订阅提醒",
            Category::Intro => "过场/开场动画",
            Category::Outro => "鸣谢/结束画面",
            Category::Preview => "回顾/概要",
            Category::Filler => "离题闲聊/玩笑",
            Category::MusicOfftopic => "音乐:非音乐部分",
            Category::PoiHighlight => "精彩时刻/重点",
        }
    }

    /// Timeline color for preview-bar marks
    pub fn color(&self) -> &'static str {
        match self {
            Category::Sponsor => "#00d400",
            Category::SelfPromo => "#ffff00",
            Category::ExclusiveAccess => "#008a5c",
            Category::Interaction => "#cc00ff",
            Category::Intro => "#00ffff",
            Category::Outro => "#0202ed",
            Category::Preview => "#008fd6",
            Category::Filler => "#7300FF",
            Category::MusicOfftopic => "#ff9900",
            Category::PoiHighlight => "#ff1684",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One crowd-sourced segment
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Server-assigned identifier, stable across requests
    pub id: SegmentId,
    /// Content category
    pub category: Category,
    /// Time range on the video timeline
    pub range: TimeRange,
}

impl Segment {
    pub fn new(id: impl Into<String>, category: Category, start: f64, end: f64) -> Self {
        Self {
            id: SegmentId::new(id),
            category,
            range: TimeRange::new(start, end),
        }
    }
}

/// Wire representation of a segment as returned by `/skipSegments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSegment {
    /// Server-assigned identifier
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Category wire name
    pub category: Category,
    /// `[start, end]` pair in seconds
    pub segment: [f64; 2],
}

impl From<WireSegment> for Segment {
    fn from(w: WireSegment) -> Self {
        Segment {
            id: SegmentId::new(w.uuid),
            category: w.category,
            range: TimeRange::new(w.segment[0], w.segment[1]),
        }
    }
}

impl From<&Segment> for WireSegment {
    fn from(s: &Segment) -> Self {
        WireSegment {
            uuid: s.id.0.clone(),
            category: s.category,
            segment: [s.range.start, s.range.end],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_containment() {
        let range = TimeRange::new(10.0, 20.0);

        assert!(range.contains(10.0)); // Start is inclusive
        assert!(range.contains(15.0));
        assert!(range.contains(19.999));
        assert!(!range.contains(20.0)); // End is exclusive
        assert!(!range.contains(9.999));
    }

    #[test]
    fn test_zero_length_range_contains_nothing() {
        let range = TimeRange::new(15.0, 15.0);

        assert!(range.is_empty());
        assert!(!range.contains(15.0)); // Boundary instant must not match
        assert!(!range.contains(14.999));
        assert!(!range.contains(15.001));
        assert_eq!(range.duration(), 0.0);
    }

    #[test]
    fn test_wire_segment_deserialization() {
        let json = r#"{"UUID":"abc123","category":"sponsor","segment":[12.5,47.0]}"#;
        let wire: WireSegment = serde_json::from_str(json).unwrap();
        let segment = Segment::from(wire);

        assert_eq!(segment.id.as_str(), "abc123");
        assert_eq!(segment.category, Category::Sponsor);
        assert_eq!(segment.range.start, 12.5);
        assert_eq!(segment.range.end, 47.0);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let json = r#"{"UUID":"x","category":"dynamicSponsor","segment":[0.0,1.0]}"#;
        let result: std::result::Result<WireSegment, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_wire_names_round_trip() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.wire_name()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn test_segment_id_compared_by_value() {
        let a = SegmentId::new("same");
        let b = SegmentId::new(String::from("same"));
        assert_eq!(a, b);
    }
}
