//! # BSB Common Library
//!
//! Shared code for the BSB segment-skipping engine including:
//! - Segment data model (categories, time ranges, wire format)
//! - Event types (TrackerEvent enum)
//! - Configuration loading
//! - Video identifier conversion
//! - Time formatting helpers

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod segment;
pub mod time;

pub use error::{Error, Result};
pub use segment::{Category, Segment, SegmentId, TimeRange};
