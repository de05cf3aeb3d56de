//! # BSB Segment-Skipping Engine (bsb-engine)
//!
//! Real-time segment tracking and action application for a third-party video
//! player. Given a monotonically-advancing playback clock and a snapshot of
//! crowd-sourced segments, the engine decides which segment is active,
//! applies the configured one-shot action on entry (skip, mute, overlay
//! notice, or manual skip button), and restores any modified player state on
//! exit.
//!
//! **Architecture:** single-threaded, event-driven. The host delivers
//! time-update samples through an [`attach::AttachmentHandle`]; everything
//! else (metadata fetch, presentation) sits behind traits at the seams.

pub mod attach;
pub mod client;
pub mod mute;
pub mod player;
pub mod policy;
pub mod presentation;
pub mod preview;
pub mod sim;
pub mod tracker;
pub mod wait;

pub use attach::{AttachmentHandle, VideoAttachment};
pub use bsb_common::{Category, Error, Result, Segment, SegmentId, TimeRange};
pub use client::MetadataClient;
pub use mute::MuteStateManager;
pub use player::PlayerControls;
pub use policy::{Action, ActionPolicy};
pub use presentation::{ButtonHandle, Presentation};
pub use tracker::SegmentTracker;
