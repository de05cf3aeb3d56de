//! Event types for the BSB tracker
//!
//! Observational events emitted as the tracker enters and leaves segments.
//! Consumers subscribe through a broadcast channel; emission is fire-and-
//! forget and never affects tracker behavior.

use crate::segment::{Category, SegmentId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Tracker event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrackerEvent {
    /// Playback entered a segment
    SegmentEntered {
        segment_id: SegmentId,
        category: Category,
        position_secs: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A skip seek was requested for a segment
    SegmentSkipped {
        segment_id: SegmentId,
        category: Category,
        seek_to_secs: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Forced mute was applied for a segment
    SegmentMuted {
        segment_id: SegmentId,
        category: Category,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Playback left the active segment (forward progression, seek, or detach)
    SegmentExited {
        segment_id: SegmentId,
        category: Category,
        position_secs: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Broadcast bus for tracker events
///
/// Send errors are ignored; having no subscribers is normal.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<TrackerEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` undelivered events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast(&self, event: TrackerEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}
