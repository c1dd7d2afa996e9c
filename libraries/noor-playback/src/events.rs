//! Playback Events
//!
//! Event-based communication for UI synchronization during recitation.
//! Events are emitted at key points:
//! - Session lifecycle (started, superseded, stopped, terminated)
//! - Clip changes (each ayah as it starts and finishes)
//! - Device failures

use crate::types::SessionId;
use noor_core::SurahId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A new session took ownership of the device
    SessionStarted {
        session: SessionId,
        surah: SurahId,
        /// First ayah of the range (1-based)
        start_ayah: u32,
        /// Last ayah of the range (1-based)
        end_ayah: u32,
    },

    /// A live session was cancelled because a new one started
    SessionSuperseded {
        session: SessionId,
        /// Ayah that was playing when the session was cancelled
        ayah: u32,
    },

    /// A clip was loaded and playback requested
    ClipStarted { session: SessionId, ayah: u32 },

    /// A clip finished naturally
    ClipFinished { session: SessionId, ayah: u32 },

    /// The last clip of the range finished
    SessionTerminated { session: SessionId },

    /// The session was stopped on request
    SessionStopped {
        session: SessionId,
        /// Ayah the device was rewound to
        ayah: u32,
    },

    /// The device could not play a clip; the session is parked on it
    DeviceFailed {
        session: SessionId,
        ayah: u32,
        /// Error message
        reason: String,
    },
}

impl PlaybackEvent {
    /// Session the event belongs to
    pub fn session(&self) -> SessionId {
        match self {
            PlaybackEvent::SessionStarted { session, .. }
            | PlaybackEvent::SessionSuperseded { session, .. }
            | PlaybackEvent::ClipStarted { session, .. }
            | PlaybackEvent::ClipFinished { session, .. }
            | PlaybackEvent::SessionTerminated { session }
            | PlaybackEvent::SessionStopped { session, .. }
            | PlaybackEvent::DeviceFailed { session, .. } => *session,
        }
    }

    /// Whether the event ends its session
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PlaybackEvent::SessionSuperseded { .. }
                | PlaybackEvent::SessionTerminated { .. }
                | PlaybackEvent::SessionStopped { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_events() {
        let session = SessionId::new(1);
        assert!(PlaybackEvent::SessionTerminated { session }.is_final());
        assert!(PlaybackEvent::SessionStopped { session, ayah: 2 }.is_final());
        assert!(!PlaybackEvent::ClipStarted { session, ayah: 2 }.is_final());
        assert!(!PlaybackEvent::DeviceFailed {
            session,
            ayah: 2,
            reason: "blocked".into()
        }
        .is_final());
    }

    #[test]
    fn test_event_session() {
        let session = SessionId::new(7);
        let event = PlaybackEvent::ClipFinished { session, ayah: 3 };
        assert_eq!(event.session(), session);
    }
}
