//! Core types for playback scheduling

use noor_core::{index_to_ayah, SurahId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session identifier
///
/// Issued from a monotonically increasing generation counter, so a newer
/// session always compares greater than an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Generation number
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag handed to the device with every source.
///
/// The device must echo it back in the completion or error signal for that
/// source. The scheduler uses it to drop signals that belong to a session
/// that has since been stopped or superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cue {
    /// Session the clip was loaded for
    pub session: SessionId,
    /// 0-based index of the clip in the session's sequence
    pub index: usize,
}

impl Cue {
    /// 1-based ayah number of the cued clip
    pub fn ayah(&self) -> u32 {
        index_to_ayah(self.index)
    }
}

/// Signal raised by a playback device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSignal {
    pub cue: Cue,
    pub kind: SignalKind,
}

impl DeviceSignal {
    /// The cued clip finished naturally
    pub fn completed(cue: Cue) -> Self {
        Self {
            cue,
            kind: SignalKind::Completed,
        }
    }

    /// The cued clip could not be played
    pub fn failed(cue: Cue, reason: impl Into<String>) -> Self {
        Self {
            cue,
            kind: SignalKind::Failed(reason.into()),
        }
    }
}

/// What happened to a cued clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    /// Fired once when the clip finishes naturally
    Completed,
    /// Fired when the source cannot be played (blocked, unsupported, unreachable)
    Failed(String),
}

/// Scheduler phase
///
/// `Idle -> Playing(i) -> Playing(i+1) -> ... -> Terminated`, or
/// `Playing(i) -> Stopped` at any `i`. Leaving `Terminated` or `Stopped`
/// requires a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session has been started
    Idle,

    /// Clip at `index` is loaded and playing (or parked after a device error)
    Playing { index: usize },

    /// Last clip of the range finished
    Terminated,

    /// Stopped by request while at `index`
    Stopped { index: usize },
}

/// State of the session that currently owns the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackSession {
    /// Session identifier (generation)
    pub id: SessionId,

    /// Surah whose sequence the session plays
    pub surah: SurahId,

    /// 0-based index of the clip on the device
    pub current: usize,

    /// 0-based index of the last clip to play (inclusive)
    pub terminal: usize,

    /// False once the session has terminated, been stopped or superseded
    pub live: bool,

    /// Device error reported for the current clip, if any
    pub failure: Option<String>,
}

impl PlaybackSession {
    /// Cue for the current clip
    pub fn cue(&self) -> Cue {
        Cue {
            session: self.id,
            index: self.current,
        }
    }

    /// Whether `cue` addresses this session's current clip while it is live
    pub fn accepts(&self, cue: Cue) -> bool {
        self.live && cue.session == self.id && cue.index == self.current
    }

    /// 1-based ayah number of the current clip
    pub fn current_ayah(&self) -> u32 {
        index_to_ayah(self.current)
    }

    /// 1-based ayah number of the last clip
    pub fn terminal_ayah(&self) -> u32 {
        index_to_ayah(self.terminal)
    }
}
