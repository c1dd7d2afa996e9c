//! Playback scheduler - sequential recitation
//!
//! Drives the shared playback device through a range of per-ayah clips,
//! one at a time, advancing only when the device reports that the current
//! clip finished.

use crate::{
    device::PlaybackDevice,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    types::{Cue, DeviceSignal, PlaybackSession, SessionId, SessionPhase, SignalKind},
};
use noor_core::{AudioSequence, PlaybackRange};
use tracing::{debug, info, warn};

/// Sequential playback scheduler
///
/// Owns the playback device and at most one live [`PlaybackSession`].
/// Starting a session cancels the previous one (last writer wins). Every
/// clip is loaded with a [`Cue`]; device signals whose cue does not match
/// the live session's current clip are ignored, so a late completion from a
/// stopped or superseded session can never move a newer one.
///
/// The scheduler is driven from a single thread of control: the owner calls
/// [`start`](Self::start) / [`stop`](Self::stop) on user actions and feeds
/// device signals to [`handle_signal`](Self::handle_signal).
pub struct PlaybackScheduler<D: PlaybackDevice> {
    device: D,

    // Session that owns (or last owned) the device
    session: Option<PlaybackSession>,
    phase: SessionPhase,

    // Clips of the session's range; clips[0] is the clip at index `offset`
    clips: Vec<String>,
    offset: usize,

    // Last issued session generation
    generation: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<D: PlaybackDevice> PlaybackScheduler<D> {
    /// Create a scheduler that owns `device`
    pub fn new(device: D) -> Self {
        Self {
            device,
            session: None,
            phase: SessionPhase::Idle,
            clips: Vec::new(),
            offset: 0,
            generation: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Start playing `range` of `sequence`
    ///
    /// Cancels any live session first: the device is paused and rewound
    /// before the new session's first clip is loaded. Returns as soon as the
    /// first clip has been handed to the device; progress is driven by
    /// device signals.
    ///
    /// A device that rejects the first clip does not fail the call. The
    /// rejection is reported as [`PlaybackEvent::DeviceFailed`] and the new
    /// session stays parked on that clip.
    ///
    /// # Errors
    /// * `EmptySequence` - the sequence has no clips
    /// * `RangeOutOfBounds` - the range reaches past the sequence
    ///
    /// On error nothing changes: a live session keeps playing.
    pub fn start(&mut self, sequence: &AudioSequence, range: PlaybackRange) -> Result<SessionId> {
        if sequence.is_empty() {
            return Err(PlaybackError::EmptySequence);
        }
        if !sequence.covers(&range) {
            return Err(PlaybackError::RangeOutOfBounds {
                end: range.end_ayah(),
                len: sequence.len(),
            });
        }

        self.cancel_live_session();

        self.generation += 1;
        let id = SessionId::new(self.generation);
        let start = range.start_index();
        let terminal = range.end_index();

        self.clips = sequence.clips()[start..=terminal].to_vec();
        self.offset = start;
        self.session = Some(PlaybackSession {
            id,
            surah: sequence.surah(),
            current: start,
            terminal,
            live: true,
            failure: None,
        });
        self.phase = SessionPhase::Playing { index: start };

        info!(
            session = %id,
            surah = %sequence.surah(),
            range = %range,
            "Starting recitation"
        );
        self.pending_events.push(PlaybackEvent::SessionStarted {
            session: id,
            surah: sequence.surah(),
            start_ayah: range.start_ayah(),
            end_ayah: range.end_ayah(),
        });

        self.play_current();
        Ok(id)
    }

    /// Advance after the device reports that the cued clip finished
    ///
    /// Ignored (returns `false`) unless `cue` is the live session's current
    /// clip. Otherwise moves to the next clip, or terminates the session when
    /// the last clip of the range has finished.
    pub fn advance_on_completion(&mut self, cue: Cue) -> bool {
        let Some(session) = self.session.as_mut() else {
            debug!(cue = ?cue, "Ignoring completion with no session");
            return false;
        };
        if !session.accepts(cue) || session.failure.is_some() {
            debug!(cue = ?cue, live = ?session.cue(), "Ignoring stale completion");
            return false;
        }

        let id = session.id;
        self.pending_events.push(PlaybackEvent::ClipFinished {
            session: id,
            ayah: session.current_ayah(),
        });

        if session.current < session.terminal {
            session.current += 1;
            self.phase = SessionPhase::Playing {
                index: session.current,
            };
            self.play_current();
        } else {
            session.live = false;
            self.phase = SessionPhase::Terminated;
            info!(session = %id, "Recitation finished");
            self.pending_events
                .push(PlaybackEvent::SessionTerminated { session: id });
        }
        true
    }

    /// Record that the device could not play the cued clip
    ///
    /// The session stays on the failed clip: no skip, no retry. Only
    /// [`stop`](Self::stop) or a new [`start`](Self::start) moves it on.
    /// Returns `false` for stale cues.
    pub fn report_device_error(&mut self, cue: Cue, reason: &str) -> bool {
        match self.session.as_ref() {
            Some(session) if session.accepts(cue) => {
                self.record_failure(reason.to_string());
                true
            }
            _ => {
                debug!(cue = ?cue, reason = %reason, "Ignoring stale device error");
                false
            }
        }
    }

    /// Dispatch a device signal
    ///
    /// Returns whether the signal was accepted.
    pub fn handle_signal(&mut self, signal: DeviceSignal) -> bool {
        match signal.kind {
            SignalKind::Completed => self.advance_on_completion(signal.cue),
            SignalKind::Failed(reason) => self.report_device_error(signal.cue, &reason),
        }
    }

    /// Stop playback
    ///
    /// Pauses the device, rewinds the current clip and detaches the session
    /// from further device signals. No-op when no session is live.
    pub fn stop(&mut self) {
        let Some(session) = self.session.as_mut().filter(|s| s.live) else {
            return;
        };

        self.device.pause();
        self.device.reset_position();
        session.live = false;

        let (id, index, ayah) = (session.id, session.current, session.current_ayah());
        self.phase = SessionPhase::Stopped { index };
        info!(session = %id, ayah, "Recitation stopped");
        self.pending_events
            .push(PlaybackEvent::SessionStopped { session: id, ayah });
    }

    // ===== State Queries =====

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Session that owns (or last owned) the device
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Whether a session is live
    pub fn is_live(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.live)
    }

    /// 1-based ayah of the live session's current clip
    pub fn current_ayah(&self) -> Option<u32> {
        self.session
            .as_ref()
            .filter(|s| s.live)
            .map(PlaybackSession::current_ayah)
    }

    /// Borrow the device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Borrow the device mutably
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Silence and detach the live session, if any
    fn cancel_live_session(&mut self) {
        let Some(session) = self.session.as_mut().filter(|s| s.live) else {
            return;
        };

        self.device.pause();
        self.device.reset_position();
        session.live = false;

        debug!(session = %session.id, "Superseding live session");
        self.pending_events.push(PlaybackEvent::SessionSuperseded {
            session: session.id,
            ayah: session.current_ayah(),
        });
    }

    /// Load the current clip and request playback
    fn play_current(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let cue = session.cue();
        let uri = &self.clips[cue.index - self.offset];

        debug!(session = %cue.session, ayah = cue.ayah(), uri = %uri, "Playing clip");

        let result = self
            .device
            .set_source(uri, cue)
            .and_then(|()| self.device.play());

        match result {
            Ok(()) => self.pending_events.push(PlaybackEvent::ClipStarted {
                session: cue.session,
                ayah: cue.ayah(),
            }),
            Err(e) => self.record_failure(e.to_string()),
        }
    }

    fn record_failure(&mut self, reason: String) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        warn!(
            session = %session.id,
            ayah = session.current_ayah(),
            reason = %reason,
            "Device could not play clip"
        );
        session.failure = Some(reason.clone());
        self.pending_events.push(PlaybackEvent::DeviceFailed {
            session: session.id,
            ayah: session.current_ayah(),
            reason,
        });
    }
}
