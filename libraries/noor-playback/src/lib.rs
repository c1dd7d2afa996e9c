//! Noor Verse - Recitation Playback
//!
//! Platform-agnostic sequential playback of per-ayah recitation clips.
//!
//! This crate provides:
//! - A scheduler that plays a range of clips strictly one after another
//! - Session generations so late device signals never move a newer session
//! - Last-writer-wins cancellation of the live session
//! - An event queue for UI synchronization
//!
//! # Architecture
//!
//! `noor-playback` never touches audio hardware or the network. The host
//! supplies a [`PlaybackDevice`] (native output, simulated device, test
//! double) and feeds the device's [`DeviceSignal`]s back into the scheduler.
//!
//! # Example
//!
//! ```rust
//! use noor_core::{make_range, AudioSequence, SurahId};
//! use noor_playback::{Cue, PlaybackDevice, PlaybackEvent, PlaybackScheduler, Result};
//!
//! #[derive(Default)]
//! struct Silent {
//!     loaded: Option<Cue>,
//! }
//!
//! impl PlaybackDevice for Silent {
//!     fn set_source(&mut self, _uri: &str, cue: Cue) -> Result<()> {
//!         self.loaded = Some(cue);
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn reset_position(&mut self) {}
//! }
//!
//! let surah = SurahId::new(112).unwrap();
//! let clips = (1..=4).map(|n| format!("https://cdn.example/{n}.mp3")).collect();
//! let sequence = AudioSequence::new(surah, clips);
//!
//! let mut scheduler = PlaybackScheduler::new(Silent::default());
//! scheduler.start(&sequence, make_range("2", "3", 4).unwrap()).unwrap();
//!
//! // The device reports completions with the cue it was given
//! let cue = scheduler.device().loaded.unwrap();
//! assert!(scheduler.advance_on_completion(cue));
//! assert_eq!(scheduler.current_ayah(), Some(3));
//!
//! // Replaying the old completion does nothing
//! assert!(!scheduler.advance_on_completion(cue));
//!
//! let events = scheduler.drain_events();
//! assert!(matches!(events[0], PlaybackEvent::SessionStarted { start_ayah: 2, .. }));
//! ```

#![forbid(unsafe_code)]

mod device;
mod error;
pub mod events;
mod scheduler;
pub mod types;

// Public exports
pub use device::PlaybackDevice;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use scheduler::PlaybackScheduler;
pub use types::{Cue, DeviceSignal, PlaybackSession, SessionId, SessionPhase, SignalKind};
