//! Platform-agnostic playback device trait
//!
//! Abstracts the single shared audio output (browser audio element, native
//! output stream, simulated device in tests).

use crate::error::Result;
use crate::types::Cue;

/// The shared playback device
///
/// All methods are non-blocking commands. Outcomes are reported later,
/// out of band, as [`DeviceSignal`](crate::DeviceSignal)s carrying the
/// [`Cue`] passed to `set_source`:
/// - a completion signal once the clip finishes naturally
/// - an error signal if the source cannot be played
///
/// The scheduler forwards those signals through
/// [`PlaybackScheduler::handle_signal`](crate::PlaybackScheduler::handle_signal).
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackDevice: Send {
    /// Load a clip, replacing whatever was loaded before
    ///
    /// # Arguments
    /// * `uri` - Clip locator
    /// * `cue` - Tag to echo back in the signals for this clip
    fn set_source(&mut self, uri: &str, cue: Cue) -> Result<()>;

    /// Start playing the loaded clip
    ///
    /// # Returns
    /// * `Ok(())` - Playback requested
    /// * `Err(_)` - Device refused synchronously (treated like an error signal)
    fn play(&mut self) -> Result<()>;

    /// Pause output immediately
    fn pause(&mut self);

    /// Rewind the loaded clip to its start
    fn reset_position(&mut self);
}

impl<D: PlaybackDevice + ?Sized> PlaybackDevice for Box<D> {
    fn set_source(&mut self, uri: &str, cue: Cue) -> Result<()> {
        (**self).set_source(uri, cue)
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn reset_position(&mut self) {
        (**self).reset_position();
    }
}
