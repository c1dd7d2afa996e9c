//! Noor Verse CLI
//!
//! Terminal front end for reading, translating and reciting the Quran, with
//! prayer times and Qibla direction.
//!
//! This library exposes the application components for testing purposes.

pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod presenter;
pub mod state;

// Re-export commonly used types for convenience
pub use config::NoorConfig;
pub use controller::{AppController, OpenTicket, SurahContent};
pub use device::SimulatedDevice;
#[cfg(feature = "speaker")]
pub use device::SpeakerDevice;
pub use error::{CliError, Result};
pub use presenter::TerminalPresenter;
pub use state::{AppState, AudioStatus, CurrentSurah};
