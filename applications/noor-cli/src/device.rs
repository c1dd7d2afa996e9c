/// Playback devices for the terminal
///
/// Both devices report back through an unbounded channel of
/// [`DeviceSignal`]s that the recitation loop feeds to the controller.
use noor_playback::{Cue, DeviceSignal, PlaybackDevice, PlaybackError, Result};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[cfg(feature = "speaker")]
pub use speaker::SpeakerDevice;

/// Device that plays nothing
///
/// Logs each clip and reports it finished after a fixed delay. Used for
/// `--dry-run` and in tests.
pub struct SimulatedDevice {
    clip_length: Duration,
    signals: UnboundedSender<DeviceSignal>,
    loaded: Option<(String, Cue)>,
    pending: Option<JoinHandle<()>>,
}

impl SimulatedDevice {
    pub fn new(clip_length: Duration, signals: UnboundedSender<DeviceSignal>) -> Self {
        Self {
            clip_length,
            signals,
            loaded: None,
            pending: None,
        }
    }

    /// Device plus the receiving end of its signal channel
    pub fn with_channel(clip_length: Duration) -> (Self, UnboundedReceiver<DeviceSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(clip_length, tx), rx)
    }

    /// URI of the loaded clip
    pub fn loaded_uri(&self) -> Option<&str> {
        self.loaded.as_ref().map(|(uri, _)| uri.as_str())
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl PlaybackDevice for SimulatedDevice {
    fn set_source(&mut self, uri: &str, cue: Cue) -> Result<()> {
        self.cancel_pending();
        info!(ayah = cue.ayah(), uri = %uri, "Clip");
        self.loaded = Some((uri.to_string(), cue));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let Some(cue) = self.loaded.as_ref().map(|(_, cue)| *cue) else {
            return Err(PlaybackError::device("no clip loaded"));
        };
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PlaybackError::device(e.to_string()))?;

        self.cancel_pending();
        let (cue, signals, clip_length) = (cue, self.signals.clone(), self.clip_length);
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(clip_length).await;
            // Receiver gone means the recitation loop has ended
            let _ = signals.send(DeviceSignal::completed(cue));
        }));
        Ok(())
    }

    fn pause(&mut self) {
        debug!("Pausing simulated output");
        self.cancel_pending();
    }

    fn reset_position(&mut self) {
        self.cancel_pending();
    }
}

impl Drop for SimulatedDevice {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(feature = "speaker")]
mod speaker {
    use super::{DeviceSignal, PlaybackDevice, PlaybackError, Result, UnboundedSender};
    use noor_playback::Cue;
    use rodio::{Decoder, OutputStream, Sink};
    use std::io::Cursor;
    use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
    use std::thread;
    use std::time::Duration;
    use tracing::{debug, error, info, warn};

    /// How often the audio thread checks whether the clip has drained
    const POLL_INTERVAL: Duration = Duration::from_millis(100);

    enum AudioCommand {
        Load { uri: String, cue: Cue },
        Play,
        Pause,
        Reset,
        Shutdown,
    }

    /// Default sound output through rodio
    ///
    /// A dedicated thread owns the output stream (it is not `Send`),
    /// downloads each clip and decodes it. Commands are queued to that
    /// thread, so every method returns immediately.
    pub struct SpeakerDevice {
        commands: Sender<AudioCommand>,
        thread: Option<thread::JoinHandle<()>>,
    }

    impl SpeakerDevice {
        /// Open the default output device
        pub fn open(signals: UnboundedSender<DeviceSignal>) -> crate::error::Result<Self> {
            let (tx, rx) = mpsc::channel();
            let (ready_tx, ready_rx) = mpsc::channel();

            let thread = thread::Builder::new()
                .name("noor-audio".into())
                .spawn(move || audio_thread(rx, signals, ready_tx))
                .map_err(|e| crate::error::CliError::Audio(e.to_string()))?;

            // Wait for the output stream to open
            match ready_rx.recv() {
                Ok(Ok(())) => Ok(Self {
                    commands: tx,
                    thread: Some(thread),
                }),
                Ok(Err(e)) => Err(crate::error::CliError::Audio(e)),
                Err(_) => Err(crate::error::CliError::Audio(
                    "audio thread exited during startup".into(),
                )),
            }
        }

        fn send(&self, command: AudioCommand) -> Result<()> {
            self.commands
                .send(command)
                .map_err(|_| PlaybackError::device("audio thread stopped"))
        }
    }

    impl PlaybackDevice for SpeakerDevice {
        fn set_source(&mut self, uri: &str, cue: Cue) -> Result<()> {
            self.send(AudioCommand::Load {
                uri: uri.to_string(),
                cue,
            })
        }

        fn play(&mut self) -> Result<()> {
            self.send(AudioCommand::Play)
        }

        fn pause(&mut self) {
            if let Err(e) = self.send(AudioCommand::Pause) {
                warn!(error = %e, "Could not pause audio output");
            }
        }

        fn reset_position(&mut self) {
            if let Err(e) = self.send(AudioCommand::Reset) {
                warn!(error = %e, "Could not rewind audio output");
            }
        }
    }

    impl Drop for SpeakerDevice {
        fn drop(&mut self) {
            let _ = self.commands.send(AudioCommand::Shutdown);
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    /// Clip on the sink and whether it has been asked to play
    struct Loaded {
        cue: Cue,
        sink: Sink,
        playing: bool,
    }

    fn audio_thread(
        commands: Receiver<AudioCommand>,
        signals: UnboundedSender<DeviceSignal>,
        ready: Sender<std::result::Result<(), String>>,
    ) {
        let (_stream, handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(e) => {
                let _ = ready.send(Err(format!("Failed to open audio output: {e}")));
                return;
            }
        };
        let http = reqwest::blocking::Client::new();
        let _ = ready.send(Ok(()));
        info!("Audio output opened");

        let mut loaded: Option<Loaded> = None;

        loop {
            match commands.recv_timeout(POLL_INTERVAL) {
                Ok(AudioCommand::Load { uri, cue }) => {
                    if let Some(old) = loaded.take() {
                        old.sink.stop();
                    }
                    match fetch_and_decode(&http, &uri).and_then(|source| {
                        let sink = Sink::try_new(&handle).map_err(|e| e.to_string())?;
                        sink.pause();
                        sink.append(source);
                        Ok(sink)
                    }) {
                        Ok(sink) => {
                            debug!(ayah = cue.ayah(), "Clip decoded");
                            loaded = Some(Loaded {
                                cue,
                                sink,
                                playing: false,
                            });
                        }
                        Err(reason) => {
                            warn!(uri = %uri, reason = %reason, "Could not load clip");
                            let _ = signals.send(DeviceSignal::failed(cue, reason));
                        }
                    }
                }
                Ok(AudioCommand::Play) => {
                    if let Some(clip) = loaded.as_mut() {
                        clip.sink.play();
                        clip.playing = true;
                    }
                }
                Ok(AudioCommand::Pause) => {
                    if let Some(clip) = loaded.as_mut() {
                        clip.sink.pause();
                        clip.playing = false;
                    }
                }
                Ok(AudioCommand::Reset) => {
                    // Rewinding a streamed clip means dropping it
                    if let Some(clip) = loaded.take() {
                        clip.sink.stop();
                    }
                }
                Ok(AudioCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            let finished = loaded
                .as_ref()
                .is_some_and(|clip| clip.playing && clip.sink.empty());
            if finished {
                if let Some(clip) = loaded.take() {
                    if signals.send(DeviceSignal::completed(clip.cue)).is_err() {
                        error!("Signal receiver dropped, stopping audio thread");
                        break;
                    }
                }
            }
        }

        debug!("Audio thread stopped");
    }

    fn fetch_and_decode(
        http: &reqwest::blocking::Client,
        uri: &str,
    ) -> std::result::Result<Decoder<Cursor<Vec<u8>>>, String> {
        let bytes = http
            .get(uri)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| format!("download failed: {e}"))?;

        Decoder::new(Cursor::new(bytes.to_vec())).map_err(|e| format!("decode failed: {e}"))
    }

}
