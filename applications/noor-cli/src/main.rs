/// Noor Verse - read, translate and recite the Quran from the terminal
use clap::{Parser, Subcommand};
use noor_api_client::NoorClient;
use noor_cli::{config::NoorConfig, AppController, SimulatedDevice, TerminalPresenter};
use noor_core::{Coordinates, OrientationReading, SurahId};
use noor_playback::{DeviceSignal, PlaybackDevice, PlaybackEvent};
use std::io::{self, Stdout};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Controller<D> = AppController<TerminalPresenter<Stdout>, D>;

#[derive(Parser)]
#[command(name = "noor")]
#[command(about = "Read, translate and recite the Quran; prayer times and Qibla", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recite a surah or a range of its ayahs
    Play {
        /// Surah number (1-114)
        surah: SurahId,
        /// First ayah (defaults to 1)
        #[arg(long, default_value = "")]
        start: String,
        /// Last ayah (defaults to the last ayah of the surah)
        #[arg(long, default_value = "")]
        end: String,
        /// Walk through the clips without producing sound
        #[arg(long)]
        dry_run: bool,
    },
    #[command(flatten)]
    Browse(BrowseCommand),
}

/// Commands that never produce audio
#[derive(Subcommand)]
enum BrowseCommand {
    /// List surahs
    Surahs {
        /// Filter by name, number, or Arabic text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the Arabic text of a surah
    Read {
        /// Surah number (1-114)
        surah: SurahId,
    },
    /// Show a translation next to the Arabic
    Translate {
        /// Surah number (1-114)
        surah: SurahId,
        /// Translation edition, e.g. en.sahih
        #[arg(short, long)]
        lang: Option<String>,
        /// First ayah (defaults to 1)
        #[arg(long, default_value = "")]
        start: String,
        /// Last ayah (defaults to the last ayah of the surah)
        #[arg(long, default_value = "")]
        end: String,
    },
    /// Show today's prayer times
    Prayer {
        /// City name
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,
        /// Country for --city (defaults to the configured country)
        #[arg(long, requires = "city")]
        country: Option<String>,
        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Show the Qibla bearing
    Qibla {
        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Compass heading of the device, in degrees
        #[arg(long)]
        heading: Option<f64>,
        /// Device rotation around the z axis, in degrees
        #[arg(long, conflicts_with = "heading")]
        alpha: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "noor_cli=info,noor_playback=info,noor_api_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = NoorConfig::load(cli.config.as_deref())?;
    config.validate()?;
    let client = NoorClient::new(config.provider_config())?;

    let errors = match cli.command {
        Commands::Play {
            surah,
            start,
            end,
            dry_run,
        } => play(client, config, surah, &start, &end, dry_run).await?,
        Commands::Browse(command) => {
            let (device, _signals) = SimulatedDevice::with_channel(config.simulated_clip());
            let mut controller =
                AppController::new(client, config, device, TerminalPresenter::new(io::stdout()));
            run(&mut controller, command).await;
            controller.presenter().error_count()
        }
    };

    if errors > 0 {
        anyhow::bail!("{errors} error(s) reported");
    }
    Ok(())
}

/// Run a command against the simulated device
async fn run<D: PlaybackDevice>(controller: &mut Controller<D>, command: BrowseCommand) {
    match command {
        BrowseCommand::Surahs { search: None } => {
            controller.load_surahs().await;
        }
        BrowseCommand::Surahs {
            search: Some(query),
        } => controller.search(&query).await,
        BrowseCommand::Read { surah } => {
            controller.open_surah(surah).await;
        }
        BrowseCommand::Translate {
            surah,
            lang,
            start,
            end,
        } => {
            if controller.open_surah(surah).await {
                controller
                    .show_translation(lang.as_deref(), &start, &end)
                    .await;
            }
        }
        BrowseCommand::Prayer {
            city: Some(city),
            country,
            ..
        } => {
            controller.prayer_by_city(&city, country.as_deref()).await;
        }
        BrowseCommand::Prayer { lat, lon, .. } => {
            controller.prayer_by_coords(coordinates(lat, lon)).await;
        }
        BrowseCommand::Qibla {
            lat,
            lon,
            heading,
            alpha,
        } => {
            let found = controller.qibla(coordinates(lat, lon)).await.is_some();
            if found && (heading.is_some() || alpha.is_some()) {
                controller.update_heading(OrientationReading {
                    compass_heading: heading,
                    alpha,
                });
            }
        }
    }
}

fn coordinates(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinates> {
    Some(Coordinates::new(lat?, lon?))
}

/// Open `surah` and recite the requested range, returning the error count
async fn play(
    client: NoorClient,
    config: NoorConfig,
    surah: SurahId,
    start: &str,
    end: &str,
    dry_run: bool,
) -> anyhow::Result<usize> {
    #[cfg(feature = "speaker")]
    if !dry_run {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let device = noor_cli::SpeakerDevice::open(tx)?;
        let controller =
            AppController::new(client, config, device, TerminalPresenter::new(io::stdout()));
        return Ok(recite(controller, rx, surah, start, end).await);
    }

    #[cfg(not(feature = "speaker"))]
    if !dry_run {
        tracing::warn!("Built without the `speaker` feature, simulating playback");
    }

    let (device, rx) = SimulatedDevice::with_channel(config.simulated_clip());
    let controller =
        AppController::new(client, config, device, TerminalPresenter::new(io::stdout()));
    Ok(recite(controller, rx, surah, start, end).await)
}

/// Feed device signals to the controller until the recitation ends or the
/// user interrupts it
async fn recite<D: PlaybackDevice>(
    mut controller: Controller<D>,
    mut signals: UnboundedReceiver<DeviceSignal>,
    surah: SurahId,
    start: &str,
    end: &str,
) -> usize {
    if controller.open_surah(surah).await && controller.play_range(start, end).is_some() {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        while awaiting_signals(&controller) {
            tokio::select! {
                signal = signals.recv() => {
                    let Some(signal) = signal else {
                        tracing::error!("Playback device disconnected");
                        break;
                    };
                    let events = controller.handle_device_signal(signal);
                    if events.iter().any(|e| matches!(e, PlaybackEvent::DeviceFailed { .. })) {
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    tracing::info!("Interrupted");
                    controller.stop_audio();
                    break;
                }
            }
        }
    }
    controller.presenter().error_count()
}

/// Whether the recitation is still waiting for the device
fn awaiting_signals<D: PlaybackDevice>(controller: &Controller<D>) -> bool {
    controller.scheduler().is_live()
        && controller
            .scheduler()
            .session()
            .is_some_and(|s| s.failure.is_none())
}
