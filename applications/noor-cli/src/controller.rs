/// Application controller
///
/// Owns the application state and the playback scheduler, calls the
/// providers, and reports everything through a [`Presenter`]. Provider
/// failures never escape: they are logged and turned into an inline message
/// in the region the user was looking at.
use crate::config::NoorConfig;
use crate::state::{AppState, AudioStatus, CurrentSurah};
use noor_api_client::{ClientError, NoorClient};
use noor_core::{
    full_range, make_range,
    text::{display_text, wants_remote_search, TextDirection},
    types::{filter_by_numbers, filter_surahs, next_prayer},
    AudioSequence, Ayah, Coordinates, Field, LocationSource, OrientationReading, PlaybackRange,
    PrayerTimes, Presenter, QiblaDirection, RangeError, Region, Severity, SurahId,
    TranslationCard, View,
};
use noor_playback::{DeviceSignal, PlaybackDevice, PlaybackEvent, PlaybackScheduler, SessionId};
use tracing::{debug, info, warn};

/// Handle for an open-surah action whose content is still being fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTicket {
    pub surah: SurahId,
    generation: u64,
}

/// Provider results for an open-surah action
#[derive(Debug)]
pub struct SurahContent {
    pub text: Result<Vec<Ayah>, ClientError>,
    pub audio: Result<AudioSequence, ClientError>,
}

pub struct AppController<P: Presenter, D: PlaybackDevice> {
    client: NoorClient,
    config: NoorConfig,
    state: AppState,
    scheduler: PlaybackScheduler<D>,
    presenter: P,
}

impl<P: Presenter, D: PlaybackDevice> AppController<P, D> {
    pub fn new(client: NoorClient, config: NoorConfig, device: D, presenter: P) -> Self {
        Self {
            client,
            config,
            state: AppState::new(),
            scheduler: PlaybackScheduler::new(device),
            presenter,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn scheduler(&self) -> &PlaybackScheduler<D> {
        &self.scheduler
    }

    // ===== Surah List =====

    /// Fetch the surah list and render it
    pub async fn load_surahs(&mut self) -> bool {
        self.presenter
            .show_loading(Region::SurahList, "Loading surahs...");

        if !self.fetch_surah_list().await {
            self.presenter.show_message(
                Region::SurahList,
                Severity::Error,
                "Could not load the surah list. Check your internet connection.",
            );
            return false;
        }

        self.presenter.render_surah_list(&self.state.surahs);
        true
    }

    /// Filter the surah list
    ///
    /// Arabic queries longer than two characters go to the provider's
    /// full-text search; everything else matches names and numbers locally.
    pub async fn search(&mut self, query: &str) {
        if self.state.surahs.is_empty() && !self.fetch_surah_list().await {
            self.presenter.show_message(
                Region::SurahList,
                Severity::Error,
                "Could not load the surah list. Check your internet connection.",
            );
            return;
        }

        let query = query.trim().to_lowercase();
        if query.is_empty() {
            self.presenter.render_surah_list(&self.state.surahs);
            return;
        }

        if !wants_remote_search(&query) {
            let filtered = filter_surahs(&self.state.surahs, &query);
            debug!(query = %query, matches = filtered.len(), "Filtered surahs locally");
            self.presenter.render_surah_list(&filtered);
            return;
        }

        match self.client.quran().search(&query).await {
            Ok(results) => {
                let filtered = filter_by_numbers(&self.state.surahs, &results.surah_numbers());
                if filtered.is_empty() {
                    self.presenter
                        .show_message(Region::SurahList, Severity::Info, "No results found.");
                } else {
                    self.presenter.render_surah_list(&filtered);
                }
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed");
                self.presenter.show_message(
                    Region::SurahList,
                    Severity::Error,
                    "Search is not available right now.",
                );
            }
        }
    }

    // ===== Reader =====

    /// Open a surah in the reader: Arabic text plus its recitation audio
    pub async fn open_surah(&mut self, surah: SurahId) -> bool {
        let Some(ticket) = self.begin_open_surah(surah).await else {
            return false;
        };
        let content = self.fetch_surah(ticket).await;
        self.finish_open_surah(ticket, content)
    }

    /// First half of [`open_surah`](Self::open_surah): switch the reader to
    /// `surah` and issue a ticket for its content.
    ///
    /// Opening a different surah stops a recitation in progress.
    pub async fn begin_open_surah(&mut self, surah: SurahId) -> Option<OpenTicket> {
        if self.state.surahs.is_empty() {
            self.fetch_surah_list().await;
        }
        let Some(metadata) = self.state.surah(surah).cloned() else {
            self.presenter.show_message(
                Region::Mushaf,
                Severity::Error,
                "Surah details are not available. Check your internet connection.",
            );
            return None;
        };

        let switching = self
            .state
            .current
            .as_ref()
            .is_some_and(|c| c.surah.number != surah);
        if switching {
            self.stop_audio();
        }

        self.navigate(View::Reader);
        self.state.view_generation += 1;

        self.presenter.set_field(
            Field::SurahTitle,
            &format!("{} {}", metadata.english_name, metadata.name),
        );
        self.presenter
            .set_field(Field::AyahLimit, &metadata.number_of_ayahs.to_string());
        self.presenter.show_loading(Region::Mushaf, "Loading mushaf...");

        info!(surah = %surah, name = %metadata.english_name, "Opening surah");
        self.state.current = Some(CurrentSurah {
            surah: metadata,
            audio: AudioStatus::Pending,
        });

        Some(OpenTicket {
            surah,
            generation: self.state.view_generation,
        })
    }

    /// Fetch text and recitation for a ticket, concurrently
    pub async fn fetch_surah(&self, ticket: OpenTicket) -> SurahContent {
        let quran = self.client.quran();
        let resolver = self.client.resolver();
        let metadata = self.state.surah(ticket.surah);

        let (text, audio) = tokio::join!(
            quran.surah_text(ticket.surah),
            resolver.resolve(ticket.surah, metadata)
        );
        SurahContent { text, audio }
    }

    /// Second half of [`open_surah`](Self::open_surah): show the content.
    ///
    /// Content for anything but the latest open action is discarded and
    /// `false` returned, so a slow response can never replace the text or
    /// audio of the surah now on display.
    pub fn finish_open_surah(&mut self, ticket: OpenTicket, content: SurahContent) -> bool {
        let current_matches = self
            .state
            .current
            .as_ref()
            .is_some_and(|c| c.surah.number == ticket.surah);
        if ticket.generation != self.state.view_generation || !current_matches {
            debug!(surah = %ticket.surah, "Discarding content of superseded open action");
            return false;
        }

        match content.text {
            Ok(ayahs) => {
                let lines: Vec<(u32, String)> = ayahs
                    .iter()
                    .map(|a| (a.number_in_surah, display_text(ticket.surah, a)))
                    .collect();
                self.presenter.render_mushaf(ticket.surah, &lines);
            }
            Err(e) => {
                warn!(surah = %ticket.surah, error = %e, "Failed to load surah text");
                self.presenter.show_message(
                    Region::Mushaf,
                    Severity::Error,
                    "Could not load the mushaf.",
                );
            }
        }

        let audio = match content.audio {
            Ok(sequence) if sequence.surah() == ticket.surah => AudioStatus::Ready(sequence),
            Ok(sequence) => {
                warn!(expected = %ticket.surah, got = %sequence.surah(), "Recitation belongs to another surah");
                AudioStatus::Unavailable("recitation belongs to another surah".to_string())
            }
            Err(e) => {
                warn!(surah = %ticket.surah, error = %e, "Recitation unavailable");
                AudioStatus::Unavailable(e.to_string())
            }
        };
        if let AudioStatus::Unavailable(_) = audio {
            self.presenter.show_message(
                Region::Playback,
                Severity::Error,
                "Recitation audio is not available for this surah.",
            );
        }
        if let Some(current) = self.state.current.as_mut() {
            current.audio = audio;
        }
        true
    }

    // ===== Recitation =====

    /// Recite the whole current surah
    pub fn play_full(&mut self) -> Option<SessionId> {
        let count = self.current_ayah_count(Region::Playback)?;
        match full_range(count) {
            Ok(range) => self.start_session(range),
            Err(e) => {
                self.report_range_error(Region::Playback, e);
                None
            }
        }
    }

    /// Recite a range of the current surah from raw start/end input
    ///
    /// Empty or unparseable bounds default to the first and last ayah.
    pub fn play_range(&mut self, start: &str, end: &str) -> Option<SessionId> {
        let count = self.current_ayah_count(Region::Playback)?;
        match make_range(start, end, count) {
            Ok(range) => self.start_session(range),
            Err(e) => {
                self.report_range_error(Region::Playback, e);
                None
            }
        }
    }

    /// Stop the recitation, if any
    pub fn stop_audio(&mut self) {
        self.scheduler.stop();
        self.pump_events();
    }

    /// Feed a playback device signal to the scheduler
    ///
    /// Returns the playback events it produced.
    pub fn handle_device_signal(&mut self, signal: DeviceSignal) -> Vec<PlaybackEvent> {
        self.scheduler.handle_signal(signal);
        self.pump_events()
    }

    fn start_session(&mut self, range: PlaybackRange) -> Option<SessionId> {
        let Some(sequence) = self.state.playable_sequence() else {
            self.presenter.show_message(
                Region::Playback,
                Severity::Error,
                "Recitation audio is not available for this surah.",
            );
            return None;
        };

        match self.scheduler.start(sequence, range) {
            Ok(id) => {
                self.pump_events();
                Some(id)
            }
            Err(e) => {
                warn!(range = %range, error = %e, "Could not start recitation");
                self.presenter
                    .show_message(Region::Playback, Severity::Error, &e.to_string());
                None
            }
        }
    }

    /// Forward scheduler events to the presenter
    fn pump_events(&mut self) -> Vec<PlaybackEvent> {
        let events = self.scheduler.drain_events();
        for event in &events {
            match event {
                PlaybackEvent::SessionStarted {
                    start_ayah,
                    end_ayah,
                    ..
                } => self.presenter.show_message(
                    Region::Playback,
                    Severity::Info,
                    &format!("Reciting ayahs {start_ayah}-{end_ayah}"),
                ),
                PlaybackEvent::ClipStarted { ayah, .. } => self
                    .presenter
                    .set_field(Field::NowPlaying, &format!("Ayah {ayah}")),
                PlaybackEvent::DeviceFailed { ayah, reason, .. } => self.presenter.show_message(
                    Region::Playback,
                    Severity::Error,
                    &format!("Could not play ayah {ayah}: {reason}"),
                ),
                PlaybackEvent::SessionTerminated { .. } => {
                    self.presenter.set_field(Field::NowPlaying, "");
                    self.presenter
                        .show_message(Region::Playback, Severity::Info, "Recitation finished.");
                }
                PlaybackEvent::SessionStopped { .. } => {
                    self.presenter.set_field(Field::NowPlaying, "");
                }
                PlaybackEvent::SessionSuperseded { .. } | PlaybackEvent::ClipFinished { .. } => {}
            }
        }
        events
    }

    // ===== Translation =====

    /// Show a translation of part of the current surah next to the Arabic
    ///
    /// `language` defaults to the configured translation edition.
    pub async fn show_translation(
        &mut self,
        language: Option<&str>,
        start: &str,
        end: &str,
    ) -> bool {
        let Some(count) = self.current_ayah_count(Region::Translation) else {
            return false;
        };
        let range = match make_range(start, end, count) {
            Ok(range) => range,
            Err(e) => {
                self.report_range_error(Region::Translation, e);
                return false;
            }
        };
        let Some(surah) = self.state.current.as_ref().map(|c| c.surah.number) else {
            return false;
        };
        let language = language
            .unwrap_or(self.config.translation.default_language.as_str())
            .to_string();

        self.presenter
            .show_loading(Region::Translation, "Loading translation...");

        let quran = self.client.quran();
        let (translated, arabic) =
            tokio::join!(quran.translation(surah, &language), quran.surah_text(surah));

        let (translated, arabic) = match (translated, arabic) {
            (Ok(t), Ok(a)) => (t, a),
            (Err(e), _) | (_, Err(e)) => {
                warn!(surah = %surah, language = %language, error = %e, "Failed to load translation");
                self.presenter.show_message(
                    Region::Translation,
                    Severity::Error,
                    "Could not load the translation.",
                );
                return false;
            }
        };

        let cards: Vec<TranslationCard> = range
            .ayahs()
            .filter_map(|n| {
                let original = arabic.iter().find(|a| a.number_in_surah == n)?;
                let translation = translated.iter().find(|a| a.number_in_surah == n)?;
                Some(TranslationCard {
                    ayah: n,
                    arabic: display_text(surah, original),
                    translation: translation.text.clone(),
                })
            })
            .collect();

        debug!(surah = %surah, language = %language, cards = cards.len(), "Rendering translation");
        self.presenter
            .render_translation(&cards, TextDirection::for_edition(&language));
        true
    }

    // ===== Prayer Times =====

    /// Prayer times for a position
    ///
    /// Without usable coordinates the configured default location is used
    /// and reported as such.
    pub async fn prayer_by_coords(&mut self, at: Option<Coordinates>) -> Option<PrayerTimes> {
        let location = match at.filter(Coordinates::is_valid) {
            Some(coordinates) => {
                self.presenter
                    .set_field(Field::Location, &format!("Location: {coordinates}"));
                LocationSource::Device(coordinates)
            }
            None => {
                if let Some(at) = at {
                    warn!(location = %at, "Ignoring invalid coordinates");
                }
                let label = self.config.prayer.default_label.clone();
                self.presenter.set_field(
                    Field::Location,
                    &format!("Default: {label} (location unavailable)"),
                );
                LocationSource::Fallback {
                    label,
                    coordinates: self.config.default_location(),
                }
            }
        };
        let coordinates = match &location {
            LocationSource::Device(c) | LocationSource::Fallback { coordinates: c, .. } => *c,
            LocationSource::City { .. } => self.config.default_location(),
        };
        self.state.location = Some(location);

        self.presenter
            .show_loading(Region::Prayer, "Loading prayer times...");

        let timestamp = chrono::Utc::now().timestamp();
        let result = self
            .client
            .prayer()
            .timings_by_coords(coordinates, timestamp, self.config.prayer.method)
            .await;

        match result {
            Ok(times) => {
                self.show_prayer_times(&times);
                Some(times)
            }
            Err(e) => {
                warn!(location = %coordinates, error = %e, "Failed to load prayer times");
                self.presenter.show_message(
                    Region::Prayer,
                    Severity::Error,
                    "Could not load prayer times.",
                );
                None
            }
        }
    }

    /// Prayer times for a city
    ///
    /// `country` defaults to the configured country.
    pub async fn prayer_by_city(
        &mut self,
        city: &str,
        country: Option<&str>,
    ) -> Option<PrayerTimes> {
        let city = city.trim();
        if city.is_empty() {
            self.presenter
                .show_message(Region::Prayer, Severity::Error, "Enter a city name.");
            return None;
        }
        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.config.prayer.country.as_str())
            .to_string();

        self.presenter
            .set_field(Field::Location, &format!("City: {city}"));
        self.presenter
            .show_loading(Region::Prayer, "Loading prayer times...");

        let result = self
            .client
            .prayer()
            .timings_by_city(city, &country, self.config.prayer.method)
            .await;

        match result {
            Ok(times) => {
                self.state.location = Some(LocationSource::City {
                    city: city.to_string(),
                    country,
                });
                self.show_prayer_times(&times);
                Some(times)
            }
            Err(ClientError::Provider { code, status }) => {
                info!(city = %city, code, status = %status, "City lookup refused");
                self.presenter.show_message(
                    Region::Prayer,
                    Severity::Error,
                    "City name is not valid.",
                );
                None
            }
            Err(e) => {
                warn!(city = %city, error = %e, "Failed to load prayer times");
                self.presenter.show_message(
                    Region::Prayer,
                    Severity::Error,
                    "Could not load prayer times.",
                );
                None
            }
        }
    }

    fn show_prayer_times(&mut self, times: &PrayerTimes) {
        let next = next_prayer(&times.timings, chrono::Local::now().time());
        self.presenter
            .render_prayer_times(&times.timings.cleaned(), next);
        self.presenter.set_field(Field::HijriDate, &times.hijri_date);
        self.state.prayer_times = Some(times.clone());
    }

    // ===== Qibla =====

    /// Qibla bearing for a position
    ///
    /// Falls back to the last known location, then to the configured
    /// default. Bearings are cached per position.
    pub async fn qibla(&mut self, at: Option<Coordinates>) -> Option<QiblaDirection> {
        let coordinates = match at
            .filter(Coordinates::is_valid)
            .or_else(|| self.state.coordinates())
        {
            Some(c) => c,
            None => {
                let label = self.config.prayer.default_label.clone();
                let coordinates = self.config.default_location();
                self.presenter.show_message(
                    Region::Qibla,
                    Severity::Info,
                    &format!("Location unavailable, using default: {label}"),
                );
                self.state.location = Some(LocationSource::Fallback { label, coordinates });
                coordinates
            }
        };

        let direction = match self.state.cached_qibla(coordinates) {
            Some(direction) => direction,
            None => match self.client.prayer().qibla(coordinates).await {
                Ok(direction) => {
                    info!(location = %coordinates, degrees = direction.degrees(), "Qibla direction");
                    self.state.qibla = Some((coordinates, direction));
                    direction
                }
                Err(e) => {
                    warn!(location = %coordinates, error = %e, "Failed to load Qibla direction");
                    self.presenter.show_message(
                        Region::Qibla,
                        Severity::Error,
                        "Could not load the Qibla direction.",
                    );
                    return None;
                }
            },
        };

        self.presenter.set_field(
            Field::QiblaDegrees,
            &format!("{}°", direction.display_degrees()),
        );
        self.presenter.show_message(
            Region::Qibla,
            Severity::Info,
            "Hold the phone flat, parallel to the ground.",
        );
        Some(direction)
    }

    /// Point the needle for a new orientation reading
    ///
    /// Returns the needle rotation, or `None` without a cached bearing or a
    /// usable heading.
    pub fn update_heading(&mut self, reading: OrientationReading) -> Option<f64> {
        let (_, direction) = self.state.qibla?;
        let Some(heading) = reading.heading() else {
            self.presenter.show_message(
                Region::Qibla,
                Severity::Info,
                "Compass is not available on this device.",
            );
            return None;
        };

        let rotation = direction.needle_rotation(heading);
        self.presenter
            .set_field(Field::QiblaNeedle, &format!("{rotation:.0}°"));
        Some(rotation)
    }

    // ===== Navigation =====

    /// Switch screens; leaving the reader stops the recitation
    pub fn navigate(&mut self, view: View) {
        if self.state.view == View::Reader && view != View::Reader {
            self.stop_audio();
        }
        self.state.view = view;
        self.presenter.show_view(view);
    }

    // ===== Internals =====

    /// Populate the surah cache without rendering
    async fn fetch_surah_list(&mut self) -> bool {
        match self.client.quran().list_surahs().await {
            Ok(surahs) => {
                info!(count = surahs.len(), "Loaded surah list");
                self.state.surahs = surahs;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load surah list");
                false
            }
        }
    }

    fn current_ayah_count(&mut self, region: Region) -> Option<u32> {
        match self.state.current.as_ref() {
            Some(current) => Some(current.surah.number_of_ayahs),
            None => {
                self.presenter
                    .show_message(region, Severity::Error, "Open a surah first.");
                None
            }
        }
    }

    fn report_range_error(&mut self, region: Region, error: RangeError) {
        let message = match error {
            RangeError::Order { .. } => "Start ayah cannot be greater than end ayah.",
            RangeError::EmptySurah => "This surah has no ayahs to play.",
        };
        debug!(error = %error, "Rejected ayah range");
        self.presenter.show_message(region, Severity::Error, message);
    }
}
