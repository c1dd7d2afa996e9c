//! Controller tests against mock providers.
//!
//! A recording presenter captures everything shown and a recording device
//! captures every playback command, so each user action can be checked end
//! to end without a network or sound card.

use noor_api_client::NoorClient;
use noor_cli::config::NoorConfig;
use noor_cli::{AppController, AudioStatus};
use noor_core::text::BISMILLAH;
use noor_core::{
    Coordinates, Field, LocationSource, OrientationReading, Prayer, Presenter, Region, Severity,
    Surah, SurahId, TextDirection, TranslationCard, View,
};
use noor_playback::{Cue, DeviceSignal, PlaybackDevice, PlaybackEvent, Result, SessionPhase};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Doubles
// =============================================================================

#[derive(Debug, Default)]
struct RecordingPresenter {
    views: Vec<View>,
    messages: Vec<(Region, Severity, String)>,
    fields: Vec<(Field, String)>,
    surah_lists: Vec<Vec<u16>>,
    mushaf: Vec<(u32, String)>,
    cards: Vec<TranslationCard>,
    direction: Option<TextDirection>,
    prayer_times: Vec<(Prayer, String)>,
    next_prayer: Option<Prayer>,
}

impl RecordingPresenter {
    fn errors(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(_, severity, _)| *severity == Severity::Error)
            .map(|(_, _, message)| message.as_str())
            .collect()
    }

    fn field(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }
}

impl Presenter for RecordingPresenter {
    fn show_view(&mut self, view: View) {
        self.views.push(view);
    }

    fn show_loading(&mut self, _region: Region, _message: &str) {}

    fn show_message(&mut self, region: Region, severity: Severity, message: &str) {
        self.messages.push((region, severity, message.to_string()));
    }

    fn set_field(&mut self, field: Field, value: &str) {
        self.fields.push((field, value.to_string()));
    }

    fn render_surah_list(&mut self, surahs: &[Surah]) {
        self.surah_lists
            .push(surahs.iter().map(|s| s.number.get()).collect());
    }

    fn render_mushaf(&mut self, _surah: SurahId, ayahs: &[(u32, String)]) {
        self.mushaf = ayahs.to_vec();
    }

    fn render_translation(&mut self, cards: &[TranslationCard], direction: TextDirection) {
        self.cards = cards.to_vec();
        self.direction = Some(direction);
    }

    fn render_prayer_times(&mut self, timings: &[(Prayer, String)], next: Prayer) {
        self.prayer_times = timings.to_vec();
        self.next_prayer = Some(next);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    SetSource(String),
    Play,
    Pause,
    Reset,
}

#[derive(Default)]
struct RecordingDevice {
    commands: Vec<Command>,
}

impl PlaybackDevice for RecordingDevice {
    fn set_source(&mut self, uri: &str, _cue: Cue) -> Result<()> {
        self.commands.push(Command::SetSource(uri.to_string()));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.commands.push(Command::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn reset_position(&mut self) {
        self.commands.push(Command::Reset);
    }
}

type Controller = AppController<RecordingPresenter, RecordingDevice>;

// =============================================================================
// Fixtures
// =============================================================================

fn controller_for(server: &MockServer) -> Controller {
    let mut config = NoorConfig::default();
    config.providers.quran_url = server.uri();
    config.providers.prayer_url = server.uri();
    let client = NoorClient::new(config.provider_config()).unwrap();
    AppController::new(
        client,
        config,
        RecordingDevice::default(),
        RecordingPresenter::default(),
    )
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 200,
        "status": "OK",
        "data": data
    }))
}

fn surah_json(number: u16, english: &str, ayahs: u32) -> serde_json::Value {
    json!({
        "number": number,
        "name": "سُورَةُ",
        "englishName": english,
        "englishNameTranslation": "Translation",
        "numberOfAyahs": ayahs,
        "revelationType": "Meccan"
    })
}

fn text_json(count: u32) -> serde_json::Value {
    let ayahs: Vec<_> = (1..=count)
        .map(|n| {
            let text = if n == 1 {
                format!("{BISMILLAH} آية {n}")
            } else {
                format!("آية {n}")
            };
            json!({ "numberInSurah": n, "text": text })
        })
        .collect();
    json!({ "ayahs": ayahs })
}

fn audio_json(surah: u16, count: u32) -> serde_json::Value {
    let ayahs: Vec<_> = (1..=count)
        .map(|n| json!({ "numberInSurah": n, "audio": format!("https://cdn.example/{surah}/{n}.mp3") }))
        .collect();
    json!({ "ayahs": ayahs })
}

fn timings_json() -> serde_json::Value {
    json!({
        "timings": {
            "Fajr": "04:12 (IST)",
            "Sunrise": "05:31 (IST)",
            "Dhuhr": "11:47 (IST)",
            "Asr": "15:10 (IST)",
            "Sunset": "18:02 (IST)",
            "Maghrib": "18:02 (IST)",
            "Isha": "19:17 (IST)",
            "Imsak": "04:02 (IST)",
            "Midnight": "23:47 (IST)"
        },
        "date": {
            "readable": "16 Oct 2026",
            "hijri": { "date": "05-05-1448" }
        }
    })
}

/// Mount the surah list plus text and recitation for surahs 103 (3 ayahs)
/// and 112 (4 ayahs)
async fn mount_quran(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/surah"))
        .respond_with(ok(json!([
            surah_json(1, "Al-Faatiha", 7),
            surah_json(103, "Al-Asr", 3),
            surah_json(112, "Al-Ikhlaas", 4)
        ])))
        .mount(server)
        .await;

    for (surah, count) in [(103_u16, 3_u32), (112, 4)] {
        Mock::given(method("GET"))
            .and(path(format!("/surah/{surah}/quran-uthmani")))
            .respond_with(ok(text_json(count)))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/surah/{surah}/ar.alafasy")))
            .respond_with(ok(audio_json(surah, count)))
            .mount(server)
            .await;
    }
}

fn surah(number: u16) -> SurahId {
    SurahId::new(number).unwrap()
}

/// Report the current clip of the live session as finished
fn complete_current(controller: &mut Controller) -> Vec<PlaybackEvent> {
    let cue = controller.scheduler().session().unwrap().cue();
    controller.handle_device_signal(DeviceSignal::completed(cue))
}

// =============================================================================
// Surah List Tests
// =============================================================================

mod surah_list {
    use super::*;

    #[tokio::test]
    async fn test_load_renders_all_surahs() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);

        assert!(controller.load_surahs().await);
        assert_eq!(controller.presenter().surah_lists, vec![vec![1, 103, 112]]);
    }

    #[tokio::test]
    async fn test_load_failure_shows_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/surah"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        assert!(!controller.load_surahs().await);
        assert_eq!(
            controller.presenter().errors(),
            vec!["Could not load the surah list. Check your internet connection."]
        );
    }

    #[tokio::test]
    async fn test_latin_query_filters_locally() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/search/"))
            .respond_with(ok(json!({ "count": 0, "matches": [] })))
            .expect(0)
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        controller.search("  IKHLAAS ").await;
        assert_eq!(controller.presenter().surah_lists, vec![vec![112]]);
    }

    #[tokio::test]
    async fn test_arabic_query_uses_remote_search() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/search/[^/]+/all/quran-uthmani$"))
            .respond_with(ok(json!({
                "count": 2,
                "matches": [
                    { "numberInSurah": 1, "text": "x", "surah": { "number": 112 } },
                    { "numberInSurah": 2, "text": "y", "surah": { "number": 112 } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        controller.search("ٱللَّهُ").await;
        assert_eq!(controller.presenter().surah_lists, vec![vec![112]]);
    }

    #[tokio::test]
    async fn test_remote_search_without_matches() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/search/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 404,
                "status": "Not Found",
                "data": "Nothing found"
            })))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        controller.search("ززز").await;
        assert!(controller.presenter().surah_lists.is_empty());
        assert!(controller
            .presenter()
            .messages
            .contains(&(Region::SurahList, Severity::Info, "No results found.".to_string())));
    }
}

// =============================================================================
// Reader Tests
// =============================================================================

mod reader {
    use super::*;

    #[tokio::test]
    async fn test_open_surah_renders_text_and_resolves_audio() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);

        assert!(controller.open_surah(surah(103)).await);

        let presenter = controller.presenter();
        assert_eq!(presenter.views, vec![View::Reader]);
        assert_eq!(presenter.field(Field::AyahLimit), Some("3"));
        assert_eq!(presenter.mushaf.len(), 3);
        // Bismillah is stripped from the first ayah of every surah but 1 and 9
        assert_eq!(presenter.mushaf[0], (1, "آية 1".to_string()));

        let current = controller.state().current.as_ref().unwrap();
        match &current.audio {
            AudioStatus::Ready(sequence) => assert_eq!(sequence.len(), 3),
            other => panic!("Expected ready audio, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_surah_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/surah"))
            .respond_with(ok(json!([surah_json(1, "Al-Faatiha", 7)])))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        assert!(!controller.open_surah(surah(50)).await);
        assert!(controller.state().current.is_none());
        assert_eq!(controller.presenter().errors().len(), 1);
    }

    #[tokio::test]
    async fn test_audio_failure_marks_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/surah"))
            .respond_with(ok(json!([surah_json(103, "Al-Asr", 3)])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/surah/103/quran-uthmani"))
            .respond_with(ok(text_json(3)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/surah/103/ar.alafasy"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        assert!(controller.open_surah(surah(103)).await);
        assert_eq!(controller.presenter().mushaf.len(), 3);
        assert!(matches!(
            controller.state().current.as_ref().unwrap().audio,
            AudioStatus::Unavailable(_)
        ));

        // Playback is refused without touching the device
        assert!(controller.play_full().is_none());
        assert!(controller.scheduler().device().commands.is_empty());
    }

    #[tokio::test]
    async fn test_stale_open_is_discarded() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);

        let first = controller.begin_open_surah(surah(103)).await.unwrap();
        let first_content = controller.fetch_surah(first).await;

        let second = controller.begin_open_surah(surah(112)).await.unwrap();
        let second_content = controller.fetch_surah(second).await;
        assert!(controller.finish_open_surah(second, second_content));

        // The slower response for 103 arrives last and must not win
        assert!(!controller.finish_open_surah(first, first_content));

        let current = controller.state().current.as_ref().unwrap();
        assert_eq!(current.surah.number, surah(112));
        match &current.audio {
            AudioStatus::Ready(sequence) => assert_eq!(sequence.surah(), surah(112)),
            other => panic!("Expected ready audio, got: {other:?}"),
        }
        assert_eq!(controller.presenter().mushaf.len(), 4);
    }
}

// =============================================================================
// Recitation Tests
// =============================================================================

mod recitation {
    use super::*;

    #[tokio::test]
    async fn test_range_plays_in_order_then_terminates() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(112)).await;

        controller.play_range("2", "3").unwrap();
        assert_eq!(controller.presenter().field(Field::NowPlaying), Some("Ayah 2"));

        complete_current(&mut controller);
        assert_eq!(controller.presenter().field(Field::NowPlaying), Some("Ayah 3"));

        let events = complete_current(&mut controller);
        assert!(events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::SessionTerminated { .. })));
        assert_eq!(controller.scheduler().phase(), SessionPhase::Terminated);

        let sources: Vec<_> = controller
            .scheduler()
            .device()
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::SetSource(uri) => Some(uri.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            sources,
            vec!["https://cdn.example/112/2.mp3", "https://cdn.example/112/3.mp3"]
        );
    }

    #[tokio::test]
    async fn test_empty_bounds_play_whole_surah() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(103)).await;

        controller.play_range("", "abc").unwrap();
        let session = controller.scheduler().session().unwrap();
        assert_eq!(session.current_ayah(), 1);
        assert_eq!(session.terminal_ayah(), 3);
    }

    #[tokio::test]
    async fn test_reversed_range_is_rejected() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(112)).await;

        assert!(controller.play_range("4", "2").is_none());
        assert_eq!(
            controller.presenter().errors(),
            vec!["Start ayah cannot be greater than end ayah."]
        );
        assert!(controller.scheduler().device().commands.is_empty());
    }

    #[tokio::test]
    async fn test_play_without_open_surah() {
        let server = MockServer::start().await;
        let mut controller = controller_for(&server);

        assert!(controller.play_full().is_none());
        assert_eq!(controller.presenter().errors(), vec!["Open a surah first."]);
    }

    #[tokio::test]
    async fn test_stop_ignores_late_completion() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(112)).await;

        controller.play_full().unwrap();
        let cue = controller.scheduler().session().unwrap().cue();
        controller.stop_audio();

        let events = controller.handle_device_signal(DeviceSignal::completed(cue));
        assert!(events.is_empty());
        assert_eq!(controller.scheduler().phase(), SessionPhase::Stopped { index: 0 });
    }

    #[tokio::test]
    async fn test_leaving_reader_stops_recitation() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(103)).await;
        controller.play_full().unwrap();

        controller.navigate(View::Prayer);

        assert!(!controller.scheduler().is_live());
        let commands = &controller.scheduler().device().commands;
        assert_eq!(&commands[commands.len() - 2..], &[Command::Pause, Command::Reset]);
    }

    #[tokio::test]
    async fn test_opening_another_surah_stops_recitation() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(103)).await;
        controller.play_full().unwrap();
        let old_cue = controller.scheduler().session().unwrap().cue();

        controller.open_surah(surah(112)).await;
        assert!(!controller.scheduler().is_live());

        // A completion from the old recitation changes nothing
        assert!(controller
            .handle_device_signal(DeviceSignal::completed(old_cue))
            .is_empty());
    }

    #[tokio::test]
    async fn test_device_failure_is_reported() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(103)).await;
        controller.play_full().unwrap();

        let cue = controller.scheduler().session().unwrap().cue();
        controller.handle_device_signal(DeviceSignal::failed(cue, "autoplay blocked"));

        assert_eq!(
            controller.presenter().errors(),
            vec!["Could not play ayah 1: autoplay blocked"]
        );
        // Parked on the failed clip
        assert!(controller
            .handle_device_signal(DeviceSignal::completed(cue))
            .is_empty());
    }
}

// =============================================================================
// Translation Tests
// =============================================================================

mod translation {
    use super::*;

    #[tokio::test]
    async fn test_translation_cards_for_range() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        Mock::given(method("GET"))
            .and(path("/surah/112/en.sahih"))
            .respond_with(ok(json!({
                "ayahs": [
                    { "numberInSurah": 1, "text": "Say, He is Allah, One" },
                    { "numberInSurah": 2, "text": "Allah, the Eternal Refuge" },
                    { "numberInSurah": 3, "text": "He neither begets nor is born" },
                    { "numberInSurah": 4, "text": "Nor is there to Him any equivalent" }
                ]
            })))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(112)).await;

        assert!(controller.show_translation(Some("en.sahih"), "2", "3").await);

        let presenter = controller.presenter();
        assert_eq!(presenter.cards.len(), 2);
        assert_eq!(presenter.cards[0].ayah, 2);
        assert_eq!(presenter.cards[0].arabic, "آية 2");
        assert_eq!(presenter.cards[1].translation, "He neither begets nor is born");
        assert_eq!(presenter.direction, Some(TextDirection::LeftToRight));
    }

    #[tokio::test]
    async fn test_default_language_is_right_to_left() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        Mock::given(method("GET"))
            .and(path("/surah/103/ur.jalandhry"))
            .respond_with(ok(text_json(3)))
            .expect(1)
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(103)).await;

        assert!(controller.show_translation(None, "", "").await);
        assert_eq!(controller.presenter().cards.len(), 3);
        assert_eq!(controller.presenter().direction, Some(TextDirection::RightToLeft));
    }

    #[tokio::test]
    async fn test_translation_failure_shows_message() {
        let server = MockServer::start().await;
        mount_quran(&server).await;
        let mut controller = controller_for(&server);
        controller.open_surah(surah(103)).await;

        // No mock for the edition: the server answers 404
        assert!(!controller.show_translation(Some("xx.none"), "", "").await);
        assert_eq!(
            controller.presenter().errors(),
            vec!["Could not load the translation."]
        );
    }
}

// =============================================================================
// Prayer Times Tests
// =============================================================================

mod prayer {
    use super::*;

    #[tokio::test]
    async fn test_coordinates_query_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/timings/\d+$"))
            .and(query_param("latitude", "21.4225"))
            .and(query_param("longitude", "39.8262"))
            .and(query_param("method", "1"))
            .respond_with(ok(timings_json()))
            .expect(1)
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        let times = controller
            .prayer_by_coords(Some(Coordinates::new(21.4225, 39.8262)))
            .await
            .unwrap();

        assert_eq!(times.hijri_date, "05-05-1448");
        let presenter = controller.presenter();
        assert_eq!(presenter.prayer_times.len(), 6);
        assert_eq!(presenter.prayer_times[0], (Prayer::Fajr, "04:12".to_string()));
        assert!(presenter.next_prayer.is_some());
        assert_eq!(presenter.field(Field::HijriDate), Some("05-05-1448"));
    }

    #[tokio::test]
    async fn test_missing_location_falls_back_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/timings/\d+$"))
            .and(query_param("latitude", "22.5726"))
            .and(query_param("longitude", "88.3639"))
            .respond_with(ok(timings_json()))
            .expect(1)
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        assert!(controller.prayer_by_coords(None).await.is_some());
        assert_eq!(
            controller.presenter().field(Field::Location),
            Some("Default: Kolkata (location unavailable)")
        );
        assert!(matches!(
            controller.state().location,
            Some(LocationSource::Fallback { .. })
        ));
    }

    #[tokio::test]
    async fn test_city_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timingsByCity"))
            .and(query_param("city", "Dhaka"))
            .and(query_param("country", "India"))
            .respond_with(ok(timings_json()))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        assert!(controller.prayer_by_city(" Dhaka ", None).await.is_some());
        assert!(matches!(
            &controller.state().location,
            Some(LocationSource::City { city, .. }) if city == "Dhaka"
        ));
    }

    #[tokio::test]
    async fn test_unknown_city_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timingsByCity"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 400,
                "status": "Bad Request",
                "data": "Unable to locate city and country"
            })))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        assert!(controller.prayer_by_city("Atlantis", Some("Sea")).await.is_none());
        assert_eq!(controller.presenter().errors(), vec!["City name is not valid."]);
        assert!(controller.state().location.is_none());
    }

    #[tokio::test]
    async fn test_empty_city_is_rejected_locally() {
        let server = MockServer::start().await;
        let mut controller = controller_for(&server);

        assert!(controller.prayer_by_city("   ", None).await.is_none());
        assert_eq!(controller.presenter().errors(), vec!["Enter a city name."]);
    }
}

// =============================================================================
// Qibla Tests
// =============================================================================

mod qibla {
    use super::*;

    #[tokio::test]
    async fn test_bearing_is_cached_per_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/qibla/51.5/-0.12"))
            .respond_with(ok(json!({
                "latitude": 51.5,
                "longitude": -0.12,
                "direction": 118.99
            })))
            .expect(1)
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);
        let london = Coordinates::new(51.5, -0.12);

        let first = controller.qibla(Some(london)).await.unwrap();
        let second = controller.qibla(Some(london)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(controller.presenter().field(Field::QiblaDegrees), Some("119°"));
    }

    #[tokio::test]
    async fn test_heading_turns_needle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/qibla/"))
            .respond_with(ok(json!({ "direction": 290.0 })))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        // No bearing yet
        assert!(controller
            .update_heading(OrientationReading {
                compass_heading: Some(40.0),
                alpha: None,
            })
            .is_none());

        controller.qibla(None).await.unwrap();
        let rotation = controller.update_heading(OrientationReading {
            compass_heading: Some(40.0),
            alpha: None,
        });
        assert_eq!(rotation, Some(250.0));
        assert_eq!(controller.presenter().field(Field::QiblaNeedle), Some("250°"));

        // Neither source gives a heading
        assert!(controller
            .update_heading(OrientationReading::default())
            .is_none());
    }

    #[tokio::test]
    async fn test_provider_failure_shows_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/qibla/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let mut controller = controller_for(&server);

        assert!(controller
            .qibla(Some(Coordinates::new(21.4225, 39.8262)))
            .await
            .is_none());
        assert_eq!(
            controller.presenter().errors(),
            vec!["Could not load the Qibla direction."]
        );
    }
}
