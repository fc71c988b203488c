use std::sync::Arc;

use crate::catalog::{Catalog, Chapter, ChapterId};
use crate::config::Config;
use crate::error::MediaError;
use crate::favorites::FavoritesStore;
use crate::media::{GtkMediaEngine, MediaEngine, MediaEvent};
use crate::session::Session;
use crate::sleep_timer::SleepTimer;
use crate::storage::JsonFileStore;
use crate::summary::{GeminiClient, SummaryProvider, SummaryTicket, SummaryTracker};
use crate::ui::window::MainWindow;

/// Everything that reaches the GTK main thread: widget actions, media
/// notifications and results of background work.
#[derive(Debug, Clone)]
pub enum UiEvent {
    ChapterActivated(ChapterId),
    TogglePlayPause,
    Next,
    Previous,
    SeekRequested(f64),
    VolumeChanged(f64),
    SearchChanged(String),
    FavoritesOnlyToggled(bool),
    FavoriteToggled(ChapterId),
    SummaryRequested(ChapterId),
    SummaryReady(SummaryTicket, String),
    SleepTimerToggled,
    TimerTick,
    Media(MediaEvent),
    PlayResolved {
        token: u64,
        outcome: Result<(), MediaError>,
    },
    PreferencesRequested,
    ApiKeyChanged(String),
    SleepMinutesChanged(u32),
}

/// Central application state. Lives on the GTK main thread inside Rc<RefCell<>>.
pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub favorites: FavoritesStore<JsonFileStore>,
    pub query: String,
    pub favorites_only: bool,
    pub session: Session,
    pub sleep_timer: SleepTimer,
    pub summaries: SummaryTracker,
    pub summary_provider: Arc<dyn SummaryProvider>,
    /// Only `app::playback` drives the engine.
    pub media: Box<dyn MediaEngine>,
    pub tokio_rt: tokio::runtime::Runtime,
    pub ui_sender: async_channel::Sender<UiEvent>,

    // UI handles
    pub window: Option<MainWindow>,
}

impl AppState {
    pub fn new(sender: async_channel::Sender<UiEvent>) -> Self {
        let config = Config::load();
        let catalog = Catalog::new(&config.audio_base_url);
        log::info!("Catalog loaded: {} chapters", catalog.len());

        let store = JsonFileStore::open(JsonFileStore::default_path());
        log::info!("Favorites stored in {}", store.path().display());
        let favorites = FavoritesStore::load(store);

        let session = Session::new(config.default_volume);

        let media_sender = sender.clone();
        let mut media = GtkMediaEngine::new(move |event| {
            let _ = media_sender.try_send(UiEvent::Media(event));
        });
        media.set_volume(session.effective_volume());

        let summary_provider = gemini_client(&config);
        let tokio_rt = tokio::runtime::Runtime::new()
            .expect("Failed to create tokio runtime");

        Self {
            config,
            catalog,
            favorites,
            query: String::new(),
            favorites_only: false,
            session,
            sleep_timer: SleepTimer::default(),
            summaries: SummaryTracker::default(),
            summary_provider,
            media: Box::new(media),
            tokio_rt,
            ui_sender: sender,
            window: None,
        }
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.session.current().and_then(|id| self.catalog.get(id))
    }
}

/// Build the summary provider from the current configuration.
pub fn gemini_client(config: &Config) -> Arc<dyn SummaryProvider> {
    Arc::new(GeminiClient::new(
        &config.gemini_endpoint,
        &config.gemini_model,
        &config.resolved_api_key(),
    ))
}
