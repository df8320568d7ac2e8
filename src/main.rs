use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, column, container, horizontal_space, row, text, text_editor, Space};
use iced::{window, Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod ui;

use config::Config;
use error::CatalogError;
use state::catalog::{self, Catalog};
use state::filter::CategoryFilter;
use state::overlay::OverlayStore;
use state::showcase::{CatalogState, Showcase};

/// Main application state
struct Vitrine {
    config: Config,
    /// Catalog, filter, gallery and saved descriptions
    showcase: Showcase,
    /// Text of the description editor in the open gallery
    editor: text_editor::Content,
    /// The save button is showing its confirmation
    saved: bool,
    /// Bumped on every save so only the latest timer resets the button
    feedback_generation: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background read of the catalog document finished
    CatalogLoaded(Result<Catalog, CatalogError>),
    /// Read the current catalog document again
    Reload,
    /// User clicked "Open catalog…"
    OpenCatalog,
    SelectFilter(CategoryFilter),
    /// A card was clicked
    OpenItem(String),
    CloseGallery,
    ShowImage(usize),
    NextImage,
    PreviousImage,
    DescriptionEdited(text_editor::Action),
    SaveDescription,
    /// The confirmation timer of the given save ran out
    SaveFeedbackElapsed(u64),
    OpenLink(String),
}

impl Vitrine {
    /// Create the application and start reading the catalog
    fn new(config: Config) -> (Self, Task<Message>) {
        let store = open_store(&config);
        let load = load_catalog(&config);

        (
            Vitrine {
                config,
                showcase: Showcase::new(store),
                editor: text_editor::Content::new(),
                saved: false,
                feedback_generation: 0,
            },
            load,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(Ok(catalog)) => {
                self.showcase.install(catalog);
            }
            Message::CatalogLoaded(Err(err)) => {
                self.showcase.fail(err);
            }
            Message::Reload => {
                return self.reload();
            }
            Message::OpenCatalog => {
                let file = FileDialog::new()
                    .set_title("Select Catalog Document")
                    .add_filter("JSON", &["json"])
                    .pick_file();

                if let Some(path) = file {
                    info!("📂 Switching catalog to {}", path.display());
                    self.config = self.config.with_data_path(path);
                    return self.reload();
                }
            }
            Message::SelectFilter(filter) => {
                self.showcase.select_filter(filter);
            }
            Message::OpenItem(key) => {
                if self.showcase.open_item(&key) {
                    self.reset_editor();
                }
            }
            Message::CloseGallery => {
                self.showcase.close_gallery();
                self.saved = false;
            }
            Message::ShowImage(index) => self.showcase.show_image(index),
            Message::NextImage => self.showcase.next_image(),
            Message::PreviousImage => self.showcase.previous_image(),
            Message::DescriptionEdited(action) => {
                self.editor.perform(action);
            }
            Message::SaveDescription => {
                return self.save_description();
            }
            Message::SaveFeedbackElapsed(generation) => {
                if generation == self.feedback_generation {
                    self.saved = false;
                }
            }
            Message::OpenLink(url) => {
                if let Err(err) = webbrowser::open(&url) {
                    warn!("⚠️  Could not open {}: {}", url, err);
                }
            }
        }

        Task::none()
    }

    fn reload(&mut self) -> Task<Message> {
        self.showcase.begin_loading();
        self.saved = false;
        load_catalog(&self.config)
    }

    /// Fill the editor from the item the gallery just opened on
    fn reset_editor(&mut self) {
        let description = self
            .showcase
            .current_item()
            .map(|(_, item)| item.description.as_str())
            .unwrap_or_default();
        self.editor = text_editor::Content::with_text(description);
        self.saved = false;
    }

    fn save_description(&mut self) -> Task<Message> {
        match self.showcase.save_description(&self.editor.text()) {
            Ok(true) => {
                // Show the stored, trimmed text
                self.reset_editor();
                self.saved = true;
                self.feedback_generation += 1;

                let generation = self.feedback_generation;
                let delay = self.config.save_feedback;
                Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |_| Message::SaveFeedbackElapsed(generation),
                )
            }
            Ok(false) => Task::none(),
            Err(err) => {
                warn!("⚠️  Description kept for this session only: {}", err);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text("Vitrine").size(32),
            horizontal_space(),
            button("Open catalog…")
                .style(button::secondary)
                .on_press(Message::OpenCatalog)
                .padding(10),
            button("Reload")
                .style(button::secondary)
                .on_press(Message::Reload)
                .padding(10),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let body: Element<Message> = match self.showcase.state() {
            // Nothing is drawn until the read completes
            CatalogState::Loading => Space::new(Length::Fill, Length::Fill).into(),
            CatalogState::Failed(err) => {
                ui::cards::empty_state("Error loading item data.", Some(err.to_string()))
            }
            CatalogState::Ready(catalog) if catalog.is_empty() => {
                ui::cards::empty_state("No items found.", None)
            }
            CatalogState::Ready(_) => column![
                ui::cards::filter_bar(&self.showcase),
                ui::cards::card_grid(&self.showcase, &self.config.image_root),
            ]
            .spacing(20)
            .into(),
        };

        let page = container(column![header, body].spacing(20).padding(30))
            .width(Length::Fill)
            .height(Length::Fill);

        let open = self.showcase.gallery().as_open();
        match (open, self.showcase.current_item()) {
            (Some(open), Some((_, item))) => ui::modal(
                page,
                ui::gallery::gallery_view(
                    open,
                    item,
                    &self.editor,
                    self.saved,
                    &self.config.image_root,
                ),
                Message::CloseGallery,
            ),
            _ => page.into(),
        }
    }

    /// Keyboard navigation is only live while the gallery is open
    fn subscription(&self) -> Subscription<Message> {
        if self.showcase.gallery().is_open() {
            event::listen_with(gallery_event)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn gallery_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => gallery_key(key, status),
        _ => None,
    }
}

/// Escape closes even when the description editor took the key;
/// arrows only navigate when no widget captured them
fn gallery_key(key: Key, status: event::Status) -> Option<Message> {
    match (key, status) {
        (Key::Named(Named::Escape), _) => Some(Message::CloseGallery),
        (Key::Named(Named::ArrowLeft), event::Status::Ignored) => Some(Message::PreviousImage),
        (Key::Named(Named::ArrowRight), event::Status::Ignored) => Some(Message::NextImage),
        _ => None,
    }
}

fn load_catalog(config: &Config) -> Task<Message> {
    Task::perform(
        catalog::load(config.data_path.clone()),
        Message::CatalogLoaded,
    )
}

/// Open the description store, falling back to one that only lasts this session
fn open_store(config: &Config) -> OverlayStore {
    let opened = match &config.store_path {
        Some(path) => OverlayStore::open(path),
        None => Err(CatalogError::Storage(
            "no data directory for the description store".to_string(),
        )),
    };

    opened.unwrap_or_else(|err| {
        warn!("⚠️  {}; descriptions will not survive a restart", err);
        // If this fails, we panic because SQLite itself is unusable
        OverlayStore::open_in_memory().expect("Failed to open in-memory description store")
    })
}

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("🛍️  Vitrine starting with catalog {}", config.data_path.display());

    iced::application("Vitrine", Vitrine::update, Vitrine::view)
        .subscription(Vitrine::subscription)
        .theme(Vitrine::theme)
        .centered()
        .run_with(move || Vitrine::new(config))
}
