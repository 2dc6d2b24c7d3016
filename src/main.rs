use clap::Parser;
use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::{button, column, container, horizontal_space, row, text, text_input};
use iced::{window, Element, Length, Size, Subscription, Task, Theme};

mod config;
mod state;
mod ui;

use config::Cli;
use state::catalog::Catalog;
use state::comparison::Step;
use state::library::Library;
use state::preferences::ThemeMode;
use state::selection::SelectionChange;
use state::session::Session;
use state::store::{KeyValueStore, MemoryStore};
use ui::gallery::BrandOption;

/// Main application state
struct ProductCompare {
    /// Catalog, stores and view state for this run
    session: Session,
    /// Whether the window is too narrow for the full comparison table
    narrow: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Search box text changed
    SearchChanged(String),
    /// Brand picker changed
    BrandSelected(BrandOption),
    /// "Clear Filters" pressed on the empty results view
    ClearFilters,
    /// Ctrl/Cmd+K
    FocusSearch,
    /// Product card pressed
    ToggleSelect(String),
    /// Remove button on a chip or comparison column
    Remove(String),
    ClearAll,
    /// Open the comparison panel
    Compare,
    /// Close button or Escape
    CloseComparison,
    /// Product tab pressed in the narrow comparison layout
    SelectTab(usize),
    /// Left/Right arrow keys
    Step(Step),
    ToggleTheme,
    WindowResized(Size),
}

impl ProductCompare {
    /// Create a new instance of the application
    fn new(cli: Cli) -> (Self, Task<Message>) {
        let catalog = load_catalog(&cli);
        let store = open_store(&cli);
        let session = Session::start(catalog, store, cli.capacity(), || cli.system_prefers_dark());

        log::info!(
            "🛍️  Product Compare initialized with {} products, {} selected",
            session.catalog().len(),
            session.selection().len()
        );

        (
            ProductCompare {
                session,
                narrow: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchChanged(query) => self.session.set_search_query(query),
            Message::BrandSelected(option) => self.session.set_brand_filter(option.into_filter()),
            Message::ClearFilters => self.session.clear_filters(),
            Message::FocusSearch => {
                if !self.session.comparison().is_open() {
                    return text_input::focus(ui::gallery::search_input_id());
                }
            }
            Message::ToggleSelect(id) => {
                if let SelectionChange::Rejected(reason) = self.session.toggle_select(&id) {
                    log::debug!("Selection of '{}' rejected: {:?}", id, reason);
                }
            }
            Message::Remove(id) => {
                self.session.remove(&id);
            }
            Message::ClearAll => {
                self.session.clear_all();
            }
            Message::Compare => {
                if !self.session.open_comparison() {
                    log::debug!("Compare requested with fewer than two products");
                }
            }
            Message::CloseComparison => self.session.close_comparison(),
            Message::SelectTab(index) => self.session.select_active(index),
            Message::Step(step) => self.session.step_active(step),
            Message::ToggleTheme => {
                let theme = self.session.toggle_theme();
                log::info!("🌓 Switched to {} theme", theme);
            }
            Message::WindowResized(size) => {
                self.narrow = size.width < ui::NARROW_WIDTH;
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let theme_label = match self.session.theme() {
            ThemeMode::Dark => "☀ Light mode",
            ThemeMode::Light => "☾ Dark mode",
        };

        let top_bar = row![
            horizontal_space(),
            button(text(theme_label).size(14))
                .on_press(Message::ToggleTheme)
                .style(button::secondary),
        ]
        .padding([12, 24]);

        let mut content = column![top_bar].height(Length::Fill);

        if self.session.comparison().is_open() {
            content = content.push(ui::comparison::view(&self.session, self.narrow));
        } else {
            content = content.push(ui::gallery::view(&self.session));
            if let Some(bar) = ui::compare_bar::view(self.session.selection()) {
                content = content.push(bar);
            }
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.session.theme() {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::on_key_press(key_to_message),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }
}

/// Keyboard shortcuts. Only semantic actions are mapped here.
fn key_to_message(key: Key, modifiers: Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Named(key::Named::Escape) => Some(Message::CloseComparison),
        Key::Named(key::Named::ArrowLeft) => Some(Message::Step(Step::Previous)),
        Key::Named(key::Named::ArrowRight) => Some(Message::Step(Step::Next)),
        Key::Character("k") if modifiers.command() => Some(Message::FocusSearch),
        _ => None,
    }
}

/// Use the configured catalog file, falling back to the bundled one
fn load_catalog(cli: &Cli) -> Catalog {
    match &cli.catalog {
        Some(path) => Catalog::load(path).unwrap_or_else(|e| {
            log::warn!(
                "⚠️  Could not load catalog {}: {}. Using the bundled catalog.",
                path.display(),
                e
            );
            Catalog::bundled()
        }),
        None => Catalog::bundled(),
    }
}

/// Open the SQLite store. Without it the app still runs, it just forgets
/// the selection and theme on exit.
fn open_store(cli: &Cli) -> Box<dyn KeyValueStore> {
    match cli.db_path().and_then(Library::open) {
        Ok(library) => {
            log::debug!("Selection and theme persist to {}", library.path().display());
            Box::new(library)
        }
        Err(e) => {
            log::warn!("⚠️  Preferences unavailable, changes will not be saved: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    iced::application("Product Compare", ProductCompare::update, ProductCompare::view)
        .theme(ProductCompare::theme)
        .subscription(ProductCompare::subscription)
        .window_size((1200.0, 800.0))
        .centered()
        .run_with(move || ProductCompare::new(cli))
}
