/// Startup configuration from the command line and environment

use clap::Parser;
use std::path::PathBuf;

use crate::state::library::Library;
use crate::state::selection::DEFAULT_CAPACITY;
use crate::state::store::StoreResult;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite file used to remember the selection and theme
    #[arg(long, env = "PRODUCT_COMPARE_DB")]
    pub db_path: Option<PathBuf>,

    /// JSON catalog to use instead of the bundled one
    #[arg(long, env = "PRODUCT_COMPARE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Maximum number of products compared at once
    #[arg(
        long,
        env = "PRODUCT_COMPARE_MAX_SELECTION",
        default_value_t = DEFAULT_CAPACITY as u8,
        value_parser = clap::value_parser!(u8).range(2..)
    )]
    pub max_selection: u8,

    /// Answer to "does the OS prefer dark mode", skipping detection
    #[arg(long, env = "PRODUCT_COMPARE_SYSTEM_DARK")]
    pub system_dark: Option<bool>,
}

impl Cli {
    /// Configured database path, or the per-user default
    pub fn db_path(&self) -> StoreResult<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => Library::default_path(),
        }
    }

    pub fn capacity(&self) -> usize {
        usize::from(self.max_selection)
    }

    /// OS dark-mode preference, unless `--system-dark` answers it
    pub fn system_prefers_dark(&self) -> bool {
        self.system_prefers_dark_with(os_prefers_dark)
    }

    fn system_prefers_dark_with(&self, detect: impl FnOnce() -> bool) -> bool {
        match self.system_dark {
            Some(dark) => dark,
            None => detect(),
        }
    }
}

/// Platform light/dark setting, as detected by iced's default theme
fn os_prefers_dark() -> bool {
    let dark = matches!(iced::Theme::default(), iced::Theme::Dark);
    log::debug!("OS reports {} mode", if dark { "dark" } else { "light" });
    dark
}
