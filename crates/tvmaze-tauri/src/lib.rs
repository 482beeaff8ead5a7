//! TVmaze Show Browser Tauri Integration
//!
//! This crate provides Tauri commands that back the show browser page.
//! The page's search form and its delegated Episodes click handler invoke
//! these commands and swap in the returned `PageSnapshot` wholesale.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tvmaze_tauri::BrowserState;
//! use tauri::Manager;
//!
//! fn main() {
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             app.manage(BrowserState::from_env()?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             tvmaze_tauri::commands::search_shows,
//!             tvmaze_tauri::commands::show_episodes,
//!             tvmaze_tauri::commands::current_page,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `search_shows` - Form submit: search and render show cards
//! - `show_episodes` - Episodes click: list episodes of the clicked card
//! - `current_page` - Current page state, for initial paint

pub mod commands;

use std::sync::Arc;

use serde::Serialize;
use tvmaze_core::{ClientConfig, FlowOutcome, PageSnapshot, ShowBrowser, ShowFinder, TvMazeError};

/// Shared page controller managed by Tauri.
///
/// The controller never holds its page lock across a network request, so
/// commands run concurrently and the newest request of each flow wins.
pub struct BrowserState {
    browser: Arc<ShowBrowser<ShowFinder>>,
}

impl BrowserState {
    /// Create a BrowserState with default configuration.
    ///
    /// # Errors
    /// Returns an error string if the HTTP client cannot be created.
    pub fn new() -> Result<Self, String> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a BrowserState configured from `TVMAZE_*` environment variables.
    pub fn from_env() -> Result<Self, String> {
        let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
        Self::with_config(config)
    }

    /// Create a BrowserState with a custom client configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, String> {
        let finder = ShowFinder::with_config(config).map_err(|e| e.to_string())?;
        Ok(Self {
            browser: Arc::new(ShowBrowser::new(finder)),
        })
    }

    /// Get a reference to the inner controller.
    pub fn browser(&self) -> &Arc<ShowBrowser<ShowFinder>> {
        &self.browser
    }
}

/// What a command hands back to the page
#[derive(Debug, Clone, Serialize)]
pub struct CommandReply {
    /// Whether the response was rendered or dropped as stale; None when the
    /// request failed and the page carries a notice instead
    pub outcome: Option<FlowOutcome>,
    /// Page state to display
    pub page: PageSnapshot,
}

/// Run a flow and package the page state for the frontend.
///
/// Fetch failures are not command errors: the page keeps its previous state
/// and carries a notice. Anything else is returned as an error string.
pub(crate) async fn reply(
    browser: &ShowBrowser<ShowFinder>,
    result: Result<FlowOutcome, TvMazeError>,
) -> Result<CommandReply, String> {
    let outcome = match result {
        Ok(outcome) => Some(outcome),
        Err(err) if err.is_fetch_failure() => None,
        Err(err) => return Err(err.to_string()),
    };

    Ok(CommandReply {
        outcome,
        page: browser.snapshot().await,
    })
}
