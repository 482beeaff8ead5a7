//! Tauri commands for the TVmaze show browser
//!
//! This module contains all Tauri commands that can be invoked from the frontend.

use tauri::State;

use crate::{reply, BrowserState, CommandReply};
use tvmaze_core::PageSnapshot;

/// Search for shows by keyword (search form submit).
///
/// # Arguments
/// * `term` - Contents of the search field, passed through unchanged
///
/// # Returns
/// * `Ok(CommandReply)` with the page to display
/// * `Err(String)` with error message for non-network failures
#[tauri::command]
pub async fn search_shows(
    state: State<'_, BrowserState>,
    term: String,
) -> Result<CommandReply, String> {
    let browser = state.browser();
    let result = browser.submit_search(&term).await;
    reply(browser, result).await
}

/// List episodes of the show on the clicked card.
///
/// # Arguments
/// * `shows_generation` - `shows_generation` of the snapshot the card came from
/// * `card_index` - Position of the card whose Episodes control was clicked
///
/// # Returns
/// * `Ok(CommandReply)` with the page to display
/// * `Err(String)` if the card is stale, does not exist or carries no show ID
#[tauri::command]
pub async fn show_episodes(
    state: State<'_, BrowserState>,
    shows_generation: u64,
    card_index: usize,
) -> Result<CommandReply, String> {
    let browser = state.browser();
    let result = browser.click_episodes(shows_generation, card_index).await;
    reply(browser, result).await
}

/// Get the page as currently displayed.
#[tauri::command]
pub async fn current_page(state: State<'_, BrowserState>) -> Result<PageSnapshot, String> {
    Ok(state.browser().snapshot().await)
}
