//! Page controller wiring user actions to lookups and renders
//!
//! `ShowBrowser` owns the displayed page. Each user action runs one flow:
//! - form submit: search, hide the episode panel, render the show cards
//! - Episodes click: read the card's show ID, list episodes, render them
//!
//! Every flow issues a request token before going to the network. A response
//! is applied only if its token is still the newest one issued for that flow,
//! so a slow answer to an older request can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{Result, TvMazeError};
use crate::finder::ShowSource;
use crate::view::{render_episode_list, render_show_list, EpisodesRegion, ShowsRegion};

/// Monotonically increasing request tokens for one flow
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: AtomicU64,
}

impl RequestTokens {
    /// Issue a token newer than every token issued before.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether no newer token has been issued since `token`.
    pub fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}

/// Everything currently displayed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Show cards container
    pub shows: ShowsRegion,
    /// Episode panel
    pub episodes: EpisodesRegion,
    /// Visible, non-fatal error notice
    pub notice: Option<String>,
}

/// Serializable view of the page for the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Markup of each show card, in order
    pub show_cards: Vec<String>,
    /// Render generation of `show_cards`, echoed back on Episodes clicks
    pub shows_generation: u64,
    /// Text of each episode line, in order
    pub episodes: Vec<String>,
    /// Whether the episode panel is shown
    pub episodes_visible: bool,
    /// Error notice to display, if any
    pub notice: Option<String>,
}

impl From<&Page> for PageSnapshot {
    fn from(page: &Page) -> Self {
        Self {
            show_cards: page
                .shows
                .cards()
                .iter()
                .map(|card| card.html().to_string())
                .collect(),
            shows_generation: page.shows.generation(),
            episodes: page
                .episodes
                .items()
                .iter()
                .map(|item| item.text().to_string())
                .collect(),
            episodes_visible: page.episodes.is_visible(),
            notice: page.notice.clone(),
        }
    }
}

/// How a completed flow affected the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowOutcome {
    /// The response was rendered
    Applied,
    /// A newer request was issued meanwhile; the response was dropped
    Superseded,
}

/// Controller owning the displayed page
pub struct ShowBrowser<S> {
    source: S,
    page: Mutex<Page>,
    search_tokens: RequestTokens,
    episode_tokens: RequestTokens,
}

impl<S: ShowSource> ShowBrowser<S> {
    /// Create a controller with an empty page.
    pub fn new(source: S) -> Self {
        Self {
            source,
            page: Mutex::new(Page::default()),
            search_tokens: RequestTokens::default(),
            episode_tokens: RequestTokens::default(),
        }
    }

    /// Underlying show source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Copy of the current page
    pub async fn page(&self) -> Page {
        self.page.lock().await.clone()
    }

    /// Serializable snapshot of the current page
    pub async fn snapshot(&self) -> PageSnapshot {
        PageSnapshot::from(&*self.page.lock().await)
    }

    /// Handle a search form submission.
    ///
    /// On success the episode panel is hidden before the new cards are
    /// rendered, so stale episodes never sit next to new results.
    ///
    /// # Errors
    /// Fetch failures leave the page as it was, post a notice and are
    /// returned to the caller.
    pub async fn submit_search(&self, term: &str) -> Result<FlowOutcome> {
        let token = self.search_tokens.issue();
        let result = self.source.search_shows(term).await;

        let mut page = self.page.lock().await;
        if !self.search_tokens.is_latest(token) {
            tracing::debug!(token, term, "dropping superseded search response");
            return Ok(FlowOutcome::Superseded);
        }

        match result {
            Ok(shows) => {
                // Episode answers still in flight belong to the old cards.
                self.episode_tokens.issue();
                page.episodes.hide();
                render_show_list(&mut page.shows, &shows);
                page.notice = None;
                tracing::info!(term, count = shows.len(), "rendered show list");
                Ok(FlowOutcome::Applied)
            }
            Err(err) => Err(Self::post_notice(&mut page, "Search", err)),
        }
    }

    /// Handle a click on the Episodes control of the card at `card_index`
    /// in the show list rendered as `generation`.
    ///
    /// The show ID is read off that exact card. A click on a card from a
    /// list that has since been replaced is rejected without a request.
    ///
    /// # Errors
    /// - `TvMazeError::StaleCard` if `generation` is not the displayed list
    /// - `TvMazeError::CardNotFound` if no card is displayed at the index
    /// - `TvMazeError::MissingShowId` if the card lost its ID
    /// - Fetch failures, which also post a notice
    pub async fn click_episodes(&self, generation: u64, card_index: usize) -> Result<FlowOutcome> {
        let show_id = {
            let page = self.page.lock().await;
            let current = page.shows.generation();
            if generation != current {
                return Err(TvMazeError::StaleCard {
                    clicked: generation,
                    current,
                });
            }
            page.shows
                .card(card_index)
                .ok_or(TvMazeError::CardNotFound(card_index))?
                .show_id()?
        };
        tracing::debug!(card_index, show_id, "fetching episodes for card");

        self.show_episodes(show_id).await
    }

    /// Fetch and display the episodes of a show.
    pub async fn show_episodes(&self, show_id: u32) -> Result<FlowOutcome> {
        let token = self.episode_tokens.issue();
        let result = self.source.list_episodes(show_id).await;

        let mut page = self.page.lock().await;
        if !self.episode_tokens.is_latest(token) {
            tracing::debug!(token, show_id, "dropping superseded episodes response");
            return Ok(FlowOutcome::Superseded);
        }

        match result {
            Ok(episodes) => {
                render_episode_list(&mut page.episodes, &episodes);
                page.notice = None;
                tracing::info!(show_id, count = episodes.len(), "rendered episode list");
                Ok(FlowOutcome::Applied)
            }
            Err(err) => Err(Self::post_notice(&mut page, "Episode lookup", err)),
        }
    }

    fn post_notice(page: &mut Page, action: &str, err: TvMazeError) -> TvMazeError {
        tracing::warn!(error = %err, "{} failed", action);
        if err.is_fetch_failure() {
            page.notice = Some(format!("{} failed: {}", action, err));
        }
        err
    }
}
