//! Rendering of show cards and episode lists
//!
//! The two display regions are explicit handles passed into the render
//! functions. Both renders replace their region wholesale; nothing is ever
//! patched in place.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TvMazeError};
use crate::types::{EpisodeSummary, ShowSummary};

/// Attribute carrying the show ID on each card
pub const SHOW_ID_ATTR: &str = "data-show-id";

/// Class of the per-card Episodes control, used for delegated clicks
pub const EPISODES_BUTTON_CLASS: &str = "Show-getEpisodes";

/// One rendered show card.
///
/// The show ID is stored only in the card's markup, the same way a page
/// keeps it on the element, and is read back when the card is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowCard {
    html: String,
}

impl ShowCard {
    /// Render a card for one show.
    pub fn render(show: &ShowSummary) -> Self {
        let name = escape_html(&show.name);
        let html = format!(
            r#"<div {attr}="{id}" class="Show col-md-12 col-lg-6 mb-4">
  <div class="media">
    <img src="{image}" alt="{name}" class="w-25 me-3">
    <div class="media-body">
      <h5 class="text-primary">{name}</h5>
      <div><small>{summary}</small></div>
      <button class="btn btn-outline-light btn-sm {button}">Episodes</button>
    </div>
  </div>
</div>"#,
            attr = SHOW_ID_ATTR,
            id = show.id,
            image = escape_html(&show.image),
            name = name,
            summary = show.summary.as_deref().unwrap_or_default(),
            button = EPISODES_BUTTON_CLASS,
        );

        Self { html }
    }

    /// Card markup
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Read the show ID stored on this card.
    ///
    /// # Errors
    /// Returns `TvMazeError::MissingShowId` if the markup carries no
    /// parseable `data-show-id` attribute.
    pub fn show_id(&self) -> Result<u32> {
        show_id_from_markup(&self.html)
    }
}

/// Find the show ID on the first `div.Show` card element in the markup.
///
/// Elements inside the card (summary markup included) are never consulted.
pub fn show_id_from_markup(html: &str) -> Result<u32> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(&format!("div.Show[{}]", SHOW_ID_ATTR))
        .map_err(|e| TvMazeError::ParseError(format!("Invalid selector: {:?}", e)))?;

    fragment
        .select(&selector)
        .next()
        .and_then(|card| card.value().attr(SHOW_ID_ATTR))
        .and_then(|id| id.trim().parse().ok())
        .ok_or(TvMazeError::MissingShowId)
}

/// One rendered episode line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeItem {
    text: String,
}

impl EpisodeItem {
    /// Render an item reading `<name> (season <season>, number <number>)`.
    pub fn render(episode: &EpisodeSummary) -> Self {
        Self {
            text: episode.to_string(),
        }
    }

    /// Plain text of the item
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `<li>` markup of the item
    pub fn html(&self) -> String {
        format!("<li>{}</li>", escape_html(&self.text))
    }
}

/// The always-visible container of show cards
///
/// `generation` counts renders, so a card position can be tied to the card
/// list it was taken from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowsRegion {
    cards: Vec<ShowCard>,
    generation: u64,
}

impl ShowsRegion {
    /// Number of show list renders so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cards currently displayed, in render order
    pub fn cards(&self) -> &[ShowCard] {
        &self.cards
    }

    /// Card at a display position
    pub fn card(&self, index: usize) -> Option<&ShowCard> {
        self.cards.get(index)
    }

    /// Markup of the whole container contents
    pub fn html(&self) -> String {
        self.cards
            .iter()
            .map(ShowCard::html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The episode panel, hidden until first populated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodesRegion {
    items: Vec<EpisodeItem>,
    visible: bool,
}

impl EpisodesRegion {
    /// Items currently listed, in render order
    pub fn items(&self) -> &[EpisodeItem] {
        &self.items
    }

    /// Whether the panel is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide the panel, keeping its items.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Markup of the episode list contents
    pub fn html(&self) -> String {
        self.items
            .iter()
            .map(EpisodeItem::html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Replace every displayed card with one card per show, in order.
pub fn render_show_list(region: &mut ShowsRegion, shows: &[ShowSummary]) {
    region.cards.clear();
    region.cards.extend(shows.iter().map(ShowCard::render));
    region.generation += 1;
}

/// Replace the episode list with one item per episode, then reveal the panel.
pub fn render_episode_list(region: &mut EpisodesRegion, episodes: &[EpisodeSummary]) {
    region.items.clear();
    region.items.extend(episodes.iter().map(EpisodeItem::render));
    region.visible = true;
}

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
