//! Main show lookup API
//!
//! This module provides the high-level API for the TVmaze endpoints the
//! browser uses. It combines the HTTP client with the JSON parsers to
//! search shows by keyword and list the episodes of one show.

use async_trait::async_trait;

use crate::client::{ClientConfig, TvMazeClient};
use crate::error::{Result, TvMazeError};
use crate::parser::{parse_episodes, parse_search_results};
use crate::types::{EpisodeSummary, ShowSummary};

/// Source of show and episode summaries.
///
/// The controller talks to this trait rather than to the HTTP client so it
/// can be driven without a network.
#[async_trait]
pub trait ShowSource: Send + Sync {
    /// Search shows matching a free-text term, in API order.
    async fn search_shows(&self, term: &str) -> Result<Vec<ShowSummary>>;

    /// List every episode of the show with the given ID, in API order.
    async fn list_episodes(&self, show_id: u32) -> Result<Vec<EpisodeSummary>>;
}

/// Show lookup backed by the TVmaze API
///
/// All operations are asynchronous and issue exactly one request.
///
/// # Example
/// ```no_run
/// use tvmaze_core::ShowFinder;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let finder = ShowFinder::new()?;
///
///     let shows = finder.search_shows("batman").await?;
///     println!("Found {} shows", shows.len());
///
///     Ok(())
/// }
/// ```
pub struct ShowFinder {
    client: TvMazeClient,
}

impl ShowFinder {
    /// Create a new finder with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(TvMazeClient::new()?))
    }

    /// Create a new finder from a client configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(TvMazeClient::with_config(config)?))
    }

    /// Create a new finder with a custom client.
    ///
    /// This is useful for testing against a local mock server.
    pub fn with_client(client: TvMazeClient) -> Self {
        Self { client }
    }

    /// Search for shows by keyword.
    ///
    /// The term is sent as-is (URL encoded), including the empty string;
    /// the API decides what an empty query returns.
    ///
    /// # Returns
    /// * `Ok(Vec<ShowSummary>)` in the API's relevance order
    /// * `Err(TvMazeError)` on network failure, non-2xx status or bad payload
    ///
    /// # Example
    /// ```no_run
    /// use tvmaze_core::ShowFinder;
    ///
    /// # async fn example() -> Result<(), tvmaze_core::TvMazeError> {
    /// let finder = ShowFinder::new()?;
    /// for show in finder.search_shows("batman").await? {
    ///     println!("{} ({})", show.name, show.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_shows(&self, term: &str) -> Result<Vec<ShowSummary>> {
        let path = format!("/search/shows?q={}", urlencoding::encode(term));
        let json = self.client.fetch(&path).await?;

        parse_search_results(&json)
    }

    /// Get all episodes for a show.
    ///
    /// # Returns
    /// * `Ok(Vec<EpisodeSummary>)` in API order
    /// * `Err(TvMazeError::InvalidId)` if show_id is 0
    pub async fn list_episodes(&self, show_id: u32) -> Result<Vec<EpisodeSummary>> {
        if show_id == 0 {
            return Err(TvMazeError::InvalidId(show_id));
        }

        let path = format!("/shows/{}/episodes", show_id);
        let json = self.client.fetch(&path).await?;

        parse_episodes(&json)
    }
}

#[async_trait]
impl ShowSource for ShowFinder {
    async fn search_shows(&self, term: &str) -> Result<Vec<ShowSummary>> {
        ShowFinder::search_shows(self, term).await
    }

    async fn list_episodes(&self, show_id: u32) -> Result<Vec<EpisodeSummary>> {
        ShowFinder::list_episodes(self, show_id).await
    }
}
