//! TVmaze Show Browser Core Library
//!
//! This crate provides the core functionality of a show browser backed by
//! the public TVmaze API.
//!
//! # Features
//! - Search for TV shows by keyword
//! - List the episodes of a show
//! - Render show cards and episode lists into replaceable page regions
//! - Page controller that only applies the newest response of each flow

pub mod client;
pub mod controller;
pub mod error;
pub mod finder;
pub mod parser;
pub mod types;
pub mod view;

// Re-export main types for convenience
pub use client::{ClientConfig, TvMazeClient};
pub use controller::{FlowOutcome, Page, PageSnapshot, RequestTokens, ShowBrowser};
pub use error::{Result, TvMazeError};
pub use finder::{ShowFinder, ShowSource};
pub use types::{EpisodeSummary, ShowSummary, MISSING_IMAGE_URL};
pub use view::{
    render_episode_list, render_show_list, EpisodeItem, EpisodesRegion, ShowCard, ShowsRegion,
};
