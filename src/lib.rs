//! Congresswatch - congressional trade-disclosure tracker
//!
//! This library ingests a flat file of legislative financial-disclosure
//! trade records, normalizes the messy source fields (names, dates,
//! dollar-range amounts), and serves the result as an in-memory dataset
//! for search, per-politician aggregation and a personalized watch-list feed.

pub mod bookmarks;
pub mod catalog;
pub mod error;
pub mod importers;
pub mod models;
pub mod normalize;
pub mod query;
pub mod reports;
