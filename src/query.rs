//! Read-only queries over a built catalog
//!
//! Everything here is a pure, synchronous read over the catalog snapshot
//! (plus the bookmark sets for the personalized feed). Collections are in
//! the low thousands, so linear scans are fine inline.

use itertools::Itertools;
use std::sync::Arc;

use crate::bookmarks::BookmarkStore;
use crate::catalog::Catalog;
use crate::models::{StockSummary, Trade};

/// Fallback company name when a ticker is missing from the directory.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// How many entries an empty search shows. An empty query is a capped
/// default view, not "everything".
const DEFAULT_VIEW_LIMIT: usize = 100;

/// Which index a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Match trades on representative name or ticker.
    Trades,
    /// Match distinct stocks on ticker or company name.
    Stocks,
}

/// Result of a scoped search.
#[derive(Debug)]
pub enum SearchResults {
    Trades(Vec<Trade>),
    Stocks(Vec<StockSummary>),
}

pub struct QueryEngine {
    catalog: Arc<Catalog>,
}

impl QueryEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Search the catalog. Empty text returns the first 100 entries of the
    /// scoped index in catalog order; non-empty text matches case-insensitive
    /// substrings with no cap.
    pub fn search(&self, text: &str, scope: SearchScope) -> SearchResults {
        if text.is_empty() {
            return match scope {
                SearchScope::Trades => SearchResults::Trades(
                    self.catalog
                        .trades
                        .iter()
                        .take(DEFAULT_VIEW_LIMIT)
                        .cloned()
                        .collect(),
                ),
                SearchScope::Stocks => SearchResults::Stocks(
                    self.all_stocks().into_iter().take(DEFAULT_VIEW_LIMIT).collect(),
                ),
            };
        }

        let needle = text.to_lowercase();
        match scope {
            SearchScope::Trades => SearchResults::Trades(
                self.catalog
                    .trades
                    .iter()
                    .filter(|t| {
                        t.representative.to_lowercase().contains(&needle)
                            || t.ticker.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect(),
            ),
            SearchScope::Stocks => SearchResults::Stocks(
                self.all_stocks()
                    .into_iter()
                    .filter(|s| {
                        s.ticker.to_lowercase().contains(&needle)
                            || s.company.to_lowercase().contains(&needle)
                    })
                    .sorted_by(|a, b| a.ticker.cmp(&b.ticker))
                    .collect(),
            ),
        }
    }

    /// All trades filed by one politician, exact name match, catalog order.
    pub fn trades_for_politician(&self, name: &str) -> Vec<Trade> {
        self.catalog
            .trades
            .iter()
            .filter(|t| t.representative == name)
            .cloned()
            .collect()
    }

    /// All trades in one ticker, exact match, catalog order.
    pub fn trades_for_ticker(&self, ticker: &str) -> Vec<Trade> {
        self.catalog
            .trades
            .iter()
            .filter(|t| t.ticker == ticker)
            .cloned()
            .collect()
    }

    /// Trades restricted to bookmarked tickers and politicians. With nothing
    /// bookmarked the feed is empty, never "show everything".
    pub fn personalized_feed(&self, bookmarks: &BookmarkStore) -> Vec<Trade> {
        if bookmarks.is_empty() {
            return Vec::new();
        }
        self.catalog
            .trades
            .iter()
            .filter(|t| {
                bookmarks.is_ticker_saved(&t.ticker)
                    || bookmarks.is_politician_saved(&t.representative)
            })
            .cloned()
            .collect()
    }

    /// Directory lookup; absent tickers get a sentinel, never an error.
    pub fn company_name(&self, ticker: &str) -> String {
        self.catalog
            .stock_directory
            .get(ticker)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
    }

    fn all_stocks(&self) -> Vec<StockSummary> {
        self.catalog
            .stock_directory
            .iter()
            .map(|(ticker, company)| StockSummary {
                ticker: ticker.clone(),
                company: company.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::{BookmarkStore, MemoryStore};
    use crate::catalog::Catalog;

    fn engine() -> QueryEngine {
        let source = [
            "header",
            "AAPL,,Apple Inc,2024-01-15,Purchase,\"$1,001 - $15,000\",,,,\"Pelosi, Nancy\",,,D,,House",
            "MSFT,,Microsoft,2024-02-01,Sale,\"$15,001 - $50,000\",,,,Rep. Jane Smith,,,R,,House",
            "AAPL,,Apple Inc,2024-02-10,Sale,\"$1,001 - $15,000\",,,,Rep. Jane Smith,,,R,,House",
        ]
        .join("\n");
        QueryEngine::new(Arc::new(Catalog::build(&source)))
    }

    fn empty_bookmarks() -> BookmarkStore {
        BookmarkStore::load(Box::new(MemoryStore::default())).unwrap()
    }

    #[test]
    fn test_search_trades_matches_name_or_ticker() {
        let q = engine();
        let SearchResults::Trades(hits) = q.search("pelosi", SearchScope::Trades) else {
            panic!("expected trades");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].ticker, "AAPL");

        let SearchResults::Trades(hits) = q.search("aapl", SearchScope::Trades) else {
            panic!("expected trades");
        };
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_search_empty_text_is_capped_default_view() {
        let q = engine();
        let SearchResults::Trades(hits) = q.search("", SearchScope::Trades) else {
            panic!("expected trades");
        };
        // All three fit under the cap, catalog order preserved
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].ticker, "AAPL");

        let SearchResults::Stocks(stocks) = q.search("", SearchScope::Stocks) else {
            panic!("expected stocks");
        };
        assert_eq!(stocks.len(), 2);
    }

    #[test]
    fn test_search_stocks_sorted_by_ticker() {
        let q = engine();
        let SearchResults::Stocks(stocks) = q.search("o", SearchScope::Stocks) else {
            panic!("expected stocks");
        };
        // Only "Microsoft" contains an 'o'
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].ticker, "MSFT");

        let SearchResults::Stocks(stocks) = q.search("a", SearchScope::Stocks) else {
            panic!("expected stocks");
        };
        let tickers: Vec<&str> = stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL"]);
    }

    #[test]
    fn test_trades_for_politician_exact_match() {
        let q = engine();
        assert_eq!(q.trades_for_politician("Jane Smith").len(), 2);
        // Exact, not case-insensitive
        assert!(q.trades_for_politician("jane smith").is_empty());
    }

    #[test]
    fn test_trades_for_ticker_preserves_order() {
        let q = engine();
        let trades = q.trades_for_ticker("AAPL");
        assert_eq!(trades.len(), 2);
        assert!(trades[0].id < trades[1].id);
    }

    #[test]
    fn test_feed_empty_without_bookmarks() {
        let q = engine();
        let bookmarks = empty_bookmarks();
        assert!(q.personalized_feed(&bookmarks).is_empty());
    }

    #[test]
    fn test_feed_follows_tickers_and_politicians() {
        let q = engine();
        let mut bookmarks = empty_bookmarks();

        bookmarks.toggle_ticker("MSFT").unwrap();
        let feed = q.personalized_feed(&bookmarks);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].ticker, "MSFT");

        bookmarks.toggle_politician("Nancy Pelosi").unwrap();
        let feed = q.personalized_feed(&bookmarks);
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_company_name_sentinel() {
        let q = engine();
        assert_eq!(q.company_name("AAPL"), "Apple Inc");
        assert_eq!(q.company_name("ZZZZ"), UNKNOWN_COMPANY);
    }
}
