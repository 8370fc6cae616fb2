//! Ingestion pipeline and the derived in-memory indices
//!
//! One load consumes the whole source text and produces a [`Catalog`]: the
//! ordered trade list, the ticker directory and the buy-volume leaderboard.
//! The catalog is a read-only snapshot; a reload builds a whole new one and
//! never mutates a published catalog in place.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::importers::disclosure_csv::parse_row;
use crate::models::{PoliticianStats, Trade, TradeType};
use crate::normalize::{normalize_name, parse_amount};

/// Immutable snapshot of one ingestion run.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Accepted trades in source-file order.
    pub trades: Vec<Trade>,
    /// Ticker to company name; the last row mentioning a ticker wins, since
    /// the dump repeats tickers with inconsistent company spellings.
    pub stock_directory: HashMap<String, String>,
    /// Per-politician volume totals, buy volume descending. Only names with
    /// at least one resolvable amount appear here.
    pub leaderboard: Vec<PoliticianStats>,
}

#[derive(Default)]
struct VolumeTotals {
    buy: Decimal,
    sell: Decimal,
}

impl Catalog {
    /// Build a catalog from the full source text.
    ///
    /// The first line is the header and is discarded. Every other line is
    /// parsed and normalized independently; malformed rows and rows whose
    /// representative normalizes to an empty name are dropped, everything
    /// else degrades per field (date falls back to today, unresolvable
    /// amounts contribute nothing to the totals).
    pub fn build(source: &str) -> Catalog {
        let mut trades = Vec::new();
        let mut stock_directory: HashMap<String, String> = HashMap::new();
        let mut totals: HashMap<String, VolumeTotals> = HashMap::new();
        let mut skipped = 0usize;

        for line in source.lines().skip(1) {
            let Some(row) = parse_row(line) else {
                skipped += 1;
                continue;
            };

            let name = normalize_name(&row.raw_name);
            if name.is_empty() {
                debug!("dropping row with empty representative: {:?}", row.raw_name);
                skipped += 1;
                continue;
            }

            let resolved = parse_amount(&row.amount_raw);
            if resolved > Decimal::ZERO {
                let stat = totals.entry(name.clone()).or_default();
                match row.trade_type {
                    TradeType::Purchase => stat.buy += resolved,
                    TradeType::Sale => stat.sell += resolved,
                    // Exchanges and unknowns stay out of the volume totals
                    TradeType::Exchange | TradeType::Unknown => {}
                }
            }

            stock_directory.insert(row.ticker.clone(), row.company.clone());

            trades.push(Trade {
                id: trades.len() as u64,
                ticker: row.ticker,
                company: row.company,
                date: row.date,
                trade_type: row.trade_type,
                amount_raw: row.amount_raw,
                representative: name,
                party: row.party,
                chamber: row.chamber,
            });
        }

        let mut leaderboard: Vec<PoliticianStats> = totals
            .into_iter()
            .map(|(name, v)| PoliticianStats {
                name,
                buy_volume: v.buy,
                sell_volume: v.sell,
            })
            .collect();
        // Buy volume descending; name breaks ties so one run's order is
        // reproducible in the next.
        leaderboard.sort_by(|a, b| {
            b.buy_volume
                .cmp(&a.buy_volume)
                .then_with(|| a.name.cmp(&b.name))
        });

        info!(
            "catalog built: {} trades, {} tickers, {} ranked politicians ({} rows skipped)",
            trades.len(),
            stock_directory.len(),
            leaderboard.len(),
            skipped
        );

        Catalog {
            trades,
            stock_directory,
            leaderboard,
        }
    }

    /// Read the source file and build a catalog from it. The only fatal
    /// condition is failing to read the file at all.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        info!("loading disclosure file: {:?}", path);
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read disclosure file {:?}", path))?;
        Ok(Catalog::build(&source))
    }
}

/// Observable state of a background load. `Failed` is distinct from
/// `Loading` so a consumer never confuses a dead load with a slow one.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Catalog>),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Run the ingestion off the interactive path and publish the finished
/// catalog atomically. Subscribers only ever observe `Loading`, then exactly
/// one transition to `Ready` or `Failed`; a partially built catalog is never
/// visible.
pub fn spawn_load(path: PathBuf) -> watch::Receiver<LoadState> {
    let (tx, rx) = watch::channel(LoadState::Loading);

    tokio::task::spawn_blocking(move || {
        let state = match Catalog::load_from_file(&path) {
            Ok(catalog) => LoadState::Ready(Arc::new(catalog)),
            Err(err) => {
                warn!("load failed: {:#}", err);
                LoadState::Failed(format!("{:#}", err))
            }
        };
        // Receiver may already be gone; nothing to do then.
        let _ = tx.send(state);
    });

    rx
}

/// Await a background load started with [`spawn_load`].
pub async fn wait_ready(rx: &mut watch::Receiver<LoadState>) -> Result<Arc<Catalog>> {
    loop {
        match &*rx.borrow() {
            LoadState::Ready(catalog) => return Ok(Arc::clone(catalog)),
            LoadState::Failed(msg) => {
                return Err(crate::error::TrackerError::LoadFailed(msg.clone()).into())
            }
            LoadState::Loading => {}
        }
        rx.changed()
            .await
            .context("catalog loader dropped before publishing a result")?;
    }
}
