//! Display-time rollups for the detail views
//!
//! These summaries run over an already-filtered trade slice (one ticker or
//! one politician) and use the lenient amount parser: unlike the ingest-time
//! aggregates, a bare dollar figure still counts here. The two parsers are
//! deliberately distinct; see `normalize::parse_amount_lenient`.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Trade, TradeType};
use crate::normalize::parse_amount_lenient;

/// Total buy and sell volume across one ticker's trades.
pub fn stock_volume(trades: &[Trade]) -> (Decimal, Decimal) {
    let mut buy = Decimal::ZERO;
    let mut sell = Decimal::ZERO;
    for trade in trades {
        let value = parse_amount_lenient(&trade.amount_raw);
        match trade.trade_type {
            TradeType::Purchase => buy += value,
            TradeType::Sale => sell += value,
            TradeType::Exchange | TradeType::Unknown => {}
        }
    }
    (buy, sell)
}

/// Net exposure per ticker for one politician's trades: buys minus sells,
/// filtered to positive positions, largest first.
pub fn politician_exposure(trades: &[Trade]) -> Vec<(String, Decimal)> {
    let mut net: HashMap<String, Decimal> = HashMap::new();
    for trade in trades {
        let value = parse_amount_lenient(&trade.amount_raw);
        match trade.trade_type {
            TradeType::Purchase => *net.entry(trade.ticker.clone()).or_default() += value,
            TradeType::Sale => *net.entry(trade.ticker.clone()).or_default() -= value,
            TradeType::Exchange | TradeType::Unknown => {}
        }
    }
    let mut positions: Vec<(String, Decimal)> = net
        .into_iter()
        .filter(|(_, value)| *value > Decimal::ZERO)
        .collect();
    positions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    positions
}

/// Expand a raw party code into a display name. Unrecognized codes pass
/// through unchanged.
pub fn party_display(party: &str) -> String {
    let upper = party.to_uppercase();
    if upper == "D" || upper.contains("DEM") {
        "Democrat".to_string()
    } else if upper == "R" || upper.contains("REP") {
        "Republican".to_string()
    } else {
        party.to_string()
    }
}
