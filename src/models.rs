use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trade type as classified from the free-text disclosure field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TradeType {
    Purchase,
    Sale,
    Exchange,
    Unknown,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Purchase => "Purchase",
            TradeType::Sale => "Sale",
            TradeType::Exchange => "Exchange",
            TradeType::Unknown => "Unknown",
        }
    }

    /// Classify a raw type string by case-insensitive substring containment,
    /// in priority order. "Purchase (Partial)" still counts as a purchase.
    pub fn classify(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("purchase") {
            TradeType::Purchase
        } else if lower.contains("sale") {
            TradeType::Sale
        } else if lower.contains("exchange") {
            TradeType::Exchange
        } else {
            TradeType::Unknown
        }
    }
}

impl FromStr for TradeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PURCHASE" => Ok(TradeType::Purchase),
            "SALE" => Ok(TradeType::Sale),
            "EXCHANGE" => Ok(TradeType::Exchange),
            "UNKNOWN" => Ok(TradeType::Unknown),
            _ => Err(()),
        }
    }
}

/// One normalized disclosure record.
///
/// Two textually identical disclosures are distinct trades; `id` is a
/// synthetic per-load sequence number for addressing, never deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trade {
    pub id: u64,
    pub ticker: String,
    pub company: String,
    pub date: NaiveDate,
    pub trade_type: TradeType,
    /// Original disclosed range string, kept verbatim for display
    /// (e.g. "$1,001 - $15,000") even when it does not resolve to a number.
    pub amount_raw: String,
    /// Canonical representative name, the aggregation and search key.
    pub representative: String,
    pub party: String,
    pub chamber: String,
}

/// Per-politician buy/sell volume totals over resolved amounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoliticianStats {
    pub name: String,
    pub buy_volume: Decimal,
    pub sell_volume: Decimal,
}

/// Distinct (ticker, company) pair from the stock directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockSummary {
    pub ticker: String,
    pub company: String,
}
