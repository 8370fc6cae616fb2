//! Row parser for the congressional trade-disclosure dump
//!
//! The source is comma-separated with optional double-quoted fields and a
//! fixed positional layout. Quoting in the dump is sloppy (no escape
//! convention), so splitting is a plain quote toggle rather than a full CSV
//! state machine; a conforming CSV reader would reject half the file.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::models::TradeType;
use crate::normalize::clean;

/// Zero-based positions of the columns the engine consumes. The dump carries
/// more columns than these; anything else in the row is ignored.
const COL_TICKER: usize = 0;
const COL_COMPANY: usize = 2;
const COL_DATE: usize = 3;
const COL_TYPE: usize = 4;
const COL_AMOUNT: usize = 5;
const COL_REPRESENTATIVE: usize = 9;
const COL_PARTY: usize = 12;
const COL_CHAMBER: usize = 14;

/// Rows shorter than this are blank trailing lines, not data.
const MIN_LINE_LEN: usize = 5;

/// A row must split into more columns than this to cover every consumed index.
const MIN_COLUMNS: usize = 12;

/// Raw column values extracted from one accepted source row.
///
/// Fields are cleaned (quote-stripped, trimmed) but not yet normalized;
/// the representative name here is still whatever the filing said.
#[derive(Debug, Clone)]
pub struct RawDisclosure {
    pub ticker: String,
    pub company: String,
    pub date: NaiveDate,
    pub trade_type: TradeType,
    pub amount_raw: String,
    pub raw_name: String,
    pub party: String,
    pub chamber: String,
}

/// Split one line on commas, treating commas inside double-quoted spans as
/// literal text. Quote characters toggle the in-quote flag and are kept in
/// the output; `clean` strips them later.
pub fn smart_split(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                result.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    result.push(current);
    result
}

/// Parse one non-header line into a [`RawDisclosure`], or `None` if the row
/// is malformed (too short or too few columns). Malformed rows are dropped
/// silently; the load carries on with the next line.
pub fn parse_row(line: &str) -> Option<RawDisclosure> {
    if line.len() < MIN_LINE_LEN {
        return None;
    }

    let cols = smart_split(line);
    if cols.len() <= MIN_COLUMNS {
        debug!("skipping short row ({} columns)", cols.len());
        return None;
    }

    let date_str = clean(&cols[COL_DATE]);
    let type_str = clean(&cols[COL_TYPE]);

    Some(RawDisclosure {
        ticker: clean(&cols[COL_TICKER]),
        company: clean(&cols[COL_COMPANY]),
        date: parse_date(&date_str),
        trade_type: TradeType::classify(&type_str),
        amount_raw: clean(&cols[COL_AMOUNT]),
        raw_name: clean(&cols[COL_REPRESENTATIVE]),
        party: clean(&cols[COL_PARTY]),
        chamber: cols.get(COL_CHAMBER).map(|c| clean(c)).unwrap_or_default(),
    })
}

/// Exact `YYYY-MM-DD`, falling back to today on failure. The aggregates
/// assume every accepted row carries a date, so an unparseable one never
/// rejects the row.
fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap_or_else(|_| {
        debug!("unparseable date {:?}, substituting today", date_str);
        Local::now().date_naive()
    })
}
