//! Field normalization for disclosure records
//!
//! Source rows carry free-text names ("Hon. Pelosi, Nancy") and dollar-range
//! amounts ("$1,001 - $15,000"). This module canonicalizes both so that
//! aggregation and search keys are stable across inconsistent filings.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Honorific prefixes that leak into the representative field.
const HONORIFICS: [&str; 7] = ["Mrs. ", "Mr. ", "Ms. ", "Dr. ", "Hon. ", "Rep. ", "Sen. "];

/// Upper bound above which a disclosed range is treated as corrupted data
/// (single trade brackets never reach 50M; larger values are filing IDs
/// or OCR garbage).
const MAX_RANGE_UPPER: u64 = 50_000_000;

/// Strip literal double quotes and trim surrounding whitespace.
pub fn clean(s: &str) -> String {
    s.replace('"', "").trim().to_string()
}

/// Canonicalize a raw representative name.
///
/// Cleans the field, drops a leading honorific, reorders "Last, First" into
/// "First Last", then applies a small set of substring overrides for names
/// the source spells inconsistently. The overrides run last and win.
/// An empty result means the row should be discarded by the caller.
pub fn normalize_name(raw: &str) -> String {
    let mut name = clean(raw);

    for title in HONORIFICS {
        if let Some(rest) = name.strip_prefix(title) {
            name = rest.to_string();
        }
    }

    if name.contains(',') {
        let mut parts = name.splitn(2, ',');
        if let (Some(last), Some(first)) = (parts.next(), parts.next()) {
            // A second comma and everything after it is noise; keep the
            // first segment of the remainder only.
            let first = first.split(',').next().unwrap_or(first);
            name = format!("{} {}", first.trim(), last.trim())
                .trim()
                .to_string();
        }
    }

    let lower = name.to_lowercase();
    if lower.contains("pelosi") {
        return "Nancy Pelosi".to_string();
    }
    if lower.contains("taylor greene") {
        return "Marjorie Taylor Greene".to_string();
    }
    if lower.contains("mccaul") {
        return "Michael T. McCaul".to_string();
    }

    name
}

/// Resolve a disclosed dollar range to its midpoint.
///
/// Only true two-sided ranges resolve; bare numbers are usually filing IDs
/// and resolve to zero so they never reach the aggregates. The original
/// text stays on the trade for display regardless.
pub fn parse_amount(raw: &str) -> Decimal {
    if !raw.contains('-') {
        return Decimal::ZERO;
    }
    match range_bounds(raw) {
        Some((_, high)) if high > Decimal::from(MAX_RANGE_UPPER) => Decimal::ZERO,
        Some((low, high)) => (low + high) / Decimal::TWO,
        None => Decimal::ZERO,
    }
}

/// Display-time variant used by the detail summaries: falls back to parsing
/// a bare number when the string is not a two-sided range.
///
/// This intentionally diverges from [`parse_amount`]; the source data model
/// treats bare numbers as garbage at ingest but still shows them in per-stock
/// and per-politician rollups.
pub fn parse_amount_lenient(raw: &str) -> Decimal {
    if let Some((low, high)) = range_bounds(raw) {
        return (low + high) / Decimal::TWO;
    }
    let cleaned = raw.replace('$', "").replace(',', "");
    Decimal::from_str(cleaned.trim()).unwrap_or(Decimal::ZERO)
}

fn range_bounds(raw: &str) -> Option<(Decimal, Decimal)> {
    let cleaned = raw.replace('$', "").replace(',', "");
    let parts: Vec<&str> = cleaned.split('-').collect();
    if parts.len() != 2 {
        return None;
    }

    let low = Decimal::from_str(parts[0].trim()).ok()?;
    let high = Decimal::from_str(parts[1].trim()).ok()?;

    Some((low, high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_clean_strips_quotes_and_whitespace() {
        assert_eq!(clean("  \"Apple Inc\" \n"), "Apple Inc");
        assert_eq!(clean("\"\""), "");
    }

    #[test]
    fn test_normalize_name_strips_honorific() {
        assert_eq!(normalize_name("Rep. Jane Smith"), "Jane Smith");
        assert_eq!(normalize_name("Dr. John Doe"), "John Doe");
        // Case-sensitive literal prefix: lowercase is left alone
        assert_eq!(normalize_name("rep. Jane Smith"), "rep. Jane Smith");
    }

    #[test]
    fn test_normalize_name_reorders_last_first() {
        assert_eq!(normalize_name("Smith, Jane"), "Jane Smith");
        assert_eq!(normalize_name("\"Doe, John\""), "John Doe");
        // Extra comma segments are dropped
        assert_eq!(normalize_name("Smith, Jane, Jr."), "Jane Smith");
    }

    #[test]
    fn test_normalize_name_overrides_win() {
        assert_eq!(normalize_name("Pelosi, Nancy"), "Nancy Pelosi");
        assert_eq!(normalize_name("Mrs. PELOSI"), "Nancy Pelosi");
        assert_eq!(
            normalize_name("Greene, Marjorie Taylor"),
            "Marjorie Taylor Greene"
        );
        assert_eq!(normalize_name("mccaul, michael"), "Michael T. McCaul");
    }

    #[test]
    fn test_normalize_name_empty() {
        assert_eq!(normalize_name("  \"\"  "), "");
    }

    #[test]
    fn test_parse_amount_midpoint() {
        assert_eq!(parse_amount("$1,001 - $15,000"), dec!(8000.5));
        assert_eq!(parse_amount("$15,001 - $50,000"), dec!(32500.5));
    }

    #[test]
    fn test_parse_amount_rejects_non_ranges() {
        // Bare numbers are filing IDs, not amounts
        assert_eq!(parse_amount("20026537"), Decimal::ZERO);
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("$1,000 - $5,000 - $9,000"), Decimal::ZERO);
        assert_eq!(parse_amount("$abc - $def"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_sanity_cap() {
        assert_eq!(parse_amount("$1 - $50,000,001"), Decimal::ZERO);
        assert_eq!(
            parse_amount("$1,000,000 - $50,000,000"),
            dec!(25500000)
        );
    }

    #[test]
    fn test_parse_amount_idempotent_and_bounded() {
        for raw in ["$1,001 - $15,000", "garbage", "500", "$1 - $5"] {
            let first = parse_amount(raw);
            assert_eq!(first, parse_amount(raw));
            assert!(first >= Decimal::ZERO);
            assert!(first <= Decimal::from(50_000_000u64));
        }
    }

    #[test]
    fn test_parse_amount_lenient_bare_number_fallback() {
        assert_eq!(parse_amount_lenient("$1,001 - $15,000"), dec!(8000.5));
        assert_eq!(parse_amount_lenient("$500"), dec!(500));
        assert_eq!(parse_amount_lenient("garbage"), Decimal::ZERO);
        // No sanity cap on the display path
        assert_eq!(parse_amount_lenient("$0 - $100,000,000"), dec!(50000000));
    }
}
