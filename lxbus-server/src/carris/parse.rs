//! Arrival table parsing from provider email bodies.
//!
//! A Carris reply body is an HTML document containing one table of
//! arrivals, four cells per row: route, destination, wait minutes,
//! and the provider's estimated arrival time. Header rows use `<th>`
//! cells and fall out naturally; a table with no data rows is a valid
//! "no buses" reply.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use crate::domain::ArrivalEntry;

use super::error::ParseError;

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<table[\s>]").expect("table pattern is valid"));

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("row pattern is valid"));

static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("cell pattern is valid"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digits pattern is valid"));

/// Parse the arrival entries out of a provider reply body.
///
/// Returns an empty vector for a well-formed reply that reports no
/// buses. Rows without exactly four data cells (headers, separators,
/// footer noise) are skipped rather than failing the whole body.
pub fn parse_arrivals(body: &str) -> Result<Vec<ArrivalEntry>, ParseError> {
    if body.trim().is_empty() {
        return Err(ParseError::EmptyBody);
    }
    if !TABLE_RE.is_match(body) {
        return Err(ParseError::MissingTable);
    }

    let decoded_at = Utc::now();
    let mut entries = Vec::new();

    for row in ROW_RE.captures_iter(body) {
        let cells: Vec<String> = CELL_RE
            .captures_iter(&row[1])
            .map(|c| clean_cell(&c[1]))
            .collect();

        let [bus_number, destination, eta, provider_timestamp] = cells.as_slice() else {
            continue;
        };

        entries.push(ArrivalEntry {
            bus_number: bus_number.clone(),
            destination: destination.clone(),
            eta_minutes: parse_eta(eta),
            provider_timestamp: provider_timestamp.clone(),
            last_modified: decoded_at,
        });
    }

    Ok(entries)
}

/// Best-effort ETA: first run of digits in the cell, if any.
///
/// The provider writes anything from "5" to "5 min" to "---" here.
fn parse_eta(cell: &str) -> Option<u32> {
    DIGITS_RE.find(cell)?.as_str().parse().ok()
}

/// Strip nested markup and entities from a cell, collapsing whitespace.
fn clean_cell(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
