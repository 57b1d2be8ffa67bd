use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Marker for card payments at the terminal, the only unstructured format we
/// recognize.
const CARD_MARKER: &str = "BEA";

/// Unstructured descriptions delimit fields with runs of two or more spaces.
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Decode a raw transaction description into its semantic sub-fields.
///
/// Two mutually exclusive grammars, discriminated by the leading character:
/// a `/`-delimited label/value format (SEPA-style), and a space-run-delimited
/// card-payment format. Anything else yields an empty map; unmatched input is
/// "all fields unknown", never an error. Non-card unstructured formats are
/// deliberately unrecognized: this importer targets one bank's exports.
pub fn parse_description(raw: &str) -> HashMap<String, String> {
    if raw.starts_with('/') {
        parse_structured(raw)
    } else {
        parse_unstructured(raw)
    }
}

/// `/LABEL/value/LABEL/value/...` — blank segments are discarded and the
/// remainder consumed pairwise. A trailing unpaired segment is dropped.
/// Labels keep the case the bank emitted; consumers match them
/// case-insensitively.
fn parse_structured(raw: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let mut segments = raw.split('/').map(str::trim).filter(|s| !s.is_empty());
    while let (Some(label), Some(value)) = (segments.next(), segments.next()) {
        fields.insert(label.to_string(), value.to_string());
    }
    fields
}

fn parse_unstructured(raw: &str) -> HashMap<String, String> {
    let tokens: Vec<&str> = SPACE_RUN
        .split(raw)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let mut fields = HashMap::new();
    if tokens.len() < 2 || !tokens[0].starts_with(CARD_MARKER) {
        return fields;
    }

    fields.insert("trtp".to_string(), tokens[0].to_string());
    match tokens[1].split_once(',') {
        Some((name, account)) => {
            fields.insert("name".to_string(), name.trim().to_string());
            fields.insert("account".to_string(), account.trim().to_string());
        }
        None => {
            fields.insert("name".to_string(), tokens[1].to_string());
        }
    }
    if let Some(last) = tokens.last() {
        fields.insert("location".to_string(), last.to_string());
    }
    fields
}
