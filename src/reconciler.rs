use std::sync::LazyLock;

use regex::Regex;

/// Relay keyword for request-to-pay payments whose real counterparty hides in
/// the remittance text.
const RELAY_KEYWORD: &str = "tikkie";
const RELAY_PREFIX: &str = "via";

/// Strips the "via <relay>" phrase out of a counterparty name.
static VIA_RELAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)via\s+tikkie").unwrap());

/// Relay remittance layout: two numeric tokens, the free-text memo, then an
/// alphanumeric code starting with two uppercase letters.
static RELAY_MEMO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s+\d+\s+(.*?)\s+[A-Z]{2}[0-9A-Za-z]+").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub name: String,
    pub remittance: Option<String>,
}

/// Recover a clean counterparty name and remittance text from relay-payment
/// noise. Rows without the relay keyword pass through unchanged.
pub fn reconcile(name: &str, remittance: &str) -> Reconciled {
    let lowered = name.to_lowercase();
    if !lowered.contains(RELAY_KEYWORD) {
        return Reconciled {
            name: name.to_string(),
            remittance: Some(remittance.to_string()),
        };
    }

    if lowered.contains(RELAY_PREFIX) {
        let stripped = VIA_RELAY.replace_all(name, " ");
        let clean_name = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        let memo = RELAY_MEMO
            .captures(remittance)
            .map(|c| c[1].trim().to_string());
        return Reconciled {
            name: clean_name,
            remittance: memo,
        };
    }

    // Relay keyword without the prefix: the real name rides in the remittance
    // text's comma-separated parts. The fixed parts[1] / parts[len-2]
    // indexing is kept as-is, including for more than two parts.
    let parts: Vec<&str> = remittance.split(',').map(str::trim).collect();
    if parts.len() >= 2 {
        return Reconciled {
            name: parts[parts.len() - 2].to_string(),
            remittance: Some(parts[1].to_string()),
        };
    }
    Reconciled {
        name: name.to_string(),
        remittance: Some(remittance.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_without_relay_keyword() {
        let r = reconcile("ALBERT HEIJN 1618", "GROCERIES");
        assert_eq!(r.name, "ALBERT HEIJN 1618");
        assert_eq!(r.remittance.as_deref(), Some("GROCERIES"));
    }

    #[test]
    fn test_via_relay_strips_phrase_and_extracts_memo() {
        let r = reconcile(
            "J Jansen via Tikkie",
            "0001234567 8765432 lunch last tuesday NL12RABO345",
        );
        assert_eq!(r.name, "J Jansen");
        assert_eq!(r.remittance.as_deref(), Some("lunch last tuesday"));
    }

    #[test]
    fn test_via_relay_is_case_insensitive() {
        let r = reconcile("J Jansen VIA TIKKIE", "11 22 beers NL00ABNA1");
        assert_eq!(r.name, "J Jansen");
        assert_eq!(r.remittance.as_deref(), Some("beers"));
    }

    #[test]
    fn test_via_relay_unmatched_memo_becomes_none() {
        let r = reconcile("J Jansen via Tikkie", "no numeric prefix here");
        assert_eq!(r.name, "J Jansen");
        assert_eq!(r.remittance, None);
    }

    #[test]
    fn test_relay_without_prefix_splits_remittance() {
        let r = reconcile("Tikkie", "0001234567, dinner, P de Vries, NLXX");
        // parts[len-2] and parts[1] by definition.
        assert_eq!(r.name, "P de Vries");
        assert_eq!(r.remittance.as_deref(), Some("dinner"));
    }

    #[test]
    fn test_relay_without_prefix_two_parts() {
        let r = reconcile("tikkie payment", "first, second");
        assert_eq!(r.name, "first");
        assert_eq!(r.remittance.as_deref(), Some("second"));
    }

    #[test]
    fn test_relay_without_prefix_single_part_passthrough() {
        let r = reconcile("Tikkie", "no commas at all");
        assert_eq!(r.name, "Tikkie");
        assert_eq!(r.remittance.as_deref(), Some("no commas at all"));
    }
}
