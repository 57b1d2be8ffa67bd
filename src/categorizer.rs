use regex::Regex;
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::{GuilderError, Result};
use crate::models::StagedRow;

pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Built-in rule set, in priority order: the first category whose keyword
/// alternation matches a normalized name wins.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    ("food", &["albert heijn", "jumbo", "lidl", "spar", "aldi", "dirk", "plus", "coop", "ah"]),
    ("travel", &["ns reizigers", "swapfiets"]),
    ("stationery", &["bruna"]),
    ("household", &["action", "blokker", "hema", "ikea", "media markt", "coolblue", "bolcom"]),
    ("eating out", &["mcdonalds", "kfc", "burger king", "cafeteria", "restaurant", "cafe"]),
    ("insurance", &["vgz"]),
    ("rent", &["huur", "real estate"]),
    ("subscription", &["spotify", "google", "subscriptions"]),
];

/// One entry of a user-supplied rules file: a JSON array of these, in
/// priority order.
#[derive(Debug, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

/// Ordered keyword rules with the per-category alternations compiled once.
pub struct RuleSet {
    rules: Vec<(String, Regex)>,
}

impl RuleSet {
    pub fn from_rules(rules: &[CategoryRule]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let alternation = rule
                .keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&alternation)
                .map_err(|e| GuilderError::Other(format!("Bad category rule: {e}")))?;
            compiled.push((rule.category.clone(), re));
        }
        Ok(RuleSet { rules: compiled })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let rules: Vec<CategoryRule> = serde_json::from_str(raw)
            .map_err(|e| GuilderError::Settings(format!("Invalid rules file: {e}")))?;
        Self::from_rules(&rules)
    }

    /// Rule set from the settings-referenced rules file, or the built-in
    /// default when none is configured.
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json(&std::fs::read_to_string(p)?),
            None => Ok(Self::default()),
        }
    }

    /// Return exactly one category label for a counterparty name. Substring
    /// matching against the normalized name, first matching category wins.
    pub fn assign(&self, name: &str) -> &str {
        let normalized = normalize_name(name);
        for (category, alternation) in &self.rules {
            if alternation.is_match(&normalized) {
                return category;
            }
        }
        UNKNOWN_CATEGORY
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(label, _)| label.as_str())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        let rules: Vec<CategoryRule> = DEFAULT_RULES
            .iter()
            .map(|(category, keywords)| CategoryRule {
                category: category.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        // The built-in keywords are plain lowercase literals.
        Self::from_rules(&rules).unwrap()
    }
}

/// Fold a counterparty name down to lowercase ascii letters and single
/// spaces: decompose accents to base letters, drop everything else, collapse
/// whitespace runs, trim.
pub fn normalize_name(name: &str) -> String {
    let decomposed: String = name.nfkd().collect();
    let filtered: String = decomposed
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Batch step of the ingest pipeline: write a category into every staged row.
pub fn categorize(rules: &RuleSet, rows: &mut [StagedRow]) {
    for row in rows.iter_mut() {
        row.category = rules.assign(&row.name).to_string();
    }
}
