//! Lexical entity extraction from query text.
//!
//! A gazetteer of known markets plus small regex families for city/state
//! mentions, property references, metric names, and agent names. Nothing
//! here errors: a query with no recognizable entities yields an empty set,
//! which the graph retriever treats as its fallback code path.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use acre_core::models::{EntityType, ExtractedEntity};

/// Known markets, matched case-insensitively on word boundaries and
/// normalized to `"City, ST"`.
const GAZETTEER: [(&str, &str); 10] = [
    ("austin", "Austin, TX"),
    ("dallas", "Dallas, TX"),
    ("houston", "Houston, TX"),
    ("san antonio", "San Antonio, TX"),
    ("fort worth", "Fort Worth, TX"),
    ("denver", "Denver, CO"),
    ("phoenix", "Phoenix, AZ"),
    ("atlanta", "Atlanta, GA"),
    ("miami", "Miami, FL"),
    ("seattle", "Seattle, WA"),
];

static GAZETTEER_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    GAZETTEER
        .iter()
        .map(|(term, normalized)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            // the pattern is built from a fixed table, it always compiles
            (Regex::new(&pattern).unwrap(), *normalized)
        })
        .collect()
});

/// `"Austin, TX"` and `"Austin TX"` — capitalized city words followed by a
/// two-letter state code.
static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*,\s*([A-Z]{2})\b").unwrap(),
        Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s+([A-Z]{2})\b").unwrap(),
    ]
});

/// Street addresses and explicit `property id:` / `listing id:` references.
static PROPERTY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i)\b(\d+\s+[A-Za-z][A-Za-z ]*?(?:Street|St|Avenue|Ave|Road|Rd|Way|Drive|Dr|Lane|Ln|Boulevard|Blvd))\b",
        )
        .unwrap(),
        Regex::new(r"(?i)\bproperty\s+id[:\s]+([A-Za-z0-9_-]+)").unwrap(),
        Regex::new(r"(?i)\blisting\s+id[:\s]+([A-Za-z0-9_-]+)").unwrap(),
    ]
});

/// Market metric vocabulary; captured values are lowercased.
static METRIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)\b(
            median\s+(?:sale\s+)?price
            | inventory\s+count
            | days\s+on\s+market
            | months?\s+(?:of\s+)?supply
            | price\s+per\s+sq(?:uare)?\s?f(?:ee)?t
            | sales?\s+volume
            | new\s+listings
            | roi | return\s+on\s+investment
            | cash\s+flow
            | cap\s+rate
            | appreciation
        )\b",
    )
    .unwrap()
});

/// `agent <Name>`, `realtor <Name>`, `broker <Name>`.
static AGENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:agent|realtor|broker)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap()
});

/// Extracts typed entities from query text. Stateless; every query is
/// processed fresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// All entities found in `query`, deduplicated, in first-mention order.
    pub fn extract(&self, query: &str) -> Vec<ExtractedEntity> {
        let mut entities = Vec::new();
        let mut seen = HashSet::new();
        let mut push = |entity: ExtractedEntity| {
            if seen.insert(entity.clone()) {
                entities.push(entity);
            }
        };

        for (pattern, normalized) in GAZETTEER_PATTERNS.iter() {
            if pattern.is_match(query) {
                push(ExtractedEntity::new(EntityType::Location, *normalized));
            }
        }
        for pattern in LOCATION_PATTERNS.iter() {
            for caps in pattern.captures_iter(query) {
                let city = caps[1].trim();
                let state = caps[2].to_uppercase();
                push(ExtractedEntity::new(
                    EntityType::Location,
                    format!("{city}, {state}"),
                ));
            }
        }
        for pattern in PROPERTY_PATTERNS.iter() {
            for caps in pattern.captures_iter(query) {
                push(ExtractedEntity::new(
                    EntityType::PropertyRef,
                    caps[1].trim(),
                ));
            }
        }
        for caps in METRIC_PATTERN.captures_iter(query) {
            push(ExtractedEntity::new(
                EntityType::Metric,
                normalize_metric(&caps[1]),
            ));
        }
        for caps in AGENT_PATTERN.captures_iter(query) {
            push(ExtractedEntity::new(EntityType::Agent, caps[1].trim()));
        }

        entities
    }
}

fn normalize_metric(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
