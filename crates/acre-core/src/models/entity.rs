//! Typed entities extracted from query text.

use serde::{Deserialize, Serialize};

/// Entity categories the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Location,
    PropertyRef,
    Agent,
    Metric,
}

/// One entity mention found in a query. Produced fresh per query; never
/// cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub entity_type: EntityType,
    pub value: String,
}

impl ExtractedEntity {
    pub fn new(entity_type: EntityType, value: impl Into<String>) -> Self {
        Self {
            entity_type,
            value: value.into(),
        }
    }
}

/// Extracted entities grouped by type, the shape the graph retriever
/// dispatches on.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    pub locations: Vec<String>,
    pub property_refs: Vec<String>,
    pub agents: Vec<String>,
    pub metrics: Vec<String>,
}

impl EntitySet {
    /// Group a flat entity list by type, preserving order.
    pub fn from_entities(entities: &[ExtractedEntity]) -> Self {
        let mut set = Self::default();
        for entity in entities {
            let bucket = match entity.entity_type {
                EntityType::Location => &mut set.locations,
                EntityType::PropertyRef => &mut set.property_refs,
                EntityType::Agent => &mut set.agents,
                EntityType::Metric => &mut set.metrics,
            };
            bucket.push(entity.value.clone());
        }
        set
    }

    /// True when no entity of any type was found.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.property_refs.is_empty()
            && self.agents.is_empty()
            && self.metrics.is_empty()
    }
}
