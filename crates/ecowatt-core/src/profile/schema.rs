use crate::model::{ConnectionClass, PremisesCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category configuration: which fields are scaled, tier cut-offs and
/// the recommendation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremisesProfileDef {
    pub category: PremisesCategory,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Connection class used when the input does not name one.
    pub connection: ConnectionClass,
    /// Fields sampled weekly that must be scaled to a monthly figure.
    pub scaled_fields: Vec<String>,
    pub thresholds: BTreeMap<ConnectionClass, TierThresholdsDef>,
    /// Evaluated in order; every rule that fires contributes its message.
    pub rules: Vec<RecommendationRuleDef>,
    /// Returned alone when no rule fires.
    pub fallback_message: String,
}

/// kWh cut-offs: below `low` is Low, from `low` up to `high` is Medium, `high` and above is High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholdsDef {
    pub low: Decimal,
    pub high: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRuleDef {
    pub appliance: String,
    /// All conditions must hold for the rule to fire.
    pub conditions: Vec<ConditionDef>,
    pub message: String,
}

/// A test on one usage field. Exactly one of `above`, `equals`, `not_equal` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDef {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equal: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    Above(Decimal),
    Equals(&'a str),
    NotEqual(&'a str),
}

impl ConditionDef {
    /// The condition's predicate, or `None` unless exactly one is set.
    pub fn predicate(&self) -> Option<Predicate<'_>> {
        match (&self.above, &self.equals, &self.not_equal) {
            (Some(t), None, None) => Some(Predicate::Above(*t)),
            (None, Some(v), None) => Some(Predicate::Equals(v)),
            (None, None, Some(v)) => Some(Predicate::NotEqual(v)),
            _ => None,
        }
    }
}

impl PremisesProfileDef {
    /// Thresholds for a connection class, falling back to the profile's default class.
    pub fn thresholds_for(&self, class: ConnectionClass) -> Option<&TierThresholdsDef> {
        self.thresholds
            .get(&class)
            .or_else(|| self.thresholds.get(&self.connection))
    }
}
