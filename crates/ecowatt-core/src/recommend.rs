use crate::model::UsageRecord;
use crate::profile::schema::{ConditionDef, PremisesProfileDef, Predicate, RecommendationRuleDef};
use crate::tariff::engine::decimal_to_f64;
use serde::{Deserialize, Serialize};

/// Label assumed for a categorical field that is absent from the record.
const ABSENT_LABEL: &str = "None";

/// A rule that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub appliance: String,
    pub message: String,
}

/// Messages for every rule that fires, in rule order, or the profile's
/// fallback message alone when none does.
pub fn recommend(profile: &PremisesProfileDef, usage: &UsageRecord) -> Vec<String> {
    messages(profile, fired_rules(profile, usage))
}

/// Messages of fired rules, or the profile's fallback message when none fired.
pub fn messages(profile: &PremisesProfileDef, fired: Vec<Recommendation>) -> Vec<String> {
    if fired.is_empty() {
        return vec![profile.fallback_message.clone()];
    }
    fired.into_iter().map(|r| r.message).collect()
}

/// Rules that fire against `usage`, in rule-definition order.
pub fn fired_rules(profile: &PremisesProfileDef, usage: &UsageRecord) -> Vec<Recommendation> {
    profile
        .rules
        .iter()
        .filter(|rule| rule_fires(rule, usage))
        .map(|rule| Recommendation {
            appliance: rule.appliance.clone(),
            message: rule.message.clone(),
        })
        .collect()
}

fn rule_fires(rule: &RecommendationRuleDef, usage: &UsageRecord) -> bool {
    rule.conditions.iter().all(|c| condition_holds(c, usage))
}

fn condition_holds(condition: &ConditionDef, usage: &UsageRecord) -> bool {
    match condition.predicate() {
        Some(Predicate::Above(threshold)) => {
            usage.number(&condition.field) > decimal_to_f64(threshold)
        }
        Some(Predicate::Equals(expected)) => label_of(usage, &condition.field) == expected,
        Some(Predicate::NotEqual(excluded)) => label_of(usage, &condition.field) != excluded,
        None => false,
    }
}

fn label_of<'a>(usage: &'a UsageRecord, field: &str) -> &'a str {
    usage.label(field).unwrap_or(ABSENT_LABEL)
}
