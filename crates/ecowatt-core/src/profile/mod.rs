pub mod builtin;
pub mod schema;

use crate::error::EcoWattError;
use rust_decimal::Decimal;
use schema::PremisesProfileDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a premises profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<PremisesProfileDef, EcoWattError> {
    let content = std::fs::read_to_string(path).map_err(|e| EcoWattError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a premises profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<PremisesProfileDef, EcoWattError> {
    let profile: PremisesProfileDef =
        serde_json::from_str(json).map_err(|e| EcoWattError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a premises profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<PremisesProfileDef, EcoWattError> {
    let profile: PremisesProfileDef = serde_json::from_str(json).map_err(EcoWattError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &PremisesProfileDef) -> Result<(), EcoWattError> {
    let mut seen = HashSet::new();
    for field in &profile.scaled_fields {
        if field.is_empty() {
            return Err(EcoWattError::ProfileInvalid(
                "scaled field name must not be empty".into(),
            ));
        }
        if !seen.insert(field.as_str()) {
            return Err(EcoWattError::ProfileInvalid(format!(
                "scaled field '{}' is listed twice",
                field
            )));
        }
    }

    if !profile.thresholds.contains_key(&profile.connection) {
        return Err(EcoWattError::ProfileInvalid(format!(
            "no thresholds for the default connection class '{}'",
            profile.connection
        )));
    }

    for (class, t) in &profile.thresholds {
        if t.low < Decimal::ZERO {
            return Err(EcoWattError::ProfileInvalid(format!(
                "{} low threshold {} must not be negative",
                class, t.low
            )));
        }
        if t.low >= t.high {
            return Err(EcoWattError::ProfileInvalid(format!(
                "{} thresholds must increase (low {}, high {})",
                class, t.low, t.high
            )));
        }
    }

    for rule in &profile.rules {
        if rule.appliance.is_empty() {
            return Err(EcoWattError::ProfileInvalid(
                "rule appliance must not be empty".into(),
            ));
        }
        if rule.message.is_empty() {
            return Err(EcoWattError::ProfileInvalid(format!(
                "rule '{}' has an empty message",
                rule.appliance
            )));
        }
        if rule.conditions.is_empty() {
            return Err(EcoWattError::ProfileInvalid(format!(
                "rule '{}' has no conditions",
                rule.appliance
            )));
        }
        for cond in &rule.conditions {
            if cond.field.is_empty() {
                return Err(EcoWattError::ProfileInvalid(format!(
                    "rule '{}' has a condition without a field",
                    rule.appliance
                )));
            }
            if cond.predicate().is_none() {
                return Err(EcoWattError::ProfileInvalid(format!(
                    "rule '{}' condition on '{}' must set exactly one of above, equals, not_equal",
                    rule.appliance, cond.field
                )));
            }
        }
    }

    if profile.fallback_message.is_empty() {
        return Err(EcoWattError::ProfileInvalid(
            "fallback_message must not be empty".into(),
        ));
    }

    Ok(())
}
