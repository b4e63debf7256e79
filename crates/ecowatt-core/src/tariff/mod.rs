pub mod builtin;
pub mod engine;
pub mod schema;

pub use engine::{price, quote, simulate, CostPoint, TariffQuote};

use crate::error::EcoWattError;
use crate::model::Region;
use rust_decimal::Decimal;
use schema::TariffDef;
use std::path::Path;

/// Load a tariff from a JSON file.
pub fn load_tariff(path: &Path) -> Result<TariffDef, EcoWattError> {
    let content = std::fs::read_to_string(path).map_err(|e| EcoWattError::TariffLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_tariff(&content, path)
}

/// Parse a tariff from a JSON string.
pub fn parse_tariff(json: &str, source: &Path) -> Result<TariffDef, EcoWattError> {
    let tariff: TariffDef = serde_json::from_str(json).map_err(|e| EcoWattError::TariffLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_tariff(&tariff)?;
    Ok(tariff)
}

/// Parse a tariff from a JSON string (no file path context).
pub fn parse_tariff_str(json: &str) -> Result<TariffDef, EcoWattError> {
    let tariff: TariffDef = serde_json::from_str(json).map_err(EcoWattError::Json)?;
    validate_tariff(&tariff)?;
    Ok(tariff)
}

/// Validate that a tariff is well-formed.
///
/// Rates must not decrease from one bracket to the next, which keeps the
/// cost monotonic in consumption.
pub fn validate_tariff(tariff: &TariffDef) -> Result<(), EcoWattError> {
    if tariff.classes.is_empty() {
        return Err(EcoWattError::TariffInvalid(
            "classes must not be empty".into(),
        ));
    }

    for (class, def) in &tariff.classes {
        if def.fixed_charge < Decimal::ZERO {
            return Err(EcoWattError::TariffInvalid(format!(
                "{} fixed charge must not be negative",
                class
            )));
        }

        if !def.regions.contains_key(&Region::Others) {
            return Err(EcoWattError::TariffInvalid(format!(
                "{} tariff has no 'Others' table to fall back on",
                class
            )));
        }

        for (region, brackets) in &def.regions {
            validate_brackets(brackets).map_err(|reason| {
                EcoWattError::TariffInvalid(format!("{} / {}: {}", class, region, reason))
            })?;
        }
    }

    Ok(())
}

fn validate_brackets(brackets: &[schema::BracketDef]) -> Result<(), String> {
    let Some((last, bounded)) = brackets.split_last() else {
        return Err("no brackets".into());
    };

    if last.up_to.is_some() {
        return Err("last bracket must be open-ended (omit 'up_to')".into());
    }

    let mut prev_bound: Option<Decimal> = None;
    for bracket in bounded {
        let Some(bound) = bracket.up_to else {
            return Err("only the last bracket may be open-ended".into());
        };
        if bound <= Decimal::ZERO {
            return Err(format!("bracket bound {} must be positive", bound));
        }
        if let Some(prev) = prev_bound {
            if bound <= prev {
                return Err(format!(
                    "bracket bounds must increase ({} after {})",
                    bound, prev
                ));
            }
        }
        prev_bound = Some(bound);
    }

    let mut prev_rate: Option<Decimal> = None;
    for bracket in brackets {
        if bracket.rate < Decimal::ZERO {
            return Err(format!("rate {} must not be negative", bracket.rate));
        }
        if let Some(prev) = prev_rate {
            if bracket.rate < prev {
                return Err(format!(
                    "rates must not decrease ({} after {})",
                    bracket.rate, prev
                ));
            }
        }
        prev_rate = Some(bracket.rate);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectionClass;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "name": "Test",
        "version": "1.0",
        "classes": {
            "domestic": {
                "fixed_charge": "50",
                "regions": {
                    "Others": [
                        { "up_to": "100", "rate": "2" },
                        { "rate": "3" }
                    ]
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_valid_tariff() {
        let t = parse_tariff_str(MINIMAL).unwrap();
        assert_eq!(t.name, "Test");
        let domestic = t.class(ConnectionClass::Domestic).unwrap();
        assert_eq!(domestic.fixed_charge, dec!(50));
        assert!(t.class(ConnectionClass::Commercial).is_none());
    }

    #[test]
    fn test_missing_region_uses_others_table() {
        let t = parse_tariff_str(MINIMAL).unwrap();
        let domestic = t.class(ConnectionClass::Domestic).unwrap();
        let (region, brackets) = domestic.brackets(Region::Delhi).unwrap();
        assert_eq!(region, Region::Others);
        assert_eq!(brackets.len(), 2);
    }

    #[test]
    fn test_missing_others_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "classes": { "domestic": { "fixed_charge": "50",
                "regions": { "Delhi": [ { "rate": "3" } ] } } }
        }"#;
        assert!(matches!(
            parse_tariff_str(json),
            Err(EcoWattError::TariffInvalid(_))
        ));
    }

    #[test]
    fn test_bounded_last_bracket_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "classes": { "domestic": { "fixed_charge": "50",
                "regions": { "Others": [ { "up_to": "100", "rate": "3" } ] } } }
        }"#;
        assert!(parse_tariff_str(json).is_err());
    }

    #[test]
    fn test_non_increasing_bounds_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "classes": { "domestic": { "fixed_charge": "50",
                "regions": { "Others": [
                    { "up_to": "300", "rate": "2" },
                    { "up_to": "100", "rate": "3" },
                    { "rate": "4" }
                ] } } }
        }"#;
        assert!(parse_tariff_str(json).is_err());
    }

    #[test]
    fn test_decreasing_rate_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "classes": { "domestic": { "fixed_charge": "50",
                "regions": { "Others": [
                    { "up_to": "100", "rate": "5" },
                    { "rate": "4" }
                ] } } }
        }"#;
        assert!(parse_tariff_str(json).is_err());
    }

    #[test]
    fn test_unknown_region_key_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0",
            "classes": { "domestic": { "fixed_charge": "50",
                "regions": { "Atlantis": [ { "rate": "4" } ] } } }
        }"#;
        assert!(matches!(parse_tariff_str(json), Err(EcoWattError::Json(_))));
    }

    #[test]
    fn test_load_tariff_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let t = load_tariff(file.path()).unwrap();
        assert_eq!(t.version, "1.0");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_tariff(Path::new("/nonexistent/tariff.json")).unwrap_err();
        match err {
            EcoWattError::TariffLoad { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/tariff.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
