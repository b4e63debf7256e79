use super::schema::PremisesProfileDef;
use crate::model::PremisesCategory;
use std::sync::LazyLock;

const HOME_JSON: &str = include_str!("../../../../presets/home.json");
const SHOP_JSON: &str = include_str!("../../../../presets/shop.json");
const OFFICE_JSON: &str = include_str!("../../../../presets/office.json");

static HOME: LazyLock<PremisesProfileDef> =
    LazyLock::new(|| serde_json::from_str(HOME_JSON).expect("embedded home.json is valid"));

static SHOP: LazyLock<PremisesProfileDef> =
    LazyLock::new(|| serde_json::from_str(SHOP_JSON).expect("embedded shop.json is valid"));

static OFFICE: LazyLock<PremisesProfileDef> =
    LazyLock::new(|| serde_json::from_str(OFFICE_JSON).expect("embedded office.json is valid"));

/// The shipped profile for a premises category.
pub fn builtin_profile(category: PremisesCategory) -> &'static PremisesProfileDef {
    match category {
        PremisesCategory::Home => &HOME,
        PremisesCategory::Shop => &SHOP,
        PremisesCategory::Office => &OFFICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectionClass;
    use crate::profile::validate_profile;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_profiles_are_valid() {
        for category in PremisesCategory::ALL {
            let p = builtin_profile(category);
            assert_eq!(p.category, category);
            validate_profile(p).unwrap();
        }
    }

    #[test]
    fn test_builtin_default_connections() {
        assert_eq!(
            builtin_profile(PremisesCategory::Home).connection,
            ConnectionClass::Domestic
        );
        assert_eq!(
            builtin_profile(PremisesCategory::Shop).connection,
            ConnectionClass::Commercial
        );
        assert_eq!(
            builtin_profile(PremisesCategory::Office).connection,
            ConnectionClass::Commercial
        );
    }

    #[test]
    fn test_builtin_thresholds() {
        let cases = [
            (PremisesCategory::Home, dec!(180), dec!(300)),
            (PremisesCategory::Shop, dec!(350), dec!(600)),
            (PremisesCategory::Office, dec!(800), dec!(1600)),
        ];
        for (category, low, high) in cases {
            let p = builtin_profile(category);
            let t = p.thresholds_for(p.connection).unwrap();
            assert_eq!((t.low, t.high), (low, high), "{category}");
        }
    }

    #[test]
    fn test_builtin_scaled_field_counts() {
        assert_eq!(builtin_profile(PremisesCategory::Home).scaled_fields.len(), 6);
        assert_eq!(builtin_profile(PremisesCategory::Shop).scaled_fields.len(), 7);
        assert_eq!(builtin_profile(PremisesCategory::Office).scaled_fields.len(), 8);
        for category in PremisesCategory::ALL {
            let fields = &builtin_profile(category).scaled_fields;
            let unique: HashSet<_> = fields.iter().collect();
            assert_eq!(unique.len(), fields.len());
        }
    }

    #[test]
    fn test_builtin_rule_counts() {
        for category in PremisesCategory::ALL {
            assert_eq!(builtin_profile(category).rules.len(), 5, "{category}");
        }
    }
}
