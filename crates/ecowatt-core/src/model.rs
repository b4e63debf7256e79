use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Administrative area whose tariff applies. Callers price unrecognized names as `Others`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Maharashtra,
    Gujarat,
    Karnataka,
    #[serde(rename = "Tamil Nadu")]
    TamilNadu,
    Delhi,
    #[serde(rename = "West Bengal")]
    WestBengal,
    Others,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Maharashtra,
        Region::Gujarat,
        Region::Karnataka,
        Region::TamilNadu,
        Region::Delhi,
        Region::WestBengal,
        Region::Others,
    ];

    /// Exact (case- and separator-insensitive) lookup. `None` if the name is not a known region.
    pub fn lookup(s: &str) -> Option<Region> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        match key.as_str() {
            "maharashtra" => Some(Region::Maharashtra),
            "gujarat" => Some(Region::Gujarat),
            "karnataka" => Some(Region::Karnataka),
            "tamilnadu" => Some(Region::TamilNadu),
            "delhi" | "newdelhi" => Some(Region::Delhi),
            "westbengal" => Some(Region::WestBengal),
            "others" | "other" => Some(Region::Others),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Maharashtra => write!(f, "Maharashtra"),
            Region::Gujarat => write!(f, "Gujarat"),
            Region::Karnataka => write!(f, "Karnataka"),
            Region::TamilNadu => write!(f, "Tamil Nadu"),
            Region::Delhi => write!(f, "Delhi"),
            Region::WestBengal => write!(f, "West Bengal"),
            Region::Others => write!(f, "Others"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionClass {
    /// Residential, LT-1.
    Domestic,
    /// Shops and offices, LT-2.
    Commercial,
}

impl fmt::Display for ConnectionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionClass::Domestic => write!(f, "Domestic"),
            ConnectionClass::Commercial => write!(f, "Commercial"),
        }
    }
}

impl ConnectionClass {
    pub const ALL: [ConnectionClass; 2] = [ConnectionClass::Domestic, ConnectionClass::Commercial];

    /// Accepts class names and tariff codes, e.g. "LT-2 (Commercial)".
    pub fn from_str_loose(s: &str) -> Option<ConnectionClass> {
        let lower = s.trim().to_lowercase();
        if lower.contains("domestic") || lower.contains("residential") {
            return Some(ConnectionClass::Domestic);
        }
        if lower.contains("commercial") {
            return Some(ConnectionClass::Commercial);
        }
        let code: String = lower.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        match code.as_str() {
            "lt1" => Some(ConnectionClass::Domestic),
            "lt2" => Some(ConnectionClass::Commercial),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremisesCategory {
    Home,
    Shop,
    Office,
}

impl fmt::Display for PremisesCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PremisesCategory::Home => write!(f, "Home"),
            PremisesCategory::Shop => write!(f, "Shop"),
            PremisesCategory::Office => write!(f, "Office"),
        }
    }
}

impl PremisesCategory {
    pub const ALL: [PremisesCategory; 3] = [
        PremisesCategory::Home,
        PremisesCategory::Shop,
        PremisesCategory::Office,
    ];

    pub fn from_str_loose(s: &str) -> Option<PremisesCategory> {
        let lower = s.trim().to_lowercase();
        if lower.contains("home") || lower.contains("house") || lower.contains("residen") {
            Some(PremisesCategory::Home)
        } else if lower.contains("shop") || lower.contains("store") {
            Some(PremisesCategory::Shop)
        } else if lower.contains("office") {
            Some(PremisesCategory::Office)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingPeriod {
    #[default]
    Weekly,
    Monthly,
}

/// A single usage field: a numeric sample (hours, minutes, cycles) or a categorical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsageValue {
    Number(f64),
    Label(String),
}

impl UsageValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            UsageValue::Number(v) => Some(*v),
            UsageValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            UsageValue::Number(_) => None,
            UsageValue::Label(s) => Some(s),
        }
    }
}

/// Named usage fields for one premises, tagged with how they were sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub category: PremisesCategory,
    pub sampling: SamplingPeriod,
    pub fields: BTreeMap<String, UsageValue>,
}

impl UsageRecord {
    pub fn new(category: PremisesCategory, sampling: SamplingPeriod) -> Self {
        Self {
            category,
            sampling,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_number(mut self, field: &str, value: f64) -> Self {
        self.fields
            .insert(field.to_string(), UsageValue::Number(value));
        self
    }

    pub fn with_label(mut self, field: &str, label: &str) -> Self {
        self.fields
            .insert(field.to_string(), UsageValue::Label(label.to_string()));
        self
    }

    /// Numeric value of a field; absent or categorical fields read as 0.
    pub fn number(&self, field: &str) -> f64 {
        self.fields
            .get(field)
            .and_then(UsageValue::as_number)
            .unwrap_or(0.0)
    }

    pub fn label(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(UsageValue::as_label)
    }
}

/// Input document as supplied by a form or a JSON file.
///
/// Category, region and connection are free text and resolved leniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageInput {
    pub category: String,
    pub region: String,
    #[serde(default)]
    pub connection: Option<String>,
    #[serde(default)]
    pub sampling: SamplingPeriod,
    #[serde(default)]
    pub fields: BTreeMap<String, UsageValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UsageTier {
    Low,
    Medium,
    High,
}

impl UsageTier {
    /// General advice shown next to the tier.
    pub fn advice(&self) -> &'static str {
        match self {
            UsageTier::Low => "Great job! Keep maintaining your efficient energy usage.",
            UsageTier::Medium => "Moderate consumption. Try using appliances more efficiently.",
            UsageTier::High => {
                "High energy consumption! Consider using power-saving devices or scheduling usage."
            }
        }
    }
}

impl fmt::Display for UsageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageTier::Low => write!(f, "Low Usage"),
            UsageTier::Medium => write!(f, "Medium Usage"),
            UsageTier::High => write!(f, "High Usage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup_variants() {
        assert_eq!(Region::lookup("Tamil Nadu"), Some(Region::TamilNadu));
        assert_eq!(Region::lookup("tamil_nadu"), Some(Region::TamilNadu));
        assert_eq!(Region::lookup("  WEST-BENGAL "), Some(Region::WestBengal));
        assert_eq!(Region::lookup("Atlantis"), None);
    }

    #[test]
    fn test_other_aliases() {
        assert_eq!(Region::lookup("Other"), Some(Region::Others));
        assert_eq!(Region::lookup("New Delhi"), Some(Region::Delhi));
        assert_eq!(Region::lookup(""), None);
    }

    #[test]
    fn test_region_serde_names() {
        let json = serde_json::to_string(&Region::WestBengal).unwrap();
        assert_eq!(json, "\"West Bengal\"");
        let r: Region = serde_json::from_str("\"Tamil Nadu\"").unwrap();
        assert_eq!(r, Region::TamilNadu);
    }

    #[test]
    fn test_connection_from_tariff_code() {
        assert_eq!(
            ConnectionClass::from_str_loose("LT-1"),
            Some(ConnectionClass::Domestic)
        );
        assert_eq!(
            ConnectionClass::from_str_loose("LT-2 (Commercial)"),
            Some(ConnectionClass::Commercial)
        );
        assert_eq!(ConnectionClass::from_str_loose("industrial"), None);
    }

    #[test]
    fn test_category_loose() {
        assert_eq!(
            PremisesCategory::from_str_loose("EcoWatt Homes"),
            Some(PremisesCategory::Home)
        );
        assert_eq!(
            PremisesCategory::from_str_loose("Offices"),
            Some(PremisesCategory::Office)
        );
        assert_eq!(PremisesCategory::from_str_loose("factory"), None);
    }

    #[test]
    fn test_usage_value_untagged() {
        let fields: BTreeMap<String, UsageValue> =
            serde_json::from_str(r#"{ "ac_hours": 150, "fridge_type": "Double Door 3★" }"#)
                .unwrap();
        assert_eq!(fields["ac_hours"], UsageValue::Number(150.0));
        assert_eq!(fields["fridge_type"].as_label(), Some("Double Door 3★"));
    }

    #[test]
    fn test_record_absent_number_reads_zero() {
        let record = UsageRecord::new(PremisesCategory::Home, SamplingPeriod::Weekly)
            .with_label("fridge_type", "None");
        assert_eq!(record.number("ac_hours"), 0.0);
        assert_eq!(record.number("fridge_type"), 0.0);
        assert_eq!(record.label("fridge_type"), Some("None"));
    }
}
