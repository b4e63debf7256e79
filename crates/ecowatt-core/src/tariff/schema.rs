use crate::model::{ConnectionClass, Region};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tariff defining slab rates per connection class and region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub classes: BTreeMap<ConnectionClass, ClassTariffDef>,
}

/// Rates and fixed charge for one connection class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTariffDef {
    /// Utility tariff code for display (e.g., "LT-1").
    #[serde(default)]
    pub code: Option<String>,
    pub fixed_charge: Decimal,
    /// Ordered slab brackets per region. `Others` is the fallback table.
    pub regions: BTreeMap<Region, Vec<BracketDef>>,
}

/// One slab: applies when consumption is at most `up_to` kWh.
/// The last bracket of a table leaves `up_to` unset and is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<Decimal>,
    pub rate: Decimal,
}

impl TariffDef {
    pub fn class(&self, class: ConnectionClass) -> Option<&ClassTariffDef> {
        self.classes.get(&class)
    }
}

impl ClassTariffDef {
    /// Bracket table for a region, falling back to `Others` when the region has none.
    pub fn brackets(&self, region: Region) -> Option<(Region, &[BracketDef])> {
        self.regions
            .get(&region)
            .map(|b| (region, b.as_slice()))
            .or_else(|| {
                self.regions
                    .get(&Region::Others)
                    .map(|b| (Region::Others, b.as_slice()))
            })
    }
}
