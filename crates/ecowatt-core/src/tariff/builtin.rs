use super::schema::TariffDef;
use std::sync::LazyLock;

const TARIFFS_JSON: &str = include_str!("../../../../presets/tariffs.json");

static BUILTIN_TARIFF: LazyLock<TariffDef> = LazyLock::new(|| {
    serde_json::from_str(TARIFFS_JSON).expect("embedded tariffs.json is valid")
});

/// The state slab tariffs shipped with the tool.
pub fn builtin_tariff() -> &'static TariffDef {
    &BUILTIN_TARIFF
}
