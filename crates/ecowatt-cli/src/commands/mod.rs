pub mod analyze;
pub mod price;
pub mod profiles;
pub mod simulate;
pub mod tariffs;

use crate::config::AppConfig;
use ecowatt_core::error::EcoWattError;
use ecowatt_core::model::{ConnectionClass, Region};
use ecowatt_core::tariff::builtin::builtin_tariff;
use ecowatt_core::tariff::load_tariff;
use ecowatt_core::tariff::schema::TariffDef;
use std::path::Path;
use tracing::warn;

/// Custom tariff from the flag or the config file, `None` for the built-in one.
fn custom_tariff(flag: Option<&Path>, cfg: &AppConfig) -> Result<Option<TariffDef>, EcoWattError> {
    match flag.or(cfg.tariff_file.as_deref()) {
        Some(path) => load_tariff(path).map(Some),
        None => Ok(None),
    }
}

/// Tariff to price with: custom if one is configured, otherwise the built-in one.
fn resolve_tariff(flag: Option<&Path>, cfg: &AppConfig) -> Result<TariffDef, EcoWattError> {
    Ok(custom_tariff(flag, cfg)?.unwrap_or_else(|| builtin_tariff().clone()))
}

/// Region from the flag or `default_region`. Unknown names are priced as `Others`.
fn resolve_region(flag: Option<&str>, cfg: &AppConfig) -> Result<Region, EcoWattError> {
    let name = flag.or(cfg.default_region.as_deref()).ok_or_else(|| {
        EcoWattError::Config("no region given: pass --region or set default_region".into())
    })?;
    Ok(Region::lookup(name).unwrap_or_else(|| {
        warn!(region = %name, "unknown region, using Others rates");
        Region::Others
    }))
}

fn parse_connection(name: &str) -> Result<ConnectionClass, EcoWattError> {
    ConnectionClass::from_str_loose(name).ok_or_else(|| EcoWattError::InvalidInput {
        field: "connection".into(),
        reason: format!("unknown connection class '{}' (expected domestic or commercial)", name),
    })
}
