pub mod command;

use crate::error::EcoWattError;
use crate::model::UsageRecord;

/// Trait for kWh prediction backends.
///
/// Receives the monthly (already aggregated) record and returns the estimated
/// monthly consumption in kWh.
pub trait KwhPredictor: Send + Sync {
    fn predict(&self, monthly: &UsageRecord) -> Result<f64, EcoWattError>;

    /// Name of this prediction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Returns a consumption figure supplied up front, e.g. read off a meter.
#[derive(Debug, Clone, Copy)]
pub struct FixedPredictor {
    kwh: f64,
}

impl FixedPredictor {
    pub fn new(kwh: f64) -> Self {
        FixedPredictor { kwh }
    }
}

impl KwhPredictor for FixedPredictor {
    fn predict(&self, _monthly: &UsageRecord) -> Result<f64, EcoWattError> {
        Ok(self.kwh)
    }

    fn backend_name(&self) -> &str {
        "fixed"
    }
}
