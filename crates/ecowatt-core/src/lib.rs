pub mod aggregate;
pub mod classify;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod predict;
pub mod profile;
pub mod recommend;
pub mod tariff;
pub mod trace;

use classify::outcome::AnalysisResult;
use error::EcoWattError;
use model::{ConnectionClass, PremisesCategory, Region, UsageInput, UsageRecord};
use pipeline::AnalysisPipeline;
use predict::KwhPredictor;
use profile::builtin::builtin_profile;
use profile::schema::PremisesProfileDef;
use tariff::builtin::builtin_tariff;
use tariff::schema::TariffDef;
use trace::TraceBundle;
use tracing::warn;

/// Overrides applied on top of an input document.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Tariff to price with. Defaults to the built-in state tariffs.
    pub tariff: Option<TariffDef>,
    /// Region name replacing the one in the input.
    pub region: Option<String>,
    /// Connection class replacing the input's (or the profile default).
    pub connection: Option<ConnectionClass>,
    /// Premises profile replacing the built-in one. Its category must match the input's.
    pub profile: Option<PremisesProfileDef>,
}

/// Main API entry point: analyze one input document.
///
/// Free-text category, region and connection are resolved leniently: an
/// unknown region is priced as `Others`, an unknown category is treated as a
/// home and an unknown connection falls back to the profile's default. Each
/// fallback is logged and recorded as a trace warning. With a custom profile,
/// an unknown category takes the profile's category instead of Home.
pub fn analyze(
    input: &UsageInput,
    predictor: &dyn KwhPredictor,
    options: &AnalyzeOptions,
) -> Result<AnalysisResult, EcoWattError> {
    let mut trace = TraceBundle::default();

    let category = match PremisesCategory::from_str_loose(&input.category) {
        Some(c) => c,
        None => {
            let fallback = options
                .profile
                .as_ref()
                .map_or(PremisesCategory::Home, |p| p.category);
            warn!(category = %input.category, %fallback, "unknown premises category");
            trace.warn(format!(
                "Unknown premises category '{}', analyzed as {}",
                input.category, fallback
            ));
            fallback
        }
    };

    let region_name = options.region.as_deref().unwrap_or(&input.region);
    let region = match Region::lookup(region_name) {
        Some(r) => r,
        None => {
            warn!(region = %region_name, "unknown region, using Others rates");
            trace.warn(format!(
                "Unknown region '{}', priced with Others rates",
                region_name
            ));
            Region::Others
        }
    };

    let profile = options
        .profile
        .as_ref()
        .unwrap_or_else(|| builtin_profile(category));
    let connection = match (options.connection, input.connection.as_deref()) {
        (Some(c), _) => c,
        (None, None) => profile.connection,
        (None, Some(name)) => ConnectionClass::from_str_loose(name).unwrap_or_else(|| {
            warn!(connection = %name, "unknown connection class, using profile default");
            trace.warn(format!(
                "Unknown connection class '{}', using {}",
                name, profile.connection
            ));
            profile.connection
        }),
    };

    let record = UsageRecord {
        category,
        sampling: input.sampling,
        fields: input.fields.clone(),
    };
    let tariff = options.tariff.as_ref().unwrap_or_else(|| builtin_tariff());

    AnalysisPipeline::new(tariff, profile).run_traced(&record, region, connection, predictor, trace)
}
