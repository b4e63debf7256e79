use crate::classify::outcome::TierDecision;
use crate::error::EcoWattError;
use crate::model::{ConnectionClass, PremisesCategory, UsageTier};
use crate::profile::builtin::builtin_profile;
use crate::profile::schema::PremisesProfileDef;
use crate::tariff::engine::{check_kwh, decimal_to_f64};

/// Usage tier for `kwh` under the built-in profile of a premises category.
pub fn classify(
    kwh: f64,
    category: PremisesCategory,
    class: ConnectionClass,
) -> Result<UsageTier, EcoWattError> {
    decide(builtin_profile(category), kwh, class).map(|d| d.tier)
}

/// Place `kwh` into a tier using the profile's cut-offs for `class`.
///
/// Lower bounds are inclusive: `low` itself is Medium and `high` itself is High.
pub fn decide(
    profile: &PremisesProfileDef,
    kwh: f64,
    class: ConnectionClass,
) -> Result<TierDecision, EcoWattError> {
    check_kwh(kwh)?;
    let thresholds = profile.thresholds_for(class).ok_or_else(|| {
        EcoWattError::ProfileInvalid(format!(
            "profile '{}' has no thresholds for {} or its default class",
            profile.name, class
        ))
    })?;

    let (tier, reason) = if kwh < decimal_to_f64(thresholds.low) {
        (
            UsageTier::Low,
            format!("{} kWh < {} -> {}", kwh, thresholds.low, UsageTier::Low),
        )
    } else if kwh < decimal_to_f64(thresholds.high) {
        (
            UsageTier::Medium,
            format!(
                "{} <= {} kWh < {} -> {}",
                thresholds.low,
                kwh,
                thresholds.high,
                UsageTier::Medium
            ),
        )
    } else {
        (
            UsageTier::High,
            format!("{} kWh >= {} -> {}", kwh, thresholds.high, UsageTier::High),
        )
    };

    Ok(TierDecision {
        tier,
        low: thresholds.low,
        high: thresholds.high,
        reason,
    })
}
