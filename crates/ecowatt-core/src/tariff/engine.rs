use crate::error::EcoWattError;
use crate::model::{ConnectionClass, Region};
use crate::tariff::builtin::builtin_tariff;
use crate::tariff::schema::TariffDef;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Priced consumption with the bracket that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffQuote {
    /// Region the caller asked for.
    pub region: Region,
    /// Region whose table was applied (`Others` on fallback).
    pub applied_region: Region,
    pub connection: ConnectionClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tariff_code: Option<String>,
    pub kwh: f64,
    /// Zero-based index of the matched bracket.
    pub bracket_index: usize,
    /// Upper bound of the matched bracket; `None` for the open-ended top bracket.
    pub bracket_up_to: Option<Decimal>,
    pub rate: Decimal,
    pub energy_charge: Decimal,
    pub fixed_charge: Decimal,
    /// Energy charge plus fixed charge, rounded half-up to 2 decimals.
    pub cost: Decimal,
}

/// One point of a cost-versus-consumption curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostPoint {
    pub kwh: f64,
    pub rate: Decimal,
    pub cost: Decimal,
}

/// Monthly cost for `kwh` under the built-in tariff.
pub fn price(kwh: f64, region: Region, class: ConnectionClass) -> Result<Decimal, EcoWattError> {
    quote(builtin_tariff(), kwh, region, class).map(|q| q.cost)
}

/// Price `kwh` against a tariff.
///
/// The whole consumption is billed at the rate of the first bracket whose
/// upper bound is at least `kwh`; the class's fixed charge is added on top.
pub fn quote(
    tariff: &TariffDef,
    kwh: f64,
    region: Region,
    class: ConnectionClass,
) -> Result<TariffQuote, EcoWattError> {
    check_kwh(kwh)?;

    let class_def = tariff.class(class).ok_or_else(|| {
        EcoWattError::TariffInvalid(format!("tariff '{}' has no {} rates", tariff.name, class))
    })?;
    let (applied_region, brackets) = class_def.brackets(region).ok_or_else(|| {
        EcoWattError::TariffInvalid(format!(
            "tariff '{}' has no {} table for {} or Others",
            tariff.name, class, region
        ))
    })?;

    let (bracket_index, bracket) = brackets
        .iter()
        .enumerate()
        .find(|(_, b)| b.up_to.map_or(true, |bound| kwh <= decimal_to_f64(bound)))
        .ok_or_else(|| {
            EcoWattError::TariffInvalid(format!(
                "no bracket covers {} kWh in {} / {}",
                kwh, class, applied_region
            ))
        })?;

    let units = kwh_to_decimal("kwh", kwh)?;
    let too_large =
        || EcoWattError::out_of_range("kwh", format!("{} kWh is too large to price", kwh));
    let energy = units.checked_mul(bracket.rate).ok_or_else(too_large)?;
    let total = energy
        .checked_add(class_def.fixed_charge)
        .ok_or_else(too_large)?;

    let cost = round_money(total);
    debug!(
        kwh,
        %region,
        %applied_region,
        %class,
        bracket = bracket_index,
        rate = %bracket.rate,
        %cost,
        "priced consumption"
    );

    Ok(TariffQuote {
        region,
        applied_region,
        connection: class,
        tariff_code: class_def.code.clone(),
        kwh,
        bracket_index,
        bracket_up_to: bracket.up_to,
        rate: bracket.rate,
        energy_charge: round_money(energy),
        fixed_charge: class_def.fixed_charge,
        cost,
    })
}

/// Most points a single simulated curve may hold.
pub const MAX_SIMULATION_POINTS: usize = 10_000;

/// Cost at evenly spaced consumption levels from `from` to `to` inclusive.
///
/// Levels are stepped in decimal arithmetic, so `0.1` steps land exactly on
/// `0.3` and `0.7`.
pub fn simulate(
    tariff: &TariffDef,
    region: Region,
    class: ConnectionClass,
    from: f64,
    to: f64,
    step: f64,
) -> Result<Vec<CostPoint>, EcoWattError> {
    check_kwh(from)?;
    check_kwh(to)?;
    if !step.is_finite() || step <= 0.0 {
        return Err(EcoWattError::invalid_input("step", "must be a positive number"));
    }
    if to < from {
        return Err(EcoWattError::invalid_input(
            "to",
            format!("range end {} is below range start {}", to, from),
        ));
    }

    let start = kwh_to_decimal("from", from)?;
    let end = kwh_to_decimal("to", to)?;
    let stride = kwh_to_decimal("step", step)?;
    if stride.is_zero() {
        return Err(EcoWattError::invalid_input("step", format!("{} is too small", step)));
    }

    let too_many = || {
        EcoWattError::invalid_input(
            "step",
            format!(
                "{} to {} in steps of {} exceeds {} points",
                from, to, step, MAX_SIMULATION_POINTS
            ),
        )
    };
    let span = (end - start).checked_div(stride).ok_or_else(too_many)?;
    // Snap quotients like 6.9999999999 to the intended whole number of steps.
    let nearest = span.round();
    let intervals = if (span - nearest).abs() < Decimal::new(1, 9) {
        nearest
    } else {
        span.floor()
    };
    let count = intervals
        .to_usize()
        .filter(|n| *n < MAX_SIMULATION_POINTS)
        .ok_or_else(too_many)?;

    (0..=count)
        .map(|i| {
            let kwh = decimal_to_f64(start + stride * Decimal::from(i));
            let q = quote(tariff, kwh, region, class)?;
            Ok(CostPoint {
                kwh,
                rate: q.rate,
                cost: q.cost,
            })
        })
        .collect()
}

/// Reject negative and non-finite consumption.
pub(crate) fn check_kwh(kwh: f64) -> Result<(), EcoWattError> {
    if !kwh.is_finite() {
        return Err(EcoWattError::invalid_input(
            "kwh",
            format!("{} is not a finite number", kwh),
        ));
    }
    if kwh < 0.0 {
        return Err(EcoWattError::invalid_input(
            "kwh",
            format!("{} is negative", kwh),
        ));
    }
    Ok(())
}

/// Decimal form of a checked figure, for money arithmetic.
pub(crate) fn kwh_to_decimal(field: &str, kwh: f64) -> Result<Decimal, EcoWattError> {
    Decimal::try_from(kwh).map_err(|_| {
        EcoWattError::out_of_range(field, format!("{} exceeds the decimal range", kwh))
    })
}

/// Policy bound as f64, for comparison against raw consumption figures.
pub(crate) fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::MAX)
}

/// Round half-up (away from zero) to 2 decimals, always keeping 2 decimal places.
pub(crate) fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
