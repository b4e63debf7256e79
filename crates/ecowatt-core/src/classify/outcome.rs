use crate::model::{ConnectionClass, PremisesCategory, Region, UsageTier};
use crate::tariff::TariffQuote;
use crate::trace::TraceBundle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The tier a consumption figure falls into and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierDecision {
    pub tier: UsageTier,
    /// Lower cut-off (start of Medium).
    pub low: Decimal,
    /// Upper cut-off (start of High).
    pub high: Decimal,
    /// Human-readable explanation of the placement.
    pub reason: String,
}

/// Everything one analysis produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: PremisesCategory,
    pub region: Region,
    pub connection: ConnectionClass,
    /// Monthly consumption returned by the predictor.
    pub estimated_kwh: f64,
    /// Monthly cost, 2 decimals.
    pub cost: Decimal,
    pub usage_tier: UsageTier,
    /// General advice for the tier.
    pub tier_advice: String,
    /// Appliance recommendations in rule order.
    pub recommendations: Vec<String>,
    pub quote: TariffQuote,
    pub tier_decision: TierDecision,
    pub trace: TraceBundle,
}
