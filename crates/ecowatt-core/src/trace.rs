use crate::aggregate::WEEKS_PER_MONTH;
use crate::classify::outcome::TierDecision;
use crate::model::UsageRecord;
use crate::profile::schema::PremisesProfileDef;
use crate::recommend::Recommendation;
use crate::tariff::TariffQuote;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    Aggregate,
    Predict,
    Price,
    Classify,
    Recommend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub steps: Vec<TraceStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl TraceBundle {
    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(TraceWarning {
            message: message.into(),
        });
    }
}

pub fn aggregate_step(
    raw: &UsageRecord,
    monthly: &UsageRecord,
    profile: &PremisesProfileDef,
) -> TraceStep {
    let message = if raw.sampling == monthly.sampling {
        "Input already monthly, no scaling applied".to_string()
    } else {
        let scaled: Vec<String> = profile
            .scaled_fields
            .iter()
            .map(|f| format!("{} {} -> {}", f, raw.number(f), monthly.number(f)))
            .collect();
        format!(
            "Scaled {} weekly field(s) by {}: {}",
            scaled.len(),
            WEEKS_PER_MONTH,
            scaled.join(", ")
        )
    };

    TraceStep {
        step_type: TraceStepType::Aggregate,
        message,
    }
}

pub fn predict_step(backend: &str, kwh: f64) -> TraceStep {
    TraceStep {
        step_type: TraceStepType::Predict,
        message: format!("Predictor '{}' estimated {} kWh/month", backend, kwh),
    }
}

pub fn price_step(quote: &TariffQuote) -> TraceStep {
    let bracket = match quote.bracket_up_to {
        Some(bound) => format!("<= {}", bound),
        None => "open-ended".to_string(),
    };
    let fallback = if quote.applied_region != quote.region {
        format!(" (no table for {}, used {})", quote.region, quote.applied_region)
    } else {
        String::new()
    };
    TraceStep {
        step_type: TraceStepType::Price,
        message: format!(
            "{} {}{}: {} kWh in bracket {} ({}) at {}/kWh = {} + fixed {} = {}",
            quote.applied_region,
            quote.connection,
            fallback,
            quote.kwh,
            quote.bracket_index + 1,
            bracket,
            quote.rate,
            quote.energy_charge,
            quote.fixed_charge,
            quote.cost
        ),
    }
}

pub fn classify_step(decision: &TierDecision) -> TraceStep {
    TraceStep {
        step_type: TraceStepType::Classify,
        message: decision.reason.clone(),
    }
}

pub fn recommend_step(fired: &[Recommendation]) -> TraceStep {
    let message = if fired.is_empty() {
        "No appliance rule fired".to_string()
    } else {
        format!(
            "{} rule(s) fired: {}",
            fired.len(),
            fired
                .iter()
                .map(|r| r.appliance.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    };
    TraceStep {
        step_type: TraceStepType::Recommend,
        message,
    }
}
