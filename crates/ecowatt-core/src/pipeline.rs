use crate::aggregate::aggregate;
use crate::classify::decide;
use crate::classify::outcome::AnalysisResult;
use crate::error::EcoWattError;
use crate::model::{ConnectionClass, Region, UsageRecord, UsageValue};
use crate::predict::KwhPredictor;
use crate::profile::schema::PremisesProfileDef;
use crate::recommend::{fired_rules, messages};
use crate::tariff::quote;
use crate::tariff::schema::TariffDef;
use crate::trace::{self, TraceBundle};
use tracing::{debug, warn};

/// Runs one premises profile against one tariff.
///
/// Holds only shared references to immutable policy data, so a pipeline can
/// be reused across invocations and threads.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisPipeline<'a> {
    tariff: &'a TariffDef,
    profile: &'a PremisesProfileDef,
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(tariff: &'a TariffDef, profile: &'a PremisesProfileDef) -> Self {
        AnalysisPipeline { tariff, profile }
    }

    /// Validate, aggregate, predict, price, classify and recommend.
    ///
    /// Recommendations are evaluated on the raw (weekly) record, not the
    /// aggregated one. A predictor failure aborts the run with no result.
    pub fn run(
        &self,
        record: &UsageRecord,
        region: Region,
        connection: ConnectionClass,
        predictor: &dyn KwhPredictor,
    ) -> Result<AnalysisResult, EcoWattError> {
        self.run_traced(record, region, connection, predictor, TraceBundle::default())
    }

    pub(crate) fn run_traced(
        &self,
        record: &UsageRecord,
        region: Region,
        connection: ConnectionClass,
        predictor: &dyn KwhPredictor,
        mut trace: TraceBundle,
    ) -> Result<AnalysisResult, EcoWattError> {
        if record.category != self.profile.category {
            return Err(EcoWattError::invalid_input(
                "category",
                format!(
                    "record is for {} but profile '{}' is for {}",
                    record.category, self.profile.name, self.profile.category
                ),
            ));
        }
        validate_record(record)?;

        let monthly = aggregate(record, self.profile);
        trace.push(trace::aggregate_step(record, &monthly, self.profile));
        debug!(category = %record.category, "aggregated usage to monthly");

        let estimated_kwh = predictor.predict(&monthly).map_err(|e| {
            warn!(backend = predictor.backend_name(), error = %e, "prediction failed");
            match e {
                EcoWattError::PredictionUnavailable(_) => e,
                other => EcoWattError::PredictionUnavailable(other.to_string()),
            }
        })?;
        if !estimated_kwh.is_finite() || estimated_kwh < 0.0 {
            warn!(backend = predictor.backend_name(), estimated_kwh, "prediction out of range");
            return Err(EcoWattError::PredictionUnavailable(format!(
                "predictor '{}' returned {} kWh",
                predictor.backend_name(),
                estimated_kwh
            )));
        }
        trace.push(trace::predict_step(predictor.backend_name(), estimated_kwh));

        let quote = quote(self.tariff, estimated_kwh, region, connection)?;
        trace.push(trace::price_step(&quote));

        let tier_decision = decide(self.profile, estimated_kwh, connection)?;
        trace.push(trace::classify_step(&tier_decision));

        let fired = fired_rules(self.profile, record);
        trace.push(trace::recommend_step(&fired));
        let recommendations = messages(self.profile, fired);

        debug!(
            estimated_kwh,
            cost = %quote.cost,
            tier = %tier_decision.tier,
            "analysis complete"
        );

        Ok(AnalysisResult {
            category: record.category,
            region,
            connection,
            estimated_kwh,
            cost: quote.cost,
            usage_tier: tier_decision.tier,
            tier_advice: tier_decision.tier.advice().to_string(),
            recommendations,
            quote,
            tier_decision,
            trace,
        })
    }
}

/// Every numeric field must be finite and non-negative.
pub fn validate_record(record: &UsageRecord) -> Result<(), EcoWattError> {
    for (field, value) in &record.fields {
        if let UsageValue::Number(v) = value {
            if !v.is_finite() {
                return Err(EcoWattError::invalid_input(
                    field.as_str(),
                    format!("{} is not a finite number", v),
                ));
            }
            if *v < 0.0 {
                return Err(EcoWattError::invalid_input(
                    field.as_str(),
                    format!("{} is negative", v),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PremisesCategory, SamplingPeriod};
    use crate::predict::FixedPredictor;
    use crate::profile::builtin::builtin_profile;
    use crate::tariff::builtin::builtin_tariff;
    use rust_decimal_macros::dec;

    fn home_pipeline() -> AnalysisPipeline<'static> {
        AnalysisPipeline::new(builtin_tariff(), builtin_profile(PremisesCategory::Home))
    }

    #[test]
    fn test_validate_rejects_negative_field() {
        let record = UsageRecord::new(PremisesCategory::Home, SamplingPeriod::Weekly)
            .with_number("tv_hours", -1.0);
        match validate_record(&record).unwrap_err() {
            EcoWattError::InvalidInput { field, .. } => assert_eq!(field, "tv_hours"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_ignores_labels() {
        let record = UsageRecord::new(PremisesCategory::Home, SamplingPeriod::Weekly)
            .with_label("fridge_type", "-1");
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_category_mismatch_rejected() {
        let record = UsageRecord::new(PremisesCategory::Shop, SamplingPeriod::Weekly);
        let err = home_pipeline()
            .run(
                &record,
                Region::Delhi,
                ConnectionClass::Domestic,
                &FixedPredictor::new(100.0),
            )
            .unwrap_err();
        assert!(matches!(err, EcoWattError::InvalidInput { .. }));
    }

    #[test]
    fn test_negative_prediction_is_unavailable() {
        let record = UsageRecord::new(PremisesCategory::Home, SamplingPeriod::Weekly);
        let err = home_pipeline()
            .run(
                &record,
                Region::Delhi,
                ConnectionClass::Domestic,
                &FixedPredictor::new(-3.0),
            )
            .unwrap_err();
        assert!(matches!(err, EcoWattError::PredictionUnavailable(_)));
    }

    #[test]
    fn test_trace_has_every_step() {
        let record = UsageRecord::new(PremisesCategory::Home, SamplingPeriod::Weekly)
            .with_number("ac_hours", 20.0);
        let result = home_pipeline()
            .run(
                &record,
                Region::Karnataka,
                ConnectionClass::Domestic,
                &FixedPredictor::new(90.0),
            )
            .unwrap();
        assert_eq!(result.trace.steps.len(), 5);
        assert_eq!(result.cost, dec!(90) * dec!(5.8) + dec!(120));
        assert_eq!(result.usage_tier, crate::model::UsageTier::Low);
    }
}
