use crate::model::{SamplingPeriod, UsageRecord, UsageValue};
use crate::profile::schema::PremisesProfileDef;

/// Weeks in an average month (30.1 days / 7).
pub const WEEKS_PER_MONTH: f64 = 4.3;

/// Scale a weekly record to monthly figures.
///
/// Every field in the profile's scaling list is multiplied by
/// [`WEEKS_PER_MONTH`]; absent scaled fields are written as 0. All other
/// fields are copied unchanged. A record that is already monthly is returned
/// as-is.
pub fn aggregate(record: &UsageRecord, profile: &PremisesProfileDef) -> UsageRecord {
    let mut monthly = record.clone();
    if record.sampling == SamplingPeriod::Monthly {
        return monthly;
    }

    for field in &profile.scaled_fields {
        let weekly = record.number(field);
        monthly
            .fields
            .insert(field.clone(), UsageValue::Number(weekly * WEEKS_PER_MONTH));
    }
    monthly.sampling = SamplingPeriod::Monthly;
    monthly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PremisesCategory;
    use crate::profile::builtin::builtin_profile;

    fn home_record() -> UsageRecord {
        UsageRecord::new(PremisesCategory::Home, SamplingPeriod::Weekly)
            .with_number("ac_hours", 150.0)
            .with_number("fan_hours", 40.0)
            .with_number("residents", 4.0)
            .with_label("fridge_type", "Double Door 4★")
    }

    #[test]
    fn test_scaled_fields_multiplied() {
        let profile = builtin_profile(PremisesCategory::Home);
        let record = home_record();
        let monthly = aggregate(&record, profile);
        assert_eq!(monthly.number("ac_hours"), 150.0 * WEEKS_PER_MONTH);
        assert!((monthly.number("ac_hours") - 645.0).abs() < 1e-9);
        assert_eq!(monthly.number("fan_hours"), 40.0 * WEEKS_PER_MONTH);
        assert_eq!(monthly.sampling, SamplingPeriod::Monthly);
    }

    #[test]
    fn test_other_fields_pass_through() {
        let profile = builtin_profile(PremisesCategory::Home);
        let monthly = aggregate(&home_record(), profile);
        assert_eq!(monthly.number("residents"), 4.0);
        assert_eq!(monthly.label("fridge_type"), Some("Double Door 4★"));
    }

    #[test]
    fn test_absent_scaled_fields_default_to_zero() {
        let profile = builtin_profile(PremisesCategory::Home);
        let monthly = aggregate(&home_record(), profile);
        assert_eq!(
            monthly.fields.get("geyser_minutes"),
            Some(&UsageValue::Number(0.0))
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let profile = builtin_profile(PremisesCategory::Shop);
        let record = UsageRecord::new(PremisesCategory::Shop, SamplingPeriod::Weekly)
            .with_number("light_hours", 70.0);
        let before = record.clone();
        let _ = aggregate(&record, profile);
        assert_eq!(record, before);
    }

    #[test]
    fn test_monthly_record_unchanged() {
        let profile = builtin_profile(PremisesCategory::Office);
        let record = UsageRecord::new(PremisesCategory::Office, SamplingPeriod::Monthly)
            .with_number("pc_hours", 900.0);
        assert_eq!(aggregate(&record, profile), record);
    }

    #[test]
    fn test_every_scaled_field_per_category() {
        for category in PremisesCategory::ALL {
            let profile = builtin_profile(category);
            let mut record = UsageRecord::new(category, SamplingPeriod::Weekly)
                .with_number("unrelated", 3.0);
            for (i, field) in profile.scaled_fields.iter().enumerate() {
                record = record.with_number(field, (i + 1) as f64 * 10.0);
            }
            let monthly = aggregate(&record, profile);
            for field in &profile.scaled_fields {
                assert_eq!(
                    monthly.number(field),
                    record.number(field) * WEEKS_PER_MONTH,
                    "{category} / {field}"
                );
            }
            assert_eq!(monthly.number("unrelated"), 3.0);
        }
    }
}
