use ecowatt_core::aggregate::WEEKS_PER_MONTH;
use ecowatt_core::error::EcoWattError;
use ecowatt_core::model::PremisesCategory;
use ecowatt_core::profile::builtin::builtin_profile;
use ecowatt_core::profile::load_profile;
use ecowatt_core::profile::schema::{ConditionDef, Predicate};
use std::path::Path;

pub fn list() -> Result<(), EcoWattError> {
    println!("Built-in premises profiles:\n");
    for category in PremisesCategory::ALL {
        let p = builtin_profile(category);
        println!(
            "  {:<8} {} (v{}) [{}]",
            category.to_string().to_lowercase(),
            p.name,
            p.version,
            p.connection
        );
        if let Some(ref desc) = p.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(category: &str) -> Result<(), EcoWattError> {
    let category =
        PremisesCategory::from_str_loose(category).ok_or_else(|| EcoWattError::InvalidInput {
            field: "category".into(),
            reason: format!("unknown premises category '{}' (expected home, shop or office)", category),
        })?;
    let p = builtin_profile(category);

    println!("{} (version {})\n", p.name, p.version);
    if let Some(ref desc) = p.description {
        println!("{}\n", desc);
    }

    println!(
        "Weekly figures are multiplied by {} before prediction:",
        WEEKS_PER_MONTH
    );
    println!("  {}\n", p.scaled_fields.join(", "));

    println!("Usage tiers (monthly kWh):");
    for (class, t) in &p.thresholds {
        let marker = if *class == p.connection { " (default)" } else { "" };
        println!(
            "  {:<12} Low below {low}, Medium from {low}, High from {high}{}",
            class.to_string(),
            marker,
            low = t.low,
            high = t.high
        );
    }
    println!();

    println!("Recommendations (checked against weekly figures, in this order):");
    for rule in &p.rules {
        let conditions: Vec<String> = rule.conditions.iter().map(describe_condition).collect();
        println!("  {:<20} when {}", rule.appliance, conditions.join(" and "));
    }
    println!("\nIf none apply: {}\n", p.fallback_message);

    Ok(())
}

fn describe_condition(c: &ConditionDef) -> String {
    match c.predicate() {
        Some(Predicate::Above(t)) => format!("{} > {}", c.field, t),
        Some(Predicate::Equals(v)) => format!("{} is \"{}\"", c.field, v),
        Some(Predicate::NotEqual(v)) => format!("{} is not \"{}\"", c.field, v),
        None => format!("{} (invalid condition)", c.field),
    }
}

pub fn validate(file: &Path) -> Result<(), EcoWattError> {
    let p = load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", p.name, p.version);
    println!("  Category: {}", p.category);
    println!("  Scaled fields: {}", p.scaled_fields.len());
    println!("  Rules: {}", p.rules.len());

    let mut warnings = Vec::new();
    for rule in &p.rules {
        for c in &rule.conditions {
            if matches!(c.predicate(), Some(Predicate::Above(_)))
                && !p.scaled_fields.contains(&c.field)
            {
                warnings.push(format!(
                    "rule '{}' tests '{}', which is not a scaled field",
                    rule.appliance, c.field
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
