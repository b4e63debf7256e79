use ecowatt_core::error::EcoWattError;
use ecowatt_core::model::{ConnectionClass, Region};
use ecowatt_core::tariff::builtin::builtin_tariff;
use ecowatt_core::tariff::load_tariff;
use ecowatt_core::tariff::schema::{BracketDef, TariffDef};
use std::path::Path;

use crate::config::AppConfig;

pub fn list() -> Result<(), EcoWattError> {
    let tariff = builtin_tariff();
    println!("{} (v{})", tariff.name, tariff.version);
    if let Some(ref desc) = tariff.description {
        println!("{}", desc);
    }
    println!();

    for (class, def) in &tariff.classes {
        let code = def.code.as_deref().unwrap_or("-");
        println!("  {:<12} {:<6} fixed charge {}", class.to_string(), code, def.fixed_charge);
        let regions: Vec<String> = def.regions.keys().map(Region::to_string).collect();
        println!("               regions: {}", regions.join(", "));
        println!();
    }
    Ok(())
}

pub fn explain(class: &str, file: Option<&Path>, cfg: &AppConfig) -> Result<(), EcoWattError> {
    let class = super::parse_connection(class)?;
    let tariff = super::resolve_tariff(file, cfg)?;
    print_class(&tariff, class)
}

fn print_class(tariff: &TariffDef, class: ConnectionClass) -> Result<(), EcoWattError> {
    let def = tariff.class(class).ok_or_else(|| {
        EcoWattError::TariffInvalid(format!("tariff '{}' has no {} rates", tariff.name, class))
    })?;

    match def.code {
        Some(ref code) => println!("{} tariff {} ({})\n", class, code, tariff.name),
        None => println!("{} tariff ({})\n", class, tariff.name),
    }
    println!("The whole month's consumption is billed at the rate of the slab it");
    println!("falls into, plus a fixed charge of {} per month.", def.fixed_charge);
    println!("Regions without their own table use the Others rates.\n");

    let max_name = def
        .regions
        .keys()
        .map(|r| r.to_string().len())
        .max()
        .unwrap_or(10);

    print!("  {:<width$}", "Region", width = max_name + 2);
    if let Some(brackets) = def.regions.values().next() {
        for b in brackets {
            print!("  {:<10}", slab_label(b));
        }
    }
    println!();
    println!("  {}", "-".repeat(max_name + 2 + 12 * 3));

    for (region, brackets) in &def.regions {
        print!("  {:<width$}", region.to_string(), width = max_name + 2);
        for b in brackets {
            print!("  {:<10}", b.rate);
        }
        println!();
    }
    println!();
    Ok(())
}

fn slab_label(b: &BracketDef) -> String {
    match b.up_to {
        Some(bound) => format!("<= {}", bound),
        None => "above".to_string(),
    }
}

pub fn validate(file: &Path) -> Result<(), EcoWattError> {
    let tariff = load_tariff(file)?;

    println!("Tariff '{}' (v{}) is valid.", tariff.name, tariff.version);
    let mut warnings = Vec::new();
    for (class, def) in &tariff.classes {
        println!("  {}: {} region table(s)", class, def.regions.len());
        for region in Region::ALL {
            if !def.regions.contains_key(&region) {
                warnings.push(format!("{} has no table for {}; Others rates apply", class, region));
            }
        }
    }
    for class in ConnectionClass::ALL {
        if tariff.class(class).is_none() {
            warnings.push(format!("no {} rates; pricing that class will fail", class));
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
