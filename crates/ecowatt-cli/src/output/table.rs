use ecowatt_core::classify::outcome::AnalysisResult;
use ecowatt_core::model::{ConnectionClass, Region};
use ecowatt_core::tariff::{CostPoint, TariffQuote};

pub fn print_analysis(result: &AnalysisResult, verbose: bool) {
    println!(
        "=== {} in {} ({}) ===\n",
        result.category, result.region, result.connection
    );

    println!("  Estimated consumption: {:.2} kWh", result.estimated_kwh);
    println!(
        "  Monthly cost:          {}  ({})",
        result.cost,
        breakdown(&result.quote)
    );
    println!("  Usage tier:            {}", result.usage_tier);
    println!("                         {}\n", result.tier_advice);

    println!("  Recommendations:");
    for r in &result.recommendations {
        println!("    - {}", r);
    }
    println!();

    if !result.trace.warnings.is_empty() {
        println!("  Warnings:");
        for w in &result.trace.warnings {
            println!("    - {}", w.message);
        }
        println!();
    }

    if verbose {
        println!("  Tier: {}", result.tier_decision.reason);
        println!("  Steps:");
        for step in &result.trace.steps {
            println!("    {:<10} {}", format!("{:?}", step.step_type), step.message);
        }
        println!();
    }
}

pub fn print_quote(q: &TariffQuote) {
    let code = q.tariff_code.as_deref().unwrap_or("-");
    println!("=== {} / {} ({}) ===\n", q.region, q.connection, code);
    if q.applied_region != q.region {
        println!("  Rates:        {} (no table for {})", q.applied_region, q.region);
    }
    let slab = match q.bracket_up_to {
        Some(bound) => format!("up to {} kWh", bound),
        None => "open-ended".to_string(),
    };
    println!("  Slab:         #{} ({})", q.bracket_index + 1, slab);
    println!("  Energy:       {} kWh x {} = {}", q.kwh, q.rate, q.energy_charge);
    println!("  Fixed charge: {}", q.fixed_charge);
    println!("  Total:        {}\n", q.cost);
}

pub fn print_curve(points: &[CostPoint], region: Region, connection: ConnectionClass) {
    println!("=== Cost curve: {} / {} ===\n", region, connection);
    println!("  {:>10}  {:>6}  {:>12}", "kWh", "Rate", "Cost");
    println!("  {}", "-".repeat(32));
    for p in points {
        println!(
            "  {:>10}  {:>6}  {:>12}",
            p.kwh,
            p.rate.to_string(),
            p.cost.to_string()
        );
    }
    println!();
}

fn breakdown(q: &TariffQuote) -> String {
    format!("{} kWh x {} + fixed {}", q.kwh, q.rate, q.fixed_charge)
}
