use ecowatt_core::error::EcoWattError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), EcoWattError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
