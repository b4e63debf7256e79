use ecowatt_core::error::EcoWattError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const CONFIG_ENV: &str = "ECOWATT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "ecowatt.toml";

/// Optional settings read from a TOML file. Command-line flags win over these.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Region used when neither a flag nor the input document names one.
    pub default_region: Option<String>,
    /// Custom tariff replacing the built-in rates.
    pub tariff_file: Option<PathBuf>,
    /// Prediction command line, e.g. `"python3 predict.py"`.
    pub predictor_command: Option<String>,
    /// Output format: `table` or `json`.
    pub output: Option<String>,
}

impl AppConfig {
    /// Load from `$ECOWATT_CONFIG`, else `./ecowatt.toml` if it exists, else defaults.
    ///
    /// A path named by the environment variable must exist.
    pub fn load() -> Result<Self, EcoWattError> {
        match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(AppConfig::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, EcoWattError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EcoWattError::Config(format!("{}: {}", path.display(), e)))?;
        let cfg: AppConfig = toml::from_str(&contents)
            .map_err(|e| EcoWattError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Flag value, else the configured format, else `table`.
    pub fn output_format<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.output.as_deref()).unwrap_or("table")
    }
}
