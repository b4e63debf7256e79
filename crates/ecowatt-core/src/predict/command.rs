use crate::error::EcoWattError;
use crate::model::UsageRecord;
use crate::predict::KwhPredictor;
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// Prediction backend that shells out to an external model.
///
/// The monthly record is written as JSON to a temporary file whose path is
/// passed as the last argument. The program must print the estimated kWh as
/// a single number on stdout.
#[derive(Debug, Clone)]
pub struct CommandPredictor {
    program: String,
    args: Vec<String>,
}

impl CommandPredictor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandPredictor {
            program: program.into(),
            args,
        }
    }

    /// Build from a whitespace-separated command line, e.g. `"python3 predict.py --model homes"`.
    pub fn from_command_line(line: &str) -> Result<Self, EcoWattError> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| EcoWattError::Config("predictor command is empty".into()))?;
        Ok(CommandPredictor::new(program, parts.collect()))
    }
}

impl KwhPredictor for CommandPredictor {
    fn predict(&self, monthly: &UsageRecord) -> Result<f64, EcoWattError> {
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| EcoWattError::PredictionUnavailable(e.to_string()))?;
        let payload = serde_json::to_vec(monthly)?;
        tmpfile
            .write_all(&payload)
            .map_err(|e| EcoWattError::PredictionUnavailable(e.to_string()))?;

        debug!(program = %self.program, input = %tmpfile.path().display(), "running predictor");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(tmpfile.path())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EcoWattError::PredictionUnavailable(format!(
                        "predictor program '{}' not found",
                        self.program
                    ))
                } else {
                    EcoWattError::PredictionUnavailable(format!(
                        "failed to run '{}': {}",
                        self.program, e
                    ))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EcoWattError::PredictionUnavailable(format!(
                "'{}' exited with code {}: {}",
                self.program,
                code,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_prediction(&stdout)
    }

    fn backend_name(&self) -> &str {
        &self.program
    }
}

/// Parse the last non-empty line of predictor output as a number.
fn parse_prediction(stdout: &str) -> Result<f64, EcoWattError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .ok_or_else(|| EcoWattError::PredictionUnavailable("predictor printed nothing".into()))?;
    line.parse::<f64>().map_err(|_| {
        EcoWattError::PredictionUnavailable(format!("predictor output '{}' is not a number", line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PremisesCategory, SamplingPeriod};

    fn record() -> UsageRecord {
        UsageRecord::new(PremisesCategory::Home, SamplingPeriod::Monthly)
            .with_number("ac_hours", 645.0)
    }

    #[test]
    fn test_parse_prediction_last_line() {
        assert_eq!(parse_prediction("loading model\n 251.5 \n\n").unwrap(), 251.5);
    }

    #[test]
    fn test_parse_prediction_rejects_text() {
        assert!(matches!(
            parse_prediction("oops"),
            Err(EcoWattError::PredictionUnavailable(_))
        ));
        assert!(parse_prediction("   \n").is_err());
    }

    #[test]
    fn test_from_command_line_splits_args() {
        let p = CommandPredictor::from_command_line("python3 predict.py --model homes").unwrap();
        assert_eq!(p.backend_name(), "python3");
        assert_eq!(p.args, vec!["predict.py", "--model", "homes"]);
        assert!(CommandPredictor::from_command_line("   ").is_err());
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let p = CommandPredictor::new("ecowatt-no-such-predictor", vec![]);
        let err = p.predict(&record()).unwrap_err();
        match err {
            EcoWattError::PredictionUnavailable(msg) => assert!(msg.contains("not found")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_is_parsed() {
        let p = CommandPredictor::new("sh", vec!["-c".into(), "echo 250".into()]);
        assert_eq!(p.predict(&record()).unwrap(), 250.0);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_record_file() {
        // The temp file path arrives as $0 for `sh -c`.
        let p = CommandPredictor::new(
            "sh",
            vec![
                "-c".into(),
                r#"grep -q '"ac_hours":645' "$0" && echo 1 || echo 0"#.into(),
            ],
        );
        assert_eq!(p.predict(&record()).unwrap(), 1.0);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_unavailable() {
        let p = CommandPredictor::new("sh", vec!["-c".into(), "echo boom >&2; exit 3".into()]);
        let err = p.predict(&record()).unwrap_err();
        match err {
            EcoWattError::PredictionUnavailable(msg) => {
                assert!(msg.contains("code 3"));
                assert!(msg.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
