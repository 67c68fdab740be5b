use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::rules::Rules;
use crate::variable::Variables;

/// Samples in the output universe when none is configured
pub const DEFAULT_RESOLUTION: usize = 1001;
/// How far below the peak a membership may sit and still count as maximal
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Output universe used when no output term has any knots
pub const DEFAULT_UNIVERSE: (f64, f64) = (0., 10.);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No linguistic variable named {0:?}")]
    MissingVariable(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tunables of the inference pipeline
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Number of samples in the discretized output universe
    pub resolution: usize,
    /// Plateau detection tolerance used by middle of maximum
    pub tolerance: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Variables {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vars = Self::from_json_str(fs::read_to_string(path)?.trim())?;

        let names: Vec<_> = vars.names().collect();

        info!(path = %path.display(), variables = ?names, "loaded linguistic variables");

        Ok(vars)
    }
}

impl Rules {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rules = Self::from_json_str(fs::read_to_string(path)?.trim())?;

        info!(path = %path.display(), rules = rules.len(), "loaded rule base");

        Ok(rules)
    }
}

#[test]
fn test_variables_from_json() {
    let json = r#"{
        "температура": [
            {"id": "холодно", "points": [[0, 1], [18, 1], [22, 0]]},
            {"id": "комфортно", "points": [[18, 0], [22, 1], [24, 1], [26, 0]]}
        ]
    }"#;
    let vars = Variables::from_json_str(json).unwrap();
    let temperature = vars.get("температура").unwrap();

    assert_eq!(temperature.len(), 2);
    assert_eq!(temperature.get("холодно").map(|t| t.degree(20.)), Some(0.5));
    assert!(matches!(vars.get("нагрев"), Err(ConfigError::MissingVariable(_))));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(Variables::from_json_str("{\"t\": [{\"id\": 1}]}"), Err(ConfigError::Json(_))));
    assert!(matches!(Rules::from_json_str("[[\"cold\"]]"), Err(ConfigError::Json(_))));
    assert!(matches!(Rules::from_json_str("not json"), Err(ConfigError::Json(_))));
}

#[test]
fn test_missing_file() {
    assert!(matches!(Rules::load("/nonexistent/rules.json"), Err(ConfigError::Io(_))));
}

#[test]
fn test_inference_config_defaults() {
    let config: InferenceConfig = serde_json::from_str(r#"{"resolution": 11}"#).unwrap();

    assert_eq!(config.resolution, 11);
    assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    assert_eq!(InferenceConfig::default().resolution, DEFAULT_RESOLUTION);
}

#[test]
fn test_load_demo_documents() {
    use approx::assert_relative_eq;

    use crate::inference::MamdaniInference;

    let demos = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");
    let inputs = Variables::load(format!("{demos}/lvinput.json")).unwrap();
    let outputs = Variables::load(format!("{demos}/lvoutput.json")).unwrap();
    let rules = Rules::load(format!("{demos}/rules.json")).unwrap();
    let temperature = inputs.get("температура").unwrap();
    let heating = outputs.get("нагрев").unwrap();

    assert_eq!(rules.len(), 3);

    let controls = MamdaniInference::default().eval_many(&[19., 10., 30.], temperature, heating, &rules);

    assert_relative_eq!(controls[0], 5., epsilon = 1e-9);
    assert_relative_eq!(controls[1], 8.5, epsilon = 1e-9);
    assert_relative_eq!(controls[2], 1.5, epsilon = 1e-9);
}
