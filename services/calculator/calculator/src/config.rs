use rocket::figment::{providers::Env, Figment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Longest accepted expression, in characters, after trimming
    pub max_length: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig { max_length: 1024 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub calculator: CalculatorConfig,
}

/// Rocket's configuration overlaid with `APP_` environment variables,
/// e.g. `APP_CALCULATOR_MAX_LENGTH` sets `calculator.max_length`
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}
