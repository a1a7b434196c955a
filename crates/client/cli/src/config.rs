//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Inputs for one scenario replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Catalog file merged over the standard set.
    pub catalog: Option<PathBuf>,
    pub scenario: PathBuf,
    /// Encounter configuration (TOML).
    pub encounter: Option<PathBuf>,
    /// Overrides `max_rounds` from the encounter configuration.
    pub max_rounds: Option<u32>,
}

impl CliConfig {
    pub const DEFAULT_SCENARIO: &'static str = "data/scenario.ron";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONDITIONS_CATALOG` - Catalog file (.json, .ron or .toml) layered over the standard set
    /// - `CONDITIONS_SCENARIO` - Scenario file (default: data/scenario.ron)
    /// - `CONDITIONS_CONFIG` - Encounter configuration TOML (default: built-in defaults)
    /// - `CONDITIONS_MAX_ROUNDS` - Round cap override
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.catalog = env::var("CONDITIONS_CATALOG").ok().map(PathBuf::from);
        if let Ok(path) = env::var("CONDITIONS_SCENARIO") {
            config.scenario = PathBuf::from(path);
        }
        config.encounter = env::var("CONDITIONS_CONFIG").ok().map(PathBuf::from);
        config.max_rounds = read_env::<u32>("CONDITIONS_MAX_ROUNDS");

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            scenario: PathBuf::from(Self::DEFAULT_SCENARIO),
            encounter: None,
            max_rounds: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
