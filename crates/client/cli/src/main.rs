//! Scenario replay entry point.
mod config;
mod presentation;

use std::sync::Arc;

use anyhow::{Context, Result};
use condition_content::{CatalogLoader, ConfigLoader, standard_catalog};
use condition_core::{ConditionCatalog, EncounterConfig};
use condition_runtime::Scenario;
use config::CliConfig;

fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();

    let catalog = Arc::new(load_catalog(&config)?);
    let encounter_config = load_encounter_config(&config)?;
    let scenario = Scenario::load(&config.scenario)
        .with_context(|| format!("loading scenario {}", config.scenario.display()))?;

    tracing::info!(
        conditions = catalog.len(),
        scenario = %config.scenario.display(),
        max_rounds = encounter_config.max_rounds,
        "starting replay"
    );

    let mut encounter = scenario.encounter(Arc::clone(&catalog))?;
    for report in scenario.replay(&mut encounter, &encounter_config) {
        print!("{}", presentation::round_summary(&report));
    }

    let finals: Vec<_> = encounter
        .entity_ids()
        .filter_map(|id| Some((encounter.name_of(id)?, encounter.conditions(id).ok()?)))
        .collect();
    print!("{}", presentation::final_state(finals));

    Ok(())
}

fn load_catalog(config: &CliConfig) -> Result<ConditionCatalog> {
    let standard = standard_catalog()?;
    match &config.catalog {
        Some(path) => CatalogLoader::merge(standard, path),
        None => Ok(standard),
    }
}

fn load_encounter_config(config: &CliConfig) -> Result<EncounterConfig> {
    let mut encounter = match &config.encounter {
        Some(path) => ConfigLoader::load(path)?,
        None => EncounterConfig::default(),
    };
    if let Some(max_rounds) = config.max_rounds {
        encounter.max_rounds = max_rounds;
    }
    Ok(encounter)
}
