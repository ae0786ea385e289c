pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

pub use crate::core::config;

use crate::core::assets::{Category, EntryUpdate, NewEntry};
use crate::core::units::MetalUnit;
use crate::providers::metals_live::MetalsLiveProvider;
use crate::store::{KeyValueStore, SnapshotStore};
use anyhow::Result;
use tracing::{debug, info};

/// One user action on the calculator.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Summary,
    Countries,
    SelectCountry(String),
    Add { category: Category, entry: NewEntry },
    Update { id: u64, update: EntryUpdate },
    Remove(u64),
    Reset,
    Convert {
        weight: f64,
        from: MetalUnit,
        to: MetalUnit,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Zakat calculator starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = MetalsLiveProvider::new(config.metals_base_url());
    let default_country = config.country.as_str();

    match command {
        AppCommand::Summary => {
            let snapshots = open_snapshots(&config)?;
            cli::summary::run(&snapshots, &provider, default_country).await
        }
        AppCommand::Countries => {
            let snapshots = open_snapshots(&config)?;
            cli::country::list(&snapshots, default_country).await
        }
        AppCommand::SelectCountry(query) => {
            let snapshots = open_snapshots(&config)?;
            cli::country::select(&snapshots, &provider, default_country, &query).await
        }
        AppCommand::Add { category, entry } => {
            let snapshots = open_snapshots(&config)?;
            cli::entries::add(&snapshots, default_country, category, entry)
                .await
                .map(|_| ())
        }
        AppCommand::Update { id, update } => {
            let snapshots = open_snapshots(&config)?;
            cli::entries::update(&snapshots, default_country, id, update).await
        }
        AppCommand::Remove(id) => {
            let snapshots = open_snapshots(&config)?;
            cli::entries::remove(&snapshots, default_country, id).await
        }
        AppCommand::Reset => {
            let snapshots = open_snapshots(&config)?;
            cli::entries::reset(&snapshots, default_country)
                .await
                .map(|_| ())
        }
        AppCommand::Convert { weight, from, to } => {
            cli::convert::run(weight, from, to);
            Ok(())
        }
    }
}

/// Opens the snapshot store under the configured data path. Conversions
/// never touch it.
fn open_snapshots(config: &config::AppConfig) -> Result<SnapshotStore> {
    let store = KeyValueStore::open(&config.default_data_path()?)?;
    SnapshotStore::new(&store)
}
