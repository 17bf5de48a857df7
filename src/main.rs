use chrono::Local;
use database::{DatabaseGenerator, DatabaseLoader, SnapshotLoader, SNAPSHOT_FILE};
use env_logger::Env;
use league_core::utils::TimeEstimation;
use league_core::LeagueData;
use log::info;
use web::{LeagueAppData, LeagueServer, ServerConfig};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn load_data(config: &ServerConfig) -> color_eyre::Result<LeagueData> {
    let snapshot = config
        .data_dir
        .as_ref()
        .and_then(|dir| SnapshotLoader::load(&dir.join(SNAPSHOT_FILE)));

    if let Some(data) = snapshot {
        info!(
            "snapshot loaded: {} teams, {} matches, {} transactions",
            data.teams.len(),
            data.matches.len(),
            data.transactions.len()
        );
        return Ok(data);
    }

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);
    let database = database?;

    info!("database loaded: {} ms", estimated);

    Ok(DatabaseGenerator::generate(&database, Local::now().date_naive()))
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| String::from("unknown"));

    info!("league manager {} starting on {}", env!("CARGO_PKG_VERSION"), host);

    let config = ServerConfig::from_env();
    let data = load_data(&config)?;

    LeagueServer::new(LeagueAppData::new(data, config)).run().await?;

    Ok(())
}
