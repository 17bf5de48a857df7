use flate2::read::GzDecoder;
use league_core::finance::Ledger;
use league_core::LeagueData;
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const SNAPSHOT_FILE: &str = "league.json.gz";

pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Reads a gzip JSON snapshot. A missing or unreadable file yields `None`.
    pub fn load(path: &Path) -> Option<LeagueData> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => {
                info!("no snapshot at {}", path.display());
                return None;
            }
        };

        let decoder = GzDecoder::new(BufReader::new(file));

        match serde_json::from_reader::<_, LeagueData>(decoder) {
            Ok(mut data) => {
                data.reindex();
                Ledger::recalculate_all(&mut data);
                Some(data)
            }
            Err(e) => {
                warn!("snapshot {} is unreadable: {}", path.display(), e);
                None
            }
        }
    }
}
