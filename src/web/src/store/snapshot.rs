use async_compression::tokio::write::GzipEncoder;
use database::SNAPSHOT_FILE;
use league_core::LeagueData;
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Background gzip snapshots of the store. Writes never overlap, and a
/// snapshot older than the one already on disk is dropped.
pub struct SnapshotWriter {
    path: Option<PathBuf>,
    generation: AtomicU64,
    written: Arc<Mutex<u64>>,
}

impl SnapshotWriter {
    pub fn new(data_dir: Option<&Path>) -> Self {
        SnapshotWriter {
            path: data_dir.map(|dir| dir.join(SNAPSHOT_FILE)),
            generation: AtomicU64::new(0),
            written: Arc::new(Mutex::new(0)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Call while still holding the store lock so generations follow mutation order.
    pub fn schedule(&self, data: LeagueData) {
        let Some(path) = self.path.clone() else {
            return;
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let written = Arc::clone(&self.written);

        tokio::spawn(async move {
            if let Err(e) = Self::write_generation(&path, generation, &data, &written).await {
                error!("snapshot write to {} failed: {}", path.display(), e);
            }
        });
    }

    /// Writes `data` unless a newer generation is already on disk. Returns whether it wrote.
    async fn write_generation(
        path: &Path,
        generation: u64,
        data: &LeagueData,
        written: &Mutex<u64>,
    ) -> std::io::Result<bool> {
        let mut last = written.lock().await;

        if generation <= *last {
            debug!("snapshot: generation {} superseded by {}", generation, *last);
            return Ok(false);
        }

        Self::write(path, data).await?;
        *last = generation;

        Ok(true)
    }

    pub async fn write(path: &Path, data: &LeagueData) -> std::io::Result<()> {
        let now = Instant::now();

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let tmp = path.with_extension("gz.tmp");

        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp)
            .await?;

        let mut compressed_file = GzipEncoder::with_quality(file, async_compression::Level::Best);

        let file_data = serde_json::to_vec(data).map_err(std::io::Error::other)?;

        compressed_file.write_all(&file_data).await?;
        compressed_file.shutdown().await?;

        tokio::fs::rename(&tmp, path).await?;

        debug!(
            "snapshot: {} bytes written to {} in {} ms",
            file_data.len(),
            path.display(),
            now.elapsed().as_millis()
        );

        Ok(())
    }
}
