//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binaries can prepare the store's
//! data directory without depending directly on `common`.

use configs::{StoreBackend, StoreConfig};

/// Make sure the directory of a file-backed store exists.
pub async fn ensure_env(cfg: &StoreConfig) -> anyhow::Result<()> {
    if cfg.backend != StoreBackend::File {
        return Ok(());
    }
    let parent = std::path::Path::new(&cfg.data_file)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    if parent.is_empty() {
        return Ok(());
    }
    common::env::ensure_data_dir(&parent).await
}
