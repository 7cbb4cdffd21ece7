//! Writes the default content for every section.
//!
//! Takes no arguments. Content goes to the file store under
//! `$VERDANT_DATA_DIR` (default `./data`).

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use verdant_storage::{ContentStore, FileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,verdant=debug".into()),
        )
        .init();

    let data_dir = std::env::var_os("VERDANT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    tracing::info!(data_dir = %data_dir.display(), "Seeding content");
    let store = ContentStore::new(Arc::new(FileStore::new(&data_dir)));
    let seeded = verdant_seed::seed_all(&store).await?;

    for id in &seeded {
        println!("seeded {id}");
    }
    Ok(())
}
