//! The `darkroom sweep` command: maintenance for orphaned temp files.
//!
//! Failed or interrupted writes can strand hidden temp files in the storage
//! root; the atomic-rename discipline guarantees they are never visible at
//! a final asset name, so removing them is always safe when no ingestion is
//! running.

use std::path::PathBuf;

use clap::Args;
use darkroom_core::{AssetStore, Config};

/// Arguments for the `sweep` command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Override the configured storage root
    #[arg(long)]
    pub storage_root: Option<PathBuf>,
}

/// Execute the sweep command.
pub async fn execute(mut args: SweepArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(root) = args.storage_root.take() {
        config.storage.root = root;
    }

    let store = AssetStore::open(config.storage_root(), &config.storage.public_base)?;
    let removed = store.sweep_temp()?;

    tracing::info!("Swept {} temp file(s) from {:?}", removed, store.root());
    println!("Removed {removed} orphaned temp file(s)");
    Ok(())
}
