//! Configuration resolved from the command line and environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use flix_core::{Authenticator, BaseCatalog, ContentStore};
use flix_file::FileStorage;

use crate::cli::Cli;

/// Catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

/// Everything a command needs to reach the catalog.
#[derive(Debug)]
pub struct AppContext {
    pub data_dir: PathBuf,
    pub storage: FileStorage,
    pub base: BaseCatalog,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        let base = match &cli.catalog {
            Some(path) => BaseCatalog::from_path(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            None => BaseCatalog::from_json_str(BUNDLED_CATALOG)
                .context("Bundled catalog is invalid")?,
        };

        debug!(data_dir = %data_dir.display(), records = base.len(), "Resolved configuration");

        Ok(Self {
            storage: FileStorage::new(&data_dir),
            data_dir,
            base,
        })
    }

    /// A loaded content store over the shared storage.
    pub fn store(&self) -> ContentStore<FileStorage> {
        ContentStore::open(self.base.clone(), self.storage.clone())
    }

    pub fn auth(&self) -> Authenticator<FileStorage> {
        Authenticator::new(self.storage.clone())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "bahamaflix").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
