use crate::error::Error;
use crate::post_store::{DynPostStore, FilePostStore, InMemoryPostStore};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    pub post_store_state_path: Option<String>,
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// Open the post store described by this config: file-backed when
    /// [`Config::post_store_state_path`] is set, in-memory otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file-backed store state can't be read or created.
    pub async fn post_store(&self) -> Result<DynPostStore, Error> {
        let post_store: DynPostStore = match &self.post_store_state_path {
            Some(path) => {
                tracing::info!("loading post store state from {path}");
                Arc::new(RwLock::new(FilePostStore::try_from_file(path).await?))
            }
            None => {
                tracing::warn!("no post store state path configured, posts will not be persisted");
                Arc::new(RwLock::new(InMemoryPostStore::default()))
            }
        };
        Ok(post_store)
    }
}
