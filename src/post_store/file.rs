//! A JSON file-backed implementation of the [`PostStore`][super::PostStore] trait.
//!
//! Wraps an [`InMemoryPostStore`][super::memory::InMemoryPostStore] instance, persisting
//! changes to a JSON file on disk that can be reloaded across restarts.
use crate::error::Error;
use crate::post::{BlogPost, NewPost, PostId, PostUpdate};
use crate::post_store::memory::InMemoryPostStore;
use crate::post_store::PostStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// A file-backed blog post collection. Every change is made on a staged copy of the collection,
/// written to disk, and only then becomes visible. A failed write leaves both the file and the
/// in-memory collection as they were.
#[derive(Default, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FilePostStore {
    post_store: InMemoryPostStore,
    path: PathBuf,
}

impl FilePostStore {
    /// Write the current collection to the store's path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if a post can't be serialized, or [`Error::IO`] if the
    /// state file can't be written.
    pub async fn save(&self) -> Result<(), Error> {
        write_state(&self.path, &self.post_store).await
    }

    /// Open the collection stored at `p`. A missing file is created holding an empty
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if the state file doesn't hold a collection, or
    /// [`Error::IO`] if it can't be read or created.
    pub async fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let path = p.as_ref().to_path_buf();
        let post_store: InMemoryPostStore = match fs::read(&path).await {
            Ok(contents) => serde_json::from_slice(&contents)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!("creating empty post store state at {}", path.display());
                let empty = InMemoryPostStore::default();
                write_state(&path, &empty).await?;
                empty
            }
            Err(err) => return Err(Error::IO(err)),
        };
        Ok(Self { post_store, path })
    }

    /// Persist `staged` and make it the live collection.
    async fn commit(&mut self, staged: InMemoryPostStore) -> Result<(), Error> {
        write_state(&self.path, &staged).await?;
        self.post_store = staged;
        Ok(())
    }
}

/// Replace the state file at `path` with `posts`. The data goes to a sibling temporary file
/// first and is renamed over the old state, so readers never see a partial file.
async fn write_state(path: &Path, posts: &InMemoryPostStore) -> Result<(), Error> {
    let data = serde_json::to_vec_pretty(posts)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    let mut f = fs::File::create(&staging).await?;
    f.write_all(&data).await?;
    f.sync_all().await?;
    fs::rename(&staging, path).await?;
    tracing::debug!("saved post store state to {}", path.display());
    Ok(())
}

#[async_trait::async_trait]
impl PostStore for FilePostStore {
    async fn list(&self, limit: usize) -> Result<Vec<BlogPost>, Error> {
        self.post_store.list(limit).await
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<BlogPost>, Error> {
        self.post_store.find_by_id(id).await
    }

    async fn create(&mut self, new_post: NewPost) -> Result<BlogPost, Error> {
        let mut staged = self.post_store.clone();
        let post = staged.create(new_post).await?;
        self.commit(staged).await?;
        Ok(post)
    }

    async fn update(
        &mut self,
        id: &PostId,
        update: PostUpdate,
    ) -> Result<Option<BlogPost>, Error> {
        let mut staged = self.post_store.clone();
        let post = staged.update(id, update).await?;
        if post.is_some() {
            self.commit(staged).await?;
        }
        Ok(post)
    }

    async fn delete(&mut self, id: &PostId) -> Result<Option<BlogPost>, Error> {
        let mut staged = self.post_store.clone();
        let post = staged.delete(id).await?;
        if post.is_some() {
            self.commit(staged).await?;
        }
        Ok(post)
    }
}
