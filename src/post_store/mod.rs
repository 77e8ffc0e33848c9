//! Blog post document storage.
//!
//! Supports a generic interface over a single collection of [`BlogPost`] documents.
//!
//! Two implementations are provided, [`memory::InMemoryPostStore`] and [`file::FilePostStore`].
//! The former is not durable across restarts. The latter will write its state to disk for each
//! change and load this state again on startup.

use crate::error::Error;
use crate::post::{BlogPost, NewPost, PostId, PostUpdate};
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod file;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use file::FilePostStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryPostStore;

/// `DynPostStore` is a type alias for a [`PostStore`] that can be used by multiple read/write
/// consumers that coordinate through an [`Arc`] and a [`RwLock`] wrapping the [`PostStore`].
#[allow(clippy::module_name_repetitions)]
pub type DynPostStore = Arc<RwLock<dyn PostStore + Send + Sync>>;

/// An async trait describing a collection of [`BlogPost`] documents.
///
/// Each method maps to a single collection query. Lookups by id that match nothing return
/// `Ok(None)`; it is up to the caller to decide whether that is an error.
#[async_trait::async_trait]
pub trait PostStore {
    /// Up to `limit` posts, oldest first.
    async fn list(&self, limit: usize) -> Result<Vec<BlogPost>, Error>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<BlogPost>, Error>;

    /// Insert a new post, assigning its id and creation time, and return the stored document.
    async fn create(&mut self, new_post: NewPost) -> Result<BlogPost, Error>;

    /// Overwrite the fields present in `update` on the post with the given id, returning the
    /// updated document.
    async fn update(&mut self, id: &PostId, update: PostUpdate)
        -> Result<Option<BlogPost>, Error>;

    /// Remove the post with the given id, returning the removed document.
    async fn delete(&mut self, id: &PostId) -> Result<Option<BlogPost>, Error>;
}
