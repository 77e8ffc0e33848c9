//! Blog Posts
//!
//! A small JSON CRUD service for blog posts backed by a document collection.
//!
//! The [HTTP API][crate::api] validates request bodies and passes each request through to a
//! single [`PostStore`][crate::post_store::PostStore] query. Posts are kept in memory or, when
//! a state path is configured, in a JSON file that is reloaded across restarts.
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod post;
pub mod post_store;

use crate::post_store::{file, memory};
pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use file::FilePostStore;
pub use memory::InMemoryPostStore;
