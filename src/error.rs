//! Error types.

/// Error enumerates the possible blog post service error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when clients `POST` the [posts collection][crate::api#posts-post] without one of
    /// the required `title`, `content` or `author` fields.
    #[error("Missing `{0}` in request body")]
    MissingField(&'static str),

    /// Returned when a field in a request body is present but can't be read as the expected
    /// type, e.g. an `author` that isn't an object.
    #[error("Invalid request body: {0}")]
    InvalidField(serde_json::Error),

    /// Returned when clients `PUT` a [post][crate::api#postsid-put] with a body `id` that is
    /// missing or differs from the id in the request path.
    #[error("Request path id ({path}) and request body id ({body}) must match")]
    IdMismatch { path: String, body: String },

    /// Returned when a path id can't be parsed as a [`PostId`][crate::post::PostId].
    #[error("invalid blog post id: \"{0}\"")]
    InvalidPostId(String),

    /// Returned when no blog post exists with the requested id.
    #[error("no blog post with id \"{0}\"")]
    NotFound(String),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g. when
    /// [trying to load a `Config`][crate::config::Config::try_from_file], or
    /// [trying to load a `FilePostStore`][crate::post_store::file::FilePostStore::try_from_file])
    /// fails due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
