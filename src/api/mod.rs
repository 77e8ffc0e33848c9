//! HTTP API for managing blog posts.
//!
//! All request and response bodies are JSON. Error responses have the form
//! `{"message": "..."}`. Failures other than the client errors listed below are reported as
//! HTTP 500 (Internal Server Error) with a generic message naming the method.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/posts` (GET)
//!
//!   Returns HTTP 200 (OK) and a JSON array of up to 99 posts, oldest first, each of the form:
//!
//!   ```json
//!   {
//!     "id": "0d9f7d4a-3c0e-4d4b-9a39-5b0e6f7c2a11",
//!     "title": "some title",
//!     "content": "a bunch of amazing words",
//!     "author": { "firstName": "Sarah", "lastName": "Clarke" },
//!     "created": "2026-10-18T12:00:00Z"
//!   }
//!   ```
//!
//! ## `/posts` (POST)
//!
//!   Expects a JSON request body of the form:
//!
//!   ```json
//!   {
//!     "title": "some title",
//!     "content": "a bunch of amazing words",
//!     "author": { "firstName": "Sarah", "lastName": "Clarke" }
//!   }
//!   ```
//!
//!   Returns HTTP 400 (Bad Request) naming the first of `title`, `content` or `author` that is
//!   missing, or describing a field of the wrong type. On success returns HTTP 201 (Created)
//!   and the new post.
//!
//! ## `/posts/:id` (GET)
//!
//!   Returns HTTP 200 (OK) and the post. An unknown or malformed id is reported as HTTP 500.
//!
//! ## `/posts/:id` (PUT)
//!
//!   Expects a JSON request body carrying the same `id` as the path, plus any of `title`,
//!   `content` and `author` to overwrite:
//!
//!   ```json
//!   { "id": "0d9f7d4a-3c0e-4d4b-9a39-5b0e6f7c2a11", "title": "New title" }
//!   ```
//!
//!   Returns HTTP 400 (Bad Request) without changing the post if the ids differ. Otherwise
//!   returns HTTP 201 (Created) with an empty body, whether or not a post had the id. A
//!   malformed id is reported as HTTP 500.
//!
//! ## `/posts/:id` (DELETE)
//!
//!   Returns HTTP 204 (No Content), whether or not a post had the id. A malformed id is
//!   reported as HTTP 500.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
