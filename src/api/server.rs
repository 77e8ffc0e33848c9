use crate::api::routes;
use crate::config::SharedConfig;
use crate::post_store::DynPostStore;
use std::future::Future;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub post_store: DynPostStore,
}

/// Bind the HTTP API to [`Config::api_bind_addr`][crate::config::Config::api_bind_addr] and
/// serve it until the returned future is dropped or fails.
pub fn new(
    config: SharedConfig,
    post_store: DynPostStore,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr)
        .serve(routes::new(AppState { config, post_store }).into_make_service())
}
