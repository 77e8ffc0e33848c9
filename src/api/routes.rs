use crate::api::api_error::APIError;
use crate::api::model::{self, JsonObject};
use crate::api::server::AppState;
use crate::error::Error;
use crate::post::{BlogPost, PostId, PostRepr};
use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Most posts returned by a single `GET /posts`.
const LIST_LIMIT: usize = 99;

const LIST_FAILED: &str = "GET Internal server error";
const GET_FAILED: &str = "GET Internal server error or no blog post with that ID";
const CREATE_FAILED: &str = "POST Internal server error";
const UPDATE_FAILED: &str = "PUT Internal server error";
const DELETE_FAILED: &str = "DELETE Internal server error";

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .nest("/posts", posts())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

fn posts() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostRepr>>, APIError> {
    let posts = state
        .post_store
        .read()
        .await
        .list(LIST_LIMIT)
        .await
        .context(LIST_FAILED)?;
    Ok(Json(posts.iter().map(BlogPost::api_repr).collect()))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostRepr>, APIError> {
    let id = id.parse::<PostId>().context(GET_FAILED)?;
    let post = state
        .post_store
        .read()
        .await
        .find_by_id(&id)
        .await
        .context(GET_FAILED)?
        .ok_or_else(|| Error::NotFound(id.to_string()))
        .context(GET_FAILED)?;
    Ok(Json(post.api_repr()))
}

async fn create_post(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<JsonObject>, APIError>,
) -> Result<(StatusCode, Json<PostRepr>), APIError> {
    let new_post = model::new_post(body)?;
    let post = state
        .post_store
        .write()
        .await
        .create(new_post)
        .await
        .context(CREATE_FAILED)?;
    tracing::info!("created post {}", post.id);
    Ok((StatusCode::CREATED, Json(post.api_repr())))
}

async fn update_post(
    State(state): State<AppState>,
    Path(path_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<JsonObject>, APIError>,
) -> Result<StatusCode, APIError> {
    let update = model::post_update(&path_id, body)?;
    let id = path_id.parse::<PostId>().context(UPDATE_FAILED)?;
    if update.is_empty() {
        tracing::debug!("update for post {id} sets no fields");
    }
    let updated = state
        .post_store
        .write()
        .await
        .update(&id, update)
        .await
        .context(UPDATE_FAILED)?;
    match updated {
        Some(_) => tracing::info!("updated post {id}"),
        None => tracing::debug!("update for unknown post {id}"),
    }
    Ok(StatusCode::CREATED)
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, APIError> {
    let id = id.parse::<PostId>().context(DELETE_FAILED)?;
    let removed = state
        .post_store
        .write()
        .await
        .delete(&id)
        .await
        .context(DELETE_FAILED)?;
    match removed {
        Some(_) => tracing::info!("deleted post {id}"),
        None => tracing::debug!("delete for unknown post {id}"),
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::post_store::InMemoryPostStore;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config {
            api_bind_addr: "127.0.0.1:0".parse().unwrap(),
            api_timeout: Duration::from_secs(5),
            post_store_state_path: None,
        };
        new(AppState {
            config: Arc::new(config),
            post_store: Arc::new(RwLock::new(InMemoryPostStore::default())),
        })
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn sample_post() -> Value {
        json!({
            "title": "some title",
            "content": "a bunch of amazing words",
            "author": {"firstName": "Sarah", "lastName": "Clarke"},
        })
    }

    async fn create(app: &Router) -> Value {
        let (status, body) = send(app, Method::POST, "/posts", Some(sample_post())).await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn healthcheck() {
        let (status, body) = send(&app(), Method::GET, "/healthcheck", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": "healthy"}));
    }

    #[tokio::test]
    async fn create_without_title_is_rejected() {
        let app = app();
        let mut post = sample_post();
        post.as_object_mut().unwrap().remove("title");
        let (status, body) = send(&app, Method::POST, "/posts", Some(post)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("title"));

        let (_, posts) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(posts, json!([]));
    }

    #[tokio::test]
    async fn create_with_malformed_author_is_rejected() {
        let mut post = sample_post();
        post["author"] = json!("Sarah Clarke");
        let (status, _) = send(&app(), Method::POST, "/posts", Some(post)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_with_invalid_json_is_rejected() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_returns_representation() {
        let app = app();
        let created = create(&app).await;
        let expected = sample_post();
        assert_eq!(created["title"], expected["title"]);
        assert_eq!(created["content"], expected["content"]);
        assert_eq!(created["author"], expected["author"]);
        assert!(created["id"].is_string());
        assert!(created["created"].is_string());
    }

    #[tokio::test]
    async fn get_returns_created_post() {
        let app = app();
        let created = create(&app).await;
        let uri = format!("/posts/{}", created["id"].as_str().unwrap());
        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_or_malformed_id_fails() {
        let app = app();
        let uri = format!("/posts/{}", PostId::new());
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!(GET_FAILED));

        let (status, _) = send(&app, Method::GET, "/posts/ajf9292kjf0", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn list_is_capped() {
        let app = app();
        for _ in 0..(LIST_LIMIT + 2) {
            create(&app).await;
        }
        let (status, posts) = send(&app, Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(posts.as_array().unwrap().len(), LIST_LIMIT);
    }

    #[tokio::test]
    async fn update_with_mismatched_id_changes_nothing() {
        let app = app();
        let created = create(&app).await;
        let id = created["id"].as_str().unwrap();
        let uri = format!("/posts/{id}");
        let other = PostId::new().to_string();
        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"id": other, "title": "New title"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            json!(format!(
                "Request path id ({id}) and request body id ({other}) must match"
            ))
        );

        let (_, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(fetched["title"], json!("some title"));
    }

    #[tokio::test]
    async fn update_applies_present_fields() {
        let app = app();
        let created = create(&app).await;
        let id = created["id"].as_str().unwrap();
        let uri = format!("/posts/{id}");
        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"id": id, "title": "New title"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, Value::Null);

        let (_, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(fetched["title"], json!("New title"));
        assert_eq!(fetched["content"], created["content"]);
        assert_eq!(fetched["author"], created["author"]);
    }

    #[tokio::test]
    async fn update_unknown_post_is_accepted() {
        let app = app();
        let id = PostId::new().to_string();
        let uri = format!("/posts/{id}");
        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"id": id, "title": "New title"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn update_with_wrong_field_type_is_rejected() {
        let app = app();
        let created = create(&app).await;
        let id = created["id"].as_str().unwrap();
        let uri = format!("/posts/{id}");
        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"id": id, "title": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(fetched["title"], json!("some title"));
    }

    #[tokio::test]
    async fn update_malformed_id_fails() {
        let (status, body) = send(
            &app(),
            Method::PUT,
            "/posts/ajf9292kjf0",
            Some(json!({"id": "ajf9292kjf0", "title": "New title"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!(UPDATE_FAILED));
    }

    #[tokio::test]
    async fn body_without_json_content_type_is_unsupported() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(sample_post().to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn body_that_is_not_an_object_is_unprocessable() {
        let app = app();
        let (status, _) = send(&app, Method::POST, "/posts", Some(json!([sample_post()]))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let created = create(&app).await;
        let uri = format!("/posts/{}", created["id"].as_str().unwrap());
        let (status, _) = send(&app, Method::PUT, &uri, Some(json!(["New title"]))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_then_get_fails() {
        let app = app();
        let created = create(&app).await;
        let uri = format!("/posts/{}", created["id"].as_str().unwrap());
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn delete_malformed_id_fails() {
        let (status, body) = send(&app(), Method::DELETE, "/posts/nope", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!(DELETE_FAILED));
    }
}
