use crate::error::Error;
use crate::post::{NewPost, PostUpdate};
use serde_json::{Map, Value};

/// Fields a `POST` body must contain, checked in this order.
const REQUIRED_FIELDS: [&str; 3] = ["title", "content", "author"];

pub(super) type JsonObject = Map<String, Value>;

/// Read a `POST` body into a [`NewPost`].
///
/// Presence of each required field is checked before types, so a body missing `title` is
/// reported as such even when other fields are malformed.
pub(super) fn new_post(body: JsonObject) -> Result<NewPost, Error> {
    if let Some(field) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| !body.contains_key(*field))
    {
        return Err(Error::MissingField(field));
    }
    serde_json::from_value(Value::Object(body)).map_err(Error::InvalidField)
}

/// Read a `PUT` body into a [`PostUpdate`] after checking its `id` matches `path_id`.
///
/// Fields other than `title`, `content` and `author` are ignored.
pub(super) fn post_update(path_id: &str, body: JsonObject) -> Result<PostUpdate, Error> {
    match body.get("id") {
        Some(Value::String(body_id)) if body_id == path_id => {}
        other => {
            return Err(Error::IdMismatch {
                path: path_id.to_string(),
                body: match other {
                    None => "undefined".to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(v) => v.to_string(),
                },
            })
        }
    }
    serde_json::from_value(Value::Object(body)).map_err(Error::InvalidField)
}
