//! Blog post documents.
//!
//! A [`BlogPost`] is the stored document. Its public JSON shape is produced by
//! [`BlogPost::api_repr`], which is the only way posts leave the crate over HTTP.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// Store-assigned identifier of a [`BlogPost`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, Ord, PartialOrd, Eq, PartialEq)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PostId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| Error::InvalidPostId(s.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// A stored blog post document.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: Author,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}

impl BlogPost {
    /// Build a new document from creation fields, assigning a fresh id and the current time.
    pub(crate) fn from_new(new_post: NewPost) -> Self {
        Self {
            id: PostId::new(),
            title: new_post.title,
            content: new_post.content,
            author: new_post.author,
            created: OffsetDateTime::now_utc(),
        }
    }

    /// Overwrite the fields present in `update`, leaving the rest as they are.
    pub(crate) fn apply(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
    }

    /// The public JSON representation of this post.
    #[must_use]
    pub fn api_repr(&self) -> PostRepr {
        PostRepr {
            id: self.id.to_string(),
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.clone(),
            created: self.created,
        }
    }
}

/// Fields required to create a [`BlogPost`].
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Author,
}

/// Fields that may be changed on an existing [`BlogPost`]. Absent fields are left untouched.
#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

impl PostUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct PostRepr {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Author,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}
