use crate::error::Error;
use crate::post::{BlogPost, NewPost, PostId, PostUpdate};
use crate::post_store::PostStore;
use serde::{Deserialize, Serialize};

/// A non-durable [`PostStore`] keeping documents in insertion order.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryPostStore {
    posts: Vec<BlogPost>,
}

impl InMemoryPostStore {
    fn position(&self, id: &PostId) -> Option<usize> {
        self.posts.iter().position(|post| &post.id == id)
    }
}

#[async_trait::async_trait]
impl PostStore for InMemoryPostStore {
    async fn list(&self, limit: usize) -> Result<Vec<BlogPost>, Error> {
        Ok(self.posts.iter().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<BlogPost>, Error> {
        Ok(self.position(id).map(|idx| self.posts[idx].clone()))
    }

    async fn create(&mut self, new_post: NewPost) -> Result<BlogPost, Error> {
        let post = BlogPost::from_new(new_post);
        self.posts.push(post.clone());
        Ok(post)
    }

    async fn update(
        &mut self,
        id: &PostId,
        update: PostUpdate,
    ) -> Result<Option<BlogPost>, Error> {
        Ok(self.position(id).map(|idx| {
            let post = &mut self.posts[idx];
            post.apply(update);
            post.clone()
        }))
    }

    async fn delete(&mut self, id: &PostId) -> Result<Option<BlogPost>, Error> {
        Ok(self.position(id).map(|idx| self.posts.remove(idx)))
    }
}
