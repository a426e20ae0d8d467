use chrono::{NaiveDateTime, Utc};

use crate::domain::post::Post;
use crate::domain::slug::slugify;
use crate::domain::types::{CategoryId, CategoryName, EntityState, PostId};

/// Blog category together with the posts filed under it.
///
/// `name` and `slug` only change together through [`Category::rename`], so a
/// saved category always carries `slug == slugify(name)`.
#[derive(Debug, Clone)]
pub struct Category {
    state: EntityState<CategoryId>,
    name: String,
    slug: String,
    created_at: NaiveDateTime,
    posts: Vec<Post>,
    removed_posts: Vec<PostId>,
}

impl Category {
    /// Fresh, not yet stored category with an empty name.
    pub fn new() -> Self {
        Self::new_at(Utc::now().naive_utc())
    }

    /// Same as [`Self::new`] with an explicit creation timestamp.
    pub fn new_at(created_at: NaiveDateTime) -> Self {
        Self {
            state: EntityState::Transient,
            name: String::new(),
            slug: String::new(),
            created_at,
            posts: Vec::new(),
            removed_posts: Vec::new(),
        }
    }

    /// Rebuild a category read back from storage.
    pub fn restore(
        id: CategoryId,
        name: String,
        slug: String,
        created_at: NaiveDateTime,
        posts: Vec<Post>,
    ) -> Self {
        Self {
            state: EntityState::Persisted(id),
            name,
            slug,
            created_at,
            posts,
            removed_posts: Vec::new(),
        }
    }

    pub fn state(&self) -> EntityState<CategoryId> {
        self.state
    }

    pub fn id(&self) -> Option<CategoryId> {
        self.state.id()
    }

    pub fn is_persisted(&self) -> bool {
        self.state.is_persisted()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Posts detached since the category was loaded; deleted on the next save.
    pub fn removed_posts(&self) -> &[PostId] {
        &self.removed_posts
    }

    /// Set a new name and re-derive the slug from it.
    pub fn rename(&mut self, name: CategoryName) {
        self.slug = slugify(name.as_str());
        self.name = name.into_inner();
    }

    /// Detach a post from the collection, scheduling its deletion.
    ///
    /// Returns the detached post, or `None` when the category does not hold it.
    pub fn remove_post(&mut self, post_id: PostId) -> Option<Post> {
        let index = self.posts.iter().position(|p| p.id == post_id)?;
        let post = self.posts.remove(index);
        self.removed_posts.push(post_id);
        Some(post)
    }

    /// Record the storage-assigned identity after a successful save.
    pub fn mark_persisted(&mut self, id: CategoryId) {
        self.state = EntityState::Persisted(id);
        self.removed_posts.clear();
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::new()
    }
}
