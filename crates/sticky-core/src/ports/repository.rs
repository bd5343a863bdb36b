use async_trait::async_trait;

use crate::domain::{Author, Post, PostFields, PostWithAuthor};
use crate::error::RepoError;

/// Generic repository trait shared by every record store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, ascending by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;
}

/// Author record store.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, i32> {
    /// Insert a new author with a system-assigned ID.
    async fn create(&self, name: String) -> Result<Author, RepoError>;

    /// Delete an author and every post referencing it in one atomic operation.
    ///
    /// Returns the number of posts removed by the cascade.
    async fn delete(&self, id: i32) -> Result<u64, RepoError>;
}

/// Post record store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Insert a new post, stamping `created_at` with the current time.
    async fn create(&self, fields: PostFields) -> Result<Post, RepoError>;

    /// Overwrite title, content and author of an existing post.
    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError>;

    /// Delete a post. Fails with [`RepoError::NotFound`] when the ID is unknown.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Every post joined with its author, ascending by ID.
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError>;
}
