//! In-memory record stores - used when no database is configured, and in tests.
//!
//! Both tables sit behind one async `RwLock`, so every write (including the author cascade)
//! is atomic with respect to concurrent readers. Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use sticky_core::domain::{Author, Post, PostFields, PostWithAuthor};
use sticky_core::error::RepoError;
use sticky_core::ports::{AuthorRepository, BaseRepository, PostRepository};

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i32, Author>,
    posts: BTreeMap<i32, Post>,
    last_author_id: i32,
    last_post_id: i32,
}

impl Tables {
    /// Foreign key check for `posts.author_id`.
    fn check_author(&self, author_id: Option<i32>) -> Result<(), RepoError> {
        match author_id {
            Some(id) if !self.authors.contains_key(&id) => Err(RepoError::Constraint(format!(
                "author {id} does not exist"
            ))),
            _ => Ok(()),
        }
    }

    fn joined(&self, post: &Post) -> PostWithAuthor {
        PostWithAuthor {
            post: post.clone(),
            author: post
                .author_id
                .and_then(|id| self.authors.get(&id))
                .cloned(),
        }
    }
}

/// Shared storage behind the in-memory author and post repositories.
///
/// IDs are assigned sequentially from 1 and never reused, so ascending key order is
/// insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn authors(self: &Arc<Self>) -> InMemoryAuthorRepository {
        InMemoryAuthorRepository {
            store: Arc::clone(self),
        }
    }

    pub fn posts(self: &Arc<Self>) -> InMemoryPostRepository {
        InMemoryPostRepository {
            store: Arc::clone(self),
        }
    }
}

/// In-memory author repository.
#[derive(Clone)]
pub struct InMemoryAuthorRepository {
    store: Arc<InMemoryStore>,
}

/// In-memory post repository.
#[derive(Clone)]
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl BaseRepository<Author, i32> for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.authors.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.authors.values().cloned().collect())
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn create(&self, name: String) -> Result<Author, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.last_author_id += 1;

        let author = Author {
            id: tables.last_author_id,
            name,
        };
        tables.authors.insert(author.id, author.clone());

        tracing::debug!(author_id = author.id, "Author created");
        Ok(author)
    }

    async fn delete(&self, id: i32) -> Result<u64, RepoError> {
        let mut tables = self.store.tables.write().await;
        if tables.authors.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let before = tables.posts.len();
        tables.posts.retain(|_, post| post.author_id != Some(id));
        let cascaded = (before - tables.posts.len()) as u64;

        tracing::debug!(author_id = id, cascaded_posts = cascaded, "Author deleted");
        Ok(cascaded)
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.values().cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, fields: PostFields) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.check_author(fields.author_id)?;
        tables.last_post_id += 1;

        let post = Post {
            id: tables.last_post_id,
            title: fields.title,
            content: fields.content,
            created_at: Utc::now(),
            author_id: fields.author_id,
        };
        tables.posts.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, "Post created");
        Ok(post)
    }

    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        if !tables.posts.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.check_author(fields.author_id)?;

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.apply(fields);
        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).map(|post| tables.joined(post)))
    }

    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.values().map(|post| tables.joined(post)).collect())
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|post| post.author_id == Some(author_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, author_id: Option<i32>) -> PostFields {
        PostFields {
            title: title.to_string(),
            content: "This is a test post.".to_string(),
            author_id,
        }
    }

    #[tokio::test]
    async fn test_ids_follow_insertion_order() {
        let store = InMemoryStore::new();
        let posts = store.posts();

        for title in ["first", "second", "third"] {
            posts.create(fields(title, None)).await.unwrap();
        }
        PostRepository::delete(&posts, 2).await.unwrap();
        let fourth = posts.create(fields("fourth", None)).await.unwrap();

        assert_eq!(fourth.id, 4);
        let titles: Vec<String> = posts
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["first", "third", "fourth"]);
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_created_at() {
        let store = InMemoryStore::new();
        let posts = store.posts();
        let created = posts.create(fields("Test Post", None)).await.unwrap();

        let updated = posts
            .update(created.id, fields("Updated Title", None))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Updated Title");
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let store = InMemoryStore::new();
        let posts = store.posts();

        assert!(posts.find_by_id(999).await.unwrap().is_none());
        assert!(matches!(
            posts.update(999, fields("x", None)).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            PostRepository::delete(&posts, 999).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            AuthorRepository::delete(&store.authors(), 999).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_dangling_author_reference_is_rejected() {
        let store = InMemoryStore::new();
        let result = store.posts().create(fields("Test Post", Some(42))).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(store.posts().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_author_delete_cascades_to_posts() {
        let store = InMemoryStore::new();
        let authors = store.authors();
        let posts = store.posts();

        let doomed = authors.create("Test Author".to_string()).await.unwrap();
        let kept = authors.create("Other Author".to_string()).await.unwrap();
        posts.create(fields("a", Some(doomed.id))).await.unwrap();
        posts.create(fields("b", Some(kept.id))).await.unwrap();
        posts.create(fields("c", Some(doomed.id))).await.unwrap();
        posts.create(fields("d", None)).await.unwrap();

        let cascaded = AuthorRepository::delete(&authors, doomed.id).await.unwrap();

        assert_eq!(cascaded, 2);
        assert!(authors.find_by_id(doomed.id).await.unwrap().is_none());
        assert!(posts.find_by_author(doomed.id).await.unwrap().is_empty());
        let remaining: Vec<String> = posts
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(remaining, vec!["b", "d"]);
    }

    #[tokio::test]
    async fn test_list_resolves_author_names() {
        let store = InMemoryStore::new();
        let author = store.authors().create("Test Author".to_string()).await.unwrap();
        let posts = store.posts();
        posts.create(fields("Test Post", Some(author.id))).await.unwrap();
        posts.create(fields("Anonymous", None)).await.unwrap();

        let listed = posts.list_with_authors().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].author.as_ref().map(|a| a.name.as_str()), Some("Test Author"));
        assert!(listed[1].author.is_none());
        assert_eq!(listed, posts.list_with_authors().await.unwrap());
    }
}
