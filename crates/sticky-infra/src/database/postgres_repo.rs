//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use sticky_core::domain::{Author, Post, PostFields, PostWithAuthor};
use sticky_core::error::RepoError;
use sticky_core::ports::{AuthorRepository, PostRepository};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, name: String) -> Result<Author, RepoError> {
        let model = author::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(query_error)?;

        tracing::debug!(author_id = model.id, "Author created");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<u64, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        // Dependent posts go first so the author row is never referenced when removed
        let cascaded = PostEntity::delete_many()
            .filter(post::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(query_error)?;

        let deleted = AuthorEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_error)?;

        if deleted.rows_affected == 0 {
            txn.rollback().await.map_err(query_error)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(query_error)?;
        tracing::debug!(
            author_id = id,
            cascaded_posts = cascaded.rows_affected,
            "Author deleted"
        );

        Ok(cascaded.rows_affected)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, fields: PostFields) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            title: Set(fields.title),
            content: Set(fields.content),
            created_at: Set(Utc::now().into()),
            author_id: Set(fields.author_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(query_error)?;

        tracing::debug!(post_id = model.id, "Post created");
        Ok(model.into())
    }

    async fn update(&self, id: i32, fields: PostFields) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        let mut active: post::ActiveModel = existing.into();
        active.title = Set(fields.title);
        active.content = Set(fields.content);
        active.author_id = Set(fields.author_id);

        let model = active.update(&self.db).await.map_err(query_error)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(AuthorEntity)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(joined))
    }

    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let result = PostEntity::find()
            .find_also_related(AuthorEntity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(joined).collect())
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn joined((post, author): (post::Model, Option<author::Model>)) -> PostWithAuthor {
    PostWithAuthor {
        post: post.into(),
        author: author.map(Into::into),
    }
}
