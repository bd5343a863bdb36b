#[cfg(test)]
mod tests {
    use crate::database::entity::{author, post};
    use crate::database::postgres_repo::{PostgresAuthorRepository, PostgresPostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use sticky_core::RepoError;
    use sticky_core::domain::{Author, Post, PostFields};
    use sticky_core::ports::{AuthorRepository, BaseRepository, PostRepository};

    fn post_model(id: i32, title: &str) -> post::Model {
        post::Model {
            id,
            title: title.to_owned(),
            content: "This is a test post.".to_owned(),
            created_at: chrono::Utc::now().into(),
            author_id: Some(1),
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(1, "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(1).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.content, "This is a test post.");
        assert_eq!(post.author_id, Some(1));
    }

    #[tokio::test]
    async fn test_find_all_authors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                author::Model {
                    id: 1,
                    name: "Test Author".to_owned(),
                },
                author::Model {
                    id: 2,
                    name: "Test Author".to_owned(),
                },
            ]])
            .into_connection();

        let repo = PostgresAuthorRepository::new(db);

        let authors: Vec<Author> = repo.find_all().await.unwrap();
        assert_eq!(authors.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(authors[0].to_string(), "Test Author");
    }

    #[tokio::test]
    async fn test_create_post_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(7, "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post = repo
            .create(PostFields {
                title: "Test Post".to_owned(),
                content: "This is a test post.".to_owned(),
                author_id: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(post.id, 7);
        assert_eq!(post.to_string(), "Test Post");
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = PostRepository::delete(&repo, 999).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo
            .update(
                999,
                PostFields {
                    title: "Updated Title".to_owned(),
                    content: "Updated Content".to_owned(),
                    author_id: None,
                },
            )
            .await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_author_reports_cascaded_posts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(2), exec(1)])
            .into_connection();

        let repo = PostgresAuthorRepository::new(db);

        let cascaded = AuthorRepository::delete(&repo, 1).await.unwrap();
        assert_eq!(cascaded, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_author_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0), exec(0)])
            .into_connection();

        let repo = PostgresAuthorRepository::new(db);

        let result = AuthorRepository::delete(&repo, 999).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
