//! Shared fixtures for the HTTP tests.

#![allow(dead_code)]

use sticky_core::domain::{Author, Post, PostFields};
use sticky_notes::state::AppState;
use sticky_notes::templates::Templates;

/// In-memory application seeded with one author and one post.
pub struct Fixture {
    pub state: AppState,
    pub author: Author,
    pub post: Post,
}

pub async fn fixture() -> Fixture {
    let state = AppState::in_memory(Templates::new().unwrap());

    let author = state.authors.create("Test Author".to_string()).await.unwrap();
    let post = state
        .posts
        .create(PostFields {
            title: "Test Post".to_string(),
            content: "This is a test post.".to_string(),
            author_id: Some(author.id),
        })
        .await
        .unwrap();

    Fixture {
        state,
        author,
        post,
    }
}

/// Build the full route table over `$state`.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(sticky_notes::handlers::configure_routes),
        )
        .await
    };
}

pub fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
