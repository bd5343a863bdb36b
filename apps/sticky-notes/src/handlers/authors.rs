//! Author handlers: the author page, adding an author, and the cascading delete.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use tera::Context;

use sticky_core::ValidationErrors;
use sticky_core::validation::validate_author_name;
use sticky_shared::dto::{AuthorView, CreateAuthorRequest};

use super::{AUTHOR_LIST_PATH, redirect, render};
use crate::middleware::error::{AppResult, or_not_found};
use crate::state::AppState;

async fn render_authors(
    state: &AppState,
    name: &str,
    errors: &ValidationErrors,
) -> AppResult<HttpResponse> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for author_id in state.posts.find_all().await?.into_iter().filter_map(|p| p.author_id) {
        *counts.entry(author_id).or_default() += 1;
    }

    let authors: Vec<AuthorView> = state
        .authors
        .find_all()
        .await?
        .into_iter()
        .map(|author| AuthorView {
            post_count: counts.get(&author.id).copied().unwrap_or_default(),
            id: author.id,
            name: author.name,
        })
        .collect();

    let mut context = Context::new();
    context.insert("authors", &authors);
    context.insert("name", name);
    context.insert("errors", errors);
    render(state, "authors/list.html", &context)
}

/// GET /authors/
pub async fn author_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_authors(&state, "", &ValidationErrors::new()).await
}

/// POST /authors/new/
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<CreateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let req = form.into_inner();

    match validate_author_name(&req.name) {
        Ok(name) => {
            let author = state.authors.create(name).await?;
            tracing::info!(author_id = author.id, "Author created");
            Ok(redirect(AUTHOR_LIST_PATH))
        }
        Err(errors) => {
            tracing::debug!(%errors, "Rejected author form");
            render_authors(&state, &req.name, &errors).await
        }
    }
}

/// GET or POST /authors/{id}/delete/
///
/// Removes the author together with every post attributed to it.
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let cascaded = or_not_found(state.authors.delete(id).await, "Author", id)?;

    tracing::info!(author_id = id, cascaded_posts = cascaded, "Author deleted");
    Ok(redirect(AUTHOR_LIST_PATH))
}
