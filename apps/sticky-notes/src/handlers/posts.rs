//! Post handlers: list, detail, create, update, delete.

use actix_web::{HttpResponse, web};
use tera::Context;

use sticky_core::domain::{PostFields, PostWithAuthor};
use sticky_core::validation::{PostInput, validate_post};
use sticky_core::{DomainError, ValidationErrors};
use sticky_shared::dto::{
    AuthorOption, CreatePostRequest, PostFormView, PostView, UpdatePostRequest,
};

use super::{POST_LIST_PATH, redirect, render};
use crate::middleware::error::{AppResult, or_not_found};
use crate::state::AppState;

fn post_view(entry: PostWithAuthor) -> PostView {
    let PostWithAuthor { post, author } = entry;
    PostView::new(
        post.id,
        post.title,
        post.content,
        post.created_at,
        author.map(|a| a.name),
    )
}

/// Submitted (or stored) values to show in the form.
struct FormValues<'a> {
    title: &'a str,
    content: &'a str,
    author: Option<&'a str>,
}

async fn render_form(
    state: &AppState,
    action: String,
    editing: bool,
    values: FormValues<'_>,
    errors: &ValidationErrors,
) -> AppResult<HttpResponse> {
    let selected = values.author.map(str::trim).unwrap_or_default();
    let authors = state
        .authors
        .find_all()
        .await?
        .into_iter()
        .map(|author| AuthorOption {
            selected: author.id.to_string() == selected,
            id: author.id,
            name: author.name,
        })
        .collect();

    let form = PostFormView {
        action,
        editing,
        title: values.title.to_string(),
        content: values.content.to_string(),
        authors,
        errors: errors
            .fields()
            .filter_map(|field| Some((field.to_string(), errors.get(field)?.to_string())))
            .collect(),
    };

    let mut context = Context::new();
    context.insert("form", &form);
    render(state, "posts/form.html", &context)
}

fn edit_path(id: i32) -> String {
    format!("/post/{id}/edit/")
}

/// GET /
pub async fn post_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostView> = state
        .posts
        .list_with_authors()
        .await?
        .into_iter()
        .map(post_view)
        .collect();

    let mut context = Context::new();
    context.insert("posts", &posts);
    render(&state, "posts/list.html", &context)
}

/// GET /post/{id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let entry = state
        .posts
        .find_with_author(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    let mut context = Context::new();
    context.insert("post", &post_view(entry));
    render(&state, "posts/detail.html", &context)
}

/// GET /post/new/
pub async fn create_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let values = FormValues {
        title: "",
        content: "",
        author: None,
    };
    render_form(
        &state,
        "/post/new/".to_string(),
        false,
        values,
        &ValidationErrors::new(),
    )
    .await
}

/// POST /post/new/
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = form.into_inner();
    let input = PostInput {
        title: &req.title,
        content: &req.content,
        author: req.author.as_deref(),
    };

    match validate_post(input, state.authors.as_ref()).await {
        Ok(fields) => {
            let post = state.posts.create(fields).await?;
            tracing::info!(post_id = post.id, "Post created");
            Ok(redirect(POST_LIST_PATH))
        }
        Err(DomainError::Validation(errors)) => {
            tracing::debug!(%errors, "Rejected post form");
            let values = FormValues {
                title: &req.title,
                content: &req.content,
                author: req.author.as_deref(),
            };
            render_form(&state, "/post/new/".to_string(), false, values, &errors).await
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /post/{id}/edit/
pub async fn update_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.find_by_id(id).await?.ok_or(DomainError::NotFound {
        entity_type: "Post",
        id,
    })?;

    let author = post.author_id.map(|author_id| author_id.to_string());
    let values = FormValues {
        title: &post.title,
        content: &post.content,
        author: author.as_deref(),
    };
    render_form(&state, edit_path(id), true, values, &ValidationErrors::new()).await
}

/// POST /post/{id}/edit/
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if state.posts.find_by_id(id).await?.is_none() {
        return Err(DomainError::NotFound {
            entity_type: "Post",
            id,
        }
        .into());
    }

    let req = form.into_inner();
    let input = PostInput {
        title: &req.title,
        content: &req.content,
        author: req.author.as_deref(),
    };

    let fields: PostFields = match validate_post(input, state.authors.as_ref()).await {
        Ok(fields) => fields,
        Err(DomainError::Validation(errors)) => {
            tracing::debug!(post_id = id, %errors, "Rejected post form");
            let values = FormValues {
                title: &req.title,
                content: &req.content,
                author: req.author.as_deref(),
            };
            return render_form(&state, edit_path(id), true, values, &errors).await;
        }
        Err(err) => return Err(err.into()),
    };

    or_not_found(state.posts.update(id, fields).await, "Post", id)?;
    tracing::info!(post_id = id, "Post updated");
    Ok(redirect(POST_LIST_PATH))
}

/// GET or POST /post/{id}/delete/
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    or_not_found(state.posts.delete(id).await, "Post", id)?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(redirect(POST_LIST_PATH))
}
