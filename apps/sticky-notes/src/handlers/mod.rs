//! HTTP handlers and route configuration.

mod authors;
mod health;
mod posts;

use actix_web::error::UrlencodedError;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Path of the post list, the target of every post write.
pub const POST_LIST_PATH: &str = "/";

/// Path of the author page, the target of every author write.
pub const AUTHOR_LIST_PATH: &str = "/authors/";

/// Largest accepted form body. Post content is unbounded, so this only guards memory.
pub const FORM_LIMIT_BYTES: usize = 8 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT_BYTES)
            .error_handler(form_error),
    )
    .route("/health", web::get().to(health::health_check))
        .service(
            web::resource(POST_LIST_PATH)
                .name("post_list")
                .route(web::get().to(posts::post_list)),
        )
        // Registered before the `{id}` routes so "new" is never read as an ID
        .service(
            web::resource("/post/new/")
                .name("post_create")
                .route(web::get().to(posts::create_form))
                .route(web::post().to(posts::create)),
        )
        .service(
            web::resource("/post/{id}/")
                .name("post_detail")
                .route(web::get().to(posts::post_detail)),
        )
        .service(
            web::resource("/post/{id}/edit/")
                .name("post_update")
                .route(web::get().to(posts::update_form))
                .route(web::post().to(posts::update)),
        )
        .service(
            web::resource("/post/{id}/delete/")
                .name("post_delete")
                .route(web::get().to(posts::delete))
                .route(web::post().to(posts::delete)),
        )
        .service(
            web::resource(AUTHOR_LIST_PATH)
                .name("author_list")
                .route(web::get().to(authors::author_list)),
        )
        .service(
            web::resource("/authors/new/")
                .name("author_create")
                .route(web::post().to(authors::create)),
        )
        .service(
            web::resource("/authors/{id}/delete/")
                .name("author_delete")
                .route(web::get().to(authors::delete))
                .route(web::post().to(authors::delete)),
        );
}

/// Unreadable form bodies get the HTML error page instead of actix's plaintext one.
fn form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), "Rejected form body: {}", err);
    match err {
        UrlencodedError::Overflow { size, limit } => AppError::PayloadTooLarge(format!(
            "Form body of {size} bytes exceeds the {limit} byte limit"
        )),
        other => AppError::BadRequest(other.to_string()),
    }
    .into()
}

/// Render `template` as a 200 HTML page.
fn render(state: &AppState, template: &str, context: &Context) -> AppResult<HttpResponse> {
    let html = state.templates.render(template, context)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

/// 302 to `location`.
fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
