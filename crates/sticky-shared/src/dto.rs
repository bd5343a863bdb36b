//! Data Transfer Objects - form payloads and template view models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used on every rendered page.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Form submitted to create a post. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}

/// Form submitted to update an existing post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}

/// Form submitted to add an author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateAuthorRequest {
    pub name: String,
}

/// A post as the list and detail pages show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub author: Option<String>,
}

impl PostView {
    pub fn new(
        id: i32,
        title: String,
        content: String,
        created_at: DateTime<Utc>,
        author: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            created_at: created_at.format(TIMESTAMP_FORMAT).to_string(),
            author,
        }
    }
}

/// One entry of the author drop-down on the post form.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

/// Everything the post form template needs, on first render and after a rejected submit.
#[derive(Debug, Clone, Serialize)]
pub struct PostFormView {
    pub action: String,
    pub editing: bool,
    pub title: String,
    pub content: String,
    pub authors: Vec<AuthorOption>,
    pub errors: BTreeMap<String, String>,
}

/// An author row on the author page.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: i32,
    pub name: String,
    pub post_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_missing_form_fields_default_to_empty() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title": "Test Post"}"#).unwrap();
        assert_eq!(req.title, "Test Post");
        assert_eq!(req.content, "");
        assert_eq!(req.author, None);
    }

    #[test]
    fn test_post_view_formats_timestamp() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let view = PostView::new(1, "t".into(), "c".into(), created_at, None);
        assert_eq!(view.created_at, "2024-03-09 14:05 UTC");
    }
}
