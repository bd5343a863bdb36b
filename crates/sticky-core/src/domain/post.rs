use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Author;

/// Post entity - a sticky note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<i32>,
}

impl Post {
    /// Overwrite the editable fields. `id` and `created_at` are left untouched.
    pub fn apply(&mut self, fields: PostFields) {
        self.title = fields.title;
        self.content = fields.content;
        self.author_id = fields.author_id;
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Validated, record-ready values for creating or updating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub author_id: Option<i32>,
}

/// A post together with its resolved author, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<Author>,
}
