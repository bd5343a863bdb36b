//! Domain entities - the core business objects.

mod author;
mod post;

pub use author::Author;
pub use post::{Post, PostFields, PostWithAuthor};
