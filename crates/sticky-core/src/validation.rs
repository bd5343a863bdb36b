//! Form validation for posts and authors.
//!
//! Every field is checked and all failures are reported together, so a rejected form can be
//! re-rendered with one message per field. Validation never writes.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::PostFields;
use crate::error::DomainError;
use crate::ports::AuthorRepository;

/// Maximum length, in characters, of short text fields (post titles, author names).
pub const MAX_CHAR_FIELD_LEN: usize = 255;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw post form values as submitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostInput<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author: Option<&'a str>,
}

/// Validate a post form, resolving the author reference against `authors`.
///
/// Returns [`DomainError::Validation`] with every field error, or [`DomainError::Repo`] when
/// the author lookup itself fails.
pub async fn validate_post<A>(input: PostInput<'_>, authors: &A) -> Result<PostFields, DomainError>
where
    A: AuthorRepository + ?Sized,
{
    let mut errors = ValidationErrors::new();

    let title = required_text("title", input.title, Some(MAX_CHAR_FIELD_LEN), &mut errors);
    let content = required_text("content", input.content, None, &mut errors);

    let author_id = match input.author.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => None,
        Some(raw) => {
            let resolved = match raw.parse::<i32>() {
                Ok(id) => authors.find_by_id(id).await?.map(|author| author.id),
                Err(_) => None,
            };
            if resolved.is_none() {
                errors.add("author", INVALID_CHOICE);
            }
            resolved
        }
    };

    if !errors.is_empty() {
        return Err(DomainError::Validation(errors));
    }

    Ok(PostFields {
        title,
        content,
        author_id,
    })
}

/// Validate an author name, returning the cleaned value.
pub fn validate_author_name(name: &str) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = required_text("name", name, Some(MAX_CHAR_FIELD_LEN), &mut errors);
    if errors.is_empty() {
        Ok(name)
    } else {
        Err(errors)
    }
}

fn required_text(
    field: &'static str,
    raw: &str,
    max_chars: Option<usize>,
    errors: &mut ValidationErrors,
) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return String::new();
    }

    if let Some(max) = max_chars {
        let count = value.chars().count();
        if count > max {
            errors.add(
                field,
                format!("Ensure this value has at most {max} characters (it has {count})."),
            );
        }
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Author;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;
    use async_trait::async_trait;

    /// Author store holding a fixed set of IDs.
    struct KnownAuthors(Vec<i32>);

    #[async_trait]
    impl BaseRepository<Author, i32> for KnownAuthors {
        async fn find_by_id(&self, id: i32) -> Result<Option<Author>, RepoError> {
            Ok(self.0.contains(&id).then(|| Author {
                id,
                name: "Test Author".to_string(),
            }))
        }

        async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl AuthorRepository for KnownAuthors {
        async fn create(&self, _name: String) -> Result<Author, RepoError> {
            unimplemented!()
        }

        async fn delete(&self, _id: i32) -> Result<u64, RepoError> {
            unimplemented!()
        }
    }

    fn input<'a>(title: &'a str, content: &'a str, author: Option<&'a str>) -> PostInput<'a> {
        PostInput {
            title,
            content,
            author,
        }
    }

    fn validation_errors(result: Result<PostFields, DomainError>) -> ValidationErrors {
        match result {
            Err(DomainError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_valid_post_with_author() {
        let authors = KnownAuthors(vec![1]);
        let fields = validate_post(input("Test Post", "This is a test post.", Some("1")), &authors)
            .await
            .unwrap();

        assert_eq!(fields.title, "Test Post");
        assert_eq!(fields.content, "This is a test post.");
        assert_eq!(fields.author_id, Some(1));
    }

    #[tokio::test]
    async fn test_blank_author_means_none() {
        let authors = KnownAuthors(vec![]);
        for author in [None, Some(""), Some("  ")] {
            let fields = validate_post(input("t", "c", author), &authors).await.unwrap();
            assert_eq!(fields.author_id, None);
        }
    }

    #[tokio::test]
    async fn test_missing_fields_reported_together() {
        let authors = KnownAuthors(vec![]);
        let errors = validation_errors(validate_post(input("  ", "", None), &authors).await);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("title"), Some(REQUIRED));
        assert_eq!(errors.get("content"), Some(REQUIRED));
    }

    #[tokio::test]
    async fn test_title_length_counts_code_points() {
        let authors = KnownAuthors(vec![]);

        let at_limit = "é".repeat(MAX_CHAR_FIELD_LEN);
        assert!(validate_post(input(&at_limit, "c", None), &authors).await.is_ok());

        let too_long = "é".repeat(MAX_CHAR_FIELD_LEN + 1);
        let errors = validation_errors(validate_post(input(&too_long, "c", None), &authors).await);
        assert_eq!(
            errors.get("title"),
            Some("Ensure this value has at most 255 characters (it has 256).")
        );
    }

    #[tokio::test]
    async fn test_content_is_unbounded() {
        let authors = KnownAuthors(vec![]);
        let content = "x".repeat(10_000);
        let fields = validate_post(input("t", &content, None), &authors).await.unwrap();
        assert_eq!(fields.content.len(), 10_000);
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_author_is_reference_error() {
        let authors = KnownAuthors(vec![1]);
        for author in ["2", "abc", "-1"] {
            let errors =
                validation_errors(validate_post(input("t", "c", Some(author)), &authors).await);
            assert_eq!(errors.get("author"), Some(INVALID_CHOICE));
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["author"]);
        }
    }

    #[test]
    fn test_author_name_rules() {
        assert_eq!(validate_author_name("  Test Author ").unwrap(), "Test Author");
        assert_eq!(validate_author_name("").unwrap_err().get("name"), Some(REQUIRED));
        assert!(validate_author_name(&"n".repeat(256)).is_err());
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("title", REQUIRED);
        errors.add("title", "ignored");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "title": REQUIRED }));
        assert_eq!(errors.to_string(), format!("title: {REQUIRED}"));
    }
}
