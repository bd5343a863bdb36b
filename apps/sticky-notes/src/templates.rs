//! Tera templates compiled into the binary.
//!
//! Every page template is embedded with `include_str!` and registered once at startup, so a
//! broken template fails the boot instead of a request. Templates ending in `.html` are
//! autoescaped.

use tera::{Context, Tera};

use sticky_shared::ErrorPage;

const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Registered page templates.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("posts/list.html", include_str!("../templates/posts/list.html")),
            ("posts/detail.html", include_str!("../templates/posts/detail.html")),
            ("posts/form.html", include_str!("../templates/posts/form.html")),
            ("authors/list.html", include_str!("../templates/authors/list.html")),
        ])?;

        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}

/// Render the standalone error page.
///
/// Used from `ResponseError`, which has no access to application state, so the template is
/// compiled on demand.
pub fn render_error_page(page: &ErrorPage) -> Result<String, tera::Error> {
    let context = Context::from_serialize(page)?;
    Tera::one_off(ERROR_TEMPLATE, &context, true)
}
