//! Server-rendered pages.
//!
//! Templates are embedded at compile time and compiled once at startup. Every
//! page extends `base.html`, which reads a single [`LayoutPlan`] for both the
//! bordered container and the footer.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Datelike;
use folio_core::admin::AdminStatus;
use folio_core::layout::LayoutPlan;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::Viewer;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("home.html", include_str!("templates/home.html")),
    ("courses.html", include_str!("templates/courses.html")),
    ("github.html", include_str!("templates/github.html")),
    ("resources.html", include_str!("templates/resources.html")),
    ("resource.html", include_str!("templates/resource.html")),
    (
        "resource_not_found.html",
        include_str!("templates/resource_not_found.html"),
    ),
    ("not_found.html", include_str!("templates/not_found.html")),
    ("admin_create.html", include_str!("templates/admin_create.html")),
];

/// Stylesheet linked from `base.html`, served at [`SITE_CSS_PATH`].
pub const SITE_CSS: &str = include_str!("static/site.css");
pub const SITE_CSS_PATH: &str = "/static/site.css";

/// Compiled page templates.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile every embedded template. Fails on the first syntax error.
    pub fn load() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<T: Serialize>(&self, name: &str, page: Page<'_, T>) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(page)
    }
}

/// Context shared by every page, plus the page's own data flattened in.
#[derive(Debug, Serialize)]
pub struct Page<'a, T: Serialize> {
    pub path: &'a str,
    pub layout: LayoutPlan,
    pub admin: AdminStatus,
    pub signed_in: bool,
    pub year: i32,
    #[serde(flatten)]
    pub data: T,
}

impl<'a, T: Serialize> Page<'a, T> {
    pub fn new(path: &'a str, viewer: &Viewer, data: T) -> Self {
        Self {
            path,
            layout: LayoutPlan::for_path(path),
            admin: viewer.admin,
            signed_in: viewer.user.is_some(),
            year: chrono::Utc::now().year(),
            data,
        }
    }
}

/// Render a page with the given status.
pub fn render_page<T: Serialize>(
    templates: &Templates,
    status: StatusCode,
    name: &str,
    page: Page<'_, T>,
) -> AppResult<Response> {
    let body = templates.render(name, page)?;
    Ok((status, Html(body)).into_response())
}
