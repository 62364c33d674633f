use std::sync::Arc;

use bigg_tables::{FragmentRenderer, ViewRegistry};
use minijinja::Environment;
use sea_orm::DatabaseConnection;

use crate::views;

pub const LIST_PAGE: &str = "list_page.html";

/// Shared, read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub views: Arc<ViewRegistry>,
    pub fragments: Arc<FragmentRenderer>,
    pub pages: Arc<Environment<'static>>,
}

impl AppState {
    /// Build the view registry and compile the templates.
    ///
    /// # Errors
    ///
    /// Fails when a view declaration is invalid or a template does not compile.
    pub fn new(db: DatabaseConnection) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut pages = Environment::new();
        pages.add_template(LIST_PAGE, include_str!("../templates/list_page.html"))?;

        Ok(Self {
            db,
            views: Arc::new(views::registry()?),
            fragments: Arc::new(FragmentRenderer::new()?),
            pages: Arc::new(pages),
        })
    }
}
