//! BiGG Models list views.
//!
//! Entities, the view catalogue, routes and configuration for the website's
//! paginated tables. The query engine itself lives in `bigg_tables`.

pub mod config;
pub mod entities;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod views;

pub use config::Settings;
pub use routes::router;
pub use state::AppState;
