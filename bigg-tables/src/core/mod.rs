//! # List query engine
//!
//! [`engine::list`] runs one DataTables request against a Sea-ORM `Select`:
//! scope, count, search, count again, order, page and project. [`ListView`]
//! binds a column list and shape to a root entity, and [`ViewRegistry`] holds
//! every view by name behind the object-safe [`TableView`] trait.

pub mod engine;
pub mod registry;
pub mod view;

pub use engine::{
    ListParams, ListQuery, ListResult, ListScope, ListShape, Record, TieBreak, build_query, list,
};
pub use registry::{RegistryError, ViewRegistry, ViewRegistryBuilder};
pub use view::{ListView, TableView};
