//! # bigg-tables
//!
//! Server-side data-table query engine over Sea-ORM and axum.
//!
//! A view declares its columns once as [`ColumnDescriptor`]s. Each request is
//! parsed from DataTables parameters into a [`TableRequest`], overlaid on the
//! descriptors as [`ColumnState`]s, and run by [`core::list`]:
//!
//! 1. scope joins and filter, then the total count
//! 2. column joins (deduplicated by key) and per-column search
//! 3. global search, grouping and HAVING, then the filtered count
//! 4. ordering with a primary-key tie-break, paging and projection
//!
//! The result goes back as a [`TableResponse`] JSON envelope or as `<tbody>`
//! rows from the [`FragmentRenderer`].
//!
//! ```rust,ignore
//! use bigg_tables::{ColumnDescriptor, ListScope, ListView, TableRequest, TableResponse, TableView};
//!
//! let models = ListView::<model::Entity>::new("models", "Models")
//!     .column(ColumnDescriptor::for_column(model::Column::BiggId, "Model"))
//!     .sorted_by("model__bigg_id", Order::Asc);
//!
//! async fn handler(txn: &DatabaseTransaction, request: TableRequest) -> Result<TableResponse, ApiError> {
//!     let result = models.list(txn, &request, &ListScope::default()).await?;
//!     Ok(TableResponse::new(request.draw, result))
//! }
//! ```

pub mod columns;
pub mod core;
pub mod errors;
pub mod filtering;
pub mod request;
pub mod response;

#[cfg(test)]
mod test_entities;

pub use columns::{Aggregation, ColumnDescriptor, ColumnState, JoinStep, SearchType};
pub use crate::core::{ListParams, ListResult, ListScope, ListView, Record, TableView, ViewRegistry};
pub use errors::{ApiError, ErrorResponse};
pub use request::{ResponseFormat, TableRequest};
pub use response::{FragmentRenderer, TableResponse};
