//! # Column declarations
//!
//! A view is a list of [`ColumnDescriptor`]s. Each request overlays a
//! [`ColumnState`] on every descriptor with the client's search text and sort
//! order. Descriptors that reach into other tables carry the [`JoinStep`]s
//! that make their property addressable.
//!
//! ```rust,ignore
//! use bigg_tables::columns::{ColumnDescriptor, JoinStep};
//!
//! let organism = ColumnDescriptor::for_column(genome::Column::Organism, "Organism")
//!     .join(JoinStep::left("genome", || model::Relation::Genome.def()));
//! ```

pub mod descriptor;
pub mod joins;
pub mod state;

pub use descriptor::{Aggregation, ColumnDescriptor, SearchType, column_identifier};
pub use joins::{JoinSet, JoinStep};
pub use state::{ColumnState, OrderSpec, default_states};
