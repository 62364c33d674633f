use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, EntityTrait, IntoSimpleExpr, Order};

use super::engine::{self, ListResult, ListScope, ListShape, TieBreak};
use crate::columns::{ColumnDescriptor, JoinStep};
use crate::errors::ApiError;
use crate::request::TableRequest;

/// A named, registered list view.
///
/// Object safe so a [`ViewRegistry`](super::ViewRegistry) can hold views over
/// different root entities side by side.
#[async_trait]
pub trait TableView: Send + Sync {
    /// Registry key, also used in URLs
    fn name(&self) -> &str;

    /// Heading shown above the table
    fn title(&self) -> &str;

    fn columns(&self) -> &[ColumnDescriptor];

    /// Identifier of the column sorted on when the request orders nothing.
    fn default_order(&self) -> Option<&str>;

    /// Run `request` against this view inside `txn`, restricted by `scope`.
    async fn list(
        &self,
        txn: &DatabaseTransaction,
        request: &TableRequest,
        scope: &ListScope,
    ) -> Result<ListResult, ApiError>;
}

/// A [`TableView`] rooted at entity `E`.
///
/// ```rust,ignore
/// let view = ListView::<genome::Entity>::new("genomes", "Genomes")
///     .column(ColumnDescriptor::for_column(genome::Column::Accession, "Accession"))
///     .column(model_count)
///     .group_by(genome::Column::Id)
///     .sorted_by("genome__accession", Order::Asc);
/// ```
pub struct ListView<E> {
    name: &'static str,
    title: &'static str,
    columns: Vec<ColumnDescriptor>,
    shape: ListShape,
    entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> ListView<E> {
    #[must_use]
    pub fn new(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            columns: Vec::new(),
            shape: ListShape::default(),
            entity: PhantomData,
        }
    }

    #[must_use]
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn group_by(mut self, expr: impl IntoSimpleExpr) -> Self {
        self.shape.group_by.push(expr.into_simple_expr());
        self
    }

    /// Order ties on the root primary key by `expr` as well, joining
    /// `joins` first when the request has not.
    #[must_use]
    pub fn tie_break(
        mut self,
        expr: impl IntoSimpleExpr,
        joins: impl IntoIterator<Item = JoinStep>,
    ) -> Self {
        self.shape.tie_breaks.push(TieBreak {
            expr: expr.into_simple_expr(),
            joins: joins.into_iter().collect(),
        });
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, identifier: impl Into<String>, order: Order) -> Self {
        self.shape.default_order = Some((identifier.into(), order));
        self
    }

    #[must_use]
    pub fn shape(&self) -> &ListShape {
        &self.shape
    }
}

#[async_trait]
impl<E> TableView for ListView<E>
where
    E: EntityTrait,
    E::Model: Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn default_order(&self) -> Option<&str> {
        self.shape
            .default_order
            .as_ref()
            .map(|(identifier, _)| identifier.as_str())
    }

    async fn list(
        &self,
        txn: &DatabaseTransaction,
        request: &TableRequest,
        scope: &ListScope,
    ) -> Result<ListResult, ApiError> {
        let states = request.column_states(&self.columns)?;
        let params = request.list_params();
        tracing::debug!(view = self.name, "listing view");
        Ok(engine::list(txn, E::find(), &states, &params, scope, &self.shape).await?)
    }
}
