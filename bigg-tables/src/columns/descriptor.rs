use sea_orm::{
    ColumnTrait, IntoSimpleExpr,
    sea_query::{Expr, SimpleExpr},
};

use super::joins::JoinStep;

/// Which predicate builder handles a column's search text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchType {
    /// Case-insensitive substring match
    #[default]
    String,
    /// Comparison / range grammar, see [`crate::filtering::number`]
    Number,
    /// `"true"` matches true, anything else matches false
    Boolean,
}

/// Reduction applied when a column is reached through a one-to-many join.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregation {
    Count,
    CountDistinct,
    Min,
    Max,
    Sum,
}

impl Aggregation {
    #[must_use]
    pub fn apply(self, expr: SimpleExpr) -> SimpleExpr {
        let expr = Expr::expr(expr);
        match self {
            Self::Count => expr.count(),
            Self::CountDistinct => expr.count_distinct(),
            Self::Min => expr.min(),
            Self::Max => expr.max(),
            Self::Sum => expr.sum(),
        }
    }
}

/// Identifier for a plain table column: `{table}__{column}`, lowercased.
///
/// ```rust,ignore
/// assert_eq!(column_identifier(&model::Column::BiggId), "model__bigg_id");
/// ```
pub fn column_identifier<C: ColumnTrait>(column: &C) -> String {
    format!("{}__{}", column.entity_name().to_string(), column.as_str()).to_lowercase()
}

/// Static description of one displayable, searchable and sortable attribute.
///
/// Built once per view. Requests never mutate a descriptor; they overlay a
/// [`ColumnState`](super::ColumnState) on top of it.
#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
    /// Request key for this column, unique within a view
    pub identifier: String,
    pub display_name: &'static str,
    /// Expression projected, searched and sorted on
    pub property: SimpleExpr,
    /// Joins needed before `property` can be referenced, in order
    pub required_joins: Vec<JoinStep>,
    pub search_type: SearchType,
    /// Whether the global search box matches this column
    pub global_search: bool,
    /// Whether the column's own search box is applied
    pub apply_search_query: bool,
    pub searchable: bool,
    pub orderable: bool,
    pub aggregation: Option<Aggregation>,
    /// minijinja template rendered with the row as context, e.g.
    /// `/models/{{ model__bigg_id|urlencode }}`
    pub hyperlink: Option<&'static str>,
    /// Responsive-display hint for the client, lower shows first
    pub display_priority: Option<u8>,
}

impl ColumnDescriptor {
    pub fn new<P: IntoSimpleExpr>(
        identifier: impl Into<String>,
        display_name: &'static str,
        property: P,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name,
            property: property.into_simple_expr(),
            required_joins: Vec::new(),
            search_type: SearchType::String,
            global_search: true,
            apply_search_query: true,
            searchable: true,
            orderable: true,
            aggregation: None,
            hyperlink: None,
            display_priority: None,
        }
    }

    /// Descriptor for a table column, identified as [`column_identifier`].
    pub fn for_column<C: ColumnTrait>(column: C, display_name: &'static str) -> Self {
        Self::new(column_identifier(&column), display_name, column)
    }

    #[must_use]
    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    /// Number column; numbers stay out of the global box unless re-enabled.
    #[must_use]
    pub fn number(self) -> Self {
        self.search_type(SearchType::Number).global(false)
    }

    #[must_use]
    pub fn boolean(self) -> Self {
        self.search_type(SearchType::Boolean).global(false)
    }

    #[must_use]
    pub fn join(mut self, step: JoinStep) -> Self {
        self.required_joins.push(step);
        self
    }

    #[must_use]
    pub fn joins(mut self, steps: impl IntoIterator<Item = JoinStep>) -> Self {
        self.required_joins.extend(steps);
        self
    }

    #[must_use]
    pub fn global(mut self, global_search: bool) -> Self {
        self.global_search = global_search;
        self
    }

    /// Keep the column in the global box but ignore its own search field.
    #[must_use]
    pub fn global_only(mut self) -> Self {
        self.apply_search_query = false;
        self
    }

    #[must_use]
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    #[must_use]
    pub fn not_orderable(mut self) -> Self {
        self.orderable = false;
        self
    }

    /// Aggregated columns are searched in HAVING and never join the global box.
    #[must_use]
    pub fn aggregate(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self.global_search = false;
        self
    }

    #[must_use]
    pub fn link(mut self, template: &'static str) -> Self {
        self.hyperlink = Some(template);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: u8) -> Self {
        self.display_priority = Some(priority);
        self
    }

    /// Expression selected for this column, and also the one it is sorted and
    /// per-column searched by.
    #[must_use]
    pub fn projection(&self) -> SimpleExpr {
        match self.aggregation {
            Some(aggregation) => aggregation.apply(self.property.clone()),
            None => self.property.clone(),
        }
    }

    #[must_use]
    pub fn is_aggregated(&self) -> bool {
        self.aggregation.is_some()
    }
}
