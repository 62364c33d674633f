use sea_orm::{
    Condition, ConnectionTrait, DbErr, EntityTrait, Iterable, Order, PaginatorTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, QueryResult, QuerySelect, QueryTrait, Select,
    sea_query::{Expr, SimpleExpr},
};
use serde_json::{Number, Value};

use crate::columns::{ColumnState, JoinSet, JoinStep, SearchType};

/// One projected row: column identifier to value.
pub type Record = serde_json::Map<String, Value>;

/// Paging and global search for one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub start: u64,
    /// `None` returns every matching row
    pub length: Option<u64>,
    pub search_value: String,
    pub search_regex: bool,
}

/// Per-request restriction applied before anything is counted, e.g. "rows of
/// this model only". Its joins are applied first, so a column join with the
/// same key reuses them.
#[derive(Clone, Debug, Default)]
pub struct ListScope {
    pub joins: Vec<JoinStep>,
    pub condition: Option<Condition>,
}

impl ListScope {
    #[must_use]
    pub fn join(mut self, step: JoinStep) -> Self {
        self.joins.push(step);
        self
    }

    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A key sorted on after the root primary key, with the joins it reads from.
#[derive(Clone, Debug)]
pub struct TieBreak {
    pub expr: SimpleExpr,
    pub joins: Vec<JoinStep>,
}

/// Per-view grouping and fallback sort.
#[derive(Clone, Debug, Default)]
pub struct ListShape {
    pub group_by: Vec<SimpleExpr>,
    /// Column identifier and direction used when the request orders nothing
    pub default_order: Option<(String, Order)>,
    /// Needed when one root row fans out into several listed rows
    pub tie_breaks: Vec<TieBreak>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListResult {
    pub rows: Vec<Record>,
    pub total_count: u64,
    pub filtered_count: u64,
}

/// The three statements one list request runs.
pub struct ListQuery<E: EntityTrait> {
    /// Scoped rows, before any search
    pub total: Select<E>,
    /// Scoped, searched and grouped rows
    pub filtered: Select<E>,
    /// `filtered` ordered, paged and projected
    pub page: Select<E>,
}

/// Build the total, filtered and page statements for `columns` over `base`.
///
/// Columns are projected in slice order. Per-column search ANDs into WHERE,
/// or HAVING for aggregated columns. The global search ORs over the columns
/// that allow it and matches nothing when none of them produce a predicate.
pub fn build_query<E: EntityTrait>(
    base: Select<E>,
    columns: &[ColumnState<'_>],
    params: &ListParams,
    scope: &ListScope,
    shape: &ListShape,
) -> ListQuery<E> {
    let mut joins = JoinSet::default();

    let mut query = joins.apply_all(base, &scope.joins);
    if let Some(condition) = &scope.condition {
        query = query.filter(condition.clone());
    }
    let total = query.clone();

    for state in columns {
        query = joins.apply_all(query, &state.descriptor().required_joins);
    }
    for tie_break in &shape.tie_breaks {
        query = joins.apply_all(query, &tie_break.joins);
    }

    let mut where_clause = Condition::all();
    let mut having = Condition::all();
    for state in columns.iter().filter(|state| state.search_enabled()) {
        let descriptor = state.descriptor();
        let Some(predicate) = descriptor
            .search_type
            .predicate(&descriptor.projection(), state.search_value())
        else {
            continue;
        };
        if descriptor.is_aggregated() {
            having = having.add(predicate);
        } else {
            where_clause = where_clause.add(predicate);
        }
    }

    if !params.search_value.trim().is_empty() {
        let global = columns
            .iter()
            .filter(|state| state.global_search_enabled())
            .filter_map(|state| {
                let descriptor = state.descriptor();
                descriptor
                    .search_type
                    .predicate(&descriptor.property, &params.search_value)
            })
            .fold(Condition::any(), |any, predicate| any.add(predicate));
        where_clause = if global.is_empty() {
            where_clause.add(Expr::val(1).eq(0))
        } else {
            where_clause.add(global)
        };
    }

    if !where_clause.is_empty() {
        query = query.filter(where_clause);
    }
    for expr in &shape.group_by {
        query = query.group_by(expr.clone());
    }
    if !having.is_empty() {
        query = query.having(having);
    }
    let filtered = query.clone();

    let mut ordered: Vec<_> = columns
        .iter()
        .filter_map(|state| state.active_order().map(|order| (order, state)))
        .collect();
    ordered.sort_by_key(|(order, _)| order.priority);

    if ordered.is_empty() {
        if let Some((identifier, direction)) = &shape.default_order {
            if let Some(state) = columns.iter().find(|state| state.identifier() == identifier) {
                query = query.order_by(state.descriptor().projection(), direction.clone());
            }
        }
    }
    for (order, state) in ordered {
        let direction = if order.ascending { Order::Asc } else { Order::Desc };
        query = query.order_by(state.descriptor().projection(), direction);
    }
    for key in E::PrimaryKey::iter() {
        query = query.order_by(key.into_column(), Order::Asc);
    }
    for tie_break in &shape.tie_breaks {
        query = query.order_by(tie_break.expr.clone(), Order::Asc);
    }

    if let Some(length) = params.length {
        query = query.offset(params.start).limit(length);
    }

    let mut page = query.select_only();
    for state in columns {
        page = page.column_as(state.descriptor().projection(), state.identifier());
    }

    ListQuery {
        total,
        filtered,
        page,
    }
}

/// Read one projected value. Computed columns carry no declared type, so the
/// value is tried against each JSON-representable type in turn.
fn decode_value(row: &QueryResult, state: &ColumnState<'_>) -> Value {
    let column = state.identifier();
    if state.descriptor().search_type == SearchType::Boolean {
        if let Ok(value) = row.try_get::<Option<bool>>("", column) {
            return value.map_or(Value::Null, Value::Bool);
        }
    }
    if let Ok(value) = row.try_get::<Option<i64>>("", column) {
        return value.map_or(Value::Null, Value::from);
    }
    if let Ok(value) = row.try_get::<Option<i32>>("", column) {
        return value.map_or(Value::Null, Value::from);
    }
    if let Ok(value) = row.try_get::<Option<f64>>("", column) {
        return value.and_then(Number::from_f64).map_or(Value::Null, Value::Number);
    }
    if let Ok(value) = row.try_get::<Option<bool>>("", column) {
        return value.map_or(Value::Null, Value::Bool);
    }
    if let Ok(value) = row.try_get::<Option<String>>("", column) {
        return value.map_or(Value::Null, Value::String);
    }
    tracing::warn!(column, "column value has no JSON representation");
    Value::Null
}

fn decode_record(row: &QueryResult, columns: &[ColumnState<'_>]) -> Record {
    columns
        .iter()
        .map(|state| (state.identifier().to_string(), decode_value(row, state)))
        .collect()
}

/// Run one list request: count, filter, count again, fetch the page.
///
/// # Errors
///
/// Returns the first `DbErr` any of the three statements produces.
#[tracing::instrument(skip_all, fields(start = params.start, length = ?params.length))]
pub async fn list<E, C>(
    db: &C,
    base: Select<E>,
    columns: &[ColumnState<'_>],
    params: &ListParams,
    scope: &ListScope,
    shape: &ListShape,
) -> Result<ListResult, DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let ListQuery {
        total,
        filtered,
        page,
    } = build_query(base, columns, params, scope, shape);

    let total_count = total.count(db).await?;
    let filtered_count = filtered.count(db).await?;
    let rows: Vec<Record> = db
        .query_all(page.build(db.get_database_backend()))
        .await?
        .iter()
        .map(|row| decode_record(row, columns))
        .collect();

    tracing::debug!(total_count, filtered_count, rows = rows.len(), "list query done");

    Ok(ListResult {
        rows,
        total_count,
        filtered_count,
    })
}
