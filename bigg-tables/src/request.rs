//! DataTables request parameters.
//!
//! The client sends flat, bracketed keys either as a query string (GET) or as
//! an url-encoded body (POST):
//!
//! ```text
//! draw=3&start=0&length=10
//! &search[value]=ecoli&search[regex]=false
//! &columns[0][data]=model__bigg_id&columns[0][searchable]=true
//! &columns[0][search][value]=&columns[0][search][regex]=false
//! &order[0][column]=0&order[0][dir]=asc
//! &format=json
//! ```
//!
//! [`TableRequest::from_pairs`] folds those into a typed frame. Anything it
//! cannot read is a 400 with [`UNPARSEABLE_ARGUMENTS`](crate::errors::UNPARSEABLE_ARGUMENTS).

use std::collections::BTreeMap;

use axum::{
    extract::{FromRequest, Request},
    Form,
};

use crate::columns::{ColumnDescriptor, ColumnState, default_states};
use crate::core::ListParams;
use crate::errors::ApiError;

/// Column `data` value the client uses for columns with no server counterpart.
pub const SKIP_IDENTIFIER: &str = "x";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParam {
    pub value: String,
    pub regex: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnParam {
    /// `i` in `columns[i][...]`
    pub index: usize,
    /// Column identifier
    pub data: String,
    pub name: String,
    pub searchable: Option<bool>,
    pub orderable: Option<bool>,
    pub search: SearchParam,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderParam {
    /// Index into the request's `columns`
    pub column: Option<usize>,
    /// Column identifier, used when `column` is absent
    pub name: Option<String>,
    pub ascending: bool,
}

impl Default for OrderParam {
    fn default() -> Self {
        Self {
            column: None,
            name: None,
            ascending: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Html,
}

/// A parsed DataTables request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRequest {
    pub draw: Option<u64>,
    pub start: u64,
    /// `None` asks for every row (`length=-1` or no length at all)
    pub length: Option<u64>,
    pub search: SearchParam,
    /// Request columns in index order
    pub columns: Vec<ColumnParam>,
    /// Sort list; position is the sort priority
    pub order: Vec<OrderParam>,
    pub format: ResponseFormat,
    /// Keys the DataTables convention does not define, e.g. `search_type`
    pub extra: BTreeMap<String, String>,
}

/// Split `columns[0][search][value]` into `("columns", ["0", "search", "value"])`.
fn split_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let Some(open) = key.find('[') else {
        return Some((key, Vec::new()));
    };
    let (root, mut rest) = key.split_at(open);
    let mut parts = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        parts.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some((root, parts))
}

fn parse_u64(value: &str) -> Result<u64, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::unparseable_arguments())
}

/// Row offsets are bound as signed 64-bit integers.
fn parse_offset(value: &str) -> Result<u64, ApiError> {
    match value.trim().parse::<i64>() {
        Ok(offset) => u64::try_from(offset).map_err(|_| ApiError::unparseable_arguments()),
        Err(_) => Err(ApiError::unparseable_arguments()),
    }
}

fn parse_index(value: &str) -> Result<usize, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::unparseable_arguments())
}

fn parse_bool(value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ApiError::unparseable_arguments()),
    }
}

fn parse_length(value: &str) -> Result<Option<u64>, ApiError> {
    match value.trim().parse::<i64>() {
        Ok(-1) => Ok(None),
        Ok(length) => u64::try_from(length)
            .map(Some)
            .map_err(|_| ApiError::unparseable_arguments()),
        Err(_) => Err(ApiError::unparseable_arguments()),
    }
}

fn parse_direction(value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "asc" => Ok(true),
        "desc" => Ok(false),
        _ => Err(ApiError::unparseable_arguments()),
    }
}

impl TableRequest {
    /// Fold url-encoded pairs into a request. Unknown keys land in `extra`.
    ///
    /// # Errors
    ///
    /// `BadRequest` for an unparseable integer, boolean, sort direction or
    /// format, or a malformed bracket key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        let mut columns: BTreeMap<usize, ColumnParam> = BTreeMap::new();
        let mut order: BTreeMap<usize, OrderParam> = BTreeMap::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let (root, parts) = split_key(key).ok_or_else(ApiError::unparseable_arguments)?;

            match (root, parts.as_slice()) {
                ("draw", []) => request.draw = Some(parse_u64(value)?),
                ("start", []) => request.start = parse_offset(value)?,
                ("length", []) => request.length = parse_length(value)?,
                ("format", []) => {
                    request.format = match value.trim().to_ascii_lowercase().as_str() {
                        "" | "json" => ResponseFormat::Json,
                        "html" => ResponseFormat::Html,
                        _ => return Err(ApiError::unparseable_arguments()),
                    };
                }
                ("search", ["value"]) => request.search.value = value.to_string(),
                ("search", ["regex"]) => request.search.regex = parse_bool(value)?,
                ("columns", [index, field @ ..]) => {
                    let index = parse_index(index)?;
                    let column = columns.entry(index).or_insert_with(|| ColumnParam {
                        index,
                        ..ColumnParam::default()
                    });
                    match field {
                        ["data"] => column.data = value.to_string(),
                        ["name"] => column.name = value.to_string(),
                        ["searchable"] => column.searchable = Some(parse_bool(value)?),
                        ["orderable"] => column.orderable = Some(parse_bool(value)?),
                        ["search", "value"] => column.search.value = value.to_string(),
                        ["search", "regex"] => column.search.regex = parse_bool(value)?,
                        _ => tracing::trace!(key, "ignoring column parameter"),
                    }
                }
                ("order", [index, field]) => {
                    let entry = order.entry(parse_index(index)?).or_default();
                    match *field {
                        "column" => entry.column = Some(parse_index(value)?),
                        "name" => entry.name = Some(value.to_string()).filter(|name| !name.is_empty()),
                        "dir" => entry.ascending = parse_direction(value)?,
                        _ => tracing::trace!(key, "ignoring order parameter"),
                    }
                }
                _ => {
                    request.extra.insert(key.to_string(), value.to_string());
                }
            }
        }

        request.columns = columns.into_values().collect();
        request.order = order.into_values().collect();
        Ok(request)
    }

    /// Value of a non-DataTables parameter such as `search_type`.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Replace the global search text.
    #[must_use]
    pub fn with_global_search(mut self, value: impl Into<String>) -> Self {
        self.search.value = value.into();
        self
    }

    #[must_use]
    pub fn list_params(&self) -> ListParams {
        ListParams {
            start: self.start,
            length: self.length,
            search_value: self.search.value.clone(),
            search_regex: self.search.regex,
        }
    }

    /// One state per descriptor, in declaration order, with this request's
    /// search and sort applied.
    ///
    /// # Errors
    ///
    /// `BadRequest` when a column or order entry names no descriptor.
    pub fn column_states<'a>(
        &self,
        descriptors: &'a [ColumnDescriptor],
    ) -> Result<Vec<ColumnState<'a>>, ApiError> {
        let position = |identifier: &str| -> Result<Option<usize>, ApiError> {
            if identifier.is_empty() || identifier == SKIP_IDENTIFIER {
                return Ok(None);
            }
            descriptors
                .iter()
                .position(|descriptor| descriptor.identifier == identifier)
                .map(Some)
                .ok_or_else(|| {
                    tracing::debug!(identifier, "unknown column identifier");
                    ApiError::unparseable_arguments()
                })
        };

        let mut states = default_states(descriptors);

        for column in &self.columns {
            let Some(index) = position(column.data.trim())? else {
                continue;
            };
            let state = &mut states[index];
            if let Some(searchable) = column.searchable {
                state.set_searchable(searchable);
            }
            if let Some(orderable) = column.orderable {
                state.set_orderable(orderable);
            }
            state.set_search(column.search.value.clone(), column.search.regex);
        }

        for (priority, order) in self.order.iter().enumerate() {
            let identifier = match (order.column, &order.name) {
                (Some(index), _) => self
                    .columns
                    .iter()
                    .find(|column| column.index == index)
                    .map(|column| column.data.trim())
                    .ok_or_else(ApiError::unparseable_arguments)?,
                (None, Some(name)) => name.trim(),
                (None, None) => return Err(ApiError::unparseable_arguments()),
            };
            if let Some(index) = position(identifier)? {
                states[index].set_order(priority, order.ascending);
            }
        }

        Ok(states)
    }
}

impl<S: Send + Sync> FromRequest<S> for TableRequest {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "rejected table request");
                ApiError::unparseable_arguments()
            })?;
        Self::from_pairs(pairs)
    }
}
