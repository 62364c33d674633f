//! HTTP surface: JSON/fragment list API, page shells and the OpenAPI document.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::{MethodRouter, get},
};
use bigg_tables::{
    ApiError, ListScope, ResponseFormat, TableRequest, TableResponse, TableView,
};
use minijinja::context;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, TransactionTrait};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::entities::model;
use crate::openapi;
use crate::state::{AppState, LIST_PAGE};
use crate::views::{self, ModelScope};

/// Unscoped list endpoints and the view each serves.
pub const API_LISTS: &[(&str, &str)] = &[
    ("/api/v2/models", views::MODELS),
    ("/api/v2/universal/reactions", views::UNIVERSAL_REACTIONS),
    ("/api/v2/universal/metabolites", views::UNIVERSAL_METABOLITES),
    ("/api/v2/genes", views::GENES),
    ("/api/v2/genomes", views::GENOMES),
];

/// Endpoints restricted to one model by `{model}`.
pub const API_MODEL_LISTS: &[(&str, &str, ModelScope)] = &[
    (
        "/api/v2/models/{model}/reactions",
        views::MODEL_REACTIONS,
        views::model_reactions_scope,
    ),
    (
        "/api/v2/models/{model}/metabolites",
        views::MODEL_METABOLITES,
        views::model_metabolites_scope,
    ),
    (
        "/api/v2/models/{model}/genes",
        views::MODEL_GENES,
        views::model_genes_scope,
    ),
];

const PAGES: &[(&str, &str)] = &[
    ("/models", views::MODELS),
    ("/universal/reactions", views::UNIVERSAL_REACTIONS),
    ("/universal/metabolites", views::UNIVERSAL_METABOLITES),
    ("/genes", views::GENES),
    ("/genomes", views::GENOMES),
];

const MODEL_PAGES: &[(&str, &str)] = &[
    ("/models/{model}/reactions", views::MODEL_REACTIONS),
    ("/models/{model}/metabolites", views::MODEL_METABOLITES),
    ("/models/{model}/genes", views::MODEL_GENES),
];

/// How a request's rows are restricted before search.
enum Scoping {
    All,
    Model { bigg_id: String, scope: ModelScope },
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new();

    for (path, view) in API_LISTS {
        router = router.route(path, list_route(view));
    }
    for (path, view, scope) in API_MODEL_LISTS {
        router = router.route(path, model_list_route(view, *scope));
    }
    for (path, view) in PAGES {
        let api = api_path(path);
        router = router.route(path, get(move |state: State<AppState>| page(state, view, api, None)));
    }
    for (path, view) in MODEL_PAGES {
        router = router.route(
            path,
            get(move |state: State<AppState>, Path(bigg_id): Path<String>| {
                let api = format!("/api/v2/models/{bigg_id}/{}", last_segment(path));
                page(state, view, api, Some(bigg_id))
            }),
        );
    }

    router
        .route("/search", get(search_page))
        .route("/api/v2/search", get(search).post(search))
        .route("/api/v2/openapi.json", get(openapi_document))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_path(page: &str) -> String {
    format!("/api/v2{page}")
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn list_route(view: &'static str) -> MethodRouter<AppState> {
    let handler = move |State(state): State<AppState>, request: TableRequest| async move {
        list_response(&state, view, &request, Scoping::All).await
    };
    get(handler.clone()).post(handler)
}

fn model_list_route(view: &'static str, scope: ModelScope) -> MethodRouter<AppState> {
    let handler = move |State(state): State<AppState>,
                        Path(bigg_id): Path<String>,
                        request: TableRequest| async move {
        list_response(&state, view, &request, Scoping::Model { bigg_id, scope }).await
    };
    get(handler.clone()).post(handler)
}

async fn find_model<C: ConnectionTrait>(db: &C, bigg_id: &str) -> Result<model::Model, ApiError> {
    model::Entity::find()
        .filter(model::Column::BiggId.eq(bigg_id))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Model", Some(bigg_id.to_string())))
}

/// Run one list request in its own transaction and render it as requested.
#[tracing::instrument(skip(state, request, scoping), fields(format = ?request.format))]
async fn list_response(
    state: &AppState,
    view: &str,
    request: &TableRequest,
    scoping: Scoping,
) -> Result<Response, ApiError> {
    let table = state.views.get(view)?;
    let txn = state.db.begin().await?;

    let scope = match scoping {
        Scoping::All => ListScope::default(),
        Scoping::Model { bigg_id, scope } => scope(find_model(&txn, &bigg_id).await?.id),
    };
    let result = table.list(&txn, request, &scope).await?;
    txn.commit().await?;

    tracing::debug!(
        total = result.total_count,
        filtered = result.filtered_count,
        rows = result.rows.len(),
        "listed"
    );

    match request.format {
        ResponseFormat::Json => Ok(Json(TableResponse::new(request.draw, result)).into_response()),
        ResponseFormat::Html => {
            Ok(Html(state.fragments.render(table.columns(), &result.rows)?).into_response())
        }
    }
}

fn search_target(request: &TableRequest) -> Result<&'static str, ApiError> {
    let search_type = request.extra("search_type").unwrap_or_default();
    views::search_view(search_type)
        .ok_or_else(|| ApiError::bad_request(format!("unknown search_type {search_type:?}")))
}

async fn search(State(state): State<AppState>, request: TableRequest) -> Result<Response, ApiError> {
    let view = search_target(&request)?;
    let query = request.extra("query").unwrap_or_default().to_string();
    let request = request.with_global_search(query);
    list_response(&state, view, &request, Scoping::All).await
}

#[derive(Serialize)]
struct PageColumn<'a> {
    identifier: &'a str,
    display_name: &'a str,
    searchable: bool,
    orderable: bool,
    hyperlink: Option<&'a str>,
    priority: Option<u8>,
}

/// DataTables `order` option: the default sort column's position.
fn initial_order(table: &dyn TableView) -> Vec<(usize, &'static str)> {
    table
        .default_order()
        .and_then(|identifier| {
            table
                .columns()
                .iter()
                .position(|column| column.identifier == identifier)
        })
        .map(|index| vec![(index, "asc")])
        .unwrap_or_default()
}

fn render_page(
    state: &AppState,
    table: &Arc<dyn TableView>,
    api_url: &str,
    extra: &BTreeMap<&str, String>,
) -> Result<Html<String>, ApiError> {
    let columns: Vec<PageColumn<'_>> = table
        .columns()
        .iter()
        .map(|column| PageColumn {
            identifier: &column.identifier,
            display_name: column.display_name,
            searchable: column.searchable,
            orderable: column.orderable,
            hyperlink: column.hyperlink,
            priority: column.display_priority,
        })
        .collect();

    let html = state.pages.get_template(LIST_PAGE)?.render(context! {
        title => table.title(),
        api_url => api_url,
        columns => columns,
        order => initial_order(&**table),
        extra => extra,
    })?;
    Ok(Html(html))
}

async fn page(
    State(state): State<AppState>,
    view: &'static str,
    api_url: String,
    model: Option<String>,
) -> Result<Html<String>, ApiError> {
    let table = state.views.get(view)?;
    if let Some(bigg_id) = model {
        find_model(&state.db, &bigg_id).await?;
    }
    render_page(&state, table, &api_url, &BTreeMap::new())
}

async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let search_type = params.get("search_type").cloned().unwrap_or_default();
    let view = views::search_view(&search_type)
        .ok_or_else(|| ApiError::bad_request(format!("unknown search_type {search_type:?}")))?;
    let table = state.views.get(view)?;

    let extra = BTreeMap::from([
        ("search_type", search_type),
        ("query", params.get("query").cloned().unwrap_or_default()),
    ]);
    render_page(&state, table, "/api/v2/search", &extra)
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::document())
}
