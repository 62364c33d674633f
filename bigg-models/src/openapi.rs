//! OpenAPI document for the list API.
//!
//! The list routes are built from closures, so their paths are described here
//! rather than with `#[utoipa::path]`.

use bigg_tables::{ErrorResponse, TableResponse};
use utoipa::OpenApi;
use utoipa::openapi::{
    ContentBuilder, Ref, Required,
    path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathsBuilder},
    response::ResponseBuilder,
};

use crate::routes::{API_LISTS, API_MODEL_LISTS};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BiGG Models API",
        description = "Server-side paginated lists of models, reactions, metabolites, genes and genomes"
    ),
    components(schemas(TableResponse, ErrorResponse))
)]
struct ApiDoc;

fn json_response(description: &str, schema: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            "application/json",
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name(schema)))
                .build(),
        )
        .build()
}

fn query_parameter(name: &str, description: &str) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .build()
}

fn list_operation(summary: &str, model_scoped: bool) -> OperationBuilder {
    let mut operation = OperationBuilder::new()
        .summary(Some(summary))
        .tag("lists")
        .parameter(query_parameter("draw", "Echoed back incremented by one"))
        .parameter(query_parameter("start", "Offset of the first row"))
        .parameter(query_parameter("length", "Page size, -1 for all rows"))
        .parameter(query_parameter("search[value]", "Global search text"))
        .parameter(query_parameter("format", "json (default) or html"))
        .response("200", json_response("One page of rows", "TableResponse"))
        .response("400", json_response("Unparseable arguments", "ErrorResponse"));

    if model_scoped {
        operation = operation
            .parameter(
                ParameterBuilder::new()
                    .name("model")
                    .parameter_in(ParameterIn::Path)
                    .required(Required::True)
                    .description(Some("BiGG ID of the model")),
            )
            .response("404", json_response("No such model", "ErrorResponse"));
    }
    operation
}

/// The complete document, components plus every list path.
#[must_use]
pub fn document() -> utoipa::openapi::OpenApi {
    let mut paths = PathsBuilder::new();

    for (path, view) in API_LISTS {
        paths = paths.path(
            *path,
            PathItem::from_http_methods(
                [HttpMethod::Get, HttpMethod::Post],
                list_operation(&format!("List {}", view.replace('_', " ")), false),
            ),
        );
    }
    for (path, view, _) in API_MODEL_LISTS {
        paths = paths.path(
            *path,
            PathItem::from_http_methods(
                [HttpMethod::Get, HttpMethod::Post],
                list_operation(&format!("List {} of one model", view.replace('_', " ")), true),
            ),
        );
    }
    paths = paths.path(
        "/api/v2/search",
        PathItem::from_http_methods(
            [HttpMethod::Get, HttpMethod::Post],
            list_operation("Search one of the universal lists", false)
                .parameter(query_parameter(
                    "search_type",
                    "models, reactions, metabolites, genes or genomes",
                ))
                .parameter(query_parameter("query", "Search text")),
        ),
    );

    let mut doc = ApiDoc::openapi();
    doc.paths = paths.build();
    doc
}
