//! JSON envelope and HTML fragment output.

use minijinja::{Environment, context};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::columns::ColumnDescriptor;
use crate::core::{ListResult, Record};
use crate::errors::ApiError;

/// DataTables response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    /// Request `draw` plus one, omitted when the request had none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw: Option<u64>,
    /// Rows in scope before any search
    pub records_total: u64,
    /// Rows left after search
    pub records_filtered: u64,
    /// One object per row, keyed by column identifier
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Record>,
}

impl TableResponse {
    #[must_use]
    pub fn new(request_draw: Option<u64>, result: ListResult) -> Self {
        Self {
            draw: request_draw.map(|draw| draw.saturating_add(1)),
            records_total: result.total_count,
            records_filtered: result.filtered_count,
            data: result.rows,
        }
    }
}

const ROWS_TEMPLATE: &str = "\
<tbody>
{%- for row in rows %}
<tr>
{%- for cell in row %}<td>{% if cell.href is not none %}<a href=\"{{ cell.href }}\">{{ cell.value }}</a>{% else %}{{ cell.value }}{% endif %}</td>{% endfor -%}
</tr>
{%- endfor %}
</tbody>
";

#[derive(Serialize)]
struct Cell {
    value: String,
    href: Option<String>,
}

fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Renders list results as `<tbody>` rows for clients that swap HTML in place.
///
/// Cell text and link targets are escaped by the template; link targets come
/// from each column's hyperlink template rendered with the row as context.
pub struct FragmentRenderer {
    env: Environment<'static>,
}

impl FragmentRenderer {
    /// # Errors
    ///
    /// Fails only if the built-in row template does not compile.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("rows.html", ROWS_TEMPLATE)?;
        Ok(Self { env })
    }

    /// # Errors
    ///
    /// `Internal` when a hyperlink template fails to render.
    pub fn render(&self, columns: &[ColumnDescriptor], rows: &[Record]) -> Result<String, ApiError> {
        let rows = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        let href = column
                            .hyperlink
                            .map(|template| self.env.render_str(template, row))
                            .transpose()?;
                        Ok(Cell {
                            value: display(row.get(&column.identifier)),
                            href,
                        })
                    })
                    .collect::<Result<Vec<_>, minijinja::Error>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.env.get_template("rows.html")?.render(context! { rows })?)
    }
}
