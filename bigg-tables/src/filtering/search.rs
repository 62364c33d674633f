use sea_orm::{
    Condition,
    sea_query::{BinOper, Expr, Func, SimpleExpr},
};

use super::number::NumberQuery;
use crate::columns::SearchType;

// Longer search text is truncated, not rejected.
const MAX_SEARCH_QUERY_LENGTH: usize = 1_000;

/// Escape LIKE wildcards so `%` and `_` in user text match literally.
/// Backslash goes first since it is the escape character.
pub(crate) fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn truncate(input: &str) -> &str {
    match input.char_indices().nth(MAX_SEARCH_QUERY_LENGTH) {
        Some((index, _)) => &input[..index],
        None => input,
    }
}

/// `UPPER(property) LIKE UPPER('%value%') ESCAPE '\'`, `None` for blank text.
///
/// Both sides are folded by the database so they agree on what upper case
/// means for non-ASCII text.
#[must_use]
pub fn string_predicate(property: &SimpleExpr, value: &str) -> Option<Condition> {
    let value = truncate(value.trim());
    if value.is_empty() {
        return None;
    }
    let pattern: SimpleExpr =
        Func::upper(Expr::val(format!("%{}%", escape_like_wildcards(value)))).into();
    let pattern = pattern.binary(BinOper::Escape, SimpleExpr::Constant('\\'.into()));
    let upper: SimpleExpr = Func::upper(property.clone()).into();
    Some(Condition::all().add(Expr::expr(upper).binary(BinOper::Like, pattern)))
}

/// `"true"` selects true rows, any other non-blank text selects false rows.
#[must_use]
pub fn boolean_predicate(property: &SimpleExpr, value: &str) -> Option<Condition> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let wanted = value.eq_ignore_ascii_case("true");
    Some(Condition::all().add(Expr::expr(property.clone()).eq(wanted)))
}

/// See [`NumberQuery`] for the grammar; `None` when nothing parses.
#[must_use]
pub fn number_predicate(property: &SimpleExpr, value: &str) -> Option<Condition> {
    NumberQuery::parse(truncate(value)).map(|query| query.to_condition(property))
}

impl SearchType {
    /// Predicate for `value` against `property`. `None` means the query is
    /// left unchanged.
    #[must_use]
    pub fn predicate(self, property: &SimpleExpr, value: &str) -> Option<Condition> {
        match self {
            Self::String => string_predicate(property, value),
            Self::Number => number_predicate(property, value),
            Self::Boolean => boolean_predicate(property, value),
        }
    }
}
