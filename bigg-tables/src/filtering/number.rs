//! Numeric search grammar.
//!
//! ```text
//! query  := group ("," group)*        any group may match
//! group  := clause ("&" clause)*      every clause must match
//! clause := [">=" | "<=" | ">" | "<"] number
//!         | number "-" number          inclusive range
//! ```
//!
//! Clauses that do not parse are dropped and the rest of their group is kept.
//! A group left with no clauses is dropped, and a query left with no groups is
//! no filter at all.

use sea_orm::{
    Condition,
    sea_query::{Expr, SimpleExpr},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberClause {
    Compare(Comparison, f64),
    /// Inclusive on both ends
    Range(f64, f64),
}

impl NumberClause {
    /// Parse one clause, `None` if it is malformed.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        // Two-character operators first so ">=5" is not read as "> =5".
        for (prefix, comparison) in [
            (">=", Comparison::Gte),
            ("<=", Comparison::Lte),
            (">", Comparison::Gt),
            ("<", Comparison::Lt),
        ] {
            if let Some(rest) = input.strip_prefix(prefix) {
                return parse_number(rest).map(|value| Self::Compare(comparison, value));
            }
        }

        if let Some(value) = parse_number(input) {
            return Some(Self::Compare(Comparison::Eq, value));
        }

        // A leading '-' is a sign, so only split on later dashes.
        input
            .char_indices()
            .filter(|&(index, c)| c == '-' && index > 0)
            .find_map(|(index, _)| {
                let low = parse_number(&input[..index])?;
                let high = parse_number(&input[index + 1..])?;
                Some(Self::Range(low, high))
            })
    }

    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Self::Compare(Comparison::Eq, bound) => (value - bound).abs() < f64::EPSILON,
            Self::Compare(Comparison::Gt, bound) => value > bound,
            Self::Compare(Comparison::Gte, bound) => value >= bound,
            Self::Compare(Comparison::Lt, bound) => value < bound,
            Self::Compare(Comparison::Lte, bound) => value <= bound,
            Self::Range(low, high) => value >= low && value <= high,
        }
    }

    fn to_condition(self, property: &SimpleExpr) -> Condition {
        let column = || Expr::expr(property.clone());
        match self {
            Self::Compare(Comparison::Eq, value) => Condition::all().add(column().eq(value)),
            Self::Compare(Comparison::Gt, value) => Condition::all().add(column().gt(value)),
            Self::Compare(Comparison::Gte, value) => Condition::all().add(column().gte(value)),
            Self::Compare(Comparison::Lt, value) => Condition::all().add(column().lt(value)),
            Self::Compare(Comparison::Lte, value) => Condition::all().add(column().lte(value)),
            Self::Range(low, high) => Condition::all()
                .add(column().gte(low))
                .add(column().lte(high)),
        }
    }
}

fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A parsed number search: OR over groups, AND within a group.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberQuery {
    pub groups: Vec<Vec<NumberClause>>,
}

impl NumberQuery {
    /// `None` when nothing in `input` parses.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let groups: Vec<Vec<NumberClause>> = input
            .split(',')
            .map(|group| {
                group
                    .split('&')
                    .filter_map(|clause| {
                        let parsed = NumberClause::parse(clause);
                        if parsed.is_none() && !clause.trim().is_empty() {
                            tracing::trace!(clause, "skipping malformed number clause");
                        }
                        parsed
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|group| !group.is_empty())
            .collect();

        if groups.is_empty() {
            None
        } else {
            Some(Self { groups })
        }
    }

    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|clause| clause.matches(value)))
    }

    #[must_use]
    pub fn to_condition(&self, property: &SimpleExpr) -> Condition {
        self.groups.iter().fold(Condition::any(), |any, group| {
            any.add(
                group
                    .iter()
                    .fold(Condition::all(), |all, clause| {
                        all.add(clause.to_condition(property))
                    }),
            )
        })
    }
}
