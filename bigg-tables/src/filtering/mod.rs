//! # Search predicates
//!
//! Translates the text a user typed into a column's search box (or the global
//! box) into a Sea-ORM [`Condition`](sea_orm::Condition). One builder per
//! [`SearchType`](crate::columns::SearchType):
//!
//! | Type    | Input         | Predicate                                   |
//! |---------|---------------|---------------------------------------------|
//! | String  | `ecoli`       | `UPPER(p) LIKE UPPER('%ecoli%') ESCAPE '\'` |
//! | Boolean | `true`        | `p = TRUE`                                  |
//! | Boolean | `no`          | `p = FALSE`                                 |
//! | Number  | `>=5&<=10,20` | `(p >= 5 AND p <= 10) OR p = 20`            |
//! | Number  | `-10--2`      | `p >= -10 AND p <= -2`                      |
//!
//! Every builder returns `None` for blank text, and the number builder also
//! returns `None` when nothing in the text parses. `None` leaves the query
//! untouched; bad search text is never an error.

pub mod number;
pub mod search;

pub use number::{Comparison, NumberClause, NumberQuery};
pub use search::{boolean_predicate, number_predicate, string_predicate};
