//! Relationship traversals a column needs before its property can be referenced.
//!
//! Joins are declared per column as an ordered path of [`JoinStep`]s. A
//! [`JoinSet`] applies them to one query and remembers which keys it has
//! already joined, so two columns sharing a prefix (say `model_reaction` then
//! `model`) join each table once.

use sea_orm::{
    Condition, EntityTrait, JoinType, QuerySelect, RelationDef, Select, sea_query::IntoCondition,
};

/// One hop of a join path.
///
/// `key` identifies the hop within a view. Steps with equal keys are the same
/// join: the first one applied wins, later ones are skipped.
#[derive(Clone, Debug)]
pub struct JoinStep {
    key: &'static str,
    join_type: JoinType,
    relation: fn() -> RelationDef,
    on: Option<Condition>,
}

impl JoinStep {
    #[must_use]
    pub fn left(key: &'static str, relation: fn() -> RelationDef) -> Self {
        Self {
            key,
            join_type: JoinType::LeftJoin,
            relation,
            on: None,
        }
    }

    #[must_use]
    pub fn inner(key: &'static str, relation: fn() -> RelationDef) -> Self {
        Self {
            key,
            join_type: JoinType::InnerJoin,
            relation,
            on: None,
        }
    }

    /// Attach an extra condition to the join's ON clause.
    #[must_use]
    pub fn on<F: IntoCondition>(mut self, condition: F) -> Self {
        self.on = Some(condition.into_condition());
        self
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    #[must_use]
    pub fn has_condition(&self) -> bool {
        self.on.is_some()
    }

    fn relation_def(&self) -> RelationDef {
        let def = (self.relation)();
        match &self.on {
            Some(condition) => {
                let condition = condition.clone();
                def.on_condition(move |_, _| condition.clone())
            }
            None => def,
        }
    }
}

/// Joins already applied to one query, in application order.
#[derive(Debug, Default)]
pub struct JoinSet {
    applied: Vec<&'static str>,
}

impl JoinSet {
    /// Apply `step` unless a step with the same key is already on the query.
    pub fn apply<E: EntityTrait>(&mut self, query: Select<E>, step: &JoinStep) -> Select<E> {
        if self.contains(step.key) {
            return query;
        }
        tracing::trace!(join = step.key, "applying join");
        self.applied.push(step.key);
        query.join(step.join_type, step.relation_def())
    }

    pub fn apply_all<E: EntityTrait>(&mut self, query: Select<E>, steps: &[JoinStep]) -> Select<E> {
        steps.iter().fold(query, |query, step| self.apply(query, step))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.applied.contains(&key)
    }

    /// Keys in the order they were joined.
    #[must_use]
    pub fn keys(&self) -> &[&'static str] {
        &self.applied
    }
}
