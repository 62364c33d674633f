use super::descriptor::ColumnDescriptor;

/// Position and direction of a column in the request's sort list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderSpec {
    /// 0 sorts first
    pub priority: usize,
    pub ascending: bool,
}

/// Per-request overlay on a [`ColumnDescriptor`].
///
/// Overrides are optional; every getter falls back to the descriptor. A state
/// lives for one request and is never stored.
#[derive(Clone, Debug)]
pub struct ColumnState<'a> {
    descriptor: &'a ColumnDescriptor,
    search_value: String,
    search_regex: bool,
    order: Option<OrderSpec>,
    searchable: Option<bool>,
    orderable: Option<bool>,
}

impl<'a> ColumnState<'a> {
    #[must_use]
    pub fn new(descriptor: &'a ColumnDescriptor) -> Self {
        Self {
            descriptor,
            search_value: String::new(),
            search_regex: false,
            order: None,
            searchable: None,
            orderable: None,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &'a ColumnDescriptor {
        self.descriptor
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.descriptor.identifier
    }

    #[must_use]
    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    /// Accepted from the client, searched the same way as plain text.
    #[must_use]
    pub fn search_regex(&self) -> bool {
        self.search_regex
    }

    #[must_use]
    pub fn searchable(&self) -> bool {
        self.searchable.unwrap_or(self.descriptor.searchable)
    }

    #[must_use]
    pub fn orderable(&self) -> bool {
        self.orderable.unwrap_or(self.descriptor.orderable)
    }

    #[must_use]
    pub fn order(&self) -> Option<OrderSpec> {
        self.order
    }

    /// Order requested for this column, if the column may be ordered at all.
    #[must_use]
    pub fn active_order(&self) -> Option<OrderSpec> {
        self.order.filter(|_| self.orderable())
    }

    /// Whether the column's own search box filters the query.
    #[must_use]
    pub fn search_enabled(&self) -> bool {
        self.searchable()
            && self.descriptor.apply_search_query
            && !self.search_value.trim().is_empty()
    }

    /// Whether the global search box should consider this column.
    #[must_use]
    pub fn global_search_enabled(&self) -> bool {
        self.searchable() && self.descriptor.global_search && !self.descriptor.is_aggregated()
    }

    pub fn set_search(&mut self, value: impl Into<String>, regex: bool) {
        self.search_value = value.into();
        self.search_regex = regex;
    }

    pub fn set_order(&mut self, priority: usize, ascending: bool) {
        self.order = Some(OrderSpec {
            priority,
            ascending,
        });
    }

    pub fn set_searchable(&mut self, searchable: bool) {
        self.searchable = Some(searchable);
    }

    pub fn set_orderable(&mut self, orderable: bool) {
        self.orderable = Some(orderable);
    }

    #[must_use]
    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.set_search(value, false);
        self
    }

    #[must_use]
    pub fn with_order(mut self, priority: usize, ascending: bool) -> Self {
        self.set_order(priority, ascending);
        self
    }
}

/// One untouched state per descriptor, in declaration order.
#[must_use]
pub fn default_states(descriptors: &[ColumnDescriptor]) -> Vec<ColumnState<'_>> {
    descriptors.iter().map(ColumnState::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Aggregation;
    use crate::test_entities::{child, parent};

    fn name() -> ColumnDescriptor {
        ColumnDescriptor::for_column(parent::Column::Name, "Name")
    }

    #[test]
    fn test_overrides_fall_back_to_descriptor() {
        let descriptor = name().not_orderable();
        let mut state = ColumnState::new(&descriptor);
        assert!(state.searchable());
        assert!(!state.orderable());

        state.set_orderable(true);
        state.set_searchable(false);
        assert!(state.orderable());
        assert!(!state.searchable());
    }

    #[test]
    fn test_blank_search_is_disabled() {
        let descriptor = name();
        assert!(!ColumnState::new(&descriptor).with_search("   ").search_enabled());
        assert!(ColumnState::new(&descriptor).with_search("ec").search_enabled());
    }

    #[test]
    fn test_apply_search_query_gates_column_search_only() {
        let descriptor = name().global_only();
        let state = ColumnState::new(&descriptor).with_search("ec");
        assert!(!state.search_enabled());
        assert!(state.global_search_enabled());
    }

    #[test]
    fn test_aggregated_columns_skip_global_search() {
        let descriptor = ColumnDescriptor::new("parent__children", "Children", child::Column::Id)
            .global(true)
            .aggregate(Aggregation::Count)
            .global(true);
        assert!(!ColumnState::new(&descriptor).global_search_enabled());
    }

    #[test]
    fn test_order_ignored_when_not_orderable() {
        let descriptor = name();
        let mut state = ColumnState::new(&descriptor).with_order(0, false);
        assert_eq!(
            state.active_order(),
            Some(OrderSpec {
                priority: 0,
                ascending: false
            })
        );
        state.set_orderable(false);
        assert_eq!(state.active_order(), None);
        assert!(state.order().is_some());
    }

    #[test]
    fn test_default_states_follow_declaration_order() {
        let descriptors = vec![name(), ColumnDescriptor::for_column(child::Column::Score, "Score")];
        let states = default_states(&descriptors);
        let ids: Vec<_> = states.iter().map(ColumnState::identifier).collect();
        assert_eq!(ids, ["parent__name", "child__score"]);
    }
}
