use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    sync::Arc,
};

use super::view::TableView;
use crate::errors::ApiError;

/// Configuration mistakes caught when the registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateView(String),
    DuplicateIdentifier { view: String, identifier: String },
    UnknownDefaultOrder { view: String, identifier: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateView(view) => write!(f, "view '{view}' is registered twice"),
            Self::DuplicateIdentifier { view, identifier } => {
                write!(f, "view '{view}' declares column '{identifier}' more than once")
            }
            Self::UnknownDefaultOrder { view, identifier } => {
                write!(f, "view '{view}' orders by unknown column '{identifier}'")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Every list view the application serves, keyed by name. Built once at
/// start-up and shared read-only.
#[derive(Clone, Default)]
pub struct ViewRegistry {
    views: BTreeMap<String, Arc<dyn TableView>>,
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Default)]
pub struct ViewRegistryBuilder {
    views: Vec<Arc<dyn TableView>>,
}

impl ViewRegistryBuilder {
    #[must_use]
    pub fn register(mut self, view: impl TableView + 'static) -> Self {
        self.views.push(Arc::new(view));
        self
    }

    /// # Errors
    ///
    /// Returns a [`RegistryError`] for a repeated view name, a repeated column
    /// identifier within one view, or a default order naming no column.
    pub fn build(self) -> Result<ViewRegistry, RegistryError> {
        let mut views = BTreeMap::new();
        for view in self.views {
            validate(view.as_ref())?;
            let name = view.name().to_string();
            if views.insert(name.clone(), view).is_some() {
                return Err(RegistryError::DuplicateView(name));
            }
        }
        tracing::debug!(views = views.len(), "view registry built");
        Ok(ViewRegistry { views })
    }
}

fn validate(view: &dyn TableView) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for column in view.columns() {
        if !seen.insert(column.identifier.as_str()) {
            return Err(RegistryError::DuplicateIdentifier {
                view: view.name().to_string(),
                identifier: column.identifier.clone(),
            });
        }
    }
    if let Some(identifier) = view.default_order() {
        if !seen.contains(identifier) {
            return Err(RegistryError::UnknownDefaultOrder {
                view: view.name().to_string(),
                identifier: identifier.to_string(),
            });
        }
    }
    Ok(())
}

impl ViewRegistry {
    #[must_use]
    pub fn builder() -> ViewRegistryBuilder {
        ViewRegistryBuilder::default()
    }

    /// # Errors
    ///
    /// `NotFound` when no view has this name.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn TableView>, ApiError> {
        self.views
            .get(name)
            .ok_or_else(|| ApiError::not_found("View", Some(name.to_string())))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
