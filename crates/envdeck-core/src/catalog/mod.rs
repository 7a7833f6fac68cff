use std::{
    io::Read,
    sync::{Arc, PoisonError, RwLock},
};

use envdeck_model::{
    AccessKey, Application, EnvValueChange, EnvVariable, Group, ListPage, Permission, QueryState,
    Role,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::CoreError, pipeline::ListPipeline};

/// Shared, swappable snapshot of one collection delivered by the backend.
///
/// A refresh replaces the whole collection; readers always see a complete snapshot.
pub struct Collection<T> {
    name: &'static str,
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Collection<T> {
    pub fn new(name: &'static str) -> Self {
        Self::with_items(name, Vec::new())
    }

    pub fn with_items(name: &'static str, items: Vec<T>) -> Self {
        Self {
            name,
            inner: Arc::new(RwLock::new(items)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Swap in a freshly fetched collection.
    pub fn replace(&self, items: Vec<T>) {
        let count = items.len();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *inner = items;
        debug!(collection = self.name, count, "collection replaced");
    }

    /// Clone of the current collection.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `pipeline` against the current collection.
    ///
    /// The pipeline runs inside a single read lock; only the visible records are cloned.
    pub fn query(&self, pipeline: &ListPipeline<T>, state: &QueryState) -> ListPage<T> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        pipeline.compute(&inner, state)
    }
}

/// Full payload of the backend endpoints feeding the dashboard lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSnapshot {
    pub applications: Vec<Application>,
    pub variables: Vec<EnvVariable>,
    pub access_keys: Vec<AccessKey>,
    pub groups: Vec<Group>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub history: Vec<EnvValueChange>,
}

/// In-memory holder of every collection shown by the dashboard.
#[derive(Clone)]
pub struct Catalog {
    pub applications: Collection<Application>,
    pub variables: Collection<EnvVariable>,
    pub access_keys: Collection<AccessKey>,
    pub groups: Collection<Group>,
    pub roles: Collection<Role>,
    pub permissions: Collection<Permission>,
    pub history: Collection<EnvValueChange>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            applications: Collection::new("applications"),
            variables: Collection::new("variables"),
            access_keys: Collection::new("access-keys"),
            groups: Collection::new("groups"),
            roles: Collection::new("roles"),
            permissions: Collection::new("permissions"),
            history: Collection::new("history"),
        }
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let catalog = Self::new();
        catalog.load(snapshot);
        catalog
    }

    /// Parse a JSON [`CatalogSnapshot`]; missing collections are empty.
    pub fn from_json<R: Read>(reader: R) -> Result<Self, CoreError> {
        let snapshot: CatalogSnapshot = serde_json::from_reader(reader)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Replace every collection with the snapshot's content.
    pub fn load(&self, snapshot: CatalogSnapshot) {
        self.applications.replace(snapshot.applications);
        self.variables.replace(snapshot.variables);
        self.access_keys.replace(snapshot.access_keys);
        self.groups.replace(snapshot.groups);
        self.roles.replace(snapshot.roles);
        self.permissions.replace(snapshot.permissions);
        self.history.replace(snapshot.history);
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            applications: self.applications.snapshot(),
            variables: self.variables.snapshot(),
            access_keys: self.access_keys.snapshot(),
            groups: self.groups.snapshot(),
            roles: self.roles.snapshot(),
            permissions: self.permissions.snapshot(),
            history: self.history.snapshot(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
