//! Resource registry.
//!
//! One entry per physical unit, kept in registration order. Lookups by
//! kind go through an index so "first unit of kind X" queries never scan
//! unrelated equipment.

use std::collections::HashMap;

use super::{PackagingFamily, Resource, ResourceKind, ResourceStatus};

/// Catalog of equipment with typed capability queries.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
    by_id: HashMap<String, usize>,
    by_kind: HashMap<ResourceKind, Vec<usize>>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from resources in order. Later duplicates are dropped.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut registry = Self::new();
        for r in resources {
            registry.register(r);
        }
        registry
    }

    /// Registers a resource.
    ///
    /// Returns `false` (and leaves the registry unchanged) if the ID is taken.
    pub fn register(&mut self, resource: Resource) -> bool {
        if self.by_id.contains_key(&resource.id) {
            return false;
        }
        let idx = self.resources.len();
        self.by_id.insert(resource.id.clone(), idx);
        self.by_kind.entry(resource.kind).or_default().push(idx);
        self.resources.push(resource);
        true
    }

    /// Finds a resource by ID.
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.by_id.get(id).map(|&i| &self.resources[i])
    }

    /// All units of a kind, in registration order.
    pub fn all_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> + '_ {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(move |&i| &self.resources[i])
    }

    /// First unit of a kind.
    pub fn first_of_kind(&self, kind: ResourceKind) -> Option<&Resource> {
        self.all_of_kind(kind).next()
    }

    /// First idle (`Empty` or `Available`) unit of a kind.
    pub fn first_idle(&self, kind: ResourceKind) -> Option<&Resource> {
        self.all_of_kind(kind).find(|r| r.is_idle())
    }

    /// First packaging line filling the given family.
    pub fn first_line_for(&self, family: PackagingFamily) -> Option<&Resource> {
        self.all_of_kind(ResourceKind::PackagingLine)
            .find(|r| r.line_family == Some(family))
    }

    /// Number of units of a kind.
    pub fn count_of_kind(&self, kind: ResourceKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// All resources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.iter()
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resources are registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Overwrites a resource's status. Returns `false` for unknown IDs.
    pub(crate) fn set_status(&mut self, id: &str, status: ResourceStatus) -> bool {
        match self.by_id.get(id) {
            Some(&i) => {
                self.resources[i].status = status;
                true
            }
            None => false,
        }
    }

    /// Overwrites a resource's capacity. Returns `false` for unknown IDs.
    pub(crate) fn set_capacity(&mut self, id: &str, capacity: i64) -> bool {
        match self.by_id.get(id) {
            Some(&i) => {
                self.resources[i].capacity = Some(capacity);
                true
            }
            None => false,
        }
    }
}
