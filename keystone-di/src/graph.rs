//! Directed graph of resources and their dependencies, used to find missing resources and
//! circular dependencies before anything gets constructed.
//!
//! A check is a depth-first, postorder walk from a root resource. While walking, resources on the
//! current path are kept as *unresolved*, and finished ones are appended to the *resolved*
//! sequence, so on success the sequence lists dependencies before their dependents. Any error
//! resets the scratch state before returning; a successful check keeps the resolved sequence until
//! [DependencyGraph::reset_dependency_check] is called.

use crate::error::GraphError;
use fxhash::{FxHashMap, FxHashSet};

#[derive(Default, Clone, Debug)]
struct DependencyCheck {
    resolved: Vec<String>,
    resolved_set: FxHashSet<String>,
    unresolved: FxHashSet<String>,
}

impl DependencyCheck {
    fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.unresolved.is_empty()
    }

    fn clear(&mut self) {
        self.resolved.clear();
        self.resolved_set.clear();
        self.unresolved.clear();
    }

    fn visit<F: Fn(&str) -> bool>(
        &mut self,
        resources: &FxHashMap<String, Vec<String>>,
        resource_id: &str,
        is_settled: &F,
    ) -> Result<(), GraphError> {
        let dependencies = resources
            .get(resource_id)
            .ok_or_else(|| GraphError::ResourceNotFound(resource_id.to_string()))?;

        self.unresolved.insert(resource_id.to_string());

        for dependency in dependencies {
            if self.resolved_set.contains(dependency) || is_settled(dependency) {
                continue;
            }

            if self.unresolved.contains(dependency) {
                return Err(GraphError::CircularDependency(resource_id.to_string()));
            }

            self.visit(resources, dependency, is_settled)?;
        }

        self.unresolved.remove(resource_id);
        self.resolved_set.insert(resource_id.to_string());
        self.resolved.push(resource_id.to_string());

        Ok(())
    }
}

/// Dependency graph over resource identifiers.
#[derive(Default, Clone, Debug)]
pub struct DependencyGraph {
    resources: FxHashMap<String, Vec<String>>,
    check: DependencyCheck,
}

impl DependencyGraph {
    /// Adds a resource with no dependencies. An existing resource is overwritten.
    pub fn add_resource<T: ToString>(&mut self, resource_id: T) -> &mut Self {
        self.resources.insert(resource_id.to_string(), Vec::new());
        self
    }

    #[inline]
    pub fn is_resource(&self, resource_id: &str) -> bool {
        self.resources.contains_key(resource_id)
    }

    /// Appends a dependency to an existing resource.
    pub fn add_dependency<T: ToString>(&mut self, resource_id: &str, dependency: T) -> &mut Self {
        self.add_dependencies(resource_id, [dependency])
    }

    /// Appends dependencies to an existing resource, keeping their order.
    pub fn add_dependencies<T: ToString, I: IntoIterator<Item = T>>(
        &mut self,
        resource_id: &str,
        dependencies: I,
    ) -> &mut Self {
        debug_assert!(
            self.is_resource(resource_id),
            "dependencies can only be added to existing resources"
        );

        self.resources
            .entry(resource_id.to_string())
            .or_default()
            .extend(dependencies.into_iter().map(|dependency| dependency.to_string()));
        self
    }

    /// Returns the declared dependencies of a resource.
    #[inline]
    pub fn dependencies(&self, resource_id: &str) -> Option<&[String]> {
        self.resources.get(resource_id).map(Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Checks given resource and all of its transitive dependencies for missing resources and
    /// cycles. A [GraphError::CircularDependency] names the resource whose dependencies were being
    /// expanded when the cycle was closed, which is not necessarily the root.
    pub fn run_dependency_check(&mut self, resource_id: &str) -> Result<(), GraphError> {
        self.run_dependency_check_with(resource_id, |_| false)
    }

    /// Same as [DependencyGraph::run_dependency_check], but dependencies for which `is_settled`
    /// returns `true` are treated as leaves: neither their presence nor their edges are checked.
    pub fn run_dependency_check_with<F: Fn(&str) -> bool>(
        &mut self,
        resource_id: &str,
        is_settled: F,
    ) -> Result<(), GraphError> {
        let result = self.check.visit(&self.resources, resource_id, &is_settled);
        if result.is_err() {
            self.reset_dependency_check();
        }

        result
    }

    /// Returns the order in which the dependencies of the last checked resource should be
    /// resolved, without the resource itself.
    pub fn dependency_resolve_order(&self) -> &[String] {
        let resolved = &self.check.resolved;
        &resolved[..resolved.len().saturating_sub(1)]
    }

    /// Clears the state left by the last successful check.
    #[inline]
    pub fn reset_dependency_check(&mut self) {
        self.check.clear();
    }

    /// Checks if a finished check left state which wasn't reset yet.
    #[inline]
    pub fn is_check_pending(&self) -> bool {
        !self.check.is_empty()
    }
}
