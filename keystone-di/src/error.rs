use crate::instance::ErrorPtr;
use thiserror::Error;

/// Errors reported by a [DependencyGraph](crate::graph::DependencyGraph) check.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum GraphError {
    #[error("Resource not found: '{0}'")]
    ResourceNotFound(String),
    #[error("Circular dependency detected while expanding resource '{0}'")]
    CircularDependency(String),
}

/// Error related to class catalogs.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ClassCatalogError {
    #[error("Attempted to re-register a class definition with identifier: {0}")]
    DuplicateDefinition(String),
    #[error("Class definitions cannot be registered under an empty identifier")]
    EmptyIdentifier,
}

/// Errors related to retrieving positional construction arguments.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ArgumentError {
    #[error("Missing argument at position {index} - only {count} were supplied")]
    Missing { index: usize, count: usize },
    #[error("Argument at position {index} is not an instance of {expected}")]
    Incompatible { index: usize, expected: &'static str },
}

/// Errors returned by construction capabilities.
#[derive(Error, Clone, Debug)]
pub enum ConstructionError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error("{0}")]
    Failed(ErrorPtr),
}

/// Errors related to resolving objects from a [Container](crate::container::Container).
#[derive(Error, Clone, Debug)]
pub enum ContainerError {
    #[error("Class '{0}' does not exist and its definition cannot be registered")]
    ClassNotFound(String),
    #[error("While trying to resolve class '{id}', the class dependency '{dependency}' could not be found")]
    DependencyNotFound { id: String, dependency: String },
    #[error("While trying to resolve class '{id}', a circular dependency caused by class '{cycle_node}' was found")]
    CircularDependency { id: String, cycle_node: String },
    #[error("'{0}' could not be resolved by the container")]
    ServiceNotFound(String),
    #[error("Error constructing '{id}': {source}")]
    ConstructionFailed {
        id: String,
        source: ConstructionError,
    },
    #[error("Tried to downcast '{id}' to incompatible type: {expected}")]
    IncompatibleInstance { id: String, expected: &'static str },
}
