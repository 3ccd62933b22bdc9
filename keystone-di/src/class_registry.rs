//! Functionality related to describing and registering classes. Rust has no runtime constructor
//! introspection, so each class declares its ordered dependency list and construction capability
//! up front in a [ClassDefinition]. Definitions are made available through a [ClassCatalog], either
//! manually or automatically with `#[derive(Component)]`, and are then registered on demand in a
//! [ClassRegistry] when the container first needs them.

use crate::component::Component;
use crate::error::{ClassCatalogError, ConstructionError, ContainerError};
use crate::instance::{Arguments, ConstructorPtr, InstanceAnyPtr, InstancePtr, Managed};
use crate::scope::Scope;
use derivative::Derivative;
use fxhash::FxHashMap;
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use std::collections::hash_map::Entry;
use std::fmt::{Display, Formatter};
use tracing::debug;

#[cfg(not(feature = "threadsafe"))]
pub type ClassCatalogPtr = Box<dyn ClassCatalog>;
#[cfg(feature = "threadsafe")]
pub type ClassCatalogPtr = Box<dyn ClassCatalog + Send + Sync>;

/// Identifier used for dependencies which have no type reference. It's never registrable.
pub const UNTYPED_DEPENDENCY: &str = "";

/// A single, positional dependency of a class.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Dependency {
    /// Dependency on the object registered or cached under given identifier.
    Class(String),
    /// Constructor parameter without a type reference. Surfaces as a missing dependency when
    /// resolving, instead of being silently dropped.
    Untyped,
}

impl Dependency {
    #[inline]
    pub fn identifier(&self) -> &str {
        match self {
            Dependency::Class(id) => id,
            Dependency::Untyped => UNTYPED_DEPENDENCY,
        }
    }
}

impl From<&str> for Dependency {
    fn from(value: &str) -> Self {
        if value == UNTYPED_DEPENDENCY {
            Dependency::Untyped
        } else {
            Dependency::Class(value.to_string())
        }
    }
}

impl From<String> for Dependency {
    fn from(value: String) -> Self {
        if value == UNTYPED_DEPENDENCY {
            Dependency::Untyped
        } else {
            Dependency::Class(value)
        }
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Definition of a constructible class.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ClassDefinition {
    /// Unique identifier of the class.
    pub id: String,

    /// Ordered dependencies, matched positionally to constructor arguments.
    pub dependencies: Vec<Dependency>,

    /// Decides if constructed instances get cached.
    pub scope: Scope,

    /// Constructor for type-erased instances.
    #[derivative(Debug = "ignore")]
    pub constructor: ConstructorPtr,
}

impl ClassDefinition {
    /// Starts building a definition for given identifier.
    pub fn builder<T: ToString>(id: T) -> ClassDefinitionBuilder {
        ClassDefinitionBuilder {
            id: id.to_string(),
            dependencies: Vec::new(),
            scope: Scope::default(),
        }
    }

    /// Creates a definition for a [Component].
    pub fn of<C: Component>() -> Self {
        Self {
            id: C::identifier().to_string(),
            dependencies: C::dependencies(),
            scope: C::scope(),
            constructor: InstancePtr::new(|arguments: &Arguments| {
                C::create(arguments).map(|instance| InstancePtr::new(instance) as InstanceAnyPtr)
            }) as ConstructorPtr,
        }
    }

    /// Returns dependency identifiers in declaration order.
    pub fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(Dependency::identifier)
    }

    /// Invokes the construction capability.
    #[inline]
    pub fn construct(&self, arguments: &Arguments) -> Result<InstanceAnyPtr, ConstructionError> {
        (self.constructor)(arguments)
    }
}

/// Builder for [ClassDefinition]s registered by hand.
#[derive(Clone, Debug)]
pub struct ClassDefinitionBuilder {
    id: String,
    dependencies: Vec<Dependency>,
    scope: Scope,
}

impl ClassDefinitionBuilder {
    /// Appends a dependency on given identifier. An empty identifier is an untyped dependency.
    pub fn dependency<T: Into<Dependency>>(mut self, dependency: T) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    /// Appends all given dependencies.
    pub fn dependencies<T: Into<Dependency>, I: IntoIterator<Item = T>>(
        mut self,
        dependencies: I,
    ) -> Self {
        self.dependencies
            .extend(dependencies.into_iter().map(Into::into));
        self
    }

    /// Appends a dependency which has no type reference.
    pub fn untyped_dependency(mut self) -> Self {
        self.dependencies.push(Dependency::Untyped);
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Finishes the definition with a typed construction capability.
    pub fn build<T, F>(self, constructor: F) -> ClassDefinition
    where
        T: Managed,
        F: Fn(&Arguments) -> Result<T, ConstructionError> + Managed,
    {
        ClassDefinition {
            id: self.id,
            dependencies: self.dependencies,
            scope: self.scope,
            constructor: InstancePtr::new(move |arguments: &Arguments| {
                constructor(arguments).map(|instance| InstancePtr::new(instance) as InstanceAnyPtr)
            }) as ConstructorPtr,
        }
    }
}

/// Source of class definitions - the replacement for runtime type introspection. Given an
/// identifier, it reports if the class is constructible and how.
#[cfg_attr(test, automock)]
pub trait ClassCatalog {
    /// Adds a new definition. Handling of duplicate identifiers is catalog-dependent.
    fn register_definition(&mut self, definition: ClassDefinition)
        -> Result<(), ClassCatalogError>;

    /// Returns the definition for given identifier, if known.
    fn class_definition(&self, id: &str) -> Option<ClassDefinition>;

    /// Checks if given identifier can be mapped to a constructible class.
    fn is_constructible(&self, id: &str) -> bool;

    /// Returns all known identifiers.
    fn identifiers(&self) -> Vec<String>;
}

/// Catalog of class definitions initialized from statically submitted definitions and extended
/// with manually registered ones.
#[derive(Clone, Debug)]
pub struct StaticClassCatalog {
    definitions: FxHashMap<String, ClassDefinition>,
    allow_definition_overriding: bool,
}

impl StaticClassCatalog {
    /// Creates an empty catalog.
    pub fn new(allow_definition_overriding: bool) -> Self {
        Self {
            definitions: Default::default(),
            allow_definition_overriding,
        }
    }

    /// Creates a catalog containing all definitions submitted by `#[derive(Component)]`.
    pub fn from_submitted(allow_definition_overriding: bool) -> Result<Self, ClassCatalogError> {
        let definitions = inventory::iter::<internal::ClassDefinitionRegisterer>
            .into_iter()
            .map(|registerer| (registerer.register)())
            .collect_vec();

        debug!(count = definitions.len(), "Collected submitted class definitions.");

        let mut catalog = Self::new(allow_definition_overriding);
        for definition in definitions {
            catalog.register_definition(definition)?;
        }

        Ok(catalog)
    }

    /// Registers given definition and returns the updated catalog.
    pub fn with_definition(mut self, definition: ClassDefinition) -> Result<Self, ClassCatalogError> {
        self.register_definition(definition)?;
        Ok(self)
    }
}

impl ClassCatalog for StaticClassCatalog {
    fn register_definition(
        &mut self,
        definition: ClassDefinition,
    ) -> Result<(), ClassCatalogError> {
        if definition.id.is_empty() {
            return Err(ClassCatalogError::EmptyIdentifier);
        }

        match self.definitions.entry(definition.id.clone()) {
            Entry::Occupied(mut entry) => {
                if !self.allow_definition_overriding {
                    return Err(ClassCatalogError::DuplicateDefinition(definition.id));
                }

                debug!(id = %definition.id, "Overriding class definition.");
                entry.insert(definition);
            }
            Entry::Vacant(entry) => {
                entry.insert(definition);
            }
        }

        Ok(())
    }

    #[inline]
    fn class_definition(&self, id: &str) -> Option<ClassDefinition> {
        self.definitions.get(id).cloned()
    }

    #[inline]
    fn is_constructible(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    fn identifiers(&self) -> Vec<String> {
        self.definitions.keys().cloned().sorted().collect()
    }
}

/// Definitions registered for use by the container. Each identifier gets registered at most once,
/// and the definition stays immutable afterwards.
pub struct ClassRegistry {
    catalog: ClassCatalogPtr,
    definitions: FxHashMap<String, ClassDefinition>,
}

impl ClassRegistry {
    pub fn new(catalog: ClassCatalogPtr) -> Self {
        Self {
            catalog,
            definitions: Default::default(),
        }
    }

    /// Registers the definition of given class, if not registered yet.
    pub fn register(&mut self, id: &str) -> Result<&ClassDefinition, ContainerError> {
        match self.definitions.entry(id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let definition = self
                    .catalog
                    .class_definition(id)
                    .ok_or_else(|| ContainerError::ClassNotFound(id.to_string()))?;

                debug!(
                    id,
                    dependencies = definition.dependencies.len(),
                    scope = %definition.scope,
                    "Registered class definition."
                );

                Ok(entry.insert(definition))
            }
        }
    }

    #[inline]
    pub fn is_registered(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&ClassDefinition> {
        self.definitions.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

#[doc(hidden)]
pub mod internal {
    use crate::class_registry::ClassDefinition;
    use inventory::collect;
    pub use inventory::submit;

    pub struct ClassDefinitionRegisterer {
        pub register: fn() -> ClassDefinition,
    }

    collect!(ClassDefinitionRegisterer);
}
