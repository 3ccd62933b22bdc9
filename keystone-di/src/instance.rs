//! Pointer types shared by the container, together with the contract for resolving instances.

use crate::cache::CachedObject;
use crate::component::Component;
use crate::error::{ArgumentError, ConstructionError, ContainerError};
use derive_more::Constructor;
use std::any::{type_name, Any};
use std::error::Error;
#[cfg(not(feature = "threadsafe"))]
use std::rc::Rc;
#[cfg(feature = "threadsafe")]
use std::sync::Arc;

#[cfg(not(feature = "threadsafe"))]
pub type InstancePtr<T> = Rc<T>;
#[cfg(feature = "threadsafe")]
pub type InstancePtr<T> = Arc<T>;

#[cfg(not(feature = "threadsafe"))]
pub type InstanceAnyPtr = InstancePtr<dyn Any + 'static>;
#[cfg(feature = "threadsafe")]
pub type InstanceAnyPtr = InstancePtr<dyn Any + Send + Sync + 'static>;

#[cfg(not(feature = "threadsafe"))]
pub type ErrorPtr = InstancePtr<dyn Error + 'static>;
#[cfg(feature = "threadsafe")]
pub type ErrorPtr = InstancePtr<dyn Error + Send + Sync + 'static>;

/// Zero-argument lazy provider, re-evaluated on every lookup.
#[cfg(not(feature = "threadsafe"))]
pub type ProviderPtr = InstancePtr<dyn Fn() -> InstanceAnyPtr>;
#[cfg(feature = "threadsafe")]
pub type ProviderPtr = InstancePtr<dyn Fn() -> InstanceAnyPtr + Send + Sync>;

/// Construction capability of a class: builds an instance from positional arguments.
#[cfg(not(feature = "threadsafe"))]
pub type ConstructorPtr =
    InstancePtr<dyn Fn(&Arguments) -> Result<InstanceAnyPtr, ConstructionError>>;
#[cfg(feature = "threadsafe")]
pub type ConstructorPtr =
    InstancePtr<dyn Fn(&Arguments) -> Result<InstanceAnyPtr, ConstructionError> + Send + Sync>;

/// Marker for everything which can be stored in the container.
#[cfg(not(feature = "threadsafe"))]
pub trait Managed: Any {}
#[cfg(feature = "threadsafe")]
pub trait Managed: Any + Send + Sync {}

#[cfg(not(feature = "threadsafe"))]
impl<T: Any> Managed for T {}
#[cfg(feature = "threadsafe")]
impl<T: Any + Send + Sync> Managed for T {}

/// Wraps any error into an [ErrorPtr] suitable for [ConstructionError::Failed].
#[cfg(not(feature = "threadsafe"))]
pub fn construction_error<E: Error + 'static>(error: E) -> ConstructionError {
    ConstructionError::Failed(Rc::new(error) as ErrorPtr)
}

/// Wraps any error into an [ErrorPtr] suitable for [ConstructionError::Failed].
#[cfg(feature = "threadsafe")]
pub fn construction_error<E: Error + Send + Sync + 'static>(error: E) -> ConstructionError {
    ConstructionError::Failed(Arc::new(error) as ErrorPtr)
}

/// Ordered arguments passed to a construction capability. Arguments are matched positionally to
/// the declared dependency list of a class.
#[derive(Constructor, Clone, Debug, Default)]
pub struct Arguments {
    values: Vec<InstanceAnyPtr>,
}

impl Arguments {
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the argument at given position, downcast to `T`.
    pub fn get<T: Managed>(&self, index: usize) -> Result<InstancePtr<T>, ArgumentError> {
        let value = self.values.get(index).ok_or(ArgumentError::Missing {
            index,
            count: self.values.len(),
        })?;

        value
            .clone()
            .downcast::<T>()
            .map_err(|_| ArgumentError::Incompatible {
                index,
                expected: type_name::<T>(),
            })
    }

    /// Returns the raw, type-erased argument at given position.
    #[inline]
    pub fn get_any(&self, index: usize) -> Option<&InstanceAnyPtr> {
        self.values.get(index)
    }
}

impl From<Vec<InstanceAnyPtr>> for Arguments {
    fn from(values: Vec<InstanceAnyPtr>) -> Self {
        Self::new(values)
    }
}

/// Generic resolver for instances identified by string identifiers.
pub trait InstanceResolver {
    /// Returns the instance for given identifier, constructing and caching it along with its
    /// dependencies when needed.
    fn get(&mut self, id: &str) -> Result<InstanceAnyPtr, ContainerError>;

    /// Constructs a fresh, uncached instance from explicitly supplied dependencies.
    fn get_with(
        &mut self,
        id: &str,
        dependencies: Arguments,
    ) -> Result<InstanceAnyPtr, ContainerError>;

    /// Stores an object directly, replacing any previous entry for the identifier.
    fn set(&mut self, id: &str, object: CachedObject);

    /// Checks if given identifier can be resolved.
    fn has(&mut self, id: &str) -> bool;
}

/// Helper trait for [InstanceResolver] providing strongly-typed access.
pub trait TypedInstanceResolver {
    /// Typesafe version of [InstanceResolver::get].
    fn get_typed<T: Managed>(&mut self, id: &str) -> Result<InstancePtr<T>, ContainerError>;

    /// Typesafe version of [InstanceResolver::get_with].
    fn get_with_typed<T: Managed>(
        &mut self,
        id: &str,
        dependencies: Arguments,
    ) -> Result<InstancePtr<T>, ContainerError>;

    /// Resolves a [Component] using its own identifier.
    fn component<C: Component>(&mut self) -> Result<InstancePtr<C>, ContainerError>;
}

fn downcast<T: Managed>(
    id: &str,
    instance: InstanceAnyPtr,
) -> Result<InstancePtr<T>, ContainerError> {
    instance
        .downcast::<T>()
        .map_err(|_| ContainerError::IncompatibleInstance {
            id: id.to_string(),
            expected: type_name::<T>(),
        })
}

impl<R: InstanceResolver + ?Sized> TypedInstanceResolver for R {
    fn get_typed<T: Managed>(&mut self, id: &str) -> Result<InstancePtr<T>, ContainerError> {
        self.get(id).and_then(|instance| downcast(id, instance))
    }

    fn get_with_typed<T: Managed>(
        &mut self,
        id: &str,
        dependencies: Arguments,
    ) -> Result<InstancePtr<T>, ContainerError> {
        self.get_with(id, dependencies)
            .and_then(|instance| downcast(id, instance))
    }

    #[inline]
    fn component<C: Component>(&mut self) -> Result<InstancePtr<C>, ContainerError> {
        self.get_typed(C::identifier())
    }
}
