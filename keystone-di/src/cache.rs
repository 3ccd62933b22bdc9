//! Storage for already resolved objects. An entry is either a plain value, an instance or a lazy
//! provider which gets invoked on every lookup. Setting an entry always replaces the previous one,
//! which makes it possible to override real classes with test doubles or alternate providers.

use crate::instance::{InstanceAnyPtr, InstancePtr, Managed, ProviderPtr};
use derivative::Derivative;
use fxhash::FxHashMap;

/// A single object cache entry.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum CachedObject {
    /// Plain, non-class value, e.g. configuration.
    Value(InstanceAnyPtr),
    /// Constructed or externally supplied instance.
    Instance(InstanceAnyPtr),
    /// Zero-argument provider re-evaluated on every lookup.
    Provider(#[derivative(Debug = "ignore")] ProviderPtr),
}

impl CachedObject {
    pub fn value<T: Managed>(value: T) -> Self {
        Self::Value(InstancePtr::new(value) as InstanceAnyPtr)
    }

    pub fn instance<T: Managed>(instance: InstancePtr<T>) -> Self {
        Self::Instance(instance as InstanceAnyPtr)
    }

    pub fn provider<T, F>(provider: F) -> Self
    where
        T: Managed,
        F: Fn() -> T + Managed,
    {
        Self::Provider(
            InstancePtr::new(move || InstancePtr::new(provider()) as InstanceAnyPtr) as ProviderPtr,
        )
    }

    /// Returns the stored object, invoking the provider if needed.
    pub fn resolve(&self) -> InstanceAnyPtr {
        match self {
            CachedObject::Value(value) => value.clone(),
            CachedObject::Instance(instance) => instance.clone(),
            CachedObject::Provider(provider) => provider(),
        }
    }
}

/// Identifier-keyed store of [CachedObject]s.
#[derive(Default, Clone, Debug)]
pub struct ObjectCache {
    objects: FxHashMap<String, CachedObject>,
}

impl ObjectCache {
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&CachedObject> {
        self.objects.get(id)
    }

    /// Returns the object stored under given identifier, invoking lazy providers.
    #[inline]
    pub fn resolve(&self, id: &str) -> Option<InstanceAnyPtr> {
        self.objects.get(id).map(CachedObject::resolve)
    }

    /// Stores given object, replacing any previous entry.
    pub fn set<T: ToString>(&mut self, id: T, object: CachedObject) {
        self.objects.insert(id.to_string(), object);
    }

    /// Stores given instance only if there's no entry for the identifier yet, and returns whatever
    /// ends up stored.
    pub fn insert_once(&mut self, id: &str, instance: InstanceAnyPtr) -> InstanceAnyPtr {
        self.objects
            .entry(id.to_string())
            .or_insert(CachedObject::Instance(instance))
            .resolve()
    }

    #[inline]
    pub fn remove(&mut self, id: &str) -> Option<CachedObject> {
        self.objects.remove(id)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}
