//! Every class definition carries a [Scope], which decides if a constructed instance is stored in
//! the [ObjectCache](crate::cache::ObjectCache) for reuse or handed out fresh on every request.
//!
//! Note: scope resolution happens at instantiation time, which can lead to unexpected consequences
//! if scopes are mixed together, e.g. a [singleton](Scope::Singleton) class can depend on a
//! [prototype](Scope::Prototype) one. In such case when creating the singleton, a new instance of
//! the dependency will be created, but then that single instance will live as long as the
//! singleton lives.

use std::fmt::{Display, Formatter};

/// Name of the [Scope::Singleton].
pub const SINGLETON: &str = "SINGLETON";

/// Name of the [Scope::Prototype].
pub const PROTOTYPE: &str = "PROTOTYPE";

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Scope {
    /// Instances are constructed once and shared. Stateless classes are good candidates.
    #[default]
    Singleton,
    /// A new instance is created on each request. Stateful classes usually should be prototypes.
    Prototype,
}

impl Scope {
    /// Checks if instances in this scope should be stored in the object cache.
    #[inline]
    pub fn is_cached(self) -> bool {
        matches!(self, Scope::Singleton)
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Scope::Singleton => SINGLETON,
            Scope::Prototype => PROTOTYPE,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
