//! A [Component] is a class which knows how to describe itself: its identifier, its ordered
//! dependencies and how to create an instance from resolved dependencies. This replaces runtime
//! constructor introspection with declarations known at compile time.
//!
//! ## Registering components
//!
//! The trait can be implemented manually, but for convenience it can be automatically derived if
//! the `derive` feature is enabled. Derived components are submitted to the
//! [StaticClassCatalog](crate::class_registry::StaticClassCatalog) automatically:
//!
//! ```
//! use keystone_di::instance::InstancePtr;
//! use keystone_di::Component;
//!
//! #[derive(Component)]
//! struct TestDependency;
//!
//! #[derive(Component)]
//! #[component(name = "test_component", scope = "prototype")]
//! struct TestComponent {
//!     // dependency on another component, identified by its own identifier
//!     dependency: InstancePtr<TestDependency>,
//!     // dependency on an object stored under an explicit identifier
//!     #[component(name = "greeting")]
//!     greeting: InstancePtr<String>,
//!     #[component(default)]
//!     default: i8,
//!     #[component(default = "dummy_expr")]
//!     default_expr: i8,
//! }
//!
//! fn dummy_expr() -> i8 {
//!     -1
//! }
//! ```
//!
//! ### Supported `#[component]` struct configuration
//!
//! * `name = "name"` - use given identifier instead of the generated `module::path::TypeName`
//! * `scope = "singleton" | "prototype"` - [Scope] of created instances (default: singleton)
//!
//! ### Supported `#[component]` field configuration
//!
//! * `name = "name"` - inject the object registered or cached under `name`
//! * `default` - use `Default::default()` initialization
//! * `default = "expr"` - call `expr()` for initialization

use crate::class_registry::Dependency;
use crate::error::ConstructionError;
use crate::instance::{Arguments, Managed};
use crate::scope::Scope;

/// Base trait for components for dependency injection.
pub trait Component: Managed + Sized {
    /// Unique identifier of this component.
    fn identifier() -> &'static str;

    /// Ordered dependencies passed to [Component::create].
    fn dependencies() -> Vec<Dependency>;

    #[inline]
    fn scope() -> Scope {
        Scope::Singleton
    }

    /// Creates an instance of this component from resolved dependencies, in the order returned by
    /// [Component::dependencies].
    fn create(arguments: &Arguments) -> Result<Self, ConstructionError>;
}
