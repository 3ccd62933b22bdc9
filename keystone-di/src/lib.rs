//! Dependency injection container resolving objects by string identifiers.
//!
//! Classes describe themselves with a [ClassDefinition](class_registry::ClassDefinition): an
//! identifier, an ordered list of dependencies and a construction capability. The
//! [Container](container::Container) registers definitions on demand, rejects circular and missing
//! dependencies before constructing anything, and caches singletons so every request returns the
//! same instance. Plain values, ready instances and lazy providers can be stored directly in the
//! object cache, overriding real classes.
//!
//! ```
//! use keystone_di::cache::CachedObject;
//! use keystone_di::class_registry::ClassDefinition;
//! use keystone_di::container::ContainerBuilder;
//! use keystone_di::instance::{InstancePtr, TypedInstanceResolver};
//!
//! struct Greeter {
//!     name: InstancePtr<String>,
//! }
//!
//! let mut container = ContainerBuilder::new()
//!     .unwrap()
//!     .with_definition(
//!         ClassDefinition::builder("greeter")
//!             .dependency("name")
//!             .build(|arguments| Ok(Greeter { name: arguments.get(0)? })),
//!     )
//!     .unwrap()
//!     .with_object("name", CachedObject::value("world".to_string()))
//!     .build();
//!
//! let greeter = container.get_typed::<Greeter>("greeter").unwrap();
//! assert_eq!(greeter.name.as_str(), "world");
//! ```
//!
//! ### Features
//!
//! * `threadsafe` - use threadsafe pointers and `Send + Sync` trait bounds
//! * `derive` - automatically derive [Component](component::Component) definitions

pub mod cache;
pub mod class_registry;
pub mod component;
pub mod config;
pub mod container;
pub mod error;
pub mod graph;
pub mod instance;
pub mod scope;

#[cfg(feature = "derive")]
pub use keystone_di_derive::Component;
