//! Core functionality for resolving objects. A [Container] registers class definitions on demand,
//! verifies the dependency graph of a requested class and constructs it bottom-up, storing
//! singletons in the [ObjectCache] for reuse.
//!
//! Resolution of an identifier goes through the following steps:
//!
//! 1. If the object cache contains an entry, it's returned immediately (lazy providers are invoked
//!    on every request).
//! 2. The class and, recursively, all of its dependencies get registered. Before descending into
//!    the dependencies of a newly registered dependency, the graph is checked for cycles, so cycles
//!    are rejected at the shallowest point.
//! 3. Dependencies are resolved recursively, the class is constructed and, if it's a singleton,
//!    stored in the cache.
//!
//! Dependencies already present in the cache are never registered nor validated - a cached object
//! short-circuits its whole subtree.

use crate::cache::{CachedObject, ObjectCache};
use crate::class_registry::{ClassCatalogPtr, ClassDefinition, ClassRegistry, StaticClassCatalog};
use crate::config::ContainerConfig;
use crate::error::{ClassCatalogError, ContainerError, GraphError};
use crate::graph::DependencyGraph;
use crate::instance::{Arguments, InstanceAnyPtr, InstanceResolver};
use fxhash::FxHashSet;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors related to building a [Container] from the environment.
#[derive(Error, Debug)]
pub enum ContainerBuildError {
    #[error("Error reading container configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Error collecting class definitions: {0}")]
    Catalog(#[from] ClassCatalogError),
}

/// Builder for [Container] with sensible defaults, for easy construction.
pub struct ContainerBuilder {
    catalog: ClassCatalogPtr,
    objects: ObjectCache,
}

impl ContainerBuilder {
    /// Creates a new builder with a default configuration.
    pub fn new() -> Result<Self, ClassCatalogError> {
        Self::from_config(&ContainerConfig::default())
    }

    /// Creates a new builder with given configuration.
    pub fn from_config(config: &ContainerConfig) -> Result<Self, ClassCatalogError> {
        let catalog = if config.collect_static_definitions {
            StaticClassCatalog::from_submitted(config.allow_definition_overriding)?
        } else {
            StaticClassCatalog::new(config.allow_definition_overriding)
        };

        Ok(Self {
            catalog: Box::new(catalog),
            objects: Default::default(),
        })
    }

    /// Creates a new builder configured from the config file and environment, installing the
    /// default logger if requested.
    pub fn from_environment() -> Result<Self, ContainerBuildError> {
        let config = ContainerConfig::init_from_environment()?;
        if config.init_tracing_logger() {
            debug!("Installed default tracing logger.");
        }

        Self::from_config(&config).map_err(Into::into)
    }

    /// Sets new [ClassCatalog](crate::class_registry::ClassCatalog).
    pub fn with_catalog(mut self, catalog: ClassCatalogPtr) -> Self {
        self.catalog = catalog;
        self
    }

    /// Registers a new definition in the current catalog.
    pub fn with_definition(mut self, definition: ClassDefinition) -> Result<Self, ClassCatalogError> {
        self.catalog.register_definition(definition)?;
        Ok(self)
    }

    /// Registers all given definitions in the current catalog.
    pub fn with_definitions<I: IntoIterator<Item = ClassDefinition>>(
        self,
        definitions: I,
    ) -> Result<Self, ClassCatalogError> {
        definitions
            .into_iter()
            .try_fold(self, |builder, definition| builder.with_definition(definition))
    }

    /// Pre-seeds the object cache.
    pub fn with_object<T: ToString>(mut self, id: T, object: CachedObject) -> Self {
        self.objects.set(id, object);
        self
    }

    /// Builds resulting [Container].
    pub fn build(self) -> Container {
        Container {
            registry: ClassRegistry::new(self.catalog),
            graph: Default::default(),
            cache: self.objects,
        }
    }
}

/// Dependency injection container. Uses definitions from the
/// [ClassCatalog](crate::class_registry::ClassCatalog) to register classes,
/// the [DependencyGraph] to validate them, and the [ObjectCache] to store instances for reuse.
pub struct Container {
    registry: ClassRegistry,
    graph: DependencyGraph,
    cache: ObjectCache,
}

impl Container {
    /// Creates an empty container using given catalog.
    pub fn new(catalog: ClassCatalogPtr) -> Self {
        Self {
            registry: ClassRegistry::new(catalog),
            graph: Default::default(),
            cache: Default::default(),
        }
    }

    /// Registers the class definition for given identifier, if not registered yet.
    pub fn register(&mut self, id: &str) -> Result<(), ContainerError> {
        if !self.registry.is_registered(id) {
            self.register_class_definition(id)?;
        }

        Ok(())
    }

    #[inline]
    pub fn is_registered(&self, id: &str) -> bool {
        self.registry.is_registered(id)
    }

    #[inline]
    pub fn class_definition(&self, id: &str) -> Option<&ClassDefinition> {
        self.registry.get(id)
    }

    #[inline]
    pub fn object_cache(&self) -> &ObjectCache {
        &self.cache
    }

    #[inline]
    pub fn clear_object_cache(&mut self) {
        self.cache.clear();
    }

    #[inline]
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    fn register_class_definition(&mut self, id: &str) -> Result<(), ContainerError> {
        let definition = self.registry.register(id)?;

        self.graph
            .add_resource(id)
            .add_dependencies(id, definition.dependency_ids());

        Ok(())
    }

    // Registers all dependencies of an already registered class, checking for cycles before
    // descending into each dependency. `path` holds the classes currently being expanded, while
    // `completed` holds classes whose whole subtree is already registered and checked.
    fn register_dependent_class_definitions(
        &mut self,
        id: &str,
        path: &mut Vec<String>,
        completed: &mut FxHashSet<String>,
    ) -> Result<(), ContainerError> {
        if completed.contains(id) {
            return Ok(());
        }

        let dependencies = self.dependency_ids(id);

        path.push(id.to_string());

        for dependency in &dependencies {
            if self.cache.contains(dependency) || completed.contains(dependency) {
                continue;
            }

            if !self.registry.is_registered(dependency) {
                self.register_class_definition(dependency).map_err(|_| {
                    ContainerError::DependencyNotFound {
                        id: id.to_string(),
                        dependency: dependency.clone(),
                    }
                })?;
            }

            self.check_circular_dependencies(id)?;

            // Invariant check only: every class on the path is registered with its edges, so the
            // graph check above reports such cycles first.
            if path.contains(dependency) {
                return Err(ContainerError::CircularDependency {
                    id: id.to_string(),
                    cycle_node: id.to_string(),
                });
            }

            self.register_dependent_class_definitions(dependency, path, completed)?;
        }

        path.pop();
        completed.insert(id.to_string());

        Ok(())
    }

    fn check_circular_dependencies(&mut self, id: &str) -> Result<(), ContainerError> {
        trace!(id, "Running dependency check.");

        let cache = &self.cache;
        match self
            .graph
            .run_dependency_check_with(id, |dependency| cache.contains(dependency))
        {
            Err(GraphError::CircularDependency(cycle_node)) => {
                Err(ContainerError::CircularDependency {
                    id: id.to_string(),
                    cycle_node,
                })
            }
            // dependencies of freshly registered classes are registered later
            Err(GraphError::ResourceNotFound(_)) => Ok(()),
            Ok(()) => {
                self.graph.reset_dependency_check();
                Ok(())
            }
        }
    }

    fn dependency_ids(&self, id: &str) -> Vec<String> {
        self.registry
            .get(id)
            .map(|definition| definition.dependency_ids().map(str::to_string).collect_vec())
            .unwrap_or_default()
    }

    fn resolve_instance(&mut self, id: &str) -> Result<InstanceAnyPtr, ContainerError> {
        if let Some(object) = self.cache.resolve(id) {
            trace!(id, "Returning cached object.");
            return Ok(object);
        }

        if !self.registry.is_registered(id) {
            self.register_class_definition(id)?;
        }

        self.register_dependent_class_definitions(id, &mut Vec::new(), &mut Default::default())?;
        self.construct_registered(id)
    }

    // Constructs a class whose whole subtree is already registered and checked.
    fn construct_registered(&mut self, id: &str) -> Result<InstanceAnyPtr, ContainerError> {
        if let Some(object) = self.cache.resolve(id) {
            return Ok(object);
        }

        let arguments: Vec<InstanceAnyPtr> = self
            .dependency_ids(id)
            .iter()
            .map(|dependency| self.construct_registered(dependency))
            .try_collect()?;

        self.instantiate(id, &Arguments::new(arguments), true)
    }

    fn instantiate(
        &mut self,
        id: &str,
        arguments: &Arguments,
        cache: bool,
    ) -> Result<InstanceAnyPtr, ContainerError> {
        let definition = self
            .registry
            .get(id)
            .ok_or_else(|| ContainerError::ClassNotFound(id.to_string()))?;

        let cache = cache && definition.scope.is_cached();
        if cache {
            if let Some(object) = self.cache.resolve(id) {
                return Ok(object);
            }
        }

        debug!(id, scope = %definition.scope, "Constructing instance.");

        let instance = definition.construct(arguments).map_err(|source| {
            ContainerError::ConstructionFailed {
                id: id.to_string(),
                source,
            }
        })?;

        Ok(if cache {
            self.cache.insert_once(id, instance)
        } else {
            instance
        })
    }
}

impl InstanceResolver for Container {
    fn get(&mut self, id: &str) -> Result<InstanceAnyPtr, ContainerError> {
        self.resolve_instance(id).map_err(|error| match error {
            ContainerError::ClassNotFound(missing) if missing == id => {
                ContainerError::ServiceNotFound(missing)
            }
            error => error,
        })
    }

    fn get_with(
        &mut self,
        id: &str,
        dependencies: Arguments,
    ) -> Result<InstanceAnyPtr, ContainerError> {
        self.register(id)?;
        self.instantiate(id, &dependencies, false)
    }

    fn set(&mut self, id: &str, object: CachedObject) {
        debug!(id, "Storing object.");
        self.cache.set(id, object);
    }

    fn has(&mut self, id: &str) -> bool {
        let result = self.get(id);
        self.graph.reset_dependency_check();

        if let Err(error) = &result {
            trace!(id, %error, "Cannot resolve object.");
        }

        result.is_ok()
    }
}

#[cfg(test)]
//noinspection DuplicatedCode
mod tests {
    use crate::cache::CachedObject;
    use crate::class_registry::{
        ClassCatalogPtr, ClassDefinition, MockClassCatalog, StaticClassCatalog,
    };
    use crate::config::ContainerConfig;
    use crate::container::{Container, ContainerBuilder};
    use crate::error::{ConstructionError, ContainerError};
    use crate::instance::{
        construction_error, Arguments, InstanceAnyPtr, InstancePtr, InstanceResolver,
        TypedInstanceResolver,
    };
    use crate::scope::Scope;
    use mockall::predicate::*;
    use std::fmt::{Display, Formatter};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    #[derive(Debug)]
    struct TestC;

    #[derive(Debug)]
    struct TestB {
        c: InstancePtr<TestC>,
    }

    #[derive(Debug)]
    struct TestA {
        b: InstancePtr<TestB>,
    }

    struct TestD {
        a: InstancePtr<TestA>,
        b: InstancePtr<TestB>,
    }

    #[derive(Debug)]
    struct TestError;

    impl Display for TestError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("test error")
        }
    }

    impl std::error::Error for TestError {}

    fn c_definition() -> ClassDefinition {
        ClassDefinition::builder("C").build(|_| Ok(TestC))
    }

    fn b_definition() -> ClassDefinition {
        ClassDefinition::builder("B")
            .dependency("C")
            .build(|arguments| Ok(TestB { c: arguments.get(0)? }))
    }

    fn a_definition() -> ClassDefinition {
        ClassDefinition::builder("A")
            .dependency("B")
            .build(|arguments| Ok(TestA { b: arguments.get(0)? }))
    }

    fn d_definition() -> ClassDefinition {
        ClassDefinition::builder("D")
            .dependency("A")
            .dependency("B")
            .build(|arguments| {
                Ok(TestD {
                    a: arguments.get(0)?,
                    b: arguments.get(1)?,
                })
            })
    }

    fn empty_definition(id: &str, dependencies: &[&str]) -> ClassDefinition {
        ClassDefinition::builder(id)
            .dependencies(dependencies.iter().copied())
            .build(|_| Ok(()))
    }

    fn counting_definition(
        id: &str,
        dependencies: &[String],
        counter: &'static AtomicUsize,
    ) -> ClassDefinition {
        ClassDefinition::builder(id)
            .dependencies(dependencies.iter().cloned())
            .build(move |_| Ok(counter.fetch_add(1, Ordering::SeqCst)))
    }

    fn create_container(definitions: Vec<ClassDefinition>) -> Container {
        ContainerBuilder::from_config(&ContainerConfig::default().with_static_definitions(false))
            .unwrap()
            .with_definitions(definitions)
            .unwrap()
            .build()
    }

    fn create_abc_container() -> Container {
        create_container(vec![
            a_definition(),
            b_definition(),
            c_definition(),
            d_definition(),
        ])
    }

    #[test]
    fn should_return_same_instance_for_dependency_free_class() {
        let mut container = create_abc_container();

        let first = container.get("C").unwrap();
        let second = container.get("C").unwrap();

        assert!(InstancePtr::ptr_eq(&first, &second));
        assert!(!container.dependency_graph().is_check_pending());
    }

    #[test]
    fn should_resolve_and_cache_dependency_tree() {
        let mut container = create_abc_container();

        let a = container.get_typed::<TestA>("A").unwrap();
        let b = container.get_typed::<TestB>("B").unwrap();

        assert!(InstancePtr::ptr_eq(&a.b, &b));
        for id in ["A", "B", "C"] {
            assert!(container.object_cache().contains(id));
            assert!(container.is_registered(id));
        }
    }

    #[test]
    fn should_share_previously_resolved_dependency() {
        let mut container = create_abc_container();

        let c = container.get_typed::<TestC>("C").unwrap();
        let a = container.get_typed::<TestA>("A").unwrap();

        assert!(InstancePtr::ptr_eq(&a.b.c, &c));
    }

    #[test]
    fn should_share_diamond_dependency() {
        let mut container = create_abc_container();

        let d = container.get_typed::<TestD>("D").unwrap();

        assert!(InstancePtr::ptr_eq(&d.a.b, &d.b));
    }

    #[test]
    fn should_resolve_layered_shared_dependencies_once() {
        const LAYERS: usize = 22;
        static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

        let layer = |index: usize| vec![format!("{index}-a"), format!("{index}-b")];

        let mut definitions = vec![counting_definition("root", &layer(0), &CONSTRUCTIONS)];
        for index in 0..LAYERS {
            let dependencies = if index + 1 < LAYERS {
                layer(index + 1)
            } else {
                Vec::new()
            };

            for id in layer(index) {
                definitions.push(counting_definition(&id, &dependencies, &CONSTRUCTIONS));
            }
        }

        let mut container = create_container(definitions);

        let start = Instant::now();
        let root = container.get("root").unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));

        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 2 * LAYERS + 1);
        assert!(InstancePtr::ptr_eq(&root, &container.get("root").unwrap()));
        for index in 0..LAYERS {
            for id in layer(index) {
                assert!(container.object_cache().contains(&id));
            }
        }

        let shared = container.get_typed::<usize>("5-a").unwrap();
        assert!(InstancePtr::ptr_eq(
            &shared,
            &container.get_typed::<usize>("5-a").unwrap()
        ));
        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 2 * LAYERS + 1);
        assert!(!container.dependency_graph().is_check_pending());
    }

    #[test]
    fn should_reconstruct_after_clearing_cache() {
        let mut container = create_abc_container();

        let first = container.get("C").unwrap();
        container.clear_object_cache();
        assert!(container.object_cache().is_empty());

        let second = container.get("C").unwrap();
        assert!(!InstancePtr::ptr_eq(&first, &second));
    }

    #[test]
    fn should_detect_two_node_cycle() {
        let mut container = create_container(vec![
            empty_definition("AA", &["BB"]),
            empty_definition("BB", &["AA"]),
        ]);

        assert!(matches!(
            container.get("AA").unwrap_err(),
            ContainerError::CircularDependency { id, cycle_node } if id == "AA" && cycle_node == "BB"
        ));
        assert!(!container.object_cache().contains("AA"));
        assert!(!container.dependency_graph().is_check_pending());
    }

    #[test]
    fn should_detect_three_node_cycle() {
        let mut container = create_container(vec![
            empty_definition("A", &["B"]),
            empty_definition("B", &["C"]),
            empty_definition("C", &["A"]),
        ]);

        assert!(matches!(
            container.get("A").unwrap_err(),
            ContainerError::CircularDependency { id, cycle_node } if id == "B" && cycle_node == "A"
        ));
    }

    #[test]
    fn should_detect_self_dependency() {
        let mut container = create_container(vec![empty_definition("A", &["A"])]);

        assert!(matches!(
            container.get("A").unwrap_err(),
            ContainerError::CircularDependency { id, cycle_node } if id == "A" && cycle_node == "A"
        ));
    }

    #[test]
    fn should_detect_long_cycle() {
        const LENGTH: usize = 200;

        let definitions = (0..LENGTH)
            .map(|index| {
                let id = index.to_string();
                let dependency = ((index + 1) % LENGTH).to_string();
                empty_definition(&id, &[&dependency])
            })
            .collect();

        let mut container = create_container(definitions);

        assert!(matches!(
            container.get("0").unwrap_err(),
            ContainerError::CircularDependency { .. }
        ));
        assert!(!container.has("0"));
    }

    #[test]
    fn should_detect_cycle_behind_cached_dependency() {
        let mut container = create_container(vec![
            empty_definition("A", &["X", "B"]),
            empty_definition("B", &["A"]),
        ]);
        container.set("X", CachedObject::value(1u8));

        assert!(matches!(
            container.get("A").unwrap_err(),
            ContainerError::CircularDependency { id, cycle_node } if id == "A" && cycle_node == "B"
        ));
    }

    #[test]
    fn should_not_validate_cached_class_registered_earlier() {
        let mut container = create_container(vec![
            empty_definition("A", &["X", "B"]),
            empty_definition("X", &["A"]),
            empty_definition("B", &[]),
        ]);

        container.register("X").unwrap();
        container.set("X", CachedObject::value(1u8));

        assert!(container.get("A").is_ok());
        assert!(container.object_cache().contains("B"));
        assert!(!container.dependency_graph().is_check_pending());
    }

    #[test]
    fn should_report_missing_dependency() {
        let mut container = create_container(vec![empty_definition("A", &["Missing"])]);

        assert!(matches!(
            container.get("A").unwrap_err(),
            ContainerError::DependencyNotFound { id, dependency } if id == "A" && dependency == "Missing"
        ));
        assert!(!container.has("A"));
        assert!(!container.dependency_graph().is_check_pending());
    }

    #[test]
    fn should_report_missing_transitive_dependency() {
        let mut container = create_container(vec![
            empty_definition("A", &["B"]),
            empty_definition("B", &["Missing"]),
        ]);

        assert!(matches!(
            container.get("A").unwrap_err(),
            ContainerError::DependencyNotFound { id, dependency } if id == "B" && dependency == "Missing"
        ));
    }

    #[test]
    fn should_report_untyped_dependency() {
        let mut container = create_container(vec![ClassDefinition::builder("A")
            .untyped_dependency()
            .build(|_| Ok(()))]);

        assert!(matches!(
            container.get("A").unwrap_err(),
            ContainerError::DependencyNotFound { id, dependency } if id == "A" && dependency.is_empty()
        ));
    }

    #[test]
    fn should_report_missing_service() {
        let mut container = create_abc_container();

        assert!(matches!(
            container.get("Undefined").unwrap_err(),
            ContainerError::ServiceNotFound(id) if id == "Undefined"
        ));
        assert!(matches!(
            container.register("Undefined").unwrap_err(),
            ContainerError::ClassNotFound(id) if id == "Undefined"
        ));
        assert!(!container.has("Undefined"));
    }

    #[test]
    fn should_return_set_object_instead_of_constructing() {
        let mut container = create_abc_container();
        let c = InstancePtr::new(TestC);

        container.set("C", CachedObject::instance(c.clone()));

        let resolved = container.get_typed::<TestC>("C").unwrap();
        assert!(InstancePtr::ptr_eq(&resolved, &c));
        assert!(!container.is_registered("C"));
    }

    #[test]
    fn should_store_plain_values() {
        let mut container = create_abc_container();

        container.set("config.name", CachedObject::value("keystone".to_string()));

        assert!(container.has("config.name"));
        assert_eq!(
            container
                .get_typed::<String>("config.name")
                .unwrap()
                .as_str(),
            "keystone"
        );
    }

    #[test]
    fn should_reinvoke_providers() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let mut container = create_abc_container();
        container.set(
            "counter",
            CachedObject::provider(|| CALLS.fetch_add(1, Ordering::SeqCst)),
        );
        container.set("pure", CachedObject::provider(|| 42u32));

        assert_eq!(*container.get_typed::<usize>("counter").unwrap(), 0);
        assert_eq!(*container.get_typed::<usize>("counter").unwrap(), 1);
        assert_eq!(
            *container.get_typed::<u32>("pure").unwrap(),
            *container.get_typed::<u32>("pure").unwrap()
        );
    }

    #[test]
    fn should_override_class_with_provider() {
        let mut container = create_abc_container();
        container.set(
            "B",
            CachedObject::provider(|| TestB {
                c: InstancePtr::new(TestC),
            }),
        );

        let first = container.get_typed::<TestB>("B").unwrap();
        let second = container.get_typed::<TestB>("B").unwrap();

        assert!(!InstancePtr::ptr_eq(&first, &second));
        assert!(!container.is_registered("B"));
    }

    #[test]
    fn should_resolve_with_cached_dependency_subtree() {
        let mut container = create_container(vec![
            a_definition(),
            empty_definition("B", &["Unregistrable"]),
        ]);
        container.set(
            "B",
            CachedObject::instance(InstancePtr::new(TestB {
                c: InstancePtr::new(TestC),
            })),
        );

        assert!(container.get_typed::<TestA>("A").is_ok());
        assert!(!container.is_registered("B"));
        assert!(!container.is_registered("Unregistrable"));
    }

    #[test]
    fn should_construct_uncached_instance_with_supplied_dependencies() {
        let mut container = create_abc_container();

        let c = container.get_typed::<TestC>("C").unwrap();
        let b = container
            .get_with_typed::<TestB>("B", Arguments::new(vec![c.clone() as InstanceAnyPtr]))
            .unwrap();

        assert!(InstancePtr::ptr_eq(&b.c, &c));
        assert!(!container.object_cache().contains("B"));
        assert!(container.is_registered("B"));

        let cached = container.get_typed::<TestB>("B").unwrap();
        assert!(!InstancePtr::ptr_eq(&cached, &b));
        assert!(container.object_cache().contains("B"));
    }

    #[test]
    fn should_not_cache_get_with_without_dependencies() {
        let mut container = create_abc_container();

        container.get_with("C", Arguments::default()).unwrap();

        assert!(!container.object_cache().contains("C"));
    }

    #[test]
    fn should_surface_construction_error_on_mismatched_arguments() {
        let mut container = create_abc_container();

        assert!(matches!(
            container.get_with("B", Arguments::default()).unwrap_err(),
            ContainerError::ConstructionFailed {
                source: ConstructionError::Argument(..),
                ..
            }
        ));
        assert!(matches!(
            container.get_with("Undefined", Arguments::default()).unwrap_err(),
            ContainerError::ClassNotFound(..)
        ));
    }

    #[test]
    fn should_keep_resolved_siblings_on_failure() {
        let mut container = create_container(vec![
            c_definition(),
            ClassDefinition::builder("Failing").build(|_| -> Result<(), _> {
                Err(construction_error(TestError))
            }),
            empty_definition("Parent", &["C", "Failing"]),
        ]);

        assert!(matches!(
            container.get("Parent").unwrap_err(),
            ContainerError::ConstructionFailed { id, .. } if id == "Failing"
        ));
        assert!(container.object_cache().contains("C"));
        assert!(!container.object_cache().contains("Failing"));
        assert!(!container.object_cache().contains("Parent"));
    }

    #[test]
    fn should_construct_prototypes_on_every_request() {
        let mut container = create_container(vec![
            c_definition(),
            ClassDefinition::builder("B")
                .dependency("C")
                .scope(Scope::Prototype)
                .build(|arguments| Ok(TestB { c: arguments.get(0)? })),
        ]);

        let first = container.get_typed::<TestB>("B").unwrap();
        let second = container.get_typed::<TestB>("B").unwrap();

        assert!(!InstancePtr::ptr_eq(&first, &second));
        assert!(InstancePtr::ptr_eq(&first.c, &second.c));
        assert!(!container.object_cache().contains("B"));
    }

    #[test]
    fn should_report_incompatible_instance() {
        let mut container = create_abc_container();

        assert!(matches!(
            container.get_typed::<TestA>("C").unwrap_err(),
            ContainerError::IncompatibleInstance { id, .. } if id == "C"
        ));
    }

    #[test]
    fn should_register_definitions_from_catalog() {
        let mut catalog = MockClassCatalog::new();
        catalog
            .expect_class_definition()
            .with(eq("C"))
            .times(1)
            .return_const(Some(c_definition()));

        let mut container = Container::new(Box::new(catalog) as ClassCatalogPtr);

        container.register("C").unwrap();
        container.get("C").unwrap();

        assert!(container.class_definition("C").is_some());
    }

    #[test]
    fn should_use_custom_catalog() {
        let catalog = StaticClassCatalog::new(false)
            .with_definition(c_definition())
            .unwrap();

        let mut container = ContainerBuilder::new()
            .unwrap()
            .with_catalog(Box::new(catalog))
            .with_object("value", CachedObject::value(5i32))
            .build();

        assert!(container.has("C"));
        assert!(container.has("value"));
        assert!(!container.has("A"));
    }

    #[cfg(feature = "threadsafe")]
    fn assert_send_sync<T: Send + Sync>() {}

    #[cfg(feature = "threadsafe")]
    #[test]
    fn should_be_shareable_between_threads() {
        assert_send_sync::<Container>();
        assert_send_sync::<ContainerBuilder>();
    }

    #[cfg(feature = "threadsafe")]
    #[test]
    fn should_construct_once_when_shared_between_threads() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

        let container = Arc::new(Mutex::new(create_container(vec![counting_definition(
            "C",
            &[],
            &CONSTRUCTIONS,
        )])));

        let handles = (0..8)
            .map(|_| {
                let container = container.clone();
                thread::spawn(move || {
                    let instance = container.lock().unwrap().get("C").unwrap();
                    instance
                })
            })
            .collect::<Vec<_>>();

        let instances = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
        assert!(instances
            .iter()
            .all(|instance| InstancePtr::ptr_eq(instance, &instances[0])));
    }
}
