use keystone_di::class_registry::ClassDefinition;
use keystone_di::container::ContainerBuilder;
use keystone_di::instance::{InstancePtr, TypedInstanceResolver};

struct Repository;

struct Service {
    repository: InstancePtr<Repository>,
}

//noinspection DuplicatedCode
fn main() {
    // classes don't need to be components - definitions can be registered by hand, as long as
    // they declare dependencies in the same order the constructor expects them
    let mut container = ContainerBuilder::new()
        .expect("error initializing ContainerBuilder")
        .with_definition(ClassDefinition::builder("repository").build(|_| Ok(Repository)))
        .expect("error registering repository")
        .with_definition(
            ClassDefinition::builder("service")
                .dependency("repository")
                .build(|arguments| {
                    Ok(Service {
                        repository: arguments.get(0)?,
                    })
                }),
        )
        .expect("error registering service")
        .build();

    let service = container
        .get_typed::<Service>("service")
        .expect("error creating service");
    let repository = container
        .get_typed::<Repository>("repository")
        .expect("error creating repository");

    // singletons are shared
    assert!(InstancePtr::ptr_eq(&service.repository, &repository));
}
