use keystone_di::container::ContainerBuilder;
use keystone_di::instance::{InstancePtr, TypedInstanceResolver};
use keystone_di::Component;

#[derive(Component)]
struct SingletonDependency;

// prototypes are constructed on every request, while their singleton dependencies are shared
#[derive(Component)]
#[component(scope = "prototype")]
struct PrototypeComponent {
    dependency: InstancePtr<SingletonDependency>,
}

//noinspection DuplicatedCode
fn main() {
    let mut container = ContainerBuilder::new()
        .expect("error initializing ContainerBuilder")
        .build();

    let first = container
        .component::<PrototypeComponent>()
        .expect("error creating PrototypeComponent");
    let second = container
        .component::<PrototypeComponent>()
        .expect("error creating PrototypeComponent");

    assert!(!InstancePtr::ptr_eq(&first, &second));
    assert!(InstancePtr::ptr_eq(&first.dependency, &second.dependency));
}
