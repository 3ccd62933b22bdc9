use keystone_di::container::ContainerBuilder;
use keystone_di::instance::{InstancePtr, TypedInstanceResolver};
use keystone_di::Component;

// this is a dependency which is also an injectable component
#[derive(Component)]
struct TestDependency;

impl TestDependency {
    fn foo(&self) {
        println!("Hello world!");
    }
}

// this is another component, but with a dependency
#[derive(Component)]
struct TestComponent {
    // the container will know how to inject TestDependency, when asked for TestComponent
    dependency: InstancePtr<TestDependency>,
}

impl TestComponent {
    fn call_foo(&self) {
        self.dependency.foo();
    }
}

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // objects are resolved by a Container
    // for convenience, ContainerBuilder can be used to create the container with a reasonable
    // default configuration
    let mut container = ContainerBuilder::new()
        .expect("error initializing ContainerBuilder")
        .build();

    let component = container
        .component::<TestComponent>()
        .expect("error creating TestComponent");

    // prints "Hello world!"
    component.call_foo();
}
