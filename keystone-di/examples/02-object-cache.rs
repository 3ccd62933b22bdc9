use keystone_di::cache::CachedObject;
use keystone_di::container::ContainerBuilder;
use keystone_di::instance::{InstancePtr, InstanceResolver, TypedInstanceResolver};
use keystone_di::Component;
use std::sync::atomic::{AtomicUsize, Ordering};

static REQUESTS: AtomicUsize = AtomicUsize::new(0);

#[derive(Component)]
#[component(name = "greeter")]
struct Greeter {
    // plain values stored in the object cache can be injected by name
    #[component(name = "greeting")]
    greeting: InstancePtr<String>,
}

//noinspection DuplicatedCode
fn main() {
    let mut container = ContainerBuilder::new()
        .expect("error initializing ContainerBuilder")
        .with_object("greeting", CachedObject::value("Hello world!".to_string()))
        .build();

    // providers are invoked on every request
    container.set(
        "request_id",
        CachedObject::provider(|| REQUESTS.fetch_add(1, Ordering::SeqCst)),
    );

    let greeter = container
        .component::<Greeter>()
        .expect("error creating Greeter");

    // prints "Hello world!"
    println!("{}", greeter.greeting);

    for _ in 0..2 {
        let id = container
            .get_typed::<usize>("request_id")
            .expect("error getting request id");
        println!("Request id: {id}");
    }

    // objects set directly take precedence over registered classes
    container.set(
        "greeter",
        CachedObject::instance(InstancePtr::new(Greeter {
            greeting: InstancePtr::new("Overridden!".to_string()),
        })),
    );

    let greeter = container
        .component::<Greeter>()
        .expect("error getting Greeter");

    // prints "Overridden!"
    println!("{}", greeter.greeting);
}
