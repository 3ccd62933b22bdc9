use keystone_di::class_registry::ClassDefinition;
use keystone_di::config::ContainerConfig;
use keystone_di::container::ContainerBuilder;
use keystone_di::instance::InstanceResolver;

//noinspection DuplicatedCode
fn main() {
    // logging can be enabled with RUST_LOG=debug
    ContainerConfig::default()
        .with_tracing_logger(true)
        .init_tracing_logger();

    let mut container = ContainerBuilder::new()
        .expect("error initializing ContainerBuilder")
        .with_definition(
            ClassDefinition::builder("chicken")
                .dependency("egg")
                .build(|_| Ok(())),
        )
        .expect("error registering chicken")
        .with_definition(
            ClassDefinition::builder("egg")
                .dependency("chicken")
                .build(|_| Ok(())),
        )
        .expect("error registering egg")
        .with_definition(
            ClassDefinition::builder("nest")
                .dependency("branch")
                .build(|_| Ok(())),
        )
        .expect("error registering nest")
        .build();

    // circular and missing dependencies are detected before anything gets constructed
    for id in ["chicken", "nest", "unknown"] {
        match container.get(id) {
            Ok(_) => println!("Resolved '{id}'"),
            Err(error) => println!("{error}"),
        }
    }
}
