use graft::{MapperBuilder, TypeSpace};
use pretty_assertions::assert_eq;
use tests::{bindings, init_logging, plan};

#[test]
fn ignored_prefix_members_skip_matching_and_validation() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    space.add_field(order, "AuditNote", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);
    space.add_field(dto, "AuditStamp", text);
    space.add_field(dto, "AuditNote", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .add_global_ignore("Audit")
        .create_map("Order", "OrderDto")
        .unwrap();
    let config = builder.seal().unwrap();

    // AuditStamp has no source counterpart; the ignore is what keeps the
    // configuration valid.
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(
        bindings(&config, map),
        [
            "Name <- Name",
            "AuditNote <- (ignored)",
            "AuditStamp <- (ignored)",
        ]
    );
}

#[test]
fn explicit_configuration_overrides_a_global_ignore() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Stamp", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "AuditStamp", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .add_global_ignore("Audit")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_member("AuditStamp", |m| m.map_from("Stamp"))
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(bindings(&config, map), ["AuditStamp <- Stamp"]);
}
