use graft::{MapperBuilder, MemberList, TypeSpace};
use pretty_assertions::assert_eq;
use tests::{bindings, init_logging, plan};

#[test]
fn simple_renames_invert() {
    init_logging();
    let mut space = TypeSpace::new();
    let int = space.value("i32");
    let order = space.class("Order");
    space.add_field(order, "Total", int);
    let dto = space.class("OrderDto");
    space.add_field(dto, "GrandTotal", int);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_member("GrandTotal", |m| m.map_from("Total"))
        .unwrap()
        .reverse_map()
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let forward = plan(&config, "Order", "OrderDto");
    let reverse = plan(&config, "OrderDto", "Order");
    assert_eq!(bindings(&config, forward), ["GrandTotal <- Total"]);
    assert_eq!(bindings(&config, reverse), ["Total <- GrandTotal"]);
    assert_eq!(forward.reverse, Some(reverse.id));
    assert_eq!(reverse.reverse, Some(forward.id));
    assert_eq!(reverse.member_list, MemberList::None);
}

#[test]
fn flattened_paths_reverse_into_path_mappings() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let customer = space.class("Customer");
    space.add_field(customer, "Name", text);
    let order = space.class("Order");
    space.add_field(order, "Customer", customer);
    let dto = space.class("OrderDto");
    space.add_field(dto, "CustomerName", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .reverse_map()
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let space = config.space();
    let reverse = plan(&config, "OrderDto", "Order");
    assert!(bindings(&config, reverse).is_empty());
    assert_eq!(reverse.path_mappings.len(), 1);
    let unflattened = &reverse.path_mappings[0];
    assert_eq!(unflattened.destination.describe(space), "Customer.Name");
    assert_eq!(
        unflattened.binding.path().unwrap().describe(space),
        "CustomerName"
    );
}

#[test]
fn method_paths_stay_forward_only() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let customer = space.class("Customer");
    space.add_field(customer, "Name", text);
    let order = space.class("Order");
    space.add_method(order, "GetCustomer", customer);
    let dto = space.class("OrderDto");
    space.add_field(dto, "CustomerName", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .reverse_map()
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let forward = plan(&config, "Order", "OrderDto");
    assert_eq!(bindings(&config, forward), ["CustomerName <- GetCustomer.Name"]);

    // A method cannot be written back through, so no path mapping derives.
    let reverse = plan(&config, "OrderDto", "Order");
    assert!(reverse.path_mappings.is_empty());
    assert!(bindings(&config, reverse).is_empty());
}

#[test]
fn identity_bindings_reverse_into_member_splices() {
    init_logging();
    let mut space = TypeSpace::new();
    let int = space.value("i32");
    let order = space.class("Order");
    space.add_field(order, "Total", int);
    let details = space.class("DetailsDto");
    space.add_field(details, "Total", int);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Details", details);

    let mut builder = MapperBuilder::new(space);
    let mut profile = builder.profile("orders");
    profile
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_member("Details", |m| m.map_from_identity())
        .unwrap()
        .reverse_map()
        .unwrap();
    profile.create_map("Order", "DetailsDto").unwrap();
    profile.create_map("DetailsDto", "Order").unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let forward = plan(&config, "Order", "OrderDto");
    assert_eq!(bindings(&config, forward), ["Details <- (self)"]);

    // Un-flattening: the reverse splices the DetailsDto -> Order plan in
    // under the Details prefix.
    let reverse = plan(&config, "OrderDto", "Order");
    assert_eq!(bindings(&config, reverse), ["Total <- Details.Total"]);
    assert!(reverse.member_mappings[0].inherited);
}

#[test]
fn forward_ignores_become_reverse_do_not_validate() {
    init_logging();
    let mut space = TypeSpace::new();
    let int = space.value("i32");
    let order = space.class("Order");
    space.add_field(order, "Total", int);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Total", int);
    space.add_field(dto, "Internal", int);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_member("Internal", |m| m.ignore())
        .unwrap()
        .reverse_map()
        .unwrap()
        .member_list(MemberList::Source);
    let config = builder.seal().unwrap();

    // Internal is never consumed by the reverse map; the derived
    // do-not-validate marker is what keeps the source-scope check green.
    config.assert_configuration_is_valid().unwrap();

    let reverse = plan(&config, "OrderDto", "Order");
    assert_eq!(reverse.member_list, MemberList::Source);
    assert_eq!(reverse.ignored_source_members.len(), 1);
}

#[test]
fn reverse_shape_validation_can_be_re_enabled() {
    fn build(check_destination: bool) -> graft::MapperConfig {
        let mut space = TypeSpace::new();
        let int = space.value("i32");
        let text = space.value("String");
        let order = space.class("Order");
        space.add_field(order, "Total", int);
        space.add_field(order, "Note", text);
        let dto = space.class("OrderDto");
        space.add_field(dto, "Total", int);

        let mut builder = MapperBuilder::new(space);
        let mut profile = builder.profile("orders");
        let reverse = profile
            .create_map("Order", "OrderDto")
            .unwrap()
            .reverse_map()
            .unwrap();
        if check_destination {
            reverse.member_list(MemberList::Destination);
        }
        builder.seal().unwrap()
    }

    init_logging();
    build(false).assert_configuration_is_valid().unwrap();

    let err = build(true).assert_configuration_is_valid().unwrap_err();
    assert!(err.is_configuration_shape());
    assert_eq!(err.unmapped_members(), ["Note"]);
}

#[test]
fn a_reverse_mapping_cannot_be_reversed_again() {
    init_logging();
    let mut space = TypeSpace::new();
    let int = space.value("i32");
    let order = space.class("Order");
    space.add_field(order, "Total", int);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Total", int);

    let mut builder = MapperBuilder::new(space);
    let err = builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .reverse_map()
        .unwrap()
        .reverse_map()
        .unwrap_err();
    assert!(err.is_invalid_configuration());
    assert_eq!(
        err.to_string(),
        "invalid mapping configuration: a reverse mapping cannot itself be reversed"
    );
}
