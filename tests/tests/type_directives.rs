use graft::{MapperBuilder, TypeSpace};
use pretty_assertions::assert_eq;
use tests::{bindings, init_logging, pair_of, plan};

#[test]
fn max_depth_implies_identity_preservation() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let node = space.class("Node");
    space.add_field(node, "Name", text);
    let node_dto = space.class("NodeDto");
    space.add_field(node_dto, "Name", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("trees")
        .create_map("Node", "NodeDto")
        .unwrap()
        .max_depth(2);
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Node", "NodeDto");
    assert_eq!(map.max_depth, Some(2));
    assert!(map.preserve_identity);
}

#[test]
fn lifecycle_hooks_record_in_call_order() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .before_map("load_audit_scope")
        .before_map("start_span")
        .after_map("close_span");
    let config = builder.seal().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    let before: Vec<&str> = map.before_hooks.iter().map(|h| h.label.as_str()).collect();
    let after: Vec<&str> = map.after_hooks.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(before, ["load_audit_scope", "start_span"]);
    assert_eq!(after, ["close_span"]);
}

#[test]
fn converters_suppress_member_validation() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    space.class("RawRecord");
    let parsed = space.class("ParsedRecord");
    space.add_field(parsed, "Header", text);
    space.add_field(parsed, "Body", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("ingest")
        .create_map("RawRecord", "ParsedRecord")
        .unwrap()
        .convert_using("RecordParser");
    let config = builder.seal().unwrap();

    // Neither Header nor Body has a source, but the converter owns the
    // whole object.
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "RawRecord", "ParsedRecord");
    assert_eq!(map.converter.as_ref().unwrap().label, "RecordParser");
}

#[test]
fn as_type_redirects_resolution_to_the_derived_plan() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);
    let detailed = space.class("DetailedDto");
    space.set_base(detailed, dto);

    let mut builder = MapperBuilder::new(space);
    let mut profile = builder.profile("orders");
    profile
        .create_map("Order", "OrderDto")
        .unwrap()
        .as_type("DetailedDto")
        .unwrap();
    profile.create_map("Order", "DetailedDto").unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    // The redirected plan stays in the configured list, but both lookup
    // paths land on the derived plan.
    let pair = pair_of(&config, "Order", "OrderDto");
    let redirected = config
        .configured_maps()
        .find(|map| map.pair == pair)
        .unwrap();
    let target = plan(&config, "Order", "DetailedDto");
    assert_eq!(redirected.destination_override, Some(detailed));
    assert_eq!(config.resolve_type_map(pair), Some(target.id));
    assert_eq!(config.find_type_map(pair).unwrap().id, target.id);
}

#[test]
fn as_type_requires_a_derived_destination() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);
    let other = space.class("ReceiptDto");
    space.add_field(other, "Name", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .as_type("ReceiptDto")
        .unwrap();

    let err = builder.seal().unwrap_err();
    assert!(err.is_invalid_configuration());
    assert_eq!(
        err.to_string(),
        "invalid mapping configuration: `ReceiptDto` is not derived from `OrderDto`"
    );
}

#[test]
fn as_type_requires_a_configured_target() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);
    let detailed = space.class("DetailedDto");
    space.set_base(detailed, dto);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .as_type("DetailedDto")
        .unwrap();

    let err = builder.seal().unwrap_err();
    assert!(err.is_invalid_configuration());
    assert_eq!(
        err.to_string(),
        "invalid mapping configuration: `Order -> OrderDto` redirects to `Order -> DetailedDto`, which is not configured"
    );
}

#[test]
fn the_last_path_mapping_for_a_destination_wins() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let customer = space.class("Customer");
    space.add_field(customer, "Name", text);
    let order = space.class("Order");
    space.add_field(order, "Contact", text);
    space.add_field(order, "Fallback", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Customer", customer);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_path("Customer.Name", |p| p.map_from("Fallback"))
        .unwrap()
        .for_path("Customer.Name", |p| p.map_from("Contact"))
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(map.path_mappings.len(), 1);
    assert_eq!(
        map.path_mappings[0]
            .binding
            .path()
            .unwrap()
            .describe(config.space()),
        "Contact"
    );
}

#[test]
fn path_mappings_carry_conditions() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let customer = space.class("Customer");
    space.add_field(customer, "Name", text);
    let order = space.class("Order");
    space.add_field(order, "Contact", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Customer", customer);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_path("Customer.Name", |p| {
            p.map_from("Contact")?.condition("contact_known")
        })
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(
        map.path_mappings[0].condition.as_ref().unwrap().label,
        "contact_known"
    );
}

#[test]
fn transformers_record_map_level_before_profile_level() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .add_transformer("String", "uppercase")
        .unwrap()
        .create_map("Order", "OrderDto")
        .unwrap()
        .add_transformer("String", "trim")
        .unwrap();
    let config = builder.seal().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    let labels: Vec<&str> = map.transformers.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["trim", "uppercase"]);
}

#[test]
fn all_member_blocks_cover_every_mapping() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    space.add_field(order, "Note", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);
    space.add_field(dto, "Note", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_all_members(|m| m.condition("source_has_value"))
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(map.member_mappings.len(), 2);
    for mapping in &map.member_mappings {
        assert_eq!(
            mapping.condition.as_ref().unwrap().label,
            "source_has_value"
        );
    }
}

#[test]
fn all_other_member_blocks_skip_configured_members() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    space.add_field(order, "Note", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);
    space.add_field(dto, "Note", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_member("Name", |m| m.condition("name_present"))
        .unwrap()
        .for_all_other_members(|m| m.condition("always"))
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let space = config.space();
    let map = plan(&config, "Order", "OrderDto");
    for mapping in &map.member_mappings {
        let name = &space.member(mapping.destination).name;
        let expected = if name == "Name" { "name_present" } else { "always" };
        assert_eq!(mapping.condition.as_ref().unwrap().label, expected);
    }
}

#[test]
fn mapping_order_overrides_run_after_unordered_members() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "First", text);
    space.add_field(order, "Second", text);
    space.add_field(order, "Third", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "First", text);
    space.add_field(dto, "Second", text);
    space.add_field(dto, "Third", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_member("First", |m| m.mapping_order(5))
        .unwrap()
        .for_member("Third", |m| m.mapping_order(1))
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(
        bindings(&config, map),
        [
            "Second <- Second",
            "Third <- Third",
            "First <- First",
        ]
    );
}
