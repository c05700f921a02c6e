use graft::{MapperBuilder, TypeSpace};
use pretty_assertions::assert_eq;
use tests::init_logging;

fn order_space() -> TypeSpace {
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let order = space.class("Order");
    space.add_field(order, "Name", text);
    let dto = space.class("OrderDto");
    space.add_field(dto, "Name", text);
    space
}

#[test]
fn re_registering_a_pair_in_one_profile_errors_immediately() {
    init_logging();
    let mut builder = MapperBuilder::new(order_space());
    let mut profile = builder.profile("orders");
    profile.create_map("Order", "OrderDto").unwrap();

    let err = profile.create_map("Order", "OrderDto").unwrap_err();
    assert!(err.is_duplicate_registration());
    assert_eq!(
        err.to_string(),
        "duplicate mapping registration for `Order` -> `OrderDto`: \
         declared in profile `orders` and in profile `orders`"
    );
}

#[test]
fn the_same_pair_in_two_profiles_fails_at_seal() {
    init_logging();
    let mut builder = MapperBuilder::new(order_space());
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap();
    builder
        .profile("legacy")
        .create_map("Order", "OrderDto")
        .unwrap();

    let err = builder.seal().unwrap_err();
    assert!(err.is_duplicate_registration());
    assert_eq!(
        err.to_string(),
        "duplicate mapping registration for `Order` -> `OrderDto`: \
         declared in profile `orders` and in profile `legacy`"
    );
}

#[test]
fn a_derived_reverse_collides_with_an_explicit_pair() {
    init_logging();
    let mut builder = MapperBuilder::new(order_space());
    let mut profile = builder.profile("orders");
    profile
        .create_map("Order", "OrderDto")
        .unwrap()
        .reverse_map()
        .unwrap();
    profile.create_map("OrderDto", "Order").unwrap();

    let err = builder.seal().unwrap_err();
    assert!(err.is_duplicate_registration());
    assert_eq!(
        err.to_string(),
        "duplicate mapping registration for `OrderDto` -> `Order`: \
         declared in profile `orders` and in profile `orders`"
    );
}
