use graft::{MapperBuilder, TypeSpace};
use pretty_assertions::assert_eq;
use tests::{bindings, init_logging, plan};

#[test]
fn nested_chains_flatten_by_name() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let address = space.class("Address");
    space.add_field(address, "City", text);
    let department = space.class("Department");
    space.add_field(department, "Name", text);
    space.add_field(department, "Address", address);
    let employee = space.class("Employee");
    space.add_field(employee, "Name", text);
    space.add_field(employee, "Department", department);
    let dto = space.class("EmployeeDto");
    space.add_field(dto, "Name", text);
    space.add_field(dto, "DepartmentName", text);
    space.add_field(dto, "DepartmentAddressCity", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("org")
        .create_map("Employee", "EmployeeDto")
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Employee", "EmployeeDto");
    assert_eq!(
        bindings(&config, map),
        [
            "Name <- Name",
            "DepartmentName <- Department.Name",
            "DepartmentAddressCity <- Department.Address.City",
        ]
    );
}

#[test]
fn accessor_methods_flatten_like_fields() {
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
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(bindings(&config, map), ["CustomerName <- GetCustomer.Name"]);
}

#[test]
fn whole_names_never_split_into_word_parts() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let person = space.class("Person");
    space.add_field(person, "FirstName", text);
    space.add_field(person, "LastName", text);
    let dto = space.class("PersonDto");
    space.add_field(dto, "FullName", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("people")
        .create_map("Person", "PersonDto")
        .unwrap();
    let config = builder.seal().unwrap();

    let map = plan(&config, "Person", "PersonDto");
    assert!(bindings(&config, map).is_empty());

    let err = config.assert_configuration_is_valid().unwrap_err();
    assert!(err.is_configuration_shape());
    assert_eq!(err.unmapped_members(), ["FullName"]);
}

#[test]
fn explicit_dotted_path_overrides_matching() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let customer = space.class("Customer");
    space.add_field(customer, "Name", text);
    space.add_field(customer, "Nickname", text);
    let order = space.class("Order");
    space.add_field(order, "Customer", customer);
    let dto = space.class("OrderDto");
    space.add_field(dto, "CustomerName", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("orders")
        .create_map("Order", "OrderDto")
        .unwrap()
        .for_member("CustomerName", |m| m.map_from("Customer.Nickname"))
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Order", "OrderDto");
    assert_eq!(bindings(&config, map), ["CustomerName <- Customer.Nickname"]);
}
