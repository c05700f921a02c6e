use graft::{MapperBuilder, NamingConvention, TypeSpace};
use pretty_assertions::assert_eq;
use tests::{bindings, init_logging, plan};

#[test]
fn snake_case_sources_match_pascal_destinations() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let address = space.class("address_info");
    space.add_field(address, "city", text);
    let customer = space.class("customer");
    space.add_field(customer, "moje_ime", text);
    space.add_field(customer, "address", address);
    let dto = space.class("CustomerDto");
    space.add_field(dto, "MojeIme", text);
    space.add_field(dto, "AddressCity", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("legacy")
        .source_member_naming(NamingConvention::snake_case())
        .create_map("customer", "CustomerDto")
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "customer", "CustomerDto");
    assert_eq!(
        bindings(&config, map),
        ["MojeIme <- moje_ime", "AddressCity <- address.city"]
    );
}

#[test]
fn pascal_sources_match_snake_destinations() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let customer = space.class("Customer");
    space.add_field(customer, "MojeIme", text);
    let row = space.class("customer_row");
    space.add_field(row, "moje_ime", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("export")
        .destination_member_naming(NamingConvention::snake_case())
        .create_map("Customer", "customer_row")
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Customer", "customer_row");
    assert_eq!(bindings(&config, map), ["moje_ime <- MojeIme"]);
}

#[test]
fn name_replacements_bridge_legacy_spellings() {
    init_logging();
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let contact = space.class("Contact");
    space.add_field(contact, "Name", text);
    space.add_field(contact, "EMailAddress", text);
    let dto = space.class("ContactDto");
    space.add_field(dto, "Name", text);
    space.add_field(dto, "EmailAddress", text);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("contacts")
        .replace_member_name("Email", "EMail")
        .create_map("Contact", "ContactDto")
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Contact", "ContactDto");
    assert_eq!(
        bindings(&config, map),
        ["Name <- Name", "EmailAddress <- EMailAddress"]
    );
}

#[test]
fn recognized_postfixes_strip_in_both_directions() {
    init_logging();
    let mut space = TypeSpace::new();
    let int = space.value("i32");
    let report = space.class("Report");
    space.add_field(report, "AgeValue", int);
    space.add_field(report, "Total", int);
    let dto = space.class("ReportDto");
    space.add_field(dto, "Age", int);
    space.add_field(dto, "TotalValue", int);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("reports")
        .recognize_postfix("Value")
        .create_map("Report", "ReportDto")
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Report", "ReportDto");
    assert_eq!(
        bindings(&config, map),
        ["Age <- AgeValue", "TotalValue <- Total"]
    );
}

#[test]
fn custom_prefixes_extend_the_builtin_get() {
    init_logging();
    let mut space = TypeSpace::new();
    let int = space.value("i32");
    let source = space.class("Invoice");
    space.add_field(source, "MyAmount", int);
    space.add_method(source, "GetTotal", int);
    let dto = space.class("InvoiceDto");
    space.add_field(dto, "Amount", int);
    space.add_field(dto, "Total", int);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("billing")
        .recognize_prefix("My")
        .create_map("Invoice", "InvoiceDto")
        .unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();

    let map = plan(&config, "Invoice", "InvoiceDto");
    assert_eq!(
        bindings(&config, map),
        ["Amount <- MyAmount", "Total <- GetTotal"]
    );
}

#[test]
fn cleared_prefixes_stop_accessor_aliases() {
    init_logging();
    let mut space = TypeSpace::new();
    let int = space.value("i32");
    let report = space.class("Report");
    space.add_method(report, "GetTotal", int);
    let dto = space.class("ReportDto");
    space.add_field(dto, "Total", int);

    let mut builder = MapperBuilder::new(space);
    builder
        .profile("strict")
        .clear_prefixes()
        .create_map("Report", "ReportDto")
        .unwrap();
    let config = builder.seal().unwrap();

    let err = config.assert_configuration_is_valid().unwrap_err();
    assert!(err.is_configuration_shape());
    assert_eq!(err.unmapped_members(), ["Total"]);
}
