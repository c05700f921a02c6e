use graft::{MapperBuilder, MapperConfig, TypeSpace};
use pretty_assertions::assert_eq;
use tests::{bindings, init_logging, plan};

fn build() -> MapperConfig {
    let mut space = TypeSpace::new();
    let text = space.value("String");
    let department = space.class("Department");
    space.add_field(department, "Name", text);
    let employee = space.class("Employee");
    space.add_field(employee, "Name", text);
    space.add_field(employee, "Department", department);
    let employee_dto = space.class("EmployeeDto");
    space.add_field(employee_dto, "Name", text);
    space.add_field(employee_dto, "DepartmentName", text);
    let department_dto = space.class("DepartmentDto");
    space.add_field(department_dto, "Name", text);

    let mut builder = MapperBuilder::new(space);
    let mut profile = builder.profile("hr");
    profile
        .create_map("Employee", "EmployeeDto")
        .unwrap()
        .reverse_map()
        .unwrap();
    profile.create_map("Department", "DepartmentDto").unwrap();
    let config = builder.seal().unwrap();
    config.assert_configuration_is_valid().unwrap();
    config
}

fn render(config: &MapperConfig) -> Vec<String> {
    config
        .configured_maps()
        .map(|map| {
            let mut lines = vec![format!("{}:", map.pair.describe(config.space()))];
            lines.extend(bindings(config, map));
            lines.join("\n")
        })
        .collect()
}

#[test]
fn identical_builders_produce_identical_plans() {
    init_logging();
    let a = build();
    let b = build();
    assert_eq!(render(&a), render(&b));

    let reverse_a = plan(&a, "EmployeeDto", "Employee");
    let reverse_b = plan(&b, "EmployeeDto", "Employee");
    assert_eq!(reverse_a.path_mappings.len(), 1);
    assert_eq!(
        reverse_a.path_mappings[0].destination.describe(a.space()),
        reverse_b.path_mappings[0].destination.describe(b.space()),
    );
}

#[test]
fn configured_maps_iterate_in_registration_order() {
    init_logging();
    let config = build();
    let pairs: Vec<String> = config
        .configured_maps()
        .map(|map| map.pair.describe(config.space()))
        .collect();
    assert_eq!(
        pairs,
        [
            "Employee -> EmployeeDto",
            "EmployeeDto -> Employee",
            "Department -> DepartmentDto",
        ]
    );
}
