//! Shared helpers for the integration suite.

use graft::{MapperConfig, TypeId, TypePair, TypeSpace};
use graft_core::plan::{MemberMapping, SourceBinding, TypeMap};

/// Initializes logging for a test binary; respects `RUST_LOG`. Safe to
/// call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn lookup(config: &MapperConfig, name: &str) -> TypeId {
    config
        .space()
        .lookup(name)
        .unwrap_or_else(|| panic!("no type named `{name}`"))
}

/// Looks the pair up by type names in the sealed space.
pub fn pair_of(config: &MapperConfig, source: &str, destination: &str) -> TypePair {
    TypePair::new(lookup(config, source), lookup(config, destination))
}

/// The plan registered for the named pair.
pub fn plan<'a>(config: &'a MapperConfig, source: &str, destination: &str) -> &'a TypeMap {
    config
        .find_type_map(pair_of(config, source, destination))
        .unwrap_or_else(|| panic!("no plan for `{source}` -> `{destination}`"))
}

/// Renders a plan's member mappings as `destination <- source` lines, in
/// execution order, so tests can diff the whole shape at once.
pub fn bindings(config: &MapperConfig, map: &TypeMap) -> Vec<String> {
    let space = config.space();
    map.member_mappings
        .iter()
        .map(|mapping| {
            format!(
                "{} <- {}",
                space.member(mapping.destination).name,
                describe_mapping(space, mapping)
            )
        })
        .collect()
}

fn describe_mapping(space: &TypeSpace, mapping: &MemberMapping) -> String {
    if mapping.ignored {
        return "(ignored)".to_string();
    }
    match &mapping.binding {
        None => "(unmapped)".to_string(),
        Some(SourceBinding::Auto(path)) | Some(SourceBinding::Path(path)) => path.describe(space),
        Some(SourceBinding::Expr(expr)) => format!("expr {}", expr.label),
        Some(SourceBinding::Identity) => "(self)".to_string(),
        Some(SourceBinding::Resolver(resolver)) => format!("resolver {}", resolver.label),
        Some(SourceBinding::Converter(converter)) => format!("converter {}", converter.label),
    }
}
