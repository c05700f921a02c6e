//! Configuration validation.
//!
//! Two passes over the sealed plans. The shape check confirms that every
//! member named by a plan's checked list is accounted for and that the
//! destination can be constructed. The dry run then follows every binding
//! to the pair it produces and confirms a plan or a strategy serves it,
//! recursing into nested plans. All findings are aggregated into a single
//! error.

use crate::mapper::MapperConfig;
use crate::plan::{MemberList, TypeMap, TypeMapId};
use crate::profile::ProfileId;
use crate::ty::{MemberKind, TypePair};
use crate::{Error, Result};

use log::{debug, trace};

use std::collections::HashSet;

pub(crate) fn run(config: &MapperConfig, scope: Option<ProfileId>) -> Result<()> {
    let mut validator = Validator {
        config,
        errors: vec![],
        visited: HashSet::new(),
    };

    let checked: Vec<TypeMapId> = config
        .configured_maps()
        .filter(|map| scope.map_or(true, |profile| map.profile == profile))
        .map(|map| map.id)
        .collect();

    for &id in &checked {
        let map = config.type_map(id);
        // Converters and redirected plans never run their member mappings,
        // so neither check applies to them.
        if map.converter.is_some() || map.destination_override.is_some() {
            continue;
        }
        let shape_ok =
            map.member_list == MemberList::None || validator.check_shape(map);
        if shape_ok {
            validator.dry_run_map(map);
        }
    }

    if !validator.errors.is_empty() {
        return Err(Error::validation_failed(validator.errors));
    }

    for &id in &checked {
        config.type_map(id).mark_valid();
    }
    debug!("validated {} plans", checked.len());
    Ok(())
}

struct Validator<'a> {
    config: &'a MapperConfig,
    errors: Vec<Error>,
    /// Pairs already walked by the dry run, plans and strategy-claimed
    /// pairs alike
    visited: HashSet<TypePair>,
}

impl Validator<'_> {
    /// Confirms the plan accounts for every member its checked list names
    /// and that the destination is constructible. Returns `false` after
    /// recording an error.
    fn check_shape(&mut self, map: &TypeMap) -> bool {
        let unmapped = match map.member_list {
            MemberList::Destination => self.unmapped_destination_members(map),
            MemberList::Source => self.unconsumed_source_members(map),
            MemberList::None => vec![],
        };
        let constructor_resolved = self.passes_constructor_check(map);
        if unmapped.is_empty() && constructor_resolved {
            return true;
        }

        let space = self.config.space();
        self.errors.push(Error::configuration_shape(
            space.name(map.pair.source),
            space.name(map.pair.destination),
            unmapped,
            constructor_resolved,
        ));
        false
    }

    fn unmapped_destination_members(&self, map: &TypeMap) -> Vec<String> {
        let space = self.config.space();
        let profile = self.config.profile(map.profile);
        let details = profile.details(space, map.pair.destination);

        let mut unmapped = vec![];
        for destination in details.writable_members() {
            let name = &space.member(destination).name;
            if profile.is_globally_ignored(name) {
                continue;
            }
            let accounted = map
                .member_mapping(destination)
                .is_some_and(|mapping| mapping.is_mapped())
                || map.has_path_mapping_root(destination);
            if !accounted {
                unmapped.push(name.clone());
            }
        }
        unmapped
    }

    /// A source member is consumed when any binding, path mapping, or
    /// constructor parameter reads through it. An ignored mapping that kept
    /// its matched path still consumes the member.
    fn unconsumed_source_members(&self, map: &TypeMap) -> Vec<String> {
        let space = self.config.space();
        let profile = self.config.profile(map.profile);
        let details = profile.details(space, map.pair.source);

        let mut consumed = HashSet::new();
        for mapping in &map.member_mappings {
            let root = mapping
                .binding
                .as_ref()
                .and_then(|binding| binding.path())
                .and_then(|path| path.root());
            if let Some(root) = root {
                consumed.insert(root);
            }
        }
        for path_mapping in &map.path_mappings {
            if let Some(root) = path_mapping.binding.path().and_then(|path| path.root()) {
                consumed.insert(root);
            }
        }
        if let Some(ctor_map) = &map.constructor_map {
            for param in &ctor_map.parameters {
                if let Some(root) = param.source_path.root() {
                    consumed.insert(root);
                }
                let root = param
                    .override_binding
                    .as_ref()
                    .and_then(|binding| binding.path())
                    .and_then(|path| path.root());
                if let Some(root) = root {
                    consumed.insert(root);
                }
            }
        }

        let mut unconsumed = vec![];
        for &source in details.members() {
            let member = space.member(source);
            if member.kind != MemberKind::Field {
                continue;
            }
            if profile.is_globally_ignored(&member.name) {
                continue;
            }
            if map.ignored_source_members.contains(&source) {
                continue;
            }
            if !consumed.contains(&source) {
                unconsumed.push(member.name.clone());
            }
        }
        unconsumed
    }

    fn passes_constructor_check(&self, map: &TypeMap) -> bool {
        if map.construct_expr.is_some() || map.auto_constructor_disabled {
            return true;
        }
        let space = self.config.space();
        if !space.ty(map.pair.destination).kind.is_constructible() {
            return true;
        }
        let profile = self.config.profile(map.profile);
        let details = profile.details(space, map.pair.destination);
        if details.constructors().is_empty() {
            return true;
        }
        let all_optional = details.constructors().iter().any(|&ctor| {
            space
                .constructor(ctor)
                .parameters
                .iter()
                .all(|parameter| parameter.optional)
        });
        if all_optional {
            return true;
        }
        map.constructor_map
            .as_ref()
            .is_some_and(|ctor_map| ctor_map.resolvable)
    }

    /// Follows every binding of the plan and checks the pair it produces.
    fn dry_run_map(&mut self, map: &TypeMap) {
        if !self.visited.insert(map.pair) {
            return;
        }
        let space = self.config.space();
        let source = map.pair.source;
        if space.ty(source).generic {
            return;
        }

        let param_names: Vec<&str> = map
            .constructor_map
            .as_ref()
            .map(|ctor_map| {
                ctor_map
                    .parameters
                    .iter()
                    .filter(|param| !param.use_default)
                    .filter_map(|param| param.name(space))
                    .collect()
            })
            .unwrap_or_default();

        for mapping in &map.member_mappings {
            if mapping.ignored {
                continue;
            }
            let Some(binding) = &mapping.binding else {
                continue;
            };
            if binding.is_opaque() {
                continue;
            }
            let member = space.member(mapping.destination);
            // A constructor parameter of the same name supplies the member
            if param_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&member.name))
            {
                continue;
            }
            if let Some(result) = binding.result_ty(space, source) {
                let pair = TypePair::new(result, member.ty);
                self.check_pair(pair, map, &member.name);
            }
        }

        for path_mapping in &map.path_mappings {
            if path_mapping.binding.is_opaque() {
                continue;
            }
            let Some(leaf) = path_mapping.destination.leaf() else {
                continue;
            };
            if let Some(result) = path_mapping.binding.result_ty(space, source) {
                let pair = TypePair::new(result, space.member(leaf).ty);
                let name = path_mapping.destination.describe(space);
                self.check_pair(pair, map, &name);
            }
        }

        if let Some(ctor_map) = &map.constructor_map {
            for param in &ctor_map.parameters {
                if param.use_default {
                    continue;
                }
                if param
                    .override_binding
                    .as_ref()
                    .is_some_and(|binding| binding.is_opaque())
                {
                    continue;
                }
                let Some(result) = param.result_ty(space, source) else {
                    continue;
                };
                let name = param.name(space).unwrap_or("").to_string();
                let pair = TypePair::new(result, param.ty(space));
                self.check_pair(pair, map, &name);
            }
        }
    }

    /// The pair must be served by a plan or claimed by a strategy.
    fn check_pair(&mut self, pair: TypePair, owner: &TypeMap, member: &str) {
        let space = self.config.space();
        trace!(
            "dry run `{}` for `{}`",
            pair.describe(space),
            owner.pair.describe(space)
        );
        if space.ty(pair.source).generic || space.ty(pair.destination).generic {
            return;
        }
        if let Some(id) = self.config.resolve_type_map(pair) {
            let nested = self.config.type_map(id);
            self.dry_run_map(nested);
            return;
        }
        match self.config.find_strategy(pair) {
            Some(strategy) => {
                if let Some(element) = strategy.associated_types(space, pair) {
                    // Guards cycles through self-referential element pairs
                    if self.visited.insert(pair) {
                        self.check_pair(element, owner, member);
                    }
                }
            }
            None => {
                self.errors.push(Error::dry_run_resolution(
                    space.name(pair.source),
                    space.name(pair.destination),
                    space.name(owner.pair.source),
                    space.name(owner.pair.destination),
                    member,
                ));
            }
        }
    }
}
