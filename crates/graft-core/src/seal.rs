//! The one-shot transition from recorded configuration to resolved plans.
//!
//! Sealing flattens every profile's configurations, creates a plan per
//! pair, replays directives in precedence order, applies inheritance, and
//! builds the pair registry the runtime resolves against.

use crate::config::{
    CtorParamDirective, MemberDirective, SourceMemberDirective, TypeDirective, TypeMapConfig,
};
use crate::mapper::MapperConfig;
use crate::plan::{
    ConstructorMap, CtorParamMap, MemberMapping, PathMapping, SourceBinding, TypeMap, TypeMapId,
};
use crate::profile::{Profile, ProfileId};
use crate::strategy::{AssignableMapper, ObjectMapper};
use crate::ty::{MemberPath, TypePair, TypeSpace};
use crate::{Error, Result};

use indexmap::IndexMap;
use log::debug;
use std::mem;

struct Entry {
    profile: ProfileId,
    config: TypeMapConfig,
    map: TypeMapId,
    /// Entry index of the reverse config derived from this one
    reverse_entry: Option<usize>,
}

pub(crate) fn seal(
    space: TypeSpace,
    mut profiles: Vec<Profile>,
    mut strategies: Vec<Box<dyn ObjectMapper>>,
) -> Result<MapperConfig> {
    let mut entries = vec![];
    for (index, profile) in profiles.iter_mut().enumerate() {
        let id = ProfileId(index);
        for mut config in mem::take(&mut profile.configs) {
            let reverse = config.reverse.take();
            let forward = entries.len();
            entries.push(Entry {
                profile: id,
                config,
                map: TypeMapId(forward),
                reverse_entry: None,
            });
            if let Some(reverse) = reverse {
                let index = entries.len();
                entries.push(Entry {
                    profile: id,
                    config: *reverse,
                    map: TypeMapId(index),
                    reverse_entry: None,
                });
                entries[forward].reverse_entry = Some(index);
            }
        }
    }

    let mut sealer = Sealer {
        space: &space,
        profiles: &profiles,
        entries,
        by_pair: IndexMap::new(),
        maps: vec![],
    };

    sealer.check_duplicates()?;
    sealer.register();
    sealer.configure()?;
    sealer.apply_inheritance()?;
    let resolved = sealer.build_registry()?;
    sealer.freeze(&resolved)?;

    debug!(
        "sealed {} plans across {} profiles; {} resolved pairs",
        sealer.maps.len(),
        profiles.len(),
        resolved.len()
    );

    let Sealer { maps, .. } = sealer;
    strategies.push(Box::new(AssignableMapper));
    Ok(MapperConfig::from_parts(
        space, profiles, maps, resolved, strategies,
    ))
}

struct Sealer<'a> {
    space: &'a TypeSpace,
    profiles: &'a [Profile],
    entries: Vec<Entry>,
    by_pair: IndexMap<TypePair, usize>,
    maps: Vec<TypeMap>,
}

impl Sealer<'_> {
    /// Within one profile `create_map` already errors; this catches the same
    /// pair declared across profiles, or colliding with a derived reverse
    fn check_duplicates(&mut self) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(prev) = self.by_pair.insert(entry.config.pair, index) {
                let pair = entry.config.pair;
                return Err(Error::duplicate_registration(
                    self.space.name(pair.source),
                    self.space.name(pair.destination),
                    &self.profiles[self.entries[prev].profile.0].name,
                    &self.profiles[entry.profile.0].name,
                ));
            }
        }
        Ok(())
    }

    /// Creates one plan per entry and runs the convention auto-match pass
    /// over every writable destination member without an explicit source
    fn register(&mut self) {
        for index in 0..self.entries.len() {
            let entry = &self.entries[index];
            let profile = &self.profiles[entry.profile.0];
            let config = &entry.config;
            let mut map = TypeMap::new(entry.map, config.pair, entry.profile, config.member_list);

            let details = profile.details(self.space, config.pair.destination);
            for destination in details.writable_members() {
                if config.controls_source_for(destination) {
                    continue;
                }
                let name = &self.space.member(destination).name;
                let found =
                    profile.find_source_path(self.space, config.pair.source, name, config.is_reverse);
                if let Some(path) = found {
                    map.member_mapping_mut(destination).binding = Some(SourceBinding::Auto(path));
                }
            }
            self.maps.push(map);
        }
    }

    fn configure(&mut self) -> Result<()> {
        for index in 0..self.entries.len() {
            let config = mem::take(&mut self.entries[index].config);
            let result = self.configure_entry(index, &config);
            self.entries[index].config = config;
            result?;
        }
        Ok(())
    }

    /// Fixed precedence: global ignores, type directives, constructor
    /// resolution, member configs, source-member configs, ctor-param
    /// configs, transformers, reverse derivation
    fn configure_entry(&mut self, index: usize, config: &TypeMapConfig) -> Result<()> {
        let map_id = self.entries[index].map;
        let profile = &self.profiles[self.entries[index].profile.0];

        self.apply_global_ignores(map_id, profile, config);
        self.apply_type_directives(map_id, config)?;
        self.resolve_constructor(map_id, profile, config);
        self.apply_member_configs(map_id, config);
        self.apply_all_member_options(map_id, config);
        self.apply_source_member_configs(map_id, config);
        self.apply_ctor_param_configs(map_id, config)?;
        self.apply_transformers(map_id, config);

        if let Some(reverse_entry) = self.entries[index].reverse_entry {
            self.derive_reverse(map_id, reverse_entry);
        }
        Ok(())
    }

    fn apply_global_ignores(&mut self, map_id: TypeMapId, profile: &Profile, config: &TypeMapConfig) {
        if profile.global_ignores.is_empty() {
            return;
        }
        let space = self.space;
        let details = profile.details(space, config.pair.destination);
        let map = &mut self.maps[map_id.0];
        for destination in details.writable_members() {
            if config.is_member_configured(destination) {
                continue;
            }
            if profile.is_globally_ignored(&space.member(destination).name) {
                map.member_mapping_mut(destination).ignored = true;
            }
        }
    }

    fn apply_type_directives(&mut self, map_id: TypeMapId, config: &TypeMapConfig) -> Result<()> {
        let space = self.space;
        let map = &mut self.maps[map_id.0];
        for directive in &config.directives {
            match directive {
                TypeDirective::MaxDepth(depth) => {
                    map.max_depth = Some(*depth);
                    // depth limiting requires tracking object identity
                    map.preserve_identity = true;
                }
                TypeDirective::PreserveIdentity => map.preserve_identity = true,
                TypeDirective::BeforeMap(hook) => map.before_hooks.push(hook.clone()),
                TypeDirective::AfterMap(hook) => map.after_hooks.push(hook.clone()),
                TypeDirective::ConvertUsing(converter) => map.converter = Some(converter.clone()),
                TypeDirective::ConstructUsing(expr) => map.construct_expr = Some(expr.clone()),
                TypeDirective::DisableAutoConstructor => map.auto_constructor_disabled = true,
                TypeDirective::IncludeDerived(pair) => {
                    check_included(space, map.pair, *pair, Relation::Derived)?;
                    map.included_derived.push(*pair);
                }
                TypeDirective::IncludeBase(pair) => {
                    check_included(space, map.pair, *pair, Relation::Base)?;
                    map.included_base.push(*pair);
                }
                TypeDirective::IncludeMembers(paths) => {
                    map.included_member_paths.extend(paths.iter().cloned());
                }
                TypeDirective::PathMap {
                    destination,
                    binding,
                    condition,
                } => {
                    let existing = map
                        .path_mappings
                        .iter_mut()
                        .find(|mapping| mapping.destination == *destination);
                    match existing {
                        // last path map for a destination wins
                        Some(mapping) => {
                            mapping.binding = binding.clone();
                            mapping.condition = condition.clone();
                        }
                        None => {
                            let mut mapping =
                                PathMapping::new(destination.clone(), binding.clone());
                            mapping.condition = condition.clone();
                            map.path_mappings.push(mapping);
                        }
                    }
                }
                TypeDirective::AsType(ty) => {
                    if !space.is_derived_from(*ty, map.pair.destination) {
                        return Err(Error::invalid_configuration(format!(
                            "`{}` is not derived from `{}`",
                            space.name(*ty),
                            space.name(map.pair.destination),
                        )));
                    }
                    map.destination_override = Some(*ty);
                }
            }
        }
        Ok(())
    }

    /// Ranks candidate constructors by descending parameter count, ties in
    /// declaration order, and selects the first fully satisfiable one. An
    /// unnamed parameter abandons resolution for the type. When nothing
    /// resolves, the first candidate's partial map is kept for diagnostics.
    fn resolve_constructor(&mut self, map_id: TypeMapId, profile: &Profile, config: &TypeMapConfig) {
        let space = self.space;
        {
            let map = &self.maps[map_id.0];
            if map.construct_expr.is_some()
                || map.auto_constructor_disabled
                || map.constructor_map.is_some()
                || !space.ty(map.pair.destination).kind.is_constructible()
            {
                return;
            }
        }

        let pair = config.pair;
        let details = profile.details(space, pair.destination);
        let mut candidates = details.constructors().to_vec();
        candidates.sort_by_key(|&ctor| std::cmp::Reverse(space.constructor(ctor).parameters.len()));

        let mut first_partial = None;
        for &ctor in &candidates {
            let parameters = &space.constructor(ctor).parameters;
            let mut params = vec![];
            let mut resolvable = true;
            let mut abandon = false;

            for (index, parameter) in parameters.iter().enumerate() {
                let Some(name) = parameter.name.as_deref() else {
                    params.push(CtorParamMap {
                        constructor: ctor,
                        index,
                        source_path: MemberPath::new(),
                        override_binding: None,
                        use_default: false,
                        resolvable: false,
                    });
                    resolvable = false;
                    abandon = true;
                    break;
                };

                let path =
                    profile.find_source_path(space, pair.source, name, config.is_reverse);
                let overridden = config
                    .ctor_param_configs
                    .iter()
                    .any(|param| param.parameter == name);
                let use_default = path.is_none() && parameter.optional;
                let satisfied = path.is_some() || parameter.optional || overridden;
                if !satisfied {
                    resolvable = false;
                }
                params.push(CtorParamMap {
                    constructor: ctor,
                    index,
                    source_path: path.unwrap_or_default(),
                    override_binding: None,
                    use_default,
                    resolvable: satisfied,
                });
            }

            let ctor_map = ConstructorMap {
                constructor: ctor,
                parameters: params,
                resolvable,
            };
            if abandon || resolvable {
                self.maps[map_id.0].constructor_map = Some(ctor_map);
                return;
            }
            if first_partial.is_none() {
                first_partial = Some(ctor_map);
            }
        }
        self.maps[map_id.0].constructor_map = first_partial;
    }

    fn apply_member_configs(&mut self, map_id: TypeMapId, config: &TypeMapConfig) {
        let map = &mut self.maps[map_id.0];
        for member_config in &config.member_configs {
            let mapping = map.member_mapping_mut(member_config.destination);
            for directive in &member_config.directives {
                apply_member_directive(mapping, directive);
            }
        }
    }

    fn apply_all_member_options(&mut self, map_id: TypeMapId, config: &TypeMapConfig) {
        let map = &mut self.maps[map_id.0];
        for options in &config.all_member_options {
            for index in 0..map.member_mappings.len() {
                let destination = map.member_mappings[index].destination;
                if options.only_unconfigured && config.is_member_configured(destination) {
                    continue;
                }
                for directive in &options.directives {
                    apply_member_directive(&mut map.member_mappings[index], directive);
                }
            }
        }
    }

    fn apply_source_member_configs(&mut self, map_id: TypeMapId, config: &TypeMapConfig) {
        let map = &mut self.maps[map_id.0];
        for source_config in &config.source_member_configs {
            for directive in &source_config.directives {
                match directive {
                    SourceMemberDirective::DoNotValidate => {
                        if !map.ignored_source_members.contains(&source_config.source) {
                            map.ignored_source_members.push(source_config.source);
                        }
                    }
                }
            }
        }
    }

    /// Overrides must name a parameter of the constructor that actually
    /// resolved
    fn apply_ctor_param_configs(&mut self, map_id: TypeMapId, config: &TypeMapConfig) -> Result<()> {
        if config.ctor_param_configs.is_empty() {
            return Ok(());
        }
        let space = self.space;
        let map = &mut self.maps[map_id.0];
        for param_config in &config.ctor_param_configs {
            let found = map
                .constructor_map
                .as_mut()
                .and_then(|ctor_map| ctor_map.parameter_named_mut(space, &param_config.parameter));
            let Some(param) = found else {
                return Err(Error::invalid_configuration(format!(
                    "`{}` does not have a constructor parameter named `{}`",
                    space.name(config.pair.destination),
                    param_config.parameter,
                )));
            };
            for directive in &param_config.directives {
                match directive {
                    CtorParamDirective::MapFromPath(path) => {
                        param.override_binding = Some(SourceBinding::Path(path.clone()));
                    }
                    CtorParamDirective::MapFromExpr(expr) => {
                        param.override_binding = Some(SourceBinding::Expr(expr.clone()));
                    }
                }
            }
            param.resolvable = true;
            param.use_default = false;
        }
        if let Some(ctor_map) = map.constructor_map.as_mut() {
            ctor_map.refresh_resolvable();
        }
        Ok(())
    }

    /// Map-level transformers only; profile-level ones are appended at
    /// freeze time, after inheritance has merged included plans
    fn apply_transformers(&mut self, map_id: TypeMapId, config: &TypeMapConfig) {
        let map = &mut self.maps[map_id.0];
        map.transformers.extend(config.transformers.iter().cloned());
    }

    /// Appends to the reverse entry's config everything derivable only from
    /// the resolved forward plan: identity bindings become include-members,
    /// flattened paths become path maps, ignores become do-not-validate
    /// source members, includes are mirrored swapped
    fn derive_reverse(&mut self, forward: TypeMapId, reverse_entry: usize) {
        let space = self.space;
        let reverse_map = self.entries[reverse_entry].map;
        self.maps[forward.0].reverse = Some(reverse_map);
        self.maps[reverse_map.0].reverse = Some(forward);

        let mut include_members = vec![];
        let mut path_maps = vec![];
        let mut ignored_sources = vec![];
        let map = &self.maps[forward.0];
        for mapping in &map.member_mappings {
            if mapping.ignored {
                ignored_sources.push(mapping.destination);
                continue;
            }
            match &mapping.binding {
                Some(SourceBinding::Identity) => {
                    include_members.push(MemberPath::single(mapping.destination));
                }
                Some(binding) => {
                    if let Some(path) = binding.path() {
                        if path.len() > 1 && !path.contains_method(space) {
                            path_maps.push((path.clone(), mapping.destination));
                        }
                    }
                }
                None => {}
            }
        }
        let included_derived = map.included_derived.clone();
        let included_base = map.included_base.clone();

        let config = &mut self.entries[reverse_entry].config;
        if !include_members.is_empty() {
            config
                .directives
                .push(TypeDirective::IncludeMembers(include_members));
        }
        for (destination, source) in path_maps {
            config.directives.push(TypeDirective::PathMap {
                destination,
                binding: SourceBinding::Path(MemberPath::single(source)),
                condition: None,
            });
        }
        for source in ignored_sources {
            config
                .source_member_config_mut(source)
                .directives
                .push(SourceMemberDirective::DoNotValidate);
        }
        for pair in included_derived {
            config.directives.push(TypeDirective::IncludeDerived(pair.swap()));
        }
        for pair in included_base {
            config.directives.push(TypeDirective::IncludeBase(pair.swap()));
        }
    }

    /// Merges included base plans downward and included derived plans
    /// upward, nearest ancestor first, transitively
    fn apply_inheritance(&mut self) -> Result<()> {
        let mut parents: Vec<Vec<TypeMapId>> = vec![vec![]; self.maps.len()];
        for map in &self.maps {
            for pair in &map.included_base {
                let base = self.map_for(*pair)?;
                parents[map.id.0].push(base);
            }
            for pair in &map.included_derived {
                let derived = self.map_for(*pair)?;
                parents[derived.0].push(map.id);
            }
        }

        let mut done = vec![false; self.maps.len()];
        for index in 0..self.maps.len() {
            self.inherit(index, &parents, &mut done);
        }
        Ok(())
    }

    fn map_for(&self, pair: TypePair) -> Result<TypeMapId> {
        match self.by_pair.get(&pair) {
            Some(&entry) => Ok(self.entries[entry].map),
            None => Err(Error::invalid_configuration(format!(
                "cannot include `{}`: the pair is not configured",
                pair.describe(self.space),
            ))),
        }
    }

    fn inherit(&mut self, index: usize, parents: &[Vec<TypeMapId>], done: &mut [bool]) {
        if done[index] {
            return;
        }
        done[index] = true;
        for parent in parents[index].clone() {
            self.inherit(parent.0, parents, done);
            self.merge_from(index, parent.0);
        }
    }

    fn merge_from(&mut self, child: usize, parent: usize) {
        let parent_map = &self.maps[parent];
        let inherited: Vec<MemberMapping> = parent_map
            .member_mappings
            .iter()
            .filter(|mapping| mapping.is_mapped())
            .cloned()
            .collect();
        let before = parent_map.before_hooks.clone();
        let after = parent_map.after_hooks.clone();
        let transformers = parent_map.transformers.clone();
        let ignored_sources = parent_map.ignored_source_members.clone();

        let map = &mut self.maps[child];
        for base in inherited {
            let existing = map
                .member_mappings
                .iter_mut()
                .find(|mapping| mapping.destination == base.destination);
            match existing {
                Some(mapping) => mapping.apply_inherited(&base),
                None => {
                    let mut mapping = base;
                    mapping.inherited = true;
                    map.member_mappings.push(mapping);
                }
            }
        }
        map.before_hooks.extend(before);
        map.after_hooks.extend(after);
        map.transformers.extend(transformers);
        for source in ignored_sources {
            if !map.ignored_source_members.contains(&source) {
                map.ignored_source_members.push(source);
            }
        }
    }

    /// Resolved registry: every configured pair, plus derived pairs
    /// registered against each base destination up the include chain
    /// (first registration wins), plus destination-override redirects
    fn build_registry(&mut self) -> Result<IndexMap<TypePair, TypeMapId>> {
        let mut resolved = IndexMap::new();
        for entry in &self.entries {
            resolved.insert(self.maps[entry.map.0].pair, entry.map);
        }

        for index in 0..self.maps.len() {
            let base_destination = self.maps[index].pair.destination;
            let mut queue = self.maps[index].included_derived.clone();
            let mut cursor = 0;
            // breadth-first so earlier includes register ahead of later ones
            while cursor < queue.len() {
                let pair = queue[cursor];
                cursor += 1;
                if queue[..cursor - 1].contains(&pair) {
                    continue;
                }
                let derived = self.map_for(pair)?;
                resolved
                    .entry(TypePair::new(pair.source, base_destination))
                    .or_insert(derived);
                queue.extend(self.maps[derived.0].included_derived.iter().copied());
            }
        }

        for index in 0..self.maps.len() {
            let Some(override_ty) = self.maps[index].destination_override else {
                continue;
            };
            let pair = self.maps[index].pair;
            let target = TypePair::new(pair.source, override_ty);
            let Some(&target_map) = resolved.get(&target) else {
                return Err(Error::invalid_configuration(format!(
                    "`{}` redirects to `{}`, which is not configured",
                    pair.describe(self.space),
                    target.describe(self.space),
                )));
            };
            resolved.insert(pair, target_map);
        }
        Ok(resolved)
    }

    /// Splices include-members mappings in with rebased source paths,
    /// appends profile-scope transformers, orders member mappings by
    /// mapping-order override, and marks plans sealed
    fn freeze(&mut self, resolved: &IndexMap<TypePair, TypeMapId>) -> Result<()> {
        let space = self.space;
        for index in 0..self.maps.len() {
            let included_paths = self.maps[index].included_member_paths.clone();
            for include_path in included_paths {
                let leaf = include_path.leaf_ty(space, self.maps[index].pair.source);
                let pair = TypePair::new(leaf, self.maps[index].pair.destination);
                let Some(&included_map) = resolved.get(&pair) else {
                    return Err(Error::invalid_configuration(format!(
                        "include-members path `{}` needs a configured mapping for `{}`",
                        include_path.describe(space),
                        pair.describe(space),
                    )));
                };

                let merged: Vec<MemberMapping> = self.maps[included_map.0]
                    .member_mappings
                    .iter()
                    .filter(|mapping| mapping.can_resolve())
                    .filter_map(|mapping| {
                        let path = mapping.binding.as_ref()?.path()?;
                        let mut rebased = mapping.clone();
                        rebased.binding =
                            Some(SourceBinding::Path(path.prefixed_with(&include_path)));
                        rebased.inherited = true;
                        Some(rebased)
                    })
                    .collect();

                let map = &mut self.maps[index];
                for mapping in merged {
                    let existing = map
                        .member_mappings
                        .iter_mut()
                        .find(|own| own.destination == mapping.destination);
                    match existing {
                        Some(own) if !own.is_mapped() => *own = mapping,
                        Some(_) => {}
                        None => map.member_mappings.push(mapping),
                    }
                }
            }

            let profile = &self.profiles[self.maps[index].profile.0];
            let map = &mut self.maps[index];
            map.transformers.extend(profile.transformers.iter().cloned());
            // stable: unordered mappings keep declaration order, ahead of
            // explicitly ordered ones
            map.member_mappings.sort_by_key(|mapping| mapping.mapping_order);
            map.sealed = true;
        }
        Ok(())
    }
}

enum Relation {
    Derived,
    Base,
}

fn check_included(
    space: &TypeSpace,
    own: TypePair,
    included: TypePair,
    relation: Relation,
) -> Result<()> {
    if included == own {
        return Err(Error::invalid_configuration(format!(
            "`{}` cannot include itself",
            own.describe(space)
        )));
    }
    let related = match relation {
        Relation::Derived => included.is_derived_from(own, space),
        Relation::Base => own.is_derived_from(included, space),
    };
    if !related {
        let expected = match relation {
            Relation::Derived => "derived from",
            Relation::Base => "a base of",
        };
        return Err(Error::invalid_configuration(format!(
            "`{}` is not {} `{}`",
            included.describe(space),
            expected,
            own.describe(space),
        )));
    }
    Ok(())
}

fn apply_member_directive(mapping: &mut MemberMapping, directive: &MemberDirective) {
    match directive {
        MemberDirective::Ignore => mapping.ignored = true,
        MemberDirective::MapFromPath(path) => {
            mapping.binding = Some(SourceBinding::Path(path.clone()));
            mapping.ignored = false;
        }
        MemberDirective::MapFromExpr(expr) => {
            mapping.binding = Some(SourceBinding::Expr(expr.clone()));
            mapping.ignored = false;
        }
        MemberDirective::MapFromIdentity => {
            mapping.binding = Some(SourceBinding::Identity);
            mapping.ignored = false;
        }
        MemberDirective::UseResolver(resolver) => {
            mapping.binding = Some(SourceBinding::Resolver(resolver.clone()));
            mapping.ignored = false;
        }
        MemberDirective::UseConverter(converter) => {
            mapping.binding = Some(SourceBinding::Converter(converter.clone()));
            mapping.ignored = false;
        }
        MemberDirective::Condition(predicate) => mapping.condition = Some(predicate.clone()),
        MemberDirective::PreCondition(predicate) => {
            mapping.pre_condition = Some(predicate.clone());
        }
        MemberDirective::NullSubstitute(literal) => {
            mapping.null_substitute = Some(literal.clone());
        }
        MemberDirective::MappingOrder(order) => mapping.mapping_order = Some(*order),
        MemberDirective::UseDestinationValue => mapping.use_destination_value = true,
        MemberDirective::AddTransformer(transformer) => {
            mapping.transformers.push(transformer.clone());
        }
    }
}
