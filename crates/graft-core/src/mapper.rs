use crate::plan::{TypeMap, TypeMapId};
use crate::profile::{Profile, ProfileId};
use crate::strategy::ObjectMapper;
use crate::ty::{TypePair, TypeSpace};
use crate::{seal, validate, Error, Result};

use dashmap::DashMap;
use indexmap::IndexMap;

use std::fmt;

/// A sealed mapping configuration.
///
/// Holds the type space, the profiles it was built from, every execution
/// plan, and the pair registry that routes lookups to plans. Once built the
/// configuration is immutable and can be shared across threads; runtime
/// pair resolution caches through a concurrent map.
pub struct MapperConfig {
    space: TypeSpace,
    profiles: Vec<Profile>,
    maps: Vec<TypeMap>,
    /// Registry built at seal time: configured pairs, derived-pair
    /// registrations, and redirects
    resolved: IndexMap<TypePair, TypeMapId>,
    /// Pairs resolved on demand after sealing. `None` records a miss so the
    /// related-pair scan runs once per pair.
    runtime: DashMap<TypePair, Option<TypeMapId>>,
    strategies: Vec<Box<dyn ObjectMapper>>,
}

impl MapperConfig {
    /// Seals profiles into an immutable configuration.
    ///
    /// Applies every recorded directive, resolves constructors, derives
    /// reverse plans, propagates inherited configuration, and builds the
    /// pair registry. Errors that depend on the whole configuration being
    /// known (duplicate pairs across profiles, unresolvable includes) are
    /// raised here.
    pub fn new(
        space: TypeSpace,
        profiles: Vec<Profile>,
        strategies: Vec<Box<dyn ObjectMapper>>,
    ) -> Result<MapperConfig> {
        seal::seal(space, profiles, strategies)
    }

    pub(crate) fn from_parts(
        space: TypeSpace,
        profiles: Vec<Profile>,
        maps: Vec<TypeMap>,
        resolved: IndexMap<TypePair, TypeMapId>,
        strategies: Vec<Box<dyn ObjectMapper>>,
    ) -> MapperConfig {
        MapperConfig {
            space,
            profiles,
            maps,
            resolved,
            runtime: DashMap::new(),
            strategies,
        }
    }

    pub fn space(&self) -> &TypeSpace {
        &self.space
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile(&self, id: ProfileId) -> &Profile {
        self.profiles.get(id.0).expect("invalid profile ID")
    }

    pub fn type_map(&self, id: TypeMapId) -> &TypeMap {
        self.maps.get(id.0).expect("invalid type map ID")
    }

    /// Every sealed plan, in registration order.
    pub fn configured_maps(&self) -> impl Iterator<Item = &TypeMap> + '_ {
        self.maps.iter()
    }

    /// Looks up the plan registered for exactly this pair.
    pub fn find_type_map(&self, pair: TypePair) -> Option<&TypeMap> {
        self.resolved.get(&pair).map(|&id| self.type_map(id))
    }

    /// Resolves the plan serving a pair.
    ///
    /// Checks the registry first, then falls back to a scan over the pair's
    /// related pairs in destination-major order so a `(Derived, Dto)`
    /// request lands on a `(Base, Dto)` plan. Fallback results, including
    /// misses, are cached.
    pub fn resolve_type_map(&self, pair: TypePair) -> Option<TypeMapId> {
        if let Some(&id) = self.resolved.get(&pair) {
            return Some(id);
        }
        if let Some(cached) = self.runtime.get(&pair) {
            return *cached;
        }
        let scanned = pair
            .related_pairs(&self.space)
            .into_iter()
            .find_map(|related| self.resolved.get(&related).copied());
        *self.runtime.entry(pair).or_insert(scanned)
    }

    /// Returns the first registered strategy claiming the pair.
    pub fn find_strategy(&self, pair: TypePair) -> Option<&dyn ObjectMapper> {
        self.strategies
            .iter()
            .map(|strategy| strategy.as_ref())
            .find(|strategy| strategy.is_match(&self.space, pair))
    }

    /// Checks every plan in the configuration.
    ///
    /// Runs the shape check and the resolution dry run over all plans and
    /// aggregates everything found into a single error. On success all
    /// checked plans are marked valid.
    pub fn assert_configuration_is_valid(&self) -> Result<()> {
        validate::run(self, None)
    }

    /// Checks only the plans declared by the named profile.
    pub fn assert_profile_is_valid(&self, name: &str) -> Result<()> {
        match self.profiles.iter().position(|profile| profile.name == name) {
            Some(index) => validate::run(self, Some(ProfileId(index))),
            None => Err(Error::unknown_profile(name)),
        }
    }
}

impl fmt::Debug for MapperConfig {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("MapperConfig")
            .field("profiles", &self.profiles.len())
            .field("maps", &self.maps.len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}
