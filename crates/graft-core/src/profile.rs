use crate::config::TypeMapConfig;
use crate::expr::ValueTransformer;
use crate::matching::MemberSearch;
use crate::naming::NamingConvention;
use crate::ty::{MemberId, MemberPath, TypeDetails, TypeId, TypePair, TypeSpace};
use crate::{Error, Result};

use dashmap::DashMap;
use std::sync::Arc;

/// Uniquely identifies a profile within a sealed configuration.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProfileId(pub usize);

/// A named bundle of matching settings and mapping configurations.
///
/// Every mapping declared through a profile is matched with that profile's
/// conventions, recognized prefixes/postfixes, and name replacements.
pub struct Profile {
    pub name: String,
    pub source_member_naming: NamingConvention,
    pub destination_member_naming: NamingConvention,
    /// Prefixes stripped from member names during matching
    pub recognized_prefixes: Vec<String>,
    /// Postfixes stripped from member names during matching
    pub recognized_postfixes: Vec<String>,
    /// Substring replacements tried against searched names, in order
    pub member_name_replacements: Vec<(String, String)>,
    /// Destination members whose name starts with one of these are ignored
    /// unless explicitly configured
    pub global_ignores: Vec<String>,
    /// Extension members this profile's matching may read
    pub source_extensions: Vec<MemberId>,
    /// Profile-level value transformers; apply after map-level ones
    pub transformers: Vec<ValueTransformer>,
    pub(crate) configs: Vec<TypeMapConfig>,
    details: DashMap<TypeId, Arc<TypeDetails>>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Profile {
        Profile {
            name: name.into(),
            source_member_naming: NamingConvention::PascalCase,
            destination_member_naming: NamingConvention::PascalCase,
            recognized_prefixes: vec!["Get".to_string()],
            recognized_postfixes: vec![],
            member_name_replacements: vec![],
            global_ignores: vec![],
            source_extensions: vec![],
            transformers: vec![],
            configs: vec![],
            details: DashMap::new(),
        }
    }

    /// Starts a new mapping configuration for `pair`.
    ///
    /// A pair may be declared at most once per profile; re-declaring it is
    /// an immediate error.
    pub fn create_map(&mut self, space: &TypeSpace, pair: TypePair) -> Result<&mut TypeMapConfig> {
        if self.configs.iter().any(|config| config.pair == pair) {
            return Err(Error::duplicate_registration(
                space.name(pair.source),
                space.name(pair.destination),
                &self.name,
                &self.name,
            ));
        }

        let index = self.configs.len();
        self.configs.push(TypeMapConfig::new(pair));
        Ok(&mut self.configs[index])
    }

    pub fn configs(&self) -> &[TypeMapConfig] {
        &self.configs
    }

    /// The cached member view of `ty` under this profile's settings.
    ///
    /// Racing callers may build the view twice; the first insert wins and
    /// both observe the same entry afterwards.
    pub fn details(&self, space: &TypeSpace, ty: TypeId) -> Arc<TypeDetails> {
        if let Some(details) = self.details.get(&ty) {
            return details.clone();
        }

        let built = Arc::new(TypeDetails::build(
            space,
            ty,
            &self.recognized_prefixes,
            &self.recognized_postfixes,
            &self.source_extensions,
        ));
        self.details.entry(ty).or_insert(built).clone()
    }

    /// Resolves a destination member name to a source member path using this
    /// profile's matching settings
    pub fn find_source_path(
        &self,
        space: &TypeSpace,
        source: TypeId,
        name: &str,
        reverse: bool,
    ) -> Option<MemberPath> {
        MemberSearch::new(self, space, reverse).find(source, name)
    }

    pub fn is_globally_ignored(&self, name: &str) -> bool {
        self.global_ignores
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

impl std::fmt::Debug for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProfileId({})", self.0)
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("configs", &self.configs.len())
            .finish()
    }
}
