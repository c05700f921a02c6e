use crate::profile::ProfileBuilder;

use graft_core::profile::Profile;
use graft_core::{MapperConfig, ObjectMapper, Result, TypeSpace};

/// Collects profiles and strategies over a type space, then seals them
/// into a [`MapperConfig`].
pub struct MapperBuilder {
    pub(crate) space: TypeSpace,
    pub(crate) profiles: Vec<Profile>,
    strategies: Vec<Box<dyn ObjectMapper>>,
}

impl MapperBuilder {
    pub fn new(space: TypeSpace) -> MapperBuilder {
        MapperBuilder {
            space,
            profiles: vec![],
            strategies: vec![],
        }
    }

    /// Opens a new profile. Matching settings and mappings declared through
    /// the returned builder belong to it.
    pub fn profile(&mut self, name: impl Into<String>) -> ProfileBuilder<'_> {
        self.profiles.push(Profile::new(name));
        let index = self.profiles.len() - 1;
        ProfileBuilder::new(self, index)
    }

    /// Registers a runtime strategy.
    ///
    /// Strategies are consulted in registration order for pairs no plan
    /// serves; an assignability fallback is always appended last.
    pub fn add_strategy(&mut self, strategy: impl ObjectMapper + 'static) -> &mut MapperBuilder {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn space(&self) -> &TypeSpace {
        &self.space
    }

    /// Seals everything declared so far.
    pub fn seal(self) -> Result<MapperConfig> {
        MapperConfig::new(self.space, self.profiles, self.strategies)
    }
}
