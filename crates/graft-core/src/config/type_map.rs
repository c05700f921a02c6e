use super::{
    AllMemberOptions, CtorParamConfig, MemberConfig, MemberDirective, SourceMemberConfig,
    TypeDirective,
};
use crate::expr::ValueTransformer;
use crate::plan::MemberList;
use crate::ty::{MemberId, MemberPath, TypeId, TypePair, TypeSpace};
use crate::{Error, Result};

/// Everything recorded for one source/destination pair before sealing.
#[derive(Debug, Clone)]
pub struct TypeMapConfig {
    pub pair: TypePair,
    pub member_list: MemberList,
    pub directives: Vec<TypeDirective>,
    pub member_configs: Vec<MemberConfig>,
    pub source_member_configs: Vec<SourceMemberConfig>,
    pub ctor_param_configs: Vec<CtorParamConfig>,
    pub transformers: Vec<ValueTransformer>,
    pub all_member_options: Vec<AllMemberOptions>,
    /// Derived configuration for the swapped pair, if requested
    pub reverse: Option<Box<TypeMapConfig>>,
    pub is_reverse: bool,
}

impl TypeMapConfig {
    pub fn new(pair: TypePair) -> TypeMapConfig {
        TypeMapConfig {
            pair,
            member_list: MemberList::Destination,
            directives: vec![],
            member_configs: vec![],
            source_member_configs: vec![],
            ctor_param_configs: vec![],
            transformers: vec![],
            all_member_options: vec![],
            reverse: None,
            is_reverse: false,
        }
    }

    /// The recorded config for a destination member, created on first use
    pub fn member_config_mut(&mut self, destination: MemberId) -> &mut MemberConfig {
        if let Some(index) = self
            .member_configs
            .iter()
            .position(|config| config.destination == destination)
        {
            return &mut self.member_configs[index];
        }
        self.member_configs.push(MemberConfig::new(destination));
        let index = self.member_configs.len() - 1;
        &mut self.member_configs[index]
    }

    pub fn source_member_config_mut(&mut self, source: MemberId) -> &mut SourceMemberConfig {
        if let Some(index) = self
            .source_member_configs
            .iter()
            .position(|config| config.source == source)
        {
            return &mut self.source_member_configs[index];
        }
        self.source_member_configs.push(SourceMemberConfig::new(source));
        let index = self.source_member_configs.len() - 1;
        &mut self.source_member_configs[index]
    }

    pub fn ctor_param_config_mut(&mut self, parameter: &str) -> &mut CtorParamConfig {
        if let Some(index) = self
            .ctor_param_configs
            .iter()
            .position(|config| config.parameter == parameter)
        {
            return &mut self.ctor_param_configs[index];
        }
        self.ctor_param_configs.push(CtorParamConfig::new(parameter));
        let index = self.ctor_param_configs.len() - 1;
        &mut self.ctor_param_configs[index]
    }

    pub fn is_member_configured(&self, destination: MemberId) -> bool {
        self.member_configs
            .iter()
            .any(|config| config.destination == destination)
    }

    /// True when an explicit member config decides this member's source,
    /// which suppresses convention auto-matching
    pub fn controls_source_for(&self, destination: MemberId) -> bool {
        self.member_configs
            .iter()
            .any(|config| config.destination == destination && config.controls_source())
    }

    /// Creates (or returns) the reverse configuration for the swapped pair.
    ///
    /// The reverse starts with validation disabled and with every invertible
    /// single-member rename recorded so far flipped; everything derivable
    /// only from the resolved forward plan is appended at seal time.
    pub fn reverse_map(&mut self, space: &TypeSpace) -> Result<&mut TypeMapConfig> {
        if self.is_reverse {
            return Err(Error::invalid_configuration(
                "a reverse mapping cannot itself be reversed",
            ));
        }

        if self.reverse.is_none() {
            let mut reverse = TypeMapConfig::new(self.pair.swap());
            reverse.is_reverse = true;
            reverse.member_list = MemberList::None;
            for config in &self.member_configs {
                if let Some((destination, path)) = invert_rename(space, config) {
                    reverse
                        .member_config_mut(destination)
                        .directives
                        .push(MemberDirective::MapFromPath(path));
                }
            }
            self.reverse = Some(Box::new(reverse));
        }
        Ok(&mut **self.reverse.get_or_insert_with(Default::default))
    }
}

impl Default for TypeMapConfig {
    fn default() -> TypeMapConfig {
        TypeMapConfig::new(TypePair::new(TypeId(0), TypeId(0)))
    }
}

/// A member config inverts when its only source directive is a
/// single-segment rename onto a writable field, and the forward destination
/// member can be read back
fn invert_rename(space: &TypeSpace, config: &MemberConfig) -> Option<(MemberId, MemberPath)> {
    let mut rename = None;
    for directive in &config.directives {
        match directive {
            MemberDirective::MapFromPath(path) if path.len() == 1 => {
                rename = path.root();
            }
            directive if directive.controls_source() => return None,
            _ => {}
        }
    }

    let source = rename?;
    let member = space.member(source);
    if member.kind.is_method() || !member.writable || !space.member(config.destination).readable {
        return None;
    }
    Some((source, MemberPath::single(config.destination)))
}
