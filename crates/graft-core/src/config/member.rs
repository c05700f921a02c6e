use super::{CtorParamDirective, MemberDirective, SourceMemberDirective};
use crate::ty::MemberId;

/// Recorded directives for one destination member
#[derive(Debug, Clone)]
pub struct MemberConfig {
    pub destination: MemberId,
    pub directives: Vec<MemberDirective>,
}

impl MemberConfig {
    pub fn new(destination: MemberId) -> MemberConfig {
        MemberConfig {
            destination,
            directives: vec![],
        }
    }

    /// True when the config decides the member's source rather than only
    /// adjusting options
    pub fn controls_source(&self) -> bool {
        self.directives
            .iter()
            .any(|directive| directive.controls_source())
    }
}

/// Recorded directives for one source member
#[derive(Debug, Clone)]
pub struct SourceMemberConfig {
    pub source: MemberId,
    pub directives: Vec<SourceMemberDirective>,
}

impl SourceMemberConfig {
    pub fn new(source: MemberId) -> SourceMemberConfig {
        SourceMemberConfig {
            source,
            directives: vec![],
        }
    }
}

/// Recorded directives for one constructor parameter, keyed by name.
///
/// The name is checked against the resolved constructor at seal time.
#[derive(Debug, Clone)]
pub struct CtorParamConfig {
    pub parameter: String,
    pub directives: Vec<CtorParamDirective>,
}

impl CtorParamConfig {
    pub fn new(parameter: impl Into<String>) -> CtorParamConfig {
        CtorParamConfig {
            parameter: parameter.into(),
            directives: vec![],
        }
    }
}

/// A member-option block applied across the map's member mappings
#[derive(Debug, Clone)]
pub struct AllMemberOptions {
    pub directives: Vec<MemberDirective>,
    /// Restrict the block to members with no explicit member config
    pub only_unconfigured: bool,
}
