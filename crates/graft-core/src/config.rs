//! Recorded mapping configuration.
//!
//! Everything the fluent surface declares is captured as plain directive
//! data on a [`TypeMapConfig`]; sealing replays the directives onto plans in
//! a fixed precedence order. Keeping the configuration inspectable makes the
//! replay deterministic and testable.

mod directive;
pub use directive::{CtorParamDirective, MemberDirective, SourceMemberDirective, TypeDirective};

mod member;
pub use member::{AllMemberOptions, CtorParamConfig, MemberConfig, SourceMemberConfig};

mod type_map;
pub use type_map::TypeMapConfig;
