//! Fluent authoring surface over `graft-core`.
//!
//! Describe types in a [`TypeSpace`], declare profiles and per-pair
//! mappings through a [`MapperBuilder`], then seal everything into an
//! immutable [`MapperConfig`] and validate it.

mod builder;
pub use builder::MapperBuilder;

mod mapping;
pub use mapping::{
    CtorParamOptions, MappingBuilder, MemberOptions, PathOptions, SourceMemberOptions,
};

mod profile;
pub use profile::ProfileBuilder;

pub use graft_core::ty::{
    MemberDescriptor, MemberId, MemberPath, ParameterDescriptor, TypeId, TypePair, TypeSpace,
};
pub use graft_core::{
    AssignableMapper, Error, MapperConfig, MemberList, NamingConvention, ObjectMapper, Result,
};
