use crate::builder::MapperBuilder;
use crate::mapping::MappingBuilder;

use graft_core::expr::ValueTransformer;
use graft_core::ty::MemberId;
use graft_core::{NamingConvention, Result, TypePair};

/// Configures one profile's matching settings and declares its mappings.
pub struct ProfileBuilder<'a> {
    builder: &'a mut MapperBuilder,
    index: usize,
}

impl<'a> ProfileBuilder<'a> {
    pub(crate) fn new(builder: &'a mut MapperBuilder, index: usize) -> ProfileBuilder<'a> {
        ProfileBuilder { builder, index }
    }

    /// Convention used to tokenize source member names.
    pub fn source_member_naming(self, convention: NamingConvention) -> Self {
        self.builder.profiles[self.index].source_member_naming = convention;
        self
    }

    /// Convention used to tokenize searched destination names.
    pub fn destination_member_naming(self, convention: NamingConvention) -> Self {
        self.builder.profiles[self.index].destination_member_naming = convention;
        self
    }

    /// Strips `prefix` during matching, so `GetTotal` also answers to
    /// `Total`. `Get` is recognized out of the box.
    pub fn recognize_prefix(self, prefix: impl Into<String>) -> Self {
        self.builder.profiles[self.index]
            .recognized_prefixes
            .push(prefix.into());
        self
    }

    pub fn recognize_postfix(self, postfix: impl Into<String>) -> Self {
        self.builder.profiles[self.index]
            .recognized_postfixes
            .push(postfix.into());
        self
    }

    /// Drops every recognized prefix, including the built-in `Get`.
    pub fn clear_prefixes(self) -> Self {
        self.builder.profiles[self.index].recognized_prefixes.clear();
        self
    }

    /// Tries `replacement` wherever `original` occurs in a searched name.
    pub fn replace_member_name(
        self,
        original: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.builder.profiles[self.index]
            .member_name_replacements
            .push((original.into(), replacement.into()));
        self
    }

    /// Destination members whose name starts with `prefix` are skipped
    /// unless explicitly configured.
    pub fn add_global_ignore(self, prefix: impl Into<String>) -> Self {
        self.builder.profiles[self.index]
            .global_ignores
            .push(prefix.into());
        self
    }

    /// Lets this profile's matching read the given extension member.
    pub fn include_source_extension(self, member: MemberId) -> Self {
        self.builder.profiles[self.index]
            .source_extensions
            .push(member);
        self
    }

    /// Transforms every mapped value of `value_ty` under this profile,
    /// after any map-level transformers.
    pub fn add_transformer(self, value_ty: &str, transform: impl Into<String>) -> Result<Self> {
        let ty = self.builder.space.expect_type(value_ty)?;
        self.builder.profiles[self.index]
            .transformers
            .push(ValueTransformer::new(ty, transform));
        Ok(self)
    }

    /// Starts a mapping for the pair.
    ///
    /// Errors when either type name is unknown or the pair was already
    /// declared in this profile.
    pub fn create_map(&mut self, source: &str, destination: &str) -> Result<MappingBuilder<'_>> {
        let MapperBuilder {
            space, profiles, ..
        } = &mut *self.builder;
        let pair = TypePair::new(space.expect_type(source)?, space.expect_type(destination)?);
        let config = profiles[self.index].create_map(space, pair)?;
        Ok(MappingBuilder::new(space, config))
    }
}
