use graft_core::config::{
    AllMemberOptions, CtorParamDirective, MemberDirective, SourceMemberDirective, TypeDirective,
    TypeMapConfig,
};
use graft_core::err;
use graft_core::expr::{
    ConverterRef, Hook, Literal, Predicate, ResolverRef, ValueExpr, ValueTransformer,
};
use graft_core::plan::SourceBinding;
use graft_core::ty::{MemberPath, TypeId, TypeSpace};
use graft_core::{MemberList, Result, TypePair};

use std::fmt;

/// Fluent configuration for one source/destination pair.
///
/// Name lookups against the type space fail immediately; everything that
/// needs the whole configuration (constructor parameter names, include
/// relationships) is checked when the builder seals.
pub struct MappingBuilder<'a> {
    space: &'a TypeSpace,
    config: &'a mut TypeMapConfig,
}

impl<'a> MappingBuilder<'a> {
    pub(crate) fn new(space: &'a TypeSpace, config: &'a mut TypeMapConfig) -> MappingBuilder<'a> {
        MappingBuilder { space, config }
    }

    /// Configures one destination member.
    pub fn for_member<F>(self, name: &str, options: F) -> Result<Self>
    where
        F: FnOnce(MemberOptions<'_>) -> Result<MemberOptions<'_>>,
    {
        let member = self.space.expect_member(self.config.pair.destination, name)?;
        let source = self.config.pair.source;
        options(MemberOptions {
            space: self.space,
            source,
            directives: &mut self.config.member_config_mut(member).directives,
        })?;
        Ok(self)
    }

    /// Applies the options to every member mapping of the plan.
    pub fn for_all_members<F>(self, options: F) -> Result<Self>
    where
        F: FnOnce(MemberOptions<'_>) -> Result<MemberOptions<'_>>,
    {
        self.all_members(false, options)
    }

    /// Applies the options to every member mapping that has no explicit
    /// member configuration.
    pub fn for_all_other_members<F>(self, options: F) -> Result<Self>
    where
        F: FnOnce(MemberOptions<'_>) -> Result<MemberOptions<'_>>,
    {
        self.all_members(true, options)
    }

    fn all_members<F>(self, only_unconfigured: bool, options: F) -> Result<Self>
    where
        F: FnOnce(MemberOptions<'_>) -> Result<MemberOptions<'_>>,
    {
        self.config.all_member_options.push(AllMemberOptions {
            directives: vec![],
            only_unconfigured,
        });
        let index = self.config.all_member_options.len() - 1;
        let source = self.config.pair.source;
        options(MemberOptions {
            space: self.space,
            source,
            directives: &mut self.config.all_member_options[index].directives,
        })?;
        Ok(self)
    }

    /// Binds a multi-segment destination path, e.g. `"Customer.Name"`.
    pub fn for_path<F>(self, path: &str, options: F) -> Result<Self>
    where
        F: FnOnce(PathOptions<'_>) -> Result<PathOptions<'_>>,
    {
        let destination = resolve_path(self.space, self.config.pair.destination, path)?;
        let mut resolved = options(PathOptions {
            space: self.space,
            source: self.config.pair.source,
            binding: None,
            condition: None,
        })?;
        let Some(binding) = resolved.binding.take() else {
            return Err(err!("path mapping `{}` needs a source; call `map_from`", path));
        };
        self.config.directives.push(TypeDirective::PathMap {
            destination,
            binding,
            condition: resolved.condition.take(),
        });
        Ok(self)
    }

    /// Configures one source member.
    pub fn for_source_member<F>(self, name: &str, options: F) -> Result<Self>
    where
        F: FnOnce(SourceMemberOptions<'_>) -> Result<SourceMemberOptions<'_>>,
    {
        let member = self.space.expect_member(self.config.pair.source, name)?;
        options(SourceMemberOptions {
            directives: &mut self.config.source_member_config_mut(member).directives,
        })?;
        Ok(self)
    }

    /// Configures the named constructor parameter.
    ///
    /// The name is checked against the resolved constructor at seal time.
    pub fn for_ctor_param<F>(self, name: &str, options: F) -> Result<Self>
    where
        F: FnOnce(CtorParamOptions<'_>) -> Result<CtorParamOptions<'_>>,
    {
        let source = self.config.pair.source;
        options(CtorParamOptions {
            space: self.space,
            source,
            directives: &mut self.config.ctor_param_config_mut(name).directives,
        })?;
        Ok(self)
    }

    /// Inherits this map's configuration into the derived pair.
    pub fn include(self, source: &str, destination: &str) -> Result<Self> {
        let pair = self.pair_of(source, destination)?;
        self.config
            .directives
            .push(TypeDirective::IncludeDerived(pair));
        Ok(self)
    }

    /// Inherits the base pair's configuration into this map.
    pub fn include_base(self, source: &str, destination: &str) -> Result<Self> {
        let pair = self.pair_of(source, destination)?;
        self.config.directives.push(TypeDirective::IncludeBase(pair));
        Ok(self)
    }

    /// Splices the members of the nested objects at these source paths into
    /// this map. Each leaf type must have its own mapping to the same
    /// destination.
    pub fn include_members(self, paths: &[&str]) -> Result<Self> {
        let mut resolved = vec![];
        for path in paths {
            resolved.push(resolve_path(self.space, self.config.pair.source, path)?);
        }
        self.config
            .directives
            .push(TypeDirective::IncludeMembers(resolved));
        Ok(self)
    }

    /// Limits recursion into self-referential pairs. Implies identity
    /// preservation.
    pub fn max_depth(self, depth: usize) -> Self {
        self.config.directives.push(TypeDirective::MaxDepth(depth));
        self
    }

    pub fn preserve_identity(self) -> Self {
        self.config.directives.push(TypeDirective::PreserveIdentity);
        self
    }

    pub fn before_map(self, hook: impl Into<String>) -> Self {
        self.config
            .directives
            .push(TypeDirective::BeforeMap(Hook::new(hook)));
        self
    }

    pub fn after_map(self, hook: impl Into<String>) -> Self {
        self.config
            .directives
            .push(TypeDirective::AfterMap(Hook::new(hook)));
        self
    }

    /// Maps the whole object with a converter instead of member mappings.
    pub fn convert_using(self, converter: impl Into<String>) -> Self {
        self.config
            .directives
            .push(TypeDirective::ConvertUsing(ConverterRef::new(converter)));
        self
    }

    /// Builds the destination with the expression instead of a constructor.
    pub fn construct_using(self, expr: impl Into<String>) -> Self {
        let destination = self.config.pair.destination;
        self.config
            .directives
            .push(TypeDirective::ConstructUsing(ValueExpr::new(
                expr,
                destination,
            )));
        self
    }

    pub fn disable_auto_constructor(self) -> Self {
        self.config
            .directives
            .push(TypeDirective::DisableAutoConstructor);
        self
    }

    /// Redirects this pair to the plan of a derived destination type.
    pub fn as_type(self, destination: &str) -> Result<Self> {
        let ty = self.space.expect_type(destination)?;
        self.config.directives.push(TypeDirective::AsType(ty));
        Ok(self)
    }

    /// Chooses which side's members the shape check covers.
    pub fn member_list(self, list: MemberList) -> Self {
        self.config.member_list = list;
        self
    }

    /// Transforms every value of `value_ty` mapped by this plan.
    pub fn add_transformer(self, value_ty: &str, transform: impl Into<String>) -> Result<Self> {
        let ty = self.space.expect_type(value_ty)?;
        self.config
            .transformers
            .push(ValueTransformer::new(ty, transform));
        Ok(self)
    }

    /// Derives the swapped mapping and returns its builder.
    ///
    /// Simple renames recorded so far invert immediately; everything else
    /// is derived from the resolved forward plan at seal time. The reverse
    /// starts with shape validation off.
    pub fn reverse_map(self) -> Result<MappingBuilder<'a>> {
        let space = self.space;
        let config = self.config.reverse_map(space)?;
        Ok(MappingBuilder { space, config })
    }

    fn pair_of(&self, source: &str, destination: &str) -> Result<TypePair> {
        Ok(TypePair::new(
            self.space.expect_type(source)?,
            self.space.expect_type(destination)?,
        ))
    }
}

impl fmt::Debug for MappingBuilder<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("MappingBuilder")
            .field("pair", &self.config.pair)
            .finish()
    }
}

/// Options for one destination member.
///
/// Methods record directives in call order; when several decide the
/// member's source, the last one recorded wins at seal time.
pub struct MemberOptions<'a> {
    space: &'a TypeSpace,
    source: TypeId,
    directives: &'a mut Vec<MemberDirective>,
}

impl MemberOptions<'_> {
    /// Excludes the member from mapping and from shape validation.
    pub fn ignore(self) -> Result<Self> {
        self.directives.push(MemberDirective::Ignore);
        Ok(self)
    }

    /// Reads from the source member at `path`, which may be dotted.
    pub fn map_from(self, path: &str) -> Result<Self> {
        let path = resolve_path(self.space, self.source, path)?;
        self.directives.push(MemberDirective::MapFromPath(path));
        Ok(self)
    }

    /// Computes the value with an expression producing `result`.
    pub fn map_from_expr(self, expr: impl Into<String>, result: &str) -> Result<Self> {
        let result = self.space.expect_type(result)?;
        self.directives
            .push(MemberDirective::MapFromExpr(ValueExpr::new(expr, result)));
        Ok(self)
    }

    /// Binds the whole source object.
    pub fn map_from_identity(self) -> Result<Self> {
        self.directives.push(MemberDirective::MapFromIdentity);
        Ok(self)
    }

    /// Delegates the value to a resolver; opaque to validation.
    pub fn use_resolver(self, resolver: impl Into<String>) -> Result<Self> {
        self.directives
            .push(MemberDirective::UseResolver(ResolverRef::new(resolver)));
        Ok(self)
    }

    /// Converts the matched source value; opaque to validation.
    pub fn use_converter(self, converter: impl Into<String>) -> Result<Self> {
        self.directives
            .push(MemberDirective::UseConverter(ConverterRef::new(converter)));
        Ok(self)
    }

    /// Skips the assignment when the predicate rejects the source.
    pub fn condition(self, predicate: impl Into<String>) -> Result<Self> {
        self.directives
            .push(MemberDirective::Condition(Predicate::new(predicate)));
        Ok(self)
    }

    /// Skips source evaluation entirely when the predicate rejects.
    pub fn pre_condition(self, predicate: impl Into<String>) -> Result<Self> {
        self.directives
            .push(MemberDirective::PreCondition(Predicate::new(predicate)));
        Ok(self)
    }

    /// Substitutes the literal when the source value is null.
    pub fn null_substitute(self, value: impl Into<String>) -> Result<Self> {
        self.directives
            .push(MemberDirective::NullSubstitute(Literal::new(value)));
        Ok(self)
    }

    /// Orders this member's assignment relative to others. Unordered
    /// members run first, in declaration order.
    pub fn mapping_order(self, order: i32) -> Result<Self> {
        self.directives.push(MemberDirective::MappingOrder(order));
        Ok(self)
    }

    /// Maps into the existing destination value instead of replacing it.
    pub fn use_destination_value(self) -> Result<Self> {
        self.directives.push(MemberDirective::UseDestinationValue);
        Ok(self)
    }

    /// Transforms this member's value after resolution.
    pub fn add_transformer(self, value_ty: &str, transform: impl Into<String>) -> Result<Self> {
        let ty = self.space.expect_type(value_ty)?;
        self.directives
            .push(MemberDirective::AddTransformer(ValueTransformer::new(
                ty, transform,
            )));
        Ok(self)
    }
}

/// Options for one destination path mapping. Exactly one `map_from` call
/// is required.
pub struct PathOptions<'a> {
    space: &'a TypeSpace,
    source: TypeId,
    binding: Option<SourceBinding>,
    condition: Option<Predicate>,
}

impl PathOptions<'_> {
    /// Reads from the source member at `path`, which may be dotted.
    pub fn map_from(mut self, path: &str) -> Result<Self> {
        let path = resolve_path(self.space, self.source, path)?;
        self.binding = Some(SourceBinding::Path(path));
        Ok(self)
    }

    /// Computes the value with an expression producing `result`.
    pub fn map_from_expr(mut self, expr: impl Into<String>, result: &str) -> Result<Self> {
        let result = self.space.expect_type(result)?;
        self.binding = Some(SourceBinding::Expr(ValueExpr::new(expr, result)));
        Ok(self)
    }

    /// Skips the assignment when the predicate rejects the source.
    pub fn condition(mut self, predicate: impl Into<String>) -> Result<Self> {
        self.condition = Some(Predicate::new(predicate));
        Ok(self)
    }
}

/// Options for one source member.
pub struct SourceMemberOptions<'a> {
    directives: &'a mut Vec<SourceMemberDirective>,
}

impl SourceMemberOptions<'_> {
    /// Excludes the member from source-scope shape validation.
    pub fn do_not_validate(self) -> Result<Self> {
        self.directives.push(SourceMemberDirective::DoNotValidate);
        Ok(self)
    }
}

/// Options for one constructor parameter.
pub struct CtorParamOptions<'a> {
    space: &'a TypeSpace,
    source: TypeId,
    directives: &'a mut Vec<CtorParamDirective>,
}

impl CtorParamOptions<'_> {
    /// Supplies the parameter from the source member at `path`.
    pub fn map_from(self, path: &str) -> Result<Self> {
        let path = resolve_path(self.space, self.source, path)?;
        self.directives.push(CtorParamDirective::MapFromPath(path));
        Ok(self)
    }

    /// Supplies the parameter with an expression producing `result`.
    pub fn map_from_expr(self, expr: impl Into<String>, result: &str) -> Result<Self> {
        let result = self.space.expect_type(result)?;
        self.directives
            .push(CtorParamDirective::MapFromExpr(ValueExpr::new(expr, result)));
        Ok(self)
    }
}

/// Walks a dotted member path from `root`, erroring on the first unknown
/// segment.
fn resolve_path(space: &TypeSpace, root: TypeId, path: &str) -> Result<MemberPath> {
    let mut resolved = MemberPath::new();
    let mut current = root;
    for segment in path.split('.') {
        let member = space.expect_member(current, segment)?;
        current = space.member(member).ty;
        resolved.push(member);
    }
    Ok(resolved)
}
