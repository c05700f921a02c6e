use crate::expr::{
    ConverterRef, Hook, Literal, Predicate, ResolverRef, ValueExpr, ValueTransformer,
};
use crate::plan::SourceBinding;
use crate::ty::{MemberPath, TypeId, TypePair};

/// Type-level directives, replayed onto the plan in recording order.
///
/// A later directive targeting the same destination as an earlier one
/// overwrites it for that destination only.
#[derive(Debug, Clone)]
pub enum TypeDirective {
    MaxDepth(usize),
    PreserveIdentity,
    BeforeMap(Hook),
    AfterMap(Hook),
    ConvertUsing(ConverterRef),
    ConstructUsing(ValueExpr),
    DisableAutoConstructor,
    /// Inherit this map's configuration into the given derived pair
    IncludeDerived(TypePair),
    /// Inherit the given base pair's configuration into this map
    IncludeBase(TypePair),
    /// Flatten the members of the nested objects at these source paths
    IncludeMembers(Vec<MemberPath>),
    /// Bind a multi-segment destination path to a source
    PathMap {
        destination: MemberPath,
        binding: SourceBinding,
        condition: Option<Predicate>,
    },
    /// Redirect this pair to the plan of a derived destination type
    AsType(TypeId),
}

/// Per-destination-member directives
#[derive(Debug, Clone)]
pub enum MemberDirective {
    Ignore,
    MapFromPath(MemberPath),
    MapFromExpr(ValueExpr),
    /// Bind the whole source object
    MapFromIdentity,
    UseResolver(ResolverRef),
    UseConverter(ConverterRef),
    Condition(Predicate),
    PreCondition(Predicate),
    NullSubstitute(Literal),
    MappingOrder(i32),
    UseDestinationValue,
    AddTransformer(ValueTransformer),
}

impl MemberDirective {
    /// Directives that decide where the member's value comes from; their
    /// presence suppresses convention auto-matching for the member
    pub fn controls_source(&self) -> bool {
        matches!(
            self,
            MemberDirective::Ignore
                | MemberDirective::MapFromPath(_)
                | MemberDirective::MapFromExpr(_)
                | MemberDirective::MapFromIdentity
                | MemberDirective::UseResolver(_)
                | MemberDirective::UseConverter(_)
        )
    }
}

/// Per-source-member directives
#[derive(Debug, Clone)]
pub enum SourceMemberDirective {
    /// Exclude the member from source-scope validation
    DoNotValidate,
}

/// Per-constructor-parameter directives
#[derive(Debug, Clone)]
pub enum CtorParamDirective {
    MapFromPath(MemberPath),
    MapFromExpr(ValueExpr),
}
