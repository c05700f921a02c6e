use super::{ConstructorMap, MemberList, MemberMapping, PathMapping, TypeMapId};
use crate::expr::{ConverterRef, Hook, ValueExpr, ValueTransformer};
use crate::profile::ProfileId;
use crate::ty::{MemberId, MemberPath, TypeId, TypePair, TypeSpace};

use std::sync::atomic::{AtomicBool, Ordering};

/// The resolved mapping plan for one type pair.
#[derive(Debug)]
pub struct TypeMap {
    pub id: TypeMapId,
    pub pair: TypePair,
    pub profile: ProfileId,
    pub member_list: MemberList,
    /// Ordered at freeze time by mapping-order overrides
    pub member_mappings: Vec<MemberMapping>,
    pub path_mappings: Vec<PathMapping>,
    pub constructor_map: Option<ConstructorMap>,
    /// Custom construction expression; suppresses constructor resolution
    pub construct_expr: Option<ValueExpr>,
    /// Whole-object converter; suppresses member mapping
    pub converter: Option<ConverterRef>,
    pub before_hooks: Vec<Hook>,
    pub after_hooks: Vec<Hook>,
    pub transformers: Vec<ValueTransformer>,
    pub max_depth: Option<usize>,
    pub preserve_identity: bool,
    pub auto_constructor_disabled: bool,
    /// Redirects the pair to this derived destination's plan
    pub destination_override: Option<TypeId>,
    /// Source members excluded from source-scope validation
    pub ignored_source_members: Vec<MemberId>,
    pub included_derived: Vec<TypePair>,
    pub included_base: Vec<TypePair>,
    pub included_member_paths: Vec<MemberPath>,
    pub reverse: Option<TypeMapId>,
    pub sealed: bool,
    valid: AtomicBool,
}

impl TypeMap {
    pub fn new(id: TypeMapId, pair: TypePair, profile: ProfileId, member_list: MemberList) -> TypeMap {
        TypeMap {
            id,
            pair,
            profile,
            member_list,
            member_mappings: vec![],
            path_mappings: vec![],
            constructor_map: None,
            construct_expr: None,
            converter: None,
            before_hooks: vec![],
            after_hooks: vec![],
            transformers: vec![],
            max_depth: None,
            preserve_identity: false,
            auto_constructor_disabled: false,
            destination_override: None,
            ignored_source_members: vec![],
            included_derived: vec![],
            included_base: vec![],
            included_member_paths: vec![],
            reverse: None,
            sealed: false,
            valid: AtomicBool::new(false),
        }
    }

    pub fn member_mapping(&self, destination: MemberId) -> Option<&MemberMapping> {
        self.member_mappings
            .iter()
            .find(|mapping| mapping.destination == destination)
    }

    /// The mapping for a destination member, created unbound on first use
    pub fn member_mapping_mut(&mut self, destination: MemberId) -> &mut MemberMapping {
        if let Some(index) = self
            .member_mappings
            .iter()
            .position(|mapping| mapping.destination == destination)
        {
            return &mut self.member_mappings[index];
        }
        self.member_mappings.push(MemberMapping::new(destination));
        let index = self.member_mappings.len() - 1;
        &mut self.member_mappings[index]
    }

    pub fn has_path_mapping_root(&self, destination: MemberId) -> bool {
        self.path_mappings
            .iter()
            .any(|mapping| mapping.destination.root() == Some(destination))
    }

    /// Set once the map has passed a full validation pass
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Relaxed)
    }

    pub fn mark_valid(&self) {
        self.valid.store(true, Ordering::Relaxed);
    }

    pub fn describe(&self, space: &TypeSpace) -> String {
        self.pair.describe(space)
    }
}
