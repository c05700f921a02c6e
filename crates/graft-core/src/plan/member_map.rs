use super::SourceBinding;
use crate::expr::{Literal, Predicate, ValueTransformer};
use crate::ty::{MemberId, MemberPath};

/// One destination member's place in the plan.
///
/// A mapping with neither a binding nor an ignore flag is unmapped; shape
/// validation reports it under the Destination member list.
#[derive(Debug, Clone)]
pub struct MemberMapping {
    pub destination: MemberId,
    pub binding: Option<SourceBinding>,
    pub ignored: bool,
    pub condition: Option<Predicate>,
    pub pre_condition: Option<Predicate>,
    pub null_substitute: Option<Literal>,
    pub mapping_order: Option<i32>,
    pub use_destination_value: bool,
    pub transformers: Vec<ValueTransformer>,
    /// Copied in from an included base or derived map
    pub inherited: bool,
}

impl MemberMapping {
    pub fn new(destination: MemberId) -> MemberMapping {
        MemberMapping {
            destination,
            binding: None,
            ignored: false,
            condition: None,
            pre_condition: None,
            null_substitute: None,
            mapping_order: None,
            use_destination_value: false,
            transformers: vec![],
            inherited: false,
        }
    }

    /// Mapped members satisfy shape validation: either a source was found
    /// or the member was deliberately dropped
    pub fn is_mapped(&self) -> bool {
        self.ignored || self.binding.is_some()
    }

    /// Mappings that will move a value at map time
    pub fn can_resolve(&self) -> bool {
        !self.ignored && self.binding.is_some()
    }

    /// An explicit binding came from configuration rather than matching
    pub fn is_explicitly_resolved(&self) -> bool {
        matches!(&self.binding, Some(binding) if !binding.is_auto())
    }

    /// Merges an inherited mapping for the same destination member. Own
    /// explicit configuration wins; an inherited ignore or explicit binding
    /// overrides a matched one; option slots fill in only when unset.
    pub fn apply_inherited(&mut self, base: &MemberMapping) {
        if !self.is_explicitly_resolved() {
            if base.ignored {
                self.ignored = true;
            }
            if base.binding.is_some() && (self.binding.is_none() || base.is_explicitly_resolved()) {
                self.binding = base.binding.clone();
            }
        }
        if self.condition.is_none() {
            self.condition = base.condition.clone();
        }
        if self.pre_condition.is_none() {
            self.pre_condition = base.pre_condition.clone();
        }
        if self.null_substitute.is_none() {
            self.null_substitute = base.null_substitute.clone();
        }
        if self.mapping_order.is_none() {
            self.mapping_order = base.mapping_order;
        }
    }
}

/// Binds a multi-segment destination path to a source.
#[derive(Debug, Clone)]
pub struct PathMapping {
    pub destination: MemberPath,
    pub binding: SourceBinding,
    pub condition: Option<Predicate>,
}

impl PathMapping {
    pub fn new(destination: MemberPath, binding: SourceBinding) -> PathMapping {
        PathMapping {
            destination,
            binding,
            condition: None,
        }
    }
}
