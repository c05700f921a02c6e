use super::SourceBinding;
use crate::ty::{CtorId, MemberPath, TypeId, TypeSpace};

/// Construction plan for a destination type.
#[derive(Debug, Clone)]
pub struct ConstructorMap {
    pub constructor: CtorId,
    pub parameters: Vec<CtorParamMap>,
    /// Every parameter can be supplied
    pub resolvable: bool,
}

impl ConstructorMap {
    pub fn parameter_named_mut(
        &mut self,
        space: &TypeSpace,
        name: &str,
    ) -> Option<&mut CtorParamMap> {
        self.parameters
            .iter_mut()
            .find(|param| param.name(space) == Some(name))
    }

    pub fn refresh_resolvable(&mut self) {
        self.resolvable = self.parameters.iter().all(|param| param.resolvable);
    }
}

/// How one constructor parameter is supplied.
#[derive(Debug, Clone)]
pub struct CtorParamMap {
    pub constructor: CtorId,
    pub index: usize,
    /// Path found by matching the parameter name; empty when nothing matched
    pub source_path: MemberPath,
    /// Explicit override; wins over the matched path
    pub override_binding: Option<SourceBinding>,
    /// Fall back to the parameter's default value
    pub use_default: bool,
    pub resolvable: bool,
}

impl CtorParamMap {
    pub fn name<'a>(&self, space: &'a TypeSpace) -> Option<&'a str> {
        space.constructor(self.constructor).parameters[self.index]
            .name
            .as_deref()
    }

    pub fn ty(&self, space: &TypeSpace) -> TypeId {
        space.constructor(self.constructor).parameters[self.index].ty
    }

    /// The value type feeding the parameter, when statically known
    pub fn result_ty(&self, space: &TypeSpace, source: TypeId) -> Option<TypeId> {
        match &self.override_binding {
            Some(binding) => binding.result_ty(space, source),
            None if !self.source_path.is_empty() => Some(self.source_path.leaf_ty(space, source)),
            None => None,
        }
    }
}
