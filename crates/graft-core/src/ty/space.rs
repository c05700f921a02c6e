use super::{
    ConstructorDescriptor, MemberDescriptor, MemberId, ParameterDescriptor, TypeDescriptor,
    TypeId, TypeKind,
};
use crate::{err, Error, Result};

use indexmap::IndexMap;

/// Append-only registry of type descriptors.
///
/// The space is built on one thread before any mapping configuration is
/// declared, then shared read-only. Every engine operation references types
/// through [`TypeId`] handles into this registry.
#[derive(Debug, Default)]
pub struct TypeSpace {
    types: Vec<TypeDescriptor>,
    by_name: IndexMap<String, TypeId>,
}

impl TypeSpace {
    pub fn new() -> Self {
        TypeSpace::default()
    }

    /// Registers a concrete class type
    pub fn class(&mut self, name: impl Into<String>) -> TypeId {
        self.register(name, TypeKind::Class)
    }

    /// Registers an abstract class type
    pub fn abstract_class(&mut self, name: impl Into<String>) -> TypeId {
        self.register(name, TypeKind::AbstractClass)
    }

    /// Registers an interface type
    pub fn interface(&mut self, name: impl Into<String>) -> TypeId {
        self.register(name, TypeKind::Interface)
    }

    /// Registers a scalar-like value type
    pub fn value(&mut self, name: impl Into<String>) -> TypeId {
        self.register(name, TypeKind::Value)
    }

    pub fn register(&mut self, name: impl Into<String>, kind: TypeKind) -> TypeId {
        let name = name.into();
        assert!(
            !self.by_name.contains_key(&name),
            "duplicate type name `{name}`"
        );

        let id = TypeId(self.types.len());
        self.by_name.insert(name.clone(), id);
        self.types.push(TypeDescriptor {
            id,
            name,
            kind,
            generic: false,
            base: None,
            interfaces: vec![],
            members: vec![],
            constructors: vec![],
        });
        id
    }

    pub fn set_base(&mut self, ty: TypeId, base: TypeId) {
        assert_ne!(ty, base, "type cannot be its own base");
        self.ty_mut(ty).base = Some(base);
    }

    pub fn add_interface(&mut self, ty: TypeId, interface: TypeId) {
        assert!(self.ty(interface).kind.is_interface());
        self.ty_mut(ty).interfaces.push(interface);
    }

    pub fn set_generic(&mut self, ty: TypeId) {
        self.ty_mut(ty).generic = true;
    }

    pub fn add_member(&mut self, ty: TypeId, member: MemberDescriptor) -> MemberId {
        let descriptor = self.ty_mut(ty);
        assert!(
            descriptor.find_member(&member.name).is_none(),
            "duplicate member `{}` on type `{}`",
            member.name,
            descriptor.name
        );

        let index = descriptor.members.len();
        descriptor.members.push(member);
        MemberId { owner: ty, index }
    }

    /// Registers a readable, writable field member
    pub fn add_field(&mut self, ty: TypeId, name: impl Into<String>, value: TypeId) -> MemberId {
        self.add_member(ty, MemberDescriptor::field(name, value))
    }

    /// Registers a readable-only field member
    pub fn add_readonly(&mut self, ty: TypeId, name: impl Into<String>, value: TypeId) -> MemberId {
        self.add_member(ty, MemberDescriptor::readonly(name, value))
    }

    /// Registers a parameterless accessor method as a readable member
    pub fn add_method(&mut self, ty: TypeId, name: impl Into<String>, value: TypeId) -> MemberId {
        self.add_member(ty, MemberDescriptor::method(name, value))
    }

    /// Registers an extension accessor. Extension members are visible only
    /// to profiles that opted in via `include_source_extension`.
    pub fn add_extension(
        &mut self,
        ty: TypeId,
        name: impl Into<String>,
        value: TypeId,
    ) -> MemberId {
        self.add_member(ty, MemberDescriptor::extension(name, value))
    }

    pub fn add_constructor(&mut self, ty: TypeId, parameters: Vec<ParameterDescriptor>) {
        self.ty_mut(ty)
            .constructors
            .push(ConstructorDescriptor { parameters });
    }

    pub fn ty(&self, id: TypeId) -> &TypeDescriptor {
        self.types.get(id.0).expect("invalid type ID")
    }

    fn ty_mut(&mut self, id: TypeId) -> &mut TypeDescriptor {
        self.types.get_mut(id.0).expect("invalid type ID")
    }

    pub fn member(&self, id: MemberId) -> &MemberDescriptor {
        self.ty(id.owner).members.get(id.index).expect("invalid member ID")
    }

    pub fn constructor(&self, id: super::CtorId) -> &ConstructorDescriptor {
        self.ty(id.ty)
            .constructors
            .get(id.index)
            .expect("invalid constructor ID")
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Resolves a type name, erroring when the space has no such type
    pub fn expect_type(&self, name: &str) -> Result<TypeId> {
        self.lookup(name)
            .ok_or_else(|| err!("no type named `{}` in the type space", name))
    }

    /// Resolves a member name against a type's inheritance closure, erroring
    /// when no type in the closure declares it
    pub fn expect_member(&self, ty: TypeId, name: &str) -> Result<MemberId> {
        self.find_member(ty, name)
            .ok_or_else(|| Error::missing_member(&self.ty(ty).name, name))
    }

    /// Finds a member by name on the type, its base chain, or its interfaces
    pub fn find_member(&self, ty: TypeId, name: &str) -> Option<MemberId> {
        self.inheritance_closure(ty).into_iter().find_map(|owner| {
            self.ty(owner)
                .find_member(name)
                .map(|index| MemberId { owner, index })
        })
    }

    /// Returns the type itself, its base chain, then its interfaces, in that
    /// order and deduplicated
    pub fn inheritance_closure(&self, ty: TypeId) -> Vec<TypeId> {
        let mut closure = vec![];
        let mut interfaces = vec![];

        let mut current = Some(ty);
        while let Some(id) = current {
            if closure.contains(&id) {
                break;
            }
            closure.push(id);
            for &interface in &self.ty(id).interfaces {
                if !interfaces.contains(&interface) {
                    interfaces.push(interface);
                }
            }
            current = self.ty(id).base;
        }

        for interface in interfaces {
            if !closure.contains(&interface) {
                closure.push(interface);
            }
        }
        closure
    }

    /// Returns true if `derived` is strictly derived from `base` through its
    /// base chain or implemented interfaces
    pub fn is_derived_from(&self, derived: TypeId, base: TypeId) -> bool {
        derived != base && self.inheritance_closure(derived).contains(&base)
    }

    /// Returns true if a value of type `from` can stand in for `to`
    pub fn is_assignable(&self, to: TypeId, from: TypeId) -> bool {
        to == from || self.is_derived_from(from, to)
    }

    pub fn name(&self, id: TypeId) -> &str {
        &self.ty(id).name
    }
}
