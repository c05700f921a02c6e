use super::TypeId;

/// Caller-built description of one type.
///
/// Descriptors stand in for runtime reflection: they carry everything the
/// matching, constructor-resolution, and validation engines ever ask about a
/// type. Built once, before any profile is declared, and never mutated after
/// sealing starts.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Uniquely identifies the type within the space
    pub id: TypeId,

    /// Name of the type
    pub name: String,

    /// Distinguishes values, classes, abstract classes, and interfaces
    pub kind: TypeKind,

    /// True when the type has unresolved generic parameters. Such types are
    /// skipped by the validation dry run.
    pub generic: bool,

    /// Base type, if any
    pub base: Option<TypeId>,

    /// Implemented interfaces
    pub interfaces: Vec<TypeId>,

    /// Members in declaration order
    pub members: Vec<MemberDescriptor>,

    /// Constructors in declaration order
    pub constructors: Vec<ConstructorDescriptor>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TypeKind {
    /// Scalar-like value; never constructed by a mapping plan
    Value,
    /// Concrete class; constructed unless configuration says otherwise
    Class,
    /// Abstract class; cannot be constructed
    AbstractClass,
    /// Interface; cannot be constructed
    Interface,
}

/// One member of a type.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// Name of the member
    pub name: String,

    /// Type of the member's value
    pub ty: TypeId,

    /// Distinguishes plain fields from method-style accessors
    pub kind: MemberKind,

    /// True when the member can be read from
    pub readable: bool,

    /// True when the member can be written to
    pub writable: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MemberKind {
    /// Field or property
    Field,
    /// Parameterless accessor method; readable only
    Method,
    /// Extension method declared outside the type; readable only, and
    /// visible only to profiles that opted in
    Extension,
}

#[derive(Debug, Clone)]
pub struct ConstructorDescriptor {
    /// Parameters in declaration order
    pub parameters: Vec<ParameterDescriptor>,
}

#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Parameter name. `None` models parameters with no discoverable name;
    /// a single unnamed parameter disables auto-construction for the type.
    pub name: Option<String>,

    /// Type of the parameter
    pub ty: TypeId,

    /// True when the parameter has a default value
    pub optional: bool,
}

/// Identifies one constructor of one type.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CtorId {
    pub ty: TypeId,
    pub index: usize,
}

impl TypeKind {
    pub fn is_value(self) -> bool {
        matches!(self, TypeKind::Value)
    }

    pub fn is_interface(self) -> bool {
        matches!(self, TypeKind::Interface)
    }

    pub fn is_abstract(self) -> bool {
        matches!(self, TypeKind::AbstractClass | TypeKind::Interface)
    }

    /// Returns true if a mapping plan may construct instances of the type
    pub fn is_constructible(self) -> bool {
        matches!(self, TypeKind::Class)
    }
}

impl MemberKind {
    /// Returns true for method-style members. These are excluded from
    /// reverse-map path derivation and from source-scope validation.
    pub fn is_method(self) -> bool {
        matches!(self, MemberKind::Method | MemberKind::Extension)
    }
}

impl MemberDescriptor {
    pub fn field(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDescriptor {
            name: name.into(),
            ty,
            kind: MemberKind::Field,
            readable: true,
            writable: true,
        }
    }

    pub fn readonly(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDescriptor {
            writable: false,
            ..MemberDescriptor::field(name, ty)
        }
    }

    pub fn method(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDescriptor {
            kind: MemberKind::Method,
            writable: false,
            ..MemberDescriptor::field(name, ty)
        }
    }

    pub fn extension(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDescriptor {
            kind: MemberKind::Extension,
            writable: false,
            ..MemberDescriptor::field(name, ty)
        }
    }
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        ParameterDescriptor {
            name: Some(name.into()),
            ty,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TypeId) -> Self {
        ParameterDescriptor {
            optional: true,
            ..ParameterDescriptor::new(name, ty)
        }
    }

    pub fn unnamed(ty: TypeId) -> Self {
        ParameterDescriptor {
            name: None,
            ty,
            optional: false,
        }
    }
}

impl TypeDescriptor {
    /// Returns the index of the named member declared directly on this type
    pub fn find_member(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|member| member.name == name)
    }
}

impl std::fmt::Debug for CtorId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "CtorId({}, {})", self.ty.0, self.index)
    }
}
