use super::{CtorId, MemberId, MemberKind, TypeId, TypeSpace};

use indexmap::IndexMap;

/// Per-profile view of one type's members.
///
/// Readable members are indexed under their own name and under every alias
/// produced by stripping the profile's recognized prefixes and postfixes, so
/// a member named `GetTotal` also answers to `Total`. Lookups are
/// case-insensitive. Members inherited through the base chain and interfaces
/// are included; a derived declaration shadows a base one with the same name.
#[derive(Debug)]
pub struct TypeDetails {
    members: Vec<MemberId>,
    readable: IndexMap<String, MemberId>,
    writable: IndexMap<String, MemberId>,
    constructors: Vec<CtorId>,
}

impl TypeDetails {
    pub fn build(
        space: &TypeSpace,
        ty: TypeId,
        prefixes: &[String],
        postfixes: &[String],
        extensions: &[MemberId],
    ) -> TypeDetails {
        let mut members = vec![];
        let mut readable = IndexMap::new();
        let mut writable = IndexMap::new();

        for owner in space.inheritance_closure(ty) {
            for (index, member) in space.ty(owner).members.iter().enumerate() {
                let id = MemberId { owner, index };
                if member.kind == MemberKind::Extension && !extensions.contains(&id) {
                    continue;
                }

                let key = member.name.to_lowercase();
                if member.readable && !readable.contains_key(&key) {
                    readable.insert(key.clone(), id);
                    members.push(id);
                }
                if member.writable && !writable.contains_key(&key) {
                    writable.insert(key, id);
                }
            }
        }

        // Aliases resolve after every real name, whichever type declared it
        for &id in &members {
            for alias in possible_names(&space.member(id).name, prefixes, postfixes) {
                readable.entry(alias.to_lowercase()).or_insert(id);
            }
        }

        let constructors = (0..space.ty(ty).constructors.len())
            .map(|index| CtorId { ty, index })
            .collect();

        TypeDetails {
            members,
            readable,
            writable,
            constructors,
        }
    }

    /// Readable members in declaration order, base chain last, one entry per
    /// distinct name
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn readable(&self, name: &str) -> Option<MemberId> {
        self.readable.get(&name.to_lowercase()).copied()
    }

    pub fn writable(&self, name: &str) -> Option<MemberId> {
        self.writable.get(&name.to_lowercase()).copied()
    }

    pub fn writable_members(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.writable.values().copied()
    }

    /// Constructors declared by the type itself; constructors are not
    /// inherited
    pub fn constructors(&self) -> &[CtorId] {
        &self.constructors
    }
}

/// Every alias of `name` with recognized prefixes/postfixes stripped: each
/// prefix alone, each prefix plus postfix, each postfix alone
pub(crate) fn possible_names(name: &str, prefixes: &[String], postfixes: &[String]) -> Vec<String> {
    let mut names = vec![];
    for prefix in prefixes {
        if let Some(stripped) = strip_prefix_ci(name, prefix) {
            names.push(stripped.to_string());
            for postfix in postfixes {
                if let Some(both) = strip_postfix_ci(stripped, postfix) {
                    names.push(both.to_string());
                }
            }
        }
    }
    for postfix in postfixes {
        if let Some(stripped) = strip_postfix_ci(name, postfix) {
            names.push(stripped.to_string());
        }
    }
    names
}

fn strip_prefix_ci<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() || name.len() <= prefix.len() {
        return None;
    }
    name.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))?;
    name.get(prefix.len()..)
}

fn strip_postfix_ci<'a>(name: &'a str, postfix: &str) -> Option<&'a str> {
    if postfix.is_empty() || name.len() <= postfix.len() {
        return None;
    }
    let split = name.len() - postfix.len();
    name.get(split..)
        .filter(|tail| tail.eq_ignore_ascii_case(postfix))?;
    name.get(..split)
}
