use crate::naming::NamingConvention;
use crate::profile::Profile;
use crate::ty::{possible_names, MemberId, MemberPath, TypeId, TypeSpace};

use log::trace;

/// Resolves a destination member name to a chain of source members.
///
/// The search runs in a fixed order: whole-name lookup (with prefix,
/// postfix, and replacement candidates), then split matching, which walks
/// candidate word boundaries and recurses into the matched member's value
/// type. The first complete chain wins.
pub struct MemberSearch<'a> {
    profile: &'a Profile,
    space: &'a TypeSpace,
    reverse: bool,
}

impl<'a> MemberSearch<'a> {
    pub fn new(profile: &'a Profile, space: &'a TypeSpace, reverse: bool) -> MemberSearch<'a> {
        MemberSearch {
            profile,
            space,
            reverse,
        }
    }

    pub fn find(&self, source: TypeId, name: &str) -> Option<MemberPath> {
        let mut path = MemberPath::new();
        if self.is_match(&mut path, source, name) {
            trace!(
                "matched `{}` on `{}` as `{}`",
                name,
                self.space.name(source),
                path.describe(self.space)
            );
            Some(path)
        } else {
            None
        }
    }

    /// An empty name matches with nothing appended; it signals a completed
    /// nested chain.
    fn is_match(&self, path: &mut MemberPath, source: TypeId, name: &str) -> bool {
        if name.is_empty() {
            return true;
        }
        if let Some(member) = self.direct(source, name) {
            path.push(member);
            return true;
        }
        self.split_match(path, source, name)
    }

    /// Whole-name resolution: the name itself, then prefix/postfix-stripped
    /// candidates, then name-replacement candidates
    fn direct(&self, source: TypeId, name: &str) -> Option<MemberId> {
        let details = self.profile.details(self.space, source);
        if let Some(member) = details.readable(name) {
            return Some(member);
        }

        let stripped = possible_names(
            name,
            &self.profile.recognized_prefixes,
            &self.profile.recognized_postfixes,
        );
        for candidate in stripped {
            if let Some(member) = details.readable(&candidate) {
                return Some(member);
            }
        }

        for candidate in self.replacement_candidates(name) {
            if let Some(member) = details.readable(&candidate) {
                return Some(member);
            }
        }
        None
    }

    /// Each replacement applied alone, then all replacements applied
    /// together
    fn replacement_candidates(&self, name: &str) -> Vec<String> {
        let replacements = &self.profile.member_name_replacements;
        if replacements.is_empty() {
            return vec![];
        }

        let mut candidates = vec![];
        let mut all = name.to_string();
        for (original, replacement) in replacements {
            candidates.push(name.replace(original.as_str(), replacement));
            all = all.replace(original.as_str(), replacement);
        }
        if !candidates.contains(&all) {
            candidates.push(all);
        }
        candidates.retain(|candidate| candidate != name);
        candidates
    }

    fn split_match(&self, path: &mut MemberPath, source: TypeId, name: &str) -> bool {
        let (search, join) = self.conventions();
        if search.is_default() && join.is_default() {
            self.default_split(path, source, name)
        } else {
            self.convention_split(path, source, name, search, join)
        }
    }

    /// Conventions seen from the searched side: the convention the searched
    /// name is written in, and the convention source candidates are joined
    /// with. Reverse maps swap the two roles.
    fn conventions(&self) -> (NamingConvention, NamingConvention) {
        if self.reverse {
            (
                self.profile.source_member_naming,
                self.profile.destination_member_naming,
            )
        } else {
            (
                self.profile.destination_member_naming,
                self.profile.source_member_naming,
            )
        }
    }

    /// Split at each uppercase letter of the raw name: resolve the left
    /// side directly, recurse the full search on the right side against the
    /// matched member's type, backtrack on failure
    fn default_split(&self, path: &mut MemberPath, source: TypeId, name: &str) -> bool {
        for (i, c) in name.char_indices().skip(1) {
            if !c.is_uppercase() {
                continue;
            }
            if let Some(member) = self.direct(source, &name[..i]) {
                path.push(member);
                if self.is_match(path, self.space.member(member).ty, &name[i..]) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// Tokenize with the searched side's convention and re-join candidate
    /// prefixes with the source side's convention. The split point may sit
    /// past the last token; the empty right side then matches trivially, so
    /// a whole-name cross-convention spelling resolves here.
    fn convention_split(
        &self,
        path: &mut MemberPath,
        source: TypeId,
        name: &str,
        search: NamingConvention,
        join: NamingConvention,
    ) -> bool {
        let tokens = search.split(name);
        if tokens.len() < 2 {
            // single-token names were already tried whole
            return false;
        }

        for i in 1..=tokens.len() {
            let left = join.join(&tokens[..i]);
            if let Some(member) = self.direct(source, &left) {
                path.push(member);
                let rest = search.join(&tokens[i..]);
                if self.is_match(path, self.space.member(member).ty, &rest) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }
}
