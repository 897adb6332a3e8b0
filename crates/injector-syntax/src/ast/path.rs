//! Index paths to type declarations.
//!
//! The tree has no parent pointers. A [`NodePath`] records the member
//! indices taken from the compilation unit down to a type declaration:
//! through namespace bodies first, then through nested type bodies. The
//! enclosing type of a member is therefore the path the member was found
//! under, and the tree can be rebuilt along that path without touching
//! anything else.

use super::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath {
    steps: Vec<usize>,
}

impl NodePath {
    pub fn new(steps: Vec<usize>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Path one level deeper.
    pub fn child(&self, index: usize) -> NodePath {
        let mut steps = self.steps.clone();
        steps.push(index);
        NodePath { steps }
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl CompilationUnit {
    /// Type declaration addressed by `path`.
    pub fn type_at(&self, path: &NodePath) -> Option<&TypeDecl> {
        let (first, rest) = path.steps.split_first()?;
        namespace_member_type(self.members.get(*first)?, rest)
    }

    /// Mutable access to the type declaration addressed by `path`.
    pub fn type_at_mut(&mut self, path: &NodePath) -> Option<&mut TypeDecl> {
        let (first, rest) = path.steps.split_first()?;
        namespace_member_type_mut(self.members.get_mut(*first)?, rest)
    }

    /// Every type declaration with its path, in source pre-order (a type
    /// comes before the types nested in it).
    pub fn types(&self) -> Vec<(NodePath, &TypeDecl)> {
        let mut out = Vec::new();
        collect_namespace_members(&self.members, &NodePath::default(), &mut out);
        out
    }

    /// Copy of this unit with the type at `path` replaced.
    pub fn replace_type(&self, path: &NodePath, replacement: TypeDecl) -> Option<CompilationUnit> {
        let mut unit = self.clone();
        *unit.type_at_mut(path)? = replacement;
        Some(unit)
    }

    /// Copy of this unit with member `index` of the type at `path` replaced.
    pub fn replace_member(
        &self,
        path: &NodePath,
        index: usize,
        replacement: Member,
    ) -> Option<CompilationUnit> {
        let mut unit = self.clone();
        let slot = unit.type_at_mut(path)?.members.get_mut(index)?;
        *slot = replacement;
        Some(unit)
    }
}

fn namespace_member_type<'a>(member: &'a NamespaceMember, rest: &[usize]) -> Option<&'a TypeDecl> {
    match member {
        NamespaceMember::Namespace(ns) => {
            let (next, rest) = rest.split_first()?;
            namespace_member_type(ns.members.get(*next)?, rest)
        }
        NamespaceMember::Type(decl) => nested_type(decl, rest),
    }
}

fn nested_type<'a>(decl: &'a TypeDecl, rest: &[usize]) -> Option<&'a TypeDecl> {
    match rest.split_first() {
        None => Some(decl),
        Some((next, rest)) => match decl.members.get(*next)? {
            Member::Type(inner) => nested_type(inner, rest),
            _ => None,
        },
    }
}

fn namespace_member_type_mut<'a>(
    member: &'a mut NamespaceMember,
    rest: &[usize],
) -> Option<&'a mut TypeDecl> {
    match member {
        NamespaceMember::Namespace(ns) => {
            let (next, rest) = rest.split_first()?;
            namespace_member_type_mut(ns.members.get_mut(*next)?, rest)
        }
        NamespaceMember::Type(decl) => nested_type_mut(decl, rest),
    }
}

fn nested_type_mut<'a>(decl: &'a mut TypeDecl, rest: &[usize]) -> Option<&'a mut TypeDecl> {
    match rest.split_first() {
        None => Some(decl),
        Some((next, rest)) => match decl.members.get_mut(*next)? {
            Member::Type(inner) => nested_type_mut(inner, rest),
            _ => None,
        },
    }
}

fn collect_namespace_members<'a>(
    members: &'a [NamespaceMember],
    base: &NodePath,
    out: &mut Vec<(NodePath, &'a TypeDecl)>,
) {
    for (i, member) in members.iter().enumerate() {
        let path = base.child(i);
        match member {
            NamespaceMember::Namespace(ns) => collect_namespace_members(&ns.members, &path, out),
            NamespaceMember::Type(decl) => collect_type(decl, path, out),
        }
    }
}

fn collect_type<'a>(decl: &'a TypeDecl, path: NodePath, out: &mut Vec<(NodePath, &'a TypeDecl)>) {
    let nested: Vec<(usize, &TypeDecl)> = decl
        .members
        .iter()
        .enumerate()
        .filter_map(|(i, member)| match member {
            Member::Type(inner) => Some((i, inner)),
            _ => None,
        })
        .collect();
    out.push((path.clone(), decl));
    for (i, inner) in nested {
        collect_type(inner, path.child(i), out);
    }
}
