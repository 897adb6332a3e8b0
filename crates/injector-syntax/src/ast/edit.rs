//! Single-node replacements over a compilation unit.

use super::*;

/// Replacement of exactly one node by a newly built one.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeEdit {
    /// Replace the whole type declaration at `path`.
    ReplaceType {
        path: NodePath,
        replacement: TypeDecl,
    },
    /// Replace constructor member `member_index` of the type at `type_path`.
    ReplaceConstructor {
        type_path: NodePath,
        member_index: usize,
        replacement: ConstructorDecl,
    },
}

impl NodeEdit {
    /// Path of the type the edit happens in.
    pub fn type_path(&self) -> &NodePath {
        match self {
            NodeEdit::ReplaceType { path, .. } => path,
            NodeEdit::ReplaceConstructor { type_path, .. } => type_path,
        }
    }

    /// An extended constructor has to be laid out again; a new type carries
    /// its own layout.
    pub fn needs_relayout(&self) -> bool {
        matches!(self, NodeEdit::ReplaceConstructor { .. })
    }
}

impl CompilationUnit {
    /// New unit with `edit` applied; `self` is left as it was.
    ///
    /// Returns `None` when the edit does not address a node of the expected
    /// kind in this unit.
    pub fn with_edit(&self, edit: &NodeEdit) -> Option<CompilationUnit> {
        match edit {
            NodeEdit::ReplaceType { path, replacement } => {
                self.replace_type(path, replacement.clone())
            }
            NodeEdit::ReplaceConstructor {
                type_path,
                member_index,
                replacement,
            } => {
                let decl = self.type_at(type_path)?;
                if !matches!(decl.members.get(*member_index), Some(Member::Constructor(_))) {
                    return None;
                }
                self.replace_member(
                    type_path,
                    *member_index,
                    Member::Constructor(replacement.clone()),
                )
            }
        }
    }
}
