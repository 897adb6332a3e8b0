//! Field eligibility.

use injector_syntax::ast::{FieldDecl, Identifier, TypeRef};

/// View of a field declaration as the analyzer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEntity<'a> {
    /// Name of the first declared variable
    pub name: &'a Identifier,
    pub declared_type: &'a TypeRef,
    pub is_readonly: bool,
    pub is_static: bool,
    pub variable_count: usize,
}

impl<'a> FieldEntity<'a> {
    /// `None` only for a declaration without variables, which the parser
    /// never produces.
    pub fn of(field: &'a FieldDecl) -> Option<Self> {
        let first = field.variables.first()?;
        Some(Self {
            name: &first.name,
            declared_type: &field.ty,
            is_readonly: field.modifiers.is_readonly(),
            is_static: field.modifiers.is_static(),
            variable_count: field.variables.len(),
        })
    }

    /// Readonly instance field declaring exactly one variable.
    pub fn is_eligible(&self) -> bool {
        self.is_readonly && !self.is_static && self.variable_count == 1
    }
}

/// The field as an analysis subject, or `None` when it is static, not
/// readonly, or declares more than one variable.
pub fn classify(field: &FieldDecl) -> Option<FieldEntity<'_>> {
    FieldEntity::of(field).filter(FieldEntity::is_eligible)
}
