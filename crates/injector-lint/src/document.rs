//! Parsed source file snapshots.

use injector_syntax::ast::{CompilationUnit, FieldDecl, Member, NodePath};
use injector_syntax::{parse_source_recovering, ParseError, SyntaxError};

use crate::edit::{apply_text_edits, CodeFix, FixError};

/// A source file together with its syntax tree.
///
/// Documents are immutable; applying a fix yields a new document.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: String,
    pub source: String,
    /// Tree recovered around `parse_errors`
    pub unit: CompilationUnit,
    pub parse_errors: Vec<ParseError>,
}

/// Location of a field member: the type it is declared in and its index in
/// that type's member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub type_path: NodePath,
    pub member_index: usize,
}

impl Document {
    /// Parse `source` into a document.
    ///
    /// Only lex errors fail. Parse errors are kept in `parse_errors` and the
    /// members they hit are missing from `unit`.
    pub fn parse(path: impl Into<String>, source: impl Into<String>) -> Result<Self, SyntaxError> {
        let source = source.into();
        let (unit, parse_errors) = parse_source_recovering(&source)?;
        Ok(Self {
            path: path.into(),
            source,
            unit,
            parse_errors,
        })
    }

    /// The field declaration whose text contains byte `offset`.
    pub fn find_field_at(&self, offset: usize) -> Option<FieldRef> {
        self.unit.types().into_iter().find_map(|(path, decl)| {
            decl.members.iter().enumerate().find_map(|(index, member)| match member {
                Member::Field(field) if field.span.contains(offset) => Some(FieldRef {
                    type_path: path.clone(),
                    member_index: index,
                }),
                _ => None,
            })
        })
    }

    /// The field addressed by `field`.
    pub fn field(&self, field: &FieldRef) -> Option<&FieldDecl> {
        match self.unit.type_at(&field.type_path)?.members.get(field.member_index)? {
            Member::Field(decl) => Some(decl),
            _ => None,
        }
    }

    /// New document with the text edits of `fix` applied and re-parsed.
    ///
    /// Fails if the new source has more parse errors than this one.
    pub fn apply(&self, fix: &CodeFix) -> Result<Document, FixError> {
        let source = apply_text_edits(&self.source, &fix.text_edits)?;
        let (unit, parse_errors) = parse_source_recovering(&source).map_err(FixError::Reparse)?;
        if parse_errors.len() > self.parse_errors.len() {
            return Err(FixError::Reparse(SyntaxError::Parse(parse_errors)));
        }
        tracing::debug!(
            path = %self.path,
            rule = fix.rule_id,
            edits = fix.text_edits.len(),
            "applied code fix"
        );
        Ok(Document {
            path: self.path.clone(),
            source,
            unit,
            parse_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::TextEdit;
    use crate::rules::injection_analyzer::build_fix;

    #[test]
    fn test_find_field_at() {
        let source = "namespace N { class A { int _a; class B { readonly string _b; } } }";
        let doc = Document::parse("a.cs", source).unwrap();

        let offset = source.find("_b").unwrap();
        let found = doc.find_field_at(offset).unwrap();
        assert_eq!(found.type_path, NodePath::new(vec![0, 0, 1]));
        assert_eq!(found.member_index, 0);
        assert_eq!(doc.field(&found).unwrap().variables[0].name.name, "_b");

        let offset = source.find("_a").unwrap();
        let found = doc.find_field_at(offset).unwrap();
        assert_eq!(found.type_path, NodePath::new(vec![0, 0]));
    }

    #[test]
    fn test_find_field_outside_fields() {
        let source = "class A { int _a; }";
        let doc = Document::parse("a.cs", source).unwrap();
        assert!(doc.find_field_at(0).is_none());
        assert!(doc.find_field_at(source.len()).is_none());
    }

    #[test]
    fn test_parse_keeps_recovered_tree() {
        let doc = Document::parse("bad.cs", "class A { int = ; readonly IFoo _foo; }").unwrap();
        assert_eq!(doc.parse_errors.len(), 1);
        let offset = doc.source.find("_foo").unwrap();
        assert!(doc.find_field_at(offset).is_some());
    }

    #[test]
    fn test_lex_error_fails_parse() {
        assert!(Document::parse("bad.cs", "class A { int ` }").is_err());
    }

    #[test]
    fn test_apply_rejects_new_parse_errors() {
        let doc = Document::parse("a.cs", "class A { readonly IFoo _foo; }").unwrap();
        let field = doc.find_field_at(doc.source.find("_foo").unwrap()).unwrap();
        let mut fix = build_fix(&doc, &field).unwrap();
        fix.text_edits = vec![TextEdit::insert(10, "int = ; ")];
        assert!(matches!(
            doc.apply(&fix),
            Err(FixError::Reparse(SyntaxError::Parse(_)))
        ));
    }

    #[test]
    fn test_apply_keeps_existing_parse_errors() {
        let doc = Document::parse("a.cs", "class A { int = ; readonly IFoo _foo; }").unwrap();
        let field = doc.find_field_at(doc.source.find("_foo").unwrap()).unwrap();
        let fix = build_fix(&doc, &field).unwrap();
        let fixed = doc.apply(&fix).unwrap();
        assert_eq!(fixed.parse_errors.len(), 1);
        assert!(fixed.source.contains("public A(IFoo foo)"));
    }
}
