//! The "Inject dependency" fix.
//!
//! The field becomes a constructor parameter: a parameter named after the
//! field without its first character and typed like the field, plus the
//! statement `field = parameter;`. Both go into the first instance
//! constructor of the declaring type, or into a new public constructor when
//! the type has none. The result is a single node replacement.

use injector_syntax::ast::{
    Block, ConstructorDecl, Expression, ExpressionStatement, FunctionBody, Identifier, Member,
    Modifiers, NodeEdit, Parameter, ParameterList, Statement, TypeDecl,
};
use injector_syntax::Span;

use super::classify::classify;
use super::META;
use crate::document::{Document, FieldRef};
use crate::edit::{CodeFix, FixError};
use crate::render;

pub const FIX_TITLE: &str = "Inject dependency";

/// Build the fix for the field at `field`.
pub fn build_fix(document: &Document, field: &FieldRef) -> Result<CodeFix, FixError> {
    let decl = document
        .unit
        .type_at(&field.type_path)
        .ok_or_else(|| FixError::TypeNotFound {
            path: field.type_path.clone(),
        })?;
    if decl.has_unparsed_constructor {
        return Err(FixError::UnparsedConstructor {
            type_name: decl.name.name.clone(),
        });
    }
    let field_decl = document.field(field).ok_or_else(|| FixError::NotAField {
        type_name: decl.name.name.clone(),
        index: field.member_index,
    })?;
    let entity = classify(field_decl).ok_or_else(|| FixError::NotEligible {
        name: field_decl
            .variables
            .first()
            .map(|v| v.name.name.clone())
            .unwrap_or_default(),
    })?;

    let field_name = entity.name.name.clone();
    let param_name = parameter_name(&field_name);
    let parameter = Parameter {
        attributes: Vec::new(),
        modifier: None,
        ty: entity.declared_type.clone(),
        name: Identifier::synthetic(param_name.clone()),
        default_value: None,
        span: Span::SYNTHETIC,
    };
    let statement = Statement::Expression(ExpressionStatement::synthetic(Expression::assign(
        Identifier::synthetic(field_name),
        Identifier::synthetic(param_name),
    )));

    let edit = match decl.first_constructor_index() {
        None => NodeEdit::ReplaceType {
            path: field.type_path.clone(),
            replacement: with_new_constructor(decl, parameter, statement),
        },
        Some(index) => {
            let ctor = match &decl.members[index] {
                Member::Constructor(ctor) => ctor,
                _ => {
                    return Err(FixError::ConstructorNotFound {
                        type_name: decl.name.name.clone(),
                        index,
                    })
                }
            };
            NodeEdit::ReplaceConstructor {
                type_path: field.type_path.clone(),
                member_index: index,
                replacement: extended_constructor(ctor, parameter, statement),
            }
        }
    };

    let text_edits = render::render(document, &edit)?;
    tracing::trace!(
        field = %entity.name,
        path = %field.type_path,
        edits = text_edits.len(),
        "built injection fix"
    );
    Ok(CodeFix {
        title: FIX_TITLE.to_string(),
        rule_id: META.name,
        needs_relayout: edit.needs_relayout(),
        edit,
        text_edits,
    })
}

/// `_navigationService` → `navigationService`. The first character is
/// dropped whatever it is.
pub fn parameter_name(field_name: &str) -> String {
    field_name.chars().skip(1).collect()
}

/// Copy of `decl` with a new public constructor appended.
fn with_new_constructor(decl: &TypeDecl, parameter: Parameter, statement: Statement) -> TypeDecl {
    let ctor = ConstructorDecl {
        attributes: Vec::new(),
        modifiers: Modifiers::public(),
        name: Identifier::synthetic(decl.name.name.clone()),
        params: ParameterList {
            params: vec![parameter],
            span: Span::SYNTHETIC,
        },
        initializer: None,
        body: FunctionBody::Block(Block::synthetic(vec![statement])),
        span: Span::SYNTHETIC,
        synthesized: true,
    };
    let mut replacement = decl.clone();
    replacement.members.push(Member::Constructor(ctor));
    replacement
}

/// Copy of `ctor` with `parameter` after its parameters and `statement`
/// after its statements. An expression body becomes the first statement of
/// the new block body.
fn extended_constructor(ctor: &ConstructorDecl, parameter: Parameter, statement: Statement) -> ConstructorDecl {
    let mut statements = match &ctor.body {
        FunctionBody::Block(block) => block.statements.clone(),
        FunctionBody::Expression { expression, .. } => vec![Statement::Expression(
            ExpressionStatement::synthetic(expression.clone()),
        )],
        FunctionBody::None(_) => Vec::new(),
    };
    statements.push(statement);

    let mut replacement = ctor.clone();
    replacement.params.params.push(parameter);
    replacement.body = FunctionBody::Block(Block::synthetic(statements));
    replacement.span = Span::SYNTHETIC;
    replacement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_name_drops_first_character() {
        assert_eq!(parameter_name("_navigationService"), "navigationService");
        assert_eq!(parameter_name("mLogger"), "Logger");
        assert_eq!(parameter_name("_"), "");
        assert_eq!(parameter_name("ñame"), "ame");
    }

    fn fix_for(source: &str, field: &str) -> (Document, CodeFix) {
        let doc = Document::parse("test.cs", source).unwrap();
        let offset = source.find(field).unwrap();
        let field_ref = doc.find_field_at(offset).unwrap();
        let fix = build_fix(&doc, &field_ref).unwrap();
        (doc, fix)
    }

    #[test]
    fn test_new_constructor_is_appended_to_type() {
        let (_, fix) = fix_for("class A { private readonly IFoo _foo; }", "_foo");
        assert!(!fix.needs_relayout);
        match &fix.edit {
            NodeEdit::ReplaceType { replacement, .. } => {
                assert_eq!(replacement.members.len(), 2);
                match &replacement.members[1] {
                    Member::Constructor(ctor) => {
                        assert!(ctor.synthesized);
                        assert_eq!(ctor.name.name, "A");
                        assert_eq!(ctor.modifiers.to_string(), "public");
                        assert_eq!(ctor.params.params.len(), 1);
                        assert_eq!(ctor.params.params[0].name.name, "foo");
                        assert_eq!(ctor.params.params[0].ty.to_string(), "IFoo");
                        assert_eq!(ctor.statements().len(), 1);
                    }
                    _ => panic!("Expected constructor"),
                }
            }
            _ => panic!("Expected type replacement"),
        }
    }

    #[test]
    fn test_first_constructor_is_extended() {
        let (_, fix) = fix_for(
            "class A { readonly IFoo _foo; public A() { } public A(int x) : this() { } }",
            "_foo",
        );
        assert!(fix.needs_relayout);
        match &fix.edit {
            NodeEdit::ReplaceConstructor {
                member_index,
                replacement,
                ..
            } => {
                assert_eq!(*member_index, 1);
                assert_eq!(replacement.params.params.len(), 1);
                assert!(!replacement.synthesized);
            }
            _ => panic!("Expected constructor replacement"),
        }
    }

    #[test]
    fn test_static_constructor_is_not_extended() {
        let (_, fix) = fix_for("class A { readonly IFoo _foo; static A() { } }", "_foo");
        assert!(matches!(fix.edit, NodeEdit::ReplaceType { .. }));
    }

    #[test]
    fn test_ineligible_field_is_an_error() {
        let source = "class A { static readonly IFoo _foo; }";
        let doc = Document::parse("test.cs", source).unwrap();
        let field_ref = doc.find_field_at(source.find("_foo").unwrap()).unwrap();
        assert!(matches!(
            build_fix(&doc, &field_ref),
            Err(FixError::NotEligible { name }) if name == "_foo"
        ));
    }

    #[test]
    fn test_missing_type_is_an_error() {
        let doc = Document::parse("test.cs", "class A { readonly int _x; }").unwrap();
        let field_ref = FieldRef {
            type_path: injector_syntax::ast::NodePath::new(vec![4]),
            member_index: 0,
        };
        assert!(matches!(build_fix(&doc, &field_ref), Err(FixError::TypeNotFound { .. })));
    }
}
