//! Tests for node paths and single-node edits

use injector_syntax::ast::*;
use injector_syntax::parse_source;

fn parse(source: &str) -> CompilationUnit {
    match parse_source(source) {
        Ok(unit) => unit,
        Err(err) => panic!("parse failed: {:?}", err.diagnostics()),
    }
}

const NESTED: &str = "namespace App
{
    class Outer
    {
        private readonly int _a;
        class Inner { }
    }
}
class Top
{
    public Top() { }
}";

#[test]
fn test_types_in_preorder_with_paths() {
    let unit = parse(NESTED);
    let found: Vec<String> = unit
        .types()
        .iter()
        .map(|(path, decl)| format!("{} {}", decl.name, path))
        .collect();
    assert_eq!(found, vec!["Outer /0/0", "Inner /0/0/1", "Top /1"]);
}

#[test]
fn test_type_at() {
    let unit = parse(NESTED);
    assert_eq!(unit.type_at(&NodePath::new(vec![0, 0, 1])).unwrap().name.name, "Inner");
    assert_eq!(unit.type_at(&NodePath::new(vec![1])).unwrap().name.name, "Top");

    // Past the end, through a field, and the empty path
    assert!(unit.type_at(&NodePath::new(vec![2])).is_none());
    assert!(unit.type_at(&NodePath::new(vec![0, 0, 0])).is_none());
    assert!(unit.type_at(&NodePath::default()).is_none());
}

#[test]
fn test_replace_type_leaves_original_untouched() {
    let unit = parse(NESTED);
    let path = NodePath::new(vec![0, 0, 1]);
    let mut renamed = unit.type_at(&path).unwrap().clone();
    renamed.name = Identifier::synthetic("Renamed");

    let edit = NodeEdit::ReplaceType {
        path: path.clone(),
        replacement: renamed,
    };
    assert!(!edit.needs_relayout());
    assert_eq!(edit.type_path(), &path);

    let edited = unit.with_edit(&edit).unwrap();
    assert_eq!(edited.type_at(&path).unwrap().name.name, "Renamed");
    assert_eq!(unit.type_at(&path).unwrap().name.name, "Inner");
    assert_eq!(edited.type_at(&NodePath::new(vec![1])), unit.type_at(&NodePath::new(vec![1])));
}

#[test]
fn test_replace_constructor() {
    let unit = parse(NESTED);
    let path = NodePath::new(vec![1]);
    let top = unit.type_at(&path).unwrap();
    let index = top.first_constructor_index().unwrap();
    let mut ctor = top.constructors().next().unwrap().clone();
    ctor.synthesized = true;

    let edit = NodeEdit::ReplaceConstructor {
        type_path: path.clone(),
        member_index: index,
        replacement: ctor,
    };
    assert!(edit.needs_relayout());

    let edited = unit.with_edit(&edit).unwrap();
    assert!(edited.type_at(&path).unwrap().constructors().next().unwrap().synthesized);
    assert!(!unit.type_at(&path).unwrap().constructors().next().unwrap().synthesized);
}

#[test]
fn test_replace_constructor_requires_a_constructor_member() {
    let unit = parse(NESTED);
    let ctor = unit
        .type_at(&NodePath::new(vec![1]))
        .unwrap()
        .constructors()
        .next()
        .unwrap()
        .clone();

    // Member 0 of Outer is a field
    let edit = NodeEdit::ReplaceConstructor {
        type_path: NodePath::new(vec![0, 0]),
        member_index: 0,
        replacement: ctor,
    };
    assert!(unit.with_edit(&edit).is_none());
}
