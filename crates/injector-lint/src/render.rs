//! Rendering node replacements as text edits.
//!
//! A [`NodeEdit`] says which node is replaced by what; this module works out
//! the smallest text splices that turn the document's source into the
//! replacement, so everything outside the new code (comments, blank lines,
//! formatting) stays as it was. New code follows the document's layout: the
//! indentation of surrounding members and statements, its indent unit and
//! its line ending.

use injector_syntax::ast::{Block, ConstructorDecl, FunctionBody, Member, NodeEdit, Statement, TypeDecl};
use injector_syntax::{PrintOptions, Printer};

use crate::document::Document;
use crate::edit::{FixError, TextEdit};

const DEFAULT_INDENT_UNIT: &str = "    ";

/// Text edits that realize `edit` on `document`.
pub fn render(document: &Document, edit: &NodeEdit) -> Result<Vec<TextEdit>, FixError> {
    let source = document.source.as_str();
    let decl = document
        .unit
        .type_at(edit.type_path())
        .ok_or_else(|| FixError::TypeNotFound {
            path: edit.type_path().clone(),
        })?;
    let layout = Layout::of_type(source, decl);
    let printer = Printer::new(
        PrintOptions::default()
            .detect_newline(source)
            .with_indent_unit(layout.indent_unit.clone()),
    )
    .with_source(source);

    match edit {
        NodeEdit::ReplaceType { replacement, .. } => {
            let ctor = match replacement.members.last() {
                Some(Member::Constructor(ctor)) if replacement.members.len() > decl.members.len() => ctor,
                _ => {
                    return Err(FixError::ConstructorNotFound {
                        type_name: decl.name.name.clone(),
                        index: replacement.members.len().saturating_sub(1),
                    })
                }
            };
            Ok(vec![append_constructor(source, decl, &layout, &printer, ctor)])
        }
        NodeEdit::ReplaceConstructor {
            member_index,
            replacement,
            ..
        } => {
            let original = match decl.members.get(*member_index) {
                Some(Member::Constructor(ctor)) => ctor,
                _ => {
                    return Err(FixError::ConstructorNotFound {
                        type_name: decl.name.name.clone(),
                        index: *member_index,
                    })
                }
            };
            Ok(extend_constructor(
                source,
                &printer,
                original,
                replacement,
                edit.needs_relayout(),
            ))
        }
    }
}

/// Indentation observed around a type declaration.
struct Layout {
    /// Indentation of the line the type starts on
    type_indent: String,
    /// Indentation of the type's members
    member_indent: String,
    indent_unit: String,
}

impl Layout {
    fn of_type(source: &str, decl: &TypeDecl) -> Self {
        let type_indent = line_indent(source, decl.span.start).to_string();
        let member_indent = decl
            .members
            .iter()
            .map(|member| member.span().start)
            .find(|&start| starts_line(source, start))
            .map(|start| line_indent(source, start).to_string());

        match member_indent {
            Some(member_indent) => {
                let indent_unit = member_indent
                    .strip_prefix(type_indent.as_str())
                    .filter(|unit| !unit.is_empty())
                    .unwrap_or(DEFAULT_INDENT_UNIT)
                    .to_string();
                Self {
                    type_indent,
                    member_indent,
                    indent_unit,
                }
            }
            None => Self {
                member_indent: format!("{type_indent}{DEFAULT_INDENT_UNIT}"),
                type_indent,
                indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            },
        }
    }
}

/// Insert `ctor` after the last member of `decl`, separated by a blank line.
fn append_constructor(
    source: &str,
    decl: &TypeDecl,
    layout: &Layout,
    printer: &Printer<'_>,
    ctor: &ConstructorDecl,
) -> TextEdit {
    let nl = printer.options().newline.as_str();
    let anchor = decl
        .members
        .last()
        .map(|member| member.span().end)
        .unwrap_or(decl.open_brace.end);

    let mut text = String::from(nl);
    if !decl.members.is_empty() {
        text.push_str(nl);
    }
    text.push_str(&layout.member_indent);
    text.push_str(&printer.constructor(ctor, &layout.member_indent));

    // `}` on the same line as the last member moves to a line of its own.
    let gap = &source[anchor..decl.close_brace.start];
    if gap.contains('\n') {
        return TextEdit::insert(anchor, text);
    }
    text.push_str(nl);
    text.push_str(&layout.type_indent);
    if gap.trim().is_empty() {
        TextEdit::replace(anchor..decl.close_brace.start, text)
    } else {
        TextEdit::insert(anchor, text)
    }
}

/// Splice the parameters and statements `replacement` adds to `original`.
fn extend_constructor(
    source: &str,
    printer: &Printer<'_>,
    original: &ConstructorDecl,
    replacement: &ConstructorDecl,
    relayout_allowed: bool,
) -> Vec<TextEdit> {
    let mut edits = Vec::new();

    let existing_params = &original.params.params;
    let added_params = replacement.params.params.get(existing_params.len()..).unwrap_or(&[]);
    if !added_params.is_empty() {
        let printed: Vec<String> = added_params.iter().map(|p| printer.parameter(p)).collect();
        let printed = printed.join(", ");
        edits.push(match existing_params.last() {
            Some(last) => TextEdit::insert(last.span.end, format!(", {printed}")),
            None => TextEdit::insert(original.params.span.end.saturating_sub(1), printed),
        });
    }

    // An expression body is carried over as the first statement.
    let carried = match &original.body {
        FunctionBody::Block(block) => block.statements.len(),
        FunctionBody::Expression { .. } => 1,
        FunctionBody::None(_) => 0,
    };
    let added = replacement.statements().get(carried..).unwrap_or(&[]);
    if added.is_empty() {
        return edits;
    }
    match &original.body {
        FunctionBody::Block(block) if spans_lines(source, block) => {
            edits.push(insert_into_block(source, printer, block, added));
        }
        _ if relayout_allowed => edits.push(relayout_body(source, printer, original, added)),
        _ => {}
    }
    edits
}

/// True when the block's braces are on different lines.
fn spans_lines(source: &str, block: &Block) -> bool {
    source
        .get(block.span.start..block.span.end)
        .is_some_and(|text| text.contains('\n'))
}

/// Insert `added` into a multi-line block without touching its text: after
/// the last statement and any comment closing that statement's line, or on
/// a line of their own before `}` when there are no statements.
fn insert_into_block(source: &str, printer: &Printer<'_>, block: &Block, added: &[Statement]) -> TextEdit {
    let nl = printer.options().newline.as_str();
    let open = block.span.start;
    let close = block.span.end.saturating_sub(1);
    let brace_indent = line_indent(source, open);
    let indent = block
        .statements
        .last()
        .map(|stmt| stmt.span().start)
        .filter(|&start| starts_line(source, start))
        .map(|start| line_indent(source, start).to_string())
        .or_else(|| content_indent(source, open + 1, close))
        .unwrap_or_else(|| format!("{brace_indent}{}", printer.options().indent_unit));
    let printed: Vec<String> = added.iter().map(|stmt| printer.statement(stmt, &indent)).collect();

    if !starts_line(source, close) {
        // `}` shares a line with the last statement and moves below the
        // new ones.
        let anchor = source[..close].trim_end_matches([' ', '\t']).len();
        let mut text = String::new();
        for stmt in &printed {
            text.push_str(nl);
            text.push_str(&indent);
            text.push_str(stmt);
        }
        text.push_str(nl);
        text.push_str(brace_indent);
        return TextEdit::replace(anchor..close, text);
    }

    match block.statements.last() {
        Some(last) => {
            let mut text = String::new();
            for stmt in &printed {
                text.push_str(nl);
                text.push_str(&indent);
                text.push_str(stmt);
            }
            TextEdit::insert(statement_end(source, last.span().end), text)
        }
        None => {
            let mut text = String::new();
            for stmt in &printed {
                text.push_str(&indent);
                text.push_str(stmt);
                text.push_str(nl);
            }
            TextEdit::insert(line_start(source, close), text)
        }
    }
}

/// Lay out an empty or single-line block, an expression body or `;` as a
/// full block. The old body's inner text stays as the block's first line.
fn relayout_body(
    source: &str,
    printer: &Printer<'_>,
    original: &ConstructorDecl,
    added: &[Statement],
) -> TextEdit {
    let nl = printer.options().newline.as_str();
    let ctor_indent = line_indent(source, original.span.start);
    let inner = format!("{ctor_indent}{}", printer.options().indent_unit);
    let header_end = original
        .initializer
        .as_ref()
        .map(|init| init.span.end)
        .unwrap_or(original.params.span.end);
    let body = original.body.span();

    let kept = match &original.body {
        FunctionBody::Block(_) => source
            .get(body.start + 1..body.end.saturating_sub(1))
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        FunctionBody::Expression { .. } => source
            .get(body.start + 2..body.end.saturating_sub(1))
            .map(|text| format!("{};", text.trim()))
            .unwrap_or_default(),
        FunctionBody::None(_) => String::new(),
    };

    // Comments between the header and the body stay where they are.
    let mut text = source
        .get(header_end..body.start)
        .map(str::trim_end)
        .unwrap_or_default()
        .to_string();
    text.push_str(nl);
    text.push_str(ctor_indent);
    text.push('{');
    text.push_str(nl);
    if !kept.is_empty() {
        text.push_str(&inner);
        text.push_str(&kept);
        text.push_str(nl);
    }
    for stmt in added {
        text.push_str(&inner);
        text.push_str(&printer.statement(stmt, &inner));
        text.push_str(nl);
    }
    text.push_str(ctor_indent);
    text.push('}');
    TextEdit::replace(header_end..body.end, text)
}

/// End of the statement ending at `end`, extended over comments that close
/// its line, so `Init(); // after init` keeps its comment.
fn statement_end(source: &str, end: usize) -> usize {
    let line_end = source[end..].find('\n').map_or(source.len(), |i| end + i);
    let rest = &source[end..line_end];
    // A block comment that runs onto the next line
    let opens_comment = match (rest.find("//"), rest.rfind("/*")) {
        (Some(line), Some(block)) if line < block => false,
        (_, Some(block)) => !rest[block + 2..].contains("*/"),
        _ => false,
    };
    if opens_comment {
        end
    } else {
        end + rest.trim_end().len()
    }
}

/// Indentation of the first non-blank line after the one `start` is on,
/// up to `end`.
fn content_indent(source: &str, start: usize, end: usize) -> Option<String> {
    source
        .get(start..end)?
        .split('\n')
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            let len = line.len() - line.trim_start_matches([' ', '\t']).len();
            line[..len].to_string()
        })
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Leading spaces and tabs of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> &str {
    let start = line_start(source, offset);
    let rest = &source[start..];
    let len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    &rest[..len]
}

/// True when only whitespace precedes `offset` on its line.
fn starts_line(source: &str, offset: usize) -> bool {
    source[line_start(source, offset)..offset].trim().is_empty()
}
