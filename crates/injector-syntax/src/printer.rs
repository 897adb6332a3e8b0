//! Source printer
//!
//! Renders AST nodes back to C# text. Nodes that came from the parser are
//! copied verbatim from the source they were parsed from (when the printer
//! has it), so comments and formatting inside them survive. Synthesized
//! nodes, whose spans are [`Span::SYNTHETIC`], are printed structurally in
//! Allman style using the configured indent unit and line ending.

use crate::ast::*;
use crate::token::Span;

/// Layout settings for printed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// One level of indentation
    pub indent_unit: String,
    /// Line terminator
    pub newline: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            newline: "\n".to_string(),
        }
    }
}

impl PrintOptions {
    /// Infer the line ending from `source`: `\r\n` if it appears anywhere.
    pub fn detect_newline(mut self, source: &str) -> Self {
        self.newline = if source.contains("\r\n") { "\r\n" } else { "\n" }.to_string();
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }
}

/// Printer for AST nodes.
///
/// Every `indent` argument is the indentation of the line the node starts
/// on; the returned text does not include it for the first line.
pub struct Printer<'src> {
    options: PrintOptions,
    source: Option<&'src str>,
}

impl<'src> Printer<'src> {
    pub fn new(options: PrintOptions) -> Self {
        Self {
            options,
            source: None,
        }
    }

    /// Print parsed nodes by copying their text out of `source`.
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    fn verbatim(&self, span: &Span) -> Option<&'src str> {
        let source = self.source?;
        if span.is_synthetic() || span.end > source.len() {
            return None;
        }
        source.get(span.start..span.end)
    }

    fn nested(&self, indent: &str) -> String {
        format!("{indent}{}", self.options.indent_unit)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Print a constructor: header line, then its body as a block on the
    /// following lines.
    pub fn constructor(&self, ctor: &ConstructorDecl, indent: &str) -> String {
        if let Some(text) = self.verbatim(&ctor.span) {
            return text.to_string();
        }
        let mut out = self.constructor_header(ctor);
        out.push_str(&self.options.newline);
        out.push_str(indent);
        out.push_str(&self.block(ctor.statements(), indent));
        out
    }

    /// `public Name(params) : base(args)`
    pub fn constructor_header(&self, ctor: &ConstructorDecl) -> String {
        let mut out = String::new();
        for list in &ctor.attributes {
            out.push_str(&self.attribute_list(list));
            out.push(' ');
        }
        if !ctor.modifiers.is_empty() {
            out.push_str(&ctor.modifiers.to_string());
            out.push(' ');
        }
        out.push_str(&ctor.name.name);
        out.push_str(&self.parameter_list(&ctor.params.params));
        if let Some(init) = &ctor.initializer {
            out.push_str(" : ");
            out.push_str(&self.constructor_initializer(init));
        }
        out
    }

    fn constructor_initializer(&self, init: &ConstructorInitializer) -> String {
        if let Some(text) = self.verbatim(&init.span) {
            return text.to_string();
        }
        let keyword = match init.kind {
            ConstructorInitializerKind::Base => "base",
            ConstructorInitializerKind::This => "this",
        };
        format!("{keyword}({})", self.arguments(&init.args))
    }

    fn attribute_list(&self, list: &AttributeList) -> String {
        if let Some(text) = self.verbatim(&list.span) {
            return text.to_string();
        }
        let attrs: Vec<String> = list
            .attributes
            .iter()
            .map(|attr| {
                if attr.args.is_empty() {
                    attr.name.to_string()
                } else {
                    format!("{}({})", attr.name, self.arguments(&attr.args))
                }
            })
            .collect();
        format!("[{}]", attrs.join(", "))
    }

    /// `(Type a, Type b)`
    pub fn parameter_list(&self, params: &[Parameter]) -> String {
        let params: Vec<String> = params.iter().map(|p| self.parameter(p)).collect();
        format!("({})", params.join(", "))
    }

    pub fn parameter(&self, param: &Parameter) -> String {
        if let Some(text) = self.verbatim(&param.span) {
            return text.to_string();
        }
        let mut out = String::new();
        for list in &param.attributes {
            out.push_str(&self.attribute_list(list));
            out.push(' ');
        }
        if let Some(modifier) = param.modifier {
            out.push_str(modifier.keyword());
            out.push(' ');
        }
        out.push_str(&self.type_ref(&param.ty));
        out.push(' ');
        out.push_str(&param.name.name);
        if let Some(default) = &param.default_value {
            out.push_str(" = ");
            out.push_str(&self.expression(default));
        }
        out
    }

    /// A type as written in source when it was parsed, so spacing and
    /// qualifiers survive; structurally otherwise.
    pub fn type_ref(&self, ty: &TypeRef) -> String {
        match self.verbatim(&ty.span) {
            Some(text) => text.to_string(),
            None => ty.to_string(),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Print `{`, one statement per line one level deeper, and `}` at
    /// `indent`.
    pub fn block(&self, statements: &[Statement], indent: &str) -> String {
        let nl = &self.options.newline;
        let inner = self.nested(indent);
        let mut out = String::from("{");
        out.push_str(nl);
        for stmt in statements {
            out.push_str(&inner);
            out.push_str(&self.statement(stmt, &inner));
            out.push_str(nl);
        }
        out.push_str(indent);
        out.push('}');
        out
    }

    pub fn statement(&self, stmt: &Statement, indent: &str) -> String {
        if let Some(text) = self.verbatim(stmt.span()) {
            return text.to_string();
        }
        let nl = &self.options.newline;

        match stmt {
            Statement::Block(block) => self.block(&block.statements, indent),
            Statement::LocalDecl(decl) => format!("{};", self.local_decl(decl)),
            Statement::Expression(stmt) => format!("{};", self.expression(&stmt.expression)),
            Statement::If(stmt) => {
                let mut out = format!(
                    "if ({}){nl}{indent}{}",
                    self.expression(&stmt.condition),
                    self.embedded(&stmt.then_branch, indent)
                );
                if let Some(else_branch) = &stmt.else_branch {
                    out.push_str(nl);
                    out.push_str(indent);
                    out.push_str("else");
                    if let Statement::If(_) = else_branch.as_ref() {
                        out.push(' ');
                        out.push_str(&self.statement(else_branch, indent));
                    } else {
                        out.push_str(nl);
                        out.push_str(indent);
                        out.push_str(&self.embedded(else_branch, indent));
                    }
                }
                out
            }
            Statement::Switch(stmt) => {
                let section_indent = self.nested(indent);
                let body_indent = self.nested(&section_indent);
                let mut out = format!("switch ({}){nl}{indent}{{{nl}", self.expression(&stmt.value));
                for section in &stmt.sections {
                    for label in &section.labels {
                        out.push_str(&section_indent);
                        match label {
                            SwitchLabel::Case(value) => {
                                out.push_str(&format!("case {}:", self.expression(value)))
                            }
                            SwitchLabel::Default(_) => out.push_str("default:"),
                        }
                        out.push_str(nl);
                    }
                    for stmt in &section.statements {
                        out.push_str(&body_indent);
                        out.push_str(&self.statement(stmt, &body_indent));
                        out.push_str(nl);
                    }
                }
                out.push_str(indent);
                out.push('}');
                out
            }
            Statement::While(stmt) => format!(
                "while ({}){nl}{indent}{}",
                self.expression(&stmt.condition),
                self.embedded(&stmt.body, indent)
            ),
            Statement::DoWhile(stmt) => format!(
                "do{nl}{indent}{}{nl}{indent}while ({});",
                self.embedded(&stmt.body, indent),
                self.expression(&stmt.condition)
            ),
            Statement::For(stmt) => {
                let init = match &stmt.init {
                    Some(ForInit::Declaration(decl)) => self.local_decl(decl),
                    Some(ForInit::Expressions(exprs)) => self.expression_list(exprs),
                    None => String::new(),
                };
                let condition = stmt
                    .condition
                    .as_ref()
                    .map(|c| format!(" {}", self.expression(c)))
                    .unwrap_or_default();
                let update = if stmt.update.is_empty() {
                    String::new()
                } else {
                    format!(" {}", self.expression_list(&stmt.update))
                };
                format!(
                    "for ({init};{condition};{update}){nl}{indent}{}",
                    self.embedded(&stmt.body, indent)
                )
            }
            Statement::Foreach(stmt) => format!(
                "foreach ({} {} in {}){nl}{indent}{}",
                stmt.ty,
                stmt.variable.name,
                self.expression(&stmt.iterable),
                self.embedded(&stmt.body, indent)
            ),
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => format!("return {};", self.expression(value)),
                None => "return;".to_string(),
            },
            Statement::Throw(stmt) => match &stmt.value {
                Some(value) => format!("throw {};", self.expression(value)),
                None => "throw;".to_string(),
            },
            Statement::Try(stmt) => {
                let mut out = format!("try{nl}{indent}{}", self.block(&stmt.body.statements, indent));
                for catch in &stmt.catches {
                    out.push_str(nl);
                    out.push_str(indent);
                    out.push_str("catch");
                    if let Some(ty) = &catch.ty {
                        match &catch.variable {
                            Some(var) => out.push_str(&format!(" ({ty} {})", var.name)),
                            None => out.push_str(&format!(" ({ty})")),
                        }
                    }
                    if let Some(filter) = &catch.filter {
                        out.push_str(&format!(" when ({})", self.expression(filter)));
                    }
                    out.push_str(nl);
                    out.push_str(indent);
                    out.push_str(&self.block(&catch.body.statements, indent));
                }
                if let Some(finally) = &stmt.finally {
                    out.push_str(&format!(
                        "{nl}{indent}finally{nl}{indent}{}",
                        self.block(&finally.statements, indent)
                    ));
                }
                out
            }
            Statement::Using(stmt) => {
                let resource = match &stmt.resource {
                    UsingResource::Declaration(decl) => self.local_decl(decl),
                    UsingResource::Expression(expr) => self.expression(expr),
                };
                match &stmt.body {
                    Some(body) => format!(
                        "using ({resource}){nl}{indent}{}",
                        self.embedded(body, indent)
                    ),
                    None => format!("using {resource};"),
                }
            }
            Statement::Lock(stmt) => format!(
                "lock ({}){nl}{indent}{}",
                self.expression(&stmt.target),
                self.embedded(&stmt.body, indent)
            ),
            Statement::Break(_) => "break;".to_string(),
            Statement::Continue(_) => "continue;".to_string(),
            Statement::Empty(_) => ";".to_string(),
        }
    }

    /// Body of a control statement: blocks stay at `indent`, anything else
    /// is wrapped in a block.
    fn embedded(&self, stmt: &Statement, indent: &str) -> String {
        match stmt {
            Statement::Block(block) if self.verbatim(&block.span).is_none() => {
                self.block(&block.statements, indent)
            }
            Statement::Block(_) => self.statement(stmt, indent),
            other => self.block(std::slice::from_ref(other), indent),
        }
    }

    fn local_decl(&self, decl: &LocalDecl) -> String {
        let variables: Vec<String> = decl
            .variables
            .iter()
            .map(|var| match &var.initializer {
                Some(init) => format!("{} = {}", var.name.name, self.expression(init)),
                None => var.name.name.clone(),
            })
            .collect();
        let prefix = if decl.is_const { "const " } else { "" };
        format!("{prefix}{} {}", decl.ty, variables.join(", "))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn expression(&self, expr: &Expression) -> String {
        if let Some(text) = self.verbatim(expr.span()) {
            return text.to_string();
        }

        match expr {
            Expression::Identifier(id) => id.name.clone(),
            Expression::GenericName(generic) => {
                format!("{}{}", generic.name.name, type_args(&generic.type_args))
            }
            Expression::Literal(lit) => lit.raw.clone(),
            Expression::This(_) => "this".to_string(),
            Expression::Base(_) => "base".to_string(),
            Expression::Member(member) => format!(
                "{}{}{}{}",
                self.expression(&member.object),
                if member.conditional { "?." } else { "." },
                member.name.name,
                type_args(&member.type_args)
            ),
            Expression::Invocation(call) => format!(
                "{}({})",
                self.expression(&call.callee),
                self.arguments(&call.args)
            ),
            Expression::ElementAccess(access) => format!(
                "{}{}[{}]",
                self.expression(&access.object),
                if access.conditional { "?" } else { "" },
                self.arguments(&access.args)
            ),
            Expression::ObjectCreation(creation) => self.object_creation(creation),
            Expression::Assignment(assign) => format!(
                "{} {} {}",
                self.expression(&assign.left),
                assign.operator.symbol(),
                self.expression(&assign.right)
            ),
            Expression::Binary(binary) => format!(
                "{} {} {}",
                self.expression(&binary.left),
                binary.operator.symbol(),
                self.expression(&binary.right)
            ),
            Expression::Unary(unary) => {
                let operand = self.expression(&unary.operand);
                match unary.operator {
                    UnaryOperator::Plus => format!("+{operand}"),
                    UnaryOperator::Minus => format!("-{operand}"),
                    UnaryOperator::Not => format!("!{operand}"),
                    UnaryOperator::BitwiseNot => format!("~{operand}"),
                    UnaryOperator::PreIncrement => format!("++{operand}"),
                    UnaryOperator::PreDecrement => format!("--{operand}"),
                    UnaryOperator::Await => format!("await {operand}"),
                    UnaryOperator::Cast => match &unary.cast_type {
                        Some(ty) => format!("({ty}){operand}"),
                        None => operand,
                    },
                }
            }
            Expression::Postfix(postfix) => {
                let operand = self.expression(&postfix.operand);
                match postfix.operator {
                    PostfixOperator::Increment => format!("{operand}++"),
                    PostfixOperator::Decrement => format!("{operand}--"),
                    PostfixOperator::NullForgiving => format!("{operand}!"),
                }
            }
            Expression::Conditional(cond) => format!(
                "{} ? {} : {}",
                self.expression(&cond.condition),
                self.expression(&cond.then_expr),
                self.expression(&cond.else_expr)
            ),
            Expression::Lambda(lambda) => self.lambda(lambda),
            Expression::Paren(paren) => format!("({})", self.expression(&paren.expression)),
            Expression::Throw(throw) => format!("throw {}", self.expression(&throw.value)),
            Expression::TypeTest(test) => {
                let keyword = match test.kind {
                    TypeTestKind::Is => "is",
                    TypeTestKind::As => "as",
                };
                let mut out = format!("{} {keyword} {}", self.expression(&test.operand), test.ty);
                if let Some(binding) = &test.binding {
                    out.push(' ');
                    out.push_str(&binding.name);
                }
                out
            }
            Expression::TypeOperator(op) => format!("{}({})", op.kind.keyword(), op.ty),
            Expression::InitializerList(list) => self.initializer_list(list),
        }
    }

    fn object_creation(&self, creation: &ObjectCreationExpression) -> String {
        let args = self.arguments(&creation.args);
        let mut out = match (&creation.ty, creation.is_array) {
            (Some(ty), true) if !creation.args.is_empty() => format!("new {ty}[{args}]"),
            (Some(ty), true) => format!("new {ty}"),
            (Some(ty), false) => format!("new {ty}({args})"),
            (None, true) => "new[]".to_string(),
            // Anonymous object: `new { A = 1 }`
            (None, false) if creation.initializer.is_some() => "new".to_string(),
            (None, false) => format!("new({args})"),
        };
        if let Some(init) = &creation.initializer {
            out.push(' ');
            out.push_str(&self.initializer_list(init));
        }
        out
    }

    fn initializer_list(&self, list: &InitializerList) -> String {
        if list.elements.is_empty() {
            return "{ }".to_string();
        }
        format!("{{ {} }}", self.expression_list(&list.elements))
    }

    fn lambda(&self, lambda: &LambdaExpression) -> String {
        let params: Vec<String> = lambda
            .params
            .iter()
            .map(|p| match &p.ty {
                Some(ty) => format!("{ty} {}", p.name.name),
                None => p.name.name.clone(),
            })
            .collect();
        let params = match (lambda.params.as_slice(), params.as_slice()) {
            ([single], [text]) if single.ty.is_none() => text.clone(),
            _ => format!("({})", params.join(", ")),
        };
        let body = match &lambda.body {
            LambdaBody::Expression(expr) => self.expression(expr),
            LambdaBody::Block(block) => self.block(&block.statements, ""),
        };
        let prefix = if lambda.is_async { "async " } else { "" };
        format!("{prefix}{params} => {body}")
    }

    fn arguments(&self, args: &[Argument]) -> String {
        let args: Vec<String> = args
            .iter()
            .map(|arg| {
                if let Some(text) = self.verbatim(&arg.span) {
                    return text.to_string();
                }
                let mut out = String::new();
                if let Some(name) = &arg.name {
                    out.push_str(&name.name);
                    out.push_str(": ");
                }
                if let Some(modifier) = arg.modifier {
                    out.push_str(modifier.keyword());
                    out.push(' ');
                }
                out.push_str(&self.expression(&arg.value));
                out
            })
            .collect();
        args.join(", ")
    }

    fn expression_list(&self, exprs: &[Expression]) -> String {
        let exprs: Vec<String> = exprs.iter().map(|e| self.expression(e)).collect();
        exprs.join(", ")
    }
}

fn type_args(args: &[TypeRef]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    format!("<{}>", args.join(", "))
}
