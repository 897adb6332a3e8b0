//! AST visitor for traversing the syntax tree
//!
//! Each `visit_*` method has a default implementation that calls the
//! matching `walk_*` function, so an implementation only overrides the
//! nodes it cares about and calls the walk function to keep descending.
//!
//! # Example
//!
//! ```rust,ignore
//! use injector_syntax::ast::*;
//!
//! struct CountAssignments {
//!     count: usize,
//! }
//!
//! impl Visitor for CountAssignments {
//!     fn visit_assignment(&mut self, expr: &AssignmentExpression) {
//!         self.count += 1;
//!         walk_assignment(self, expr);
//!     }
//! }
//! ```

use super::*;

/// AST visitor trait
pub trait Visitor: Sized {
    // Top-level
    fn visit_compilation_unit(&mut self, unit: &CompilationUnit) {
        walk_compilation_unit(self, unit);
    }

    fn visit_namespace(&mut self, ns: &NamespaceDecl) {
        walk_namespace(self, ns);
    }

    // Declarations
    fn visit_type_decl(&mut self, decl: &TypeDecl) {
        walk_type_decl(self, decl);
    }

    fn visit_member(&mut self, member: &Member) {
        walk_member(self, member);
    }

    fn visit_field(&mut self, field: &FieldDecl) {
        walk_field(self, field);
    }

    fn visit_constructor(&mut self, ctor: &ConstructorDecl) {
        walk_constructor(self, ctor);
    }

    fn visit_method(&mut self, method: &MethodDecl) {
        walk_method(self, method);
    }

    fn visit_property(&mut self, property: &PropertyDecl) {
        walk_property(self, property);
    }

    fn visit_function_body(&mut self, body: &FunctionBody) {
        walk_function_body(self, body);
    }

    // Statements
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_local_decl(&mut self, decl: &LocalDecl) {
        walk_local_decl(self, decl);
    }

    // Expressions
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpression) {
        walk_assignment(self, expr);
    }

    fn visit_lambda(&mut self, expr: &LambdaExpression) {
        walk_lambda(self, expr);
    }

    fn visit_identifier(&mut self, _id: &Identifier) {
        // Leaf node
    }
}

// ============================================================================
// Walk Functions - Default Traversal Implementations
// ============================================================================

pub fn walk_compilation_unit<V: Visitor>(visitor: &mut V, unit: &CompilationUnit) {
    walk_namespace_members(visitor, &unit.members);
}

pub fn walk_namespace<V: Visitor>(visitor: &mut V, ns: &NamespaceDecl) {
    walk_namespace_members(visitor, &ns.members);
}

fn walk_namespace_members<V: Visitor>(visitor: &mut V, members: &[NamespaceMember]) {
    for member in members {
        match member {
            NamespaceMember::Namespace(ns) => visitor.visit_namespace(ns),
            NamespaceMember::Type(decl) => visitor.visit_type_decl(decl),
        }
    }
}

pub fn walk_type_decl<V: Visitor>(visitor: &mut V, decl: &TypeDecl) {
    visitor.visit_identifier(&decl.name);
    for member in &decl.members {
        visitor.visit_member(member);
    }
}

pub fn walk_member<V: Visitor>(visitor: &mut V, member: &Member) {
    match member {
        Member::Field(field) => visitor.visit_field(field),
        Member::Constructor(ctor) => visitor.visit_constructor(ctor),
        Member::Method(method) => visitor.visit_method(method),
        Member::Property(property) => visitor.visit_property(property),
        Member::Type(decl) => visitor.visit_type_decl(decl),
    }
}

pub fn walk_field<V: Visitor>(visitor: &mut V, field: &FieldDecl) {
    for variable in &field.variables {
        walk_variable_declarator(visitor, variable);
    }
}

fn walk_variable_declarator<V: Visitor>(visitor: &mut V, variable: &VariableDeclarator) {
    visitor.visit_identifier(&variable.name);
    if let Some(init) = &variable.initializer {
        visitor.visit_expression(init);
    }
}

pub fn walk_constructor<V: Visitor>(visitor: &mut V, ctor: &ConstructorDecl) {
    visitor.visit_identifier(&ctor.name);
    walk_parameters(visitor, &ctor.params);
    if let Some(init) = &ctor.initializer {
        walk_arguments(visitor, &init.args);
    }
    visitor.visit_function_body(&ctor.body);
}

pub fn walk_method<V: Visitor>(visitor: &mut V, method: &MethodDecl) {
    visitor.visit_identifier(&method.name);
    walk_parameters(visitor, &method.params);
    visitor.visit_function_body(&method.body);
}

pub fn walk_property<V: Visitor>(visitor: &mut V, property: &PropertyDecl) {
    visitor.visit_identifier(&property.name);
    match &property.body {
        PropertyBody::Accessors(accessors) => {
            for accessor in accessors {
                visitor.visit_function_body(&accessor.body);
            }
        }
        PropertyBody::Expression(expr) => visitor.visit_expression(expr),
    }
    if let Some(init) = &property.initializer {
        visitor.visit_expression(init);
    }
}

fn walk_parameters<V: Visitor>(visitor: &mut V, params: &ParameterList) {
    for param in &params.params {
        visitor.visit_identifier(&param.name);
        if let Some(default) = &param.default_value {
            visitor.visit_expression(default);
        }
    }
}

fn walk_arguments<V: Visitor>(visitor: &mut V, args: &[Argument]) {
    for arg in args {
        visitor.visit_expression(&arg.value);
    }
}

pub fn walk_function_body<V: Visitor>(visitor: &mut V, body: &FunctionBody) {
    match body {
        FunctionBody::Block(block) => visitor.visit_block(block),
        FunctionBody::Expression { expression, .. } => visitor.visit_expression(expression),
        FunctionBody::None(_) => {}
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    for stmt in &block.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, stmt: &Statement) {
    match stmt {
        Statement::Block(block) => visitor.visit_block(block),
        Statement::LocalDecl(decl) => visitor.visit_local_decl(decl),
        Statement::Expression(stmt) => visitor.visit_expression(&stmt.expression),
        Statement::If(stmt) => {
            visitor.visit_expression(&stmt.condition);
            visitor.visit_statement(&stmt.then_branch);
            if let Some(else_branch) = &stmt.else_branch {
                visitor.visit_statement(else_branch);
            }
        }
        Statement::Switch(stmt) => {
            visitor.visit_expression(&stmt.value);
            for section in &stmt.sections {
                for label in &section.labels {
                    if let SwitchLabel::Case(value) = label {
                        visitor.visit_expression(value);
                    }
                }
                for stmt in &section.statements {
                    visitor.visit_statement(stmt);
                }
            }
        }
        Statement::While(stmt) => {
            visitor.visit_expression(&stmt.condition);
            visitor.visit_statement(&stmt.body);
        }
        Statement::DoWhile(stmt) => {
            visitor.visit_statement(&stmt.body);
            visitor.visit_expression(&stmt.condition);
        }
        Statement::For(stmt) => {
            match &stmt.init {
                Some(ForInit::Declaration(decl)) => visitor.visit_local_decl(decl),
                Some(ForInit::Expressions(exprs)) => {
                    for expr in exprs {
                        visitor.visit_expression(expr);
                    }
                }
                None => {}
            }
            if let Some(condition) = &stmt.condition {
                visitor.visit_expression(condition);
            }
            for update in &stmt.update {
                visitor.visit_expression(update);
            }
            visitor.visit_statement(&stmt.body);
        }
        Statement::Foreach(stmt) => {
            visitor.visit_identifier(&stmt.variable);
            visitor.visit_expression(&stmt.iterable);
            visitor.visit_statement(&stmt.body);
        }
        Statement::Return(stmt) => {
            if let Some(value) = &stmt.value {
                visitor.visit_expression(value);
            }
        }
        Statement::Throw(stmt) => {
            if let Some(value) = &stmt.value {
                visitor.visit_expression(value);
            }
        }
        Statement::Try(stmt) => {
            visitor.visit_block(&stmt.body);
            for catch in &stmt.catches {
                if let Some(filter) = &catch.filter {
                    visitor.visit_expression(filter);
                }
                visitor.visit_block(&catch.body);
            }
            if let Some(finally) = &stmt.finally {
                visitor.visit_block(finally);
            }
        }
        Statement::Using(stmt) => {
            match &stmt.resource {
                UsingResource::Declaration(decl) => visitor.visit_local_decl(decl),
                UsingResource::Expression(expr) => visitor.visit_expression(expr),
            }
            if let Some(body) = &stmt.body {
                visitor.visit_statement(body);
            }
        }
        Statement::Lock(stmt) => {
            visitor.visit_expression(&stmt.target);
            visitor.visit_statement(&stmt.body);
        }
        Statement::Break(_) | Statement::Continue(_) | Statement::Empty(_) => {}
    }
}

pub fn walk_local_decl<V: Visitor>(visitor: &mut V, decl: &LocalDecl) {
    for variable in &decl.variables {
        walk_variable_declarator(visitor, variable);
    }
}

pub fn walk_expression<V: Visitor>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Identifier(id) => visitor.visit_identifier(id),
        Expression::GenericName(generic) => visitor.visit_identifier(&generic.name),
        Expression::Literal(_) | Expression::This(_) | Expression::Base(_) => {}
        Expression::Member(member) => visitor.visit_expression(&member.object),
        Expression::Invocation(call) => {
            visitor.visit_expression(&call.callee);
            walk_arguments(visitor, &call.args);
        }
        Expression::ElementAccess(access) => {
            visitor.visit_expression(&access.object);
            walk_arguments(visitor, &access.args);
        }
        Expression::ObjectCreation(creation) => {
            walk_arguments(visitor, &creation.args);
            if let Some(init) = &creation.initializer {
                walk_initializer_list(visitor, init);
            }
        }
        Expression::Assignment(assign) => visitor.visit_assignment(assign),
        Expression::Binary(binary) => {
            visitor.visit_expression(&binary.left);
            visitor.visit_expression(&binary.right);
        }
        Expression::Unary(unary) => visitor.visit_expression(&unary.operand),
        Expression::Postfix(postfix) => visitor.visit_expression(&postfix.operand),
        Expression::Conditional(cond) => {
            visitor.visit_expression(&cond.condition);
            visitor.visit_expression(&cond.then_expr);
            visitor.visit_expression(&cond.else_expr);
        }
        Expression::Lambda(lambda) => visitor.visit_lambda(lambda),
        Expression::Paren(paren) => visitor.visit_expression(&paren.expression),
        Expression::Throw(throw) => visitor.visit_expression(&throw.value),
        Expression::TypeTest(test) => visitor.visit_expression(&test.operand),
        Expression::TypeOperator(_) => {}
        Expression::InitializerList(init) => walk_initializer_list(visitor, init),
    }
}

fn walk_initializer_list<V: Visitor>(visitor: &mut V, init: &InitializerList) {
    for element in &init.elements {
        visitor.visit_expression(element);
    }
}

pub fn walk_assignment<V: Visitor>(visitor: &mut V, expr: &AssignmentExpression) {
    visitor.visit_expression(&expr.left);
    visitor.visit_expression(&expr.right);
}

pub fn walk_lambda<V: Visitor>(visitor: &mut V, expr: &LambdaExpression) {
    for param in &expr.params {
        visitor.visit_identifier(&param.name);
    }
    match &expr.body {
        LambdaBody::Expression(body) => visitor.visit_expression(body),
        LambdaBody::Block(block) => visitor.visit_block(block),
    }
}
