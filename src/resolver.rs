use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::{Expr, ExprId};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::Token;

/// Maps a resolvable expression to the number of scopes between its use
/// site and the scope that declares the name. An expression absent from
/// the table refers to a global and is looked up by name at runtime.
pub type ResolutionTable = HashMap<ExprId, usize>;

/// What kind of function body is being resolved, for `return` checking.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// What kind of class body is being resolved, for `this`/`super` checking.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// The static resolution pass.
///
/// Walks the AST with a stack of scopes, each mapping a name to whether
/// its initializer has finished. Every variable use is bound to the
/// nearest declaring scope; scope misuses (reading a local in its own
/// initializer, `return` outside a function, stray `this`/`super`) are
/// collected as errors. The whole tree is always walked so one run
/// surfaces every mistake.
pub struct Resolver {
    scopes: Vec<HashMap<String, bool>>,
    table: ResolutionTable,
    errors: Vec<ResolveError>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: Vec::new(),
            table: HashMap::new(),
            errors: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Resolves a program, returning the table and every error found.
    pub fn resolve(mut self, statements: &[Stmt]) -> (ResolutionTable, Vec<ResolveError>) {
        self.resolve_all(statements);
        (self.table, self.errors)
    }

    fn resolve_all(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Marks a name as existing but not yet initialized. Re-declaring a
    /// name in the same scope simply claims the slot again.
    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), false);
        }
    }

    /// Marks a name as fully initialized and usable.
    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    /// Records the depth of the nearest scope declaring `name`. Finding
    /// nothing is not an error: the name is assumed global.
    fn resolve_local(&mut self, id: ExprId, name: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.table.insert(id, depth);
                return;
            }
        }
    }

    fn resolve_function(&mut self, declaration: &FunctionDecl, kind: FunctionType) {
        let enclosing = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in &declaration.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_all(&declaration.body);
        self.end_scope();

        self.current_function = enclosing;
    }

    fn error(&mut self, token: &Token, message: &str) {
        self.errors.push(ResolveError {
            token: token.clone(),
            message: message.to_string(),
        });
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression { expr } => self.resolve_expr(expr),

            Stmt::Print { expr } => self.resolve_expr(expr),

            Stmt::Var { name, initializer } => {
                self.declare(name);
                if let Some(initializer) = initializer {
                    self.resolve_expr(initializer);
                }
                self.define(name);
            }

            Stmt::Block { statements } => {
                self.begin_scope();
                self.resolve_all(statements);
                self.end_scope();
            }

            Stmt::If { condition, then_branch, else_branch } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }

            Stmt::Function(declaration) => {
                // Declared and defined eagerly so the body can recurse.
                self.declare(&declaration.name);
                self.define(&declaration.name);

                self.resolve_function(declaration, FunctionType::Function);
            }

            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.error(keyword, "Can't return from top-level code.");
                }

                if let Some(value) = value {
                    if self.current_function == FunctionType::Initializer {
                        self.error(keyword, "Can't return a value from an initializer.");
                    }

                    self.resolve_expr(value);
                }
            }

            Stmt::Class { name, superclass, methods } => {
                let enclosing = mem::replace(&mut self.current_class, ClassType::Class);

                self.declare(name);
                self.define(name);

                if let Some(superclass_expr) = superclass {
                    let Expr::Variable { name: super_name, .. } = superclass_expr else {
                        unreachable!("the parser only produces variable superclasses");
                    };

                    if super_name.lexeme == name.lexeme {
                        self.error(super_name, "A class can't inherit from itself.");
                    }

                    self.current_class = ClassType::Subclass;
                    self.resolve_expr(superclass_expr);

                    // Methods of a subclass resolve under a scope binding
                    // `super`, one outside the scope binding `this`.
                    self.begin_scope();
                    self.scopes
                        .last_mut()
                        .expect("scope just pushed")
                        .insert("super".to_string(), true);
                }

                self.begin_scope();
                self.scopes
                    .last_mut()
                    .expect("scope just pushed")
                    .insert("this".to_string(), true);

                for method in methods {
                    let kind = if method.name.lexeme == "init" {
                        FunctionType::Initializer
                    } else {
                        FunctionType::Method
                    };
                    self.resolve_function(method, kind);
                }

                self.end_scope();

                if superclass.is_some() {
                    self.end_scope();
                }

                self.current_class = enclosing;
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {}

            Expr::Grouping { inner } => self.resolve_expr(inner),

            Expr::Unary { operand, .. } => self.resolve_expr(operand),

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.error(name, "Can't read local variable in its own initializer.");
                    }
                }

                self.resolve_local(*id, &name.lexeme);
            }

            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, &name.lexeme);
            }

            Expr::Call { callee, arguments, .. } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }

            Expr::Get { object, .. } => self.resolve_expr(object),

            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }

            Expr::This { id, keyword } => {
                if self.current_class == ClassType::None {
                    self.error(keyword, "Can't use 'this' outside of a class.");
                    return;
                }

                self.resolve_local(*id, &keyword.lexeme);
            }

            Expr::Super { id, keyword, .. } => {
                match self.current_class {
                    ClassType::None => {
                        self.error(keyword, "Can't use 'super' outside of a class.")
                    }
                    ClassType::Class => {
                        self.error(keyword, "Can't use 'super' in a class with no superclass.")
                    }
                    ClassType::Subclass => {}
                }

                self.resolve_local(*id, &keyword.lexeme);
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
