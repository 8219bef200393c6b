use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::expr::{Expr, ExprId};
use crate::function::{Callable, Function, NativeFunction};
use crate::resolver::ResolutionTable;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenKind};
use crate::value::Value;

type EvalResult = Result<Value, Unwind>;
type ExecResult = Result<(), Unwind>;

/// The tree-walking evaluator.
///
/// Holds the global scope, the current environment chain, and the
/// resolver's table mapping expression ids to scope depths. Program output
/// goes to the injected writer so callers (and tests) can capture it.
///
/// Lookup policy: an expression present in the table reads its slot
/// exactly `depth` scopes up the chain; an absent one reads the globals by
/// name, which is a runtime error if the name is unbound.
pub struct Interpreter<'out> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    out: &'out mut dyn Write,
}

impl<'out> Interpreter<'out> {
    pub fn new(out: &'out mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        for native in NativeFunction::all() {
            let name = native.name;
            globals.borrow_mut().define(name, Value::Native(Rc::new(native)));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Installs resolutions produced by the resolver. Entries accumulate
    /// across REPL lines so closures from earlier lines stay resolved.
    pub fn apply_resolutions(&mut self, table: ResolutionTable) {
        self.locals.extend(table);
    }

    /// Executes a program. A runtime error aborts execution immediately
    /// and is returned to the caller.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                // The resolver rejects top-level returns; nothing to unwind to.
                Err(Unwind::Return(_)) => break,
                Err(Unwind::Error(error)) => return Err(error),
            }
        }

        Ok(())
    }

    /// Evaluates a lone expression and echoes its value, for the REPL.
    pub fn interpret_expression(&mut self, expr: &Expr) -> Result<(), RuntimeError> {
        match self.evaluate(expr) {
            Ok(value) => {
                let _ = writeln!(self.out, "{value}");
                Ok(())
            }
            Err(Unwind::Error(error)) => Err(error),
            Err(Unwind::Return(_)) => Ok(()),
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression { expr } => {
                self.evaluate(expr)?;
                Ok(())
            }

            Stmt::Print { expr } => {
                let value = self.evaluate(expr)?;
                let _ = writeln!(self.out, "{value}");
                Ok(())
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(())
            }

            Stmt::Block { statements } => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, Rc::new(RefCell::new(environment)))
            }

            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }

            Stmt::Function(declaration) => {
                let function =
                    Function::new(Rc::clone(declaration), Rc::clone(&self.environment), false);
                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(())
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Err(Unwind::Return(value))
            }

            Stmt::Class { name, superclass, methods } => {
                self.class_declaration(name, superclass.as_ref(), methods)
            }
        }
    }

    /// Executes statements inside `environment`, restoring the previous
    /// environment on every exit path, including returns and errors.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn class_declaration(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> ExecResult {
        let superclass = match superclass {
            Some(expr) => {
                let Expr::Variable { name: super_name, .. } = expr else {
                    unreachable!("the parser only produces variable superclasses");
                };

                match self.evaluate(expr)? {
                    Value::Class(class) => Some(class),
                    _ => {
                        return Err(RuntimeError::new(super_name, "Superclass must be a class.").into())
                    }
                }
            }
            None => None,
        };

        self.environment.borrow_mut().define(&name.lexeme, Value::Nil);

        // Methods of a subclass close over an extra scope binding `super`.
        let enclosing = superclass.as_ref().map(|superclass| {
            let mut environment = Environment::with_enclosing(Rc::clone(&self.environment));
            environment.define("super", Value::Class(Rc::clone(superclass)));
            mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)))
        });

        let mut table = HashMap::new();
        for method in methods {
            let is_initializer = method.name.lexeme == "init";
            let function =
                Function::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
            table.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(name.lexeme.clone(), superclass, table);

        if let Some(enclosing) = enclosing {
            self.environment = enclosing;
        }

        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))
            .map_err(Unwind::from)
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal { value } => Ok(Value::from(value.clone())),

            Expr::Grouping { inner } => self.evaluate(inner),

            Expr::Unary { operator, operand } => {
                let operand = self.evaluate(operand)?;

                match operator.kind {
                    TokenKind::Minus => match operand {
                        Value::Number(number) => Ok(Value::Number(-number)),
                        _ => Err(RuntimeError::new(operator, "Operand must be a number.").into()),
                    },
                    TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
                    _ => unreachable!("the parser only produces '!' and '-' unary operators"),
                }
            }

            Expr::Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;

                self.binary(operator, left, right).map_err(Unwind::from)
            }

            Expr::Logical { left, operator, right } => {
                let left = self.evaluate(left)?;

                // Short-circuit: the result is an actual operand, never a
                // coerced boolean.
                if operator.kind == TokenKind::Or {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }

                self.evaluate(right)
            }

            Expr::Variable { id, name } => self.look_up(*id, name).map_err(Unwind::from),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(distance) => {
                        self.environment.borrow_mut().assign_at(*distance, name, value.clone());
                    }
                    None => {
                        self.globals.borrow_mut().assign(name, value.clone())?;
                    }
                }

                Ok(value)
            }

            Expr::Call { callee, paren, arguments } => {
                let callee = self.evaluate(callee)?;

                let mut evaluated = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    evaluated.push(self.evaluate(argument)?);
                }

                let callable: &dyn Callable = match &callee {
                    Value::Function(function) => function.as_ref(),
                    Value::Native(native) => native.as_ref(),
                    Value::Class(class) => class,
                    _ => {
                        return Err(RuntimeError::new(
                            paren,
                            "Can only call functions and classes.",
                        )
                        .into())
                    }
                };

                if evaluated.len() != callable.arity() {
                    return Err(RuntimeError::new(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            evaluated.len()
                        ),
                    )
                    .into());
                }

                callable.call(self, evaluated).map_err(Unwind::from)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => {
                    Instance::get(&instance, name).map_err(Unwind::from)
                }
                _ => Err(RuntimeError::new(name, "Only instances have properties.").into()),
            },

            Expr::Set { object, name, value } => match self.evaluate(object)? {
                Value::Instance(instance) => {
                    let value = self.evaluate(value)?;
                    instance.borrow_mut().set(name, value.clone());
                    Ok(value)
                }
                _ => Err(RuntimeError::new(name, "Only instances have fields.").into()),
            },

            Expr::This { id, keyword } => self.look_up(*id, keyword).map_err(Unwind::from),

            Expr::Super { id, keyword, method } => {
                let distance = *self
                    .locals
                    .get(id)
                    .expect("the resolver rejects 'super' outside a subclass");

                let superclass = self
                    .environment
                    .borrow()
                    .get_at(distance, &keyword.lexeme)
                    .expect("'super' is bound where the resolver said");
                let Value::Class(superclass) = superclass else {
                    unreachable!("'super' only ever binds a class");
                };

                // `this` lives one scope inside the one holding `super`.
                let this = self
                    .environment
                    .borrow()
                    .get_at(distance - 1, "this")
                    .expect("'this' is bound one scope inside 'super'");
                let Value::Instance(instance) = this else {
                    unreachable!("'this' only ever binds an instance");
                };

                // Lookup starts at the superclass, skipping the own class.
                match superclass.find_method(&method.lexeme) {
                    Some(found) => Ok(Value::Function(Rc::new(found.bind(instance)))),
                    None => Err(RuntimeError::new(
                        method,
                        format!("Undefined property '{}'.", method.lexeme),
                    )
                    .into()),
                }
            }
        }
    }

    fn look_up(&self, id: ExprId, name: &Token) -> Result<Value, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => Ok(self
                .environment
                .borrow()
                .get_at(*distance, &name.lexeme)
                .expect("a resolved variable has a live slot")),
            None => self.globals.borrow().get(name),
        }
    }

    fn binary(&self, operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
        match operator.kind {
            TokenKind::Plus => match (left, right) {
                (Value::Number(left), Value::Number(right)) => Ok(Value::Number(left + right)),
                (Value::String(left), Value::String(right)) => {
                    Ok(Value::String(format!("{left}{right}")))
                }
                _ => Err(RuntimeError::new(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),

            _ => {
                let (Value::Number(left), Value::Number(right)) = (left, right) else {
                    return Err(RuntimeError::new(operator, "Operands must be numbers."));
                };

                Ok(match operator.kind {
                    TokenKind::Minus => Value::Number(left - right),
                    TokenKind::Star => Value::Number(left * right),
                    // Division by zero follows IEEE-754 and is not an error.
                    TokenKind::Slash => Value::Number(left / right),
                    TokenKind::Greater => Value::Bool(left > right),
                    TokenKind::GreaterEqual => Value::Bool(left >= right),
                    TokenKind::Less => Value::Bool(left < right),
                    TokenKind::LessEqual => Value::Bool(left <= right),
                    _ => unreachable!("the parser only produces binary operators"),
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    /// Runs a source snippet through the whole pipeline and returns the
    /// captured output.
    fn run(source: &str) -> Result<String, RuntimeError> {
        let mut output = Vec::new();

        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        assert!(scan_errors.is_empty(), "scan errors: {scan_errors:?}");

        let mut parser = Parser::new(tokens, 0);
        let statements = parser.parse();
        let parse_errors = parser.take_errors();
        assert!(parse_errors.is_empty(), "parse errors: {parse_errors:?}");

        let (table, resolve_errors) = Resolver::new().resolve(&statements);
        assert!(resolve_errors.is_empty(), "resolve errors: {resolve_errors:?}");

        let mut interpreter = Interpreter::new(&mut output);
        interpreter.apply_resolutions(table);
        interpreter.interpret(&statements)?;

        drop(interpreter);
        Ok(String::from_utf8(output).expect("interpreter output is UTF-8"))
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(run("print 1 + 2 * 3 - 8 / 2;").unwrap(), "3\n");
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(run("print \"foo\" + \"bar\";").unwrap(), "foobar\n");
    }

    #[test]
    fn mixed_addition_is_an_error() {
        let error = run("print \"a\" - 1;").unwrap_err();
        assert_eq!(error.message, "Operands must be numbers.");

        let error = run("print \"a\" + 1;").unwrap_err();
        assert_eq!(error.message, "Operands must be two numbers or two strings.");
    }

    #[test]
    fn logical_operators_return_operands() {
        assert_eq!(run("print nil or \"fallback\";").unwrap(), "fallback\n");
        assert_eq!(run("print 0 and 1;").unwrap(), "1\n");
        assert_eq!(run("print false and 1;").unwrap(), "false\n");
    }

    #[test]
    fn closures_capture_their_defining_scope() {
        let source = "\
fun counter() {
  var count = 0;
  fun tick() {
    count = count + 1;
    print count;
  }
  return tick;
}
var tick = counter();
tick();
tick();
";
        assert_eq!(run(source).unwrap(), "1\n2\n");
    }

    #[test]
    fn initializer_always_yields_the_instance() {
        let source = "\
class Point {
  init() {
    this.x = 1;
    return;
  }
}
print Point().x;
";
        assert_eq!(run(source).unwrap(), "1\n");
    }

    #[test]
    fn undefined_global_read_is_a_runtime_error() {
        let error = run("print ghost;").unwrap_err();
        assert_eq!(error.message, "Undefined variable 'ghost'.");
    }
}
