use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::{Callable, Function};
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

/// A class value: its name, an optional superclass, and its method table.
/// Method lookup walks the superclass chain.
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<Class>>,
    methods: HashMap<String, Function>,
}

impl Class {
    pub fn new(
        name: String,
        superclass: Option<Rc<Class>>,
        methods: HashMap<String, Function>,
    ) -> Self {
        Class { name, superclass, methods }
    }

    /// Finds a method on this class or any ancestor. The own table wins
    /// over inherited methods of the same name.
    pub fn find_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }

        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }
}

/// Calling a class constructs an instance of it. Implemented on the
/// handle, because the fresh instance needs to hold one.
impl Callable for Rc<Class> {
    /// A class takes whatever its initializer takes; without one it takes
    /// no arguments.
    fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |initializer| initializer.arity())
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(self))));

        if let Some(initializer) = self.find_method("init") {
            initializer.bind(Rc::clone(&instance)).call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

/// An instance: a handle to its class and a free-form field table. Fields
/// come into existence on first assignment; there is no schema.
pub struct Instance {
    pub class: Rc<Class>,
    fields: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    /// Reads a property: fields first, then methods up the class chain. A
    /// method is returned bound to this instance.
    pub fn get(instance: &Rc<RefCell<Instance>>, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(field) = instance.borrow().fields.get(&name.lexeme).cloned() {
            return Ok(field);
        }

        let method = instance.borrow().class.find_method(&name.lexeme);
        match method {
            Some(method) => Ok(Value::Function(Rc::new(method.bind(Rc::clone(instance))))),
            None => Err(RuntimeError::new(
                name,
                format!("Undefined property '{}'.", name.lexeme),
            )),
        }
    }

    /// Writes a field, creating it if needed.
    pub fn set(&mut self, name: &Token, value: Value) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<instance {}>", self.class.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn find_method_walks_the_superclass_chain() {
        use crate::environment::Environment;
        use crate::stmt::FunctionDecl;
        use crate::token::TokenKind;

        let declaration = Rc::new(FunctionDecl {
            name: Token::new(TokenKind::Identifier, "greet".to_string(), None, 1),
            params: Vec::new(),
            body: Vec::new(),
        });
        let greet = Function::new(
            declaration,
            Rc::new(RefCell::new(Environment::new())),
            false,
        );

        let base = Rc::new(Class::new(
            "Base".to_string(),
            None,
            HashMap::from([("greet".to_string(), greet)]),
        ));
        let derived = Rc::new(Class::new("Derived".to_string(), Some(base), HashMap::new()));

        assert!(derived.find_method("greet").is_some());
        assert!(derived.find_method("missing").is_none());
    }

    #[test]
    fn fields_shadow_nothing_until_assigned() {
        let class = Rc::new(Class::new("Bag".to_string(), None, HashMap::new()));
        let instance = Rc::new(RefCell::new(Instance::new(class)));

        let name = Token::new(crate::token::TokenKind::Identifier, "x".to_string(), None, 1);
        let error = Instance::get(&instance, &name).unwrap_err();
        assert_eq!(error.message, "Undefined property 'x'.");

        instance.borrow_mut().set(&name, Value::Number(3.0));
        assert_eq!(Instance::get(&instance, &name).unwrap(), Value::Number(3.0));
    }
}
