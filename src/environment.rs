use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// A single lexical scope: a name table plus a link to the enclosing
/// scope. Scopes form a singly-linked chain from the innermost block up to
/// the globals; closures keep their defining chain alive by holding the
/// `Rc` link.
#[derive(Debug)]
pub struct Environment {
    enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            enclosing: None,
            values: HashMap::new(),
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            enclosing: Some(enclosing),
            values: HashMap::new(),
        }
    }

    /// Binds a name in this scope, shadowing any outer binding and
    /// overwriting any previous one in the same scope.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Reads a name, walking the chain outward.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme)))
    }

    /// Writes to an existing binding, walking the chain outward. Assigning
    /// a name that is bound nowhere is a runtime error.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme)))
    }

    /// The scope exactly `distance` links up the chain. Only called with
    /// `distance >= 1`; the resolver guarantees the links exist.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = Rc::clone(
            self.enclosing.as_ref().expect("resolved scope chain has an enclosing scope"),
        );

        for _ in 1..distance {
            let next = environment
                .borrow()
                .enclosing
                .clone()
                .expect("resolved scope chain has an enclosing scope");
            environment = next;
        }

        environment
    }

    /// Reads the slot for `name` exactly `distance` scopes up. `None`
    /// means the resolver and the runtime disagree about the chain, which
    /// a correctly resolved program never produces.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Value> {
        if distance == 0 {
            self.values.get(name).cloned()
        } else {
            self.ancestor(distance).borrow().values.get(name).cloned()
        }
    }

    /// Writes the slot for `name` exactly `distance` scopes up.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Value) {
        if distance == 0 {
            self.values.insert(name.lexeme.clone(), value);
        } else {
            self.ancestor(distance)
                .borrow_mut()
                .values
                .insert(name.lexeme.clone(), value);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
