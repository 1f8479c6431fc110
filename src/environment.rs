use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, RuntimeError};
use crate::token::Token;
use crate::value::Value;

/// A lexically-scoped name→value map, chained to its enclosing scope.
/// `None` in the map marks a name declared with `var x;` but never
/// assigned — the "uninitialized" sentinel (§3, §4.4 of the spec).
#[derive(Debug, Clone)]
pub struct Environment {
    enclosing: Option<Rc<RefCell<Environment>>>,
    variables: HashMap<String, Option<Value>>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// Inserts or overwrites `name` in the current scope.
    pub fn define(&mut self, name: &str, value: Option<Value>) {
        self.variables.insert(name.to_string(), value);
    }

    /// Looks up `name`, searching the current scope then each enclosing
    /// scope in turn. Returns the *closest* (innermost) binding.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(slot) = self.variables.get(&name.lexeme) {
            return match slot {
                Some(value) => Ok(value.clone()),
                None => Err(RuntimeError {
                    token: name.clone(),
                    message: format!("Uninitialized variable '{}'.", name.lexeme),
                }),
            };
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Assigns `value` in the first scope (walking outward) that already
    /// contains `name`.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), Some(value));
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}
