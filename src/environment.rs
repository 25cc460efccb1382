use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// One lexical scope: a name table plus a link to the enclosing scope.
/// Scopes are shared (`Rc<RefCell<_>>`) because closures and bound methods
/// keep their defining chain alive past the block that created it.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: None,
        }))
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }))
    }

    /// Unconditionally bind `name` in this scope.  Redefinition shadows.
    pub fn define(&mut self, name: &str, value: Value) {
        debug!("Defining '{}'", name);

        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(LoxError::runtime(
                name.line,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);

            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(LoxError::runtime(
                name.line,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// Walk exactly `distance` enclosing links.  The resolver guarantees the
    /// chain is at least that deep.
    pub fn ancestor(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
    ) -> Rc<RefCell<Environment>> {
        let mut current: Rc<RefCell<Environment>> = Rc::clone(env);

        for _ in 0..distance {
            let next = current
                .borrow()
                .enclosing
                .as_ref()
                .map(Rc::clone);

            match next {
                Some(enclosing) => current = enclosing,

                // Unreachable for resolved programs; surface the chain as
                // exhausted rather than panicking.
                None => return current,
            }
        }

        current
    }

    /// Direct read at a resolver-computed distance.
    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &Token) -> Result<Value> {
        let scope = Environment::ancestor(env, distance);

        let value = scope.borrow().values.get(&name.lexeme).cloned();

        value.ok_or_else(|| {
            LoxError::runtime(
                name.line,
                format!("Undefined variable '{}'.", name.lexeme),
            )
        })
    }

    /// Direct write at a resolver-computed distance.
    pub fn assign_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<()> {
        let scope = Environment::ancestor(env, distance);

        scope.borrow_mut().values.insert(name.lexeme.clone(), value);

        Ok(())
    }

    /// Read a name this scope is statically known to bind (`this` / `super`
    /// inside method closures).
    pub fn get_bound(env: &Rc<RefCell<Environment>>, distance: usize, name: &str, line: usize) -> Result<Value> {
        let scope = Environment::ancestor(env, distance);

        let value = scope.borrow().values.get(name).cloned();

        value.ok_or_else(|| {
            LoxError::runtime(line, format!("Undefined variable '{}'.", name))
        })
    }
}
