use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A single lexical scope frame: a name-to-value map plus a link to its
/// enclosing frame. Frames are reference-counted because a closure can
/// capture one and keep it alive long after the block that created it
/// exits.
#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    pub variables: HashMap<String, Object>,
    /// Distance from the globals frame. Exists purely to back the
    /// `printStackDepth` builtin.
    pub level: usize,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        let level = enclosing.as_ref().map_or(0, |parent| parent.borrow().level + 1);
        Environment { enclosing, variables: HashMap::new(), level }
    }

    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth 1"));

        for i in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {i}"));
            environment = parent;
        }

        environment
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme)))
    }

    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance).borrow_mut().variables.insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme)))
    }

    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        if distance > 0 {
            self.ancestor(distance).borrow().variables.get(&name.lexeme).cloned()
                .ok_or_else(|| RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme)))
        } else {
            self.variables.get(&name.lexeme).cloned()
                .ok_or_else(|| RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme)))
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Location, Type};

    fn token(name: &str) -> Token {
        Token::new(Type::Identifier, name.to_string(), None, Location::new(1, 1))
    }

    #[test]
    fn levels_increase_with_nesting() {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        let block = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&globals)))));
        assert_eq!(globals.borrow().level, 0);
        assert_eq!(block.borrow().level, 1);
    }

    #[test]
    fn get_at_matches_resolved_distance() {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        globals.borrow_mut().define("a", Object::from(1.0));
        let inner = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&globals)))));

        let name = token("a");
        assert_eq!(inner.borrow().get_at(1, &name).unwrap(), globals.borrow().get(&name).unwrap());
    }

    #[test]
    fn assign_to_undefined_global_errors() {
        let mut globals = Environment::new(None);
        assert!(globals.assign(&token("missing"), Object::from(1.0)).is_err());
    }
}
