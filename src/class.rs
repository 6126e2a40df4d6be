use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::token::Token;

#[derive(Clone, Default)]
pub struct Class {
    pub name: String,
    pub methods: HashMap<String, Function>,
}

impl Class {
    pub fn new(name: String, methods: HashMap<String, Function>) -> Self {
        Class { name, methods }
    }

    pub fn find_method(&self, name: &str) -> Option<Function> {
        self.methods.get(name).cloned()
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Class {
    /// A class's arity is its initializer's arity, or zero if it has none.
    pub fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |initializer| initializer.arity())
    }

    /// Constructs a new instance and, if the class declares `init`, binds
    /// and calls it, discarding its return value (an initializer always
    /// yields the instance itself, per [`crate::function::Function::call`]).
    pub fn instantiate(class: &Rc<RefCell<Class>>, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let instance = Object::from(Instance::new(Rc::clone(class)));

        if let Some(initializer) = class.borrow().find_method("init") {
            initializer.bind(instance.clone()).call(interpreter, arguments)?;
        }

        Ok(instance)
    }
}

/// A runtime instance of a [`Class`]: a reference back to its class plus a
/// mutable, string-keyed field map.
#[derive(Clone)]
pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    pub fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    pub fn get(&self, name: &Token, instance: &Object) -> Result<Object, RuntimeError> {
        if let Some(field) = self.fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = self.class.borrow().find_method(&name.lexeme) {
            return Ok(Object::from(method.bind(instance.clone())));
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined property '{}'.", name.lexeme)))
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<instance {}>", self.class.borrow().name)
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.borrow().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::FunctionData;
    use crate::environment::Environment;
    use crate::token::{Location, Type};

    fn init_method() -> Function {
        let declaration = Rc::new(FunctionData {
            name: Token::new(Type::Identifier, "init".to_string(), None, Location::new(1, 1)),
            params: vec![Token::new(Type::Identifier, "name".to_string(), None, Location::new(1, 1))],
            body: vec![],
        });
        Function::new(declaration, Rc::new(RefCell::new(Environment::new(None))), true)
    }

    #[test]
    fn arity_follows_initializer() {
        let mut methods = HashMap::new();
        methods.insert("init".to_string(), init_method());
        let class = Class::new("Point".to_string(), methods);
        assert_eq!(class.arity(), 1);
    }

    #[test]
    fn arity_is_zero_without_initializer() {
        let class = Class::new("Empty".to_string(), HashMap::new());
        assert_eq!(class.arity(), 0);
    }

    #[test]
    fn display_has_no_brackets() {
        let class = Rc::new(RefCell::new(Class::new("Point".to_string(), HashMap::new())));
        assert_eq!(class.borrow().to_string(), "Point");

        let instance = Instance::new(Rc::clone(&class));
        assert_eq!(instance.to_string(), "Point instance");
    }

    #[test]
    fn get_undefined_property_errors() {
        let class = Rc::new(RefCell::new(Class::new("Point".to_string(), HashMap::new())));
        let instance = Instance::new(Rc::clone(&class));
        let name = Token::new(Type::Identifier, "x".to_string(), None, Location::new(1, 1));
        let object = Object::from(instance.clone());
        assert!(instance.get(&name, &object).is_err());
    }
}
