use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Unwind};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::FunctionData;
use crate::token::{Token, Type};

fn this_token() -> Token {
    Token::synthetic(Type::This, "this")
}

/// A user-defined function or method: its declaration plus the environment
/// that was active when it was defined. Capturing that environment by
/// reference (not by copy) is what makes closures work.
#[derive(Debug, Clone)]
pub struct Function {
    pub declaration: Rc<FunctionData>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: Rc<FunctionData>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { declaration, closure, is_initializer }
    }

    /// Produces a new function value scoped to `instance`: a fresh
    /// environment enclosing this function's closure, holding only `this`.
    /// Each call to `bind` allocates its own frame, so binding the same
    /// method to two instances never lets one binding see the other's `this`.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);
        Function::new(Rc::clone(&self.declaration), Rc::new(RefCell::new(environment)), self.is_initializer)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.declaration, &other.declaration) && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.declaration.params.iter().zip(arguments.into_iter()) {
            environment.define(&param.lexeme, arg);
        }

        let environment = Rc::new(RefCell::new(environment));

        let result = interpreter.execute_block(&self.declaration.body, environment);

        match result {
            Ok(()) | Err(Unwind::Return(_)) if self.is_initializer => self.closure.borrow().get_at(0, &this_token()),
            Ok(()) => Ok(Object::from(Literal::Nil)),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A builtin implemented in Rust rather than in Lox: `clock` and
/// `printStackDepth`.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && std::ptr::eq(self.function as *const (), other.function as *const ())
    }
}

impl NativeFunction {
    /// The builtins preloaded into every run's globals frame.
    pub fn globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::synthetic(Type::Identifier, "clock"),
                arity: 0,
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .expect("system clock to be after the epoch")
                        .as_micros();
                    Ok(Object::from(now as f64))
                },
            },
            NativeFunction {
                name: Token::synthetic(Type::Identifier, "printStackDepth"),
                arity: 0,
                function: |interpreter, _| {
                    let line = format!("Stack Depth: {}", interpreter.environment_depth());
                    interpreter.write_line(&line);
                    Ok(Object::from(Literal::Nil))
                },
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<callable>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Location;

    fn function_data(name: &str, params: &[&str]) -> Rc<FunctionData> {
        Rc::new(FunctionData {
            name: Token::new(Type::Identifier, name.to_string(), None, Location::new(1, 1)),
            params: params.iter().map(|p| Token::new(Type::Identifier, p.to_string(), None, Location::new(1, 1))).collect(),
            body: vec![],
        })
    }

    #[test]
    fn arity_matches_declared_params() {
        let closure = Rc::new(RefCell::new(Environment::new(None)));
        let function = Function::new(function_data("f", &["a", "b"]), closure, false);
        assert_eq!(function.arity(), 2);
    }

    #[test]
    fn display_matches_fn_name() {
        let closure = Rc::new(RefCell::new(Environment::new(None)));
        let function = Function::new(function_data("greet", &[]), closure, false);
        assert_eq!(function.to_string(), "<fn greet>");
    }
}
