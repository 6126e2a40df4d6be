use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

/// The non-local control-flow signal every statement-execution path
/// threads instead of a plain `RuntimeError`: either a genuine failure, or
/// a `return` unwinding toward the function call that will catch it. Using
/// the same `Result::Err` rail as ordinary errors means `?` carries both
/// through block/if/while execution for free; [`crate::function::Function::call`]
/// is the one place that intercepts `Return` and turns it back into a value.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type EvalResult = Result<Object, Unwind>;
type ExecResult = Result<(), Unwind>;

/// Walks the AST against an environment chain, using the resolver's depth
/// table to reach local variables in a constant number of hops rather than
/// by searching scope-by-scope at runtime.
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<NodeId, usize>,
    output: Box<dyn Write>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Builds an interpreter that writes `print` output (and
    /// `printStackDepth`'s line) to `output` instead of the process's real
    /// standard output, so a test can capture and assert on it.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));

        for native in NativeFunction::globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }
        globals.borrow_mut().define("env", Object::from("LOX"));

        Interpreter { globals: Rc::clone(&globals), environment: globals, locals: HashMap::new(), output }
    }

    pub fn write_line(&mut self, line: &str) {
        writeln!(self.output, "{line}").expect("interpreter output sink to accept writes");
    }

    /// Recorded by the resolver: `id` resolves to a variable `depth` frames
    /// out from wherever it is looked up at runtime.
    pub fn resolve(&mut self, id: NodeId, depth: usize) {
        self.locals.insert(id, depth);
    }

    pub fn environment_depth(&self) -> usize {
        self.environment.borrow().level
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => return Err(error),
                Err(Unwind::Return(_)) => unreachable!("top-level return is rejected by the resolver"),
            }
        }

        Ok(())
    }

    /// REPL variant: if the program is a single bare expression statement,
    /// evaluate and return its value instead of discarding it, so the REPL
    /// can echo it back to the user.
    pub fn interpret_repl(&mut self, statements: &[Stmt]) -> Result<Option<Object>, RuntimeError> {
        if let [Stmt::Expression(data)] = statements {
            return self.evaluate(&data.expr).map(Some).map_err(|unwind| match unwind {
                Unwind::Error(error) => error,
                Unwind::Return(_) => unreachable!("return cannot appear outside a function"),
            });
        }

        self.interpret(statements).map(|()| None)
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, environment);

        let result = (|| {
            for statement in statements {
                self.execute(statement)?;
            }
            Ok(())
        })();

        self.environment = previous;
        result
    }

    fn lookup_variable(&mut self, id: NodeId, name: &Token) -> EvalResult {
        match self.locals.get(&id) {
            Some(&depth) => Ok(self.environment.borrow().get_at(depth, name)?),
            None => Ok(self.globals.borrow().get(name)?),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn check_number_operand(operator: &Token, operand: &Object) -> Result<f64, RuntimeError> {
    operand.as_number().ok_or_else(|| RuntimeError::new(operator.clone(), "Operand must be a number."))
}

fn check_number_operands(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(RuntimeError::new(operator.clone(), "Operands must be numbers.")),
    }
}

impl ExprVisitor<EvalResult> for Interpreter {
    fn visit_literal_expr(&mut self, data: &Literal) -> EvalResult {
        Ok(Object::from(data.clone()))
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> EvalResult {
        self.lookup_variable(data.id, &data.name)
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> EvalResult {
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(&depth) => self.environment.borrow_mut().assign_at(depth, &data.name, value.clone()),
            None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> EvalResult {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => {
                let n = check_number_operand(&data.operator, &right)?;
                Ok(Object::from(-n))
            }
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("parser only emits '-' or '!' as unary operators"),
        }
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> EvalResult {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Minus => {
                let (l, r) = check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l - r))
            }
            Type::Slash => {
                let (l, r) = check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l / r))
            }
            Type::Star => {
                let (l, r) = check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l * r))
            }
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                }
                // Latitude over the book: a number adjacent to a string
                // concatenates instead of erroring.
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                }
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::Number(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                }
                _ => Err(RuntimeError::new(data.operator.clone(), "Operands must be two numbers or two strings.").into()),
            },
            Type::Greater => {
                let (l, r) = check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l > r))
            }
            Type::GreaterEqual => {
                let (l, r) = check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l >= r))
            }
            Type::Less => {
                let (l, r) = check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l < r))
            }
            Type::LessEqual => {
                let (l, r) = check_number_operands(&data.operator, &left, &right)?;
                Ok(Object::from(l <= r))
            }
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::EqualEqual => Ok(Object::from(left == right)),
            _ => unreachable!("parser only emits arithmetic/comparison/equality operators as binary"),
        }
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> EvalResult {
        let left = self.evaluate(&data.left)?;

        match data.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::Or => self.evaluate(&data.right),
            Type::And if !left.is_truthy() => Ok(left),
            Type::And => self.evaluate(&data.right),
            _ => unreachable!("parser only emits 'and'/'or' as logical operators"),
        }
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> EvalResult {
        self.evaluate(&data.expr)
    }

    fn visit_call_expr(&mut self, data: &CallData) -> EvalResult {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(f) => f.arity(),
            Object::NativeFunction(f) => f.arity(),
            Object::Class(c) => c.borrow().arity(),
            _ => return Err(RuntimeError::new(data.paren.clone(), "Can only call functions and classes.").into()),
        };

        if arguments.len() != arity {
            return Err(RuntimeError::new(
                data.paren.clone(),
                format!("Expected {arity} arguments but got {}.", arguments.len()),
            )
            .into());
        }

        let result = match callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(native) => native.call(self, arguments),
            Object::Class(class) => Class::instantiate(&class, self, arguments),
            _ => unreachable!("non-callable objects are rejected above"),
        };

        Ok(result?)
    }

    fn visit_get_expr(&mut self, data: &GetData) -> EvalResult {
        let object = self.evaluate(&data.object)?;

        if let Object::Instance(instance) = &object {
            return Ok(instance.borrow().get(&data.name, &object)?);
        }

        Err(RuntimeError::new(data.name.clone(), "Only instances have properties.").into())
    }

    fn visit_set_expr(&mut self, data: &SetData) -> EvalResult {
        let object = self.evaluate(&data.object)?;

        let Object::Instance(instance) = &object else {
            return Err(RuntimeError::new(data.name.clone(), "Only instances have fields.").into());
        };

        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this_expr(&mut self, data: &ThisData) -> EvalResult {
        self.lookup_variable(data.id, &data.keyword)
    }
}

impl StmtVisitor<ExecResult> for Interpreter {
    fn visit_expression_stmt(&mut self, data: &ExpressionData) -> ExecResult {
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, data: &PrintData) -> ExecResult {
        let value = self.evaluate(&data.expr)?;
        self.write_line(&value.to_string());
        Ok(())
    }

    fn visit_var_stmt(&mut self, data: &VarData) -> ExecResult {
        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, data: &BlockData) -> ExecResult {
        let enclosing = Rc::clone(&self.environment);
        let block_env = Rc::new(RefCell::new(Environment::new(Some(enclosing))));
        self.execute_block(&data.statements, block_env)
    }

    fn visit_if_stmt(&mut self, data: &IfData) -> ExecResult {
        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, data: &WhileData) -> ExecResult {
        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }
        Ok(())
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) -> ExecResult {
        let function = Function::new(Rc::new(data.clone()), Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) -> ExecResult {
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> ExecResult {
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        let mut methods = HashMap::new();
        for method in &data.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::new(method.clone()), Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), methods)));
        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
        Ok(())
    }
}
