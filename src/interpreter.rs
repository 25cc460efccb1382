use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::callable::{LoxCallable, LoxClass, LoxFunction, LoxInstance};
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::expr::Expr;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Why statement execution stopped early.  `Return` rides the same channel
/// as errors but is intercepted at the enclosing `LoxFunction::call`; it
/// never escapes the evaluator.
pub enum Unwind {
    Return(Value),
    Error(LoxError),
}

impl From<LoxError> for Unwind {
    fn from(error: LoxError) -> Self {
        Unwind::Error(error)
    }
}

type ExecResult = std::result::Result<(), Unwind>;

/// Tree-walking evaluator.  `print` output goes to the injected writer; the
/// global environment and the resolution table live for the lifetime of one
/// instance, so a REPL keeps its state across lines.
pub struct Interpreter<'w> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,

    /// Resolver-supplied scope distances, keyed by expression id.
    locals: HashMap<usize, usize>,

    out: &'w mut dyn Write,
}

impl<'w> Interpreter<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        let globals = Environment::new();

        globals.borrow_mut().define(
            "clock",
            Value::NativeFunction {
                name: "clock".to_string(),
                arity: 0,
                func: clock_native,
            },
        );

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Execute a resolved program in source order.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        info!("Interpreting {} statement(s)", statements.len());

        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                return match unwind {
                    Unwind::Error(e) => Err(e),

                    // The resolver rejects top-level `return`.
                    Unwind::Return(_) => Ok(()),
                };
            }
        }

        Ok(())
    }

    /// Resolver callback: `id` refers to a binding `depth` scopes out.
    pub fn note_local(&mut self, id: usize, depth: usize) {
        debug!("Noting local id={} at depth {}", id, depth);

        self.locals.insert(id, depth);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(())
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;

                writeln!(self.out, "{}", value).map_err(LoxError::Io)?;

                Ok(())
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(&name.lexeme, value);

                Ok(())
            }

            Stmt::Block(statements) => self.execute_block(
                statements,
                Environment::with_enclosing(Rc::clone(&self.environment)),
            ),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    self.execute(body)?;
                }

                Ok(())
            }

            Stmt::Function(declaration) => {
                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));

                Ok(())
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Err(Unwind::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.class_declaration(name, superclass.as_ref(), methods),
        }
    }

    /// Run `statements` inside `environment`, restoring the caller's
    /// environment on every exit path, early unwinds included.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> ExecResult {
        let previous: Rc<RefCell<Environment>> =
            std::mem::replace(&mut self.environment, environment);

        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                self.environment = previous;

                return Err(unwind);
            }
        }

        self.environment = previous;

        Ok(())
    }

    fn class_declaration(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> ExecResult {
        let superclass_value: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => {
                let value: Value = self.evaluate(expr)?;

                match value {
                    Value::Class(class) => Some(class),

                    _ => {
                        let line = match expr {
                            Expr::Variable { name, .. } => name.line,
                            _ => name.line,
                        };

                        return Err(
                            LoxError::runtime(line, "Superclass must be a class.").into()
                        );
                    }
                }
            }

            None => None,
        };

        // Placeholder binding so methods can refer to the class by name.
        self.environment.borrow_mut().define(&name.lexeme, Value::Nil);

        // Methods close over an extra frame holding `super` when inheriting.
        let defining_env: Rc<RefCell<Environment>> = match &superclass_value {
            Some(superclass) => {
                let env = Environment::with_enclosing(Rc::clone(&self.environment));

                env.borrow_mut()
                    .define("super", Value::Class(Rc::clone(superclass)));

                env
            }

            None => Rc::clone(&self.environment),
        };

        let mut method_map: HashMap<String, Rc<LoxFunction>> = HashMap::new();

        for method in methods {
            let is_initializer: bool = method.name.lexeme == "init";

            let function =
                LoxFunction::new(Rc::clone(method), Rc::clone(&defining_env), is_initializer);

            // On duplicate method names the later definition wins.
            method_map.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        let class = Value::Class(Rc::new(LoxClass::new(
            name.lexeme.clone(),
            superclass_value,
            method_map,
        )));

        self.environment.borrow_mut().assign(name, class)?;

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(token) => Ok(literal_value(token)),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let right_val: Value = self.evaluate(right)?;

                match operator.token_type {
                    TokenType::MINUS => match right_val {
                        Value::Number(n) => Ok(Value::Number(-n)),

                        _ => Err(LoxError::runtime(operator.line, "Operand must be a number.")),
                    },

                    TokenType::BANG => Ok(Value::Bool(!is_truthy(&right_val))),

                    _ => unreachable!("Invalid unary operator"),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => self.binary_expression(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left_val: Value = self.evaluate(left)?;

                // Short-circuit by handing back the left operand itself.
                match operator.token_type {
                    TokenType::OR if is_truthy(&left_val) => Ok(left_val),

                    TokenType::AND if !is_truthy(&left_val) => Ok(left_val),

                    _ => self.evaluate(right),
                }
            }

            Expr::Variable { id, name } => self.lookup_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => Environment::assign_at(
                        &self.environment,
                        distance,
                        name,
                        value.clone(),
                    )?,

                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.call_expression(callee, paren, arguments),

            Expr::Get { object, name } => {
                let object: Value = self.evaluate(object)?;

                match object {
                    Value::Instance(instance) => LoxInstance::get(&instance, name),

                    _ => Err(LoxError::runtime(
                        name.line,
                        "Only instances have properties.",
                    )),
                }
            }

            Expr::Set {
                object,
                name,
                value,
            } => {
                let object: Value = self.evaluate(object)?;

                match object {
                    Value::Instance(instance) => {
                        let value: Value = self.evaluate(value)?;

                        instance.borrow_mut().set(name, value.clone());

                        Ok(value)
                    }

                    _ => Err(LoxError::runtime(name.line, "Only instances have fields.")),
                }
            }

            Expr::This { id, keyword } => self.lookup_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.super_expression(*id, keyword, method),
        }
    }

    fn binary_expression(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left_val: Value = self.evaluate(left)?;
        let right_val: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),

                _ => Err(LoxError::runtime(
                    operator.line,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::MINUS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),

                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            },

            TokenType::STAR => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),

                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            },

            // Division by zero follows IEEE-754.
            TokenType::SLASH => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),

                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            },

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left_val == right_val)),

            TokenType::BANG_EQUAL => Ok(Value::Bool(left_val != right_val)),

            TokenType::LESS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),

                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            },

            TokenType::LESS_EQUAL => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a <= b)),

                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            },

            TokenType::GREATER => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),

                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            },

            TokenType::GREATER_EQUAL => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a >= b)),

                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            },

            _ => unreachable!("Invalid binary operator"),
        }
    }

    fn call_expression(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> Result<Value> {
        let callee_val: Value = self.evaluate(callee)?;

        let mut args: Vec<Value> = Vec::with_capacity(arguments.len());

        for argument in arguments {
            args.push(self.evaluate(argument)?);
        }

        match callee_val {
            Value::Function(function) => {
                self.check_arity(function.arity(), args.len(), paren)?;

                function.call(self, args)
            }

            Value::Class(class) => {
                self.check_arity(class.arity(), args.len(), paren)?;

                class.call(self, args)
            }

            Value::NativeFunction { name, arity, func } => {
                self.check_arity(arity, args.len(), paren)?;

                debug!("Calling native fn {}", name);

                func(&args).map_err(|message| LoxError::runtime(paren.line, message))
            }

            _ => Err(LoxError::runtime(
                paren.line,
                "Can only call functions and classes.",
            )),
        }
    }

    fn check_arity(&self, expected: usize, got: usize, paren: &Token) -> Result<()> {
        if expected != got {
            return Err(LoxError::runtime(
                paren.line,
                format!("Expected {} arguments but got {}.", expected, got),
            ));
        }

        Ok(())
    }

    fn lookup_variable(&self, id: usize, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, name),

            None => self.globals.borrow().get(name),
        }
    }

    /// `super` lives one scope outside the `this` frame the method was bound
    /// with, so the receiver sits at `distance - 1`.
    fn super_expression(&mut self, id: usize, keyword: &Token, method: &Token) -> Result<Value> {
        let distance: usize = match self.locals.get(&id) {
            Some(&d) => d,

            None => {
                return Err(LoxError::runtime(
                    keyword.line,
                    "Can't use 'super' outside of a class.",
                ))
            }
        };

        let superclass = Environment::get_bound(&self.environment, distance, "super", keyword.line)?;
        let object = Environment::get_bound(&self.environment, distance - 1, "this", keyword.line)?;

        match (superclass, object) {
            (Value::Class(superclass), Value::Instance(instance)) => {
                match superclass.find_method(&method.lexeme) {
                    Some(found) => Ok(Value::Function(Rc::new(found.bind(instance)))),

                    None => Err(LoxError::runtime(
                        method.line,
                        format!("Undefined property '{}'.", method.lexeme),
                    )),
                }
            }

            _ => Err(LoxError::runtime(
                keyword.line,
                "Can't use 'super' outside of a class.",
            )),
        }
    }
}

fn literal_value(token: &Token) -> Value {
    match &token.token_type {
        TokenType::NUMBER(n) => Value::Number(*n),

        TokenType::STRING(s) => Value::String(s.clone()),

        TokenType::TRUE => Value::Bool(true),

        TokenType::FALSE => Value::Bool(false),

        TokenType::NIL => Value::Nil,

        _ => unreachable!("Invalid literal token"),
    }
}

/// Only `nil` and `false` are falsey.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,

        Value::Bool(b) => *b,

        _ => true,
    }
}

fn clock_native(_args: &[Value]) -> std::result::Result<Value, String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("Clock error: {}", e))?
        .as_secs_f64();

    Ok(Value::Number(timestamp))
}
