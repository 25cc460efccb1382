use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::interpreter::{Interpreter, Unwind};
use crate::stmt::FunctionDecl;
use crate::token::Token;
use crate::value::Value;

/// Invocable runtime values: user functions, bound methods, and classes.
pub trait LoxCallable {
    fn arity(&self) -> usize;

    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Value>) -> Result<Value>;
}

/// A function value: shared declaration plus the environment captured at
/// declaration time.  Bound methods extend `closure` with a `this` frame.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(
        declaration: Rc<FunctionDecl>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        LoxFunction {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// Produce a copy of this function whose closure additionally binds
    /// `this` to the given instance.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> LoxFunction {
        let environment = Environment::with_enclosing(Rc::clone(&self.closure));

        environment
            .borrow_mut()
            .define("this", Value::Instance(instance));

        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }

    fn bound_this(&self) -> Result<Value> {
        Environment::get_bound(&self.closure, 0, "this", self.declaration.name.line)
    }
}

impl LoxCallable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Value>) -> Result<Value> {
        debug!(
            "Calling <fn {}> with {} argument(s)",
            self.name(),
            arguments.len()
        );

        let environment = Environment::with_enclosing(Rc::clone(&self.closure));

        for (param, arg) in self.declaration.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, arg);
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            // Initializers yield the bound instance no matter how the body
            // exited, bare `return;` included.
            Ok(()) => {
                if self.is_initializer {
                    self.bound_this()
                } else {
                    Ok(Value::Nil)
                }
            }

            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    self.bound_this()
                } else {
                    Ok(value)
                }
            }

            Err(Unwind::Error(e)) => Err(e),
        }
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Closures can reach back to the function that owns them; never walk
        // the environment chain here.
        write!(f, "<fn {}>", self.name())
    }
}

#[derive(Debug)]
pub struct LoxClass {
    pub name: String,
    pub superclass: Option<Rc<LoxClass>>,
    pub methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        LoxClass {
            name,
            superclass,
            methods,
        }
    }

    /// Look up a method on this class, walking the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }

        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }
}

/// Calling a class constructs an instance; the class's arity is its
/// initializer's arity, or zero when it has none.
impl LoxCallable for Rc<LoxClass> {
    fn arity(&self) -> usize {
        self.find_method("init")
            .map_or(0, |initializer| initializer.arity())
    }

    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Value>) -> Result<Value> {
        debug!("Instantiating class {}", self.name);

        let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(self))));

        if let Some(initializer) = self.find_method("init") {
            initializer
                .bind(Rc::clone(&instance))
                .call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

pub struct LoxInstance {
    pub class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        LoxInstance {
            class,
            fields: HashMap::new(),
        }
    }

    /// Property read: fields first, then class methods bound to the
    /// receiver.  Fields shadow methods of the same name.
    pub fn get(instance: &Rc<RefCell<LoxInstance>>, name: &Token) -> Result<Value> {
        let field = instance.borrow().fields.get(&name.lexeme).cloned();

        if let Some(value) = field {
            return Ok(value);
        }

        let method = instance.borrow().class.find_method(&name.lexeme);

        if let Some(method) = method {
            return Ok(Value::Function(Rc::new(method.bind(Rc::clone(instance)))));
        }

        Err(LoxError::runtime(
            name.line,
            format!("Undefined property '{}'.", name.lexeme),
        ))
    }

    /// Property write.  Creates the field if it does not exist.
    pub fn set(&mut self, name: &Token, value: Value) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fields can hold the instance itself; print the identity only.
        write!(f, "{} instance", self.class.name)
    }
}
