use std::io::Write;

use log::{debug, info};

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::stmt::Stmt;
use crate::token::Token;

/// Pipeline front-end: feeds a source buffer through
/// scanner → parser → resolver → evaluator, streaming diagnostics to the
/// error writer and `print` output to the program writer.
///
/// One `Lox` instance keeps its global environment and resolution table
/// across `run` calls, which is what gives the REPL its session state.
pub struct Lox<'w> {
    interpreter: Interpreter<'w>,
    err: &'w mut dyn Write,
    had_error: bool,
    had_runtime_error: bool,
}

impl<'w> Lox<'w> {
    pub fn new(out: &'w mut dyn Write, err: &'w mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(out),
            err,
            had_error: false,
            had_runtime_error: false,
        }
    }

    /// Scan, parse, resolve, and execute one source buffer.  Any front-end
    /// diagnostic skips execution; a runtime error aborts it.
    pub fn run(&mut self, source: &[u8]) {
        info!("Running {} byte(s) of source", source.len());

        let mut tokens: Vec<Token> = Vec::new();

        for item in Scanner::new(source) {
            match item {
                Ok(token) => tokens.push(token),

                Err(e) => self.report(e),
            }
        }

        let (statements, parse_errors): (Vec<Stmt>, Vec<LoxError>) = Parser::new(tokens).parse();

        for e in parse_errors {
            self.report(e);
        }

        if self.had_error {
            debug!("Skipping resolution: front-end errors present");

            return;
        }

        let resolve_errors: Vec<LoxError> =
            Resolver::new(&mut self.interpreter).resolve(&statements);

        for e in resolve_errors {
            self.report(e);
        }

        if self.had_error {
            debug!("Skipping execution: resolution errors present");

            return;
        }

        if let Err(e) = self.interpreter.interpret(&statements) {
            let _ = writeln!(self.err, "{}", e);

            self.had_runtime_error = true;
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clear the per-run flags.  The REPL calls this between lines; session
    /// state (globals, resolution table) is kept.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    fn report(&mut self, error: LoxError) {
        let _ = writeln!(self.err, "{}", error);

        self.had_error = true;
    }
}
