use std::sync::atomic::{AtomicUsize, Ordering};

use crate::token::Token;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Mint a process-unique id for a resolvable expression node.  The resolver
/// keys its distance table on these ids, so they must never repeat within the
/// lifetime of one interpreter (REPL lines included).
pub fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub enum Expr {
    /// Literal token: number, string, `true`, `false`, or `nil`.
    Literal(Token),

    /// Parenthesized grouped expression.
    Grouping(Box<Expr>),

    Unary {
        operator: Token,
        right: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short-circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Variable {
        id: usize,
        name: Token,
    },

    Assign {
        id: usize,
        name: Token,
        value: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,

        /// Closing parenthesis; anchors call-site diagnostics.
        paren: Token,

        arguments: Vec<Expr>,
    },

    /// Property read: `object.name`.
    Get {
        object: Box<Expr>,
        name: Token,
    },

    /// Property write: `object.name = value`.
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This {
        id: usize,
        keyword: Token,
    },

    Super {
        id: usize,
        keyword: Token,
        method: Token,
    },
}
