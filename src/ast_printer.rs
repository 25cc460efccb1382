use crate::expr::Expr;
use crate::token::TokenType;

/// Parenthesized prefix rendering of an expression tree.
pub struct Ast;

impl Ast {
    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(token) => match &token.token_type {
                TokenType::NUMBER(n) => {
                    if n.fract() == 0.0 {
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }

                TokenType::STRING(s) => s.to_string(),

                TokenType::TRUE => "true".to_string(),

                TokenType::FALSE => "false".to_string(),

                TokenType::NIL => "nil".to_string(),

                _ => unreachable!("Invalid literal"),
            },

            Expr::Grouping(inner) => format!("(group {})", self.print(inner)),

            Expr::Unary { operator, right } => {
                let op_str = match operator.token_type {
                    TokenType::MINUS => "-",

                    TokenType::BANG => "!",

                    _ => unreachable!("Invalid unary operator"),
                };

                format!("({} {})", op_str, self.print(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let op_str = match operator.token_type {
                    TokenType::PLUS => "+",

                    TokenType::MINUS => "-",

                    TokenType::STAR => "*",

                    TokenType::SLASH => "/",

                    TokenType::BANG_EQUAL => "!=",

                    TokenType::EQUAL_EQUAL => "==",

                    TokenType::GREATER => ">",

                    TokenType::GREATER_EQUAL => ">=",

                    TokenType::LESS => "<",

                    TokenType::LESS_EQUAL => "<=",

                    _ => unreachable!("Invalid binary operator"),
                };

                format!("({} {} {})", op_str, self.print(left), self.print(right))
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let op_str = match operator.token_type {
                    TokenType::AND => "and",

                    TokenType::OR => "or",

                    _ => unreachable!("Invalid logical operator"),
                };

                format!("({} {} {})", op_str, self.print(left), self.print(right))
            }

            Expr::Variable { name, .. } => name.lexeme.to_string(),

            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, self.print(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut rendered = format!("(call {}", self.print(callee));

                for arg in arguments {
                    rendered.push(' ');
                    rendered.push_str(&self.print(arg));
                }

                rendered.push(')');

                rendered
            }

            Expr::Get { object, name } => {
                format!("(. {} {})", self.print(object), name.lexeme)
            }

            Expr::Set {
                object,
                name,
                value,
            } => format!(
                "(= (. {} {}) {})",
                self.print(object),
                name.lexeme,
                self.print(value)
            ),

            Expr::This { .. } => "this".to_string(),

            Expr::Super { method, .. } => format!("(super {})", method.lexeme),
        }
    }
}
