use crate::literal::Literal;
use crate::token::Token;

/// Identity of an expression node, assigned by the parser in creation
/// order. The resolver keys its table by this id, so two uses of the same
/// name on the same line still resolve independently. The driver threads a
/// watermark between REPL lines to keep ids unique for the lifetime of an
/// interpreter.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ExprId(pub usize);

/// An expression: a piece of a program that produces a value.
///
/// `Logical` is kept apart from `Binary` because the two evaluate
/// differently: logical operators short-circuit and return an operand
/// unchanged, binary operators always evaluate both sides.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Literal {
        value: Literal,
    },
    Grouping {
        inner: Box<Expr>,
    },
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Variable {
        id: ExprId,
        name: Token,
    },
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// The closing parenthesis; runtime call errors point at its line.
        paren: Token,
        arguments: Vec<Expr>,
    },
    Get {
        object: Box<Expr>,
        name: Token,
    },
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
    This {
        id: ExprId,
        keyword: Token,
    },
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },
}
