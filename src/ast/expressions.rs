use crate::Span;

use super::ast::{ArithOp, CompareOp, Cond, Expr, LogicOp, Sign};

// LITERALS

/// Integer Literal
/// Represents an integer constant in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct IntLitExpr {
    pub value: i32,
    pub span: Span,
}

/// Character Literal
/// Represents a character constant (of type `byte`) in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct CharLitExpr {
    pub value: u8,
    pub span: Span,
}

/// String Literal
/// Holds the decoded bytes; the terminator is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLitExpr {
    pub value: Vec<u8>,
    pub span: Span,
}

impl StrLitExpr {
    /// Storage needed for the literal, including its terminator.
    pub fn storage_size(&self) -> i32 {
        self.value.len() as i32 + 1
    }
}

// REFERENCES

/// Variable Reference
#[derive(Debug, Clone, PartialEq)]
pub struct VarRefExpr {
    pub name: String,
    pub span: Span,
}

/// Array Element
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayElemExpr {
    pub name: String,
    pub index: Box<Expr>,
    pub span: Span,
}

/// Call Expression
/// Calls are always by name; there are no first-class functions.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

// ARITHMETIC

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryArithExpr {
    pub sign: Sign,
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryArithExpr {
    pub left: Box<Expr>,
    pub op: ArithOp,
    pub right: Box<Expr>,
    pub span: Span,
}

// CONDITIONS

/// `true` or `false`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstCond {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotCond {
    pub cond: Box<Cond>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareCond {
    pub left: Box<Expr>,
    pub op: CompareOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicCond {
    pub left: Box<Cond>,
    pub op: LogicOp,
    pub right: Box<Cond>,
    pub span: Span,
}
