use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Cond, Expr, LValue, Stmt},
    expressions::CallExpr,
};

/// Compound Statement
/// A braced sequence of statements. An empty statement `;` is an empty compound.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl CompoundStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// Assignment Statement
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lvalue: LValue,
    pub expr: Expr,
    pub span: Span,
}

/// Call Statement
/// A call whose value, if any, is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub call: CallExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Cond,
    pub stmt: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfElseStmt {
    pub cond: Cond,
    pub then_stmt: Box<Stmt>,
    pub else_stmt: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Cond,
    pub stmt: Box<Stmt>,
    pub span: Span,
}

/// Return Statement
/// `expr` is `None` for a bare `return;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expr: Option<Expr>,
    pub span: Span,
}
