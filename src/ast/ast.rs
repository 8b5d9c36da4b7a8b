use std::fmt::Display;

use crate::Span;

use super::{
    definitions::{ArrayDef, FuncDef, ParDef, PrimVarDef},
    expressions::{
        ArrayElemExpr, BinaryArithExpr, CallExpr, CharLitExpr, CompareCond, ConstCond, IntLitExpr,
        LogicCond, NotCond, StrLitExpr, UnaryArithExpr, VarRefExpr,
    },
    statements::{
        AssignStmt, CallStmt, CompoundStmt, IfElseStmt, IfStmt, ReturnStmt, WhileStmt,
    },
};

/// Local Definition
///
/// Anything that can appear between a function's header and its body.
/// Nested function definitions make procedures lexically nestable.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalDef {
    Func(FuncDef),
    Par(ParDef),
    PrimVar(PrimVarDef),
    Array(ArrayDef),
}

impl LocalDef {
    pub fn get_name(&self) -> &str {
        match self {
            LocalDef::Func(def) => &def.name,
            LocalDef::Par(def) => &def.name,
            LocalDef::PrimVar(def) => &def.name,
            LocalDef::Array(def) => &def.name,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            LocalDef::Func(def) => &def.span,
            LocalDef::Par(def) => &def.span,
            LocalDef::PrimVar(def) => &def.span,
            LocalDef::Array(def) => &def.span,
        }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Compound(CompoundStmt),
    Assign(AssignStmt),
    Call(CallStmt),
    If(IfStmt),
    IfElse(IfElseStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Compound(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::Call(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::IfElse(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }
}

/// Expression
///
/// Conditions are expressions too, but only ever appear where a condition is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(IntLitExpr),
    CharLit(CharLitExpr),
    StrLit(StrLitExpr),
    VarRef(VarRefExpr),
    ArrayElem(ArrayElemExpr),
    Call(CallExpr),
    UnaryArith(UnaryArithExpr),
    BinaryArith(BinaryArithExpr),
    Cond(Cond),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::IntLit(expr) => &expr.span,
            Expr::CharLit(expr) => &expr.span,
            Expr::StrLit(expr) => &expr.span,
            Expr::VarRef(expr) => &expr.span,
            Expr::ArrayElem(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::UnaryArith(expr) => &expr.span,
            Expr::BinaryArith(expr) => &expr.span,
            Expr::Cond(cond) => cond.get_span(),
        }
    }

    /// Whether this expression may be assigned to or passed by reference.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Expr::VarRef(_) | Expr::ArrayElem(_) | Expr::StrLit(_))
    }
}

/// Condition
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Const(ConstCond),
    Not(NotCond),
    Compare(CompareCond),
    Logic(LogicCond),
}

impl Cond {
    pub fn get_span(&self) -> &Span {
        match self {
            Cond::Const(cond) => &cond.span,
            Cond::Not(cond) => &cond.span,
            Cond::Compare(cond) => &cond.span,
            Cond::Logic(cond) => &cond.span,
        }
    }
}

/// L-Value
///
/// The expression forms allowed on the left of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Var(VarRefExpr),
    ArrayElem(ArrayElemExpr),
    Str(StrLitExpr),
}

impl From<LValue> for Expr {
    fn from(lvalue: LValue) -> Self {
        match lvalue {
            LValue::Var(expr) => Expr::VarRef(expr),
            LValue::ArrayElem(expr) => Expr::ArrayElem(expr),
            LValue::Str(expr) => Expr::StrLit(expr),
        }
    }
}

impl From<Cond> for Expr {
    fn from(cond: Cond) -> Self {
        Expr::Cond(cond)
    }
}

/// Unary arithmetic sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

/// Logical connective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
            ArithOp::Mod => write!(f, "%"),
        }
    }
}

impl Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Ne => write!(f, "!="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Le => write!(f, "<="),
            CompareOp::Ge => write!(f, ">="),
        }
    }
}

impl Display for LogicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicOp::And => write!(f, "&"),
            LogicOp::Or => write!(f, "|"),
        }
    }
}
