use crate::Span;

use super::{
    ast::LocalDef,
    statements::CompoundStmt,
    types::{ArrayType, DataType, ParameterType, Primitive},
};

/// Function Definition
/// A function or procedure with its parameters, local definitions and body.
/// The program itself is a single root `FuncDef`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub parameters: Vec<ParDef>,
    /// `None` for a procedure.
    pub return_type: Option<Primitive>,
    pub locals: Vec<LocalDef>,
    pub body: CompoundStmt,
    pub span: Span,
}

/// Parameter Definition
/// If the parameter is an array, its size is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ParDef {
    pub name: String,
    pub data_type: DataType,
    pub by_reference: bool,
    pub span: Span,
}

impl ParDef {
    pub fn get_parameter_type(&self) -> ParameterType {
        ParameterType {
            data_type: self.data_type,
            by_reference: self.by_reference,
        }
    }
}

/// Primitive Variable Definition
#[derive(Debug, Clone, PartialEq)]
pub struct PrimVarDef {
    pub name: String,
    pub data_type: Primitive,
    pub span: Span,
}

/// Array Definition
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDef {
    pub name: String,
    pub element_type: Primitive,
    pub size: i32,
    pub span: Span,
}

impl ArrayDef {
    pub fn get_array_type(&self) -> ArrayType {
        ArrayType {
            element: self.element_type,
            size: Some(self.size),
        }
    }
}
