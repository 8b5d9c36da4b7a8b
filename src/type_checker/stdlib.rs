//! Standard library signatures.
//!
//! The built-in I/O, conversion and string routines are ordinary symbols bound in the
//! outermost scope before any user code is checked, so user code can shadow them.

use lazy_static::lazy_static;

use crate::ast::types::{ArrayType, DataType, FunctionType, ParameterType, Primitive};

/// Bumped whenever a signature in [`STDLIB`] changes.
pub const STDLIB_VERSION: u32 = 1;

fn by_value(primitive: Primitive) -> ParameterType {
    ParameterType {
        data_type: DataType::Primitive(primitive),
        by_reference: false,
    }
}

fn byte_buffer() -> ParameterType {
    ParameterType {
        data_type: DataType::Array(ArrayType {
            element: Primitive::Byte,
            size: None,
        }),
        by_reference: true,
    }
}

fn signature(parameters: Vec<ParameterType>, return_type: Option<Primitive>) -> FunctionType {
    FunctionType {
        parameters,
        return_type,
    }
}

lazy_static! {
    pub static ref STDLIB: Vec<(&'static str, FunctionType)> = vec![
        // Output
        ("writeInteger", signature(vec![by_value(Primitive::Int)], None)),
        ("writeByte", signature(vec![by_value(Primitive::Byte)], None)),
        ("writeChar", signature(vec![by_value(Primitive::Byte)], None)),
        ("writeString", signature(vec![byte_buffer()], None)),
        // Input
        ("readInteger", signature(vec![], Some(Primitive::Int))),
        ("readByte", signature(vec![], Some(Primitive::Byte))),
        ("readChar", signature(vec![], Some(Primitive::Byte))),
        ("readString", signature(vec![by_value(Primitive::Int), byte_buffer()], None)),
        // Conversions
        ("extend", signature(vec![by_value(Primitive::Byte)], Some(Primitive::Int))),
        ("shrink", signature(vec![by_value(Primitive::Int)], Some(Primitive::Byte))),
        // Strings
        ("strlen", signature(vec![byte_buffer()], Some(Primitive::Int))),
        ("strcmp", signature(vec![byte_buffer(), byte_buffer()], Some(Primitive::Int))),
        ("strcpy", signature(vec![byte_buffer(), byte_buffer()], None)),
        ("strcat", signature(vec![byte_buffer(), byte_buffer()], None)),
    ];
}
