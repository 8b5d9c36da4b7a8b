//! Type system definitions for the language.
//!
//! This module defines the closed set of static types:
//!
//! - Primitive types (`int`, `byte`, and `bool` for conditions only)
//! - Array types, whose size matters for declarations but never for compatibility
//! - Parameter types, a data type plus its passing mode
//! - Function types, an ordered parameter list and an optional return primitive
//!
//! Types are plain values: they are compared structurally and carry no
//! references into the tree.

use std::fmt::Display;

/// A primitive type.
///
/// `Bool` is only ever the static type of a condition; it cannot be declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Byte,
    Bool,
}

impl Primitive {
    /// Whether a variable, parameter or return type may be declared as this primitive.
    pub fn is_declarable(self) -> bool {
        !matches!(self, Primitive::Bool)
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Int => write!(f, "int"),
            Primitive::Byte => write!(f, "byte"),
            Primitive::Bool => write!(f, "bool"),
        }
    }
}

/// An array of primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayType {
    pub element: Primitive,
    pub size: Option<i32>,
}

impl ArrayType {
    /// Arrays are compatible when their element types match; size is ignored.
    pub fn is_compatible_with(&self, other: &ArrayType) -> bool {
        self.element == other.element
    }
}

impl Display for ArrayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.size {
            Some(size) => write!(f, "{}[{}]", self.element, size),
            None => write!(f, "{}[]", self.element),
        }
    }
}

/// A type a variable can hold: a primitive or an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Primitive(Primitive),
    Array(ArrayType),
}

impl DataType {
    pub fn is_compatible_with(&self, other: &DataType) -> bool {
        match (self, other) {
            (DataType::Primitive(left), DataType::Primitive(right)) => left == right,
            (DataType::Array(left), DataType::Array(right)) => left.is_compatible_with(right),
            _ => false,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            DataType::Primitive(primitive) => Some(*primitive),
            DataType::Array(_) => None,
        }
    }

    /// The primitive at the bottom of this type (the element type for arrays).
    pub fn base(&self) -> Primitive {
        match self {
            DataType::Primitive(primitive) => *primitive,
            DataType::Array(array) => array.element,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Primitive(primitive) => write!(f, "{}", primitive),
            DataType::Array(array) => write!(f, "{}", array),
        }
    }
}

/// The type of a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterType {
    pub data_type: DataType,
    pub by_reference: bool,
}

impl Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.by_reference {
            write!(f, "reference {}", self.data_type)
        } else {
            write!(f, "{}", self.data_type)
        }
    }
}

/// The type of a function. A `None` return type marks a procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub parameters: Vec<ParameterType>,
    pub return_type: Option<Primitive>,
}

impl FunctionType {
    pub fn is_procedure(&self) -> bool {
        self.return_type.is_none()
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        match self.return_type {
            Some(return_type) => write!(f, "({}) : {}", parameters, return_type),
            None => write!(f, "({}) : proc", parameters),
        }
    }
}

/// Any static type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(Primitive),
    Array(ArrayType),
    Parameter(ParameterType),
    Function(FunctionType),
}

impl Type {
    /// The data type of a variable-like value; `None` for functions.
    ///
    /// Parameter types degrade to their bare data type.
    pub fn as_data_type(&self) -> Option<DataType> {
        match self {
            Type::Primitive(primitive) => Some(DataType::Primitive(*primitive)),
            Type::Array(array) => Some(DataType::Array(*array)),
            Type::Parameter(parameter) => Some(parameter.data_type),
            Type::Function(_) => None,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Type::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Whether a value of this type may be an arithmetic operand (`int` or `byte`).
    pub fn is_arithmetic_operand(&self) -> bool {
        matches!(self, Type::Primitive(Primitive::Int | Primitive::Byte))
    }
}

impl From<Primitive> for Type {
    fn from(primitive: Primitive) -> Self {
        Type::Primitive(primitive)
    }
}

impl From<DataType> for Type {
    fn from(data_type: DataType) -> Self {
        match data_type {
            DataType::Primitive(primitive) => Type::Primitive(primitive),
            DataType::Array(array) => Type::Array(array),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(primitive) => write!(f, "{}", primitive),
            Type::Array(array) => write!(f, "{}", array),
            Type::Parameter(parameter) => write!(f, "{}", parameter),
            Type::Function(function) => write!(f, "{}", function),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_compatibility_ignores_size() {
        let sized = ArrayType {
            element: Primitive::Byte,
            size: Some(10),
        };
        let unsized_ = ArrayType {
            element: Primitive::Byte,
            size: None,
        };
        let ints = ArrayType {
            element: Primitive::Int,
            size: Some(10),
        };

        assert!(sized.is_compatible_with(&unsized_));
        assert!(DataType::Array(unsized_).is_compatible_with(&DataType::Array(sized)));
        assert!(!sized.is_compatible_with(&ints));
        assert!(!DataType::Array(sized).is_compatible_with(&DataType::Primitive(Primitive::Byte)));
    }

    #[test]
    fn test_arithmetic_operands() {
        assert!(Type::Primitive(Primitive::Int).is_arithmetic_operand());
        assert!(Type::Primitive(Primitive::Byte).is_arithmetic_operand());
        assert!(!Type::Primitive(Primitive::Bool).is_arithmetic_operand());
        assert!(!Type::Array(ArrayType {
            element: Primitive::Int,
            size: Some(2)
        })
        .is_arithmetic_operand());
    }

    #[test]
    fn test_parameter_degrades_to_data_type() {
        let parameter = Type::Parameter(ParameterType {
            data_type: DataType::Primitive(Primitive::Int),
            by_reference: true,
        });

        assert_eq!(
            parameter.as_data_type(),
            Some(DataType::Primitive(Primitive::Int))
        );
        assert_eq!(Type::Function(FunctionType {
            parameters: vec![],
            return_type: None
        })
        .as_data_type(), None);
    }

    #[test]
    fn test_display() {
        let function = FunctionType {
            parameters: vec![
                ParameterType {
                    data_type: DataType::Primitive(Primitive::Int),
                    by_reference: false,
                },
                ParameterType {
                    data_type: DataType::Array(ArrayType {
                        element: Primitive::Byte,
                        size: None,
                    }),
                    by_reference: true,
                },
            ],
            return_type: None,
        };

        assert_eq!(function.to_string(), "(int, reference byte[]) : proc");
        assert_eq!(
            Type::Array(ArrayType {
                element: Primitive::Int,
                size: Some(4)
            })
            .to_string(),
            "int[4]"
        );
    }
}
