//! Type checking and semantic analysis module.
//!
//! This module validates a parsed program before any code generation:
//!
//! - Verifying type correctness of expressions and statements
//! - Resolving variable and function references through nested scopes
//! - Checking call arity, argument types and pass-by-reference legality
//! - Checking return statements against the enclosing function
//! - Enforcing the shape of the program's entry point
//!
//! The type checker keeps a stack of scopes whose bottom holds the standard
//! library, and stops at the first violation it finds.

pub mod environment;
pub mod stdlib;
pub mod type_checker;
