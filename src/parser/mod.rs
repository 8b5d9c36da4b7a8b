//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into the program's root function definition. It uses a Pratt parser
//! for expressions and conditions with proper operator precedence and handles:
//!
//! - Definitions (functions, parameters, variables and arrays)
//! - Statements (assignments, calls, control flow, returns)
//! - Expressions and conditions
//! - Type parsing for declarations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! with binding power for precedence handling.

pub mod cond;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
