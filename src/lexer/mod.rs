//! Lexical analysis module.
//!
//! Converts Alan source text into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Escape sequences in character and string literals
//! - `--` line comments and nested `(* *)` block comments

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
