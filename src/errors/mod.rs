//! Error types and error handling for the compiler.
//!
//! This module defines the error type shared by every phase of the front end.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and semantic analysis
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
