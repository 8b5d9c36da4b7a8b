/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Sum types for each syntactic category, plus operators
/// - definitions: Function, parameter and variable definitions
/// - expressions: Definitions for literals, references, calls, arithmetic and conditions
/// - statements: Definitions for the statement kinds
/// - types: The static type model shared with the type checker
pub mod ast;
pub mod definitions;
pub mod expressions;
pub mod statements;
pub mod types;
