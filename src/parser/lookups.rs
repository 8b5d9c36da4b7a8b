use std::collections::HashMap;

use crate::{
    ast::ast::{Cond, Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{cond::*, expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;
pub type CondNUDHandler = fn(&mut Parser) -> Result<Cond, Error>;
pub type CondLEDHandler = fn(&mut Parser, Cond, BindingPower) -> Result<Cond, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Char, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_symbol_expr);
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_compound_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

pub fn create_token_cond_lookups(parser: &mut Parser) {
    parser.cond_led(TokenKind::Or, BindingPower::LogicalOr, parse_logic_cond);
    parser.cond_led(TokenKind::And, BindingPower::LogicalAnd, parse_logic_cond);

    parser.cond_nud(TokenKind::True, parse_const_cond);
    parser.cond_nud(TokenKind::False, parse_const_cond);
    parser.cond_nud(TokenKind::Not, parse_not_cond);
    parser.cond_nud(TokenKind::OpenParen, parse_grouping_cond);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type CondNUDLookup = HashMap<TokenKind, CondNUDHandler>;
pub type CondLEDLookup = HashMap<TokenKind, CondLEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
