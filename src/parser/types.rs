//! Type parsing implementation.
//!
//! Data types are `int` or `byte`, optionally followed by `[]` or `[N]`.
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers. Callers decide whether an array, and its size, is
//! allowed where the type appears.

use std::collections::HashMap;

use crate::{
    ast::types::{ArrayType, DataType, Primitive},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_int_const, lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<DataType, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, DataType, BindingPower) -> Result<DataType, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Int, parse_primitive_type);
    parser.type_nud(TokenKind::Byte, parse_primitive_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Primary, parse_array_type);
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<DataType, Error> {
    let primitive = match parser.current_token_kind() {
        TokenKind::Int => Primitive::Int,
        TokenKind::Byte => Primitive::Byte,
        _ => return Err(parser.unexpected_detailed("expected `int` or `byte`")),
    };
    parser.advance();

    Ok(DataType::Primitive(primitive))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: DataType,
    _bp: BindingPower,
) -> Result<DataType, Error> {
    let element = match left {
        DataType::Primitive(primitive) => primitive,
        DataType::Array(_) => {
            return Err(parser.unexpected_detailed("arrays have a single dimension"))
        }
    };

    parser.expect(TokenKind::OpenBracket)?;

    let size = if parser.current_token_kind() == TokenKind::Number {
        let token = parser.advance().clone();
        Some(parse_int_const(&token)?)
    } else {
        None
    };

    parser.expect(TokenKind::CloseBracket)?;

    Ok(DataType::Array(ArrayType { element, size }))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<DataType, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => return Err(parser.unexpected_detailed("expected `int` or `byte`")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_type_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => return Err(parser.unexpected()),
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}
