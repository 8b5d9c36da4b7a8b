use crate::{
    ast::{
        ast::{ArithOp, Expr, LValue, Sign},
        expressions::{
            ArrayElemExpr, BinaryArithExpr, CallExpr, CharLitExpr, IntLitExpr, StrLitExpr,
            UnaryArithExpr, VarRefExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::value_to_bytes,
        tokens::{Token, TokenKind},
    },
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => return Err(parser.unexpected()),
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_int_const(token: &Token) -> Result<i32, Error> {
    parse_signed_int_const(token, false)
}

/// Range-checks the literal after applying its sign, so `-2147483648` fits.
fn parse_signed_int_const(token: &Token, negative: bool) -> Result<i32, Error> {
    let out_of_range = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: if negative {
                    format!("-{}", token.value)
                } else {
                    token.value.clone()
                },
            },
            token.span.start.clone(),
        )
    };

    let magnitude: i64 = token.value.parse().map_err(|_| out_of_range())?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| out_of_range())
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance().clone();
            Ok(Expr::IntLit(IntLitExpr {
                value: parse_int_const(&token)?,
                span: token.span,
            }))
        }
        TokenKind::Char => {
            let token = parser.advance().clone();
            let value = match value_to_bytes(&token.value)[..] {
                [byte] => byte,
                _ => {
                    return Err(Error::new(
                        ErrorImpl::InvalidCharLiteral {
                            literal: token.value.clone(),
                        },
                        token.span.start.clone(),
                    ))
                }
            };
            Ok(Expr::CharLit(CharLitExpr {
                value,
                span: token.span,
            }))
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            Ok(Expr::StrLit(StrLitExpr {
                value: value_to_bytes(&token.value),
                span: token.span,
            }))
        }
        _ => Err(parser.unexpected()),
    }
}

/// Parses an identifier, which may turn out to be a call or an array element.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.peek_kind(1) == TokenKind::OpenParen {
        return Ok(Expr::Call(parse_call(parser)?));
    }

    Ok(parse_lvalue(parser)?.into())
}

/// Parses `name "(" [expr ("," expr)*] ")"`.
pub fn parse_call(parser: &mut Parser) -> Result<CallExpr, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            args.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(CallExpr {
        name: name.value,
        args,
        span: parser.span_from(name.span.start),
    })
}

/// Parses `id ["[" expr "]"]` or a string literal.
pub fn parse_lvalue(parser: &mut Parser) -> Result<LValue, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => {
            let name = parser.advance().clone();

            if parser.current_token_kind() != TokenKind::OpenBracket {
                return Ok(LValue::Var(VarRefExpr {
                    name: name.value,
                    span: name.span,
                }));
            }

            parser.advance();
            let index = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseBracket)?;

            Ok(LValue::ArrayElem(ArrayElemExpr {
                name: name.value,
                index: Box::new(index),
                span: parser.span_from(name.span.start),
            }))
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            Ok(LValue::Str(StrLitExpr {
                value: value_to_bytes(&token.value),
                span: token.span,
            }))
        }
        _ => Err(parser.unexpected_detailed("expected a variable, array element or string")),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = match operator_token.kind {
        TokenKind::Plus => ArithOp::Add,
        TokenKind::Dash => ArithOp::Sub,
        TokenKind::Star => ArithOp::Mul,
        TokenKind::Slash => ArithOp::Div,
        TokenKind::Percent => ArithOp::Mod,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let start = left.get_span().start.clone();

    Ok(Expr::BinaryArith(BinaryArithExpr {
        left: Box::new(left),
        op,
        right: Box::new(right),
        span: parser.span_from(start),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let sign = if operator_token.kind == TokenKind::Dash {
        Sign::Minus
    } else {
        Sign::Plus
    };

    // A negated literal is folded into the constant itself
    if sign == Sign::Minus && parser.current_token_kind() == TokenKind::Number {
        let token = parser.advance().clone();
        return Ok(Expr::IntLit(IntLitExpr {
            value: parse_signed_int_const(&token, true)?,
            span: parser.span_from(operator_token.span.start),
        }));
    }

    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::UnaryArith(UnaryArithExpr {
        sign,
        expr: Box::new(rhs),
        span: parser.span_from(operator_token.span.start),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
