//! Condition parsing.
//!
//! Conditions reuse the Pratt loop of expressions with their own tables:
//! `true`, `false`, `!` and `(` have prefix handlers, `&` and `|` are the
//! connectives, and any other token starts a comparison of two expressions.

use crate::{
    ast::{
        ast::{CompareOp, Cond, LogicOp},
        expressions::{CompareCond, ConstCond, LogicCond, NotCond},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

pub fn parse_cond(parser: &mut Parser, bp: BindingPower) -> Result<Cond, Error> {
    let token_kind = parser.current_token_kind();
    let mut left = match parser.get_cond_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud(parser)?,
        None => parse_compare_cond(parser)?,
    };

    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = parser
            .get_cond_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_cond_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => return Err(parser.unexpected()),
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

fn compare_op(kind: TokenKind) -> Option<CompareOp> {
    match kind {
        TokenKind::Equals => Some(CompareOp::Eq),
        TokenKind::NotEquals => Some(CompareOp::Ne),
        TokenKind::Less => Some(CompareOp::Lt),
        TokenKind::Greater => Some(CompareOp::Gt),
        TokenKind::LessEquals => Some(CompareOp::Le),
        TokenKind::GreaterEquals => Some(CompareOp::Ge),
        _ => None,
    }
}

pub fn parse_compare_cond(parser: &mut Parser) -> Result<Cond, Error> {
    let left = parse_expr(parser, BindingPower::Default)?;

    let op = match compare_op(parser.current_token_kind()) {
        Some(op) => op,
        None => return Err(parser.unexpected_detailed("expected a comparison operator")),
    };
    parser.advance();

    let right = parse_expr(parser, BindingPower::Default)?;
    let start = left.get_span().start.clone();

    Ok(Cond::Compare(CompareCond {
        left: Box::new(left),
        op,
        right: Box::new(right),
        span: parser.span_from(start),
    }))
}

pub fn parse_const_cond(parser: &mut Parser) -> Result<Cond, Error> {
    let token = parser.advance().clone();

    Ok(Cond::Const(ConstCond {
        value: token.kind == TokenKind::True,
        span: token.span,
    }))
}

pub fn parse_not_cond(parser: &mut Parser) -> Result<Cond, Error> {
    let start = parser.advance().span.start.clone();
    let cond = parse_cond(parser, BindingPower::Unary)?;

    Ok(Cond::Not(NotCond {
        cond: Box::new(cond),
        span: parser.span_from(start),
    }))
}

/// `(` may open either a parenthesised condition or the left operand of a comparison.
/// The condition is tried first; on failure the parser backtracks.
pub fn parse_grouping_cond(parser: &mut Parser) -> Result<Cond, Error> {
    let saved = parser.save();

    parser.advance();
    let grouped = parse_cond(parser, BindingPower::Default)
        .and_then(|cond| parser.expect(TokenKind::CloseParen).map(|_| cond));

    match grouped {
        Ok(cond) if compare_op(parser.current_token_kind()).is_none() => Ok(cond),
        _ => {
            parser.restore(saved);
            parse_compare_cond(parser)
        }
    }
}

pub fn parse_logic_cond(parser: &mut Parser, left: Cond, bp: BindingPower) -> Result<Cond, Error> {
    let op = if parser.advance().kind == TokenKind::And {
        LogicOp::And
    } else {
        LogicOp::Or
    };

    let right = parse_cond(parser, bp)?;
    let start = left.get_span().start.clone();

    Ok(Cond::Logic(LogicCond {
        left: Box::new(left),
        op,
        right: Box::new(right),
        span: parser.span_from(start),
    }))
}
