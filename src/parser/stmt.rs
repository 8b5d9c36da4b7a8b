use crate::{
    ast::{
        ast::{LocalDef, Stmt},
        definitions::{ArrayDef, FuncDef, ParDef, PrimVarDef},
        statements::{
            AssignStmt, CallStmt, CompoundStmt, IfElseStmt, IfStmt, ReturnStmt, WhileStmt,
        },
        types::{DataType, Primitive},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{cond::parse_cond, expr::parse_expr, lookups::BindingPower},
};

use super::{
    expr::{parse_call, parse_lvalue},
    parser::Parser,
    types::parse_type,
};

// STATEMENTS

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    let start = parser.get_position();

    if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::OpenParen
    {
        let call = parse_call(parser)?;
        parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::Call(CallStmt {
            call,
            span: parser.span_from(start),
        }));
    }

    let lvalue = parse_lvalue(parser)?;
    parser.expect(TokenKind::Assignment)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Assign(AssignStmt {
        lvalue,
        expr,
        span: parser.span_from(start),
    }))
}

/// A lone `;` does nothing and becomes an empty compound statement.
pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();

    Ok(Stmt::Compound(CompoundStmt { body: vec![], span }))
}

pub fn parse_compound(parser: &mut Parser) -> Result<CompoundStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::EOF {
            return Err(parser.unexpected_detailed("expected `}` before end of file"));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(CompoundStmt {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_compound_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Compound(parse_compound(parser)?))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let cond = parse_cond(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_stmt = Box::new(parse_stmt(parser)?);

    if parser.current_token_kind() != TokenKind::Else {
        return Ok(Stmt::If(IfStmt {
            cond,
            stmt: then_stmt,
            span: parser.span_from(start),
        }));
    }

    parser.advance();
    let else_stmt = Box::new(parse_stmt(parser)?);

    Ok(Stmt::IfElse(IfElseStmt {
        cond,
        then_stmt,
        else_stmt,
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let cond = parse_cond(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let stmt = Box::new(parse_stmt(parser)?);

    Ok(Stmt::While(WhileStmt {
        cond,
        stmt,
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let expr = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        expr,
        span: parser.span_from(start),
    }))
}

// DEFINITIONS

/// Parses `id "(" [fpar-def ("," fpar-def)*] ")" ":" r-type local-def* compound-stmt`.
pub fn parse_func_def(parser: &mut Parser) -> Result<FuncDef, Error> {
    let name = parser.expect_error(
        TokenKind::Identifier,
        Some(parser.unexpected_detailed("expected a function name")),
    )?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_par_def(parser)?);

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            parameters.push(parse_par_def(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Colon)?;

    let return_type = parse_return_type(parser)?;

    let mut locals = Vec::new();
    while parser.current_token_kind() == TokenKind::Identifier {
        locals.push(parse_local_def(parser)?);
    }

    let body = parse_compound(parser)?;

    Ok(FuncDef {
        name: name.value,
        parameters,
        return_type,
        locals,
        body,
        span: parser.span_from(name.span.start),
    })
}

fn parse_return_type(parser: &mut Parser) -> Result<Option<Primitive>, Error> {
    if parser.current_token_kind() == TokenKind::Proc {
        parser.advance();
        return Ok(None);
    }

    match parse_type(parser, BindingPower::Default)? {
        DataType::Primitive(primitive) => Ok(Some(primitive)),
        DataType::Array(_) => Err(parser.unexpected_detailed("functions cannot return arrays")),
    }
}

/// Parses `id ":" ["reference"] data-type ["[" "]"]`.
pub fn parse_par_def(parser: &mut Parser) -> Result<ParDef, Error> {
    let name = parser.expect_error(
        TokenKind::Identifier,
        Some(parser.unexpected_detailed("expected a parameter name")),
    )?;
    parser.expect(TokenKind::Colon)?;

    let by_reference = parser.current_token_kind() == TokenKind::Reference;
    if by_reference {
        parser.advance();
    }

    let data_type = parse_type(parser, BindingPower::Default)?;
    if let DataType::Array(array) = data_type {
        if array.size.is_some() {
            return Err(parser.unexpected_detailed("array parameters are declared without a size"));
        }
    }

    Ok(ParDef {
        name: name.value,
        data_type,
        by_reference,
        span: parser.span_from(name.span.start),
    })
}

/// A local definition is a nested function when its name is followed by `(`.
pub fn parse_local_def(parser: &mut Parser) -> Result<LocalDef, Error> {
    match parser.peek_kind(1) {
        TokenKind::OpenParen => Ok(LocalDef::Func(parse_func_def(parser)?)),
        TokenKind::Colon => parse_var_def(parser),
        _ => {
            parser.advance();
            Err(parser.unexpected_detailed("expected `(` or `:` after a local name"))
        }
    }
}

/// Parses `id ":" data-type ["[" int-const "]"] ";"`.
pub fn parse_var_def(parser: &mut Parser) -> Result<LocalDef, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;

    let data_type = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let span = parser.span_from(name.span.start.clone());
    match data_type {
        DataType::Primitive(primitive) => Ok(LocalDef::PrimVar(PrimVarDef {
            name: name.value,
            data_type: primitive,
            span,
        })),
        DataType::Array(array) => match array.size {
            Some(size) => Ok(LocalDef::Array(ArrayDef {
                name: name.value,
                element_type: array.element,
                size,
                span,
            })),
            None => Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: String::from("]"),
                    message: format!("array variable `{}` needs a size", name.value),
                },
                name.span.start,
            )),
        },
    }
}
