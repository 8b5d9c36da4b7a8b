use log::debug;

use crate::{
    ast::{
        ast::{Cond, Expr, LValue, LocalDef, Stmt},
        definitions::{FuncDef, ParDef},
        expressions::{ArrayElemExpr, CallExpr, StrLitExpr, VarRefExpr},
        statements::{CompoundStmt, ReturnStmt},
        types::{ArrayType, DataType, FunctionType, ParameterType, Primitive, Type},
    },
    errors::errors::{Error, ErrorImpl, MismatchContext},
    Span,
};

use super::environment::SymbolTable;

#[derive(Debug, Default)]
pub struct TypeChecker {
    pub symbols: SymbolTable,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
        }
    }
}

fn error_at(error_impl: ErrorImpl, span: &Span) -> Error {
    Error::new(error_impl, span.start.clone())
}

fn check_declarable(name: &str, primitive: Primitive, span: &Span) -> Result<(), Error> {
    if primitive.is_declarable() {
        Ok(())
    } else {
        Err(error_at(
            ErrorImpl::InvalidDeclaredType {
                name: name.to_string(),
            },
            span,
        ))
    }
}

fn declare(type_checker: &mut TypeChecker, name: &str, ty: Type, span: &Span) -> Result<(), Error> {
    if type_checker.symbols.add(name, ty) {
        Ok(())
    } else {
        Err(error_at(
            ErrorImpl::Redefinition {
                name: name.to_string(),
            },
            span,
        ))
    }
}

/// Checks a function definition and returns its signature.
///
/// The signature is computed against a throwaway scope, then the function is registered in
/// the enclosing scope before its body is checked, so the body can call it recursively.
pub fn type_check_func_def(
    type_checker: &mut TypeChecker,
    def: &FuncDef,
) -> Result<FunctionType, Error> {
    let is_program = type_checker.symbols.is_at_root();

    type_checker.symbols.enter();
    let parameters: Result<Vec<ParameterType>, Error> = def
        .parameters
        .iter()
        .map(|par| type_check_par_def(type_checker, par))
        .collect();
    type_checker.symbols.exit();
    let parameters = parameters?;

    if let Some(return_type) = def.return_type {
        check_declarable(&def.name, return_type, &def.span)?;
    }

    let function = FunctionType {
        parameters,
        return_type: def.return_type,
    };

    if is_program && (!function.parameters.is_empty() || !function.is_procedure()) {
        return Err(error_at(
            ErrorImpl::InvalidEntryPoint {
                function: def.name.clone(),
            },
            &def.span,
        ));
    }

    declare(
        type_checker,
        &def.name,
        Type::Function(function.clone()),
        &def.span,
    )?;
    debug!("registered `{}`: {}", def.name, function);

    type_checker
        .symbols
        .enter_function(&def.name, function.clone());
    let body = type_check_func_body(type_checker, def);
    type_checker.symbols.exit();
    body?;

    Ok(function)
}

fn type_check_func_body(type_checker: &mut TypeChecker, def: &FuncDef) -> Result<(), Error> {
    for par in def.parameters.iter() {
        type_check_par_def(type_checker, par)?;
    }

    for local in def.locals.iter() {
        type_check_local_def(type_checker, local)?;
    }

    type_check_compound(type_checker, &def.body)
}

/// Binds a parameter in the current scope under its bare data type.
pub fn type_check_par_def(
    type_checker: &mut TypeChecker,
    par: &ParDef,
) -> Result<ParameterType, Error> {
    check_declarable(&par.name, par.data_type.base(), &par.span)?;
    declare(type_checker, &par.name, Type::from(par.data_type), &par.span)?;

    Ok(par.get_parameter_type())
}

pub fn type_check_local_def(type_checker: &mut TypeChecker, local: &LocalDef) -> Result<(), Error> {
    match local {
        LocalDef::Func(def) => {
            type_check_func_def(type_checker, def)?;
        }
        LocalDef::Par(def) => {
            type_check_par_def(type_checker, def)?;
        }
        LocalDef::PrimVar(def) => {
            check_declarable(&def.name, def.data_type, &def.span)?;
            declare(
                type_checker,
                &def.name,
                Type::Primitive(def.data_type),
                &def.span,
            )?;
        }
        LocalDef::Array(def) => {
            check_declarable(&def.name, def.element_type, &def.span)?;
            if def.size <= 0 {
                return Err(error_at(
                    ErrorImpl::InvalidArraySize {
                        name: def.name.clone(),
                        size: def.size,
                    },
                    &def.span,
                ));
            }
            declare(
                type_checker,
                &def.name,
                Type::Array(def.get_array_type()),
                &def.span,
            )?;
        }
    }

    Ok(())
}

pub fn type_check_compound(
    type_checker: &mut TypeChecker,
    compound: &CompoundStmt,
) -> Result<(), Error> {
    for stmt in compound.iter() {
        type_check_stmt(type_checker, stmt)?;
    }

    Ok(())
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Compound(compound) => type_check_compound(type_checker, compound),
        Stmt::Assign(assign) => {
            let left = type_check_lvalue(type_checker, &assign.lvalue)?;
            let right = type_check_expr(type_checker, &assign.expr)?;

            match (left.as_primitive(), right.as_primitive()) {
                (Some(left), Some(right)) if left == right => Ok(()),
                _ => Err(error_at(
                    ErrorImpl::TypeMismatch {
                        context: MismatchContext::Assignment,
                        expected: left,
                        found: right,
                    },
                    &assign.span,
                )),
            }
        }
        Stmt::Call(call) => {
            // Any returned value is discarded
            type_check_call(type_checker, &call.call)?;
            Ok(())
        }
        Stmt::If(if_stmt) => {
            type_check_cond(type_checker, &if_stmt.cond)?;
            type_check_stmt(type_checker, &if_stmt.stmt)
        }
        Stmt::IfElse(if_else) => {
            type_check_cond(type_checker, &if_else.cond)?;
            type_check_stmt(type_checker, &if_else.then_stmt)?;
            type_check_stmt(type_checker, &if_else.else_stmt)
        }
        Stmt::While(while_stmt) => {
            type_check_cond(type_checker, &while_stmt.cond)?;
            type_check_stmt(type_checker, &while_stmt.stmt)
        }
        Stmt::Return(return_stmt) => type_check_return(type_checker, return_stmt),
    }
}

fn type_check_return(type_checker: &mut TypeChecker, stmt: &ReturnStmt) -> Result<(), Error> {
    let (function, return_type) = type_checker
        .symbols
        .current_function()
        .map(|(name, function)| (name.to_string(), function.return_type))
        .unwrap_or_default();

    match (&stmt.expr, return_type) {
        (None, None) => Ok(()),
        (None, Some(expected)) => Err(error_at(
            ErrorImpl::MissingReturnValue { function, expected },
            &stmt.span,
        )),
        (Some(expr), None) => {
            type_check_expr(type_checker, expr)?;
            Err(error_at(
                ErrorImpl::UnexpectedReturnValue { function },
                &stmt.span,
            ))
        }
        (Some(expr), Some(expected)) => {
            let found = type_check_expr(type_checker, expr)?;
            if found == Type::Primitive(expected) {
                Ok(())
            } else {
                Err(error_at(
                    ErrorImpl::TypeMismatch {
                        context: MismatchContext::Return { function },
                        expected: Type::Primitive(expected),
                        found,
                    },
                    expr.get_span(),
                ))
            }
        }
    }
}

/// Checks a call and returns the callee's signature.
///
/// Arity is validated before any argument is compared with its parameter.
pub fn type_check_call(type_checker: &mut TypeChecker, call: &CallExpr) -> Result<FunctionType, Error> {
    let function = match type_checker.symbols.lookup(&call.name) {
        None => {
            return Err(error_at(
                ErrorImpl::UndefinedSymbol {
                    name: call.name.clone(),
                },
                &call.span,
            ))
        }
        Some(ty) => match ty.as_function() {
            Some(function) => function.clone(),
            None => {
                return Err(error_at(
                    ErrorImpl::NotAFunction {
                        name: call.name.clone(),
                    },
                    &call.span,
                ))
            }
        },
    };

    if call.args.len() != function.parameters.len() {
        return Err(error_at(
            ErrorImpl::ArityMismatch {
                function: call.name.clone(),
                expected: function.parameters.len(),
                found: call.args.len(),
            },
            &call.span,
        ));
    }

    for (index, (arg, parameter)) in call.args.iter().zip(function.parameters.iter()).enumerate() {
        let position = index + 1;
        let found = type_check_expr(type_checker, arg)?;

        let compatible = found
            .as_data_type()
            .is_some_and(|data_type| data_type.is_compatible_with(&parameter.data_type));
        if !compatible {
            return Err(error_at(
                ErrorImpl::TypeMismatch {
                    context: MismatchContext::Argument {
                        function: call.name.clone(),
                        position,
                    },
                    expected: Type::from(parameter.data_type),
                    found,
                },
                arg.get_span(),
            ));
        }

        if parameter.by_reference && !arg.is_lvalue() {
            return Err(error_at(
                ErrorImpl::InvalidReferenceArgument {
                    function: call.name.clone(),
                    position,
                },
                arg.get_span(),
            ));
        }
    }

    Ok(function)
}

/// Infers the type of an expression.
pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Result<Type, Error> {
    match expr {
        Expr::IntLit(_) => Ok(Type::Primitive(Primitive::Int)),
        Expr::CharLit(_) => Ok(Type::Primitive(Primitive::Byte)),
        Expr::StrLit(literal) => Ok(string_literal_type(literal)),
        Expr::VarRef(var_ref) => type_check_var_ref(type_checker, var_ref),
        Expr::ArrayElem(elem) => type_check_array_elem(type_checker, elem),
        Expr::Call(call) => {
            let function = type_check_call(type_checker, call)?;
            match function.return_type {
                Some(return_type) => Ok(Type::Primitive(return_type)),
                None => Err(error_at(
                    ErrorImpl::MisplacedProcedureCall {
                        function: call.name.clone(),
                    },
                    &call.span,
                )),
            }
        }
        Expr::UnaryArith(unary) => {
            let found = type_check_expr(type_checker, &unary.expr)?;
            if found != Type::Primitive(Primitive::Int) {
                return Err(error_at(
                    ErrorImpl::TypeMismatch {
                        context: MismatchContext::UnaryOperand,
                        expected: Type::Primitive(Primitive::Int),
                        found,
                    },
                    unary.expr.get_span(),
                ));
            }
            Ok(found)
        }
        Expr::BinaryArith(binary) => {
            let left = type_check_expr(type_checker, &binary.left)?;
            let right = type_check_expr(type_checker, &binary.right)?;

            if !left.is_arithmetic_operand() {
                return Err(error_at(
                    ErrorImpl::TypeMismatch {
                        context: MismatchContext::BinaryOperand,
                        expected: Type::Primitive(Primitive::Int),
                        found: left,
                    },
                    binary.left.get_span(),
                ));
            }
            if right != left {
                return Err(error_at(
                    ErrorImpl::TypeMismatch {
                        context: MismatchContext::BinaryOperand,
                        expected: left,
                        found: right,
                    },
                    binary.right.get_span(),
                ));
            }
            Ok(left)
        }
        Expr::Cond(cond) => type_check_cond(type_checker, cond),
    }
}

pub fn type_check_lvalue(type_checker: &mut TypeChecker, lvalue: &LValue) -> Result<Type, Error> {
    match lvalue {
        LValue::Var(var_ref) => type_check_var_ref(type_checker, var_ref),
        LValue::ArrayElem(elem) => type_check_array_elem(type_checker, elem),
        LValue::Str(literal) => Ok(string_literal_type(literal)),
    }
}

/// String literals are byte arrays with room for the terminator.
fn string_literal_type(literal: &StrLitExpr) -> Type {
    Type::Array(ArrayType {
        element: Primitive::Byte,
        size: Some(literal.storage_size()),
    })
}

fn type_check_var_ref(type_checker: &mut TypeChecker, var_ref: &VarRefExpr) -> Result<Type, Error> {
    match type_checker.symbols.lookup(&var_ref.name) {
        None => Err(error_at(
            ErrorImpl::UndefinedSymbol {
                name: var_ref.name.clone(),
            },
            &var_ref.span,
        )),
        Some(ty) => ty.as_data_type().map(Type::from).ok_or_else(|| {
            error_at(
                ErrorImpl::NotAVariable {
                    name: var_ref.name.clone(),
                },
                &var_ref.span,
            )
        }),
    }
}

fn type_check_array_elem(
    type_checker: &mut TypeChecker,
    elem: &ArrayElemExpr,
) -> Result<Type, Error> {
    let array = match type_checker.symbols.lookup(&elem.name) {
        None => {
            return Err(error_at(
                ErrorImpl::UndefinedSymbol {
                    name: elem.name.clone(),
                },
                &elem.span,
            ))
        }
        Some(ty) => match ty.as_data_type() {
            Some(DataType::Array(array)) => array,
            _ => {
                return Err(error_at(
                    ErrorImpl::NotAnArray {
                        name: elem.name.clone(),
                    },
                    &elem.span,
                ))
            }
        },
    };

    let index = type_check_expr(type_checker, &elem.index)?;
    if index != Type::Primitive(Primitive::Int) {
        return Err(error_at(
            ErrorImpl::TypeMismatch {
                context: MismatchContext::ArrayIndex {
                    array: elem.name.clone(),
                },
                expected: Type::Primitive(Primitive::Int),
                found: index,
            },
            elem.index.get_span(),
        ));
    }

    Ok(Type::Primitive(array.element))
}

/// Checks that a condition is well formed. Conditions are always `bool`.
pub fn type_check_cond(type_checker: &mut TypeChecker, cond: &Cond) -> Result<Type, Error> {
    match cond {
        Cond::Const(_) => {}
        Cond::Not(not) => {
            type_check_cond(type_checker, &not.cond)?;
        }
        Cond::Compare(compare) => {
            type_check_expr(type_checker, &compare.left)?;
            type_check_expr(type_checker, &compare.right)?;
        }
        Cond::Logic(logic) => {
            type_check_cond(type_checker, &logic.left)?;
            type_check_cond(type_checker, &logic.right)?;
        }
    }

    Ok(Type::Primitive(Primitive::Bool))
}

/// Checks a whole program, rooted at its entry point.
pub fn type_check(program: &FuncDef) -> Result<(), Error> {
    let mut type_checker = TypeChecker::new();
    type_check_func_def(&mut type_checker, program)?;
    Ok(())
}
