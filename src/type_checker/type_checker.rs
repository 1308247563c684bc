use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::{
        ast::{Op, OpClass},
        expressions::Expr,
        statements::{FlowBranch, Stmt},
        types::{Parameter, Type},
    },
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::typed_ast::{TypedExpr, TypedExprKind, TypedFlowBranch, TypedStmt, TypedStmtKind};

/// Built-in that takes one argument of any type.
const PRINT: &str = "print";

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub params: Vec<Type>,
    pub return_type: Type,
}

/// Variable bindings of one scope: the globals, or a single function body.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, Type>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Binds `variable_name`, or checks the new value against an existing binding.
    pub fn declare_variable(
        &mut self,
        variable_name: &str,
        variable_type: Type,
        current_position: Position,
    ) -> Result<(), Error> {
        match self.variable_lookup.get(variable_name) {
            Some(bound) if *bound != variable_type => Err(Error::new(
                ErrorImpl::ReassignmentTypeMismatch {
                    variable: variable_name.to_string(),
                    bound: bound.to_string(),
                    received: variable_type.to_string(),
                },
                current_position,
            )),
            Some(_) => Ok(()),
            None => {
                self.variable_lookup
                    .insert(variable_name.to_string(), variable_type);
                Ok(())
            }
        }
    }

    /// Binds a parameter, hiding any global of the same name.
    pub fn shadow_variable(&mut self, variable_name: &str, variable_type: Type) {
        self.variable_lookup
            .insert(variable_name.to_string(), variable_type);
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<Type> {
        self.variable_lookup.get(variable_name).copied()
    }
}

#[derive(Debug, Default)]
pub struct TypeChecker {
    pub functions: HashMap<String, FunctionSignature>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker::default()
    }

    /// Records the signature of every top-level function so calls may
    /// appear before the definition they refer to.
    pub fn register_functions(&mut self, program: &[Stmt]) -> Result<(), Error> {
        for stmt in program {
            let Stmt::FunctionDef {
                name,
                params,
                return_type,
                span,
                ..
            } = stmt
            else {
                continue;
            };

            if name == PRINT || self.functions.contains_key(name) {
                return Err(Error::new(
                    ErrorImpl::FunctionAlreadyDeclared {
                        function: name.clone(),
                    },
                    span.start.clone(),
                ));
            }

            let signature = FunctionSignature {
                params: params.iter().map(|param| param.ty).collect(),
                return_type: *return_type,
            };
            debug!("registered function `{}`: {:?}", name, signature);
            self.functions.insert(name.clone(), signature);
        }

        Ok(())
    }

    pub fn get_function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    /// Checks the top-level statements in order against a fresh global scope.
    pub fn check_program(&self, program: &[Stmt]) -> Result<Vec<TypedStmt>, Error> {
        let mut globals = Environment::new();
        let mut typed_program = vec![];

        for stmt in program {
            let typed = match stmt {
                Stmt::FunctionDef {
                    name,
                    params,
                    return_type,
                    body,
                    span,
                } => {
                    let body = self.check_function(name, params, *return_type, body, &globals)?;
                    TypedStmt::new(
                        TypedStmtKind::FunctionDef {
                            name: name.clone(),
                            params: params.clone(),
                            return_type: *return_type,
                            body,
                        },
                        Type::None,
                        span.clone(),
                    )
                }
                _ => self.check_stmt(stmt, &mut globals, Type::None)?,
            };

            typed_program.push(typed);
        }

        Ok(typed_program)
    }

    /// The body sees the globals bound so far, with parameters taking precedence.
    fn check_function(
        &self,
        name: &str,
        params: &[Parameter],
        return_type: Type,
        body: &[Stmt],
        globals: &Environment,
    ) -> Result<Vec<TypedStmt>, Error> {
        debug!("checking body of `{}`", name);

        let mut environment = globals.clone();
        for param in params {
            environment.shadow_variable(&param.name, param.ty);
        }

        self.check_body(body, &mut environment, return_type)
    }

    fn check_body(
        &self,
        body: &[Stmt],
        environment: &mut Environment,
        return_type: Type,
    ) -> Result<Vec<TypedStmt>, Error> {
        body.iter()
            .map(|stmt| self.check_stmt(stmt, environment, return_type))
            .collect()
    }

    pub fn check_stmt(
        &self,
        stmt: &Stmt,
        environment: &mut Environment,
        return_type: Type,
    ) -> Result<TypedStmt, Error> {
        let span = stmt.get_span().clone();

        match stmt {
            Stmt::Assign { name, value, .. } => {
                let value = self.check_expr(value, environment)?;
                let ty = value.get_type();
                environment.declare_variable(name, ty, span.start.clone())?;

                Ok(TypedStmt::new(
                    TypedStmtKind::Assign {
                        name: name.clone(),
                        value,
                    },
                    ty,
                    span,
                ))
            }
            Stmt::Def {
                name,
                declared_type,
                value,
                ..
            } => {
                let value = self.check_expr(value, environment)?;
                if value.get_type() != *declared_type {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            expected: declared_type.to_string(),
                            received: value.get_type().to_string(),
                        },
                        value.get_span().start.clone(),
                    ));
                }
                environment.declare_variable(name, *declared_type, span.start.clone())?;

                Ok(TypedStmt::new(
                    TypedStmtKind::Def {
                        name: name.clone(),
                        declared_type: *declared_type,
                        value,
                    },
                    *declared_type,
                    span,
                ))
            }
            Stmt::Expr { expr, .. } => {
                let expr = self.check_expr(expr, environment)?;
                let ty = expr.get_type();

                Ok(TypedStmt::new(TypedStmtKind::Expr(expr), ty, span))
            }
            Stmt::FunctionDef { name, .. } => Err(Error::new(
                ErrorImpl::NestedFunctionDefinition {
                    function: name.clone(),
                },
                span.start,
            )),
            Stmt::Return { value, .. } => {
                let value = self.check_expr(value, environment)?;
                if value.get_type() != return_type {
                    return Err(Error::new(
                        ErrorImpl::ReturnTypeMismatch {
                            expected: return_type.to_string(),
                            received: value.get_type().to_string(),
                        },
                        value.get_span().start.clone(),
                    ));
                }
                let ty = value.get_type();

                Ok(TypedStmt::new(TypedStmtKind::Return(value), ty, span))
            }
            Stmt::Flow {
                if_branch,
                elif_branches,
                else_body,
                ..
            } => {
                let if_branch = self.check_branch(if_branch, environment, return_type)?;
                let elif_branches = elif_branches
                    .iter()
                    .map(|branch| self.check_branch(branch, environment, return_type))
                    .collect::<Result<Vec<_>, _>>()?;
                let else_body = self.check_body(else_body, environment, return_type)?;

                Ok(TypedStmt::new(
                    TypedStmtKind::Flow {
                        if_branch,
                        elif_branches,
                        else_body,
                    },
                    Type::None,
                    span,
                ))
            }
            Stmt::While {
                condition, body, ..
            } => {
                let condition = self.check_condition(condition, "while", environment)?;
                let body = self.check_body(body, environment, return_type)?;

                Ok(TypedStmt::new(
                    TypedStmtKind::While { condition, body },
                    Type::None,
                    span,
                ))
            }
            Stmt::Pass { .. } => Ok(TypedStmt::new(TypedStmtKind::Pass, Type::None, span)),
        }
    }

    fn check_branch(
        &self,
        branch: &FlowBranch,
        environment: &mut Environment,
        return_type: Type,
    ) -> Result<TypedFlowBranch, Error> {
        let construct = branch.kind.to_string();
        let condition = self.check_condition(&branch.condition, &construct, environment)?;
        let body = self.check_body(&branch.body, environment, return_type)?;

        Ok(TypedFlowBranch {
            kind: branch.kind,
            condition,
            body,
            span: branch.span.clone(),
        })
    }

    fn check_condition(
        &self,
        condition: &Expr,
        construct: &str,
        environment: &Environment,
    ) -> Result<TypedExpr, Error> {
        let condition = self.check_expr(condition, environment)?;

        if condition.get_type() != Type::Bool {
            return Err(Error::new(
                ErrorImpl::ConditionTypeMismatch {
                    construct: construct.to_string(),
                    received: condition.get_type().to_string(),
                },
                condition.get_span().start.clone(),
            ));
        }

        Ok(condition)
    }

    pub fn check_expr(&self, expr: &Expr, environment: &Environment) -> Result<TypedExpr, Error> {
        let span = expr.get_span().clone();

        match expr {
            Expr::Number { value, .. } => {
                Ok(TypedExpr::new(TypedExprKind::Number(*value), Type::Int, span))
            }
            Expr::True { .. } => Ok(TypedExpr::new(TypedExprKind::True, Type::Bool, span)),
            Expr::False { .. } => Ok(TypedExpr::new(TypedExprKind::False, Type::Bool, span)),
            Expr::None { .. } => Ok(TypedExpr::new(TypedExprKind::None, Type::None, span)),
            Expr::Identifier { name, .. } => match environment.get_variable(name) {
                Some(ty) => Ok(TypedExpr::new(
                    TypedExprKind::Identifier(name.clone()),
                    ty,
                    span,
                )),
                None => Err(Error::new(
                    ErrorImpl::VariableNotDeclared {
                        variable: name.clone(),
                    },
                    span.start,
                )),
            },
            Expr::BinaryOp { op, lhs, rhs, .. } => {
                let lhs = self.check_expr(lhs, environment)?;
                let rhs = self.check_expr(rhs, environment)?;
                let ty = binary_result_type(*op, lhs.get_type(), rhs.get_type(), &span.start)?;
                trace!("{} {} {} : {}", lhs.get_type(), op, rhs.get_type(), ty);

                Ok(TypedExpr::new(
                    TypedExprKind::BinaryOp {
                        op: *op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    ty,
                    span,
                ))
            }
            Expr::Call { name, args, .. } => self.check_call(name, args, environment, span),
        }
    }

    fn check_call(
        &self,
        name: &str,
        args: &[Expr],
        environment: &Environment,
        span: Span,
    ) -> Result<TypedExpr, Error> {
        let typed_args = args
            .iter()
            .map(|arg| self.check_expr(arg, environment))
            .collect::<Result<Vec<_>, _>>()?;

        let return_type = if name == PRINT {
            if typed_args.len() != 1 {
                return Err(Error::new(
                    ErrorImpl::UnexpectedArguments {
                        function: name.to_string(),
                        expected: 1,
                        received: typed_args.len(),
                    },
                    span.start,
                ));
            }

            Type::None
        } else {
            let signature = self.get_function(name).ok_or_else(|| {
                Error::new(
                    ErrorImpl::FunctionNotDeclared {
                        function: name.to_string(),
                    },
                    span.start.clone(),
                )
            })?;

            if typed_args.len() != signature.params.len() {
                return Err(Error::new(
                    ErrorImpl::UnexpectedArguments {
                        function: name.to_string(),
                        expected: signature.params.len(),
                        received: typed_args.len(),
                    },
                    span.start,
                ));
            }

            for (index, (arg, expected)) in typed_args.iter().zip(&signature.params).enumerate() {
                if arg.get_type() != *expected {
                    return Err(Error::new(
                        ErrorImpl::ArgumentTypeMatchError {
                            function: name.to_string(),
                            index: index + 1,
                            expected: expected.to_string(),
                            received: arg.get_type().to_string(),
                        },
                        arg.get_span().start.clone(),
                    ));
                }
            }

            signature.return_type
        };

        Ok(TypedExpr::new(
            TypedExprKind::Call {
                name: name.to_string(),
                args: typed_args,
            },
            return_type,
            span,
        ))
    }
}

/// Result type of `lhs op rhs`. No operand is ever coerced.
pub fn binary_result_type(op: Op, lhs: Type, rhs: Type, position: &Position) -> Result<Type, Error> {
    let result = match (op.class(), lhs, rhs) {
        (OpClass::Arithmetic, Type::Int, Type::Int) => Some(Type::Int),
        (OpClass::Relational, Type::Int, Type::Int) => Some(Type::Bool),
        (OpClass::Equality, Type::Int, Type::Int) | (OpClass::Equality, Type::Bool, Type::Bool) => {
            Some(Type::Bool)
        }
        (OpClass::Logical, Type::Bool, Type::Bool) => Some(Type::Bool),
        (OpClass::Identity, Type::None, Type::None) => Some(Type::Bool),
        (OpClass::Identity, _, _) => {
            return Err(Error::new(
                ErrorImpl::UnsupportedIdentityOperands {
                    lhs: lhs.to_string(),
                    rhs: rhs.to_string(),
                },
                position.clone(),
            ))
        }
        _ => None,
    };

    result.ok_or_else(|| {
        Error::new(
            ErrorImpl::OperandTypeMismatch {
                op: op.to_string(),
                lhs: lhs.to_string(),
                rhs: rhs.to_string(),
            },
            position.clone(),
        )
    })
}

/// Type checks a whole program, returning the annotated statements.
pub fn type_check(program: &[Stmt]) -> Result<Vec<TypedStmt>, Error> {
    let mut type_checker = TypeChecker::new();
    type_checker.register_functions(program)?;
    let typed_program = type_checker.check_program(program)?;
    debug!("type checked {} top-level statements", typed_program.len());

    Ok(typed_program)
}
