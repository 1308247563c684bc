//! Unit tests for the type checker.
//!
//! Programs are written as source text and run through the whole front end
//! up to the checker, which keeps the expected trees readable.

use super::{
    type_checker::{binary_result_type, type_check, Environment, FunctionSignature, TypeChecker},
    typed_ast::{TypedExpr, TypedExprKind, TypedStmt, TypedStmtKind},
};
use crate::{
    ast::{ast::Op, types::Type},
    errors::errors::{Error, ErrorKind},
    parse_program, Position,
};

fn check(source: &str) -> Result<Vec<TypedStmt>, Error> {
    let _ = env_logger::builder().is_test(true).try_init();

    let program = parse_program(source, Some("test.py".to_string())).unwrap();
    type_check(&program)
}

fn check_ok(source: &str) -> Vec<TypedStmt> {
    check(source).unwrap()
}

fn check_err(source: &str) -> Error {
    check(source).unwrap_err()
}

fn expr_type(source: &str) -> Result<Type, Error> {
    let typed = check(source)?;
    match &typed.last().unwrap().kind {
        TypedStmtKind::Expr(expr) => Ok(expr.get_type()),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

/// Every expression node reachable from `stmt`.
fn collect_exprs<'a>(stmt: &'a TypedStmt, out: &mut Vec<&'a TypedExpr>) {
    fn walk<'a>(expr: &'a TypedExpr, out: &mut Vec<&'a TypedExpr>) {
        out.push(expr);
        match &expr.kind {
            TypedExprKind::BinaryOp { lhs, rhs, .. } => {
                walk(lhs, out);
                walk(rhs, out);
            }
            TypedExprKind::Call { args, .. } => args.iter().for_each(|arg| walk(arg, out)),
            _ => {}
        }
    }

    match &stmt.kind {
        TypedStmtKind::Assign { value, .. }
        | TypedStmtKind::Def { value, .. }
        | TypedStmtKind::Return(value)
        | TypedStmtKind::Expr(value) => walk(value, out),
        TypedStmtKind::FunctionDef { body, .. } => {
            body.iter().for_each(|stmt| collect_exprs(stmt, out))
        }
        TypedStmtKind::Flow {
            if_branch,
            elif_branches,
            else_body,
        } => {
            for branch in std::iter::once(if_branch).chain(elif_branches) {
                walk(&branch.condition, out);
                branch.body.iter().for_each(|stmt| collect_exprs(stmt, out));
            }
            else_body.iter().for_each(|stmt| collect_exprs(stmt, out));
        }
        TypedStmtKind::While { condition, body } => {
            walk(condition, out);
            body.iter().for_each(|stmt| collect_exprs(stmt, out));
        }
        TypedStmtKind::Pass => {}
    }
}

#[test]
fn test_typed_declaration() {
    let typed = check_ok("x : int = 2");

    assert_eq!(typed.len(), 1);
    assert_eq!(typed[0].get_type(), Type::Int);
    match &typed[0].kind {
        TypedStmtKind::Def {
            name,
            declared_type,
            value,
        } => {
            assert_eq!(name, "x");
            assert_eq!(*declared_type, Type::Int);
            assert_eq!(value.kind, TypedExprKind::Number(2));
            assert_eq!(value.get_type(), Type::Int);
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_type_mismatch() {
    let error = check_err("x : bool = 2");

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(error.get_position().0, 11);
}

#[test]
fn test_comparison_of_bound_variable() {
    let typed = check_ok("x : int = 2\ny : bool = x == 2\n");

    assert_eq!(typed[1].get_type(), Type::Bool);
    let TypedStmtKind::Def { value, .. } = &typed[1].kind else {
        panic!("expected declaration");
    };
    let TypedExprKind::BinaryOp { op, lhs, rhs } = &value.kind else {
        panic!("expected binary operation");
    };
    assert_eq!(*op, Op::Equals);
    assert_eq!(lhs.get_type(), Type::Int);
    assert_eq!(rhs.get_type(), Type::Int);
}

#[test]
fn test_reassignment_keeps_type() {
    check_ok("x : int = 1\nx = x + 1\n");

    let error = check_err("x : int = 1\nx : bool = True\n");
    assert_eq!(error.get_error_name(), "ReassignmentTypeMismatch");
    assert_eq!(error.get_position().0, 12);

    assert_eq!(
        check_err("x = 1\nx = False\n").get_error_name(),
        "ReassignmentTypeMismatch"
    );
}

#[test]
fn test_undeclared_variable() {
    let error = check_err("y = x");

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.kind(), ErrorKind::Reference);
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_operator_typing() {
    assert_eq!(expr_type("1 + 2 * 3 // 4 % 5 - 6").unwrap(), Type::Int);
    assert_eq!(expr_type("1 < 2").unwrap(), Type::Bool);
    assert_eq!(expr_type("1 >= 2").unwrap(), Type::Bool);
    assert_eq!(expr_type("1 == 2").unwrap(), Type::Bool);
    assert_eq!(expr_type("True == False").unwrap(), Type::Bool);
    assert_eq!(expr_type("True and False").unwrap(), Type::Bool);
    assert_eq!(expr_type("1 < 2 or False").unwrap(), Type::Bool);
    assert_eq!(expr_type("None is None").unwrap(), Type::Bool);
}

#[test]
fn test_operator_operand_mismatch() {
    for source in ["1 and 2", "True + 1", "True < False", "1 == True", "None + 1"] {
        let error = expr_type(source).unwrap_err();
        assert_eq!(error.get_error_name(), "OperandTypeMismatch", "{}", source);
        assert_eq!(error.kind(), ErrorKind::Type);
    }
}

#[test]
fn test_identity_requires_none() {
    for source in ["1 is 1", "True is None", "None is 2"] {
        let error = expr_type(source).unwrap_err();
        assert_eq!(error.get_error_name(), "UnsupportedIdentityOperands", "{}", source);
    }
}

#[test]
fn test_binary_result_type_table() {
    let position = Position(0, std::rc::Rc::new("test.py".to_string()));

    assert_eq!(
        binary_result_type(Op::Percent, Type::Int, Type::Int, &position).unwrap(),
        Type::Int
    );
    assert_eq!(
        binary_result_type(Op::Or, Type::Bool, Type::Bool, &position).unwrap(),
        Type::Bool
    );
    assert!(binary_result_type(Op::Equals, Type::None, Type::None, &position).is_err());
    assert!(binary_result_type(Op::LessEquals, Type::Bool, Type::Int, &position).is_err());
}

#[test]
fn test_function_signature_registration() {
    let program = parse_program("def f(a : int) -> bool:\n    return a > 0\n", None).unwrap();
    let mut type_checker = TypeChecker::new();
    type_checker.register_functions(&program).unwrap();

    assert_eq!(
        type_checker.get_function("f"),
        Some(&FunctionSignature {
            params: vec![Type::Int],
            return_type: Type::Bool,
        })
    );
    assert!(type_checker.get_function("print").is_none());
}

#[test]
fn test_function_definition_is_annotated_none() {
    let typed = check_ok("def f(a : int) -> bool:\n    return a > 0\n");

    assert_eq!(typed[0].get_type(), Type::None);
    let TypedStmtKind::FunctionDef { body, .. } = &typed[0].kind else {
        panic!("expected function definition");
    };
    assert_eq!(body[0].get_type(), Type::Bool);
}

#[test]
fn test_call_before_definition() {
    let typed = check_ok("x : int = f(1)\ndef f(a : int) -> int:\n    return a\n");

    let TypedStmtKind::Def { value, .. } = &typed[0].kind else {
        panic!("expected declaration");
    };
    assert_eq!(value.get_type(), Type::Int);
}

#[test]
fn test_call_arity_mismatch() {
    let error = check_err("def f(a : int) -> int:\n    return a\nf(1, 2)\n");

    assert_eq!(error.get_error_name(), "UnexpectedArguments");
    assert_eq!(error.kind(), ErrorKind::Type);
}

#[test]
fn test_call_argument_type_mismatch() {
    let source = "def f(a : int, b : bool) -> int:\n    return a\nf(1, 2)\n";
    let error = check_err(source);

    assert_eq!(error.get_error_name(), "ArgumentTypeMatchError");
    assert_eq!(
        error.to_string(),
        "TypeError: got int as argument 2 of \"f\", expected bool"
    );
}

#[test]
fn test_call_to_unknown_function() {
    let error = check_err("g(1)");

    assert_eq!(error.get_error_name(), "FunctionNotDeclared");
    assert_eq!(error.kind(), ErrorKind::Reference);
}

#[test]
fn test_print() {
    assert_eq!(expr_type("print(1)").unwrap(), Type::None);
    assert_eq!(expr_type("print(True)").unwrap(), Type::None);
    assert_eq!(expr_type("print(None)").unwrap(), Type::None);

    assert_eq!(
        expr_type("print()").unwrap_err().get_error_name(),
        "UnexpectedArguments"
    );
    assert_eq!(
        expr_type("print(1, 2)").unwrap_err().get_error_name(),
        "UnexpectedArguments"
    );
}

#[test]
fn test_duplicate_function() {
    let source = "def f():\n    pass\ndef f():\n    pass\n";
    assert_eq!(check_err(source).get_error_name(), "FunctionAlreadyDeclared");

    let source = "def print(a : int):\n    pass\n";
    assert_eq!(check_err(source).get_error_name(), "FunctionAlreadyDeclared");
}

#[test]
fn test_nested_function_definition() {
    let source = "def f():\n    def g():\n        pass\n";
    assert_eq!(check_err(source).get_error_name(), "NestedFunctionDefinition");
}

#[test]
fn test_return_type_mismatch() {
    let error = check_err("def f() -> int:\n    return True\n");
    assert_eq!(error.get_error_name(), "ReturnTypeMismatch");

    let error = check_err("def f() -> int:\n    return\n");
    assert_eq!(error.get_error_name(), "ReturnTypeMismatch");

    check_ok("def f():\n    return\n");
    check_ok("def f():\n    return None\n");
}

#[test]
fn test_top_level_return_expects_none() {
    check_ok("return");
    assert_eq!(check_err("return 1").get_error_name(), "ReturnTypeMismatch");
}

#[test]
fn test_parameters_shadow_globals() {
    let source = "a : bool = True\ndef f(a : int) -> int:\n    return a + 1\n";
    check_ok(source);
}

#[test]
fn test_function_sees_globals_bound_before_it() {
    check_ok("g : int = 1\ndef f() -> int:\n    return g\n");

    let error = check_err("def f() -> int:\n    return g\ng : int = 1\n");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_function_locals_stay_local() {
    let source = "def f():\n    x : int = 1\nprint(x)\n";
    assert_eq!(check_err(source).get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_function_cannot_rebind_global_type() {
    let source = "g : int = 1\ndef f():\n    g = True\n";
    let error = check_err(source);

    assert_eq!(error.get_error_name(), "ReassignmentTypeMismatch");
    assert_eq!(error.get_position().0, 25);

    check_ok("g : int = 1\ndef f():\n    g = 2\nprint(g)\n");
}

#[test]
fn test_no_block_scoping() {
    check_ok("c : bool = True\nif c:\n    y : int = 1\nprint(y)\n");
    check_ok("c : bool = True\nwhile c:\n    y : int = 1\n    c = False\nprint(y)\n");
}

#[test]
fn test_conditions_must_be_bool() {
    for (source, construct) in [
        ("while 1:\n    pass\n", "while"),
        ("if 1:\n    pass\n", "if"),
        ("if True:\n    pass\nelif None:\n    pass\n", "elif"),
    ] {
        let error = check_err(source);
        assert_eq!(error.get_error_name(), "ConditionTypeMismatch");
        assert!(error.to_string().contains(construct), "{}", error);
    }
}

#[test]
fn test_if_statement_checks_every_branch() {
    let source = "x : int = 1\nif x < 0:\n    x = 0\nelif x == 0:\n    pass\nelse:\n    x = x - 1\n";
    let typed = check_ok(source);

    let TypedStmtKind::Flow {
        if_branch,
        elif_branches,
        else_body,
    } = &typed[1].kind
    else {
        panic!("expected if statement");
    };
    assert_eq!(if_branch.condition.get_type(), Type::Bool);
    assert_eq!(elif_branches[0].condition.get_type(), Type::Bool);
    assert_eq!(else_body[0].get_type(), Type::Int);

    let error = check_err("if True:\n    pass\nelse:\n    y = z\n");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_every_expression_is_typed() {
    let source = "def fib(n : int) -> int:\n    if n < 2:\n        return n\n    return fib(n - 1) + fib(n - 2)\nx : int = fib(10)\nprint(x > 50 and True)\n";
    let typed = check_ok(source);

    let mut exprs = vec![];
    typed.iter().for_each(|stmt| collect_exprs(stmt, &mut exprs));

    assert!(exprs.len() > 10);
    for expr in &exprs {
        let expected = match &expr.kind {
            TypedExprKind::Number(_) => Type::Int,
            TypedExprKind::True | TypedExprKind::False => Type::Bool,
            TypedExprKind::None => Type::None,
            TypedExprKind::Identifier(name) => match name.as_str() {
                "n" | "x" => Type::Int,
                other => panic!("unexpected identifier {}", other),
            },
            TypedExprKind::Call { name, .. } => match name.as_str() {
                "fib" => Type::Int,
                "print" => Type::None,
                other => panic!("unexpected call {}", other),
            },
            TypedExprKind::BinaryOp { op, .. } => match op {
                Op::Plus | Op::Minus => Type::Int,
                Op::Less | Op::Greater | Op::And => Type::Bool,
                other => panic!("unexpected operator {}", other),
            },
        };
        assert_eq!(expr.get_type(), expected, "{:?}", expr.kind);
    }

    let TypedStmtKind::FunctionDef { body, .. } = &typed[0].kind else {
        panic!("expected function definition");
    };
    let TypedStmtKind::Return(sum) = &body[1].kind else {
        panic!("expected return");
    };
    assert!(matches!(sum.kind, TypedExprKind::BinaryOp { op: Op::Plus, .. }));
    assert_eq!(sum.get_type(), Type::Int);

    let TypedStmtKind::Expr(print) = &typed[2].kind else {
        panic!("expected expression statement");
    };
    let TypedExprKind::Call { args, .. } = &print.kind else {
        panic!("expected call");
    };
    assert!(matches!(args[0].kind, TypedExprKind::BinaryOp { op: Op::And, .. }));
    assert_eq!(args[0].get_type(), Type::Bool);
}

#[test]
fn test_environment_declare_variable() {
    let position = Position(0, std::rc::Rc::new("test.py".to_string()));
    let mut environment = Environment::new();

    environment
        .declare_variable("x", Type::Int, position.clone())
        .unwrap();
    environment
        .declare_variable("x", Type::Int, position.clone())
        .unwrap();
    assert!(environment
        .declare_variable("x", Type::Bool, position)
        .is_err());

    environment.shadow_variable("x", Type::Bool);
    assert_eq!(environment.get_variable("x"), Some(Type::Bool));
    assert_eq!(environment.get_variable("y"), None);
}

#[test]
fn test_strip_round_trip_is_idempotent() {
    let source = "def f(a : int, b : bool) -> int:\n    while b:\n        b = False\n    return a - 1\nx : int = f(-3, True)\nif x == 0:\n    pass\nelse:\n    print(None)\n";
    let program = parse_program(source, None).unwrap();

    let typed = type_check(&program).unwrap();
    let stripped: Vec<_> = typed.iter().map(TypedStmt::strip).collect();

    assert_eq!(stripped, program);
    assert_eq!(type_check(&stripped).unwrap(), typed);
}
