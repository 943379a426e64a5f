//! Recursive AST walker producing [`Value`]s (spec §4.4).
//!
//! `Program` evaluation unwraps a trailing `ReturnValue`; `Block` evaluation
//! propagates it unchanged so an enclosing function call can catch it. Both
//! stop at the first `Error` they see.

mod builtins;
mod environment;
mod value;

pub use environment::Environment;
pub use value::{identity_eq, BuiltinFn, FunctionValue, Value, ValueKind};

use std::rc::Rc;

use crate::ast::{
    Block, Call, Expression, If, Infix, LetStatement, Prefix, Program, ReturnStatement,
    Statement,
};

/// Evaluates a complete program against `env`, returning its final value.
pub fn evaluate(program: &Program, env: &Environment) -> Value {
    eval_statements(&program.statements, env, true)
}

fn eval_statements(statements: &[Statement], env: &Environment, unwrap_return: bool) -> Value {
    let mut result = Value::Null;

    for statement in statements {
        result = eval_statement(statement, env);

        match &result {
            Value::Error(_) => return result,
            Value::ReturnValue(value) if unwrap_return => return (**value).clone(),
            Value::ReturnValue(_) => return result,
            _ => {}
        }
    }

    result
}

fn eval_block(block: &Block, env: &Environment) -> Value {
    eval_statements(&block.statements, env, false)
}

fn eval_statement(statement: &Statement, env: &Environment) -> Value {
    match statement {
        Statement::Let(let_statement) => eval_let(let_statement, env),
        Statement::Return(return_statement) => eval_return(return_statement, env),
        Statement::Expression(expression_statement) => {
            eval_expression(&expression_statement.expression, env)
        }
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_let(let_statement: &LetStatement, env: &Environment) -> Value {
    let value = eval_expression(&let_statement.value, env);
    if value.is_error() {
        return value;
    }

    env.set(let_statement.name.name.clone(), value);
    Value::Null
}

fn eval_return(return_statement: &ReturnStatement, env: &Environment) -> Value {
    let value = eval_expression(&return_statement.value, env);
    if value.is_error() {
        return value;
    }

    Value::ReturnValue(Box::new(value))
}

fn eval_expression(expression: &Expression, env: &Environment) -> Value {
    match expression {
        Expression::IntegerLiteral(node) => Value::Integer(node.value),
        Expression::StringLiteral(node) => Value::String(Rc::from(node.value.as_str())),
        Expression::BooleanLiteral(node) => Value::Boolean(node.value),
        Expression::Identifier(node) => env
            .get(&node.name)
            .or_else(|| builtins::lookup(&node.name))
            .unwrap_or_else(|| Value::Error(format!("Identificador no encontrado: {}", node.name))),
        Expression::Prefix(node) => eval_prefix(node, env),
        Expression::Infix(node) => eval_infix(node, env),
        Expression::If(node) => eval_if(node, env),
        Expression::FunctionLiteral(node) => Value::Function(Rc::new(FunctionValue {
            params: node.parameters.clone(),
            body: node.body.clone(),
            env: env.clone(),
        })),
        Expression::Call(node) => eval_call(node, env),
    }
}

fn eval_prefix(node: &Prefix, env: &Environment) -> Value {
    let right = eval_expression(&node.right, env);
    if right.is_error() {
        return right;
    }

    match node.operator.as_str() {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(n) => Value::Integer(-n),
            other => Value::Error(format!("Operador desconocido: -{}", other.kind())),
        },
        other => Value::Error(format!("Operador desconocido: {other}{}", right.kind())),
    }
}

fn eval_infix(node: &Infix, env: &Environment) -> Value {
    let left = eval_expression(&node.left, env);
    if left.is_error() {
        return left;
    }
    let right = eval_expression(&node.right, env);
    if right.is_error() {
        return right;
    }

    let operator = node.operator.as_str();
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer_infix(operator, *a, *b),
        (Value::String(a), Value::String(b)) => eval_string_infix(operator, a, b),
        _ => match operator {
            "==" => Value::Boolean(identity_eq(&left, &right)),
            "!=" => Value::Boolean(!identity_eq(&left, &right)),
            _ if left.kind() != right.kind() => Value::Error(format!(
                "Discrepancia de tipos: {} {operator} {}",
                left.kind(),
                right.kind()
            )),
            _ => Value::Error(format!(
                "Operador desconocido: {} {operator} {}",
                left.kind(),
                right.kind()
            )),
        },
    }
}

/// Floor division (`a.div_euclid` would give Euclidean, not floor, division
/// when `b` is negative; spec §4.4 asks for floor division specifically).
/// Returns `None` when `b` is zero.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return None;
    }
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Errors, rather than panics, are how this evaluator reports arithmetic
/// that can't be carried out — division by zero and overflow both become
/// `Value::Error` instead of crashing the host process.
fn eval_integer_infix(operator: &str, a: i64, b: i64) -> Value {
    match operator {
        "+" => a
            .checked_add(b)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Error("Desbordamiento aritmetico: INTEGER + INTEGER".into())),
        "-" => a
            .checked_sub(b)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Error("Desbordamiento aritmetico: INTEGER - INTEGER".into())),
        "*" => a
            .checked_mul(b)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Error("Desbordamiento aritmetico: INTEGER * INTEGER".into())),
        "/" => floor_div(a, b)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Error("Division entre cero: INTEGER / INTEGER".into())),
        "<" => Value::Boolean(a < b),
        ">" => Value::Boolean(a > b),
        "==" => Value::Boolean(a == b),
        "!=" => Value::Boolean(a != b),
        other => Value::Error(format!("Operador desconocido: INTEGER {other} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, a: &str, b: &str) -> Value {
    match operator {
        "+" => Value::String(Rc::from(format!("{a}{b}").as_str())),
        "==" => Value::Boolean(a == b),
        "!=" => Value::Boolean(a != b),
        other => Value::Error(format!("Operador desconocido: STRING {other} STRING")),
    }
}

fn eval_if(node: &If, env: &Environment) -> Value {
    let condition = eval_expression(&node.condition, env);
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block(&node.consequence, env)
    } else if let Some(alternative) = &node.alternative {
        eval_block(alternative, env)
    } else {
        Value::Null
    }
}

fn eval_call(node: &Call, env: &Environment) -> Value {
    let callee = eval_expression(&node.function, env);
    if callee.is_error() {
        return callee;
    }

    let mut args = Vec::with_capacity(node.arguments.len());
    for argument in &node.arguments {
        let value = eval_expression(argument, env);
        if value.is_error() {
            return value;
        }
        args.push(value);
    }

    match callee {
        Value::Function(function) => {
            let call_env = Environment::enclosed(&function.env);
            for (param, arg) in function.params.iter().zip(args) {
                call_env.set(param.name.clone(), arg);
            }

            match eval_block(&function.body, &call_env) {
                Value::ReturnValue(value) => *value,
                other => other,
            }
        }
        Value::Builtin(func) => func(args),
        other => Value::Error(format!("No es una funcion: {}", other.kind())),
    }
}
