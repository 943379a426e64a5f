use lpp::{evaluate, Environment, Lexer, Parser, Value};
use std::rc::Rc;

fn run(source: &str) -> Value {
    let (program, errors) = Parser::new(Lexer::new(source)).parse_program();
    assert!(errors.is_empty(), "parse errors for {source:?}: {errors:?}");
    evaluate(&program, &Environment::new())
}

#[test]
fn string_literals_round_trip() {
    assert_eq!(
        run(r#""hola mundo";"#),
        Value::String(Rc::from("hola mundo"))
    );
}

#[test]
fn longitud_reports_codepoint_count() {
    assert_eq!(run(r#"longitud("");"#), Value::Integer(0));
    assert_eq!(run(r#"longitud("programacion");"#), Value::Integer(12));
}

#[test]
fn imprimir_returns_null_and_accepts_multiple_args() {
    assert_eq!(run(r#"imprimir("a", 1, verdadero);"#), Value::Null);
}

#[test]
fn shadowing_a_builtin_name_prefers_the_local_binding() {
    assert_eq!(run("variable longitud = 42; longitud;"), Value::Integer(42));
}
