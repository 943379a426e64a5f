//! Host-implemented function registry, consulted on identifier-lookup miss
//! (spec §4.5). Extending the language with a new builtin means adding an
//! entry here, never touching evaluator dispatch.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{BuiltinFn, Value};

static BUILTINS: Lazy<HashMap<&'static str, BuiltinFn>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, BuiltinFn> = HashMap::new();
    m.insert("longitud", longitud as BuiltinFn);
    m.insert("imprimir", imprimir as BuiltinFn);
    m
});

pub fn lookup(name: &str) -> Option<Value> {
    BUILTINS.get(name).copied().map(Value::Builtin)
}

fn longitud(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::Error(format!(
            "número incorrecto de argumentos para longitud, se recibieron {}, se requieren 1",
            args.len()
        ));
    }

    match &args[0] {
        Value::String(s) => Value::Integer(s.chars().count() as i64),
        other => Value::Error(format!(
            "argumento para longitud sin soporte, se recibió {}",
            other.kind()
        )),
    }
}

/// Prints each argument's `inspect()` form separated by spaces. The
/// language's only I/O primitive; returns the `NULL` singleton.
fn imprimir(args: Vec<Value>) -> Value {
    let rendered: Vec<String> = args.iter().map(Value::inspect).collect();
    println!("{}", rendered.join(" "));
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitud_counts_codepoints() {
        let Value::Builtin(func) = lookup("longitud").unwrap() else {
            panic!("expected a builtin");
        };
        assert_eq!(
            func(vec![Value::String("Hola mundo".into())]),
            Value::Integer(10)
        );
    }

    #[test]
    fn longitud_rejects_wrong_type() {
        let Value::Builtin(func) = lookup("longitud").unwrap() else {
            panic!("expected a builtin");
        };
        assert_eq!(
            func(vec![Value::Integer(1)]),
            Value::Error("argumento para longitud sin soporte, se recibió INTEGER".into())
        );
    }

    #[test]
    fn longitud_rejects_wrong_arity() {
        let Value::Builtin(func) = lookup("longitud").unwrap() else {
            panic!("expected a builtin");
        };
        assert_eq!(
            func(vec![Value::String("a".into()), Value::String("b".into())]),
            Value::Error(
                "número incorrecto de argumentos para longitud, se recibieron 2, se requieren 1"
                    .into()
            )
        );
    }

    #[test]
    fn unknown_builtin_is_none() {
        assert!(lookup("no_existe").is_none());
    }
}
