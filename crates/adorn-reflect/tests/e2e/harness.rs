//! Shared helpers for the end-to-end tests

use adorn_reflect::{Receiver, Value};

/// Shorthand for owned strings in fixtures
pub fn s(text: &str) -> String {
    text.to_string()
}

/// A method body that ignores its receiver and arguments
pub fn noop(_recv: Receiver<'_>, _args: &[Value]) -> Value {
    Value::Null
}

/// A method body that echoes its first argument
pub fn echo(_recv: Receiver<'_>, args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Null)
}
