//! Callable wrappers for native member implementations
//!
//! Methods and property accessors are plain Rust closures behind `Arc`s.
//! A [`Callable`] pairs the function with an observable name; code that
//! replaces a method implementation is expected to carry the original
//! name over to the replacement.

use std::fmt;
use std::sync::Arc;

use crate::class::Class;
use crate::instance::Instance;
use crate::value::Value;

/// The receiver a method invocation is bound to.
#[derive(Clone, Copy)]
pub enum Receiver<'a> {
    /// An instance method call
    Instance(&'a Instance),
    /// A static method call
    Static(&'a Class),
}

/// A native method implementation.
pub type NativeFn = Arc<dyn Fn(Receiver<'_>, &[Value]) -> Value + Send + Sync>;

/// A native property getter.
pub type GetterFn = Arc<dyn Fn(&Instance) -> Value + Send + Sync>;

/// A native property setter.
pub type SetterFn = Arc<dyn Fn(&Instance, Value) + Send + Sync>;

/// A named native function: the implementation of a method member.
#[derive(Clone)]
pub struct Callable {
    name: String,
    func: NativeFn,
}

impl Callable {
    /// Create a callable from a closure
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(Receiver<'_>, &[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Create a callable from an already-wrapped function
    pub fn from_fn(name: impl Into<String>, func: NativeFn) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    /// The observable name of this callable
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying function
    pub fn func(&self) -> &NativeFn {
        &self.func
    }

    /// Invoke the callable with a receiver and arguments
    pub fn invoke(&self, receiver: Receiver<'_>, args: &[Value]) -> Value {
        (self.func)(receiver, args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
