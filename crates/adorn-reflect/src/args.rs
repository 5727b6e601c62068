//! Argument tuples for no-compose factories
//!
//! A factory built without a compose transform takes its metadata value
//! directly from the first argument. [`HeadArgs`] is the protocol for
//! that path: implemented for 1- to 4-element tuples whose head is the
//! metadata type. Extra elements are accepted and dropped; existing
//! consumers rely on the lenient arity, so it stays.

/// An argument tuple whose first element is the metadata value.
pub trait HeadArgs<T>: Send + 'static {
    /// Extract the metadata value, discarding any remaining arguments
    fn head(self) -> T;
}

impl<T: Send + 'static> HeadArgs<T> for (T,) {
    fn head(self) -> T {
        self.0
    }
}

impl<T: Send + 'static, A: Send + 'static> HeadArgs<T> for (T, A) {
    fn head(self) -> T {
        self.0
    }
}

impl<T: Send + 'static, A: Send + 'static, B: Send + 'static> HeadArgs<T> for (T, A, B) {
    fn head(self) -> T {
        self.0
    }
}

impl<T: Send + 'static, A: Send + 'static, B: Send + 'static, C: Send + 'static> HeadArgs<T>
    for (T, A, B, C)
{
    fn head(self) -> T {
        self.0
    }
}
