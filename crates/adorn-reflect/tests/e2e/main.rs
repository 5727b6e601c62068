//! End-to-end tests for annotation and reflection
//!
//! These tests drive the public API the way a consuming library would:
//! declare classes through the builder, decorate them, and verify the
//! reflected results and intercepted runtime behavior.

mod harness;

mod inheritance;
mod interceptors;
mod queries;
