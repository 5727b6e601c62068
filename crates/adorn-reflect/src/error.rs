//! Annotation errors
//!
//! Everything here surfaces synchronously at decoration or definition
//! time. Reflection queries never error: absence is an empty collection.

/// Error applying an annotation to a declaration site.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnnotationError {
    /// The annotation was applied to something that is not a valid
    /// decoration site for its kind
    #[error("Invalid annotation target `{member}` on class `{class}`")]
    InvalidTarget {
        /// Name of the class being decorated
        class: String,
        /// The offending member name
        member: String,
    },
}
