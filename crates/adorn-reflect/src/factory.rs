//! Decorator factories
//!
//! A factory is bound to one freshly minted [`MetadataKey`] and one
//! compose transform mapping its argument tuple to a metadata value.
//! Calling `with` (or `param`/`ctor_param` for the parameter kind)
//! produces a single-use annotation that writes into the store when
//! applied to a declaration site. Factories are created once and reused
//! across any number of classes.
//!
//! Factories built with [`ClassDecorator::direct`] and friends skip the
//! compose step: the first argument is the metadata value (see
//! [`HeadArgs`]).

use std::sync::Arc;

use adorn_core::{Class, Descriptor, MetadataKey, Surface};

use crate::args::HeadArgs;
use crate::error::AnnotationError;
use crate::reflect::{
    DecoratedClass, DecoratedMethod, DecoratedParameter, DecoratedProperty, Reflector,
};
use crate::scoped::ScopedReflector;
use crate::store;
use crate::Metadata;

/// A compose transform: argument tuple in, metadata value out.
pub(crate) type ComposeFn<A, T> = Arc<dyn Fn(A) -> T + Send + Sync>;

/// Member names that are never valid decoration sites.
const RESERVED_MEMBER_NAMES: [&str; 2] = ["constructor", "prototype"];

/// Whether `name` is excluded from decoration and enumeration
pub(crate) fn is_reserved_member(name: &str) -> bool {
    RESERVED_MEMBER_NAMES.contains(&name)
}

/// Reject reserved member names as decoration sites
pub(crate) fn check_member_target(class: &Class, member: &str) -> Result<(), AnnotationError> {
    if is_reserved_member(member) {
        return Err(AnnotationError::InvalidTarget {
            class: class.name().to_string(),
            member: member.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Annotation objects
// ============================================================================

/// A single-use annotation for a class declaration site.
pub struct ClassAnnotation {
    apply: Box<dyn FnOnce(&Arc<Class>) -> Result<(), AnnotationError> + Send>,
}

impl ClassAnnotation {
    pub(crate) fn new(
        apply: impl FnOnce(&Arc<Class>) -> Result<(), AnnotationError> + Send + 'static,
    ) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }

    /// Apply this annotation to a class
    pub fn apply(self, class: &Arc<Class>) -> Result<(), AnnotationError> {
        (self.apply)(class)
    }
}

/// A single-use annotation for a member declaration site.
pub struct MemberAnnotation {
    apply: Box<dyn FnOnce(&Arc<Class>, Surface, &str) -> Result<(), AnnotationError> + Send>,
}

impl MemberAnnotation {
    pub(crate) fn new(
        apply: impl FnOnce(&Arc<Class>, Surface, &str) -> Result<(), AnnotationError>
            + Send
            + 'static,
    ) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }

    /// Apply this annotation to a member of a class surface
    pub fn apply(
        self,
        class: &Arc<Class>,
        surface: Surface,
        member: &str,
    ) -> Result<(), AnnotationError> {
        (self.apply)(class, surface, member)
    }
}

// ============================================================================
// Class decorators
// ============================================================================

/// A factory for class-level annotations.
pub struct ClassDecorator<A, T> {
    key: MetadataKey,
    compose: ComposeFn<A, T>,
}

impl<A, T> ClassDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    /// Create a factory with a compose transform
    pub fn new(compose: impl Fn(A) -> T + Send + Sync + 'static) -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(compose),
        }
    }

    /// The metadata key this factory writes under
    pub fn key(&self) -> MetadataKey {
        self.key
    }

    /// Build an annotation carrying `args`
    pub fn with(&self, args: A) -> ClassAnnotation {
        let key = self.key;
        let compose = self.compose.clone();
        ClassAnnotation::new(move |class: &Arc<Class>| {
            let value = compose(args);
            store::append_array(key, class, Surface::Constructor, None, value);
            Ok(())
        })
    }

    /// A reflector bound to this factory's key
    pub fn reflect(&self, class: &Arc<Class>) -> ScopedReflector<T> {
        ScopedReflector::new(class, self.key)
    }

    /// Query a class for this factory's class-level metadata
    pub fn class(&self, class: &Arc<Class>) -> Vec<DecoratedClass<T>> {
        Reflector::new(class).class(self.key)
    }
}

impl<A, T> ClassDecorator<A, T>
where
    A: HeadArgs<T>,
    T: Metadata,
{
    /// Create a factory with no compose transform: the first argument is
    /// the metadata value, extra arguments are dropped
    pub fn direct() -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(A::head),
        }
    }
}

// ============================================================================
// Method decorators
// ============================================================================

/// A factory for method annotations.
pub struct MethodDecorator<A, T> {
    key: MetadataKey,
    compose: ComposeFn<A, T>,
}

impl<A, T> MethodDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    /// Create a factory with a compose transform
    pub fn new(compose: impl Fn(A) -> T + Send + Sync + 'static) -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(compose),
        }
    }

    /// The metadata key this factory writes under
    pub fn key(&self) -> MetadataKey {
        self.key
    }

    /// Build an annotation carrying `args`
    pub fn with(&self, args: A) -> MemberAnnotation {
        let key = self.key;
        let compose = self.compose.clone();
        MemberAnnotation::new(move |class: &Arc<Class>, surface: Surface, member: &str| {
            check_member_target(class, member)?;
            let value = compose(args);
            store::append_array(key, class, surface, Some(member), value);
            Ok(())
        })
    }

    /// A reflector bound to this factory's key
    pub fn reflect(&self, class: &Arc<Class>) -> ScopedReflector<T> {
        ScopedReflector::new(class, self.key)
    }

    /// Query a class for methods carrying this factory's metadata
    pub fn methods(&self, class: &Arc<Class>) -> Vec<DecoratedMethod<T>> {
        Reflector::new(class).methods(self.key)
    }
}

impl<A, T> MethodDecorator<A, T>
where
    A: HeadArgs<T>,
    T: Metadata,
{
    /// Create a factory with no compose transform: the first argument is
    /// the metadata value, extra arguments are dropped
    pub fn direct() -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(A::head),
        }
    }
}

// ============================================================================
// Property decorators
// ============================================================================

/// A factory for property annotations.
///
/// Applying a property annotation also guarantees the member name exists
/// as a discoverable slot: when the site has no declaration of its own, a
/// placeholder data slot is declared so enumeration can find the name.
pub struct PropertyDecorator<A, T> {
    key: MetadataKey,
    compose: ComposeFn<A, T>,
}

impl<A, T> PropertyDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    /// Create a factory with a compose transform
    pub fn new(compose: impl Fn(A) -> T + Send + Sync + 'static) -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(compose),
        }
    }

    /// The metadata key this factory writes under
    pub fn key(&self) -> MetadataKey {
        self.key
    }

    /// Build an annotation carrying `args`
    pub fn with(&self, args: A) -> MemberAnnotation {
        let key = self.key;
        let compose = self.compose.clone();
        MemberAnnotation::new(move |class: &Arc<Class>, surface: Surface, member: &str| {
            check_member_target(class, member)?;
            if class.own_member(surface, member).is_none() {
                class.define(surface, member, Descriptor::Data(None));
            }
            let value = compose(args);
            store::append_array(key, class, surface, Some(member), value);
            Ok(())
        })
    }

    /// A reflector bound to this factory's key
    pub fn reflect(&self, class: &Arc<Class>) -> ScopedReflector<T> {
        ScopedReflector::new(class, self.key)
    }

    /// Query a class for properties carrying this factory's metadata
    pub fn properties(&self, class: &Arc<Class>) -> Vec<DecoratedProperty<T>> {
        Reflector::new(class).properties(self.key)
    }
}

impl<A, T> PropertyDecorator<A, T>
where
    A: HeadArgs<T>,
    T: Metadata,
{
    /// Create a factory with no compose transform: the first argument is
    /// the metadata value, extra arguments are dropped
    pub fn direct() -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(A::head),
        }
    }
}

// ============================================================================
// Parameter decorators
// ============================================================================

/// A factory for parameter annotations.
pub struct ParameterDecorator<A, T> {
    key: MetadataKey,
    compose: ComposeFn<A, T>,
}

impl<A, T> ParameterDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    /// Create a factory with a compose transform
    pub fn new(compose: impl Fn(A) -> T + Send + Sync + 'static) -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(compose),
        }
    }

    /// The metadata key this factory writes under
    pub fn key(&self) -> MetadataKey {
        self.key
    }

    /// Build an annotation for parameter `index` of a method
    pub fn param(&self, index: usize, args: A) -> MemberAnnotation {
        let key = self.key;
        let compose = self.compose.clone();
        MemberAnnotation::new(move |class: &Arc<Class>, surface: Surface, member: &str| {
            check_member_target(class, member)?;
            let value = compose(args);
            let mut map = store::get_param_map::<T>(key, class, surface, Some(member));
            map.entry(index).or_default().push(value);
            store::set_param_map(key, class, surface, Some(member), map);
            Ok(())
        })
    }

    /// Build an annotation for parameter `index` of the constructor
    pub fn ctor_param(&self, index: usize, args: A) -> ClassAnnotation {
        let key = self.key;
        let compose = self.compose.clone();
        ClassAnnotation::new(move |class: &Arc<Class>| {
            let value = compose(args);
            let mut map = store::get_param_map::<T>(key, class, Surface::Constructor, None);
            map.entry(index).or_default().push(value);
            store::set_param_map(key, class, Surface::Constructor, None, map);
            Ok(())
        })
    }

    /// A reflector bound to this factory's key
    pub fn reflect(&self, class: &Arc<Class>) -> ScopedReflector<T> {
        ScopedReflector::new(class, self.key)
    }

    /// Query a class for parameters carrying this factory's metadata
    pub fn parameters(&self, class: &Arc<Class>) -> Vec<DecoratedParameter<T>> {
        Reflector::new(class).parameters(self.key)
    }
}

impl<A, T> ParameterDecorator<A, T>
where
    A: HeadArgs<T>,
    T: Metadata,
{
    /// Create a factory with no compose transform: the first argument is
    /// the metadata value, extra arguments are dropped
    pub fn direct() -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(A::head),
        }
    }
}

// ============================================================================
// Factory constructors
// ============================================================================

/// Create a class decorator factory with a compose transform
pub fn create_class_decorator<A, T>(
    compose: impl Fn(A) -> T + Send + Sync + 'static,
) -> ClassDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    ClassDecorator::new(compose)
}

/// Create a method decorator factory with a compose transform
pub fn create_method_decorator<A, T>(
    compose: impl Fn(A) -> T + Send + Sync + 'static,
) -> MethodDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    MethodDecorator::new(compose)
}

/// Create a property decorator factory with a compose transform
pub fn create_property_decorator<A, T>(
    compose: impl Fn(A) -> T + Send + Sync + 'static,
) -> PropertyDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    PropertyDecorator::new(compose)
}

/// Create a parameter decorator factory with a compose transform
pub fn create_parameter_decorator<A, T>(
    compose: impl Fn(A) -> T + Send + Sync + 'static,
) -> ParameterDecorator<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    ParameterDecorator::new(compose)
}
