//! Interceptor factories
//!
//! Interceptors are decorator factories that additionally rewrite the
//! decorated member's runtime behavior at application time. A method
//! interceptor replaces the member's callable with a wrapped one; a
//! property interceptor converts a data slot into an accessor pair and
//! wraps the getter and/or setter.
//!
//! Stacked interceptors compose in application order: each application
//! receives the previously installed implementation as the original.
//! Sites with nothing to wrap (no concrete callable, no accessor
//! callbacks, static data slots) still record their metadata and degrade
//! silently; that is the contract, not an error.

use std::sync::Arc;

use adorn_core::{Callable, Class, Descriptor, GetterFn, Instance, MetadataKey, NativeFn, SetterFn, Surface, Value};

use crate::args::HeadArgs;
use crate::factory::{check_member_target, ComposeFn, MemberAnnotation};
use crate::reflect::{DecoratedMethod, DecoratedProperty, Reflector};
use crate::scoped::ScopedReflector;
use crate::store;
use crate::Metadata;

/// The declaration site an interceptor is rewriting.
pub struct InterceptContext<'a> {
    /// The class being decorated
    pub class: &'a Arc<Class>,
    /// The surface the member lives on
    pub surface: Surface,
    /// The member name
    pub member: &'a str,
    /// The member's descriptor before the rewrite
    pub descriptor: Descriptor,
}

/// Rewrites a method implementation given the original callable, the
/// metadata accumulated so far, and the declaration site.
pub type MethodWrapFn<T> =
    Arc<dyn Fn(Callable, &[T], &InterceptContext<'_>) -> NativeFn + Send + Sync>;

/// Rewrites a property getter.
pub type GetterWrapFn<T> =
    Arc<dyn Fn(GetterFn, &[T], &InterceptContext<'_>) -> GetterFn + Send + Sync>;

/// Rewrites a property setter.
pub type SetterWrapFn<T> =
    Arc<dyn Fn(SetterFn, &[T], &InterceptContext<'_>) -> SetterFn + Send + Sync>;

// ============================================================================
// Method interceptors
// ============================================================================

/// A method decorator factory that also wraps the decorated method.
pub struct MethodInterceptor<A, T> {
    key: MetadataKey,
    compose: ComposeFn<A, T>,
    wrap: MethodWrapFn<T>,
}

impl<A, T> MethodInterceptor<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    /// Create an interceptor factory with a compose transform
    pub fn new(
        compose: impl Fn(A) -> T + Send + Sync + 'static,
        wrap: impl Fn(Callable, &[T], &InterceptContext<'_>) -> NativeFn + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(compose),
            wrap: Arc::new(wrap),
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
        let wrap = self.wrap.clone();
        MemberAnnotation::new(move |class: &Arc<Class>, surface: Surface, member: &str| {
            check_member_target(class, member)?;
            let value = compose(args);
            store::append_array(key, class, surface, Some(member), value);

            let site = class.own_member(surface, member).map(|m| m.descriptor);
            match site {
                Some(Descriptor::Method(original)) => {
                    let accumulated = store::get_array::<T>(key, class, surface, Some(member));
                    let context = InterceptContext {
                        class,
                        surface,
                        member,
                        descriptor: Descriptor::Method(original.clone()),
                    };
                    let replacement = wrap(original.clone(), &accumulated, &context);
                    // The replacement keeps the original's observable name
                    class.replace_method(
                        surface,
                        member,
                        Callable::from_fn(original.name(), replacement),
                    );
                    tracing::debug!(class = class.name(), member, "method interceptor installed");
                }
                _ => {
                    // No concrete implementation at this site: metadata only
                    tracing::debug!(class = class.name(), member, "method interceptor skipped");
                }
            }
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

impl<A, T> MethodInterceptor<A, T>
where
    A: HeadArgs<T>,
    T: Metadata,
{
    /// Create an interceptor factory with no compose transform
    pub fn direct(
        wrap: impl Fn(Callable, &[T], &InterceptContext<'_>) -> NativeFn + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(A::head),
            wrap: Arc::new(wrap),
        }
    }
}

/// Create a method interceptor factory with a compose transform
pub fn create_method_interceptor<A, T>(
    compose: impl Fn(A) -> T + Send + Sync + 'static,
    wrap: impl Fn(Callable, &[T], &InterceptContext<'_>) -> NativeFn + Send + Sync + 'static,
) -> MethodInterceptor<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    MethodInterceptor::new(compose, wrap)
}

// ============================================================================
// Property interceptors
// ============================================================================

/// A property decorator factory that also wraps property access.
///
/// With neither an `on_get` nor an `on_set` callback the factory behaves
/// exactly like a property decorator: metadata is recorded and the member
/// is left untouched.
pub struct PropertyInterceptor<A, T> {
    key: MetadataKey,
    compose: ComposeFn<A, T>,
    on_get: Option<GetterWrapFn<T>>,
    on_set: Option<SetterWrapFn<T>>,
}

impl<A, T> PropertyInterceptor<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    /// Create an interceptor factory with a compose transform and no
    /// accessor callbacks
    pub fn new(compose: impl Fn(A) -> T + Send + Sync + 'static) -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(compose),
            on_get: None,
            on_set: None,
        }
    }

    /// Wrap reads of the decorated property
    pub fn on_get(
        mut self,
        wrap: impl Fn(GetterFn, &[T], &InterceptContext<'_>) -> GetterFn + Send + Sync + 'static,
    ) -> Self {
        self.on_get = Some(Arc::new(wrap));
        self
    }

    /// Wrap writes to the decorated property
    pub fn on_set(
        mut self,
        wrap: impl Fn(SetterFn, &[T], &InterceptContext<'_>) -> SetterFn + Send + Sync + 'static,
    ) -> Self {
        self.on_set = Some(Arc::new(wrap));
        self
    }

    /// The metadata key this factory writes under
    pub fn key(&self) -> MetadataKey {
        self.key
    }

    /// Build an annotation carrying `args`
    pub fn with(&self, args: A) -> MemberAnnotation {
        let key = self.key;
        let compose = self.compose.clone();
        let on_get = self.on_get.clone();
        let on_set = self.on_set.clone();
        MemberAnnotation::new(move |class: &Arc<Class>, surface: Surface, member: &str| {
            check_member_target(class, member)?;
            if class.own_member(surface, member).is_none() {
                class.define(surface, member, Descriptor::Data(None));
            }
            let value = compose(args);
            store::append_array(key, class, surface, Some(member), value);

            if on_get.is_none() && on_set.is_none() {
                // Plain decoration: metadata only
                return Ok(());
            }
            if surface == Surface::Constructor {
                // Static slots stay data-valued; nothing to rewrite
                tracing::debug!(class = class.name(), member, "property interceptor skipped");
                return Ok(());
            }

            let current = match class.own_member(surface, member) {
                Some(m) => m.descriptor,
                None => return Ok(()),
            };
            let (base_get, base_set) = match &current {
                Descriptor::Accessor { get, set } => (get.clone(), set.clone()),
                Descriptor::Data(default) => data_slot_accessors(member, default.clone()),
                Descriptor::Method(_) => {
                    // Callable site: metadata only
                    tracing::debug!(class = class.name(), member, "property interceptor skipped");
                    return Ok(());
                }
            };

            let accumulated = store::get_array::<T>(key, class, surface, Some(member));
            let context = InterceptContext {
                class,
                surface,
                member,
                descriptor: current,
            };
            let get = match &on_get {
                Some(wrap) => wrap(base_get, &accumulated, &context),
                None => base_get,
            };
            let set = match (&on_set, base_set) {
                (Some(wrap), Some(base)) => Some(wrap(base, &accumulated, &context)),
                (Some(_), None) => None,
                (None, base) => base,
            };
            class.install_accessor(member, get, set);
            tracing::debug!(class = class.name(), member, "property interceptor installed");
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

impl<A, T> PropertyInterceptor<A, T>
where
    A: HeadArgs<T>,
    T: Metadata,
{
    /// Create an interceptor factory with no compose transform and no
    /// accessor callbacks
    pub fn direct() -> Self {
        Self {
            key: MetadataKey::mint(),
            compose: Arc::new(A::head),
            on_get: None,
            on_set: None,
        }
    }
}

/// Create a property interceptor factory with a compose transform.
///
/// Attach accessor callbacks with
/// [`on_get`](PropertyInterceptor::on_get) /
/// [`on_set`](PropertyInterceptor::on_set) before building annotations.
pub fn create_property_interceptor<A, T>(
    compose: impl Fn(A) -> T + Send + Sync + 'static,
) -> PropertyInterceptor<A, T>
where
    A: Send + 'static,
    T: Metadata,
{
    PropertyInterceptor::new(compose)
}

/// Default accessor pair for a converted data slot: reads and writes the
/// instance's raw field, seeded with the declared value.
fn data_slot_accessors(member: &str, default: Option<Value>) -> (GetterFn, Option<SetterFn>) {
    let slot = member.to_string();
    let get: GetterFn = {
        let slot = slot.clone();
        Arc::new(move |instance: &Instance| {
            instance
                .get_field(&slot)
                .or_else(|| default.clone())
                .unwrap_or(Value::Null)
        })
    };
    let set: SetterFn = Arc::new(move |instance: &Instance, value: Value| {
        instance.set_field(&slot, value);
    });
    (get, Some(set))
}
