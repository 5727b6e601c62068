//! Class declaration builder
//!
//! The builder is the annotation-application protocol: it collects member
//! declarations with their annotations, then `build` constructs the class
//! and applies everything in the documented order: all members are
//! declared first, then member annotations run in declaration order (each
//! member's list front to back, so index 0 is applied first), then
//! constructor-parameter annotations, then class annotations.

use std::sync::Arc;

use adorn_core::{Callable, Class, Descriptor, Receiver, Surface, Value};

use crate::error::AnnotationError;
use crate::factory::{check_member_target, ClassAnnotation, MemberAnnotation};

enum Decl {
    Method(Callable),
    Property(Option<Value>),
}

struct MemberDecl {
    surface: Surface,
    name: String,
    decl: Decl,
    annotations: Vec<MemberAnnotation>,
}

/// Builder for a decorated class declaration.
pub struct ClassBuilder {
    name: String,
    parent: Option<Arc<Class>>,
    members: Vec<MemberDecl>,
    ctor_annotations: Vec<ClassAnnotation>,
    class_annotations: Vec<ClassAnnotation>,
}

impl ClassBuilder {
    /// Start a class declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            members: Vec::new(),
            ctor_annotations: Vec::new(),
            class_annotations: Vec::new(),
        }
    }

    /// Set the base class
    pub fn extends(mut self, parent: &Arc<Class>) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Add a class annotation; repeated calls apply in call order
    pub fn annotate(mut self, annotation: ClassAnnotation) -> Self {
        self.class_annotations.push(annotation);
        self
    }

    /// Add constructor-parameter annotations, applied in list order
    pub fn constructor(mut self, annotations: Vec<ClassAnnotation>) -> Self {
        self.ctor_annotations.extend(annotations);
        self
    }

    /// Declare an instance method with its annotations
    pub fn method(
        mut self,
        name: &str,
        func: impl Fn(Receiver<'_>, &[Value]) -> Value + Send + Sync + 'static,
        annotations: Vec<MemberAnnotation>,
    ) -> Self {
        self.members.push(MemberDecl {
            surface: Surface::Prototype,
            name: name.to_string(),
            decl: Decl::Method(Callable::new(name, func)),
            annotations,
        });
        self
    }

    /// Declare an instance data property with its annotations
    pub fn property(
        mut self,
        name: &str,
        default: Option<Value>,
        annotations: Vec<MemberAnnotation>,
    ) -> Self {
        self.members.push(MemberDecl {
            surface: Surface::Prototype,
            name: name.to_string(),
            decl: Decl::Property(default),
            annotations,
        });
        self
    }

    /// Declare a static method with its annotations
    pub fn static_method(
        mut self,
        name: &str,
        func: impl Fn(Receiver<'_>, &[Value]) -> Value + Send + Sync + 'static,
        annotations: Vec<MemberAnnotation>,
    ) -> Self {
        self.members.push(MemberDecl {
            surface: Surface::Constructor,
            name: name.to_string(),
            decl: Decl::Method(Callable::new(name, func)),
            annotations,
        });
        self
    }

    /// Declare a static data property with its annotations
    pub fn static_property(
        mut self,
        name: &str,
        default: Option<Value>,
        annotations: Vec<MemberAnnotation>,
    ) -> Self {
        self.members.push(MemberDecl {
            surface: Surface::Constructor,
            name: name.to_string(),
            decl: Decl::Property(default),
            annotations,
        });
        self
    }

    /// Construct the class and apply all annotations.
    ///
    /// Fails loudly on the first invalid declaration or annotation site;
    /// a failed build leaves no usable class behind.
    pub fn build(self) -> Result<Arc<Class>, AnnotationError> {
        let class = match &self.parent {
            Some(parent) => Class::with_parent(self.name.as_str(), parent),
            None => Class::new(self.name.as_str()),
        };

        // Declare every member before any annotation runs, so annotations
        // observe the complete shape
        for member in &self.members {
            check_member_target(&class, &member.name)?;
            match &member.decl {
                Decl::Method(callable) => {
                    class.define(member.surface, &member.name, Descriptor::Method(callable.clone()));
                }
                Decl::Property(default) => {
                    class.define(member.surface, &member.name, Descriptor::Data(default.clone()));
                }
            }
        }

        for member in self.members {
            for annotation in member.annotations {
                annotation.apply(&class, member.surface, &member.name)?;
            }
        }
        for annotation in self.ctor_annotations {
            annotation.apply(&class)?;
        }
        for annotation in self.class_annotations {
            annotation.apply(&class)?;
        }

        Ok(class)
    }
}
