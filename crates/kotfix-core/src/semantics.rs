//! The injected compiler-semantics oracle
//!
//! Inspections run against a pre-existing compiler's resolved bindings.
//! That semantic model is not built here; rules consume it through the
//! `SemanticModel` trait, which keeps them testable against a fake
//! oracle without a real compiler behind it.

use std::collections::{BTreeSet, HashSet};

use crate::syntax::{Property, SupertypeEntry};

/// A diagnostic classification produced by the host compiler's own
/// resolver for a syntax node
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerDiagnostic {
    /// An `override` modifier that binds to no supertype member
    NothingToOverride,
}

/// The unsubstituted member scope of a class-like type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    functions: BTreeSet<String>,
}

impl ClassDescriptor {
    pub fn new<I, S>(functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            functions: functions.into_iter().map(Into::into).collect(),
        }
    }

    /// Names of all functions declared in the member scope
    pub fn function_names(&self) -> &BTreeSet<String> {
        &self.functions
    }

    /// Whether the scope declares a function with this exact name
    pub fn declares_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }
}

/// A resolved Kotlin type as rendered by the host compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinType {
    rendered: String,
    descriptor: Option<ClassDescriptor>,
}

impl KotlinType {
    /// A type backed by a class-like descriptor
    pub fn class(rendered: impl Into<String>, descriptor: ClassDescriptor) -> Self {
        Self {
            rendered: rendered.into(),
            descriptor: Some(descriptor),
        }
    }

    /// A type without a class-like descriptor, e.g. a type parameter
    pub fn opaque(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
            descriptor: None,
        }
    }

    /// The type as source text, e.g. `Int`
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// The class descriptor, when the type has one
    pub fn class_descriptor(&self) -> Option<&ClassDescriptor> {
        self.descriptor.as_ref()
    }
}

/// Read-only snapshot of the host's resolved bindings for one file
pub trait SemanticModel {
    /// Host-compiler diagnostics attached to this property node
    fn diagnostics_for(&self, property: &Property<'_>) -> HashSet<CompilerDiagnostic>;

    /// Resolve a supertype-list entry to a type, `None` if unresolvable
    fn resolve_type(&self, supertype: &SupertypeEntry<'_>) -> Option<KotlinType>;

    /// Resolve the declared or inferred type of a property
    fn property_type(&self, property: &Property<'_>) -> Option<KotlinType>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_function_lookup() {
        let descriptor = ClassDescriptor::new(["getFoo", "setFoo"]);
        assert!(descriptor.declares_function("getFoo"));
        assert!(!descriptor.declares_function("isFoo"));
        assert_eq!(descriptor.function_names().len(), 2);
    }

    #[test]
    fn opaque_type_has_no_descriptor() {
        let ty = KotlinType::opaque("T");
        assert_eq!(ty.rendered(), "T");
        assert!(ty.class_descriptor().is_none());
    }
}
