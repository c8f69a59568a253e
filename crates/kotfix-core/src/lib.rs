//! kotfix-core: Core abstractions for Kotlin code inspection
//!
//! This crate provides:
//! - `Span`/`Edit`: span-based code modifications
//! - `apply_edits()`: Function to apply edits preserving formatting
//! - `KtFile` and friends: typed views over the Kotlin syntax tree
//! - `Diagnostic`/`QuickFix`: inspection results and attached fixes
//! - `SemanticModel`: the injected compiler-semantics oracle

mod edit;
mod span;
pub mod diagnostic;
pub mod semantics;
pub mod syntax;

pub use diagnostic::{Diagnostic, FixError, QuickFix, Severity};
pub use edit::{apply_edits, Edit, EditError};
pub use semantics::{ClassDescriptor, CompilerDiagnostic, KotlinType, SemanticModel};
pub use span::Span;
pub use syntax::{KtFile, Property, SyntaxError};
