//! Rule: Flag property overrides that only collide with Java accessors
//!
//! A Kotlin property marked `override` does not connect to `getX`/`isX`/
//! `setX` methods inherited from a Java supertype: the compiler reports
//! the override as binding to nothing, even though the accessor names
//! line up. This rule detects that situation and offers a fix that
//! rewrites the property into explicit accessor functions, which do
//! override the Java methods.
//!
//! Example:
//! ```kotlin
//! // Before (Base is a Java class declaring `int getFoo()`)
//! class Widget : Base() {
//!     override val foo: Int
//!         get() = 1
//! }
//!
//! // After applying the fix
//! class Widget : Base() {
//!     override fun getFoo(): Int = 1
//! }
//! ```
//!
//! Detection is name-based, not signature-based: an unrelated supertype
//! method that happens to share an accessor name still triggers the
//! diagnostic. The host compiler's own "nothing to override" check runs
//! first, so legitimate overrides never reach the name scan.

use kotfix_core::diagnostic::{Diagnostic, FixError, QuickFix};
use kotfix_core::semantics::{CompilerDiagnostic, SemanticModel};
use kotfix_core::syntax::{AccessorBody, KtFile, Property};
use kotfix_core::{apply_edits, Edit, Span};

use crate::registry::Rule;

pub const RULE_NAME: &str = "accessor_override";

const MESSAGE: &str = "Overriding accessor-style methods using property syntax is not allowed";
const FIX_NAME: &str = "Override accessor functions instead";

/// Check a parsed Kotlin file for property overrides that collide with
/// supertype accessor methods
pub fn check_accessor_override(file: &KtFile, semantics: &dyn SemanticModel) -> Vec<Diagnostic> {
    file.properties()
        .iter()
        .filter_map(|property| inspect_property(property, semantics))
        .collect()
}

fn inspect_property(property: &Property<'_>, semantics: &dyn SemanticModel) -> Option<Diagnostic> {
    let name = property.name()?;
    let override_span = property.override_span()?;

    if !semantics
        .diagnostics_for(property)
        .contains(&CompilerDiagnostic::NothingToOverride)
    {
        // The resolver found a real override target; nothing to flag.
        return None;
    }

    let owner = property.enclosing_class()?;
    let accessor_names = accessor_name_set(name);

    for entry in owner.supertypes() {
        let Some(supertype) = semantics.resolve_type(&entry) else {
            continue;
        };
        let Some(scope) = supertype.class_descriptor() else {
            continue;
        };
        if !accessor_names
            .iter()
            .any(|candidate| scope.declares_function(candidate))
        {
            continue;
        }
        let Some(property_type) = semantics.property_type(property) else {
            continue;
        };

        tracing::debug!(
            property = %name,
            supertype = %entry.type_reference(),
            "property accessors collide with supertype methods"
        );

        // First matching supertype wins; stop scanning.
        return Some(
            Diagnostic::error(RULE_NAME, MESSAGE, override_span).with_fix(Box::new(
                PropertyToAccessors {
                    property_span: property.span(),
                    property_name: name.to_string(),
                    property_type: property_type.rendered().to_string(),
                },
            )),
        );
    }

    None
}

/// The three accessor names a property of this name could collide with
fn accessor_name_set(name: &str) -> [String; 3] {
    let capitalized = capitalize(name);
    [
        format!("get{capitalized}"),
        format!("is{capitalized}"),
        format!("set{capitalized}"),
    ]
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Quick-fix: replace the property with explicit accessor functions
///
/// Carries the property's span, name, and resolved type, captured at
/// detection time. The accessors and modifiers are recomputed from the
/// live tree when the fix runs; a stale invocation (property gone,
/// renamed, or no longer an override) is a silent no-op.
pub struct PropertyToAccessors {
    property_span: Span,
    property_name: String,
    property_type: String,
}

impl QuickFix for PropertyToAccessors {
    fn name(&self) -> &'static str {
        FIX_NAME
    }

    fn family_name(&self) -> &'static str {
        FIX_NAME
    }

    fn apply(&self, source: &str) -> Result<Option<String>, FixError> {
        let file = KtFile::parse(source)?;

        // Re-locate the target; the tree may have changed since the
        // diagnostic was produced.
        let Some(property) = file.property_at(self.property_span) else {
            tracing::trace!("fix target no longer present, skipping");
            return Ok(None);
        };
        let Some(name) = property.name() else {
            return Ok(None);
        };
        if name != self.property_name {
            tracing::trace!(found = %name, "property at fix span was renamed, skipping");
            return Ok(None);
        }
        if property.override_span().is_none() {
            return Ok(None);
        }

        let capitalized = capitalize(name);
        let modifiers = property.modifiers_text();
        let mut functions = Vec::new();

        if let Some(getter) = property.getter() {
            let body = match getter.body() {
                Some(AccessorBody::Block(block)) => block.to_string(),
                Some(AccessorBody::Expression(expr)) => format!("= {expr}"),
                None => return Ok(None),
            };
            functions.push(synthesize_function(
                modifiers,
                &format!("get{capitalized}(): {}", self.property_type),
                &body,
            ));
        }

        if let Some(setter) = property.setter() {
            let body = match setter.body() {
                Some(AccessorBody::Block(block)) => block.to_string(),
                Some(AccessorBody::Expression(expr)) => format!(": Unit = {expr}"),
                None => return Ok(None),
            };
            functions.push(synthesize_function(
                modifiers,
                &format!("set{capitalized}(value: {})", self.property_type),
                &body,
            ));
        }

        // One replacement edit covers both the inserts and the removal
        // of the original property, so a rejected batch cannot leave
        // the accessors and the property visible at the same time.
        let indent = line_indent(source, self.property_span.start);
        let replacement = functions.join(&format!("\n{indent}"));
        let edit = Edit::new(
            self.property_span,
            replacement,
            "Replace property with accessor functions",
        );

        let rewritten = apply_edits(source, &[edit])?;
        tracing::debug!(property = %name, "rewrote property into accessor functions");
        Ok(Some(rewritten))
    }
}

/// Assemble a function declaration from its textual parts
///
/// A body beginning with `:` carries its own return-type annotation and
/// attaches directly to the signature's closing parenthesis.
fn synthesize_function(modifiers: &str, signature: &str, body: &str) -> String {
    let declaration = if body.starts_with(':') {
        format!("fun {signature}{body}")
    } else {
        format!("fun {signature} {body}")
    };
    if modifiers.is_empty() {
        declaration
    } else {
        format!("{modifiers} {declaration}")
    }
}

/// Whitespace prefix of the line containing `offset`
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &source[line_start..offset];
    if prefix.chars().all(|c| c.is_whitespace()) {
        prefix
    } else {
        ""
    }
}

pub struct AccessorOverrideRule;

impl Rule for AccessorOverrideRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Flag property overrides that collide with supertype accessor methods \
         and rewrite them into explicit accessor functions"
    }

    fn check(&self, file: &KtFile, semantics: &dyn SemanticModel) -> Vec<Diagnostic> {
        check_accessor_override(file, semantics)
    }
}
