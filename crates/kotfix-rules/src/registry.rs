//! Rule trait and registry for kotfix inspection rules
//!
//! The registry is the host-framework extension point: a host embeds
//! this crate, builds a `RuleRegistry`, and runs `check_all` once per
//! analyzed file with its own `SemanticModel` implementation.

use kotfix_core::{Diagnostic, KtFile, SemanticModel};
use std::collections::HashSet;

/// An inspection rule that can detect problems and attach fixes
pub trait Rule: Send + Sync {
    /// The unique identifier for this rule (e.g., "accessor_override")
    fn name(&self) -> &'static str;

    /// A short description of what this rule does
    fn description(&self) -> &'static str;

    /// Check a parsed Kotlin file and return diagnostics
    fn check(&self, file: &KtFile, semantics: &dyn SemanticModel) -> Vec<Diagnostic>;
}

/// Registry of all available inspection rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        let mut registry = Self { rules: Vec::new() };

        registry.register(Box::new(super::accessor_override::AccessorOverrideRule));

        registry
    }

    /// Register a new rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get all rule names
    pub fn all_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Get rules filtered by enabled names
    pub fn get_enabled(&self, enabled: &HashSet<String>) -> Vec<&dyn Rule> {
        self.rules
            .iter()
            .filter(|r| enabled.contains(r.name()))
            .map(|r| r.as_ref())
            .collect()
    }

    /// Get all rules with their descriptions
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules
            .iter()
            .map(|r| (r.name(), r.description()))
            .collect()
    }

    /// Run all enabled rules on a file
    pub fn check_all(
        &self,
        file: &KtFile,
        semantics: &dyn SemanticModel,
        enabled: &HashSet<String>,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for rule in self.get_enabled(enabled) {
            diagnostics.extend(rule.check(file, semantics));
        }
        diagnostics
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotfix_core::semantics::{CompilerDiagnostic, KotlinType};
    use kotfix_core::syntax::{Property, SupertypeEntry};

    struct EmptySemantics;

    impl SemanticModel for EmptySemantics {
        fn diagnostics_for(&self, _property: &Property<'_>) -> HashSet<CompilerDiagnostic> {
            HashSet::new()
        }

        fn resolve_type(&self, _supertype: &SupertypeEntry<'_>) -> Option<KotlinType> {
            None
        }

        fn property_type(&self, _property: &Property<'_>) -> Option<KotlinType> {
            None
        }
    }

    #[test]
    fn registry_contains_accessor_override() {
        let registry = RuleRegistry::new();
        assert!(registry.all_names().contains(&"accessor_override"));
        assert!(!registry.list_rules().is_empty());
    }

    #[test]
    fn check_all_respects_enabled_set() {
        let registry = RuleRegistry::new();
        let file = KtFile::parse("class Empty {}\n").unwrap();

        let none_enabled = HashSet::new();
        assert!(registry
            .check_all(&file, &EmptySemantics, &none_enabled)
            .is_empty());

        let all_enabled: HashSet<String> = registry
            .all_names()
            .into_iter()
            .map(String::from)
            .collect();
        assert!(registry
            .check_all(&file, &EmptySemantics, &all_enabled)
            .is_empty());
    }
}
