//! Typed views over the Kotlin concrete syntax tree
//!
//! Parsing is done with tree-sitter and the `tree-sitter-kotlin-ng`
//! grammar. The views here expose only what inspections need: property
//! declarations, their accessors and modifier lists, and the supertype
//! entries of the enclosing class or object. All views borrow from the
//! owning `KtFile`; nothing is mutated in place. Rewrites go through
//! span edits over the original text instead.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::span::Span;

/// Errors raised while turning source text into a syntax tree
#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("tree-sitter rejected the Kotlin grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree")]
    Parse,
}

/// The Kotlin grammar used by every parse in this crate
pub fn language() -> Language {
    tree_sitter_kotlin_ng::LANGUAGE.into()
}

/// A parsed Kotlin source file
pub struct KtFile {
    tree: Tree,
    source: String,
}

impl KtFile {
    /// Parse Kotlin source text into a syntax tree
    pub fn parse(source: impl Into<String>) -> Result<Self, SyntaxError> {
        let source = source.into();
        let mut parser = Parser::new();
        parser.set_language(&language())?;
        let tree = parser.parse(&source, None).ok_or(SyntaxError::Parse)?;
        Ok(Self { tree, source })
    }

    /// The original source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root node of the syntax tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// All property declarations in the file, in source order
    pub fn properties(&self) -> Vec<Property<'_>> {
        let mut out = Vec::new();
        walk(self.root(), &mut |node| {
            if node.kind() == "property_declaration" {
                out.push(Property {
                    node,
                    source: &self.source,
                });
            }
            true
        });
        out
    }

    /// The property declaration occupying exactly `span`, if any
    ///
    /// Used by fixes to re-locate their target in the current tree; a
    /// stale span simply finds nothing.
    pub fn property_at(&self, span: Span) -> Option<Property<'_>> {
        self.properties().into_iter().find(|p| p.span() == span)
    }
}

/// Preorder traversal. Return `false` from the callback to skip the
/// children of the current node.
pub fn walk<'t, F: FnMut(Node<'t>) -> bool>(node: Node<'t>, visit: &mut F) {
    if !visit(node) {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, visit);
    }
}

fn first_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn first_descendant_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut found = None;
    walk(node, &mut |n| {
        if found.is_some() {
            return false;
        }
        if n.kind() == kind && n != node {
            found = Some(n);
            return false;
        }
        true
    });
    found
}

fn node_span(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// View over a `property_declaration` node
#[derive(Clone, Copy)]
pub struct Property<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> Property<'a> {
    /// Span of the whole declaration, accessors included
    pub fn span(&self) -> Span {
        node_span(self.node)
    }

    /// The declared simple name, if one can be found
    pub fn name(&self) -> Option<&'a str> {
        if let Some(name) = self.node.child_by_field_name("name") {
            return Some(&self.source[name.byte_range()]);
        }
        let declaration = first_child_of_kind(self.node, "variable_declaration")
            .or_else(|| first_descendant_of_kind(self.node, "variable_declaration"))?;
        let identifier = declaration
            .child_by_field_name("name")
            .or_else(|| first_child_of_kind(declaration, "identifier"))?;
        Some(&self.source[identifier.byte_range()])
    }

    fn modifiers_node(&self) -> Option<Node<'a>> {
        first_child_of_kind(self.node, "modifiers")
    }

    /// Full text of the modifier list, empty when there is none
    pub fn modifiers_text(&self) -> &'a str {
        self.modifiers_node()
            .map(|n| &self.source[n.byte_range()])
            .unwrap_or("")
    }

    /// Span of the `override` token inside the modifier list
    pub fn override_span(&self) -> Option<Span> {
        let modifiers = self.modifiers_node()?;
        let mut found = None;
        walk(modifiers, &mut |n| {
            if found.is_some() {
                return false;
            }
            if &self.source[n.byte_range()] == "override" {
                found = Some(node_span(n));
                return false;
            }
            true
        });
        found
    }

    /// The explicit getter, if declared
    pub fn getter(&self) -> Option<Accessor<'a>> {
        first_child_of_kind(self.node, "getter")
            .or_else(|| first_descendant_of_kind(self.node, "getter"))
            .map(|node| Accessor {
                node,
                source: self.source,
            })
    }

    /// The explicit setter, if declared
    pub fn setter(&self) -> Option<Accessor<'a>> {
        first_child_of_kind(self.node, "setter")
            .or_else(|| first_descendant_of_kind(self.node, "setter"))
            .map(|node| Accessor {
                node,
                source: self.source,
            })
    }

    /// The class or object whose body directly contains this property
    ///
    /// Top-level and local properties have no enclosing class and
    /// return `None`.
    pub fn enclosing_class(&self) -> Option<ClassLike<'a>> {
        let body = self.node.parent()?;
        if body.kind() != "class_body" {
            return None;
        }
        let owner = body.parent()?;
        match owner.kind() {
            "class_declaration" | "object_declaration" | "interface_declaration" => {
                Some(ClassLike {
                    node: owner,
                    source: self.source,
                })
            }
            _ => None,
        }
    }
}

/// Body of a property accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorBody<'a> {
    /// Block body, braces included, verbatim
    Block(&'a str),
    /// Expression body with the `=` stripped
    Expression(&'a str),
}

/// View over a `getter` or `setter` node
#[derive(Clone, Copy)]
pub struct Accessor<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> Accessor<'a> {
    /// Extract the accessor body, preferring the grammar's
    /// `function_body` node and falling back to token scanning.
    ///
    /// A bare accessor (`get` with no body at all) yields `None`.
    pub fn body(&self) -> Option<AccessorBody<'a>> {
        if let Some(body) = first_child_of_kind(self.node, "function_body") {
            let text = &self.source[body.byte_range()];
            return if text.starts_with('{') {
                Some(AccessorBody::Block(text))
            } else {
                Some(AccessorBody::Expression(
                    text.trim_start_matches('=').trim(),
                ))
            };
        }

        // Some grammar versions inline the body tokens directly into
        // the accessor node; whichever of '{' or '=' comes first
        // decides the body form.
        let text = &self.source[self.node.byte_range()];
        match (text.find('{'), text.find('=')) {
            (Some(brace), Some(equals)) if brace < equals => {
                Some(AccessorBody::Block(&text[brace..]))
            }
            (Some(brace), None) => Some(AccessorBody::Block(&text[brace..])),
            (_, Some(equals)) => Some(AccessorBody::Expression(text[equals + 1..].trim())),
            (None, None) => None,
        }
    }
}

/// View over a class, object, or interface declaration
#[derive(Clone, Copy)]
pub struct ClassLike<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> ClassLike<'a> {
    /// Declared name of the class or object
    pub fn name(&self) -> Option<&'a str> {
        self.node
            .child_by_field_name("name")
            .or_else(|| first_child_of_kind(self.node, "identifier"))
            .map(|n| &self.source[n.byte_range()])
    }

    /// Entries of the explicit supertype list, in source order
    pub fn supertypes(&self) -> Vec<SupertypeEntry<'a>> {
        let mut entries = Vec::new();
        let mut cursor = self.node.walk();
        for child in self.node.children(&mut cursor) {
            match child.kind() {
                "delegation_specifier"
                | "annotated_delegation_specifier"
                | "constructor_invocation"
                | "explicit_delegation"
                | "user_type" => entries.push(SupertypeEntry {
                    node: child,
                    source: self.source,
                }),
                // Some grammar versions group the entries under one node
                "delegation_specifiers" => {
                    let mut inner = child.walk();
                    for entry in child.children(&mut inner) {
                        if entry.is_named() {
                            entries.push(SupertypeEntry {
                                node: entry,
                                source: self.source,
                            });
                        }
                    }
                }
                _ => {}
            }
        }
        entries
    }
}

/// One entry of a supertype list, e.g. `Base()` or `Closeable`
#[derive(Clone, Copy)]
pub struct SupertypeEntry<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> SupertypeEntry<'a> {
    /// The type reference of this entry, constructor arguments and
    /// delegation expressions stripped
    pub fn type_reference(&self) -> &'a str {
        if self.node.kind() == "user_type" {
            return &self.source[self.node.byte_range()];
        }
        if let Some(user_type) = first_descendant_of_kind(self.node, "user_type") {
            return &self.source[user_type.byte_range()];
        }
        let text = &self.source[self.node.byte_range()];
        text.split('(').next().unwrap_or("").trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: &str = r#"
class Widget : Base() {
    override val foo: Int
        get() = 1
}
"#;

    #[test]
    fn finds_property_and_name() {
        let file = KtFile::parse(WIDGET).unwrap();
        let properties = file.properties();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].name(), Some("foo"));
    }

    #[test]
    fn override_token_span() {
        let file = KtFile::parse(WIDGET).unwrap();
        let property = &file.properties()[0];
        let span = property.override_span().unwrap();
        assert_eq!(span.text(file.source()), "override");
    }

    #[test]
    fn modifier_list_text() {
        let file = KtFile::parse(WIDGET).unwrap();
        let property = &file.properties()[0];
        assert_eq!(property.modifiers_text(), "override");
    }

    #[test]
    fn getter_expression_body() {
        let file = KtFile::parse(WIDGET).unwrap();
        let property = &file.properties()[0];
        let getter = property.getter().unwrap();
        assert_eq!(getter.body(), Some(AccessorBody::Expression("1")));
        assert!(property.setter().is_none());
    }

    #[test]
    fn setter_block_body() {
        let source = r#"
class Widget : Base() {
    override var foo: Int
        get() = backing
        set(value) { backing = value }
    var backing: Int = 0
}
"#;
        let file = KtFile::parse(source).unwrap();
        let property = file
            .properties()
            .into_iter()
            .find(|p| p.name() == Some("foo"))
            .unwrap();
        match property.setter().unwrap().body() {
            Some(AccessorBody::Block(block)) => {
                assert!(block.starts_with('{'));
                assert!(block.contains("backing = value"));
            }
            other => panic!("expected block body, got {other:?}"),
        }
    }

    #[test]
    fn bare_accessor_has_no_body() {
        let source = r#"
class Widget : Base() {
    override val foo: Int
        get
}
"#;
        let file = KtFile::parse(source).unwrap();
        let property = &file.properties()[0];
        let getter = property.getter().expect("bare get still parses as a getter");
        assert_eq!(getter.body(), None);
    }

    #[test]
    fn supertype_entries_in_source_order() {
        let source = r#"
class Mixed : First(), Second {
}
"#;
        let file = KtFile::parse(source).unwrap();
        let mut classes = Vec::new();
        walk(file.root(), &mut |n| {
            if n.kind() == "class_declaration" {
                classes.push(n);
            }
            true
        });
        assert_eq!(classes.len(), 1);

        let class = ClassLike {
            node: classes[0],
            source: file.source(),
        };
        assert_eq!(class.name(), Some("Mixed"));
        let references: Vec<&str> = class
            .supertypes()
            .iter()
            .map(|s| s.type_reference())
            .collect();
        assert_eq!(references, vec!["First", "Second"]);
    }

    #[test]
    fn enclosing_class_of_member_property() {
        let file = KtFile::parse(WIDGET).unwrap();
        let property = &file.properties()[0];
        let owner = property.enclosing_class().unwrap();
        assert_eq!(owner.name(), Some("Widget"));
    }

    #[test]
    fn top_level_property_has_no_enclosing_class() {
        let file = KtFile::parse("val foo = 1\n").unwrap();
        let property = &file.properties()[0];
        assert!(property.enclosing_class().is_none());
    }

    #[test]
    fn property_at_requires_matching_span() {
        let file = KtFile::parse(WIDGET).unwrap();
        let span = file.properties()[0].span();
        assert!(file.property_at(span).is_some());
        assert!(file.property_at(Span::new(0, 4)).is_none());
    }
}
