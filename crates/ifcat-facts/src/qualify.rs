//! Namespace qualification of type references.
//!
//! A bare type reference in a method signature is rewritten to
//! `<namespace>.<Type>` unless it is already qualified, names a built-in type,
//! or names a type parameter of the enclosing generic interface.
//!
//! Rewriting is driven by node spans: the qualifier collects the start offsets
//! of the type identifiers that need a prefix and splices `<namespace>.` in at
//! exactly those offsets. A parameter called `Potato` of type `Potato` renders
//! as `Potato dog.Potato`, never `dog.Potato dog.Potato`.

use crate::query::node_text;
use ifcat_languages::Language;
use tree_sitter::Node;

/// Per-unit qualification context.
#[derive(Clone, Copy)]
pub struct TypeQualifier<'a> {
    language: &'a dyn Language,
    namespace: &'a str,
    source: &'a [u8],
    type_params: &'a [String],
}

impl<'a> TypeQualifier<'a> {
    pub fn new(language: &'a dyn Language, namespace: &'a str, source: &'a [u8]) -> Self {
        Self {
            language,
            namespace,
            source,
            type_params: &[],
        }
    }

    /// Type parameter names that stay bare (the generic interface's own `[T any]`).
    pub fn with_type_params(mut self, type_params: &'a [String]) -> Self {
        self.type_params = type_params;
        self
    }

    /// Whether a type identifier node must be prefixed with the namespace.
    pub fn needs_qualification(&self, node: Node<'_>) -> bool {
        if node
            .parent()
            .is_some_and(|p| p.kind() == self.language.qualified_type_kind())
        {
            return false;
        }
        let ident = node_text(node, self.source);
        !ident.is_empty()
            && !self.language.is_builtin_type(ident)
            && !self.type_params.iter().any(|p| p == ident)
    }

    /// Byte offsets, in source order, where `<namespace>.` must be inserted
    /// within `node`'s subtree.
    fn insertion_points(&self, node: Node<'_>) -> Vec<usize> {
        let mut points = Vec::new();
        self.collect(node, &mut points);
        points.sort_unstable();
        points
    }

    /// Render `node`'s source text with every qualifying reference prefixed.
    pub fn render(&self, node: Node<'_>) -> String {
        let points = self.insertion_points(node);
        self.render_with(node, &points)
    }

    /// Render `node`'s source text, splicing the namespace in at `points`.
    ///
    /// Points outside the node's byte range are ignored.
    fn render_with(&self, node: Node<'_>, points: &[usize]) -> String {
        let range = node.byte_range();
        let extra = points.len() * (self.namespace.len() + 1);
        let mut out = String::with_capacity(range.len() + extra);
        let mut last = range.start;
        for &point in points {
            if point < last || point > range.end {
                continue;
            }
            out.push_str(&String::from_utf8_lossy(&self.source[last..point]));
            out.push_str(self.namespace);
            out.push('.');
            last = point;
        }
        out.push_str(&String::from_utf8_lossy(&self.source[last..range.end]));
        out
    }

    fn collect(&self, node: Node<'_>, points: &mut Vec<usize>) {
        if node.kind() == self.language.type_identifier_kind() {
            if self.needs_qualification(node) {
                points.push(node.start_byte());
            }
            return;
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.collect(child, points);
        }
    }
}
