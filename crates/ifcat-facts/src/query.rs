//! Declaration query engine.
//!
//! Runs the language's structural queries against a syntax tree to find the
//! package clause and the interface declarations, then classifies the members
//! of each interface body as method specifications or embedded bases.
//!
//! Queries run once per top-level declaration (each direct child of the root)
//! rather than over the whole tree, so that types declared inside function
//! bodies never enter the catalog.

use crate::ExtractError;
use ifcat_facts_core::BaseRef;
use ifcat_languages::Language;
use std::collections::HashMap;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

/// Field holding the declared identifier (type spec, method, parameter).
pub(crate) const NAME_FIELD: &str = "name";
/// Field holding a parameter's or generic instantiation's type.
pub(crate) const TYPE_FIELD: &str = "type";
pub(crate) const PARAMETERS_FIELD: &str = "parameters";
pub(crate) const RESULT_FIELD: &str = "result";
const TYPE_PARAMETERS_FIELD: &str = "type_parameters";

/// A matched interface declaration.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceDecl<'tree> {
    /// The whole type spec (`Name interface { ... }`).
    pub spec: Node<'tree>,
    pub name: Node<'tree>,
    /// The `interface { ... }` body.
    pub body: Node<'tree>,
}

/// A direct member of an interface body.
#[derive(Debug, Clone)]
pub enum Member<'tree> {
    Method(Node<'tree>),
    Embed(BaseRef),
}

/// How a unit's imports bind package names.
///
/// Only bindings that differ from the imported package need recording: an
/// alias (`import myio "io"`) maps `myio` to `io`, and a dot import
/// (`import . "io"`) makes `io`'s names visible unqualified. Plain imports
/// already bind the package name and blank imports bind nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    aliases: HashMap<String, String>,
    dot_imports: Vec<String>,
}

impl ImportTable {
    /// Rewrite an aliased qualifier to the package it names.
    pub fn rebase(&self, base: BaseRef) -> BaseRef {
        match base.package.as_deref().and_then(|p| self.aliases.get(p)) {
            Some(package) => BaseRef::qualified(package, &base.name),
            None => base,
        }
    }

    /// Dot-imported packages, in import order.
    pub fn dot_imports(&self) -> &[String] {
        &self.dot_imports
    }
}

/// Compiled declaration queries for one language.
///
/// Compiled once and shared read-only across parallel extraction tasks.
pub struct DeclarationQueries {
    language: &'static dyn Language,
    interface: Query,
    interface_name: u32,
    interface_body: u32,
    interface_spec: u32,
    namespace: Query,
    namespace_name: u32,
    import: Query,
    import_spec: u32,
    import_path: u32,
}

impl DeclarationQueries {
    pub fn new(language: &'static dyn Language) -> Result<Self, ExtractError> {
        let grammar = language.grammar();
        let interface = Query::new(&grammar, language.interface_query())
            .map_err(|e| ExtractError::Query(e.to_string()))?;
        let namespace = Query::new(&grammar, language.namespace_query())
            .map_err(|e| ExtractError::Query(e.to_string()))?;
        let import = Query::new(&grammar, language.import_query())
            .map_err(|e| ExtractError::Query(e.to_string()))?;

        Ok(Self {
            language,
            interface_name: capture_index(&interface, "name")?,
            interface_body: capture_index(&interface, "body")?,
            interface_spec: capture_index(&interface, "spec")?,
            interface,
            namespace_name: capture_index(&namespace, "name")?,
            namespace,
            import_spec: capture_index(&import, "import")?,
            import_path: capture_index(&import, "path")?,
            import,
        })
    }

    pub fn language(&self) -> &'static dyn Language {
        self.language
    }

    /// Find the namespace identifier: the first match among top-level declarations.
    pub fn namespace<'tree>(&self, root: Node<'tree>, source: &[u8]) -> Option<Node<'tree>> {
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let mut query_cursor = QueryCursor::new();
            let mut matches = query_cursor.matches(&self.namespace, child, source);
            while let Some(m) = matches.next() {
                if let Some(node) = m.nodes_for_capture_index(self.namespace_name).next() {
                    return Some(node);
                }
            }
        }
        None
    }

    /// Collect the aliased and dot imports of a unit.
    pub fn imports(&self, root: Node<'_>, source: &[u8]) -> ImportTable {
        let mut table = ImportTable::default();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let mut query_cursor = QueryCursor::new();
            let mut matches = query_cursor.matches(&self.import, child, source);
            while let Some(m) = matches.next() {
                let spec = m.nodes_for_capture_index(self.import_spec).next();
                let path = m.nodes_for_capture_index(self.import_path).next();
                let (Some(spec), Some(path)) = (spec, path) else {
                    continue;
                };
                let Some(package) = self
                    .language
                    .namespace_for_import_path(node_text(path, source))
                else {
                    continue;
                };
                let Some(binding) = spec.child_by_field_name(NAME_FIELD) else {
                    continue;
                };
                if binding.kind() == self.language.dot_import_kind() {
                    table.dot_imports.push(package);
                } else if binding.kind() != self.language.blank_import_kind() {
                    let alias = node_text(binding, source);
                    if alias != package {
                        table.aliases.insert(alias.to_string(), package);
                    }
                }
            }
        }
        table
    }

    /// Find every top-level interface declaration, in source order.
    ///
    /// Grouped declarations (`type ( A interface{}; B interface{} )`) yield
    /// one entry per spec.
    pub fn interface_declarations<'tree>(
        &self,
        root: Node<'tree>,
        source: &[u8],
    ) -> Vec<InterfaceDecl<'tree>> {
        let mut decls = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let mut query_cursor = QueryCursor::new();
            let mut matches = query_cursor.matches(&self.interface, child, source);
            while let Some(m) = matches.next() {
                let spec = m.nodes_for_capture_index(self.interface_spec).next();
                let name = m.nodes_for_capture_index(self.interface_name).next();
                let body = m.nodes_for_capture_index(self.interface_body).next();
                let (Some(spec), Some(name), Some(body)) = (spec, name, body) else {
                    continue;
                };
                // Local types inside function bodies also match; keep only
                // specs owned directly by this top-level declaration.
                if spec.parent() != Some(child) {
                    continue;
                }
                decls.push(InterfaceDecl { spec, name, body });
            }
        }
        decls
    }

    /// Classify the direct named children of an interface body, in order.
    ///
    /// Method kinds become [`Member::Method`]. An embed element holding a
    /// single named type becomes [`Member::Embed`]. Anything else (constraint
    /// unions, approximation elements, comments) is ignored.
    pub fn members<'tree>(&self, body: Node<'tree>, source: &[u8]) -> Vec<Member<'tree>> {
        let mut members = Vec::new();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            let kind = child.kind();
            if self.language.method_kinds().contains(&kind) {
                members.push(Member::Method(child));
            } else if self.language.embed_kinds().contains(&kind)
                && let Some(base) = self.embedded_base(child, source)
            {
                members.push(Member::Embed(base));
            }
        }
        members
    }

    /// Names of the type parameters declared on a generic type spec.
    pub fn type_parameters(&self, spec: Node<'_>, source: &[u8]) -> Vec<String> {
        let Some(list) = spec.child_by_field_name(TYPE_PARAMETERS_FIELD) else {
            return Vec::new();
        };
        let mut names = Vec::new();
        let mut cursor = list.walk();
        for decl in list.named_children(&mut cursor) {
            if decl.kind() != self.language.type_parameter_kind() {
                continue;
            }
            let mut name_cursor = decl.walk();
            for name in decl.children_by_field_name(NAME_FIELD, &mut name_cursor) {
                names.push(node_text(name, source).to_string());
            }
        }
        names
    }

    fn embedded_base(&self, elem: Node<'_>, source: &[u8]) -> Option<BaseRef> {
        let mut cursor = elem.walk();
        let mut named = elem
            .named_children(&mut cursor)
            .filter(|n| !n.is_extra());
        let only = named.next()?;
        if named.next().is_some() {
            return None; // union: A | B
        }
        self.base_ref(only, source)
    }

    fn base_ref(&self, node: Node<'_>, source: &[u8]) -> Option<BaseRef> {
        let kind = node.kind();
        if kind == self.language.type_identifier_kind() {
            Some(BaseRef::local(node_text(node, source)))
        } else if kind == self.language.qualified_type_kind() {
            let text = node_text(node, source);
            let (package, name) = text.split_once('.')?;
            Some(BaseRef::qualified(package.trim(), name.trim()))
        } else if kind == self.language.generic_type_kind() {
            self.base_ref(node.child_by_field_name(TYPE_FIELD)?, source)
        } else {
            None
        }
    }
}

fn capture_index(query: &Query, name: &str) -> Result<u32, ExtractError> {
    query
        .capture_index_for_name(name)
        .ok_or_else(|| ExtractError::Query(format!("query has no @{name} capture")))
}

/// Source text of a node. Invalid UTF-8 yields an empty string.
pub(crate) fn node_text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}
