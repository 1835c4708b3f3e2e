//! Per-unit interface extraction.
//!
//! `Extractor::extract_from_unit` turns one source unit into the exported
//! interface records it declares. Embedded bases are recorded on each record
//! but not resolved: resolution needs the whole catalog (see `ifcat-graph`).

use crate::ExtractError;
use crate::qualify::TypeQualifier;
use crate::query::{
    DeclarationQueries, ImportTable, InterfaceDecl, Member, NAME_FIELD, PARAMETERS_FIELD,
    RESULT_FIELD, TYPE_FIELD, node_text,
};
use ifcat_facts_core::{InterfaceRecord, MethodRecord};
use ifcat_languages::{Language, parser_for};
use tree_sitter::Node;

/// Extraction options.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Reject units whose syntax tree contains error or missing nodes.
    pub strict_syntax: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strict_syntax: true,
        }
    }
}

/// Extracts exported interface declarations from source units of one language.
///
/// Shareable across threads: queries are compiled once, and each call builds
/// its own parser.
pub struct Extractor {
    queries: DeclarationQueries,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(language: &'static dyn Language) -> Result<Self, ExtractError> {
        Self::with_options(language, ExtractOptions::default())
    }

    pub fn with_options(
        language: &'static dyn Language,
        options: ExtractOptions,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            queries: DeclarationQueries::new(language)?,
            options,
        })
    }

    pub fn language(&self) -> &'static dyn Language {
        self.queries.language()
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    /// Extract every exported interface declared in one source unit.
    ///
    /// `path` is recorded as each record's origin. Records come back in
    /// declaration order with their `bases` still unresolved.
    pub fn extract_from_unit(
        &self,
        path: &str,
        source: &[u8],
    ) -> Result<Vec<InterfaceRecord>, ExtractError> {
        let language = self.language();
        let mut parser = parser_for(language)?;
        let tree = parser.parse(source, None).ok_or_else(|| ExtractError::Parse {
            path: path.to_string(),
        })?;
        let root = tree.root_node();

        if self.options.strict_syntax && root.has_error() {
            let line = first_error(root).map_or(0, |n| n.start_position().row + 1);
            return Err(ExtractError::Syntax {
                path: path.to_string(),
                line,
            });
        }

        let namespace = self
            .queries
            .namespace(root, source)
            .map(|n| node_text(n, source))
            .filter(|ns| !ns.is_empty())
            .ok_or_else(|| ExtractError::MissingNamespace {
                path: path.to_string(),
            })?;

        let imports = self.queries.imports(root, source);
        let records: Vec<InterfaceRecord> = self
            .queries
            .interface_declarations(root, source)
            .into_iter()
            .filter_map(|decl| self.interface_record(decl, namespace, &imports, path, source))
            .collect();

        tracing::trace!(path, namespace, interfaces = records.len(), "extracted unit");
        Ok(records)
    }

    fn interface_record(
        &self,
        decl: InterfaceDecl<'_>,
        namespace: &str,
        imports: &ImportTable,
        path: &str,
        source: &[u8],
    ) -> Option<InterfaceRecord> {
        let language = self.language();
        let name = node_text(decl.name, source);
        if !language.is_exported(name) {
            return None;
        }

        let type_params = self.queries.type_parameters(decl.spec, source);
        let qualifier =
            TypeQualifier::new(language, namespace, source).with_type_params(&type_params);

        let mut methods = Vec::new();
        let mut bases = Vec::new();
        for member in self.queries.members(decl.body, source) {
            match member {
                Member::Method(node) => {
                    if let Some(method) = self.method_record(node, &qualifier, source) {
                        methods.push(method);
                    }
                }
                Member::Embed(base) => bases.push(imports.rebase(base)),
            }
        }

        Some(InterfaceRecord {
            name: name.to_string(),
            namespace: namespace.to_string(),
            methods,
            origin: path.to_string(),
            line: decl.spec.start_position().row + 1,
            bases,
            dot_imports: imports.dot_imports().to_vec(),
        })
    }

    fn method_record(
        &self,
        node: Node<'_>,
        qualifier: &TypeQualifier<'_>,
        source: &[u8],
    ) -> Option<MethodRecord> {
        let name = node_text(node.child_by_field_name(NAME_FIELD)?, source);
        if !self.language().is_exported(name) {
            return None;
        }

        let parameters = node
            .child_by_field_name(PARAMETERS_FIELD)
            .map(|list| self.parameter_types(list, qualifier))
            .unwrap_or_default();
        let return_type = node
            .child_by_field_name(RESULT_FIELD)
            .map(|result| qualifier.render(result))
            .unwrap_or_default();

        Some(MethodRecord {
            signature_text: qualifier.render(node),
            name: name.to_string(),
            parameters,
            return_type,
        })
    }

    /// Rendered type of each declared parameter; `a, b T` yields `T` twice.
    fn parameter_types(&self, list: Node<'_>, qualifier: &TypeQualifier<'_>) -> Vec<String> {
        let language = self.language();
        let mut types = Vec::new();
        let mut cursor = list.walk();
        for param in list.named_children(&mut cursor) {
            if !language.parameter_kinds().contains(&param.kind()) {
                continue;
            }
            let Some(type_node) = param.child_by_field_name(TYPE_FIELD) else {
                continue;
            };
            let mut rendered = qualifier.render(type_node);
            if param.kind() == language.variadic_parameter_kind() {
                rendered.insert_str(0, "...");
            }
            let mut name_cursor = param.walk();
            let names = param
                .children_by_field_name(NAME_FIELD, &mut name_cursor)
                .count()
                .max(1);
            types.extend(std::iter::repeat_n(rendered, names));
        }
        types
    }
}

/// First error or missing node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if (child.has_error() || child.is_missing())
            && let Some(found) = first_error(child)
        {
            return Some(found);
        }
    }
    None
}
