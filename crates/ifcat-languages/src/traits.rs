//! Core trait for language support.

use ifcat_facts_core::VisibilityMechanism;

/// Language support trait.
///
/// Each language implements this trait to provide:
/// - The tree-sitter grammar
/// - Node kind classification for interface declarations and their members
/// - Query sources for the declaration query engine
/// - Visibility detection and the built-in type table
pub trait Language: Send + Sync {
    /// Display name for this language (e.g., "Go")
    fn name(&self) -> &'static str;

    /// File extensions this language handles (e.g., ["go"])
    fn extensions(&self) -> &'static [&'static str];

    /// The tree-sitter grammar.
    fn grammar(&self) -> tree_sitter::Language;

    /// How this language determines symbol visibility
    fn visibility_mechanism(&self) -> VisibilityMechanism;

    // === Queries ===

    /// Query matching a named interface declaration.
    ///
    /// Must capture `@name` (the declared identifier) and `@body` (the
    /// interface type), and may capture `@spec` (the whole declaration).
    fn interface_query(&self) -> &'static str;

    /// Query matching the namespace (package) declaration; captures `@name`.
    fn namespace_query(&self) -> &'static str;

    /// Query matching one import; captures `@import` (the whole import, whose
    /// optional `name` field is the local binding) and `@path`.
    fn import_query(&self) -> &'static str;

    /// Import binding that merges the imported namespace into the importing one.
    fn dot_import_kind(&self) -> &'static str;

    /// Import binding that makes no name visible.
    fn blank_import_kind(&self) -> &'static str;

    /// Namespace an import path binds when no alias is written.
    ///
    /// `path` is the literal as it appears in source, quotes included.
    fn namespace_for_import_path(&self, path: &str) -> Option<String>;

    // === Node Classification ===

    /// Interface-body members that are method specifications.
    fn method_kinds(&self) -> &'static [&'static str];

    /// Interface-body members that may denote an embedded interface.
    fn embed_kinds(&self) -> &'static [&'static str];

    /// Bare type reference nodes (candidates for qualification).
    fn type_identifier_kind(&self) -> &'static str;

    /// Already-qualified type reference nodes (`pkg.Type`).
    fn qualified_type_kind(&self) -> &'static str;

    /// Generic instantiation nodes (`List[T]`); the `type` field names the base.
    fn generic_type_kind(&self) -> &'static str;

    /// Parameter declaration nodes inside a parameter list.
    fn parameter_kinds(&self) -> &'static [&'static str];

    /// Variadic parameter declaration node (`...T`).
    fn variadic_parameter_kind(&self) -> &'static str;

    /// Type parameter declarations on a generic type spec.
    fn type_parameter_kind(&self) -> &'static str;

    // === Types ===

    /// Predeclared type names that are never qualified.
    fn builtin_types(&self) -> &'static [&'static str];

    /// Prefix sigil marking an indirection (pointer) in rendered type text.
    fn indirection_marker(&self) -> Option<char> {
        None
    }

    /// Whether `ident` names a built-in type.
    ///
    /// A single leading indirection marker is stripped first; membership is
    /// an exact match against `builtin_types`.
    fn is_builtin_type(&self, ident: &str) -> bool {
        let bare = match self.indirection_marker() {
            Some(marker) => ident.strip_prefix(marker).unwrap_or(ident),
            None => ident,
        };
        self.builtin_types().contains(&bare)
    }

    /// Whether `ident` is exported under this language's visibility rule.
    fn is_exported(&self, ident: &str) -> bool {
        self.visibility_mechanism().is_exported(ident)
    }
}
