//! Go language support.

use crate::{Language, VisibilityMechanism};

/// Go language support.
pub struct Go;

/// Predeclared Go types. `comparable` only appears in constraints but is kept
/// so a generic signature never renders it as `pkg.comparable`.
const BUILTIN_TYPES: &[&str] = &[
    "string",
    "bool",
    "int",
    "int8",
    "uint8",
    "byte",
    "int16",
    "uint16",
    "int32",
    "rune",
    "uint32",
    "int64",
    "uint64",
    "uint",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "error",
    "any",
    "comparable",
];

impl Language for Go {
    fn name(&self) -> &'static str {
        "Go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn visibility_mechanism(&self) -> VisibilityMechanism {
        VisibilityMechanism::NamingConvention
    }

    fn interface_query(&self) -> &'static str {
        r#"(type_spec
            name: (type_identifier) @name
            type: (interface_type) @body) @spec"#
    }

    fn namespace_query(&self) -> &'static str {
        r#"(package_clause (package_identifier) @name)"#
    }

    fn import_query(&self) -> &'static str {
        r#"(import_spec path: (_) @path) @import"#
    }

    fn dot_import_kind(&self) -> &'static str {
        "dot"
    }

    fn blank_import_kind(&self) -> &'static str {
        "blank_identifier"
    }

    /// Last path element, skipping a `/vN` major-version suffix and dropping
    /// a gopkg.in style `.vN` suffix (`gopkg.in/yaml.v3` binds `yaml`).
    fn namespace_for_import_path(&self, path: &str) -> Option<String> {
        let path = path.trim().trim_matches(|c| c == '"' || c == '`');
        let mut elements = path.rsplit('/').filter(|e| !e.is_empty());
        let mut last = elements.next()?;
        if is_major_version(last) {
            last = elements.next()?;
        }
        let name = match last.rsplit_once(".v") {
            Some((stem, version)) if !stem.is_empty() && is_version_number(version) => stem,
            _ => last,
        };
        Some(name.to_string())
    }

    fn method_kinds(&self) -> &'static [&'static str] {
        &["method_elem"]
    }

    fn embed_kinds(&self) -> &'static [&'static str] {
        // `type_elem` also carries constraint unions (`~int | ~string`);
        // the query engine only treats single named types as embeds.
        &["type_elem"]
    }

    fn type_identifier_kind(&self) -> &'static str {
        "type_identifier"
    }

    fn qualified_type_kind(&self) -> &'static str {
        "qualified_type"
    }

    fn generic_type_kind(&self) -> &'static str {
        "generic_type"
    }

    fn parameter_kinds(&self) -> &'static [&'static str] {
        &["parameter_declaration", "variadic_parameter_declaration"]
    }

    fn variadic_parameter_kind(&self) -> &'static str {
        "variadic_parameter_declaration"
    }

    fn type_parameter_kind(&self) -> &'static str {
        "type_parameter_declaration"
    }

    fn builtin_types(&self) -> &'static [&'static str] {
        BUILTIN_TYPES
    }

    fn indirection_marker(&self) -> Option<char> {
        Some('*')
    }
}

fn is_version_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// `v2`, `v3`, ...: module major-version path elements.
fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|n| is_version_number(n) && n != "0" && n != "1")
}
