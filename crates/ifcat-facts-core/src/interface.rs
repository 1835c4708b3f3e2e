//! Interface and method records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One exported method specification within an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Rendered signature (name, parameters, result) with qualified type references.
    #[serde(rename = "content")]
    pub signature_text: String,
    pub name: String,
    /// Rendered parameter types, one entry per declared parameter.
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Rendered result; empty when the method returns nothing.
    pub return_type: String,
}

/// Reference to an embedded interface, as written in the embedding body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseRef {
    /// Package qualifier for `pkg.Name` embeds, `None` for same-package embeds.
    pub package: Option<String>,
    pub name: String,
}

impl BaseRef {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            package: None,
            name: name.into(),
        }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            name: name.into(),
        }
    }

    /// Lookup key for this base as seen from an interface declared in `namespace`.
    pub fn key_in(&self, namespace: &str) -> InterfaceKey {
        InterfaceKey {
            namespace: self.package.as_deref().unwrap_or(namespace).to_string(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for BaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(pkg) => write!(f, "{}.{}", pkg, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Identity of an interface across the catalog: `(namespace, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterfaceKey {
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for InterfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// One exported interface type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    /// Declared package of the source unit.
    #[serde(rename = "package")]
    pub namespace: String,
    pub methods: Vec<MethodRecord>,
    /// Path of the source unit relative to the scan root.
    #[serde(rename = "filename")]
    pub origin: String,
    /// 1-indexed line of the declaration.
    #[serde(default)]
    pub line: usize,
    /// Directly embedded interfaces. Drained by the resolver; empty once resolved.
    #[serde(skip)]
    pub bases: Vec<BaseRef>,
    /// Packages the declaring unit imports with `import .`. An unqualified
    /// base missing from the own package is looked up in these, in order.
    #[serde(skip)]
    pub dot_imports: Vec<String>,
}

impl InterfaceRecord {
    pub fn key(&self) -> InterfaceKey {
        InterfaceKey {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }

    /// True once every embedded base has been flattened into `methods`.
    pub fn is_resolved(&self) -> bool {
        self.bases.is_empty()
    }

    /// Directory part of `origin` (`""` for files at the scan root).
    pub fn origin_dir(&self) -> &str {
        self.origin
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }
}

impl fmt::Display for InterfaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}.{} in {}:{}", self.namespace, self.name, self.origin, self.line)?;
        for base in &self.bases {
            writeln!(f, "   embeds {}", base)?;
        }
        for m in &self.methods {
            writeln!(f, "   {}", m.signature_text)?;
        }
        Ok(())
    }
}
