//! Tree-sitter parser construction and convenience functions.
//!
//! Grammars are linked statically, so a parser is cheap to build. Callers
//! that parse in parallel build one parser per task; `tree_sitter::Parser`
//! is not `Sync`.

use crate::Language;
use tree_sitter::{Parser, Tree};

/// The grammar could not be installed into a parser (ABI mismatch).
#[derive(Debug, thiserror::Error)]
#[error("failed to load {language} grammar: {message}")]
pub struct LanguageError {
    pub language: &'static str,
    pub message: String,
}

/// Create a parser for a language.
pub fn parser_for(lang: &dyn Language) -> Result<Parser, LanguageError> {
    let mut parser = Parser::new();
    parser
        .set_language(&lang.grammar())
        .map_err(|e| LanguageError {
            language: lang.name(),
            message: e.to_string(),
        })?;
    Ok(parser)
}

/// Parse source bytes with a language's grammar.
///
/// Returns `None` if the grammar cannot be loaded or the parser gives up.
/// A returned tree may still contain error nodes; check `has_error()`.
pub fn parse(lang: &dyn Language, source: &[u8]) -> Option<Tree> {
    let mut parser = parser_for(lang).ok()?;
    parser.parse(source, None)
}
