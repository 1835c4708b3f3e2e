use ifcat_languages::LanguageError;

/// Why a source unit produced no records.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{path}: parser produced no syntax tree")]
    Parse { path: String },

    #[error("{path}:{line}: syntax error")]
    Syntax { path: String, line: usize },

    #[error("{path}: no package clause")]
    MissingNamespace { path: String },

    #[error("invalid declaration query: {0}")]
    Query(String),

    #[error(transparent)]
    Language(#[from] LanguageError),
}

impl ExtractError {
    /// Short machine-friendly reason, used in scan summaries.
    pub fn reason(&self) -> &'static str {
        match self {
            ExtractError::Parse { .. } => "parse",
            ExtractError::Syntax { .. } => "syntax",
            ExtractError::MissingNamespace { .. } => "missing-package",
            ExtractError::Query(_) => "query",
            ExtractError::Language(_) => "grammar",
        }
    }
}
