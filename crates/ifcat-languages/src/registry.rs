//! Language support registry with extension-based lookup.

use crate::Language;
use std::path::Path;

/// Built-in languages, in lookup order.
static LANGUAGES: &[&'static dyn Language] = &[
    #[cfg(feature = "lang-go")]
    &crate::go::Go,
];

/// Get language support for a file extension.
///
/// Returns `None` if the extension is not recognized or the feature is not enabled.
pub fn support_for_extension(ext: &str) -> Option<&'static dyn Language> {
    let lower = ext.to_lowercase();
    LANGUAGES
        .iter()
        .find(|lang| lang.extensions().contains(&lower.as_str()))
        .copied()
}

/// Get language support for a file path, by extension.
pub fn support_for_path(path: &Path) -> Option<&'static dyn Language> {
    let ext = path.extension()?.to_str()?;
    support_for_extension(ext)
}
