use crate::error::{DocError, Result};
use crate::parsers::syntax::{SyntaxRegistry, SyntaxSpec};
use std::path::Path;

pub fn detect_syntax<'r>(registry: &'r SyntaxRegistry, file_path: &Path) -> Result<&'r SyntaxSpec> {
    match file_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => registry.detect_from_extension(ext),
        None => Err(DocError::UnsupportedSyntax { ext: String::new() }),
    }
}

/// Display name of a module file: its stem, or the package name for `__init__`.
pub fn module_name_from_path(relative_path: &Path) -> String {
    let mut parts: Vec<String> = relative_path
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .filter(|c| !c.is_empty() && *c != "." && *c != "/")
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let stem = relative_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    if stem != "__init__" || parts.is_empty() {
        parts.push(stem.to_string());
    }

    parts.join(".")
}
