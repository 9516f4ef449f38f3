mod definition;
mod diagnostic;

pub use definition::{Argument, Definition, DefinitionKind};
pub use diagnostic::{Diagnostic, Severity};

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Documentation extracted from one module.
///
/// Entries are kept in `BTreeMap`s so every category iterates in
/// case-sensitive lexicographic order regardless of source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleSummary {
    pub name: String,
    pub docstring: String,
    constants: BTreeMap<String, String>,
    functions: BTreeMap<String, String>,
    classes: BTreeMap<String, String>,
}

impl ModuleSummary {
    pub fn new(name: impl Into<String>) -> Self {
        ModuleSummary {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn set_docstring(&mut self, docstring: String) {
        self.docstring = docstring;
    }

    /// Records a constant. The first occurrence of a name wins.
    pub fn add_constant(&mut self, name: &str, docstring: String) -> bool {
        if self.constants.contains_key(name) {
            trace!("Ignoring repeated assignment to {}", name);
            return false;
        }
        self.constants.insert(name.to_string(), docstring);
        true
    }

    /// Records a rendered function. A later definition replaces an earlier one.
    pub fn add_function(&mut self, name: &str, rendered: String) {
        if self.functions.insert(name.to_string(), rendered).is_some() {
            trace!("Function {} redefined, keeping the last definition", name);
        }
    }

    /// Records a rendered class. A later definition replaces an earlier one.
    pub fn add_class(&mut self, name: &str, rendered: String) {
        if self.classes.insert(name.to_string(), rendered).is_some() {
            trace!("Class {} redefined, keeping the last definition", name);
        }
    }

    pub fn constants(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constants.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn classes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn constant(&self, name: &str) -> Option<&str> {
        self.constants.get(name).map(String::as_str)
    }

    pub fn function(&self, name: &str) -> Option<&str> {
        self.functions.get(name).map(String::as_str)
    }

    pub fn class(&self, name: &str) -> Option<&str> {
        self.classes.get(name).map(String::as_str)
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn entry_count(&self) -> usize {
        self.constant_count() + self.function_count() + self.class_count()
    }
}

/// A finished module summary together with what went wrong on the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extraction {
    pub summary: ModuleSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_keep_first_occurrence() {
        let mut summary = ModuleSummary::new("m");
        assert!(summary.add_constant("X", "first".to_string()));
        assert!(!summary.add_constant("X", "second".to_string()));
        assert!(summary.add_constant("x", "lower".to_string()));
        assert_eq!(summary.constant("X"), Some("first"));
        assert_eq!(summary.constant_count(), 2);
    }

    #[test]
    fn entries_iterate_in_lexicographic_order() {
        let mut summary = ModuleSummary::new("m");
        summary.add_function("zeta", String::new());
        summary.add_function("alpha", String::new());
        summary.add_function("Beta", String::new());
        let names: Vec<_> = summary.functions().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Beta", "alpha", "zeta"]);
    }

    #[test]
    fn extraction_splits_diagnostics_by_severity() {
        let extraction = Extraction {
            summary: ModuleSummary::new("m"),
            diagnostics: vec![Diagnostic::warning("w"), Diagnostic::error("e")],
        };
        assert_eq!(extraction.warnings().count(), 1);
        assert_eq!(extraction.errors().next().unwrap().message, "e");
    }
}
