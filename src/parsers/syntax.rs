use crate::error::{DocError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Syntax {
    Python,
}

impl Syntax {
    pub fn name(&self) -> &'static str {
        match self {
            Syntax::Python => "Python",
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A way of opening (and possibly closing) a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentDelimiter {
    /// Ends at the end of the line; runs of these lines form one comment.
    Line(&'static str),
    /// Spans lines from `open` until a line containing `close`.
    Block {
        open: &'static str,
        close: &'static str,
    },
}

impl CommentDelimiter {
    pub fn opener(&self) -> &'static str {
        match self {
            CommentDelimiter::Line(marker) => marker,
            CommentDelimiter::Block { open, .. } => open,
        }
    }
}

/// Everything the scanners need to know about one source syntax.
#[derive(Debug, Clone)]
pub struct SyntaxSpec {
    pub syntax: Syntax,
    /// Tried in order, so longer openers sharing a prefix must come first.
    pub delimiters: Vec<CommentDelimiter>,
    pub function_keywords: Vec<&'static str>,
    pub class_keyword: &'static str,
    pub return_marker: &'static str,
    pub shebang: Option<&'static str>,
    pub label_prefix: &'static str,
    pub extensions: Vec<&'static str>,
    assignment: Regex,
}

impl SyntaxSpec {
    pub fn python() -> Result<Self> {
        Ok(SyntaxSpec {
            syntax: Syntax::Python,
            delimiters: vec![
                CommentDelimiter::Block {
                    open: "'''",
                    close: "'''",
                },
                CommentDelimiter::Block {
                    open: "\"\"\"",
                    close: "\"\"\"",
                },
                CommentDelimiter::Line("#"),
            ],
            function_keywords: vec!["def", "async def"],
            class_keyword: "class",
            return_marker: "->",
            shebang: Some("#!"),
            label_prefix: "py",
            extensions: vec!["py", "py3", "pyw"],
            // `name = ...` or `name: type = ...`, but not `name == ...`
            assignment: Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?::[^=]*)?=(?:[^=]|$)")?,
        })
    }

    /// The assigned identifier, when `line` is a top-level assignment.
    pub fn assignment_target<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.assignment
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// The function keyword `line` starts with, if any.
    pub fn function_keyword(&self, line: &str) -> Option<&'static str> {
        self.function_keywords
            .iter()
            .copied()
            .find(|keyword| starts_with_keyword(line, keyword))
    }

    pub fn is_class_header(&self, line: &str) -> bool {
        starts_with_keyword(line, self.class_keyword)
    }

    pub fn is_shebang(&self, line: &str) -> bool {
        self.shebang.is_some_and(|marker| line.starts_with(marker))
    }
}

fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Immutable table of the syntaxes the tool understands.
#[derive(Debug, Clone, Default)]
pub struct SyntaxRegistry {
    specs: HashMap<Syntax, SyntaxSpec>,
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        SyntaxRegistry {
            specs: HashMap::new(),
        }
    }

    pub fn builtin() -> Result<Self> {
        Ok(SyntaxRegistry::new().with(SyntaxSpec::python()?))
    }

    pub fn with(mut self, spec: SyntaxSpec) -> Self {
        self.specs.insert(spec.syntax, spec);
        self
    }

    pub fn get(&self, syntax: Syntax) -> Option<&SyntaxSpec> {
        self.specs.get(&syntax)
    }

    pub fn detect_from_extension(&self, ext: &str) -> Result<&SyntaxSpec> {
        self.specs
            .values()
            .find(|spec| spec.extensions.contains(&ext))
            .ok_or_else(|| DocError::UnsupportedSyntax {
                ext: ext.to_string(),
            })
    }

    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<_> = self
            .specs
            .values()
            .flat_map(|spec| spec.extensions.iter().copied())
            .collect();
        extensions.sort_unstable();
        extensions
    }
}
