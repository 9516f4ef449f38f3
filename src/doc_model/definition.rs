use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Function,
    Class,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default: Option<String>,
}

impl Argument {
    pub fn new(name: impl Into<String>) -> Self {
        Argument {
            name: name.into(),
            type_annotation: None,
            default: None,
        }
    }

    pub fn with_type(mut self, type_annotation: impl Into<String>) -> Self {
        self.type_annotation = Some(type_annotation.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(type_annotation) = &self.type_annotation {
            write!(f, ": {}", type_annotation)?;
        }
        if let Some(default) = &self.default {
            if self.type_annotation.is_some() {
                write!(f, " = {}", default)?;
            } else {
                write!(f, "={}", default)?;
            }
        }
        Ok(())
    }
}

/// A function or class found at the top level of a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: String,
    /// Parameters of a function; always empty for classes.
    pub arguments: Vec<Argument>,
    pub return_type: Option<String>,
    /// Base-list text of a class.
    pub bases: Option<String>,
    /// Argument list (or base list) as display markup.
    pub signature: String,
    /// Docstring as display markup, one paragraph line per comment fragment.
    pub docstring: String,
    /// Number of logical lines covered, header included.
    pub span: usize,
}

impl Definition {
    pub fn function(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Definition {
            kind: DefinitionKind::Function,
            name: name.into(),
            arguments,
            return_type: None,
            bases: None,
            signature: String::new(),
            docstring: String::new(),
            span: 1,
        }
    }

    pub fn class(name: impl Into<String>, bases: impl Into<String>) -> Self {
        Definition {
            kind: DefinitionKind::Class,
            name: name.into(),
            arguments: Vec::new(),
            return_type: None,
            bases: Some(bases.into()),
            signature: String::new(),
            docstring: String::new(),
            span: 1,
        }
    }

    pub fn with_return_type(mut self, return_type: Option<String>) -> Self {
        self.return_type = return_type;
        self
    }
}
