use dochelper::doc_model::Severity;
use dochelper::{DocError, Syntax, SyntaxRegistry, document_module, document_module_latex};

const SAMPLE: &str = r#"#!/usr/bin/env python3
"""
Geometry helpers.

Nothing here is *fast*.
"""
import math

# Ratio of a circle's circumference to its diameter
PI = 3.14159

DEBUG = False

class Circle(object):
    """A circle with a `radius`."""
    def __init__(self, radius):
        '''Stores the radius.'''
        self.radius = radius

def zeta(x: float,
         scale: float = 1.0) -> float:
    """
    Scales _x_.
    """
    return x * scale

def alpha():
    # Returns nothing useful.
    return None

class Broken:
    pass
"#;

fn registry() -> SyntaxRegistry {
    SyntaxRegistry::builtin().unwrap()
}

#[test]
fn documents_a_complete_module() {
    let extraction = document_module(&registry(), Syntax::Python, "geometry", SAMPLE).unwrap();
    let summary = &extraction.summary;

    assert_eq!(summary.name, "geometry");
    assert_eq!(summary.docstring, "Geometry helpers.\nNothing here is \\textbf{fast}.");

    let constants: Vec<_> = summary.constants().collect();
    assert_eq!(
        constants,
        vec![
            ("DEBUG", ""),
            ("PI", "Ratio of a circle's circumference to its diameter"),
        ]
    );

    let functions: Vec<_> = summary.functions().map(|(name, _)| name).collect();
    assert_eq!(functions, vec!["alpha", "zeta"]);
    let zeta = summary.function("zeta").unwrap();
    assert!(zeta.starts_with("\\texttt{zeta(x: float, scale: float = 1.0)} $\\rightarrow$ \\texttt{float}"));
    assert!(zeta.ends_with("Scales \\textit{x}."));

    let classes: Vec<_> = summary.classes().map(|(name, _)| name).collect();
    assert_eq!(classes, vec!["Circle"]);
    assert!(summary.class("Circle").unwrap().contains("A circle with a \\texttt{radius}."));

    let errors: Vec<_> = extraction.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("class Broken:"));
}

#[test]
fn shebang_and_docstring_only_module() {
    let extraction = document_module(
        &registry(),
        Syntax::Python,
        "script",
        "#!/usr/bin/env python3\n'''Runs things.'''\n",
    )
    .unwrap();
    assert_eq!(extraction.summary.docstring, "Runs things.");
    assert_eq!(extraction.summary.entry_count(), 0);
}

#[test]
fn unbalanced_markup_is_a_warning() {
    let extraction = document_module(
        &registry(),
        Syntax::Python,
        "m",
        "'''Uses *bold without end.'''\n",
    )
    .unwrap();
    assert_eq!(extraction.summary.docstring, "Uses \\textbf{bold without end.}");
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(extraction.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn unterminated_module_docstring_fails_the_module() {
    let err = document_module(&registry(), Syntax::Python, "m", "'''open\nx = 1\n").unwrap_err();
    assert!(matches!(err, DocError::UnterminatedBlockComment { line: 1 }));
}

#[test]
fn unregistered_syntax_is_rejected() {
    let err = document_module(&SyntaxRegistry::new(), Syntax::Python, "m", "x = 1").unwrap_err();
    assert!(matches!(err, DocError::UnsupportedSyntax { .. }));
}

#[test]
fn renders_latex_fragment() {
    let (latex, _) = document_module_latex(&registry(), Syntax::Python, "geometry", SAMPLE).unwrap();
    assert!(latex.starts_with("\\subsection{geometry}\\label{sec:py:geometry}\n"));
    let constants = latex.find("\\subsubsection*{Constants}").unwrap();
    let classes = latex.find("\\subsubsection*{Classes}").unwrap();
    let functions = latex.find("\\subsubsection*{Functions}").unwrap();
    assert!(constants < classes && classes < functions);
    assert!(latex.contains("\\item[\\texttt{PI}] Ratio of a circle's circumference to its diameter\n"));
}

#[test]
fn multi_line_string_constant_does_not_lose_the_module() {
    let source = "'''Doc.'''\nHELP = \"\"\"\nUsage: tool\n\"\"\"\ndef run():\n    '''Runs.'''\n    pass\nLIMIT = 3\n";
    let extraction = document_module(&registry(), Syntax::Python, "cli", source).unwrap();
    let summary = &extraction.summary;
    assert_eq!(summary.constant("HELP"), Some(""));
    assert_eq!(summary.constant("LIMIT"), Some(""));
    assert!(summary.function("run").is_some());
    assert_eq!(extraction.errors().count(), 1);
}

#[test]
fn latex_rendering_rejects_unregistered_syntax() {
    let err = document_module_latex(&SyntaxRegistry::new(), Syntax::Python, "m", "x = 1").unwrap_err();
    assert!(matches!(err, DocError::UnsupportedSyntax { .. }));
}
