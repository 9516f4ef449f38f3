use crate::doc_model::{Definition, DefinitionKind, ModuleSummary};
use crate::indexing::markup::display_literal;
use crate::parsers::SyntaxSpec;

/// Display text of a function or class: its signature line, then its docstring.
pub fn render_definition(definition: &Definition) -> String {
    let name = display_literal(&definition.name);
    let mut out = match definition.kind {
        DefinitionKind::Function => format!("\\texttt{{{}({})}}", name, definition.signature),
        DefinitionKind::Class => format!("\\texttt{{class {}({})}}", name, definition.signature),
    };

    if let Some(return_type) = &definition.return_type {
        out.push_str(&format!(
            " $\\rightarrow$ \\texttt{{{}}}",
            display_literal(return_type)
        ));
    }

    if !definition.docstring.is_empty() {
        out.push_str("\n\n");
        out.push_str(&definition.docstring);
    }

    out
}

fn render_entries<'a>(
    out: &mut String,
    heading: &str,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
    labelled: bool,
) {
    let mut entries = entries.peekable();
    if entries.peek().is_none() {
        return;
    }

    out.push_str(&format!("\n\\subsubsection*{{{}}}\n", heading));
    if labelled {
        out.push_str("\\begin{description}\n");
        for (name, text) in entries {
            out.push_str(&format!(
                "\\item[\\texttt{{{}}}] {}\n",
                display_literal(name),
                text
            ));
        }
        out.push_str("\\end{description}\n");
    } else {
        out.push_str("\\begin{itemize}\n");
        for (_, text) in entries {
            out.push_str(&format!("\\item {}\n", text));
        }
        out.push_str("\\end{itemize}\n");
    }
}

/// LaTeX fragment documenting one module.
pub fn render_module(summary: &ModuleSummary, spec: &SyntaxSpec) -> String {
    let mut out = format!(
        "\\subsection{{{}}}\\label{{sec:{}:{}}}\n",
        display_literal(&summary.name),
        spec.label_prefix,
        summary.name
    );

    if !summary.docstring.is_empty() {
        out.push_str(&summary.docstring);
        out.push('\n');
    }

    render_entries(&mut out, "Constants", summary.constants(), true);
    render_entries(&mut out, "Classes", summary.classes(), false);
    render_entries(&mut out, "Functions", summary.functions(), false);

    out
}

/// Top-level document body that pulls in every produced module file.
pub fn render_index<'a>(files: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("\\section{Module Reference}\\label{sec:modules}\n");
    for file in files {
        out.push_str(&format!("\\input{{{}}}\n", file));
    }
    out
}
