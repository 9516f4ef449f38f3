//! Lightweight inline markup and LaTeX escaping for comment bodies.
//!
//! Comment text is escaped first (see [`escape_latex`]) and translated second
//! (see [`translate`]). Escaping leaves the marker characters and any
//! backslash directly in front of one alone, so the translator still sees them.

use crate::doc_model::Diagnostic;
use log::warn;

pub const ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Italic,
    Bold,
    Code,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::Italic, Marker::Bold, Marker::Code];

    pub fn from_char(c: char) -> Option<Marker> {
        match c {
            '_' => Some(Marker::Italic),
            '*' => Some(Marker::Bold),
            '`' => Some(Marker::Code),
            _ => None,
        }
    }

    pub fn char(&self) -> char {
        match self {
            Marker::Italic => '_',
            Marker::Bold => '*',
            Marker::Code => '`',
        }
    }

    fn index(&self) -> usize {
        match self {
            Marker::Italic => 0,
            Marker::Bold => 1,
            Marker::Code => 2,
        }
    }

    fn open(&self) -> &'static str {
        match self {
            Marker::Italic => "\\textit{",
            Marker::Bold => "\\textbf{",
            Marker::Code => "\\texttt{",
        }
    }

    fn close(&self) -> &'static str {
        "}"
    }

    /// How the marker character itself is typeset when escaped.
    fn literal(&self) -> &'static str {
        match self {
            Marker::Italic => "\\_",
            Marker::Bold => "*",
            Marker::Code => "\\textasciigrave{}",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Marker::Italic => "italic",
            Marker::Bold => "bold",
            Marker::Code => "inline-code",
        }
    }
}

fn is_marker(c: Option<&char>) -> bool {
    c.is_some_and(|c| Marker::from_char(*c).is_some())
}

fn push_reserved(out: &mut String, c: char) -> bool {
    let escaped = match c {
        '{' => "\\{",
        '}' => "\\}",
        '$' => "\\$",
        '&' => "\\&",
        '#' => "\\#",
        '%' => "\\%",
        '^' => "\\^{}",
        '~' => "\\~{}",
        '<' => "\\textless{}",
        '>' => "\\textgreater{}",
        _ => return false,
    };
    out.push_str(escaped);
    true
}

/// Escapes characters LaTeX treats specially.
///
/// Markup markers, and a backslash escaping one, pass through untouched.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if is_marker(chars.peek()) {
                out.push(ESCAPE);
            } else {
                out.push_str("\\textbackslash{}");
            }
        } else if !push_reserved(&mut out, c) {
            out.push(c);
        }
    }

    out
}

/// Escapes `text` so it survives [`translate`] verbatim: reserved characters
/// are escaped and every marker character is prefixed with the escape.
pub fn literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        if c == ESCAPE {
            out.push_str("\\textbackslash{}");
        } else if Marker::from_char(c).is_some() {
            out.push(ESCAPE);
            out.push(c);
        } else if !push_reserved(&mut out, c) {
            out.push(c);
        }
    }

    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// One entry per marker that was still open at the end and got closed.
    pub unbalanced: Vec<Marker>,
}

/// Translates `_italic_`, `*bold*` and `` `code` `` toggles into LaTeX.
///
/// Each marker toggles independently: the first occurrence opens, the next
/// closes. Markers left open at the end are closed and reported.
pub fn translate(text: &str) -> Translation {
    let mut out = String::with_capacity(text.len());
    let mut open_counts = [0usize; 3];
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(marker) = chars.peek().and_then(|n| Marker::from_char(*n)) {
                chars.next();
                out.push_str(marker.literal());
                continue;
            }
            out.push(c);
            continue;
        }

        match Marker::from_char(c) {
            Some(marker) => {
                let count = &mut open_counts[marker.index()];
                if *count == 0 {
                    out.push_str(marker.open());
                    *count += 1;
                } else {
                    out.push_str(marker.close());
                    *count -= 1;
                }
            }
            None => out.push(c),
        }
    }

    let mut unbalanced = Vec::new();
    for marker in Marker::ALL {
        for _ in 0..open_counts[marker.index()] {
            out.push_str(marker.close());
            unbalanced.push(marker);
        }
    }

    Translation {
        text: out,
        unbalanced,
    }
}

/// Display markup for text that carries no markup of its own.
pub fn display_literal(text: &str) -> String {
    translate(&literal(text)).text
}

/// Translates `text`, reporting unbalanced markers against `context`.
pub fn translate_reporting(text: &str, context: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    let translation = translate(text);
    for marker in &translation.unbalanced {
        let message = format!(
            "unterminated {} markup '{}' in {}, closed automatically",
            marker.name(),
            marker.char(),
            context
        );
        warn!("{}", message);
        diagnostics.push(Diagnostic::warning(message));
    }
    translation.text
}
