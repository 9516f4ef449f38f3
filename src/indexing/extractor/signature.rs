use crate::doc_model::Argument;

/// Tracks bracket depth and string literals while walking a signature.
#[derive(Default)]
struct Nesting {
    depth: usize,
    quote: Option<char>,
    escaped: bool,
}

impl Nesting {
    /// Feeds one character; returns true if it sits outside any bracket or string.
    fn step(&mut self, c: char) -> bool {
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == quote {
                self.quote = None;
            }
            return false;
        }

        match c {
            '\'' | '"' => {
                self.quote = Some(c);
                false
            }
            '(' | '[' | '{' => {
                self.depth += 1;
                false
            }
            ')' | ']' | '}' => {
                let top = self.depth == 0;
                self.depth = self.depth.saturating_sub(1);
                top
            }
            _ => self.depth == 0,
        }
    }
}

/// Byte offset of the bracket closing the one at `open`.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut nesting = Nesting::default();
    for (idx, c) in text[open..].char_indices() {
        nesting.step(c);
        let closes = matches!(c, ')' | ']' | '}') && nesting.quote.is_none();
        if idx > 0 && closes && nesting.depth == 0 {
            return Some(open + idx);
        }
    }
    None
}

/// Byte offset of the first `target` outside brackets and strings.
pub fn find_top_level(text: &str, target: char) -> Option<usize> {
    let mut nesting = Nesting::default();
    text.char_indices()
        .find(|(_, c)| nesting.step(*c) && *c == target)
        .map(|(idx, _)| idx)
}

/// Splits on `separator` wherever it is outside brackets and strings.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut nesting = Nesting::default();
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if nesting.step(c) && c == separator {
            pieces.push(&text[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parses `name[: type][= default]`. Returns `None` for an empty piece.
pub fn parse_argument(piece: &str) -> Option<Argument> {
    let piece = piece.trim();
    if piece.is_empty() {
        return None;
    }

    let (declaration, default) = match find_top_level(piece, '=') {
        Some(eq) => (&piece[..eq], non_empty(&piece[eq + 1..])),
        None => (piece, None),
    };

    let (name, type_annotation) = match find_top_level(declaration, ':') {
        Some(colon) => (&declaration[..colon], non_empty(&declaration[colon + 1..])),
        None => (declaration, None),
    };

    Some(Argument {
        name: name.trim().to_string(),
        type_annotation,
        default,
    })
}

pub fn parse_arguments(parameters: &str) -> Vec<Argument> {
    split_top_level(parameters, ',')
        .into_iter()
        .filter_map(parse_argument)
        .collect()
}
