use serde::Serialize;

/// A source statement after continuation-joining. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalLine {
    pub text: String,
    /// 1-based number of the first physical line this was built from.
    pub number: usize,
}

impl LogicalLine {
    pub fn new(text: impl Into<String>, number: usize) -> Self {
        LogicalLine {
            text: text.into(),
            number,
        }
    }

    pub fn indent(&self) -> &str {
        let trimmed = self.text.trim_start();
        &self.text[..self.text.len() - trimmed.len()]
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim_start()
    }
}

/// Splits `source` into logical lines.
///
/// Blank lines are dropped and trailing whitespace removed. A line ending in
/// `\` is joined with the next one (the backslash is removed); a line ending in
/// `,` is joined with the next one with a single space in between.
pub fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, raw) in source.lines().enumerate() {
        let text = raw.trim_end();
        if text.is_empty() {
            continue;
        }

        let mut current = match pending.take() {
            Some(mut open) => {
                if !open.text.ends_with(' ') && !open.text.is_empty() {
                    open.text.push(' ');
                }
                open.text.push_str(text.trim_start());
                open
            }
            None => LogicalLine::new(text, idx + 1),
        };

        if let Some(stripped) = current.text.strip_suffix('\\') {
            current.text = stripped.trim_end().to_string();
            pending = Some(current);
        } else if current.text.ends_with(',') {
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }

    if let Some(last) = pending {
        if !last.text.trim().is_empty() {
            lines.push(last);
        }
    }

    lines
}
