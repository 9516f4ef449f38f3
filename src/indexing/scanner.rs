use crate::error::{DocError, Result};
use crate::indexing::markup::escape_latex;
use crate::parsers::{CommentDelimiter, LogicalLine, SyntaxSpec};
use log::trace;

/// One contiguous comment: a run of line comments or one block comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// Non-blank, escaped text of each contributing line, in source order.
    pub fragments: Vec<String>,
    /// Number of logical lines the comment occupies.
    pub consumed: usize,
}

impl Comment {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn text(&self) -> String {
        self.fragments.join("\n")
    }
}

pub struct CommentScanner<'s> {
    spec: &'s SyntaxSpec,
}

impl<'s> CommentScanner<'s> {
    pub fn new(spec: &'s SyntaxSpec) -> Self {
        CommentScanner { spec }
    }

    /// Extracts the comment starting at `lines[start]`, if there is one.
    pub fn scan(&self, lines: &[LogicalLine], start: usize) -> Result<Option<Comment>> {
        let Some(first) = lines.get(start) else {
            return Ok(None);
        };
        let head = first.trimmed();

        for delimiter in &self.spec.delimiters {
            if !head.starts_with(delimiter.opener()) {
                continue;
            }

            let (raw, consumed) = match delimiter {
                CommentDelimiter::Line(marker) => scan_line_comment(&lines[start..], marker),
                CommentDelimiter::Block { open, close } => {
                    scan_block_comment(&lines[start..], open, close)?
                }
            };

            trace!(
                "Found {:?} comment at line {} spanning {} lines",
                delimiter,
                first.number,
                consumed
            );

            let fragments = raw
                .into_iter()
                .filter(|fragment| !fragment.trim().is_empty())
                .map(|fragment| escape_latex(fragment.trim_end()))
                .collect();

            return Ok(Some(Comment {
                fragments,
                consumed,
            }));
        }

        Ok(None)
    }

    /// Offset of the earliest comment opener in `text`.
    pub fn first_opener_offset(&self, text: &str) -> Option<usize> {
        self.spec
            .delimiters
            .iter()
            .filter_map(|delimiter| text.find(delimiter.opener()))
            .min()
    }
}

fn strip_opener<'a>(text: &'a str, marker: &str) -> &'a str {
    text.trim_start_matches(|c: char| c == ' ' || c == '\t' || marker.contains(c))
}

fn scan_line_comment<'l>(lines: &'l [LogicalLine], marker: &str) -> (Vec<&'l str>, usize) {
    let raw: Vec<&str> = lines
        .iter()
        .map(LogicalLine::trimmed)
        .take_while(|text| text.starts_with(marker))
        .map(|text| strip_opener(text, marker))
        .collect();
    let consumed = raw.len();
    (raw, consumed)
}

fn scan_block_comment<'l>(
    lines: &'l [LogicalLine],
    open: &str,
    close: &str,
) -> Result<(Vec<&'l str>, usize)> {
    let mut raw = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let text = if idx == 0 {
            strip_opener(&line.text, open)
        } else {
            line.text.as_str()
        };

        if let Some(end) = text.find(close) {
            raw.push(strip_opener(&text[..end], open));
            return Ok((raw, idx + 1));
        }
        raw.push(strip_opener(text, open));
    }

    Err(DocError::UnterminatedBlockComment {
        line: lines.first().map(|l| l.number).unwrap_or_default(),
    })
}
