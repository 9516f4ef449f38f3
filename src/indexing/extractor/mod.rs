mod signature;

pub use signature::{
    find_top_level, matching_close, parse_argument, parse_arguments, split_top_level,
};

use crate::doc_model::{Definition, Diagnostic};
use crate::error::{DocError, Result};
use crate::indexing::markup::{literal, translate_reporting};
use crate::indexing::scanner::CommentScanner;
use crate::parsers::{LogicalLine, SyntaxSpec};
use log::trace;

/// Reads function and class definitions starting at their header line.
pub struct DefinitionExtractor<'s> {
    spec: &'s SyntaxSpec,
    scanner: CommentScanner<'s>,
}

impl<'s> DefinitionExtractor<'s> {
    pub fn new(spec: &'s SyntaxSpec) -> Self {
        DefinitionExtractor {
            spec,
            scanner: CommentScanner::new(spec),
        }
    }

    /// `lines[0]` must be a function header.
    pub fn extract_function(
        &self,
        lines: &[LogicalLine],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Definition> {
        let header = header_line(lines)?;
        let text = header.trimmed();
        let rest = self
            .spec
            .function_keyword(text)
            .map_or(text, |keyword| &text[keyword.len()..]);

        let malformed = || DocError::MalformedFunction {
            line: header.number,
            text: header.text.clone(),
        };
        let open = rest.find('(').ok_or_else(malformed)?;
        let close = matching_close(rest, open).ok_or_else(malformed)?;
        let name = rest[..open].trim();

        let arguments = parse_arguments(&rest[open + 1..close]);
        let return_type = self.return_type(&rest[close + 1..]);

        let mut definition = Definition::function(name, arguments).with_return_type(return_type);
        let context = format!("function {}", name);
        let displayed: Vec<String> = definition
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect();
        definition.signature =
            translate_reporting(&literal(&displayed.join(", ")), &context, diagnostics);

        self.fill_body(&mut definition, lines, &context, diagnostics)?;
        trace!(
            "Extracted function {} ({} arguments, {} lines)",
            definition.name,
            definition.arguments.len(),
            definition.span
        );
        Ok(definition)
    }

    /// `lines[0]` must be a class header.
    pub fn extract_class(
        &self,
        lines: &[LogicalLine],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Definition> {
        let header = header_line(lines)?;
        let text = header.trimmed();
        let rest = text.strip_prefix(self.spec.class_keyword).unwrap_or(text);

        let malformed = || DocError::MalformedClass {
            line: header.number,
            text: header.text.clone(),
        };
        let open = rest.find('(').ok_or_else(malformed)?;
        let close = matching_close(rest, open).ok_or_else(malformed)?;
        let name = rest[..open].trim();
        let bases = rest[open + 1..close].trim();

        let mut definition = Definition::class(name, bases);
        let context = format!("class {}", name);
        definition.signature = translate_reporting(&literal(bases), &context, diagnostics);

        self.fill_body(&mut definition, lines, &context, diagnostics)?;
        trace!("Extracted class {} ({} lines)", definition.name, definition.span);
        Ok(definition)
    }

    /// Annotation between the return marker and the block-opening `:`.
    fn return_type(&self, after_parameters: &str) -> Option<String> {
        let head = find_top_level(after_parameters, ':')
            .map_or(after_parameters, |colon| &after_parameters[..colon]);
        let head = self
            .scanner
            .first_opener_offset(head)
            .map_or(head, |offset| &head[..offset]);

        let marker = head.find(self.spec.return_marker)?;
        let annotation = head[marker + self.spec.return_marker.len()..].trim();
        (!annotation.is_empty()).then(|| annotation.to_string())
    }

    /// Sets the docstring and span of `definition` from the lines after its header.
    fn fill_body(
        &self,
        definition: &mut Definition,
        lines: &[LogicalLine],
        context: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let indent = self.body_indent(lines)?;

        let docstring = self.scanner.scan(lines, 1)?.unwrap_or_default();
        definition.docstring = translate_reporting(&docstring.text(), context, diagnostics);

        let body_start = 1 + docstring.consumed;
        let trailing = lines[body_start.min(lines.len())..]
            .iter()
            .take_while(|line| line.text.starts_with(indent))
            .count();
        definition.span = body_start + trailing;
        Ok(())
    }

    /// Indentation of the body, read off the comment opener on its first line.
    fn body_indent<'l>(&self, lines: &'l [LogicalLine]) -> Result<&'l str> {
        let header = header_line(lines)?;
        let undetermined = || DocError::UndeterminedBody {
            line: header.number,
            text: header.text.clone(),
        };

        let first_body = lines.get(1).ok_or_else(undetermined)?;
        let offset = self
            .scanner
            .first_opener_offset(&first_body.text)
            .ok_or_else(undetermined)?;
        let indent = &first_body.text[..offset];

        if indent.is_empty() || !indent.trim().is_empty() {
            return Err(undetermined());
        }
        Ok(indent)
    }
}

fn header_line(lines: &[LogicalLine]) -> Result<&LogicalLine> {
    lines.first().ok_or_else(|| DocError::UndeterminedBody {
        line: 0,
        text: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_model::{Argument, DefinitionKind};
    use crate::parsers::logical_lines;

    fn function(source: &str) -> Result<Definition> {
        let spec = SyntaxSpec::python().unwrap();
        let lines = logical_lines(source);
        DefinitionExtractor::new(&spec).extract_function(&lines, &mut Vec::new())
    }

    fn class(source: &str) -> Result<Definition> {
        let spec = SyntaxSpec::python().unwrap();
        let lines = logical_lines(source);
        DefinitionExtractor::new(&spec).extract_class(&lines, &mut Vec::new())
    }

    #[test]
    fn extracts_function_signature_and_docstring() {
        let source = "def f(a: int = 1, b) -> str:\n    \"\"\"Does f.\"\"\"\n    return str(a)\nx = 1";
        let def = function(source).unwrap();
        assert_eq!(def.kind, DefinitionKind::Function);
        assert_eq!(def.name, "f");
        assert_eq!(
            def.arguments,
            vec![Argument::new("a").with_type("int").with_default("1"), Argument::new("b")]
        );
        assert_eq!(def.return_type.as_deref(), Some("str"));
        assert_eq!(def.docstring, "Does f.");
        assert_eq!(def.span, 3);
    }

    #[test]
    fn span_follows_body_indentation() {
        let source = "\
def g():
    '''
    Multi line
    '''
    if True:
        pass
    return None
def h():
    # h
    pass";
        let def = function(source).unwrap();
        assert_eq!(def.name, "g");
        assert!(def.arguments.is_empty());
        assert_eq!(def.return_type, None);
        assert_eq!(def.docstring, "Multi line");
        assert_eq!(def.span, 7);
    }

    #[test]
    fn async_functions_and_joined_headers() {
        let def = function("async def fetch(url,\n          retries=3):\n    # Fetches.\n    pass").unwrap();
        assert_eq!(def.name, "fetch");
        assert_eq!(def.arguments[1], Argument::new("retries").with_default("3"));
        assert_eq!(def.span, 3);
    }

    #[test]
    fn header_comments_stay_out_of_the_return_type() {
        let def = function("def f(a) -> int:  # fast path\n    '''F.'''").unwrap();
        assert_eq!(def.return_type.as_deref(), Some("int"));

        let def = function("def g(): # -> note\n    '''G.'''").unwrap();
        assert_eq!(def.return_type, None);
    }

    #[test]
    fn return_type_may_contain_brackets_and_strings() {
        let def = function("def h() -> Dict[str, \"a:b\"]:\n    '''H.'''").unwrap();
        assert_eq!(def.return_type.as_deref(), Some("Dict[str, \"a:b\"]"));
    }

    #[test]
    fn signature_is_display_markup() {
        let def = function("def run(max_len=10):\n    '''Run.'''").unwrap();
        assert_eq!(def.signature, "max\\_len=10");
    }

    #[test]
    fn function_without_docstring_is_undetermined() {
        let err = function("def f():\n    return 1").unwrap_err();
        assert!(matches!(err, DocError::UndeterminedBody { line: 1, .. }));
        assert!(matches!(function("def f(): pass"), Err(DocError::UndeterminedBody { .. })));
    }

    #[test]
    fn unterminated_docstring_fails_the_entry() {
        let err = function("def f():\n    \"\"\"Never closed\n    pass").unwrap_err();
        assert!(matches!(err, DocError::UnterminatedBlockComment { line: 2 }));
    }

    #[test]
    fn extracts_class_name_bases_and_span() {
        let source = "\
class Shape(Base, metaclass=Meta):
    \"\"\"A *shape*.\"\"\"
    def area(self):
        '''Area.'''
        return 0
CONSTANT = 1";
        let def = class(source).unwrap();
        assert_eq!(def.kind, DefinitionKind::Class);
        assert_eq!(def.name, "Shape");
        assert_eq!(def.bases.as_deref(), Some("Base, metaclass=Meta"));
        assert_eq!(def.docstring, "A \\textbf{shape}.");
        assert_eq!(def.span, 5);
    }

    #[test]
    fn class_without_parenthesis_is_malformed() {
        let err = class("class Plain:\n    '''Doc.'''").unwrap_err();
        match err {
            DocError::MalformedClass { line, text } => {
                assert_eq!(line, 1);
                assert_eq!(text, "class Plain:");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unbalanced_docstring_markup_warns() {
        let spec = SyntaxSpec::python().unwrap();
        let lines = logical_lines("def f():\n    '''Uses `code.'''");
        let mut diagnostics = Vec::new();
        let def = DefinitionExtractor::new(&spec)
            .extract_function(&lines, &mut diagnostics)
            .unwrap();
        assert_eq!(def.docstring, "Uses \\texttt{code.}");
        assert_eq!(diagnostics.len(), 1);
    }
}
