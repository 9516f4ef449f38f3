use crate::doc_model::{Definition, Diagnostic, Extraction, ModuleSummary};
use crate::error::{DocError, Result};
use crate::indexing::extractor::DefinitionExtractor;
use crate::indexing::markup::translate_reporting;
use crate::indexing::scanner::CommentScanner;
use crate::parsers::{LogicalLine, SyntaxSpec, logical_lines};
use crate::render::latex::render_definition;
use log::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingModuleDoc,
    Scanning,
    Done,
}

/// Walks the top level of one module and collects its documentation.
pub struct ModuleSegmenter<'s> {
    spec: &'s SyntaxSpec,
    scanner: CommentScanner<'s>,
    extractor: DefinitionExtractor<'s>,
}

impl<'s> ModuleSegmenter<'s> {
    pub fn new(spec: &'s SyntaxSpec) -> Self {
        ModuleSegmenter {
            spec,
            scanner: CommentScanner::new(spec),
            extractor: DefinitionExtractor::new(spec),
        }
    }

    pub fn segment_source(&self, module_name: &str, source: &str) -> Result<Extraction> {
        self.segment(module_name, &logical_lines(source))
    }

    /// Builds the summary of a module from its logical lines.
    ///
    /// An unterminated module docstring aborts the module. Any later failure,
    /// a dangling block opener or a broken definition, only skips that entry.
    pub fn segment(&self, module_name: &str, lines: &[LogicalLine]) -> Result<Extraction> {
        let mut summary = ModuleSummary::new(module_name);
        let mut diagnostics = Vec::new();
        let mut cursor = 0;
        let mut state = State::AwaitingModuleDoc;

        while state != State::Done {
            state = match state {
                State::AwaitingModuleDoc => {
                    if lines.first().is_some_and(|l| self.spec.is_shebang(&l.text)) {
                        cursor = 1;
                    }
                    if let Some(comment) = self.scanner.scan(lines, cursor)? {
                        let context = format!("module {}", module_name);
                        summary.set_docstring(translate_reporting(
                            &comment.text(),
                            &context,
                            &mut diagnostics,
                        ));
                        cursor += comment.consumed;
                    }
                    State::Scanning
                }
                State::Scanning if cursor >= lines.len() => State::Done,
                State::Scanning => {
                    cursor += self.step(lines, cursor, &mut summary, &mut diagnostics)?;
                    State::Scanning
                }
                State::Done => State::Done,
            };
        }

        debug!(
            "Module {}: {} constants, {} functions, {} classes",
            module_name,
            summary.constant_count(),
            summary.function_count(),
            summary.class_count()
        );

        Ok(Extraction {
            summary,
            diagnostics,
        })
    }

    /// Handles the segment at `cursor` and returns how many lines it used.
    fn step(
        &self,
        lines: &[LogicalLine],
        cursor: usize,
        summary: &mut ModuleSummary,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<usize> {
        let line = &lines[cursor];

        let comment = match self.scanner.scan(lines, cursor) {
            Ok(comment) => comment,
            Err(err @ DocError::UnterminatedBlockComment { .. }) => {
                warn!("Skipping comment opener at line {}: {}", line.number, err);
                diagnostics.push(Diagnostic::error(err.to_string()));
                return Ok(1);
            }
            Err(err) => return Err(err),
        };

        if let Some(comment) = comment {
            let after = cursor + comment.consumed;
            let target = lines
                .get(after)
                .and_then(|next| self.spec.assignment_target(&next.text));

            return Ok(match target {
                Some(name) => {
                    let context = format!("constant {}", name);
                    let docstring = translate_reporting(&comment.text(), &context, diagnostics);
                    summary.add_constant(name, docstring);
                    comment.consumed + 1
                }
                None => {
                    trace!("Skipping orphaned comment at line {}", line.number);
                    comment.consumed
                }
            });
        }

        if self.spec.function_keyword(&line.text).is_some() {
            let extracted = self.extractor.extract_function(&lines[cursor..], diagnostics);
            return Ok(self.record(extracted, lines, cursor, diagnostics, |def| {
                summary.add_function(&def.name, render_definition(def))
            }));
        }

        if self.spec.is_class_header(&line.text) {
            let extracted = self.extractor.extract_class(&lines[cursor..], diagnostics);
            return Ok(self.record(extracted, lines, cursor, diagnostics, |def| {
                summary.add_class(&def.name, render_definition(def))
            }));
        }

        if let Some(name) = self.spec.assignment_target(&line.text) {
            summary.add_constant(name, String::new());
        } else {
            trace!("Skipping line {}", line.number);
        }
        Ok(1)
    }

    fn record(
        &self,
        extracted: Result<Definition>,
        lines: &[LogicalLine],
        cursor: usize,
        diagnostics: &mut Vec<Diagnostic>,
        add: impl FnOnce(&Definition),
    ) -> usize {
        match extracted {
            Ok(definition) => {
                add(&definition);
                definition.span
            }
            Err(err) => {
                let skipped = skip_entry(lines, cursor, &err);
                warn!("Skipping entry at line {}: {}", lines[cursor].number, err);
                diagnostics.push(Diagnostic::error(err.to_string()));
                skipped
            }
        }
    }
}

/// Lines to skip after a failed definition: its header and every indented line below it.
fn skip_entry(lines: &[LogicalLine], cursor: usize, err: &DocError) -> usize {
    trace!("Recovering from {:?}", err);
    1 + lines[cursor + 1..]
        .iter()
        .take_while(|line| !line.indent().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_model::Severity;

    fn segment(source: &str) -> Result<Extraction> {
        let spec = SyntaxSpec::python().unwrap();
        ModuleSegmenter::new(&spec).segment_source("sample", source)
    }

    #[test]
    fn comment_before_assignment_documents_constant() {
        let extraction = segment("'''Module.'''\n# X marks the spot\nX = 1").unwrap();
        assert_eq!(extraction.summary.constant("X"), Some("X marks the spot"));
    }

    #[test]
    fn shebang_and_docstring_only() {
        let extraction = segment("#!/usr/bin/env python3\n\"\"\"\nA tool.\n\"\"\"\n").unwrap();
        let summary = extraction.summary;
        assert_eq!(summary.docstring, "A tool.");
        assert_eq!(summary.entry_count(), 0);
    }

    #[test]
    fn leading_line_comment_is_module_docstring() {
        let extraction = segment("# Helpers.\n# More.\nx = 1").unwrap();
        assert_eq!(extraction.summary.docstring, "Helpers.\nMore.");
        assert_eq!(extraction.summary.constant("x"), Some(""));
    }

    #[test]
    fn empty_module() {
        let extraction = segment("\n\n   \n").unwrap();
        assert_eq!(extraction.summary.docstring, "");
        assert_eq!(extraction.summary.entry_count(), 0);
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn functions_are_ordered_by_name() {
        let source = "\
'''Doc.'''
def zeta():
    '''Last.'''
    return 1
def alpha():
    '''First.'''
    return 2";
        let extraction = segment(source).unwrap();
        let names: Vec<_> = extraction.summary.functions().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn orphan_comment_is_skipped() {
        let source = "'''Doc.'''\n# Talks about f\ndef f():\n    '''F.'''\n# trailing";
        let extraction = segment(source).unwrap();
        assert_eq!(extraction.summary.constant_count(), 0);
        assert_eq!(extraction.summary.function_count(), 1);
    }

    #[test]
    fn malformed_class_is_skipped_with_diagnostic() {
        let source = "\
'''Doc.'''
class Plain:
    x = 1
    def method(self):
        '''M.'''
class Good(object):
    '''Good.'''
LIMIT = 3";
        let extraction = segment(source).unwrap();
        let summary = &extraction.summary;
        assert_eq!(summary.class_count(), 1);
        assert!(summary.class("Good").is_some());
        assert_eq!(summary.constant("LIMIT"), Some(""));
        assert_eq!(summary.constant("x"), None);

        assert_eq!(extraction.diagnostics.len(), 1);
        assert_eq!(extraction.diagnostics[0].severity, Severity::Error);
        assert!(extraction.diagnostics[0].message.contains("class Plain:"));
    }

    #[test]
    fn unterminated_module_docstring_aborts() {
        let err = segment("\"\"\"Never closed\nx = 1").unwrap_err();
        assert!(matches!(err, DocError::UnterminatedBlockComment { line: 1 }));
    }

    #[test]
    fn dangling_block_opener_only_skips_its_line() {
        let source = "\
'''Doc.'''
HELP = \"\"\"
Usage: tool
\"\"\"
def run():
    '''Runs.'''
    pass
LIMIT = 3
";
        let extraction = segment(source).unwrap();
        let summary = &extraction.summary;
        assert_eq!(summary.constant("HELP"), Some(""));
        assert!(summary.function("run").is_some());
        assert_eq!(summary.constant("LIMIT"), Some(""));

        assert_eq!(extraction.diagnostics.len(), 1);
        assert_eq!(extraction.diagnostics[0].severity, Severity::Error);
        assert!(extraction.diagnostics[0].message.contains("line 4"));
    }

    #[test]
    fn first_constant_docstring_wins() {
        let source = "'''Doc.'''\n# original\nX = 1\n# rebinding\nX = 2";
        let extraction = segment(source).unwrap();
        assert_eq!(extraction.summary.constant("X"), Some("original"));
    }
}
