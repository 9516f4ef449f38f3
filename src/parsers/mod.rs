pub mod common;
pub mod lines;
pub mod syntax;

pub use common::{detect_syntax, module_name_from_path};
pub use lines::{LogicalLine, logical_lines};
pub use syntax::{CommentDelimiter, Syntax, SyntaxRegistry, SyntaxSpec};
