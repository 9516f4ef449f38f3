pub mod extractor;
pub mod markup;
pub mod processor;
pub mod scanner;
pub mod segmenter;

pub use extractor::DefinitionExtractor;
pub use processor::process_paths_parallel;
pub use scanner::{Comment, CommentScanner};
pub use segmenter::ModuleSegmenter;
