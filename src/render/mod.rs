pub mod latex;

pub use latex::{render_definition, render_index, render_module};
