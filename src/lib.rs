pub mod config;
pub mod doc_model;
pub mod error;
pub mod indexing;
pub mod parsers;
pub mod render;
pub mod utils;

pub use config::{Config, OutputFormat};
pub use doc_model::{Extraction, ModuleSummary};
pub use error::{DocError, Result};
pub use indexing::processor::RunReport;
pub use parsers::{Syntax, SyntaxRegistry};

use log::{debug, info};

/// Extracts the documentation of one module from its source text.
pub fn document_module(
    registry: &SyntaxRegistry,
    syntax: Syntax,
    module_name: &str,
    source: &str,
) -> Result<Extraction> {
    let spec = resolve_syntax(registry, syntax)?;
    debug!("Documenting {} module {}", syntax, module_name);
    indexing::ModuleSegmenter::new(spec).segment_source(module_name, source)
}

/// Extracts one module and renders it as a LaTeX fragment.
pub fn document_module_latex(
    registry: &SyntaxRegistry,
    syntax: Syntax,
    module_name: &str,
    source: &str,
) -> Result<(String, Extraction)> {
    let spec = resolve_syntax(registry, syntax)?;
    debug!("Documenting {} module {} as LaTeX", syntax, module_name);
    let extraction = indexing::ModuleSegmenter::new(spec).segment_source(module_name, source)?;
    let latex = render::render_module(&extraction.summary, spec);
    Ok((latex, extraction))
}

fn resolve_syntax(registry: &SyntaxRegistry, syntax: Syntax) -> Result<&parsers::SyntaxSpec> {
    registry.get(syntax).ok_or_else(|| DocError::UnsupportedSyntax {
        ext: syntax.name().to_string(),
    })
}

/// Documents every module reachable from the configured paths.
pub fn generate_documentation(config: &Config) -> Result<RunReport> {
    info!("Starting documentation run");
    debug!(
        "Inputs: {:?}, output directory: {:?}",
        config.paths, config.output
    );

    let registry = SyntaxRegistry::builtin()?;
    let report = indexing::process_paths_parallel(config, &registry)?;

    info!(
        "Documentation complete: {} modules written, {} failed, {} diagnostics",
        report.modules.len(),
        report.failures.len(),
        report.diagnostic_count()
    );

    Ok(report)
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
