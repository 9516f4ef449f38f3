use crate::config::{Config, OutputFormat};
use crate::doc_model::{Diagnostic, Extraction};
use crate::error::{DocError, Result};
use crate::indexing::segmenter::ModuleSegmenter;
use crate::parsers::{SyntaxRegistry, detect_syntax, module_name_from_path};
use crate::render::latex::{render_index, render_module};
use crate::utils::io::{
    ensure_output_dir, export_summary_to_json, export_to_json, read_source, write_output,
};
use log::{debug, error, info, trace, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const LATEX_INDEX: &str = "index.tex";
pub const JSON_INDEX: &str = "index.json";

/// One source file to document under a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleJob {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct ModuleOutput {
    pub name: String,
    pub output: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct ModuleFailure {
    pub name: String,
    pub path: PathBuf,
    pub error: DocError,
}

/// Outcome of a whole run: what was written and what failed.
#[derive(Debug, Default)]
pub struct RunReport {
    pub modules: Vec<ModuleOutput>,
    pub failures: Vec<ModuleFailure>,
    pub index: Option<PathBuf>,
}

impl RunReport {
    /// Every file written, module outputs first, index last.
    pub fn produced_files(&self) -> Vec<&Path> {
        self.modules
            .iter()
            .map(|m| m.output.as_path())
            .chain(self.index.as_deref())
            .collect()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.modules.iter().map(|m| m.diagnostics.len()).sum()
    }
}

#[derive(Serialize)]
struct IndexEntry<'a> {
    module: &'a str,
    file: String,
}

pub fn process_paths_parallel(config: &Config, registry: &SyntaxRegistry) -> Result<RunReport> {
    let num_threads = config.thread_count();
    info!(
        "Starting parallel module processing with {} threads",
        num_threads
    );

    info!("Scanning inputs for supported files...");
    let jobs = collect_modules(&config.paths, registry);
    if jobs.is_empty() {
        error!("No inputs could be found on the filesystem");
        return Err(DocError::NoInputs);
    }
    info!("Found {} modules to process", jobs.len());

    ensure_output_dir(&config.output)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;

    let results: Vec<(ModuleJob, Result<ModuleOutput>)> = pool.install(|| {
        jobs.into_par_iter()
            .map(|job| {
                debug!("Processing module {} from {:?}", job.name, job.path);
                let result = process_module(&job, registry, &config.output, config.format);
                (job, result)
            })
            .collect()
    });

    let mut report = RunReport::default();
    for (job, result) in results {
        match result {
            Ok(output) => report.modules.push(output),
            Err(e) => {
                error!("Error processing module {} ({:?}): {}", job.name, job.path, e);
                report.failures.push(ModuleFailure {
                    name: job.name,
                    path: job.path,
                    error: e,
                });
            }
        }
    }
    report.modules.sort_by(|a, b| a.name.cmp(&b.name));
    report.failures.sort_by(|a, b| a.name.cmp(&b.name));

    info!("Module processing complete");
    report.index = write_index(&report, &config.output, config.format)?;

    Ok(report)
}

/// Reads, documents and writes a single module.
pub fn process_module(
    job: &ModuleJob,
    registry: &SyntaxRegistry,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<ModuleOutput> {
    let spec = detect_syntax(registry, &job.path)?;
    let source = read_source(&job.path)?;

    let Extraction {
        summary,
        diagnostics,
    } = ModuleSegmenter::new(spec).segment_source(&job.name, &source)?;

    let output = output_dir.join(format!("{}.{}", job.name, format.extension()));
    match format {
        OutputFormat::Latex => write_output(&output, &render_module(&summary, spec))?,
        OutputFormat::Json => export_summary_to_json(&summary, &output)?,
    }

    for diagnostic in &diagnostics {
        trace!("{}: {}", job.name, diagnostic);
    }
    debug!(
        "Documented {} ({} entries, {} diagnostics) into {:?}",
        job.name,
        summary.entry_count(),
        diagnostics.len(),
        output
    );

    Ok(ModuleOutput {
        name: job.name.clone(),
        output,
        diagnostics,
    })
}

fn write_index(
    report: &RunReport,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<Option<PathBuf>> {
    if report.modules.is_empty() {
        warn!("No module was documented, skipping index");
        return Ok(None);
    }

    let file_names: Vec<String> = report
        .modules
        .iter()
        .filter_map(|m| m.output.file_name().and_then(|n| n.to_str()))
        .map(str::to_string)
        .collect();

    let index = match format {
        OutputFormat::Latex => {
            let path = output_dir.join(LATEX_INDEX);
            write_output(&path, &render_index(file_names.iter().map(String::as_str)))?;
            path
        }
        OutputFormat::Json => {
            let path = output_dir.join(JSON_INDEX);
            let entries: Vec<IndexEntry> = report
                .modules
                .iter()
                .zip(file_names)
                .map(|(m, file)| IndexEntry {
                    module: &m.name,
                    file,
                })
                .collect();
            export_to_json(&entries, &path)?;
            path
        }
    };

    info!("Wrote index of {} modules to {:?}", report.modules.len(), index);
    Ok(Some(index))
}

/// Expands the command-line paths into module jobs.
///
/// Missing paths are reported and skipped. Directories are walked and only
/// files with a registered extension are kept; explicitly named files are
/// always kept so an unsupported one is reported as a failure later.
pub fn collect_modules(paths: &[PathBuf], registry: &SyntaxRegistry) -> Vec<ModuleJob> {
    let supported: HashSet<&str> = registry.supported_extensions().into_iter().collect();
    let mut visited = HashSet::new();
    let mut names = HashSet::new();
    let mut jobs = Vec::new();

    let mut push = |name: String, path: PathBuf| {
        let canonical = match fs::canonicalize(&path) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to canonicalize path {:?}: {}", path, e);
                return;
            }
        };
        if !visited.insert(canonical) {
            trace!("Skipping already visited file: {:?}", path);
            return;
        }
        if !names.insert(name.clone()) {
            warn!("Module name {} already used, skipping {:?}", name, path);
            return;
        }
        jobs.push(ModuleJob { name, path });
    };

    for path in paths {
        if !path.exists() {
            warn!("File/Directory not found: {:?} attempting to continue...", path);
        } else if path.is_file() {
            let file_name = path.file_name().map(Path::new).unwrap_or(path.as_path());
            push(module_name_from_path(file_name), path.clone());
        } else if path.is_dir() {
            let root = fs::canonicalize(path).unwrap_or_else(|_| path.clone());
            let base = root.parent().unwrap_or(&root).to_path_buf();

            for entry in WalkDir::new(&root)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let file = entry.path();
                if file.is_dir() {
                    continue;
                }

                let ext = file.extension().and_then(|e| e.to_str()).unwrap_or_default();
                if !supported.contains(ext) {
                    trace!("Skipping unsupported file: {:?}", file);
                    continue;
                }

                let relative = file.strip_prefix(&base).unwrap_or(file);
                push(module_name_from_path(relative), file.to_path_buf());
            }
        }
    }

    jobs
}
