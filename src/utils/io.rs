use crate::doc_model::ModuleSummary;
use crate::error::{DocError, Result};
use log::{error, info, trace};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Creates `output_dir` if needed. Fails if the path exists but is not a directory.
pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        if !output_dir.is_dir() {
            error!("Output path {:?} is not a directory", output_dir);
            return Err(DocError::OutputNotDirectory(output_dir.to_path_buf()));
        }
        trace!("Using existing output directory {:?}", output_dir);
        return Ok(());
    }

    info!("Creating output directory {:?}", output_dir);
    fs::create_dir_all(output_dir)?;
    Ok(())
}

pub fn read_source(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) => {
            error!("Failed to read file {:?}: {}", path, e);
            Err(e.into())
        }
    }
}

pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    match fs::write(path, contents) {
        Ok(_) => {
            trace!("Wrote {} bytes to {:?}", contents.len(), path);
            Ok(())
        }
        Err(e) => {
            error!("Failed to write file {:?}: {}", path, e);
            Err(e.into())
        }
    }
}

pub fn export_to_json<T: Serialize>(value: &T, output_path: &Path) -> Result<()> {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize to JSON: {}", e);
            return Err(e.into());
        }
    };
    write_output(output_path, &json)
}

pub fn export_summary_to_json(summary: &ModuleSummary, output_path: &Path) -> Result<()> {
    trace!(
        "Exporting summary of {} with {} entries to {:?}",
        summary.name,
        summary.entry_count(),
        output_path
    );
    export_to_json(summary, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        ensure_output_dir(&target).unwrap();
        assert!(target.is_dir());
        ensure_output_dir(&target).unwrap();
    }

    #[test]
    fn rejects_file_as_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            ensure_output_dir(&file),
            Err(DocError::OutputNotDirectory(path)) if path == file
        ));
    }

    #[test]
    fn summary_round_trips_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        let mut summary = ModuleSummary::new("m");
        summary.add_constant("X", "doc".to_string());
        export_summary_to_json(&summary, &path).unwrap();

        let loaded: ModuleSummary =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, summary);
    }
}
