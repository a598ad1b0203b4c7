//! File conversion pipeline.

use crate::{ConvertError, ConvertResult};
use delta_compiler::{compile, Container};
use delta_core::DeltaConfig;
use delta_emit::render;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Counts reported after a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub contexts: usize,
    pub rules: usize,
    pub prims: usize,
    pub unresolved: usize,
    pub bytes: usize,
}

impl ConvertSummary {
    fn new(container: &Container, bytes: usize) -> Self {
        let contexts = container.contexts();
        Self {
            contexts: contexts.len(),
            rules: contexts.iter().map(|c| c.rules.len()).sum(),
            prims: container.prims().len(),
            unresolved: contexts.iter().map(|c| c.unresolved.len()).sum(),
            bytes,
        }
    }
}

/// Convert instruction text to output text. Nothing is written.
pub fn convert(source: &str, config: &DeltaConfig) -> ConvertResult<String> {
    let container = compile(source, config)?;
    Ok(render(&container, &config.emit))
}

/// Load a JSON configuration file. Missing fields keep their defaults.
pub fn load_config(path: &Path) -> ConvertResult<DeltaConfig> {
    let text = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| ConvertError::config(path, e.to_string()))
}

/// Convert `input` into `output`.
///
/// The output is only replaced once the whole input compiled; on any error an
/// existing `output` is left untouched.
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &DeltaConfig,
) -> ConvertResult<ConvertSummary> {
    let source = fs::read_to_string(input).map_err(|e| ConvertError::io(input, e))?;
    debug!(input = %input.display(), bytes = source.len(), "input read");

    let container = compile(&source, config)?;
    let text = render(&container, &config.emit);
    write_atomic(output, &text)?;

    let summary = ConvertSummary::new(&container, text.len());
    info!(
        output = %output.display(),
        contexts = summary.contexts,
        prims = summary.prims,
        "conversion written"
    );
    Ok(summary)
}

/// Write through a temporary file in the destination directory.
fn write_atomic(path: &Path, contents: &str) -> ConvertResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(dir, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| ConvertError::io(file.path(), e))?;
    file.persist(path)
        .map_err(|e| ConvertError::io(path, e.error))?;
    Ok(())
}
