//! Reading interactions and writing extracted trees.

use std::fs;
use std::path::Path;

use arbor_core::{ArborError, ArborResult, Interaction};
use tracing::info;

use crate::generator::CandidateTree;

fn io_error(path: &Path, err: std::io::Error) -> ArborError {
    ArborError::IoError {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Read interactions from a JSON array or from JSON lines (one object per
/// line, blank lines ignored).
pub fn load_interactions_json(path: impl AsRef<Path>) -> ArborResult<Vec<Interaction>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;

    let interactions: Vec<Interaction> = if content.trim_start().starts_with('[') {
        serde_json::from_str(&content)?
    } else {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<Interaction>)
            .collect::<Result<_, _>>()?
    };
    info!(path = %path.display(), count = interactions.len(), "interactions loaded");
    Ok(interactions)
}

pub fn save_results(path: impl AsRef<Path>, candidates: &[CandidateTree]) -> ArborResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(candidates)?;
    fs::write(path, json).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), candidates = candidates.len(), "results saved");
    Ok(())
}

pub fn load_results(path: impl AsRef<Path>) -> ArborResult<Vec<CandidateTree>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(serde_json::from_str(&json)?)
}
