//! Artifact Resolution and Loading
//!
//! Finds the model and column files through the configured search
//! directories and builds the serving model. Loading is all-or-nothing.

use feature_engine::{Catalog, ColumnSchema, SchemaError};
use inference_engine::{load_model, InferenceError, Predictor};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ArtifactSettings, EncodingSettings};

/// Errors while loading startup artifacts
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{file} not found; tried {tried:?}")]
    NotFound { file: String, tried: Vec<PathBuf> },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Model(#[from] InferenceError),
}

/// Predictor and catalog built from one schema
#[derive(Debug)]
pub struct LoadedModel {
    pub predictor: Predictor,
    pub catalog: Catalog,
}

impl LoadedModel {
    /// Build from an already-loaded schema and predictor
    pub fn new(predictor: Predictor) -> Self {
        let catalog = Catalog::from_schema(predictor.schema());
        Self { predictor, catalog }
    }
}

/// Candidate locations for a file, in search order
pub fn candidate_paths(file_name: &str, search_dirs: &[PathBuf], exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let file = Path::new(file_name);
    if file.is_absolute() {
        return vec![file.to_path_buf()];
    }

    let mut candidates: Vec<PathBuf> = search_dirs.iter().map(|dir| dir.join(file)).collect();

    if let Some(exe_dir) = exe_dir {
        candidates.extend(
            search_dirs
                .iter()
                .filter(|dir| dir.is_relative())
                .map(|dir| exe_dir.join(dir).join(file)),
        );
    }

    candidates
}

/// First existing candidate for a file
pub fn resolve_artifact(file_name: &str, search_dirs: &[PathBuf]) -> Result<PathBuf, LoadError> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let candidates = candidate_paths(file_name, search_dirs, exe_dir.as_deref());

    for candidate in &candidates {
        debug!("Looking for {} at {}", file_name, candidate.display());
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }

    Err(LoadError::NotFound {
        file: file_name.to_string(),
        tried: candidates,
    })
}

/// Resolve and load schema and model, then derive the catalog
pub fn load_artifacts(
    artifacts: &ArtifactSettings,
    encoding: &EncodingSettings,
) -> Result<LoadedModel, LoadError> {
    info!("Loading model and columns...");

    let columns_path = resolve_artifact(&artifacts.columns_file, &artifacts.search_dirs)?;
    let model_path = resolve_artifact(&artifacts.model_file, &artifacts.search_dirs)?;
    info!(
        "Using columns {} and model {}",
        columns_path.display(),
        model_path.display()
    );

    let schema = ColumnSchema::from_json_file(&columns_path)?;
    let model = load_model(&model_path, schema.len())?;
    let predictor =
        Predictor::new(schema, model)?.with_strict_categories(encoding.strict_categories);

    info!("Model and columns loaded successfully");
    Ok(LoadedModel::new(predictor))
}
