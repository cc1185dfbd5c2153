//! Model Artifact Loading

use crate::linear::LinearPriceModel;
use crate::model::PriceModel;
use crate::onnx::OnnxPriceModel;
use crate::InferenceError;
use std::path::Path;

/// Load a price model, choosing the backend from the file extension.
///
/// `input_dimension` is the schema length; graph backends need it to fix
/// their input shape.
pub fn load_model(
    path: impl AsRef<Path>,
    input_dimension: usize,
) -> Result<Box<dyn PriceModel>, InferenceError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("onnx") => Ok(Box::new(OnnxPriceModel::load(path, input_dimension)?)),
        Some("json") => Ok(Box::new(LinearPriceModel::from_json_file(path)?)),
        _ => Err(InferenceError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
