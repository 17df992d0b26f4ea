//! JSON signal reader.
//!
//! Two layouts are accepted:
//!
//! | Layout | Example |
//! |--------|---------|
//! | nested rectangular array | `[[0.0, 1.0], [2.0, 3.0]]` |
//! | object with row-major data | `{"shape": [2, 2], "data": [0.0, 1.0, 2.0, 3.0]}` |
//!
//! Extra object fields are ignored, so a written [`ScatteringOutput`] reads
//! back as a signal.
//!
//! [`ScatteringOutput`]: crate::ScatteringOutput

use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::{ValidationCollector, validate_shape};

/// Minimum rank of a signal: one 2D plane.
const MIN_SIGNAL_RANK: usize = 2;

#[derive(Debug, Deserialize)]
struct FlatSignal {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Read a signal of rank >= 2 from a JSON file.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Io`] | the file cannot be read |
/// | [`IoError::Json`] | malformed JSON or wrong field types |
/// | [`IoError::Validation`] | ragged arrays, non-numeric entries, rank < 2, or shape/data size mismatch |
pub fn read_signal(path: &Path) -> Result<ArrayD<f64>, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| IoError::io(path, &e))?;
    let signal = parse_signal(&text)?;
    info!(path = %path.display(), shape = ?signal.shape(), "read signal");
    Ok(signal)
}

/// Parse a signal from JSON text. See [`read_signal`].
///
/// # Errors
///
/// Same as [`read_signal`], minus the filesystem variants.
pub fn parse_signal(text: &str) -> Result<ArrayD<f64>, IoError> {
    let value: Value = serde_json::from_str(text)?;
    let (shape, data) = match value {
        Value::Array(_) => flatten_nested(&value)?,
        Value::Object(_) => {
            let flat: FlatSignal = serde_json::from_value(value)?;
            debug!(shape = ?flat.shape, "parsed flat signal");
            (flat.shape, flat.data)
        }
        other => {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "expected an array or an object with shape and data, got {}",
                    kind(&other)
                ),
            });
        }
    };

    validate_shape(&shape, MIN_SIGNAL_RANK, data.len()).finish()?;
    ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|e| IoError::Validation {
        count: 1,
        details: e.to_string(),
    })
}

/// Shape from the first element along each axis, then a checked row-major walk.
fn flatten_nested(value: &Value) -> Result<(Vec<usize>, Vec<f64>), IoError> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut data = Vec::with_capacity(shape.iter().product());
    let mut errors = ValidationCollector::new();
    let mut index = Vec::with_capacity(shape.len());
    walk(value, &shape, &mut index, &mut data, &mut errors);
    errors.finish()?;
    Ok((shape, data))
}

fn walk(
    value: &Value,
    shape: &[usize],
    index: &mut Vec<usize>,
    data: &mut Vec<f64>,
    errors: &mut ValidationCollector,
) {
    let depth = index.len();
    if depth == shape.len() {
        match value.as_f64() {
            Some(v) => data.push(v),
            None => errors.push(format!("value at {index:?} is {}, expected a number", kind(value))),
        }
        return;
    }
    match value {
        Value::Array(items) if items.len() == shape[depth] => {
            for (i, item) in items.iter().enumerate() {
                index.push(i);
                walk(item, shape, index, data, errors);
                index.pop();
            }
        }
        Value::Array(items) => errors.push(format!(
            "axis {depth} at {index:?} has length {}, expected {}",
            items.len(),
            shape[depth]
        )),
        other => errors.push(format!(
            "value at {index:?} is {}, expected an array",
            kind(other)
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_matrix() {
        let x = parse_signal("[[1, 2, 3], [4, 5, 6]]").unwrap();
        assert_eq!(x.shape(), &[2, 3]);
        assert_eq!(x[[1, 0]], 4.0);
    }

    #[test]
    fn nested_rank_four() {
        let x = parse_signal("[[[[0.5, 1.5], [2.5, 3.5]]]]").unwrap();
        assert_eq!(x.shape(), &[1, 1, 2, 2]);
        assert_eq!(x[[0, 0, 1, 1]], 3.5);
    }

    #[test]
    fn flat_object() {
        let x = parse_signal(r#"{"shape": [2, 2], "data": [1, 2, 3, 4], "channels": []}"#).unwrap();
        assert_eq!(x.shape(), &[2, 2]);
        assert_eq!(x[[0, 1]], 2.0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_signal("[[1, 2], [3]]").unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert_eq!(details, "axis 1 at [1] has length 1, expected 2");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn all_bad_entries_are_reported() {
        let err = parse_signal(r#"[[1, "a"], [null, 4]]"#).unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("value at [0, 1] is a string"));
                assert!(details.contains("value at [1, 0] is null"));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn rank_one_is_rejected() {
        let err = parse_signal("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("rank 1 is below the minimum of 2"));
    }

    #[test]
    fn flat_size_mismatch_is_rejected() {
        let err = parse_signal(r#"{"shape": [2, 3], "data": [1, 2]}"#).unwrap_err();
        assert!(err.to_string().contains("shape [2, 3] holds 6 values, got 2"));
    }

    #[test]
    fn scalar_document_is_rejected() {
        let err = parse_signal("3.0").unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 1, .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = parse_signal("[[1, 2]").unwrap_err();
        assert!(matches!(err, IoError::Json { .. }));
    }
}
