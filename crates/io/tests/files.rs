//! Integration tests: reading signals and writing results through real files.

use std::path::Path;

use approx::assert_abs_diff_eq;
use ndarray::{Array3, Array4};
use scatter_io::{
    IoError, ScatteringOutput, WriterConfig, read_output, read_signal, write_output,
};

#[test]
fn read_signal_file_not_found() {
    let path = Path::new("/tmp/scatter_test_nonexistent_signal.json");
    let err = read_signal(path).unwrap_err();
    assert!(
        matches!(err, IoError::FileNotFound { .. }),
        "expected FileNotFound, got {err:?}",
    );
}

#[test]
fn read_nested_signal_from_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("signal.json");
    std::fs::write(&path, "[[[0.25, -1.0], [3.5, 4.0]], [[5, 6], [7, 8]]]").unwrap();

    let x = read_signal(&path).expect("read succeeds");
    assert_eq!(x.shape(), &[2, 2, 2]);
    assert_abs_diff_eq!(x[[0, 0, 0]], 0.25);
    assert_abs_diff_eq!(x[[0, 0, 1]], -1.0);
    assert_abs_diff_eq!(x[[1, 1, 0]], 7.0);
}

#[test]
fn write_then_read_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("out.json");

    let coefficients = Array4::from_shape_fn((2, 3, 2, 2), |(b, c, i, k)| {
        b as f64 * 100.0 + c as f64 * 10.0 + i as f64 + k as f64 * 0.5
    })
    .into_dyn();
    let channels = vec!["S0".to_string(), "S1(0,0)".to_string(), "S1(0,1)".to_string()];
    let output = ScatteringOutput::new(&coefficients, channels).unwrap();

    write_output(&path, &output, &WriterConfig::default().with_pretty(true)).expect("write");
    let back = read_output(&path).expect("read back");
    assert_eq!(back, output);
    assert_eq!(back.to_array().unwrap(), coefficients);
}

#[test]
fn output_file_reads_back_as_signal() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("out.json");

    let coefficients = Array3::from_shape_fn((2, 3, 3), |(c, i, k)| (c * 9 + i * 3 + k) as f64);
    let output = ScatteringOutput::new(
        &coefficients.clone().into_dyn(),
        vec!["a".to_string(), "b".to_string()],
    )
    .unwrap();
    write_output(&path, &output, &WriterConfig::default()).unwrap();

    let signal = read_signal(&path).unwrap();
    assert_eq!(signal, coefficients.into_dyn());
}

#[test]
fn read_output_rejects_mismatched_labels() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"shape": [2, 1, 1], "channels": ["only-one"], "data": [1.0, 2.0]}"#,
    )
    .unwrap();

    let err = read_output(&path).unwrap_err();
    assert!(matches!(
        err,
        IoError::DimensionMismatch {
            expected: 2,
            got: 1,
            ..
        }
    ));
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("no/such/dir/out.json");
    let output =
        ScatteringOutput::new(&Array3::<f64>::zeros((1, 1, 1)).into_dyn(), vec!["S0".into()])
            .unwrap();
    let err = write_output(&path, &output, &WriterConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        IoError::FileNotFound { .. } | IoError::Io { .. }
    ));
}
