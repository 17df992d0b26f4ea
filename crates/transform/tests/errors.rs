//! Integration tests for ScatteringError variants.

use ndarray::{Array1, Array2, Array3, ArrayD, IxDyn};
use scatter_transform::{Scattering2D, ScatteringConfig, ScatteringError};

fn build(config: ScatteringConfig) -> Result<Scattering2D, ScatteringError> {
    Scattering2D::new(&config)
}

#[test]
fn error_zero_scales() {
    let result = build(ScatteringConfig::new(0, (32, 32)));
    assert!(matches!(result, Err(ScatteringError::InvalidScale(0))));
}

#[test]
fn error_zero_orientations() {
    let result = build(ScatteringConfig::new(2, (32, 32)).with_orientations(0));
    assert!(matches!(result, Err(ScatteringError::InvalidOrientations(0))));
}

#[test]
fn error_max_order_out_of_range() {
    let result = build(ScatteringConfig::new(2, (32, 32)).with_max_order(0));
    assert!(matches!(
        result,
        Err(ScatteringError::InvalidMaxOrder { order: 0, max: 4 })
    ));
    let result = build(ScatteringConfig::new(2, (32, 32)).with_max_order(5));
    assert!(matches!(
        result,
        Err(ScatteringError::InvalidMaxOrder { order: 5, max: 4 })
    ));
}

#[test]
fn error_window_exceeds_shape() {
    // 2^6 = 64 > 32
    let result = build(ScatteringConfig::new(6, (32, 128)));
    assert!(matches!(
        result,
        Err(ScatteringError::ScaleExceedsShape {
            j: 6,
            rows: 32,
            cols: 128
        })
    ));
}

#[test]
fn error_output_too_small() {
    // 16 / 2^3 = 2 coarse pixels, all cropped
    let result = build(ScatteringConfig::new(3, (16, 64)));
    assert!(matches!(
        result,
        Err(ScatteringError::OutputTooSmall { j: 3, .. })
    ));
}

#[test]
fn error_too_many_channels() {
    // L^4 overflows usize for L = 2^20
    let result = build(
        ScatteringConfig::new(4, (64, 64))
            .with_orientations(1 << 20)
            .with_max_order(4),
    );
    assert!(matches!(
        result,
        Err(ScatteringError::TooManyChannels {
            j: 4,
            max_order: 4,
            ..
        })
    ));
}

fn scattering() -> Scattering2D {
    build(ScatteringConfig::new(2, (16, 16)).with_orientations(2)).unwrap()
}

#[test]
fn error_rank_too_low() {
    let x = Array1::<f64>::zeros(16);
    let result = scattering().transform(&x.view().into_dyn());
    assert!(matches!(result, Err(ScatteringError::RankTooLow { ndim: 1 })));

    let x = ArrayD::<f64>::zeros(IxDyn(&[]));
    let result = scattering().transform(&x.view());
    assert!(matches!(result, Err(ScatteringError::RankTooLow { ndim: 0 })));
}

#[test]
fn error_non_contiguous() {
    let x = Array3::<f64>::zeros((16, 16, 2));
    // Plane axis last-but-two: a permuted view is not row-major.
    let permuted = x.view().permuted_axes([2, 0, 1]);
    let result = scattering().transform(&permuted.into_dyn());
    assert!(matches!(result, Err(ScatteringError::NonContiguous)));
}

#[test]
fn error_shape_mismatch() {
    let x = Array3::<f64>::zeros((4, 16, 17));
    let result = scattering().transform(&x.view().into_dyn());
    assert!(matches!(
        result,
        Err(ScatteringError::ShapeMismatch {
            expected: (16, 16),
            got: (16, 17)
        })
    ));
}

#[test]
fn error_padded_shape_mismatch() {
    let s = build(
        ScatteringConfig::new(2, (14, 14))
            .with_orientations(2)
            .with_pre_pad(true),
    )
    .unwrap();
    // Unpadded input handed to a pre-padded transform.
    let x = Array2::<f64>::zeros((14, 14));
    let result = s.transform_image(&x.view());
    assert!(matches!(
        result,
        Err(ScatteringError::PaddedShapeMismatch {
            expected: (16, 16),
            got: (14, 14)
        })
    ));
}

#[test]
fn error_non_finite_input() {
    let mut x = Array3::<f64>::zeros((2, 16, 16));
    x[[1, 15, 0]] = f64::INFINITY;
    let result = scattering().transform(&x.view().into_dyn());
    assert!(matches!(result, Err(ScatteringError::NonFiniteInput)));
}

#[test]
fn error_classes_are_distinct() {
    let config_errors = [
        build(ScatteringConfig::new(0, (32, 32))).unwrap_err(),
        build(ScatteringConfig::new(6, (32, 32))).unwrap_err(),
        build(ScatteringConfig::new(4, (64, 64)).with_orientations(1 << 20).with_max_order(4))
            .unwrap_err(),
    ];
    for err in &config_errors {
        assert!(err.is_config() && !err.is_input(), "{err}");
    }

    let x = Array1::<f64>::zeros(16);
    let err = scattering().transform(&x.view().into_dyn()).unwrap_err();
    assert!(err.is_input() && !err.is_config(), "{err}");
}
