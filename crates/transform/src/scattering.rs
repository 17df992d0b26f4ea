//! Front-end: validates inputs, batches planes and runs the cascade.

use std::sync::Arc;

use ndarray::{Array3, ArrayD, ArrayView2, ArrayViewD, Axis, Ix3, IxDyn};
use rayon::prelude::*;
use scatter_filters::{FilterBank, Precision};
use scatter_fourier::FourierBackend;
use tracing::{debug, info};

use crate::cascade::Cascade;
use crate::config::ScatteringConfig;
use crate::error::ScatteringError;
use crate::padding::Padding;
use crate::path::{ScatteringPath, enumerate_paths};
use crate::plan::ShapePlan;

/// Windowed 2D scattering transform for a fixed input shape.
///
/// Construction validates the configuration, plans the padded grid and
/// builds the filter bank once. [`transform`](Self::transform) can then be
/// called any number of times, from any number of threads.
///
/// # Example
///
/// ```
/// use ndarray::Array4;
/// use scatter_transform::{Scattering2D, ScatteringConfig};
///
/// let scattering = Scattering2D::new(&ScatteringConfig::new(2, (32, 32))).unwrap();
/// let x = Array4::<f64>::zeros((1, 1, 32, 32));
/// let s = scattering.transform(&x.view().into_dyn()).unwrap();
/// assert_eq!(s.shape(), &[1, 1, 81, 6, 6]);
/// ```
#[derive(Clone, Debug)]
pub struct Scattering2D {
    plan: ShapePlan,
    padding: Padding,
    filters: FilterBank,
    backend: Arc<dyn FourierBackend>,
    paths: Vec<ScatteringPath>,
}

impl Scattering2D {
    /// Builds a transform using the backend named in `config`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ScatteringError::InvalidScale`] | `J == 0` |
    /// | [`ScatteringError::InvalidOrientations`] | `L == 0` |
    /// | [`ScatteringError::InvalidMaxOrder`] | `max_order` outside `1..=4` |
    /// | [`ScatteringError::ScaleExceedsShape`] | `2^J` larger than `M` or `N` |
    /// | [`ScatteringError::OutputTooSmall`] | cropping leaves no output pixels |
    pub fn new(config: &ScatteringConfig) -> Result<Self, ScatteringError> {
        Self::with_backend(config, config.backend().build())
    }

    /// Builds a transform on an explicit Fourier backend.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    #[tracing::instrument(skip_all, fields(j = config.j(), l = config.orientations(), backend = backend.name()))]
    pub fn with_backend(
        config: &ScatteringConfig,
        backend: Arc<dyn FourierBackend>,
    ) -> Result<Self, ScatteringError> {
        let plan = ShapePlan::new(config)?;
        let (rows, cols) = plan.padded_shape();
        let filters = FilterBank::new(
            rows,
            cols,
            plan.j(),
            plan.orientations(),
            backend.as_ref(),
        )?;
        let padding = Padding::new(plan.pad_widths(), config.pre_pad());
        let paths = enumerate_paths(plan.j(), plan.orientations(), plan.max_order());

        info!(
            input = ?plan.input_shape(),
            padded = ?plan.padded_shape(),
            output = ?plan.output_shape(),
            channels = plan.n_channels(),
            "scattering transform ready"
        );

        Ok(Self {
            plan,
            padding,
            filters,
            backend,
            paths,
        })
    }

    /// Shapes derived from the configuration.
    pub fn plan(&self) -> &ShapePlan {
        &self.plan
    }

    /// The filter bank on the padded grid.
    pub fn filters(&self) -> &FilterBank {
        &self.filters
    }

    /// The Fourier backend in use.
    pub fn backend(&self) -> &dyn FourierBackend {
        self.backend.as_ref()
    }

    /// The path of every output channel, indexed by channel.
    pub fn paths(&self) -> &[ScatteringPath] {
        &self.paths
    }

    /// Whether inputs are expected pre-padded.
    pub fn pre_pad(&self) -> bool {
        self.padding.pre_pad()
    }

    /// Working precision of filters and padded planes.
    pub fn precision(&self) -> Precision {
        self.filters.precision()
    }

    /// Returns a copy whose filters and padded planes use `precision`.
    pub fn migrate(&self, precision: Precision) -> Self {
        Self {
            plan: self.plan.clone(),
            padding: self.padding.migrate(precision),
            filters: self.filters.migrate(precision),
            backend: Arc::clone(&self.backend),
            paths: self.paths.clone(),
        }
    }

    /// Spatial shape each input plane must have.
    fn expected_plane_shape(&self) -> (usize, usize) {
        if self.padding.pre_pad() {
            self.plan.padded_shape()
        } else {
            self.plan.input_shape()
        }
    }

    /// Checks rank, layout, spatial size and finiteness, in that order.
    fn validate_input(&self, input: &ArrayViewD<f64>) -> Result<(), ScatteringError> {
        let ndim = input.ndim();
        if ndim < 2 {
            return Err(ScatteringError::RankTooLow { ndim });
        }
        if !input.is_standard_layout() {
            return Err(ScatteringError::NonContiguous);
        }
        let got = (input.shape()[ndim - 2], input.shape()[ndim - 1]);
        let expected = self.expected_plane_shape();
        if got != expected {
            return Err(if self.padding.pre_pad() {
                ScatteringError::PaddedShapeMismatch { expected, got }
            } else {
                ScatteringError::ShapeMismatch { expected, got }
            });
        }
        if input.iter().any(|v| !v.is_finite()) {
            return Err(ScatteringError::NonFiniteInput);
        }
        Ok(())
    }

    /// Scatters an array of shape `(B..., M, N)` into `(B..., D, Md, Nd)`.
    ///
    /// With `pre_pad` enabled the trailing dimensions must be the padded
    /// shape instead. Planes are processed in parallel.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ScatteringError::RankTooLow`] | fewer than 2 dimensions |
    /// | [`ScatteringError::NonContiguous`] | not in standard row-major layout |
    /// | [`ScatteringError::ShapeMismatch`] | trailing dims differ from `(M, N)` |
    /// | [`ScatteringError::PaddedShapeMismatch`] | pre-padded trailing dims differ from the padded shape |
    /// | [`ScatteringError::NonFiniteInput`] | any NaN or infinite value |
    #[tracing::instrument(skip_all, fields(shape = ?input.shape()))]
    pub fn transform(&self, input: &ArrayViewD<f64>) -> Result<ArrayD<f64>, ScatteringError> {
        self.validate_input(input)?;

        let ndim = input.ndim();
        let (rows, cols) = (input.shape()[ndim - 2], input.shape()[ndim - 1]);
        let batch_shape = &input.shape()[..ndim - 2];
        let n_planes: usize = batch_shape.iter().product();
        let planes = input.view().into_shape_with_order((n_planes, rows, cols))?;

        debug!(n_planes, "scattering batch");
        let results = (0..n_planes)
            .into_par_iter()
            .map(|b| self.transform_plane(&planes.index_axis(Axis(0), b)))
            .collect::<Result<Vec<_>, _>>()?;

        let (md, nd) = self.plan.output_shape();
        let mut out_shape = batch_shape.to_vec();
        out_shape.extend([self.plan.n_channels(), md, nd]);
        let mut data = Vec::with_capacity(out_shape.iter().product());
        for plane in results {
            data.extend(plane.iter().copied());
        }
        Ok(ArrayD::from_shape_vec(IxDyn(&out_shape), data)?)
    }

    /// Scatters a single `(M, N)` image into `(D, Md, Nd)`.
    ///
    /// # Errors
    ///
    /// Same as [`transform`](Self::transform).
    pub fn transform_image(&self, image: &ArrayView2<f64>) -> Result<Array3<f64>, ScatteringError> {
        let out = self.transform(&image.view().into_dyn())?;
        Ok(out.into_dimensionality::<Ix3>()?)
    }

    fn transform_plane(&self, plane: &ArrayView2<f64>) -> Result<Array3<f64>, ScatteringError> {
        let padded = self.padding.pad(plane);
        Cascade::new(self.backend.as_ref(), &self.filters, &self.plan).run(&padded)
    }
}
