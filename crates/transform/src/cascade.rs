//! Work-list scattering cascade over one padded plane.
//!
//! Each depth holds the Fourier-domain states of the paths that may still be
//! extended. A depth is expanded in parallel over `(parent, wavelet)` pairs;
//! children are collected back in input order, so the channel index of a
//! path is its position within the depth plus the order's offset. Parent
//! states are dropped as soon as the next depth is built, and states of the
//! final depth are never materialized.

use ndarray::{Array2, Array3, Axis};
use num_complex::Complex64;
use rayon::prelude::*;
use scatter_filters::{FilterBank, Wavelet};
use scatter_fourier::FourierBackend;
use tracing::trace;

use crate::error::ScatteringError;
use crate::padding::unpad;
use crate::plan::ShapePlan;

/// Fourier-domain state of one path, at resolution `2^-last_scale`.
struct PathState {
    last_scale: Option<usize>,
    spectrum: Array2<Complex64>,
}

impl PathState {
    /// Resolution index of the stored spectrum.
    fn resolution(&self) -> usize {
        self.last_scale.unwrap_or(0)
    }

    fn admits(&self, wavelet: &Wavelet) -> bool {
        self.last_scale.is_none_or(|last| wavelet.scale() > last)
    }
}

/// The cascade engine, borrowing everything it needs from the front-end.
pub(crate) struct Cascade<'a> {
    backend: &'a dyn FourierBackend,
    filters: &'a FilterBank,
    plan: &'a ShapePlan,
}

impl<'a> Cascade<'a> {
    pub(crate) fn new(
        backend: &'a dyn FourierBackend,
        filters: &'a FilterBank,
        plan: &'a ShapePlan,
    ) -> Self {
        Self {
            backend,
            filters,
            plan,
        }
    }

    /// Computes every scattering channel of one padded plane.
    ///
    /// Returns a `(D, Md, Nd)` array.
    pub(crate) fn run(&self, padded: &Array2<f64>) -> Result<Array3<f64>, ScatteringError> {
        let expected = self.plan.padded_shape();
        if padded.dim() != expected {
            return Err(ScatteringError::PaddedShapeMismatch {
                expected,
                got: padded.dim(),
            });
        }

        let (md, nd) = self.plan.output_shape();
        let mut out = Array3::zeros((self.plan.n_channels(), md, nd));

        let root = PathState {
            last_scale: None,
            spectrum: self.backend.fft2_real(padded),
        };
        out.index_axis_mut(Axis(0), 0)
            .assign(&self.average(&root.spectrum, 0)?);

        let wavelets = self.filters.wavelets();
        let mut frontier = vec![root];
        let mut channel = 1;
        for order in 1..=self.plan.max_order() {
            let keep_states = order < self.plan.max_order();
            let jobs: Vec<(&PathState, &Wavelet)> = frontier
                .iter()
                .flat_map(move |parent| {
                    wavelets
                        .iter()
                        .filter(move |w| parent.admits(w))
                        .map(move |w| (parent, w))
                })
                .collect();
            trace!(order, n_paths = jobs.len(), "expanding cascade depth");

            let children = jobs
                .par_iter()
                .map(|&(parent, wavelet)| self.extend(parent, wavelet, keep_states))
                .collect::<Result<Vec<_>, _>>()?;

            let mut next = Vec::with_capacity(if keep_states { children.len() } else { 0 });
            for (coefficients, state) in children {
                out.index_axis_mut(Axis(0), channel).assign(&coefficients);
                channel += 1;
                next.extend(state);
            }
            frontier = next;
        }
        debug_assert_eq!(channel, self.plan.n_channels());

        Ok(out)
    }

    /// Applies one wavelet and the modulus to `parent`.
    ///
    /// Returns the child's averaged output and, when requested, its state.
    fn extend(
        &self,
        parent: &PathState,
        wavelet: &Wavelet,
        keep_state: bool,
    ) -> Result<(Array2<f64>, Option<PathState>), ScatteringError> {
        // admits() guarantees resolution <= scale, so the level is stored.
        let resolution = parent.resolution();
        let mut filtered = self
            .backend
            .multiply(&parent.spectrum, wavelet.level(resolution))?;
        let factor = 1usize << (wavelet.scale() - resolution);
        if factor > 1 {
            filtered = self.backend.periodize(&filtered, factor)?;
        }
        let modulus = self.backend.modulus(&self.backend.ifft2(&filtered));
        let spectrum = self.backend.fft2_real(&modulus);

        let coefficients = self.average(&spectrum, wavelet.scale())?;
        let state = keep_state.then(|| PathState {
            last_scale: Some(wavelet.scale()),
            spectrum,
        });
        Ok((coefficients, state))
    }

    /// Low-pass filters a spectrum at `resolution`, subsamples to `2^-J` and crops.
    fn average(
        &self,
        spectrum: &Array2<Complex64>,
        resolution: usize,
    ) -> Result<Array2<f64>, ScatteringError> {
        // Wavelet scales stop at J - 1, so every requested level is stored.
        let filter = self.filters.low_pass().level(resolution);
        let filtered = self.backend.multiply(spectrum, filter)?;
        let factor = 1usize << (self.plan.j() - resolution);
        let coarse = self.backend.periodize(&filtered, factor)?;
        Ok(unpad(&self.backend.ifft2_real(&coarse)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScatteringConfig;
    use approx::assert_abs_diff_eq;
    use scatter_fourier::BackendKind;

    fn setup(j: usize, l: usize, max_order: usize, shape: (usize, usize)) -> (ShapePlan, FilterBank) {
        let plan = ShapePlan::new(
            &ScatteringConfig::new(j, shape)
                .with_orientations(l)
                .with_max_order(max_order),
        )
        .unwrap();
        let (rows, cols) = plan.padded_shape();
        let backend = BackendKind::RustFft.build();
        let filters = FilterBank::new(rows, cols, j, l, backend.as_ref()).unwrap();
        (plan, filters)
    }

    #[test]
    fn output_has_planned_shape() {
        let (plan, filters) = setup(2, 4, 2, (16, 16));
        let backend = BackendKind::RustFft.build();
        let cascade = Cascade::new(backend.as_ref(), &filters, &plan);
        let padded = Array2::from_shape_fn((16, 16), |(r, c)| ((r * 3 + c) % 5) as f64);
        let out = cascade.run(&padded).unwrap();
        assert_eq!(out.dim(), (1 + 8 + 16, 2, 2));
    }

    #[test]
    fn zero_input_gives_zero_output() {
        let (plan, filters) = setup(2, 2, 2, (16, 16));
        let backend = BackendKind::RustFft.build();
        let cascade = Cascade::new(backend.as_ref(), &filters, &plan);
        let out = cascade.run(&Array2::zeros((16, 16))).unwrap();
        for v in out.iter() {
            assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn rejects_wrong_plane_shape() {
        let (plan, filters) = setup(1, 2, 1, (8, 8));
        let backend = BackendKind::RustFft.build();
        let cascade = Cascade::new(backend.as_ref(), &filters, &plan);
        let err = cascade.run(&Array2::zeros((8, 6))).unwrap_err();
        assert!(matches!(
            err,
            ScatteringError::PaddedShapeMismatch {
                expected: (8, 8),
                got: (8, 6)
            }
        ));
    }
}
