//! `rustfft`-backed implementation of [`FourierBackend`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use ndarray::{Array2, ArrayViewMut1};
use num_complex::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};

use crate::backend::FourierBackend;

type PlanKey = (usize, bool);

/// 2D FFT built from row and column passes of 1D `rustfft` plans.
///
/// Plans are cached per (length, direction), so repeated transforms on the
/// few grid sizes a cascade uses are cheap after the first call. The cache
/// lock is held only while fetching or inserting a plan.
pub struct RustFftBackend {
    plans: Mutex<HashMap<PlanKey, Arc<dyn Fft<f64>>>>,
}

impl RustFftBackend {
    /// Creates a backend with an empty plan cache.
    pub fn new() -> Self {
        Self {
            plans: Mutex::new(HashMap::new()),
        }
    }

    fn plan(&self, len: usize, direction: FftDirection) -> Arc<dyn Fft<f64>> {
        let key = (len, direction == FftDirection::Forward);
        // A poisoned cache still holds valid plans.
        let mut plans = match self.plans.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(
            plans
                .entry(key)
                .or_insert_with(|| FftPlanner::new().plan_fft(len, direction)),
        )
    }

    fn transform(&self, input: &Array2<Complex64>, direction: FftDirection) -> Array2<Complex64> {
        let (rows, cols) = input.dim();
        let mut out = input.to_owned();
        if rows == 0 || cols == 0 {
            return out;
        }

        let row_fft = self.plan(cols, direction);
        let mut line = vec![Complex64::default(); cols];
        let mut scratch = vec![Complex64::default(); row_fft.get_inplace_scratch_len()];
        for row in out.rows_mut() {
            process_lane(row, row_fft.as_ref(), &mut line, &mut scratch);
        }

        let col_fft = self.plan(rows, direction);
        let mut line = vec![Complex64::default(); rows];
        let mut scratch = vec![Complex64::default(); col_fft.get_inplace_scratch_len()];
        for col in out.columns_mut() {
            process_lane(col, col_fft.as_ref(), &mut line, &mut scratch);
        }

        out
    }
}

/// Gathers one lane into a contiguous buffer, transforms it, and scatters it back.
fn process_lane(
    mut lane: ArrayViewMut1<'_, Complex64>,
    fft: &dyn Fft<f64>,
    line: &mut [Complex64],
    scratch: &mut [Complex64],
) {
    for (dst, src) in line.iter_mut().zip(lane.iter()) {
        *dst = *src;
    }
    fft.process_with_scratch(line, scratch);
    for (dst, src) in lane.iter_mut().zip(line.iter()) {
        *dst = *src;
    }
}

impl Default for RustFftBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RustFftBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.plans.lock().map(|p| p.len()).unwrap_or(0);
        f.debug_struct("RustFftBackend")
            .field("cached_plans", &cached)
            .finish()
    }
}

impl FourierBackend for RustFftBackend {
    fn name(&self) -> &'static str {
        "rustfft"
    }

    fn fft2(&self, signal: &Array2<Complex64>) -> Array2<Complex64> {
        self.transform(signal, FftDirection::Forward)
    }

    fn ifft2(&self, spectrum: &Array2<Complex64>) -> Array2<Complex64> {
        let (rows, cols) = spectrum.dim();
        let mut out = self.transform(spectrum, FftDirection::Inverse);
        if rows > 0 && cols > 0 {
            let norm = 1.0 / (rows * cols) as f64;
            out.mapv_inplace(|c| c * norm);
        }
        out
    }
}
