//! Configuration for the scattering transform.

use scatter_fourier::BackendKind;

use crate::error::ScatteringError;

/// Highest scattering order the cascade supports.
pub const MAX_ORDER: usize = 4;

/// Configuration for [`Scattering2D`](crate::Scattering2D).
///
/// Use [`ScatteringConfig::new`] for defaults (`L = 8`, `max_order = 2`,
/// reflection padding, RustFFT backend) and the `with_*` methods to customize.
///
/// # Example
///
/// ```
/// use scatter_transform::ScatteringConfig;
///
/// let config = ScatteringConfig::new(2, (32, 32))
///     .with_orientations(4)
///     .with_max_order(1);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.orientations(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScatteringConfig {
    j: usize,
    shape: (usize, usize),
    l: usize,
    max_order: usize,
    pre_pad: bool,
    backend: BackendKind,
}

impl ScatteringConfig {
    /// Creates a configuration for `J` scales on inputs of spatial `shape`.
    pub fn new(j: usize, shape: (usize, usize)) -> Self {
        Self {
            j,
            shape,
            l: 8,
            max_order: 2,
            pre_pad: false,
            backend: BackendKind::default(),
        }
    }

    /// Sets the number of orientations `L`.
    pub fn with_orientations(mut self, l: usize) -> Self {
        self.l = l;
        self
    }

    /// Sets the maximum scattering order.
    pub fn with_max_order(mut self, max_order: usize) -> Self {
        self.max_order = max_order;
        self
    }

    /// When `true`, inputs are expected to arrive already padded.
    pub fn with_pre_pad(mut self, pre_pad: bool) -> Self {
        self.pre_pad = pre_pad;
        self
    }

    /// Sets the Fourier backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Number of scales `J`.
    pub fn j(&self) -> usize {
        self.j
    }

    /// Unpadded spatial shape `(M, N)`.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of orientations `L`.
    pub fn orientations(&self) -> usize {
        self.l
    }

    /// Maximum scattering order.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Whether inputs arrive pre-padded.
    pub fn pre_pad(&self) -> bool {
        self.pre_pad
    }

    /// Fourier backend selection.
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Validates the parameters that do not depend on padding.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ScatteringError::InvalidScale`] | `J == 0` |
    /// | [`ScatteringError::InvalidOrientations`] | `L == 0` |
    /// | [`ScatteringError::InvalidMaxOrder`] | `max_order` outside `1..=MAX_ORDER` |
    /// | [`ScatteringError::ScaleExceedsShape`] | `2^J > M` or `2^J > N` |
    pub fn validate(&self) -> Result<(), ScatteringError> {
        if self.j == 0 {
            return Err(ScatteringError::InvalidScale(self.j));
        }
        if self.l == 0 {
            return Err(ScatteringError::InvalidOrientations(self.l));
        }
        if !(1..=MAX_ORDER).contains(&self.max_order) {
            return Err(ScatteringError::InvalidMaxOrder {
                order: self.max_order,
                max: MAX_ORDER,
            });
        }
        let (rows, cols) = self.shape;
        let fits = self
            .window()
            .is_some_and(|window| window <= rows && window <= cols);
        if !fits {
            return Err(ScatteringError::ScaleExceedsShape {
                j: self.j,
                rows,
                cols,
            });
        }
        Ok(())
    }

    /// Window size `2^J`, or `None` if it overflows.
    pub(crate) fn window(&self) -> Option<usize> {
        u32::try_from(self.j)
            .ok()
            .and_then(|j| 1usize.checked_shl(j))
    }
}
