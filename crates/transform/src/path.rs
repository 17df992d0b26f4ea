//! Scattering paths and their enumeration order.

use std::fmt;

/// The sequence of `(scale, orientation)` pairs that produced one channel.
///
/// The order-0 path is empty. Scales strictly increase along a path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScatteringPath {
    scales: Vec<usize>,
    orientations: Vec<usize>,
}

impl ScatteringPath {
    /// The empty, order-0 path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Scattering order: the number of wavelets along the path.
    pub fn order(&self) -> usize {
        self.scales.len()
    }

    /// Scales `j1 < j2 < ...`.
    pub fn scales(&self) -> &[usize] {
        &self.scales
    }

    /// Orientation indices, aligned with [`scales`](Self::scales).
    pub fn orientations(&self) -> &[usize] {
        &self.orientations
    }

    /// Scale of the last wavelet, `None` for the root.
    pub fn last_scale(&self) -> Option<usize> {
        self.scales.last().copied()
    }

    /// Whether a wavelet at `scale` may extend this path.
    pub fn admits(&self, scale: usize) -> bool {
        self.last_scale().is_none_or(|last| scale > last)
    }

    /// The path extended by one wavelet.
    pub fn extend(&self, scale: usize, orientation: usize) -> Self {
        let mut scales = self.scales.clone();
        let mut orientations = self.orientations.clone();
        scales.push(scale);
        orientations.push(orientation);
        Self {
            scales,
            orientations,
        }
    }
}

impl fmt::Display for ScatteringPath {
    /// `S0` for the root, otherwise `S{order}` followed by `(j,θ)` pairs,
    /// e.g. `S2(0,3)(1,5)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.order())?;
        for (j, theta) in self.scales.iter().zip(&self.orientations) {
            write!(f, "({j},{theta})")?;
        }
        Ok(())
    }
}

/// Lists every path up to `max_order` in channel order.
///
/// Order 0 comes first, then each order in turn. Within an order, paths are
/// lexicographic in their wavelet indices `j·L + θ`, which is the order the
/// cascade emits channels in.
pub fn enumerate_paths(j: usize, l: usize, max_order: usize) -> Vec<ScatteringPath> {
    let mut paths = vec![ScatteringPath::root()];
    let mut frontier = vec![ScatteringPath::root()];
    for _ in 0..max_order {
        let next: Vec<ScatteringPath> = frontier
            .iter()
            .flat_map(|parent| {
                (0..j * l)
                    .map(move |index| (index / l, index % l))
                    .filter(move |&(scale, _)| parent.admits(scale))
                    .map(move |(scale, theta)| parent.extend(scale, theta))
            })
            .collect();
        paths.extend(next.iter().cloned());
        frontier = next;
    }
    paths
}
