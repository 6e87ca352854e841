//! Breakpoint/value lookup tables with flat extrapolation.

use serde::{Deserialize, Serialize};
use tvc_common::config::ConfigError;
use tvc_common::consts::MAX_LOOKUP_POINTS;

/// Piecewise-linear interpolation of `x` over `(xp, fp)`.
///
/// `xp` must be increasing. Inputs outside `[xp[0], xp[n-1]]` return the edge
/// value. Extra entries in the longer slice are ignored; empty input yields 0.
#[inline]
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    for i in 1..n {
        if x < xp[i] {
            let span = xp[i] - xp[i - 1];
            if span <= 0.0 {
                return fp[i];
            }
            let t = (x - xp[i - 1]) / span;
            return fp[i - 1] + t * (fp[i] - fp[i - 1]);
        }
    }
    fp[n - 1]
}

/// Fixed-capacity lookup table.
///
/// Serialized in TOML as `{ bp = [..], v = [..] }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LookupTableDef", into = "LookupTableDef")]
pub struct LookupTable {
    bp: [f64; MAX_LOOKUP_POINTS],
    v: [f64; MAX_LOOKUP_POINTS],
    len: usize,
}

impl LookupTable {
    /// Build a table from same-length arrays. `N` must be in `1..=MAX_LOOKUP_POINTS`.
    pub const fn new<const N: usize>(bp: [f64; N], v: [f64; N]) -> Self {
        assert!(N >= 1 && N <= MAX_LOOKUP_POINTS);
        let mut table = Self {
            bp: [0.0; MAX_LOOKUP_POINTS],
            v: [0.0; MAX_LOOKUP_POINTS],
            len: N,
        };
        let mut i = 0;
        while i < N {
            table.bp[i] = bp[i];
            table.v[i] = v[i];
            i += 1;
        }
        table
    }

    /// Build a table from slices, validating shape and ordering.
    pub fn from_slices(bp: &[f64], v: &[f64]) -> Result<Self, ConfigError> {
        if bp.is_empty() || bp.len() > MAX_LOOKUP_POINTS {
            return Err(ConfigError::ValidationError(format!(
                "lookup table needs 1..={MAX_LOOKUP_POINTS} points, got {}",
                bp.len()
            )));
        }
        if bp.len() != v.len() {
            return Err(ConfigError::ValidationError(format!(
                "lookup table has {} breakpoints but {} values",
                bp.len(),
                v.len()
            )));
        }
        if bp.iter().chain(v.iter()).any(|x| !x.is_finite()) {
            return Err(ConfigError::ValidationError(
                "lookup table contains non-finite entries".to_string(),
            ));
        }
        if bp.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ConfigError::ValidationError(
                "lookup table breakpoints must be strictly increasing".to_string(),
            ));
        }

        let mut table = Self {
            bp: [0.0; MAX_LOOKUP_POINTS],
            v: [0.0; MAX_LOOKUP_POINTS],
            len: bp.len(),
        };
        table.bp[..bp.len()].copy_from_slice(bp);
        table.v[..v.len()].copy_from_slice(v);
        Ok(table)
    }

    #[inline]
    pub fn breakpoints(&self) -> &[f64] {
        &self.bp[..self.len]
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.v[..self.len]
    }

    /// Evaluate the table at `x`, clamped at the edges.
    #[inline]
    pub fn interp(&self, x: f64) -> f64 {
        interp(x, self.breakpoints(), self.values())
    }
}

/// Serialized form of [`LookupTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupTableDef {
    pub bp: Vec<f64>,
    pub v: Vec<f64>,
}

impl TryFrom<LookupTableDef> for LookupTable {
    type Error = ConfigError;

    fn try_from(def: LookupTableDef) -> Result<Self, Self::Error> {
        Self::from_slices(&def.bp, &def.v)
    }
}

impl From<LookupTable> for LookupTableDef {
    fn from(table: LookupTable) -> Self {
        Self {
            bp: table.breakpoints().to_vec(),
            v: table.values().to_vec(),
        }
    }
}
