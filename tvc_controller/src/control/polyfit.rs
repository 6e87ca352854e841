//! Cubic least-squares fit.
//!
//! Fits `y = c3·x³ + c2·x² + c1·x + c0` by solving the 4×4 normal equations
//! with Gaussian elimination and partial pivoting. x is scaled to `[-1, 1]`
//! before forming the sums and the coefficients are rescaled afterwards.

/// Minimum number of samples for a cubic fit.
pub const MIN_FIT_POINTS: usize = 4;

/// Relative pivot magnitude below which the system is treated as singular.
const SINGULAR_EPS: f64 = 1e-12;

/// Fit a cubic to `(x, y)` samples.
///
/// Returns coefficients ordered cubic → constant, or `None` when the inputs
/// are malformed (length mismatch, fewer than [`MIN_FIT_POINTS`], non-finite
/// values) or the system is singular.
pub fn polyfit_cubic(x: &[f64], y: &[f64]) -> Option<[f64; 4]> {
    if x.len() != y.len() || x.len() < MIN_FIT_POINTS {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let scale = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return None;
    }

    // Power sums s[k] = Σ u^k, t[k] = Σ y·u^k over scaled u = x / scale.
    let mut s = [0.0_f64; 7];
    let mut t = [0.0_f64; 4];
    for (&xi, &yi) in x.iter().zip(y) {
        let u = xi / scale;
        let mut p = 1.0;
        for k in 0..7 {
            s[k] += p;
            if k < 4 {
                t[k] += yi * p;
            }
            p *= u;
        }
    }

    // Row i / column j correspond to powers 3 - i / 3 - j.
    let mut mat = [[0.0_f64; 4]; 4];
    let mut rhs = [0.0_f64; 4];
    for i in 0..4 {
        for j in 0..4 {
            mat[i][j] = s[6 - i - j];
        }
        rhs[i] = t[3 - i];
    }

    let a = solve_4x4(mat, rhs)?;

    // a[i] multiplies u^(3-i) = x^(3-i) / scale^(3-i).
    let coeffs = [
        a[0] / scale.powi(3),
        a[1] / scale.powi(2),
        a[2] / scale,
        a[3],
    ];
    coeffs.iter().all(|c| c.is_finite()).then_some(coeffs)
}

/// Solve `mat · x = rhs`. Returns `None` if the system is singular.
fn solve_4x4(mat: [[f64; 4]; 4], rhs: [f64; 4]) -> Option<[f64; 4]> {
    let mut m = [[0.0_f64; 5]; 4];
    let mut norm = 0.0_f64;
    for i in 0..4 {
        m[i][..4].copy_from_slice(&mat[i]);
        m[i][4] = rhs[i];
        norm = mat[i].iter().fold(norm, |acc, v| acc.max(v.abs()));
    }
    if norm == 0.0 {
        return None;
    }
    let tol = SINGULAR_EPS * norm;

    for col in 0..4 {
        let mut max_row = col;
        let mut max_val = m[col][col].abs();
        for row in (col + 1)..4 {
            if m[row][col].abs() > max_val {
                max_val = m[row][col].abs();
                max_row = row;
            }
        }
        if max_val < tol {
            return None;
        }
        if max_row != col {
            m.swap(col, max_row);
        }

        for row in (col + 1)..4 {
            let factor = m[row][col] / m[col][col];
            for j in col..5 {
                m[row][j] -= factor * m[col][j];
            }
        }
    }

    let mut out = [0.0_f64; 4];
    for i in (0..4).rev() {
        let mut acc = m[i][4];
        for j in (i + 1)..4 {
            acc -= m[i][j] * out[j];
        }
        out[i] = acc / m[i][i];
    }

    out.iter().all(|v| v.is_finite()).then_some(out)
}
