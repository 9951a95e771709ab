//! Fixed-size linear solve for the cubic fit.
//!
//! The curve engine only ever needs one system shape: four equations, four
//! unknowns. Gaussian elimination with partial pivoting on a stack-allocated
//! augmented matrix is enough and stays allocation-free.

/// Pivots smaller than this are treated as singular.
pub const PIVOT_EPSILON: f32 = 1e-6;

/// Augmented 4x4 system: each row is `[a0, a1, a2, a3 | rhs]`.
pub type Augmented4 = [[f32; 5]; 4];

/// Solve a 4x4 linear system in place.
///
/// Returns `None` when a pivot falls below [`PIVOT_EPSILON`] or any
/// coefficient comes out non-finite, so callers can substitute a safe
/// fallback instead of propagating garbage.
pub fn solve4(mut m: Augmented4) -> Option<[f32; 4]> {
    for col in 0..4 {
        // Partial pivoting: bring the largest magnitude entry up
        let pivot_row = (col..4)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot_row][col].abs() < PIVOT_EPSILON || !m[pivot_row][col].is_finite() {
            return None;
        }
        m.swap(col, pivot_row);

        for row in (col + 1)..4 {
            let factor = m[row][col] / m[col][col];
            for k in col..5 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    // Back substitution
    let mut x = [0.0f32; 4];
    for row in (0..4).rev() {
        let mut acc = m[row][4];
        for k in (row + 1)..4 {
            acc -= m[row][k] * x[k];
        }
        x[row] = acc / m[row][row];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_identity() {
        let m = [
            [1.0, 0.0, 0.0, 0.0, 4.0],
            [0.0, 1.0, 0.0, 0.0, 3.0],
            [0.0, 0.0, 1.0, 0.0, 2.0],
            [0.0, 0.0, 0.0, 1.0, 1.0],
        ];
        let x = solve4(m).expect("identity is solvable");
        assert_eq!(x, [4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn solves_vandermonde_for_known_cubic() {
        // y = 2x^3 - x^2 + 0.5x + 0.25
        let f = |x: f32| 2.0 * x * x * x - x * x + 0.5 * x + 0.25;
        let xs = [0.0f32, 0.3, 0.7, 1.0];
        let mut m = [[0.0; 5]; 4];
        for (row, &x) in m.iter_mut().zip(&xs) {
            *row = [x * x * x, x * x, x, 1.0, f(x)];
        }

        let c = solve4(m).expect("distinct nodes give a regular system");
        let expected = [2.0, -1.0, 0.5, 0.25];
        for (got, want) in c.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-4, "got {got}, want {want}");
        }
    }

    #[test]
    fn needs_row_swap_when_leading_entry_is_zero() {
        // First row starts with 0 (x = 0 sample), pivoting must reorder
        let m = [
            [0.0, 0.0, 0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 1.0, 4.0],
            [8.0, 4.0, 2.0, 1.0, 15.0],
            [27.0, 9.0, 3.0, 1.0, 40.0],
        ];
        // y = x^3 + x^2 + x + 1
        let c = solve4(m).expect("regular system");
        for got in c {
            assert!((got - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn coincident_nodes_are_singular() {
        let row = [0.125, 0.25, 0.5, 1.0, 0.3];
        let m = [
            [0.0, 0.0, 0.0, 1.0, 0.0],
            row,
            row,
            [1.0, 1.0, 1.0, 1.0, 1.0],
        ];
        assert!(solve4(m).is_none());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let m = [
            [f32::NAN, 0.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 0.0, 1.0, 1.0],
        ];
        assert!(solve4(m).is_none());
    }
}
