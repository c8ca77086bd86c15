//! # Kepler's equation
//!
//! Two solvers for the elliptic Kepler equation `M = E − e·sin(E)`:
//!
//! * [`solve_kepler_bisection`] – fixed 64-step bisection (Sinnott's method). Deterministic,
//!   branch-free convergence to double precision for any `e ∈ [0, 1)`. This is the solver used by
//!   every state-vector computation in the crate.
//! * [`solve_kepler_newton`] – Newton–Raphson iteration with a `1e-8` stopping criterion and
//!   **no iteration cap**. Kept for compatibility only: nothing in the conversion pipeline calls
//!   it and its convergence for `e → 1` has not been validated.
//!
//! Angle helpers
//! -----------------
//! * [`signed_remainder`] – reduce an angle modulo a period while keeping its sign, giving
//!   a value in `(−period, period)`.
use std::f64::consts::PI;

use crate::constants::{Radian, DPI};

/// Number of halving steps of the bisection solver.
const BISECTION_STEPS: usize = 64;

/// Newton–Raphson stopping threshold on successive estimates.
const NEWTON_TOLERANCE: f64 = 1e-8;

/// Reduce `angle` modulo `period`, keeping the sign of the input.
///
/// The result lies in `(−period, period)`; zero maps to zero.
///
/// Arguments
/// ---------
/// * `angle`: the angle to reduce (any unit)
/// * `period`: the full-turn value in the same unit (`2π` or `360`)
///
/// Return
/// ------
/// * the signed remainder
pub fn signed_remainder(angle: f64, period: f64) -> f64 {
    let sign = if angle > 0.0 { 1.0 } else { -1.0 };
    let turns = angle.abs() / period;
    (turns - turns.floor()) * period * sign
}

/// Solve Kepler's equation by bisection.
///
/// The mean anomaly is first reduced into `(−π, π]`: the input is reduced modulo 2π with its sign
/// preserved, and values beyond π are reflected (`M → 2π − M`, with the sign flipped) so that the
/// root search always runs on `|M| ∈ [0, π]`. The search starts at `E₀ = π/2` with a step of `π/4`,
/// halved on each of the 64 iterations; the estimate moves up when its implied mean anomaly is
/// below the target and down otherwise. The sign is reapplied on return.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in radians (any real value)
/// * `eccentricity`: orbital eccentricity `e ∈ [0, 1)`
///
/// Return
/// ------
/// * the eccentric anomaly `E` in radians, in `[−π, π]`
///
/// See also
/// --------
/// * [`solve_kepler_newton`] – unbounded Newton–Raphson variant
pub fn solve_kepler_bisection(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    let mut sign = if mean_anomaly < 0.0 { -1.0 } else { 1.0 };
    let mut m = signed_remainder(mean_anomaly, DPI).abs();

    if m > PI {
        sign = -sign;
        m = DPI - m;
    }

    let mut e0 = PI / 2.0;
    let mut d = PI / 4.0;
    for _ in 0..BISECTION_STEPS {
        let m1 = e0 - eccentricity * e0.sin();
        e0 = if m > m1 { e0 + d } else { e0 - d };
        d /= 2.0;
    }

    e0 * sign
}

/// Solve Kepler's equation with Newton–Raphson iterations.
///
/// Starts from `E = M₀ + e/2` and iterates `E ← E − (E − e·sin E − M₀)/(1 − e·cos E)` until two
/// successive estimates differ by less than `1e-8`. There is no iteration cap, so an input for
/// which the iteration does not settle never returns. Unused by the conversion pipeline.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M₀` in radians
/// * `eccentricity`: orbital eccentricity
///
/// Return
/// ------
/// * the eccentric anomaly `E` in radians
pub fn solve_kepler_newton(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    let mut eca = mean_anomaly + eccentricity / 2.0;
    let mut diff = f64::INFINITY;

    while diff > NEWTON_TOLERANCE {
        let e1 = eca
            - (eca - eccentricity * eca.sin() - mean_anomaly) / (1.0 - eccentricity * eca.cos());
        diff = (e1 - eca).abs();
        eca = e1;
    }

    eca
}

#[cfg(test)]
mod kepler_test {
    use super::*;

    /// Distance to the nearest multiple of 2π.
    fn wrapped(x: f64) -> f64 {
        (x + PI).rem_euclid(DPI) - PI
    }

    #[test]
    fn test_signed_remainder() {
        assert!((signed_remainder(370.0, 360.0) - 10.0).abs() < 1e-9);
        assert!((signed_remainder(-370.0, 360.0) + 10.0).abs() < 1e-9);
        assert_eq!(signed_remainder(0.0, 360.0), 0.0);
        assert_eq!(signed_remainder(90.0, 360.0), 90.0);
        assert_eq!(signed_remainder(-90.0, 360.0), -90.0);
    }

    #[test]
    fn test_bisection_residual_grid() {
        for ie in 0..=99 {
            let e = ie as f64 * 0.01;
            for im in -50..=50 {
                let m = im as f64 * PI / 50.0;
                let ecc_anomaly = solve_kepler_bisection(m, e);
                let residual = wrapped(ecc_anomaly - e * ecc_anomaly.sin() - m);
                assert!(
                    residual.abs() < 1e-9,
                    "e = {e}, M = {m}: residual {residual}"
                );
            }
        }
    }

    #[test]
    fn test_bisection_reduces_large_angles() {
        let e = 0.3;
        let m = 0.7;
        let reference = solve_kepler_bisection(m, e);
        assert!((solve_kepler_bisection(m + 4.0 * DPI, e) - reference).abs() < 1e-12);
        assert!((solve_kepler_bisection(m - 3.0 * DPI, e) - reference).abs() < 1e-12);

        // M slightly beyond π maps onto the negative branch
        let beyond = solve_kepler_bisection(PI + 0.2, e);
        assert!(beyond < 0.0);
        assert!((beyond + solve_kepler_bisection(PI - 0.2, e)).abs() < 1e-12);
    }

    #[test]
    fn test_bisection_circular_orbit() {
        assert!((solve_kepler_bisection(1.2, 0.0) - 1.2).abs() < 1e-15);
        assert!((solve_kepler_bisection(-1.2, 0.0) + 1.2).abs() < 1e-15);
    }

    #[test]
    fn test_newton_agrees_with_bisection() {
        for &e in &[0.0, 0.1, 0.25, 0.5, 0.7] {
            for &m in &[0.1, 0.5, 1.0, 2.0, 3.0] {
                let newton = solve_kepler_newton(m, e);
                let bisection = solve_kepler_bisection(m, e);
                assert!(
                    (newton - bisection).abs() < 1e-7,
                    "e = {e}, M = {m}: {newton} vs {bisection}"
                );
            }
        }
    }
}
