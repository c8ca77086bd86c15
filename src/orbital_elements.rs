//! # Keplerian orbital elements
//!
//! [`OrbitalElements`] is the classical element set `(a, e, i, ω, Ω, M)` valid at an epoch, as
//! read from the orbit catalogs or evaluated from the planetary polynomials.
//!
//! ## Units
//!
//! - Lengths: **meters**
//! - Angles: **radians**
//! - Epoch: **Julian Day Number**
//!
//! The conversion to Cartesian state is done by
//! [`compute_state_vectors`](crate::state_vector::compute_state_vectors); see
//! [`OrbitalElements::state_vectors`].

use crate::constants::{JulianDay, Kilogram, Meter, Radian};
use crate::state_vector::{compute_state_vectors, StateVector};

/// Keplerian orbital elements (osculating, two-body).
///
/// Units
/// -----
/// * `semi_major_axis`: meters.
/// * `eccentricity`: unitless, `0 ≤ e < 1` expected.
/// * `inclination`: radians.
/// * `periapsis_argument`: radians (ω).
/// * `ascending_node_longitude`: radians (Ω).
/// * `mean_anomaly`: radians (M).
/// * `epoch`: Julian Day Number at which the elements are valid.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct OrbitalElements {
    pub semi_major_axis: Meter,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub periapsis_argument: Radian,
    pub ascending_node_longitude: Radian,
    pub mean_anomaly: Radian,
    pub epoch: JulianDay,
}

impl OrbitalElements {
    /// Equatorial position/velocity of an orbit around a primary of mass `primary_mass`.
    ///
    /// Arguments
    /// ---------
    /// * `primary_mass`: mass used for the gravitational parameter `μ = G·m` (kg)
    ///
    /// Return
    /// ------
    /// * the [`StateVector`] in m and m/s
    pub fn state_vectors(&self, primary_mass: Kilogram) -> StateVector {
        compute_state_vectors(
            primary_mass,
            self.mean_anomaly,
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.periapsis_argument,
            self.ascending_node_longitude,
        )
    }
}
