//! # Keplerian elements → Cartesian state
//!
//! [`compute_state_vectors`] turns a Keplerian element set into an inertial position/velocity
//! pair in the **equatorial** frame:
//!
//! 1. solve the eccentric anomaly with [`solve_kepler_bisection`],
//! 2. build the perifocal position `(ox, oy)` and velocity `(ovx, ovy)` from the ellipse relations,
//! 3. rotate by ω, i and Ω (3-1-3 sequence) into the ecliptic frame,
//! 4. rotate about the x axis by the obliquity of the ecliptic into the equatorial frame.
//!
//! The rotation order and the obliquity constant are part of the SLF contract with the
//! downstream simulators and must not change.
use nalgebra::Vector3;

use crate::constants::{
    degree_to_radian, Kilogram, Meter, Radian, GRAVITATIONAL_CONSTANT, OBLIQUITY_OF_THE_ECLIPTIC,
};
use crate::kepler::solve_kepler_bisection;

/// Position (m) and velocity (m/s) in the equatorial inertial frame.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    /// The state of a body resting at the origin (the Sun).
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Rotate an ecliptic vector into the equatorial frame.
fn ecliptic_to_equatorial(v: Vector3<f64>) -> Vector3<f64> {
    let eps = degree_to_radian(OBLIQUITY_OF_THE_ECLIPTIC);
    let (sin_eps, cos_eps) = eps.sin_cos();
    Vector3::new(
        v.x,
        v.y * cos_eps - v.z * sin_eps,
        v.y * sin_eps + v.z * cos_eps,
    )
}

/// Compute the equatorial state vectors of an elliptic orbit.
///
/// Arguments
/// ---------
/// * `primary_mass`: mass of the primary (kg); `μ = G·primary_mass`
/// * `mean_anomaly`: mean anomaly (rad)
/// * `semi_major_axis`: semi-major axis (m)
/// * `eccentricity`: eccentricity, `0 ≤ e < 1`
/// * `inclination`: inclination to the ecliptic (rad)
/// * `periapsis_argument`: argument of perihelion ω (rad)
/// * `ascending_node_longitude`: longitude of the ascending node Ω (rad)
///
/// Return
/// ------
/// * a [`StateVector`] with position in m and velocity in m/s
///
/// Remarks
/// -------
/// * For `e = 0` the body lies at exactly `a` from the origin with speed `sqrt(μ/a)`,
///   independently of the three angles.
pub fn compute_state_vectors(
    primary_mass: Kilogram,
    mean_anomaly: Radian,
    semi_major_axis: Meter,
    eccentricity: f64,
    inclination: Radian,
    periapsis_argument: Radian,
    ascending_node_longitude: Radian,
) -> StateVector {
    let mu = GRAVITATIONAL_CONSTANT * primary_mass;
    let ecc_anomaly = solve_kepler_bisection(mean_anomaly, eccentricity);
    let (sin_e, cos_e) = ecc_anomaly.sin_cos();
    let sqrt_one_minus_e2 = (1.0 - eccentricity * eccentricity).sqrt();

    let radius = semi_major_axis * (1.0 - eccentricity * cos_e);

    // perifocal frame: x towards perihelion, z along the orbital angular momentum
    let ox = semi_major_axis * (cos_e - eccentricity);
    let oy = semi_major_axis * sqrt_one_minus_e2 * sin_e;

    let p = (mu * semi_major_axis).sqrt() / radius;
    let ovx = -p * sin_e;
    let ovy = p * sqrt_one_minus_e2 * cos_e;

    let (sin_arg, cos_arg) = periapsis_argument.sin_cos();
    let (sin_node, cos_node) = ascending_node_longitude.sin_cos();
    let (sin_inc, cos_inc) = inclination.sin_cos();

    let to_ecliptic = |u: f64, v: f64| {
        Vector3::new(
            u * (cos_arg * cos_node - sin_arg * cos_inc * sin_node)
                - v * (sin_arg * cos_node + cos_arg * cos_inc * sin_node),
            u * (cos_arg * sin_node + sin_arg * cos_inc * cos_node)
                + v * (cos_arg * cos_inc * cos_node - sin_arg * sin_node),
            u * (sin_arg * sin_inc) + v * (cos_arg * sin_inc),
        )
    };

    StateVector {
        position: ecliptic_to_equatorial(to_ecliptic(ox, oy)),
        velocity: ecliptic_to_equatorial(to_ecliptic(ovx, ovy)),
    }
}
