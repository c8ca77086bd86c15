//! # Standish polynomial ephemeris
//!
//! Each element is `value + rate · T`, with `T` the number of Julian centuries since J2000.
//! The coefficients are those of Table 1 (valid 1800–2050) of *Keplerian Elements for
//! Approximate Positions of the Major Planets*. The Earth row is the Earth–Moon barycenter.
//!
//! | element            | unit | derived quantity                         |
//! |--------------------|------|------------------------------------------|
//! | a                  | AU   | semi-major axis, converted to meters     |
//! | e                  |      | eccentricity                             |
//! | I                  | deg  | inclination                              |
//! | L                  | deg  | mean longitude, `M = L − ϖ` (signed mod 360) |
//! | ϖ (long. peri.)    | deg  | `ω = ϖ − Ω`                              |
//! | Ω (long. node)     | deg  | ascending node                           |
use super::{Planet, PlanetEphemeris, PlanetState};
use crate::constants::{
    degree_to_radian, JulianDay, AU, DAYS_PER_JULIAN_CENTURY, J2000, SUN_MASS,
};
use crate::kepler::signed_remainder;
use crate::orbital_elements::OrbitalElements;
use crate::slf_errors::SlfError;

/// `[value at J2000, rate per Julian century]`.
type Term = [f64; 2];

#[derive(Debug, Clone, Copy)]
struct PolynomialElements {
    semi_major_axis: Term,
    eccentricity: Term,
    inclination: Term,
    mean_longitude: Term,
    perihelion_longitude: Term,
    node_longitude: Term,
}

const MERCURY: PolynomialElements = PolynomialElements {
    semi_major_axis: [0.38709927, 0.00000037],
    eccentricity: [0.20563593, 0.00001906],
    inclination: [7.00497902, -0.00594749],
    mean_longitude: [252.25032350, 149472.67411175],
    perihelion_longitude: [77.45779628, 0.16047689],
    node_longitude: [48.33076593, -0.12534081],
};

const VENUS: PolynomialElements = PolynomialElements {
    semi_major_axis: [0.72333566, 0.00000390],
    eccentricity: [0.00677672, -0.00004107],
    inclination: [3.39467605, -0.00078890],
    mean_longitude: [181.97909950, 58517.81538729],
    perihelion_longitude: [131.60246718, 0.00268329],
    node_longitude: [76.67984255, -0.27769418],
};

const EARTH_MOON_BARYCENTER: PolynomialElements = PolynomialElements {
    semi_major_axis: [1.00000261, 0.00000562],
    eccentricity: [0.01671123, -0.00004392],
    inclination: [-0.00001531, -0.01294668],
    mean_longitude: [100.46457166, 35999.37244981],
    perihelion_longitude: [102.93768193, 0.32327364],
    node_longitude: [0.0, 0.0],
};

const MARS: PolynomialElements = PolynomialElements {
    semi_major_axis: [1.52371034, 0.00001847],
    eccentricity: [0.09339410, 0.00007882],
    inclination: [1.84969142, -0.00813131],
    mean_longitude: [-4.55343205, 19140.30268499],
    perihelion_longitude: [-23.94362959, 0.44441088],
    node_longitude: [49.55953891, -0.29257343],
};

const JUPITER: PolynomialElements = PolynomialElements {
    semi_major_axis: [5.20288700, -0.00011607],
    eccentricity: [0.04838624, -0.00013253],
    inclination: [1.30439695, -0.00183714],
    mean_longitude: [34.39644051, 3034.74612775],
    perihelion_longitude: [14.72847983, 0.21252668],
    node_longitude: [100.47390909, -0.20469106],
};

const SATURN: PolynomialElements = PolynomialElements {
    semi_major_axis: [9.53667594, -0.00125060],
    eccentricity: [0.05386179, -0.00050991],
    inclination: [2.48599187, 0.00193609],
    mean_longitude: [49.95424423, 1222.49362201],
    perihelion_longitude: [92.59887831, -0.41897216],
    node_longitude: [113.66242448, -0.28867794],
};

const URANUS: PolynomialElements = PolynomialElements {
    semi_major_axis: [19.18916464, -0.00196176],
    eccentricity: [0.04725744, -0.00004397],
    inclination: [0.77263783, -0.00242939],
    mean_longitude: [313.23810451, 428.48202785],
    perihelion_longitude: [170.95427630, 0.40805281],
    node_longitude: [74.01692503, 0.04240589],
};

const NEPTUNE: PolynomialElements = PolynomialElements {
    semi_major_axis: [30.06992276, 0.00026291],
    eccentricity: [0.00859048, 0.00005105],
    inclination: [1.77004347, 0.00035372],
    mean_longitude: [304.87997031, 218.45945325],
    perihelion_longitude: [44.96476227, -0.32241464],
    node_longitude: [131.78422574, -0.00508664],
};

const PLUTO: PolynomialElements = PolynomialElements {
    semi_major_axis: [39.48211675, -0.00031596],
    eccentricity: [0.24882730, 0.00005170],
    inclination: [17.14001206, 0.00004818],
    mean_longitude: [238.92903833, 145.20780515],
    perihelion_longitude: [224.06891629, -0.04062942],
    node_longitude: [110.30393684, -0.01183482],
};

fn coefficients(planet: Planet) -> Option<&'static PolynomialElements> {
    match planet {
        Planet::Mercury => Some(&MERCURY),
        Planet::Venus => Some(&VENUS),
        Planet::Earth | Planet::EarthMoonBarycenter => Some(&EARTH_MOON_BARYCENTER),
        Planet::Mars => Some(&MARS),
        Planet::Jupiter => Some(&JUPITER),
        Planet::Saturn => Some(&SATURN),
        Planet::Uranus => Some(&URANUS),
        Planet::Neptune => Some(&NEPTUNE),
        Planet::Pluto => Some(&PLUTO),
        Planet::Moon => None,
    }
}

/// Osculating elements of `planet` at `epoch` from the polynomial table.
///
/// Arguments
/// ---------
/// * `planet`: the body to evaluate
/// * `epoch`: Julian Day (TDB) of evaluation
///
/// Return
/// ------
/// * `Some((elements, a_au))` with elements in meters and radians and the semi-major axis in
///   AU, or `None` for the Moon.
pub fn standish_elements(planet: Planet, epoch: JulianDay) -> Option<(OrbitalElements, f64)> {
    let poly = coefficients(planet)?;
    let tc = (epoch - J2000) / DAYS_PER_JULIAN_CENTURY;
    let eval = |[value, rate]: Term| value + rate * tc;

    let semi_major_axis_au = eval(poly.semi_major_axis);
    let mean_longitude = eval(poly.mean_longitude);
    let perihelion_longitude = eval(poly.perihelion_longitude);
    let node_longitude = eval(poly.node_longitude);

    let elements = OrbitalElements {
        semi_major_axis: semi_major_axis_au * AU,
        eccentricity: eval(poly.eccentricity),
        inclination: degree_to_radian(eval(poly.inclination)),
        periapsis_argument: degree_to_radian(perihelion_longitude - node_longitude),
        ascending_node_longitude: degree_to_radian(node_longitude),
        mean_anomaly: degree_to_radian(signed_remainder(
            mean_longitude - perihelion_longitude,
            360.0,
        )),
        epoch,
    };

    Some((elements, semi_major_axis_au))
}

/// Offline provider evaluating the Standish polynomials around the Sun.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandishEphemeris;

impl PlanetEphemeris for StandishEphemeris {
    fn is_supported(&self, planet: Planet) -> bool {
        coefficients(planet).is_some()
    }

    fn planet_state(&self, planet: Planet, epoch: JulianDay) -> Result<PlanetState, SlfError> {
        let (elements, semi_major_axis_au) = standish_elements(planet, epoch)
            .ok_or_else(|| SlfError::UnsupportedPlanet(planet.to_string()))?;

        Ok(PlanetState {
            state: elements.state_vectors(SUN_MASS),
            semi_major_axis_au,
        })
    }
}
