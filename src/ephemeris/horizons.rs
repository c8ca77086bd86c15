//! # JPL Horizons provider
//!
//! Queries the Horizons API for the barycentric (`CENTER='500@0'`) state of a planet at one
//! Julian Day, in the ICRF equatorial frame (`REF_PLANE='F'`), and parses the vector table:
//!
//! ```text
//! $$SOE
//! 2460800.500000000 = A.D. 2025-May-05 00:00:00.0000 TDB
//!  X =-1.050585298853717E+08 Y = 9.892389938036093E+07 Z = 4.286883002212018E+07
//!  VX=-2.220618613003006E+01 VY=-1.953225012286106E+01 VZ=-8.466787007993446E+00
//! $$EOE
//! ```
//!
//! Horizons answers in km and km/s. The semi-major axis is not part of the table and is taken
//! from the Standish polynomials (the Earth's for the Moon).
use nom::{
    bytes::complete::tag,
    character::complete::{char, space0},
    number::complete::double,
    sequence::preceded,
    IResult, Parser,
};
use nalgebra::Vector3;
use tracing::debug;

use super::standish::standish_elements;
use super::{Planet, PlanetEphemeris, PlanetState};
use crate::constants::{JulianDay, KM_PER_S};
use crate::env_state::SlfEnv;
use crate::slf_errors::SlfError;
use crate::state_vector::StateVector;

/// Default endpoint of the Horizons API.
pub const HORIZONS_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// Kilometers to meters, also km/s to m/s.
const KM: f64 = KM_PER_S;

/// Horizons `COMMAND` code of a body.
pub fn horizons_command(planet: Planet) -> &'static str {
    match planet {
        Planet::Mercury => "199",
        Planet::Venus => "299",
        Planet::Earth => "399",
        Planet::EarthMoonBarycenter => "3",
        Planet::Moon => "301",
        Planet::Mars => "499",
        Planet::Jupiter => "599",
        Planet::Saturn => "699",
        Planet::Uranus => "799",
        Planet::Neptune => "899",
        Planet::Pluto => "999",
    }
}

/// Build the vector-table query of `planet` at `epoch`.
pub fn horizons_query(base_url: &str, planet: Planet, epoch: JulianDay) -> String {
    format!(
        "{base_url}?format=text&COMMAND='{}'&OBJ_DATA='NO'&MAKE_EPHEM='YES'&EPHEM_TYPE='VECTOR'\
         &CENTER='500@0'&VEC_TABLE='2'&TLIST='{epoch}'&TLIST_TYPE='JD'&REF_PLANE='F'",
        horizons_command(planet)
    )
}

/// `<label> = <value>`, blanks allowed around the label and the sign.
fn labelled<'a>(label: &'static str) -> impl Parser<&'a str, Output = f64, Error = nom::error::Error<&'a str>> {
    preceded((space0, tag(label), space0, char('='), space0), double)
}

fn vector_line<'a>(
    labels: [&'static str; 3],
) -> impl Parser<&'a str, Output = Vector3<f64>, Error = nom::error::Error<&'a str>> {
    (labelled(labels[0]), labelled(labels[1]), labelled(labels[2]))
        .map(|(x, y, z)| Vector3::new(x, y, z))
}

fn position_line(input: &str) -> IResult<&str, Vector3<f64>> {
    vector_line(["X", "Y", "Z"]).parse(input)
}

fn velocity_line(input: &str) -> IResult<&str, Vector3<f64>> {
    vector_line(["VX", "VY", "VZ"]).parse(input)
}

/// Extract the state from a Horizons text answer.
///
/// Only the lines between `$$SOE` and `$$EOE` are read; the last position and velocity lines
/// found there win.
///
/// Return
/// ------
/// * the state in m and m/s, or [`SlfError::HorizonsResponse`] if either vector is missing
pub fn parse_horizons_vectors(text: &str) -> Result<StateVector, SlfError> {
    let mut in_table = false;
    let mut position = None;
    let mut velocity = None;

    for line in text.lines() {
        if line.starts_with("$$SOE") {
            in_table = true;
            continue;
        }
        if line.starts_with("$$EOE") {
            in_table = false;
            continue;
        }
        if !in_table || line.trim().is_empty() {
            continue;
        }

        if let Ok((_, v)) = velocity_line(line) {
            velocity = Some(v);
        } else if let Ok((_, p)) = position_line(line) {
            position = Some(p);
        }
    }

    match (position, velocity) {
        (Some(p), Some(v)) => Ok(StateVector::new(p * KM, v * KM)),
        _ => Err(SlfError::HorizonsResponse(
            text.lines().take(5).collect::<Vec<_>>().join(" | "),
        )),
    }
}

/// Remote provider backed by the Horizons API.
#[derive(Debug, Clone)]
pub struct HorizonsEphemeris<'a> {
    env: &'a SlfEnv,
    url: String,
}

impl<'a> HorizonsEphemeris<'a> {
    pub fn new(env: &'a SlfEnv, url: impl Into<String>) -> Self {
        HorizonsEphemeris {
            env,
            url: url.into(),
        }
    }
}

impl PlanetEphemeris for HorizonsEphemeris<'_> {
    fn is_supported(&self, _planet: Planet) -> bool {
        true
    }

    fn planet_state(&self, planet: Planet, epoch: JulianDay) -> Result<PlanetState, SlfError> {
        let query = horizons_query(&self.url, planet, epoch);
        debug!("Horizons query: {query}");
        let answer = self.env.get_from_url(query.as_str())?;
        let state = parse_horizons_vectors(&answer)?;

        let reference = match planet {
            Planet::Moon => Planet::Earth,
            other => other,
        };
        let semi_major_axis_au = standish_elements(reference, epoch)
            .map(|(_, a_au)| a_au)
            .ok_or_else(|| SlfError::UnsupportedPlanet(planet.to_string()))?;

        Ok(PlanetState {
            state,
            semi_major_axis_au,
        })
    }
}

#[cfg(test)]
mod horizons_test {
    use super::*;
    use approx::assert_relative_eq;

    const ANSWER: &str = "\
API VERSION: 1.2
*******************************************************************************
Ephemeris / API_USER Mon May  5 00:00:00 2025 Pasadena, USA      / Horizons
*******************************************************************************
$$SOE
2460800.500000000 = A.D. 2025-May-05 00:00:00.0000 TDB
 X =-1.050585298853717E+08 Y = 9.892389938036093E+07 Z = 4.286883002212018E+07
 VX=-2.220618613003006E+01 VY=-1.953225012286106E+01 VZ=-8.466787007993446E+00
$$EOE
*******************************************************************************
";

    #[test]
    fn test_parse_vectors() {
        let state = parse_horizons_vectors(ANSWER).unwrap();
        assert_relative_eq!(state.position.x, -1.050585298853717E+11);
        assert_relative_eq!(state.position.y, 9.892389938036093E+10);
        assert_relative_eq!(state.position.z, 4.286883002212018E+10);
        assert_relative_eq!(state.velocity.x, -2.220618613003006E+04);
        assert_relative_eq!(state.velocity.z, -8.466787007993446E+03);
    }

    #[test]
    fn test_parse_error_answer() {
        let answer = "API VERSION: 1.2\nCannot interpret date. Type \"?!\" for help.\n";
        assert!(matches!(
            parse_horizons_vectors(answer),
            Err(SlfError::HorizonsResponse(_))
        ));
    }

    #[test]
    fn test_vectors_outside_table_are_ignored() {
        let answer = " X = 1.0E+00 Y = 2.0E+00 Z = 3.0E+00\n VX= 1.0E+00 VY= 2.0E+00 VZ= 3.0E+00\n";
        assert!(parse_horizons_vectors(answer).is_err());
    }

    #[test]
    fn test_query() {
        let query = horizons_query(HORIZONS_URL, Planet::Moon, 2460800.5);
        assert_eq!(
            query,
            "https://ssd.jpl.nasa.gov/api/horizons.api?format=text&COMMAND='301'&OBJ_DATA='NO'\
             &MAKE_EPHEM='YES'&EPHEM_TYPE='VECTOR'&CENTER='500@0'&VEC_TABLE='2'\
             &TLIST='2460800.5'&TLIST_TYPE='JD'&REF_PLANE='F'"
        );
        assert_eq!(horizons_command(Planet::EarthMoonBarycenter), "3");
    }
}
