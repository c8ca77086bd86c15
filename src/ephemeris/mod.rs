//! # Planetary ephemerides
//!
//! The selector re-stamps the Sun and the major planets at the majority epoch of the catalog.
//! Where their states come from is abstracted behind [`PlanetEphemeris`]:
//!
//! * [`standish::StandishEphemeris`] – low-order polynomial elements (value + rate per Julian
//!   century) from *Keplerian Elements for Approximate Positions of the Major Planets*
//!   (E. M. Standish, JPL), turned into states by
//!   [`compute_state_vectors`](crate::state_vector::compute_state_vectors). Offline; no Moon.
//! * [`horizons::HorizonsEphemeris`] – barycentric vectors queried from the JPL Horizons API.
//!
//! Both providers report the semi-major axis in AU alongside the state, since the selector uses
//! Jupiter's as the inner/outer boundary of the minor bodies.
use std::fmt;
use std::str::FromStr;

use crate::body::canonical_key;
use crate::constants::JulianDay;
use crate::slf_errors::SlfError;
use crate::state_vector::StateVector;

pub mod horizons;
pub mod standish;

/// Bodies an ephemeris provider may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    EarthMoonBarycenter,
}

impl Planet {
    /// The eight major planets, in order of distance.
    pub const MAJOR: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    /// Name of the body in the catalog.
    pub fn catalog_name(&self) -> &'static str {
        match self {
            Planet::Mercury => "MERCURY",
            Planet::Venus => "VENUS",
            Planet::Earth => "EARTH",
            Planet::Moon => "MOON",
            Planet::Mars => "MARS",
            Planet::Jupiter => "JUPITER",
            Planet::Saturn => "SATURN",
            Planet::Uranus => "URANUS",
            Planet::Neptune => "NEPTUNE",
            Planet::Pluto => "PLUTO",
            Planet::EarthMoonBarycenter => "EMB",
        }
    }

    /// Absolute magnitude written for the planet, when it overrides the catalog value.
    pub fn absolute_magnitude(&self) -> Option<f64> {
        match self {
            Planet::Venus => Some(-4.4),
            Planet::Earth | Planet::Moon => Some(-3.5),
            Planet::Mars => Some(-1.52),
            Planet::Jupiter | Planet::Saturn => Some(-9.3),
            Planet::Uranus => Some(-7.19),
            Planet::Neptune => Some(-6.87),
            _ => None,
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_name())
    }
}

impl FromStr for Planet {
    type Err = SlfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_key(s).as_str() {
            "MERCURY" => Ok(Planet::Mercury),
            "VENUS" => Ok(Planet::Venus),
            "EARTH" => Ok(Planet::Earth),
            "MOON" => Ok(Planet::Moon),
            "MARS" => Ok(Planet::Mars),
            "JUPITER" => Ok(Planet::Jupiter),
            "SATURN" => Ok(Planet::Saturn),
            "URANUS" => Ok(Planet::Uranus),
            "NEPTUNE" => Ok(Planet::Neptune),
            "PLUTO" => Ok(Planet::Pluto),
            "EMB" => Ok(Planet::EarthMoonBarycenter),
            _ => Err(SlfError::UnsupportedPlanet(s.to_string())),
        }
    }
}

/// State of a planet at an epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetState {
    /// Equatorial position (m) and velocity (m/s).
    pub state: StateVector,
    /// Semi-major axis in AU.
    pub semi_major_axis_au: f64,
}

/// A provider of planetary states.
pub trait PlanetEphemeris {
    /// Whether this provider can serve `planet`.
    fn is_supported(&self, planet: Planet) -> bool;

    /// State of `planet` at the Julian Day `epoch`.
    ///
    /// Return
    /// ------
    /// * the state, or [`SlfError::UnsupportedPlanet`] when [`is_supported`](Self::is_supported)
    ///   is false, or the provider's own failure.
    fn planet_state(&self, planet: Planet, epoch: JulianDay) -> Result<PlanetState, SlfError>;
}
