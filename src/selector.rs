//! # Body selection
//!
//! Turns the merged catalog into the ordered body list written to the SLF file:
//!
//! 1. find the **majority epoch** (the epoch shared by most bodies, first seen wins a tie),
//! 2. re-stamp the Sun (zero state) and the major planets (and the Moon, when the provider
//!    serves it) at that epoch from a [`PlanetEphemeris`],
//! 3. read the two partition thresholds: Pluto's mass and Jupiter's semi-major axis,
//! 4. drop every body whose epoch differs from the majority one by 1e-5 day or more,
//! 5. optionally add synthetic Oort cloud bodies,
//! 6. optionally duplicate the whole system under `…B` names with a position/velocity offset,
//! 7. order the result: bodies at least as heavy as Pluto by semi-major axis, lighter inner
//!    bodies by decreasing mass, lighter outer bodies by semi-major axis, then the massless
//!    bodies interleaved one per dynamical type,
//! 8. truncate to the requested body count.
//!
//! Massless bodies with an uncertainty code of 10 or more are left out.
use std::collections::VecDeque;

use ahash::AHashMap;
use rand::Rng;
use tracing::info;

use crate::body::{Body, Catalog, SystemOffset};
use crate::constants::{degree_to_radian, JulianDay, AU};
use crate::ephemeris::{Planet, PlanetEphemeris};
use crate::orbital_elements::OrbitalElements;
use crate::slf_errors::SlfError;
use crate::state_vector::StateVector;

/// Bodies further than this many days from the majority epoch are dropped.
const EPOCH_TOLERANCE: f64 = 1e-5;

/// Massless bodies need an uncertainty code below this to be kept.
const MAX_UNCERTAINTY: i32 = 10;

/// Oort cloud distances are drawn in `[OORT_MIN, OORT_MAX)` AU.
const OORT_MIN: f64 = 2_000.0;
const OORT_MAX: f64 = 100_000.0;
/// Boundary between the inner and the outer Oort cloud (AU).
const OORT_INNER_LIMIT: f64 = 20_000.0;
const OORT_MAX_ECCENTRICITY: f64 = 0.3;
const OORT_MAGNITUDE: f64 = 25.0;

const SUN: &str = "SUN";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorConfig {
    /// Emit every `NEO` then every `NEO!` body before the interleaved massless bodies.
    pub neo_first: bool,
    /// Duplicate the system with this offset.
    pub duplicate: Option<SystemOffset>,
    /// Keep at most this many bodies; `0` keeps them all.
    pub max_bodies: usize,
    /// Number of synthetic Oort cloud bodies.
    pub num_oort: usize,
}

/// Ordered bodies sharing one epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub epoch: JulianDay,
    pub bodies: Vec<Body>,
}

/// Epoch carried by the largest number of bodies.
///
/// Ties go to the epoch met first in catalog order.
pub fn majority_epoch(catalog: &Catalog) -> Option<JulianDay> {
    let mut counts: Vec<(JulianDay, usize)> = Vec::new();
    let mut slots: AHashMap<u64, usize> = AHashMap::new();

    for body in catalog {
        let epoch = body.elements.epoch;
        let idx = *slots.entry(epoch.to_bits()).or_insert_with(|| {
            counts.push((epoch, 0));
            counts.len() - 1
        });
        counts[idx].1 += 1;
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(JulianDay, usize)>, (epoch, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((epoch, count)),
        })
        .map(|(epoch, _)| epoch)
}

/// Overwrite the state, semi-major axis and epoch of one planet.
fn restamp(
    catalog: &mut Catalog,
    ephemeris: &dyn PlanetEphemeris,
    planet: Planet,
    epoch: JulianDay,
) -> Result<(), SlfError> {
    let name = planet.catalog_name();
    let body = catalog
        .get_mut(name)
        .ok_or_else(|| SlfError::MissingBody(name.to_string()))?;
    let planet_state = ephemeris.planet_state(planet, epoch)?;

    body.state = Some(planet_state.state);
    body.elements.semi_major_axis = planet_state.semi_major_axis_au * AU;
    body.elements.epoch = epoch;
    if let Some(magnitude) = planet.absolute_magnitude() {
        body.absolute_magnitude = magnitude;
    }
    Ok(())
}

/// Re-stamp the Sun and the planets at `epoch`.
fn restamp_solar_system(
    catalog: &mut Catalog,
    ephemeris: &dyn PlanetEphemeris,
    epoch: JulianDay,
) -> Result<(), SlfError> {
    let sun = catalog
        .get_mut(SUN)
        .ok_or_else(|| SlfError::MissingBody(SUN.to_string()))?;
    sun.state = Some(StateVector::zero());
    sun.elements.epoch = epoch;

    for planet in Planet::MAJOR {
        if ephemeris.is_supported(planet) {
            restamp(catalog, ephemeris, planet, epoch)?;
        }
    }

    if ephemeris.is_supported(Planet::Moon) && catalog.contains(Planet::Moon.catalog_name()) {
        restamp(catalog, ephemeris, Planet::Moon, epoch)?;
    }
    Ok(())
}

/// Draw `count` Oort cloud bodies at `epoch`.
///
/// Each body draws, in order: distance (AU), mean anomaly, eccentricity, inclination,
/// argument of perihelion and ascending node. The inclination spread grows linearly from ±30°
/// inside 20 000 AU to ±90° at 100 000 AU.
pub fn oort_bodies(count: usize, epoch: JulianDay, rng: &mut impl Rng) -> Vec<Body> {
    (0..count)
        .map(|n| {
            if n % 100 == 0 {
                info!("Oort Cloud {n}");
            }

            let distance = rng.random::<f64>() * (OORT_MAX - OORT_MIN) + OORT_MIN;
            let max_inclination = if distance < OORT_INNER_LIMIT {
                60.0
            } else {
                (distance - OORT_INNER_LIMIT) * (180.0 - 60.0) / (OORT_MAX - OORT_INNER_LIMIT)
                    + 60.0
            };
            let body_type = if distance < OORT_INNER_LIMIT {
                "InnerOort"
            } else {
                "OuterOort"
            };

            let mean_anomaly = degree_to_radian(rng.random::<f64>() * 360.0);
            let eccentricity = rng.random::<f64>() * OORT_MAX_ECCENTRICITY;
            let inclination =
                degree_to_radian(rng.random::<f64>() * max_inclination - max_inclination / 2.0);
            let periapsis_argument = degree_to_radian(rng.random::<f64>() * 360.0);
            let ascending_node_longitude = degree_to_radian(rng.random::<f64>() * 360.0);

            Body {
                absolute_magnitude: OORT_MAGNITUDE,
                elements: OrbitalElements {
                    semi_major_axis: AU * distance,
                    eccentricity,
                    inclination,
                    periapsis_argument,
                    ascending_node_longitude,
                    mean_anomaly,
                    epoch,
                },
                body_type: body_type.to_string(),
                ..Body::named(format!("{body_type}{n}"))
            }
        })
        .collect()
}

/// Add a `…B` copy of every body, carrying `offset`.
fn duplicate_system(catalog: &mut Catalog, offset: SystemOffset) -> Result<(), SlfError> {
    let copies: Vec<Body> = catalog
        .iter()
        .map(|body| Body {
            name: format!("{}B", body.name),
            offset,
            ..body.clone()
        })
        .collect();

    for copy in copies {
        let name = copy.name.clone();
        if !catalog.insert(copy) {
            return Err(SlfError::DuplicateBody(name));
        }
    }
    Ok(())
}

/// Interleave massless bodies one per dynamical type.
///
/// Bodies are queued per type in arrival order, queues in order of first appearance. With
/// `neo_first`, the whole `NEO` then `NEO!` queues are emitted before the round-robin.
fn interleave_by_type(massless: Vec<Body>, neo_first: bool) -> Vec<Body> {
    let total = massless.len();
    let mut queues: Vec<(String, VecDeque<Body>)> = Vec::new();
    let mut slots: AHashMap<String, usize> = AHashMap::new();

    for body in massless {
        let idx = *slots.entry(body.body_type.clone()).or_insert_with(|| {
            queues.push((body.body_type.clone(), VecDeque::new()));
            queues.len() - 1
        });
        queues[idx].1.push_back(body);
    }

    info!("{} types", queues.len());
    for (body_type, queue) in &queues {
        info!("{body_type:>32} : {}", queue.len());
    }

    let mut mixed = Vec::with_capacity(total);
    if neo_first {
        info!("Adding asteroids of type NEO and NEO! first");
        for body_type in ["NEO", "NEO!"] {
            if let Some(&idx) = slots.get(body_type) {
                mixed.extend(queues[idx].1.drain(..));
            }
        }
    }

    while mixed.len() < total {
        for (_, queue) in queues.iter_mut() {
            if let Some(body) = queue.pop_front() {
                mixed.push(body);
            }
        }
    }
    mixed
}

/// Split and order the bodies around the two thresholds.
fn order_bodies(
    bodies: Vec<Body>,
    pluto_mass: f64,
    jupiter_semi_major_axis: f64,
    neo_first: bool,
) -> Vec<Body> {
    let mut massed = Vec::new();
    let mut inner = Vec::new();
    let mut outer = Vec::new();
    let mut massless = Vec::new();

    for body in bodies {
        if body.mass >= pluto_mass {
            massed.push(body);
        } else if body.mass > 0.0 {
            if body.elements.semi_major_axis < jupiter_semi_major_axis {
                inner.push(body);
            } else {
                outer.push(body);
            }
        } else if body.mass == 0.0 && body.uncertainty < MAX_UNCERTAINTY {
            massless.push(body);
        }
    }

    let by_semi_major_axis =
        |a: &Body, b: &Body| a.elements.semi_major_axis.total_cmp(&b.elements.semi_major_axis);
    massed.sort_by(by_semi_major_axis);
    inner.sort_by(|a, b| b.mass.total_cmp(&a.mass));
    outer.sort_by(by_semi_major_axis);

    let mut ordered = massed;
    ordered.append(&mut inner);
    ordered.append(&mut outer);
    info!("{} bodies with mass", ordered.len());

    info!("Indexing {} bodies without mass by type", massless.len());
    ordered.extend(interleave_by_type(massless, neo_first));
    ordered
}

/// Select and order the bodies of the SLF file.
///
/// Arguments
/// ---------
/// * `catalog`: the merged catalog (details file + orbit catalog)
/// * `ephemeris`: provider of the planetary states
/// * `config`: selection options
/// * `rng`: random source of the Oort cloud bodies
///
/// Return
/// ------
/// * the majority epoch and the ordered bodies, or
///   [`SlfError::EmptyCatalog`], [`SlfError::MissingBody`] when the Sun, a supported planet or
///   Pluto is absent, [`SlfError::DuplicateBody`] when a duplicated name is taken, or the
///   ephemeris failure.
pub fn select(
    mut catalog: Catalog,
    ephemeris: &dyn PlanetEphemeris,
    config: &SelectorConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SlfError> {
    let epoch = majority_epoch(&catalog).ok_or(SlfError::EmptyCatalog)?;
    info!("Using epoch {epoch}");

    restamp_solar_system(&mut catalog, ephemeris, epoch)?;

    let pluto = Planet::Pluto.catalog_name();
    let pluto_mass = catalog
        .get(pluto)
        .ok_or_else(|| SlfError::MissingBody(pluto.to_string()))?
        .mass;
    let jupiter = Planet::Jupiter.catalog_name();
    let jupiter_semi_major_axis = catalog
        .get(jupiter)
        .ok_or_else(|| SlfError::MissingBody(jupiter.to_string()))?
        .elements
        .semi_major_axis;

    catalog.retain(|body| (body.elements.epoch - epoch).abs() < EPOCH_TOLERANCE);
    info!("{} bodies at epoch {epoch}", catalog.len());

    for body in oort_bodies(config.num_oort, epoch, rng) {
        let name = body.name.clone();
        if !catalog.insert(body) {
            return Err(SlfError::DuplicateBody(name));
        }
    }

    if let Some(offset) = config.duplicate {
        info!("Adding duplicate star system");
        duplicate_system(&mut catalog, offset)?;
    }

    info!("Creating list of bodies");
    let mut bodies = order_bodies(
        catalog.into_bodies(),
        pluto_mass,
        jupiter_semi_major_axis,
        config.neo_first,
    );
    if config.max_bodies > 0 {
        bodies.truncate(config.max_bodies);
    }

    Ok(Selection { epoch, bodies })
}
