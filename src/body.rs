//! # Bodies and the merged catalog
//!
//! A [`Body`] gathers everything the SLF writer needs about one object: identity, physical
//! parameters, orbital elements, an optional precomputed [`StateVector`], the dynamical type
//! tag and the catalog uncertainty code.
//!
//! The [`Catalog`] maps a **canonical key** (see [`canonical_key`]) to a body and keeps the
//! insertion order, which drives both the majority-epoch tie break and the order of the
//! per-type queues in the selector.
//!
//! ## Mutability rules
//!
//! * Bodies seeded from the details file carry `read_in = true`; catalog lines only ever update
//!   their orbital fields through [`Body::merge_orbit`], never the physical ones.
//! * Synthetic bodies (Oort cloud, duplicated system) are created by the selector and not
//!   touched again.
use ahash::AHashMap;
use nalgebra::Vector3;

use crate::constants::{Kilogram, Meter};
use crate::orbital_elements::OrbitalElements;
use crate::state_vector::StateVector;

/// Canonical catalog key: whitespace removed, upper-cased.
///
/// Every insertion and lookup goes through this function, so `"Ceres"`, `" CERES "` and
/// `"ce res"` all address the same body.
pub fn canonical_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Spatial (Gm) and velocity (km/s) offsets subtracted from a body's serialized state.
///
/// Only bodies of a duplicated star system carry a non-zero offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemOffset {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Orbital fields read from one catalog line.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOrbit {
    pub elements: OrbitalElements,
    pub absolute_magnitude: f64,
    /// Dynamical type and uncertainty code, only provided by the columnar catalog.
    pub classification: Option<(String, i32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub mass: Kilogram,
    pub radius: Meter,
    pub density: f64,
    pub absolute_magnitude: f64,
    pub elements: OrbitalElements,
    pub state: Option<StateVector>,
    pub body_type: String,
    pub uncertainty: i32,
    pub read_in: bool,
    pub offset: SystemOffset,
}

impl Body {
    /// An empty body carrying only its name.
    pub fn named(name: impl Into<String>) -> Self {
        Body {
            name: name.into(),
            mass: 0.0,
            radius: 0.0,
            density: 0.0,
            absolute_magnitude: 0.0,
            elements: OrbitalElements::default(),
            state: None,
            body_type: String::new(),
            uncertainty: 0,
            read_in: false,
            offset: SystemOffset::default(),
        }
    }

    /// A massless body first seen in an orbit catalog.
    pub fn from_catalog(name: impl Into<String>, orbit: CatalogOrbit) -> Self {
        let mut body = Body {
            radius: 0.1,
            ..Body::named(name)
        };
        body.merge_orbit(orbit);
        body
    }

    /// Catalog key of this body.
    pub fn key(&self) -> String {
        canonical_key(&self.name)
    }

    /// Overwrite the orbital fields with those of a catalog line.
    ///
    /// Mass, radius, density and `read_in` are left untouched.
    pub fn merge_orbit(&mut self, orbit: CatalogOrbit) {
        self.elements = orbit.elements;
        self.absolute_magnitude = orbit.absolute_magnitude;
        if let Some((body_type, uncertainty)) = orbit.classification {
            self.body_type = body_type;
            self.uncertainty = uncertainty;
        }
    }

    /// Name written after the `#` of an SLF body line: `name-uncertainty[-[type]]`.
    pub fn slf_name(&self) -> String {
        if self.body_type.is_empty() {
            format!("{}-{}", self.name, self.uncertainty)
        } else {
            format!("{}-{}-[{}]", self.name, self.uncertainty, self.body_type)
        }
    }
}

/// Insertion-ordered map from canonical key to [`Body`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: AHashMap<String, usize>,
    bodies: Vec<Body>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Catalog {
            index: AHashMap::with_capacity(capacity),
            bodies: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&canonical_key(name))
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.index
            .get(&canonical_key(name))
            .map(|&idx| &self.bodies[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.index
            .get(&canonical_key(name))
            .map(|&idx| &mut self.bodies[idx])
    }

    /// Insert a body under its canonical key.
    ///
    /// Return
    /// ------
    /// * `false` if the key was already taken; the catalog is unchanged in that case.
    pub fn insert(&mut self, body: Body) -> bool {
        let key = body.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.bodies.len());
        self.bodies.push(body);
        true
    }

    /// Keep only the bodies matching `keep`, preserving order.
    pub fn retain(&mut self, keep: impl FnMut(&Body) -> bool) {
        self.bodies.retain(keep);
        self.index = self
            .bodies
            .iter()
            .enumerate()
            .map(|(idx, body)| (body.key(), idx))
            .collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
