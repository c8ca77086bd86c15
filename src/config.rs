//! # Run configuration
//!
//! [`SlfConfig`] gathers every option of a conversion run. Each field has a default, so a TOML
//! file only needs the keys it changes:
//!
//! ```toml
//! catalog_format = "astorb"
//! neo_first = true
//! max_bodies = 20000
//! num_oort = 500
//! add_duplicate = true
//!
//! [offsets]
//! x = 1000.0   # Gm
//! vy = 5.0     # km/s
//! ```
//!
//! The command line overrides the values read here.
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use nalgebra::Vector3;
use serde::Deserialize;

use crate::body::SystemOffset;
use crate::catalog::CatalogFormat;
use crate::ephemeris::horizons::HORIZONS_URL;
use crate::selector::SelectorConfig;
use crate::slf_errors::SlfError;

/// Default location of the columnar MPC orbit database.
pub const MPCORB_URL: &str = "https://minorplanetcenter.net/iau/MPCORB/MPCORB.DAT";

/// Default location of the packed asteroid orbital database.
pub const ASTORB_URL: &str = "https://ftp.lowell.edu/pub/elgb/astorb.dat";

/// Offsets of the duplicated system: positions in Gm, velocities in km/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OffsetConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl From<OffsetConfig> for SystemOffset {
    fn from(offsets: OffsetConfig) -> Self {
        SystemOffset {
            position: Vector3::new(offsets.x, offsets.y, offsets.z),
            velocity: Vector3::new(offsets.vx, offsets.vy, offsets.vz),
        }
    }
}

/// Source of the planetary states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisKind {
    /// Offline polynomial elements.
    #[default]
    Standish,
    /// JPL Horizons API.
    Horizons,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlfConfig {
    pub neo_first: bool,
    pub add_duplicate: bool,
    pub offsets: OffsetConfig,
    /// `0` keeps every body.
    pub max_bodies: usize,
    pub num_oort: usize,
    pub details_path: Utf8PathBuf,
    pub output_path: Utf8PathBuf,
    pub catalog_format: CatalogFormat,
    /// URL or path of the orbit catalog; the format's public URL when absent.
    pub catalog_source: Option<String>,
    pub ephemeris: EphemerisKind,
    pub horizons_url: String,
}

impl Default for SlfConfig {
    fn default() -> Self {
        SlfConfig {
            neo_first: false,
            add_duplicate: false,
            offsets: OffsetConfig::default(),
            max_bodies: 0,
            num_oort: 0,
            details_path: Utf8PathBuf::from("PlanetInfo.csv"),
            output_path: Utf8PathBuf::from("out.slf"),
            catalog_format: CatalogFormat::default(),
            catalog_source: None,
            ephemeris: EphemerisKind::default(),
            horizons_url: HORIZONS_URL.to_string(),
        }
    }
}

impl SlfConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SlfError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: &Utf8Path) -> Result<Self, SlfError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Location of the orbit catalog.
    pub fn catalog_location(&self) -> &str {
        match (&self.catalog_source, self.catalog_format) {
            (Some(location), _) => location,
            (None, CatalogFormat::Mpcorb) => MPCORB_URL,
            (None, CatalogFormat::Astorb) => ASTORB_URL,
        }
    }

    /// Options of the body selection.
    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            neo_first: self.neo_first,
            duplicate: self.add_duplicate.then(|| self.offsets.into()),
            max_bodies: self.max_bodies,
            num_oort: self.num_oort,
        }
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SlfConfig::from_toml_str("").unwrap();
        assert_eq!(config, SlfConfig::default());
        assert_eq!(config.catalog_location(), MPCORB_URL);
        assert_eq!(config.selector_config(), SelectorConfig::default());
        assert_eq!(config.horizons_url, HORIZONS_URL);
    }

    #[test]
    fn test_from_toml() {
        let config = SlfConfig::from_toml_str(
            r#"
            catalog_format = "astorb"
            ephemeris = "horizons"
            neo_first = true
            max_bodies = 20000
            num_oort = 500
            add_duplicate = true
            output_path = "twin.slf"

            [offsets]
            x = 1000.0
            vy = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog_format, CatalogFormat::Astorb);
        assert_eq!(config.ephemeris, EphemerisKind::Horizons);
        assert_eq!(config.catalog_location(), ASTORB_URL);
        assert_eq!(config.output_path, "twin.slf");
        assert_eq!(config.details_path, "PlanetInfo.csv");

        let selector = config.selector_config();
        assert!(selector.neo_first);
        assert_eq!(selector.max_bodies, 20000);
        assert_eq!(selector.num_oort, 500);
        assert_eq!(
            selector.duplicate,
            Some(SystemOffset {
                position: Vector3::new(1000.0, 0.0, 0.0),
                velocity: Vector3::new(0.0, 5.0, 0.0),
            })
        );
    }

    #[test]
    fn test_offsets_ignored_without_duplicate() {
        let config = SlfConfig::from_toml_str("[offsets]\nx = 3.0\n").unwrap();
        assert_eq!(config.selector_config().duplicate, None);
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            SlfConfig::from_toml_str("neofirst = true"),
            Err(SlfError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_source() {
        let config = SlfConfig::from_toml_str("catalog_source = \"data/MPCORB.DAT\"").unwrap();
        assert_eq!(config.catalog_location(), "data/MPCORB.DAT");
    }
}
