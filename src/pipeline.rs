//! # Conversion run
//!
//! [`run`] wires the stages of a conversion together: details file, orbit catalog, body
//! selection, SLF file. Nothing is written until the selection succeeded.
use std::fs::File;

use rand::Rng;
use tracing::info;

use crate::catalog::source::CatalogSource;
use crate::catalog::{read_catalog, read_details};
use crate::config::SlfConfig;
use crate::ephemeris::PlanetEphemeris;
use crate::selector::select;
use crate::slf_errors::SlfError;
use crate::slf_writer::write_slf_file;

/// Convert a catalog into an SLF file.
///
/// Arguments
/// ---------
/// * `config`: paths and selection options
/// * `ephemeris`: provider of the planetary states
/// * `source`: where the orbit catalog is read from
/// * `rng`: random source of the Oort cloud bodies
///
/// Return
/// ------
/// * the number of bodies written to `config.output_path`
pub fn run(
    config: &SlfConfig,
    ephemeris: &dyn PlanetEphemeris,
    source: &dyn CatalogSource,
    rng: &mut impl Rng,
) -> Result<usize, SlfError> {
    info!("Starting Process");

    let details = File::open(&config.details_path)?;
    let mut catalog = read_details(details)?;

    info!("Fetching data from {}", source.location());
    read_catalog(config.catalog_format, source.open()?, &mut catalog)?;
    info!("{} bodies in the merged catalog", catalog.len());

    let selection = select(catalog, ephemeris, &config.selector_config(), rng)?;
    let count = write_slf_file(&config.output_path, selection.epoch, &selection.bodies)?;

    info!("Finished Processing");
    Ok(count)
}
