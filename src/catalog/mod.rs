//! # Orbit catalogs
//!
//! Readers that fill a [`Catalog`] from the three text inputs of a conversion run:
//!
//! * [`read_details`] – comma-separated physical parameters (name, radius, density, mass) that
//!   seed the catalog with `read_in = true` bodies,
//! * [`mpcorb`] – the **columnar** MPC orbit database format (packed epochs, type flags),
//! * [`astorb`] – the **packed** asteroid orbital database format (`YYYYMMDD` epochs).
//!
//! Both orbit formats are fixed-width: fields are sliced at 1-based inclusive column ranges with
//! [`column`], required numeric fields fail the whole run through
//! [`ParseCatalogError::InvalidField`], optional ones fall back to a default value.
//!
//! ## Merge semantics
//!
//! Catalog lines only update the orbital part of an existing body (see
//! [`Body::merge_orbit`](crate::body::Body::merge_orbit)); the columnar reader additionally
//! discards repeated designations of bodies it created itself, while the packed reader always
//! overwrites.
use std::io::{BufRead, Read};

use serde::Deserialize;
use tracing::info;

use crate::body::{canonical_key, Body, Catalog};
use crate::slf_errors::{ParseCatalogError, SlfError};

pub mod astorb;
pub mod mpcorb;
pub mod source;

/// Progress is logged every this many catalog lines.
pub(crate) const PROGRESS_LINES: u64 = 100_000;

/// Header rows carry this literal in their name column.
const HEADER_NAME: &str = "NAME";

/// Layout of an orbit catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// MPC orbit database (`MPCORB.DAT`), columnar layout.
    #[default]
    Mpcorb,
    /// Lowell asteroid orbital database (`astorb.dat`), packed layout.
    Astorb,
}

/// Merge every line of an orbit catalog into `catalog`.
///
/// Arguments
/// ---------
/// * `format`: layout of the catalog text
/// * `reader`: the catalog text
/// * `catalog`: the catalog to update, usually seeded by [`read_details`]
///
/// Return
/// ------
/// * the number of catalog lines merged, or the first fatal parse error
pub fn read_catalog<R: BufRead>(
    format: CatalogFormat,
    reader: R,
    catalog: &mut Catalog,
) -> Result<usize, SlfError> {
    match format {
        CatalogFormat::Mpcorb => mpcorb::read_mpcorb(reader, catalog),
        CatalogFormat::Astorb => astorb::read_astorb(reader, catalog),
    }
}

/// Read the details file into a fresh catalog.
///
/// Each row is `id,name,radius,type,density,mass`; the first and fourth columns are ignored,
/// unparseable numbers default to `0`. The header row (name `NAME`) and rows without a name
/// are skipped. Every body read here is flagged `read_in`.
///
/// Return
/// ------
/// * the seeded catalog, or [`SlfError::DuplicateBody`] when two rows share a name
pub fn read_details<R: Read>(reader: R) -> Result<Catalog, SlfError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut catalog = Catalog::new();
    for record in csv_reader.records() {
        let record = record?;
        let name = record.get(1).unwrap_or_default();
        if name.is_empty() || canonical_key(name) == HEADER_NAME {
            continue;
        }

        let number = |idx: usize| {
            record
                .get(idx)
                .and_then(|raw| raw.parse::<f64>().ok())
                .unwrap_or(0.0)
        };

        let body = Body {
            radius: number(2),
            density: number(4),
            mass: number(5),
            read_in: true,
            ..Body::named(name)
        };

        if !catalog.insert(body) {
            return Err(SlfError::DuplicateBody(name.to_string()));
        }
    }

    info!("Read {} bodies from the details file", catalog.len());
    Ok(catalog)
}

/// Byte offset of the `chars`-th character of `line`, clamped to its length.
fn byte_offset(line: &str, chars: usize) -> usize {
    if line.is_ascii() {
        chars.min(line.len())
    } else {
        line.char_indices()
            .nth(chars)
            .map_or(line.len(), |(offset, _)| offset)
    }
}

/// Fixed-width field between the 1-based inclusive columns `first` and `last`.
///
/// Columns past the end of the line yield a shorter (possibly empty) slice instead of failing,
/// so a truncated line surfaces as a parse error on the first required field it misses.
pub(crate) fn column(line: &str, first: usize, last: usize) -> &str {
    let start = byte_offset(line, first.saturating_sub(1));
    let end = byte_offset(line, last).max(start);
    &line[start..end]
}

/// Parse a required numeric field.
pub(crate) fn required_f64(
    line: &str,
    (first, last): (usize, usize),
    field: &'static str,
    line_no: u64,
) -> Result<f64, ParseCatalogError> {
    let raw = column(line, first, last);
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ParseCatalogError::InvalidField {
            field,
            raw: raw.to_string(),
            line: line_no,
        })
}

/// Parse an optional numeric field, falling back to `default`.
pub(crate) fn f64_or(line: &str, (first, last): (usize, usize), default: f64) -> f64 {
    column(line, first, last)
        .trim()
        .parse::<f64>()
        .unwrap_or(default)
}

/// Readable designation: whitespace stripped.
pub(crate) fn designation(line: &str, first: usize, last: usize) -> String {
    column(line, first, last)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Whether a designation is the literal header marker.
pub(crate) fn is_header(designation: &str) -> bool {
    canonical_key(designation) == HEADER_NAME
}
