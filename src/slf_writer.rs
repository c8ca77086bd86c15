//! # SLF writer
//!
//! Serializes a [`Selection`](crate::selector::Selection) in the SLF text format read by the
//! N-body simulators:
//!
//! ```text
//!  2460800.5
//!  3 1988947.29428839 0 0 0# SUN-0
//!  0.0000000000000000E+00  0.0000000000000000E+00  0.0000000000000000E+00
//!  0.0000000000000000E+00  0.0000000000000000E+00  0.0000000000000000E+00
//!  0 1E-07 19.09 -9.68…E-08# 2004MN4-0-[NEO!]
//! …
//! ```
//!
//! The header is the epoch line followed by ` 3` **without** a line break, so the first body
//! line shares the second line. Each body then takes three lines:
//!
//! * ` mass radius magnitude relativistic# name-uncertainty[-[type]]`, mass in 10²⁴ kg, radius
//!   in 10⁶ m, numbers in [`format_general`],
//! * the position in Gm minus the body offset,
//! * the velocity in km/s minus the body offset,
//!
//! both vectors in [`format_scientific`], right-aligned on 23 columns.
use std::fs::File;
use std::io::{BufWriter, Write};

use camino::Utf8Path;
use itertools::Itertools;
use nalgebra::Vector3;
use tracing::info;

use crate::body::Body;
use crate::constants::{
    JulianDay, GM, GRAVITATIONAL_CONSTANT, KM_PER_S, SLF_MASS_UNIT, SLF_RADIUS_UNIT,
    SPEED_OF_LIGHT, SUN_MASS,
};
use crate::slf_errors::SlfError;
use crate::state_vector::StateVector;

/// Width of one vector component.
const COMPONENT_WIDTH: usize = 23;

/// Split Rust's `{:e}` rendering into mantissa and decimal exponent.
fn split_exponent(rendered: &str) -> (&str, i32) {
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (rendered, 0),
    }
}

fn with_exponent(mantissa: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.abs())
}

/// Shortest round-trip rendering of `value`, switching to `E±XX` notation when the decimal
/// exponent is below −4 or above 14.
///
/// `20.0` → `20`, `6.371` → `6.371`, `1e-7` → `1E-07`, `1.98894729428839e30` →
/// `1.98894729428839E+30`.
pub fn format_general(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let rendered = format!("{value:e}");
    let (mantissa, exponent) = split_exponent(&rendered);
    if (-4..15).contains(&exponent) {
        format!("{value}")
    } else {
        with_exponent(mantissa, exponent)
    }
}

/// Scientific rendering with 16 fractional digits and a signed exponent of at least two
/// digits: `-1.4950000000000000E+02`.
pub fn format_scientific(value: f64) -> String {
    let rendered = format!("{value:.16e}");
    let (mantissa, exponent) = split_exponent(&rendered);
    with_exponent(mantissa, exponent)
}

fn vector_line(v: &Vector3<f64>) -> String {
    v.iter()
        .map(|c| format!("{:>width$}", format_scientific(*c), width = COMPONENT_WIDTH))
        .join(" ")
}

/// Relativistic parameter of a body: `−9·G·M☉ / (c²·a)`, or `0` for `a ≤ 0`.
pub fn relativistic_parameter(semi_major_axis: f64) -> f64 {
    if semi_major_axis > 0.0 {
        -9.0 * GRAVITATIONAL_CONSTANT * SUN_MASS
            / (SPEED_OF_LIGHT * SPEED_OF_LIGHT * semi_major_axis)
    } else {
        0.0
    }
}

/// State written for a body: the precomputed one, else the Keplerian one around the Sun.
///
/// Bodies with neither a state nor a semi-major axis are not written.
fn body_state(body: &Body) -> Option<StateVector> {
    if let Some(state) = body.state {
        return Some(state);
    }
    if body.elements.semi_major_axis != 0.0 {
        return Some(body.elements.state_vectors(SUN_MASS + body.mass));
    }
    None
}

/// Write an SLF document.
///
/// Arguments
/// ---------
/// * `out`: destination
/// * `epoch`: common epoch of the bodies (Julian Day)
/// * `bodies`: bodies in output order
///
/// Return
/// ------
/// * the number of bodies written
pub fn write_slf<W: Write>(mut out: W, epoch: JulianDay, bodies: &[Body]) -> Result<usize, SlfError> {
    write!(out, " {}\n 3", format_general(epoch))?;

    let mut count = 0;
    let mut max_name_len = 0;
    for body in bodies {
        let Some(state) = body_state(body) else {
            continue;
        };

        let name = body.slf_name();
        max_name_len = max_name_len.max(name.chars().count());

        writeln!(
            out,
            " {} {} {} {}# {}",
            format_general(body.mass / SLF_MASS_UNIT),
            format_general(body.radius / SLF_RADIUS_UNIT),
            format_general(body.absolute_magnitude),
            format_general(relativistic_parameter(body.elements.semi_major_axis)),
            name
        )?;
        writeln!(out, "{}", vector_line(&(state.position / GM - body.offset.position)))?;
        writeln!(out, "{}", vector_line(&(state.velocity / KM_PER_S - body.offset.velocity)))?;
        count += 1;
    }
    out.flush()?;

    info!("Max Name Length is {max_name_len}");
    Ok(count)
}

/// Write an SLF file at `path`, replacing any existing file.
pub fn write_slf_file(path: &Utf8Path, epoch: JulianDay, bodies: &[Body]) -> Result<usize, SlfError> {
    info!("Writing to File {path}");
    let file = File::create(path)?;
    let count = write_slf(BufWriter::new(file), epoch, bodies)?;
    info!("Wrote {count} bodies to {path}");
    Ok(count)
}
