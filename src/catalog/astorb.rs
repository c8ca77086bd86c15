//! # Packed asteroid orbital database
//!
//! Reader for the fixed-width `astorb.dat` layout. There is no preamble: every non-empty line is
//! a record. Unlike the columnar catalog, a line always overwrites the orbit of an existing
//! body, whichever file created it.
//!
//! | field                  | columns (1-based) | unit / encoding          |
//! |------------------------|-------------------|--------------------------|
//! | designation            | 8–25              | whitespace removed       |
//! | absolute magnitude H   | 43–47             | mag, `20.0` when blank   |
//! | epoch                  | 107–114           | `YYYYMMDD`               |
//! | mean anomaly M         | 116–125           | degrees                  |
//! | argument of perihelion | 127–136           | degrees                  |
//! | ascending node         | 138–147           | degrees                  |
//! | inclination            | 148–157           | degrees                  |
//! | eccentricity           | 159–168           |                          |
//! | semi-major axis        | 170–181           | AU                       |
use std::io::BufRead;

use tracing::{error, info};

use super::{column, designation, f64_or, is_header, required_f64, PROGRESS_LINES};
use crate::body::{Body, Catalog, CatalogOrbit};
use crate::constants::{degree_to_radian, JulianDay, AU};
use crate::orbital_elements::OrbitalElements;
use crate::slf_errors::{ParseCatalogError, SlfError};
use crate::time::julian_day_from_date;

const DESIGNATION: (usize, usize) = (8, 25);
const ABSOLUTE_MAGNITUDE: (usize, usize) = (43, 47);
const EPOCH_YEAR: (usize, usize) = (107, 110);
const EPOCH_MONTH: (usize, usize) = (111, 112);
const EPOCH_DAY: (usize, usize) = (113, 114);
const MEAN_ANOMALY: (usize, usize) = (116, 125);
const PERIAPSIS_ARGUMENT: (usize, usize) = (127, 136);
const ASCENDING_NODE: (usize, usize) = (138, 147);
const INCLINATION: (usize, usize) = (148, 157);
const ECCENTRICITY: (usize, usize) = (159, 168);
const SEMI_MAJOR_AXIS: (usize, usize) = (170, 181);

const DEFAULT_MAGNITUDE: f64 = 20.0;

/// One parsed line of the packed catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct AstorbRecord {
    pub designation: String,
    pub orbit: CatalogOrbit,
}

fn epoch_part(
    line: &str,
    (first, last): (usize, usize),
    field: &'static str,
    line_no: u64,
) -> Result<i32, ParseCatalogError> {
    let raw = column(line, first, last);
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ParseCatalogError::InvalidField {
            field,
            raw: raw.to_string(),
            line: line_no,
        })
}

/// Decode the `YYYYMMDD` epoch of a packed line.
fn parse_epoch(line: &str, line_no: u64) -> Result<JulianDay, ParseCatalogError> {
    let year = epoch_part(line, EPOCH_YEAR, "epoch year", line_no)?;
    let month = epoch_part(line, EPOCH_MONTH, "epoch month", line_no)?;
    let day = epoch_part(line, EPOCH_DAY, "epoch day", line_no)?;
    Ok(julian_day_from_date(year, month, day))
}

/// Parse one line of the packed catalog.
///
/// Return
/// ------
/// * `Ok(None)` for a header line (designation `NAME`),
/// * `Ok(Some(record))` otherwise, or the first required field that failed to parse.
pub fn parse_astorb_line(
    line: &str,
    line_no: u64,
) -> Result<Option<AstorbRecord>, ParseCatalogError> {
    let name = designation(line, DESIGNATION.0, DESIGNATION.1);
    if is_header(&name) {
        return Ok(None);
    }

    let angle = |range: (usize, usize), field: &'static str| {
        required_f64(line, range, field, line_no).map(degree_to_radian)
    };

    let elements = OrbitalElements {
        epoch: parse_epoch(line, line_no)?,
        mean_anomaly: angle(MEAN_ANOMALY, "mean anomaly")?,
        periapsis_argument: angle(PERIAPSIS_ARGUMENT, "argument of perihelion")?,
        ascending_node_longitude: angle(ASCENDING_NODE, "ascending node")?,
        inclination: angle(INCLINATION, "inclination")?,
        eccentricity: required_f64(line, ECCENTRICITY, "eccentricity", line_no)?,
        semi_major_axis: required_f64(line, SEMI_MAJOR_AXIS, "semi-major axis", line_no)? * AU,
    };

    Ok(Some(AstorbRecord {
        designation: name,
        orbit: CatalogOrbit {
            elements,
            absolute_magnitude: f64_or(line, ABSOLUTE_MAGNITUDE, DEFAULT_MAGNITUDE),
            classification: None,
        },
    }))
}

/// Read a whole packed catalog into `catalog`.
///
/// Existing bodies get their orbit and magnitude overwritten; unknown designations become new
/// massless bodies with an empty type and uncertainty `0`.
pub fn read_astorb<R: BufRead>(reader: R, catalog: &mut Catalog) -> Result<usize, SlfError> {
    let mut merged = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx as u64 + 1;
        if line_no % PROGRESS_LINES == 0 {
            info!("Read {line_no} catalog lines");
        }
        if line.trim().is_empty() {
            continue;
        }

        let record = match parse_astorb_line(&line, line_no) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(err) => {
                error!("{err}");
                return Err(err.into());
            }
        };

        match catalog.get_mut(&record.designation) {
            Some(body) => body.merge_orbit(record.orbit),
            None => {
                catalog.insert(Body::from_catalog(record.designation, record.orbit));
            }
        }
        merged += 1;
    }

    info!("Merged {merged} orbits from the astorb catalog");
    Ok(merged)
}

#[cfg(test)]
mod astorb_test {
    use super::*;
    use approx::assert_relative_eq;

    fn with_fields(fields: &[(usize, &str)]) -> String {
        let mut line = vec![' '; 190];
        for &(first, text) in fields {
            for (offset, c) in text.chars().enumerate() {
                line[first - 1 + offset] = c;
            }
        }
        line.into_iter().collect::<String>().trim_end().to_string()
    }

    fn vesta_line(name: &str, a: &str) -> String {
        with_fields(&[
            (1, "     4"),
            (8, name),
            (43, " 3.20"),
            (107, "20250505"),
            (116, "  20.86380"),
            (127, " 151.66392"),
            (138, " 103.70232"),
            (148, "   7.14406"),
            (159, "  0.090196"),
            (170, a),
        ])
    }

    #[test]
    fn test_parse_line() {
        let record = parse_astorb_line(&vesta_line("Vesta", "  2.36137854"), 1)
            .unwrap()
            .unwrap();
        assert_eq!(record.designation, "Vesta");
        assert_eq!(record.orbit.elements.epoch, 2460800.5);
        assert_relative_eq!(record.orbit.elements.semi_major_axis, 2.36137854 * AU);
        assert_relative_eq!(
            record.orbit.elements.periapsis_argument,
            151.66392_f64.to_radians(),
            epsilon = 1e-15
        );
        assert_eq!(record.orbit.absolute_magnitude, 3.2);
        assert_eq!(record.orbit.classification, None);
    }

    #[test]
    fn test_parse_bad_epoch() {
        let mut line = vesta_line("Vesta", "  2.36137854");
        line.replace_range(110..112, "xx");
        assert_eq!(
            parse_astorb_line(&line, 9),
            Err(ParseCatalogError::InvalidField {
                field: "epoch month",
                raw: "xx".into(),
                line: 9,
            })
        );
    }

    #[test]
    fn test_read_always_overwrites() {
        let mut catalog = Catalog::new();
        catalog.insert(Body {
            mass: 2.59e20,
            read_in: true,
            ..Body::named("Vesta")
        });

        let text = format!(
            "{}\n\n{}\n{}\n",
            vesta_line("Vesta", "  2.36137854"),
            vesta_line("2004 MN4", "  0.92"),
            vesta_line("2004 MN4", "  0.93"),
        );
        assert_eq!(read_astorb(text.as_bytes(), &mut catalog), Ok(3));
        assert_eq!(catalog.len(), 2);

        let vesta = catalog.get("VESTA").unwrap();
        assert_eq!(vesta.mass, 2.59e20);
        assert_relative_eq!(vesta.elements.semi_major_axis, 2.36137854 * AU);

        // the later line wins
        let apophis = catalog.get("2004MN4").unwrap();
        assert_relative_eq!(apophis.elements.semi_major_axis, 0.93 * AU);
        assert_eq!(apophis.body_type, "");
        assert_eq!(apophis.uncertainty, 0);
        assert_eq!(apophis.radius, 0.1);
    }
}
