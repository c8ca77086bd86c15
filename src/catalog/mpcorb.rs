//! # Columnar MPC orbit database
//!
//! Reader for the fixed-width `MPCORB.DAT` layout. The file starts with a free-text preamble
//! closed by a line of dashes; every following non-empty line describes one minor planet.
//!
//! | field                  | columns (1-based) | unit / encoding                            |
//! |------------------------|-------------------|--------------------------------------------|
//! | absolute magnitude H   | 9–13              | mag, `20.0` when blank                     |
//! | epoch                  | 21–25             | packed date, see [`parse_packed_epoch`]    |
//! | mean anomaly M         | 27–35             | degrees                                    |
//! | argument of perihelion | 38–46             | degrees                                    |
//! | ascending node         | 49–57             | degrees                                    |
//! | inclination            | 60–68             | degrees                                    |
//! | eccentricity           | 71–79             |                                            |
//! | semi-major axis        | 93–103            | AU                                         |
//! | uncertainty U          | 106               | digit, `100` when not a digit              |
//! | orbit type flags       | 162–165           | hexadecimal, see [`classify`]              |
//! | readable designation   | 176–end           | whitespace removed                         |
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{anychar, satisfy},
    combinator::{map_opt, map_res},
    IResult, Parser,
};
use std::io::BufRead;
use tracing::{debug, error, info};

use super::{column, designation, f64_or, is_header, required_f64, PROGRESS_LINES};
use crate::body::{Body, Catalog, CatalogOrbit};
use crate::constants::{degree_to_radian, JulianDay, AU};
use crate::orbital_elements::OrbitalElements;
use crate::slf_errors::{ParseCatalogError, SlfError};
use crate::time::julian_day_from_date;

/// Lines before the first one starting with this marker are preamble.
const DATA_MARKER: &str = "------";

const ABSOLUTE_MAGNITUDE: (usize, usize) = (9, 13);
const EPOCH: (usize, usize) = (21, 25);
const MEAN_ANOMALY: (usize, usize) = (27, 35);
const PERIAPSIS_ARGUMENT: (usize, usize) = (38, 46);
const ASCENDING_NODE: (usize, usize) = (49, 57);
const INCLINATION: (usize, usize) = (60, 68);
const ECCENTRICITY: (usize, usize) = (71, 79);
const SEMI_MAJOR_AXIS: (usize, usize) = (93, 103);
const UNCERTAINTY: (usize, usize) = (106, 106);
const TYPE_FLAGS: (usize, usize) = (162, 165);
const NAME_START: usize = 176;
/// The readable name is the leading part of the designation field.
const READABLE_NAME_LEN: usize = 19;

const DEFAULT_MAGNITUDE: f64 = 20.0;
const DEFAULT_UNCERTAINTY: i32 = 100;

/// One parsed line of the columnar catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct MpcRecord {
    /// First 19 characters of the name field, whitespace removed.
    pub readable_name: String,
    /// Whole name field, whitespace removed.
    pub designation: String,
    pub orbit: CatalogOrbit,
}

/// Value of a packed month or day character: `1`–`9`, then `A` = 10 … `V` = 31.
fn packed_digit(c: char) -> Option<i32> {
    match c {
        '0'..='9' => c.to_digit(10).map(|d| d as i32),
        'A'..='V' => Some(c as i32 - 'A' as i32 + 10),
        _ => None,
    }
}

fn packed_date(input: &str) -> IResult<&str, (i32, i32, i32)> {
    let century = map_opt(satisfy(|c| c.is_ascii_uppercase()), |c| {
        Some((c as i32 - 'A' as i32 + 10) * 100)
    });
    let year = map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_digit()),
        |digits: &str| digits.parse::<i32>(),
    );

    (century, year, map_opt(anychar, packed_digit), map_opt(anychar, packed_digit))
        .map(|(century, year, month, day)| (century + year, month, day))
        .parse(input)
}

/// Decode a packed MPC epoch such as `K2555` (2025-05-05).
///
/// The first letter encodes the century (`I` = 18, `J` = 19, `K` = 20), followed by the two
/// last digits of the year, then one character each for month and day. A `0` month or day is
/// clamped to 1 by [`julian_day_from_date`].
///
/// Return
/// ------
/// * the Julian Day of the date at 0h, or [`ParseCatalogError::InvalidEpoch`]
pub fn parse_packed_epoch(raw: &str, line_no: u64) -> Result<JulianDay, ParseCatalogError> {
    let invalid = || ParseCatalogError::InvalidEpoch {
        raw: raw.to_string(),
        line: line_no,
    };

    let (_, (year, month, day)) = packed_date(raw.trim()).map_err(|_| invalid())?;
    if month > 12 {
        return Err(invalid());
    }
    Ok(julian_day_from_date(year, month, day))
}

/// Dynamical type label of an MPC orbit type flag word.
///
/// The NEO flags take precedence over the orbit class stored in the low 6 bits; unknown classes
/// map to an empty label.
pub fn classify(flags: u32) -> &'static str {
    if flags & 0x1000 != 0 {
        return "NEO!";
    }
    if flags & 0x0800 != 0 {
        return "NEO";
    }
    match flags & 0x3F {
        2 => "Aten",
        3 => "Apollo",
        4 => "Amor",
        5 => "QLess1665",
        6 => "Hungaria",
        7 => "Phocaea",
        8 => "Hilda",
        9 => "JTrojan",
        10 => "Centaur",
        14 => "Plutino",
        15 => "TNO",
        16 => "Cubewano",
        17 => "Scattered",
        _ => "",
    }
}

/// Parse one data line of the columnar catalog.
///
/// Return
/// ------
/// * `Ok(None)` for a repeated header line (designation `NAME`),
/// * `Ok(Some(record))` otherwise, or the first required field that failed to parse.
pub fn parse_mpcorb_line(line: &str, line_no: u64) -> Result<Option<MpcRecord>, ParseCatalogError> {
    let designation = designation(line, NAME_START, usize::MAX);
    if is_header(&designation) {
        return Ok(None);
    }
    let readable_name = super::designation(line, NAME_START, NAME_START + READABLE_NAME_LEN - 1);

    let epoch = parse_packed_epoch(column(line, EPOCH.0, EPOCH.1), line_no)?;
    let angle = |range: (usize, usize), field: &'static str| {
        required_f64(line, range, field, line_no).map(degree_to_radian)
    };

    let elements = OrbitalElements {
        mean_anomaly: angle(MEAN_ANOMALY, "mean anomaly")?,
        periapsis_argument: angle(PERIAPSIS_ARGUMENT, "argument of perihelion")?,
        ascending_node_longitude: angle(ASCENDING_NODE, "ascending node")?,
        inclination: angle(INCLINATION, "inclination")?,
        eccentricity: required_f64(line, ECCENTRICITY, "eccentricity", line_no)?,
        semi_major_axis: required_f64(line, SEMI_MAJOR_AXIS, "semi-major axis", line_no)? * AU,
        epoch,
    };

    let uncertainty = column(line, UNCERTAINTY.0, UNCERTAINTY.1)
        .trim()
        .parse::<i32>()
        .unwrap_or(DEFAULT_UNCERTAINTY);
    let flags = u32::from_str_radix(column(line, TYPE_FLAGS.0, TYPE_FLAGS.1).trim(), 16).unwrap_or(0);

    Ok(Some(MpcRecord {
        readable_name,
        designation,
        orbit: CatalogOrbit {
            elements,
            absolute_magnitude: f64_or(line, ABSOLUTE_MAGNITUDE, DEFAULT_MAGNITUDE),
            classification: Some((classify(flags).to_string(), uncertainty)),
        },
    }))
}

/// Merge one record into the catalog.
///
/// A body found under the readable name is updated only if it came from the details file.
/// Otherwise the record creates a new body under its designation, unless that designation is
/// already taken.
///
/// Return
/// ------
/// * `true` if the catalog changed
fn merge_record(catalog: &mut Catalog, record: MpcRecord) -> bool {
    if let Some(body) = catalog.get_mut(&record.readable_name) {
        if !body.read_in {
            debug!("Skipping {}: catalog entry already merged", record.readable_name);
            return false;
        }
        body.merge_orbit(record.orbit);
        return true;
    }

    if catalog.contains(&record.designation) {
        info!("{} already added", record.designation);
        return false;
    }

    catalog.insert(Body::from_catalog(record.designation, record.orbit))
}

/// Read a whole columnar catalog into `catalog`.
///
/// See also
/// --------
/// * [`read_catalog`](super::read_catalog) – format dispatch
pub fn read_mpcorb<R: BufRead>(reader: R, catalog: &mut Catalog) -> Result<usize, SlfError> {
    let mut in_data = false;
    let mut merged = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx as u64 + 1;
        if line_no % PROGRESS_LINES == 0 {
            info!("Read {line_no} catalog lines");
        }

        if line.starts_with(DATA_MARKER) {
            in_data = true;
            continue;
        }
        if !in_data || line.trim().is_empty() {
            continue;
        }

        match parse_mpcorb_line(&line, line_no) {
            Ok(Some(record)) => {
                if merge_record(catalog, record) {
                    merged += 1;
                }
            }
            Ok(None) => {}
            Err(err) => {
                error!("{err}");
                return Err(err.into());
            }
        }
    }

    info!("Merged {merged} orbits from the MPC catalog");
    Ok(merged)
}

#[cfg(test)]
mod mpcorb_test {
    use super::*;
    use approx::assert_relative_eq;

    /// A blank 202-column line with `text` written from 1-based column `first`.
    fn with_fields(fields: &[(usize, &str)]) -> String {
        let mut line = vec![' '; 202];
        for &(first, text) in fields {
            for (offset, c) in text.chars().enumerate() {
                let idx = first - 1 + offset;
                if idx >= line.len() {
                    line.resize(idx + 1, ' ');
                }
                line[idx] = c;
            }
        }
        line.into_iter().collect::<String>().trim_end().to_string()
    }

    fn ceres_line(name: &str) -> String {
        with_fields(&[
            (1, "00001"),
            (9, " 3.34"),
            (21, "K2555"),
            (27, "188.70269"),
            (38, " 73.27343"),
            (49, " 80.25221"),
            (60, " 10.58780"),
            (71, "0.0794013"),
            (93, "  2.7660512"),
            (106, "0"),
            (162, "0008"),
            (176, name),
        ])
    }

    #[test]
    fn test_packed_epoch() {
        assert_eq!(parse_packed_epoch("K2555", 1), Ok(2460800.5));
        assert_eq!(
            parse_packed_epoch("J99CV", 1),
            Ok(julian_day_from_date(1999, 12, 31))
        );
        assert_eq!(
            parse_packed_epoch("K24A1", 1),
            Ok(julian_day_from_date(2024, 10, 1))
        );
        assert!(matches!(
            parse_packed_epoch("K2x55", 4),
            Err(ParseCatalogError::InvalidEpoch { line: 4, .. })
        ));
        assert!(parse_packed_epoch("", 1).is_err());
        assert!(parse_packed_epoch("K25D1", 1).is_err());
    }

    #[test]
    fn test_packed_epoch_zero_month_or_day() {
        assert_eq!(parse_packed_epoch("K2501", 1), Ok(2460676.5));
        assert_eq!(
            parse_packed_epoch("K2550", 1),
            Ok(julian_day_from_date(2025, 5, 1))
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0x1000), "NEO!");
        assert_eq!(classify(0x1803), "NEO!");
        assert_eq!(classify(0x0803), "NEO");
        assert_eq!(classify(3), "Apollo");
        assert_eq!(classify(0x4008), "Hilda");
        assert_eq!(classify(16), "Cubewano");
        assert_eq!(classify(11), "");
        assert_eq!(classify(0), "");
    }

    #[test]
    fn test_parse_line() {
        let record = parse_mpcorb_line(&ceres_line("(1) Ceres"), 3)
            .unwrap()
            .unwrap();
        assert_eq!(record.readable_name, "(1)Ceres");
        assert_eq!(record.designation, "(1)Ceres");

        let elements = record.orbit.elements;
        assert_eq!(elements.epoch, 2460800.5);
        assert_relative_eq!(elements.semi_major_axis, 2.7660512 * AU);
        assert_eq!(elements.eccentricity, 0.0794013);
        assert_relative_eq!(elements.mean_anomaly, 188.70269_f64.to_radians(), epsilon = 1e-15);
        assert_relative_eq!(elements.inclination, 10.58780_f64.to_radians(), epsilon = 1e-15);
        assert_eq!(record.orbit.absolute_magnitude, 3.34);
        assert_eq!(record.orbit.classification, Some(("Hilda".to_string(), 0)));
    }

    #[test]
    fn test_parse_line_defaults() {
        let mut line = ceres_line("2004 MN4");
        // blank H, non-digit uncertainty, unreadable flags
        line.replace_range(8..13, "     ");
        line.replace_range(105..106, "E");
        line.replace_range(161..165, "zzzz");

        let record = parse_mpcorb_line(&line, 1).unwrap().unwrap();
        assert_eq!(record.orbit.absolute_magnitude, 20.0);
        assert_eq!(record.orbit.classification, Some((String::new(), 100)));
    }

    #[test]
    fn test_parse_line_errors() {
        let mut line = ceres_line("Ceres");
        line.replace_range(70..79, "0.07x4013");
        assert_eq!(
            parse_mpcorb_line(&line, 12),
            Err(ParseCatalogError::InvalidField {
                field: "eccentricity",
                raw: "0.07x4013".into(),
                line: 12,
            })
        );

        assert!(parse_mpcorb_line(&ceres_line("NAME"), 2).unwrap().is_none());
    }

    #[test]
    fn test_read_merge_rules() {
        let mut catalog = Catalog::new();
        catalog.insert(Body {
            mass: 9.39e20,
            read_in: true,
            ..Body::named("Ceres")
        });

        let text = format!(
            "MPCORB preamble\nDes'n     H     G   Epoch\n{}\n{}\n\n{}\n{}\n",
            "-".repeat(160),
            ceres_line("Ceres"),
            ceres_line("2004 MN4"),
            ceres_line("2004 MN4"),
        );
        let merged = read_mpcorb(text.as_bytes(), &mut catalog).unwrap();
        assert_eq!(merged, 2);
        assert_eq!(catalog.len(), 2);

        let ceres = catalog.get("ceres").unwrap();
        assert_eq!(ceres.mass, 9.39e20);
        assert_eq!(ceres.body_type, "Hilda");
        assert_relative_eq!(ceres.elements.semi_major_axis, 2.7660512 * AU);

        let apophis = catalog.get("2004MN4").unwrap();
        assert_eq!(apophis.radius, 0.1);
        assert_eq!(apophis.mass, 0.0);
        assert!(!apophis.read_in);
    }

    #[test]
    fn test_read_skips_separator_lines() {
        let mut catalog = Catalog::new();
        let text = format!(
            "preamble\n{dashes}\n{}\n{dashes}\n{}\n",
            ceres_line("2004 MN4"),
            ceres_line("Apophis B"),
            dashes = "-".repeat(160),
        );
        assert_eq!(read_mpcorb(text.as_bytes(), &mut catalog), Ok(2));
        assert!(catalog.contains("2004MN4"));
        assert!(catalog.contains("ApophisB"));
    }

    #[test]
    fn test_read_preamble_only() {
        let mut catalog = Catalog::new();
        let text = format!("{}\n", ceres_line("Ceres"));
        assert_eq!(read_mpcorb(text.as_bytes(), &mut catalog), Ok(0));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_read_fails_on_bad_line() {
        let mut line = ceres_line("Ceres");
        line.replace_range(26..35, "abcdefghi");
        let text = format!("------\n{line}\n");
        let err = read_mpcorb(text.as_bytes(), &mut Catalog::new()).unwrap_err();
        assert!(matches!(
            err,
            SlfError::CatalogParse(ParseCatalogError::InvalidField {
                field: "mean anomaly",
                line: 2,
                ..
            })
        ));
    }
}
