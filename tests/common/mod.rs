#![allow(dead_code)]

use camino::Utf8Path;
use nalgebra::Vector3;

pub const DETAILS_PATH: &str = "tests/data/PlanetInfo.csv";

/// Preamble of the columnar catalog, closed by the dashed marker line.
pub const MPCORB_PREAMBLE: &str = "\
MINOR PLANET CENTER ORBIT DATABASE (MPCORB)

This file contains published orbital elements for all numbered and unnumbered
multi-opposition minor planets.

Des'n     H     G   Epoch     M        Peri.      Node       Incl.       e            n           a        Reference #Obs #Opp    Arc    rms  Perts   Computer
----------------------------------------------------------------------------------------------------------------------------------------------------------------
";

/// Orbital elements in catalog units: angles in degrees, semi-major axis in AU.
#[derive(Debug, Clone, Copy)]
pub struct Elements {
    pub mean_anomaly: f64,
    pub periapsis_argument: f64,
    pub ascending_node: f64,
    pub inclination: f64,
    pub eccentricity: f64,
    pub semi_major_axis: f64,
}

impl Elements {
    pub fn circular(semi_major_axis: f64, mean_anomaly: f64) -> Self {
        Elements {
            mean_anomaly,
            periapsis_argument: 0.0,
            ascending_node: 0.0,
            inclination: 0.0,
            eccentricity: 0.0,
            semi_major_axis,
        }
    }
}

/// Lay `fields` out at their 1-based starting columns.
fn place(fields: &[(usize, String)]) -> String {
    let mut line: Vec<char> = Vec::new();
    for (first, text) in fields {
        for (offset, c) in text.chars().enumerate() {
            let idx = first - 1 + offset;
            if idx >= line.len() {
                line.resize(idx + 1, ' ');
            }
            line[idx] = c;
        }
    }
    line.into_iter().collect()
}

/// One line of the columnar MPC catalog.
pub fn mpc_line(name: &str, epoch: &str, uncertainty: char, flags: u32, el: Elements) -> String {
    place(&[
        (1, "a0001".to_string()),
        (9, format!("{:5.2}", 3.34)),
        (21, epoch.to_string()),
        (27, format!("{:9.5}", el.mean_anomaly)),
        (38, format!("{:9.5}", el.periapsis_argument)),
        (49, format!("{:9.5}", el.ascending_node)),
        (60, format!("{:9.5}", el.inclination)),
        (71, format!("{:9.7}", el.eccentricity)),
        (93, format!("{:11.7}", el.semi_major_axis)),
        (106, uncertainty.to_string()),
        (162, format!("{flags:04x}")),
        (176, name.to_string()),
    ])
}

/// One line of the packed asteroid orbital database; `epoch` is `YYYYMMDD`.
pub fn astorb_line(designation: &str, magnitude: f64, epoch: &str, el: Elements) -> String {
    place(&[
        (1, "     1".to_string()),
        (8, format!("{designation:<18}")),
        (43, format!("{magnitude:5.2}")),
        (107, epoch.to_string()),
        (116, format!("{:10.5}", el.mean_anomaly)),
        (127, format!("{:10.5}", el.periapsis_argument)),
        (138, format!("{:10.5}", el.ascending_node)),
        (148, format!("{:10.5}", el.inclination)),
        (159, format!("{:10.7}", el.eccentricity)),
        (170, format!("{:12.8}", el.semi_major_axis)),
    ])
}

/// One body as read back from an SLF file.
#[derive(Debug, Clone)]
pub struct SlfBody {
    pub header: Vec<f64>,
    pub name: String,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl SlfBody {
    /// Name before the first `-` of the tag.
    pub fn base_name(&self) -> &str {
        self.name.split('-').next().unwrap_or_default()
    }
}

fn vector(line: &str) -> Vector3<f64> {
    let values: Vec<f64> = line
        .split_whitespace()
        .map(|value| value.parse().unwrap())
        .collect();
    assert_eq!(values.len(), 3, "bad vector line {line:?}");
    Vector3::new(values[0], values[1], values[2])
}

/// Parse an SLF document into its epoch and bodies.
pub fn parse_slf(text: &str) -> (f64, Vec<SlfBody>) {
    let mut lines = text.lines();
    let epoch = lines.next().unwrap().trim().parse().unwrap();
    let rest: Vec<&str> = lines.collect();
    assert_eq!(rest.len() % 3, 0, "truncated body in {text:?}");

    let bodies = rest
        .chunks(3)
        .enumerate()
        .map(|(idx, chunk)| {
            let mut header = chunk[0];
            if idx == 0 {
                header = header.strip_prefix(" 3").unwrap();
            }
            let (values, name) = header.split_once("# ").unwrap();
            SlfBody {
                header: values
                    .split_whitespace()
                    .map(|value| value.parse().unwrap())
                    .collect(),
                name: name.to_string(),
                position: vector(chunk[1]),
                velocity: vector(chunk[2]),
            }
        })
        .collect();
    (epoch, bodies)
}

pub fn read_slf(path: &Utf8Path) -> (f64, Vec<SlfBody>) {
    parse_slf(&std::fs::read_to_string(path).unwrap())
}
