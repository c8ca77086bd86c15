use thiserror::Error;

/// Line-level parsing errors for the fixed-column orbit catalogs.
///
/// Variants
/// -----------------
/// * `InvalidField` – A required numeric field could not be parsed; carries the field name,
///   the offending raw slice and the 1-based line number.
/// * `InvalidEpoch` – The epoch field (packed or `YYYYMMDD`) could not be decoded.
#[derive(Error, Debug, PartialEq)]
pub enum ParseCatalogError {
    #[error("line {line}: bad {field} '{raw}'")]
    InvalidField {
        field: &'static str,
        raw: String,
        line: u64,
    },
    #[error("line {line}: bad epoch '{raw}'")]
    InvalidEpoch { raw: String, line: u64 },
}

#[derive(Error, Debug)]
pub enum SlfError {
    #[error("Error during the catalog parsing: {0}")]
    CatalogParse(#[from] ParseCatalogError),

    #[error("Required body missing from the catalog: {0}")]
    MissingBody(String),

    #[error("Body already present in the catalog: {0}")]
    DuplicateBody(String),

    #[error("The merged catalog holds no body")]
    EmptyCatalog,

    #[error("Planet not supported by the ephemeris provider: {0}")]
    UnsupportedPlanet(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed JPL Horizons response: {0}")]
    HorizonsResponse(String),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP ureq error: {0}")]
    Http(#[from] ureq::Error),

    #[error("Details file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration file: {0}")]
    Config(#[from] toml::de::Error),
}

impl PartialEq for SlfError {
    fn eq(&self, other: &Self) -> bool {
        use SlfError::*;
        match (self, other) {
            (CatalogParse(a), CatalogParse(b)) => a == b,
            (MissingBody(a), MissingBody(b)) => a == b,
            (DuplicateBody(a), DuplicateBody(b)) => a == b,
            (UnsupportedPlanet(a), UnsupportedPlanet(b)) => a == b,
            (InvalidUrl(a), InvalidUrl(b)) => a == b,
            (HorizonsResponse(a), HorizonsResponse(b)) => a == b,

            // wrapped errors are not comparable: same variant is enough
            (Io(_), Io(_)) => true,
            (Http(_), Http(_)) => true,
            (Csv(_), Csv(_)) => true,
            (Config(_), Config(_)) => true,

            (EmptyCatalog, EmptyCatalog) => true,

            _ => false,
        }
    }
}
