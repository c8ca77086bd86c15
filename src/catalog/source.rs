//! # Catalog locations
//!
//! A [`CatalogSource`] opens the text stream of an orbit catalog. Two locations are supported:
//!
//! * [`FileSource`] – a local file,
//! * [`UrlSource`] – an `http(s)://` URL streamed through the shared [`SlfEnv`] agent.
//!
//! [`from_location`] picks one from a user-supplied string.
use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::Utf8PathBuf;
use tracing::info;

use crate::env_state::SlfEnv;
use crate::slf_errors::SlfError;

/// Something a catalog can be read from.
pub trait CatalogSource {
    /// Open the catalog for line-by-line reading.
    fn open(&self) -> Result<Box<dyn BufRead>, SlfError>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: Utf8PathBuf,
}

impl CatalogSource for FileSource {
    fn open(&self) -> Result<Box<dyn BufRead>, SlfError> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn location(&self) -> String {
        self.path.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UrlSource<'a> {
    pub env: &'a SlfEnv,
    pub url: String,
}

impl CatalogSource for UrlSource<'_> {
    fn open(&self) -> Result<Box<dyn BufRead>, SlfError> {
        info!("Downloading {}", self.url);
        self.env.open_url(&self.url)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Whether a location designates a remote document.
pub fn is_url(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a location string into a source.
///
/// `http://` and `https://` locations are fetched with `env`; anything else is a local path.
pub fn from_location<'a>(location: &str, env: &'a SlfEnv) -> Box<dyn CatalogSource + 'a> {
    if is_url(location) {
        Box::new(UrlSource {
            env,
            url: location.trim().to_string(),
        })
    } else {
        Box::new(FileSource {
            path: Utf8PathBuf::from(location),
        })
    }
}
