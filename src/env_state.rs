//! # Shared HTTP environment
//!
//! [`SlfEnv`] owns the [`ureq::Agent`] used for every remote read of a run: the orbit catalog
//! download and the JPL Horizons queries. It is created once and handed by reference to the
//! [`CatalogSource`](crate::catalog::source::CatalogSource) and ephemeris providers.
//!
//! No global timeout is configured on the agent.
use std::convert::TryFrom;
use std::io::{BufRead, BufReader};

use ureq::{
    http::{self, Uri},
    Agent,
};

use crate::slf_errors::SlfError;

#[derive(Debug, Clone)]
pub struct SlfEnv {
    pub http_client: Agent,
}

impl Default for SlfEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl SlfEnv {
    /// Create a new environment with a default HTTP agent.
    pub fn new() -> Self {
        let config = Agent::config_builder().timeout_global(None).build();
        let agent: Agent = config.into();

        SlfEnv { http_client: agent }
    }

    /// Fetch a small text document (a Horizons answer) into memory.
    pub(crate) fn get_from_url<U>(&self, url: U) -> Result<String, SlfError>
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        Ok(self
            .http_client
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?)
    }

    /// Open a streamed reader on a large remote document (an orbit catalog).
    ///
    /// The body is read lazily, line by line, without the in-memory size limit of
    /// [`get_from_url`](Self::get_from_url).
    pub(crate) fn open_url(&self, url: &str) -> Result<Box<dyn BufRead>, SlfError> {
        let uri = Uri::try_from(url).map_err(|_| SlfError::InvalidUrl(url.to_string()))?;
        let response = self.http_client.get(uri).call()?;
        Ok(Box::new(BufReader::new(response.into_body().into_reader())))
    }
}
