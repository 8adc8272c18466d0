//! Credentials supplied by the front end for one harvest.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{HarvestError, Result};
use crate::provider::Provider;
use crate::sanitize::redact_address;

/// Raw inputs as the front end collects them: address, secret and the
/// user's server choice, none of it validated yet.
pub struct HarvestRequest {
    pub address: String,
    pub secret: SecretString,
    pub provider: String,
}

impl HarvestRequest {
    pub fn new(
        address: impl Into<String>,
        secret: impl Into<SecretString>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            secret: secret.into(),
            provider: provider.into(),
        }
    }
}

impl fmt::Debug for HarvestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestRequest")
            .field("address", &redact_address(&self.address))
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// Validated credentials for a single provider.
///
/// Fields are private so a value cannot change after construction.
pub struct Credentials {
    address: String,
    secret: SecretString,
    provider: Provider,
}

impl Credentials {
    pub fn new(address: impl Into<String>, secret: SecretString, provider: Provider) -> Self {
        Self {
            address: address.into(),
            secret,
            provider,
        }
    }

    /// Validates a front-end request.
    ///
    /// Empty address or secret fails with `MissingInput`; an unknown server
    /// choice fails with `UnsupportedProvider`. Neither touches the network.
    pub fn from_request(request: HarvestRequest) -> Result<Self> {
        let address = request.address.trim().to_string();
        if address.is_empty() {
            return Err(HarvestError::MissingInput("email address"));
        }
        if request.secret.expose_secret().is_empty() {
            return Err(HarvestError::MissingInput("password"));
        }
        let provider: Provider = request.provider.parse()?;

        Ok(Self::new(address, request.secret, provider))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &redact_address(&self.address))
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
