//! Supported mail providers and their fixed IMAPS endpoints.

use std::fmt;
use std::str::FromStr;

use crate::error::HarvestError;

/// Implicit-TLS IMAP port shared by every supported provider.
pub const IMAPS_PORT: u16 = 993;

/// A mail provider the extractor knows how to reach.
///
/// The set is closed: there is no way to point the extractor at an
/// arbitrary host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gmail,
    Office365,
    Yahoo,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Gmail, Provider::Office365, Provider::Yahoo];

    /// Hostname of the provider's IMAPS endpoint.
    pub fn host(&self) -> &'static str {
        match self {
            Provider::Gmail => "imap.gmail.com",
            Provider::Office365 => "outlook.office365.com",
            Provider::Yahoo => "imap.mail.yahoo.com",
        }
    }

    pub fn port(&self) -> u16 {
        IMAPS_PORT
    }

    /// Name shown to users when choosing a server.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gmail => "Gmail",
            Provider::Office365 => "Office 365",
            Provider::Yahoo => "Yahoo Mail",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = HarvestError;

    /// Accepts display names ("Office 365") and short slugs ("office365"),
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "gmail" | "google" => Ok(Provider::Gmail),
            "office365" | "outlook" | "o365" => Ok(Provider::Office365),
            "yahoomail" | "yahoo" => Ok(Provider::Yahoo),
            _ => Err(HarvestError::UnsupportedProvider(s.trim().to_string())),
        }
    }
}
