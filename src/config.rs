//! Runtime configuration.
//!
//! Everything has a default, so a config file is optional and may be partial:
//!
//! ```toml
//! user_agent = "Mozilla/5.0"
//!
//! [sites.cineland]
//! now_playing = "https://cinelandpantelis.gr/proballontai.html"
//! coming_soon = "https://cinelandpantelis.gr/prosechos.html"
//!
//! [sites.texnopolis]
//! listing = "https://texnopolis.net/"
//!
//! [sites.odeon]
//! listing = "https://www.odeon.gr/tainies"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    pub sites: SitesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sites: SitesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    pub cineland: CinelandConfig,
    pub texnopolis: TexnopolisConfig,
    pub odeon: OdeonConfig,
}

/// Cineland splits its programme over two pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CinelandConfig {
    pub now_playing: String,
    pub coming_soon: String,
}

impl Default for CinelandConfig {
    fn default() -> Self {
        Self {
            now_playing: "https://cinelandpantelis.gr/proballontai.html".to_string(),
            coming_soon: "https://cinelandpantelis.gr/prosechos.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TexnopolisConfig {
    pub listing: String,
}

impl Default for TexnopolisConfig {
    fn default() -> Self {
        Self {
            listing: "https://texnopolis.net/".to_string(),
        }
    }
}

/// The Odeon catalogue is also where detail lookups find showtimes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OdeonConfig {
    pub listing: String,
}

impl Default for OdeonConfig {
    fn default() -> Self {
        Self {
            listing: "https://www.odeon.gr/tainies".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ScrapeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Every configured listing page, in display order.
    pub fn listing_urls(&self) -> Vec<&str> {
        vec![
            self.sites.cineland.now_playing.as_str(),
            self.sites.cineland.coming_soon.as_str(),
            self.sites.texnopolis.listing.as_str(),
            self.sites.odeon.listing.as_str(),
        ]
    }
}
