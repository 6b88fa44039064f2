//! # Connection Profiles
//!
//! INI-backed store for backend connection settings. A profile section
//! carries the base URL and the authorization token the API service
//! sends with every request.

use anyhow::{Context, Result};
use ini::Ini;

/// Settings for one backend connection
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionProfile {
    base_url: String,
    authorization: String,
}

impl ConnectionProfile {
    pub fn new(base_url: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            authorization: authorization.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authorization(&self) -> &str {
        &self.authorization
    }
}

/// Profile store reading from an INI file, one section per profile
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Load the named profile, or `None` when the section is missing
    pub fn get_profile(&self, name: &str) -> Result<Option<ConnectionProfile>> {
        let path = shellexpand::tilde(&self.path).into_owned();
        let ini = Ini::load_from_file(&path)
            .with_context(|| format!("failed to read profile file '{path}'"))?;

        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let base_url = section
            .get("base_url")
            .with_context(|| format!("profile '{name}' has no base_url"))?
            .trim_end_matches('/')
            .to_string();
        let authorization = section.get("authorization").unwrap_or_default().to_string();

        Ok(Some(ConnectionProfile {
            base_url,
            authorization,
        }))
    }
}
