//! Remote document store connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_endpoint() -> String {
    "http://localhost:8080/v1".to_string()
}

fn default_project_id() -> String {
    "jtl-stem-net".to_string()
}

fn default_database_id() -> String {
    "stem_network_db".to_string()
}

/// Status code the store uses for a missing database or collection.
const fn default_not_found_status() -> u16 {
    404
}

/// Status code the store uses for a resource that already exists.
const fn default_conflict_status() -> u16 {
    409
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// API base URL, including the version segment (e.g. `http://localhost:8080/v1`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Project the database belongs to.
    #[serde(default = "default_project_id")]
    pub project_id: String,

    /// Server API key with database scopes.
    #[serde(default)]
    pub api_key: String,

    /// Database that holds every provisioned collection.
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// Response status treated as "does not exist" on get calls.
    #[serde(default = "default_not_found_status")]
    pub not_found_status: u16,

    /// Response status treated as "already exists" on create calls.
    #[serde(default = "default_conflict_status")]
    pub conflict_status: u16,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            project_id: default_project_id(),
            api_key: String::new(),
            database_id: default_database_id(),
            not_found_status: default_not_found_status(),
            conflict_status: default_conflict_status(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Check if the minimum fields for authenticated access are present.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.project_id.is_empty() && !self.api_key.is_empty()
    }

    /// Check the settings a client needs before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] naming the variables to set
    /// for the first empty credential, [`ConfigError::InvalidEndpoint`] for a
    /// non-HTTP endpoint, [`ConfigError::EmptyDatabaseId`], or
    /// [`ConfigError::SharedStatus`] when both status predicates are equal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let credentials = [
            (&self.endpoint, "endpoint", "PUBLIC_APPWRITE_ENDPOINT or STEMNET_STORE__ENDPOINT"),
            (
                &self.project_id,
                "project_id",
                "PUBLIC_APPWRITE_PROJECT_ID or STEMNET_STORE__PROJECT_ID",
            ),
            (&self.api_key, "api_key", "APPWRITE_API_KEY or STEMNET_STORE__API_KEY"),
        ];
        if let Some(&(_, field, variables)) = credentials.iter().find(|(value, ..)| value.is_empty()) {
            return Err(ConfigError::MissingCredential { field, variables });
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.database_id.is_empty() {
            return Err(ConfigError::EmptyDatabaseId);
        }
        if self.not_found_status == self.conflict_status {
            return Err(ConfigError::SharedStatus(self.conflict_status));
        }
        Ok(())
    }

    /// Endpoint without a trailing slash, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}
