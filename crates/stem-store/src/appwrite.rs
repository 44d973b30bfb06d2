//! REST client for an Appwrite-compatible document store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stem_config::StoreConfig;

use crate::documents::{DocumentList, DocumentQuery};
use crate::error::StoreError;
use crate::http::classify;
use crate::outcome::{RemoteOutcome, StatusPolicy};
use crate::{Attribute, AttributeSpec, Collection, Database, DocumentStore, SchemaStore};

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

/// HTTP client for one store project, authenticated with a server key.
pub struct AppwriteClient {
    http: reqwest::Client,
    base_url: String,
    policy: StatusPolicy,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDatabase<'a> {
    database_id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCollection<'a> {
    collection_id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct CreateAttribute<'a> {
    key: &'a str,
    required: bool,
    array: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
}

impl AppwriteClient {
    /// Build a client from store settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the project ID or key cannot
    /// be sent as a header, or [`StoreError::Http`] if the underlying client
    /// fails to build.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            header_value("project_id", &config.project_id)?,
        );
        let mut key = header_value("api_key", &config.api_key)?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(KEY_HEADER), key);

        let http = reqwest::Client::builder()
            .user_agent(concat!("stemnet/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            policy: StatusPolicy::from_config(config),
        })
    }

    #[must_use]
    pub const fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Join path segments onto the endpoint, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<RemoteOutcome<T>, StoreError> {
        tracing::debug!(method = "GET", url, "store request");
        let resp = self.http.get(url).send().await?;
        classify(resp, self.policy).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<RemoteOutcome<T>, StoreError> {
        tracing::debug!(method = "POST", url, "store request");
        let resp = self.http.post(url).json(body).send().await?;
        classify(resp, self.policy).await
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue, StoreError> {
    HeaderValue::from_str(value)
        .map_err(|_| StoreError::InvalidConfig(format!("{field} is not a valid header value")))
}

#[async_trait]
impl SchemaStore for AppwriteClient {
    async fn get_database(
        &self,
        database_id: &str,
    ) -> Result<RemoteOutcome<Database>, StoreError> {
        self.get_json(&self.url(&["databases", database_id])).await
    }

    async fn create_database(
        &self,
        database_id: &str,
        name: &str,
    ) -> Result<RemoteOutcome<Database>, StoreError> {
        let body = CreateDatabase { database_id, name };
        self.post_json(&self.url(&["databases"]), &body).await
    }

    async fn get_collection(
        &self,
        database_id: &str,
        collection_id: &str,
    ) -> Result<RemoteOutcome<Collection>, StoreError> {
        let url = self.url(&["databases", database_id, "collections", collection_id]);
        self.get_json(&url).await
    }

    async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        name: &str,
    ) -> Result<RemoteOutcome<Collection>, StoreError> {
        let url = self.url(&["databases", database_id, "collections"]);
        let body = CreateCollection {
            collection_id,
            name,
        };
        self.post_json(&url, &body).await
    }

    async fn create_attribute(
        &self,
        database_id: &str,
        collection_id: &str,
        spec: &AttributeSpec,
    ) -> Result<RemoteOutcome<Attribute>, StoreError> {
        let url = self.url(&[
            "databases",
            database_id,
            "collections",
            collection_id,
            "attributes",
            spec.kind.as_str(),
        ]);
        let body = CreateAttribute {
            key: &spec.key,
            required: spec.required,
            array: spec.array,
            size: spec.size,
        };
        self.post_json(&url, &body).await
    }
}

#[async_trait]
impl DocumentStore for AppwriteClient {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        query: &DocumentQuery,
    ) -> Result<RemoteOutcome<DocumentList>, StoreError> {
        let url = format!(
            "{}{}",
            self.url(&["databases", database_id, "collections", collection_id, "documents"]),
            query.to_query_string()
        );
        self.get_json(&url).await
    }
}
