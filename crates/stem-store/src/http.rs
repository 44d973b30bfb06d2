//! Shared HTTP response handling for the store client.
//!
//! Centralizes the success check, body decoding and status classification so
//! the endpoint methods stay focused on request construction.

use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::outcome::{RemoteOutcome, StatusPolicy};

/// Turn an HTTP response into a typed outcome.
///
/// - **2xx** → [`RemoteOutcome::Found`] with the decoded body.
/// - **Non-success** → classified by `policy`.
///
/// Failing to read the body of a success response is a transport fault;
/// failing to decode it is [`StoreError::Decode`].
pub async fn classify<T: DeserializeOwned>(
    resp: reqwest::Response,
    policy: StatusPolicy,
) -> Result<RemoteOutcome<T>, StoreError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        return Ok(RemoteOutcome::Found(serde_json::from_str(&body)?));
    }
    let body = resp.text().await.unwrap_or_default();
    Ok(policy.classify(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Named {
        name: String,
    }

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_decodes_body() {
        let resp = mock_response(200, r#"{"name":"metros"}"#);
        let outcome: RemoteOutcome<Named> = classify(resp, StatusPolicy::default()).await.unwrap();
        assert_eq!(
            outcome,
            RemoteOutcome::Found(Named {
                name: "metros".into()
            })
        );
    }

    #[tokio::test]
    async fn created_status_counts_as_success() {
        let resp = mock_response(202, r#"{"name":"metros"}"#);
        let outcome: RemoteOutcome<Named> = classify(resp, StatusPolicy::default()).await.unwrap();
        assert!(outcome.is_found());
    }

    #[tokio::test]
    async fn not_found_status_is_classified() {
        let resp = mock_response(404, r#"{"message":"Database not found","code":404}"#);
        let outcome: RemoteOutcome<Named> = classify(resp, StatusPolicy::default()).await.unwrap();
        assert_eq!(outcome, RemoteOutcome::NotFound);
    }

    #[tokio::test]
    async fn conflict_status_is_classified() {
        let resp = mock_response(409, "");
        let outcome: RemoteOutcome<Named> = classify(resp, StatusPolicy::default()).await.unwrap();
        assert_eq!(outcome, RemoteOutcome::Conflict);
    }

    #[tokio::test]
    async fn server_error_is_other() {
        let resp = mock_response(500, r#"{"message":"Server Error","code":500}"#);
        let outcome: RemoteOutcome<Named> = classify(resp, StatusPolicy::default()).await.unwrap();
        assert_eq!(
            outcome,
            RemoteOutcome::Other {
                status: 500,
                message: "Server Error".into()
            }
        );
    }

    #[tokio::test]
    async fn created_attribute_with_sparse_body_is_found() {
        let resp = mock_response(
            202,
            r#"{"key":"coordinator_email","status":"processing","format":"email"}"#,
        );
        let outcome: RemoteOutcome<crate::Attribute> =
            classify(resp, StatusPolicy::default()).await.unwrap();
        assert!(outcome.is_found());
    }

    #[tokio::test]
    async fn undecodable_success_body_is_decode_error() {
        let resp = mock_response(200, "<html>");
        let err = classify::<Named>(resp, StatusPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
