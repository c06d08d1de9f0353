//! Reqwest-backed [`ContactsApi`] adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::api::{Contact, ContactInput, ContactList, ContactsApi};
use crate::error::{ClientError, ServerFieldErrors};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Bound on every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`ContactsApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpContactsClient {
    client: Client,
    base_url: Url,
}

impl HttpContactsClient {
    /// Build a client rooted at `base_url`, e.g. `http://host:5000/api`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when `base_url` cannot carry
    /// path segments or the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration {
                message: format!("{base_url} cannot be used as a base URL"),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Configuration {
                message: err.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    /// Parse `base_url` and use [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when `base_url` is not a valid
    /// URL.
    pub fn from_base_url(base_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(base_url).map_err(|err| ClientError::Configuration {
            message: format!("invalid base URL {base_url:?}: {err}"),
        })?;
        Self::new(url, DEFAULT_TIMEOUT)
    }

    /// Client for a server on [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the reqwest client cannot
    /// be constructed.
    pub fn localhost() -> Result<Self, ClientError> {
        Self::from_base_url(DEFAULT_BASE_URL)
    }

    /// Root URL of the API.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Configuration {
                message: format!("{} cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ContactsApi for HttpContactsClient {
    async fn list_contacts(&self, page: u64, limit: u64) -> Result<ContactList, ClientError> {
        let url = self.endpoint(&["contacts"])?;
        debug!(%url, page, limit, "listing contacts");
        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_json(response).await
    }

    async fn create_contact(&self, input: &ContactInput) -> Result<Contact, ClientError> {
        let url = self.endpoint(&["contacts"])?;
        debug!(%url, "creating contact");
        let response = self
            .client
            .post(url)
            .json(input)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_json(response).await
    }

    async fn delete_contact(&self, id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&["contacts", &id.to_string()])?;
        debug!(%url, "deleting contact");
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<ServerFieldErrors>,
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|err| ClientError::Decode {
        message: err.to_string(),
    })
}

fn map_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout {
            message: err.to_string(),
        }
    } else {
        ClientError::Network {
            message: err.to_string(),
        }
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let ErrorBody { message, errors } = serde_json::from_slice(body).unwrap_or_default();
    if status.is_server_error() {
        error!(status = status.as_u16(), ?message, "server error");
    }
    ClientError::Api {
        status: status.as_u16(),
        message,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:5000/api", &["contacts"], "http://localhost:5000/api/contacts")]
    #[case("http://localhost:5000/api/", &["contacts"], "http://localhost:5000/api/contacts")]
    #[case("http://example.test", &["contacts", "42"], "http://example.test/contacts/42")]
    fn endpoints_extend_the_base_path(
        #[case] base: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let client = HttpContactsClient::from_base_url(base).expect("client builds");
        let url = client.endpoint(segments).expect("endpoint");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn rejects_non_base_urls() {
        let error = HttpContactsClient::from_base_url("mailto:someone@example.com")
            .expect_err("mailto cannot be a base");
        assert!(matches!(error, ClientError::Configuration { .. }));
    }

    #[test]
    fn status_errors_keep_message_and_field_errors() {
        let body = br#"{"code":"invalid_request","message":"Validation failed","errors":{"phone":"Please enter a valid 10-digit phone number"}}"#;
        let error = map_status_error(StatusCode::BAD_REQUEST, body);
        let ClientError::Api {
            status,
            message,
            errors,
        } = error
        else {
            panic!("expected Api error");
        };
        assert_eq!(status, 400);
        assert_eq!(message.as_deref(), Some("Validation failed"));
        assert_eq!(
            errors
                .as_ref()
                .and_then(|map| map.get("phone"))
                .map(String::as_str),
            Some("Please enter a valid 10-digit phone number")
        );
    }

    #[test]
    fn status_errors_tolerate_non_json_bodies() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(
            error,
            ClientError::Api {
                status: 502,
                message: None,
                errors: None
            }
        );
    }
}
