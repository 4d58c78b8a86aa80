//! HTTP client for the transactions API.

use std::time::{Duration, Instant};

use reqwest::{
    Client as HttpClient, Response,
    multipart::{Form, Part},
};

use super::models::TransactionsResponse;

/// The resource that lists transactions along with the balance.
const TRANSACTIONS_PATH: &str = "transactions";
/// The resource that accepts CSV uploads.
const IMPORT_PATH: &str = "transactions/import";

/// The ways a request to the transactions API can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The API could not be reached, or the connection failed mid-request.
    #[error("could not reach the transactions API: {0}")]
    Network(String),

    /// The API answered with a non-2xx status code.
    #[error("the transactions API responded with status {0}")]
    Status(u16),

    /// The body of a successful response did not have the expected shape.
    #[error("the transactions API sent a malformed response: {0}")]
    MalformedResponse(String),
}

/// A client for the transactions API.
///
/// Cloning is cheap, clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// The request timeout used when none is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client for the API served at `base_url`, e.g. "http://localhost:3333".
    ///
    /// Requests that take longer than `timeout` fail with [ApiError::Network].
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::Network(error.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The URL the client sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Get the balance and every transaction.
    #[tracing::instrument(skip(self))]
    pub async fn get_transactions(&self) -> Result<TransactionsResponse, ApiError> {
        let start = Instant::now();
        let url = self.url(TRANSACTIONS_PATH);

        tracing::debug!("Fetching transactions from {url}");

        let response = self.http_client.get(&url).send().await.map_err(|error| {
            tracing::error!("could not fetch transactions: {error}");
            ApiError::Network(error.to_string())
        })?;
        let response = check_status(response)?;

        let body = response.bytes().await.map_err(|error| {
            tracing::error!("could not read the transactions response: {error}");
            ApiError::Network(error.to_string())
        })?;

        let listing = serde_json::from_slice::<TransactionsResponse>(&body).map_err(|error| {
            tracing::error!("could not parse the transactions response: {error}");
            ApiError::MalformedResponse(error.to_string())
        })?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            transaction_count = listing.transactions.len(),
            "Transactions fetched"
        );

        Ok(listing)
    }

    /// Upload a CSV file so the API imports the transactions in it.
    #[tracing::instrument(skip(self, contents), fields(size = contents.len()))]
    pub async fn import_transactions(
        &self,
        file_name: String,
        contents: Vec<u8>,
    ) -> Result<(), ApiError> {
        let form = Form::new().part("file", Part::bytes(contents).file_name(file_name));

        let response = self
            .http_client
            .post(self.url(IMPORT_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|error| {
                tracing::error!("could not upload CSV file: {error}");
                ApiError::Network(error.to_string())
            })?;

        check_status(response).map(|_| ())
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(
            status = status.as_u16(),
            "Transactions API request to {} failed",
            response.url()
        );
        Err(ApiError::Status(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        extract::Multipart,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::json;

    use crate::test_utils::{scenario_listing, spawn_stub_api, stub_api_client};

    use super::{ApiClient, ApiError};

    #[tokio::test]
    async fn fetches_listing() {
        let base_url = spawn_stub_api(scenario_listing()).await;
        let client = stub_api_client(&base_url);

        let listing = client.get_transactions().await.unwrap();

        assert_eq!(listing.balance.total, Some(800.0));
        let titles: Vec<&str> = listing
            .transactions
            .iter()
            .map(|transaction| transaction.title.as_str())
            .collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let base_url = spawn_stub_api(scenario_listing()).await;
        let client = stub_api_client(&format!("{base_url}/"));

        assert!(client.get_transactions().await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let router = Router::new().route(
            "/transactions",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let base_url = spawn_stub_api(router).await;

        let result = stub_api_client(&base_url).get_transactions().await;

        assert_eq!(result, Err(ApiError::Status(503)));
    }

    #[tokio::test]
    async fn unexpected_shape_is_malformed() {
        let router = Router::new().route(
            "/transactions",
            get(|| async { axum::Json(json!({ "items": [] })) }),
        );
        let base_url = spawn_stub_api(router).await;

        let result = stub_api_client(&base_url).get_transactions().await;

        assert!(
            matches!(result, Err(ApiError::MalformedResponse(_))),
            "want malformed response error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unreachable_api_is_a_network_error() {
        // Nothing listens on port 1.
        let client = ApiClient::new("http://127.0.0.1:1", ApiClient::DEFAULT_TIMEOUT).unwrap();

        let result = client.get_transactions().await;

        assert!(
            matches!(result, Err(ApiError::Network(_))),
            "want network error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn uploads_csv_as_multipart_file() {
        let router = Router::new().route(
            "/transactions/import",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                let name_ok = field.name() == Some("file");
                let file_name_ok = field.file_name() == Some("statement.csv");
                let contents = field.bytes().await.unwrap();

                if name_ok && file_name_ok && contents.as_ref() == b"title,value\n" {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );
        let base_url = spawn_stub_api(router).await;

        let result = stub_api_client(&base_url)
            .import_transactions("statement.csv".to_owned(), b"title,value\n".to_vec())
            .await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn rejected_upload_is_an_error() {
        let router = Router::new().route(
            "/transactions/import",
            post(|| async { StatusCode::BAD_REQUEST }),
        );
        let base_url = spawn_stub_api(router).await;

        let result = stub_api_client(&base_url)
            .import_transactions("statement.csv".to_owned(), Vec::new())
            .await;

        assert_eq!(result, Err(ApiError::Status(400)));
    }
}
