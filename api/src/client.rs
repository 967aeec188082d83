//! HTTP client for the load-test result endpoint.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::schema::{parse_result_set_str, ResultSet};

pub const DEFAULT_BASE_URL: &str = "https://jwellary-backend-load-test-result.onrender.com";
pub const RESULT_PATH: &str = "/api/load-test-result";

/// Requests that have not completed by then fail with [`FetchError::Timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub fn default_endpoint() -> String {
    format!("{DEFAULT_BASE_URL}{RESULT_PATH}")
}

#[derive(Debug, Clone)]
pub struct ResultClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ResultClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET the endpoint and decode the body into a [`ResultSet`].
    pub async fn fetch(&self) -> Result<ResultSet, FetchError> {
        debug!(endpoint = %self.endpoint, "fetching load-test results");

        let body = match with_timeout(self.timeout, self.fetch_body()).await {
            Ok(body) => body,
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "load-test fetch failed");
                return Err(err);
            }
        };

        let set = parse_result_set_str(&body)?;
        info!(
            sites = set.len(),
            tests = set.iter().map(|site| site.tests.len()).sum::<usize>(),
            "load-test results received"
        );
        Ok(set)
    }

    async fn fetch_body(&self) -> Result<String, FetchError> {
        let request = self.http.get(&self.endpoint);
        #[cfg(not(target_arch = "wasm32"))]
        let request = request.timeout(self.timeout);

        let response = request
            .send()
            .await
            .map_err(|err| transport_error(err, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| transport_error(err, self.timeout))
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout.as_millis() as u64)
    } else {
        FetchError::Transport(err.to_string())
    }
}

// Native requests carry their own deadline via `RequestBuilder::timeout`.
#[cfg(not(target_arch = "wasm32"))]
async fn with_timeout<F, T>(_timeout: Duration, fut: F) -> Result<T, FetchError>
where
    F: std::future::Future<Output = Result<T, FetchError>>,
{
    fut.await
}

#[cfg(target_arch = "wasm32")]
async fn with_timeout<F, T>(timeout: Duration, fut: F) -> Result<T, FetchError>
where
    F: std::future::Future<Output = Result<T, FetchError>>,
{
    use futures::future::{select, Either};

    let millis = timeout.as_millis().min(u32::MAX as u128) as u32;
    let timer = gloo_timers::future::TimeoutFuture::new(millis);
    futures::pin_mut!(fut);
    futures::pin_mut!(timer);

    match select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(FetchError::Timeout(timeout.as_millis() as u64)),
    }
}
