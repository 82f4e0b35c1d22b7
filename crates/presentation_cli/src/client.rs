//! HTTP client for the routing proxy
//!
//! Every call resolves to a value; failures are logged at `warn` and
//! reported as `success: false` (or `false` for health).

use std::time::Duration;

use domain::{Coordinate, RoutePlanRequest, RouteSummary, TimeEstimateRequest, TravelMode};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound for one proxy call; the proxy's own upstream timeout is 10s
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Reasons a proxy call did not produce a usable body
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decode failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a non-success status
    #[error("Proxy returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `error` field of the body, or the status line
        message: String,
    },
}

/// Outcome of a route planning call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRouteResult {
    /// Whether a route was obtained
    pub success: bool,
    /// The simplified route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteSummary>,
}

/// Outcome of a time estimate call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTimeResult {
    /// Whether an estimate was obtained
    pub success: bool,
    /// Travel time in whole minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<u64>,
    /// Total distance in kilometers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthBody {
    #[serde(default)]
    otp_connected: bool,
}

/// Client for the trekroute proxy
#[derive(Debug, Clone)]
pub struct RoutingApiClient {
    client: Client,
    base_url: String,
}

impl RoutingApiClient {
    /// Create a client for the proxy at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_client(client, base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Plan a route
    pub async fn plan_route(&self, request: &RoutePlanRequest) -> PlanRouteResult {
        match self.post_json("/plan", request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Route planning failed");
                PlanRouteResult::default()
            },
        }
    }

    /// Estimate travel time between two points
    pub async fn estimate_time(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: Option<TravelMode>,
    ) -> EstimateTimeResult {
        let request = TimeEstimateRequest {
            from: Some(from),
            to: Some(to),
            mode,
        };

        match self.post_json("/time", &request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Time estimate failed");
                EstimateTimeResult::default()
            },
        }
    }

    /// Whether the proxy reports a reachable upstream planner
    ///
    /// Reads `otpConnected` from the body regardless of status, since the
    /// proxy answers 503 with a well-formed body when the planner is down.
    pub async fn check_health(&self) -> bool {
        match self.fetch_health().await {
            Ok(body) => body.otp_connected,
            Err(e) => {
                warn!(error = %e, "Health check failed");
                false
            },
        }
    }

    async fn fetch_health(&self) -> Result<HealthBody, ClientError> {
        let response = self.client.get(self.endpoint("/health")).send().await?;
        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "Calling routing proxy");

        let response = self.client.post(&url).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
