//! Blocking HTTP adapter for the dispatch planner API.

use std::env;
use std::io::BufReader;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::feed::{self, FeedReader};
use crate::model::{
    OptimizeReply, OptimizeRequest, OptimizeResponse, RideRequest, SeedData, Vehicle,
};
use crate::stream::{ReasoningStream, RequestToken, StreamState};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Reads `FLEET_API_URL` and `FLEET_API_TIMEOUT_SECS`, falling back to
    /// the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("FLEET_API_URL").unwrap_or(defaults.base_url),
            timeout_secs: env::var("FLEET_API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("planner request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("planner response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct DispatchClient {
    config: ClientConfig,
    client: reqwest::blocking::Client,
}

impl DispatchClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Rides and vehicles for a scenario.
    pub fn seed(&self, scenario: &str) -> Result<SeedData, ClientError> {
        let seed = self
            .client
            .get(self.url("seed"))
            .query(&[("scenario", scenario)])
            .send()?
            .error_for_status()?
            .json::<SeedData>()?;

        debug!(
            scenario,
            rides = seed.rides.len(),
            vehicles = seed.vehicles.len(),
            "loaded seed data"
        );
        Ok(seed)
    }

    /// Requests a complete plan in one round trip.
    pub fn optimize(
        &self,
        rides: &[RideRequest],
        vehicles: &[Vehicle],
    ) -> Result<OptimizeResponse, ClientError> {
        let body = self
            .client
            .post(self.url("optimize"))
            .json(&OptimizeRequest { rides, vehicles })
            .send()?
            .error_for_status()?
            .text()?;

        let reply: OptimizeReply = serde_json::from_str(&body)?;
        Ok(reply.into())
    }

    /// Opens the reasoning stream and returns its events as they arrive.
    pub fn open_stream(
        &self,
        rides: &[RideRequest],
        vehicles: &[Vehicle],
    ) -> Result<FeedReader<BufReader<reqwest::blocking::Response>>, ClientError> {
        let response = self
            .client
            .post(self.url("optimize/stream"))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&OptimizeRequest { rides, vehicles })
            .send()?
            .error_for_status()?;

        Ok(FeedReader::new(BufReader::new(response)))
    }

    /// Starts a streamed optimize request on `stream`, superseding any
    /// request already in flight, and pumps it to completion.
    ///
    /// Connection failures end the request in `Failed`; they are not
    /// returned as errors.
    pub fn optimize_streaming<F>(
        &self,
        stream: &mut ReasoningStream,
        rides: &[RideRequest],
        vehicles: &[Vehicle],
        mut on_update: F,
    ) -> RequestToken
    where
        F: FnMut(&StreamState),
    {
        let token = stream.begin();
        on_update(stream.state());

        match self.open_stream(rides, vehicles) {
            Ok(events) => {
                feed::pump(stream, token, events, on_update);
            }
            Err(err) => {
                stream.fail(token, err.to_string());
                on_update(stream.state());
            }
        }
        token
    }

    /// Planner liveness check.
    pub fn health(&self) -> Result<bool, ClientError> {
        let response = self.client.get(self.url("health")).send()?;
        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_url_joins_paths() {
        let client = DispatchClient::new(ClientConfig {
            base_url: "http://planner.local/api/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.url("optimize/stream"), "http://planner.local/api/optimize/stream");
    }

    #[test]
    fn test_unreachable_planner_fails_stream() {
        // Nothing listens on port 9; the connection is refused immediately.
        let client = DispatchClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        })
        .unwrap();
        let mut stream = ReasoningStream::new();
        let mut updates = 0;
        let token = client.optimize_streaming(&mut stream, &[], &[], |_| updates += 1);

        assert_eq!(stream.current_token(), Some(token));
        assert!(stream.state().failure().is_some());
        assert_eq!(updates, 2);
    }
}
